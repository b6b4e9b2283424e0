//! envboot 统一配置层
//!
//! All environment variable reads go through this module; the rest of the
//! workspace sees typed config structs instead of calling `std::env::var`.
//!
//! - `loader`: `.env` parsing and the `EnvSource` lookup chain
//! - `schema`: `BootstrapConfig`, `ObservabilityConfig`
//! - `env_keys`: key constants

pub mod env_keys;
pub mod loader;
pub mod schema;

pub use loader::{load_dotenv, load_dotenv_from_dir, parse_dotenv, EnvSource};
pub use schema::{BootstrapConfig, ObservabilityConfig};
