//! Test doubles for [`ProcessRunner`].

use std::cell::RefCell;
use std::fs;
use std::io;

use envboot_core::layout::EnvLayout;

use crate::process::{ExitOutcome, Invocation, ProcessRunner};

type Handler = Box<dyn Fn(&Invocation) -> io::Result<ExitOutcome>>;

/// Records every invocation and answers with a scripted handler.
pub(crate) struct RecordingRunner {
    calls: RefCell<Vec<Invocation>>,
    handler: Handler,
}

impl RecordingRunner {
    pub(crate) fn new(handler: impl Fn(&Invocation) -> io::Result<ExitOutcome> + 'static) -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            handler: Box::new(handler),
        }
    }

    /// Every child exits with `code`.
    pub(crate) fn exiting(code: i32) -> Self {
        Self::new(move |_| Ok(ExitOutcome::Code(code)))
    }

    /// Behaves like a working `python -m venv`: writes the sentinel and the
    /// interpreter. Every other child exits 0.
    pub(crate) fn creating(layout: &EnvLayout) -> Self {
        let layout = layout.clone();
        Self::new(move |inv| {
            if is_venv_creation(inv) {
                fs::create_dir_all(layout.bin_dir())?;
                fs::write(layout.sentinel(), "# activate\n")?;
                fs::write(layout.python(), "")?;
            }
            Ok(ExitOutcome::Code(0))
        })
    }

    pub(crate) fn calls(&self) -> Vec<Invocation> {
        self.calls.borrow().clone()
    }
}

impl ProcessRunner for RecordingRunner {
    fn name(&self) -> &str {
        "recording"
    }

    fn run(&self, invocation: &Invocation) -> io::Result<ExitOutcome> {
        self.calls.borrow_mut().push(invocation.clone());
        (self.handler)(invocation)
    }
}

pub(crate) fn is_venv_creation(inv: &Invocation) -> bool {
    inv.args.len() >= 2 && inv.args[0] == "-m" && inv.args[1] == "venv"
}

pub(crate) fn is_pip_install(inv: &Invocation) -> bool {
    inv.args.len() >= 4 && inv.args[0] == "-m" && inv.args[1] == "pip" && inv.args[2] == "install"
}

/// A file `which` accepts as the configured base interpreter.
#[cfg(unix)]
pub(crate) fn fake_python(dir: &std::path::Path) -> std::path::PathBuf {
    use std::os::unix::fs::PermissionsExt;
    let path = dir.join("python3-fake");
    fs::write(&path, "#!/bin/sh\nexit 0\n").unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}
