use std::sync::atomic::{AtomicBool, Ordering};

static SILENT: AtomicBool = AtomicBool::new(false);

pub fn set_silent(silent: bool) {
    SILENT.store(silent, Ordering::Relaxed);
}

/// Print a progress/status line unless `--silent` was given.
/// Final results and errors bypass this and always print.
pub fn status(msg: String) {
    if !SILENT.load(Ordering::Relaxed) {
        println!("{}", msg);
    }
}
