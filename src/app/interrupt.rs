//! Process-level interrupt flag (Ctrl-C / SIGTERM).

use std::sync::atomic::{AtomicBool, Ordering};

static INTERRUPTED: AtomicBool = AtomicBool::new(false);

pub fn is_interrupted() -> bool {
    INTERRUPTED.load(Ordering::SeqCst)
}

/// Route Ctrl-C (and SIGTERM / console close) to the interrupt flag so the
/// loop can shut down and release the serial port.
pub fn install() -> Result<(), ctrlc::Error> {
    ctrlc::set_handler(|| INTERRUPTED.store(true, Ordering::SeqCst))
}
