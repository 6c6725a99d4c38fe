use std::io;
use std::mem::MaybeUninit;
use std::sync::atomic::{AtomicBool, Ordering};

use signal_hook::consts::SIGINT;
use signal_hook::low_level;

use super::ProcessError;

static INTERRUPTED: AtomicBool = AtomicBool::new(false);

/// Runs in signal-handler context: set the flag, write one newline byte.
/// Both actions are async-signal-safe; nothing else may happen here.
fn handle_interrupt() {
    INTERRUPTED.store(true, Ordering::SeqCst);
    unsafe {
        libc::write(libc::STDOUT_FILENO, b"\n".as_ptr().cast(), 1);
    }
}

/// Installs the prompt-time SIGINT handler. Everything that reacts to the
/// interrupt happens later, on the main thread of control.
pub fn install_interrupt_handler() -> Result<(), ProcessError> {
    unsafe { low_level::register(SIGINT, handle_interrupt) }
        .map_err(|e| ProcessError::SignalError(e.to_string()))?;
    Ok(())
}

/// Clears and returns the pending-interrupt flag.
pub fn take_interrupt() -> bool {
    INTERRUPTED.swap(false, Ordering::SeqCst)
}

/// Ignores SIGINT for the guard's lifetime and restores whatever
/// disposition was in effect before.
///
/// Held by the parent across spawn and wait, so an interactive interrupt
/// reaches only the foreground child (which reset SIGINT to default before
/// exec).
pub struct InterruptGuard {
    saved: libc::sigaction,
}

impl InterruptGuard {
    pub fn ignore() -> Result<Self, ProcessError> {
        let mut ignore: libc::sigaction = unsafe { std::mem::zeroed() };
        ignore.sa_sigaction = libc::SIG_IGN;
        ignore.sa_flags = 0;
        unsafe {
            libc::sigemptyset(&mut ignore.sa_mask);
        }

        let mut saved = MaybeUninit::<libc::sigaction>::uninit();
        if unsafe { libc::sigaction(libc::SIGINT, &ignore, saved.as_mut_ptr()) } != 0 {
            return Err(ProcessError::SignalError(
                io::Error::last_os_error().to_string(),
            ));
        }

        Ok(Self {
            saved: unsafe { saved.assume_init() },
        })
    }
}

impl Drop for InterruptGuard {
    fn drop(&mut self) {
        unsafe {
            libc::sigaction(libc::SIGINT, &self.saved, std::ptr::null_mut());
        }
    }
}
