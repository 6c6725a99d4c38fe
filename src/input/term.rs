use std::io;
use std::mem::MaybeUninit;
use std::sync::OnceLock;

use libc::{ECHO, ICANON, STDIN_FILENO, TCSANOW, VMIN, VTIME};

static ORIGINAL_TERMIOS: OnceLock<libc::termios> = OnceLock::new();

/// Switches stdin to raw mode: no echo, no line buffering, one byte per
/// read. `Drop` restores the saved state, so acquisition and release stay
/// paired on every exit path out of the read loop.
///
/// The first switch also registers an atexit hook; if the process dies
/// without unwinding, the terminal still comes back usable.
pub struct RawModeGuard {
    saved: libc::termios,
}

impl RawModeGuard {
    pub fn new() -> io::Result<Self> {
        let mut saved = MaybeUninit::<libc::termios>::uninit();
        if unsafe { libc::tcgetattr(STDIN_FILENO, saved.as_mut_ptr()) } != 0 {
            return Err(io::Error::last_os_error());
        }
        let saved = unsafe { saved.assume_init() };

        if ORIGINAL_TERMIOS.set(saved).is_ok() {
            unsafe {
                libc::atexit(restore_terminal);
            }
        }

        let mut raw = saved;
        raw.c_lflag &= !(ECHO | ICANON);
        raw.c_cc[VMIN] = 1;
        raw.c_cc[VTIME] = 0;
        if unsafe { libc::tcsetattr(STDIN_FILENO, TCSANOW, &raw) } != 0 {
            return Err(io::Error::last_os_error());
        }

        Ok(Self { saved })
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        unsafe {
            libc::tcsetattr(STDIN_FILENO, TCSANOW, &self.saved);
        }
    }
}

extern "C" fn restore_terminal() {
    if let Some(saved) = ORIGINAL_TERMIOS.get() {
        unsafe {
            libc::tcsetattr(STDIN_FILENO, TCSANOW, saved);
        }
    }
}
