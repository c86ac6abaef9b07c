//! Process hardening for hosts that hold derived secrets
//!
//! A crash while a private key or WIF export is in memory must not leave a
//! core file behind. [`disable_core_dumps`] sets `RLIMIT_CORE` to zero once per
//! process. Failures are reported through `log` and do not abort the host,
//! since containers and unprivileged users may not permit the call.

use std::sync::atomic::{AtomicBool, Ordering};

static CORE_DUMPS_DISABLED: AtomicBool = AtomicBool::new(false);

/// Disable core dumps for the current process.
///
/// Returns `true` once core dumps are known to be off. Later calls return
/// `true` without touching the limit again.
pub fn disable_core_dumps() -> bool {
    if CORE_DUMPS_DISABLED.load(Ordering::SeqCst) {
        return true;
    }

    let disabled = platform::set_core_limit_zero();
    if disabled {
        CORE_DUMPS_DISABLED.store(true, Ordering::SeqCst);
    }
    disabled
}

#[cfg(unix)]
mod platform {
    pub fn set_core_limit_zero() -> bool {
        let rlim = libc::rlimit {
            rlim_cur: 0,
            rlim_max: 0,
        };
        // SAFETY: setrlimit only reads the struct passed by reference
        let result = unsafe { libc::setrlimit(libc::RLIMIT_CORE, &rlim) };
        if result != 0 {
            log::warn!(
                "Failed to disable core dumps: {}",
                std::io::Error::last_os_error()
            );
            return false;
        }
        log::debug!("Core dumps disabled");
        true
    }
}

#[cfg(not(unix))]
mod platform {
    pub fn set_core_limit_zero() -> bool {
        log::warn!("Core dump prevention is not supported on this platform");
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disable_core_dumps_is_idempotent() {
        // May legitimately fail in sandboxes; a success must stick.
        if disable_core_dumps() {
            assert!(disable_core_dumps());
        }
    }
}
