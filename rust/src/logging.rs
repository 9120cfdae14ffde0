//! Verbosity-gated diagnostics for network editing and computation.
//!
//! Messages go to stderr. A disabled level costs one integer comparison.
//! - 0: SILENT
//! - 1: CHANGES (events/activities added or removed, compute results)
//! - 2: CHECKS (rejected mutations, failed validation)
//! - 3: DEBUG (per-event forward and backward pass values)

pub const VERBOSITY_SILENT: u8 = 0;
pub const VERBOSITY_CHANGES: u8 = 1;
pub const VERBOSITY_CHECKS: u8 = 2;
pub const VERBOSITY_DEBUG: u8 = 3;

/// Log a change to the network or a compute result (verbosity >= 1).
#[macro_export]
macro_rules! log_changes {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_CHANGES {
            eprintln!("[cpm] {}", format_args!($($arg)*));
        }
    };
}

/// Log a rejected operation (verbosity >= 2).
#[macro_export]
macro_rules! log_checks {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_CHECKS {
            eprintln!("[cpm] {}", format_args!($($arg)*));
        }
    };
}

/// Log pass internals (verbosity >= 3).
#[macro_export]
macro_rules! log_debug {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_DEBUG {
            eprintln!("[cpm]   {}", format_args!($($arg)*));
        }
    };
}

/// Log `err` at CHECKS level and hand it back, for use in `map_err`/`return Err`.
pub(crate) fn rejected<E: std::fmt::Display>(verbosity: u8, err: E) -> E {
    log_checks!(verbosity, "rejected: {}", err);
    err
}
