//! glibc-check CLI support library.
//!
//! Command implementations live in [`commands`]; `main.rs` only parses
//! arguments and maps command outcomes to process exit codes.

pub mod commands;

/// Install the stderr logger, honouring `RUST_LOG` and defaulting to `warn`.
pub fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
}

/// Exit status for an `assert-all` run that found `violations` failing versions.
///
/// The status is the violation count, capped so that it never reads as
/// success: Unix keeps only the low 8 bits of a status, so 256 would become 0.
pub fn violation_exit_code(violations: usize) -> i32 {
    #[cfg(unix)]
    const MAX_STATUS: usize = 255;
    #[cfg(not(unix))]
    const MAX_STATUS: usize = i32::MAX as usize;

    violations.min(MAX_STATUS) as i32
}
