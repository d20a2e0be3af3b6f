// Error handling utilities for consistent error messages and exit codes

use std::process;

use crate::error::GcError;

/// Exit with a user error (exit code 1)
/// User errors are for invalid input, missing or unreadable sheets, etc.
pub fn user_error(message: &str) -> ! {
    eprintln!("Error: {}", message);
    process::exit(1);
}

/// Exit with an internal error (exit code >1)
/// Internal errors are for unexpected failures (I/O on stdout, serialization, ...)
pub fn internal_error(message: &str) -> ! {
    eprintln!("Internal error: {}", message);
    process::exit(2);
}

/// True when any error in the chain is one of ours, i.e. something the user can fix or retry
pub fn is_user_error(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| cause.downcast_ref::<GcError>().is_some())
}

/// Validate a watch interval in seconds
pub fn validate_interval(value: &str) -> Result<u64, String> {
    value.parse::<u64>()
        .map_err(|_| format!("Invalid interval: '{}'. Interval must be a number of seconds.", value))
        .and_then(|secs| {
            if secs > 0 {
                Ok(secs)
            } else {
                Err("Invalid interval: 0. Interval must be positive.".to_string())
            }
        })
}
