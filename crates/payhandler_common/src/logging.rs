//! Logging utilities for PayHandler.
//!
//! Every binary calls [`init_with_directive`] once at startup. `RUST_LOG`
//! always wins over the configured directive.

use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Directive used when neither `RUST_LOG` nor the config names a level.
pub const DEFAULT_DIRECTIVE: &str = "info";

/// Initialize the tracing subscriber with a default filter directive,
/// e.g. `"debug"` or `"payhandler_paypal=trace,info"`.
///
/// Calling it twice is harmless; the second call keeps the first subscriber.
pub fn init_with_directive(directive: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(directive))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

    let result = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
        )
        .with(filter)
        .try_init();

    if result.is_ok() {
        info!("Logging initialized with directive: {}", directive);
    }
}

/// Log a result, with different messages for success and error cases.
///
/// Returns the original result so it can be used in a chain.
pub fn log_result<T, E: std::fmt::Display>(
    result: Result<T, E>,
    success_message: &str,
    error_context: &str,
) -> Result<T, E> {
    match &result {
        Ok(_) => info!("{}", success_message),
        Err(e) => error!("{}: {}", error_context, e),
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_twice_does_not_panic() {
        init_with_directive("debug");
        init_with_directive("not a [valid directive");
    }

    #[test]
    fn test_log_result_passes_value_through() {
        let ok: Result<u8, String> = log_result(Ok(7), "done", "failed");
        assert_eq!(ok, Ok(7));
        let err: Result<u8, String> = log_result(Err("boom".into()), "done", "failed");
        assert_eq!(err, Err("boom".to_string()));
    }
}
