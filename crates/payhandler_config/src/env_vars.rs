//! Environment variable handling for PayHandler configuration.
//!
//! Plain settings are read through the `config` crate using the
//! `PAYHANDLER__SECTION__KEY` pattern. Secrets are kept out of the config
//! files: a value of `secret_from_env` is swapped for the variable named
//! after its path, e.g. `paypal.client_secret` becomes
//! `PAYHANDLER_SECRET_PAYPAL_CLIENT_SECRET` (or the legacy
//! `PAYPAL_CLIENT_SECRET`).

use serde_json::Value;
use std::env;
use tracing::warn;

/// The prefix for configuration environment variables
pub const DEFAULT_PREFIX: &str = "PAYHANDLER";

/// The prefix for secret environment variables
pub const SECRET_PREFIX: &str = "PAYHANDLER_SECRET";

/// The separator for configuration environment variables
pub const CONFIG_SEPARATOR: &str = "__";

/// The separator for secret environment variables
pub const SECRET_SEPARATOR: &str = "_";

/// Marker value replaced by an environment variable at load time.
pub const SECRET_MARKER: &str = "secret_from_env";

/// Convert a configuration path to an environment variable name
///
/// `"server.host"` becomes `"PAYHANDLER__SERVER__HOST"`.
pub fn config_path_to_env_var(path: &str) -> String {
    let path = path.replace('.', CONFIG_SEPARATOR);
    format!("{}{}{}", DEFAULT_PREFIX, CONFIG_SEPARATOR, path).to_uppercase()
}

/// Convert a secret path to an environment variable name
///
/// `"paypal.client_secret"` becomes `"PAYHANDLER_SECRET_PAYPAL_CLIENT_SECRET"`.
pub fn secret_path_to_env_var(path: &str) -> String {
    let path = path.replace('.', SECRET_SEPARATOR);
    format!("{}{}{}", SECRET_PREFIX, SECRET_SEPARATOR, path).to_uppercase()
}

/// Convert a secret path to the unprefixed legacy name, e.g. `"PAYPAL_CLIENT_SECRET"`.
pub fn legacy_secret_path_to_env_var(path: &str) -> String {
    path.replace('.', SECRET_SEPARATOR).to_uppercase()
}

/// Check if a path is a secret path based on its name.
pub fn is_secret_path(path: &str) -> bool {
    let path_lower = path.to_lowercase();
    path_lower.contains("secret")
        || path_lower.contains("key")
        || path_lower.contains("password")
        || path_lower.contains("token")
}

/// Get an environment variable for a secret path, falling back to the legacy name.
pub fn get_secret_env_var(path: &str) -> Option<String> {
    env::var(secret_path_to_env_var(path))
        .or_else(|_| env::var(legacy_secret_path_to_env_var(path)))
        .ok()
}

/// Get an environment variable for a path, secret or not.
pub fn get_env_var(path: &str) -> Option<String> {
    if is_secret_path(path) {
        get_secret_env_var(path)
    } else {
        env::var(config_path_to_env_var(path)).ok()
    }
}

/// Replace every `secret_from_env` string inside `value` with its environment variable.
///
/// Returns the paths whose variable could not be found; those keep the marker.
pub fn inject_env_vars(value: &mut Value) -> Vec<String> {
    fn walk(path: &mut Vec<String>, obj: &mut Value, missing: &mut Vec<String>) {
        match obj {
            Value::Object(map) => {
                for (k, v) in map.iter_mut() {
                    path.push(k.clone());
                    walk(path, v, missing);
                    path.pop();
                }
            }
            Value::String(s) if s == SECRET_MARKER => {
                let path_str = path.join(".");
                match get_env_var(&path_str) {
                    Some(env_val) => *s = env_val,
                    None => {
                        warn!("env var for {} not found", path_str);
                        missing.push(path_str);
                    }
                }
            }
            _ => {}
        }
    }

    let mut missing = Vec::new();
    walk(&mut Vec::new(), value, &mut missing);
    missing
}
