use thiserror::Error;

/// An environment variable required by the application is not set.
#[derive(Debug, Error)]
#[error("missing environment variable: {0}")]
pub struct MissingVarError(pub String);

/// Reads an environment variable, returning a structured error if it's unset.
///
/// Thin wrapper around `std::env::var` so callers get a typed error
/// instead of the generic `VarError`.
pub fn var(name: &str) -> Result<String, MissingVarError> {
    std::env::var(name).map_err(|_| MissingVarError(name.to_string()))
}

/// Reads an environment variable, falling back to `default` if it's unset.
pub fn var_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}
