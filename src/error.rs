use thiserror::Error;

/// Problems found while validating a probability configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("'{section}.{key}' must be a probability between 0.0 and 1.0 (got {value})")]
    InvalidProbability {
        section: &'static str,
        key: &'static str,
        value: f64,
    },

    #[error("'{section}' delete, insert and replace must not sum above 1.0 (got {sum})")]
    ExclusiveSumExceeded { section: &'static str, sum: f64 },
}

/// Errors raised at the engine boundary.
#[derive(Debug, Error)]
pub enum MisspellError {
    #[error("input is not valid UTF-8 text: {0}")]
    InvalidInput(#[from] std::string::FromUtf8Error),
}
