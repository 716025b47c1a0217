use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigurationError {
    #[error("cannot read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot parse configuration: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("invalid value {value} for '{field}'")]
    InvalidValue { field: &'static str, value: String },
}
