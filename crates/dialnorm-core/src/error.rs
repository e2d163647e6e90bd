use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("the provided timezone does not exist: {timezone} (parameter: {parameter})")]
    InvalidTimezone {
        parameter: &'static str,
        timezone: String,
    },
    #[error("invalid region timezone dataset: {0}")]
    InvalidDataset(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;
