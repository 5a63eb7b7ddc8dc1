use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("invalid color: {0:?}")]
    InvalidColor(String),

    #[error("invalid transform: {0:?}")]
    InvalidTransform(String),

    #[error("config error: {0}")]
    Config(String),
}

impl From<toml::de::Error> for CoreError {
    fn from(e: toml::de::Error) -> Self {
        CoreError::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;
