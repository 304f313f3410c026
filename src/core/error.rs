use thiserror::Error;

#[derive(Error, Debug)]
pub enum AiError {
    #[error("Building type not in catalog: {0}")]
    MissingBuildingType(String),

    #[error("Research type not in catalog: {0}")]
    MissingResearchType(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid scenario: {0}")]
    InvalidScenario(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AiError>;
