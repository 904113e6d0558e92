use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Transport error: {0}")]
    TransportError(String),
    
    #[error("Validation error: {0}")]
    ValidationError(String),
    
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl StoreError {
    pub fn is_transport(&self) -> bool {
        matches!(self, StoreError::TransportError(_))
    }
}

impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() {
            StoreError::ConfigError(err.to_string())
        } else {
            StoreError::TransportError(err.to_string())
        }
    }
}
