use thiserror::Error as ThisError;

/// Errors raised by the outer surfaces of the security system (storage, CLI).
///
/// The alarm controller itself never fails; these only come from loading
/// and saving state or from resolving user input.
#[derive(ThisError, Debug)]
pub enum SecurityError {
    #[error("Unknown sensor: {0}")]
    UnknownSensor(String),

    #[error("Sensor already exists: {0}")]
    DuplicateSensor(String),

    #[error(transparent)]
    IoError(#[from] std::io::Error),

    #[error(transparent)]
    SerdeJsonError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SecurityError>;
