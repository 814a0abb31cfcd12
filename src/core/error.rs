use thiserror::Error;

#[derive(Error, Debug)]
pub enum SpatialError {
    #[error("Creature not found: {0}")]
    NotFound(String),

    #[error("Creature id already on the battlefield: {0}")]
    DuplicateId(String),

    #[error("Position ({x}, {y}) is outside the {width_feet}x{height_feet} ft battlefield")]
    OutOfBounds {
        x: f64,
        y: f64,
        width_feet: f64,
        height_feet: f64,
    },

    #[error("Invalid area shape: {0}")]
    InvalidShape(String),

    #[error("Invalid battlefield dimensions: {width}x{height} (each side must be 1 to {max} squares)")]
    InvalidDimensions { width: i64, height: i64, max: u32 },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),
}

impl SpatialError {
    /// Short machine-readable kind, used by the dispatch layer in responses
    pub fn kind(&self) -> &'static str {
        match self {
            SpatialError::NotFound(_) => "not_found",
            SpatialError::DuplicateId(_) => "duplicate_id",
            SpatialError::OutOfBounds { .. } => "out_of_bounds",
            SpatialError::InvalidShape(_) => "invalid_shape",
            SpatialError::InvalidDimensions { .. } => "invalid_dimensions",
            SpatialError::InvalidRequest(_) => "invalid_request",
            SpatialError::Config(_) => "config",
            SpatialError::IoError(_) => "io",
            SpatialError::SerdeError(_) => "serde",
            SpatialError::TomlError(_) => "toml",
        }
    }
}

pub type Result<T> = std::result::Result<T, SpatialError>;
