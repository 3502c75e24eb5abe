use thiserror::Error;

#[derive(Debug, Error)]
pub enum RaycastError {
    #[error("ray direction must be non-zero and finite")]
    InvalidDirection,
    #[error("ray origin must be finite")]
    InvalidOrigin,
    #[error("max distance must be positive and finite, got {0}")]
    InvalidDistance(f32),
    #[error("invalid grid: {0}")]
    InvalidGrid(String),
    #[error("out of bounds: {0}")]
    OutOfBounds(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}
