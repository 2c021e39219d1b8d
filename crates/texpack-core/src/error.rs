use thiserror::Error;

#[derive(Debug, Error)]
pub enum TexPackError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error(
        "Maximum sheet size {max_width}x{max_height} is smaller than minimum {min_width}x{min_height}"
    )]
    InvalidSizeBounds {
        min_width: u32,
        min_height: u32,
        max_width: u32,
        max_height: u32,
    },
    #[error("Unknown layout '{0}' (expected shelf, stack, max-rects or skyline)")]
    UnknownLayout(String),
    #[error("Layout '{0}' is not implemented")]
    NotImplemented(&'static str),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TexPackError>;
