use thiserror::Error;

/// Raised when options cannot describe a drawable dial.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("`{field}` must be a finite number, got {value}")]
    NotFinite { field: &'static str, value: f64 },

    #[error("max ({max}) must be greater than min ({min})")]
    EmptyRange { min: f64, max: f64 },

    #[error("`{field}` must be positive, got {value}")]
    NotPositive { field: &'static str, value: f64 },

    #[error("`{field}` must lie within [{low}, {high}], got {value}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        low: f64,
        high: f64,
    },

    #[error("`{field}` must be at least {minimum}, got {value}")]
    TooFewTicks {
        field: &'static str,
        minimum: usize,
        value: usize,
    },

    #[error("zone {index} has bounds {from}..{to}; expected 0 <= from <= to <= 1")]
    InvalidZone { index: usize, from: f64, to: f64 },

    #[error("invalid color `{0}`; expected #rgb or #rrggbb")]
    InvalidColor(String),

    #[error("malformed options: {0}")]
    Json(String),
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Json(err.to_string())
    }
}

/// Raised when a scene cannot be turned into pixels.
#[derive(Debug, Error)]
pub enum RasterError {
    #[error("SVG parse error: {0}")]
    Parse(String),

    #[error("cannot allocate a {width}x{height} pixmap")]
    Pixmap { width: u32, height: u32 },

    #[error("frame holds {actual} bytes, {expected} needed")]
    FrameSize { expected: usize, actual: usize },
}
