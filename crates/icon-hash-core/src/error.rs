use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

/// Custom error types for the icon-hash library
#[derive(Error, Debug)]
pub enum Error {
    /// Discretization parameters outside their valid domain
    #[error("Invalid hash parameters: {0}")]
    InvalidParams(String),

    /// Feature vector the discretization cannot place in a bucket
    #[error("Invalid feature vector: {0}")]
    InvalidVector(String),

    /// Image buffer that is not an icon-sized grid
    #[error("Icon must be 11x11 pixels, got {width}x{height}")]
    IconSize { width: u32, height: u32 },

    /// Luma sample list that does not fill an icon grid
    #[error("Icon needs 121 luma samples, got {samples}")]
    InvalidIcon { samples: usize },

    /// Tolerance covers more buckets than a hash set may hold
    #[error("Hash set of {len} cubes exceeds the limit of {limit}")]
    SetTooLarge { len: usize, limit: usize },

    /// Positional packing does not fit in 64 bits
    #[error("Positional hash overflows u64 for {num_buckets} buckets over {dims} dimensions")]
    HashOverflow { num_buckets: usize, dims: usize },

    /// Invalid configuration error
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// I/O operation error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
