mod error;
mod link;
mod options;
mod outcome;
mod target;

pub use error::ErrorKind;
pub use link::{LinkResult, LinkStatus};
pub use options::{
    CheckOptions, DEFAULT_ALIVE_STATUS_CODE, DEFAULT_FALLBACK_RETRY_DELAY,
    DEFAULT_PARALLEL_REQUESTS, DEFAULT_RETRY_COUNT, DEFAULT_TIMEOUT, GlobalOptions, HttpHeaders,
    IgnorePattern, ReplacementPattern,
};
pub use outcome::{BatchResult, RunOutcome};
pub use target::{ContentSource, Target};

/// The `Result` type used throughout this crate
pub type Result<T> = std::result::Result<T, crate::ErrorKind>;
