pub mod error;
pub mod types;
pub mod time;

pub use error::TimingError;
pub use time::{now_seconds, RequestStart};
pub use types::*;
