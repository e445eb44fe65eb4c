//! Per-request timing registry: named marks and measures, retrieved in chronological order.

pub mod clock;
pub mod registry;

pub use clock::{Clock, ManualClock, SystemClock};
pub use common::{Entry, EntryType, RequestStart, TimingError};
pub use registry::{TimingRegistry, REQUEST_START};
