pub mod clock;
pub mod timer;

pub use clock::{ManualClock, SystemClock, TimeSource};
pub use timer::{RefreshTimer, DEFAULT_REFRESH_INTERVAL};
