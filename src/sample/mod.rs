//! Sample records, lifecycle classification, and persistence

pub mod lifecycle;
pub mod record;
pub mod store;

pub use lifecycle::{classify, format_hms, progress_percent, SampleStatus, DEFAULT_GRACE_SECS};
pub use record::Sample;
pub use store::SampleStore;
