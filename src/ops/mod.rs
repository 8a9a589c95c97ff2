//! PDF document operations

pub mod compress;
pub mod document;
pub mod info;
pub mod merge;
pub mod split;
pub mod strategy;

// Re-export commonly used items for convenience
pub use compress::{compress, Compression};
pub use document::page_count;
pub use info::{summarize, DocumentSummary};
pub use merge::merge;
pub use split::{split, PageRange};
