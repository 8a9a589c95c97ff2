pub mod cli;
pub mod error;
pub mod ops;

pub use cli::{Args, CompressionLevel};
pub use error::{CompressError, PdfError, RangeError};
pub use ops::compress::{compress, Compression};
pub use ops::document::page_count;
pub use ops::info::{summarize, DocumentSummary};
pub use ops::merge::merge;
pub use ops::split::{split, PageRange};
