use thiserror::Error;

/// Fatal failure of the compress selector: the original input could not be
/// decoded. Failures inside individual strategies are absorbed and logged
/// instead of surfacing here.
#[derive(Error, Debug)]
pub enum CompressError {
    #[error("Failed to decode input document: {0}")]
    Decode(String),
}

/// Errors from the document operations (split, merge, info) and from the
/// internals of individual compress strategies.
#[derive(Error, Debug)]
pub enum PdfError {
    #[error("Failed to decode document: {0}")]
    Decode(String),

    #[error("Failed to encode document: {0}")]
    Encode(String),

    #[error("Page {page} is out of range (document has {count} pages)")]
    PageOutOfRange { page: u32, count: u32 },

    #[error("Invalid page range {start}-{end}")]
    InvalidPageRange { start: u32, end: u32 },

    #[error("No page ranges specified")]
    NoRanges,

    #[error("Need at least 2 documents to merge, got {0}")]
    NotEnoughInputs(usize),

    #[error("Input {0} has no pages")]
    EmptyDocument(usize),
}

/// Errors parsing a page-range specification like "1-3,7,10-12".
#[derive(Error, Debug)]
pub enum RangeError {
    #[error("Invalid page range: {0}")]
    InvalidRange(String),
}
