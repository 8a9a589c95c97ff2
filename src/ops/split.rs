//! Page-range extraction: one output document per requested range.

use lopdf::Document;

use crate::error::PdfError;

use super::document::{load_document, save_bytes};

/// An inclusive, 1-indexed run of pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRange {
    pub start: u32,
    pub end: u32,
}

/// Extract each range into its own document, preserving page order.
///
/// All ranges are validated against the source before any output is
/// produced, so a single bad range fails the whole call instead of
/// yielding a partial set of files.
pub fn split(input: &[u8], ranges: &[PageRange]) -> Result<Vec<Vec<u8>>, PdfError> {
    if ranges.is_empty() {
        return Err(PdfError::NoRanges);
    }

    let doc = load_document(input)?;
    let page_count = doc.get_pages().len() as u32;

    for range in ranges {
        if range.start > range.end {
            return Err(PdfError::InvalidPageRange {
                start: range.start,
                end: range.end,
            });
        }
        if range.start == 0 {
            return Err(PdfError::PageOutOfRange {
                page: 0,
                count: page_count,
            });
        }
        if range.end > page_count {
            return Err(PdfError::PageOutOfRange {
                page: range.end,
                count: page_count,
            });
        }
    }

    log::info!(
        "splitting {} pages into {} part(s)",
        page_count,
        ranges.len()
    );

    ranges
        .iter()
        .map(|range| extract_range(&doc, *range, page_count))
        .collect()
}

fn extract_range(doc: &Document, range: PageRange, page_count: u32) -> Result<Vec<u8>, PdfError> {
    let mut part = doc.clone();

    let delete: Vec<u32> = (1..=page_count)
        .filter(|page| *page < range.start || *page > range.end)
        .collect();
    part.delete_pages(&delete);

    part.prune_objects();
    part.compress();
    save_bytes(&mut part)
}
