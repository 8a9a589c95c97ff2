//! Concatenate documents, in input order, under a single new page tree.

use lopdf::Document;

use crate::error::PdfError;

use super::document::{save_bytes, PageTreeBuilder};

/// Merge two or more decoded byte buffers into one document.
///
/// Inputs are appended in slice order; the output's page count is the sum
/// of the inputs'. Any input that fails to decode or has no pages fails
/// the whole merge.
pub fn merge(inputs: &[Vec<u8>]) -> Result<Vec<u8>, PdfError> {
    if inputs.len() < 2 {
        return Err(PdfError::NotEnoughInputs(inputs.len()));
    }

    let mut builder = PageTreeBuilder::new();
    for (index, bytes) in inputs.iter().enumerate() {
        let doc = Document::load_mem(bytes)
            .map_err(|e| PdfError::Decode(format!("input {}: {}", index + 1, e)))?;
        let pages = doc.get_pages().len();
        if pages == 0 {
            return Err(PdfError::EmptyDocument(index + 1));
        }
        log::info!("merging input {} ({} pages)", index + 1, pages);
        builder.append(doc);
    }

    let mut merged = builder.finish();
    merged.compress();
    save_bytes(&mut merged)
}
