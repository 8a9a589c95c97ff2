//! Strategy descriptors for the re-serialization selector.
//!
//! Each aggressiveness level maps to an ordered table of descriptors; one
//! uniform interpreter executes them all. Declaration order doubles as the
//! tie-break order during selection.

use lopdf::Document;

use crate::cli::CompressionLevel;
use crate::error::PdfError;

use super::document::{rebuild_document, save_bytes, strip_metadata};

/// One candidate re-serialization, fully described by its configuration.
#[derive(Debug, Clone, Copy)]
pub struct Strategy {
    pub name: &'static str,
    /// Copy all pages into a freshly created document before encoding.
    pub rebuild: bool,
    /// Drop the Info dictionary and XMP metadata.
    pub strip_metadata: bool,
    /// Flate-pack streams on the way out.
    pub pack_streams: bool,
    /// Decode and re-encode the strategy's own output this many times.
    pub passes: u32,
}

const LOW: &[Strategy] = &[
    Strategy {
        name: "strip-metadata",
        rebuild: false,
        strip_metadata: true,
        pack_streams: false,
        passes: 1,
    },
    Strategy {
        name: "rebuild",
        rebuild: true,
        strip_metadata: false,
        pack_streams: false,
        passes: 1,
    },
];

const BALANCED: &[Strategy] = &[
    Strategy {
        name: "rebuild",
        rebuild: true,
        strip_metadata: false,
        pack_streams: false,
        passes: 1,
    },
    Strategy {
        name: "rebuild-packed",
        rebuild: true,
        strip_metadata: false,
        pack_streams: true,
        passes: 1,
    },
    Strategy {
        name: "rebuild-packed-stripped",
        rebuild: true,
        strip_metadata: true,
        pack_streams: true,
        passes: 1,
    },
];

const HIGH: &[Strategy] = &[
    Strategy {
        name: "rebuild-packed",
        rebuild: true,
        strip_metadata: false,
        pack_streams: true,
        passes: 1,
    },
    Strategy {
        name: "rebuild-packed-2pass",
        rebuild: true,
        strip_metadata: false,
        pack_streams: true,
        passes: 2,
    },
    Strategy {
        name: "rebuild-packed-3pass",
        rebuild: true,
        strip_metadata: false,
        pack_streams: true,
        passes: 3,
    },
    Strategy {
        name: "rebuild-packed-stripped",
        rebuild: true,
        strip_metadata: true,
        pack_streams: true,
        passes: 1,
    },
];

/// Ordered strategy table for an aggressiveness level.
pub fn strategies_for(level: CompressionLevel) -> &'static [Strategy] {
    match level {
        CompressionLevel::Low => LOW,
        CompressionLevel::Balanced => BALANCED,
        CompressionLevel::High => HIGH,
    }
}

/// Run one strategy against `input` and produce its candidate bytes.
///
/// Later passes decode the previous pass's own output; the shared input
/// buffer is never touched.
pub fn run(input: &[u8], strategy: &Strategy) -> Result<Vec<u8>, PdfError> {
    let mut bytes = Vec::new();

    for pass in 0..strategy.passes {
        let source: &[u8] = if pass == 0 { input } else { &bytes };
        let mut doc =
            Document::load_mem(source).map_err(|e| PdfError::Decode(e.to_string()))?;

        if strategy.rebuild {
            doc = rebuild_document(doc, !strategy.strip_metadata);
        } else if strategy.strip_metadata {
            strip_metadata(&mut doc);
            doc.prune_objects();
        }

        if strategy.pack_streams {
            doc.compress();
        }

        bytes = save_bytes(&mut doc)?;
    }

    Ok(bytes)
}
