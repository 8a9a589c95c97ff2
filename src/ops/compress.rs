//! The re-serialization selector behind the `compress` subcommand.
//!
//! Runs the level's strategies sequentially against the shared immutable
//! input and keeps the smallest candidate that actually beats it. A strategy
//! that fails is dropped from consideration; only an undecodable original
//! input aborts the whole selection.

use lopdf::Document;

use crate::cli::CompressionLevel;
use crate::error::{CompressError, PdfError};

use super::strategy::{self, strategies_for};

/// Outcome of a selection run.
///
/// `NoImprovement` means every strategy either failed or produced output at
/// least as large as the input. It is a first-class result, not an error:
/// an already-compact document is expected to land here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Compression {
    Reduced {
        bytes: Vec<u8>,
        strategy: &'static str,
    },
    NoImprovement,
}

/// Try every strategy of `level` against `input` and return the smallest
/// result, or `NoImprovement` if nothing beats the input's size.
///
/// # Example
///
/// ```no_run
/// use pdfstudio::{compress, Compression, CompressionLevel};
///
/// let input = std::fs::read("report.pdf").unwrap();
/// match compress(&input, CompressionLevel::Balanced).unwrap() {
///     Compression::Reduced { bytes, .. } => std::fs::write("report_compressed.pdf", bytes).unwrap(),
///     Compression::NoImprovement => println!("already compact"),
/// }
/// ```
pub fn compress(input: &[u8], level: CompressionLevel) -> Result<Compression, CompressError> {
    // Only an undecodable original input is fatal. Strategies decode their
    // own copies and fail individually.
    Document::load_mem(input).map_err(|e| CompressError::Decode(e.to_string()))?;

    let outcomes = strategies_for(level).iter().map(|descriptor| {
        let outcome = strategy::run(input, descriptor);
        match &outcome {
            Ok(bytes) => log::debug!(
                "strategy {}: {} bytes (input {})",
                descriptor.name,
                bytes.len(),
                input.len()
            ),
            Err(err) => log::warn!("strategy {} dropped: {}", descriptor.name, err),
        }
        (descriptor.name, outcome)
    });

    Ok(pick_best(input.len(), outcomes))
}

/// Keep the smallest successful candidate; the earliest declared strategy
/// wins ties. A candidate no smaller than the input is not an improvement.
///
/// Lazy over the outcomes so strategies run one at a time and only the best
/// candidate stays in memory.
fn pick_best(
    input_len: usize,
    outcomes: impl IntoIterator<Item = (&'static str, Result<Vec<u8>, PdfError>)>,
) -> Compression {
    let mut best: Option<(&'static str, Vec<u8>)> = None;

    for (name, outcome) in outcomes {
        let Ok(bytes) = outcome else { continue };
        let better = match &best {
            Some((_, current)) => bytes.len() < current.len(),
            None => true,
        };
        if better {
            best = Some((name, bytes));
        }
    }

    match best {
        Some((strategy, bytes)) if bytes.len() < input_len => {
            Compression::Reduced { bytes, strategy }
        }
        _ => Compression::NoImprovement,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok(name: &'static str, len: usize) -> (&'static str, Result<Vec<u8>, PdfError>) {
        (name, Ok(vec![0u8; len]))
    }

    fn failed(name: &'static str) -> (&'static str, Result<Vec<u8>, PdfError>) {
        (name, Err(PdfError::Encode("simulated".to_string())))
    }

    #[test]
    fn smallest_candidate_wins() {
        let result = pick_best(100, vec![ok("a", 90), ok("b", 40), ok("c", 60)]);
        assert!(
            matches!(result, Compression::Reduced { strategy: "b", ref bytes } if bytes.len() == 40)
        );
    }

    #[test]
    fn ties_go_to_declaration_order() {
        let result = pick_best(100, vec![ok("first", 50), ok("second", 50)]);
        assert!(matches!(result, Compression::Reduced { strategy: "first", .. }));
    }

    #[test]
    fn failures_do_not_abort_selection() {
        let result = pick_best(100, vec![failed("a"), ok("b", 70), failed("c")]);
        assert!(matches!(result, Compression::Reduced { strategy: "b", .. }));
    }

    #[test]
    fn all_failures_is_no_improvement() {
        let result = pick_best(100, vec![failed("a"), failed("b")]);
        assert_eq!(result, Compression::NoImprovement);
    }

    #[test]
    fn candidates_no_smaller_than_input_are_rejected() {
        assert_eq!(pick_best(50, vec![ok("a", 50)]), Compression::NoImprovement);
        assert_eq!(pick_best(50, vec![ok("a", 80)]), Compression::NoImprovement);
    }

    #[test]
    fn no_candidates_is_no_improvement() {
        assert_eq!(pick_best(50, Vec::new()), Compression::NoImprovement);
    }
}
