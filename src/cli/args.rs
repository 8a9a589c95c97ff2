use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

use crate::error::RangeError;
use crate::ops::split::PageRange;

#[derive(Parser, Debug)]
#[command(name = "pdfstudio")]
#[command(
    author,
    version,
    about = "Split, merge, and compress PDF files from the command line"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Re-serialize a PDF through several strategies and keep the smallest
    Compress {
        /// Input PDF file
        input: PathBuf,

        /// Output PDF file (defaults to `<input>_compressed.pdf`)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// How aggressively to search for a smaller rendition
        #[arg(short, long, value_enum, default_value = "balanced")]
        level: CompressionLevel,
    },

    /// Extract page ranges into separate PDF files
    Split {
        /// Input PDF file
        input: PathBuf,

        /// Page ranges, one output file per range (e.g. "1-3,7,10-12")
        #[arg(short, long)]
        pages: String,

        /// Directory for the output files (defaults to the input's directory)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },

    /// Merge two or more PDF files into one
    Merge {
        /// Input PDF files, appended in argument order
        #[arg(required = true, num_args = 2..)]
        inputs: Vec<PathBuf>,

        /// Output PDF file
        #[arg(short, long, default_value = "merged.pdf")]
        output: PathBuf,
    },

    /// Show page count, size, and document metadata
    Info {
        /// Input PDF file
        input: PathBuf,
    },
}

/// Aggressiveness tier for the compress selector. Each tier maps to an
/// ordered list of re-serialization strategies.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum, Default)]
pub enum CompressionLevel {
    /// Metadata stripping and a single page-tree rebuild
    Low,
    /// Page-tree rebuilds with and without stream packing
    #[default]
    Balanced,
    /// Adds multi-pass re-serialization on top of Balanced
    High,
}

/// Parse a page-range specification. Each comma-separated part becomes one
/// range: "5" is a single page, "1-3" an inclusive run.
pub fn parse_page_ranges(spec: &str) -> Result<Vec<PageRange>, RangeError> {
    let mut ranges = Vec::new();

    for part in spec.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }

        let range = if let Some((start, end)) = part.split_once('-') {
            let start = parse_page_number(start)?;
            let end = parse_page_number(end)?;
            if start > end {
                return Err(RangeError::InvalidRange(format!("{} > {}", start, end)));
            }
            PageRange { start, end }
        } else {
            let page = parse_page_number(part)?;
            PageRange { start: page, end: page }
        };
        ranges.push(range);
    }

    if ranges.is_empty() {
        return Err(RangeError::InvalidRange("no pages given".to_string()));
    }

    Ok(ranges)
}

fn parse_page_number(text: &str) -> Result<u32, RangeError> {
    let text = text.trim();
    let page: u32 = text
        .parse()
        .map_err(|_| RangeError::InvalidRange(format!("invalid number: {}", text)))?;
    if page == 0 {
        return Err(RangeError::InvalidRange(
            "pages are numbered from 1".to_string(),
        ));
    }
    Ok(page)
}

/// Default output path for `compress`: `<stem>_compressed.pdf` next to the input.
pub fn compress_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    input.with_file_name(format!("{}_compressed.pdf", stem))
}

/// Output file name for one split part. A part number is inserted when more
/// than one range was requested.
pub fn split_output_name(stem: &str, index: usize, total: usize, range: PageRange) -> String {
    if total > 1 {
        format!(
            "{}_part{}_pages{}-{}.pdf",
            stem,
            index + 1,
            range.start,
            range.end
        )
    } else {
        format!("{}_pages{}-{}.pdf", stem, range.start, range.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_page() {
        let result = parse_page_ranges("5").unwrap();
        assert_eq!(result, vec![PageRange { start: 5, end: 5 }]);
    }

    #[test]
    fn test_parse_range() {
        let result = parse_page_ranges("1-4").unwrap();
        assert_eq!(result, vec![PageRange { start: 1, end: 4 }]);
    }

    #[test]
    fn test_parse_mixed_keeps_part_order() {
        let result = parse_page_ranges("10-12, 7, 1-3").unwrap();
        assert_eq!(
            result,
            vec![
                PageRange { start: 10, end: 12 },
                PageRange { start: 7, end: 7 },
                PageRange { start: 1, end: 3 },
            ]
        );
    }

    #[test]
    fn test_parse_rejects_reversed_range() {
        assert!(parse_page_ranges("4-2").is_err());
    }

    #[test]
    fn test_parse_rejects_page_zero() {
        assert!(parse_page_ranges("0-3").is_err());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_page_ranges("abc").is_err());
        assert!(parse_page_ranges("").is_err());
    }

    #[test]
    fn test_compress_output_path() {
        let path = compress_output_path(Path::new("docs/report.pdf"));
        assert_eq!(path, PathBuf::from("docs/report_compressed.pdf"));
    }

    #[test]
    fn test_split_output_names() {
        let range = PageRange { start: 2, end: 6 };
        assert_eq!(split_output_name("report", 0, 1, range), "report_pages2-6.pdf");
        assert_eq!(
            split_output_name("report", 1, 3, range),
            "report_part2_pages2-6.pdf"
        );
    }
}
