//! Command-line interface definitions

pub mod args;

pub use args::{
    compress_output_path, parse_page_ranges, split_output_name, Args, Command, CompressionLevel,
};
