use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};

use pdfstudio::cli::{
    compress_output_path, parse_page_ranges, split_output_name, Args, Command, CompressionLevel,
};
use pdfstudio::{compress, merge, split, summarize, Compression};

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    env_logger::Builder::new()
        .filter_level(match args.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            _ => log::LevelFilter::Debug,
        })
        .init();

    match args.command {
        Command::Compress {
            input,
            output,
            level,
        } => run_compress(&input, output, level),
        Command::Split {
            input,
            pages,
            output_dir,
        } => run_split(&input, &pages, output_dir),
        Command::Merge { inputs, output } => run_merge(&inputs, &output),
        Command::Info { input } => run_info(&input),
    }
}

fn run_compress(input: &Path, output: Option<PathBuf>, level: CompressionLevel) -> Result<()> {
    let bytes = fs::read(input)
        .with_context(|| format!("Failed to read input file: {}", input.display()))?;
    let original = bytes.len();

    match compress(&bytes, level)? {
        Compression::Reduced { bytes, strategy } => {
            let output = output.unwrap_or_else(|| compress_output_path(input));
            let saved = 100.0 * (1.0 - bytes.len() as f64 / original as f64);

            fs::write(&output, &bytes)
                .with_context(|| format!("Failed to write output file: {}", output.display()))?;

            log::info!("winning strategy: {}", strategy);
            println!(
                "Wrote {} ({} -> {} bytes, {:.1}% smaller)",
                output.display(),
                original,
                bytes.len(),
                saved
            );
        }
        Compression::NoImprovement => {
            println!(
                "No further reduction possible for {} ({} bytes)",
                input.display(),
                original
            );
        }
    }

    Ok(())
}

fn run_split(input: &Path, pages: &str, output_dir: Option<PathBuf>) -> Result<()> {
    let ranges =
        parse_page_ranges(pages).map_err(|e| anyhow::anyhow!("Invalid page range: {}", e))?;

    let bytes = fs::read(input)
        .with_context(|| format!("Failed to read input file: {}", input.display()))?;
    let parts = split(&bytes, &ranges)?;

    let dir = output_dir
        .unwrap_or_else(|| input.parent().map(Path::to_path_buf).unwrap_or_default());
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());

    for (index, (part, range)) in parts.iter().zip(&ranges).enumerate() {
        let path = dir.join(split_output_name(&stem, index, ranges.len(), *range));
        fs::write(&path, part)
            .with_context(|| format!("Failed to write output file: {}", path.display()))?;
        println!(
            "Wrote {} (pages {}-{})",
            path.display(),
            range.start,
            range.end
        );
    }

    Ok(())
}

fn run_merge(inputs: &[PathBuf], output: &Path) -> Result<()> {
    let mut documents = Vec::with_capacity(inputs.len());
    for path in inputs {
        documents.push(
            fs::read(path)
                .with_context(|| format!("Failed to read input file: {}", path.display()))?,
        );
    }

    let merged = merge(&documents)?;

    fs::write(output, &merged)
        .with_context(|| format!("Failed to write output file: {}", output.display()))?;
    println!("Wrote {} ({} files merged)", output.display(), inputs.len());

    Ok(())
}

fn run_info(input: &Path) -> Result<()> {
    let bytes = fs::read(input)
        .with_context(|| format!("Failed to read input file: {}", input.display()))?;
    let summary = summarize(&bytes)?;

    println!(
        "{}: {} pages, {} bytes",
        input.display(),
        summary.pages,
        summary.byte_len
    );
    for (label, value) in [
        ("Title", &summary.title),
        ("Author", &summary.author),
        ("Producer", &summary.producer),
    ] {
        if let Some(value) = value {
            println!("  {}: {}", label, value);
        }
    }

    Ok(())
}
