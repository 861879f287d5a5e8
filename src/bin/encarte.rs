use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "encarte", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate a template without running a batch.
    Check(CheckArgs),
    /// Run a batch and write the requested artifacts.
    Generate(GenerateArgs),
}

#[derive(Parser, Debug)]
struct CheckArgs {
    /// Template SVG path.
    #[arg(long)]
    template: PathBuf,
}

#[derive(Parser, Debug)]
struct GenerateArgs {
    /// Template SVG path.
    #[arg(long)]
    template: PathBuf,

    /// Background image path (PNG/JPEG).
    #[arg(long)]
    background: PathBuf,

    /// Row table JSON: an array of column-to-value objects.
    #[arg(long)]
    rows: PathBuf,

    /// Field mapping JSON: `{"code": ..., "name": ..., "price": ...}`.
    #[arg(long)]
    mapping: PathBuf,

    /// Export individual composited PNG images.
    #[arg(long)]
    images: bool,

    /// Export the combined vector sheet.
    #[arg(long)]
    grid: bool,

    /// Export the multi-page PDF document.
    #[arg(long)]
    pdf: bool,

    /// Output directory.
    #[arg(long)]
    out: PathBuf,

    /// Worker thread count for composition (default: rayon's choice).
    #[arg(long)]
    threads: Option<usize>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Check(args) => cmd_check(args),
        Command::Generate(args) => cmd_generate(args),
    }
}

fn cmd_check(args: CheckArgs) -> anyhow::Result<()> {
    let template = read_to_string(&args.template)?;
    encarte::validate_template(&template)?;
    eprintln!("template ok: all required placeholder ids present");
    Ok(())
}

fn cmd_generate(args: GenerateArgs) -> anyhow::Result<()> {
    let template = read_to_string(&args.template)?;
    let background_bytes = std::fs::read(&args.background)
        .with_context(|| format!("read background '{}'", args.background.display()))?;
    let background = encarte::decode_background(&background_bytes)?;

    let rows: Vec<encarte::Row> = read_json(&args.rows)?;
    let mapping: encarte::FieldMapping = read_json(&args.mapping)?;

    let formats = encarte::ExportFormats {
        images: args.images,
        grid: args.grid,
        document: args.pdf,
    };

    let request = encarte::BatchRequest {
        template: &template,
        background: &background,
        rows: &rows,
        mapping: &mapping,
        formats,
        threads: args.threads,
    };

    let result = encarte::run_batch(&request, &ConsoleObserver)?;

    std::fs::create_dir_all(&args.out)
        .with_context(|| format!("create output dir '{}'", args.out.display()))?;

    for artifact in &result.images {
        write_artifact(&args.out, &artifact.filename, &artifact.png)?;
    }
    if let Some(grid) = &result.grid {
        write_artifact(&args.out, &grid.filename, grid.svg.as_bytes())?;
    }
    if let Some(document) = &result.document {
        write_artifact(&args.out, &document.filename, &document.pdf)?;
    }

    for failure in &result.export_failures {
        eprintln!("export failed ({:?}): {}", failure.format, failure.reason);
    }

    let skipped = result.skipped().count();
    let failed = result.failed().count();
    eprintln!(
        "done: {} rows, {} images, {} skipped, {} failed",
        rows.len(),
        result.images.len(),
        skipped,
        failed
    );
    Ok(())
}

struct ConsoleObserver;

impl encarte::BatchObserver for ConsoleObserver {
    fn progress(&self, percent: u8) {
        eprintln!("progress: {percent}%");
    }

    fn row_skipped(&self, row_index: usize, reason: &str) {
        eprintln!("row {}: skipped ({reason})", row_index + 1);
    }

    fn row_failed(&self, row_index: usize, reason: &str) {
        eprintln!("row {}: failed ({reason})", row_index + 1);
    }
}

fn read_to_string(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("read '{}'", path.display()))
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let f = File::open(path).with_context(|| format!("open '{}'", path.display()))?;
    serde_json::from_reader(BufReader::new(f))
        .with_context(|| format!("parse JSON '{}'", path.display()))
}

fn write_artifact(dir: &Path, filename: &str, bytes: &[u8]) -> anyhow::Result<()> {
    let path = dir.join(filename);
    std::fs::write(&path, bytes).with_context(|| format!("write '{}'", path.display()))?;
    eprintln!("wrote {}", path.display());
    Ok(())
}
