use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use cohortrank::{
    ingest::source::open_file_stream,
    report::{JsonSink, ParquetSink, RankingSink, TextSink},
    Config, Pipeline,
};
use std::{
    fs::File,
    io,
    path::{Path, PathBuf},
};
use tokio::time::Instant;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
    Parquet,
}

/// Rank regions by the change in one age cohort's population between two years.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Delimited population file (year, region, _, cohort population, ...)
    input: PathBuf,

    /// YAML config with years, field positions and delimiter
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    before_year: Option<i32>,

    #[arg(long)]
    after_year: Option<i32>,

    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Output file; stdout when omitted (required for parquet)
    #[arg(long)]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    // ─── 2) resolve config ───────────────────────────────────────────
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(y) = args.before_year {
        config.before_year = y;
    }
    if let Some(y) = args.after_year {
        config.after_year = y;
    }
    let delimiter = config.delimiter;
    info!(?config, "resolved config");
    let pipeline = Pipeline::new(config)?;
    info!(input = %args.input.display(), "startup");

    // ─── 3) ingest + rank ────────────────────────────────────────────
    let start = Instant::now();
    let rows = open_file_stream(&args.input, delimiter)
        .await
        .with_context(|| format!("opening {}", args.input.display()))?;
    let ranking = pipeline.run_stream(rows).await?;
    info!(regions = ranking.ranked.len(), elapsed = ?start.elapsed(), "ranked");

    // ─── 4) hand off to the sink ─────────────────────────────────────
    let mut sink: Box<dyn RankingSink> = match (args.format, &args.output) {
        (Format::Parquet, Some(path)) => Box::new(ParquetSink::new(path)),
        (Format::Parquet, None) => bail!("--format parquet needs --output"),
        (Format::Text, Some(path)) => Box::new(TextSink::new(create(path)?)),
        (Format::Text, None) => Box::new(TextSink::new(io::stdout().lock())),
        (Format::Json, Some(path)) => Box::new(JsonSink::new(create(path)?)),
        (Format::Json, None) => Box::new(JsonSink::new(io::stdout().lock())),
    };
    sink.emit(&ranking.ranked)?;

    info!("all done");
    Ok(())
}

fn create(path: &Path) -> Result<io::BufWriter<File>> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    Ok(io::BufWriter::new(file))
}
