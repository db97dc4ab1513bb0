use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use suffixseek::config::SuffixSeekConfig;
use suffixseek::logging::{timed, LogLevel, LoggingSystem};
use suffixseek::output::{MatchReport, SuffixListing};
use suffixseek::{PatternSearcher, SequenceStore, SortAlgorithm, SuffixIndex};
use tracing::info;

/// Command line arguments for suffixseek.
#[derive(Parser, Debug)]
#[command(author, version, about = "Exact pattern search in FASTA files using a suffix index", long_about = None)]
struct Args {
    /// Input FASTA file
    input: PathBuf,

    /// Pattern to search for (omit to only load and index)
    pattern: Option<String>,

    /// Print every suffix in sorted order
    #[arg(long)]
    list_suffixes: bool,

    /// Index construction strategy: comparison or sais
    #[arg(long)]
    algorithm: Option<SortAlgorithm>,

    /// Number of worker threads (0 = all cores)
    #[arg(long)]
    threads: Option<usize>,

    /// Configuration file (.toml or .json)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Bytes shown per suffix in the listing
    #[arg(long)]
    preview_width: Option<usize>,

    /// Print matches as JSON
    #[arg(long)]
    json: bool,

    /// Verbose logging
    #[arg(long)]
    verbose: bool,
}

fn load_config(args: &Args) -> Result<SuffixSeekConfig> {
    let mut config = match &args.config {
        Some(path) => SuffixSeekConfig::load_from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => SuffixSeekConfig::default(),
    };
    config.load_from_env()?;

    if let Some(algorithm) = args.algorithm {
        config.index.algorithm = algorithm;
    }
    if let Some(threads) = args.threads {
        config.index.threads = threads;
    }
    if let Some(width) = args.preview_width {
        config.output.preview_width = width;
    }
    config.output.list_suffixes |= args.list_suffixes;
    config.output.json |= args.json;
    if args.verbose {
        config.logging.level = LogLevel::Debug;
    }

    config.validate()?;
    Ok(config)
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = load_config(&args)?;
    let _logging = LoggingSystem::init(config.logging.clone())?;

    if config.index.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(config.index.threads)
            .build_global()
            .map_err(suffixseek::SearchError::from)?;
    }

    timed("total", || -> Result<()> {
        let store = timed("load", || SequenceStore::from_fasta(&args.input))
            .with_context(|| format!("reading {}", args.input.display()))?;
        let index = timed("sort", || SuffixIndex::build(&store, &config.index_config()))?;

        if config.output.list_suffixes {
            print!(
                "{}",
                SuffixListing::new(&index, &store).preview_width(config.output.preview_width)
            );
        }

        let Some(pattern) = &args.pattern else {
            info!(suffixes = index.len(), "No pattern given, index built");
            return Ok(());
        };

        let searcher = PatternSearcher::new(&index, &store)?;
        let matches = timed("search", || searcher.find_all(pattern.as_bytes()))?;
        let report = MatchReport::new(pattern.as_bytes(), &matches, &store);

        if config.output.json {
            println!("{}", report.to_json()?);
        } else {
            print!("{}", report);
        }
        Ok(())
    })
}
