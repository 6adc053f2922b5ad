mod drawing;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand::rngs::SmallRng;

use dg_core::{PromptDeck, Sample, build_prototypes, classify, is_meaningful};
use dg_store::{Config, Store, resolve_base_dir};

#[derive(Parser)]
#[command(name = "dg", about = "doodleguess: sketch guessing from the terminal")]
struct Cli {
    /// Override the data directory (default: DG_DATA_DIR or ~/.doodleguess)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Enable verbose debug output
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Guess the label of a captured drawing
    Guess {
        /// Drawing file ({width, height, strokes})
        drawing: PathBuf,
    },

    /// Save a captured drawing as a training sample
    Train {
        /// Drawing file ({width, height, strokes})
        drawing: PathBuf,

        /// Label to store the sample under
        #[arg(long)]
        label: String,
    },

    /// Print the next drawing prompt
    Prompt,

    /// Show dataset statistics
    Stats,

    /// Export the dataset to a JSON file
    Export {
        /// Output file path
        path: PathBuf,
    },

    /// Import a dataset from a JSON file (replaces current data)
    Import {
        /// Input file path
        path: PathBuf,
    },
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

fn open_store(cli: &Cli) -> Result<(Store, Config)> {
    let base_dir = resolve_base_dir(cli.data_dir.as_deref());
    std::fs::create_dir_all(&base_dir)
        .with_context(|| format!("failed to create {}", base_dir.display()))?;
    let store =
        Store::open(&base_dir.join("doodles.db3")).context("failed to open sample store")?;
    let config = Config::load(&base_dir);
    Ok((store, config))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match &cli.command {
        Commands::Guess { drawing } => cmd_guess(&cli, drawing),
        Commands::Train { drawing, label } => cmd_train(&cli, drawing, label),
        Commands::Prompt => cmd_prompt(&cli),
        Commands::Stats => cmd_stats(&cli),
        Commands::Export { path } => cmd_export(&cli, path),
        Commands::Import { path } => cmd_import(&cli, path),
    }
}

fn cmd_guess(cli: &Cli, drawing: &Path) -> Result<()> {
    let (store, config) = open_store(cli)?;
    let dataset = store.load_dataset().context("failed to load dataset")?;
    let attempt = drawing::load_attempt(drawing)?;

    let prototypes = build_prototypes(&dataset);
    let guess = classify(&attempt, &dataset, &prototypes, &config.tuning());

    println!("guess:      {}", guess.label);
    println!("confidence: {}%", guess.confidence);
    if let Some(advisory) = &guess.advisory {
        println!("note:       {advisory}");
    }

    if cli.verbose {
        let stats = dataset.stats();
        eprintln!(
            "--- dataset: {} samples, {} labels ---",
            stats.total, stats.distinct_labels
        );
    }

    Ok(())
}

fn cmd_train(cli: &Cli, drawing: &Path, label: &str) -> Result<()> {
    let (store, _) = open_store(cli)?;
    let attempt = drawing::load_attempt(drawing)?;

    if !is_meaningful(&attempt.grid, &attempt.strokes) {
        println!("not saved: drawing is too sparse to be meaningful");
        return Ok(());
    }

    let features = attempt.features();
    let sample = Sample::new(label, &attempt.grid, features);
    store
        .append_sample(&sample)
        .context("failed to save sample")?;

    let total = store.sample_count().context("failed to count samples")?;
    println!("saved '{label}' ({total} samples total)");
    Ok(())
}

fn cmd_prompt(cli: &Cli) -> Result<()> {
    let (store, _) = open_store(cli)?;

    // Remember the previous prompt across invocations so the rotation
    // never repeats back-to-back.
    let last = store
        .get_metadata("last_prompt")
        .context("failed to read prompt history")?;
    let mut deck = PromptDeck::resuming(last.as_deref());
    let mut rng = SmallRng::from_os_rng();
    let prompt = deck.next(&mut rng);
    store
        .set_metadata("last_prompt", prompt)
        .context("failed to record prompt")?;

    println!("draw: {prompt}");
    Ok(())
}

fn cmd_stats(cli: &Cli) -> Result<()> {
    let (store, _) = open_store(cli)?;
    let counts = store.label_counts().context("failed to load label counts")?;
    let total: usize = counts.iter().map(|(_, c)| c).sum();

    println!("samples: {total}");
    println!("labels:  {}", counts.len());
    for (label, count) in &counts {
        println!("  {label}: {count}");
    }
    Ok(())
}

fn cmd_export(cli: &Cli, path: &Path) -> Result<()> {
    let (store, _) = open_store(cli)?;
    store
        .export_json_file(path)
        .context("failed to export dataset")?;
    println!("exported to {}", path.display());
    Ok(())
}

fn cmd_import(cli: &Cli, path: &Path) -> Result<()> {
    let (store, _) = open_store(cli)?;
    let imported = store
        .import_json_file(path)
        .context("failed to import dataset")?;
    println!("imported {imported} samples from {}", path.display());
    Ok(())
}
