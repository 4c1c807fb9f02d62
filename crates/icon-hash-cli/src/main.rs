use anyhow::{anyhow, Context};
use clap::{Args, Parser, Subcommand};
use icon_hash_core::{central_hashes, hash_sets, logging, Config, Icon, LogLevel};
use log::{info, LevelFilter};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "icon-hash")]
#[command(about = "Tolerance-aware fingerprints for 11x11 image icons")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the central hash of each icon (use as a record or a query)
    Central(HashArgs),

    /// Print the hash set of each icon (the counterpart of a central hash)
    Set(HashArgs),

    /// Generate default configuration file
    GenerateConfig {
        /// Path to save configuration file
        #[arg(default_value = "icon-hash.json")]
        path: PathBuf,
    },
}

#[derive(Args)]
struct HashArgs {
    /// Icon files, JSON objects of the form {"luma": [121 values]}
    #[arg(required = true)]
    icons: Vec<PathBuf>,

    /// Tolerance as a fraction of the luma range (0.05 = 5%)
    #[arg(short, long)]
    epsilon: Option<f64>,

    /// Buckets per feature dimension
    #[arg(short, long)]
    buckets: Option<usize>,

    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write logs to rotating files in this directory instead of stderr
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<(), anyhow::Error> {
    // Parse command line arguments
    let cli = Cli::parse();

    match cli.command {
        Commands::Central(args) => {
            let (config, icons) = prepare(&args)?;
            let hashes = central_hashes(&icons, &config.params())?;

            for (path, hash) in args.icons.iter().zip(hashes) {
                println!("{}\t{}", path.display(), hash);
            }
            Ok(())
        }

        Commands::Set(args) => {
            let (config, icons) = prepare(&args)?;
            let sets = hash_sets(&icons, &config.params())?;

            for (path, set) in args.icons.iter().zip(sets) {
                let hashes: Vec<String> = set.iter().map(u64::to_string).collect();
                println!("{}\t{}", path.display(), hashes.join(" "));
            }
            Ok(())
        }

        Commands::GenerateConfig { path } => {
            let config = Config::default();
            config.save_to_file(&path)?;
            println!("Configuration file generated at: {}", path.display());
            Ok(())
        }
    }
}

/// Resolve configuration, set up logging and the thread pool, load icons
fn prepare(args: &HashArgs) -> anyhow::Result<(Config, Vec<Icon>)> {
    let mut config = if let Some(config_path) = &args.config {
        Config::from_file(config_path)?
    } else {
        Config::default()
    };

    // Override config with command line arguments
    if let Some(epsilon) = args.epsilon {
        config.epsilon_percent = epsilon;
    }
    if let Some(buckets) = args.buckets {
        config.num_buckets = buckets;
    }
    config.log_level = match args.verbose {
        0 => config.log_level,
        1 => LogLevel::Debug,
        _ => LogLevel::Trace,
    };

    config.validate()?;
    init_logging(&config, args.log_dir.as_deref())?;

    let threads = if config.threads == 0 {
        num_cpus::get()
    } else {
        config.threads
    };
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .map_err(|e| anyhow!("Failed to build thread pool: {}", e))?;

    info!(
        "Fingerprinting {} icons (epsilon {}, {} buckets, {} threads)",
        args.icons.len(),
        config.epsilon_percent,
        config.num_buckets,
        threads
    );

    let icons = args
        .icons
        .iter()
        .map(|path| load_icon(path))
        .collect::<anyhow::Result<Vec<_>>>()?;

    Ok((config, icons))
}

fn init_logging(config: &Config, log_dir: Option<&Path>) -> anyhow::Result<()> {
    let level = LevelFilter::from(config.log_level);

    match log_dir {
        Some(dir) => logging::init_logger(dir, level)
            .map_err(|e| anyhow!("Failed to initialize logging: {}", e)),
        None => {
            env_logger::Builder::new()
                .filter_level(level)
                .parse_env(logging::LOG_ENV_VAR)
                .init();
            Ok(())
        }
    }
}

fn load_icon(path: &Path) -> anyhow::Result<Icon> {
    let file =
        File::open(path).with_context(|| format!("Failed to open icon {}", path.display()))?;
    let icon = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse icon {}", path.display()))?;
    Ok(icon)
}
