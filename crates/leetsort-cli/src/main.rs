use anyhow::Result;
use clap::{Parser, Subcommand};
use leetsort_organize::SortOptions;

#[derive(Parser)]
#[command(name = "leetsort")]
#[command(about = "Fetch problem metadata and organize a solution archive by difficulty")]
#[command(version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("BUILD_HASH"), ")"))]
struct Cli {
    /// Log level: error, warn, info, debug, trace
    #[arg(long, global = true, default_value = "info", value_enum)]
    log_level: LogLevel,

    /// Use UTC timestamps instead of local time
    #[arg(long, global = true)]
    utc: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, clap::ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch metadata for unsorted solutions, inject headers, and move them
    /// into difficulty directories
    Sort {
        /// Directory containing the unsorted solution files
        #[arg(short, long, default_value = ".")]
        dir: String,

        /// Solution file extension (without the dot)
        #[arg(short, long, default_value = "py")]
        ext: String,

        /// Root for the difficulty directories (defaults to --dir)
        #[arg(short = 'O', long)]
        output_dir: Option<String>,

        /// Log planned moves without touching any file
        #[arg(long)]
        dry_run: bool,

        /// Also archive raw HTML + metadata JSON for each fetched problem
        #[arg(long)]
        cache_dir: Option<String>,
    },

    /// Fetch one problem's metadata and print the normalized description
    Fetch {
        /// Problem slug (e.g., "contains-duplicate")
        #[arg(short, long)]
        slug: String,

        /// Directory to archive raw HTML + metadata JSON into
        #[arg(short = 'O', long)]
        output_dir: Option<String>,
    },

    /// Normalize a locally saved HTML problem description to plain text
    Normalize {
        /// Path to the HTML file
        #[arg(short, long)]
        input: String,

        /// Output file path (stdout when omitted)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Check an organized archive for naming, header, and placement errors
    Verify {
        /// Archive root containing the difficulty directories
        #[arg(short, long, default_value = ".")]
        dir: String,

        /// Solution file extension (without the dot)
        #[arg(short, long, default_value = "py")]
        ext: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Map log level, suppressing noisy HTML-parsing crates at debug/trace
    let level = match cli.log_level {
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug,selectors=warn,html5ever=warn",
        LogLevel::Trace => "trace,selectors=warn,html5ever=warn",
    };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    // Timestamp format: 2026-08-30 19:44:09.123 -08:00
    let time_format = "%Y-%m-%d %H:%M:%S%.3f %:z";

    if cli.utc {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_timer(tracing_subscriber::fmt::time::ChronoUtc::new(time_format.to_string()))
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_timer(tracing_subscriber::fmt::time::ChronoLocal::new(time_format.to_string()))
            .init();
    }

    match cli.command {
        Commands::Sort {
            dir,
            ext,
            output_dir,
            dry_run,
            cache_dir,
        } => {
            tracing::info!(dir = %dir, ext = %ext, dry_run, "Sorting solutions");
            let opts = SortOptions {
                dir,
                ext,
                output_dir,
                dry_run,
                cache_dir,
            };
            let stats = leetsort_organize::sort_solutions(&opts).await?;
            tracing::info!(moved = stats.moved, skipped = stats.skipped, "Done");
        }
        Commands::Fetch { slug, output_dir } => {
            tracing::info!(slug = %slug, "Fetching problem metadata");
            let fetched = leetsort_acquire::leetcode::fetch_problem(&slug)
                .await?
                .ok_or_else(|| anyhow::anyhow!("No metadata found for slug '{slug}'"))?;

            if let Some(dir) = &output_dir {
                leetsort_acquire::output::cache_html(dir, &slug, &fetched.raw_html)?;
                let record =
                    leetsort_acquire::leetcode::build_record(&slug, fetched.details.clone());
                leetsort_acquire::output::write_record(dir, &record)?;
            }

            println!(
                "{} - {} [{}]\n\n{}",
                fetched.details.title,
                fetched.details.id,
                fetched.details.difficulty,
                fetched.details.content
            );
        }
        Commands::Normalize { input, output } => {
            tracing::info!(input = %input, "Normalizing HTML description");
            let html = std::fs::read_to_string(&input)?;
            let text = leetsort_acquire::normalize::normalize(&html);
            match output {
                Some(path) => {
                    std::fs::write(&path, &text)?;
                    tracing::info!(path = %path, lines = text.lines().count(), "Wrote normalized text");
                }
                None => println!("{text}"),
            }
        }
        Commands::Verify { dir, ext } => {
            tracing::info!(dir = %dir, "Verifying archive");
            let errors = leetsort_verify::verify_archive(std::path::Path::new(&dir), &ext)?;
            if !errors.is_empty() {
                anyhow::bail!("{} archive inconsistencies found", errors.len());
            }
            tracing::info!("Archive is consistent");
        }
    }

    Ok(())
}
