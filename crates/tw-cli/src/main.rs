//! Terminal reader for Taleweaver stories.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use tw_reader::ReaderConfig;

#[derive(Parser)]
#[command(
    name = "tw",
    about = "Taleweaver: a choose-your-own-adventure reader",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Read a story interactively
    Play {
        /// Story identifier (documents are `<story>_<lang>.json`)
        #[arg(short, long)]
        story: Option<String>,

        /// Language code, saved as the preferred language (default: saved preference)
        #[arg(short, long)]
        lang: Option<String>,

        /// Directory containing story documents
        #[arg(long, default_value = "Stories")]
        stories: PathBuf,

        /// Directory for saved progress and preferences
        #[arg(long)]
        data: Option<PathBuf>,
    },

    /// Print the outline of a story, starting at `start`
    Tree {
        /// Story identifier
        #[arg(short, long)]
        story: Option<String>,

        /// Language code
        #[arg(short, long, default_value = "en")]
        lang: String,

        /// Directory containing story documents
        #[arg(long, default_value = "Stories")]
        stories: PathBuf,
    },
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Play {
            story,
            lang,
            stories,
            data,
        } => {
            let config = build_config(story, stories, data);
            commands::play::run(&config, lang.as_deref())
        }
        Commands::Tree {
            story,
            lang,
            stories,
        } => {
            let config = build_config(story, stories, None);
            commands::tree::run(&config, &lang)
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

fn build_config(story: Option<String>, stories: PathBuf, data: Option<PathBuf>) -> ReaderConfig {
    let mut config = ReaderConfig::default().with_stories_dir(stories);
    if let Some(story) = story {
        config = config.with_default_story(story);
    }
    if let Some(data) = data {
        config = config.with_data_dir(data);
    }
    config
}

/// Log to stderr so stdout stays the reading surface. `RUST_LOG` overrides
/// the default `warn` level.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
