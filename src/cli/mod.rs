//! Command-line interface parsing and handling
//!
//! This module handles parsing command-line arguments and executing the appropriate commands.

pub mod chunks;
pub mod inspect;
pub mod prompt;


use std::error::Error;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tokio::io::AsyncReadExt;
use tracing::debug;

use crate::character::sanitize::sanitize;
use crate::cli::chunks::render_chunks;
use crate::cli::inspect::render_inspect;
use crate::cli::prompt::render_prompt;
use crate::core::config::{path_display, Config};
use crate::utils::logging::init_logging;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "\ncommit: ",
    env!("VERGEN_GIT_SHA"),
    " (",
    env!("VERGEN_GIT_DESCRIBE"),
    ")\nbuilt: ",
    env!("VERGEN_BUILD_DATE"),
    "\nrustc: ",
    env!("VERGEN_RUSTC_SEMVER"),
);

#[derive(Parser)]
#[command(name = "charcard")]
#[command(version, long_version = LONG_VERSION)]
#[command(about = "Read character cards embedded in PNG images")]
#[command(
    long_about = "charcard extracts the character card stored in a PNG's tEXt metadata \
('chara' or 'ccv3' chunk), converts v1, v2 and v3 cards into the v2 layout and \
cleans every prose field down to printable ASCII.\n\n\
Environment Variables:\n\
  CHARCARD_LOG      Tracing filter (e.g. 'debug'), overrides log-level\n\
  CHARCARD_CONFIG   Path to the config file"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    /// Emit compact JSON regardless of the 'pretty' setting
    #[arg(long, global = true)]
    pub compact: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Import a card from a PNG and print it as canonical JSON
    Inspect {
        /// PNG file carrying the card
        file: PathBuf,
        /// Include the image as a data URI
        #[arg(long)]
        avatar: bool,
    },
    /// List the tEXt chunks of a PNG
    Chunks {
        /// PNG file to scan
        file: PathBuf,
    },
    /// Print the system prompt built from a card
    Prompt {
        /// PNG file carrying the card
        file: PathBuf,
        /// Also print the first and alternate greetings
        #[arg(short, long)]
        greetings: bool,
    },
    /// Clean text the way card fields are cleaned (reads stdin without TEXT)
    Sanitize {
        /// Text to clean
        text: Option<String>,
    },
    /// Show the current configuration
    Config,
    /// Set configuration values
    Set {
        /// Configuration key to set (log-level, pretty, avatar)
        key: String,
        /// Value to set for the key
        value: String,
    },
    /// Unset configuration values
    Unset {
        /// Configuration key to unset
        key: String,
    },
}

pub fn main() -> Result<(), Box<dyn Error>> {
    tokio::runtime::Runtime::new()?.block_on(async_main())
}

async fn async_main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let mut config = Config::load()?;

    // A second subscriber can only exist in tests; nothing to report then.
    let _ = init_logging(config.log_level());

    let pretty = config.pretty_output() && !args.compact;

    match args.command {
        Commands::Inspect { file, avatar } => {
            let image = read_image(&file).await?;
            let include_avatar = avatar || config.include_avatar();
            match render_inspect(&image, include_avatar, pretty) {
                Ok(json) => println!("{json}"),
                Err(e) => exit_with_error(&file, e),
            }
        }
        Commands::Chunks { file } => {
            let image = read_image(&file).await?;
            match render_chunks(&image) {
                Ok(listing) => {
                    println!("tEXt chunks in {}:\n", path_display(&file));
                    print!("{listing}");
                }
                Err(e) => exit_with_error(&file, e),
            }
        }
        Commands::Prompt { file, greetings } => {
            let image = read_image(&file).await?;
            match render_prompt(&image, greetings) {
                Ok(prompt) => println!("{prompt}"),
                Err(e) => exit_with_error(&file, e),
            }
        }
        Commands::Sanitize { text } => {
            let input = match text {
                Some(text) => text,
                None => {
                    let mut buffer = String::new();
                    tokio::io::stdin().read_to_string(&mut buffer).await?;
                    buffer
                }
            };
            println!("{}", sanitize(&input));
        }
        Commands::Config => {
            println!("Config file: {}\n", path_display(Config::get_config_path()?));
            config.print_all();
        }
        Commands::Set { key, value } => {
            if let Err(e) = config.set_value(&key, &value) {
                eprintln!("❌ {e}");
                std::process::exit(1);
            }
            config.save()?;
            println!("✅ Set {key} to: {value}");
        }
        Commands::Unset { key } => {
            if let Err(e) = config.unset_value(&key) {
                eprintln!("❌ {e}");
                std::process::exit(1);
            }
            config.save()?;
            println!("✅ Unset {key}");
        }
    }

    Ok(())
}

async fn read_image(path: &Path) -> Result<Vec<u8>, Box<dyn Error>> {
    let image = tokio::fs::read(path)
        .await
        .map_err(|e| format!("{}: {}", path_display(path), e))?;
    debug!(path = %path.display(), bytes = image.len(), "read image");
    Ok(image)
}

fn exit_with_error(path: &Path, error: Box<dyn Error>) -> ! {
    eprintln!("❌ Failed to import {}: {}", path_display(path), error);
    std::process::exit(1);
}
