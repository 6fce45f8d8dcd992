use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for userscript-meta
#[derive(Parser, Debug)]
#[command(name = "userscript-meta")]
#[command(about = "Generate UserScript metadata headers and inject them into build output")]
pub struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the wrapped header for an options file
    Header {
        /// JSON options file with a "headers" object
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Prepend the header to the entry script of a build output directory
    Inject {
        /// JSON options file with a "headers" object
        #[arg(short, long)]
        config: PathBuf,

        /// Build output directory
        #[arg(short, long)]
        dist: PathBuf,

        /// Glob selecting the entry script, relative to the output directory
        #[arg(short, long, default_value = "*.js")]
        entry: String,
    },
}
