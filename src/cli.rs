use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "vidrelay")]
#[command(author, version, about = "Range-aware video file server with WebRTC signaling relay")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the streaming server
    Serve {
        /// Host to bind to
        #[arg(long, default_value = "0.0.0.0")]
        host: String,

        /// Port to listen on
        #[arg(short, long, default_value = "8000")]
        port: u16,

        /// Video file to serve (overrides config)
        #[arg(long)]
        video: Option<PathBuf>,
    },

    /// Validate a config file and exit
    Validate {
        /// Config file to validate (defaults to --config)
        config: Option<PathBuf>,
    },

    /// Print version information
    Version,
}
