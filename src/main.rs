mod cli;

use vidrelay::{config, server};

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};

async fn serve(
    host: String,
    port: u16,
    video: Option<std::path::PathBuf>,
    config_path: Option<&std::path::Path>,
) -> Result<()> {
    // Load config
    let mut config = config::load_config_or_default(config_path)?;

    // Override from CLI if specified
    config.server.host = host;
    config.server.port = port;
    if let Some(video) = video {
        config.media.video_path = video;
    }

    tracing::info!("Starting vidrelay server");
    tracing::info!(
        "Serving {:?} on {}:{}",
        config.media.video_path,
        config.server.host,
        config.server.port
    );

    server::start_server(config).await
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "vidrelay=trace,tower_http=debug".to_string()
        } else {
            "vidrelay=debug,tower_http=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .init();

    match cli.command {
        Commands::Serve { host, port, video } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(serve(host, port, video, cli.config.as_deref()))
        }
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            let config = config::load_config_or_default(path.as_deref())?;
            println!("Config OK: video {:?}", config.media.video_path);
            Ok(())
        }
        Commands::Version => {
            println!("vidrelay {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
