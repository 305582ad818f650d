use std::{net::SocketAddr, path::PathBuf};

use clap::Parser;

/// Durable ElevenLabs speech-to-text service
#[derive(Debug, Parser)]
#[command(name = "murmur", about = "Durable speech-to-text handlers backed by ElevenLabs")]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "murmur.toml", env = "MURMUR_CONFIG")]
    pub config: PathBuf,

    /// Override the listen address
    #[arg(long, env = "MURMUR_LISTEN")]
    pub listen: Option<SocketAddr>,

    /// Override the log filter, e.g. `info,stt=debug`
    #[arg(long, env = "MURMUR_LOG")]
    pub log: Option<String>,

    /// Validate the configuration and exit
    #[arg(long)]
    pub check: bool,
}
