use clap::Parser;
use std::path::PathBuf;

/// spotideck - drive Spotify from a serial keyboard/display device 🎵
#[derive(Parser, Debug, Default)]
#[command(name = "spotideck", version, about)]
pub struct Args {
    /// Serial device (overrides config), e.g. /dev/ttyUSB0 or COM8
    #[arg(long, short = 'p')]
    pub port: Option<String>,

    /// Baud rate (overrides config)
    #[arg(long, short = 'b')]
    pub baud: Option<u32>,

    /// Use this config file instead of the default location
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Generate default config.toml to stdout
    #[arg(long)]
    pub generate_config: bool,
}
