use anyhow::{Context, Result};
use clap::Parser;
use spotideck::app::cli::Args;
use spotideck::app::config::AppConfig;
use spotideck::app::{interrupt, logging};
use spotideck::bridge::{self, scheduler::SystemClock};
use spotideck::player::spotify::credentials_from_env;
use spotideck::player::SpotifyPlayer;
use spotideck::serial::SerialPortLink;
use std::process::ExitCode;

fn main() -> Result<ExitCode> {
    human_panic::setup_panic!();

    let args = Args::parse();

    if args.generate_config {
        println!("{}", AppConfig::generate_default());
        return Ok(ExitCode::SUCCESS);
    }

    let _log_guard = logging::init(&AppConfig::get_log_dir(), args.verbose)?;

    // Once logging is up, fatal errors are reported through it, once
    match run(&args) {
        Ok(()) => {
            tracing::info!("Exiting...");
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            tracing::error!("{e:#}");
            Ok(ExitCode::FAILURE)
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => AppConfig::load_from(path),
        None => AppConfig::load(),
    };
    config.apply_args(args);
    tracing::debug!(?config, "configuration loaded");

    let credentials = credentials_from_env().context("Spotify credentials")?;
    let player = SpotifyPlayer::connect(
        credentials,
        config.spotify.redirect_uri.clone(),
        config.token_cache_path(),
    )
    .context("connecting to Spotify")?;

    interrupt::install().context("installing Ctrl-C handler")?;

    let port = &config.serial.port;
    let baud = config.serial.baud_rate;
    let link = SerialPortLink::open(port, baud, config.read_timeout())
        .with_context(|| format!("Serial error opening {port}"))?;
    tracing::info!("Listening on {port} at {baud} baud...");

    bridge::run(
        &player,
        link,
        SystemClock,
        config.timing(),
        interrupt::is_interrupted,
    )
    .context("Serial error")
}
