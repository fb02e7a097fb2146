pub mod error;
pub mod spotify;
pub mod traits;

pub use error::{ApiError, AuthError};
pub use spotify::SpotifyPlayer;
pub use traits::{progress_percent, seek_position_ms, PlayerTrait, TrackSnapshot};

/// Transport actions the device can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackCommand {
    TogglePlay,
    Next,
    Prev,
    ToggleShuffle,
    /// 0-100
    SeekPercent(u8),
    Like,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    Sent,
    /// Needed a current track and there was none
    NothingPlaying,
}

/// Run one command against the remote player.
///
/// Toggles and seek read a fresh snapshot first; nothing is retried.
pub fn dispatch(player: &dyn PlayerTrait, command: PlaybackCommand) -> Result<DispatchOutcome, ApiError> {
    match command {
        PlaybackCommand::Next => player.next()?,
        PlaybackCommand::Prev => player.prev()?,
        PlaybackCommand::TogglePlay => {
            // Nothing active: ask the service to resume whatever it had
            let playing = player.fetch_snapshot()?.is_some_and(|s| s.is_playing);
            if playing {
                player.pause()?
            } else {
                player.play()?
            }
        }
        PlaybackCommand::ToggleShuffle => {
            let Some(snap) = player.fetch_snapshot()? else {
                return Ok(DispatchOutcome::NothingPlaying);
            };
            player.shuffle(!snap.shuffle)?
        }
        PlaybackCommand::SeekPercent(pct) => {
            let Some(snap) = player.fetch_snapshot()? else {
                return Ok(DispatchOutcome::NothingPlaying);
            };
            player.seek(snap.seek_position_ms(pct))?
        }
        PlaybackCommand::Like => {
            let Some(snap) = player.fetch_snapshot()?.filter(|s| !s.id.is_empty()) else {
                return Ok(DispatchOutcome::NothingPlaying);
            };
            player.like(&snap.id)?;
            tracing::info!(track = %snap.name, "Song liked");
        }
    }
    Ok(DispatchOutcome::Sent)
}
