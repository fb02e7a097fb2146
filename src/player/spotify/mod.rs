//! Spotify Web API backend, on top of rspotify's blocking client.

use crate::player::error::{ApiError, AuthError};
use crate::player::traits::{PlayerTrait, TrackSnapshot};
use rspotify::model::{AdditionalType, CurrentPlaybackContext, PlayableItem, TrackId};
use rspotify::prelude::*;
use rspotify::{scopes, AuthCodeSpotify, Config, Credentials, OAuth};
use std::path::PathBuf;

pub const CLIENT_ID_VAR: &str = "CLIENT_ID";
pub const CLIENT_SECRET_VAR: &str = "CLIENT_SECRET";

/// App credentials from `CLIENT_ID` / `CLIENT_SECRET`.
pub fn credentials_from_env() -> Result<Credentials, AuthError> {
    let read = |var: &'static str| {
        std::env::var(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or(AuthError::MissingCredential(var))
    };
    Ok(Credentials::new(&read(CLIENT_ID_VAR)?, &read(CLIENT_SECRET_VAR)?))
}

pub struct SpotifyPlayer {
    client: AuthCodeSpotify,
}

impl SpotifyPlayer {
    /// Build the client and make sure it holds a usable token.
    ///
    /// Uses the cached token when there is one; otherwise opens the consent
    /// page and asks for the redirected URL on the terminal.
    pub fn connect(
        credentials: Credentials,
        redirect_uri: String,
        token_cache: PathBuf,
    ) -> Result<Self, ApiError> {
        let oauth = OAuth {
            redirect_uri,
            scopes: scopes!(
                "user-library-read",
                "user-library-modify",
                "user-read-currently-playing",
                "user-read-playback-state",
                "user-modify-playback-state"
            ),
            ..Default::default()
        };
        let config = Config {
            cache_path: token_cache,
            token_cached: true,
            token_refreshing: true,
            ..Default::default()
        };
        let client = AuthCodeSpotify::with_config(credentials, oauth, config);

        let url = client.get_authorize_url(false)?;
        client.prompt_for_token(&url)?;
        tracing::info!("Spotify authorization ready");
        Ok(Self { client })
    }
}

/// `None` while nothing, or a non-track item such as an episode, is playing.
fn snapshot_from(ctx: CurrentPlaybackContext) -> Option<TrackSnapshot> {
    let Some(PlayableItem::Track(track)) = ctx.item else {
        return None;
    };
    let progress_ms = ctx
        .progress
        .map(|p| p.num_milliseconds().max(0) as u64)
        .unwrap_or(0);
    let artist = track
        .artists
        .into_iter()
        .next()
        .map(|a| a.name)
        .unwrap_or_default();
    // Local files have no id
    let id = track.id.map(|id| id.id().to_string()).unwrap_or_default();

    Some(TrackSnapshot::new(
        id,
        track.name,
        artist,
        ctx.is_playing,
        progress_ms,
        track.duration.num_milliseconds().max(0) as u64,
        ctx.shuffle_state,
    ))
}

impl PlayerTrait for SpotifyPlayer {
    fn fetch_snapshot(&self) -> Result<Option<TrackSnapshot>, ApiError> {
        let playback = self
            .client
            .current_playback(None, None::<&[AdditionalType]>)?;
        Ok(playback.and_then(snapshot_from))
    }

    fn play(&self) -> Result<(), ApiError> {
        Ok(self.client.resume_playback(None, None)?)
    }

    fn pause(&self) -> Result<(), ApiError> {
        Ok(self.client.pause_playback(None)?)
    }

    fn next(&self) -> Result<(), ApiError> {
        Ok(self.client.next_track(None)?)
    }

    fn prev(&self) -> Result<(), ApiError> {
        Ok(self.client.previous_track(None)?)
    }

    fn shuffle(&self, enable: bool) -> Result<(), ApiError> {
        Ok(self.client.shuffle(enable, None)?)
    }

    fn seek(&self, position_ms: u64) -> Result<(), ApiError> {
        let position = chrono::Duration::milliseconds(position_ms as i64);
        Ok(self.client.seek_track(position, None)?)
    }

    fn like(&self, track_id: &str) -> Result<(), ApiError> {
        let id = TrackId::from_id(track_id).map_err(|_| ApiError::InvalidId(track_id.to_string()))?;
        Ok(self.client.current_user_saved_tracks_add([id])?)
    }
}
