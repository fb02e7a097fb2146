//! The control loop tying the device link to the remote player.

pub mod commands;
pub mod display;
pub mod scheduler;

use crate::player::{self, DispatchOutcome, PlayerTrait};
use crate::serial::{is_transient, LineAssembler, SerialLink};
use anyhow::{Context, Result};
use commands::DeviceCommand;
use scheduler::{Clock, Scheduler};
use std::io;
use std::time::Duration;

pub use display::{display_lines, format_time};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BridgeTiming {
    /// How often now-playing is pushed to the display
    pub update_interval: Duration,
    /// Sleep between loop iterations
    pub idle: Duration,
}

impl Default for BridgeTiming {
    fn default() -> Self {
        Self {
            update_interval: Duration::from_secs(1),
            idle: Duration::from_millis(10),
        }
    }
}

pub struct Bridge<'p, L: SerialLink> {
    player: &'p dyn PlayerTrait,
    link: L,
    lines: LineAssembler,
    /// A push was cut short; the device may hold half a line
    needs_resync: bool,
}

impl<'p, L: SerialLink> Bridge<'p, L> {
    pub fn new(player: &'p dyn PlayerTrait, link: L) -> Self {
        Self {
            player,
            link,
            lines: LineAssembler::new(),
            needs_resync: false,
        }
    }

    /// Consume one byte if the device sent anything, dispatching a completed line.
    pub fn poll_serial(&mut self) -> Result<()> {
        let available = match self.link.bytes_available() {
            Ok(n) => n,
            Err(e) if is_transient(&e) => 0,
            Err(e) => return Err(e).context("checking serial input"),
        };
        if available == 0 {
            return Ok(());
        }
        let Some(byte) = self.link.read_byte().context("reading serial input")? else {
            return Ok(());
        };
        if let Some(line) = self.lines.push(byte) {
            tracing::info!(command = %line, "Received command");
            self.handle_line(&line);
        }
        Ok(())
    }

    /// Never fails: bad input and remote errors are logged and dropped.
    pub fn handle_line(&self, line: &str) {
        let command = match commands::parse(line) {
            Ok(c) => c,
            Err(e) => {
                tracing::debug!("Ignoring device input: {e}");
                return;
            }
        };

        match command {
            DeviceCommand::Key(key) => {
                tracing::info!(%key, "Keyboard key pressed");
            }
            DeviceCommand::Playback(cmd) => match player::dispatch(self.player, cmd) {
                Ok(DispatchOutcome::Sent) => {}
                Ok(DispatchOutcome::NothingPlaying) => {
                    tracing::debug!(?cmd, "Dropped command, nothing playing");
                }
                Err(e) => {
                    tracing::warn!(?cmd, "Error handling command {line}: {e}");
                }
            },
        }
    }

    /// Push now-playing to the display.
    ///
    /// A failed fetch or a timed-out write skips this tick; any other
    /// write failure is fatal.
    pub fn push_status(&mut self) -> Result<()> {
        let snap = match self.player.fetch_snapshot() {
            Ok(Some(snap)) => snap,
            Ok(None) => return Ok(()),
            Err(e) => {
                tracing::warn!("Error getting track info: {e}");
                return Ok(());
            }
        };
        match self.write_display(&display_lines(&snap)) {
            Ok(()) => Ok(()),
            Err(e) if is_transient(&e) => {
                tracing::warn!("Display update skipped: {e}");
                self.needs_resync = true;
                Ok(())
            }
            Err(e) => Err(e).context("writing display update"),
        }
    }

    fn write_display(&mut self, lines: &[String]) -> io::Result<()> {
        if self.needs_resync {
            // Terminate whatever partial line the last push left behind
            self.link.write_line("\n")?;
            self.needs_resync = false;
        }
        for line in lines {
            self.link.write_line(line)?;
        }
        Ok(())
    }
}

/// Run the loop until `should_stop` returns true or the serial link fails.
///
/// Consumes the link; it is dropped (closed) exactly once on every exit path.
pub fn run<L, C>(
    player: &dyn PlayerTrait,
    link: L,
    clock: C,
    timing: BridgeTiming,
    should_stop: impl Fn() -> bool,
) -> Result<()>
where
    L: SerialLink,
    C: Clock,
{
    let mut bridge = Bridge::new(player, link);
    let mut scheduler: Scheduler<Bridge<'_, L>, C> = Scheduler::new(clock, timing.idle);
    scheduler
        .every_tick("serial", Bridge::poll_serial)
        .every("display", timing.update_interval, Bridge::push_status);

    let result = scheduler.run(&mut bridge, should_stop);
    drop(bridge);
    result
}
