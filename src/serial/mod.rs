//! Serial link to the device: byte-level reads, line-level writes.

use std::io::{self, Read, Write};
use std::time::Duration;

/// Lines longer than this are garbage (baud mismatch, noise), not commands.
pub const MAX_LINE_LEN: usize = 256;

/// What the control loop needs from the device connection.
pub trait SerialLink {
    fn bytes_available(&mut self) -> io::Result<usize>;
    /// `Ok(None)` when the read timed out with nothing to return.
    fn read_byte(&mut self) -> io::Result<Option<u8>>;
    /// `line` must already carry its terminator.
    fn write_line(&mut self, line: &str) -> io::Result<()>;
}

/// Timeouts and interrupted syscalls just mean "nothing yet".
pub fn is_transient(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock | io::ErrorKind::Interrupted
    )
}

pub struct SerialPortLink {
    port: Box<dyn serialport::SerialPort>,
}

impl SerialPortLink {
    pub fn open(path: &str, baud_rate: u32, read_timeout: Duration) -> Result<Self, serialport::Error> {
        let port = serialport::new(path, baud_rate).timeout(read_timeout).open()?;
        Ok(Self { port })
    }
}

impl SerialLink for SerialPortLink {
    fn bytes_available(&mut self) -> io::Result<usize> {
        Ok(self.port.bytes_to_read()? as usize)
    }

    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        let mut buf = [0u8; 1];
        match self.port.read(&mut buf) {
            Ok(0) => Ok(None),
            Ok(_) => Ok(Some(buf[0])),
            Err(e) if is_transient(&e) => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn write_line(&mut self, line: &str) -> io::Result<()> {
        self.port.write_all(line.as_bytes())?;
        self.port.flush()
    }
}

/// Accumulates bytes into `\n`/`\r`-terminated command lines.
#[derive(Debug, Default)]
pub struct LineAssembler {
    buf: String,
    overflowed: bool,
}

impl LineAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one byte; returns a completed, non-empty line.
    ///
    /// Bytes that aren't a complete character on their own (anything
    /// >= 0x80) are dropped.
    pub fn push(&mut self, byte: u8) -> Option<String> {
        match byte {
            b'\n' | b'\r' => {
                let overflowed = std::mem::take(&mut self.overflowed);
                let line = std::mem::take(&mut self.buf);
                if overflowed || line.is_empty() {
                    None
                } else {
                    Some(line)
                }
            }
            b if b.is_ascii() => {
                if self.overflowed {
                    return None;
                }
                if self.buf.len() >= MAX_LINE_LEN {
                    tracing::warn!("Discarding serial line longer than {MAX_LINE_LEN} bytes");
                    self.buf.clear();
                    self.overflowed = true;
                    return None;
                }
                self.buf.push(b as char);
                None
            }
            _ => None,
        }
    }

    #[cfg(test)]
    fn pending(&self) -> &str {
        &self.buf
    }
}
