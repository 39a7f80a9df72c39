//! Scanner capability: turns a stream of decodes into scan events.
//!
//! DESIGN
//! ======
//! A scanner is "rendered" against a channel that receives both successful
//! decodes and decode errors, tagged with the reader they came from. The
//! station consumes that channel on a single task, so events from both
//! readers are handled strictly in arrival order.
//!
//! `LineScanner` reads newline-terminated decodes from any byte stream: a
//! keyboard-wedge or serial scanner, a FIFO, a file, or stdin. Reads are
//! paced at the configured decode rate; lines are buffered, never dropped.

use std::io;
use std::time::Duration;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info};

pub const DEFAULT_FPS: u32 = 10;
pub const DEFAULT_QRBOX: u32 = 250;

// =============================================================================
// TYPES
// =============================================================================

/// Which scanner a decode came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reader {
    Pallet,
    Part,
}

impl Reader {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pallet => "pallet-reader",
            Self::Part => "part-reader",
        }
    }
}

/// Decode pacing and detection-region size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScannerConfig {
    /// Decode attempts per second.
    pub fps: u32,
    /// Square detection-region edge in pixels. Only camera backends use it.
    pub qrbox: u32,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self { fps: DEFAULT_FPS, qrbox: DEFAULT_QRBOX }
    }
}

impl ScannerConfig {
    /// Minimum spacing between decode attempts. An `fps` of zero is treated as one.
    #[must_use]
    pub fn decode_interval(&self) -> Duration {
        Duration::from_secs(1) / self.fps.max(1)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("scanner read failed: {0}")]
    Read(#[from] io::Error),
    #[error("decoded bytes are not valid UTF-8")]
    Encoding,
}

#[derive(Debug)]
pub struct ScanEvent {
    pub reader: Reader,
    pub result: Result<String, ScanError>,
}

// =============================================================================
// LINE SCANNER
// =============================================================================

pub struct LineScanner<R> {
    reader: Reader,
    input: R,
    config: ScannerConfig,
}

impl<R> LineScanner<R>
where
    R: AsyncBufRead + Unpin + Send + 'static,
{
    #[must_use]
    pub fn new(reader: Reader, input: R, config: ScannerConfig) -> Self {
        Self { reader, input, config }
    }

    /// Start decoding in a background task, sending every decode and decode
    /// error to `events`. The task ends at end of input, after a read error,
    /// or once the receiver is dropped.
    pub fn render(self, events: mpsc::Sender<ScanEvent>) -> JoinHandle<()> {
        let Self { reader, mut input, config } = self;
        info!(reader = reader.as_str(), fps = config.fps, qrbox = config.qrbox, "scanner rendered");

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(config.decode_interval());
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut buf = Vec::new();

            loop {
                ticker.tick().await;
                buf.clear();

                let (result, stop) = match input.read_until(b'\n', &mut buf).await {
                    Ok(0) => break,
                    Ok(_) => (decode_line(&buf), false),
                    Err(e) => (Err(ScanError::Read(e)), true),
                };

                if events.send(ScanEvent { reader, result }).await.is_err() || stop {
                    break;
                }
            }

            debug!(reader = reader.as_str(), "scanner input closed");
        })
    }
}

/// Wait for a rendered scanner task to finish. A panicked or cancelled task
/// is logged at error level and reported as `false`.
pub async fn join_scanner(reader: Reader, handle: JoinHandle<()>) -> bool {
    match handle.await {
        Ok(()) => true,
        Err(e) => {
            error!(reader = reader.as_str(), error = %e, "scanner task failed");
            false
        }
    }
}

/// Strip the line terminator and decode as UTF-8.
fn decode_line(line: &[u8]) -> Result<String, ScanError> {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    let line = line.strip_suffix(b"\r").unwrap_or(line);
    String::from_utf8(line.to_vec()).map_err(|_| ScanError::Encoding)
}

/// Open a scanner input: `-` is stdin, anything else a path.
///
/// # Errors
///
/// Returns an error if the path cannot be opened.
pub async fn open_input(path: &str) -> io::Result<Box<dyn AsyncBufRead + Unpin + Send>> {
    if path == "-" {
        return Ok(Box::new(BufReader::new(tokio::io::stdin())));
    }
    let file = tokio::fs::File::open(path).await?;
    Ok(Box::new(BufReader::new(file)))
}

#[cfg(test)]
#[path = "scanner_test.rs"]
mod tests;
