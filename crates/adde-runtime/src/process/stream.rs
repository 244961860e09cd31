//! Stream drains for child stdout/stderr (non-UTF8-safe).
//!
//! `mcservl` is C tooling and can emit non-UTF8 bytes. Using
//! `BufReader::lines()` would end the drain on invalid UTF-8, so chunks are
//! read up to each newline and decoded lossily instead. Newlines are kept so
//! the buffer holds the output exactly as written.

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::task::JoinHandle;
use tracing::debug;

use super::output::OutputBuffer;

/// Which child stream a drain reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamKind {
    Stdout,
    Stderr,
}

impl StreamKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Stdout => "stdout",
            Self::Stderr => "stderr",
        }
    }
}

/// Drain `stream` into `buffer` until end-of-stream on a new task.
///
/// A read error appends a `Read error` marker to the buffer and ends the
/// task; it is never returned to the caller.
pub fn spawn_stream_drain(
    stream: impl AsyncRead + Unpin + Send + 'static,
    buffer: OutputBuffer,
    kind: StreamKind,
) -> JoinHandle<()> {
    tokio::spawn(drain(stream, buffer, kind))
}

async fn drain(stream: impl AsyncRead + Unpin, buffer: OutputBuffer, kind: StreamKind) {
    let mut reader = BufReader::new(stream);
    let mut chunk: Vec<u8> = Vec::with_capacity(1024);
    let stream_type = kind.as_str();

    loop {
        chunk.clear();
        match reader.read_until(b'\n', &mut chunk).await {
            Ok(0) => break, // EOF
            Ok(_) => buffer.append(&String::from_utf8_lossy(&chunk)),
            Err(e) => {
                debug!(%stream_type, error = %e, "stream drain exiting due to read error");
                buffer.append(&format!("\nRead error: {e}"));
                break;
            }
        }
    }

    debug!(%stream_type, bytes = buffer.len(), "stream drain finished");
}
