//! Line-framed transport adapter over arbitrary async byte streams.

use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader, Stdin, Stdout};

use super::wire::{Request, Response};
use crate::lib::errors::TransportError;

/// One decoded inbound frame. Malformed frames stay recoverable: the caller
/// answers them with an error response and keeps the connection open.
#[derive(Debug)]
pub enum Inbound {
    Request(Request),
    Malformed { message: String },
}

/// One raw line off the stream before JSON decoding.
enum RawFrame {
    Line(Vec<u8>),
    OverLength,
}

/// Transport adapter reading newline-delimited JSON requests and writing
/// newline-delimited JSON responses. Not restartable: once `recv` returns
/// `None` the input stream is closed for good.
pub struct FramedTransport<R, W> {
    reader: BufReader<R>,
    writer: W,
    max_frame_bytes: usize,
}

impl<R, W> FramedTransport<R, W>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(reader: R, writer: W, max_frame_bytes: usize) -> Self {
        Self {
            reader: BufReader::new(reader),
            writer,
            max_frame_bytes,
        }
    }

    /// Wait for the next frame. Returns `Ok(None)` exactly once, at input
    /// close. Blank lines are skipped without producing a frame.
    pub async fn recv(&mut self) -> Result<Option<Inbound>, TransportError> {
        loop {
            match self.next_frame().await? {
                None => return Ok(None),
                Some(RawFrame::OverLength) => {
                    return Ok(Some(Inbound::Malformed {
                        message: format!(
                            "request frame exceeds {} bytes",
                            self.max_frame_bytes
                        ),
                    }))
                }
                Some(RawFrame::Line(bytes)) => {
                    if bytes.iter().all(u8::is_ascii_whitespace) {
                        continue;
                    }
                    let inbound = match serde_json::from_slice::<Request>(&bytes) {
                        Ok(request) => Inbound::Request(request),
                        Err(err) => Inbound::Malformed {
                            message: format!("invalid request frame: {err}"),
                        },
                    };
                    return Ok(Some(inbound));
                }
            }
        }
    }

    /// Read one newline-terminated line, holding at most `max_frame_bytes`
    /// of it in memory. An over-length line is drained chunk by chunk until
    /// its newline so the frames after it stay readable.
    async fn next_frame(&mut self) -> Result<Option<RawFrame>, TransportError> {
        let mut line: Vec<u8> = Vec::new();
        let mut discarding = false;
        loop {
            let (newline_at, chunk_len) = {
                let chunk = self
                    .reader
                    .fill_buf()
                    .await
                    .map_err(|source| TransportError::Read { source })?;
                if chunk.is_empty() {
                    if discarding {
                        return Ok(Some(RawFrame::OverLength));
                    }
                    if line.is_empty() {
                        return Ok(None);
                    }
                    // Unterminated final line still counts as a frame.
                    return Ok(Some(RawFrame::Line(std::mem::take(&mut line))));
                }
                let newline_at = chunk.iter().position(|&b| b == b'\n');
                if !discarding {
                    match newline_at {
                        Some(idx) => line.extend_from_slice(&chunk[..idx]),
                        None => line.extend_from_slice(chunk),
                    }
                }
                (newline_at, chunk.len())
            };

            match newline_at {
                Some(idx) => {
                    self.reader.consume(idx + 1);
                    if discarding || line.len() > self.max_frame_bytes {
                        return Ok(Some(RawFrame::OverLength));
                    }
                    return Ok(Some(RawFrame::Line(std::mem::take(&mut line))));
                }
                None => {
                    self.reader.consume(chunk_len);
                    if line.len() > self.max_frame_bytes {
                        discarding = true;
                        line.clear();
                    }
                }
            }
        }
    }

    /// Serialize one response followed by a newline and flush it.
    pub async fn send(&mut self, response: &Response) -> Result<(), TransportError> {
        let mut line = serde_json::to_string(response)
            .map_err(|source| TransportError::Encode { source })?;
        line.push('\n');
        self.writer
            .write_all(line.as_bytes())
            .await
            .map_err(|source| TransportError::Write { source })?;
        self.writer
            .flush()
            .await
            .map_err(|source| TransportError::Write { source })
    }
}

/// Transport over the process stdio streams. stderr is left to `tracing`.
pub fn stdio(max_frame_bytes: usize) -> FramedTransport<Stdin, Stdout> {
    FramedTransport::new(tokio::io::stdin(), tokio::io::stdout(), max_frame_bytes)
}
