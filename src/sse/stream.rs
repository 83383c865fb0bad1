//! Pull-based frame stream over a push-based response body.
//!
//! Bytes go through [`Utf8Decoder`], the text is split into lines and fed
//! to [`SseParser`], and dispatched records are mapped to [`Frame`]s. A
//! frame is yielded as soon as its blank line has been seen, even when
//! more bytes are already buffered behind it.

use std::pin::Pin;

use bytes::Bytes;
use futures::Stream;
use futures_util::stream;
use futures_util::StreamExt;

use crate::error::SessionError;
use crate::sse::decoder::Utf8Decoder;
use crate::sse::events::Frame;
use crate::sse::parser::{frame_from_record, SseParser};
use crate::traits::{ByteStream, HttpError};

/// Lazy, finite sequence of frames.
pub type FrameStream = Pin<Box<dyn Stream<Item = Result<Frame, SessionError>> + Send>>;

/// Wrap a byte stream into a [`FrameStream`].
///
/// The upstream is owned by the returned stream and dropped when it ends,
/// fails, or when the consumer drops the frame stream early.
pub fn frame_stream<S>(upstream: S) -> FrameStream
where
    S: Stream<Item = Result<Bytes, HttpError>> + Send + 'static,
{
    let reader = FrameReader::new(Box::pin(upstream));
    Box::pin(stream::unfold(reader, |mut reader| async move {
        match reader.next_frame().await {
            Some(item) => Some((item, reader)),
            None => None,
        }
    }))
}

struct FrameReader {
    /// `None` once the body is exhausted or failed
    upstream: Option<ByteStream>,
    decoder: Utf8Decoder,
    parser: SseParser,
    /// Decoded text not yet split into lines
    buffer: String,
}

impl FrameReader {
    fn new(upstream: ByteStream) -> Self {
        Self {
            upstream: Some(upstream),
            decoder: Utf8Decoder::new(),
            parser: SseParser::new(),
            buffer: String::new(),
        }
    }

    /// Split the next complete line off the buffer. Lines end in `\n`,
    /// `\r\n` or a lone `\r`.
    fn take_line(&mut self) -> Option<String> {
        let pos = self.buffer.find(|c: char| c == '\r' || c == '\n')?;
        let bytes = self.buffer.as_bytes();
        let end = if bytes[pos] == b'\r' {
            match bytes.get(pos + 1) {
                Some(b'\n') => pos + 2,
                Some(_) => pos + 1,
                // A trailing CR may be the first half of a CRLF
                None if self.upstream.is_some() => return None,
                None => pos + 1,
            }
        } else {
            pos + 1
        };
        let mut line: String = self.buffer.drain(..end).collect();
        line.truncate(pos);
        Some(line)
    }

    async fn next_frame(&mut self) -> Option<Result<Frame, SessionError>> {
        loop {
            // First, drain any complete lines already buffered
            while let Some(line) = self.take_line() {
                let Some(record) = self.parser.feed_line(&line) else {
                    continue;
                };
                match frame_from_record(record) {
                    Ok(Some(frame)) => return Some(Ok(frame)),
                    Ok(None) => continue,
                    Err(e) => return Some(Err(e.into())),
                }
            }

            let Some(upstream) = self.upstream.as_mut() else {
                if !self.buffer.is_empty() || self.parser.has_partial_record() {
                    tracing::debug!("discarding unterminated SSE record at end of stream");
                    self.buffer.clear();
                    self.parser.reset();
                }
                return None;
            };

            match upstream.next().await {
                Some(Ok(chunk)) => {
                    let text = self.decoder.decode(&chunk);
                    self.buffer.push_str(&text);
                }
                Some(Err(e)) => {
                    self.upstream = None;
                    self.buffer.clear();
                    self.parser.reset();
                    return Some(Err(SessionError::StreamRead(e.to_string())));
                }
                None => {
                    self.upstream = None;
                    let tail = self.decoder.finish();
                    self.buffer.push_str(&tail);
                }
            }
        }
    }
}
