//! Wire framing for agent event streams.
//!
//! One frame is a marker line carrying a single-line JSON object, terminated
//! by a blank line: `data: {"event": .., "data": ..}\n\n`. The encoder emits
//! one frame per event; the decoder reconstructs events from a byte stream
//! delivered in arbitrary chunks (frames may be split or coalesced anywhere,
//! including inside a multi-byte character).

use tracing::debug;

use crate::error::AgentError;
use crate::event::AgentEvent;

const FRAME_MARKER: &str = "data:";

/// Serialize one event as a self-delimited frame.
///
/// Each frame is written and flushed on its own; consumers depend on
/// low-latency delivery, so frames are never batched.
pub fn encode_frame(event: &AgentEvent) -> Result<String, AgentError> {
    let json = serde_json::to_string(event)?;
    Ok(format!("{FRAME_MARKER} {json}\n\n"))
}

/// Incremental frame decoder.
///
/// Buffers input across [`feed`](Self::feed) calls and emits parsed events in
/// arrival order. Lines that are not a marker line with valid JSON (blank
/// separators, comments, malformed payloads, non-UTF-8 noise) are silently
/// discarded; this leniency is deliberate, not an error path. After a `done`
/// event the decoder is finished and ignores all further input.
#[derive(Debug, Default)]
pub struct FrameDecoder {
    buf: Vec<u8>,
    finished: bool,
}

impl FrameDecoder {
    /// Create a new decoder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true once a `done` event has been decoded.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Feed a chunk of bytes, returning every event completed by it.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<AgentEvent> {
        if self.finished {
            return Vec::new();
        }
        self.buf.extend_from_slice(chunk);

        let mut events = Vec::new();
        let mut consumed = 0;
        while let Some(offset) = self.buf[consumed..].iter().position(|&b| b == b'\n') {
            let line = &self.buf[consumed..consumed + offset];
            let parsed = parse_line(line);
            consumed += offset + 1;

            if let Some(event) = parsed {
                let is_done = event.is_done();
                events.push(event);
                if is_done {
                    self.finished = true;
                    break;
                }
            }
        }

        if self.finished {
            self.buf.clear();
        } else {
            self.buf.drain(..consumed);
        }
        events
    }
}

/// Parse one complete line into an event, or discard it.
fn parse_line(line: &[u8]) -> Option<AgentEvent> {
    let text = match std::str::from_utf8(line) {
        Ok(text) => text.trim(),
        Err(_) => {
            debug!(len = line.len(), "Discarding non-UTF-8 line");
            return None;
        }
    };
    if text.is_empty() {
        return None;
    }
    let payload = text.strip_prefix(FRAME_MARKER)?.trim_start();
    match serde_json::from_str(payload) {
        Ok(event) => Some(event),
        Err(e) => {
            debug!(error = %e, "Discarding malformed frame line");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{AgentEventKind, ProcurementSummary};

    fn session_bytes() -> Vec<u8> {
        let mut bytes = Vec::new();
        for event in [
            AgentEvent::thought("Analysing 2 pieces"),
            AgentEvent::action("Searching 'Sofa'"),
            AgentEvent::summary(&ProcurementSummary::new(899.0, None, 1)),
            AgentEvent::done(),
        ] {
            bytes.extend_from_slice(encode_frame(&event).unwrap().as_bytes());
        }
        bytes
    }

    #[test]
    fn test_encode_frame_shape() {
        let frame = encode_frame(&AgentEvent::thought("hi")).unwrap();
        assert!(frame.starts_with("data: {"));
        assert!(frame.ends_with("}\n\n"));
        assert_eq!(frame.matches('\n').count(), 2);
    }

    #[test]
    fn test_decode_whole_stream() {
        let mut decoder = FrameDecoder::new();
        let events = decoder.feed(&session_bytes());
        let kinds: Vec<_> = events.iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            [
                AgentEventKind::Thought,
                AgentEventKind::Action,
                AgentEventKind::Summary,
                AgentEventKind::Done,
            ]
        );
        assert!(decoder.is_finished());
    }

    #[test]
    fn test_arbitrary_chunk_boundaries() {
        let bytes = session_bytes();
        // Every chunk size from single bytes upward must yield the same events,
        // including splits inside a frame.
        for chunk_size in 1..=bytes.len() {
            let mut decoder = FrameDecoder::new();
            let mut events = Vec::new();
            for chunk in bytes.chunks(chunk_size) {
                events.extend(decoder.feed(chunk));
            }
            assert_eq!(events.len(), 4, "chunk_size {chunk_size}");
            assert!(events[3].is_done());
        }
    }

    #[test]
    fn test_split_inside_multibyte_char() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(encode_frame(&AgentEvent::thought("búdget ∞")).unwrap().as_bytes());
        bytes.extend_from_slice(encode_frame(&AgentEvent::done()).unwrap().as_bytes());

        for chunk_size in 1..4 {
            let mut decoder = FrameDecoder::new();
            let mut events = Vec::new();
            for chunk in bytes.chunks(chunk_size) {
                events.extend(decoder.feed(chunk));
            }
            assert_eq!(events.len(), 2);
            assert_eq!(events[0].data, "búdget ∞");
        }
    }

    #[test]
    fn test_malformed_line_between_valid_frames() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(encode_frame(&AgentEvent::thought("a")).unwrap().as_bytes());
        bytes.extend_from_slice(b"data: {not json}\n\n");
        bytes.extend_from_slice(b"noise without marker\n");
        bytes.extend_from_slice(encode_frame(&AgentEvent::action("b")).unwrap().as_bytes());

        let mut decoder = FrameDecoder::new();
        let events = decoder.feed(&bytes);
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].kind, AgentEventKind::Thought);
        assert_eq!(events[1].kind, AgentEventKind::Action);
    }

    #[test]
    fn test_bytes_after_done_are_ignored() {
        let mut decoder = FrameDecoder::new();
        let mut bytes = encode_frame(&AgentEvent::done()).unwrap().into_bytes();
        bytes.extend_from_slice(encode_frame(&AgentEvent::thought("late")).unwrap().as_bytes());

        let events = decoder.feed(&bytes);
        assert_eq!(events.len(), 1);
        assert!(events[0].is_done());

        // Later feeds are ignored entirely.
        let late = decoder.feed(encode_frame(&AgentEvent::thought("later")).unwrap().as_bytes());
        assert!(late.is_empty());
    }

    #[test]
    fn test_incomplete_tail_is_held_back() {
        let frame = encode_frame(&AgentEvent::thought("partial")).unwrap();
        let (head, tail) = frame.as_bytes().split_at(frame.len() - 5);

        let mut decoder = FrameDecoder::new();
        assert!(decoder.feed(head).is_empty());
        let events = decoder.feed(tail);
        assert_eq!(events.len(), 1);
    }
}
