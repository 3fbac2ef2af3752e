//! Procurement event stream consumer.

use std::collections::VecDeque;

use futures_util::stream::BoxStream;
use futures_util::{Stream, StreamExt};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use roomcraft_agent::{AgentEvent, FrameDecoder};

use crate::error::ClientError;

/// Consumes a procurement event stream incrementally.
///
/// Completion rules:
/// - a `done` event completes the stream immediately; bytes arriving after it
///   are never surfaced;
/// - transport close without `done` (e.g. a network failure) is treated as an
///   implicit end, not an error;
/// - aborting via [`abort_handle`](Self::abort_handle) halts local processing
///   at the next poll without touching any error path.
pub struct EventStream {
    chunks: BoxStream<'static, Result<Vec<u8>, ClientError>>,
    decoder: FrameDecoder,
    pending: VecDeque<AgentEvent>,
    abort: CancellationToken,
    finished: bool,
}

impl EventStream {
    /// Wrap a raw byte-chunk stream.
    pub fn new<S>(chunks: S) -> Self
    where
        S: Stream<Item = Result<Vec<u8>, ClientError>> + Send + 'static,
    {
        Self {
            chunks: chunks.boxed(),
            decoder: FrameDecoder::new(),
            pending: VecDeque::new(),
            abort: CancellationToken::new(),
            finished: false,
        }
    }

    /// Token that aborts this stream when cancelled.
    pub fn abort_handle(&self) -> CancellationToken {
        self.abort.clone()
    }

    /// Next event in arrival order, or `None` once the session is complete.
    pub async fn next_event(&mut self) -> Option<AgentEvent> {
        loop {
            if self.finished || self.abort.is_cancelled() {
                self.finished = true;
                return None;
            }

            if let Some(event) = self.pending.pop_front() {
                if event.is_done() {
                    self.finished = true;
                }
                return Some(event);
            }

            tokio::select! {
                biased;
                _ = self.abort.cancelled() => {
                    debug!("Stream aborted by caller");
                    self.finished = true;
                    return None;
                }
                chunk = self.chunks.next() => match chunk {
                    Some(Ok(bytes)) => {
                        self.pending.extend(self.decoder.feed(&bytes));
                    }
                    Some(Err(e)) => {
                        debug!(error = %e, "Transport error; treating as end of stream");
                        self.finished = true;
                        return None;
                    }
                    None => {
                        // Close without a done frame is an implicit end.
                        self.finished = true;
                        return None;
                    }
                }
            }
        }
    }

    /// Drain the stream, collecting every remaining event.
    pub async fn collect_events(mut self) -> Vec<AgentEvent> {
        let mut events = Vec::new();
        while let Some(event) = self.next_event().await {
            events.push(event);
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::stream;
    use roomcraft_agent::{encode_frame, AgentEventKind};

    fn frame(event: &AgentEvent) -> Vec<u8> {
        encode_frame(event).unwrap().into_bytes()
    }

    fn chunk_stream(chunks: Vec<Vec<u8>>) -> EventStream {
        EventStream::new(stream::iter(chunks.into_iter().map(Ok)))
    }

    #[tokio::test]
    async fn test_full_session_in_order() {
        let stream = chunk_stream(vec![
            frame(&AgentEvent::thought("a")),
            frame(&AgentEvent::action("b")),
            frame(&AgentEvent::done()),
        ]);

        let kinds: Vec<_> = stream.collect_events().await.iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            [
                AgentEventKind::Thought,
                AgentEventKind::Action,
                AgentEventKind::Done,
            ]
        );
    }

    #[tokio::test]
    async fn test_done_completes_without_waiting_for_close() {
        // The transport would keep going, but `done` ends the session.
        let mut bytes = frame(&AgentEvent::done());
        bytes.extend(frame(&AgentEvent::thought("late")));

        let mut stream = chunk_stream(vec![bytes, frame(&AgentEvent::thought("later"))]);
        assert!(stream.next_event().await.unwrap().is_done());
        assert!(stream.next_event().await.is_none());
        assert!(stream.next_event().await.is_none());
    }

    #[tokio::test]
    async fn test_close_without_done_is_soft_completion() {
        let mut stream = chunk_stream(vec![frame(&AgentEvent::thought("a"))]);

        assert_eq!(stream.next_event().await.unwrap().kind, AgentEventKind::Thought);
        assert!(stream.next_event().await.is_none());
    }

    #[tokio::test]
    async fn test_transport_error_is_soft_completion() {
        let chunks = stream::iter(vec![
            Ok(frame(&AgentEvent::thought("a"))),
            Err(ClientError::Serialization("connection reset".to_string())),
            Ok(frame(&AgentEvent::done())),
        ]);
        let mut stream = EventStream::new(chunks);

        assert!(stream.next_event().await.is_some());
        // The error ends the session quietly; nothing after it is surfaced.
        assert!(stream.next_event().await.is_none());
        assert!(stream.next_event().await.is_none());
    }

    #[tokio::test]
    async fn test_abort_suppresses_further_events() {
        let mut stream = chunk_stream(vec![
            frame(&AgentEvent::thought("a")),
            frame(&AgentEvent::action("b")),
            frame(&AgentEvent::done()),
        ]);
        let abort = stream.abort_handle();

        assert_eq!(stream.next_event().await.unwrap().kind, AgentEventKind::Thought);
        abort.cancel();
        assert!(stream.next_event().await.is_none());
        assert!(stream.next_event().await.is_none());
    }
}
