//! Event Stream Decoder
//!
//! Incremental decoder for the `text/event-stream` wire format used by the
//! notification stream. Bytes arrive in arbitrary chunks; the decoder
//! buffers until complete lines are available and dispatches one event per
//! blank line, following the EventSource processing model.

/// A dispatched server-sent event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SseFrame {
    /// Event name, `"message"` when the stream did not name one
    pub event: String,
    /// Data payload; multiple data lines are joined with newlines
    pub data: String,
}

/// Incremental decoder for a server-sent event stream
#[derive(Debug, Default)]
pub struct SseDecoder {
    buffer: Vec<u8>,
    event_name: Option<String>,
    data_lines: Vec<String>,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a chunk of bytes, returning every event the chunk completed
    ///
    /// Incomplete trailing lines stay buffered, so a UTF-8 sequence or a
    /// field split across chunk boundaries is reassembled before parsing.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<SseFrame> {
        self.buffer.extend_from_slice(chunk);

        let mut frames = Vec::new();
        while let Some(pos) = self.buffer.iter().position(|&b| b == b'\n') {
            let mut line: Vec<u8> = self.buffer.drain(..=pos).collect();
            line.pop();
            if line.last() == Some(&b'\r') {
                line.pop();
            }
            let line = String::from_utf8_lossy(&line).into_owned();
            self.process_line(&line, &mut frames);
        }
        frames
    }

    fn process_line(&mut self, line: &str, frames: &mut Vec<SseFrame>) {
        if line.is_empty() {
            // A blank line dispatches the pending event. Without data there
            // is nothing to dispatch and the event name resets.
            if self.data_lines.is_empty() {
                self.event_name = None;
                return;
            }
            frames.push(SseFrame {
                event: self
                    .event_name
                    .take()
                    .unwrap_or_else(|| "message".to_string()),
                data: self.data_lines.join("\n"),
            });
            self.data_lines.clear();
            return;
        }

        // Comment lines double as server keep-alives
        if line.starts_with(':') {
            return;
        }

        let (field, value) = match line.split_once(':') {
            Some((field, value)) => (field, value.strip_prefix(' ').unwrap_or(value)),
            None => (line, ""),
        };

        match field {
            "event" => self.event_name = Some(value.to_string()),
            "data" => self.data_lines.push(value.to_string()),
            // id and retry fields are not used by this client
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_named_event() {
        let mut decoder = SseDecoder::new();
        let frames = decoder.feed(b"event: INIT\ndata: connected\n\n");

        assert_eq!(
            frames,
            vec![SseFrame {
                event: "INIT".to_string(),
                data: "connected".to_string(),
            }]
        );
    }

    #[test]
    fn test_unnamed_event_defaults_to_message() {
        let mut decoder = SseDecoder::new();
        let frames = decoder.feed(b"data: hello\n\n");

        assert_eq!(frames[0].event, "message");
        assert_eq!(frames[0].data, "hello");
    }

    #[test]
    fn test_multiple_data_lines_join_with_newline() {
        let mut decoder = SseDecoder::new();
        let frames = decoder.feed(b"data: line one\ndata: line two\n\n");

        assert_eq!(frames[0].data, "line one\nline two");
    }

    #[test]
    fn test_comment_lines_are_skipped() {
        let mut decoder = SseDecoder::new();
        let frames = decoder.feed(b":keep-alive\n\nevent: INIT\ndata: ok\n\n");

        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].event, "INIT");
    }

    #[test]
    fn test_crlf_line_endings() {
        let mut decoder = SseDecoder::new();
        let frames = decoder.feed(b"event: INIT\r\ndata: ok\r\n\r\n");

        assert_eq!(frames[0].event, "INIT");
        assert_eq!(frames[0].data, "ok");
    }

    #[test]
    fn test_event_split_across_chunks() {
        let mut decoder = SseDecoder::new();
        assert!(decoder.feed(b"event: NOTIFI").is_empty());
        assert!(decoder.feed(b"CATION\ndata: {\"id\"").is_empty());
        let frames = decoder.feed(b":1}\n\n");

        assert_eq!(frames[0].event, "NOTIFICATION");
        assert_eq!(frames[0].data, "{\"id\":1}");
    }

    #[test]
    fn test_utf8_split_across_chunks() {
        let mut decoder = SseDecoder::new();
        let body = "data: caf\u{00e9}\n\n".as_bytes();
        // Split inside the two-byte encoding of 'é'
        let split = body.len() - 3;

        assert!(decoder.feed(&body[..split]).is_empty());
        let frames = decoder.feed(&body[split..]);
        assert_eq!(frames[0].data, "caf\u{00e9}");
    }

    #[test]
    fn test_blank_line_without_data_dispatches_nothing() {
        let mut decoder = SseDecoder::new();
        let frames = decoder.feed(b"event: INIT\n\ndata: later\n\n");

        // The first blank line resets the pending INIT name
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].event, "message");
        assert_eq!(frames[0].data, "later");
    }

    #[test]
    fn test_event_name_resets_between_events() {
        let mut decoder = SseDecoder::new();
        let frames = decoder.feed(b"event: INIT\ndata: a\n\ndata: b\n\n");

        assert_eq!(frames[0].event, "INIT");
        assert_eq!(frames[1].event, "message");
    }

    #[test]
    fn test_field_without_colon_is_ignored() {
        let mut decoder = SseDecoder::new();
        let frames = decoder.feed(b"retry\ndata: ok\n\n");

        assert_eq!(frames[0].data, "ok");
    }
}
