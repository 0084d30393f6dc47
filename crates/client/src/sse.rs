//! Incremental Server-Sent-Events parsing.

/// One parsed SSE event: optional event name plus joined data lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SseEvent {
    pub name: Option<String>,
    pub data: String,
}

/// Feed-as-you-go parser over the raw SSE byte stream.
///
/// Network chunks split events (and even UTF-8 sequences) at arbitrary
/// byte boundaries, so the parser buffers bytes and only decodes once a
/// blank line completes an event. Comment lines (keep-alive pings) and
/// events without data are dropped.
#[derive(Debug, Default)]
pub struct EventParser {
    buffer: Vec<u8>,
}

impl EventParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume a chunk, returning every event it completed.
    pub fn feed(&mut self, bytes: &[u8]) -> Vec<SseEvent> {
        self.buffer.extend_from_slice(bytes);

        let mut events = Vec::new();
        while let Some(pos) = self.buffer.windows(2).position(|w| w == b"\n\n") {
            let rest = self.buffer.split_off(pos + 2);
            let block = std::mem::replace(&mut self.buffer, rest);
            let text = String::from_utf8_lossy(&block[..pos]).into_owned();

            if let Some(event) = Self::parse_block(&text) {
                events.push(event);
            }
        }

        events
    }

    fn parse_block(block: &str) -> Option<SseEvent> {
        let mut name = None;
        let mut data_lines: Vec<&str> = Vec::new();

        for line in block.lines() {
            let line = line.trim_end_matches('\r');

            if line.starts_with(':') {
                // Comment (keep-alive); ignored.
            } else if let Some(rest) = line.strip_prefix("event:") {
                name = Some(rest.strip_prefix(' ').unwrap_or(rest).to_string());
            } else if let Some(rest) = line.strip_prefix("data:") {
                data_lines.push(rest.strip_prefix(' ').unwrap_or(rest));
            }
        }

        if data_lines.is_empty() {
            return None;
        }

        Some(SseEvent {
            name,
            data: data_lines.join("\n"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_complete_event_parses() {
        let mut parser = EventParser::new();
        let events = parser.feed(b"event: snapshot\ndata: {\"items\":[]}\n\n");

        assert_eq!(
            events,
            vec![SseEvent {
                name: Some("snapshot".to_string()),
                data: "{\"items\":[]}".to_string(),
            }]
        );
    }

    #[test]
    fn events_split_across_chunks_reassemble() {
        let mut parser = EventParser::new();

        assert!(parser.feed(b"event: snap").is_empty());
        assert!(parser.feed(b"shot\ndata: {\"a\"").is_empty());
        let events = parser.feed(b":1}\n\nevent: snapshot\ndata: 2\n\n");

        assert_eq!(events.len(), 2);
        assert_eq!(events[0].data, "{\"a\":1}");
        assert_eq!(events[1].data, "2");
    }

    #[test]
    fn utf8_split_mid_character_survives() {
        let payload = "data: \"æble\"\n\n".as_bytes();
        let mut parser = EventParser::new();

        // Split inside the two-byte 'æ' sequence.
        let split = payload.iter().position(|&b| b == 0xc3).unwrap() + 1;
        assert!(parser.feed(&payload[..split]).is_empty());
        let events = parser.feed(&payload[split..]);

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].data, "\"æble\"");
    }

    #[test]
    fn keep_alive_comments_are_dropped() {
        let mut parser = EventParser::new();
        let events = parser.feed(b":keep-alive\n\ndata: 1\n\n");

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].name, None);
        assert_eq!(events[0].data, "1");
    }

    #[test]
    fn multi_line_data_joins_with_newlines() {
        let mut parser = EventParser::new();
        let events = parser.feed(b"data: first\ndata: second\n\n");

        assert_eq!(events[0].data, "first\nsecond");
    }
}
