//! SSE events operations.

use trackhub_core::events::ChangeEvent;
use trackhub_core::record::RecordKind;

use super::TrackhubClient;
use crate::error::{ClientError, Result};

/// A change event together with its stream ID.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct StreamedEvent {
    pub event_id: Option<u64>,
    #[serde(flatten)]
    pub event: ChangeEvent,
}

fn events_path(kinds: &[RecordKind], last_event_id: Option<u64>) -> String {
    let mut params = Vec::new();
    if !kinds.is_empty() {
        let kinds: Vec<&str> = kinds.iter().map(RecordKind::as_str).collect();
        params.push(format!("kinds={}", kinds.join(",")));
    }
    if let Some(id) = last_event_id {
        params.push(format!("last_event_id={}", id));
    }

    if params.is_empty() {
        "/api/events".to_string()
    } else {
        format!("/api/events?{}", params.join("&"))
    }
}

impl TrackhubClient {
    /// Watch change events for the given kinds (all kinds when empty).
    /// Returns a stream of events.
    pub async fn watch_events(
        &self,
        kinds: &[RecordKind],
        last_event_id: Option<u64>,
    ) -> Result<impl futures_util::Stream<Item = Result<StreamedEvent>>> {
        let response = self
            .client
            .get(self.url(&events_path(kinds, last_event_id)))
            .header("Accept", "text/event-stream")
            .send()
            .await?;
        let response = Self::check_status(response).await?;

        let stream = async_stream::stream! {
            use tokio_stream::StreamExt;

            let mut byte_stream = response.bytes_stream();
            let mut buffer = String::new();

            while let Some(chunk_result) = byte_stream.next().await {
                match chunk_result {
                    Ok(chunk) => {
                        buffer.push_str(&String::from_utf8_lossy(&chunk).replace("\r\n", "\n"));

                        // Parse complete SSE events from buffer
                        while let Some(pos) = buffer.find("\n\n") {
                            let event_str = buffer[..pos].to_string();
                            buffer.drain(..pos + 2);

                            match parse_sse_event(&event_str) {
                                Ok(Some(event)) => yield Ok(event),
                                Ok(None) => {}
                                Err(e) => yield Err(e),
                            }
                        }
                    }
                    Err(e) => {
                        yield Err(ClientError::Connection(e.to_string()));
                        break;
                    }
                }
            }
        };

        Ok(stream)
    }
}

/// Parse an SSE event from a string.
///
/// Comment-only blocks (keep-alives) yield `None`.
fn parse_sse_event(event_str: &str) -> Result<Option<StreamedEvent>> {
    let mut id = None;
    let mut data: Vec<&str> = Vec::new();

    for line in event_str.lines() {
        if line.starts_with(':') {
            continue;
        }
        let (field, value) = match line.split_once(':') {
            Some((field, value)) => (field, value.strip_prefix(' ').unwrap_or(value)),
            None => (line, ""),
        };
        match field {
            "id" => id = value.trim().parse().ok(),
            "data" => data.push(value),
            _ => {}
        }
    }

    if data.is_empty() {
        return Ok(None);
    }

    let event: ChangeEvent = serde_json::from_str(&data.join("\n"))
        .map_err(|e| ClientError::SseParse(e.to_string()))?;
    Ok(Some(StreamedEvent {
        event_id: id,
        event,
    }))
}
