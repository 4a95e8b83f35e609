//! SSE events handler for real-time change notifications.

use std::convert::Infallible;

use axum::{
    extract::{Query, State},
    http::HeaderMap,
    response::sse::{Event, KeepAlive, Sse},
};
use tokio::sync::broadcast::error::RecvError;

use trackhub_core::record::{ParseKindError, RecordKind};

use crate::handlers::AppError;
use crate::state::{AppState, StoredEvent};

const LAST_EVENT_ID_HEADER: &str = "last-event-id";

/// Query parameters for the SSE events endpoint.
#[derive(Debug, Default, serde::Deserialize)]
pub struct EventsQuery {
    /// Comma-separated record kinds, e.g. `vehicle,fill_up`. All kinds when absent.
    pub kinds: Option<String>,
    /// Last event ID received (for reconnection catch-up).
    pub last_event_id: Option<u64>,
}

/// Parses a comma-separated kind list. Empty or missing means every kind.
pub fn parse_kinds(raw: Option<&str>) -> Result<Vec<RecordKind>, ParseKindError> {
    let mut kinds = Vec::new();
    for part in raw.unwrap_or_default().split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let kind: RecordKind = part.parse()?;
        if !kinds.contains(&kind) {
            kinds.push(kind);
        }
    }

    if kinds.is_empty() {
        kinds = RecordKind::ALL.to_vec();
    }
    Ok(kinds)
}

fn to_sse_event(stored: &StoredEvent) -> Event {
    let data = serde_json::to_string(&stored.event).unwrap_or_default();
    Event::default()
        .id(stored.id.to_string())
        .event(stored.event.event_type())
        .data(data)
}

/// GET /api/events - Server-Sent Events stream of record changes.
///
/// Replays history newer than `last_event_id` (or the `Last-Event-ID`
/// header) before streaming live events. Event IDs are strictly increasing
/// within a stream.
pub async fn events_sse(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<EventsQuery>,
) -> Result<Sse<impl tokio_stream::Stream<Item = Result<Event, Infallible>>>, AppError> {
    let kinds = parse_kinds(query.kinds.as_deref())?;
    let last_event_id = query
        .last_event_id
        .or_else(|| {
            headers
                .get(LAST_EVENT_ID_HEADER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse().ok())
        })
        .unwrap_or(0);

    for kind in &kinds {
        state.ensure_event_listener(*kind).await;
    }

    // Subscribe before replaying so nothing falls between history and live.
    let mut live_rx = state.subscribe_live();
    let mut shutdown_rx = state.subscribe_shutdown();

    tracing::debug!(?kinds, last_event_id, "SSE client connected");

    let stream = async_stream::stream! {
        let mut last_sent = last_event_id;

        for stored in state.get_events_since(&kinds, last_sent) {
            last_sent = stored.id;
            yield Ok(to_sse_event(&stored));
        }

        loop {
            let received = tokio::select! {
                result = live_rx.recv() => Some(result),
                _ = shutdown_rx.recv() => None,
            };

            let stored = match received {
                None => {
                    tracing::info!("SSE session received shutdown signal");
                    break;
                }
                Some(Ok(stored)) => stored,
                Some(Err(RecvError::Lagged(skipped))) => {
                    tracing::warn!(skipped, "SSE client lagged, replaying from history");
                    for stored in state.get_events_since(&kinds, last_sent) {
                        last_sent = stored.id;
                        yield Ok(to_sse_event(&stored));
                    }
                    continue;
                }
                Some(Err(RecvError::Closed)) => break,
            };

            if stored.id <= last_sent || !kinds.contains(&stored.event.kind) {
                continue;
            }
            last_sent = stored.id;
            yield Ok(to_sse_event(&stored));
        }
    };

    Ok(Sse::new(stream).keep_alive(KeepAlive::default()))
}
