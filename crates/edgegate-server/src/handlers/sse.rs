use std::convert::Infallible;

use axum::response::{
    sse::{Event, KeepAlive},
    Sse,
};
use tokio_stream::{Stream, StreamExt};

/// Event stream stub on `GET /mcp`.
///
/// Emits a single `ping` event and then stays open without sending anything
/// else. Responses are always returned on the POST that carried the request.
pub async fn mcp_sse() -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    tracing::info!("client opened MCP event stream");
    Sse::new(ping_then_idle()).keep_alive(KeepAlive::default())
}

fn ping_then_idle() -> impl Stream<Item = Result<Event, Infallible>> {
    tokio_stream::once(Ok(Event::default().event("ping").data("{}")))
        .chain(tokio_stream::pending::<Result<Event, Infallible>>())
}
