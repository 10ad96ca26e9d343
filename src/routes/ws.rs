use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Extension,
    },
    response::IntoResponse,
    routing::get,
    Router,
};
use futures_util::{SinkExt, StreamExt};
use tracing::{debug, info, warn};

use crate::{
    protocol::ClientEvent,
    relay::{Relay, Session},
    state::Outbox,
};

pub fn router() -> Router {
    Router::new().route("/ws", get(ws_handler))
}

async fn ws_handler(ws: WebSocketUpgrade, Extension(relay): Extension<Relay>) -> impl IntoResponse {
    ws.on_upgrade(move |sock| user_ws(sock, relay))
}

/* ---------------- per connection ---------------- */
async fn user_ws(sock: WebSocket, relay: Relay) {
    let (mut sink, mut stream) = sock.split();
    let (outbox, mut rx) = Outbox::channel();
    let mut session = Session::new(outbox.clone());
    let mut closing = relay.closing();
    debug!(conn = %session.conn, "socket open");

    // outbox -> socket
    let writer = tokio::spawn(async move {
        while let Some(ev) = rx.recv().await {
            let text = match serde_json::to_string(&ev) {
                Ok(t) => t,
                Err(e) => {
                    warn!(error = %e, "could not encode event");
                    continue;
                }
            };
            if sink.send(Message::Text(text)).await.is_err() {
                break;
            }
        }
        sink.close().await.ok();
    });

    while !*closing.borrow() {
        tokio::select! {
            frame = stream.next() => match frame {
                Some(Ok(Message::Text(raw))) => match serde_json::from_str::<ClientEvent>(&raw) {
                    Ok(ev) => relay.handle(&mut session, ev),
                    Err(e) => warn!(conn = %session.conn, error = %e, "ignored malformed frame"),
                },
                Some(Ok(Message::Close(_))) | None => break,
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    debug!(conn = %session.conn, error = %e, "socket error");
                    break;
                }
            },
            _ = outbox.overflowed() => {
                warn!(conn = %session.conn, "outbox full, dropping slow peer");
                break;
            }
            _ = closing.changed() => break,
        }
    }

    if let Some(b) = session.binding() {
        info!(conn = %session.conn, room = %b.room_id, name = %b.name, "socket closed");
    }
    relay.disconnect(&mut session);
    drop((session, outbox));
    writer.abort();
}
