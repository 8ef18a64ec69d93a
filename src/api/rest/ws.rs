use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::IntoResponse;
use futures::SinkExt;
use futures::StreamExt;
use tokio_stream::wrappers::BroadcastStream;
use tracing::{info, warn};

use crate::engine::ticker::{evaluate, Trigger};
use crate::models::progress::TravelProgress;
use crate::state::AppState;

pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

fn encode(progress: &TravelProgress) -> Option<Message> {
    match serde_json::to_string(progress) {
        Ok(json) => Some(Message::Text(json.into())),
        Err(err) => {
            warn!(error = %err, "failed to serialize progress for ws");
            None
        }
    }
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (mut sender, mut receiver) = socket.split();
    let mut updates = BroadcastStream::new(state.progress_events_tx.subscribe());

    info!("websocket client connected");

    let initial = evaluate(&state, state.now(), Trigger::Request);

    let mut send_task = tokio::spawn(async move {
        if let Some(message) = encode(&initial) {
            if sender.send(message).await.is_err() {
                return;
            }
        }

        while let Some(update) = updates.next().await {
            let progress = match update {
                Ok(progress) => progress,
                Err(err) => {
                    warn!(error = %err, "websocket client lagging behind progress updates");
                    continue;
                }
            };

            let Some(message) = encode(&progress) else {
                continue;
            };
            if sender.send(message).await.is_err() {
                break;
            }
        }
    });

    let mut recv_task = tokio::spawn(async move {
        while let Some(Ok(_msg)) = receiver.next().await {}
    });

    tokio::select! {
        _ = &mut send_task => recv_task.abort(),
        _ = &mut recv_task => send_task.abort(),
    }

    info!("websocket client disconnected");
}
