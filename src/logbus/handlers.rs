use axum::{
    Extension,
    extract::Request,
    extract::ws::{Message, WebSocket, WebSocketUpgrade},
    middleware::Next,
    response::{IntoResponse, Response},
};
use futures::{sink::SinkExt, stream::StreamExt};
use tokio::sync::broadcast::error::RecvError;

use super::service::{LogBus, timestamp};

/// `GET /logs`
///
/// Upgrades to a WebSocket and streams broadcast log lines to the observer.
pub async fn handle_log_stream(
    Extension(logs): Extension<LogBus>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| stream_logs(socket, logs))
}

async fn stream_logs(socket: WebSocket, logs: LogBus) {
    tracing::info!("Log observer connected");

    let (mut outbound, mut inbound) = socket.split();
    let mut rx = logs.subscribe();

    loop {
        tokio::select! {
            line = rx.recv() => match line {
                Ok(line) => {
                    if outbound.send(Message::Text(line)).await.is_err() {
                        break;
                    }
                }
                // Observer fell behind the buffer; resume with current lines.
                Err(RecvError::Lagged(_)) => continue,
                Err(RecvError::Closed) => break,
            },
            frame = inbound.next() => match frame {
                // Observers only listen; inbound frames are ignored.
                Some(Ok(_)) => continue,
                _ => break,
            },
        }
    }

    tracing::info!("Log observer disconnected");
}

/// Request-logging middleware.
///
/// Logs every request with a timestamp and mirrors the line to connected
/// observers; error responses are logged at error level.
pub async fn log_requests(
    Extension(logs): Extension<LogBus>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let response = next.run(request).await;

    let status = response.status();
    if status.is_client_error() || status.is_server_error() {
        tracing::error!("{} - Error: {} - {} {}", timestamp(), status, method, uri);
        logs.publish(format!(
            "{} - Error: {} - {} {}",
            timestamp(),
            status,
            method,
            uri
        ));
    } else {
        tracing::info!("{} - {} {}", timestamp(), method, uri);
        logs.publish(format!("{} - {} {}", timestamp(), method, uri));
    }

    response
}
