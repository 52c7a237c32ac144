use axum::{Extension, http::StatusCode};
use std::sync::Arc;

use super::service::MembershipService;
use super::types::Node;
use crate::logbus::service::{LogBus, timestamp};

/// `POST /updateServerList`
///
/// Always answers 200 from the caller's perspective: a body that parses to no
/// nodes, or to a list without a leader, is accepted and simply suspends
/// health checking.
pub async fn handle_update_server_list(
    Extension(membership): Extension<Arc<MembershipService>>,
    Extension(logs): Extension<LogBus>,
    body: String,
) -> (StatusCode, &'static str) {
    logs.publish(format!("{} Payload: {}", timestamp(), body));

    let nodes: Vec<Node> = match serde_json::from_str(&body) {
        Ok(nodes) => nodes,
        Err(e) => {
            tracing::warn!("Malformed server list, treating as empty: {}", e);
            Vec::new()
        }
    };

    membership.apply_update(nodes).await;

    (StatusCode::OK, "Server list updated successfully")
}

/// `GET /health`
///
/// Liveness endpoint probed by other nodes, symmetric to this node's own
/// leader probing.
pub async fn handle_health() -> (StatusCode, &'static str) {
    (StatusCode::OK, "Server is healthy")
}
