//! Membership Module Tests
//!
//! Validates the cluster view layer and the update ingress.
//!
//! ## Test Scopes
//! - **Data Structures**: wire-format serialization of the `Node` record.
//! - **Store Logic**: wholesale snapshot replacement and leader derivation.
//! - **Ingress Logic**: the scheduler ends Armed iff the snapshot has a leader,
//!   and every update resets the schedule.
//! - **HTTP Boundary**: the update endpoint always answers 200, even for
//!   malformed input.

#[cfg(test)]
mod tests {
    use axum::{Extension, Router, http::StatusCode, routing::get, routing::post};
    use std::sync::Arc;

    use crate::health::prober::LeaderProber;
    use crate::health::scheduler::HealthScheduler;
    use crate::logbus::service::LogBus;
    use crate::membership::handlers::{handle_health, handle_update_server_list};
    use crate::membership::service::MembershipService;
    use crate::membership::store::MembershipStore;
    use crate::membership::types::Node;

    fn node(id: &str, is_leader: bool) -> Node {
        Node {
            id: id.to_string(),
            name: format!("server-{}", id),
            ip: "127.0.0.1".to_string(),
            port: 4000,
            is_leader,
        }
    }

    fn service() -> Arc<MembershipService> {
        let logs = LogBus::new();
        let prober = Arc::new(LeaderProber::new(logs.clone()));
        MembershipService::new(HealthScheduler::new(prober), logs)
    }

    // ============================================================
    // NODE WIRE FORMAT TESTS
    // ============================================================

    #[test]
    fn test_node_serializes_camel_case() {
        let json = serde_json::to_value(node("1", true)).expect("Serialization failed");

        assert_eq!(json["isLeader"], serde_json::json!(true));
        assert_eq!(json["id"], serde_json::json!("1"));
    }

    #[test]
    fn test_node_leader_flag_defaults_to_false() {
        let json = r#"{"id":"7","name":"server-7","ip":"10.0.0.7","port":4000}"#;
        let node: Node = serde_json::from_str(json).expect("Deserialization failed");

        assert!(!node.is_leader);
    }

    #[test]
    fn test_node_health_url() {
        let node = node("1", false);

        assert_eq!(node.health_url(), "http://127.0.0.1:4000/health");
    }

    // ============================================================
    // MEMBERSHIP STORE TESTS
    // ============================================================

    #[tokio::test]
    async fn test_replace_returns_leader() {
        let store = MembershipStore::new();

        let leader = store
            .replace(vec![node("1", false), node("2", true)])
            .await;

        assert_eq!(leader.expect("leader expected").id, "2");
    }

    #[tokio::test]
    async fn test_replace_without_leader_returns_none() {
        let store = MembershipStore::new();

        assert!(store.replace(vec![node("1", false)]).await.is_none());
        assert!(store.replace(Vec::new()).await.is_none());
    }

    #[tokio::test]
    async fn test_replace_first_claimant_wins() {
        let store = MembershipStore::new();

        let leader = store
            .replace(vec![node("1", true), node("2", true)])
            .await;

        assert_eq!(leader.expect("leader expected").id, "1");
    }

    #[tokio::test]
    async fn test_replace_swaps_snapshot_wholesale() {
        let store = MembershipStore::new();

        store.replace(vec![node("1", false), node("2", true)]).await;
        store.replace(vec![node("3", false)]).await;

        let snapshot = store.snapshot().await;
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].id, "3");
    }

    // ============================================================
    // UPDATE INGRESS TESTS
    // ============================================================

    #[tokio::test]
    async fn test_update_with_leader_arms_scheduler() {
        let membership = service();

        membership
            .apply_update(vec![node("1", false), node("2", true)])
            .await;

        assert!(membership.is_armed().await);
        assert_eq!(
            membership.current_leader().await.expect("leader").id,
            "2"
        );
    }

    #[tokio::test]
    async fn test_update_without_leader_leaves_idle() {
        let membership = service();

        membership.apply_update(vec![node("1", false)]).await;

        assert!(!membership.is_armed().await);
        assert!(membership.current_leader().await.is_none());
    }

    #[tokio::test]
    async fn test_empty_update_cancels_armed_schedule() {
        let membership = service();

        membership.apply_update(vec![node("2", true)]).await;
        assert!(membership.is_armed().await);

        membership.apply_update(Vec::new()).await;
        assert!(!membership.is_armed().await);
        assert!(membership.snapshot().await.is_empty());
    }

    #[tokio::test]
    async fn test_identical_update_rearms_instead_of_noop() {
        let membership = service();
        let snapshot = vec![node("1", false), node("2", true)];

        membership.apply_update(snapshot.clone()).await;
        let first_generation = membership.schedule_generation().await;

        membership.apply_update(snapshot).await;
        let second_generation = membership.schedule_generation().await;

        // Same leader, but a fresh schedule instance
        assert_eq!(second_generation, first_generation + 1);
        assert_eq!(
            membership.current_leader().await.expect("leader").id,
            "2"
        );
    }

    #[tokio::test]
    async fn test_each_armed_update_produces_exactly_one_schedule() {
        let membership = service();

        for round in 0..5 {
            membership
                .apply_update(vec![node("1", false), node("2", true)])
                .await;
            assert!(membership.is_armed().await);
            assert_eq!(membership.schedule_generation().await, round + 1);
        }
    }

    // ============================================================
    // HTTP BOUNDARY TESTS
    // ============================================================

    #[tokio::test]
    async fn test_update_handler_accepts_valid_body() {
        let membership = service();
        let body = serde_json::to_string(&vec![node("1", false), node("2", true)]).unwrap();

        let (status, message) = handle_update_server_list(
            Extension(membership.clone()),
            Extension(LogBus::new()),
            body,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(message, "Server list updated successfully");
        assert!(membership.is_armed().await);
    }

    #[tokio::test]
    async fn test_update_handler_degrades_malformed_body_to_empty() {
        let membership = service();
        membership.apply_update(vec![node("2", true)]).await;

        let (status, _) = handle_update_server_list(
            Extension(membership.clone()),
            Extension(LogBus::new()),
            "not json at all".to_string(),
        )
        .await;

        // Still 200 from the caller's perspective, but the schedule is gone
        assert_eq!(status, StatusCode::OK);
        assert!(!membership.is_armed().await);
        assert!(membership.snapshot().await.is_empty());
    }

    #[tokio::test]
    async fn test_endpoints_over_real_socket() {
        let membership = service();
        let app = Router::new()
            .route("/health", get(handle_health))
            .route("/updateServerList", post(handle_update_server_list))
            .layer(Extension(membership.clone()))
            .layer(Extension(LogBus::new()));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let client = reqwest::Client::new();

        let health = client
            .get(format!("http://{}/health", addr))
            .send()
            .await
            .expect("health request failed");
        assert_eq!(health.status(), reqwest::StatusCode::OK);
        assert_eq!(health.text().await.unwrap(), "Server is healthy");

        let update = client
            .post(format!("http://{}/updateServerList", addr))
            .json(&vec![node("2", true)])
            .send()
            .await
            .expect("update request failed");
        assert_eq!(update.status(), reqwest::StatusCode::OK);
        assert_eq!(update.text().await.unwrap(), "Server list updated successfully");

        assert!(membership.is_armed().await);
    }
}
