use axum::{routing::get, Router};

use crate::features::health::handlers;

/// Health check route (no state)
pub fn routes() -> Router {
    Router::new().route("/health", get(handlers::health_check))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum_test::TestServer;
    use serde_json::Value;

    #[tokio::test]
    async fn test_health() {
        let server = TestServer::new(routes()).unwrap();

        let response = server.get("/health").await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["status"], "OK");
        assert_eq!(body["message"], "Video Upload Backend is running");
        assert!(body["timestamp"].is_string());
    }
}
