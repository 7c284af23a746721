//! Health check endpoints for Kubernetes probes.
//!
//! Provides liveness and readiness probes for container orchestration:
//! - `/health/live` - Liveness probe (restart if fails)
//! - `/health/ready` - Readiness probe (remove from LB if fails)
//! - `/health` - Combined check for backward compatibility

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::AppState;

/// Health status response.
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    /// Overall status: "healthy" or "unhealthy"
    pub status: &'static str,
    /// Server version
    pub version: &'static str,
    /// Individual component checks
    pub checks: HealthChecks,
}

/// Individual health checks.
#[derive(Debug, Serialize)]
pub struct HealthChecks {
    /// Page store accessible
    pub page_store: bool,
    /// Component registry populated
    pub registry: bool,
    /// Number of pages held
    pub pages: usize,
}

/// Liveness probe - is the server running?
///
/// Returns 200 OK if the process is alive.
#[tracing::instrument(name = "liveness_probe")]
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// Readiness probe - is the server ready to accept traffic?
#[tracing::instrument(name = "readiness_probe", skip(state))]
pub async fn readiness(State(state): State<AppState>) -> (StatusCode, Json<HealthStatus>) {
    // Listing takes the read lock, so this also proves the store is usable.
    let pages = state.store.list().len();
    let registry_ok = !page_core::registry().is_empty();

    let status = HealthStatus {
        status: if registry_ok { "healthy" } else { "unhealthy" },
        version: env!("CARGO_PKG_VERSION"),
        checks: HealthChecks {
            page_store: true,
            registry: registry_ok,
            pages,
        },
    };

    let code = if registry_ok {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (code, Json(status))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_status_serialization() {
        let status = HealthStatus {
            status: "healthy",
            version: "0.1.0",
            checks: HealthChecks {
                page_store: true,
                registry: true,
                pages: 2,
            },
        };

        let json = serde_json::to_string(&status).expect("should serialize");
        assert!(json.contains("healthy"));
        assert!(json.contains("page_store"));
        assert!(json.contains("\"pages\":2"));
    }

    #[tokio::test]
    async fn test_readiness_reports_page_count() {
        let state = AppState::new(page_core::PageStore::new(), crate::ServerConfig::default());
        state
            .store
            .upsert(page_core::PageDocument::new("home", "Home"))
            .expect("upsert");
        let (code, Json(status)) = readiness(State(state)).await;
        assert_eq!(code, StatusCode::OK);
        assert_eq!(status.checks.pages, 1);
    }
}
