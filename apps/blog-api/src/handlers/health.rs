//! Health check endpoint.

use actix_web::{HttpResponse, web};
use blog_shared::ErrorResponse;
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub timestamp: String,
    pub store: &'static str,
}

/// Health check endpoint - returns server status.
///
/// GET /health
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    if let Err(e) = state.check_store().await {
        tracing::error!(error = %e, "Record store health check failed");
        return HttpResponse::ServiceUnavailable()
            .json(ErrorResponse::service_unavailable("Record store unreachable"));
    }

    let response = HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: chrono::Utc::now().to_rfc3339(),
        store: state.backend.as_str(),
    };

    HttpResponse::Ok().json(response)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use actix_web::http::StatusCode;
    use actix_web::test;

    use crate::handlers::test_support::{init_app, send};
    use crate::state::AppState;

    #[actix_web::test]
    async fn reports_in_memory_store() {
        let app = init_app!(AppState::in_memory(Duration::from_secs(1)));

        let req = test::TestRequest::get().uri("/health").to_request();
        let (status, body) = send(&app, req).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["store"], "memory");
    }
}
