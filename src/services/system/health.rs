use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use chrono::Utc;

use super::SystemService;
use crate::models::{AppStartTime, ApiResponse, system::responses::HealthResponse};

pub async fn health(service: &SystemService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let config = service.get_config();
    let now = Utc::now();

    let started_at = request
        .app_data::<web::Data<AppStartTime>>()
        .map(|data| data.start_datetime)
        .unwrap_or(now);

    let response = HealthResponse {
        status: "ok".to_string(),
        service: config.app.system_name.clone(),
        environment: config.app.environment.clone(),
        started_at,
        uptime_seconds: (now - started_at).num_seconds(),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Service is healthy")))
}
