use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use serde::Deserialize;
use validator::Validate;
use crate::config::AudienceSettings;
use crate::core::{AudienceSession, RegionCatalog};
use crate::models::{
    AudienceMember, AudiencePreviewResponse, ErrorResponse, GeoPoint, HealthResponse, PreviewRequest,
    RegionsResponse, RosterEntry, SendNotificationRequest, SendNotificationResponse,
};
use crate::services::{CacheError, DashboardClient, NotificationDraft, SnapshotCache};
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub dashboard: Arc<DashboardClient>,
    pub cache: Arc<SnapshotCache>,
    pub audience: AudienceSettings,
}

/// Query for the nearest-region lookup
#[derive(Debug, Deserialize)]
pub struct NearestRegionQuery {
    pub latitude: f64,
    pub longitude: f64,
}

/// Configure all audience-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/regions", web::get().to(get_regions))
        .route("/regions/nearest", web::get().to(nearest_region))
        .route("/audience/preview", web::post().to(preview_audience))
        .route("/audience/refresh", web::post().to(refresh_snapshots))
        .route("/notifications/send", web::post().to(send_notification));
}

fn error_response(status: StatusCode, error: &str, message: impl Into<String>) -> HttpResponse {
    HttpResponse::build(status).json(ErrorResponse {
        error: error.to_string(),
        message: message.into(),
        status_code: status.as_u16(),
    })
}

async fn load_snapshots(
    state: &AppState,
) -> Result<(Arc<Vec<RosterEntry>>, Arc<RegionCatalog>), CacheError> {
    let (roster, regions) = tokio::join!(
        state.cache.roster(&state.dashboard),
        state.cache.regions(&state.dashboard),
    );
    Ok((roster?, regions?))
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let stats = state.cache.stats();
    tracing::debug!("Health check, cache stats: {:?}", stats);

    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Region catalog endpoint
///
/// GET /api/v1/regions
async fn get_regions(state: web::Data<AppState>) -> impl Responder {
    match state.cache.regions(&state.dashboard).await {
        Ok(catalog) => HttpResponse::Ok().json(RegionsResponse {
            names: catalog.names().into_iter().map(str::to_string).collect(),
            regions: catalog.regions().to_vec(),
        }),
        Err(e) => {
            tracing::error!("Failed to load regions: {}", e);
            error_response(StatusCode::BAD_GATEWAY, "Failed to fetch regions", e.to_string())
        }
    }
}

/// Closest region to a point
///
/// GET /api/v1/regions/nearest?latitude={lat}&longitude={lon}
async fn nearest_region(
    state: web::Data<AppState>,
    query: web::Query<NearestRegionQuery>,
) -> impl Responder {
    let catalog = match state.cache.regions(&state.dashboard).await {
        Ok(catalog) => catalog,
        Err(e) => {
            tracing::error!("Failed to load regions: {}", e);
            return error_response(StatusCode::BAD_GATEWAY, "Failed to fetch regions", e.to_string());
        }
    };

    let point = GeoPoint::new(query.latitude, query.longitude);
    match catalog.nearest(&point) {
        Some(region) => HttpResponse::Ok().json(region),
        None => error_response(StatusCode::NOT_FOUND, "No regions", "Region catalog is empty"),
    }
}

/// Audience preview endpoint
///
/// POST /api/v1/audience/preview
///
/// Request body:
/// ```json
/// {
///   "criteria": { "minAge": 21, "region": "Downtown", "isFemale": true },
///   "sampleSize": 25
/// }
/// ```
async fn preview_audience(
    state: web::Data<AppState>,
    req: web::Json<PreviewRequest>,
) -> impl Responder {
    let (roster, regions) = match load_snapshots(&state).await {
        Ok(snapshots) => snapshots,
        Err(e) => {
            tracing::error!("Failed to load audience inputs: {}", e);
            return error_response(StatusCode::BAD_GATEWAY, "Failed to load roster", e.to_string());
        }
    };

    let req = req.into_inner();
    let sample_size = req
        .sample_size
        .unwrap_or(state.audience.default_sample_size)
        .min(state.audience.max_sample_size);

    let mut session = AudienceSession::new(roster, regions);
    session.set_criteria(req.criteria);

    let sample = session
        .members()
        .take(sample_size)
        .map(|entry| AudienceMember {
            user_id: entry.id.clone(),
            name: entry.user.name.clone(),
        })
        .collect();

    tracing::info!(
        "Audience preview selected {} of {} users",
        session.count(),
        session.roster_size()
    );

    HttpResponse::Ok().json(AudiencePreviewResponse {
        count: session.count(),
        roster_size: session.roster_size(),
        sample,
    })
}

/// Drop cached roster and regions
///
/// POST /api/v1/audience/refresh
async fn refresh_snapshots(state: web::Data<AppState>) -> impl Responder {
    state.cache.invalidate_all();
    HttpResponse::Ok().json(serde_json::json!({ "success": true }))
}

/// Send a notification to the selected audience
///
/// POST /api/v1/notifications/send
///
/// Request body:
/// ```json
/// {
///   "name": "string",
///   "title": "string",
///   "content": "string",
///   "criteria": { ... },
///   "appNotificationSettings": { ... }
/// }
/// ```
async fn send_notification(
    state: web::Data<AppState>,
    req: web::Json<SendNotificationRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for send_notification request: {:?}", errors);
        return error_response(StatusCode::BAD_REQUEST, "Validation failed", errors.to_string());
    }

    let (roster, regions) = match load_snapshots(&state).await {
        Ok(snapshots) => snapshots,
        Err(e) => {
            tracing::error!("Failed to load audience inputs: {}", e);
            return error_response(StatusCode::BAD_GATEWAY, "Failed to load roster", e.to_string());
        }
    };

    let req = req.into_inner();
    let mut session = AudienceSession::new(roster, regions);
    session.set_criteria(req.criteria);

    if session.count() == 0 {
        return error_response(
            StatusCode::BAD_REQUEST,
            "Empty audience",
            "Total reached users is 0",
        );
    }

    let draft = NotificationDraft {
        name: req.name,
        title: req.title,
        content: req.content,
        users: session.commit(),
        app_notification_settings: req.app_notification_settings,
    };

    match state.dashboard.add_notification(&draft).await {
        Ok(()) => {
            tracing::info!("Sent notification {:?} to {} users", draft.name, draft.users.len());
            HttpResponse::Ok().json(SendNotificationResponse {
                success: true,
                recipients: draft.users.len(),
                dispatch_id: uuid::Uuid::new_v4().to_string(),
            })
        }
        Err(e) => {
            tracing::error!("Failed to send notification {:?}: {}", draft.name, e);
            error_response(StatusCode::BAD_GATEWAY, "Failed to send notification", e.to_string())
        }
    }
}
