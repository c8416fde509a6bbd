use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{error, web, App, HttpResponse, HttpServer};
use chrono::{DateTime, Utc};
use serde_json::json;
use tracing::{info, warn};

use crate::algorithm::EvaluationCache;
use crate::api_json::handlers::{
    course_detail_handler, courses_list_handler, evaluate_handler, health_handler, help_handler,
    root_redirect_handler,
};
use crate::catalog::Catalog;
use crate::config::AppConfig;

/// Estado compartido entre workers: catálogo inmutable y caché de evaluaciones.
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub cache: EvaluationCache,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(catalog: Arc<Catalog>, cache_capacity: usize) -> Self {
        AppState {
            catalog,
            cache: EvaluationCache::new(cache_capacity),
            started_at: Utc::now(),
        }
    }
}

/// Cuerpos que no son JSON válido también responden `{"error": ...}`.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let message = format!("invalid JSON body: {}", err);
        warn!(error = %message, "evaluate request rejected");
        let response = HttpResponse::BadRequest().json(json!({"error": message}));
        error::InternalError::from_response(err, response).into()
    })
}

/// Registra todas las rutas. Se usa tanto en `run_server` como en los tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .route("/", web::get().to(root_redirect_handler))
        .route("/health", web::get().to(health_handler))
        .route("/courses", web::get().to(courses_list_handler))
        .route("/courses/{id}", web::get().to(course_detail_handler))
        .route("/evaluate", web::post().to(evaluate_handler))
        .route("/help", web::get().to(help_handler));
}

fn cors_for(origin: Option<&str>) -> Cors {
    match origin {
        Some(o) => Cors::default()
            .allowed_origin(o)
            .allowed_methods(vec!["GET", "POST"])
            .allow_any_header()
            .max_age(3600),
        None => Cors::permissive(),
    }
}

pub async fn run_server(config: AppConfig, catalog: Catalog) -> std::io::Result<()> {
    let state = web::Data::new(AppState::new(Arc::new(catalog), config.cache_capacity));
    let cors_origin = config.cors_origin.clone();

    info!(
        bind = %config.bind_addr,
        courses = state.catalog.courses().len(),
        cache_capacity = config.cache_capacity,
        "iniciando servidor"
    );

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(cors_for(cors_origin.as_deref()))
            .configure(configure)
    })
    .bind(config.bind_addr.as_str())?
    .run()
    .await
}
