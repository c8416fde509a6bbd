use actix_web::{web, HttpResponse, Responder};
use serde_json::json;

use crate::api_json::EvaluationRequest;
use crate::models::{PrerequisiteKind, PrerequisiteStatus, StatusMap};
use crate::server::AppState;

/// GET /health
pub async fn health_handler(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "catalog": state.catalog.plan(),
        "courses": state.catalog.courses().len(),
        "cache_entries": state.cache.len(),
        "cache_capacity": state.cache.capacity(),
        "started_at": state.started_at.to_rfc3339()
    }))
}

/// GET /help
/// Ejemplo de cuerpo para POST /evaluate y valores aceptados.
pub async fn help_handler() -> impl Responder {
    let mut statuses = StatusMap::new();
    statuses.insert("antiguedad".to_string(), PrerequisiteStatus::Approved);
    statuses.insert("ideas1".to_string(), PrerequisiteStatus::Approved);
    statuses.insert("pueblos".to_string(), PrerequisiteStatus::Regularized);
    statuses.insert("problematica".to_string(), PrerequisiteStatus::Regularized);
    let example = EvaluationRequest { course: "feudalismo-modernidad".to_string(), statuses };

    let status_values: Vec<serde_json::Value> = PrerequisiteStatus::ALL
        .iter()
        .map(|s| json!({"value": s.as_str(), "label": s.label()}))
        .collect();
    let kinds: Vec<serde_json::Value> = [PrerequisiteKind::Mandatory, PrerequisiteKind::Regularizable]
        .iter()
        .map(|k| json!({"tag": k.tag(), "label": k.label()}))
        .collect();

    HttpResponse::Ok().json(json!({
        "description": "API para saber si se puede cursar una materia según el estado de sus correlativas. POST /evaluate acepta un JSON (ver 'post_example'); la materia puede indicarse por id, abreviatura o nombre.",
        "post_example": example,
        "status_values": status_values,
        "prerequisite_kinds": kinds,
        "note": "Las correlativas que no se informan se toman como 'no-regularizada'. Los requisitos 'todas las UC de ...' se marcan como una sola correlativa y solo aceptan 'aprobada' o 'no-regularizada'; 'regularizada' se rechaza con 400.",
        "routes": ["GET /health", "GET /courses?year=N", "GET /courses/{id}", "POST /evaluate", "GET /help"]
    }))
}

/// Ruta raíz: redirige a la ayuda.
pub async fn root_redirect_handler() -> impl Responder {
    HttpResponse::Found()
        .append_header((actix_web::http::header::LOCATION, "/help"))
        .finish()
}
