use actix_web::{web, HttpResponse, Responder};
use serde_json::json;
use tracing::{info, warn};

use crate::api_json::{evaluate_request, EvaluationRequest};
use crate::error::ApiError;
use crate::server::AppState;

/// POST /evaluate
/// Acepta un `EvaluationRequest` y devuelve la evaluación, la tarjeta de
/// resultado y el detalle por correlativa.
pub async fn evaluate_handler(state: web::Data<AppState>, body: web::Json<serde_json::Value>) -> impl Responder {
    let request: EvaluationRequest = match serde_json::from_value(body.into_inner()) {
        Ok(r) => r,
        Err(e) => {
            let err = ApiError::InvalidBody(e);
            warn!(error = %err, "evaluate request rejected");
            return HttpResponse::BadRequest().json(json!({"error": err.to_string()}));
        }
    };

    match evaluate_request(&state.catalog, &state.cache, &request) {
        Ok(response) => {
            info!(
                course = %response.course.id,
                verdict = ?response.evaluation.verdict,
                "evaluación realizada"
            );
            HttpResponse::Ok().json(response)
        }
        Err(e @ ApiError::UnknownCourse(_)) => HttpResponse::NotFound().json(json!({"error": e.to_string()})),
        Err(e) => HttpResponse::BadRequest().json(json!({"error": e.to_string()})),
    }
}
