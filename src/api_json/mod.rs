pub mod handlers;

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::algorithm::EvaluationCache;
use crate::catalog::Catalog;
use crate::error::ApiError;
use crate::models::{Course, Evaluation, PrerequisiteStatus, StatusMap};
use crate::report::{prerequisite_rows, result_card, PrerequisiteRow, ResultCard};

/// Parámetros de entrada para evaluar una materia
///
/// # Estructura del JSON esperado:
/// ```json
/// {
///   "course": "feudalismo-modernidad",
///   "statuses": {
///     "antiguedad": "aprobada",
///     "ideas1": "aprobada",
///     "pueblos": "regularizada",
///     "problematica": "no-regularizada"
///   }
/// }
/// ```
///
/// # Campos:
/// - `course` (alias `materia`): id, abreviatura o nombre de la materia
/// - `statuses` (alias `estados`): estado de cada correlativa. Las que falten
///   se toman como `no-regularizada`; las que sobren se ignoran.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationRequest {
    #[serde(alias = "materia")]
    pub course: String,
    #[serde(default, alias = "estados")]
    pub statuses: StatusMap,
}

pub fn parse_json_input(json_str: &str) -> Result<EvaluationRequest, serde_json::Error> {
    serde_json::from_str::<EvaluationRequest>(json_str)
}

/// Resuelve `request.course` contra el catálogo (id, abreviatura o nombre).
pub fn resolve_course<'a>(catalog: &'a Catalog, request: &EvaluationRequest) -> Result<&'a Course, ApiError> {
    if request.course.trim().is_empty() {
        return Err(ApiError::MissingCourse);
    }
    catalog
        .resolve(&request.course)
        .ok_or_else(|| ApiError::UnknownCourse(request.course.clone()))
}

/// Respuesta completa de una evaluación: la materia, el veredicto, la tarjeta
/// de resultado y el detalle por correlativa.
#[derive(Debug, Serialize)]
pub struct EvaluationResponse<'a> {
    pub course: &'a Course,
    pub evaluation: Arc<Evaluation>,
    pub report: ResultCard,
    pub prerequisites: Vec<PrerequisiteRow>,
}

/// Los agregados ("todas las UC de ...") no tienen estado intermedio.
fn check_aggregate_statuses(course: &Course, catalog: &Catalog, request: &EvaluationRequest) -> Result<(), ApiError> {
    let invalid = course.prerequisites.iter().find(|p| {
        catalog.is_aggregate(&p.id) && request.statuses.get(&p.id) == Some(&PrerequisiteStatus::Regularized)
    });
    match invalid {
        Some(p) => Err(ApiError::InvalidAggregateStatus(p.id.clone())),
        None => Ok(()),
    }
}

/// Resuelve la materia, evalúa (pasando por la caché) y arma la respuesta.
pub fn evaluate_request<'a>(
    catalog: &'a Catalog,
    cache: &EvaluationCache,
    request: &EvaluationRequest,
) -> Result<EvaluationResponse<'a>, ApiError> {
    let course = resolve_course(catalog, request)?;
    check_aggregate_statuses(course, catalog, request)?;
    let evaluation = cache.evaluate(course, &request.statuses);
    let report = result_card(&evaluation);
    let prerequisites = prerequisite_rows(course, catalog, &request.statuses);
    Ok(EvaluationResponse { course, evaluation, report, prerequisites })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Verdict;

    #[test]
    fn test_parse_json_with_spanish_aliases() {
        let json_data = r#"
        {
            "materia": "HI2",
            "estados": {
                "ideas1": "aprobada",
                "problematica": "regularizada"
            }
        }
        "#;

        let request = parse_json_input(json_data).expect("Debe parsear JSON con alias");
        assert_eq!(request.course, "HI2");
        assert_eq!(request.statuses.get("ideas1"), Some(&PrerequisiteStatus::Approved));
        assert_eq!(request.statuses.get("problematica"), Some(&PrerequisiteStatus::Regularized));
    }

    #[test]
    fn test_parse_json_sin_estados() {
        let request = parse_json_input(r#"{"course": "filosofia"}"#).expect("statuses es opcional");
        assert!(request.statuses.is_empty());
    }

    #[test]
    fn test_parse_json_estado_invalido() {
        let err = parse_json_input(r#"{"course": "filosofia", "statuses": {"pedagogia": "libre"}}"#);
        assert!(err.is_err());
    }

    #[test]
    fn test_evaluate_request_end_to_end() {
        let catalog = Catalog::builtin().unwrap();
        let cache = EvaluationCache::new(4);
        let request = parse_json_input(
            r#"{"course": "Historia de las Ideas II", "statuses": {"ideas1": "aprobada", "problematica": "regularizada"}}"#,
        )
        .unwrap();

        let response = evaluate_request(&catalog, &cache, &request).unwrap();
        assert_eq!(response.course.id, "ideas2");
        assert_eq!(response.evaluation.verdict, Verdict::Restricted);
        assert_eq!(response.report.headline, "Cursa con restricciones");
        assert_eq!(response.prerequisites.len(), 2);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_resolve_course_errors() {
        let catalog = Catalog::builtin().unwrap();
        let blank = EvaluationRequest { course: "  ".into(), statuses: StatusMap::new() };
        assert!(matches!(resolve_course(&catalog, &blank), Err(ApiError::MissingCourse)));

        let unknown = EvaluationRequest { course: "Alquimia".into(), statuses: StatusMap::new() };
        assert!(matches!(resolve_course(&catalog, &unknown), Err(ApiError::UnknownCourse(_))));
    }

    #[test]
    fn test_agregado_no_acepta_regularizada() {
        let catalog = Catalog::builtin().unwrap();
        let cache = EvaluationCache::new(4);
        let mut request = parse_json_input(
            r#"{"course": "practica-docente-3", "statuses": {"todas-uc-primer-ano": "regularizada"}}"#,
        )
        .unwrap();

        let err = evaluate_request(&catalog, &cache, &request).unwrap_err();
        assert!(matches!(err, ApiError::InvalidAggregateStatus(ref id) if id == "todas-uc-primer-ano"));
        assert!(cache.is_empty());

        request.statuses.insert("todas-uc-primer-ano".into(), PrerequisiteStatus::Approved);
        assert!(evaluate_request(&catalog, &cache, &request).is_ok());
    }
}
