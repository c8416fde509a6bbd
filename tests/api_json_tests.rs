use puedocursar::algorithm::EvaluationCache;
use puedocursar::api_json::*;
use puedocursar::catalog::Catalog;
use puedocursar::error::ApiError;
use puedocursar::models::{PrerequisiteStatus, Verdict};

#[test]
fn test_parse_json_completo() {
    let json_data = r#"
    {
        "course": "feudalismo-modernidad",
        "statuses": {
            "antiguedad": "aprobada",
            "ideas1": "aprobada",
            "pueblos": "regularizada",
            "problematica": "no-regularizada"
        }
    }
    "#;

    let request = parse_json_input(json_data).expect("Debe parsear el JSON completo");
    assert_eq!(request.course, "feudalismo-modernidad");
    assert_eq!(request.statuses.len(), 4);
    assert_eq!(request.statuses.get("problematica"), Some(&PrerequisiteStatus::NotRegularized));
}

#[test]
fn test_evaluate_request_bloqueada_por_faltante() {
    let catalog = Catalog::builtin().unwrap();
    let cache = EvaluationCache::new(8);
    let request = parse_json_input(
        r#"{"materia": "FM", "estados": {"antiguedad": "aprobada", "ideas1": "aprobada", "problematica": "regularizada"}}"#,
    )
    .unwrap();

    let response = evaluate_request(&catalog, &cache, &request).unwrap();
    assert_eq!(response.course.id, "feudalismo-modernidad");
    assert_eq!(response.evaluation.verdict, Verdict::Blocked);
    assert_eq!(response.report.headline, "No puede cursar");

    let pueblos = response.prerequisites.iter().find(|r| r.id == "pueblos").unwrap();
    assert_eq!(pueblos.status, PrerequisiteStatus::NotRegularized);
}

#[test]
fn test_evaluate_request_usa_cache() {
    let catalog = Catalog::builtin().unwrap();
    let cache = EvaluationCache::new(8);
    let request = parse_json_input(r#"{"course": "filosofia", "statuses": {"pedagogia": "regularizada"}}"#).unwrap();

    let first = evaluate_request(&catalog, &cache, &request).unwrap();
    let second = evaluate_request(&catalog, &cache, &request).unwrap();
    assert!(std::sync::Arc::ptr_eq(&first.evaluation, &second.evaluation));
    assert_eq!(cache.len(), 1);
}

#[test]
fn test_evaluate_request_materia_desconocida() {
    let catalog = Catalog::builtin().unwrap();
    let cache = EvaluationCache::new(8);
    let request = parse_json_input(r#"{"course": "Alquimia Medieval Aplicada"}"#).unwrap();
    let err = evaluate_request(&catalog, &cache, &request).unwrap_err();
    assert!(matches!(err, ApiError::UnknownCourse(_)));
    assert!(cache.is_empty());
}

#[test]
fn test_response_serializa_con_nombres_esperados() {
    let catalog = Catalog::builtin().unwrap();
    let cache = EvaluationCache::new(8);
    let request = parse_json_input(r#"{"course": "pedagogia"}"#).unwrap();
    let response = evaluate_request(&catalog, &cache, &request).unwrap();

    let value = serde_json::to_value(&response).unwrap();
    assert_eq!(value["evaluation"]["verdict"], "unrestricted");
    assert_eq!(value["evaluation"]["can_enroll"], true);
    assert!(value["evaluation"].get("reason_if_blocked").is_none());
    assert_eq!(value["prerequisites"].as_array().map(|a| a.len()), Some(0));
    assert_eq!(value["course"]["id"], "pedagogia");
}
