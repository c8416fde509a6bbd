use actix_web::{web, HttpResponse, Responder};
use serde::Serialize;
use serde_json::json;
use std::collections::HashMap;

use crate::models::{Course, CourseArea, CourseFormat, StatusMap};
use crate::report::{prerequisite_rows, NO_PREREQUISITES_TEXT};
use crate::server::AppState;

#[derive(Debug, Serialize, Clone)]
struct CourseDto<'a> {
    id: &'a str,
    name: &'a str,
    abbr: &'a str,
    format: CourseFormat,
    area: CourseArea,
    area_label: &'static str,
    year: Option<u8>,
    prerequisites_count: usize,
}

fn course_to_dto(c: &Course) -> CourseDto<'_> {
    CourseDto {
        id: &c.id,
        name: &c.name,
        abbr: &c.abbr,
        format: c.format,
        area: c.area,
        area_label: c.area.label(),
        year: c.year,
        prerequisites_count: c.prerequisites.len(),
    }
}

/// GET /courses?year=3
/// Lista las materias del plan (opcionalmente de un año), ordenadas por año y
/// luego por el orden del plan.
pub async fn courses_list_handler(
    state: web::Data<AppState>,
    query: web::Query<HashMap<String, String>>,
) -> impl Responder {
    let year = match query.get("year").map(|s| s.trim()).filter(|s| !s.is_empty()) {
        Some(raw) => match raw.parse::<u8>() {
            Ok(y) => Some(y),
            Err(_) => {
                return HttpResponse::BadRequest().json(json!({"error": format!("invalid year '{}'", raw)}));
            }
        },
        None => None,
    };

    let catalog = &state.catalog;
    let mut courses: Vec<&Course> = match year {
        Some(y) => catalog.courses_in_year(y).collect(),
        None => catalog.courses().iter().collect(),
    };
    // sort_by_key es estable: dentro del mismo año se conserva el orden del plan
    courses.sort_by_key(|c| c.year.unwrap_or(u8::MAX));

    let dtos: Vec<CourseDto<'_>> = courses.into_iter().map(course_to_dto).collect();
    HttpResponse::Ok().json(json!({
        "plan": catalog.plan(),
        "year": year,
        "selectable_years": catalog.selectable_years(),
        "courses": dtos
    }))
}

/// GET /courses/{id}
/// Devuelve la materia y sus correlativas con el estado inicial de la
/// calculadora (todas como no regularizadas).
pub async fn course_detail_handler(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let query = path.into_inner();
    let catalog = &state.catalog;

    let course = match catalog.resolve(&query) {
        Some(c) => c,
        None => return HttpResponse::NotFound().json(json!({"error": format!("unknown course '{}'", query)})),
    };

    let rows = prerequisite_rows(course, catalog, &StatusMap::new());
    let message = if rows.is_empty() { Some(NO_PREREQUISITES_TEXT) } else { None };

    HttpResponse::Ok().json(json!({
        "course": course_to_dto(course),
        "prerequisites": rows,
        "message": message
    }))
}
