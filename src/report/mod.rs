//! Vista de resultado derivada de una evaluación: titular, resumen,
//! capacidades con su estado e indicaciones, y una fila por correlativa con
//! las opciones de estado que se le ofrecen al estudiante.

use serde::Serialize;

use crate::algorithm::{status_of, UNIFIED_ACTIVITIES_TEXT};
use crate::catalog::Catalog;
use crate::models::{Course, Evaluation, PrerequisiteKind, PrerequisiteStatus, StatusMap, Verdict};

pub const NO_PREREQUISITES_TEXT: &str = "No presenta correlativas para cursar.";
pub const AGGREGATE_DESCRIPTION: &str =
    "Requiere que todas las unidades curriculares del año/años indicados estén aprobadas.";
const NOT_ENABLED_HINT: &str = "No habilitado.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CapabilityState {
    On,
    Warn,
    Off,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Capability {
    pub title: &'static str,
    pub state: CapabilityState,
    pub hint: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultCard {
    pub headline: &'static str,
    pub verdict: Verdict,
    pub verdict_label: &'static str,
    pub summary_title: &'static str,
    pub summary: Vec<&'static str>,
    pub capabilities: Vec<Capability>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strategy: Option<String>,
}

/// Arma la tarjeta de resultado a partir de la evaluación.
pub fn result_card(evaluation: &Evaluation) -> ResultCard {
    let verdict = evaluation.verdict;

    let headline = match verdict {
        Verdict::ConditionalPendingAuthorization => "Puede cursar si el/la docente lo permite",
        other => other.label(),
    };

    let (summary_title, summary) = match verdict {
        Verdict::Blocked => (
            "Bloqueado para cursar",
            vec![
                "Con correlativas no regularizadas no puedes asistir ni realizar actividades.",
                "Regulariza o aprueba primero las correlativas para habilitar la cursada.",
            ],
        ),
        Verdict::ConditionalPendingAuthorization => (
            "Cursada condicional",
            vec![
                UNIFIED_ACTIVITIES_TEXT,
                "Parciales y promoción no habilitados hasta aprobar previamente las correlativas en mesa habilitada.",
            ],
        ),
        Verdict::Restricted => (
            "Cursada con restricciones",
            vec![
                UNIFIED_ACTIVITIES_TEXT,
                "Parciales y promoción bloqueados hasta aprobar previamente las correlativas pendientes.",
            ],
        ),
        Verdict::Unrestricted => (
            "Cursada completa habilitada",
            vec![
                "Puedes hacer actividades y rendir parciales.",
                "Si cumples requisitos (notas, asistencia, trabajos), promocionas sin final.",
            ],
        ),
    };

    // Condicional y restringida quedan en "warn": dependen de la autorización o de aprobar en mesa
    let (course_state, activities_hint, exams_hint) = match verdict {
        Verdict::Blocked => (CapabilityState::Off, NOT_ENABLED_HINT, NOT_ENABLED_HINT),
        Verdict::ConditionalPendingAuthorization | Verdict::Restricted => (
            CapabilityState::Warn,
            UNIFIED_ACTIVITIES_TEXT,
            "Podrás acceder a parciales solo si apruebas previamente en mesa habilitada las correlativas pendientes.",
        ),
        Verdict::Unrestricted => (
            CapabilityState::On,
            "Puedes realizar actividades y asistencia.",
            "Puedes rendir parciales.",
        ),
    };

    let (promo_state, promo_hint) = if evaluation.promotion_allowed {
        (CapabilityState::On, "Promoción directa disponible.")
    } else {
        (CapabilityState::Off, "Promoción no disponible.")
    };

    ResultCard {
        headline,
        verdict,
        verdict_label: verdict.label(),
        summary_title,
        summary,
        capabilities: vec![
            Capability { title: "Actividades", state: course_state, hint: activities_hint },
            Capability { title: "Parciales", state: course_state, hint: exams_hint },
            Capability { title: "Promoción", state: promo_state, hint: promo_hint },
        ],
        strategy: evaluation.suggested_strategy.clone(),
    }
}

/// Opciones de estado que se ofrecen para una correlativa. Los agregados
/// ("todas las UC de ...") solo admiten Aprobada o No regularizada.
pub fn status_options(aggregate: bool) -> &'static [PrerequisiteStatus] {
    static FULL: [PrerequisiteStatus; 3] = PrerequisiteStatus::ALL;
    static AGGREGATE: [PrerequisiteStatus; 2] = [PrerequisiteStatus::Approved, PrerequisiteStatus::NotRegularized];
    if aggregate { &AGGREGATE[..] } else { &FULL[..] }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrerequisiteRow {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub abbr: Option<String>,
    pub kind: PrerequisiteKind,
    pub kind_label: &'static str,
    pub aggregate: bool,
    pub description: String,
    pub status: PrerequisiteStatus,
    pub status_label: &'static str,
    pub options: Vec<PrerequisiteStatus>,
}

/// Una fila por correlativa declarada, en el orden del plan, con el estado
/// efectivo (faltante = no regularizada).
pub fn prerequisite_rows(course: &Course, catalog: &Catalog, statuses: &StatusMap) -> Vec<PrerequisiteRow> {
    course
        .prerequisites
        .iter()
        .map(|p| {
            let entry = catalog.by_id(&p.id);
            let aggregate = entry.map(|e| e.is_aggregate()).unwrap_or(false);
            let name = entry.map(|e| e.name().to_string()).unwrap_or_else(|| p.id.clone());
            let abbr = entry.map(|e| e.abbr()).filter(|a| !a.is_empty()).map(str::to_string);

            let description = if aggregate {
                AGGREGATE_DESCRIPTION.to_string()
            } else {
                match p.kind {
                    PrerequisiteKind::Mandatory => "Debe estar Aprobada para habilitar la cursada.".to_string(),
                    PrerequisiteKind::Regularizable => {
                        format!("{} Parciales y promoción quedan bloqueados hasta aprobar.", UNIFIED_ACTIVITIES_TEXT)
                    }
                }
            };

            let status = status_of(statuses, &p.id);
            PrerequisiteRow {
                id: p.id.clone(),
                name,
                abbr,
                kind: p.kind,
                kind_label: p.kind.label(),
                aggregate,
                description,
                status,
                status_label: status.label(),
                options: status_options(aggregate).to_vec(),
            }
        })
        .collect()
}
