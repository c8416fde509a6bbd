//! Evaluación de correlativas de una materia.
//!
//! Las reglas se aplican en orden estricto de prioridad y gana la primera que
//! coincide: BLOQUEADA, CONDICIONAL, SIN RESTRICCIONES y, por descarte,
//! CON RESTRICCIONES. No hay I/O ni estado compartido.

use crate::models::{
    Course, Evaluation, PendingPrerequisite, Prerequisite, PrerequisiteKind, PrerequisiteStatus, StatusMap,
    Verdict,
};

pub const UNIFIED_ACTIVITIES_TEXT: &str =
    "Puedes cursar y realizar actividades y trabajos prácticos solo si el/la docente lo permite.";

/// Estado efectivo de una correlativa. Si el mapa no la trae se toma como no regularizada.
pub fn status_of(statuses: &StatusMap, id: &str) -> PrerequisiteStatus {
    statuses.get(id).copied().unwrap_or(PrerequisiteStatus::NotRegularized)
}

fn lines(texts: &[&str]) -> Vec<String> {
    texts.iter().map(|t| t.to_string()).collect()
}

/// Evalúa si se puede cursar `course` con los estados declarados en `statuses`.
///
/// Entradas del mapa que no corresponden a correlativas declaradas se ignoran.
pub fn evaluate(course: &Course, statuses: &StatusMap) -> Evaluation {
    let (mandatory, regularizable): (Vec<&Prerequisite>, Vec<&Prerequisite>) = course
        .prerequisites
        .iter()
        .partition(|p| p.kind == PrerequisiteKind::Mandatory);

    let any_blocking = course
        .prerequisites
        .iter()
        .any(|p| status_of(statuses, &p.id) == PrerequisiteStatus::NotRegularized);
    let all_mandatory_approved = mandatory
        .iter()
        .all(|p| status_of(statuses, &p.id) == PrerequisiteStatus::Approved);
    let all_regularizable_at_least_regularized = regularizable
        .iter()
        .all(|p| status_of(statuses, &p.id).satisfies(PrerequisiteStatus::Regularized));
    let all_regularizable_approved = regularizable
        .iter()
        .all(|p| status_of(statuses, &p.id) == PrerequisiteStatus::Approved);

    let pending: Vec<PendingPrerequisite> = course
        .prerequisites
        .iter()
        .filter_map(|p| {
            let status = status_of(statuses, &p.id);
            (status != PrerequisiteStatus::Approved).then(|| PendingPrerequisite {
                id: p.id.clone(),
                kind: p.kind,
                status,
            })
        })
        .collect();

    // Regla 1: cualquier correlativa sin regularizar frena todo
    if any_blocking {
        return Evaluation {
            can_enroll: false,
            verdict: Verdict::Blocked,
            activities_allowed: false,
            exams_allowed: false,
            promotion_allowed: false,
            notes: lines(&[
                "Con correlativas no regularizadas no puedes asistir ni realizar actividades.",
                "Debes, como mínimo, regularizar o aprobar las correlativas pendientes para habilitar la cursada.",
            ]),
            suggested_strategy: Some("Regulariza/aprueba las correlativas faltantes antes de inscribirte.".to_string()),
            reason_if_blocked: Some("Existen correlativas sin regularizar. No puedes cursar.".to_string()),
            missing_mandatory: !all_mandatory_approved,
            regularizable_not_regularized: !all_regularizable_at_least_regularized,
            pending,
        };
    }

    // Regla 2: las (A) no son negociables, sin aprobar solo queda la autorización docente
    if !all_mandatory_approved {
        return Evaluation {
            can_enroll: false,
            verdict: Verdict::ConditionalPendingAuthorization,
            activities_allowed: false,
            exams_allowed: false,
            promotion_allowed: false,
            notes: lines(&[
                UNIFIED_ACTIVITIES_TEXT,
                "Parciales y promoción no habilitados hasta aprobar previamente las correlativas pendientes en mesa extraordinaria (u otra habilitada).",
            ]),
            suggested_strategy: Some("Gestiona la autorización y prioriza aprobar las (A) en la próxima mesa.".to_string()),
            reason_if_blocked: Some("Faltan correlativas obligatorias (A) aprobadas.".to_string()),
            missing_mandatory: true,
            regularizable_not_regularized: false,
            pending,
        };
    }

    // Regla 3: todo aprobado
    if all_regularizable_approved {
        return Evaluation {
            can_enroll: true,
            verdict: Verdict::Unrestricted,
            activities_allowed: true,
            exams_allowed: true,
            promotion_allowed: true,
            notes: lines(&[
                "Puedes hacer actividades, rendir parciales y promocionar directamente.",
                "Si cumples asistencia y notas mínimas, no necesitas rendir final.",
            ]),
            suggested_strategy: Some("Mantén calificaciones y asistencia para promocionar.".to_string()),
            reason_if_blocked: None,
            missing_mandatory: false,
            regularizable_not_regularized: false,
            pending,
        };
    }

    // Regla 4: (A) aprobadas y (R) al menos regularizadas
    Evaluation {
        can_enroll: true,
        verdict: Verdict::Restricted,
        activities_allowed: true,
        exams_allowed: false,
        promotion_allowed: false,
        notes: lines(&[
            UNIFIED_ACTIVITIES_TEXT,
            "Parciales y promoción bloqueados: podrás acceder a parciales solo si apruebas previamente en mesa extraordinaria (u otra habilitada) las correlativas pendientes.",
            "Una vez aprobadas, podrás consolidar la regularidad y luego rendir examen final.",
        ]),
        suggested_strategy: Some("Aprobar las correlativas (R) cuanto antes para habilitar evaluación y cierre.".to_string()),
        reason_if_blocked: None,
        missing_mandatory: false,
        regularizable_not_regularized: false,
        pending,
    }
}
