use puedocursar::algorithm::{evaluate, EvaluationCache, UNIFIED_ACTIVITIES_TEXT};
use puedocursar::catalog::Catalog;
use puedocursar::models::PrerequisiteKind::{Mandatory, Regularizable};
use puedocursar::models::PrerequisiteStatus::{self, Approved, NotRegularized, Regularized};
use puedocursar::models::{Course, StatusMap, Verdict};

fn statuses(pairs: &[(&str, PrerequisiteStatus)]) -> StatusMap {
    pairs.iter().map(|(id, s)| (id.to_string(), *s)).collect()
}

fn feudalismo() -> Course {
    Catalog::builtin()
        .unwrap()
        .course("feudalismo-modernidad")
        .cloned()
        .expect("feudalismo-modernidad en el plan")
}

/// Todas las combinaciones de estados para `n` correlativas.
fn all_combinations(n: usize) -> Vec<Vec<PrerequisiteStatus>> {
    let mut out = vec![Vec::new()];
    for _ in 0..n {
        out = out
            .into_iter()
            .flat_map(|prefix| {
                PrerequisiteStatus::ALL.into_iter().map(move |s| {
                    let mut v = prefix.clone();
                    v.push(s);
                    v
                })
            })
            .collect();
    }
    out
}

fn raise(s: PrerequisiteStatus) -> Option<PrerequisiteStatus> {
    match s {
        NotRegularized => Some(Regularized),
        Regularized => Some(Approved),
        Approved => None,
    }
}

fn mixed_course() -> Course {
    Course::new("mixta", "Materia de prueba")
        .with_prerequisite("a1", Mandatory)
        .with_prerequisite("a2", Mandatory)
        .with_prerequisite("r1", Regularizable)
        .with_prerequisite("r2", Regularizable)
}

fn map_for(course: &Course, combo: &[PrerequisiteStatus]) -> StatusMap {
    course
        .prerequisites
        .iter()
        .zip(combo.iter())
        .map(|(p, s)| (p.id.clone(), *s))
        .collect()
}

#[test]
fn test_escenario_a_restringida() {
    let eval = evaluate(
        &feudalismo(),
        &statuses(&[
            ("antiguedad", Approved),
            ("ideas1", Approved),
            ("pueblos", Regularized),
            ("problematica", Regularized),
        ]),
    );
    assert_eq!(eval.verdict, Verdict::Restricted);
    assert!(eval.can_enroll);
    assert!(eval.activities_allowed);
    assert!(!eval.exams_allowed);
    assert!(!eval.promotion_allowed);
    assert_eq!(eval.notes.len(), 3);
    assert_eq!(eval.notes[0], UNIFIED_ACTIVITIES_TEXT);
    assert_eq!(
        eval.suggested_strategy.as_deref(),
        Some("Aprobar las correlativas (R) cuanto antes para habilitar evaluación y cierre.")
    );
    assert!(eval.reason_if_blocked.is_none());
    assert!(!eval.missing_mandatory);
    assert!(!eval.regularizable_not_regularized);
}

#[test]
fn test_escenario_b_condicional() {
    let eval = evaluate(
        &feudalismo(),
        &statuses(&[
            ("antiguedad", Regularized),
            ("ideas1", Approved),
            ("pueblos", Regularized),
            ("problematica", Regularized),
        ]),
    );
    assert_eq!(eval.verdict, Verdict::ConditionalPendingAuthorization);
    assert!(!eval.can_enroll);
    assert!(!eval.activities_allowed);
    assert!(!eval.exams_allowed);
    assert!(!eval.promotion_allowed);
    assert!(eval.missing_mandatory);
    assert!(!eval.regularizable_not_regularized);
    assert_eq!(eval.notes[0], UNIFIED_ACTIVITIES_TEXT);
    assert_eq!(
        eval.reason_if_blocked.as_deref(),
        Some("Faltan correlativas obligatorias (A) aprobadas.")
    );
}

#[test]
fn test_escenario_c_bloqueada() {
    let eval = evaluate(
        &feudalismo(),
        &statuses(&[
            ("antiguedad", Approved),
            ("ideas1", Approved),
            ("pueblos", NotRegularized),
            ("problematica", Regularized),
        ]),
    );
    assert_eq!(eval.verdict, Verdict::Blocked);
    assert!(!eval.can_enroll);
    assert!(!eval.activities_allowed);
    assert!(eval.regularizable_not_regularized);
    assert!(!eval.missing_mandatory);
    assert_eq!(
        eval.reason_if_blocked.as_deref(),
        Some("Existen correlativas sin regularizar. No puedes cursar.")
    );
    assert_eq!(
        eval.suggested_strategy.as_deref(),
        Some("Regulariza/aprueba las correlativas faltantes antes de inscribirte.")
    );
}

#[test]
fn test_escenario_d_sin_restricciones() {
    let eval = evaluate(
        &feudalismo(),
        &statuses(&[
            ("antiguedad", Approved),
            ("ideas1", Approved),
            ("pueblos", Approved),
            ("problematica", Approved),
        ]),
    );
    assert_eq!(eval.verdict, Verdict::Unrestricted);
    assert!(eval.can_enroll && eval.activities_allowed && eval.exams_allowed && eval.promotion_allowed);
    assert!(eval.reason_if_blocked.is_none());
    assert!(eval.pending.is_empty());
    assert_eq!(
        eval.suggested_strategy.as_deref(),
        Some("Mantén calificaciones y asistencia para promocionar.")
    );
}

#[test]
fn test_estado_faltante_equivale_a_no_regularizada() {
    let course = feudalismo();
    let partial = statuses(&[("antiguedad", Approved), ("ideas1", Approved), ("problematica", Regularized)]);
    let explicit = statuses(&[
        ("antiguedad", Approved),
        ("ideas1", Approved),
        ("pueblos", NotRegularized),
        ("problematica", Regularized),
    ]);
    assert_eq!(evaluate(&course, &partial), evaluate(&course, &explicit));
    assert_eq!(evaluate(&course, &partial).verdict, Verdict::Blocked);
}

#[test]
fn test_sin_correlativas_siempre_sin_restricciones() {
    let catalog = Catalog::builtin().unwrap();
    let noise = statuses(&[("pedagogia", NotRegularized), ("filosofia", Regularized)]);
    for course in catalog.courses().iter().filter(|c| !c.has_prerequisites()) {
        let eval = evaluate(course, &noise);
        assert_eq!(eval.verdict, Verdict::Unrestricted, "{}", course.id);
        assert!(eval.promotion_allowed);
    }
}

#[test]
fn test_no_regularizada_domina_sobre_todo() {
    let course = mixed_course();
    for combo in all_combinations(course.prerequisites.len()) {
        let eval = evaluate(&course, &map_for(&course, &combo));
        let any_nr = combo.contains(&NotRegularized);
        assert_eq!(eval.verdict == Verdict::Blocked, any_nr, "{:?}", combo);
    }
}

#[test]
fn test_monotonia_subir_un_estado_nunca_empeora() {
    let course = mixed_course();
    for combo in all_combinations(course.prerequisites.len()) {
        let base = evaluate(&course, &map_for(&course, &combo)).verdict.tier();
        for i in 0..combo.len() {
            if let Some(up) = raise(combo[i]) {
                let mut raised = combo.clone();
                raised[i] = up;
                let tier = evaluate(&course, &map_for(&course, &raised)).verdict.tier();
                assert!(tier >= base, "{:?} -> {:?}", combo, raised);
            }
        }
    }
}

#[test]
fn test_escalera_de_capacidades() {
    let course = mixed_course();
    for combo in all_combinations(course.prerequisites.len()) {
        let eval = evaluate(&course, &map_for(&course, &combo));
        // promoción => parciales => actividades => inscripción
        if eval.promotion_allowed {
            assert!(eval.exams_allowed);
        }
        if eval.exams_allowed {
            assert!(eval.activities_allowed);
        }
        if eval.activities_allowed {
            assert!(eval.can_enroll);
        }
        assert_eq!(eval.can_enroll, matches!(eval.verdict, Verdict::Restricted | Verdict::Unrestricted));
        assert_eq!(eval.reason_if_blocked.is_some(), !eval.can_enroll);
        assert!(eval.suggested_strategy.is_some());
        assert!(!eval.notes.is_empty());
    }
}

#[test]
fn test_evaluacion_idempotente_y_cache_consistente() {
    let course = mixed_course();
    let cache = EvaluationCache::new(16);
    for combo in all_combinations(course.prerequisites.len()) {
        let map = map_for(&course, &combo);
        let first = evaluate(&course, &map);
        assert_eq!(first, evaluate(&course, &map));
        assert_eq!(*cache.evaluate(&course, &map), first);
        assert!(cache.len() <= 16);
    }
}

#[test]
fn test_entradas_extra_se_ignoran() {
    let course = mixed_course();
    let mut map = statuses(&[("a1", Approved), ("a2", Approved), ("r1", Regularized), ("r2", Approved)]);
    let before = evaluate(&course, &map);
    map.insert("otra".to_string(), NotRegularized);
    assert_eq!(evaluate(&course, &map), before);
    assert_eq!(before.verdict, Verdict::Restricted);
}
