// Estructuras de datos principales: plan de estudios, correlativas y evaluación

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Estado de cada correlativa declarado por el estudiante (id -> estado).
pub type StatusMap = HashMap<String, PrerequisiteStatus>;

/// Tipo de correlativa exigida por la materia objetivo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PrerequisiteKind {
    /// (A) debe estar Aprobada para poder cursar.
    #[serde(rename = "A")]
    Mandatory,
    /// (R) alcanza con Regularizada para cursar; parciales y promoción requieren Aprobada.
    #[serde(rename = "R")]
    Regularizable,
}

impl PrerequisiteKind {
    pub fn tag(&self) -> &'static str {
        match self {
            PrerequisiteKind::Mandatory => "A",
            PrerequisiteKind::Regularizable => "R",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PrerequisiteKind::Mandatory => "Obligatoria (debe estar Aprobada)",
            PrerequisiteKind::Regularizable => "Regularizable (al menos Regularizada)",
        }
    }
}

/// Estado de una correlativa para un estudiante.
///
/// El orden de las variantes es el orden de suficiencia:
/// `NotRegularized < Regularized < Approved`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PrerequisiteStatus {
    #[default]
    #[serde(rename = "no-regularizada", alias = "not_regularized", alias = "no_regularizada")]
    NotRegularized,
    #[serde(rename = "regularizada", alias = "regularized")]
    Regularized,
    #[serde(rename = "aprobada", alias = "approved")]
    Approved,
}

impl PrerequisiteStatus {
    pub const ALL: [PrerequisiteStatus; 3] = [
        PrerequisiteStatus::Approved,
        PrerequisiteStatus::Regularized,
        PrerequisiteStatus::NotRegularized,
    ];

    /// `true` si este estado alcanza el umbral pedido (Aprobada cubre Regularizada).
    pub fn satisfies(&self, threshold: PrerequisiteStatus) -> bool {
        *self >= threshold
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PrerequisiteStatus::Approved => "aprobada",
            PrerequisiteStatus::Regularized => "regularizada",
            PrerequisiteStatus::NotRegularized => "no-regularizada",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PrerequisiteStatus::Approved => "Aprobada",
            PrerequisiteStatus::Regularized => "Regularizada",
            PrerequisiteStatus::NotRegularized => "No regularizada",
        }
    }
}

impl fmt::Display for PrerequisiteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PrerequisiteStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "aprobada" | "approved" | "a" => Ok(PrerequisiteStatus::Approved),
            "regularizada" | "regularized" | "r" => Ok(PrerequisiteStatus::Regularized),
            "no-regularizada" | "no_regularizada" | "not_regularized" | "nr" => Ok(PrerequisiteStatus::NotRegularized),
            other => Err(format!(
                "estado desconocido '{}' (usar aprobada, regularizada o no-regularizada)",
                other
            )),
        }
    }
}

/// Referencia a otra materia (o a un agregado de años) exigida como correlativa.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prerequisite {
    pub id: String,
    pub kind: PrerequisiteKind,
}

/// Formato curricular de la unidad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CourseFormat {
    Asignatura,
    Seminario,
    #[serde(rename = "Seminario-Taller")]
    SeminarioTaller,
    Taller,
    #[serde(rename = "UDI")]
    Udi,
}

impl CourseFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            CourseFormat::Asignatura => "Asignatura",
            CourseFormat::Seminario => "Seminario",
            CourseFormat::SeminarioTaller => "Seminario-Taller",
            CourseFormat::Taller => "Taller",
            CourseFormat::Udi => "UDI",
        }
    }
}

/// Campo de formación al que pertenece la unidad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CourseArea {
    General,
    #[serde(rename = "Específica")]
    Especifica,
    #[serde(rename = "Práctica Profesional")]
    PracticaProfesional,
    Variable,
}

impl CourseArea {
    pub fn label(&self) -> &'static str {
        match self {
            CourseArea::General => "Formación General",
            CourseArea::Especifica => "Formación Específica",
            CourseArea::PracticaProfesional => "Práctica Profesional",
            CourseArea::Variable => "Variable",
        }
    }
}

/// Unidad curricular del plan. Inmutable una vez cargado el catálogo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub abbr: String,
    pub format: CourseFormat,
    pub area: CourseArea,
    #[serde(default)]
    pub year: Option<u8>,
    #[serde(default)]
    pub prerequisites: Vec<Prerequisite>,
}

impl Course {
    /// Materia sin correlativas (Asignatura de formación general).
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Course {
            id: id.into(),
            name: name.into(),
            abbr: String::new(),
            format: CourseFormat::Asignatura,
            area: CourseArea::General,
            year: None,
            prerequisites: Vec::new(),
        }
    }

    pub fn with_prerequisite(mut self, id: impl Into<String>, kind: PrerequisiteKind) -> Self {
        self.prerequisites.push(Prerequisite { id: id.into(), kind });
        self
    }

    pub fn has_prerequisites(&self) -> bool {
        !self.prerequisites.is_empty()
    }
}

/// Requisito agregado: "todas las UC de los años indicados aprobadas".
/// No se expande contra el catálogo; el estudiante lo marca como una sola correlativa.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatePrerequisite {
    pub id: String,
    pub name: String,
    pub years: Vec<u8>,
}

/// Veredicto de cursada.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Unrestricted,
    Restricted,
    ConditionalPendingAuthorization,
    Blocked,
}

impl Verdict {
    pub fn label(&self) -> &'static str {
        match self {
            Verdict::Unrestricted => "Puede cursar sin restricciones",
            Verdict::Restricted => "Cursa con restricciones",
            Verdict::ConditionalPendingAuthorization => "Cursada condicional (requiere autorización docente)",
            Verdict::Blocked => "No puede cursar",
        }
    }

    /// Escalón de capacidades: Blocked < Conditional < Restricted < Unrestricted.
    pub fn tier(&self) -> u8 {
        match self {
            Verdict::Blocked => 0,
            Verdict::ConditionalPendingAuthorization => 1,
            Verdict::Restricted => 2,
            Verdict::Unrestricted => 3,
        }
    }
}

/// Correlativa que todavía no está aprobada, con el estado efectivo usado al evaluar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingPrerequisite {
    pub id: String,
    pub kind: PrerequisiteKind,
    pub status: PrerequisiteStatus,
}

/// Resultado de evaluar una materia. Se produce de nuevo en cada llamada.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    pub can_enroll: bool,
    pub verdict: Verdict,
    pub activities_allowed: bool,
    pub exams_allowed: bool,
    pub promotion_allowed: bool,
    pub notes: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_strategy: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason_if_blocked: Option<String>,
    pub missing_mandatory: bool,
    pub regularizable_not_regularized: bool,
    pub pending: Vec<PendingPrerequisite>,
}
