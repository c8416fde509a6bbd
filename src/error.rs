use std::path::PathBuf;

use thiserror::Error;

/// Errores al cargar o validar el catálogo del plan de estudios.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("no se pudo leer el catálogo '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON de catálogo inválido: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("entrada de catálogo con id vacío")]
    EmptyId,

    #[error("id duplicado en el catálogo: '{0}'")]
    DuplicateId(String),

    #[error("abreviatura duplicada en el catálogo: '{0}'")]
    DuplicateAbbreviation(String),

    #[error("la materia '{course}' declara una correlativa desconocida: '{prerequisite}'")]
    UnknownPrerequisite { course: String, prerequisite: String },

    #[error("la materia '{0}' se declara a sí misma como correlativa")]
    SelfReference(String),

    #[error("la materia '{course}' repite la correlativa '{prerequisite}'")]
    DuplicatePrerequisite { course: String, prerequisite: String },

    #[error("el requisito agregado '{0}' no indica ningún año")]
    EmptyAggregate(String),

    #[error("ciclo de correlativas que involucra a '{0}'")]
    Cycle(String),
}

/// Valores de entorno que no se pudieron interpretar.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: '{value}' ({reason})")]
    InvalidValue { key: &'static str, value: String, reason: String },
}

/// Errores de la capa JSON/HTTP.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid JSON body: {0}")]
    InvalidBody(#[from] serde_json::Error),

    #[error("course is required")]
    MissingCourse,

    #[error("unknown course '{0}'")]
    UnknownCourse(String),

    #[error("'{0}' only accepts 'aprobada' or 'no-regularizada'")]
    InvalidAggregateStatus(String),
}
