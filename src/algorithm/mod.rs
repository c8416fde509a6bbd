// Módulo de alto nivel para la evaluación de correlativas
// Declarar submódulos (archivos en la carpeta `src/algorithm`)
mod evaluate;
pub mod cache;

// Reexportar solo la API pública que se expone desde aquí
pub use cache::EvaluationCache;
pub use evaluate::{evaluate, status_of, UNIFIED_ACTIVITIES_TEXT};
