// Biblioteca raíz del crate `puedocursar`.
// Motor de correlativas, catálogo del plan y API HTTP que los expone.
pub mod models;
pub mod algorithm;
pub mod catalog;
pub mod report;
pub mod api_json;
pub mod server;
pub mod config;
pub mod error;
pub mod logging;
pub mod cli;

/// Ejecuta el servidor HTTP (reexport para facilitar uso desde `main`)
pub use server::run_server;
pub use catalog::Catalog;
