//! Trazas de diagnóstico del servicio.
//!
//! Se controlan con `RUST_LOG`; sin la variable se usa `puedocursar=info`.
//! Salida compacta por stderr, así stdout queda libre para el JSON del CLI.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const DEFAULT_FILTER: &str = "puedocursar=info,actix_web=warn";

/// Inicializa el subscriber global. Llamar una sola vez, desde `main`.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}
