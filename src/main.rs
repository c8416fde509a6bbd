// --- ¿Puedo cursar? - Archivo principal ---

use clap::Parser;
use puedocursar::cli::{run, Cli};

#[tokio::main]
async fn main() {
    puedocursar::logging::init();
    let cli = Cli::parse();
    if let Err(err) = run(cli).await {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}
