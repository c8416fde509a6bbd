//! Interfaz de línea de comandos: servidor HTTP, listado del plan y
//! evaluación puntual de una materia.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use crate::algorithm::EvaluationCache;
use crate::api_json::{evaluate_request, EvaluationRequest};
use crate::catalog::Catalog;
use crate::config::AppConfig;
use crate::models::{PrerequisiteStatus, StatusMap};
use crate::server::run_server;

#[derive(Debug, Parser)]
#[command(
    name = "puedocursar",
    version,
    about = "¿Puedo cursar? Evaluador de correlativas del plan de estudios"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand, PartialEq, Eq)]
pub enum Command {
    /// Levanta la API HTTP (comando por defecto).
    Serve {
        /// Dirección de escucha; pisa PUEDOCURSAR_BIND.
        #[arg(short, long)]
        bind: Option<String>,
    },
    /// Lista las materias del plan.
    Courses {
        /// Solo las materias de este año.
        #[arg(short, long)]
        year: Option<u8>,
    },
    /// Evalúa si se puede cursar una materia e imprime el resultado en JSON.
    Evaluate {
        /// Id, abreviatura o nombre de la materia.
        course: String,
        /// Estado de una correlativa, como `id=aprobada` (repetible).
        #[arg(short, long = "status", value_name = "ID=ESTADO")]
        statuses: Vec<String>,
    },
}

/// Parsea `id=estado`. Acepta `aprobada`, `regularizada`, `no-regularizada`
/// y sus abreviaturas.
pub fn parse_status_arg(raw: &str) -> Result<(String, PrerequisiteStatus)> {
    let Some((id, value)) = raw.split_once('=') else {
        bail!("invalid status '{}': expected ID=STATUS", raw);
    };
    let id = id.trim();
    if id.is_empty() {
        bail!("invalid status '{}': empty prerequisite id", raw);
    }
    let status = value
        .parse::<PrerequisiteStatus>()
        .map_err(anyhow::Error::msg)
        .with_context(|| format!("invalid status for '{}'", id))?;
    Ok((id.to_string(), status))
}

pub async fn run(cli: Cli) -> Result<()> {
    let config = AppConfig::from_env().context("read configuration")?;
    let catalog = config.load_catalog().context("load catalog")?;

    match cli.command.unwrap_or(Command::Serve { bind: None }) {
        Command::Serve { bind } => {
            let mut config = config;
            if let Some(b) = bind {
                config.bind_addr = b;
            }
            run_server(config, catalog).await.context("run HTTP server")
        }
        Command::Courses { year } => cmd_courses(&catalog, year),
        Command::Evaluate { course, statuses } => cmd_evaluate(&catalog, course, &statuses),
    }
}

fn cmd_courses(catalog: &Catalog, year: Option<u8>) -> Result<()> {
    println!("{}", catalog.plan());
    let courses: Vec<_> = match year {
        Some(y) => catalog.courses_in_year(y).collect(),
        None => catalog.courses().iter().collect(),
    };
    for c in courses {
        let year = c.year.map(|y| y.to_string()).unwrap_or_else(|| "-".to_string());
        println!(
            "{:<4} {:<38} {:<5} {:<18} {}",
            year,
            c.id,
            c.abbr,
            c.format.as_str(),
            c.name
        );
    }
    Ok(())
}

fn cmd_evaluate(catalog: &Catalog, course: String, raw_statuses: &[String]) -> Result<()> {
    let mut statuses = StatusMap::new();
    for raw in raw_statuses {
        let (id, status) = parse_status_arg(raw)?;
        statuses.insert(id, status);
    }

    let request = EvaluationRequest { course, statuses };
    let cache = EvaluationCache::new(0);
    let response = evaluate_request(catalog, &cache, &request)?;
    let out = serde_json::to_string_pretty(&response).context("serialize evaluation")?;
    println!("{}", out);
    Ok(())
}
