//! Catálogo del plan de estudios (malla).
//!
//! Se carga una sola vez al iniciar el proceso desde un JSON (el plan embebido
//! o un archivo indicado por configuración), se valida y luego se comparte de
//! solo lectura. Las búsquedas devuelven referencias al mismo catálogo durante
//! toda la vida del proceso.

mod graph;
mod resolve;

pub use resolve::{normalize_name, NAME_MATCH_THRESHOLD};

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use crate::error::CatalogError;
use crate::models::{AggregatePrerequisite, Course};

/// Plan embebido: Profesorado de Educación Secundaria en Historia.
pub const BUILTIN_PLAN_JSON: &str = include_str!("../datafiles/plan_historia.json");

#[derive(Debug, Deserialize)]
struct CatalogFile {
    plan: String,
    courses: Vec<Course>,
    #[serde(default)]
    aggregates: Vec<AggregatePrerequisite>,
}

#[derive(Debug, Clone, Copy)]
enum Slot {
    Course(usize),
    Aggregate(usize),
}

/// Resultado de `Catalog::by_id`: una materia o un requisito agregado.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogEntry<'a> {
    Course(&'a Course),
    Aggregate(&'a AggregatePrerequisite),
}

impl<'a> CatalogEntry<'a> {
    pub fn id(&self) -> &'a str {
        match self {
            CatalogEntry::Course(c) => &c.id,
            CatalogEntry::Aggregate(a) => &a.id,
        }
    }

    pub fn name(&self) -> &'a str {
        match self {
            CatalogEntry::Course(c) => &c.name,
            CatalogEntry::Aggregate(a) => &a.name,
        }
    }

    /// Abreviatura; vacía para los agregados.
    pub fn abbr(&self) -> &'a str {
        match self {
            CatalogEntry::Course(c) => &c.abbr,
            CatalogEntry::Aggregate(_) => "",
        }
    }

    pub fn is_aggregate(&self) -> bool {
        matches!(self, CatalogEntry::Aggregate(_))
    }
}

#[derive(Debug)]
pub struct Catalog {
    plan: String,
    courses: Vec<Course>,
    aggregates: Vec<AggregatePrerequisite>,
    index: HashMap<String, Slot>,
}

impl Catalog {
    /// Construye y valida un catálogo.
    pub fn new(
        plan: impl Into<String>,
        courses: Vec<Course>,
        aggregates: Vec<AggregatePrerequisite>,
    ) -> Result<Self, CatalogError> {
        let mut index: HashMap<String, Slot> = HashMap::new();

        for (i, course) in courses.iter().enumerate() {
            register(&mut index, &course.id, Slot::Course(i))?;
        }
        for (i, aggregate) in aggregates.iter().enumerate() {
            register(&mut index, &aggregate.id, Slot::Aggregate(i))?;
            if aggregate.years.is_empty() {
                return Err(CatalogError::EmptyAggregate(aggregate.id.clone()));
            }
        }

        let mut abbrs: HashSet<String> = HashSet::new();
        for course in &courses {
            if !course.abbr.is_empty() && !abbrs.insert(course.abbr.to_uppercase()) {
                return Err(CatalogError::DuplicateAbbreviation(course.abbr.clone()));
            }

            let mut seen: HashSet<&str> = HashSet::new();
            for prerequisite in &course.prerequisites {
                if prerequisite.id == course.id {
                    return Err(CatalogError::SelfReference(course.id.clone()));
                }
                if !seen.insert(prerequisite.id.as_str()) {
                    return Err(CatalogError::DuplicatePrerequisite {
                        course: course.id.clone(),
                        prerequisite: prerequisite.id.clone(),
                    });
                }
                if !index.contains_key(&prerequisite.id) {
                    return Err(CatalogError::UnknownPrerequisite {
                        course: course.id.clone(),
                        prerequisite: prerequisite.id.clone(),
                    });
                }
            }
        }

        if let Some(id) = graph::find_cycle(&courses, &aggregates) {
            return Err(CatalogError::Cycle(id));
        }

        Ok(Catalog { plan: plan.into(), courses, aggregates, index })
    }

    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json::from_str(json)?;
        Catalog::new(file.plan, file.courses, file.aggregates)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Catalog::from_json_str(&contents)?;
        info!(
            path = %path.display(),
            plan = %catalog.plan,
            courses = catalog.courses.len(),
            "catálogo cargado desde archivo"
        );
        Ok(catalog)
    }

    pub fn builtin() -> Result<Self, CatalogError> {
        let catalog = Catalog::from_json_str(BUILTIN_PLAN_JSON)?;
        info!(plan = %catalog.plan, courses = catalog.courses.len(), "catálogo embebido cargado");
        Ok(catalog)
    }

    pub fn plan(&self) -> &str {
        &self.plan
    }

    /// Materias seleccionables, en el orden del plan.
    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn aggregates(&self) -> &[AggregatePrerequisite] {
        &self.aggregates
    }

    /// Busca una materia o un agregado por id.
    pub fn by_id(&self, id: &str) -> Option<CatalogEntry<'_>> {
        match self.index.get(id)? {
            Slot::Course(i) => self.courses.get(*i).map(CatalogEntry::Course),
            Slot::Aggregate(i) => self.aggregates.get(*i).map(CatalogEntry::Aggregate),
        }
    }

    /// Solo materias seleccionables (los agregados no se pueden cursar).
    pub fn course(&self, id: &str) -> Option<&Course> {
        match self.by_id(id)? {
            CatalogEntry::Course(c) => Some(c),
            CatalogEntry::Aggregate(_) => None,
        }
    }

    pub fn is_aggregate(&self, id: &str) -> bool {
        matches!(self.index.get(id), Some(Slot::Aggregate(_)))
    }

    pub fn courses_in_year(&self, year: u8) -> impl Iterator<Item = &Course> + '_ {
        self.courses.iter().filter(move |c| c.year == Some(year))
    }

    /// Años que tienen al menos una materia con correlativas (en el plan embebido: 2, 3 y 4).
    pub fn selectable_years(&self) -> Vec<u8> {
        let mut years: Vec<u8> = self
            .courses
            .iter()
            .filter(|c| c.has_prerequisites())
            .filter_map(|c| c.year)
            .collect();
        years.sort_unstable();
        years.dedup();
        years
    }
}

fn register(index: &mut HashMap<String, Slot>, id: &str, slot: Slot) -> Result<(), CatalogError> {
    if id.trim().is_empty() {
        return Err(CatalogError::EmptyId);
    }
    if index.insert(id.to_string(), slot).is_some() {
        return Err(CatalogError::DuplicateId(id.to_string()));
    }
    Ok(())
}
