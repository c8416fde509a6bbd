use strsim::jaro_winkler;

use super::Catalog;
use crate::models::Course;

/// Similitud mínima (Jaro-Winkler sobre nombres normalizados) para aceptar un nombre aproximado.
pub const NAME_MATCH_THRESHOLD: f64 = 0.85;

/// Normaliza un nombre para compararlo: minúsculas, sin tildes, sin
/// puntuación y con espacios simples.
///
/// - normalize_name("Didáctica  General") == normalize_name("didactica general")
pub fn normalize_name(s: &str) -> String {
    let mut mapped = String::with_capacity(s.len());
    for ch in s.chars() {
        let c = match ch {
            'Á' | 'À' | 'Ä' | 'Â' | 'Ã' | 'á' | 'à' | 'ä' | 'â' | 'ã' => 'a',
            'É' | 'È' | 'Ë' | 'Ê' | 'é' | 'è' | 'ë' | 'ê' => 'e',
            'Í' | 'Ì' | 'Ï' | 'Î' | 'í' | 'ì' | 'ï' | 'î' => 'i',
            'Ó' | 'Ò' | 'Ö' | 'Ô' | 'Õ' | 'ó' | 'ò' | 'ö' | 'ô' | 'õ' => 'o',
            'Ú' | 'Ù' | 'Ü' | 'Û' | 'ú' | 'ù' | 'ü' | 'û' => 'u',
            'Ñ' | 'ñ' => 'n',
            'Ç' | 'ç' => 'c',
            other => other,
        };
        if c.is_alphanumeric() {
            // el resto de las mayúsculas no ASCII también pasa a minúscula
            mapped.extend(c.to_lowercase());
        } else {
            mapped.push(' ');
        }
    }
    mapped.split_whitespace().collect::<Vec<_>>().join(" ")
}

impl Catalog {
    /// Resuelve lo que escribió el usuario a una materia seleccionable.
    ///
    /// Orden: id exacto, abreviatura (sin distinguir mayúsculas), nombre
    /// normalizado y, como último recurso, el nombre más parecido por encima de
    /// `NAME_MATCH_THRESHOLD`.
    pub fn resolve(&self, query: &str) -> Option<&Course> {
        let q = query.trim();
        if q.is_empty() {
            return None;
        }

        if let Some(course) = self.course(q) {
            return Some(course);
        }

        if let Some(course) = self
            .courses()
            .iter()
            .find(|c| !c.abbr.is_empty() && c.abbr.eq_ignore_ascii_case(q))
        {
            return Some(course);
        }

        let q_norm = normalize_name(q);
        if let Some(course) = self.courses().iter().find(|c| normalize_name(&c.name) == q_norm) {
            return Some(course);
        }

        let mut best: Option<(&Course, f64)> = None;
        for course in self.courses() {
            let similarity = jaro_winkler(&q_norm, &normalize_name(&course.name));
            if similarity < NAME_MATCH_THRESHOLD {
                continue;
            }
            match best {
                Some((_, prev)) if similarity <= prev => {}
                _ => best = Some((course, similarity)),
            }
        }
        best.map(|(course, _)| course)
    }
}
