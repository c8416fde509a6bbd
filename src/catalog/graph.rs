use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};

use std::collections::HashMap;

use crate::models::{AggregatePrerequisite, Course};

/// Construye el grafo correlativa -> materia y devuelve el id de un nodo que
/// forma parte de un ciclo, si lo hay. Los agregados son nodos sin entradas.
///
/// Las referencias desconocidas ya se rechazaron antes de llegar aquí; si
/// aparece alguna simplemente no genera arista.
pub(super) fn find_cycle(courses: &[Course], aggregates: &[AggregatePrerequisite]) -> Option<String> {
    let mut graph: DiGraph<&str, ()> = DiGraph::new();
    let mut node_map: HashMap<&str, NodeIndex> = HashMap::new();

    for id in courses.iter().map(|c| c.id.as_str()).chain(aggregates.iter().map(|a| a.id.as_str())) {
        let idx = graph.add_node(id);
        node_map.insert(id, idx);
    }

    for course in courses {
        let Some(&to) = node_map.get(course.id.as_str()) else { continue };
        for prerequisite in &course.prerequisites {
            if let Some(&from) = node_map.get(prerequisite.id.as_str()) {
                graph.add_edge(from, to, ());
            }
        }
    }

    match toposort(&graph, None) {
        Ok(_) => None,
        Err(cycle) => Some(graph[cycle.node_id()].to_string()),
    }
}
