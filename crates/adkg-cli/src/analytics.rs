//! Centrality and clustering over a fetched subgraph.
//!
//! The relations read from the store are viewed as an undirected simple
//! graph keyed by entity name. Betweenness and components come from
//! `rustworkx-core`; degree centrality is a node's neighbor count over
//! `n - 1`.

use adkg_domain::{EntityLabel, RelationRecord};
use rustworkx_core::centrality::betweenness_centrality;
use rustworkx_core::connectivity::connected_components;
use rustworkx_core::petgraph::graph::{NodeIndex, UnGraph};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Node count above which betweenness runs in parallel
const PARALLEL_THRESHOLD: usize = 50;

/// Scores for one entity.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeScore {
    /// Entity name
    pub name: String,
    /// Coarse type
    pub label: EntityLabel,
    /// Degree centrality in `[0, 1]`
    pub degree: f64,
    /// Normalized betweenness centrality in `[0, 1]`
    pub betweenness: f64,
    /// Connected component, 0 being the largest
    pub component: usize,
}

/// Scores for every entity in a subgraph, most central first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraphAnalytics {
    /// Per-entity scores
    pub nodes: Vec<NodeScore>,
    /// Number of connected components
    pub components: usize,
}

impl GraphAnalytics {
    /// Score the entities that appear in `records`.
    pub fn from_relations(records: &[RelationRecord]) -> Self {
        let mut graph: UnGraph<(String, EntityLabel), ()> = UnGraph::default();
        let mut index: HashMap<&str, NodeIndex> = HashMap::new();

        for record in records {
            let a = *index
                .entry(record.subject.as_str())
                .or_insert_with(|| graph.add_node((record.subject.clone(), record.subject_label)));
            let b = *index
                .entry(record.object.as_str())
                .or_insert_with(|| graph.add_node((record.object.clone(), record.object_label)));
            // Parallel relations between the same pair count once
            graph.update_edge(a, b, ());
        }

        let n = graph.node_count();
        if n == 0 {
            return Self::default();
        }

        let betweenness = betweenness_centrality(&graph, false, true, PARALLEL_THRESHOLD);

        let mut components = connected_components(&graph);
        components.sort_by(|a, b| {
            b.len()
                .cmp(&a.len())
                .then_with(|| min_name(&graph, a).cmp(&min_name(&graph, b)))
        });
        let mut component_of = vec![0; n];
        for (id, members) in components.iter().enumerate() {
            for node in members {
                component_of[node.index()] = id;
            }
        }

        let mut nodes: Vec<NodeScore> = graph
            .node_indices()
            .map(|idx| {
                let (name, label) = &graph[idx];
                let degree = if n > 1 {
                    graph.neighbors(idx).count() as f64 / (n - 1) as f64
                } else {
                    1.0
                };
                NodeScore {
                    name: name.clone(),
                    label: *label,
                    degree,
                    betweenness: betweenness.get(idx.index()).copied().flatten().unwrap_or(0.0),
                    component: component_of[idx.index()],
                }
            })
            .collect();

        nodes.sort_by(|a, b| {
            b.degree
                .partial_cmp(&a.degree)
                .unwrap_or(Ordering::Equal)
                .then_with(|| b.betweenness.partial_cmp(&a.betweenness).unwrap_or(Ordering::Equal))
                .then_with(|| a.name.cmp(&b.name))
        });

        Self {
            nodes,
            components: components.len(),
        }
    }

    /// The `n` most central entities.
    pub fn top(&self, n: usize) -> &[NodeScore] {
        &self.nodes[..n.min(self.nodes.len())]
    }
}

fn min_name<'g, I>(graph: &'g UnGraph<(String, EntityLabel), ()>, members: I) -> Option<&'g str>
where
    I: IntoIterator<Item = &'g NodeIndex>,
{
    members.into_iter().map(|idx| graph[*idx].0.as_str()).min()
}
