//! Physical graph auto-layout
//!
//! Assigns non-overlapping, crossing-minimized positions to every table in a
//! partition's join graph. The computation is synchronous and CPU-bound,
//! `O(tables + joins log joins)`, and deterministic: the same graph and flag
//! always produce bit-identical bounds.

use crate::models::Partition;
use petgraph::graph::{NodeIndex, UnGraph};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet, VecDeque};
use tracing::debug;

/// Layout tuning knobs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LayoutConfig {
    /// When true, levels are seeded from the highest-degree tables and the
    /// layout grows column-first; otherwise levels are seeded from tables
    /// with no incoming join edge and the layout grows row-first.
    #[serde(default)]
    pub col_priority: bool,
    /// Spacing between consecutive levels along the primary axis.
    #[serde(default = "default_level_spacing")]
    pub level_spacing: f64,
    /// Spacing between consecutive nodes along the secondary axis.
    #[serde(default = "default_row_height")]
    pub row_height: f64,
}

fn default_level_spacing() -> f64 {
    260.0
}

fn default_row_height() -> f64 {
    120.0
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            col_priority: false,
            level_spacing: default_level_spacing(),
            row_height: default_row_height(),
        }
    }
}

/// Layered layout over a partition's join graph.
pub struct PhysicalGraphLayout {
    config: LayoutConfig,
}

impl PhysicalGraphLayout {
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    /// Compute and write `(x, y)` for every table.
    ///
    /// Width and height are preserved; only positions change.
    pub fn layout(&self, partition: &mut Partition) {
        let table_names: Vec<String> = partition.tables.iter().map(|t| t.name.clone()).collect();
        if table_names.is_empty() {
            return;
        }
        // Partition order doubles as the deterministic tie-breaker.
        let table_index: HashMap<&str, usize> = table_names
            .iter()
            .enumerate()
            .map(|(i, n)| (n.as_str(), i))
            .collect();

        // Undirected adjacency over the join edges.
        let mut graph: UnGraph<usize, ()> = UnGraph::new_undirected();
        let mut node_map: HashMap<usize, NodeIndex> = HashMap::new();
        for (i, _) in table_names.iter().enumerate() {
            node_map.insert(i, graph.add_node(i));
        }
        let mut in_degree = vec![0usize; table_names.len()];
        let mut degree = vec![0usize; table_names.len()];
        // Composite joins produce several rows for one table pair; degrees
        // must follow the deduped graph, not the row count.
        let mut seen_pairs: HashSet<(usize, usize)> = HashSet::new();
        for join in &partition.joins {
            let (Some(&from), Some(&to)) = (
                table_index.get(join.from_table.as_str()),
                table_index.get(join.to_table.as_str()),
            ) else {
                continue;
            };
            let pair = if from <= to { (from, to) } else { (to, from) };
            if !seen_pairs.insert(pair) {
                continue;
            }
            graph.update_edge(node_map[&from], node_map[&to], ());
            in_degree[to] += 1;
            degree[from] += 1;
            degree[to] += 1;
        }

        let levels = self.assign_levels(&graph, &node_map, &in_degree, &degree);
        let ordered = order_within_levels(&graph, &node_map, &levels);

        for (level, row) in &ordered {
            for (order, &table_idx) in row.iter().enumerate() {
                let name = &table_names[table_idx];
                if let Some(table) = partition.table_mut(name) {
                    let primary = *level as f64 * self.config.level_spacing;
                    let secondary = order as f64 * self.config.row_height;
                    if self.config.col_priority {
                        table.bounds.x = secondary;
                        table.bounds.y = primary;
                    } else {
                        table.bounds.x = primary;
                        table.bounds.y = secondary;
                    }
                }
            }
        }
        debug!(
            partition = %partition.name,
            levels = ordered.len(),
            col_priority = self.config.col_priority,
            "graph layout computed"
        );
    }

    /// Breadth-first level assignment.
    ///
    /// Connected tables take their shortest join-hop distance from the
    /// root set; tables without joins land on a single overflow level after
    /// all connected levels.
    fn assign_levels(
        &self,
        graph: &UnGraph<usize, ()>,
        node_map: &HashMap<usize, NodeIndex>,
        in_degree: &[usize],
        degree: &[usize],
    ) -> Vec<Option<usize>> {
        let n = degree.len();
        let mut levels: Vec<Option<usize>> = vec![None; n];

        let roots = self.pick_roots(in_degree, degree);
        let mut queue: VecDeque<usize> = VecDeque::new();
        for &root in &roots {
            levels[root] = Some(0);
            queue.push_back(root);
        }
        bfs_levels(graph, node_map, &mut levels, &mut queue);

        // Components the root heuristic never reached start over at level 0,
        // in partition order.
        for i in 0..n {
            if degree[i] > 0 && levels[i].is_none() {
                levels[i] = Some(0);
                queue.push_back(i);
                bfs_levels(graph, node_map, &mut levels, &mut queue);
            }
        }

        // Overflow level for tables with no joins at all.
        let max_level = levels.iter().flatten().copied().max().unwrap_or(0);
        let overflow = if levels.iter().any(|l| l.is_some()) {
            max_level + 1
        } else {
            0
        };
        for i in 0..n {
            if levels[i].is_none() {
                levels[i] = Some(overflow);
            }
        }
        levels
    }

    /// Root selection: highest degree under `col_priority`, otherwise tables
    /// with no incoming join edge. Falls back to highest degree when the
    /// direction heuristic yields nothing (pure cycles).
    fn pick_roots(&self, in_degree: &[usize], degree: &[usize]) -> Vec<usize> {
        let max_degree = degree.iter().copied().max().unwrap_or(0);
        if max_degree == 0 {
            return Vec::new();
        }
        if !self.config.col_priority {
            let sources: Vec<usize> = (0..degree.len())
                .filter(|&i| degree[i] > 0 && in_degree[i] == 0)
                .collect();
            if !sources.is_empty() {
                return sources;
            }
        }
        (0..degree.len())
            .filter(|&i| degree[i] == max_degree)
            .collect()
    }
}

fn bfs_levels(
    graph: &UnGraph<usize, ()>,
    node_map: &HashMap<usize, NodeIndex>,
    levels: &mut [Option<usize>],
    queue: &mut VecDeque<usize>,
) {
    while let Some(current) = queue.pop_front() {
        let level = levels[current].unwrap_or(0);
        let mut neighbors: Vec<usize> = graph
            .neighbors(node_map[&current])
            .map(|n| graph[n])
            .collect();
        neighbors.sort_unstable();
        for neighbor in neighbors {
            if levels[neighbor].is_none() {
                levels[neighbor] = Some(level + 1);
                queue.push_back(neighbor);
            }
        }
    }
}

/// Order every level by the barycenter (mean order index) of the previous
/// level's already-placed neighbors; ties and neighbor-less tables fall back
/// to partition order.
fn order_within_levels(
    graph: &UnGraph<usize, ()>,
    node_map: &HashMap<usize, NodeIndex>,
    levels: &[Option<usize>],
) -> Vec<(usize, Vec<usize>)> {
    let mut by_level: HashMap<usize, Vec<usize>> = HashMap::new();
    for (i, level) in levels.iter().enumerate() {
        if let Some(level) = level {
            by_level.entry(*level).or_default().push(i);
        }
    }
    let mut level_keys: Vec<usize> = by_level.keys().copied().collect();
    level_keys.sort_unstable();

    let mut ordered: Vec<(usize, Vec<usize>)> = Vec::with_capacity(level_keys.len());
    // order index of each already-placed table
    let mut placed_order: HashMap<usize, usize> = HashMap::new();

    for level in level_keys {
        let mut row = by_level.remove(&level).unwrap_or_default();
        row.sort_unstable();
        if let Some((_, prev_row)) = ordered.last() {
            let prev: Vec<usize> = prev_row.clone();
            let mut keyed: Vec<(f64, usize)> = row
                .iter()
                .map(|&i| {
                    let mut sum = 0.0;
                    let mut count = 0usize;
                    for neighbor in graph.neighbors(node_map[&i]) {
                        let nid = graph[neighbor];
                        if prev.contains(&nid) {
                            sum += placed_order[&nid] as f64;
                            count += 1;
                        }
                    }
                    let barycenter = if count > 0 {
                        sum / count as f64
                    } else {
                        f64::MAX
                    };
                    (barycenter, i)
                })
                .collect();
            keyed.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
            row = keyed.into_iter().map(|(_, i)| i).collect();
        }
        for (order, &i) in row.iter().enumerate() {
            placed_order.insert(i, order);
        }
        ordered.push((level, row));
    }
    ordered
}
