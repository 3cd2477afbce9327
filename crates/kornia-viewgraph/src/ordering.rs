//! Greedy 1D ordering of a weighted directed graph.

/// Incoming weight below which a node counts as a source.
const SOURCE_EPS: f64 = 1e-9;

/// An edge between two dense node indices.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ProjectedEdge {
    pub node1: usize,
    pub node2: usize,
}

/// Order nodes along a 1D axis from signed edge projections.
///
/// Edge `k` points from `node1` to `node2` with weight `projections[k]` when the
/// projection is positive, and from `node2` to `node1` with weight
/// `-projections[k]` otherwise. The ordering approximates a minimum weighted
/// feedback arc set: nodes are placed one at a time. Remaining sources (no
/// incoming weight left) are placed first; otherwise the remaining node with
/// the largest `(out + 1) / (in + 1)` weight ratio is picked. Ties go to the
/// lowest index.
///
/// Returns the position of each node in the ordering.
pub(crate) fn order_by_projection(
    num_nodes: usize,
    edges: &[ProjectedEdge],
    projections: &[f64],
) -> Vec<usize> {
    debug_assert_eq!(edges.len(), projections.len());

    let mut in_weight = vec![0.0f64; num_nodes];
    let mut out_weight = vec![0.0f64; num_nodes];
    let mut incident: Vec<Vec<usize>> = vec![Vec::new(); num_nodes];

    for (k, (edge, &p)) in edges.iter().zip(projections).enumerate() {
        let (from, to) = directed(edge, p);
        out_weight[from] += p.abs();
        in_weight[to] += p.abs();
        incident[edge.node1].push(k);
        if edge.node2 != edge.node1 {
            incident[edge.node2].push(k);
        }
    }

    let mut placed = vec![false; num_nodes];
    let mut order = vec![0usize; num_nodes];

    for position in 0..num_nodes {
        let mut best = None;
        let mut best_key = (false, f64::NEG_INFINITY);
        for node in (0..num_nodes).filter(|&n| !placed[n]) {
            let is_source = in_weight[node] <= SOURCE_EPS;
            let ratio = (out_weight[node] + 1.0) / (in_weight[node] + 1.0);
            if (is_source, ratio) > best_key {
                best_key = (is_source, ratio);
                best = Some(node);
            }
        }

        let Some(node) = best else {
            break;
        };
        placed[node] = true;
        order[node] = position;

        // drop the weights this node contributed to its unplaced neighbors
        for &k in &incident[node] {
            let edge = &edges[k];
            let (from, to) = directed(edge, projections[k]);
            let w = projections[k].abs();
            if from == node && !placed[to] {
                in_weight[to] -= w;
            } else if to == node && !placed[from] {
                out_weight[from] -= w;
            }
        }
    }

    order
}

#[inline]
fn directed(edge: &ProjectedEdge, projection: f64) -> (usize, usize) {
    if projection > 0.0 {
        (edge.node1, edge.node2)
    } else {
        (edge.node2, edge.node1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge(node1: usize, node2: usize) -> ProjectedEdge {
        ProjectedEdge { node1, node2 }
    }

    #[test]
    fn test_chain_is_ordered() {
        // 0 -> 1 -> 2 -> 3 along the axis
        let edges = [edge(0, 1), edge(1, 2), edge(2, 3), edge(0, 3)];
        let projections = [1.0, 1.0, 1.0, 3.0];
        let order = order_by_projection(4, &edges, &projections);
        assert_eq!(order, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_negative_projection_reverses_edge() {
        let edges = [edge(0, 1), edge(1, 2)];
        let projections = [-1.0, -1.0];
        let order = order_by_projection(3, &edges, &projections);
        assert_eq!(order, vec![2, 1, 0]);
    }

    #[test]
    fn test_outlier_edge_against_bulk() {
        // the bulk says 0 < 1 < 2, the last edge claims 2 is before 0
        let edges = [edge(0, 1), edge(1, 2), edge(0, 2), edge(0, 2)];
        let projections = [1.0, 1.0, 2.0, -0.5];
        let order = order_by_projection(3, &edges, &projections);
        assert!(order[0] < order[1]);
        assert!(order[1] < order[2]);
    }

    #[test]
    fn test_source_placed_before_heavier_node() {
        // 0 is the only source but 1 has the larger out/in ratio
        let edges = [edge(0, 1), edge(1, 2), edge(1, 3), edge(1, 4)];
        let projections = [0.1, 1.0, 1.0, 1.0];
        let order = order_by_projection(5, &edges, &projections);
        assert_eq!(order[0], 0);
        assert_eq!(order[1], 1);
    }

    #[test]
    fn test_ties_take_lowest_index() {
        let order = order_by_projection(3, &[], &[]);
        assert_eq!(order, vec![0, 1, 2]);
    }
}
