use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use crate::types::{ImageId, ViewPair};
use crate::union_find::UnionFind;

/// Connected components of the view graph.
///
/// Each component lists its image ids in ascending order. Components are sorted
/// by decreasing size, ties broken by the lowest image id.
pub fn connected_components(view_pairs: &[ViewPair]) -> Vec<Vec<ImageId>> {
    let image_ids: BTreeSet<ImageId> = view_pairs
        .iter()
        .flat_map(|p| [p.id.image_id1(), p.id.image_id2()])
        .collect();
    let index_of: HashMap<ImageId, usize> = image_ids
        .iter()
        .enumerate()
        .map(|(index, &id)| (id, index))
        .collect();

    let mut uf = UnionFind::new(image_ids.len());
    for pair in view_pairs {
        uf.union(
            index_of[&pair.id.image_id1()],
            index_of[&pair.id.image_id2()],
        );
    }

    // ids are visited in ascending order, so every component comes out sorted
    let mut by_root: BTreeMap<usize, Vec<ImageId>> = BTreeMap::new();
    for &id in &image_ids {
        let root = uf.find(index_of[&id]);
        by_root.entry(root).or_default().push(id);
    }

    let mut components: Vec<Vec<ImageId>> = by_root.into_values().collect();
    components.sort_by(|a, b| b.len().cmp(&a.len()).then(a[0].cmp(&b[0])));
    components
}

/// Image ids of the largest connected component of the view graph.
///
/// Ties are broken by the lowest image id. Empty when there are no view pairs.
pub fn largest_connected_component(view_pairs: &[ViewPair]) -> HashSet<ImageId> {
    connected_components(view_pairs)
        .into_iter()
        .next()
        .map(|component| component.into_iter().collect())
        .unwrap_or_default()
}

/// Remove view pairs that are disconnected from the rest of the view graph.
///
/// By default only the view pairs of the largest connected component (by
/// number of images) are kept.
///
/// With `only_adjacent` the pruning is lighter: when the graph has more than one
/// component, a view pair is removed only if neither of its images appears in
/// another view pair, i.e. it forms a component on its own. Every component
/// with two or more view pairs is kept intact: its bridges and its redundant
/// edges (those that close a cycle) all survive, even when it is not the
/// largest component. A graph that is already connected is never modified.
///
/// # Returns
///
/// The number of removed view pairs.
pub fn remove_disconnected_view_pairs(
    view_pairs: &mut Vec<ViewPair>,
    only_adjacent: bool,
) -> usize {
    let num_pairs = view_pairs.len();
    if num_pairs == 0 {
        return 0;
    }

    if only_adjacent {
        if connected_components(view_pairs).len() <= 1 {
            return 0;
        }

        let mut degree: HashMap<ImageId, usize> = HashMap::new();
        for pair in view_pairs.iter() {
            *degree.entry(pair.id.image_id1()).or_default() += 1;
            *degree.entry(pair.id.image_id2()).or_default() += 1;
        }
        view_pairs.retain(|p| {
            degree[&p.id.image_id1()] > 1 || degree[&p.id.image_id2()] > 1
        });
    } else {
        let giant = largest_connected_component(view_pairs);
        view_pairs.retain(|p| {
            giant.contains(&p.id.image_id1()) && giant.contains(&p.id.image_id2())
        });
    }

    let num_removed = num_pairs - view_pairs.len();
    log::debug!(
        "Connectivity pruning removed {} of {} view pairs (only_adjacent: {})",
        num_removed,
        num_pairs,
        only_adjacent
    );
    num_removed
}
