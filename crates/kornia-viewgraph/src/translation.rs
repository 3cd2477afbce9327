use std::collections::BTreeMap;

use glam::DVec3;
use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::StandardNormal;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::ViewGraphError;
use crate::ops::rotate_relative_translation_to_world;
use crate::ordering::{order_by_projection, ProjectedEdge};
use crate::types::{ImageId, Orientations, ViewPair};

/// Iterations accumulated together by one rayon task before the ordered merge.
const ITERATIONS_PER_CHUNK: usize = 8;

/// Options for the 1DSfM relative translation filter.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelativeTranslationFilterOptions {
    /// Number of worker threads used to run the projection iterations.
    pub num_threads: usize,
    /// Number of random projection axes to test. More than 40 is recommended.
    pub num_iterations: usize,
    /// Maximum mean inconsistent projection weight per iteration a view pair may
    /// accumulate before it is removed (tau in the 1DSfM paper).
    pub translation_projection_tolerance: f64,
    /// Optional RNG seed for deterministic runs.
    pub random_seed: Option<u64>,
}

impl Default for RelativeTranslationFilterOptions {
    fn default() -> Self {
        Self {
            num_threads: 1,
            num_iterations: 48,
            translation_projection_tolerance: 0.08,
            random_seed: None,
        }
    }
}

impl RelativeTranslationFilterOptions {
    /// Check that every option is within its valid range.
    pub fn validate(&self) -> Result<(), ViewGraphError> {
        if self.num_threads < 1 {
            return Err(ViewGraphError::InvalidOptions {
                name: "num_threads",
                value: self.num_threads.to_string(),
            });
        }
        if self.num_iterations < 1 {
            return Err(ViewGraphError::InvalidOptions {
                name: "num_iterations",
                value: self.num_iterations.to_string(),
            });
        }
        let tau = self.translation_projection_tolerance;
        if !tau.is_finite() || tau <= 0.0 {
            return Err(ViewGraphError::InvalidOptions {
                name: "translation_projection_tolerance",
                value: tau.to_string(),
            });
        }
        Ok(())
    }
}

/// View pairs taking part in the projections, with dense node indices.
struct ProjectionGraph {
    num_nodes: usize,
    edges: Vec<ProjectedEdge>,
    /// Relative translation of each edge rotated to the world frame.
    directions: Vec<DVec3>,
    /// Position of each edge's view pair in the input collection.
    pair_index: Vec<usize>,
}

impl ProjectionGraph {
    fn build(orientations: &Orientations, view_pairs: &[ViewPair]) -> Self {
        let mut node_of: BTreeMap<ImageId, usize> = BTreeMap::new();
        let mut oriented = Vec::new();
        let mut num_skipped = 0usize;

        for (index, pair) in view_pairs.iter().enumerate() {
            let id1 = pair.id.image_id1();
            let id2 = pair.id.image_id2();
            match (orientations.get(&id1), orientations.get(&id2)) {
                (Some(r1), Some(_)) => {
                    node_of.insert(id1, 0);
                    node_of.insert(id2, 0);
                    let direction =
                        rotate_relative_translation_to_world(r1, &pair.info.translation);
                    oriented.push((index, id1, id2, direction));
                }
                _ => num_skipped += 1,
            }
        }

        if num_skipped > 0 {
            log::warn!(
                "Skipping {} view pairs with unoriented images in translation filtering",
                num_skipped
            );
        }

        // nodes are numbered by ascending image id
        for (node, slot) in node_of.values_mut().enumerate() {
            *slot = node;
        }

        let mut graph = Self {
            num_nodes: node_of.len(),
            edges: Vec::with_capacity(oriented.len()),
            directions: Vec::with_capacity(oriented.len()),
            pair_index: Vec::with_capacity(oriented.len()),
        };
        for (index, id1, id2, direction) in oriented {
            graph.edges.push(ProjectedEdge {
                node1: node_of[&id1],
                node2: node_of[&id2],
            });
            graph.directions.push(direction);
            graph.pair_index.push(index);
        }
        graph
    }

    /// Edges whose projection on `axis` contradicts the 1D ordering, with the
    /// magnitude of their projection.
    fn inconsistent_edges(&self, axis: DVec3) -> Vec<(usize, f64)> {
        let projections: Vec<f64> = self.directions.iter().map(|d| d.dot(axis)).collect();
        let order = order_by_projection(self.num_nodes, &self.edges, &projections);

        self.edges
            .iter()
            .zip(&projections)
            .enumerate()
            .filter_map(|(k, (edge, &p))| {
                let ahead = order[edge.node2] > order[edge.node1];
                let behind = order[edge.node2] < order[edge.node1];
                if (behind && p > 0.0) || (ahead && p < 0.0) {
                    Some((k, p.abs()))
                } else {
                    None
                }
            })
            .collect()
    }

    /// Sum of the inconsistent projection weight of every edge over the
    /// iterations seeded by `seeds`.
    ///
    /// The seeds are split into fixed chunks, each summed into its own dense
    /// accumulator, and the chunks are merged in order. The grouping never
    /// depends on the number of threads, so neither do the sums.
    fn accumulate_inconsistent_weight(&self, seeds: &[u64]) -> Vec<f64> {
        let num_edges = self.edges.len();
        let chunks: Vec<Vec<f64>> = seeds
            .par_chunks(ITERATIONS_PER_CHUNK)
            .map(|chunk| {
                let mut weight = vec![0.0f64; num_edges];
                for &seed in chunk {
                    let mut iteration_rng = StdRng::seed_from_u64(seed);
                    let axis = random_unit_axis(&mut iteration_rng);
                    for (k, w) in self.inconsistent_edges(axis) {
                        weight[k] += w;
                    }
                }
                weight
            })
            .collect();

        let mut total = vec![0.0f64; num_edges];
        for weight in &chunks {
            for (acc, w) in total.iter_mut().zip(weight) {
                *acc += w;
            }
        }
        total
    }
}

/// Sample a uniformly distributed unit vector.
fn random_unit_axis<R: Rng + ?Sized>(rng: &mut R) -> DVec3 {
    loop {
        let v = DVec3::new(
            rng.sample(StandardNormal),
            rng.sample(StandardNormal),
            rng.sample(StandardNormal),
        );
        let norm = v.length();
        if norm > 1e-12 {
            return v / norm;
        }
    }
}

/// Remove view pairs whose relative translation is an outlier according to 1DSfM.
///
/// Implements the filter of "Robust Global Translations with 1DSfM" (Wilson and
/// Snavely, ECCV 2014). Relative translations are rotated to the world frame
/// and projected onto random axes. For each axis the images are ordered along
/// the line, and the view pairs whose projection contradicts that ordering
/// accumulate the magnitude of their projection. Pairs whose mean accumulated
/// weight per iteration exceeds `translation_projection_tolerance` are removed.
///
/// The random generator is built from `options.random_seed`, or seeded from the
/// thread rng when no seed is given.
///
/// # Arguments
///
/// * `options` - Filter options, validated before any work.
/// * `orientations` - Global orientation of each oriented image.
/// * `view_pairs` - The view pairs to filter, reduced in place.
///
/// # Returns
///
/// The number of removed view pairs.
pub fn filter_view_pairs_from_relative_translation(
    options: &RelativeTranslationFilterOptions,
    orientations: &Orientations,
    view_pairs: &mut Vec<ViewPair>,
) -> Result<usize, ViewGraphError> {
    options.validate()?;

    let mut rng = match options.random_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => {
            let mut tr = rand::rng();
            StdRng::from_rng(&mut tr)
        }
    };

    filter_with_validated_options(options, &mut rng, orientations, view_pairs)
}

/// Same as [`filter_view_pairs_from_relative_translation`] with a caller owned
/// random generator. `options.random_seed` is ignored.
///
/// The generator is only advanced on the calling thread: one seed is drawn per
/// iteration before the work is dispatched, and every iteration samples its
/// projection axis from its own generator. The result therefore only depends on
/// the state of `rng`, not on `num_threads`.
///
/// View pairs referencing an image without orientation are never considered
/// inconsistent and are left in place.
pub fn filter_view_pairs_from_relative_translation_with_rng<R: Rng + ?Sized>(
    options: &RelativeTranslationFilterOptions,
    rng: &mut R,
    orientations: &Orientations,
    view_pairs: &mut Vec<ViewPair>,
) -> Result<usize, ViewGraphError> {
    options.validate()?;
    filter_with_validated_options(options, rng, orientations, view_pairs)
}

fn filter_with_validated_options<R: Rng + ?Sized>(
    options: &RelativeTranslationFilterOptions,
    rng: &mut R,
    orientations: &Orientations,
    view_pairs: &mut Vec<ViewPair>,
) -> Result<usize, ViewGraphError> {
    let graph = ProjectionGraph::build(orientations, view_pairs);
    if graph.edges.len() < 2 {
        return Ok(0);
    }

    let seeds: Vec<u64> = (0..options.num_iterations).map(|_| rng.random()).collect();

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(options.num_threads)
        .build()
        .map_err(|e| ViewGraphError::ThreadPool(e.to_string()))?;

    let bad_weight = pool.install(|| graph.accumulate_inconsistent_weight(&seeds));

    let mut remove = vec![false; view_pairs.len()];
    let num_iterations = options.num_iterations as f64;
    for (k, &weight) in bad_weight.iter().enumerate() {
        if weight / num_iterations > options.translation_projection_tolerance {
            remove[graph.pair_index[k]] = true;
        }
    }

    let num_pairs = view_pairs.len();
    let mut index = 0;
    view_pairs.retain(|_| {
        let keep = !remove[index];
        index += 1;
        keep
    });

    let num_removed = num_pairs - view_pairs.len();
    log::debug!(
        "Translation filter removed {} of {} view pairs after {} iterations",
        num_removed,
        num_pairs,
        options.num_iterations
    );
    Ok(num_removed)
}
