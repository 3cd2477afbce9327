use std::collections::HashSet;

use crate::ops::{angular_distance_degrees, relative_rotation_from_orientations};
use crate::types::{ImageId, Orientations, ViewPair};

/// Remove view pairs whose relative rotation disagrees with the global orientations.
///
/// A pair (i, j) is kept only if both images are oriented and the angular
/// distance between its estimated relative rotation and `R_j * R_i^-1` is at
/// most `max_relative_rotation_difference_degrees`.
///
/// Pairs referencing an image without orientation are removed, and a warning
/// naming that image is logged once per call.
///
/// # Arguments
///
/// * `orientations` - Global orientation of each oriented image.
/// * `max_relative_rotation_difference_degrees` - Maximum allowed discrepancy in degrees.
/// * `view_pairs` - The view pairs to filter, reduced in place.
///
/// # Returns
///
/// The number of removed view pairs.
pub fn filter_view_pairs_from_orientation(
    orientations: &Orientations,
    max_relative_rotation_difference_degrees: f64,
    view_pairs: &mut Vec<ViewPair>,
) -> usize {
    let num_pairs = view_pairs.len();
    let mut unresolved: HashSet<ImageId> = HashSet::new();

    view_pairs.retain(|pair| {
        let id1 = pair.id.image_id1();
        let id2 = pair.id.image_id2();

        let (Some(r1), Some(r2)) = (orientations.get(&id1), orientations.get(&id2)) else {
            for id in [id1, id2] {
                if !orientations.contains_key(&id) && unresolved.insert(id) {
                    log::warn!(
                        "Image {} has no orientation; removing its view pairs",
                        id
                    );
                }
            }
            return false;
        };

        let implied = relative_rotation_from_orientations(r1, r2);
        angular_distance_degrees(&pair.info.rotation, &implied)
            <= max_relative_rotation_difference_degrees
    });

    let num_removed = num_pairs - view_pairs.len();
    log::debug!(
        "Orientation filter removed {} of {} view pairs",
        num_removed,
        num_pairs
    );
    num_removed
}
