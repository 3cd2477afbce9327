use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::connectivity::remove_disconnected_view_pairs;
use crate::error::ViewGraphError;
use crate::orientation::filter_view_pairs_from_orientation;
use crate::translation::{
    filter_view_pairs_from_relative_translation, RelativeTranslationFilterOptions,
};
use crate::types::{Orientations, ViewPair};

/// Configuration of the full view graph filtering pipeline.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewGraphFilterConfig {
    /// Maximum relative rotation discrepancy in degrees.
    pub max_relative_rotation_difference_degrees: f64,
    /// Options of the 1DSfM translation filter.
    pub translation: RelativeTranslationFilterOptions,
    /// Whether to run the translation filter at all.
    pub filter_translations: bool,
    /// Use the lighter connectivity pruning policy.
    pub only_adjacent: bool,
}

impl Default for ViewGraphFilterConfig {
    fn default() -> Self {
        Self {
            max_relative_rotation_difference_degrees: 5.0,
            translation: RelativeTranslationFilterOptions::default(),
            filter_translations: true,
            only_adjacent: false,
        }
    }
}

/// Number of view pairs removed by each stage of [`filter_view_graph`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ViewGraphFilterSummary {
    /// Pairs removed by the orientation filter.
    pub removed_by_orientation: usize,
    /// Pairs removed by the translation filter.
    pub removed_by_translation: usize,
    /// Pairs removed by the connectivity pruning.
    pub removed_by_connectivity: usize,
    /// Pairs left after filtering.
    pub num_remaining: usize,
}

/// Check that no view pair is a self pair or appears twice.
pub fn ensure_unique_pairs(view_pairs: &[ViewPair]) -> Result<(), ViewGraphError> {
    let mut seen = HashSet::with_capacity(view_pairs.len());
    for pair in view_pairs {
        if pair.id.is_self_pair() {
            return Err(ViewGraphError::SelfPair(pair.id.image_id1()));
        }
        if !seen.insert(pair.id) {
            return Err(ViewGraphError::DuplicatePair(pair.id));
        }
    }
    Ok(())
}

/// Run the orientation, translation and connectivity filters in sequence.
///
/// The configuration and the view pairs are validated before any pair is
/// removed; on error `view_pairs` is left untouched.
pub fn filter_view_graph(
    config: &ViewGraphFilterConfig,
    orientations: &Orientations,
    view_pairs: &mut Vec<ViewPair>,
) -> Result<ViewGraphFilterSummary, ViewGraphError> {
    if config.max_relative_rotation_difference_degrees.is_nan() {
        return Err(ViewGraphError::InvalidRotationThreshold(
            config.max_relative_rotation_difference_degrees,
        ));
    }
    if config.filter_translations {
        config.translation.validate()?;
    }
    ensure_unique_pairs(view_pairs)?;

    let num_pairs = view_pairs.len();
    let mut summary = ViewGraphFilterSummary {
        removed_by_orientation: filter_view_pairs_from_orientation(
            orientations,
            config.max_relative_rotation_difference_degrees,
            view_pairs,
        ),
        ..Default::default()
    };

    if config.filter_translations {
        summary.removed_by_translation = filter_view_pairs_from_relative_translation(
            &config.translation,
            orientations,
            view_pairs,
        )?;
    }

    summary.removed_by_connectivity =
        remove_disconnected_view_pairs(view_pairs, config.only_adjacent);
    summary.num_remaining = view_pairs.len();

    log::info!(
        "View graph filtering kept {} of {} pairs \
         (orientation: -{}, translation: -{}, connectivity: -{})",
        summary.num_remaining,
        num_pairs,
        summary.removed_by_orientation,
        summary.removed_by_translation,
        summary.removed_by_connectivity
    );
    Ok(summary)
}
