#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! # Kornia View Graph
//!
//! Filters the view pairs of a global structure-from-motion problem against a
//! set of global orientations, before translation averaging.
//!
//! - [`filter_view_pairs_from_orientation`] drops pairs whose relative rotation
//!   disagrees with the global orientations.
//! - [`filter_view_pairs_from_relative_translation`] drops relative translation
//!   outliers with 1DSfM, running its iterations on a thread pool.
//! - [`remove_disconnected_view_pairs`] prunes pairs outside the main connected
//!   component.
//!
//! [`filter_view_graph`] chains the three stages.
//!
//! ## Example
//!
//! ```rust
//! use glam::{DQuat, DVec3};
//! use kornia_viewgraph::{
//!     filter_view_pairs_from_orientation, remove_disconnected_view_pairs, Orientations,
//!     TwoViewInfo, ViewPair,
//! };
//!
//! let yaw = DQuat::from_rotation_z(std::f64::consts::FRAC_PI_2);
//! let orientations = Orientations::from([(1, DQuat::IDENTITY), (2, yaw)]);
//!
//! let mut view_pairs = vec![
//!     ViewPair::new(1, 2, TwoViewInfo::new(yaw, DVec3::X)),
//!     ViewPair::new(1, 3, TwoViewInfo::new(DQuat::IDENTITY, DVec3::Y)),
//! ];
//!
//! // image 3 has no orientation
//! let removed = filter_view_pairs_from_orientation(&orientations, 5.0, &mut view_pairs);
//! assert_eq!(removed, 1);
//!
//! remove_disconnected_view_pairs(&mut view_pairs, false);
//! assert_eq!(view_pairs.len(), 1);
//! ```

mod connectivity;
pub use connectivity::*;

mod error;
pub use error::ViewGraphError;

/// Rotation helpers shared by the filters.
pub mod ops;

mod ordering;

mod orientation;
pub use orientation::*;

mod pipeline;
pub use pipeline::*;

mod translation;
pub use translation::*;

mod types;
pub use types::*;

mod union_find;
