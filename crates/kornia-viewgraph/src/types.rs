use std::collections::HashMap;

use glam::{DQuat, DVec3};

/// Identifier of an image (camera) in the reconstruction.
pub type ImageId = u32;

/// Global orientation of every oriented image, as unit quaternions rotating
/// world coordinates into the camera frame.
///
/// Images without an entry are considered unoriented.
pub type Orientations = HashMap<ImageId, DQuat>;

/// Canonical identifier of a view pair.
///
/// The smaller image id is always stored first, so a pair of images maps to
/// exactly one `ViewIdPair`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewIdPair {
    image_id1: ImageId,
    image_id2: ImageId,
}

impl ViewIdPair {
    /// Create the canonical pair for two images, in any order.
    pub fn new(a: ImageId, b: ImageId) -> Self {
        if a <= b {
            Self {
                image_id1: a,
                image_id2: b,
            }
        } else {
            Self {
                image_id1: b,
                image_id2: a,
            }
        }
    }

    /// The smaller image id.
    #[inline]
    pub fn image_id1(&self) -> ImageId {
        self.image_id1
    }

    /// The larger image id.
    #[inline]
    pub fn image_id2(&self) -> ImageId {
        self.image_id2
    }

    /// Whether the pair links an image with itself.
    #[inline]
    pub fn is_self_pair(&self) -> bool {
        self.image_id1 == self.image_id2
    }
}

/// Two-view geometry estimated from the correspondences of a single image pair.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TwoViewInfo {
    /// Relative rotation from the first camera frame to the second one.
    pub rotation: DQuat,
    /// Direction towards the second camera center, expressed in the first
    /// camera frame. Expected to be a unit vector.
    pub translation: DVec3,
}

impl TwoViewInfo {
    /// Create a two-view estimate from a relative rotation and translation direction.
    pub fn new(rotation: DQuat, translation: DVec3) -> Self {
        Self {
            rotation,
            translation,
        }
    }

    /// Create a two-view estimate from an axis-angle relative rotation (radians).
    pub fn from_angle_axis(angle_axis: DVec3, translation: DVec3) -> Self {
        Self::new(DQuat::from_scaled_axis(angle_axis), translation)
    }

    /// The same geometry seen from the second camera.
    ///
    /// The rotation is inverted and the direction now points from the second
    /// camera center towards the first one, in the second camera frame.
    pub fn inverse(&self) -> Self {
        Self {
            rotation: self.rotation.inverse(),
            translation: -(self.rotation * self.translation),
        }
    }
}

/// A view pair with its two-view estimate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewPair {
    /// Canonical identifier of the pair.
    pub id: ViewIdPair,
    /// Geometry relating `id.image_id1()` to `id.image_id2()`.
    pub info: TwoViewInfo,
}

impl ViewPair {
    /// Create a view pair where `info` relates `image_a` to `image_b`.
    ///
    /// When `image_a > image_b` the ids are swapped to the canonical order and
    /// `info` is inverted so it still relates the first image to the second.
    pub fn new(image_a: ImageId, image_b: ImageId, info: TwoViewInfo) -> Self {
        let id = ViewIdPair::new(image_a, image_b);
        let info = if image_a > image_b {
            info.inverse()
        } else {
            info
        };
        Self { id, info }
    }
}
