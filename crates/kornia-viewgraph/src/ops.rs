use glam::{DQuat, DVec3};

/// Relative rotation implied by two global orientations.
///
/// R_ij = R_j * R_i^-1
#[inline]
pub fn relative_rotation_from_orientations(r_i: &DQuat, r_j: &DQuat) -> DQuat {
    *r_j * r_i.inverse()
}

/// Angular distance between two rotations in degrees, in the range [0, 180].
///
/// Uses the rotation angle of `a * b^-1`. The half angle is taken with `atan2`
/// of the vector and scalar parts so rotations close to identity or to a half
/// turn stay well conditioned.
pub fn angular_distance_degrees(a: &DQuat, b: &DQuat) -> f64 {
    let error = *a * b.inverse();
    let sin_half = error.xyz().length();
    let cos_half = error.w.abs();
    (2.0 * sin_half.atan2(cos_half)).to_degrees()
}

/// Rotate a relative translation direction from the first camera frame to the world frame.
///
/// t_world = R_i^-1 * t_ij
#[inline]
pub fn rotate_relative_translation_to_world(orientation: &DQuat, translation: &DVec3) -> DVec3 {
    orientation.inverse() * *translation
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_angular_distance_identity() {
        let q = DQuat::from_rotation_y(0.3);
        assert_relative_eq!(angular_distance_degrees(&q, &q), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_angular_distance_known_angles() {
        let a = DQuat::from_rotation_z(FRAC_PI_2);
        let b = DQuat::from_rotation_z(PI);
        assert_relative_eq!(angular_distance_degrees(&a, &b), 90.0, epsilon = 1e-9);
        assert_relative_eq!(
            angular_distance_degrees(&DQuat::IDENTITY, &b),
            180.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_angular_distance_sign_invariant() {
        // q and -q encode the same rotation
        let a = DQuat::from_rotation_x(0.2);
        let b = DQuat::from_rotation_x(0.5);
        let neg_b = DQuat::from_xyzw(-b.x, -b.y, -b.z, -b.w);
        assert_relative_eq!(
            angular_distance_degrees(&a, &b),
            angular_distance_degrees(&a, &neg_b),
            epsilon = 1e-9
        );
        assert_relative_eq!(angular_distance_degrees(&a, &b), 0.3f64.to_degrees(), epsilon = 1e-9);
    }

    #[test]
    fn test_relative_rotation_from_orientations() {
        let r_i = DQuat::from_rotation_x(0.4);
        let r_j = DQuat::from_rotation_y(-0.7);
        let r_ij = relative_rotation_from_orientations(&r_i, &r_j);
        assert!((r_ij * r_i).abs_diff_eq(r_j, 1e-12));
    }

    #[test]
    fn test_rotate_translation_to_world() {
        let r = DQuat::from_rotation_z(FRAC_PI_2);
        // the world +x axis seen from a camera yawed by 90 degrees
        let t_cam = r * DVec3::X;
        let t_world = rotate_relative_translation_to_world(&r, &t_cam);
        assert_relative_eq!(t_world.x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(t_world.y, 0.0, epsilon = 1e-12);
        assert_relative_eq!(t_world.z, 0.0, epsilon = 1e-12);
    }
}
