//! View-space visibility tests.
//!
//! Runs after the model-view transform and before projection. There is no
//! real clipping: a triangle that straddles the `z = 0` plane is kept whole
//! and projects with whatever distortion that implies.

use crate::math::vec3::Vec3;
use crate::mesh::{centroid, face_normal};

/// Outcome of the visibility stage for one face.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Visible,
    /// All three corners have `z > 0`, i.e. lie behind the eye.
    BehindViewer,
    /// The front side is turned away from the eye.
    BackFacing,
}

/// True when every corner is strictly behind the view plane.
pub fn is_behind_viewer(corners: &[Vec3; 3]) -> bool {
    corners.iter().all(|p| p.z > 0.0)
}

/// Backface test in view space, where the eye is the origin.
///
/// `normal` is the un-normalized outward face normal and `centroid` doubles
/// as the ray from the eye to the face. The face is back-facing when
/// `dot(-normal, centroid) <= 0`, so edge-on faces are culled too.
/// Stated with the inward normal `n = -face_normal`, the rule reads
/// "cull when `dot(n, centroid) <= 0`".
pub fn is_back_facing(normal: Vec3, centroid: Vec3) -> bool {
    (-normal).dot(centroid) <= 0.0
}

/// Runs both tests on view-space corners.
pub fn classify(corners: &[Vec3; 3]) -> Visibility {
    if is_behind_viewer(corners) {
        Visibility::BehindViewer
    } else if is_back_facing(face_normal(corners), centroid(corners)) {
        Visibility::BackFacing
    } else {
        Visibility::Visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Counter-clockwise from +Z, so the outward normal is +Z.
    fn facing_plus_z(z: f32) -> [Vec3; 3] {
        [
            Vec3::new(-1.0, -1.0, z),
            Vec3::new(1.0, -1.0, z),
            Vec3::new(0.0, 1.0, z),
        ]
    }

    #[test]
    fn front_face_in_front_of_eye_is_visible() {
        assert_eq!(classify(&facing_plus_z(-5.0)), Visibility::Visible);
    }

    #[test]
    fn reversed_winding_is_back_facing() {
        let [a, b, c] = facing_plus_z(-5.0);
        assert_eq!(classify(&[a, c, b]), Visibility::BackFacing);
    }

    #[test]
    fn triangle_behind_eye_is_rejected_first() {
        assert_eq!(classify(&facing_plus_z(2.0)), Visibility::BehindViewer);
    }

    #[test]
    fn straddling_triangle_is_not_rejected_by_near_test() {
        let corners = [
            Vec3::new(-1.0, -1.0, -1.0),
            Vec3::new(1.0, -1.0, 1.0),
            Vec3::new(0.0, 1.0, 1.0),
        ];
        assert!(!is_behind_viewer(&corners));
    }

    #[test]
    fn corner_on_view_plane_is_not_behind() {
        let mut corners = facing_plus_z(1.0);
        corners[0].z = 0.0;
        assert!(!is_behind_viewer(&corners));
    }

    #[test]
    fn edge_on_face_is_culled() {
        // Plane containing the eye: normal is perpendicular to the eye ray
        let corners = [
            Vec3::new(0.0, -1.0, -1.0),
            Vec3::new(0.0, -1.0, -3.0),
            Vec3::new(0.0, 1.0, -2.0),
        ];
        assert_eq!(classify(&corners), Visibility::BackFacing);
    }

    #[test]
    fn culling_agrees_with_inward_normal_rule() {
        for z in [-2.0, -5.0] {
            for corners in [facing_plus_z(z), {
                let [a, b, c] = facing_plus_z(z);
                [a, c, b]
            }] {
                let inward = -face_normal(&corners);
                let culled = inward.dot(centroid(&corners)) <= 0.0;
                assert_eq!(is_back_facing(face_normal(&corners), centroid(&corners)), culled);
            }
        }
        // Facing the eye: inward normal points away from it, so not culled
        let front = facing_plus_z(-2.0);
        assert!((-face_normal(&front)).dot(centroid(&front)) > 0.0);
    }
}
