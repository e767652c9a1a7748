use glam::DVec3;

/// Axis-Aligned Bounding Box in f64 world space.
///
/// Invariant: min.x <= max.x, min.y <= max.y, min.z <= max.z.
/// The constructor enforces this by swapping components if needed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb64 {
    pub min: DVec3,
    pub max: DVec3,
}

impl Aabb64 {
    /// Create an AABB from two corners. Automatically sorts
    /// components so that min <= max on every axis.
    pub fn new(a: DVec3, b: DVec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Create the smallest AABB enclosing every point in `points`.
    ///
    /// Returns `None` for an empty iterator.
    pub fn from_points(points: impl IntoIterator<Item = DVec3>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let (min, max) = iter.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p)));
        Some(Self { min, max })
    }

    /// Returns true if every component of both corners is finite.
    pub fn is_finite(&self) -> bool {
        self.min.is_finite() && self.max.is_finite()
    }

    /// Returns the point of the box closest to `p` (clamped per axis).
    pub fn closest_point(&self, p: DVec3) -> DVec3 {
        p.clamp(self.min, self.max)
    }

    /// Squared Euclidean distance from `p` to the box surface.
    /// Zero when the point is inside.
    pub fn distance_squared_to_point(&self, p: DVec3) -> f64 {
        let d = self.closest_point(p) - p;
        d.dot(d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box() -> Aabb64 {
        Aabb64::new(DVec3::ZERO, DVec3::splat(10.0))
    }

    #[test]
    fn test_constructor_auto_sorts() {
        let aabb = Aabb64::new(DVec3::splat(10.0), DVec3::ZERO);
        assert_eq!(aabb.min, DVec3::ZERO);
        assert_eq!(aabb.max, DVec3::splat(10.0));
    }

    #[test]
    fn test_closest_point_clamps_per_axis() {
        let aabb = unit_box();
        assert_eq!(
            aabb.closest_point(DVec3::new(-4.0, 5.0, 12.0)),
            DVec3::new(0.0, 5.0, 10.0)
        );
    }

    #[test]
    fn test_distance_inside_is_zero() {
        let aabb = unit_box();
        assert_eq!(aabb.distance_squared_to_point(DVec3::splat(5.0)), 0.0);
    }

    #[test]
    fn test_distance_to_face_and_corner() {
        let aabb = unit_box();
        // 3 units off the +X face.
        assert_eq!(
            aabb.distance_squared_to_point(DVec3::new(13.0, 5.0, 5.0)),
            9.0
        );
        // Off the (0,0,0) corner by (-3,-4,0).
        assert_eq!(
            aabb.distance_squared_to_point(DVec3::new(-3.0, -4.0, 0.0)),
            25.0
        );
    }

    #[test]
    fn test_from_points_encloses_all() {
        let aabb = Aabb64::from_points([
            DVec3::new(1.0, -2.0, 3.0),
            DVec3::new(-1.0, 4.0, 0.0),
            DVec3::new(0.5, 0.5, 7.0),
        ])
        .unwrap();
        assert_eq!(aabb.min, DVec3::new(-1.0, -2.0, 0.0));
        assert_eq!(aabb.max, DVec3::new(1.0, 4.0, 7.0));
    }

    #[test]
    fn test_from_points_empty_is_none() {
        assert!(Aabb64::from_points(std::iter::empty()).is_none());
    }

    #[test]
    fn test_non_finite_detected() {
        let aabb = Aabb64 {
            min: DVec3::ZERO,
            max: DVec3::new(f64::NAN, 1.0, 1.0),
        };
        assert!(!aabb.is_finite());
        assert!(unit_box().is_finite());
    }
}
