use glam::Vec3;

/// Axis-aligned bounding box in scene coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// Minimum corner.
    pub min: Vec3,
    /// Maximum corner.
    pub max: Vec3,
}

impl Bounds {
    /// Bounds spanning the two corners (in any order).
    #[must_use]
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Box center.
    #[must_use]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Radius of the sphere through the box corners.
    #[must_use]
    pub fn radius(&self) -> f32 {
        (self.max - self.min).length() * 0.5
    }
}

/// A sight line in scene coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Eye position the ray starts from.
    pub origin: Vec3,
    /// Unit direction of the ray.
    pub direction: Vec3,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corners_are_ordered() {
        let b = Bounds::new(Vec3::new(1.0, -2.0, 3.0), Vec3::new(-3.0, 4.0, 0.0));
        assert_eq!(b.min, Vec3::new(-3.0, -2.0, 0.0));
        assert_eq!(b.max, Vec3::new(1.0, 4.0, 3.0));
    }

    #[test]
    fn radius_is_half_diagonal() {
        let b = Bounds::new(Vec3::splat(-1.0), Vec3::splat(1.0));
        assert_eq!(b.center(), Vec3::ZERO);
        assert!((b.radius() - 3.0_f32.sqrt()).abs() < 1e-6);
    }
}
