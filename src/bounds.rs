/// Data-Oriented 2D Bounding Rectangles
///
/// World-space XZ rectangles emitted by edits and consumed by placement
/// and mesh collaborators. Pure functions, no methods.

/// Axis-aligned XZ rectangle in world meters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirtyAabb {
    pub min_x: f64,
    pub min_z: f64,
    pub max_x: f64,
    pub max_z: f64,
}

/// Create rectangle from min/max corners
pub fn create_aabb(min_x: f64, min_z: f64, max_x: f64, max_z: f64) -> DirtyAabb {
    DirtyAabb {
        min_x: min_x.min(max_x),
        min_z: min_z.min(max_z),
        max_x: min_x.max(max_x),
        max_z: min_z.max(max_z),
    }
}

/// Square of half-width `radius` around a point
pub fn aabb_from_center_radius(x: f64, z: f64, radius: f64) -> DirtyAabb {
    let r = radius.abs();
    DirtyAabb {
        min_x: x - r,
        min_z: z - r,
        max_x: x + r,
        max_z: z + r,
    }
}

/// Center point of the rectangle
pub fn aabb_center(aabb: &DirtyAabb) -> (f64, f64) {
    (
        (aabb.min_x + aabb.max_x) * 0.5,
        (aabb.min_z + aabb.max_z) * 0.5,
    )
}

/// Test if two rectangles overlap (touching edges count)
pub fn aabb_intersects(a: &DirtyAabb, b: &DirtyAabb) -> bool {
    a.min_x <= b.max_x && a.max_x >= b.min_x && a.min_z <= b.max_z && a.max_z >= b.min_z
}

/// Test if the rectangle contains a point
pub fn aabb_contains_point(aabb: &DirtyAabb, x: f64, z: f64) -> bool {
    x >= aabb.min_x && x <= aabb.max_x && z >= aabb.min_z && z <= aabb.max_z
}

/// Grow the rectangle by `margin` on every side
pub fn aabb_expanded(aabb: &DirtyAabb, margin: f64) -> DirtyAabb {
    DirtyAabb {
        min_x: aabb.min_x - margin,
        min_z: aabb.min_z - margin,
        max_x: aabb.max_x + margin,
        max_z: aabb.max_z + margin,
    }
}

/// Smallest rectangle containing both inputs
pub fn aabb_union(a: &DirtyAabb, b: &DirtyAabb) -> DirtyAabb {
    DirtyAabb {
        min_x: a.min_x.min(b.min_x),
        min_z: a.min_z.min(b.min_z),
        max_x: a.max_x.max(b.max_x),
        max_z: a.max_z.max(b.max_z),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_normalizes_corner_order() {
        let aabb = create_aabb(5.0, 4.0, -1.0, -2.0);
        assert_eq!(aabb, create_aabb(-1.0, -2.0, 5.0, 4.0));
        assert_eq!(aabb.min_x, -1.0);
        assert_eq!(aabb.max_z, 4.0);
    }

    #[test]
    fn test_center_radius_contains_center() {
        let aabb = aabb_from_center_radius(10.0, -3.0, 2.0);
        assert!(aabb_contains_point(&aabb, 10.0, -3.0));
        assert!(aabb_contains_point(&aabb, 12.0, -1.0));
        assert!(!aabb_contains_point(&aabb, 12.5, -3.0));
        assert_eq!(aabb_center(&aabb), (10.0, -3.0));
    }

    #[test]
    fn test_intersection_and_union() {
        let a = create_aabb(0.0, 0.0, 2.0, 2.0);
        let b = create_aabb(2.0, 1.0, 4.0, 3.0);
        let c = create_aabb(5.0, 5.0, 6.0, 6.0);

        assert!(aabb_intersects(&a, &b));
        assert!(!aabb_intersects(&a, &c));

        let u = aabb_union(&a, &c);
        assert!(aabb_intersects(&u, &b));
        assert_eq!(u, create_aabb(0.0, 0.0, 6.0, 6.0));
    }

    #[test]
    fn test_expanded_reaches_neighbour() {
        let a = create_aabb(0.0, 0.0, 1.0, 1.0);
        let c = create_aabb(3.0, 0.0, 4.0, 1.0);
        assert!(!aabb_intersects(&a, &c));
        assert!(aabb_intersects(&aabb_expanded(&a, 2.0), &c));
    }
}
