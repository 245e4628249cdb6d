//! The approximate model: geometry over `f64` with an explicit
//! tolerance.
//!
//! Mirrors the [`rational`](crate::rational) module one-for-one,
//! substituting native floating point for exact rationals. Every
//! comparison takes the caller's `epsilon` instead of an `(oom, rm)`
//! pair; there is no global tolerance.

pub mod collinear;
pub mod envelope;
pub mod line;
pub mod line_segment;
pub mod plane;
pub mod point;
pub mod ray;
pub mod tetrahedron;
pub mod triangle;

/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

pub use collinear::{LineSegmentsCollinear, SimplifiedCollinear};
pub use envelope::Envelope;
pub use line::{Line, LineLineRelation};
pub use line_segment::{LineSegment, SegmentSegmentRelation, SegmentUnion};
pub use plane::{
    LinePlaneRelation, Plane, PlanePairRelation, PointPlaneSide, RayPlaneRelation,
    SegmentPlaneRelation,
};
pub use point::Point;
pub use ray::{Ray, RayLineRelation, RayRayRelation, RaySegmentRelation};
pub use tetrahedron::{Tetrahedron, TetrahedronLinearRelation, TetrahedronPlaneRelation};
pub use triangle::{
    Triangle, TriangleLinearRelation, TrianglePlaneRelation, TriangleTriangleRelation,
};
pub use vector_ops::canonical_direction;

mod vector_ops {
    use super::Vector3;

    /// Scales a direction to unit length and fixes its sign so the
    /// first component larger than `epsilon` in magnitude is positive.
    ///
    /// This is the floating-point counterpart of the exact model's
    /// canonical direction: two directions spanning the same line map
    /// to (nearly) the same vector, so undirected comparisons reduce
    /// to a componentwise check.
    #[must_use]
    pub fn canonical_direction(v: &Vector3, epsilon: f64) -> Option<Vector3> {
        let n = v.norm();
        if n <= epsilon {
            return None;
        }
        let mut u = v / n;
        for c in [u.x, u.y, u.z] {
            if c.abs() > epsilon {
                if c < 0.0 {
                    u = -u;
                }
                break;
            }
        }
        Some(u)
    }

}
