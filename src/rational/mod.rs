//! The exact model: geometry over arbitrary-precision rationals.
//!
//! Every predicate in this module is exact; precision parameters
//! `(oom, rm)` appear only where a result genuinely leaves ℚ (square
//! roots) or where the caller asks for a rounded comparison.

pub mod collinear;
pub mod envelope;
pub mod line;
pub mod line_segment;
pub mod plane;
pub mod point;
pub mod ray;
pub mod tetrahedron;
pub mod triangle;
pub mod vector;

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
pub use vector::Vector;
