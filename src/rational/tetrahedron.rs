use num_traits::{Signed, Zero};

use crate::error::{GeometryError, Result};
use crate::number::{rat, Oom, Rat, RatSqrt, RoundingMode};

use super::triangle::{convex_hull_in_plane, push_unique};
use super::{
    Envelope, Line, LineSegment, Plane, Point, Ray, Triangle, TrianglePlaneRelation, Vector,
};

/// A tetrahedron defined by four non-coplanar points `(p, q, r, s)`,
/// carrying its four triangular faces `pqr`, `qsr`, `spr`, `psq`.
///
/// The interior side of each face plane is fixed once at construction
/// from the centroid; every containment and clipping test reuses those
/// signs.
#[derive(Debug, Clone)]
pub struct Tetrahedron {
    p: Point,
    q: Point,
    r: Point,
    s: Point,
    faces: [Triangle; 4],
    // +1 or -1: the sign of the centroid against the matching face
    // plane. Never zero for a non-degenerate tetrahedron.
    interior: [i8; 4],
}

/// Intersection of a tetrahedron with a linear entity (line, segment
/// or ray).
#[derive(Debug, Clone, PartialEq)]
pub enum TetrahedronLinearRelation {
    /// A chord of positive length.
    Segment(LineSegment),
    /// A grazing contact at a single point.
    Point(Point),
    /// No shared point.
    Disjoint,
}

/// Intersection of a tetrahedron with a plane.
#[derive(Debug, Clone, PartialEq)]
pub enum TetrahedronPlaneRelation {
    /// A cross-section with four corners, as a convex ring of vertices
    /// in boundary order.
    Polygon(Vec<Point>),
    /// A triangular cross-section (or a whole face).
    Triangle(Triangle),
    /// The plane grazes an edge.
    Segment(LineSegment),
    /// The plane grazes a vertex.
    Point(Point),
    /// No shared point.
    Disjoint,
}

impl Tetrahedron {
    /// Creates a tetrahedron from four points.
    ///
    /// # Errors
    ///
    /// Returns an error if the points are coplanar (which includes any
    /// collinear or coincident triple).
    pub fn new(p: Point, q: Point, r: Point, s: Point) -> Result<Self> {
        if signed_volume_times_six(&p, &q, &r, &s).is_zero() {
            return Err(GeometryError::CoplanarPoints("tetrahedron").into());
        }
        let faces = [
            Triangle::new(p.clone(), q.clone(), r.clone())?,
            Triangle::new(q.clone(), s.clone(), r.clone())?,
            Triangle::new(s.clone(), p.clone(), r.clone())?,
            Triangle::new(p.clone(), s.clone(), q.clone())?,
        ];
        let centroid = centroid_of(&p, &q, &r, &s);
        let mut interior = [0_i8; 4];
        for (side, face) in interior.iter_mut().zip(&faces) {
            *side = if face.plane().signed_component(&centroid).is_positive() {
                1
            } else {
                -1
            };
        }
        Ok(Self {
            p,
            q,
            r,
            s,
            faces,
            interior,
        })
    }

    /// Creates a tetrahedron from integer coordinates.
    ///
    /// # Errors
    ///
    /// Returns an error if the points are coplanar.
    pub fn from_ints(
        p: (i64, i64, i64),
        q: (i64, i64, i64),
        r: (i64, i64, i64),
        s: (i64, i64, i64),
    ) -> Result<Self> {
        Self::new(
            Point::from_ints(p.0, p.1, p.2),
            Point::from_ints(q.0, q.1, q.2),
            Point::from_ints(r.0, r.1, r.2),
            Point::from_ints(s.0, s.1, s.2),
        )
    }

    /// The first vertex.
    #[must_use]
    pub fn p(&self) -> &Point {
        &self.p
    }

    /// The second vertex.
    #[must_use]
    pub fn q(&self) -> &Point {
        &self.q
    }

    /// The third vertex.
    #[must_use]
    pub fn r(&self) -> &Point {
        &self.r
    }

    /// The fourth vertex.
    #[must_use]
    pub fn s(&self) -> &Point {
        &self.s
    }

    /// The faces `pqr`, `qsr`, `spr`, `psq`.
    #[must_use]
    pub fn faces(&self) -> &[Triangle; 4] {
        &self.faces
    }

    /// The centroid, the exact average of the four vertices.
    #[must_use]
    pub fn centroid(&self) -> Point {
        centroid_of(&self.p, &self.q, &self.r, &self.s)
    }

    /// Exact volume, `|det(q−p, r−p, s−p)| / 6`.
    #[must_use]
    pub fn volume(&self) -> Rat {
        signed_volume_times_six(&self.p, &self.q, &self.r, &self.s).abs() * rat(1, 6)
    }

    /// Whether the point lies in the tetrahedron (faces, edges and
    /// vertices included): on the interior side of all four face
    /// planes. Exact.
    #[must_use]
    pub fn contains(&self, point: &Point) -> bool {
        self.faces.iter().zip(self.interior).all(|(face, side)| {
            let s = face.plane().signed_component(point);
            s.is_zero() || (s.is_positive() == (side > 0))
        })
    }

    /// Intersects the tetrahedron with a line.
    #[must_use]
    pub fn intersection_with_line(&self, line: &Line) -> TetrahedronLinearRelation {
        self.clip_line(line, None, None)
    }

    /// Intersects the tetrahedron with a segment: the line clip
    /// narrowed to the segment's parameter range.
    #[must_use]
    pub fn intersection_with_segment(&self, segment: &LineSegment) -> TetrahedronLinearRelation {
        let line = segment.line();
        let tp = line.parameter_of(segment.p());
        let tq = line.parameter_of(segment.q());
        let (lo, hi) = if tp <= tq { (tp, tq) } else { (tq, tp) };
        self.clip_line(line, Some(lo), Some(hi))
    }

    /// Intersects the tetrahedron with a ray: the line clip narrowed
    /// to the ray's half-line.
    #[must_use]
    pub fn intersection_with_ray(&self, ray: &Ray) -> TetrahedronLinearRelation {
        let line = ray.line();
        let t0 = line.parameter_of(ray.start());
        // The ray may run against its carrier line's canonical
        // direction; the start parameter then bounds from above.
        if ray.direction() == line.direction() {
            self.clip_line(line, Some(t0), None)
        } else {
            self.clip_line(line, None, Some(t0))
        }
    }

    /// Clips the carrier line's parameter interval `[lo, hi]` (`None`
    /// for unbounded) against the four face half-spaces.
    fn clip_line(
        &self,
        line: &Line,
        lo: Option<Rat>,
        hi: Option<Rat>,
    ) -> TetrahedronLinearRelation {
        let mut lo = lo;
        let mut hi = hi;
        for (face, side) in self.faces.iter().zip(self.interior) {
            let plane = face.plane();
            let s0 = plane.signed_component(line.point());
            let slope = plane.normal().dot(line.direction());
            // Interior condition along the line: side · (s0 + t·slope) ≥ 0.
            if slope.is_zero() {
                let ok = s0.is_zero() || (s0.is_positive() == (side > 0));
                if !ok {
                    return TetrahedronLinearRelation::Disjoint;
                }
                continue;
            }
            let bound = -&s0 / &slope;
            let lower_bound = slope.is_positive() == (side > 0);
            if lower_bound {
                if lo.as_ref().is_none_or(|l| *l < bound) {
                    lo = Some(bound);
                }
            } else if hi.as_ref().is_none_or(|h| *h > bound) {
                hi = Some(bound);
            }
        }
        // A bounded body constrains every line on both sides.
        let (Some(lo), Some(hi)) = (lo, hi) else {
            return TetrahedronLinearRelation::Disjoint;
        };
        if lo > hi {
            return TetrahedronLinearRelation::Disjoint;
        }
        let a = line.point_at(&lo);
        if lo == hi {
            return TetrahedronLinearRelation::Point(a);
        }
        let b = line.point_at(&hi);
        match LineSegment::new(a, b) {
            Ok(seg) => TetrahedronLinearRelation::Segment(seg),
            // Unreachable: distinct parameters yield distinct points.
            Err(_) => TetrahedronLinearRelation::Disjoint,
        }
    }

    /// Cross-sections the tetrahedron with a plane by clipping each
    /// face; up to four corners.
    #[must_use]
    pub fn intersection_with_plane(&self, plane: &Plane) -> TetrahedronPlaneRelation {
        let mut corners: Vec<Point> = Vec::new();
        for face in &self.faces {
            match face.intersection_with_plane(plane) {
                TrianglePlaneRelation::Triangle(t) => {
                    return TetrahedronPlaneRelation::Triangle(t);
                }
                TrianglePlaneRelation::Segment(seg) => {
                    push_unique(&mut corners, seg.p().clone());
                    push_unique(&mut corners, seg.q().clone());
                }
                TrianglePlaneRelation::Point(x) => push_unique(&mut corners, x),
                TrianglePlaneRelation::Disjoint => {}
            }
        }
        match corners.len() {
            0 => TetrahedronPlaneRelation::Disjoint,
            1 => TetrahedronPlaneRelation::Point(corners.swap_remove(0)),
            2 => {
                let b = corners.swap_remove(1);
                let a = corners.swap_remove(0);
                match LineSegment::new(a, b) {
                    Ok(seg) => TetrahedronPlaneRelation::Segment(seg),
                    // Unreachable: de-duplicated points are distinct.
                    Err(_) => TetrahedronPlaneRelation::Disjoint,
                }
            }
            _ => {
                let hull = convex_hull_in_plane(corners, plane.normal());
                match hull.len() {
                    2 => {
                        let [a, b] = [hull[0].clone(), hull[1].clone()];
                        match LineSegment::new(a, b) {
                            Ok(seg) => TetrahedronPlaneRelation::Segment(seg),
                            Err(_) => TetrahedronPlaneRelation::Disjoint,
                        }
                    }
                    3 => {
                        let [a, b, c] = [hull[0].clone(), hull[1].clone(), hull[2].clone()];
                        match Triangle::new(a, b, c) {
                            Ok(t) => TetrahedronPlaneRelation::Triangle(t),
                            // Unreachable: hull corners make strict turns.
                            Err(_) => TetrahedronPlaneRelation::Disjoint,
                        }
                    }
                    _ => TetrahedronPlaneRelation::Polygon(hull),
                }
            }
        }
    }

    /// Squared distance from a point to the tetrahedron: zero when
    /// contained, else the nearest face. Exact.
    #[must_use]
    pub fn distance_squared(&self, point: &Point) -> Rat {
        if self.contains(point) {
            return Rat::zero();
        }
        self.faces
            .iter()
            .map(|f| f.distance_squared(point))
            .min()
            .unwrap_or_else(Rat::zero)
    }

    /// Distance from a point to the tetrahedron, rounded at `oom`.
    #[must_use]
    pub fn distance(&self, point: &Point, oom: Oom, rm: RoundingMode) -> Rat {
        RatSqrt::non_negative(self.distance_squared(point)).sqrt(oom, rm)
    }

    /// The axis-aligned bounding box over the vertices.
    #[must_use]
    pub fn envelope(&self) -> Envelope {
        Envelope::from_points([&self.p, &self.q, &self.r, &self.s])
    }

    /// Returns the tetrahedron translated by `v`. Face planes and
    /// interior sides translate with it.
    #[must_use]
    pub fn translate(&self, v: &Vector) -> Self {
        Self {
            p: self.p.translate(v),
            q: self.q.translate(v),
            r: self.r.translate(v),
            s: self.s.translate(v),
            faces: [
                self.faces[0].translate(v),
                self.faces[1].translate(v),
                self.faces[2].translate(v),
                self.faces[3].translate(v),
            ],
            interior: self.interior,
        }
    }

    /// Rotates the tetrahedron about an axis (see [`Point::rotate`]).
    ///
    /// # Errors
    ///
    /// Returns an error if the supplied `cos θ`/`sin θ` collapse the
    /// tetrahedron (only possible for a degenerate pair).
    pub fn rotate(
        &self,
        axis_point: &Point,
        axis_dir: &Vector,
        cos_t: &Rat,
        sin_t: &Rat,
    ) -> Result<Self> {
        Self::new(
            self.p.rotate(axis_point, axis_dir, cos_t, sin_t),
            self.q.rotate(axis_point, axis_dir, cos_t, sin_t),
            self.r.rotate(axis_point, axis_dir, cos_t, sin_t),
            self.s.rotate(axis_point, axis_dir, cos_t, sin_t),
        )
    }
}

impl PartialEq for Tetrahedron {
    /// Geometric equality: the same four vertices, in any order.
    fn eq(&self, other: &Self) -> bool {
        let mine = [&self.p, &self.q, &self.r, &self.s];
        let theirs = [&other.p, &other.q, &other.r, &other.s];
        theirs
            .iter()
            .all(|t| mine.iter().any(|m| m.coincides(t)))
            && mine
                .iter()
                .all(|m| theirs.iter().any(|t| t.coincides(m)))
    }
}

impl Eq for Tetrahedron {}

fn centroid_of(p: &Point, q: &Point, r: &Point, s: &Point) -> Point {
    let quarter = rat(1, 4);
    let sum = &(&(&p.position() + &q.position()) + &r.position()) + &s.position();
    Point::from_vector(sum.scale(&quarter))
}

/// `det(q−p, r−p, s−p)`: six times the signed volume. Exact.
fn signed_volume_times_six(p: &Point, q: &Point, r: &Point, s: &Point) -> Rat {
    p.vector_to(q).dot(&p.vector_to(r).cross(&p.vector_to(s)))
}
