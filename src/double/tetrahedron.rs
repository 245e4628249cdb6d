use crate::error::{GeometryError, Result};

use super::triangle::{convex_hull_in_plane, push_unique};
use super::{
    Envelope, Line, LineSegment, Plane, Point, Ray, Triangle, TrianglePlaneRelation, Vector3,
};

/// A tetrahedron defined by four non-coplanar points `(p, q, r, s)`,
/// carrying its four triangular faces `pqr`, `qsr`, `spr`, `psq`.
///
/// The interior side of each face plane is fixed once at construction
/// from the centroid; every containment and clipping test reuses those
/// signs.
#[derive(Debug, Clone, Copy, PartialEq)]
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
    /// Returns an error if the points are coplanar within `epsilon`
    /// (which includes any collinear or coincident triple).
    pub fn new(p: Point, q: Point, r: Point, s: Point, epsilon: f64) -> Result<Self> {
        if signed_volume_times_six(&p, &q, &r, &s).abs() <= epsilon {
            return Err(GeometryError::CoplanarPoints("tetrahedron").into());
        }
        let faces = [
            Triangle::new(p, q, r, epsilon)?,
            Triangle::new(q, s, r, epsilon)?,
            Triangle::new(s, p, r, epsilon)?,
            Triangle::new(p, s, q, epsilon)?,
        ];
        let centroid = centroid_of(&p, &q, &r, &s);
        let mut interior = [0_i8; 4];
        for (side, face) in interior.iter_mut().zip(&faces) {
            *side = if face.plane().signed_component(&centroid) > 0.0 {
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

    /// Creates a tetrahedron from coordinate triples.
    ///
    /// # Errors
    ///
    /// Returns an error if the points are coplanar within `epsilon`.
    pub fn from_coords(
        p: (f64, f64, f64),
        q: (f64, f64, f64),
        r: (f64, f64, f64),
        s: (f64, f64, f64),
        epsilon: f64,
    ) -> Result<Self> {
        Self::new(
            Point::from_coords(p.0, p.1, p.2),
            Point::from_coords(q.0, q.1, q.2),
            Point::from_coords(r.0, r.1, r.2),
            Point::from_coords(s.0, s.1, s.2),
            epsilon,
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

    /// The centroid, the average of the four vertices.
    #[must_use]
    pub fn centroid(&self) -> Point {
        centroid_of(&self.p, &self.q, &self.r, &self.s)
    }

    /// Volume, `|det(q−p, r−p, s−p)| / 6`.
    #[must_use]
    pub fn volume(&self) -> f64 {
        signed_volume_times_six(&self.p, &self.q, &self.r, &self.s).abs() / 6.0
    }

    /// Whether the point lies in the tetrahedron (faces, edges and
    /// vertices included within `epsilon`): on the interior side of
    /// all four face planes.
    #[must_use]
    pub fn contains(&self, point: &Point, epsilon: f64) -> bool {
        self.faces.iter().zip(self.interior).all(|(face, side)| {
            let s = face.plane().signed_component(point);
            s.abs() <= epsilon || ((s > 0.0) == (side > 0))
        })
    }

    /// Intersects the tetrahedron with a line.
    #[must_use]
    pub fn intersection_with_line(&self, line: &Line, epsilon: f64) -> TetrahedronLinearRelation {
        self.clip_line(line, None, None, epsilon)
    }

    /// Intersects the tetrahedron with a segment: the line clip
    /// narrowed to the segment's parameter range.
    #[must_use]
    pub fn intersection_with_segment(
        &self,
        segment: &LineSegment,
        epsilon: f64,
    ) -> TetrahedronLinearRelation {
        let line = segment.line();
        let tp = line.parameter_of(segment.p());
        let tq = line.parameter_of(segment.q());
        let (lo, hi) = if tp <= tq { (tp, tq) } else { (tq, tp) };
        self.clip_line(line, Some(lo), Some(hi), epsilon)
    }

    /// Intersects the tetrahedron with a ray: the line clip narrowed
    /// to the ray's half-line.
    #[must_use]
    pub fn intersection_with_ray(&self, ray: &Ray, epsilon: f64) -> TetrahedronLinearRelation {
        let line = ray.line();
        let t0 = line.parameter_of(ray.start());
        // The ray may run against its carrier line's canonical
        // direction; the start parameter then bounds from above.
        if ray.direction().dot(line.direction()) > 0.0 {
            self.clip_line(line, Some(t0), None, epsilon)
        } else {
            self.clip_line(line, None, Some(t0), epsilon)
        }
    }

    /// Clips the carrier line's parameter interval `[lo, hi]` (`None`
    /// for unbounded) against the four face half-spaces.
    fn clip_line(
        &self,
        line: &Line,
        lo: Option<f64>,
        hi: Option<f64>,
        epsilon: f64,
    ) -> TetrahedronLinearRelation {
        let mut lo = lo;
        let mut hi = hi;
        for (face, side) in self.faces.iter().zip(self.interior) {
            let plane = face.plane();
            let s0 = plane.signed_component(line.point());
            let slope = plane.normal().dot(line.direction());
            // Interior condition along the line: side · (s0 + t·slope) ≥ 0.
            if slope.abs() <= epsilon {
                let ok = s0.abs() <= epsilon || ((s0 > 0.0) == (side > 0));
                if !ok {
                    return TetrahedronLinearRelation::Disjoint;
                }
                continue;
            }
            let bound = -s0 / slope;
            let lower_bound = (slope > 0.0) == (side > 0);
            if lower_bound {
                if lo.is_none_or(|l| l < bound) {
                    lo = Some(bound);
                }
            } else if hi.is_none_or(|h| h > bound) {
                hi = Some(bound);
            }
        }
        // A bounded body constrains every line on both sides.
        let (Some(lo), Some(hi)) = (lo, hi) else {
            return TetrahedronLinearRelation::Disjoint;
        };
        if lo - hi > epsilon {
            return TetrahedronLinearRelation::Disjoint;
        }
        if hi - lo <= epsilon {
            return TetrahedronLinearRelation::Point(line.point_at((lo + hi) / 2.0));
        }
        match LineSegment::new(line.point_at(lo), line.point_at(hi), epsilon) {
            Ok(seg) => TetrahedronLinearRelation::Segment(seg),
            // Unreachable: the parameters are separated by more than epsilon.
            Err(_) => TetrahedronLinearRelation::Disjoint,
        }
    }

    /// Cross-sections the tetrahedron with a plane by clipping each
    /// face; up to four corners.
    #[must_use]
    pub fn intersection_with_plane(
        &self,
        plane: &Plane,
        epsilon: f64,
    ) -> TetrahedronPlaneRelation {
        let mut corners: Vec<Point> = Vec::new();
        for face in &self.faces {
            match face.intersection_with_plane(plane, epsilon) {
                TrianglePlaneRelation::Triangle(t) => {
                    return TetrahedronPlaneRelation::Triangle(t);
                }
                TrianglePlaneRelation::Segment(seg) => {
                    push_unique(&mut corners, *seg.p(), epsilon);
                    push_unique(&mut corners, *seg.q(), epsilon);
                }
                TrianglePlaneRelation::Point(x) => push_unique(&mut corners, x, epsilon),
                TrianglePlaneRelation::Disjoint => {}
            }
        }
        match corners.len() {
            0 => TetrahedronPlaneRelation::Disjoint,
            1 => TetrahedronPlaneRelation::Point(corners.swap_remove(0)),
            2 => {
                let b = corners.swap_remove(1);
                let a = corners.swap_remove(0);
                match LineSegment::new(a, b, epsilon) {
                    Ok(seg) => TetrahedronPlaneRelation::Segment(seg),
                    // Unreachable: de-duplicated points are distinct.
                    Err(_) => TetrahedronPlaneRelation::Disjoint,
                }
            }
            _ => {
                let hull = convex_hull_in_plane(corners, plane.normal());
                match hull.len() {
                    2 => match LineSegment::new(hull[0], hull[1], epsilon) {
                        Ok(seg) => TetrahedronPlaneRelation::Segment(seg),
                        Err(_) => TetrahedronPlaneRelation::Disjoint,
                    },
                    3 => match Triangle::new(hull[0], hull[1], hull[2], epsilon) {
                        Ok(t) => TetrahedronPlaneRelation::Triangle(t),
                        // Unreachable: hull corners make strict turns.
                        Err(_) => TetrahedronPlaneRelation::Disjoint,
                    },
                    _ => TetrahedronPlaneRelation::Polygon(hull),
                }
            }
        }
    }

    /// Squared distance from a point to the tetrahedron: zero when
    /// contained, else the nearest face.
    #[must_use]
    pub fn distance_squared(&self, point: &Point, epsilon: f64) -> f64 {
        if self.contains(point, epsilon) {
            return 0.0;
        }
        self.faces
            .iter()
            .map(|f| f.distance_squared(point, epsilon))
            .fold(f64::INFINITY, f64::min)
    }

    /// Distance from a point to the tetrahedron.
    #[must_use]
    pub fn distance(&self, point: &Point, epsilon: f64) -> f64 {
        self.distance_squared(point, epsilon).sqrt()
    }

    /// The axis-aligned bounding box over the vertices.
    #[must_use]
    pub fn envelope(&self) -> Envelope {
        Envelope::from_points([&self.p, &self.q, &self.r, &self.s])
    }

    /// Returns the tetrahedron translated by `v`. Face planes and
    /// interior sides translate with it.
    #[must_use]
    pub fn translate(&self, v: &Vector3) -> Self {
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
    /// Returns an error if the axis direction is zero within `epsilon`.
    pub fn rotate(
        &self,
        axis_point: &Point,
        axis_dir: &Vector3,
        theta: f64,
        epsilon: f64,
    ) -> Result<Self> {
        Self::new(
            self.p.rotate(axis_point, axis_dir, theta, epsilon)?,
            self.q.rotate(axis_point, axis_dir, theta, epsilon)?,
            self.r.rotate(axis_point, axis_dir, theta, epsilon)?,
            self.s.rotate(axis_point, axis_dir, theta, epsilon)?,
            epsilon,
        )
    }

    /// Geometric equality within `epsilon`: the same four vertices,
    /// in any order.
    #[must_use]
    pub fn coincides(&self, other: &Self, epsilon: f64) -> bool {
        let mine = [&self.p, &self.q, &self.r, &self.s];
        let theirs = [&other.p, &other.q, &other.r, &other.s];
        theirs
            .iter()
            .all(|t| mine.iter().any(|m| m.coincides(t, epsilon)))
            && mine
                .iter()
                .all(|m| theirs.iter().any(|t| t.coincides(m, epsilon)))
    }
}

fn centroid_of(p: &Point, q: &Point, r: &Point, s: &Point) -> Point {
    let sum = p.position().coords
        + q.position().coords
        + r.position().coords
        + s.position().coords;
    Point::from_vector(sum / 4.0)
}

/// `det(q−p, r−p, s−p)`: six times the signed volume.
fn signed_volume_times_six(p: &Point, q: &Point, r: &Point, s: &Point) -> f64 {
    p.vector_to(q).dot(&p.vector_to(r).cross(&p.vector_to(s)))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-10;

    fn p(x: f64, y: f64, z: f64) -> Point {
        Point::from_coords(x, y, z)
    }

    fn seg(a: (f64, f64, f64), b: (f64, f64, f64)) -> LineSegment {
        LineSegment::from_coords(a, b, EPS).unwrap()
    }

    // Corner tetrahedron: x, y, z ≥ 0 and x + y + z ≤ 2.
    fn corner() -> Tetrahedron {
        Tetrahedron::from_coords(
            (0.0, 0.0, 0.0),
            (2.0, 0.0, 0.0),
            (0.0, 2.0, 0.0),
            (0.0, 0.0, 2.0),
            EPS,
        )
        .unwrap()
    }

    // ── construction tests ──

    #[test]
    fn coplanar_vertices_rejected() {
        assert!(Tetrahedron::from_coords(
            (0.0, 0.0, 0.0),
            (1.0, 0.0, 0.0),
            (0.0, 1.0, 0.0),
            (1.0, 1.0, 0.0),
            EPS,
        )
        .is_err());
    }

    #[test]
    fn coincidence_ignores_vertex_order() {
        let a = corner();
        let b = Tetrahedron::from_coords(
            (0.0, 0.0, 2.0),
            (0.0, 2.0, 0.0),
            (2.0, 0.0, 0.0),
            (0.0, 0.0, 0.0),
            EPS,
        )
        .unwrap();
        assert!(a.coincides(&b, EPS));
    }

    // ── measure and containment tests ──

    #[test]
    fn volume_and_centroid() {
        let t = corner();
        // det = 8, volume 8/6 = 4/3.
        assert!((t.volume() - 4.0 / 3.0).abs() < 1e-9);
        assert!(t.centroid().coincides(&p(0.5, 0.5, 0.5), 1e-9));
    }

    #[test]
    fn contains_interior_boundary_and_not_outside() {
        let t = corner();
        assert!(t.contains(&t.centroid(), EPS));
        assert!(t.contains(&p(0.0, 0.0, 0.0), EPS)); // vertex
        assert!(t.contains(&p(1.0, 0.0, 0.0), EPS)); // edge
        assert!(t.contains(&p(1.0, 1.0, 0.0), EPS)); // on the slanted face
        assert!(!t.contains(&p(1.0, 1.0, 1.0), EPS));
        assert!(!t.contains(&p(-1.0, 0.0, 0.0), EPS));
    }

    #[test]
    fn containment_implies_zero_distance() {
        let t = corner();
        assert!(t.distance_squared(&t.centroid(), EPS) < EPS);
        assert!((t.distance_squared(&p(0.0, 0.0, 3.0), EPS) - 1.0).abs() < 1e-9);
    }

    // ── line / segment / ray clipping tests ──

    #[test]
    fn line_through_interior_yields_chord() {
        let t = corner();
        let l = Line::from_points(&p(-1.0, 0.0, 1.0), &p(3.0, 0.0, 1.0), EPS).unwrap();
        let TetrahedronLinearRelation::Segment(s) = t.intersection_with_line(&l, EPS) else {
            panic!("expected a chord");
        };
        // At z = 1, y = 0: x from 0 to 1.
        assert!(s.equals_ignore_direction(&seg((0.0, 0.0, 1.0), (1.0, 0.0, 1.0)), 1e-9));
    }

    #[test]
    fn line_grazing_a_vertex() {
        let t = corner();
        let l = Line::from_points(&p(-1.0, 1.0, 2.0), &p(1.0, -1.0, 2.0), EPS).unwrap();
        let TetrahedronLinearRelation::Point(x) = t.intersection_with_line(&l, EPS) else {
            panic!("expected a point");
        };
        assert!(x.coincides(&p(0.0, 0.0, 2.0), 1e-9));
    }

    #[test]
    fn line_missing_entirely() {
        let t = corner();
        let l = Line::from_points(&p(0.0, 0.0, 3.0), &p(1.0, 0.0, 3.0), EPS).unwrap();
        assert_eq!(
            t.intersection_with_line(&l, EPS),
            TetrahedronLinearRelation::Disjoint
        );
    }

    #[test]
    fn segment_clipped_to_interior_part() {
        let t = corner();
        let inside = seg((0.0, 0.0, 0.0), (1.0, 0.0, 0.0));
        let TetrahedronLinearRelation::Segment(s) = t.intersection_with_segment(&inside, EPS)
        else {
            panic!("expected a segment");
        };
        assert!(s.equals_ignore_direction(&inside, 1e-9));
        // Only the boundary point survives: at z = 1, y = 0 the body
        // ends at x = 1.
        let grazing = seg((1.0, 0.0, 1.0), (5.0, 0.0, 1.0));
        let TetrahedronLinearRelation::Point(x) = t.intersection_with_segment(&grazing, EPS)
        else {
            panic!("expected a point");
        };
        assert!(x.coincides(&p(1.0, 0.0, 1.0), 1e-9));
        let outside = seg((3.0, 0.0, 1.0), (5.0, 0.0, 1.0));
        assert_eq!(
            t.intersection_with_segment(&outside, EPS),
            TetrahedronLinearRelation::Disjoint
        );
    }

    #[test]
    fn ray_from_inside_stops_at_the_face() {
        let t = corner();
        let r = Ray::from_points(&p(0.0, 0.0, 1.0), &p(1.0, 0.0, 1.0), EPS).unwrap();
        let TetrahedronLinearRelation::Segment(s) = t.intersection_with_ray(&r, EPS) else {
            panic!("expected a segment");
        };
        assert!(s.equals_ignore_direction(&seg((0.0, 0.0, 1.0), (1.0, 0.0, 1.0)), 1e-9));
    }

    #[test]
    fn ray_against_canonical_direction() {
        // The carrier line's canonical direction is +x; this ray runs -x.
        let t = corner();
        let r = Ray::from_points(&p(1.0, 0.0, 1.0), &p(0.0, 0.0, 1.0), EPS).unwrap();
        let TetrahedronLinearRelation::Segment(s) = t.intersection_with_ray(&r, EPS) else {
            panic!("expected a segment");
        };
        assert!(s.equals_ignore_direction(&seg((0.0, 0.0, 1.0), (1.0, 0.0, 1.0)), 1e-9));
    }

    #[test]
    fn ray_pointing_away_misses() {
        let t = corner();
        let r = Ray::from_points(&p(0.0, 0.0, 3.0), &p(0.0, 0.0, 4.0), EPS).unwrap();
        assert_eq!(
            t.intersection_with_ray(&r, EPS),
            TetrahedronLinearRelation::Disjoint
        );
    }

    // ── plane cross-section tests ──

    #[test]
    fn plane_cross_section_is_a_triangle() {
        let t = corner();
        let cut = Plane::new(p(0.0, 0.0, 1.0), &Vector3::new(0.0, 0.0, 1.0), EPS).unwrap();
        let TetrahedronPlaneRelation::Triangle(tri) = t.intersection_with_plane(&cut, EPS)
        else {
            panic!("expected a triangular section");
        };
        let expected =
            Triangle::from_coords((0.0, 0.0, 1.0), (1.0, 0.0, 1.0), (0.0, 1.0, 1.0), EPS)
                .unwrap();
        assert!(tri.coincides(&expected, 1e-9));
    }

    #[test]
    fn plane_containing_a_face_returns_it() {
        let t = corner();
        let TetrahedronPlaneRelation::Triangle(tri) =
            t.intersection_with_plane(&Plane::z0(), EPS)
        else {
            panic!("expected the z = 0 face");
        };
        let face =
            Triangle::from_coords((0.0, 0.0, 0.0), (2.0, 0.0, 0.0), (0.0, 2.0, 0.0), EPS)
                .unwrap();
        assert!(tri.coincides(&face, 1e-9));
    }

    #[test]
    fn plane_cross_section_can_be_a_quadrilateral() {
        // x = 1 splits the vertices two against two, cutting four edges
        // at (1,0,0), (1,1,0), (1,1,1) and (1,2,1).
        let t = Tetrahedron::from_coords(
            (0.0, 0.0, 0.0),
            (2.0, 0.0, 0.0),
            (0.0, 2.0, 0.0),
            (2.0, 2.0, 2.0),
            EPS,
        )
        .unwrap();
        let cut = Plane::new(p(1.0, 0.0, 0.0), &Vector3::new(1.0, 0.0, 0.0), EPS).unwrap();
        let TetrahedronPlaneRelation::Polygon(ring) = t.intersection_with_plane(&cut, EPS)
        else {
            panic!("expected a quadrilateral section");
        };
        assert_eq!(ring.len(), 4);
        for corner in [
            p(1.0, 0.0, 0.0),
            p(1.0, 1.0, 0.0),
            p(1.0, 1.0, 1.0),
            p(1.0, 2.0, 1.0),
        ] {
            assert!(ring.iter().any(|h| h.coincides(&corner, 1e-9)));
        }
    }

    #[test]
    fn plane_grazing_a_vertex() {
        let t = corner();
        let top = Plane::new(p(0.0, 0.0, 2.0), &Vector3::new(0.0, 0.0, 1.0), EPS).unwrap();
        let TetrahedronPlaneRelation::Point(x) = t.intersection_with_plane(&top, EPS) else {
            panic!("expected a point");
        };
        assert!(x.coincides(&p(0.0, 0.0, 2.0), 1e-9));
    }

    #[test]
    fn plane_missing_entirely() {
        let t = corner();
        let far = Plane::new(p(0.0, 0.0, 5.0), &Vector3::new(0.0, 0.0, 1.0), EPS).unwrap();
        assert_eq!(
            t.intersection_with_plane(&far, EPS),
            TetrahedronPlaneRelation::Disjoint
        );
    }

    // ── transform tests ──

    #[test]
    fn translation_moves_volume_intact() {
        let t = corner().translate(&Vector3::new(5.0, -1.0, 2.0));
        assert!((t.volume() - 4.0 / 3.0).abs() < 1e-9);
        assert!(t.contains(&p(5.0, -1.0, 2.0), EPS));
        assert!(!t.contains(&p(0.0, 0.0, 0.0), EPS));
    }
}
