use num_traits::{Signed, Zero};

use crate::error::Result;
use crate::number::{rat, Oom, Rat, RatSqrt, RoundingMode};

use super::{
    Envelope, Line, LineLineRelation, LinePlaneRelation, LineSegment, Plane, Point, Ray,
    RaySegmentRelation, SegmentPlaneRelation, SegmentSegmentRelation, Vector,
};

/// A triangle defined by three non-collinear points `(p, q, r)`.
///
/// The triangle derives its plane from the vertex order (right-hand
/// rule), and carries its three edges `pq`, `qr`, `rp`.
#[derive(Debug, Clone)]
pub struct Triangle {
    p: Point,
    q: Point,
    r: Point,
    plane: Plane,
    e_pq: LineSegment,
    e_qr: LineSegment,
    e_rp: LineSegment,
}

/// Intersection of a triangle with a linear entity (line, segment or
/// ray).
#[derive(Debug, Clone, PartialEq)]
pub enum TriangleLinearRelation {
    /// A chord (or edge piece) of positive length.
    Segment(LineSegment),
    /// A single shared point.
    Point(Point),
    /// No shared point.
    Disjoint,
}

/// Intersection of a triangle with a plane.
#[derive(Debug, Clone, PartialEq)]
pub enum TrianglePlaneRelation {
    /// The triangle lies in the plane.
    Triangle(Triangle),
    /// The plane cuts the triangle in a segment.
    Segment(LineSegment),
    /// The plane touches the triangle at a single point.
    Point(Point),
    /// No shared point.
    Disjoint,
}

/// Intersection of two triangles.
#[derive(Debug, Clone, PartialEq)]
pub enum TriangleTriangleRelation {
    /// The triangles coincide, or one lies inside the other.
    Triangle(Triangle),
    /// A coplanar overlap with more than three corners, as a convex
    /// ring of vertices in boundary order.
    Polygon(Vec<Point>),
    /// A shared segment.
    Segment(LineSegment),
    /// A single shared point.
    Point(Point),
    /// No shared point.
    Disjoint,
}

impl Triangle {
    /// Creates a triangle from three points.
    ///
    /// # Errors
    ///
    /// Returns an error if the points are collinear (or coincident).
    pub fn new(p: Point, q: Point, r: Point) -> Result<Self> {
        let plane = Plane::from_points(&p, &q, &r)?;
        let e_pq = LineSegment::new(p.clone(), q.clone())?;
        let e_qr = LineSegment::new(q.clone(), r.clone())?;
        let e_rp = LineSegment::new(r.clone(), p.clone())?;
        Ok(Self {
            p,
            q,
            r,
            plane,
            e_pq,
            e_qr,
            e_rp,
        })
    }

    /// Creates a triangle from integer coordinates.
    ///
    /// # Errors
    ///
    /// Returns an error if the points are collinear.
    pub fn from_ints(p: (i64, i64, i64), q: (i64, i64, i64), r: (i64, i64, i64)) -> Result<Self> {
        Self::new(
            Point::from_ints(p.0, p.1, p.2),
            Point::from_ints(q.0, q.1, q.2),
            Point::from_ints(r.0, r.1, r.2),
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

    /// The plane of the triangle (normal per vertex order).
    #[must_use]
    pub fn plane(&self) -> &Plane {
        &self.plane
    }

    /// The three edges `pq`, `qr`, `rp`.
    #[must_use]
    pub fn edges(&self) -> [&LineSegment; 3] {
        [&self.e_pq, &self.e_qr, &self.e_rp]
    }

    /// The centroid, the exact average of the vertices.
    #[must_use]
    pub fn centroid(&self) -> Point {
        let third = rat(1, 3);
        let sum = &(&self.p.position() + &self.q.position()) + &self.r.position();
        Point::from_vector(sum.scale(&third))
    }

    /// Squared area, `|e₁ × e₂|² / 4`. Exact.
    #[must_use]
    pub fn area_squared(&self) -> Rat {
        let cross = self.p.vector_to(&self.q).cross(&self.p.vector_to(&self.r));
        cross.magnitude_squared() * rat(1, 4)
    }

    /// Area, rounded at `oom` under `rm`.
    #[must_use]
    pub fn area(&self, oom: Oom, rm: RoundingMode) -> Rat {
        RatSqrt::non_negative(self.area_squared()).sqrt(oom, rm)
    }

    /// Perimeter: the three edge lengths, each rounded at `oom`, then
    /// summed. A sum of square roots leaves ℚ, so the rounding is per
    /// term; choose `oom` a digit or two finer than the tolerance
    /// needed on the sum.
    #[must_use]
    pub fn perimeter(&self, oom: Oom, rm: RoundingMode) -> Rat {
        self.edges()
            .into_iter()
            .map(|e| e.length(oom, rm))
            .fold(Rat::zero(), |acc, l| acc + l)
    }

    /// Whether the point lies in the triangle (boundary included):
    /// on the plane, and on the inner side of each edge. Exact.
    #[must_use]
    pub fn contains(&self, point: &Point) -> bool {
        if !self.plane.contains(point) {
            return false;
        }
        self.edge_sign(&self.p, &self.q, point) >= 0
            && self.edge_sign(&self.q, &self.r, point) >= 0
            && self.edge_sign(&self.r, &self.p, point) >= 0
    }

    /// Sign of the point against the edge `a → b` within the plane:
    /// positive on the interior side, zero on the edge's carrier line.
    ///
    /// `((b − a) × (x − a)) · n` is positive for interior points
    /// because the normal follows the vertex winding.
    fn edge_sign(&self, a: &Point, b: &Point, x: &Point) -> i8 {
        let s = a
            .vector_to(b)
            .cross(&a.vector_to(x))
            .dot(self.plane.normal());
        if s.is_zero() {
            0
        } else if s.is_positive() {
            1
        } else {
            -1
        }
    }

    /// Intersects the triangle with a line.
    #[must_use]
    pub fn intersection_with_line(&self, line: &Line) -> TriangleLinearRelation {
        match self.plane.intersection_with_line(line) {
            LinePlaneRelation::Parallel => TriangleLinearRelation::Disjoint,
            LinePlaneRelation::Point(x) => {
                if self.contains(&x) {
                    TriangleLinearRelation::Point(x)
                } else {
                    TriangleLinearRelation::Disjoint
                }
            }
            LinePlaneRelation::OnPlane => self.clip_coplanar_line(line),
        }
    }

    /// Clips a line lying in the triangle's plane against the edges.
    fn clip_coplanar_line(&self, line: &Line) -> TriangleLinearRelation {
        let mut hits: Vec<Point> = Vec::new();
        for edge in self.edges() {
            match line.intersection(edge.line()) {
                LineLineRelation::Coincident => {
                    return TriangleLinearRelation::Segment((*edge).clone());
                }
                LineLineRelation::Point(x) if edge.contains(&x) => push_unique(&mut hits, x),
                _ => {}
            }
        }
        linear_result(line, hits)
    }

    /// Intersects the triangle with a segment: the line clip narrowed
    /// to the segment's parameter range.
    #[must_use]
    pub fn intersection_with_segment(&self, segment: &LineSegment) -> TriangleLinearRelation {
        match self.intersection_with_line(segment.line()) {
            TriangleLinearRelation::Disjoint => TriangleLinearRelation::Disjoint,
            TriangleLinearRelation::Point(x) => {
                if segment.contains(&x) {
                    TriangleLinearRelation::Point(x)
                } else {
                    TriangleLinearRelation::Disjoint
                }
            }
            TriangleLinearRelation::Segment(chord) => match chord.intersection(segment) {
                SegmentSegmentRelation::Segment(s) => TriangleLinearRelation::Segment(s),
                SegmentSegmentRelation::Point(x) => TriangleLinearRelation::Point(x),
                _ => TriangleLinearRelation::Disjoint,
            },
        }
    }

    /// Intersects the triangle with a ray: the line clip narrowed to
    /// the ray's half-line.
    #[must_use]
    pub fn intersection_with_ray(&self, ray: &Ray) -> TriangleLinearRelation {
        match self.intersection_with_line(ray.line()) {
            TriangleLinearRelation::Disjoint => TriangleLinearRelation::Disjoint,
            TriangleLinearRelation::Point(x) => {
                if ray.contains(&x) {
                    TriangleLinearRelation::Point(x)
                } else {
                    TriangleLinearRelation::Disjoint
                }
            }
            TriangleLinearRelation::Segment(chord) => {
                match ray.intersection_with_segment(&chord) {
                    RaySegmentRelation::Segment(s) => TriangleLinearRelation::Segment(s),
                    RaySegmentRelation::Point(x) => TriangleLinearRelation::Point(x),
                    RaySegmentRelation::Disjoint => TriangleLinearRelation::Disjoint,
                }
            }
        }
    }

    /// Intersects the triangle with a plane by clipping each edge.
    #[must_use]
    pub fn intersection_with_plane(&self, plane: &Plane) -> TrianglePlaneRelation {
        if self.plane == *plane {
            return TrianglePlaneRelation::Triangle(self.clone());
        }
        let mut hits: Vec<Point> = Vec::new();
        for edge in self.edges() {
            match plane.intersection_with_segment(edge) {
                SegmentPlaneRelation::OnPlane(e) => return TrianglePlaneRelation::Segment(e),
                SegmentPlaneRelation::Point(x) => push_unique(&mut hits, x),
                SegmentPlaneRelation::Disjoint => {}
            }
        }
        match hits.len() {
            0 => TrianglePlaneRelation::Disjoint,
            1 => TrianglePlaneRelation::Point(hits.swap_remove(0)),
            _ => {
                let b = hits.swap_remove(1);
                let a = hits.swap_remove(0);
                match LineSegment::new(a, b) {
                    Ok(s) => TrianglePlaneRelation::Segment(s),
                    // Unreachable: de-duplicated points are distinct.
                    Err(_) => TrianglePlaneRelation::Disjoint,
                }
            }
        }
    }

    /// Intersects two triangles.
    ///
    /// Non-coplanar triangles are handled by clipping `self` against
    /// the other's plane, then narrowing the resulting chord into the
    /// other triangle. Coplanar triangles produce the convex overlap:
    /// a vertex, a segment, a triangle, or a convex polygon.
    #[must_use]
    pub fn intersection_with_triangle(&self, other: &Self) -> TriangleTriangleRelation {
        if self.plane == other.plane {
            return self.coplanar_intersection(other);
        }
        match self.intersection_with_plane(&other.plane) {
            TrianglePlaneRelation::Disjoint => TriangleTriangleRelation::Disjoint,
            TrianglePlaneRelation::Point(x) => {
                if other.contains(&x) {
                    TriangleTriangleRelation::Point(x)
                } else {
                    TriangleTriangleRelation::Disjoint
                }
            }
            TrianglePlaneRelation::Segment(chord) => {
                match other.intersection_with_segment(&chord) {
                    TriangleLinearRelation::Segment(s) => TriangleTriangleRelation::Segment(s),
                    TriangleLinearRelation::Point(x) => TriangleTriangleRelation::Point(x),
                    TriangleLinearRelation::Disjoint => TriangleTriangleRelation::Disjoint,
                }
            }
            // Unreachable: coplanarity was ruled out above.
            TrianglePlaneRelation::Triangle(t) => TriangleTriangleRelation::Triangle(t),
        }
    }

    fn coplanar_intersection(&self, other: &Self) -> TriangleTriangleRelation {
        let mut corners: Vec<Point> = Vec::new();
        for v in [&self.p, &self.q, &self.r] {
            if other.contains(v) {
                push_unique(&mut corners, v.clone());
            }
        }
        for v in [&other.p, &other.q, &other.r] {
            if self.contains(v) {
                push_unique(&mut corners, v.clone());
            }
        }
        for e1 in self.edges() {
            for e2 in other.edges() {
                match e1.intersection(e2) {
                    SegmentSegmentRelation::Point(x) => push_unique(&mut corners, x),
                    SegmentSegmentRelation::Segment(s) => {
                        push_unique(&mut corners, s.p().clone());
                        push_unique(&mut corners, s.q().clone());
                    }
                    _ => {}
                }
            }
        }

        match corners.len() {
            0 => TriangleTriangleRelation::Disjoint,
            1 => TriangleTriangleRelation::Point(corners.swap_remove(0)),
            2 => {
                let b = corners.swap_remove(1);
                let a = corners.swap_remove(0);
                match LineSegment::new(a, b) {
                    Ok(s) => TriangleTriangleRelation::Segment(s),
                    // Unreachable: de-duplicated points are distinct.
                    Err(_) => TriangleTriangleRelation::Disjoint,
                }
            }
            _ => {
                let hull = convex_hull_in_plane(corners, self.plane.normal());
                match hull.len() {
                    2 => {
                        let [a, b] = [hull[0].clone(), hull[1].clone()];
                        match LineSegment::new(a, b) {
                            Ok(s) => TriangleTriangleRelation::Segment(s),
                            Err(_) => TriangleTriangleRelation::Disjoint,
                        }
                    }
                    3 => {
                        let [a, b, c] = [hull[0].clone(), hull[1].clone(), hull[2].clone()];
                        match Self::new(a, b, c) {
                            Ok(t) => TriangleTriangleRelation::Triangle(t),
                            // Unreachable: hull corners make strict turns.
                            Err(_) => TriangleTriangleRelation::Disjoint,
                        }
                    }
                    _ => TriangleTriangleRelation::Polygon(hull),
                }
            }
        }
    }

    /// Squared distance from a point to the triangle. Exact.
    ///
    /// The plane projection decides the nearest feature: a foot inside
    /// the triangle means the plane distance, otherwise the nearest
    /// edge.
    #[must_use]
    pub fn distance_squared(&self, point: &Point) -> Rat {
        let foot = self.project_to_plane(point);
        if self.contains(&foot) {
            return self.plane.distance_squared(point);
        }
        self.edges()
            .into_iter()
            .map(|e| e.distance_squared(point))
            .min()
            .unwrap_or_else(Rat::zero)
    }

    /// Distance from a point to the triangle, rounded at `oom`.
    #[must_use]
    pub fn distance(&self, point: &Point, oom: Oom, rm: RoundingMode) -> Rat {
        RatSqrt::non_negative(self.distance_squared(point)).sqrt(oom, rm)
    }

    fn project_to_plane(&self, point: &Point) -> Point {
        let n = self.plane.normal();
        let t = self.plane.signed_component(point) / n.magnitude_squared();
        point.translate(&n.scale(&-t))
    }

    /// The axis-aligned bounding box over the vertices.
    #[must_use]
    pub fn envelope(&self) -> Envelope {
        Envelope::from_points([&self.p, &self.q, &self.r])
    }

    /// Returns the triangle translated by `v`.
    #[must_use]
    pub fn translate(&self, v: &Vector) -> Self {
        Self {
            p: self.p.translate(v),
            q: self.q.translate(v),
            r: self.r.translate(v),
            plane: self.plane.translate(v),
            e_pq: self.e_pq.translate(v),
            e_qr: self.e_qr.translate(v),
            e_rp: self.e_rp.translate(v),
        }
    }

    /// Rotates the triangle about an axis (see [`Point::rotate`]).
    ///
    /// # Errors
    ///
    /// Returns an error if the supplied `cos θ`/`sin θ` collapse the
    /// triangle (only possible for a degenerate pair).
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
        )
    }
}

impl PartialEq for Triangle {
    /// Geometric equality: the same three vertices, in any order.
    fn eq(&self, other: &Self) -> bool {
        let mine = [&self.p, &self.q, &self.r];
        let theirs = [&other.p, &other.q, &other.r];
        theirs
            .iter()
            .all(|t| mine.iter().any(|m| m.coincides(t)))
            && mine
                .iter()
                .all(|m| theirs.iter().any(|t| t.coincides(m)))
    }
}

impl Eq for Triangle {}

pub(crate) fn push_unique(points: &mut Vec<Point>, candidate: Point) {
    if !points.iter().any(|p| p.coincides(&candidate)) {
        points.push(candidate);
    }
}

/// Turns in-plane line hits into the tagged result, ordering a chord's
/// endpoints by line parameter.
fn linear_result(line: &Line, mut hits: Vec<Point>) -> TriangleLinearRelation {
    match hits.len() {
        0 => TriangleLinearRelation::Disjoint,
        1 => TriangleLinearRelation::Point(hits.swap_remove(0)),
        _ => {
            let mut lo = hits.swap_remove(0);
            let mut lo_t = line.parameter_of(&lo);
            let mut hi = lo.clone();
            let mut hi_t = lo_t.clone();
            for x in hits {
                let t = line.parameter_of(&x);
                if t < lo_t {
                    lo = x.clone();
                    lo_t = t.clone();
                }
                if t > hi_t {
                    hi = x;
                    hi_t = t;
                }
            }
            match LineSegment::new(lo, hi) {
                Ok(s) => TriangleLinearRelation::Segment(s),
                // Unreachable: de-duplicated points are distinct.
                Err(_) => TriangleLinearRelation::Disjoint,
            }
        }
    }
}

/// Orders coplanar points into a convex ring and drops interior points
/// (monotone chain over the dominant axis projection, exact sign tests
/// throughout).
pub(crate) fn convex_hull_in_plane(points: Vec<Point>, normal: &Vector) -> Vec<Point> {
    let (u_of, v_of): (fn(&Vector) -> &Rat, fn(&Vector) -> &Rat) = {
        let (ax, ay, az) = (
            normal.dx().abs(),
            normal.dy().abs(),
            normal.dz().abs(),
        );
        if az >= ax && az >= ay {
            (Vector::dx, Vector::dy)
        } else if ax >= ay {
            (Vector::dy, Vector::dz)
        } else {
            (Vector::dz, Vector::dx)
        }
    };

    let mut keyed: Vec<(Rat, Rat, Point)> = points
        .into_iter()
        .map(|p| {
            let pos = p.position();
            (u_of(&pos).clone(), v_of(&pos).clone(), p)
        })
        .collect();
    keyed.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)));

    let turn = |o: &(Rat, Rat, Point), a: &(Rat, Rat, Point), b: &(Rat, Rat, Point)| -> Rat {
        (&a.0 - &o.0) * (&b.1 - &o.1) - (&a.1 - &o.1) * (&b.0 - &o.0)
    };

    let mut lower: Vec<(Rat, Rat, Point)> = Vec::new();
    for p in &keyed {
        while lower.len() >= 2
            && !turn(&lower[lower.len() - 2], &lower[lower.len() - 1], p).is_positive()
        {
            lower.pop();
        }
        lower.push(p.clone());
    }
    let mut upper: Vec<(Rat, Rat, Point)> = Vec::new();
    for p in keyed.iter().rev() {
        while upper.len() >= 2
            && !turn(&upper[upper.len() - 2], &upper[upper.len() - 1], p).is_positive()
        {
            upper.pop();
        }
        upper.push(p.clone());
    }

    lower.pop();
    upper.pop();
    lower.extend(upper);
    lower.into_iter().map(|(_, _, p)| p).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use num_traits::Zero;

    use super::*;
    use crate::number::rat_int;

    fn p(x: i64, y: i64, z: i64) -> Point {
        Point::from_ints(x, y, z)
    }

    fn tri(a: (i64, i64, i64), b: (i64, i64, i64), c: (i64, i64, i64)) -> Triangle {
        Triangle::from_ints(a, b, c).unwrap()
    }

    fn seg(a: (i64, i64, i64), b: (i64, i64, i64)) -> LineSegment {
        LineSegment::from_ints(a, b).unwrap()
    }

    // ── construction tests ──

    #[test]
    fn collinear_vertices_rejected() {
        assert!(Triangle::from_ints((0, 0, 0), (1, 0, 0), (2, 0, 0)).is_err());
    }

    #[test]
    fn equality_ignores_vertex_order() {
        let a = tri((0, 0, 0), (1, 0, 0), (0, 1, 0));
        let b = tri((0, 1, 0), (0, 0, 0), (1, 0, 0));
        assert_eq!(a, b);
        assert_ne!(a, tri((0, 0, 0), (2, 0, 0), (0, 1, 0)));
    }

    // ── containment tests ──

    #[test]
    fn contains_interior_edges_and_vertices() {
        let t = tri((0, 0, 0), (4, 0, 0), (0, 4, 0));
        assert!(t.contains(&p(1, 1, 0)));
        assert!(t.contains(&p(2, 0, 0))); // on an edge
        assert!(t.contains(&p(0, 4, 0))); // vertex
        assert!(t.contains(&p(2, 2, 0))); // on the hypotenuse
        assert!(!t.contains(&p(3, 3, 0)));
        assert!(!t.contains(&p(1, 1, 1))); // off the plane
    }

    #[test]
    fn containment_implies_zero_distance() {
        let t = tri((0, 0, 0), (4, 0, 0), (0, 4, 0));
        assert!(t.distance_squared(&p(1, 1, 0)).is_zero());
    }

    // ── measure tests ──

    #[test]
    fn centroid_area_perimeter() {
        let t = tri((0, 0, 0), (3, 0, 0), (0, 3, 0));
        assert!(t.centroid().coincides(&p(1, 1, 0)));
        // Area 9/2, squared 81/4.
        assert_eq!(t.area_squared(), rat(81, 4));
        assert_eq!(t.area(-10, RoundingMode::HalfUp), rat(9, 2));
        // Perimeter 3 + 3 + 3√2 = 10.2426…
        let per = t.perimeter(-4, RoundingMode::HalfUp);
        assert_eq!(per, rat_int(6) + rat(42_426, 10_000));
    }

    // ── line / segment / ray intersection tests ──

    #[test]
    fn piercing_line_hits_interior_point() {
        let t = tri((0, 0, 0), (4, 0, 0), (0, 4, 0));
        let l = Line::from_points(&p(1, 1, -1), &p(1, 1, 1)).unwrap();
        assert_eq!(
            t.intersection_with_line(&l),
            TriangleLinearRelation::Point(p(1, 1, 0))
        );
    }

    #[test]
    fn coplanar_line_cuts_a_chord() {
        let t = tri((0, 0, 0), (4, 0, 0), (0, 4, 0));
        let l = Line::from_points(&p(-1, 1, 0), &p(5, 1, 0)).unwrap();
        let TriangleLinearRelation::Segment(s) = t.intersection_with_line(&l) else {
            panic!("expected a chord");
        };
        assert!(s.equals_ignore_direction(&seg((0, 1, 0), (3, 1, 0))));
    }

    #[test]
    fn coplanar_line_through_vertex_only() {
        let t = tri((0, 0, 0), (4, 0, 0), (0, 4, 0));
        let l = Line::from_points(&p(0, 4, 0), &p(1, 5, 0)).unwrap();
        assert_eq!(
            t.intersection_with_line(&l),
            TriangleLinearRelation::Point(p(0, 4, 0))
        );
    }

    #[test]
    fn coplanar_line_on_an_edge_returns_it() {
        let t = tri((0, 0, 0), (4, 0, 0), (0, 4, 0));
        let l = Line::from_points(&p(-1, 5, 0), &p(5, -1, 0)).unwrap();
        let TriangleLinearRelation::Segment(s) = t.intersection_with_line(&l) else {
            panic!("expected the hypotenuse");
        };
        assert!(s.equals_ignore_direction(&seg((4, 0, 0), (0, 4, 0))));
    }

    #[test]
    fn segment_clipped_into_triangle() {
        let t = tri((0, 0, 0), (4, 0, 0), (0, 4, 0));
        let s = seg((1, 1, 0), (9, 1, 0));
        let TriangleLinearRelation::Segment(out) = t.intersection_with_segment(&s) else {
            panic!("expected a segment");
        };
        assert!(out.equals_ignore_direction(&seg((1, 1, 0), (3, 1, 0))));
    }

    #[test]
    fn ray_from_inside_exits_once() {
        let t = tri((0, 0, 0), (4, 0, 0), (0, 4, 0));
        let r = Ray::from_points(&p(1, 1, 0), &p(2, 1, 0)).unwrap();
        let TriangleLinearRelation::Segment(out) = t.intersection_with_ray(&r) else {
            panic!("expected a segment");
        };
        assert!(out.equals_ignore_direction(&seg((1, 1, 0), (3, 1, 0))));
    }

    #[test]
    fn ray_pointing_away_misses() {
        let t = tri((0, 0, 0), (4, 0, 0), (0, 4, 0));
        let r = Ray::from_points(&p(0, 0, 1), &p(0, 0, 2)).unwrap();
        assert_eq!(t.intersection_with_ray(&r), TriangleLinearRelation::Disjoint);
    }

    // ── plane intersection tests ──

    #[test]
    fn plane_cuts_triangle_in_segment() {
        // The unit right triangle against the plane x = 0.
        let t = tri((0, 0, 0), (1, 0, 0), (0, 1, 0));
        let res = t.intersection_with_plane(&Plane::x0());
        let TrianglePlaneRelation::Segment(s) = res else {
            panic!("expected a segment");
        };
        assert!(s.equals_ignore_direction(&seg((0, 0, 0), (0, 1, 0))));
    }

    #[test]
    fn plane_through_vertex_touches_at_point() {
        let t = tri((0, 0, 0), (1, 1, 0), (1, -1, 0));
        assert_eq!(
            t.intersection_with_plane(&Plane::x0()),
            TrianglePlaneRelation::Point(p(0, 0, 0))
        );
    }

    #[test]
    fn own_plane_returns_triangle() {
        let t = tri((0, 0, 0), (1, 0, 0), (0, 1, 0));
        let TrianglePlaneRelation::Triangle(back) = t.intersection_with_plane(&Plane::z0())
        else {
            panic!("expected the triangle");
        };
        assert_eq!(back, t);
    }

    #[test]
    fn parallel_plane_misses() {
        let t = tri((0, 0, 0), (1, 0, 0), (0, 1, 0));
        let above = Plane::new(p(0, 0, 3), Vector::from_ints(0, 0, 1)).unwrap();
        assert_eq!(
            t.intersection_with_plane(&above),
            TrianglePlaneRelation::Disjoint
        );
    }

    // ── triangle/triangle intersection tests ──

    #[test]
    fn crossing_triangles_share_a_segment() {
        // One triangle in z = 0, one perpendicular through its middle.
        let a = tri((0, 0, 0), (4, 0, 0), (0, 4, 0));
        let b = tri((1, 1, -1), (1, 1, 1), (3, 1, 1));
        let TriangleTriangleRelation::Segment(s) = a.intersection_with_triangle(&b) else {
            panic!("expected a segment");
        };
        // b meets z = 0 along y = 1 between x = 1 and x = 2.
        assert!(s.equals_ignore_direction(&seg((1, 1, 0), (2, 1, 0))));
        // Symmetric call agrees.
        let TriangleTriangleRelation::Segment(t) = b.intersection_with_triangle(&a) else {
            panic!("expected a segment");
        };
        assert!(s.equals_ignore_direction(&t));
    }

    #[test]
    fn coplanar_nested_triangle_is_returned_whole() {
        let outer = tri((0, 0, 0), (8, 0, 0), (0, 8, 0));
        let inner = tri((1, 1, 0), (3, 1, 0), (1, 3, 0));
        let TriangleTriangleRelation::Triangle(t) = outer.intersection_with_triangle(&inner)
        else {
            panic!("expected a triangle");
        };
        assert_eq!(t, inner);
    }

    #[test]
    fn coplanar_overlap_can_be_a_polygon() {
        // The overlap is the quadrilateral (0,1) (2,1) (2,2) (0,4).
        let a = tri((0, 0, 0), (4, 0, 0), (0, 4, 0));
        let b = tri((-5, 1, 0), (2, 1, 0), (2, 8, 0));
        let TriangleTriangleRelation::Polygon(hull) = a.intersection_with_triangle(&b) else {
            panic!("expected a polygon");
        };
        assert_eq!(hull.len(), 4);
        for corner in [p(0, 1, 0), p(2, 1, 0), p(2, 2, 0), p(0, 4, 0)] {
            assert!(hull.iter().any(|h| h.coincides(&corner)));
        }
    }

    #[test]
    fn far_apart_triangles_disjoint() {
        let a = tri((0, 0, 0), (1, 0, 0), (0, 1, 0));
        let b = tri((10, 0, 0), (11, 0, 0), (10, 1, 0));
        assert_eq!(
            a.intersection_with_triangle(&b),
            TriangleTriangleRelation::Disjoint
        );
    }

    // ── distance tests ──

    #[test]
    fn distance_from_point_above_interior() {
        let t = tri((0, 0, 0), (4, 0, 0), (0, 4, 0));
        assert_eq!(t.distance_squared(&p(1, 1, 3)), rat_int(9));
        assert_eq!(t.distance(&p(1, 1, 3), -10, RoundingMode::HalfUp), rat_int(3));
    }

    #[test]
    fn distance_from_point_beyond_edge() {
        let t = tri((0, 0, 0), (4, 0, 0), (0, 4, 0));
        assert_eq!(t.distance_squared(&p(-3, 0, 0)), rat_int(9));
    }
}
