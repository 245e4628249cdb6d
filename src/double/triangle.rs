use crate::error::Result;

use super::{
    Envelope, Line, LineLineRelation, LinePlaneRelation, LineSegment, Plane, Point, Ray,
    RaySegmentRelation, SegmentPlaneRelation, SegmentSegmentRelation, Vector3,
};

/// A triangle defined by three non-collinear points `(p, q, r)`.
///
/// The triangle derives its plane from the vertex order (right-hand
/// rule), and carries its three edges `pq`, `qr`, `rp`.
#[derive(Debug, Clone, Copy, PartialEq)]
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
    /// Returns an error if the points are collinear (or coincident)
    /// within `epsilon`.
    pub fn new(p: Point, q: Point, r: Point, epsilon: f64) -> Result<Self> {
        let plane = Plane::from_points(&p, &q, &r, epsilon)?;
        let e_pq = LineSegment::new(p, q, epsilon)?;
        let e_qr = LineSegment::new(q, r, epsilon)?;
        let e_rp = LineSegment::new(r, p, epsilon)?;
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

    /// Creates a triangle from coordinate triples.
    ///
    /// # Errors
    ///
    /// Returns an error if the points are collinear within `epsilon`.
    pub fn from_coords(
        p: (f64, f64, f64),
        q: (f64, f64, f64),
        r: (f64, f64, f64),
        epsilon: f64,
    ) -> Result<Self> {
        Self::new(
            Point::from_coords(p.0, p.1, p.2),
            Point::from_coords(q.0, q.1, q.2),
            Point::from_coords(r.0, r.1, r.2),
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

    /// The centroid, the average of the vertices.
    #[must_use]
    pub fn centroid(&self) -> Point {
        let sum = self.p.position().coords + self.q.position().coords + self.r.position().coords;
        Point::from_vector(sum / 3.0)
    }

    /// Area, `|e₁ × e₂| / 2`.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.p
            .vector_to(&self.q)
            .cross(&self.p.vector_to(&self.r))
            .norm()
            / 2.0
    }

    /// Perimeter, the sum of the edge lengths.
    #[must_use]
    pub fn perimeter(&self) -> f64 {
        self.edges().into_iter().map(LineSegment::length).sum()
    }

    /// Whether the point lies in the triangle (boundary included
    /// within `epsilon`): on the plane, and on the inner side of each
    /// edge.
    #[must_use]
    pub fn contains(&self, point: &Point, epsilon: f64) -> bool {
        if !self.plane.contains(point, epsilon) {
            return false;
        }
        self.edge_sign(&self.p, &self.q, point, epsilon) >= 0
            && self.edge_sign(&self.q, &self.r, point, epsilon) >= 0
            && self.edge_sign(&self.r, &self.p, point, epsilon) >= 0
    }

    /// Sign of the point against the edge `a → b` within the plane:
    /// positive on the interior side, zero within `epsilon` of the
    /// edge's carrier line.
    ///
    /// `((b − a) × (x − a)) · n` is positive for interior points
    /// because the normal follows the vertex winding.
    fn edge_sign(&self, a: &Point, b: &Point, x: &Point, epsilon: f64) -> i8 {
        let s = a
            .vector_to(b)
            .cross(&a.vector_to(x))
            .dot(self.plane.normal());
        if s.abs() <= epsilon {
            0
        } else if s > 0.0 {
            1
        } else {
            -1
        }
    }

    /// Intersects the triangle with a line.
    #[must_use]
    pub fn intersection_with_line(&self, line: &Line, epsilon: f64) -> TriangleLinearRelation {
        match self.plane.intersection_with_line(line, epsilon) {
            LinePlaneRelation::Parallel => TriangleLinearRelation::Disjoint,
            LinePlaneRelation::Point(x) => {
                if self.contains(&x, epsilon) {
                    TriangleLinearRelation::Point(x)
                } else {
                    TriangleLinearRelation::Disjoint
                }
            }
            LinePlaneRelation::OnPlane => self.clip_coplanar_line(line, epsilon),
        }
    }

    /// Clips a line lying in the triangle's plane against the edges.
    fn clip_coplanar_line(&self, line: &Line, epsilon: f64) -> TriangleLinearRelation {
        let mut hits: Vec<Point> = Vec::new();
        for edge in self.edges() {
            match line.intersection(edge.line(), epsilon) {
                LineLineRelation::Coincident => {
                    return TriangleLinearRelation::Segment(*edge);
                }
                LineLineRelation::Point(x) if edge.contains(&x, epsilon) => {
                    push_unique(&mut hits, x, epsilon);
                }
                _ => {}
            }
        }
        linear_result(line, hits, epsilon)
    }

    /// Intersects the triangle with a segment: the line clip narrowed
    /// to the segment's parameter range.
    #[must_use]
    pub fn intersection_with_segment(
        &self,
        segment: &LineSegment,
        epsilon: f64,
    ) -> TriangleLinearRelation {
        match self.intersection_with_line(segment.line(), epsilon) {
            TriangleLinearRelation::Disjoint => TriangleLinearRelation::Disjoint,
            TriangleLinearRelation::Point(x) => {
                if segment.contains(&x, epsilon) {
                    TriangleLinearRelation::Point(x)
                } else {
                    TriangleLinearRelation::Disjoint
                }
            }
            TriangleLinearRelation::Segment(chord) => match chord.intersection(segment, epsilon) {
                SegmentSegmentRelation::Segment(s) => TriangleLinearRelation::Segment(s),
                SegmentSegmentRelation::Point(x) => TriangleLinearRelation::Point(x),
                _ => TriangleLinearRelation::Disjoint,
            },
        }
    }

    /// Intersects the triangle with a ray: the line clip narrowed to
    /// the ray's half-line.
    #[must_use]
    pub fn intersection_with_ray(&self, ray: &Ray, epsilon: f64) -> TriangleLinearRelation {
        match self.intersection_with_line(ray.line(), epsilon) {
            TriangleLinearRelation::Disjoint => TriangleLinearRelation::Disjoint,
            TriangleLinearRelation::Point(x) => {
                if ray.contains(&x, epsilon) {
                    TriangleLinearRelation::Point(x)
                } else {
                    TriangleLinearRelation::Disjoint
                }
            }
            TriangleLinearRelation::Segment(chord) => {
                match ray.intersection_with_segment(&chord, epsilon) {
                    RaySegmentRelation::Segment(s) => TriangleLinearRelation::Segment(s),
                    RaySegmentRelation::Point(x) => TriangleLinearRelation::Point(x),
                    RaySegmentRelation::Disjoint => TriangleLinearRelation::Disjoint,
                }
            }
        }
    }

    /// Intersects the triangle with a plane by clipping each edge.
    #[must_use]
    pub fn intersection_with_plane(&self, plane: &Plane, epsilon: f64) -> TrianglePlaneRelation {
        if self.plane.coincides(plane, epsilon) {
            return TrianglePlaneRelation::Triangle(*self);
        }
        let mut hits: Vec<Point> = Vec::new();
        for edge in self.edges() {
            match plane.intersection_with_segment(edge, epsilon) {
                SegmentPlaneRelation::OnPlane(e) => return TrianglePlaneRelation::Segment(e),
                SegmentPlaneRelation::Point(x) => push_unique(&mut hits, x, epsilon),
                SegmentPlaneRelation::Disjoint => {}
            }
        }
        match hits.len() {
            0 => TrianglePlaneRelation::Disjoint,
            1 => TrianglePlaneRelation::Point(hits.swap_remove(0)),
            _ => {
                let b = hits.swap_remove(1);
                let a = hits.swap_remove(0);
                match LineSegment::new(a, b, epsilon) {
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
    pub fn intersection_with_triangle(
        &self,
        other: &Self,
        epsilon: f64,
    ) -> TriangleTriangleRelation {
        if self.plane.coincides(&other.plane, epsilon) {
            return self.coplanar_intersection(other, epsilon);
        }
        match self.intersection_with_plane(&other.plane, epsilon) {
            TrianglePlaneRelation::Disjoint => TriangleTriangleRelation::Disjoint,
            TrianglePlaneRelation::Point(x) => {
                if other.contains(&x, epsilon) {
                    TriangleTriangleRelation::Point(x)
                } else {
                    TriangleTriangleRelation::Disjoint
                }
            }
            TrianglePlaneRelation::Segment(chord) => {
                match other.intersection_with_segment(&chord, epsilon) {
                    TriangleLinearRelation::Segment(s) => TriangleTriangleRelation::Segment(s),
                    TriangleLinearRelation::Point(x) => TriangleTriangleRelation::Point(x),
                    TriangleLinearRelation::Disjoint => TriangleTriangleRelation::Disjoint,
                }
            }
            // Unreachable: coplanarity was ruled out above.
            TrianglePlaneRelation::Triangle(t) => TriangleTriangleRelation::Triangle(t),
        }
    }

    fn coplanar_intersection(&self, other: &Self, epsilon: f64) -> TriangleTriangleRelation {
        let mut corners: Vec<Point> = Vec::new();
        for v in [&self.p, &self.q, &self.r] {
            if other.contains(v, epsilon) {
                push_unique(&mut corners, *v, epsilon);
            }
        }
        for v in [&other.p, &other.q, &other.r] {
            if self.contains(v, epsilon) {
                push_unique(&mut corners, *v, epsilon);
            }
        }
        for e1 in self.edges() {
            for e2 in other.edges() {
                match e1.intersection(e2, epsilon) {
                    SegmentSegmentRelation::Point(x) => push_unique(&mut corners, x, epsilon),
                    SegmentSegmentRelation::Segment(s) => {
                        push_unique(&mut corners, *s.p(), epsilon);
                        push_unique(&mut corners, *s.q(), epsilon);
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
                match LineSegment::new(a, b, epsilon) {
                    Ok(s) => TriangleTriangleRelation::Segment(s),
                    // Unreachable: de-duplicated points are distinct.
                    Err(_) => TriangleTriangleRelation::Disjoint,
                }
            }
            _ => {
                let hull = convex_hull_in_plane(corners, self.plane.normal());
                match hull.len() {
                    2 => match LineSegment::new(hull[0], hull[1], epsilon) {
                        Ok(s) => TriangleTriangleRelation::Segment(s),
                        Err(_) => TriangleTriangleRelation::Disjoint,
                    },
                    3 => match Self::new(hull[0], hull[1], hull[2], epsilon) {
                        Ok(t) => TriangleTriangleRelation::Triangle(t),
                        // Unreachable: hull corners make strict turns.
                        Err(_) => TriangleTriangleRelation::Disjoint,
                    },
                    _ => TriangleTriangleRelation::Polygon(hull),
                }
            }
        }
    }

    /// Squared distance from a point to the triangle.
    ///
    /// The plane projection decides the nearest feature: a foot inside
    /// the triangle means the plane distance, otherwise the nearest
    /// edge.
    #[must_use]
    pub fn distance_squared(&self, point: &Point, epsilon: f64) -> f64 {
        let foot = self.project_to_plane(point);
        if self.contains(&foot, epsilon) {
            return self.plane.distance_squared(point);
        }
        self.edges()
            .into_iter()
            .map(|e| e.distance_squared(point))
            .fold(f64::INFINITY, f64::min)
    }

    /// Distance from a point to the triangle.
    #[must_use]
    pub fn distance(&self, point: &Point, epsilon: f64) -> f64 {
        self.distance_squared(point, epsilon).sqrt()
    }

    fn project_to_plane(&self, point: &Point) -> Point {
        // The plane's normal is unit length.
        let t = self.plane.signed_component(point);
        point.translate(&(self.plane.normal() * -t))
    }

    /// The axis-aligned bounding box over the vertices.
    #[must_use]
    pub fn envelope(&self) -> Envelope {
        Envelope::from_points([&self.p, &self.q, &self.r])
    }

    /// Returns the triangle translated by `v`.
    #[must_use]
    pub fn translate(&self, v: &Vector3) -> Self {
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
            epsilon,
        )
    }

    /// Geometric equality within `epsilon`: the same three vertices,
    /// in any order.
    #[must_use]
    pub fn coincides(&self, other: &Self, epsilon: f64) -> bool {
        let mine = [&self.p, &self.q, &self.r];
        let theirs = [&other.p, &other.q, &other.r];
        theirs
            .iter()
            .all(|t| mine.iter().any(|m| m.coincides(t, epsilon)))
            && mine
                .iter()
                .all(|m| theirs.iter().any(|t| t.coincides(m, epsilon)))
    }
}

pub(crate) fn push_unique(points: &mut Vec<Point>, candidate: Point, epsilon: f64) {
    if !points.iter().any(|p| p.coincides(&candidate, epsilon)) {
        points.push(candidate);
    }
}

/// Turns in-plane line hits into the tagged result, ordering a chord's
/// endpoints by line parameter.
fn linear_result(line: &Line, mut hits: Vec<Point>, epsilon: f64) -> TriangleLinearRelation {
    match hits.len() {
        0 => TriangleLinearRelation::Disjoint,
        1 => TriangleLinearRelation::Point(hits.swap_remove(0)),
        _ => {
            let mut lo = hits.swap_remove(0);
            let mut lo_t = line.parameter_of(&lo);
            let mut hi = lo;
            let mut hi_t = lo_t;
            for x in hits {
                let t = line.parameter_of(&x);
                if t < lo_t {
                    lo = x;
                    lo_t = t;
                }
                if t > hi_t {
                    hi = x;
                    hi_t = t;
                }
            }
            match LineSegment::new(lo, hi, epsilon) {
                Ok(s) => TriangleLinearRelation::Segment(s),
                // Unreachable: de-duplicated points are distinct.
                Err(_) => TriangleLinearRelation::Disjoint,
            }
        }
    }
}

/// Orders coplanar points into a convex ring and drops interior points
/// (monotone chain over the dominant axis projection).
pub(crate) fn convex_hull_in_plane(points: Vec<Point>, normal: &Vector3) -> Vec<Point> {
    let (u, v) = {
        let (ax, ay, az) = (normal.x.abs(), normal.y.abs(), normal.z.abs());
        if az >= ax && az >= ay {
            (0, 1)
        } else if ax >= ay {
            (1, 2)
        } else {
            (2, 0)
        }
    };

    let mut keyed: Vec<(f64, f64, Point)> = points
        .into_iter()
        .map(|p| {
            let pos = p.position();
            (pos.coords[u], pos.coords[v], p)
        })
        .collect();
    keyed.sort_by(|a, b| a.0.total_cmp(&b.0).then_with(|| a.1.total_cmp(&b.1)));

    let turn = |o: &(f64, f64, Point), a: &(f64, f64, Point), b: &(f64, f64, Point)| -> f64 {
        (a.0 - o.0) * (b.1 - o.1) - (a.1 - o.1) * (b.0 - o.0)
    };

    let mut lower: Vec<(f64, f64, Point)> = Vec::new();
    for p in &keyed {
        while lower.len() >= 2 && turn(&lower[lower.len() - 2], &lower[lower.len() - 1], p) <= 0.0
        {
            lower.pop();
        }
        lower.push(*p);
    }
    let mut upper: Vec<(f64, f64, Point)> = Vec::new();
    for p in keyed.iter().rev() {
        while upper.len() >= 2 && turn(&upper[upper.len() - 2], &upper[upper.len() - 1], p) <= 0.0
        {
            upper.pop();
        }
        upper.push(*p);
    }

    lower.pop();
    upper.pop();
    lower.extend(upper);
    lower.into_iter().map(|(_, _, p)| p).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    const EPS: f64 = 1e-10;

    fn p(x: f64, y: f64, z: f64) -> Point {
        Point::from_coords(x, y, z)
    }

    fn tri(a: (f64, f64, f64), b: (f64, f64, f64), c: (f64, f64, f64)) -> Triangle {
        Triangle::from_coords(a, b, c, EPS).unwrap()
    }

    fn seg(a: (f64, f64, f64), b: (f64, f64, f64)) -> LineSegment {
        LineSegment::from_coords(a, b, EPS).unwrap()
    }

    // ── construction tests ──

    #[test]
    fn collinear_vertices_rejected() {
        assert!(
            Triangle::from_coords((0.0, 0.0, 0.0), (1.0, 0.0, 0.0), (2.0, 0.0, 0.0), EPS).is_err()
        );
    }

    #[test]
    fn coincidence_ignores_vertex_order() {
        let a = tri((0.0, 0.0, 0.0), (1.0, 0.0, 0.0), (0.0, 1.0, 0.0));
        let b = tri((0.0, 1.0, 0.0), (0.0, 0.0, 0.0), (1.0, 0.0, 0.0));
        assert!(a.coincides(&b, EPS));
        assert!(!a.coincides(&tri((0.0, 0.0, 0.0), (2.0, 0.0, 0.0), (0.0, 1.0, 0.0)), EPS));
    }

    // ── containment and measure tests ──

    #[test]
    fn contains_interior_edges_and_vertices() {
        let t = tri((0.0, 0.0, 0.0), (4.0, 0.0, 0.0), (0.0, 4.0, 0.0));
        assert!(t.contains(&p(1.0, 1.0, 0.0), EPS));
        assert!(t.contains(&p(2.0, 0.0, 0.0), EPS)); // on an edge
        assert!(t.contains(&p(0.0, 4.0, 0.0), EPS)); // vertex
        assert!(t.contains(&p(2.0, 2.0, 0.0), EPS)); // on the hypotenuse
        assert!(!t.contains(&p(3.0, 3.0, 0.0), EPS));
        assert!(!t.contains(&p(1.0, 1.0, 1.0), EPS)); // off the plane
    }

    #[test]
    fn centroid_area_perimeter() {
        let t = tri((0.0, 0.0, 0.0), (3.0, 0.0, 0.0), (0.0, 3.0, 0.0));
        assert!(t.centroid().coincides(&p(1.0, 1.0, 0.0), 1e-9));
        assert_relative_eq!(t.area(), 4.5);
        assert_relative_eq!(
            t.perimeter(),
            6.0 + 3.0 * std::f64::consts::SQRT_2,
            max_relative = 1e-12
        );
    }

    // ── line / segment / ray intersection tests ──

    #[test]
    fn piercing_line_hits_interior_point() {
        let t = tri((0.0, 0.0, 0.0), (4.0, 0.0, 0.0), (0.0, 4.0, 0.0));
        let l = Line::from_points(&p(1.0, 1.0, -1.0), &p(1.0, 1.0, 1.0), EPS).unwrap();
        let TriangleLinearRelation::Point(x) = t.intersection_with_line(&l, EPS) else {
            panic!("expected a point");
        };
        assert!(x.coincides(&p(1.0, 1.0, 0.0), 1e-9));
    }

    #[test]
    fn coplanar_line_cuts_a_chord() {
        let t = tri((0.0, 0.0, 0.0), (4.0, 0.0, 0.0), (0.0, 4.0, 0.0));
        let l = Line::from_points(&p(-1.0, 1.0, 0.0), &p(5.0, 1.0, 0.0), EPS).unwrap();
        let TriangleLinearRelation::Segment(s) = t.intersection_with_line(&l, EPS) else {
            panic!("expected a chord");
        };
        assert!(s.equals_ignore_direction(&seg((0.0, 1.0, 0.0), (3.0, 1.0, 0.0)), 1e-9));
    }

    #[test]
    fn segment_clipped_into_triangle() {
        let t = tri((0.0, 0.0, 0.0), (4.0, 0.0, 0.0), (0.0, 4.0, 0.0));
        let s = seg((1.0, 1.0, 0.0), (9.0, 1.0, 0.0));
        let TriangleLinearRelation::Segment(out) = t.intersection_with_segment(&s, EPS) else {
            panic!("expected a segment");
        };
        assert!(out.equals_ignore_direction(&seg((1.0, 1.0, 0.0), (3.0, 1.0, 0.0)), 1e-9));
    }

    #[test]
    fn ray_from_inside_exits_once() {
        let t = tri((0.0, 0.0, 0.0), (4.0, 0.0, 0.0), (0.0, 4.0, 0.0));
        let r = Ray::from_points(&p(1.0, 1.0, 0.0), &p(2.0, 1.0, 0.0), EPS).unwrap();
        let TriangleLinearRelation::Segment(out) = t.intersection_with_ray(&r, EPS) else {
            panic!("expected a segment");
        };
        assert!(out.equals_ignore_direction(&seg((1.0, 1.0, 0.0), (3.0, 1.0, 0.0)), 1e-9));
    }

    #[test]
    fn ray_pointing_away_misses() {
        let t = tri((0.0, 0.0, 0.0), (4.0, 0.0, 0.0), (0.0, 4.0, 0.0));
        let r = Ray::from_points(&p(0.0, 0.0, 1.0), &p(0.0, 0.0, 2.0), EPS).unwrap();
        assert_eq!(
            t.intersection_with_ray(&r, EPS),
            TriangleLinearRelation::Disjoint
        );
    }

    // ── plane intersection tests ──

    #[test]
    fn plane_cuts_triangle_in_segment() {
        // The unit right triangle against the plane x = 0.
        let t = tri((0.0, 0.0, 0.0), (1.0, 0.0, 0.0), (0.0, 1.0, 0.0));
        let TrianglePlaneRelation::Segment(s) = t.intersection_with_plane(&Plane::x0(), EPS)
        else {
            panic!("expected a segment");
        };
        assert!(s.equals_ignore_direction(&seg((0.0, 0.0, 0.0), (0.0, 1.0, 0.0)), 1e-9));
    }

    #[test]
    fn own_plane_returns_triangle() {
        let t = tri((0.0, 0.0, 0.0), (1.0, 0.0, 0.0), (0.0, 1.0, 0.0));
        let TrianglePlaneRelation::Triangle(back) = t.intersection_with_plane(&Plane::z0(), EPS)
        else {
            panic!("expected the triangle");
        };
        assert!(back.coincides(&t, EPS));
    }

    #[test]
    fn plane_relation_equality_covers_triangles() {
        // Relation enums compare their triangle payloads directly.
        let t = tri((0.0, 0.0, 0.0), (1.0, 0.0, 0.0), (0.0, 1.0, 0.0));
        assert_eq!(
            t.intersection_with_plane(&Plane::z0(), EPS),
            TrianglePlaneRelation::Triangle(t)
        );
    }

    #[test]
    fn parallel_plane_misses() {
        let t = tri((0.0, 0.0, 0.0), (1.0, 0.0, 0.0), (0.0, 1.0, 0.0));
        let above = Plane::new(p(0.0, 0.0, 3.0), &Vector3::new(0.0, 0.0, 1.0), EPS).unwrap();
        assert_eq!(
            t.intersection_with_plane(&above, EPS),
            TrianglePlaneRelation::Disjoint
        );
    }

    // ── triangle/triangle intersection tests ──

    #[test]
    fn crossing_triangles_share_a_segment() {
        // One triangle in z = 0, one perpendicular through its middle.
        let a = tri((0.0, 0.0, 0.0), (4.0, 0.0, 0.0), (0.0, 4.0, 0.0));
        let b = tri((1.0, 1.0, -1.0), (1.0, 1.0, 1.0), (3.0, 1.0, 1.0));
        let TriangleTriangleRelation::Segment(s) = a.intersection_with_triangle(&b, EPS) else {
            panic!("expected a segment");
        };
        // b meets z = 0 along y = 1 between x = 1 and x = 2.
        assert!(s.equals_ignore_direction(&seg((1.0, 1.0, 0.0), (2.0, 1.0, 0.0)), 1e-9));
        // Symmetric call agrees.
        let TriangleTriangleRelation::Segment(t) = b.intersection_with_triangle(&a, EPS) else {
            panic!("expected a segment");
        };
        assert!(s.equals_ignore_direction(&t, 1e-9));
    }

    #[test]
    fn coplanar_nested_triangle_is_returned_whole() {
        let outer = tri((0.0, 0.0, 0.0), (8.0, 0.0, 0.0), (0.0, 8.0, 0.0));
        let inner = tri((1.0, 1.0, 0.0), (3.0, 1.0, 0.0), (1.0, 3.0, 0.0));
        let TriangleTriangleRelation::Triangle(t) = outer.intersection_with_triangle(&inner, EPS)
        else {
            panic!("expected a triangle");
        };
        assert!(t.coincides(&inner, 1e-9));
    }

    #[test]
    fn coplanar_overlap_can_be_a_polygon() {
        // The overlap is the quadrilateral (0,1) (2,1) (2,2) (0,4).
        let a = tri((0.0, 0.0, 0.0), (4.0, 0.0, 0.0), (0.0, 4.0, 0.0));
        let b = tri((-5.0, 1.0, 0.0), (2.0, 1.0, 0.0), (2.0, 8.0, 0.0));
        let TriangleTriangleRelation::Polygon(hull) = a.intersection_with_triangle(&b, EPS)
        else {
            panic!("expected a polygon");
        };
        assert_eq!(hull.len(), 4);
        for corner in [
            p(0.0, 1.0, 0.0),
            p(2.0, 1.0, 0.0),
            p(2.0, 2.0, 0.0),
            p(0.0, 4.0, 0.0),
        ] {
            assert!(hull.iter().any(|h| h.coincides(&corner, 1e-9)));
        }
    }

    #[test]
    fn far_apart_triangles_disjoint() {
        let a = tri((0.0, 0.0, 0.0), (1.0, 0.0, 0.0), (0.0, 1.0, 0.0));
        let b = tri((10.0, 0.0, 0.0), (11.0, 0.0, 0.0), (10.0, 1.0, 0.0));
        assert_eq!(
            a.intersection_with_triangle(&b, EPS),
            TriangleTriangleRelation::Disjoint
        );
    }

    // ── distance tests ──

    #[test]
    fn distance_from_point_above_interior() {
        let t = tri((0.0, 0.0, 0.0), (4.0, 0.0, 0.0), (0.0, 4.0, 0.0));
        assert!((t.distance_squared(&p(1.0, 1.0, 3.0), EPS) - 9.0).abs() < 1e-9);
        assert!((t.distance(&p(1.0, 1.0, 3.0), EPS) - 3.0).abs() < 1e-9);
    }

    #[test]
    fn distance_from_point_beyond_edge() {
        let t = tri((0.0, 0.0, 0.0), (4.0, 0.0, 0.0), (0.0, 4.0, 0.0));
        assert!((t.distance_squared(&p(-3.0, 0.0, 0.0), EPS) - 9.0).abs() < 1e-9);
    }
}
