use crate::error::{GeometryError, Result};

use super::{Envelope, Line, LineSegment, Point, SegmentUnion, Vector3};

/// An ordered collection of collinear line segments: the union of
/// segments on one shared line that could not be fused into a single
/// segment.
///
/// Members are kept sorted by their low-end parameter along the shared
/// line, so equality is independent of the order segments were supplied
/// in. Overlapping members are permitted on construction;
/// [`LineSegmentsCollinear::simplify`] fuses them.
#[derive(Debug, Clone, PartialEq)]
pub struct LineSegmentsCollinear {
    line: Line,
    segments: Vec<LineSegment>,
}

/// The result of simplifying a collinear collection.
#[derive(Debug, Clone, PartialEq)]
pub enum SimplifiedCollinear {
    /// Everything fused into one segment.
    Segment(LineSegment),
    /// Disjoint pieces remain.
    Collinear(LineSegmentsCollinear),
}

impl LineSegmentsCollinear {
    /// Creates a collection from segments sharing one carrier line
    /// (within `epsilon`).
    ///
    /// # Errors
    ///
    /// Returns an error if `segments` is empty or the members do not
    /// all lie on a common line.
    pub fn new(segments: Vec<LineSegment>, epsilon: f64) -> Result<Self> {
        let Some(first) = segments.first() else {
            return Err(
                GeometryError::Degenerate("empty collinear collection".into()).into(),
            );
        };
        let line = *first.line();
        if segments.iter().any(|s| !s.line().coincides(&line, epsilon)) {
            return Err(
                GeometryError::Degenerate("segments do not share a line".into()).into(),
            );
        }
        let mut segments = segments;
        sort_by_low_param(&line, &mut segments);
        Ok(Self { line, segments })
    }

    /// The shared carrier line.
    #[must_use]
    pub fn line(&self) -> &Line {
        &self.line
    }

    /// The member segments, sorted along the line.
    #[must_use]
    pub fn segments(&self) -> &[LineSegment] {
        &self.segments
    }

    /// Whether the point lies within `epsilon` of any member.
    #[must_use]
    pub fn contains(&self, point: &Point, epsilon: f64) -> bool {
        self.segments.iter().any(|s| s.contains(point, epsilon))
    }

    /// Fuses overlapping and touching members until no merge applies.
    ///
    /// Returns a single segment when everything fuses, otherwise the
    /// reduced collection. Idempotent.
    #[must_use]
    pub fn simplify(&self, epsilon: f64) -> SimplifiedCollinear {
        let mut merged: Vec<LineSegment> = Vec::with_capacity(self.segments.len());
        for segment in &self.segments {
            match merged.pop() {
                None => merged.push(*segment),
                Some(last) => match LineSegment::union_of(&last, segment, epsilon) {
                    Some(SegmentUnion::Segment(fused)) => merged.push(fused),
                    _ => {
                        merged.push(last);
                        merged.push(*segment);
                    }
                },
            }
        }
        if merged.len() == 1 {
            // merged is non-empty by the construction invariant.
            SimplifiedCollinear::Segment(merged.swap_remove(0))
        } else {
            SimplifiedCollinear::Collinear(Self {
                line: self.line,
                segments: merged,
            })
        }
    }

    /// The axis-aligned bounding box over all member endpoints.
    #[must_use]
    pub fn envelope(&self) -> Envelope {
        self.segments
            .iter()
            .map(LineSegment::envelope)
            .reduce(|a, b| a.union(&b))
            .unwrap_or_else(|| Envelope::from_points([self.line.point()]))
    }

    /// Returns the collection translated by `v`.
    #[must_use]
    pub fn translate(&self, v: &Vector3) -> Self {
        Self {
            line: self.line.translate(v),
            segments: self.segments.iter().map(|s| s.translate(v)).collect(),
        }
    }
}

fn sort_by_low_param(line: &Line, segments: &mut [LineSegment]) {
    let low = |s: &LineSegment| -> f64 {
        let tp = line.parameter_of(s.p());
        let tq = line.parameter_of(s.q());
        tp.min(tq)
    };
    segments.sort_by(|a, b| low(a).total_cmp(&low(b)));
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-10;

    fn seg(a: (f64, f64, f64), b: (f64, f64, f64)) -> LineSegment {
        LineSegment::from_coords(a, b, EPS).unwrap()
    }

    #[test]
    fn members_are_sorted_on_construction() {
        let c = LineSegmentsCollinear::new(
            vec![
                seg((2.0, 0.0, 0.0), (3.0, 0.0, 0.0)),
                seg((-2.0, 0.0, 0.0), (-1.0, 0.0, 0.0)),
            ],
            EPS,
        )
        .unwrap();
        assert!(c.segments()[0].contains(&Point::from_coords(-2.0, 0.0, 0.0), EPS));
    }

    #[test]
    fn non_collinear_members_rejected() {
        let r = LineSegmentsCollinear::new(
            vec![
                seg((0.0, 0.0, 0.0), (1.0, 0.0, 0.0)),
                seg((0.0, 0.0, 0.0), (0.0, 1.0, 0.0)),
            ],
            EPS,
        );
        assert!(r.is_err());
    }

    #[test]
    fn empty_collection_rejected() {
        assert!(LineSegmentsCollinear::new(vec![], EPS).is_err());
    }

    #[test]
    fn touching_members_fuse_to_one_segment() {
        let c = LineSegmentsCollinear::new(
            vec![
                seg((-2.0, 0.0, 0.0), (-1.0, 0.0, 0.0)),
                seg((-1.0, 0.0, 0.0), (0.0, 0.0, 0.0)),
            ],
            EPS,
        )
        .unwrap();
        let SimplifiedCollinear::Segment(s) = c.simplify(EPS) else {
            panic!("expected a single segment");
        };
        assert!(s.equals_ignore_direction(&seg((-2.0, 0.0, 0.0), (0.0, 0.0, 0.0)), 1e-9));
    }

    #[test]
    fn disjoint_members_stay_separate() {
        let c = LineSegmentsCollinear::new(
            vec![
                seg((-2.0, 0.0, 0.0), (-1.0, 0.0, 0.0)),
                seg((0.0, 0.0, 0.0), (1.0, 0.0, 0.0)),
            ],
            EPS,
        )
        .unwrap();
        let SimplifiedCollinear::Collinear(r) = c.simplify(EPS) else {
            panic!("expected a remaining collection");
        };
        assert_eq!(r.segments().len(), 2);
    }

    #[test]
    fn simplify_is_idempotent() {
        let c = LineSegmentsCollinear::new(
            vec![
                seg((0.0, 0.0, 0.0), (1.0, 0.0, 0.0)),
                seg((1.0, 0.0, 0.0), (2.0, 0.0, 0.0)),
                seg((5.0, 0.0, 0.0), (6.0, 0.0, 0.0)),
            ],
            EPS,
        )
        .unwrap();
        let SimplifiedCollinear::Collinear(once) = c.simplify(EPS) else {
            panic!("expected a remaining collection");
        };
        assert_eq!(
            once.simplify(EPS),
            SimplifiedCollinear::Collinear(once.clone())
        );
    }
}
