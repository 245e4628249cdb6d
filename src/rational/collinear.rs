use crate::error::{GeometryError, Result};
use crate::number::Rat;

use super::{Envelope, Line, LineSegment, Point, SegmentUnion, Vector};

/// An ordered collection of collinear line segments: the union of
/// segments on one shared line that could not be fused into a single
/// segment.
///
/// Members are kept sorted by their low-end parameter along the shared
/// line, so equality is independent of the order segments were
/// supplied in. Overlapping members are permitted on construction;
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
    /// Creates a collection from segments sharing one carrier line.
    ///
    /// # Errors
    ///
    /// Returns an error if `segments` is empty or the members do not
    /// all lie on a common line.
    pub fn new(segments: Vec<LineSegment>) -> Result<Self> {
        let Some(first) = segments.first() else {
            return Err(
                GeometryError::Degenerate("empty collinear collection".into()).into(),
            );
        };
        let line = first.line().clone();
        if segments.iter().any(|s| *s.line() != line) {
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

    /// Whether the point lies on any member. Exact.
    #[must_use]
    pub fn contains(&self, point: &Point) -> bool {
        self.segments.iter().any(|s| s.contains(point))
    }

    /// Fuses overlapping and touching members until no merge applies.
    ///
    /// Returns a single segment when everything fuses, otherwise the
    /// reduced collection. Idempotent, and independent of the order
    /// segments were supplied in (members are kept sorted).
    #[must_use]
    pub fn simplify(&self) -> SimplifiedCollinear {
        let mut merged: Vec<LineSegment> = Vec::with_capacity(self.segments.len());
        for segment in &self.segments {
            match merged.pop() {
                None => merged.push(segment.clone()),
                Some(last) => match LineSegment::union_of(&last, segment) {
                    Some(SegmentUnion::Segment(fused)) => merged.push(fused),
                    _ => {
                        merged.push(last);
                        merged.push(segment.clone());
                    }
                },
            }
        }
        if merged.len() == 1 {
            // merged is non-empty by the construction invariant.
            SimplifiedCollinear::Segment(merged.swap_remove(0))
        } else {
            SimplifiedCollinear::Collinear(Self {
                line: self.line.clone(),
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
    pub fn translate(&self, v: &Vector) -> Self {
        Self {
            line: self.line.translate(v),
            segments: self.segments.iter().map(|s| s.translate(v)).collect(),
        }
    }
}

fn sort_by_low_param(line: &Line, segments: &mut [LineSegment]) {
    let low = |s: &LineSegment| -> Rat {
        let tp = line.parameter_of(s.p());
        let tq = line.parameter_of(s.q());
        if tp <= tq {
            tp
        } else {
            tq
        }
    };
    segments.sort_by(|a, b| low(a).cmp(&low(b)));
}
