use crate::math::{Real, Vector2};
use crate::shapes::Polygon;

/// The outcome of a separating-axis test between two convex polygons
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionInfo {
    /// Whether the polygons overlap (touching counts as overlapping)
    pub collided: bool,

    /// Unit axis with the smallest projected overlap among all candidate axes.
    /// Reported even when `collided` is false.
    pub axis: Vector2,
}

/// Interval covered by a shape projected onto an axis
#[derive(Debug, Clone, Copy)]
struct Projection {
    min: Real,
    max: Real,
}

impl Projection {
    fn of(shape: &Polygon, axis: &Vector2) -> Self {
        shape.vertices().iter().fold(
            Self { min: Real::INFINITY, max: Real::NEG_INFINITY },
            |range, vertex| {
                let p = vertex.dot(axis);
                Self { min: range.min.min(p), max: range.max.max(p) }
            },
        )
    }

    /// Whether there is a gap between the two intervals
    fn is_separated_from(&self, other: &Self) -> bool {
        other.min > self.max || other.max < self.min
    }

    /// Overlap amount, measured from whichever side the intervals meet on
    fn overlap(&self, other: &Self) -> Real {
        let forward = (other.max - self.min).abs();
        let backward = (self.max - other.min).abs();
        forward.min(backward)
    }
}

/// Candidate separating axes: the unit outward normal of every edge of both
/// shapes, edges of `a` first. Zero-length edges are skipped.
fn projection_axes(a: &Polygon, b: &Polygon) -> Vec<Vector2> {
    let mut axes = Vec::with_capacity(a.len() + b.len());
    for shape in [a, b] {
        for (start, end) in shape.edges() {
            let edge = start - end;
            if edge.is_zero() {
                continue;
            }
            axes.push(edge.unit().perpendicular());
        }
    }
    axes
}

/// Separating-axis test between two convex polygons.
///
/// Every candidate axis is evaluated; the returned axis is the one with the
/// least overlap, the first one winning ties.
pub fn find_collision(a: &Polygon, b: &Polygon) -> CollisionInfo {
    let axes = projection_axes(a, b);

    let mut collided = true;
    let mut min_overlap = Real::INFINITY;
    let mut collision_axis = axes.first().copied().unwrap_or_default();

    for axis in &axes {
        let projection_a = Projection::of(a, axis);
        let projection_b = Projection::of(b, axis);

        let overlap = projection_a.overlap(&projection_b);
        if overlap < min_overlap {
            min_overlap = overlap;
            collision_axis = *axis;
        }

        if projection_a.is_separated_from(&projection_b) {
            collided = false;
        }
    }

    CollisionInfo { collided, axis: collision_axis }
}

/// Returns true if `point` lies inside `polygon` (even-odd rule, so concave
/// outlines such as stars work too). Points exactly on an edge may go either way.
pub fn contains_point(polygon: &Polygon, point: Vector2) -> bool {
    let mut inside = false;
    for (start, end) in polygon.edges() {
        if (start.y > point.y) != (end.y > point.y) {
            let t = (point.y - start.y) / (end.y - start.y);
            let crossing_x = start.x + t * (end.x - start.x);
            if point.x < crossing_x {
                inside = !inside;
            }
        }
    }
    inside
}
