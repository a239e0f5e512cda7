use nalgebra as na;
use std::f64::consts::PI;

use crate::error::PhysicsError;
use crate::math::{Real, Vector2, EPSILON};
use crate::Result;

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// A simple polygon given by its vertices in counter-clockwise order.
///
/// The polygon is implicitly closed: there is an edge between every pair of
/// consecutive vertices and one more between the last and the first vertex.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Polygon {
    vertices: Vec<Vector2>,
}

impl Polygon {
    /// Creates a polygon from a list of vertices.
    ///
    /// Fails if fewer than three vertices are given or if the enclosed area is
    /// zero (or not finite), since the centroid is undefined in that case.
    pub fn new(vertices: Vec<Vector2>) -> Result<Self> {
        if vertices.len() < 3 {
            return Err(PhysicsError::InvalidParameter(format!(
                "a polygon needs at least 3 vertices, got {}",
                vertices.len()
            )));
        }

        let polygon = Self { vertices };
        let area = polygon.area();
        if !area.is_finite() || area.abs() < EPSILON {
            return Err(PhysicsError::DegeneratePolygon(area));
        }

        Ok(polygon)
    }

    /// Returns the vertices of the polygon
    pub fn vertices(&self) -> &[Vector2] {
        &self.vertices
    }

    /// Returns the number of vertices
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Returns true if the polygon has no vertices
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Iterates over the edges as `(start, end)` pairs, ending with the
    /// closing edge from the last vertex back to the first.
    pub fn edges(&self) -> impl Iterator<Item = (Vector2, Vector2)> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }

    /// Signed area via the shoelace formula; positive for counter-clockwise winding
    pub fn area(&self) -> Real {
        0.5 * self.edges().map(|(a, b)| a.cross(&b)).sum::<Real>()
    }

    /// Returns true if the vertices wind counter-clockwise
    pub fn is_counter_clockwise(&self) -> bool {
        self.area() > 0.0
    }

    /// Area-weighted center of mass of the polygon.
    ///
    /// The area must be non-zero; `Polygon::new` and the factories guarantee it.
    pub fn centroid(&self) -> Vector2 {
        let mut sum = Vector2::zero();
        for (a, b) in self.edges() {
            sum += (a + b) * a.cross(&b);
        }
        sum / (6.0 * self.area())
    }

    /// Moves every vertex by `translation`
    pub fn translate(&mut self, translation: Vector2) {
        for vertex in &mut self.vertices {
            *vertex += translation;
        }
    }

    /// Rotates every vertex by `angle` radians (counter-clockwise) about `pivot`
    pub fn rotate(&mut self, angle: Real, pivot: Vector2) {
        let rotation = na::Rotation2::new(angle);
        for vertex in &mut self.vertices {
            let local = (*vertex - pivot).to_nalgebra();
            *vertex = pivot + Vector2::from_nalgebra(&(rotation * local));
        }
    }

    /// Largest distance from the centroid to a vertex (circumscribed radius)
    pub fn max_distance_from_centroid(&self) -> Real {
        let centroid = self.centroid();
        self.vertices
            .iter()
            .map(|v| v.distance(&centroid))
            .fold(0.0, Real::max)
    }

    /// Smallest distance from the centroid to a vertex
    pub fn min_distance_from_centroid(&self) -> Real {
        let centroid = self.centroid();
        self.vertices
            .iter()
            .map(|v| v.distance(&centroid))
            .fold(Real::INFINITY, Real::min)
    }

    /// Regular polygon approximating a circle.
    ///
    /// # Panics
    /// If `num_points < 3` or `radius` is not positive.
    pub fn circle(center: Vector2, radius: Real, num_points: usize) -> Self {
        assert!(num_points >= 3, "a circle needs at least 3 points");
        assert!(radius > 0.0, "circle radius must be positive");

        let step = 2.0 * PI / num_points as Real;
        let vertices = (0..num_points)
            .map(|i| {
                let theta = step * i as Real;
                center + Vector2::new(radius * theta.cos(), radius * theta.sin())
            })
            .collect();

        Self { vertices }
    }

    /// Axis-aligned rectangle spanning the two corners
    ///
    /// # Panics
    /// If the rectangle has zero width or height.
    pub fn rectangle(x1: Real, y1: Real, x2: Real, y2: Real) -> Self {
        let (min_x, max_x) = (x1.min(x2), x1.max(x2));
        let (min_y, max_y) = (y1.min(y2), y1.max(y2));
        assert!(max_x > min_x && max_y > min_y, "rectangle must have a non-zero extent");

        Self {
            vertices: vec![
                Vector2::new(min_x, min_y),
                Vector2::new(max_x, min_y),
                Vector2::new(max_x, max_y),
                Vector2::new(min_x, max_y),
            ],
        }
    }

    /// Axis-aligned square centered on `center` whose sides lie `half_side` away
    pub fn square(center: Vector2, half_side: Real) -> Self {
        let offset = Vector2::new(half_side, half_side);
        let lower_left = center - offset;
        let upper_right = center + offset;
        Self::rectangle(lower_left.x, lower_left.y, upper_right.x, upper_right.y)
    }

    /// Triangle through three points, reordered to wind counter-clockwise
    ///
    /// # Panics
    /// If the points are collinear.
    pub fn triangle(a: Vector2, b: Vector2, c: Vector2) -> Self {
        let winding = (b - a).cross(&(c - a));
        assert!(winding.abs() > EPSILON, "triangle vertices are collinear");

        let vertices = if winding > 0.0 { vec![a, b, c] } else { vec![a, c, b] };
        Self { vertices }
    }

    /// Star with `points` tips on `radius`; inner vertices sit at `radius / 2`.
    /// The first tip points straight up.
    ///
    /// # Panics
    /// If `points < 2` or `radius` is not positive.
    pub fn star(center: Vector2, radius: Real, points: usize) -> Self {
        assert!(points >= 2, "a star needs at least 2 points");
        assert!(radius > 0.0, "star radius must be positive");

        let delta = 2.0 * PI / points as Real;
        let inner = radius / 2.0;
        let mut vertices = Vec::with_capacity(points * 2);
        let mut theta = PI / 2.0;

        for _ in 0..points {
            vertices.push(center + Vector2::new(radius * theta.cos(), radius * theta.sin()));
            let half = theta + delta / 2.0;
            vertices.push(center + Vector2::new(inner * half.cos(), inner * half.sin()));
            theta += delta;
        }

        Self { vertices }
    }
}

impl TryFrom<Vec<Vector2>> for Polygon {
    type Error = PhysicsError;

    fn try_from(vertices: Vec<Vector2>) -> Result<Self> {
        Self::new(vertices)
    }
}
