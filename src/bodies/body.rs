use std::any::Any;
use std::fmt;

use crate::bodies::{Attachment, Color};
use crate::error::PhysicsError;
use crate::math::{Real, Vector2};
use crate::shapes::Polygon;
use crate::Result;

/// Mass of an immovable body such as a wall or an anchor.
///
/// Forces and impulses on such a body produce no change in velocity.
pub const INFINITE_MASS: Real = Real::INFINITY;

/// Size multiplier applied to sprites and labels attached to a body, so they
/// sit slightly inside the body outline
pub const ATTACHMENT_SCALE: Real = 0.9;

/// A simulated rigid polygon
pub struct Body {
    /// The body's outline in world space
    shape: Polygon,

    /// Positive mass, or `INFINITE_MASS`
    mass: Real,

    color: Color,

    velocity: Vector2,

    /// Kept equal to the shape's centroid by translating both together
    centroid: Vector2,

    /// Accumulated rotation, used to apply rotation deltas
    angle: Real,

    /// Forces to be integrated over the next tick
    force: Vector2,

    /// Impulses to be applied at the next tick
    impulse: Vector2,

    removed: bool,

    /// Largest centroid-to-vertex distance
    size: Real,

    /// Caller metadata, dropped together with the body
    info: Option<Box<dyn Any>>,

    sprite: Option<Attachment>,

    label: Option<Attachment>,
}

impl Body {
    /// Creates a body from its outline, mass and color.
    ///
    /// The mass must be positive (`INFINITE_MASS` is allowed).
    pub fn new(shape: Polygon, mass: Real, color: Color) -> Result<Self> {
        validate_mass(mass)?;

        let centroid = shape.centroid();
        let size = shape.max_distance_from_centroid();

        Ok(Self {
            shape,
            mass,
            color,
            velocity: Vector2::zero(),
            centroid,
            angle: 0.0,
            force: Vector2::zero(),
            impulse: Vector2::zero(),
            removed: false,
            size,
            info: None,
            sprite: None,
            label: None,
        })
    }

    /// Creates a body carrying caller metadata
    pub fn with_info<T: Any>(shape: Polygon, mass: Real, color: Color, info: T) -> Result<Self> {
        let mut body = Self::new(shape, mass, color)?;
        body.info = Some(Box::new(info));
        Ok(body)
    }

    /// Attaches a sprite that follows the body
    pub fn with_sprite(mut self, source: impl Into<String>, size: Vector2) -> Self {
        self.sprite = Some(Attachment::image(source, self.centroid, size * ATTACHMENT_SCALE));
        self
    }

    /// Attaches a text label that follows the body
    pub fn with_label(mut self, text: impl Into<String>, color: Color, size: Vector2) -> Self {
        self.label = Some(Attachment::text(text, color, self.centroid, size * ATTACHMENT_SCALE));
        self
    }

    /// Returns a copy of the body's outline
    pub fn shape(&self) -> Polygon {
        self.shape.clone()
    }

    /// Borrows the body's outline
    pub fn polygon(&self) -> &Polygon {
        &self.shape
    }

    pub fn centroid(&self) -> Vector2 {
        self.centroid
    }

    /// Moves the body so its centroid lands on `centroid`
    pub fn set_centroid(&mut self, centroid: Vector2) {
        let delta = centroid - self.centroid;
        self.shape.translate(delta);
        self.centroid += delta;
        self.sync_attachments();
    }

    pub fn velocity(&self) -> Vector2 {
        self.velocity
    }

    pub fn set_velocity(&mut self, velocity: Vector2) {
        self.velocity = velocity;
    }

    pub fn mass(&self) -> Real {
        self.mass
    }

    /// Changes the mass; the same rules as in `Body::new` apply
    pub fn set_mass(&mut self, mass: Real) -> Result<()> {
        validate_mass(mass)?;
        self.mass = mass;
        Ok(())
    }

    /// Returns true for bodies with infinite mass
    pub fn is_immovable(&self) -> bool {
        self.mass.is_infinite()
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// Current absolute rotation in radians
    pub fn angle(&self) -> Real {
        self.angle
    }

    /// Rotates the body about its centroid to the absolute angle `angle`
    pub fn set_rotation(&mut self, angle: Real) {
        self.shape.rotate(angle - self.angle, self.centroid);
        self.angle = angle;
    }

    /// Circumscribed radius around the centroid
    pub fn size(&self) -> Real {
        self.size
    }

    /// Forces accumulated since the last tick
    pub fn force(&self) -> Vector2 {
        self.force
    }

    /// Impulses accumulated since the last tick
    pub fn impulse(&self) -> Vector2 {
        self.impulse
    }

    /// Adds a force to be integrated over the next tick
    pub fn add_force(&mut self, force: Vector2) {
        self.force += force;
    }

    /// Adds an impulse to be applied at the next tick
    pub fn add_impulse(&mut self, impulse: Vector2) {
        self.impulse += impulse;
    }

    /// Advances the body by `dt` seconds.
    ///
    /// Velocity is updated from the accumulated force (scaled by `dt`) and
    /// impulse (not scaled), both accumulators are cleared, and the body is
    /// moved by `dt` times the average of the old and new velocity.
    ///
    /// An immovable body discards its accumulators untouched, so even an
    /// infinite force leaves its velocity as it was.
    pub fn tick(&mut self, dt: Real) {
        let old_velocity = self.velocity;

        if !self.is_immovable() {
            let inverse_mass = 1.0 / self.mass;
            self.velocity += self.force * (dt * inverse_mass);
            self.velocity += self.impulse * inverse_mass;
        }
        self.force = Vector2::zero();
        self.impulse = Vector2::zero();

        let displacement = (old_velocity + self.velocity) * (0.5 * dt);
        self.shape.translate(displacement);
        self.centroid += displacement;
        self.sync_attachments();
    }

    /// Flags the body for removal at the scene's next cleanup pass.
    /// Its attachments are flagged too so the renderer stops drawing them.
    pub fn remove(&mut self) {
        self.removed = true;
        if let Some(sprite) = &mut self.sprite {
            sprite.remove();
        }
        if let Some(label) = &mut self.label {
            label.remove();
        }
    }

    pub fn is_removed(&self) -> bool {
        self.removed
    }

    /// Borrows the caller metadata if it has type `T`
    pub fn info<T: Any>(&self) -> Option<&T> {
        self.info.as_deref().and_then(|info| info.downcast_ref::<T>())
    }

    /// Mutably borrows the caller metadata if it has type `T`
    pub fn info_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.info.as_deref_mut().and_then(|info| info.downcast_mut::<T>())
    }

    /// Returns true if the body carries metadata of any type
    pub fn has_info(&self) -> bool {
        self.info.is_some()
    }

    /// Replaces the caller metadata, handing back the previous value
    pub fn set_info<T: Any>(&mut self, info: T) -> Option<Box<dyn Any>> {
        self.info.replace(Box::new(info))
    }

    /// Takes the caller metadata out of the body
    pub fn take_info(&mut self) -> Option<Box<dyn Any>> {
        self.info.take()
    }

    pub fn sprite(&self) -> Option<&Attachment> {
        self.sprite.as_ref()
    }

    pub fn label(&self) -> Option<&Attachment> {
        self.label.as_ref()
    }

    /// Changes the label text. Returns false if the body has no label.
    pub fn set_label_text(&mut self, text: impl Into<String>) -> bool {
        match &mut self.label {
            Some(label) => label.set_text(text),
            None => false,
        }
    }

    fn sync_attachments(&mut self) {
        if let Some(sprite) = &mut self.sprite {
            sprite.set_position(self.centroid);
        }
        if let Some(label) = &mut self.label {
            label.set_position(self.centroid);
        }
    }
}

impl fmt::Debug for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Body")
            .field("centroid", &self.centroid)
            .field("velocity", &self.velocity)
            .field("mass", &self.mass)
            .field("angle", &self.angle)
            .field("vertices", &self.shape.len())
            .field("removed", &self.removed)
            .field("has_info", &self.info.is_some())
            .finish_non_exhaustive()
    }
}

fn validate_mass(mass: Real) -> Result<()> {
    // NaN fails this comparison too
    if mass > 0.0 {
        Ok(())
    } else {
        Err(PhysicsError::InvalidParameter(format!(
            "body mass must be positive, got {mass}"
        )))
    }
}
