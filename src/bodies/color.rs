use rand::Rng;

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

const RAINBOW_FREQ: f32 = 0.25;
const RAINBOW_PHASE: [f32; 3] = [0.0, 2.0, 4.0];
const RAINBOW_NUM: usize = 50;
const RAINBOW_WIDTH: f32 = 125.0;
const RAINBOW_CENTER: f32 = 125.0;
const RAINBOW_SCALE: f32 = 255.0;

const TINT_FACTOR: f32 = 0.4;
const SHADE_FACTOR: f32 = 0.2;

/// An RGB color handed through to the renderer.
///
/// Each channel lies in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const RED: Self = Self::new(1.0, 0.0, 0.0);
    pub const GREEN: Self = Self::new(0.0, 1.0, 0.0);
    pub const BLUE: Self = Self::new(0.0, 0.0, 1.0);
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0);

    /// Creates a new color
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Color number `index` of a repeating 50-step rainbow
    pub fn rainbow(index: usize) -> Self {
        let channel = |phase: f32| {
            let step = (RAINBOW_NUM - index % RAINBOW_NUM) as f32;
            ((RAINBOW_FREQ * step + phase).sin() * RAINBOW_WIDTH + RAINBOW_CENTER) / RAINBOW_SCALE
        };
        Self::new(
            channel(RAINBOW_PHASE[0]),
            channel(RAINBOW_PHASE[1]),
            channel(RAINBOW_PHASE[2]),
        )
    }

    /// A uniformly random color
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::new(rng.gen(), rng.gen(), rng.gen())
    }

    /// Lightens the two weaker channels, keeping the dominant one.
    ///
    /// Colors without a single dominant channel are returned unchanged.
    pub fn tint(&self) -> Self {
        let lighten = |c: f32| (c + (1.0 - c) * TINT_FACTOR).min(1.0);
        let Self { r, g, b } = *self;

        if r > g && r > b {
            Self::new(r, lighten(g), lighten(b))
        } else if g > r && g > b {
            Self::new(lighten(r), g, lighten(b))
        } else if b > r && b > g {
            Self::new(lighten(r), lighten(g), b)
        } else {
            *self
        }
    }

    /// Darkens every channel by a fixed factor
    pub fn shade(&self) -> Self {
        let factor = 1.0 - SHADE_FACTOR;
        Self::new(self.r * factor, self.g * factor, self.b * factor)
    }
}
