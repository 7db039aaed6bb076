use std::f32::consts::TAU;

use eframe::egui::{Vec2, vec2};
use rand::Rng;
use thiserror::Error;

const RING_FRACTION: f32 = 0.3;
const JITTER: f32 = 20.0;

#[derive(Debug, Error, PartialEq)]
pub enum SurfaceError {
    #[error("surface dimensions are not finite ({width} x {height})")]
    NonFinite { width: f32, height: f32 },
    #[error("surface has no drawable area ({width} x {height})")]
    Degenerate { width: f32, height: f32 },
}

/// The drawing rectangle the simulation lives in, in surface-local units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Surface {
    width: f32,
    height: f32,
    padding: f32,
}

impl Surface {
    pub fn new(width: f32, height: f32, padding: f32) -> Result<Self, SurfaceError> {
        if !width.is_finite() || !height.is_finite() {
            return Err(SurfaceError::NonFinite { width, height });
        }
        if width <= 0.0 || height <= 0.0 {
            return Err(SurfaceError::Degenerate { width, height });
        }

        let padding = if padding.is_finite() {
            padding.max(0.0)
        } else {
            0.0
        };

        Ok(Self {
            width,
            height,
            padding,
        })
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn center(&self) -> Vec2 {
        vec2(self.width * 0.5, self.height * 0.5)
    }

    pub fn same_size(&self, other: &Surface) -> bool {
        self.width == other.width && self.height == other.height
    }

    /// Inclusive `(min, max)` corners nodes are kept inside. Padding shrinks
    /// on surfaces too small to honor it so the range never inverts.
    pub fn bounds(&self) -> (Vec2, Vec2) {
        let pad_x = self.padding.min(self.width * 0.5);
        let pad_y = self.padding.min(self.height * 0.5);
        (
            vec2(pad_x, pad_y),
            vec2(self.width - pad_x, self.height - pad_y),
        )
    }

    pub fn clamp(&self, position: Vec2) -> Vec2 {
        let (min, max) = self.bounds();
        vec2(
            position.x.clamp(min.x, max.x),
            position.y.clamp(min.y, max.y),
        )
    }

    pub fn contains(&self, position: Vec2) -> bool {
        let (min, max) = self.bounds();
        (min.x..=max.x).contains(&position.x) && (min.y..=max.y).contains(&position.y)
    }
}

/// Spreads `count` nodes evenly over a ring centered in the surface, each
/// nudged by independent uniform jitter.
pub fn initial_positions<R: Rng + ?Sized>(
    count: usize,
    surface: &Surface,
    rng: &mut R,
) -> Vec<Vec2> {
    if count == 0 {
        return Vec::new();
    }

    let center = surface.center();
    let ring_radius = surface.width.min(surface.height) * RING_FRACTION;

    (0..count)
        .map(|index| {
            let angle = (index as f32 / count as f32) * TAU;
            let radial = vec2(angle.cos(), angle.sin()) * ring_radius;
            let jitter = vec2(
                rng.gen_range(-JITTER..=JITTER),
                rng.gen_range(-JITTER..=JITTER),
            );
            surface.clamp(center + radial + jitter)
        })
        .collect()
}
