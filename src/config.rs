use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Tuning constants for the layout engine and the renderer.
///
/// Every field is optional in the JSON file; missing ones keep their
/// defaults.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    pub repulsion: f32,
    pub spring: f32,
    pub rest_length: f32,
    pub gravity: f32,
    pub damping: f32,
    pub alpha_decay: f32,
    pub alpha_min: f32,
    pub reheat_alpha: f32,
    pub padding: f32,
    pub hit_radius: f32,
    pub label_degree_threshold: usize,
    pub label_max_chars: usize,
    pub reheat_on_filter_change: bool,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            repulsion: 800.0,
            spring: 0.05,
            rest_length: 80.0,
            gravity: 0.01,
            damping: 0.6,
            alpha_decay: 0.995,
            alpha_min: 0.001,
            reheat_alpha: 0.3,
            padding: 20.0,
            hit_radius: 12.0,
            label_degree_threshold: 6,
            label_max_chars: 24,
            reheat_on_filter_change: false,
        }
    }
}

impl PhysicsConfig {
    /// Pulls values back into ranges where the simulation still cools and
    /// stays finite.
    pub fn validated(self) -> Self {
        let defaults = Self::default();
        let finite_or = |value: f32, fallback: f32| {
            if value.is_finite() { value } else { fallback }
        };

        Self {
            repulsion: finite_or(self.repulsion, defaults.repulsion).max(0.0),
            spring: finite_or(self.spring, defaults.spring).max(0.0),
            rest_length: finite_or(self.rest_length, defaults.rest_length).max(0.0),
            gravity: finite_or(self.gravity, defaults.gravity).max(0.0),
            damping: finite_or(self.damping, defaults.damping).clamp(0.0, 1.0),
            alpha_decay: finite_or(self.alpha_decay, defaults.alpha_decay).clamp(0.5, 0.9999),
            alpha_min: finite_or(self.alpha_min, defaults.alpha_min).clamp(1e-6, 0.5),
            reheat_alpha: finite_or(self.reheat_alpha, defaults.reheat_alpha).clamp(0.0, 1.0),
            padding: finite_or(self.padding, defaults.padding).max(0.0),
            hit_radius: finite_or(self.hit_radius, defaults.hit_radius).max(1.0),
            label_degree_threshold: self.label_degree_threshold,
            label_max_chars: self.label_max_chars.max(2),
            reheat_on_filter_change: self.reheat_on_filter_change,
        }
    }
}

pub fn load_physics_config(path: &Path) -> Result<PhysicsConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read physics config {}", path.display()))?;
    let config: PhysicsConfig = serde_json::from_str(&raw)
        .with_context(|| format!("invalid physics config {}", path.display()))?;
    Ok(config.validated())
}
