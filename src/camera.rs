//! Camera State and Motion
//!
//! One explicit camera struct drives both render modes. All motion is
//! time-based: callers pass a direction and the frame's delta time, and the
//! tuning struct supplies the rates.

use serde::{Deserialize, Serialize};

use crate::math::{Mat2, Vec2, Vec3};

/// Which sampling pipeline the rasterizer runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Whole-screen inverse affine sampling
    Affine,
    /// Ground-plane perspective divide below the horizon scanline
    Perspective,
}

impl RenderMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Affine => Self::Perspective,
            Self::Perspective => Self::Affine,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Affine => "affine",
            Self::Perspective => "mode7",
        }
    }
}

/// Motion rates, persisted with the settings file
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraTuning {
    /// Ground translation speed, background texels per second
    pub move_speed: f32,
    /// Angular velocity, radians per second
    pub rotate_speed: f32,
    /// Additive scale change per second
    pub scale_rate: f32,
    /// Lower clamp keeping scale away from zero
    pub min_scale: f32,
    /// Camera height change per second
    pub climb_speed: f32,
    /// Near-plane distance change per second
    pub near_rate: f32,
}

impl Default for CameraTuning {
    fn default() -> Self {
        Self {
            move_speed: 120.0,
            rotate_speed: 1.2,
            scale_rate: 0.8,
            min_scale: 0.05,
            climb_speed: 60.0,
            near_rate: 40.0,
        }
    }
}

/// Camera state: ground position on x/z, height on y, plus the affine
/// scale/rotation and the perspective parameters.
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Vec3,
    pub scale: Vec2,
    pub rotation: f32,
    /// Perspective near-plane distance in screen rows
    pub near: f32,
    /// Screen row dividing sky (untouched) from ground (sampled)
    pub horizon: u32,
    tuning: CameraTuning,
}

impl Camera {
    pub fn new(tuning: CameraTuning, near: f32, horizon: u32) -> Self {
        Self {
            position: Vec3::new(0.0, 32.0, 0.0),
            scale: Vec2::new(1.0, 1.0),
            rotation: 0.0,
            near,
            horizon,
            tuning,
        }
    }

    /// Ground-plane coordinates the rasterizer translates samples by
    #[inline]
    pub fn ground(&self) -> Vec2 {
        Vec2::new(self.position.x, self.position.z)
    }

    /// Translate along a camera-local direction (forward = screen up).
    /// The inverse rotation carries the local direction into world space
    /// before it is applied.
    pub fn move_local(&mut self, dir: Vec2, dt: f32) {
        let world = Mat2::rotation(-self.rotation) * dir * (self.tuning.move_speed * dt);
        self.position.x += world.x;
        self.position.z += world.y;
    }

    /// Turn by `dir` (+1 counter-clockwise, -1 clockwise)
    pub fn rotate(&mut self, dir: f32, dt: f32) {
        self.rotation += dir * self.tuning.rotate_speed * dt;
    }

    /// Additive per-axis scale change, clamped away from zero so the
    /// affine transform stays invertible under input.
    pub fn adjust_scale(&mut self, dx: f32, dy: f32, dt: f32) {
        let step = self.tuning.scale_rate * dt;
        self.scale.x = (self.scale.x + dx * step).max(self.tuning.min_scale);
        self.scale.y = (self.scale.y + dy * step).max(self.tuning.min_scale);
    }

    /// Raise or lower the camera above the ground plane
    pub fn climb(&mut self, dir: f32, dt: f32) {
        self.position.y = (self.position.y + dir * self.tuning.climb_speed * dt).max(0.0);
    }

    /// Push the perspective near plane out or pull it in
    pub fn adjust_near(&mut self, dir: f32, dt: f32) {
        self.near = (self.near + dir * self.tuning.near_rate * dt).max(0.0);
    }

    pub fn tuning(&self) -> &CameraTuning {
        &self.tuning
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(CameraTuning::default(), 16.0, 240)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn unit_tuning() -> CameraTuning {
        CameraTuning {
            move_speed: 1.0,
            rotate_speed: 1.0,
            scale_rate: 1.0,
            min_scale: 0.05,
            climb_speed: 1.0,
            near_rate: 1.0,
        }
    }

    #[test]
    fn test_move_local_identity_rotation() {
        let mut cam = Camera::new(unit_tuning(), 16.0, 240);
        cam.move_local(Vec2::new(0.0, -1.0), 1.0);
        assert!((cam.position.x).abs() < 1e-5);
        assert!((cam.position.z + 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_move_local_rotated_quarter_turn() {
        // Facing a quarter turn left, "forward" maps to world -x
        let mut cam = Camera::new(unit_tuning(), 16.0, 240);
        cam.rotation = FRAC_PI_2;
        cam.move_local(Vec2::new(0.0, -1.0), 1.0);
        assert!((cam.position.x + 1.0).abs() < 1e-5);
        assert!((cam.position.z).abs() < 1e-5);
    }

    #[test]
    fn test_move_scales_with_dt() {
        let mut cam = Camera::new(unit_tuning(), 16.0, 240);
        cam.move_local(Vec2::new(1.0, 0.0), 0.25);
        assert!((cam.position.x - 0.25).abs() < 1e-5);
    }

    #[test]
    fn test_scale_clamps_at_minimum() {
        let mut cam = Camera::new(unit_tuning(), 16.0, 240);
        cam.adjust_scale(-1.0, -1.0, 10.0);
        assert_eq!(cam.scale.x, 0.05);
        assert_eq!(cam.scale.y, 0.05);
    }

    #[test]
    fn test_scale_round_trip_restores_value() {
        let mut cam = Camera::new(unit_tuning(), 16.0, 240);
        cam.adjust_scale(1.0, 1.0, 0.5);
        cam.adjust_scale(-1.0, -1.0, 0.5);
        assert!((cam.scale.x - 1.0).abs() < 1e-5);
        assert!((cam.scale.y - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_height_never_goes_below_ground() {
        let mut cam = Camera::new(unit_tuning(), 16.0, 240);
        cam.climb(-1.0, 1000.0);
        assert_eq!(cam.position.y, 0.0);
    }

    #[test]
    fn test_mode_toggle_cycles() {
        let mode = RenderMode::Affine;
        assert_eq!(mode.toggled(), RenderMode::Perspective);
        assert_eq!(mode.toggled().toggled(), RenderMode::Affine);
    }
}
