//! Orbit camera and screen projection for the visualization surface.

use glam::{Mat4, Vec2, Vec3};
use std::f32::consts::{PI, TAU};

/// Default eye position, looking at the origin.
pub const DEFAULT_EYE: Vec3 = Vec3::new(15.0, 15.0, 15.0);

/// One full auto-rotation every 30 seconds.
pub const AUTO_ROTATE_RATE: f32 = TAU / 30.0;

const MIN_PHI: f32 = 0.01;
const MAX_PHI: f32 = PI - 0.01;
const MIN_RADIUS: f32 = 1.0;
const MAX_RADIUS: f32 = 200.0;

/// Pixel size of the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn aspect(&self) -> f32 {
        if self.height <= 0.0 {
            1.0
        } else {
            self.width / self.height
        }
    }
}

/// A point mapped onto the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projected {
    pub screen: Vec2,
    /// View-space distance; larger is further away.
    pub depth: f32,
    /// Pixels per world unit at this depth.
    pub pixels_per_unit: f32,
}

/// Camera orbiting a target in spherical coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitCamera {
    pub target: Vec3,
    pub radius: f32,
    /// Azimuth around Y.
    pub theta: f32,
    /// Polar angle from +Y.
    pub phi: f32,
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::looking_at(DEFAULT_EYE, Vec3::ZERO)
    }
}

impl OrbitCamera {
    pub fn looking_at(eye: Vec3, target: Vec3) -> Self {
        let mut camera = Self {
            target,
            radius: 1.0,
            theta: 0.0,
            phi: PI / 2.0,
            fov_y: 75f32.to_radians(),
            near: 0.1,
            far: 1000.0,
        };
        camera.place_eye(eye);
        camera
    }

    fn place_eye(&mut self, eye: Vec3) {
        let offset = eye - self.target;
        self.radius = offset.length().clamp(MIN_RADIUS, MAX_RADIUS);
        self.theta = offset.x.atan2(offset.z);
        self.phi = (offset.y / offset.length().max(f32::EPSILON))
            .clamp(-1.0, 1.0)
            .acos()
            .clamp(MIN_PHI, MAX_PHI);
    }

    pub fn eye_position(&self) -> Vec3 {
        let (sin_phi, cos_phi) = self.phi.sin_cos();
        let (sin_theta, cos_theta) = self.theta.sin_cos();
        self.target
            + Vec3::new(
                self.radius * sin_phi * sin_theta,
                self.radius * cos_phi,
                self.radius * sin_phi * cos_theta,
            )
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye_position(), self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, aspect, self.near, self.far)
    }

    /// Moves the orbit focus while keeping the eye where it is.
    pub fn retarget(&mut self, target: Vec3) {
        let eye = self.eye_position();
        self.target = target;
        self.place_eye(eye);
    }

    pub fn orbit(&mut self, delta_theta: f32, delta_phi: f32) {
        self.theta = (self.theta + delta_theta).rem_euclid(TAU);
        self.phi = (self.phi + delta_phi).clamp(MIN_PHI, MAX_PHI);
    }

    /// Positive `delta` moves closer.
    pub fn zoom(&mut self, delta: f32) {
        let factor = 1.0 - delta * 0.1;
        self.radius = (self.radius * factor).clamp(MIN_RADIUS, MAX_RADIUS);
    }

    pub fn auto_rotate(&mut self, dt_secs: f32) {
        self.orbit(AUTO_ROTATE_RATE * dt_secs, 0.0);
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn project(&self, world: Vec3, viewport: Viewport) -> Option<Projected> {
        let clip = self.projection_matrix(viewport.aspect())
            * self.view_matrix()
            * world.extend(1.0);
        if clip.w <= self.near {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        let screen = Vec2::new(
            (ndc.x + 1.0) * 0.5 * viewport.width,
            (1.0 - ndc.y) * 0.5 * viewport.height,
        );
        let pixels_per_unit = viewport.height / (2.0 * (self.fov_y * 0.5).tan() * clip.w);
        Some(Projected {
            screen,
            depth: clip.w,
            pixels_per_unit,
        })
    }
}
