use glam::Vec3;
use std::fmt;
use uuid::Uuid;

use super::tag::Tag;
use crate::common::Rgb;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId(Uuid);

impl ObjectId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ObjectId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Primitive {
    Sphere { radius: f32 },
    Cuboid { size: f32 },
    /// Square facing +Z, rotated about Z by `rotation.z`.
    Plane { size: f32 },
    /// Segment from the object's position to `end` (world space).
    Line { end: Vec3 },
    /// Thin rod centered on the position, aligned with local Y and
    /// rotated about Z by `rotation.z`.
    Cylinder { radius: f32, length: f32 },
}

/// A renderable primitive. Owned by the scene; mutated by animations.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneObject {
    pub id: ObjectId,
    pub primitive: Primitive,
    /// Local position; relative to the parent when attached.
    pub position: Vec3,
    /// Euler angles in radians.
    pub rotation: Vec3,
    pub scale: f32,
    pub color: Rgb,
    pub opacity: f32,
    pub tag: Tag,
    pub parent: Option<ObjectId>,
    pub label: Option<String>,
}

impl SceneObject {
    pub fn new(primitive: Primitive) -> Self {
        Self {
            id: ObjectId::new(),
            primitive,
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: 1.0,
            color: Rgb::WHITE,
            opacity: 1.0,
            tag: Tag::Reference,
            parent: None,
            label: None,
        }
    }

    pub fn sphere(radius: f32) -> Self {
        Self::new(Primitive::Sphere { radius })
    }

    pub fn cuboid(size: f32) -> Self {
        Self::new(Primitive::Cuboid { size })
    }

    pub fn line(start: Vec3, end: Vec3) -> Self {
        Self::new(Primitive::Line { end }).at(start)
    }

    pub fn at(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn colored(mut self, color: Rgb) -> Self {
        self.color = color;
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_rotation_z(mut self, angle: f32) -> Self {
        self.rotation.z = angle;
        self
    }

    pub fn labeled(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}
