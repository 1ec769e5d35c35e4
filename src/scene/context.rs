use glam::Vec3;
use std::time::Instant;
use tracing::{debug, info};

use super::camera::{OrbitCamera, Viewport};
use super::graph::Scene;
use super::lighting::Lighting;
use super::object::{ObjectId, SceneObject};
use super::reference::reference_geometry;
use super::tag::Tag;
use crate::animation::{Animation, AnimationHandle, AnimationRegistry, TickReport};
use crate::common::Rgb;

const RESULT_COLOR: u32 = 0x00ffff;
const RESULT_RADIUS: f32 = 0.8;
const HALO_RADIUS: f32 = 1.2;
const HALO_OPACITY: f32 = 0.3;
const AXIS_LINE_OPACITY: f32 = 0.6;
/// Matches a 0.01 rad per frame spin at 60 fps.
const RESULT_SPIN_RATE: f32 = 0.6;

/// Objects making up the displayed analysis result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResultGroup {
    pub point: ObjectId,
    pub halo: ObjectId,
    pub axis_lines: [ObjectId; 3],
    pub position: Vec3,
}

/// The single scene, camera and animation set of one visualization
/// surface. Everything that draws or animates goes through here.
#[derive(Debug)]
pub struct SceneContext {
    scene: Scene,
    camera: OrbitCamera,
    viewport: Viewport,
    lighting: Lighting,
    animations: AnimationRegistry,
    result: Option<ResultGroup>,
    auto_rotate: bool,
    last_tick: Option<Instant>,
}

impl SceneContext {
    pub fn create(viewport: Viewport) -> Self {
        let mut scene = Scene::new();
        for object in reference_geometry() {
            scene.insert(object);
        }
        info!(
            "Created scene context {}x{} with {} reference objects",
            viewport.width,
            viewport.height,
            scene.len()
        );
        Self {
            scene,
            camera: OrbitCamera::default(),
            viewport,
            lighting: Lighting::default(),
            animations: AnimationRegistry::new(),
            result: None,
            auto_rotate: false,
            last_tick: None,
        }
    }

    pub fn with_auto_rotate(mut self, enabled: bool) -> Self {
        self.auto_rotate = enabled;
        self
    }

    /// Tears the surface down; pending animations are cancelled.
    pub fn dispose(self) {
        drop(self);
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut OrbitCamera {
        &mut self.camera
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn lighting(&self) -> &Lighting {
        &self.lighting
    }

    pub fn animations(&self) -> &AnimationRegistry {
        &self.animations
    }

    pub fn result(&self) -> Option<&ResultGroup> {
        self.result.as_ref()
    }

    pub fn auto_rotate(&self) -> bool {
        self.auto_rotate
    }

    pub fn set_auto_rotate(&mut self, enabled: bool) {
        self.auto_rotate = enabled;
    }

    /// Keeps the camera aspect in step with the drawing surface.
    pub fn resize(&mut self, width: f32, height: f32) {
        let viewport = Viewport::new(width, height);
        if viewport != self.viewport {
            debug!("Viewport resized to {}x{}", width, height);
            self.viewport = viewport;
        }
    }

    pub fn add(&mut self, tag: Tag, mut object: SceneObject) -> ObjectId {
        object.tag = tag;
        self.scene.insert(object)
    }

    /// Adds `object` below `parent`, in the parent's tag group.
    pub fn attach(&mut self, parent: ObjectId, mut object: SceneObject) -> Option<ObjectId> {
        let tag = self.scene.get(parent)?.tag;
        object.parent = Some(parent);
        object.tag = tag;
        Some(self.scene.insert(object))
    }

    pub fn animate(&mut self, target: ObjectId, animation: Animation, now: Instant) -> AnimationHandle {
        self.animations.register(target, animation, now)
    }

    /// Removes an object and its attachments, cancelling their
    /// animations first.
    pub fn remove(&mut self, id: ObjectId) -> usize {
        let members = self.scene.subtree(id);
        self.animations.cancel_targets(&members);
        self.scene.remove_all(&members).len()
    }

    /// Removes every object carrying `tag`.
    pub fn clear_group(&mut self, tag: Tag) -> usize {
        let ids = self.scene.ids_tagged(tag);
        if ids.is_empty() {
            return 0;
        }
        self.animations.cancel_targets(&ids);
        let removed = self.scene.remove_all(&ids).len();
        if tag == Tag::Result {
            self.result = None;
        }
        debug!("Cleared {} objects tagged {:?}", removed, tag);
        removed
    }

    /// Removes all step and demo content.
    pub fn clear_transient(&mut self) -> usize {
        let ids: Vec<ObjectId> = self
            .scene
            .iter()
            .filter(|o| o.tag.is_transient())
            .map(|o| o.id)
            .collect();
        self.animations.cancel_targets(&ids);
        self.scene.remove_all(&ids).len()
    }

    pub fn transient_count(&self) -> usize {
        self.scene.iter().filter(|o| o.tag.is_transient()).count()
    }

    /// Replaces the result point, halo and axis lines and focuses the
    /// camera orbit on `position`.
    pub fn set_result_point(&mut self, position: Vec3, now: Instant) -> ResultGroup {
        self.clear_group(Tag::Result);

        let color = Rgb::from_hex(RESULT_COLOR);
        let point = self.add(
            Tag::Result,
            SceneObject::sphere(RESULT_RADIUS).at(position).colored(color),
        );
        let halo = self.add(
            Tag::Result,
            SceneObject::sphere(HALO_RADIUS)
                .at(position)
                .colored(color)
                .with_opacity(HALO_OPACITY),
        );
        let line_to = |end: Vec3, hex: u32| {
            SceneObject::line(position, end)
                .colored(Rgb::from_hex(hex))
                .with_opacity(AXIS_LINE_OPACITY)
        };
        let axis_lines = [
            self.add(Tag::Result, line_to(Vec3::new(position.x, 0.0, 0.0), 0xff4444)),
            self.add(Tag::Result, line_to(Vec3::new(0.0, position.y, 0.0), 0x44ff44)),
            self.add(Tag::Result, line_to(Vec3::new(0.0, 0.0, position.z), 0x4444ff)),
        ];
        self.animate(point, Animation::Spin { rate: RESULT_SPIN_RATE }, now);
        self.camera.retarget(position);

        info!("Result point placed at {:?}", position);
        let group = ResultGroup {
            point,
            halo,
            axis_lines,
            position,
        };
        self.result = Some(group);
        group
    }

    pub fn reset_camera(&mut self) {
        self.camera.reset();
    }

    /// Advances camera auto-rotation and every animation to `now`.
    pub fn advance(&mut self, now: Instant) -> TickReport {
        if let Some(last) = self.last_tick {
            let dt = now.saturating_duration_since(last).as_secs_f32();
            if self.auto_rotate {
                self.camera.auto_rotate(dt);
            }
        }
        self.last_tick = Some(now);
        self.animations.tick(now, &mut self.scene)
    }
}

impl Drop for SceneContext {
    fn drop(&mut self) {
        let cancelled = self.animations.cancel_all();
        debug!(
            "Disposed scene context ({} objects, {} animations cancelled)",
            self.scene.len(),
            cancelled
        );
    }
}
