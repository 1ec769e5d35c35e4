use egui::{Color32, Pos2, Sense, Shape, Stroke};
use glam::{Mat3, Vec3};

use crate::app::views::View;
use crate::common::Rgb;
use crate::scene::{Primitive, Projected, SceneContext, SceneObject};

const BACKGROUND: Color32 = Color32::from_rgb(0x0a, 0x0a, 0x0a);
const ORBIT_SPEED: f32 = 0.01;
const LABEL_COLOR: Color32 = Color32::from_rgb(0xdd, 0xdd, 0xdd);

const CUBE_FACES: [Vec3; 6] = [
    Vec3::X,
    Vec3::NEG_X,
    Vec3::Y,
    Vec3::NEG_Y,
    Vec3::Z,
    Vec3::NEG_Z,
];

fn color32(color: Rgb, opacity: f32) -> Color32 {
    let [r, g, b, a] = color.to_rgba8(opacity);
    Color32::from_rgba_unmultiplied(r, g, b, a)
}

fn to_pos(origin: Pos2, p: &Projected) -> Pos2 {
    origin + egui::vec2(p.screen.x, p.screen.y)
}

/// A shape queued for painting, ordered far to near.
struct DrawItem {
    depth: f32,
    shapes: Vec<Shape>,
}

/// Painter-based rendering of the scene with orbit and zoom controls.
pub struct SceneView<'a> {
    ctx: &'a mut SceneContext,
}

impl<'a> SceneView<'a> {
    pub fn new(ctx: &'a mut SceneContext) -> Self {
        Self { ctx }
    }

    fn handle_input(&mut self, ui: &egui::Ui, response: &egui::Response) {
        if response.dragged() {
            let delta = response.drag_delta();
            self.ctx
                .camera_mut()
                .orbit(-delta.x * ORBIT_SPEED, -delta.y * ORBIT_SPEED);
        }
        if response.hovered() {
            let scroll = ui.input(|i| i.raw_scroll_delta.y);
            if scroll != 0.0 {
                self.ctx.camera_mut().zoom(scroll.signum());
            }
        }
    }

    fn project(&self, world: Vec3) -> Option<Projected> {
        self.ctx.camera().project(world, self.ctx.viewport())
    }

    fn quad(&self, origin: Pos2, corners: [Vec3; 4], fill: Color32) -> Option<Shape> {
        let mut points = Vec::with_capacity(4);
        for corner in corners {
            points.push(to_pos(origin, &self.project(corner)?));
        }
        Some(Shape::convex_polygon(points, fill, Stroke::NONE))
    }

    fn object_item(&self, origin: Pos2, object: &SceneObject) -> Option<DrawItem> {
        let scene = self.ctx.scene();
        let center = scene.world_position(object.id)?;
        let scale = scene.world_scale(object.id)?;
        let projected = self.project(center)?;
        let lighting = self.ctx.lighting();
        let eye = self.ctx.camera().eye_position();
        let spin = Mat3::from_rotation_z(object.rotation.z);
        let mut shapes = Vec::new();

        match object.primitive {
            Primitive::Sphere { radius } => {
                let r = radius * scale * projected.pixels_per_unit;
                if r < 0.5 {
                    return None;
                }
                let shade = lighting.intensity_for(eye - center).max(0.35);
                let pos = to_pos(origin, &projected);
                shapes.push(Shape::circle_filled(
                    pos,
                    r,
                    color32(object.color.scaled(shade), object.opacity),
                ));
                if object.opacity > 0.5 && r > 3.0 {
                    let toward = lighting.highlight_direction(self.ctx.camera().view_matrix());
                    shapes.push(Shape::circle_filled(
                        pos + egui::vec2(toward.x, toward.y) * r * 0.4,
                        r * 0.3,
                        Color32::from_white_alpha(60),
                    ));
                }
            }
            Primitive::Cuboid { size } => {
                let half = size * scale * 0.5;
                for normal in CUBE_FACES {
                    if normal.dot(eye - center) <= 0.0 {
                        continue;
                    }
                    let (u, v) = normal.any_orthonormal_pair();
                    let face = center + normal * half;
                    let corners = [
                        face + (u + v) * half,
                        face + (u - v) * half,
                        face - (u + v) * half,
                        face - (u - v) * half,
                    ];
                    let shade = lighting.intensity_for(normal);
                    shapes.extend(self.quad(
                        origin,
                        corners,
                        color32(object.color.scaled(shade), object.opacity),
                    ));
                }
            }
            Primitive::Plane { size } => {
                let half = size * scale * 0.5;
                let corners = [
                    center + spin * Vec3::new(half, half, 0.0),
                    center + spin * Vec3::new(-half, half, 0.0),
                    center + spin * Vec3::new(-half, -half, 0.0),
                    center + spin * Vec3::new(half, -half, 0.0),
                ];
                shapes.extend(self.quad(origin, corners, color32(object.color, object.opacity)));
            }
            Primitive::Line { end } => {
                let end = self.project(end)?;
                shapes.push(Shape::line_segment(
                    [to_pos(origin, &projected), to_pos(origin, &end)],
                    Stroke::new(1.0, color32(object.color, object.opacity)),
                ));
            }
            Primitive::Cylinder { radius, length } => {
                let half = spin * Vec3::new(0.0, length * scale * 0.5, 0.0);
                let a = self.project(center - half)?;
                let b = self.project(center + half)?;
                let width = (radius * scale * 2.0 * projected.pixels_per_unit).max(1.0);
                shapes.push(Shape::line_segment(
                    [to_pos(origin, &a), to_pos(origin, &b)],
                    Stroke::new(width, color32(object.color, object.opacity)),
                ));
            }
        }

        Some(DrawItem {
            depth: projected.depth,
            shapes,
        })
    }

    fn draw_labels(&self, painter: &egui::Painter, origin: Pos2) {
        let font = egui::FontId::proportional(12.0);
        for object in self.ctx.scene().iter() {
            let Some(label) = object.label.as_deref() else {
                continue;
            };
            let Some(world) = self.ctx.scene().world_position(object.id) else {
                continue;
            };
            if let Some(projected) = self.project(world + Vec3::Y * 0.6) {
                painter.text(
                    to_pos(origin, &projected),
                    egui::Align2::CENTER_BOTTOM,
                    label,
                    font.clone(),
                    LABEL_COLOR,
                );
            }
        }
    }
}

impl View for SceneView<'_> {
    fn draw(&mut self, ui: &mut egui::Ui) {
        let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::drag());
        let rect = response.rect;
        self.ctx.resize(rect.width(), rect.height());
        self.handle_input(ui, &response);

        painter.rect_filled(rect, 0.0, BACKGROUND);

        let mut items: Vec<DrawItem> = self
            .ctx
            .scene()
            .iter()
            .filter_map(|object| self.object_item(rect.min, object))
            .collect();
        items.sort_by(|a, b| b.depth.total_cmp(&a.depth));

        let clipped = painter.with_clip_rect(rect);
        for item in items {
            clipped.extend(item.shapes);
        }
        self.draw_labels(&clipped, rect.min);
    }
}
