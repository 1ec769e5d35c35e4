use glam::Vec3;

use super::object::SceneObject;
use crate::common::Rgb;

pub const GRID_SIZE: f32 = 20.0;
pub const GRID_DIVISIONS: usize = 20;
pub const AXIS_LENGTH: f32 = 10.0;

const GRID_CENTER_COLOR: u32 = 0x444444;
const GRID_COLOR: u32 = 0x222222;

/// Floor grid, RGB axes and a marker sphere at the end of each axis.
pub fn reference_geometry() -> Vec<SceneObject> {
    let mut objects = Vec::new();
    let half = GRID_SIZE / 2.0;
    let step = GRID_SIZE / GRID_DIVISIONS as f32;

    for i in 0..=GRID_DIVISIONS {
        let offset = -half + i as f32 * step;
        let color = if i == GRID_DIVISIONS / 2 {
            GRID_CENTER_COLOR
        } else {
            GRID_COLOR
        };
        objects.push(
            SceneObject::line(Vec3::new(offset, 0.0, -half), Vec3::new(offset, 0.0, half))
                .colored(Rgb::from_hex(color)),
        );
        objects.push(
            SceneObject::line(Vec3::new(-half, 0.0, offset), Vec3::new(half, 0.0, offset))
                .colored(Rgb::from_hex(color)),
        );
    }

    for (axis, hex) in [(Vec3::X, 0xff0000), (Vec3::Y, 0x00ff00), (Vec3::Z, 0x0000ff)] {
        objects.push(SceneObject::line(Vec3::ZERO, axis * AXIS_LENGTH).colored(Rgb::from_hex(hex)));
        objects.push(
            SceneObject::sphere(0.3)
                .at(axis * AXIS_LENGTH)
                .colored(Rgb::from_hex(hex)),
        );
    }

    objects
}
