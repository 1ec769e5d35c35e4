use glam::Vec3;

use crate::common::Rgb;

#[derive(Debug, Clone, PartialEq)]
pub struct AmbientLight {
    pub color: Rgb,
    pub intensity: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DirectionalLight {
    pub color: Rgb,
    pub intensity: f32,
    pub position: Vec3,
}

/// One ambient plus one directional light.
#[derive(Debug, Clone, PartialEq)]
pub struct Lighting {
    pub ambient: AmbientLight,
    pub directional: DirectionalLight,
}

impl Default for Lighting {
    fn default() -> Self {
        Self {
            ambient: AmbientLight {
                color: Rgb::from_hex(0x404040),
                intensity: 0.6,
            },
            directional: DirectionalLight {
                color: Rgb::WHITE,
                intensity: 0.8,
                position: Vec3::new(50.0, 50.0, 50.0),
            },
        }
    }
}

impl Lighting {
    /// Brightness factor for a surface with the given outward normal.
    pub fn intensity_for(&self, normal: Vec3) -> f32 {
        let to_light = self.directional.position.normalize_or_zero();
        let diffuse = normal.normalize_or_zero().dot(to_light).max(0.0);
        let ambient = self.ambient.intensity
            * (self.ambient.color.r + self.ambient.color.g + self.ambient.color.b)
            / 3.0;
        (ambient + self.directional.intensity * diffuse).clamp(0.0, 1.0)
    }

    /// Offset toward the light for a sphere highlight, in view-space
    /// units of one radius.
    pub fn highlight_direction(&self, view: glam::Mat4) -> glam::Vec2 {
        let dir = view.transform_vector3(self.directional.position.normalize_or_zero());
        glam::Vec2::new(dir.x, -dir.y).normalize_or_zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lit_side_is_brighter_than_dark_side() {
        let lighting = Lighting::default();
        let lit = lighting.intensity_for(Vec3::new(1.0, 1.0, 1.0));
        let dark = lighting.intensity_for(Vec3::new(-1.0, -1.0, -1.0));
        assert!(lit > dark);
        assert!(dark > 0.0);
    }
}
