//! Scene content for each pipeline step, expressed as data.

use std::f32::consts::{FRAC_PI_2, PI};
use std::time::Duration;

use super::step::PipelineStep;
use crate::scene::Primitive;

/// Inclusive range sampled at a fixed step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisRange {
    pub start: f32,
    pub end: f32,
    pub step: f32,
}

impl AxisRange {
    pub const fn new(start: f32, end: f32, step: f32) -> Self {
        Self { start, end, step }
    }

    pub const fn single(value: f32) -> Self {
        Self::new(value, value, 1.0)
    }

    pub fn values(&self) -> impl Iterator<Item = f32> + '_ {
        let count = ((self.end - self.start) / self.step + 1e-4).floor().max(-1.0) as i64 + 1;
        (0..count.max(0)).map(move |i| self.start + i as f32 * self.step)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColorSpec {
    Hex(u32),
    /// Each channel uniform in [min, min + span).
    Jitter { min: [f32; 3], span: [f32; 3] },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Motion {
    Still,
    /// Vertical bob with a phase offset, spinning about Z.
    Bob { phase: f32 },
    Pulse,
    Glow,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RecipeElement {
    /// One primitive at every point of a 3D lattice.
    Lattice {
        x: AxisRange,
        y: AxisRange,
        z: AxisRange,
        primitive: Primitive,
        color: ColorSpec,
        opacity: f32,
    },
    Fixed {
        primitive: Primitive,
        position: [f32; 3],
        hex: u32,
        opacity: f32,
        label: &'static str,
        motion: Motion,
    },
    /// Random activations in `value_range`; only positive ones are drawn,
    /// sized and tinted by their value.
    Activations {
        samples: usize,
        value_range: (f32, f32),
        spread: [f32; 3],
        radius: f32,
        opacity: f32,
        grow: Duration,
    },
    /// Spheres on a ring around `center`.
    Cluster {
        center: [f32; 3],
        hex: u32,
        label: &'static str,
        count: usize,
        ring_radius: (f32, f32),
        z_jitter: f32,
        radius: f32,
        opacity: f32,
    },
    /// Confidence rod pointing away from the origin at `angle`.
    Ray {
        label: &'static str,
        angle: f32,
        confidence: f32,
        hex: u32,
    },
}

const INPUT: &[RecipeElement] = &[RecipeElement::Lattice {
    x: AxisRange::new(-2.0, 2.0, 0.5),
    y: AxisRange::new(-2.0, 2.0, 0.5),
    z: AxisRange::new(-1.0, 1.0, 0.5),
    primitive: Primitive::Cuboid { size: 0.2 },
    color: ColorSpec::Jitter {
        min: [0.5, 0.5, 0.5],
        span: [0.5, 0.5, 0.5],
    },
    opacity: 0.8,
}];

const CONVOLUTION: &[RecipeElement] = &[
    RecipeElement::Fixed {
        primitive: Primitive::Plane { size: 1.0 },
        position: [-3.0, 2.0, 0.0],
        hex: 0xff4444,
        opacity: 0.8,
        label: "Edge Filter",
        motion: Motion::Bob { phase: 0.0 },
    },
    RecipeElement::Fixed {
        primitive: Primitive::Plane { size: 1.0 },
        position: [0.0, 2.0, 0.0],
        hex: 0x44ff44,
        opacity: 0.8,
        label: "Texture Filter",
        motion: Motion::Bob { phase: 1.0 },
    },
    RecipeElement::Fixed {
        primitive: Primitive::Plane { size: 1.0 },
        position: [3.0, 2.0, 0.0],
        hex: 0x4444ff,
        opacity: 0.8,
        label: "Shape Filter",
        motion: Motion::Bob { phase: 2.0 },
    },
];

const RELU: &[RecipeElement] = &[RecipeElement::Activations {
    samples: 100,
    value_range: (-2.0, 2.0),
    spread: [6.0, 6.0, 2.0],
    radius: 0.1,
    opacity: 0.8,
    grow: Duration::from_millis(500),
}];

const POOLING: &[RecipeElement] = &[
    RecipeElement::Lattice {
        x: AxisRange::new(-3.0, -1.0, 0.3),
        y: AxisRange::new(-2.0, 2.0, 0.3),
        z: AxisRange::single(0.0),
        primitive: Primitive::Cuboid { size: 0.1 },
        color: ColorSpec::Hex(0x666666),
        opacity: 0.5,
    },
    RecipeElement::Lattice {
        x: AxisRange::new(1.0, 3.0, 0.6),
        y: AxisRange::new(-2.0, 2.0, 0.6),
        z: AxisRange::single(0.0),
        primitive: Primitive::Cuboid { size: 0.2 },
        color: ColorSpec::Jitter {
            min: [0.5, 0.5, 1.0],
            span: [0.5, 0.5, 0.0],
        },
        opacity: 0.8,
    },
];

const fn feature_cluster(center: [f32; 3], hex: u32, label: &'static str) -> RecipeElement {
    RecipeElement::Cluster {
        center,
        hex,
        label,
        count: 15,
        ring_radius: (0.2, 1.0),
        z_jitter: 0.5,
        radius: 0.15,
        opacity: 0.7,
    }
}

const FEATURES: &[RecipeElement] = &[
    feature_cluster([-2.0, 2.0, 0.0], 0xff6b6b, "Edges"),
    feature_cluster([2.0, 2.0, 0.0], 0x4ecdc4, "Textures"),
    feature_cluster([0.0, -2.0, 0.0], 0x45b7d1, "Shapes"),
    feature_cluster([0.0, 0.0, 1.0], 0xffd93d, "Complex Features"),
];

const PREDICTION: &[RecipeElement] = &[
    RecipeElement::Fixed {
        primitive: Primitive::Sphere { radius: 0.3 },
        position: [0.0, 0.0, 0.0],
        hex: 0xffd700,
        opacity: 0.9,
        label: "Prediction",
        motion: Motion::Glow,
    },
    RecipeElement::Ray {
        label: "Dog: 94%",
        angle: 0.0,
        confidence: 0.94,
        hex: 0x00ff00,
    },
    RecipeElement::Ray {
        label: "Cat: 4%",
        angle: FRAC_PI_2,
        confidence: 0.04,
        hex: 0xff4444,
    },
    RecipeElement::Ray {
        label: "Bird: 2%",
        angle: PI,
        confidence: 0.02,
        hex: 0x4444ff,
    },
];

pub fn recipe(step: PipelineStep) -> &'static [RecipeElement] {
    match step {
        PipelineStep::Input => INPUT,
        PipelineStep::Convolution => CONVOLUTION,
        PipelineStep::Relu => RELU,
        PipelineStep::Pooling => POOLING,
        PipelineStep::Features => FEATURES,
        PipelineStep::Prediction => PREDICTION,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_range_includes_end_when_on_step() {
        let values: Vec<f32> = AxisRange::new(-2.0, 2.0, 0.5).values().collect();
        assert_eq!(values.len(), 9);
        assert_eq!(values[0], -2.0);
        assert_eq!(values[8], 2.0);
    }

    #[test]
    fn test_axis_range_stops_before_overshoot() {
        assert_eq!(AxisRange::new(-3.0, -1.0, 0.3).values().count(), 7);
        assert_eq!(AxisRange::new(-2.0, 2.0, 0.3).values().count(), 14);
        assert_eq!(AxisRange::new(1.0, 3.0, 0.6).values().count(), 4);
        assert_eq!(AxisRange::new(-2.0, 2.0, 0.6).values().count(), 7);
        assert_eq!(AxisRange::single(0.0).values().collect::<Vec<_>>(), vec![0.0]);
    }

    #[test]
    fn test_every_step_has_a_recipe() {
        for step in PipelineStep::ALL {
            assert!(!recipe(step).is_empty(), "{:?} has no content", step);
        }
    }
}
