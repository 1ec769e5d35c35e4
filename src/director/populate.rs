use glam::Vec3;
use rand::Rng;
use std::f32::consts::TAU;
use std::time::Instant;
use tracing::debug;

use super::recipes::{ColorSpec, Motion, RecipeElement};
use crate::animation::Animation;
use crate::common::Rgb;
use crate::scene::{ObjectId, Primitive, SceneContext, SceneObject, Tag};

const BOB_AMPLITUDE: f32 = 0.5;
const BOB_SPIN_RATE: f32 = 0.5;
const PULSE_AMPLITUDE: f32 = 0.2;
const PULSE_FREQUENCY: f32 = 3.0;
const GLOW_AMPLITUDE: f32 = 0.2;
const GLOW_FREQUENCY: f32 = 2.0;
const RAY_RADIUS: f32 = 0.02;
const RAY_OPACITY: f32 = 0.8;

/// One drawn activation: its value and where it sits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Activation {
    pub value: f32,
    pub position: Vec3,
}

/// Draws `count` activation values, keeping only the positive ones.
/// Values are drawn before positions so the survivor count depends only
/// on the value stream.
pub fn activation_samples<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
    range: (f32, f32),
    spread: [f32; 3],
) -> Vec<Activation> {
    let (low, high) = range;
    let values: Vec<f32> = (0..count)
        .map(|_| low + rng.random::<f32>() * (high - low))
        .collect();
    values
        .into_iter()
        .filter(|v| *v > 0.0)
        .map(|value| Activation {
            value,
            position: Vec3::new(
                (rng.random::<f32>() - 0.5) * spread[0],
                (rng.random::<f32>() - 0.5) * spread[1],
                (rng.random::<f32>() - 0.5) * spread[2],
            ),
        })
        .collect()
}

fn resolve_color<R: Rng + ?Sized>(spec: ColorSpec, rng: &mut R) -> Rgb {
    match spec {
        ColorSpec::Hex(hex) => Rgb::from_hex(hex),
        ColorSpec::Jitter { min, span } => Rgb::new(
            min[0] + rng.random::<f32>() * span[0],
            min[1] + rng.random::<f32>() * span[1],
            min[2] + rng.random::<f32>() * span[2],
        ),
    }
}

fn add_animated(
    ctx: &mut SceneContext,
    tag: Tag,
    object: SceneObject,
    animation: Option<Animation>,
    now: Instant,
) -> ObjectId {
    let id = ctx.add(tag, object);
    if let Some(animation) = animation {
        ctx.animate(id, animation, now);
    }
    id
}

/// Builds every element of a recipe into the scene under `tag`. Returns
/// the number of objects added.
pub fn populate<R: Rng + ?Sized>(
    elements: &[RecipeElement],
    tag: Tag,
    ctx: &mut SceneContext,
    rng: &mut R,
    now: Instant,
) -> usize {
    let mut added = 0;
    for element in elements {
        match *element {
            RecipeElement::Lattice {
                x,
                y,
                z,
                primitive,
                color,
                opacity,
            } => {
                for px in x.values() {
                    for py in y.values() {
                        for pz in z.values() {
                            let object = SceneObject::new(primitive)
                                .at(Vec3::new(px, py, pz))
                                .colored(resolve_color(color, rng))
                                .with_opacity(opacity);
                            ctx.add(tag, object);
                            added += 1;
                        }
                    }
                }
            }
            RecipeElement::Fixed {
                primitive,
                position,
                hex,
                opacity,
                label,
                motion,
            } => {
                let position = Vec3::from_array(position);
                let object = SceneObject::new(primitive)
                    .at(position)
                    .colored(Rgb::from_hex(hex))
                    .with_opacity(opacity)
                    .labeled(label);
                let animation = match motion {
                    Motion::Still => None,
                    Motion::Bob { phase } => Some(Animation::Bob {
                        base: position,
                        amplitude: BOB_AMPLITUDE,
                        phase,
                        spin_rate: BOB_SPIN_RATE,
                    }),
                    Motion::Pulse => Some(Animation::Pulse {
                        base_scale: 1.0,
                        amplitude: PULSE_AMPLITUDE,
                        frequency: PULSE_FREQUENCY,
                    }),
                    Motion::Glow => Some(Animation::Glow {
                        base_opacity: opacity - GLOW_AMPLITUDE,
                        amplitude: GLOW_AMPLITUDE,
                        frequency: GLOW_FREQUENCY,
                    }),
                };
                add_animated(ctx, tag, object, animation, now);
                added += 1;
            }
            RecipeElement::Activations {
                samples,
                value_range,
                spread,
                radius,
                opacity,
                grow,
            } => {
                for activation in activation_samples(rng, samples, value_range, spread) {
                    let v = activation.value;
                    let object = SceneObject::sphere(radius)
                        .at(activation.position)
                        .colored(Rgb::new(v / 2.0, v / 2.0, 1.0))
                        .with_opacity(opacity)
                        .with_scale(0.0);
                    let animation = Animation::ScaleTo {
                        from: 0.0,
                        to: v * 0.5,
                        duration: grow,
                    };
                    add_animated(ctx, tag, object, Some(animation), now);
                    added += 1;
                }
            }
            RecipeElement::Cluster {
                center,
                hex,
                label,
                count,
                ring_radius,
                z_jitter,
                radius,
                opacity,
            } => {
                let center = Vec3::from_array(center);
                let color = Rgb::from_hex(hex);
                let (inner, outer) = ring_radius;
                for i in 0..count {
                    let angle = i as f32 / count as f32 * TAU;
                    let r = inner + rng.random::<f32>() * (outer - inner);
                    let offset = Vec3::new(
                        angle.cos() * r,
                        angle.sin() * r,
                        (rng.random::<f32>() - 0.5) * z_jitter,
                    );
                    let mut object = SceneObject::sphere(radius)
                        .at(center + offset)
                        .colored(color)
                        .with_opacity(opacity);
                    if i == 0 {
                        object = object.labeled(label);
                    }
                    let pulse = Animation::Pulse {
                        base_scale: 1.0,
                        amplitude: PULSE_AMPLITUDE,
                        frequency: PULSE_FREQUENCY,
                    };
                    add_animated(ctx, tag, object, Some(pulse), now);
                    added += 1;
                }
            }
            RecipeElement::Ray {
                label,
                angle,
                confidence,
                hex,
            } => {
                let reach = 1.5 * confidence;
                let object = SceneObject::new(Primitive::Cylinder {
                    radius: RAY_RADIUS,
                    length: 3.0 * confidence,
                })
                .at(Vec3::new(angle.cos() * reach, angle.sin() * reach, 0.0))
                .with_rotation_z(angle + std::f32::consts::FRAC_PI_2)
                .colored(Rgb::from_hex(hex))
                .with_opacity(RAY_OPACITY)
                .labeled(label);
                ctx.add(tag, object);
                added += 1;
            }
        }
    }
    debug!("Populated {} objects for {:?}", added, tag);
    added
}
