use glam::Vec3;
use std::time::Duration;

use super::easing::Easing;
use crate::scene::SceneObject;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    Running,
    Finished,
}

/// What an animation does to its target. Bounded variants finish when
/// their duration elapses; periodic ones run until cancelled.
#[derive(Debug, Clone, PartialEq)]
pub enum Animation {
    MoveTo {
        from: Vec3,
        to: Vec3,
        duration: Duration,
        easing: Easing,
    },
    ScaleTo {
        from: f32,
        to: f32,
        duration: Duration,
    },
    /// y = base.y + amplitude * sin(t + phase), spinning about Z.
    Bob {
        base: Vec3,
        amplitude: f32,
        phase: f32,
        spin_rate: f32,
    },
    /// scale = base * (1 + amplitude * sin(frequency * t))
    Pulse {
        base_scale: f32,
        amplitude: f32,
        frequency: f32,
    },
    /// opacity = base + amplitude * sin(frequency * t)
    Glow {
        base_opacity: f32,
        amplitude: f32,
        frequency: f32,
    },
    /// Rotation about Y at `rate` rad/s.
    Spin { rate: f32 },
}

fn progress(elapsed: Duration, duration: Duration) -> f32 {
    if duration.is_zero() {
        1.0
    } else {
        (elapsed.as_secs_f32() / duration.as_secs_f32()).min(1.0)
    }
}

impl Animation {
    pub fn apply(&self, elapsed: Duration, object: &mut SceneObject) -> Progress {
        let t = elapsed.as_secs_f32();
        match self {
            Animation::MoveTo {
                from,
                to,
                duration,
                easing,
            } => {
                let p = progress(elapsed, *duration);
                object.position = from.lerp(*to, easing.apply(p));
                finished_when(p >= 1.0)
            }
            Animation::ScaleTo { from, to, duration } => {
                let p = progress(elapsed, *duration);
                object.scale = from + (to - from) * p;
                finished_when(p >= 1.0)
            }
            Animation::Bob {
                base,
                amplitude,
                phase,
                spin_rate,
            } => {
                object.position = Vec3::new(base.x, base.y + amplitude * (t + phase).sin(), base.z);
                object.rotation.z = spin_rate * t;
                Progress::Running
            }
            Animation::Pulse {
                base_scale,
                amplitude,
                frequency,
            } => {
                object.scale = base_scale * (1.0 + amplitude * (frequency * t).sin());
                Progress::Running
            }
            Animation::Glow {
                base_opacity,
                amplitude,
                frequency,
            } => {
                object.opacity = base_opacity + amplitude * (frequency * t).sin();
                Progress::Running
            }
            Animation::Spin { rate } => {
                object.rotation.y = rate * t;
                Progress::Running
            }
        }
    }
}

fn finished_when(done: bool) -> Progress {
    if done {
        Progress::Finished
    } else {
        Progress::Running
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_to_lands_exactly_on_target() {
        let mut object = SceneObject::sphere(0.4);
        let animation = Animation::MoveTo {
            from: Vec3::ZERO,
            to: Vec3::new(3.0, -1.0, -1.0),
            duration: Duration::from_millis(800),
            easing: Easing::EaseInOutCubic,
        };
        assert_eq!(
            animation.apply(Duration::from_millis(400), &mut object),
            Progress::Running
        );
        assert!((object.position - Vec3::new(1.5, -0.5, -0.5)).length() < 1e-5);
        assert_eq!(
            animation.apply(Duration::from_secs(5), &mut object),
            Progress::Finished
        );
        assert_eq!(object.position, Vec3::new(3.0, -1.0, -1.0));
    }

    #[test]
    fn test_scale_grows_linearly() {
        let mut object = SceneObject::sphere(0.1).with_scale(0.0);
        let animation = Animation::ScaleTo {
            from: 0.0,
            to: 0.8,
            duration: Duration::from_millis(500),
        };
        animation.apply(Duration::from_millis(250), &mut object);
        assert!((object.scale - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_periodic_animations_never_finish() {
        let mut object = SceneObject::sphere(0.3);
        let glow = Animation::Glow {
            base_opacity: 0.7,
            amplitude: 0.2,
            frequency: 2.0,
        };
        assert_eq!(
            glow.apply(Duration::from_secs(3600), &mut object),
            Progress::Running
        );
        assert!(object.opacity >= 0.5 && object.opacity <= 0.9);
    }
}
