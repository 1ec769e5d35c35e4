use indexmap::IndexMap;
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use super::task::{Animation, Progress};
use crate::scene::{ObjectId, Scene};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnimationId(u64);

/// Returned on registration; the token cancels the task from outside.
#[derive(Debug, Clone)]
pub struct AnimationHandle {
    pub id: AnimationId,
    pub token: CancellationToken,
}

#[derive(Debug)]
struct AnimationTask {
    target: ObjectId,
    animation: Animation,
    started_at: Instant,
    token: CancellationToken,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    pub applied: usize,
    pub finished: usize,
    pub cancelled: usize,
}

/// Every running animation, keyed by id. Tasks are dropped on the tick
/// after they finish or their token is cancelled.
#[derive(Debug, Default)]
pub struct AnimationRegistry {
    tasks: IndexMap<AnimationId, AnimationTask>,
    next_id: u64,
}

impl AnimationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &mut self,
        target: ObjectId,
        animation: Animation,
        now: Instant,
    ) -> AnimationHandle {
        let id = AnimationId(self.next_id);
        self.next_id += 1;
        let token = CancellationToken::new();
        trace!("Registering animation {:?} on {}", id, target);
        self.tasks.insert(
            id,
            AnimationTask {
                target,
                animation,
                started_at: now,
                token: token.clone(),
            },
        );
        AnimationHandle { id, token }
    }

    pub fn cancel(&mut self, id: AnimationId) -> bool {
        match self.tasks.shift_remove(&id) {
            Some(task) => {
                task.token.cancel();
                true
            }
            None => false,
        }
    }

    /// Cancels and drops every task animating one of `targets`.
    pub fn cancel_targets(&mut self, targets: &[ObjectId]) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|_, task| {
            if targets.contains(&task.target) {
                task.token.cancel();
                false
            } else {
                true
            }
        });
        let cancelled = before - self.tasks.len();
        if cancelled > 0 {
            debug!("Cancelled {} animations for {} objects", cancelled, targets.len());
        }
        cancelled
    }

    pub fn cancel_all(&mut self) -> usize {
        let count = self.tasks.len();
        for task in self.tasks.values() {
            task.token.cancel();
        }
        self.tasks.clear();
        count
    }

    pub fn tick(&mut self, now: Instant, scene: &mut Scene) -> TickReport {
        let mut report = TickReport::default();
        self.tasks.retain(|_, task| {
            if task.token.is_cancelled() {
                report.cancelled += 1;
                return false;
            }
            let Some(object) = scene.get_mut(task.target) else {
                // Target removed without going through cancel_targets.
                task.token.cancel();
                report.cancelled += 1;
                return false;
            };
            report.applied += 1;
            let elapsed = now.saturating_duration_since(task.started_at);
            match task.animation.apply(elapsed, object) {
                Progress::Running => true,
                Progress::Finished => {
                    report.finished += 1;
                    false
                }
            }
        });
        report
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn active_for(&self, target: ObjectId) -> usize {
        self.tasks.values().filter(|t| t.target == target).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::Easing;
    use crate::scene::SceneObject;
    use glam::Vec3;
    use std::time::Duration;

    fn move_to(to: Vec3) -> Animation {
        Animation::MoveTo {
            from: Vec3::ZERO,
            to,
            duration: Duration::from_millis(500),
            easing: Easing::Linear,
        }
    }

    #[test]
    fn test_finished_tasks_are_dropped() {
        let mut scene = Scene::new();
        let id = scene.insert(SceneObject::sphere(0.4));
        let mut registry = AnimationRegistry::new();
        let start = Instant::now();
        registry.register(id, move_to(Vec3::X), start);

        let report = registry.tick(start + Duration::from_millis(100), &mut scene);
        assert_eq!(report.applied, 1);
        assert_eq!(registry.len(), 1);

        let report = registry.tick(start + Duration::from_secs(1), &mut scene);
        assert_eq!(report.finished, 1);
        assert!(registry.is_empty());
        assert_eq!(scene.get(id).unwrap().position, Vec3::X);
    }

    #[test]
    fn test_cancel_targets_stops_updates() {
        let mut scene = Scene::new();
        let a = scene.insert(SceneObject::sphere(0.4));
        let b = scene.insert(SceneObject::sphere(0.4));
        let mut registry = AnimationRegistry::new();
        let start = Instant::now();
        let handle = registry.register(a, Animation::Spin { rate: 1.0 }, start);
        registry.register(b, Animation::Spin { rate: 1.0 }, start);

        assert_eq!(registry.cancel_targets(&[a]), 1);
        assert!(handle.token.is_cancelled());
        assert_eq!(registry.active_for(a), 0);
        assert_eq!(registry.active_for(b), 1);

        registry.tick(start + Duration::from_secs(1), &mut scene);
        assert_eq!(scene.get(a).unwrap().rotation.y, 0.0);
        assert_eq!(scene.get(b).unwrap().rotation.y, 1.0);
    }

    #[test]
    fn test_external_token_cancellation_is_observed() {
        let mut scene = Scene::new();
        let id = scene.insert(SceneObject::sphere(0.4));
        let mut registry = AnimationRegistry::new();
        let start = Instant::now();
        let handle = registry.register(id, Animation::Spin { rate: 1.0 }, start);
        handle.token.cancel();

        let report = registry.tick(start + Duration::from_secs(1), &mut scene);
        assert_eq!(report.cancelled, 1);
        assert_eq!(report.applied, 0);
        assert!(registry.is_empty());
    }
}
