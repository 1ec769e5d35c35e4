use glam::Vec3;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Instant;
use tracing::{debug, info};

use super::demos::{
    demo_heading, demo_intro, demo_timeline, DemoAction, POINT_HALO_OPACITY, POINT_HALO_RADIUS,
    POINT_RADIUS, POINT_TRAVEL,
};
use super::explanations::ExplanationPanel;
use super::populate::populate;
use super::recipes::recipe;
use super::step::{DemoKind, Mode, PipelineStep};
use super::timeline::Timeline;
use crate::animation::{Animation, Easing};
use crate::common::Rgb;
use crate::scene::{ObjectId, SceneContext, SceneObject, Tag};

/// Owns the step/demo state machine and the two explanation panels.
/// Every transition clears the previous mode's scene content before
/// building the next.
pub struct Director {
    mode: Mode,
    rng: StdRng,
    pipeline_panel: ExplanationPanel,
    demo_panel: ExplanationPanel,
    timeline: Option<Timeline<DemoAction>>,
    moving_point: Option<ObjectId>,
}

impl Director {
    /// A fixed `seed` makes the randomized recipes reproducible.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            mode: Mode::Idle,
            rng,
            pipeline_panel: ExplanationPanel::pipeline(),
            demo_panel: ExplanationPanel::demo(),
            timeline: None,
            moving_point: None,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn pipeline_panel(&self) -> &ExplanationPanel {
        &self.pipeline_panel
    }

    pub fn demo_panel(&self) -> &ExplanationPanel {
        &self.demo_panel
    }

    pub fn demo_running(&self) -> bool {
        self.timeline.as_ref().is_some_and(|t| !t.is_finished())
    }

    fn leave_current(&mut self, ctx: &mut SceneContext) {
        if let Some(tag) = self.mode.tag() {
            ctx.clear_group(tag);
        }
        if self.timeline.take().is_some() {
            debug!("Cancelled pending demo events");
        }
        self.moving_point = None;
    }

    pub fn select_step(&mut self, step: PipelineStep, ctx: &mut SceneContext, now: Instant) {
        self.leave_current(ctx);
        let tag = Tag::Step(step);
        let added = populate(recipe(step), tag, ctx, &mut self.rng, now);
        self.pipeline_panel.show_step(step);
        self.mode = Mode::Step(step);
        info!("Showing pipeline step {} ({} objects)", step.as_str(), added);
    }

    pub fn select_demo(&mut self, kind: DemoKind, ctx: &mut SceneContext, now: Instant) {
        self.leave_current(ctx);
        self.demo_panel
            .show(demo_heading(kind), vec![demo_intro(kind).to_string()]);
        self.timeline = Some(Timeline::start(demo_timeline(kind), now));
        self.mode = Mode::Demo(kind);
        info!("Starting demo {}", kind.as_str());
        self.tick(ctx, now);
    }

    /// Clears all step and demo content, restores the default camera and
    /// both panels' default text.
    pub fn reset(&mut self, ctx: &mut SceneContext) {
        self.leave_current(ctx);
        ctx.clear_transient();
        ctx.reset_camera();
        self.pipeline_panel.reset();
        self.demo_panel.reset();
        self.mode = Mode::Idle;
        info!("Visualization reset");
    }

    /// Fires any demo events that have come due.
    pub fn tick(&mut self, ctx: &mut SceneContext, now: Instant) {
        let Mode::Demo(kind) = self.mode else {
            return;
        };
        let due = match self.timeline.as_mut() {
            Some(timeline) => timeline.due(now),
            None => return,
        };
        for action in due {
            match action {
                DemoAction::Explain {
                    heading,
                    paragraphs,
                } => self.demo_panel.show(heading, paragraphs),
                DemoAction::SpawnPoint {
                    target,
                    hex,
                    label,
                    continue_from_last,
                } => {
                    let start = if continue_from_last {
                        self.take_moving_point(ctx)
                    } else {
                        Vec3::ZERO
                    };
                    let id = spawn_point(ctx, Tag::Demo(kind), start, target, hex, label, now);
                    if continue_from_last {
                        self.moving_point = Some(id);
                    }
                }
                DemoAction::Conclude { notes } => {
                    self.demo_panel.append_notes(&notes);
                    info!("Demo {} finished", kind.as_str());
                }
            }
        }
    }

    /// Removes the current moving point, returning where it was.
    fn take_moving_point(&mut self, ctx: &mut SceneContext) -> Vec3 {
        let Some(id) = self.moving_point.take() else {
            return Vec3::ZERO;
        };
        let position = ctx.scene().get(id).map(|o| o.position).unwrap_or(Vec3::ZERO);
        ctx.remove(id);
        position
    }
}

fn spawn_point(
    ctx: &mut SceneContext,
    tag: Tag,
    start: Vec3,
    target: Vec3,
    hex: u32,
    label: String,
    now: Instant,
) -> ObjectId {
    let color = Rgb::from_hex(hex);
    let point = ctx.add(
        tag,
        SceneObject::sphere(POINT_RADIUS)
            .at(start)
            .colored(color)
            .labeled(label),
    );
    ctx.attach(
        point,
        SceneObject::sphere(POINT_HALO_RADIUS)
            .colored(color)
            .with_opacity(POINT_HALO_OPACITY),
    );
    ctx.animate(
        point,
        Animation::MoveTo {
            from: start,
            to: target,
            duration: POINT_TRAVEL,
            easing: Easing::EaseInOutCubic,
        },
        now,
    );
    point
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Viewport;
    use std::time::Duration;

    fn setup() -> (Director, SceneContext) {
        (
            Director::new(Some(17)),
            SceneContext::create(Viewport::new(800.0, 600.0)),
        )
    }

    #[test]
    fn test_step_transition_clears_previous_step() {
        let now = Instant::now();
        for from in PipelineStep::ALL {
            for to in PipelineStep::ALL {
                if from == to {
                    continue;
                }
                let (mut director, mut ctx) = setup();
                director.select_step(from, &mut ctx, now);
                director.select_step(to, &mut ctx, now);
                assert_eq!(ctx.scene().count_tagged(Tag::Step(from)), 0, "{:?} -> {:?}", from, to);
                assert_eq!(ctx.transient_count(), ctx.scene().count_tagged(Tag::Step(to)));
                assert_eq!(director.mode(), Mode::Step(to));
            }
        }
    }

    #[test]
    fn test_reselecting_a_step_rebuilds_it() {
        let (mut director, mut ctx) = setup();
        let now = Instant::now();
        director.select_step(PipelineStep::Input, &mut ctx, now);
        director.select_step(PipelineStep::Input, &mut ctx, now);
        assert_eq!(ctx.scene().count_tagged(Tag::Step(PipelineStep::Input)), 405);
    }

    #[test]
    fn test_seeded_relu_is_reproducible() {
        let now = Instant::now();
        let tag = Tag::Step(PipelineStep::Relu);
        let (mut a, mut ctx_a) = setup();
        let (mut b, mut ctx_b) = setup();
        a.select_step(PipelineStep::Relu, &mut ctx_a, now);
        b.select_step(PipelineStep::Relu, &mut ctx_b, now);
        let count = ctx_a.scene().count_tagged(tag);
        assert!(count > 0 && count < 100);
        assert_eq!(count, ctx_b.scene().count_tagged(tag));
    }

    #[test]
    fn test_reset_restores_defaults() {
        let now = Instant::now();
        let (mut director, mut ctx) = setup();
        director.select_step(PipelineStep::Features, &mut ctx, now);
        director.select_demo(DemoKind::Cluster, &mut ctx, now);
        ctx.camera_mut().orbit(1.0, 0.3);

        director.reset(&mut ctx);

        assert_eq!(ctx.transient_count(), 0);
        assert!(director.pipeline_panel().is_default());
        assert!(director.demo_panel().is_default());
        assert_eq!(director.mode(), Mode::Idle);
        assert_eq!(*ctx.camera(), crate::scene::OrbitCamera::default());
        assert!(ctx.animations().is_empty());
    }

    fn all_modes() -> Vec<Mode> {
        PipelineStep::ALL
            .into_iter()
            .map(Mode::Step)
            .chain(DemoKind::ALL.into_iter().map(Mode::Demo))
            .collect()
    }

    fn enter(director: &mut Director, ctx: &mut SceneContext, mode: Mode, now: Instant) -> Tag {
        match mode {
            Mode::Step(step) => {
                director.select_step(step, ctx, now);
                Tag::Step(step)
            }
            Mode::Demo(kind) => {
                director.select_demo(kind, ctx, now);
                Tag::Demo(kind)
            }
            Mode::Idle => unreachable!(),
        }
    }

    #[test]
    fn test_every_transition_replaces_content_and_resets_cleanly() {
        let start = Instant::now();
        for from in all_modes() {
            for to in all_modes() {
                let (mut director, mut ctx) = setup();
                enter(&mut director, &mut ctx, from, start);

                // let a demo get partway through its script
                let later = start + Duration::from_millis(2500);
                ctx.advance(later);
                director.tick(&mut ctx, later);

                let tag = enter(&mut director, &mut ctx, to, later);
                assert!(
                    ctx.scene().iter().filter(|o| o.tag.is_transient()).all(|o| o.tag == tag),
                    "{:?} -> {:?}",
                    from,
                    to
                );
                assert_eq!(director.mode(), to);

                director.tick(&mut ctx, later + Duration::from_secs(30));
                assert!(
                    ctx.scene().iter().filter(|o| o.tag.is_transient()).all(|o| o.tag == tag),
                    "{:?} -> {:?} after tick",
                    from,
                    to
                );

                director.reset(&mut ctx);
                assert_eq!(ctx.transient_count(), 0, "{:?} -> {:?} reset", from, to);
                assert_eq!(director.mode(), Mode::Idle);
                assert!(!director.demo_running());
                assert!(director.pipeline_panel().is_default());
                assert!(director.demo_panel().is_default());
            }
        }
    }

    #[test]
    fn test_reset_keeps_result_point() {
        let now = Instant::now();
        let (mut director, mut ctx) = setup();
        ctx.set_result_point(Vec3::new(1.0, 2.0, 3.0), now);
        director.select_step(PipelineStep::Input, &mut ctx, now);
        director.reset(&mut ctx);
        assert!(ctx.result().is_some());
        assert_eq!(ctx.scene().count_tagged(Tag::Result), 5);
    }

    #[test]
    fn test_demo_plays_over_time() {
        let start = Instant::now();
        let (mut director, mut ctx) = setup();
        let tag = Tag::Demo(DemoKind::Color);

        director.select_demo(DemoKind::Color, &mut ctx, start);
        // point plus its halo
        assert_eq!(ctx.scene().count_tagged(tag), 2);

        director.tick(&mut ctx, start + Duration::from_secs(4));
        assert_eq!(ctx.scene().count_tagged(tag), 6);
        assert!(director.demo_running());

        director.tick(&mut ctx, start + Duration::from_secs(10));
        assert_eq!(ctx.scene().count_tagged(tag), 10);
        assert!(!director.demo_running());
        assert!(!director.demo_panel().notes.is_empty());
    }

    #[test]
    fn test_leaving_demo_cancels_pending_events() {
        let start = Instant::now();
        let (mut director, mut ctx) = setup();
        director.select_demo(DemoKind::Cluster, &mut ctx, start);
        director.select_step(PipelineStep::Input, &mut ctx, start);

        director.tick(&mut ctx, start + Duration::from_secs(30));
        assert_eq!(ctx.scene().count_tagged(Tag::Demo(DemoKind::Cluster)), 0);
        assert!(!director.demo_running());
        assert_eq!(ctx.transient_count(), 405);
    }

    #[test]
    fn test_movement_demo_keeps_one_moving_point() {
        let start = Instant::now();
        let (mut director, mut ctx) = setup();
        let tag = Tag::Demo(DemoKind::Movement);
        director.select_demo(DemoKind::Movement, &mut ctx, start);

        let t1 = start + Duration::from_millis(2500);
        ctx.advance(t1);
        director.tick(&mut ctx, t1);
        assert_eq!(ctx.scene().count_tagged(tag), 2);

        let t2 = start + Duration::from_millis(5000);
        ctx.advance(t2);
        director.tick(&mut ctx, t2);
        let point = ctx
            .scene()
            .iter()
            .find(|o| o.tag == tag && o.parent.is_none())
            .expect("moving point");
        // starts where the previous point ended up
        assert_eq!(point.position, Vec3::new(3.0, 0.0, 0.0));
        assert_eq!(ctx.scene().count_tagged(tag), 2);
    }
}
