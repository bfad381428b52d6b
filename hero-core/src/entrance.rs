//! Entrance timeline
//!
//! Runs once per mount, a short moment after mounting: the brand glyphs, the
//! subheading words, the heading lines and then the remaining content fade
//! and rise into place. Text is split only for the duration of the timeline.

use crate::animator::{AnimationHandle, Animator};
use crate::config::{EntranceTiming, SegmentTiming};
use crate::scene::{revert_slot, ElementId, Props, Scene, SplitKind, SplitText};
use crate::timeline::{Position, SegmentPlan, Timeline};
use crate::tween::Tween;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, trace};

/// Elements animated by the entrance timeline. Absent ones are skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntranceTargets {
    pub brand: Option<ElementId>,
    pub subheading: Option<ElementId>,
    pub heading: Option<ElementId>,
    /// Description, call-to-action group and freelancer count
    pub content_items: Vec<ElementId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntranceStatus {
    Idle,
    Scheduled,
    Running,
    Completed,
    TornDown,
}

#[derive(Debug)]
enum State {
    Idle,
    Scheduled { due: Duration },
    Running { timeline: AnimationHandle },
    Completed,
    TornDown,
}

/// Split structures owned while the timeline runs.
#[derive(Debug, Default)]
struct Splits {
    brand: Option<SplitText>,
    subheading: Option<SplitText>,
    heading: Option<SplitText>,
}

impl Splits {
    fn revert_all<S: Scene + ?Sized>(&mut self, scene: &mut S) {
        revert_slot(&mut self.brand, scene);
        revert_slot(&mut self.subheading, scene);
        revert_slot(&mut self.heading, scene);
    }

    fn live(&self) -> usize {
        [&self.brand, &self.subheading, &self.heading]
            .into_iter()
            .filter(|slot| slot.is_some())
            .count()
    }
}

#[derive(Debug)]
pub struct EntranceTimeline {
    timing: EntranceTiming,
    targets: EntranceTargets,
    rng: StdRng,
    animator: Animator,
    state: State,
    splits: Splits,
    plan: Vec<SegmentPlan>,
}

impl EntranceTimeline {
    pub fn new(timing: EntranceTiming, targets: EntranceTargets, rng: StdRng) -> Self {
        Self {
            timing,
            targets,
            rng,
            animator: Animator::new("entrance"),
            state: State::Idle,
            splits: Splits::default(),
            plan: Vec::new(),
        }
    }

    pub fn status(&self) -> EntranceStatus {
        match self.state {
            State::Idle => EntranceStatus::Idle,
            State::Scheduled { .. } => EntranceStatus::Scheduled,
            State::Running { .. } => EntranceStatus::Running,
            State::Completed => EntranceStatus::Completed,
            State::TornDown => EntranceStatus::TornDown,
        }
    }

    /// Segments of the built timeline; empty until it has started.
    pub fn plan(&self) -> &[SegmentPlan] {
        &self.plan
    }

    /// Split structures currently applied to the scene.
    pub fn live_splits(&self) -> usize {
        self.splits.live()
    }

    pub fn live_animations(&self) -> usize {
        self.animator.live()
    }

    /// Arm the delayed start. Only the first call per mount has an effect.
    pub fn schedule(&mut self, now: Duration) {
        if !matches!(self.state, State::Idle) {
            trace!("entrance already {:?}, not rescheduling", self.status());
            return;
        }
        let due = now + self.timing.start_delay();
        debug!("Entrance scheduled at {:?}", due);
        self.state = State::Scheduled { due };
    }

    /// Start the timeline once it is due, advance it, and release the splits
    /// when it completes.
    pub fn frame<S: Scene + ?Sized>(&mut self, now: Duration, scene: &mut S) {
        if let State::Scheduled { due } = self.state {
            if now < due {
                return;
            }
            self.start(due, scene);
        }

        let completed = self.animator.tick(now, scene);
        if let State::Running { timeline } = &self.state {
            if completed.contains(&timeline.id()) {
                info!("Entrance animation completed, reverting split text");
                self.splits.revert_all(scene);
                self.state = State::Completed;
            }
        }
    }

    /// Cancel the pending start, stop the timeline and revert every split.
    pub fn teardown<S: Scene + ?Sized>(&mut self, scene: &mut S) {
        if let State::Running { timeline } = std::mem::replace(&mut self.state, State::TornDown) {
            self.animator.cancel(timeline);
        }
        self.animator.cancel_all();
        self.splits.revert_all(scene);
    }

    fn start<S: Scene + ?Sized>(&mut self, now: Duration, scene: &mut S) {
        let timeline = self.build(scene);
        self.plan = timeline.plan();
        debug!(
            "Entrance timeline built: {} segments, {:.2}s",
            timeline.len(),
            timeline.total_duration()
        );
        let handle = self.animator.spawn(timeline, now, scene);
        self.state = State::Running { timeline: handle };
    }

    fn build<S: Scene + ?Sized>(&mut self, scene: &mut S) -> Timeline {
        let timing = &self.timing;
        let mut timeline = Timeline::new().delay(timing.timeline_delay);
        let overlap = Position::Overlap(timing.overlap);

        if let Some(brand) = self.targets.brand {
            self.splits.brand = SplitText::new(scene, brand, SplitKind::Chars);
        }
        if let Some(subheading) = self.targets.subheading {
            self.splits.subheading = SplitText::new(scene, subheading, SplitKind::LinesWords);
        }
        if let Some(heading) = self.targets.heading {
            self.splits.heading = SplitText::new(scene, heading, SplitKind::Lines);
        }

        let chars = self.splits.brand.as_ref().map(|s| s.chars().to_vec()).unwrap_or_default();
        timeline.add(
            "brand",
            rise(chars, &timing.brand, timing, &mut self.rng),
            Position::AfterPrevious,
        );

        let words = self
            .splits
            .subheading
            .as_ref()
            .map(|s| s.words().to_vec())
            .unwrap_or_default();
        if words.is_empty() {
            trace!("no subheading words, skipping segment");
        } else {
            timeline.add("subheading", rise(words, &timing.subheading, timing, &mut self.rng), overlap);
        }

        let lines = self
            .splits
            .heading
            .as_ref()
            .map(|s| s.lines().to_vec())
            .unwrap_or_default();
        if lines.is_empty() {
            trace!("no heading lines, skipping segment");
        } else {
            timeline.add("heading", rise(lines, &timing.heading, timing, &mut self.rng), overlap);
        }

        let content = &timing.content;
        let items = Tween::from_to(
            self.targets.content_items.clone(),
            Props::new().y(content.offset_y).opacity(0.0),
            Props::new().y(0.0).opacity(1.0),
        )
        .duration(content.duration)
        .ease(timing.ease)
        .stagger(content.stagger, &mut self.rng);
        timeline.add("content", items, overlap);

        timeline
    }
}

/// Fade in while rising from `offset_y` below.
fn rise(
    targets: Vec<ElementId>,
    segment: &SegmentTiming,
    timing: &EntranceTiming,
    rng: &mut StdRng,
) -> Tween {
    Tween::from_to(
        targets,
        Props::new().y(segment.offset_y).opacity(0.0),
        Props::new().y(0.0).opacity(1.0),
    )
    .duration(segment.duration)
    .ease(timing.ease)
    .stagger(segment.stagger, rng)
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::headless::HeadlessScene;
    use pretty_assertions::assert_eq;
    use rand::SeedableRng;

    struct Fixture {
        scene: HeadlessScene,
        targets: EntranceTargets,
    }

    fn fixture(subheading: &str, heading: &str) -> Fixture {
        let mut scene = HeadlessScene::new();
        let targets = EntranceTargets {
            brand: Some(scene.add_text("GIGLANCE")),
            subheading: Some(scene.add_text(subheading)),
            heading: Some(scene.add_text(heading)),
            content_items: vec![
                scene.add_text("description"),
                scene.add_text("buttons"),
                scene.add_text("count"),
            ],
        };
        Fixture { scene, targets }
    }

    fn entrance(targets: EntranceTargets) -> EntranceTimeline {
        EntranceTimeline::new(EntranceTiming::default(), targets, StdRng::seed_from_u64(11))
    }

    fn labels(entrance: &EntranceTimeline) -> Vec<String> {
        entrance.plan().iter().map(|s| s.label.clone()).collect()
    }

    #[test]
    fn test_waits_for_start_delay() {
        let Fixture { mut scene, targets } = fixture("Find Your Dream Job", "Heading");
        let mut entrance = entrance(targets);
        entrance.schedule(Duration::ZERO);
        entrance.frame(Duration::from_millis(99), &mut scene);
        assert_eq!(entrance.status(), EntranceStatus::Scheduled);
        assert_eq!(scene.live_splits(), 0);

        entrance.frame(Duration::from_millis(100), &mut scene);
        assert_eq!(entrance.status(), EntranceStatus::Running);
        assert_eq!(entrance.live_splits(), 3);
    }

    #[test]
    fn test_segment_order_and_overlaps() {
        let Fixture { mut scene, targets } = fixture("Find Your Dream Job", "Heading");
        let mut entrance = entrance(targets);
        entrance.schedule(Duration::ZERO);
        entrance.frame(Duration::from_millis(100), &mut scene);

        assert_eq!(labels(&entrance), vec!["brand", "subheading", "heading", "content"]);
        let plan = entrance.plan();
        // brand: 8 glyphs, 0.4 spread + 0.6 => ends 1.0 after the 0.7 delay
        assert!((plan[0].start - 0.7).abs() < 1e-5);
        assert!((plan[0].end - 1.7).abs() < 1e-5);
        // subheading overlaps by 1.0, clamped to the timeline start
        assert!((plan[1].start - 0.7).abs() < 1e-5);
        assert_eq!(plan[1].targets, 4);
        // 4 words: 0.6 + 3 * 0.2 => the timeline ends at 1.9 so far
        assert!((plan[1].end - 1.9).abs() < 1e-5);
        assert!((plan[2].start - 0.9).abs() < 1e-5);
        // the one heading line ends before the subheading does, so content
        // also starts 1.0 before 1.9
        assert!((plan[3].start - 0.9).abs() < 1e-5);
    }

    #[test]
    fn test_empty_subheading_is_skipped() {
        let Fixture { mut scene, targets } = fixture("", "Heading");
        let mut entrance = entrance(targets);
        entrance.schedule(Duration::ZERO);
        entrance.frame(Duration::from_millis(100), &mut scene);
        assert_eq!(labels(&entrance), vec!["brand", "heading", "content"]);
    }

    #[test]
    fn test_missing_heading_is_skipped() {
        let Fixture { mut scene, mut targets } = fixture("Find Your Dream Job", "");
        targets.heading = None;
        let mut entrance = entrance(targets);
        entrance.schedule(Duration::ZERO);
        entrance.frame(Duration::from_millis(100), &mut scene);
        assert_eq!(labels(&entrance), vec!["brand", "subheading", "content"]);
    }

    #[test]
    fn test_completion_reverts_splits() {
        let Fixture { mut scene, targets } = fixture("Find Your Dream Job", "Heading");
        let description = targets.content_items[0];
        let mut entrance = entrance(targets);
        entrance.schedule(Duration::ZERO);
        entrance.frame(Duration::from_millis(100), &mut scene);
        entrance.frame(Duration::from_secs(10), &mut scene);

        assert_eq!(entrance.status(), EntranceStatus::Completed);
        assert_eq!(entrance.live_splits(), 0);
        assert_eq!(scene.live_splits(), 0);
        assert_eq!(entrance.live_animations(), 0);
        assert_eq!(scene.props(description).opacity, Some(1.0));
    }

    #[test]
    fn test_teardown_before_start() {
        let Fixture { mut scene, targets } = fixture("Find Your Dream Job", "Heading");
        let mut entrance = entrance(targets);
        entrance.schedule(Duration::ZERO);
        entrance.teardown(&mut scene);
        entrance.frame(Duration::from_secs(1), &mut scene);
        assert_eq!(entrance.status(), EntranceStatus::TornDown);
        assert_eq!(scene.live_splits(), 0);
        assert!(entrance.plan().is_empty());
    }

    #[test]
    fn test_teardown_mid_flight() {
        let Fixture { mut scene, targets } = fixture("Find Your Dream Job", "Heading");
        let mut entrance = entrance(targets);
        entrance.schedule(Duration::ZERO);
        entrance.frame(Duration::from_millis(100), &mut scene);
        entrance.frame(Duration::from_millis(900), &mut scene);
        assert_eq!(scene.live_splits(), 3);

        entrance.teardown(&mut scene);
        entrance.teardown(&mut scene);
        assert_eq!(scene.live_splits(), 0);
        assert_eq!(entrance.live_animations(), 0);
    }

    #[test]
    fn test_schedule_runs_once() {
        let Fixture { mut scene, targets } = fixture("Find Your Dream Job", "Heading");
        let mut entrance = entrance(targets);
        entrance.schedule(Duration::ZERO);
        entrance.frame(Duration::from_secs(10), &mut scene);
        entrance.schedule(Duration::from_secs(10));
        assert_eq!(entrance.status(), EntranceStatus::Completed);
    }
}
