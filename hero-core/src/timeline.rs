//! Sequenced tweens with relative positions

use crate::scene::Surface;
use crate::tween::Tween;
use serde::{Deserialize, Serialize};

/// Where a segment starts, relative to the end of the timeline so far.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Position {
    AfterPrevious,
    /// Start this many seconds before the current end ("-=secs")
    Overlap(f32),
    /// Absolute start, in seconds
    At(f32),
}

#[derive(Debug, Clone, PartialEq)]
struct Segment {
    label: &'static str,
    tween: Tween,
    start: f32,
}

/// Absolute timing of one segment, delay included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentPlan {
    pub label: String,
    pub start: f32,
    pub end: f32,
    pub targets: usize,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Timeline {
    delay: f32,
    segments: Vec<Segment>,
    end: f32,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time before the first segment may start, in seconds
    pub fn delay(mut self, secs: f32) -> Self {
        self.delay = secs.max(0.0);
        self
    }

    /// Append a segment. Start times are resolved here, once, and never
    /// fall before zero.
    pub fn add(&mut self, label: &'static str, tween: Tween, position: Position) -> &mut Self {
        let start = match position {
            Position::AfterPrevious => self.end,
            Position::Overlap(secs) => self.end - secs,
            Position::At(secs) => secs,
        }
        .max(0.0);
        self.end = self.end.max(start + tween.total_duration());
        self.segments.push(Segment {
            label,
            tween,
            start,
        });
        self
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Delay plus the end of the latest segment.
    pub fn total_duration(&self) -> f32 {
        self.delay + self.end
    }

    pub fn plan(&self) -> Vec<SegmentPlan> {
        self.segments
            .iter()
            .map(|segment| SegmentPlan {
                label: segment.label.to_string(),
                start: self.delay + segment.start,
                end: self.delay + segment.start + segment.tween.total_duration(),
                targets: segment.tween.targets().len(),
            })
            .collect()
    }

    pub fn render_start<S: Surface + ?Sized>(&self, scene: &mut S) {
        for segment in &self.segments {
            segment.tween.render_start(scene);
        }
    }

    /// Render the timeline at `time` seconds since it was started.
    pub fn render<S: Surface + ?Sized>(&mut self, time: f32, scene: &mut S) {
        let local = time - self.delay;
        for segment in &mut self.segments {
            let segment_time = local - segment.start;
            if segment_time >= 0.0 {
                segment.tween.render(segment_time, scene);
            }
        }
    }

    pub fn is_complete(&self, time: f32) -> bool {
        time >= self.total_duration()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::headless::HeadlessScene;
    use crate::scene::{ElementId, Props};
    use crate::stagger::Stagger;
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn fade(targets: usize, duration: f32, each: f32) -> Tween {
        let mut rng = StdRng::seed_from_u64(0);
        Tween::from_to(
            (0..targets as u32).map(ElementId).collect(),
            Props::new().opacity(0.0),
            Props::new().opacity(1.0),
        )
        .duration(duration)
        .stagger(Stagger::Each(each), &mut rng)
    }

    #[test]
    fn test_overlap_positions() {
        let mut timeline = Timeline::new().delay(0.5);
        timeline
            .add("first", fade(1, 2.0, 0.0), Position::AfterPrevious)
            .add("second", fade(1, 1.0, 0.0), Position::Overlap(0.5))
            .add("third", fade(1, 1.0, 0.0), Position::AfterPrevious);
        let starts: Vec<f32> = timeline.plan().iter().map(|s| s.start).collect();
        assert_eq!(starts, vec![0.5, 2.0, 3.0]);
        // delay included
        assert_eq!(timeline.total_duration(), 4.0);
    }

    #[test]
    fn test_overlap_clamps_at_zero() {
        let mut timeline = Timeline::new();
        timeline
            .add("short", fade(1, 0.5, 0.0), Position::AfterPrevious)
            .add("early", fade(1, 0.5, 0.0), Position::Overlap(1.0));
        assert_eq!(timeline.plan()[1].start, 0.0);
    }

    #[test]
    fn test_end_tracks_longest_segment() {
        let mut timeline = Timeline::new();
        timeline
            .add("long", fade(1, 4.0, 0.0), Position::AfterPrevious)
            .add("inside", fade(1, 1.0, 0.0), Position::At(1.0))
            .add("after", fade(1, 1.0, 0.0), Position::AfterPrevious);
        assert_eq!(timeline.plan()[2].start, 4.0);
    }

    #[test]
    fn test_render_respects_delay() {
        let mut scene = HeadlessScene::new();
        let el = scene.add_text("x");
        let mut timeline = Timeline::new().delay(1.0);
        timeline.add(
            "fade",
            Tween::from_to(vec![el], Props::new().opacity(0.0), Props::new().opacity(1.0))
                .duration(1.0),
            Position::AfterPrevious,
        );
        timeline.render_start(&mut scene);
        timeline.render(0.5, &mut scene);
        assert_eq!(scene.props(el).opacity, Some(0.0));
        timeline.render(1.5, &mut scene);
        assert_eq!(scene.props(el).opacity, Some(0.5));
        assert!(timeline.is_complete(2.0));
    }
}
