//! Per-component registry of running animations

use crate::math::secs_between;
use crate::scene::Surface;
use crate::timeline::Timeline;
use crate::tween::Tween;
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::trace;

#[derive(Debug, Clone, PartialEq)]
pub enum Animation {
    Tween(Tween),
    Timeline(Timeline),
}

impl Animation {
    fn render_start<S: Surface + ?Sized>(&self, scene: &mut S) {
        match self {
            Animation::Tween(tween) => tween.render_start(scene),
            Animation::Timeline(timeline) => timeline.render_start(scene),
        }
    }

    fn render<S: Surface + ?Sized>(&mut self, time: f32, scene: &mut S) {
        match self {
            Animation::Tween(tween) => tween.render(time, scene),
            Animation::Timeline(timeline) => timeline.render(time, scene),
        }
    }

    fn is_complete(&self, time: f32) -> bool {
        match self {
            Animation::Tween(tween) => tween.is_complete(time),
            Animation::Timeline(timeline) => timeline.is_complete(time),
        }
    }
}

impl From<Tween> for Animation {
    fn from(tween: Tween) -> Self {
        Animation::Tween(tween)
    }
}

impl From<Timeline> for Animation {
    fn from(timeline: Timeline) -> Self {
        Animation::Timeline(timeline)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AnimationId(u64);

/// Ownership token for a running animation.
///
/// Not `Clone`: exactly one owner can cancel it.
#[must_use = "an animation that is never cancelled keeps running"]
#[derive(Debug, PartialEq, Eq)]
pub struct AnimationHandle {
    id: AnimationId,
}

impl AnimationHandle {
    pub fn id(&self) -> AnimationId {
        self.id
    }
}

#[derive(Debug)]
struct Entry {
    animation: Animation,
    started_at: Duration,
}

/// Animations owned by one component, advanced on the host's frame clock.
///
/// Finite animations are dropped once complete; looping ones run until
/// cancelled.
#[derive(Debug)]
pub struct Animator {
    name: &'static str,
    next_id: u64,
    entries: BTreeMap<AnimationId, Entry>,
}

impl Animator {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            next_id: 0,
            entries: BTreeMap::new(),
        }
    }

    /// Start `animation` at `now`, rendering its initial state right away.
    pub fn spawn<S: Surface + ?Sized>(
        &mut self,
        animation: impl Into<Animation>,
        now: Duration,
        scene: &mut S,
    ) -> AnimationHandle {
        let animation = animation.into();
        animation.render_start(scene);
        let id = AnimationId(self.next_id);
        self.next_id += 1;
        self.entries.insert(
            id,
            Entry {
                animation,
                started_at: now,
            },
        );
        trace!("{}: spawned animation {:?}", self.name, id);
        AnimationHandle { id }
    }

    /// Stop an animation where it is. Returns false if it already finished.
    pub fn cancel(&mut self, handle: AnimationHandle) -> bool {
        let removed = self.entries.remove(&handle.id).is_some();
        trace!("{}: cancelled {:?} (live: {})", self.name, handle.id, removed);
        removed
    }

    pub fn cancel_all(&mut self) {
        if !self.entries.is_empty() {
            trace!("{}: cancelling {} animations", self.name, self.entries.len());
        }
        self.entries.clear();
    }

    pub fn is_live(&self, handle: &AnimationHandle) -> bool {
        self.entries.contains_key(&handle.id)
    }

    /// Number of animations still running.
    pub fn live(&self) -> usize {
        self.entries.len()
    }

    pub fn is_idle(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render every animation at `now`; returns the ones that just completed.
    pub fn tick<S: Surface + ?Sized>(&mut self, now: Duration, scene: &mut S) -> Vec<AnimationId> {
        let mut completed = Vec::new();
        self.entries.retain(|id, entry| {
            let time = secs_between(entry.started_at, now);
            entry.animation.render(time, scene);
            if entry.animation.is_complete(time) {
                completed.push(*id);
                false
            } else {
                true
            }
        });
        completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::headless::HeadlessScene;
    use crate::scene::Props;
    use crate::tween::Repeat;
    use pretty_assertions::assert_eq;

    fn fade(scene: &mut HeadlessScene) -> Tween {
        let el = scene.add_text("fade");
        Tween::from_to(vec![el], Props::new().opacity(0.0), Props::new().opacity(1.0)).duration(1.0)
    }

    #[test]
    fn test_finite_animations_complete_once() {
        let mut scene = HeadlessScene::new();
        let mut animator = Animator::new("test");
        let tween = fade(&mut scene);
        let handle = animator.spawn(tween, Duration::ZERO, &mut scene);
        assert!(animator.tick(Duration::from_millis(500), &mut scene).is_empty());
        assert_eq!(
            animator.tick(Duration::from_millis(1000), &mut scene),
            vec![handle.id()]
        );
        assert!(animator.tick(Duration::from_millis(2000), &mut scene).is_empty());
        assert!(!animator.is_live(&handle));
        assert!(!animator.cancel(handle));
    }

    #[test]
    fn test_cancel_stops_rendering() {
        let mut scene = HeadlessScene::new();
        let mut animator = Animator::new("test");
        let tween = fade(&mut scene);
        let el = tween.targets()[0];
        let handle = animator.spawn(tween, Duration::ZERO, &mut scene);
        animator.tick(Duration::from_millis(250), &mut scene);
        assert!(animator.cancel(handle));
        animator.tick(Duration::from_millis(750), &mut scene);
        assert_eq!(scene.props(el).opacity, Some(0.25));
        assert!(animator.is_idle());
    }

    #[test]
    fn test_looping_animations_stay_live() {
        let mut scene = HeadlessScene::new();
        let mut animator = Animator::new("test");
        let tween = fade(&mut scene).repeat(Repeat::Infinite);
        let _handle = animator.spawn(tween, Duration::from_secs(3), &mut scene);
        animator.tick(Duration::from_secs(3600), &mut scene);
        assert_eq!(animator.live(), 1);
        animator.cancel_all();
        assert_eq!(animator.live(), 0);
    }
}
