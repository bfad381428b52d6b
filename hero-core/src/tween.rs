//! Property interpolation over time for a set of targets

use crate::ease::Ease;
use crate::scene::{ElementId, Props, Surface};
use crate::stagger::Stagger;
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Repeat {
    #[default]
    Once,
    Infinite,
}

/// Animates `targets` from one set of props to another.
///
/// `from` is rendered as soon as the tween is started, so targets never flash
/// their resting state before their stagger offset is reached.
#[derive(Debug, Clone, PartialEq)]
pub struct Tween {
    targets: Vec<ElementId>,
    from: Props,
    to: Props,
    duration: f32,
    ease: Ease,
    offsets: Vec<f32>,
    repeat: Repeat,
    on_repeat: Option<Props>,
    /// Last iteration rendered, per target
    iterations: Vec<u64>,
}

impl Tween {
    pub fn from_to(targets: Vec<ElementId>, from: Props, to: Props) -> Self {
        let count = targets.len();
        Self {
            targets,
            from,
            to,
            duration: 0.5,
            ease: Ease::default(),
            offsets: vec![0.0; count],
            repeat: Repeat::Once,
            on_repeat: None,
            iterations: vec![0; count],
        }
    }

    /// Duration of one iteration, in seconds
    pub fn duration(mut self, secs: f32) -> Self {
        self.duration = secs.max(0.0);
        self
    }

    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    pub fn repeat(mut self, repeat: Repeat) -> Self {
        self.repeat = repeat;
        self
    }

    /// Props set on a target every time it wraps into a new iteration.
    pub fn on_repeat(mut self, props: Props) -> Self {
        self.on_repeat = Some(props);
        self
    }

    /// Resolve `stagger` into per-target start offsets.
    pub fn stagger<R: Rng + ?Sized>(mut self, stagger: Stagger, rng: &mut R) -> Self {
        self.offsets = stagger.offsets(self.targets.len(), rng);
        self
    }

    pub fn targets(&self) -> &[ElementId] {
        &self.targets
    }

    pub fn offsets(&self) -> &[f32] {
        &self.offsets
    }

    pub fn is_infinite(&self) -> bool {
        self.repeat == Repeat::Infinite
    }

    /// Time until the last target settles; infinite for looping tweens.
    pub fn total_duration(&self) -> f32 {
        if self.is_infinite() {
            return f32::INFINITY;
        }
        let last_start = self.offsets.iter().copied().fold(0.0, f32::max);
        last_start + self.duration
    }

    /// Number of repeat boundaries target `index` has crossed so far.
    pub fn iteration(&self, index: usize) -> u64 {
        self.iterations.get(index).copied().unwrap_or(0)
    }

    pub fn render_start<S: Surface + ?Sized>(&self, scene: &mut S) {
        for target in &self.targets {
            scene.apply(*target, &self.from);
        }
    }

    /// Render every target at `time` seconds since the tween started.
    pub fn render<S: Surface + ?Sized>(&mut self, time: f32, scene: &mut S) {
        for (index, target) in self.targets.iter().enumerate() {
            let local = time - self.offsets[index];
            if local < 0.0 {
                continue;
            }
            let progress = match self.repeat {
                Repeat::Once => {
                    if self.duration <= 0.0 {
                        1.0
                    } else {
                        (local / self.duration).min(1.0)
                    }
                }
                Repeat::Infinite => {
                    if self.duration <= 0.0 {
                        1.0
                    } else {
                        let iteration = (local / self.duration).floor() as u64;
                        if iteration > self.iterations[index] {
                            if let Some(snap) = &self.on_repeat {
                                scene.apply(*target, snap);
                            }
                            self.iterations[index] = iteration;
                        }
                        (local - iteration as f32 * self.duration) / self.duration
                    }
                }
            };
            let props = Props::interpolate(&self.from, &self.to, self.ease.apply(progress));
            scene.apply(*target, &props);
        }
    }

    pub fn is_complete(&self, time: f32) -> bool {
        time >= self.total_duration()
    }
}
