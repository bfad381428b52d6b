//! Hero Core Library
//!
//! This library provides the animation engine behind the landing-page hero:
//! responsive layout, the looping marquee rows and the entrance timeline,
//! driven through a host-provided [`Scene`].

pub mod animator;
pub mod config;
pub mod ease;
pub mod entrance;
pub mod error;
pub mod headless;
pub mod hero;
pub mod layout;
pub mod marquee;
pub mod math;
pub mod scene;
pub mod stagger;
pub mod timeline;
pub mod tween;
pub mod vocabulary;

pub use animator::{AnimationHandle, Animator};
pub use config::{HeroConfig, HeroContent};
pub use ease::Ease;
pub use entrance::{EntranceStatus, EntranceTargets, EntranceTimeline};
pub use error::{HeroError, Result};
pub use headless::HeadlessScene;
pub use hero::{HeroSection, HeroStatus};
pub use layout::{compute_font_size, compute_row_count, LayoutParams, RowStyle, ViewportMetrics};
pub use marquee::{Direction, MarqueeTiler, RowContent, RowPiece};
pub use scene::{ElementId, Fragments, Props, RowHandles, Scene, SplitKind, Surface, TextSplitter};
pub use stagger::{Stagger, StaggerFrom};
pub use timeline::{Position, SegmentPlan, Timeline};
pub use tween::{Repeat, Tween};
pub use vocabulary::MarqueeVocabulary;

use std::time::Duration;
use tracing::info;

/// Run a hero headlessly for `duration`, stepping `frame_interval` at a time,
/// and return the final status and scene.
///
/// `resizes` are applied at their timestamps, in order.
pub fn simulate(
    config: HeroConfig,
    viewport: ViewportMetrics,
    resizes: &[(Duration, ViewportMetrics)],
    duration: Duration,
    frame_interval: Duration,
) -> (HeroStatus, HeadlessScene) {
    let mut scene = HeadlessScene::new();
    let targets = scene.mount_content(&config.content);
    let mut hero = HeroSection::new(config);
    let frame_interval = frame_interval.max(Duration::from_millis(1));

    hero.mount(viewport, targets, Duration::ZERO, &mut scene);
    let mut pending = resizes.iter().peekable();
    let mut now = Duration::ZERO;
    let mut frames = 0usize;
    while now <= duration {
        while let Some((_, size)) = pending.next_if(|(at, _)| *at <= now) {
            hero.resize(*size, now, &mut scene);
        }
        hero.frame(now, &mut scene);
        frames += 1;
        now += frame_interval;
    }
    info!("Simulated {} frames over {:?}", frames, duration);
    (hero.status(), scene)
}
