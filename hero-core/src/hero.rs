//! The hero section controller, tying the three parts to the host's
//! mount, resize, frame and unmount notifications.

use crate::config::HeroConfig;
use crate::entrance::{EntranceStatus, EntranceTargets, EntranceTimeline};
use crate::layout::{LayoutParams, ViewportMetrics};
use crate::marquee::{MarqueeTiler, RowSummary};
use crate::scene::Scene;
use crate::timeline::SegmentPlan;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

/// Point-in-time view of the controller, for hosts and tooling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeroStatus {
    pub mounted: bool,
    pub layout: Option<LayoutParams>,
    pub rows: Vec<RowSummary>,
    pub live_loops: usize,
    pub marquee_rebuilds: usize,
    pub entrance: EntranceStatus,
    pub entrance_plan: Vec<SegmentPlan>,
    pub live_splits: usize,
}

#[derive(Debug)]
pub struct HeroSection {
    config: HeroConfig,
    marquee: MarqueeTiler,
    entrance: Option<EntranceTimeline>,
    viewport: Option<ViewportMetrics>,
    mounted: bool,
}

impl HeroSection {
    pub fn new(config: HeroConfig) -> Self {
        let marquee = MarqueeTiler::new(
            config.content.vocabulary.clone(),
            config.timing.marquee.clone(),
            config.rng(),
        );
        Self {
            config,
            marquee,
            entrance: None,
            viewport: None,
            mounted: false,
        }
    }

    pub fn config(&self) -> &HeroConfig {
        &self.config
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn layout(&self) -> Option<LayoutParams> {
        self.marquee.layout()
    }

    /// Last viewport seen through mount or resize.
    pub fn viewport(&self) -> Option<ViewportMetrics> {
        self.viewport
    }

    pub fn marquee(&self) -> &MarqueeTiler {
        &self.marquee
    }

    pub fn entrance(&self) -> Option<&EntranceTimeline> {
        self.entrance.as_ref()
    }

    /// Build the marquee for `viewport` and schedule the entrance.
    pub fn mount<S: Scene + ?Sized>(
        &mut self,
        viewport: ViewportMetrics,
        targets: EntranceTargets,
        now: Duration,
        scene: &mut S,
    ) {
        if self.mounted {
            debug!("Hero already mounted, ignoring mount");
            return;
        }
        info!("Mounting hero at {}x{}", viewport.width, viewport.height);
        self.mounted = true;
        self.viewport = Some(viewport);
        let layout = self.config.layout.compute(viewport);
        self.marquee.rebuild(layout, now, scene);

        let mut entrance = EntranceTimeline::new(
            self.config.timing.entrance.clone(),
            targets,
            self.config.rng(),
        );
        entrance.schedule(now);
        self.entrance = Some(entrance);
    }

    /// Recompute the layout; rebuilds the marquee only if it changed.
    /// Returns whether a rebuild happened.
    pub fn resize<S: Scene + ?Sized>(
        &mut self,
        viewport: ViewportMetrics,
        now: Duration,
        scene: &mut S,
    ) -> bool {
        if !self.mounted {
            return false;
        }
        self.viewport = Some(viewport);
        let layout = self.config.layout.compute(viewport);
        if self.marquee.layout() == Some(layout) {
            return false;
        }
        debug!(
            "Viewport {}x{} changed layout to {:?}",
            viewport.width, viewport.height, layout
        );
        self.marquee.rebuild(layout, now, scene);
        true
    }

    pub fn frame<S: Scene + ?Sized>(&mut self, now: Duration, scene: &mut S) {
        if !self.mounted {
            return;
        }
        self.marquee.frame(now, scene);
        if let Some(entrance) = &mut self.entrance {
            entrance.frame(now, scene);
        }
    }

    /// Release every animation, timer and split. Safe to call repeatedly.
    pub fn unmount<S: Scene + ?Sized>(&mut self, scene: &mut S) {
        if !self.mounted {
            return;
        }
        info!("Unmounting hero");
        self.marquee.teardown(scene);
        if let Some(entrance) = &mut self.entrance {
            entrance.teardown(scene);
        }
        self.mounted = false;
    }

    /// Animations still owned by the controller.
    pub fn live_animations(&self) -> usize {
        self.marquee.live_animations()
            + self
                .entrance
                .as_ref()
                .map_or(0, EntranceTimeline::live_animations)
    }

    pub fn status(&self) -> HeroStatus {
        HeroStatus {
            mounted: self.mounted,
            layout: self.marquee.layout(),
            rows: self.marquee.summaries(),
            live_loops: self.marquee.live_loops(),
            marquee_rebuilds: self.marquee.rebuild_count(),
            entrance: self
                .entrance
                .as_ref()
                .map_or(EntranceStatus::Idle, EntranceTimeline::status),
            entrance_plan: self
                .entrance
                .as_ref()
                .map(|e| e.plan().to_vec())
                .unwrap_or_default(),
            live_splits: self
                .entrance
                .as_ref()
                .map_or(0, EntranceTimeline::live_splits),
        }
    }
}
