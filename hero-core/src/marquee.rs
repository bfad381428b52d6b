//! Marquee tiler
//!
//! Builds the background rows: each row shows its rotation of the vocabulary
//! three times over, and scrolls by exactly one tile before snapping back, so
//! the loop has no visible seam and never grows.

use crate::animator::{AnimationHandle, Animator};
use crate::config::MarqueeTiming;
use crate::layout::LayoutParams;
use crate::scene::{Props, RowHandles, Surface};
use crate::stagger::{Stagger, StaggerFrom};
use crate::timeline::{Position, Timeline};
use crate::tween::{Repeat, Tween};
use crate::vocabulary::{MarqueeVocabulary, SEPARATOR};
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use strum::Display;
use tracing::{debug, trace};

/// Copies of the row text rendered per track
pub const TILE_COPIES: usize = 3;

/// Scroll direction of a row; even rows go left, odd rows go right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    pub fn for_row(index: usize) -> Self {
        if index % 2 == 0 {
            Direction::Left
        } else {
            Direction::Right
        }
    }

    /// Start and end translation for a tile of width `tile_width`.
    pub fn travel(self, tile_width: f32) -> (f32, f32) {
        match self {
            Direction::Left => (0.0, -tile_width),
            Direction::Right => (-tile_width, 0.0),
        }
    }
}

/// Content of one row track: ` • <tile> • <tile> • <tile> •`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowContent {
    /// Text of a single tile
    pub tile: String,
    pub copies: usize,
}

/// A piece of a row track, in render order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowPiece<'a> {
    Separator,
    /// A discrete, measurable copy of the row text
    Tile(&'a str),
}

impl RowContent {
    pub fn for_row(vocabulary: &MarqueeVocabulary, index: usize) -> Self {
        Self {
            tile: vocabulary.row_text(index),
            copies: TILE_COPIES,
        }
    }

    pub fn pieces(&self) -> Vec<RowPiece<'_>> {
        let mut pieces = Vec::with_capacity(self.copies * 2 + 1);
        for _ in 0..self.copies {
            pieces.push(RowPiece::Separator);
            pieces.push(RowPiece::Tile(&self.tile));
        }
        pieces.push(RowPiece::Separator);
        pieces
    }

    /// The track flattened to text. The closing separator has no trailing
    /// space.
    pub fn to_text(&self) -> String {
        let mut text = String::new();
        for piece in self.pieces() {
            match piece {
                RowPiece::Separator => text.push_str(SEPARATOR),
                RowPiece::Tile(tile) => text.push_str(tile),
            }
        }
        text.truncate(text.trim_end().len());
        text
    }
}

/// One visible marquee row.
#[derive(Debug)]
pub struct RowState {
    pub index: usize,
    pub rotation_offset: usize,
    pub direction: Direction,
    /// Width of one tile, known after the first frame
    pub tile_width_px: Option<f32>,
    pub handles: RowHandles,
    looping: Option<AnimationHandle>,
}

impl RowState {
    pub fn is_looping(&self) -> bool {
        self.looping.is_some()
    }
}

/// Serializable view of a row, for inspection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowSummary {
    pub index: usize,
    pub rotation_offset: usize,
    pub direction: Direction,
    pub text: String,
    pub tile_width_px: Option<f32>,
    pub looping: bool,
}

/// Owns the marquee rows and every animation running on them.
#[derive(Debug)]
pub struct MarqueeTiler {
    vocabulary: MarqueeVocabulary,
    timing: MarqueeTiming,
    rng: StdRng,
    animator: Animator,
    rows: Vec<RowState>,
    layout: Option<LayoutParams>,
    reveal: Option<AnimationHandle>,
    measure_pending: bool,
    rebuilds: usize,
}

impl MarqueeTiler {
    pub fn new(vocabulary: MarqueeVocabulary, timing: MarqueeTiming, rng: StdRng) -> Self {
        Self {
            vocabulary,
            timing,
            rng,
            animator: Animator::new("marquee"),
            rows: Vec::new(),
            layout: None,
            reveal: None,
            measure_pending: false,
            rebuilds: 0,
        }
    }

    pub fn rows(&self) -> &[RowState] {
        &self.rows
    }

    pub fn layout(&self) -> Option<LayoutParams> {
        self.layout
    }

    /// Number of live loop animations.
    pub fn live_loops(&self) -> usize {
        self.rows
            .iter()
            .filter_map(|row| row.looping.as_ref())
            .filter(|handle| self.animator.is_live(handle))
            .count()
    }

    /// Every animation owned by the tiler, reveal included.
    pub fn live_animations(&self) -> usize {
        self.animator.live()
    }

    pub fn is_revealing(&self) -> bool {
        self.reveal
            .as_ref()
            .is_some_and(|handle| self.animator.is_live(handle))
    }

    pub fn rebuild_count(&self) -> usize {
        self.rebuilds
    }

    pub fn is_measure_pending(&self) -> bool {
        self.measure_pending
    }

    pub fn summaries(&self) -> Vec<RowSummary> {
        self.rows
            .iter()
            .map(|row| RowSummary {
                index: row.index,
                rotation_offset: row.rotation_offset,
                direction: row.direction,
                text: self.vocabulary.row_text(row.index),
                tile_width_px: row.tile_width_px,
                looping: row.is_looping(),
            })
            .collect()
    }

    /// Rebuild every row from scratch for `layout`.
    ///
    /// Loops are cancelled and transforms cleared before anything is
    /// recreated. Tiles are measured on the next [`MarqueeTiler::frame`],
    /// once the host has laid out the new text.
    pub fn rebuild<S: Surface + ?Sized>(&mut self, layout: LayoutParams, now: Duration, scene: &mut S) {
        let row_count_changed = self.layout.map(|l| l.row_count) != Some(layout.row_count);
        debug!(
            "Rebuilding marquee: {} rows at {:.1}px",
            layout.row_count, layout.font_size_px
        );

        self.cancel_loops(scene);
        scene.set_row_count(layout.row_count, layout.row_style());

        self.rows = (0..layout.row_count)
            .filter_map(|index| {
                let Some(handles) = scene.row(index) else {
                    trace!("row {index} is not mounted, skipping");
                    return None;
                };
                scene.set_row_content(handles.track, &RowContent::for_row(&self.vocabulary, index));
                Some(RowState {
                    index,
                    rotation_offset: self.vocabulary.rotation_offset(index),
                    direction: Direction::for_row(index),
                    tile_width_px: None,
                    handles,
                    looping: None,
                })
            })
            .collect();

        self.layout = Some(layout);
        self.measure_pending = true;
        self.rebuilds += 1;

        if row_count_changed {
            self.replay_reveal(now, scene);
        }
    }

    /// Measure pending tiles, start their loops, and advance animations.
    pub fn frame<S: Surface + ?Sized>(&mut self, now: Duration, scene: &mut S) {
        if self.measure_pending {
            self.measure_pending = !self.start_loops(now, scene);
        }
        let completed = self.animator.tick(now, scene);
        if let Some(reveal) = &self.reveal {
            if completed.contains(&reveal.id()) {
                trace!("marquee reveal completed");
                self.reveal = None;
            }
        }
    }

    /// Cancel everything and clear the transforms the tiler set.
    pub fn teardown<S: Surface + ?Sized>(&mut self, scene: &mut S) {
        self.cancel_loops(scene);
        if let Some(reveal) = self.reveal.take() {
            self.animator.cancel(reveal);
        }
        self.animator.cancel_all();
        self.rows.clear();
        self.layout = None;
        self.measure_pending = false;
    }

    fn cancel_loops<S: Surface + ?Sized>(&mut self, scene: &mut S) {
        for row in &mut self.rows {
            if let Some(handle) = row.looping.take() {
                self.animator.cancel(handle);
            }
            scene.clear_props(row.handles.track);
        }
    }

    /// Start a loop on every row whose tile can be measured. Returns `true`
    /// once every row is looping.
    fn start_loops<S: Surface + ?Sized>(&mut self, now: Duration, scene: &mut S) -> bool {
        let mut waiting = 0;
        for row in self.rows.iter_mut().filter(|row| row.looping.is_none()) {
            let Some(width) = scene.measure_tile(row.handles.track).filter(|w| *w > 0.0) else {
                trace!("row {} has no measurable tile yet", row.index);
                waiting += 1;
                continue;
            };
            row.tile_width_px = Some(width);
            let (from, to) = row.direction.travel(width);
            let tween = Tween::from_to(vec![row.handles.track], Props::new().x(from), Props::new().x(to))
                .duration(self.timing.loop_duration)
                .ease(self.timing.loop_ease)
                .repeat(Repeat::Infinite)
                .on_repeat(Props::new().x(from));
            row.looping = Some(self.animator.spawn(tween, now, scene));
        }
        debug!("{} marquee loops live, {} rows waiting", self.live_loops(), waiting);
        waiting == 0
    }

    fn replay_reveal<S: Surface + ?Sized>(&mut self, now: Duration, scene: &mut S) {
        if let Some(previous) = self.reveal.take() {
            self.animator.cancel(previous);
        }
        let containers = self.rows.iter().map(|row| row.handles.container).collect();
        let timing = &self.timing;
        let tween = Tween::from_to(
            containers,
            Props::new().opacity(0.0).y(timing.reveal_offset),
            Props::new().opacity(timing.row_opacity).y(0.0),
        )
        .duration(timing.reveal_duration)
        .ease(timing.reveal_ease)
        .stagger(
            Stagger::amount(timing.reveal_stagger, StaggerFrom::Start),
            &mut self.rng,
        );
        let mut reveal = Timeline::new().delay(timing.reveal_delay);
        reveal.add("rows", tween, Position::AfterPrevious);
        self.reveal = Some(self.animator.spawn(reveal, now, scene));
    }
}
