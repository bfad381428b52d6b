//! In-memory scene
//!
//! Keeps element state in maps. Tile widths come from the host when it
//! reports them, otherwise they are estimated from the glyph count. Used by
//! the test suites, the CLI simulator and the `ui` crate.

use crate::config::HeroContent;
use crate::entrance::EntranceTargets;
use crate::layout::RowStyle;
use crate::marquee::RowContent;
use crate::scene::{ElementId, Fragments, Props, RowHandles, SplitKind, Surface, TextSplitter};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Average glyph advance as a fraction of the font size
pub const DEFAULT_ADVANCE_RATIO: f32 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    Text,
    RowContainer,
    RowTrack,
    Fragment,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementState {
    pub kind: ElementKind,
    pub text: String,
    pub props: Props,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<ElementId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub split: Option<Fragments>,
}

impl ElementState {
    fn new(kind: ElementKind, text: impl Into<String>, parent: Option<ElementId>) -> Self {
        Self {
            kind,
            text: text.into(),
            props: Props::default(),
            parent,
            split: None,
        }
    }
}

/// State of one marquee row, flattened for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowSnapshot {
    pub index: usize,
    pub opacity: Option<f32>,
    pub y: Option<f32>,
    pub x: Option<f32>,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneSnapshot {
    pub row_style: Option<RowStyle>,
    pub rows: Vec<RowSnapshot>,
    pub elements: usize,
    pub live_splits: usize,
}

#[derive(Debug, Clone)]
pub struct HeadlessScene {
    next_id: u32,
    elements: BTreeMap<ElementId, ElementState>,
    rows: Vec<RowHandles>,
    row_style: Option<RowStyle>,
    row_contents: BTreeMap<ElementId, RowContent>,
    tile_widths: BTreeMap<ElementId, f32>,
    /// `None` when only reported widths count
    advance_ratio: Option<f32>,
    row_limit: Option<usize>,
}

impl Default for HeadlessScene {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessScene {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            elements: BTreeMap::new(),
            rows: Vec::new(),
            row_style: None,
            row_contents: BTreeMap::new(),
            tile_widths: BTreeMap::new(),
            advance_ratio: Some(DEFAULT_ADVANCE_RATIO),
            row_limit: None,
        }
    }

    pub fn with_advance_ratio(mut self, ratio: f32) -> Self {
        self.advance_ratio = Some(ratio);
        self
    }

    /// Never estimate: a tile has a width only once the host reported one
    /// through [`HeadlessScene::set_tile_width`].
    pub fn measured_only(mut self) -> Self {
        self.advance_ratio = None;
        self
    }

    /// Record the rendered width of the first tile of `track`. Ignored for
    /// unmounted tracks and non-positive widths.
    pub fn set_tile_width(&mut self, track: ElementId, width: f32) {
        if width > 0.0 && width.is_finite() && self.row_contents.contains_key(&track) {
            self.tile_widths.insert(track, width);
        }
    }

    /// Whether `track` holds content that still has no reported width.
    pub fn awaits_measure(&self, track: ElementId) -> bool {
        self.row_contents.contains_key(&track) && !self.tile_widths.contains_key(&track)
    }

    /// Never mount more than `limit` rows, as a host that is still rendering
    /// would.
    pub fn with_row_limit(mut self, limit: usize) -> Self {
        self.row_limit = Some(limit);
        self
    }

    /// Mount a text element. A `\n` separates rendered lines.
    pub fn add_text(&mut self, text: &str) -> ElementId {
        self.insert(ElementState::new(ElementKind::Text, text, None))
    }

    /// Mount the static hero copy and return the entrance targets for it.
    pub fn mount_content(&mut self, content: &HeroContent) -> EntranceTargets {
        let buttons = format!("{} {}", content.primary_cta, content.secondary_cta);
        EntranceTargets {
            brand: Some(self.add_text(&content.brand)),
            subheading: Some(self.add_text(&content.subheading)),
            heading: Some(self.add_text(&content.heading_lines.join("\n"))),
            content_items: vec![
                self.add_text(&content.description),
                self.add_text(&buttons),
                self.add_text(&content.freelancers_count),
            ],
        }
    }

    /// Unmount an element and everything under it.
    pub fn remove(&mut self, element: ElementId) {
        for child in self.children(element) {
            self.remove(child);
        }
        self.elements.remove(&element);
        self.row_contents.remove(&element);
        self.tile_widths.remove(&element);
    }

    pub fn element(&self, element: ElementId) -> Option<&ElementState> {
        self.elements.get(&element)
    }

    /// Props set on `element`; empty if it is not mounted.
    pub fn props(&self, element: ElementId) -> Props {
        self.elements
            .get(&element)
            .map(|state| state.props)
            .unwrap_or_default()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn row_style(&self) -> Option<RowStyle> {
        self.row_style
    }

    /// Direct children of `element`, in mount order.
    pub fn children(&self, element: ElementId) -> Vec<ElementId> {
        self.elements
            .iter()
            .filter(|(_, state)| state.parent == Some(element))
            .map(|(id, _)| *id)
            .collect()
    }

    pub fn row_content(&self, index: usize) -> Option<&RowContent> {
        let track = self.rows.get(index)?.track;
        self.row_contents.get(&track)
    }

    /// Number of elements currently split into fragments.
    pub fn live_splits(&self) -> usize {
        self.elements
            .values()
            .filter(|state| state.split.is_some())
            .count()
    }

    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    pub fn snapshot(&self) -> SceneSnapshot {
        let rows = self
            .rows
            .iter()
            .enumerate()
            .map(|(index, handles)| {
                let container = self.props(handles.container);
                let track = self.props(handles.track);
                RowSnapshot {
                    index,
                    opacity: container.opacity,
                    y: container.y,
                    x: track.x,
                    text: self
                        .row_contents
                        .get(&handles.track)
                        .map(|content| content.tile.clone())
                        .unwrap_or_default(),
                }
            })
            .collect();
        SceneSnapshot {
            row_style: self.row_style,
            rows,
            elements: self.elements.len(),
            live_splits: self.live_splits(),
        }
    }

    fn insert(&mut self, state: ElementState) -> ElementId {
        let id = ElementId(self.next_id);
        self.next_id += 1;
        self.elements.insert(id, state);
        id
    }

    fn fragment(&mut self, parent: ElementId, text: &str) -> ElementId {
        self.insert(ElementState::new(ElementKind::Fragment, text, Some(parent)))
    }
}

impl Surface for HeadlessScene {
    fn set_row_count(&mut self, count: usize, style: RowStyle) {
        let count = self.row_limit.map_or(count, |limit| count.min(limit));
        while self.rows.len() > count {
            if let Some(handles) = self.rows.pop() {
                self.remove(handles.container);
            }
        }
        while self.rows.len() < count {
            let container = self.insert(ElementState::new(ElementKind::RowContainer, "", None));
            let track = self.insert(ElementState::new(ElementKind::RowTrack, "", Some(container)));
            self.rows.push(RowHandles { container, track });
        }
        self.row_style = Some(style);
    }

    fn row(&self, index: usize) -> Option<RowHandles> {
        self.rows.get(index).copied()
    }

    fn set_row_content(&mut self, track: ElementId, content: &RowContent) {
        let Some(state) = self.elements.get_mut(&track) else {
            return;
        };
        state.text = content.to_text();
        self.tile_widths.remove(&track);
        self.row_contents.insert(track, content.clone());
    }

    fn measure_tile(&self, track: ElementId) -> Option<f32> {
        if let Some(width) = self.tile_widths.get(&track) {
            return Some(*width);
        }
        let content = self.row_contents.get(&track)?;
        let font_size = self.row_style?.font_size_px;
        Some(content.tile.chars().count() as f32 * font_size * self.advance_ratio?)
    }

    fn apply(&mut self, element: ElementId, props: &Props) {
        if let Some(state) = self.elements.get_mut(&element) {
            state.props = state.props.merge(*props);
        }
    }

    fn clear_props(&mut self, element: ElementId) {
        if let Some(state) = self.elements.get_mut(&element) {
            state.props = Props::default();
        }
    }

    fn is_mounted(&self, element: ElementId) -> bool {
        self.elements.contains_key(&element)
    }
}

impl TextSplitter for HeadlessScene {
    fn split(&mut self, element: ElementId, kind: SplitKind) -> Option<Fragments> {
        if self.elements.get(&element)?.split.is_some() {
            self.revert(element);
        }
        let text = self.elements.get(&element)?.text.clone();
        let mut fragments = Fragments::default();

        match kind {
            SplitKind::Chars => {
                for ch in text.chars().filter(|c| !c.is_whitespace()) {
                    let id = self.fragment(element, &ch.to_string());
                    fragments.chars.push(id);
                }
            }
            SplitKind::Lines | SplitKind::LinesWords => {
                for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
                    let line_id = self.fragment(element, line);
                    fragments.lines.push(line_id);
                    if kind == SplitKind::LinesWords {
                        for word in line.split_whitespace() {
                            let id = self.fragment(line_id, word);
                            fragments.words.push(id);
                        }
                    }
                }
            }
        }

        if let Some(state) = self.elements.get_mut(&element) {
            state.split = Some(fragments.clone());
        }
        Some(fragments)
    }

    fn revert(&mut self, element: ElementId) {
        let Some(split) = self
            .elements
            .get_mut(&element)
            .and_then(|state| state.split.take())
        else {
            return;
        };
        for line_or_char in split.lines.iter().chain(&split.chars) {
            self.remove(*line_or_char);
        }
    }
}
