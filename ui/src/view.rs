use hero_core::headless::HeadlessScene;
use hero_core::{ElementId, EntranceTargets, HeroConfig, HeroSection, Props, RowPiece, ViewportMetrics};
use std::time::Duration;
use tracing::debug;

/// Engine state behind the hero component: the controller, the scene it
/// writes into and the clock it is driven by.
///
/// Marquee loops only start once the component has reported the rendered
/// width of each row's first tile.
#[derive(Debug)]
pub struct HeroView {
    hero: HeroSection,
    scene: HeadlessScene,
    targets: EntranceTargets,
    clock: Duration,
}

/// One marquee row, ready to render.
#[derive(Debug, Clone, PartialEq)]
pub struct RowModel {
    pub container_style: String,
    pub track_style: String,
    pub pieces: Vec<String>,
    /// Position in `pieces` of the tile that gets measured
    pub first_tile: usize,
}

/// A text fragment and its inline style.
#[derive(Debug, Clone, PartialEq)]
pub struct TextPiece {
    pub text: String,
    pub style: String,
    /// Lines render as blocks, words and chars inline
    pub block: bool,
    pub children: Vec<TextPiece>,
}

/// A text element, either whole or split into fragments.
#[derive(Debug, Clone, PartialEq)]
pub enum TextModel {
    Whole { text: String, style: String },
    Split { style: String, pieces: Vec<TextPiece> },
}

impl HeroView {
    /// Mount the hero into a fresh scene at `viewport`.
    pub fn new(config: HeroConfig, viewport: ViewportMetrics) -> Self {
        let mut scene = HeadlessScene::new().measured_only();
        let targets = scene.mount_content(&config.content);
        let mut hero = HeroSection::new(config);
        hero.mount(viewport, targets.clone(), Duration::ZERO, &mut scene);
        Self {
            hero,
            scene,
            targets,
            clock: Duration::ZERO,
        }
    }

    pub fn config(&self) -> &HeroConfig {
        self.hero.config()
    }

    pub fn clock(&self) -> Duration {
        self.clock
    }

    pub fn is_mounted(&self) -> bool {
        self.hero.is_mounted()
    }

    pub fn resize(&mut self, viewport: ViewportMetrics) -> bool {
        self.hero.resize(viewport, self.clock, &mut self.scene)
    }

    /// Render the frame at `now`, measured from mount. The clock never
    /// moves backwards.
    pub fn advance_to(&mut self, now: Duration) {
        self.clock = self.clock.max(now);
        self.hero.frame(self.clock, &mut self.scene);
    }

    /// Move the clock forward by `delta` and render one frame.
    pub fn advance(&mut self, delta: Duration) {
        self.advance_to(self.clock + delta);
    }

    /// Rows whose first tile has no rendered width yet.
    pub fn rows_awaiting_measure(&self) -> Vec<usize> {
        (0..self.scene.row_count())
            .filter(|index| {
                hero_core::Surface::row(&self.scene, *index)
                    .is_some_and(|handles| self.scene.awaits_measure(handles.track))
            })
            .collect()
    }

    /// Record the rendered width, in pixels, of the first tile of row `index`.
    pub fn report_tile_width(&mut self, index: usize, width: f32) {
        let Some(handles) = hero_core::Surface::row(&self.scene, index) else {
            return;
        };
        debug!("Row {} tile measured at {:.1}px", index, width);
        self.scene.set_tile_width(handles.track, width);
    }

    pub fn live_loops(&self) -> usize {
        self.hero.marquee().live_loops()
    }

    pub fn unmount(&mut self) {
        debug!("Hero view unmounted after {:?}", self.clock);
        self.hero.unmount(&mut self.scene);
    }

    pub fn live_animations(&self) -> usize {
        self.hero.live_animations()
    }

    pub fn rows(&self) -> Vec<RowModel> {
        let row_style = self.scene.row_style();
        (0..self.scene.row_count())
            .filter_map(|index| {
                let handles = hero_core::Surface::row(&self.scene, index)?;
                let content = self.scene.row_content(index)?;
                let mut container_style = props_style(self.scene.props(handles.container));
                if let Some(style) = row_style {
                    container_style.push_str(&format!(
                        "font-size: {:.2}px; min-height: {:.2}px;",
                        style.font_size_px, style.min_height_px
                    ));
                }
                let pieces = content.pieces();
                let first_tile = pieces
                    .iter()
                    .position(|piece| matches!(piece, RowPiece::Tile(_)))
                    .unwrap_or_default();
                let pieces = pieces
                    .into_iter()
                    .map(|piece| match piece {
                        RowPiece::Separator => "\u{00a0}•\u{00a0}".to_string(),
                        RowPiece::Tile(tile) => tile.to_string(),
                    })
                    .collect();
                Some(RowModel {
                    container_style,
                    track_style: props_style(self.scene.props(handles.track)),
                    pieces,
                    first_tile,
                })
            })
            .collect()
    }

    pub fn brand(&self) -> Option<TextModel> {
        self.text(self.targets.brand?)
    }

    pub fn subheading(&self) -> Option<TextModel> {
        self.text(self.targets.subheading?)
    }

    pub fn heading(&self) -> Option<TextModel> {
        self.text(self.targets.heading?)
    }

    /// Inline style of the content item at `index`.
    pub fn content_style(&self, index: usize) -> String {
        self.targets
            .content_items
            .get(index)
            .map(|id| props_style(self.scene.props(*id)))
            .unwrap_or_default()
    }

    fn text(&self, element: ElementId) -> Option<TextModel> {
        let state = self.scene.element(element)?;
        let style = props_style(state.props);
        let Some(split) = &state.split else {
            return Some(TextModel::Whole {
                text: state.text.clone(),
                style,
            });
        };
        let pieces = if split.chars.is_empty() {
            split
                .lines
                .iter()
                .filter_map(|line| {
                    let mut piece = self.piece(*line, true)?;
                    piece.children = self
                        .scene
                        .children(*line)
                        .into_iter()
                        .filter_map(|word| self.piece(word, false))
                        .collect();
                    Some(piece)
                })
                .collect()
        } else {
            split
                .chars
                .iter()
                .filter_map(|ch| self.piece(*ch, false))
                .collect()
        };
        Some(TextModel::Split { style, pieces })
    }

    fn piece(&self, element: ElementId, block: bool) -> Option<TextPiece> {
        let state = self.scene.element(element)?;
        Some(TextPiece {
            text: state.text.clone(),
            style: props_style(state.props),
            block,
            children: Vec::new(),
        })
    }
}

/// Inline CSS for animated props.
fn props_style(props: Props) -> String {
    let mut style = String::new();
    if props.x.is_some() || props.y.is_some() {
        style.push_str(&format!(
            "transform: translate({:.2}px, {:.2}px);",
            props.x.unwrap_or_default(),
            props.y.unwrap_or_default()
        ));
    }
    if let Some(opacity) = props.opacity {
        style.push_str(&format!("opacity: {:.3};", opacity));
    }
    style
}
