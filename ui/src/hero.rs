use crate::clock::FrameClock;
use crate::view::{HeroView, TextModel, TextPiece};
use dioxus::prelude::*;
use hero_core::{HeroConfig, ViewportMetrics};
use std::collections::BTreeMap;
use std::rc::Rc;
use std::time::Duration;

/// Target time between two animation frames
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

const SECTION_STYLE: &str = "position: relative; z-index: 0; min-height: 100vh; width: 100%; \
                             overflow: hidden;";
const MARQUEE_STYLE: &str = "pointer-events: none; user-select: none; position: absolute; \
                             inset: 0; z-index: 10; display: flex; flex-direction: column; \
                             gap: 0.25rem; overflow: hidden;";
const ROW_STYLE: &str = "display: flex; align-items: center; overflow: hidden; \
                         white-space: nowrap; font-weight: 700; font-style: italic; \
                         text-transform: uppercase; color: #0f172a;";
const CONTENT_STYLE: &str = "position: absolute; inset: 0; z-index: 20; display: flex; \
                             align-items: center; justify-content: center; padding: 0 2rem;";

/// Landing-page hero: looping marquee rows behind the brand, heading and
/// calls to action, revealed by the entrance timeline.
#[component]
pub fn HeroSection(
    /// Viewport width in CSS pixels
    width: u32,
    /// Viewport height in CSS pixels
    height: u32,
    #[props(default)] config: HeroConfig,
) -> Element {
    let mut view = use_signal(|| HeroView::new(config.clone(), ViewportMetrics::new(width, height)));

    use_effect(use_reactive!(|(width, height)| {
        if view.write().resize(ViewportMetrics::new(width, height)) {
            tracing::debug!("Hero rebuilt for {}x{}", width, height);
        }
    }));

    // First tile of each row, by row index
    let mut tiles = use_signal(BTreeMap::<usize, Rc<MountedData>>::new);

    use_future(move || async move {
        let clock = FrameClock::start();
        loop {
            sleep(FRAME_INTERVAL).await;
            measure_tiles(view, tiles).await;
            let mut state = view.write();
            if !state.is_mounted() {
                break;
            }
            state.advance_to(clock.elapsed());
        }
    });

    use_drop(move || {
        if let Ok(mut state) = view.try_write() {
            state.unmount();
        }
    });

    let state = view.read();
    let rows = state.rows();
    let brand = state.brand();
    let subheading = state.subheading();
    let heading = state.heading();
    let description_style = state.content_style(0);
    let cta_style = state.content_style(1);
    let count_style = state.content_style(2);
    let content = state.config().content.clone();
    drop(state);

    rsx! {
        section {
            class: "hero",
            style: SECTION_STYLE,

            div {
                class: "hero-marquee",
                style: MARQUEE_STYLE,
                for (index, row) in rows.into_iter().enumerate() {
                    div {
                        key: "{index}",
                        class: "hero-marquee-row",
                        style: "{ROW_STYLE} {row.container_style}",
                        span {
                            class: "marquee-text",
                            style: "display: inline-block; will-change: transform; {row.track_style}",
                            for (position, piece) in row.pieces.into_iter().enumerate() {
                                if position == row.first_tile {
                                    span {
                                        onmounted: move |event: MountedEvent| {
                                            tiles.write().insert(index, event.data());
                                        },
                                        "{piece}"
                                    }
                                } else {
                                    span { "{piece}" }
                                }
                            }
                        }
                    }
                }
            }

            div {
                class: "hero-content",
                style: CONTENT_STYLE,
                div {
                    style: "width: 100%; max-width: 80rem;",
                    div {
                        style: "overflow: hidden;",
                        h3 {
                            class: "hero-subheading",
                            style: "font-weight: 700; font-size: 1.25rem; margin-bottom: 0.5rem;",
                            {render_text(subheading)}
                        }
                    }
                    div {
                        style: "overflow: hidden;",
                        h1 {
                            class: "hero-brand",
                            style: "font-weight: 900; line-height: 1; white-space: nowrap; font-size: clamp(50px, 10vw, 200px);",
                            {render_text(brand)}
                        }
                        h1 {
                            class: "hero-heading",
                            style: "font-weight: 900; text-transform: uppercase; white-space: pre-line; max-width: 50%;",
                            {render_text(heading)}
                        }
                    }
                    p {
                        class: "hero-content-item",
                        style: "font-weight: 700; max-width: 42rem; margin-bottom: 2rem; {description_style}",
                        "{content.description}"
                    }
                    div {
                        class: "hero-content-item",
                        style: "display: flex; gap: 1rem; margin-bottom: 2rem; {cta_style}",
                        button { class: "hero-cta hero-cta-primary", "{content.primary_cta}" }
                        button { class: "hero-cta hero-cta-secondary", "{content.secondary_cta}" }
                    }
                    p {
                        class: "hero-content-item",
                        style: "font-weight: 700; color: #4b5563; {count_style}",
                        "{content.freelancers_count}"
                    }
                }
            }
        }
    }
}

/// Report the rendered width of every first tile the engine still waits for.
async fn measure_tiles(mut view: Signal<HeroView>, tiles: Signal<BTreeMap<usize, Rc<MountedData>>>) {
    let awaiting = view.read().rows_awaiting_measure();
    for index in awaiting {
        let Some(tile) = tiles.read().get(&index).cloned() else {
            continue;
        };
        match tile.get_client_rect().await {
            Ok(rect) => view.write().report_tile_width(index, rect.width() as f32),
            Err(err) => tracing::trace!("Row {} tile not measurable yet: {:?}", index, err),
        }
    }
}

fn render_text(model: Option<TextModel>) -> Element {
    match model {
        None => rsx! {},
        Some(TextModel::Whole { text, style }) => rsx! {
            span { style: "{style}", "{text}" }
        },
        Some(TextModel::Split { style, pieces }) => rsx! {
            span {
                style: "{style}",
                for piece in pieces {
                    {render_piece(piece)}
                }
            }
        },
    }
}

fn render_piece(piece: TextPiece) -> Element {
    let display = if piece.block { "block" } else { "inline-block" };
    rsx! {
        span {
            style: "display: {display}; {piece.style}",
            if piece.children.is_empty() {
                "{piece.text}"
            } else {
                for word in piece.children {
                    span {
                        style: "display: inline-block; margin-right: 0.25em; {word.style}",
                        "{word.text}"
                    }
                }
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
async fn sleep(duration: Duration) {
    gloo_timers::future::TimeoutFuture::new(duration.as_millis() as u32).await;
}

#[cfg(not(target_arch = "wasm32"))]
async fn sleep(duration: Duration) {
    tokio::time::sleep(duration).await;
}
