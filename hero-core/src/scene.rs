//! The paint surface the engine drives
//!
//! The engine never touches a renderer directly. A host (the Dioxus `ui`
//! crate, the headless scene used by tests and the CLI) implements these
//! traits. Every method addressing an element that is not mounted must be a
//! silent no-op.

use crate::layout::RowStyle;
use crate::marquee::RowContent;
use serde::{Deserialize, Serialize};

/// Opaque reference to an element on the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ElementId(pub u32);

/// Animatable properties. `None` leaves the property untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Props {
    /// Horizontal translation in pixels
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f32>,
    /// Vertical offset in pixels
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f32>,
}

impl Props {
    pub const fn new() -> Self {
        Self {
            x: None,
            y: None,
            opacity: None,
        }
    }

    pub const fn x(mut self, x: f32) -> Self {
        self.x = Some(x);
        self
    }

    pub const fn y(mut self, y: f32) -> Self {
        self.y = Some(y);
        self
    }

    pub const fn opacity(mut self, opacity: f32) -> Self {
        self.opacity = Some(opacity);
        self
    }

    /// Overlay `other` on top of `self`.
    pub fn merge(self, other: Props) -> Props {
        Props {
            x: other.x.or(self.x),
            y: other.y.or(self.y),
            opacity: other.opacity.or(self.opacity),
        }
    }

    /// Interpolate every property present in both `from` and `to`.
    pub fn interpolate(from: &Props, to: &Props, t: f32) -> Props {
        let mix = |a: Option<f32>, b: Option<f32>| match (a, b) {
            (Some(a), Some(b)) => Some(crate::math::lerp(a, b, t)),
            (None, b) => b,
            (a, None) => a,
        };
        Props {
            x: mix(from.x, to.x),
            y: mix(from.y, to.y),
            opacity: mix(from.opacity, to.opacity),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_none() && self.y.is_none() && self.opacity.is_none()
    }
}

/// The two elements of a marquee row: the revealed container and the
/// translated text track inside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RowHandles {
    pub container: ElementId,
    pub track: ElementId,
}

/// Rendering, measuring and animating elements.
pub trait Surface {
    /// Render exactly `count` row containers with `style`.
    fn set_row_count(&mut self, count: usize, style: RowStyle);

    /// Handles of row `index`, if that row is mounted.
    fn row(&self, index: usize) -> Option<RowHandles>;

    /// Replace the content of a row track.
    fn set_row_content(&mut self, track: ElementId, content: &RowContent);

    /// Rendered width of the first tile in a row track, once laid out.
    fn measure_tile(&self, track: ElementId) -> Option<f32>;

    /// Set the given properties on an element.
    fn apply(&mut self, element: ElementId, props: &Props);

    /// Drop every property previously set through [`Surface::apply`].
    fn clear_props(&mut self, element: ElementId);

    fn is_mounted(&self, element: ElementId) -> bool;
}

/// Granularity of a text split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SplitKind {
    Lines,
    /// Lines, with each line further split into words
    LinesWords,
    Chars,
}

/// Wrapped fragments produced by a split, each an element of its own.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fragments {
    pub lines: Vec<ElementId>,
    pub words: Vec<ElementId>,
    pub chars: Vec<ElementId>,
}

/// Decomposes text elements into fragments and restores them.
pub trait TextSplitter {
    /// Split the text of `element`. `None` if the element is not mounted.
    fn split(&mut self, element: ElementId, kind: SplitKind) -> Option<Fragments>;

    /// Restore the unsplit text of `element`. No-op if not split.
    fn revert(&mut self, element: ElementId);
}

/// Everything the hero engine needs from a host.
pub trait Scene: Surface + TextSplitter {}

impl<T: Surface + TextSplitter + ?Sized> Scene for T {}

/// A split owned by the code that created it.
///
/// Keep it in an `Option` slot and `take()` it to revert: reverting an empty
/// slot does nothing, and a split reverts at most once.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitText {
    source: ElementId,
    fragments: Fragments,
    reverted: bool,
}

impl SplitText {
    /// Split `element`; `None` when the splitter cannot reach it.
    pub fn new<T: TextSplitter + ?Sized>(
        splitter: &mut T,
        element: ElementId,
        kind: SplitKind,
    ) -> Option<Self> {
        splitter.split(element, kind).map(|fragments| Self {
            source: element,
            fragments,
            reverted: false,
        })
    }

    pub fn source(&self) -> ElementId {
        self.source
    }

    pub fn lines(&self) -> &[ElementId] {
        &self.fragments.lines
    }

    pub fn words(&self) -> &[ElementId] {
        &self.fragments.words
    }

    pub fn chars(&self) -> &[ElementId] {
        &self.fragments.chars
    }

    pub fn is_reverted(&self) -> bool {
        self.reverted
    }

    pub fn revert<T: TextSplitter + ?Sized>(&mut self, splitter: &mut T) {
        if self.reverted {
            return;
        }
        splitter.revert(self.source);
        self.reverted = true;
    }
}

/// Revert whatever split a slot holds and empty it.
pub fn revert_slot<T: TextSplitter + ?Sized>(slot: &mut Option<SplitText>, splitter: &mut T) {
    if let Some(mut split) = slot.take() {
        split.revert(splitter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    #[derive(Default)]
    struct CountingSplitter {
        reverts: usize,
    }

    impl TextSplitter for CountingSplitter {
        fn split(&mut self, element: ElementId, _kind: SplitKind) -> Option<Fragments> {
            (element.0 != 0).then(|| Fragments {
                chars: vec![ElementId(100), ElementId(101)],
                ..Fragments::default()
            })
        }

        fn revert(&mut self, _element: ElementId) {
            self.reverts += 1;
        }
    }

    #[test]
    fn test_props_interpolate_only_shared_keys() {
        let from = Props::new().y(30.0).opacity(0.0);
        let to = Props::new().y(0.0).opacity(1.0).x(5.0);
        assert_eq!(
            Props::interpolate(&from, &to, 0.5),
            Props::new().x(5.0).y(15.0).opacity(0.5)
        );
    }

    #[test]
    fn test_props_merge() {
        let base = Props::new().x(1.0).y(2.0);
        assert_eq!(base.merge(Props::new().y(9.0)), Props::new().x(1.0).y(9.0));
        assert!(Props::new().is_empty());
    }

    #[test]
    fn test_split_revert_is_idempotent() {
        let mut splitter = CountingSplitter::default();
        let mut split = SplitText::new(&mut splitter, ElementId(3), SplitKind::Chars).unwrap();
        assert_eq!(split.chars().len(), 2);
        split.revert(&mut splitter);
        split.revert(&mut splitter);
        assert!(split.is_reverted());
        assert_eq!(splitter.reverts, 1);
    }

    #[test]
    fn test_revert_slot_handles_empty_slots() {
        let mut splitter = CountingSplitter::default();
        let mut slot = SplitText::new(&mut splitter, ElementId(0), SplitKind::Lines);
        assert!(slot.is_none());
        revert_slot(&mut slot, &mut splitter);

        let mut slot = SplitText::new(&mut splitter, ElementId(4), SplitKind::Lines);
        revert_slot(&mut slot, &mut splitter);
        revert_slot(&mut slot, &mut splitter);
        assert_eq!(splitter.reverts, 1);
    }
}
