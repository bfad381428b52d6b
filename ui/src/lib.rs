//! This crate contains all shared UI for the workspace.

mod clock;
pub use clock::FrameClock;

mod hero;
pub use hero::{HeroSection, HeroSectionProps, FRAME_INTERVAL};

mod view;
pub use view::{HeroView, RowModel, TextModel, TextPiece};
