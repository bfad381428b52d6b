//! Responsive layout calculator
//!
//! Maps the viewport size onto the marquee font size and the number of
//! background rows.

use crate::error::{HeroError, Result};
use crate::math::{map_range, Range};
use serde::{Deserialize, Serialize};

/// Current viewport size in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ViewportMetrics {
    pub width: u32,
    pub height: u32,
}

impl ViewportMetrics {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Layout derived from a viewport; the marquee rebuilds whenever it changes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutParams {
    pub row_count: usize,
    pub font_size_px: f32,
}

impl LayoutParams {
    pub fn from_viewport(viewport: ViewportMetrics) -> Self {
        LayoutConfig::default().compute(viewport)
    }

    /// Style of every row container for this layout.
    pub fn row_style(&self) -> RowStyle {
        RowStyle {
            font_size_px: self.font_size_px * 1.5,
            min_height_px: self.font_size_px * 1.1,
        }
    }
}

/// Inline style of a marquee row container.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RowStyle {
    pub font_size_px: f32,
    pub min_height_px: f32,
}

/// Minimum viewport width and the row count used at or above it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowBreakpoint {
    pub min_width: u32,
    pub rows: usize,
}

/// Tunable constants of the layout calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Viewport heights mapped onto the font range (md..xl breakpoints)
    pub min_viewport: f32,
    pub max_viewport: f32,

    /// Font size range in pixels
    pub min_px: f32,
    pub max_px: f32,

    /// Breakpoints, widest first
    pub breakpoints: Vec<RowBreakpoint>,

    /// Rows below the narrowest breakpoint
    pub fallback_rows: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            min_viewport: 768.0,
            max_viewport: 1280.0,
            min_px: 100.0,
            max_px: 500.0,
            breakpoints: vec![
                RowBreakpoint { min_width: 1280, rows: 5 },
                RowBreakpoint { min_width: 1024, rows: 6 },
                RowBreakpoint { min_width: 768, rows: 7 },
            ],
            // Same as the md breakpoint; kept as observed on the live site.
            fallback_rows: 7,
        }
    }
}

impl LayoutConfig {
    pub fn font_size(&self, viewport_height: f32) -> f32 {
        map_range(
            viewport_height,
            Range::new(self.min_viewport, self.max_viewport),
            Range::new(self.min_px, self.max_px),
        )
    }

    pub fn row_count(&self, viewport_width: u32) -> usize {
        self.breakpoints
            .iter()
            .find(|bp| viewport_width >= bp.min_width)
            .map(|bp| bp.rows)
            .unwrap_or(self.fallback_rows)
    }

    pub fn compute(&self, viewport: ViewportMetrics) -> LayoutParams {
        LayoutParams {
            row_count: self.row_count(viewport.width),
            font_size_px: self.font_size(viewport.height as f32),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.max_viewport > self.min_viewport) {
            return Err(HeroError::Configuration(format!(
                "viewport range is empty: {}..{}",
                self.min_viewport, self.max_viewport
            )));
        }
        if !(self.max_px >= self.min_px) || self.min_px < 0.0 {
            return Err(HeroError::Configuration(format!(
                "font range is invalid: {}..{}",
                self.min_px, self.max_px
            )));
        }
        if self
            .breakpoints
            .windows(2)
            .any(|pair| pair[0].min_width <= pair[1].min_width)
        {
            return Err(HeroError::Configuration(
                "row breakpoints must be sorted widest first".to_string(),
            ));
        }
        if self.fallback_rows == 0 || self.breakpoints.iter().any(|bp| bp.rows == 0) {
            return Err(HeroError::Configuration(
                "row counts must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Marquee font size for a viewport height, in pixels.
pub fn compute_font_size(viewport_height: f32) -> f32 {
    LayoutConfig::default().font_size(viewport_height)
}

/// Number of marquee rows for a viewport width.
pub fn compute_row_count(viewport_width: u32) -> usize {
    LayoutConfig::default().row_count(viewport_width)
}
