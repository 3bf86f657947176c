//! Ayu color theme and text styling for dwell output.
//!
//! Uses the Ayu Dark color palette. Color source:
//! <https://github.com/ayu-theme/ayu-colors>
//!
//! Only headings, identifiers and numbers get color; names and titles use
//! standard text so reports stay readable when piped.

use owo_colors::OwoColorize;

use crate::terminal::supports_color;

// ---------------------------------------------------------------------------
// Ayu Dark color palette (RGB values)
// ---------------------------------------------------------------------------

const PASS: (u8, u8, u8) = (0xc2, 0xd9, 0x4c); // #c2d94c - bright green
const WARN: (u8, u8, u8) = (0xff, 0xb4, 0x54); // #ffb454 - bright yellow
const MUTED: (u8, u8, u8) = (0x6c, 0x76, 0x80); // #6c7680 - muted gray
const ACCENT: (u8, u8, u8) = (0x59, 0xc2, 0xff); // #59c2ff - bright blue

/// Seconds in one hour.
pub const SECONDS_PER_HOUR: f64 = 3600.0;

/// Width of the light separator line.
pub const SEPARATOR_WIDTH: usize = 42;

// ---------------------------------------------------------------------------
// Helper: apply truecolor only when enabled
// ---------------------------------------------------------------------------

fn paint(s: &str, rgb: (u8, u8, u8), bold: bool, enabled: bool) -> String {
    match (enabled, bold) {
        (false, _) => s.to_string(),
        (true, false) => s.truecolor(rgb.0, rgb.1, rgb.2).to_string(),
        (true, true) => s.truecolor(rgb.0, rgb.1, rgb.2).bold().to_string(),
    }
}

// ---------------------------------------------------------------------------
// Style
// ---------------------------------------------------------------------------

/// Semantic styling with color switched on or off.
///
/// Renderers take a `Style` so their output does not depend on the
/// terminal they run in; [`Style::detect`] is what commands use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    color: bool,
}

impl Style {
    /// Colors when stdout supports them (see [`supports_color`]).
    pub fn detect() -> Self {
        Self {
            color: supports_color(),
        }
    }

    /// Never colors.
    pub fn plain() -> Self {
        Self { color: false }
    }

    /// Always colors.
    pub fn colored() -> Self {
        Self { color: true }
    }

    /// Pass (green) styling.
    pub fn pass(&self, s: &str) -> String {
        paint(s, PASS, false, self.color)
    }

    /// Warning (yellow) styling.
    pub fn warn(&self, s: &str) -> String {
        paint(s, WARN, false, self.color)
    }

    /// Muted (gray) styling.
    pub fn muted(&self, s: &str) -> String {
        paint(s, MUTED, false, self.color)
    }

    /// Accent (blue) styling.
    pub fn accent(&self, s: &str) -> String {
        paint(s, ACCENT, false, self.color)
    }

    pub fn bold(&self, s: &str) -> String {
        if self.color {
            s.bold().to_string()
        } else {
            s.to_string()
        }
    }

    /// A report banner such as `=== Issues Report ===`.
    pub fn banner(&self, title: &str) -> String {
        paint(&banner(title), ACCENT, true, self.color)
    }

    /// The light separator line.
    pub fn separator(&self) -> String {
        self.muted(&"\u{2500}".repeat(SEPARATOR_WIDTH))
    }

    /// A duration in seconds as a number of hours.
    pub fn hours(&self, seconds: f64) -> String {
        self.pass(&format_hours(seconds))
    }
}

// ---------------------------------------------------------------------------
// Semantic render helpers (color detected from the terminal)
// ---------------------------------------------------------------------------

/// Renders text with pass (green) styling.
pub fn render_pass(s: &str) -> String {
    Style::detect().pass(s)
}

/// Renders text with warning (yellow) styling.
pub fn render_warn(s: &str) -> String {
    Style::detect().warn(s)
}

/// Renders text with muted (gray) styling.
pub fn render_muted(s: &str) -> String {
    Style::detect().muted(s)
}

/// Renders text with accent (blue) styling.
pub fn render_accent(s: &str) -> String {
    Style::detect().accent(s)
}

/// Renders text in bold.
pub fn render_bold(s: &str) -> String {
    Style::detect().bold(s)
}

/// Renders the light separator line in muted color.
pub fn render_separator() -> String {
    Style::detect().separator()
}

// ---------------------------------------------------------------------------
// Plain formatting
// ---------------------------------------------------------------------------

/// `=== title ===`
pub fn banner(title: &str) -> String {
    format!("=== {} ===", title)
}

/// Formats seconds as hours with two decimals, e.g. `1.50 hours`.
pub fn format_hours(seconds: f64) -> String {
    format!("{:.2} hours", seconds / SECONDS_PER_HOUR)
}

/// Formats an allocation score with two decimals.
pub fn format_seconds(seconds: f64) -> String {
    format!("{:.2}", seconds)
}
