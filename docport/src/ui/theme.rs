//! Module for managing the CLI's output theme.
//!
//! Maps the logical parts of DocPort's terminal output (messages, alert
//! severities, evidence snippets) to 16-color ANSI foreground colors.

use owo_colors::AnsiColors;
use std::collections::HashMap;

use docport_core::Severity;

/// Type alias for the theme map, providing a consistent type definition.
pub type ThemeMap = HashMap<ThemeEntry, ThemeStyle>;

/// The different logical parts of the output that can be styled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThemeEntry {
    /// Style for section titles.
    Header,
    /// Style for warning messages.
    Warn,
    /// Alert label / highlighted keyword at high severity.
    SeverityHigh,
    /// Alert label / highlighted keyword at medium severity.
    SeverityMedium,
    /// Alert label / highlighted keyword at low severity.
    SeverityLow,
    /// Style for evidence snippets.
    Snippet,
}

impl ThemeEntry {
    pub fn for_severity(severity: Severity) -> Self {
        match severity {
            Severity::High => ThemeEntry::SeverityHigh,
            Severity::Medium => ThemeEntry::SeverityMedium,
            Severity::Low => ThemeEntry::SeverityLow,
        }
    }
}

/// Represents the style configuration for a specific `ThemeEntry`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ThemeStyle {
    /// Optional foreground color.
    pub fg: Option<AnsiColors>,
}

/// Returns the default theme.
pub fn default_theme_map() -> ThemeMap {
    [
        (ThemeEntry::Header, AnsiColors::BrightCyan),
        (ThemeEntry::Warn, AnsiColors::Yellow),
        (ThemeEntry::SeverityHigh, AnsiColors::BrightRed),
        (ThemeEntry::SeverityMedium, AnsiColors::Yellow),
        (ThemeEntry::SeverityLow, AnsiColors::BrightYellow),
        (ThemeEntry::Snippet, AnsiColors::BrightBlack),
    ]
    .into_iter()
    .map(|(entry, color)| (entry, ThemeStyle { fg: Some(color) }))
    .collect()
}

/// Looks up the foreground color for `entry`, if the theme defines one.
pub fn color_for(entry: ThemeEntry, theme: &ThemeMap) -> Option<AnsiColors> {
    theme.get(&entry).and_then(|style| style.fg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_severity_has_a_color() {
        let theme = default_theme_map();
        for severity in [Severity::High, Severity::Medium, Severity::Low] {
            assert!(color_for(ThemeEntry::for_severity(severity), &theme).is_some());
        }
        assert_eq!(color_for(ThemeEntry::SeverityHigh, &theme), Some(AnsiColors::BrightRed));
    }
}
