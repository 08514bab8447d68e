//! Themed message and alert rendering for terminal output.

use anyhow::Result;
use owo_colors::OwoColorize;
use std::io::Write;

use docport_core::{Alert, Segment};

use crate::ui::theme::{color_for, ThemeEntry, ThemeMap};

/// Writes `text`, colored for `entry` when `supports_color` is set.
pub fn write_styled<W: Write + ?Sized>(
    writer: &mut W,
    text: &str,
    entry: ThemeEntry,
    theme: &ThemeMap,
    supports_color: bool,
) -> Result<()> {
    match color_for(entry, theme).filter(|_| supports_color) {
        Some(color) => write!(writer, "{}", text.color(color))?,
        None => write!(writer, "{}", text)?,
    }
    Ok(())
}

pub fn print_warn_message<W: Write + ?Sized>(writer: &mut W, msg: &str, theme: &ThemeMap, supports_color: bool) -> Result<()> {
    write_styled(writer, &format!("Warning: {}", msg), ThemeEntry::Warn, theme, supports_color)?;
    writeln!(writer)?;
    Ok(())
}

/// Prints the advisory alert summary.
///
/// The wording stays advisory: an alert means the text *may* contain
/// sensitive information, and no alert does not mean it is free of any.
pub fn print_alert_summary<W: Write + ?Sized>(
    writer: &mut W,
    alerts: &[Alert],
    theme: &ThemeMap,
    supports_color: bool,
) -> Result<()> {
    write_styled(writer, "--- Sensitive Content Review ---", ThemeEntry::Header, theme, supports_color)?;
    writeln!(writer)?;

    if alerts.is_empty() {
        writeln!(writer, "No configured keywords found. This does not guarantee the text is free of sensitive information.")?;
        return Ok(());
    }

    for alert in alerts {
        write_styled(
            writer,
            &format!("[{}] {}", alert.severity, alert.label),
            ThemeEntry::for_severity(alert.severity),
            theme,
            supports_color,
        )?;
        writeln!(writer, " ({}: {} evidence)", alert.id, alert.evidence.len())?;
        for evidence in &alert.evidence {
            write!(writer, "  p.{} [{}] ", evidence.page, evidence.keyword)?;
            write_styled(writer, &evidence.snippet.replace('\n', " "), ThemeEntry::Snippet, theme, supports_color)?;
            writeln!(writer)?;
        }
    }

    writeln!(writer, "These are possibilities only. Please review the document before sending.")?;
    Ok(())
}

/// Prints text with alert keywords colored by severity.
pub fn print_segments<W: Write + ?Sized>(
    writer: &mut W,
    segments: &[Segment],
    theme: &ThemeMap,
    supports_color: bool,
) -> Result<()> {
    for segment in segments {
        match segment.severity {
            Some(severity) if supports_color => {
                write_styled(writer, &segment.text, ThemeEntry::for_severity(severity), theme, true)?
            }
            Some(_) => write!(writer, "[[{}]]", segment.text)?,
            None => write!(writer, "{}", segment.text)?,
        }
    }
    writeln!(writer)?;
    Ok(())
}
