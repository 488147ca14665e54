use remora_lib::flashcards::{Card, SetStats};

/// ANSI color codes
pub struct Color;

impl Color {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";
}

/// Wrap text in a color when colors are enabled
pub fn paint(text: &str, color: &str, use_color: bool) -> String {
    if use_color {
        format!("{}{}{}", color, text, Color::RESET)
    } else {
        text.to_string()
    }
}

/// Text progress bar, e.g. `[######----] 60%`
pub fn progress_bar(percent: u32, width: usize) -> String {
    let percent = percent.min(100);
    let filled = width * percent as usize / 100;
    format!(
        "[{}{}] {}%",
        "#".repeat(filled),
        "-".repeat(width - filled),
        percent
    )
}

/// One line summarizing a card's progress
pub fn card_status(card: &Card, use_color: bool) -> String {
    match card.progress {
        None => paint("new", Color::GRAY, use_color),
        Some(p) if p.learned => paint(
            &format!("learned  +{} -{}", p.times_correct, p.times_wrong),
            Color::GREEN,
            use_color,
        ),
        Some(p) => paint(
            &format!("learning +{} -{}", p.times_correct, p.times_wrong),
            Color::YELLOW,
            use_color,
        ),
    }
}

/// Multi-line statistics block
pub fn render_stats(stats: &SetStats, use_color: bool) -> String {
    let mut lines = vec![
        paint(&stats.set_name, Color::BOLD, use_color),
        format!("  Mastered: {}/{}  {}", stats.learned, stats.total, progress_bar(stats.mastered_percent, 20)),
        format!("  Answers:  {} correct, {} wrong", stats.times_correct, stats.times_wrong),
    ];
    if let Some(accuracy) = stats.accuracy_percent {
        lines.push(format!("  Accuracy: {}%", accuracy));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_bar() {
        assert_eq!(progress_bar(0, 10), "[----------] 0%");
        assert_eq!(progress_bar(55, 10), "[#####-----] 55%");
        assert_eq!(progress_bar(100, 4), "[####] 100%");
        assert_eq!(progress_bar(250, 4), "[####] 100%");
    }

    #[test]
    fn test_paint_without_color() {
        assert_eq!(paint("plain", Color::RED, false), "plain");
        assert_eq!(paint("red", Color::RED, true), "\x1b[31mred\x1b[0m");
    }

    #[test]
    fn test_render_stats_without_attempts() {
        let stats = SetStats::for_cards("Empty", &[]);
        let text = render_stats(&stats, false);
        assert!(text.contains("Mastered: 0/0"));
        assert!(!text.contains("Accuracy"));
    }
}
