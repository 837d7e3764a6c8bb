//! Line-oriented markdown styling for terminal display.
//!
//! Good enough for LLM-produced summaries: headings, bullet and numbered
//! lists, code fences, and blockquotes. Inline emphasis markers are kept
//! as-is rather than parsed.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};

/// Render a markdown string into styled text, one `Line` per source line.
pub fn render(markdown: &str) -> Text<'static> {
    let mut lines = Vec::new();
    let mut in_code_fence = false;

    for raw in markdown.lines() {
        if raw.trim_start().starts_with("```") {
            in_code_fence = !in_code_fence;
            lines.push(Line::styled(
                raw.to_string(),
                Style::default().fg(Color::DarkGray),
            ));
            continue;
        }
        if in_code_fence {
            lines.push(Line::styled(
                raw.to_string(),
                Style::default().fg(Color::Yellow),
            ));
            continue;
        }
        lines.push(style_line(raw));
    }

    Text::from(lines)
}

fn style_line(raw: &str) -> Line<'static> {
    let trimmed = raw.trim_start();

    if let Some(heading) = trimmed.strip_prefix('#') {
        // Deeper headings keep the bold but lose the colour.
        let depth = 1 + heading.chars().take_while(|&c| c == '#').count();
        let text = trimmed.trim_start_matches('#').trim_start().to_string();
        let style = if depth <= 2 {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };
        return Line::styled(text, style);
    }

    if let Some(item) = list_item(trimmed) {
        let indent = " ".repeat(raw.len() - trimmed.len());
        return Line::from(vec![
            Span::styled(
                format!("{indent}{} ", item.marker),
                Style::default().fg(Color::Green),
            ),
            Span::raw(item.text),
        ]);
    }

    if let Some(quote) = trimmed.strip_prefix('>') {
        return Line::styled(
            format!("│{quote}"),
            Style::default().fg(Color::DarkGray),
        );
    }

    Line::raw(raw.to_string())
}

struct ListItem {
    marker: String,
    text: String,
}

fn list_item(trimmed: &str) -> Option<ListItem> {
    for bullet in ["- ", "* ", "+ "] {
        if let Some(rest) = trimmed.strip_prefix(bullet) {
            return Some(ListItem {
                marker: "•".to_string(),
                text: rest.to_string(),
            });
        }
    }

    // Numbered items: "1. text"
    let (number, rest) = trimmed.split_once(". ")?;
    if !number.is_empty() && number.chars().all(|c| c.is_ascii_digit()) {
        return Some(ListItem {
            marker: format!("{number}."),
            text: rest.to_string(),
        });
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn headings_are_stripped_of_markers() {
        let text = render("# Video Summary");
        assert_eq!(line_text(&text.lines[0]), "Video Summary");
    }

    #[test]
    fn bullets_become_dots() {
        let text = render("- first point\n* second point");
        assert_eq!(line_text(&text.lines[0]), "• first point");
        assert_eq!(line_text(&text.lines[1]), "• second point");
    }

    #[test]
    fn numbered_lists_keep_their_numbers() {
        let text = render("1. one\n2. two");
        assert_eq!(line_text(&text.lines[0]), "1. one");
        assert_eq!(line_text(&text.lines[1]), "2. two");
    }

    #[test]
    fn code_fences_pass_content_through_unstyled_text_intact() {
        let text = render("```\nlet x = 1;\n```");
        assert_eq!(line_text(&text.lines[1]), "let x = 1;");
    }

    #[test]
    fn plain_paragraphs_are_untouched() {
        let text = render("The video explains 1.5x playback.");
        assert_eq!(line_text(&text.lines[0]), "The video explains 1.5x playback.");
    }
}
