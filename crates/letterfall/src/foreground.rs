//! Foreground cards drawn over the falling glyphs.

use letterfall_core::Preset;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Clear, Paragraph, Widget},
};

/// Where each card sits for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cards {
    pub title: Rect,
    pub help: Rect,
    pub status: Rect,
}

impl Cards {
    /// Rects glyphs should collide with. The status line is not one of them.
    pub fn regions(&self) -> Vec<Rect> {
        [self.title, self.help]
            .into_iter()
            .filter(|rect| !rect.is_empty())
            .collect()
    }
}

/// Title and help cards, styled against the paper.
#[derive(Debug, Clone)]
pub struct Foreground {
    title: String,
    tagline: String,
    ink: Color,
    paper: Color,
}

impl Foreground {
    pub fn new(title: impl Into<String>, tagline: impl Into<String>, ink: Color, paper: Color) -> Self {
        Self {
            title: title.into(),
            tagline: tagline.into(),
            ink,
            paper,
        }
    }

    fn help_line(&self, preset: Preset) -> Line<'static> {
        let mut spans = vec![
            "q".bold().fg(self.ink),
            " quit  ".dim(),
            "p".bold().fg(self.ink),
            format!(" preset: {}  ", preset.name()).dim(),
            "c".bold().fg(self.ink),
            " clear".dim(),
        ];
        if preset.params().drag_stiffness.is_some() {
            spans.push("  drag".bold().fg(self.ink));
            spans.push(" fling letters".dim());
        }
        Line::from(spans)
    }

    /// Lay the cards out in the middle of `area`.
    pub fn layout(&self, area: Rect, preset: Preset) -> Cards {
        let text_width = Line::from(self.title.as_str())
            .width()
            .max(Line::from(self.tagline.as_str()).width()) as u16;
        let help_width = self.help_line(preset).width() as u16;

        let [_, title_row, _, help_row, _, status] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(5),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(area);

        Cards {
            title: centered(title_row, text_width + 8),
            help: centered(help_row, help_width + 4),
            status,
        }
    }

    /// Draw the cards and the status line.
    pub fn render(&self, buf: &mut Buffer, cards: &Cards, preset: Preset, status: &[&str]) {
        let card = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::new().fg(self.ink).dim())
            .style(Style::new().fg(self.ink).bg(self.paper));

        Clear.render(cards.title, buf);
        Paragraph::new(vec![
            Line::from(Span::from(self.title.as_str()).bold()),
            Line::default(),
            Line::from(Span::from(self.tagline.as_str()).italic()),
        ])
        .alignment(Alignment::Center)
        .block(card.clone())
        .render(cards.title, buf);

        Clear.render(cards.help, buf);
        Paragraph::new(self.help_line(preset))
            .alignment(Alignment::Center)
            .block(card)
            .render(cards.help, buf);

        if !status.is_empty() {
            Line::from(status.join("  "))
                .style(Style::new().fg(self.ink).bg(self.paper).dim())
                .render(cards.status, buf);
        }
    }
}

/// A rect of `width` centred horizontally in `row`, clipped to it.
fn centered(row: Rect, width: u16) -> Rect {
    let [rect] = Layout::horizontal([Constraint::Length(width.min(row.width))])
        .flex(Flex::Center)
        .areas(row);
    rect
}

#[cfg(test)]
mod tests {
    use super::*;

    fn foreground() -> Foreground {
        Foreground::new("letterfall", "tagline", Color::Black, Color::White)
    }

    #[test]
    fn test_cards_are_centered_inside_area() {
        let area = Rect::new(0, 0, 80, 24);
        let cards = foreground().layout(area, Preset::Playground);

        for rect in [cards.title, cards.help, cards.status] {
            assert_eq!(rect.intersection(area), rect);
        }
        assert_eq!(cards.title.height, 5);
        assert_eq!(cards.title.width, 18);
        assert_eq!(cards.title.x, 31);
        assert_eq!(cards.help.height, 3);
        assert!(cards.help.y > cards.title.bottom());
        assert_eq!(cards.status.y, 23);
        assert_eq!(cards.regions(), vec![cards.title, cards.help]);
    }

    #[test]
    fn test_cards_clip_in_small_terminal() {
        let area = Rect::new(0, 0, 12, 6);
        let cards = foreground().layout(area, Preset::Diagnostic);
        assert!(cards.help.width <= 12);
        assert!(cards.title.width <= 12);
        assert!(cards.regions().iter().all(|r| r.intersection(area) == *r));
    }

    #[test]
    fn test_render_draws_title_and_status() {
        let area = Rect::new(0, 0, 80, 24);
        let fg = foreground();
        let cards = fg.layout(area, Preset::Diagnostic);
        let mut buf = Buffer::empty(area);
        fg.render(&mut buf, &cards, Preset::Diagnostic, &["bodies: 3 · fps: 60"]);

        let row = |y: u16| -> String { (0..80).map(|x| buf[(x, y)].symbol()).collect() };
        assert!(row(cards.title.y + 1).contains("letterfall"));
        assert!(row(cards.help.y + 1).contains("preset: diagnostic"));
        assert!(row(23).starts_with("bodies: 3 · fps: 60"));
        assert!(!row(cards.help.y + 1).contains("drag"));
    }
}
