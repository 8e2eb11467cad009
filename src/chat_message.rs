use chrono::{DateTime, Local};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use textwrap::wrap;

/// Who a chat turn is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

/// One rendered chat turn. Messages are append-only: once pushed onto the
/// transcript they are never mutated or removed.
#[derive(Debug, Clone)]
pub struct ChatMessage {
    content: String,
    sender: Sender,
    is_error: bool,
    timestamp: DateTime<Local>,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(content, Sender::User, false)
    }

    pub fn bot(content: impl Into<String>) -> Self {
        Self::new(content, Sender::Bot, false)
    }

    pub fn bot_error(content: impl Into<String>) -> Self {
        Self::new(content, Sender::Bot, true)
    }

    fn new(content: impl Into<String>, sender: Sender, is_error: bool) -> Self {
        Self {
            content: content.into(),
            sender,
            is_error,
            timestamp: Local::now(),
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn sender(&self) -> Sender {
        self.sender
    }

    pub fn is_error(&self) -> bool {
        self.is_error
    }

    pub fn render(&self, area: Rect) -> Vec<Line<'static>> {
        let mut lines = Vec::new();
        let style = self.base_style();

        self.render_header(&mut lines, style);
        self.render_content(&mut lines, area, style);
        self.render_footer(&mut lines, style);

        lines
    }

    fn base_style(&self) -> Style {
        if self.is_error {
            return Style::default().fg(Color::Red);
        }
        Style::default().fg(match self.sender {
            Sender::User => Color::Rgb(255, 223, 128),
            Sender::Bot => Color::Rgb(144, 238, 144),
        })
    }

    fn indent(&self) -> &'static str {
        if self.sender == Sender::User {
            "  "
        } else {
            ""
        }
    }

    fn render_header(&self, lines: &mut Vec<Line<'static>>, style: Style) {
        let timestamp = self.timestamp.format("%H:%M").to_string();
        let label = match (self.sender, self.is_error) {
            (Sender::User, _) => "you",
            (Sender::Bot, false) => "bot",
            (Sender::Bot, true) => "error",
        };

        lines.push(Line::from(vec![
            Span::styled(self.indent().to_string(), style),
            Span::styled("┌─".to_string(), style),
            Span::styled(timestamp, style.add_modifier(Modifier::DIM)),
            Span::styled(" ", style),
            Span::styled(label.to_string(), style.add_modifier(Modifier::BOLD)),
        ]));
    }

    fn render_content(&self, lines: &mut Vec<Line<'static>>, area: Rect, style: Style) {
        let wrap_width = (area.width as usize).saturating_sub(4).max(1);
        for paragraph in self.content.lines() {
            if paragraph.is_empty() {
                lines.push(Line::from(vec![
                    Span::styled(self.indent().to_string(), style),
                    Span::styled("│".to_string(), style),
                ]));
                continue;
            }
            for wrapped in wrap(paragraph, wrap_width) {
                lines.push(Line::from(vec![
                    Span::styled(self.indent().to_string(), style),
                    Span::styled("│ ".to_string(), style),
                    Span::styled(wrapped.to_string(), style),
                ]));
            }
        }
    }

    fn render_footer(&self, lines: &mut Vec<Line<'static>>, style: Style) {
        lines.push(Line::from(vec![
            Span::styled(self.indent().to_string(), style),
            Span::styled("╰─".to_string(), style),
        ]));
    }
}
