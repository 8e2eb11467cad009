use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Transient "bot is typing" row. Present exactly while a request is
/// outstanding; the widget clears it before appending the bot message.
#[derive(Debug, Default)]
pub struct TypingIndicator {
    typing: bool,
    spinner_idx: usize,
}

impl TypingIndicator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_typing(&mut self, typing: bool) {
        self.typing = typing;
        if !typing {
            self.spinner_idx = 0;
        }
    }

    pub fn is_typing(&self) -> bool {
        self.typing
    }

    /// Advances the spinner one frame; called on every UI tick.
    pub fn update_spinner(&mut self) {
        self.spinner_idx = self.spinner_idx.wrapping_add(1);
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        if !self.typing {
            return;
        }
        let spinner_frames = ["◐", "◓", "◑", "◒"];
        let spinner = spinner_frames[self.spinner_idx % spinner_frames.len()];

        let line = Line::from(vec![
            Span::styled(spinner, Style::default().fg(Color::Gray)),
            Span::raw(" "),
            Span::styled("typing...", Style::default().fg(Color::DarkGray)),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }
}
