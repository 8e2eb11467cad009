use crate::chat_widget::ChatWidget;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// Draws the whole widget: transcript, typing row, input row. Purely a
/// function of widget state.
pub fn draw_chat(f: &mut Frame, widget: &mut ChatWidget) {
    let size = f.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Min(1),
                Constraint::Length(1),
                Constraint::Length(3),
            ]
            .as_ref(),
        )
        .margin(1)
        .split(size);

    draw_messages(f, widget, chunks[0]);

    widget.typing.update_spinner();
    widget.typing.render(f, chunks[1]);

    draw_input(f, widget, chunks[2]);
}

fn draw_messages(f: &mut Frame, widget: &ChatWidget, area: Rect) {
    let mut lines = Vec::new();
    for message in &widget.messages {
        if !lines.is_empty() {
            lines.push(Line::from(""));
        }
        lines.extend(message.render(area));
    }

    let total_lines = lines.len() as u16;
    let max_scroll = total_lines.saturating_sub(area.height);
    let scroll = widget.scroll.min(max_scroll);

    let paragraph = Paragraph::new(lines)
        .block(Block::default())
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph.scroll((scroll, 0)), area);
}

fn draw_input(f: &mut Frame, widget: &ChatWidget, area: Rect) {
    let separator = "─".repeat(area.width as usize);
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(
            separator.clone(),
            Style::default().fg(Color::DarkGray),
        ))),
        Rect {
            x: area.x,
            y: area.y,
            width: area.width,
            height: 1,
        },
    );

    // Dim the prompt while the send control is disabled.
    let prefix_style = if widget.sending {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::Yellow)
    };
    let input_line = Line::from(vec![
        Span::styled("→ ", prefix_style),
        Span::styled(widget.input.as_str(), Style::default().fg(Color::White)),
    ]);

    let visible_width = area.width.saturating_sub(2);
    let text_width = widget.input.width() as u16;
    let scroll_offset = text_width.saturating_sub(visible_width);

    f.render_widget(
        Paragraph::new(input_line).scroll((0, scroll_offset)),
        Rect {
            x: area.x,
            y: area.y + 1,
            width: area.width,
            height: 1,
        },
    );

    f.render_widget(
        Paragraph::new(Line::from(Span::styled(
            separator,
            Style::default().fg(Color::DarkGray),
        ))),
        Rect {
            x: area.x,
            y: area.y + 2,
            width: area.width,
            height: 1,
        },
    );

    // When the input exactly fills the row the cursor would land one column
    // past it; keep it on the last cell instead.
    let cursor_x = (area.x + 2 + text_width - scroll_offset).min(area.right().saturating_sub(1));
    f.set_cursor_position((cursor_x, area.y + 1));
}
