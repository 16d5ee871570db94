use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::{
    app::{ToastLevel, ToastState},
    ui::theme::Theme,
};

/// One-line notification in the bottom-right corner. The app clears it when
/// its TTL runs out; this only draws whatever is currently set.
pub fn render(frame: &mut Frame<'_>, area: Rect, toast: Option<&ToastState>, theme: &Theme) {
    let Some(toast) = toast else {
        return;
    };

    let color = match toast.level {
        ToastLevel::Info => theme.accent,
        ToastLevel::Success => theme.positive,
        ToastLevel::Error => theme.error,
    };

    // Border plus one space of padding on each side; long messages are cut
    // to the frame width rather than wrapped.
    let budget = area.width.saturating_sub(4) as usize;
    let text: String = toast.message.chars().take(budget).collect();
    let width = (text.chars().count() as u16).saturating_add(4).min(area.width);
    let rect = Rect {
        x: area.right().saturating_sub(width),
        y: area.bottom().saturating_sub(4),
        width,
        height: 3,
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color));
    let body = Paragraph::new(Line::from(Span::styled(
        format!(" {text} "),
        Style::default().fg(color),
    )))
    .block(block);

    frame.render_widget(Clear, rect);
    frame.render_widget(body, rect);
}
