//! Centered modal dialog used by every create/edit form.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::ui::theme::Theme;

/// One labelled row of a dialog.
pub struct FieldRow<'a> {
    pub label: &'a str,
    pub value: String,
    pub focused: bool,
}

impl<'a> FieldRow<'a> {
    pub fn new(label: &'a str, value: impl Into<String>, focused: bool) -> Self {
        Self {
            label,
            value: value.into(),
            focused,
        }
    }
}

pub fn render_dialog(
    frame: &mut Frame<'_>,
    area: Rect,
    title: &str,
    rows: &[FieldRow<'_>],
    error: Option<&str>,
    submitting: bool,
    theme: &Theme,
) {
    let height = (rows.len() as u16 + 4 + u16::from(error.is_some())).min(area.height);
    let width = 60.min(area.width);
    let rect = centered(area, width, height);

    let mut lines: Vec<Line<'_>> = rows
        .iter()
        .map(|row| {
            let label_style = if row.focused {
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.dim)
            };
            let value_style = if row.focused {
                Style::default().fg(theme.text).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.text)
            };
            Line::from(vec![
                Span::styled(format!("{:<12}", row.label), label_style),
                Span::raw(" "),
                Span::styled(row.value.clone(), value_style),
            ])
        })
        .collect();

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        if submitting {
            "Saving..."
        } else {
            "Enter: save • Tab: next • Esc: cancel"
        },
        Style::default().fg(theme.dim),
    )));
    if let Some(err) = error {
        lines.push(Line::from(Span::styled(
            err.to_string(),
            Style::default().fg(theme.error),
        )));
    }

    let block = Block::default()
        .title(title.to_string())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.accent));
    frame.render_widget(Clear, rect);
    frame.render_widget(Paragraph::new(lines).block(block), rect);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width,
        height,
    }
}
