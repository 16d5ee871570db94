use chrono::Local;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, ListState, Paragraph},
};

use crate::{
    app::{AppState, SessionCloseField, SessionStartField},
    ui::components::form::{FieldRow, render_dialog},
    ui::theme::Theme,
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    render_header(frame, layout[0], state, &theme);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(layout[1]);
    render_sessions(frame, columns[0], state, &theme);
    render_tasks(frame, columns[1], state, &theme);

    render_dialogs(frame, area, state, &theme);
}

fn render_header(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let focus = &state.focus;
    let today = Local::now().date_naive();
    let minutes = focus.store.minutes_on(today);

    let line = vec![
        Span::styled("Today", Style::default().fg(theme.dim)),
        Span::raw(format!(": {minutes} min   ")),
        Span::styled("Sessions", Style::default().fg(theme.dim)),
        Span::raw(format!(": {}", focus.store.sessions.len())),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border))
        .title("Focus");
    frame.render_widget(Paragraph::new(Line::from(line)).block(block), area);
}

fn render_sessions(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let focus = &state.focus;
    let block = Block::default()
        .title("Sessions")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border));

    if focus.store.sessions.is_empty() {
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::raw("No sessions. Press "),
                Span::styled("n", Style::default().fg(theme.accent)),
                Span::raw(" to start one."),
            ]))
            .alignment(Alignment::Center)
            .block(block),
            area,
        );
        return;
    }

    let items = focus
        .store
        .sessions
        .iter()
        .map(|session| {
            let when = session.date.format("%d %b").to_string();
            let mut spans = vec![
                Span::styled(when, Style::default().fg(theme.dim)),
                Span::raw(" "),
            ];
            if session.completed {
                let minutes = session
                    .actual_duration_minutes
                    .unwrap_or(session.duration_minutes);
                spans.push(Span::styled(
                    format!("{minutes} min"),
                    Style::default().fg(theme.positive),
                ));
            } else {
                spans.push(Span::styled(
                    format!("{} min planned", session.duration_minutes),
                    Style::default().fg(theme.warning),
                ));
            }
            if let Some(notes) = session.notes.as_deref() {
                spans.push(Span::styled(
                    format!("  {notes}"),
                    Style::default().fg(theme.dim),
                ));
            }
            ListItem::new(Line::from(spans))
        })
        .collect::<Vec<_>>();

    let mut list_state = ListState::default();
    list_state.select(Some(focus.selected_session));

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("» ");
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn render_tasks(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let focus = &state.focus;
    let block = Block::default()
        .title("Focus Tasks")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border));

    if focus.store.tasks.is_empty() {
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::raw("Nothing queued. Press "),
                Span::styled("a", Style::default().fg(theme.accent)),
                Span::raw(" to add."),
            ]))
            .alignment(Alignment::Center)
            .block(block),
            area,
        );
        return;
    }

    let items = focus
        .store
        .tasks
        .iter()
        .map(|task| {
            let mark = if task.completed { "[x]" } else { "[ ]" };
            let style = if task.completed {
                Style::default().fg(theme.dim)
            } else {
                Style::default().fg(theme.text)
            };
            ListItem::new(Line::from(vec![
                Span::styled(mark, Style::default().fg(theme.accent)),
                Span::raw(" "),
                Span::styled(task.text.clone(), style),
            ]))
        })
        .collect::<Vec<_>>();

    let mut list_state = ListState::default();
    list_state.select(Some(focus.selected_task));

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("» ");
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn render_dialogs(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let focus = &state.focus;
    if let Some(form) = focus.start_dialog.form() {
        let rows = [
            FieldRow::new(
                "Date",
                form.date.as_str(),
                form.focus == SessionStartField::Date,
            ),
            FieldRow::new(
                "Minutes",
                form.duration.as_str(),
                form.focus == SessionStartField::Duration,
            ),
        ];
        render_dialog(
            frame,
            area,
            "Start Session",
            &rows,
            focus.start_dialog.error(),
            focus.start_dialog.is_submitting(),
            theme,
        );
    }
    if let Some(form) = focus.close_dialog.form() {
        let rows = [
            FieldRow::new(
                "Actual min",
                form.actual_minutes.as_str(),
                form.focus == SessionCloseField::ActualMinutes,
            ),
            FieldRow::new(
                "Notes",
                form.notes.as_str(),
                form.focus == SessionCloseField::Notes,
            ),
        ];
        render_dialog(
            frame,
            area,
            "Close Session",
            &rows,
            focus.close_dialog.error(),
            focus.close_dialog.is_submitting(),
            theme,
        );
    }
    if let Some(form) = focus.task_dialog.form() {
        let rows = [FieldRow::new("Task", form.text.as_str(), true)];
        render_dialog(
            frame,
            area,
            "New Focus Task",
            &rows,
            focus.task_dialog.error(),
            focus.task_dialog.is_submitting(),
            theme,
        );
    }
}
