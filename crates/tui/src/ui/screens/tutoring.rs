use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, ListState, Paragraph},
};

use store::records::PaymentStatus;

use crate::{
    app::{AppState, PaymentField, SessionField, StudentField},
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
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(layout[1]);
    render_students(frame, columns[0], state, &theme);
    render_sessions(frame, columns[1], state, &theme);

    render_dialogs(frame, area, state, &theme);
}

fn render_header(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let tutoring = &state.tutoring;

    let mut line = vec![
        Span::styled("Students", Style::default().fg(theme.dim)),
        Span::raw(format!(": {}   ", tutoring.store.students.len())),
        Span::styled("Sort", Style::default().fg(theme.dim)),
        Span::raw(format!(": {}", tutoring.sort.label())),
    ];
    let query = tutoring.filter.search.trim();
    if !query.is_empty() || tutoring.search_active {
        line.push(Span::raw("   "));
        line.push(Span::styled("Search", Style::default().fg(theme.dim)));
        line.push(Span::raw(": "));
        let shown = if query.is_empty() { "…" } else { query };
        let mut style = Style::default().fg(theme.text);
        if tutoring.search_active {
            style = style.fg(theme.accent).add_modifier(Modifier::BOLD);
        }
        line.push(Span::styled(shown.to_string(), style));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border))
        .title("Tutoring");
    frame.render_widget(Paragraph::new(Line::from(line)).block(block), area);
}

fn render_students(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let tutoring = &state.tutoring;
    let visible = tutoring.visible_students();
    let block = Block::default()
        .title("Students")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border));

    if visible.is_empty() {
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::raw("No students. Press "),
                Span::styled("n", Style::default().fg(theme.accent)),
                Span::raw(" to add one."),
            ]))
            .alignment(Alignment::Center)
            .block(block),
            area,
        );
        return;
    }

    let items = visible
        .iter()
        .map(|student| {
            let outstanding = tutoring.store.outstanding_minor(student.id);
            let mut spans = vec![
                Span::styled(student.name.clone(), Style::default().fg(theme.text)),
                Span::styled(
                    format!("  {}/h", minor(student.hourly_rate_minor)),
                    Style::default().fg(theme.dim),
                ),
            ];
            if outstanding > 0 {
                spans.push(Span::styled(
                    format!("  owes {}", minor(outstanding)),
                    Style::default().fg(theme.warning),
                ));
            }
            ListItem::new(Line::from(spans))
        })
        .collect::<Vec<_>>();

    let mut list_state = ListState::default();
    list_state.select(Some(tutoring.selected_student));

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

fn render_sessions(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let tutoring = &state.tutoring;
    let block = Block::default()
        .title("Sessions")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border));

    let Some(student_id) = tutoring.selected_student_id() else {
        frame.render_widget(
            Paragraph::new(Line::from("No student selected."))
                .alignment(Alignment::Center)
                .block(block),
            area,
        );
        return;
    };

    let sessions = tutoring.store.sessions_of(student_id);
    if sessions.is_empty() {
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::raw("No sessions. Press "),
                Span::styled("a", Style::default().fg(theme.accent)),
                Span::raw(" to log one."),
            ]))
            .alignment(Alignment::Center)
            .block(block),
            area,
        );
        return;
    }

    let items = sessions
        .iter()
        .map(|session| {
            let when = format!(
                "{} {}",
                session.session_date.format("%d %b"),
                session.start_time.format("%H:%M")
            );
            let chip = match session.payment_status {
                PaymentStatus::Paid => {
                    Span::styled("[PAID]", Style::default().fg(theme.positive))
                }
                PaymentStatus::Pending => {
                    Span::styled("[DUE]", Style::default().fg(theme.warning))
                }
            };
            ListItem::new(Line::from(vec![
                Span::styled(when, Style::default().fg(theme.dim)),
                Span::raw(" "),
                Span::styled(
                    format!("{} min", session.duration_minutes),
                    Style::default().fg(theme.text),
                ),
                Span::raw(" "),
                Span::styled(
                    minor(session.total_amount_minor),
                    Style::default().fg(theme.text),
                ),
                Span::raw(" "),
                chip,
            ]))
        })
        .collect::<Vec<_>>();

    let mut list_state = ListState::default();
    list_state.select(Some(tutoring.selected_session.min(sessions.len() - 1)));

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

/// Format minor currency units as "12.50".
fn minor(amount: i64) -> String {
    format!("{}.{:02}", amount / 100, (amount % 100).abs())
}

fn render_dialogs(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let tutoring = &state.tutoring;
    if let Some(form) = tutoring.student_dialog.form() {
        let title = if form.id.is_some() {
            "Edit Student"
        } else {
            "New Student"
        };
        let rows = [
            FieldRow::new("Name", form.name.as_str(), form.focus == StudentField::Name),
            FieldRow::new(
                "Email",
                form.email.as_str(),
                form.focus == StudentField::Email,
            ),
            FieldRow::new(
                "Phone",
                form.phone.as_str(),
                form.focus == StudentField::Phone,
            ),
            FieldRow::new(
                "Rate/h",
                form.hourly_rate.as_str(),
                form.focus == StudentField::HourlyRate,
            ),
            FieldRow::new(
                "Notes",
                form.notes.as_str(),
                form.focus == StudentField::Notes,
            ),
        ];
        render_dialog(
            frame,
            area,
            title,
            &rows,
            tutoring.student_dialog.error(),
            tutoring.student_dialog.is_submitting(),
            theme,
        );
    }
    if let Some(form) = tutoring.session_dialog.form() {
        let rows = [
            FieldRow::new("Date", form.date.as_str(), form.focus == SessionField::Date),
            FieldRow::new(
                "Start",
                form.start_time.as_str(),
                form.focus == SessionField::StartTime,
            ),
            FieldRow::new(
                "Minutes",
                form.duration.as_str(),
                form.focus == SessionField::Duration,
            ),
            FieldRow::new(
                "Notes",
                form.notes.as_str(),
                form.focus == SessionField::Notes,
            ),
        ];
        render_dialog(
            frame,
            area,
            "Log Session",
            &rows,
            tutoring.session_dialog.error(),
            tutoring.session_dialog.is_submitting(),
            theme,
        );
    }
    if let Some(form) = tutoring.payment_dialog.form() {
        let rows = [
            FieldRow::new("Date", form.date.as_str(), form.focus == PaymentField::Date),
            FieldRow::new(
                "Method",
                form.method.as_str(),
                form.focus == PaymentField::Method,
            ),
        ];
        render_dialog(
            frame,
            area,
            "Mark Paid",
            &rows,
            tutoring.payment_dialog.error(),
            tutoring.payment_dialog.is_submitting(),
            theme,
        );
    }
}
