use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, ListState, Paragraph, Wrap},
};

use crate::{
    app::{AppState, NoteField},
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
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(layout[1]);
    render_list(frame, columns[0], state, &theme);
    render_preview(frame, columns[1], state, &theme);

    render_dialogs(frame, area, state, &theme);
}

fn render_header(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let notes = &state.notes;
    let category = notes
        .filter
        .category
        .map(|id| notes.store.category_name(Some(id)).to_string())
        .unwrap_or_else(|| "All".to_string());

    let mut line = vec![
        Span::styled("Category", Style::default().fg(theme.dim)),
        Span::raw(format!(": {category}   ")),
        Span::styled("Sort", Style::default().fg(theme.dim)),
        Span::raw(format!(": {}", notes.sort.label())),
    ];
    let query = notes.filter.search.trim();
    if !query.is_empty() || notes.search_active {
        line.push(Span::raw("   "));
        line.push(Span::styled("Search", Style::default().fg(theme.dim)));
        line.push(Span::raw(": "));
        let shown = if query.is_empty() { "…" } else { query };
        let mut style = Style::default().fg(theme.text);
        if notes.search_active {
            style = style.fg(theme.accent).add_modifier(Modifier::BOLD);
        }
        line.push(Span::styled(shown.to_string(), style));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border))
        .title("Notes");
    frame.render_widget(Paragraph::new(Line::from(line)).block(block), area);
}

fn render_list(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let notes = &state.notes;
    let visible = notes.visible();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border));

    if visible.is_empty() {
        let message = if notes.filter.search.trim().is_empty() {
            Line::from(vec![
                Span::raw("No notes. Press "),
                Span::styled("n", Style::default().fg(theme.accent)),
                Span::raw(" to write one."),
            ])
        } else {
            Line::from("No results.")
        };
        frame.render_widget(
            Paragraph::new(message)
                .alignment(Alignment::Center)
                .block(block),
            area,
        );
        return;
    }

    let items = visible
        .iter()
        .map(|note| {
            let when = note.created_at.format("%d %b").to_string();
            let category = notes.store.category_name(note.category_id);
            ListItem::new(Line::from(vec![
                Span::styled(when, Style::default().fg(theme.dim)),
                Span::raw(" "),
                Span::styled(note.title.clone(), Style::default().fg(theme.text)),
                Span::raw("  "),
                Span::styled(format!("[{category}]"), Style::default().fg(theme.dim)),
            ]))
        })
        .collect::<Vec<_>>();

    let mut list_state = ListState::default();
    list_state.select(Some(notes.selected));

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

fn render_preview(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let notes = &state.notes;
    let block = Block::default()
        .title("Preview")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border));

    let Some(note) = notes.visible().get(notes.selected).copied() else {
        frame.render_widget(
            Paragraph::new(Line::from("Nothing selected."))
                .alignment(Alignment::Center)
                .block(block),
            area,
        );
        return;
    };

    let mut lines = vec![
        Line::from(Span::styled(
            note.title.clone(),
            Style::default()
                .fg(theme.text)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled("Category", Style::default().fg(theme.dim)),
            Span::raw(format!(": {}", notes.store.category_name(note.category_id))),
        ]),
        Line::from(vec![
            Span::styled("Created", Style::default().fg(theme.dim)),
            Span::raw(format!(": {}", note.created_at.format("%Y-%m-%d %H:%M"))),
        ]),
        Line::from(""),
    ];
    if let Some(content) = note.content.as_deref() {
        for text in content.lines() {
            lines.push(Line::from(text.to_string()));
        }
    }

    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: false }).block(block),
        area,
    );
}

fn render_dialogs(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let notes = &state.notes;
    if let Some(form) = notes.dialog.form() {
        let title = if form.id.is_some() {
            "Edit Note"
        } else {
            "New Note"
        };
        let category = notes.store.category_name(form.category_id);
        let rows = [
            FieldRow::new("Title", form.title.as_str(), form.focus == NoteField::Title),
            FieldRow::new(
                "Content",
                form.content.as_str(),
                form.focus == NoteField::Content,
            ),
            FieldRow::new("Category", category, form.focus == NoteField::Category),
        ];
        render_dialog(
            frame,
            area,
            title,
            &rows,
            notes.dialog.error(),
            notes.dialog.is_submitting(),
            theme,
        );
    }
    if let Some(form) = notes.category_dialog.form() {
        let title = if form.id.is_some() {
            "Rename Category"
        } else {
            "New Category"
        };
        let rows = [FieldRow::new("Name", form.name.as_str(), true)];
        render_dialog(
            frame,
            area,
            title,
            &rows,
            notes.category_dialog.error(),
            notes.category_dialog.is_submitting(),
            theme,
        );
    }
}
