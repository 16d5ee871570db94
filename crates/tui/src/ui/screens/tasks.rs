use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, ListState, Paragraph},
};

use store::records::{TaskPriority, TaskStatus};

use crate::{
    app::{AppState, TaskField},
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
    render_list(frame, columns[0], state, &theme);
    render_subtasks(frame, columns[1], state, &theme);

    render_dialogs(frame, area, state, &theme);
}

fn render_header(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let tasks = &state.tasks;
    let open = tasks
        .store
        .tasks
        .iter()
        .filter(|task| task.status != TaskStatus::Completed)
        .count();

    let mut line = vec![
        Span::styled("Open", Style::default().fg(theme.dim)),
        Span::raw(format!(": {open}/{}   ", tasks.store.tasks.len())),
        Span::styled("Sort", Style::default().fg(theme.dim)),
        Span::raw(format!(": {}", tasks.sort.label())),
    ];
    let query = tasks.filter.search.trim();
    if !query.is_empty() || tasks.search_active {
        line.push(Span::raw("   "));
        line.push(Span::styled("Search", Style::default().fg(theme.dim)));
        line.push(Span::raw(": "));
        let shown = if query.is_empty() { "…" } else { query };
        let mut style = Style::default().fg(theme.text);
        if tasks.search_active {
            style = style.fg(theme.accent).add_modifier(Modifier::BOLD);
        }
        line.push(Span::styled(shown.to_string(), style));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border))
        .title("Tasks");
    frame.render_widget(Paragraph::new(Line::from(line)).block(block), area);
}

fn render_list(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let tasks = &state.tasks;
    let visible = tasks.visible();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border));

    if visible.is_empty() {
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::raw("No tasks. Press "),
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
        .map(|task| {
            let title_style = if task.status == TaskStatus::Completed {
                Style::default()
                    .fg(theme.dim)
                    .add_modifier(Modifier::CROSSED_OUT)
            } else {
                Style::default().fg(theme.text)
            };
            let mut spans = vec![
                status_chip(task.status, theme),
                Span::raw(" "),
                Span::styled(task.title.clone(), title_style),
            ];
            if let Some(priority) = task.priority {
                spans.push(Span::raw(" "));
                spans.push(priority_chip(priority, theme));
            }
            if let Some(due) = task.due_date {
                spans.push(Span::styled(
                    format!("  due {}", due.format("%d %b")),
                    Style::default().fg(theme.dim),
                ));
            }
            ListItem::new(Line::from(spans))
        })
        .collect::<Vec<_>>();

    let mut list_state = ListState::default();
    list_state.select(Some(tasks.selected));

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

fn render_subtasks(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let tasks = &state.tasks;
    let block = Block::default()
        .title("Subtasks")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border));

    let Some(task) = tasks.visible().get(tasks.selected).copied() else {
        frame.render_widget(
            Paragraph::new(Line::from("Nothing selected."))
                .alignment(Alignment::Center)
                .block(block),
            area,
        );
        return;
    };

    let subtasks = tasks.store.subtasks_of(task.id);
    if subtasks.is_empty() {
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::raw("No subtasks. Press "),
                Span::styled("a", Style::default().fg(theme.accent)),
                Span::raw(" to add one."),
            ]))
            .alignment(Alignment::Center)
            .block(block),
            area,
        );
        return;
    }

    let items = subtasks
        .iter()
        .map(|subtask| {
            let done = subtask.status == TaskStatus::Completed;
            let mark = if done { "[x]" } else { "[ ]" };
            let style = if done {
                Style::default().fg(theme.dim)
            } else {
                Style::default().fg(theme.text)
            };
            ListItem::new(Line::from(vec![
                Span::styled(mark, Style::default().fg(theme.accent)),
                Span::raw(" "),
                Span::styled(subtask.title.clone(), style),
            ]))
        })
        .collect::<Vec<_>>();

    let mut list_state = ListState::default();
    list_state.select(Some(tasks.selected_subtask.min(subtasks.len() - 1)));

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

fn status_chip(status: TaskStatus, theme: &Theme) -> Span<'static> {
    let (label, color) = match status {
        TaskStatus::Pending => ("TODO", theme.dim),
        TaskStatus::InProgress => ("WIP", theme.warning),
        TaskStatus::Completed => ("DONE", theme.positive),
    };
    Span::styled(
        format!("[{label}]"),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )
}

fn priority_chip(priority: TaskPriority, theme: &Theme) -> Span<'static> {
    let color = match priority {
        TaskPriority::Low => theme.dim,
        TaskPriority::Medium => theme.warning,
        TaskPriority::High => theme.error,
    };
    Span::styled(format!("!{}", priority.label()), Style::default().fg(color))
}

fn render_dialogs(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let tasks = &state.tasks;
    if let Some(form) = tasks.dialog.form() {
        let title = if form.id.is_some() {
            "Edit Task"
        } else {
            "New Task"
        };
        let priority = form.priority.map(|p| p.label()).unwrap_or("-");
        let rows = [
            FieldRow::new("Title", form.title.as_str(), form.focus == TaskField::Title),
            FieldRow::new(
                "Description",
                form.description.as_str(),
                form.focus == TaskField::Description,
            ),
            FieldRow::new("Priority", priority, form.focus == TaskField::Priority),
            FieldRow::new(
                "Due date",
                form.due_date.as_str(),
                form.focus == TaskField::DueDate,
            ),
        ];
        render_dialog(
            frame,
            area,
            title,
            &rows,
            tasks.dialog.error(),
            tasks.dialog.is_submitting(),
            theme,
        );
    }
    if let Some(form) = tasks.subtask_dialog.form() {
        let rows = [FieldRow::new("Title", form.title.as_str(), true)];
        render_dialog(
            frame,
            area,
            "New Subtask",
            &rows,
            tasks.subtask_dialog.error(),
            tasks.subtask_dialog.is_submitting(),
            theme,
        );
    }
}
