use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Gauge, List, ListItem, ListState, Paragraph},
};

use crate::{
    app::{AppState, GoalField},
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
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(layout[1]);
    render_list(frame, columns[0], state, &theme);
    render_detail(frame, columns[1], state, &theme);

    render_dialogs(frame, area, state, &theme);
}

fn render_header(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let goals = &state.goals;
    let done = goals.store.goals.iter().filter(|goal| goal.completed).count();

    let mut line = vec![
        Span::styled("Done", Style::default().fg(theme.dim)),
        Span::raw(format!(": {done}/{}   ", goals.store.goals.len())),
        Span::styled("Sort", Style::default().fg(theme.dim)),
        Span::raw(format!(": {}", goals.sort.label())),
    ];
    let query = goals.filter.search.trim();
    if !query.is_empty() || goals.search_active {
        line.push(Span::raw("   "));
        line.push(Span::styled("Search", Style::default().fg(theme.dim)));
        line.push(Span::raw(": "));
        let shown = if query.is_empty() { "…" } else { query };
        let mut style = Style::default().fg(theme.text);
        if goals.search_active {
            style = style.fg(theme.accent).add_modifier(Modifier::BOLD);
        }
        line.push(Span::styled(shown.to_string(), style));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border))
        .title("Goals");
    frame.render_widget(Paragraph::new(Line::from(line)).block(block), area);
}

fn render_list(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let goals = &state.goals;
    let visible = goals.visible();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border));

    if visible.is_empty() {
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::raw("No goals. Press "),
                Span::styled("n", Style::default().fg(theme.accent)),
                Span::raw(" to set one."),
            ]))
            .alignment(Alignment::Center)
            .block(block),
            area,
        );
        return;
    }

    let items = visible
        .iter()
        .map(|goal| {
            let mark = if goal.completed { "[x]" } else { "[ ]" };
            let title_style = if goal.completed {
                Style::default().fg(theme.dim)
            } else {
                Style::default().fg(theme.text)
            };
            let (done, total) = goals.store.progress(goal.id);
            let mut spans = vec![
                Span::styled(mark, Style::default().fg(theme.accent)),
                Span::raw(" "),
                Span::styled(goal.title.clone(), title_style),
            ];
            if total > 0 {
                spans.push(Span::styled(
                    format!("  {done}/{total}"),
                    Style::default().fg(theme.dim),
                ));
            }
            if let Some(target) = goal.target_date {
                spans.push(Span::styled(
                    format!("  by {}", target.format("%d %b %Y")),
                    Style::default().fg(theme.dim),
                ));
            }
            ListItem::new(Line::from(spans))
        })
        .collect::<Vec<_>>();

    let mut list_state = ListState::default();
    list_state.select(Some(goals.selected));

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

fn render_detail(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let goals = &state.goals;
    let block = Block::default()
        .title("Subgoals")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border));

    let Some(goal) = goals.visible().get(goals.selected).copied() else {
        frame.render_widget(
            Paragraph::new(Line::from("Nothing selected."))
                .alignment(Alignment::Center)
                .block(block),
            area,
        );
        return;
    };

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(block.inner(area));
    frame.render_widget(block, area);

    let (done, total) = goals.store.progress(goal.id);
    let ratio = if total == 0 {
        0.0
    } else {
        done as f64 / total as f64
    };
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(theme.positive))
        .ratio(ratio)
        .label(format!("{done}/{total}"));
    frame.render_widget(gauge, layout[0]);

    let subgoals = goals.store.subgoals_of(goal.id);
    let items = subgoals
        .iter()
        .map(|subgoal| {
            let mark = if subgoal.completed { "[x]" } else { "[ ]" };
            let style = if subgoal.completed {
                Style::default().fg(theme.dim)
            } else {
                Style::default().fg(theme.text)
            };
            ListItem::new(Line::from(vec![
                Span::styled(mark, Style::default().fg(theme.accent)),
                Span::raw(" "),
                Span::styled(subgoal.title.clone(), style),
            ]))
        })
        .collect::<Vec<_>>();

    if items.is_empty() {
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::raw("No subgoals. Press "),
                Span::styled("a", Style::default().fg(theme.accent)),
                Span::raw(" to add one."),
            ]))
            .alignment(Alignment::Center),
            layout[1],
        );
        return;
    }

    let mut list_state = ListState::default();
    list_state.select(Some(goals.selected_subgoal.min(subgoals.len() - 1)));

    let list = List::new(items)
        .highlight_style(
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("» ");
    frame.render_stateful_widget(list, layout[1], &mut list_state);
}

fn render_dialogs(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let goals = &state.goals;
    if let Some(form) = goals.dialog.form() {
        let title = if form.id.is_some() {
            "Edit Goal"
        } else {
            "New Goal"
        };
        let rows = [
            FieldRow::new("Title", form.title.as_str(), form.focus == GoalField::Title),
            FieldRow::new(
                "Description",
                form.description.as_str(),
                form.focus == GoalField::Description,
            ),
            FieldRow::new(
                "Target date",
                form.target_date.as_str(),
                form.focus == GoalField::TargetDate,
            ),
        ];
        render_dialog(
            frame,
            area,
            title,
            &rows,
            goals.dialog.error(),
            goals.dialog.is_submitting(),
            theme,
        );
    }
    if let Some(form) = goals.subgoal_dialog.form() {
        let rows = [FieldRow::new("Title", form.title.as_str(), true)];
        render_dialog(
            frame,
            area,
            "New Subgoal",
            &rows,
            goals.subgoal_dialog.error(),
            goals.subgoal_dialog.is_submitting(),
            theme,
        );
    }
}
