use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, ListState, Paragraph},
};

use store::records::ResourceKind;

use crate::{
    app::{AppState, ResourceField},
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
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
        .split(layout[1]);
    render_categories(frame, columns[0], state, &theme);
    render_list(frame, columns[1], state, &theme);

    render_dialogs(frame, area, state, &theme);
}

fn render_header(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let resources = &state.resources;
    let category = resources
        .filter
        .category
        .map(|id| resources.store.category_name(id).to_string())
        .unwrap_or_else(|| "All".to_string());
    let subcategory = resources
        .filter
        .subcategory
        .and_then(|id| resources.store.subcategory_name(id))
        .unwrap_or("-");

    let mut line = vec![
        Span::styled("Category", Style::default().fg(theme.dim)),
        Span::raw(format!(": {category}   ")),
        Span::styled("Sub", Style::default().fg(theme.dim)),
        Span::raw(format!(": {subcategory}   ")),
        Span::styled("Sort", Style::default().fg(theme.dim)),
        Span::raw(format!(": {}", resources.sort.label())),
    ];
    let query = resources.filter.search.trim();
    if !query.is_empty() || resources.search_active {
        line.push(Span::raw("   "));
        line.push(Span::styled("Search", Style::default().fg(theme.dim)));
        line.push(Span::raw(": "));
        let shown = if query.is_empty() { "…" } else { query };
        let mut style = Style::default().fg(theme.text);
        if resources.search_active {
            style = style.fg(theme.accent).add_modifier(Modifier::BOLD);
        }
        line.push(Span::styled(shown.to_string(), style));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border))
        .title("Resources");
    frame.render_widget(Paragraph::new(Line::from(line)).block(block), area);
}

fn render_categories(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let resources = &state.resources;
    let items = resources
        .store
        .categories
        .iter()
        .map(|category| {
            let active = resources.filter.category == Some(category.id);
            let style = if active {
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.text)
            };
            ListItem::new(Line::from(vec![
                Span::styled(category.name.clone(), style),
                Span::styled(
                    format!(" ({})", category.count),
                    Style::default().fg(theme.dim),
                ),
            ]))
        })
        .collect::<Vec<_>>();

    let block = Block::default()
        .title("Categories")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border));
    if items.is_empty() {
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::raw("None yet. Press "),
                Span::styled("c", Style::default().fg(theme.accent)),
                Span::raw("."),
            ]))
            .alignment(Alignment::Center)
            .block(block),
            area,
        );
        return;
    }
    frame.render_widget(List::new(items).block(block), area);
}

fn render_list(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let resources = &state.resources;
    let visible = resources.visible();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border));

    if visible.is_empty() {
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::raw("No resources. Press "),
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
        .map(|resource| {
            let mut spans = vec![
                kind_chip(resource.kind, theme),
                Span::raw(" "),
                Span::styled(resource.title.clone(), Style::default().fg(theme.text)),
            ];
            if let Some(sub) = resource
                .subcategory_id
                .and_then(|id| resources.store.subcategory_name(id))
            {
                spans.push(Span::styled(
                    format!("  {sub}"),
                    Style::default().fg(theme.dim),
                ));
            }
            ListItem::new(Line::from(spans))
        })
        .collect::<Vec<_>>();

    let mut list_state = ListState::default();
    list_state.select(Some(resources.selected));

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

fn kind_chip(kind: ResourceKind, theme: &Theme) -> Span<'static> {
    let (label, color) = match kind {
        ResourceKind::Document => ("DOC", theme.warning),
        ResourceKind::Spreadsheet => ("SHT", theme.positive),
        ResourceKind::Link => ("LNK", theme.accent),
    };
    Span::styled(
        format!("[{label}]"),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )
}

fn render_dialogs(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let resources = &state.resources;
    if let Some(form) = resources.dialog.form() {
        let title = if form.id.is_some() {
            "Edit Resource"
        } else {
            "New Resource"
        };
        let category = form
            .category_id
            .map(|id| resources.store.category_name(id).to_string())
            .unwrap_or_else(|| "-".to_string());
        let subcategory = form
            .subcategory_id
            .and_then(|id| resources.store.subcategory_name(id))
            .unwrap_or("-");
        let rows = [
            FieldRow::new(
                "Title",
                form.title.as_str(),
                form.focus == ResourceField::Title,
            ),
            FieldRow::new("Kind", form.kind.label(), form.focus == ResourceField::Kind),
            FieldRow::new("Category", category, form.focus == ResourceField::Category),
            FieldRow::new(
                "Subcategory",
                subcategory,
                form.focus == ResourceField::Subcategory,
            ),
            FieldRow::new("URL", form.url.as_str(), form.focus == ResourceField::Url),
            FieldRow::new(
                "Description",
                form.description.as_str(),
                form.focus == ResourceField::Description,
            ),
        ];
        render_dialog(
            frame,
            area,
            title,
            &rows,
            resources.dialog.error(),
            resources.dialog.is_submitting(),
            theme,
        );
    }
    if let Some(form) = resources.category_dialog.form() {
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
            resources.category_dialog.error(),
            resources.category_dialog.is_submitting(),
            theme,
        );
    }
    if let Some(form) = resources.subcategory_dialog.form() {
        let title = if form.id.is_some() {
            "Rename Subcategory"
        } else {
            "New Subcategory"
        };
        let rows = [
            FieldRow::new("Name", form.name.as_str(), true),
            FieldRow::new(
                "Category",
                resources.store.category_name(form.category_id),
                false,
            ),
        ];
        render_dialog(
            frame,
            area,
            title,
            &rows,
            resources.subcategory_dialog.error(),
            resources.subcategory_dialog.is_submitting(),
            theme,
        );
    }
}
