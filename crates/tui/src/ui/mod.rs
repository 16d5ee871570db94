pub mod components;
pub mod keymap;
pub mod screens;

mod theme;

use std::io::{self, Stdout};

use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::{
    Frame,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::{AppState, Section};
use crate::error::Result;

pub use theme::Theme;

pub type Tui = ratatui::Terminal<CrosstermBackend<Stdout>>;

/// Switch the terminal into raw alternate-screen mode for the UI.
pub fn init_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    crossterm::execute!(io::stdout(), EnterAlternateScreen)?;
    let tui = ratatui::Terminal::new(CrosstermBackend::new(io::stdout()))?;
    Ok(tui)
}

/// Undo [`init_terminal`] before handing the shell back.
pub fn restore_terminal(tui: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    crossterm::execute!(tui.backend_mut(), LeaveAlternateScreen)?;
    tui.show_cursor()?;
    Ok(())
}

pub fn render(frame: &mut Frame<'_>, state: &AppState) {
    let area = frame.area();
    let theme = Theme::default();

    // Info bar, tabs, content, bottom bar.
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    render_info_bar(frame, layout[0], state, &theme);
    components::tabs::render_tabs(frame, layout[1], state.section, &theme);

    match state.section {
        Section::Notes => screens::notes::render(frame, layout[2], state),
        Section::Resources => screens::resources::render(frame, layout[2], state),
        Section::Tasks => screens::tasks::render(frame, layout[2], state),
        Section::Goals => screens::goals::render(frame, layout[2], state),
        Section::Focus => screens::focus::render(frame, layout[2], state),
        Section::Tutoring => screens::tutoring::render(frame, layout[2], state),
    }

    render_bottom_bar(frame, layout[3], state, &theme);
    components::toast::render(frame, area, state.toast.as_ref(), &theme);
}

fn render_info_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let refresh = state
        .last_refresh
        .map(|dt| dt.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "-".to_string());
    let status = if state.connected { "OK" } else { "ERR" };
    let status_style = if state.connected {
        Style::default().fg(theme.positive)
    } else {
        Style::default().fg(theme.error)
    };

    let line = Line::from(vec![
        Span::styled("Backend", Style::default().fg(theme.dim)),
        Span::raw(format!(": {}  ", state.base_url)),
        Span::styled("Refresh", Style::default().fg(theme.dim)),
        Span::raw(format!(": {refresh}  ")),
        Span::styled(status, status_style),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

fn render_bottom_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let mut parts = vec![
        Span::styled("1-6", Style::default().fg(theme.accent)),
        Span::raw(" section  "),
        Span::styled("Tab", Style::default().fg(theme.accent)),
        Span::raw(" next  "),
        Span::styled("R", Style::default().fg(theme.accent)),
        Span::raw(" refresh"),
    ];

    let hints = context_hints(state, theme);
    if !hints.is_empty() {
        parts.push(Span::styled("  │  ", Style::default().fg(theme.border)));
        parts.extend(hints);
    }

    parts.push(Span::styled("  │  ", Style::default().fg(theme.border)));
    parts.push(Span::styled("q", Style::default().fg(theme.accent)));
    parts.push(Span::raw(" quit"));

    frame.render_widget(Paragraph::new(Line::from(parts)), area);
}

fn context_hints(state: &AppState, theme: &Theme) -> Vec<Span<'static>> {
    if state.editing() {
        return vec![
            Span::styled("Enter", Style::default().fg(theme.accent)),
            Span::raw(" save  "),
            Span::styled("Tab", Style::default().fg(theme.accent)),
            Span::raw(" next  "),
            Span::styled("Esc", Style::default().fg(theme.accent)),
            Span::raw(" cancel"),
        ];
    }
    let keys: &[(&str, &str)] = match state.section {
        Section::Notes => &[
            ("n", "new"),
            ("e", "edit"),
            ("d", "delete"),
            ("/", "search"),
            ("f", "category"),
            ("o", "sort"),
            ("c/m/x", "categories"),
        ],
        Section::Resources => &[
            ("n", "new"),
            ("e", "edit"),
            ("d", "delete"),
            ("u", "link"),
            ("/", "search"),
            ("f/g", "filters"),
            ("c/b", "new cat/sub"),
        ],
        Section::Tasks => &[
            ("n", "new"),
            ("Space", "status"),
            ("a", "subtask"),
            ("t", "toggle sub"),
            ("/", "search"),
            ("o", "sort"),
        ],
        Section::Goals => &[
            ("n", "new"),
            ("Space", "done"),
            ("a", "subgoal"),
            ("t", "toggle sub"),
            ("/", "search"),
            ("o", "sort"),
        ],
        Section::Focus => &[
            ("n", "start"),
            ("c", "close"),
            ("d", "delete"),
            ("a", "task"),
            ("t", "toggle task"),
        ],
        Section::Tutoring => &[
            ("n", "new student"),
            ("a", "log session"),
            ("p", "paid"),
            ("P", "pending"),
            ("/", "search"),
        ],
    };
    let mut spans = Vec::new();
    for (i, (key, action)) in keys.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(
            key.to_string(),
            Style::default().fg(theme.accent),
        ));
        spans.push(Span::raw(format!(" {action}")));
    }
    spans
}
