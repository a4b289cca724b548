//! UI rendering for TUI.

use crate::app::{App, Tab};
use cms_architect_core::{Role, SourceFileKind};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Tabs, Wrap},
};
use strum::IntoEnumIterator;

/// Draw the main UI.
#[tracing::instrument(skip_all, level = "trace")]
pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tab bar
            Constraint::Min(0),    // Main content
            Constraint::Length(3), // Status bar
        ])
        .split(f.area());

    draw_tabs(f, app, chunks[0]);

    match app.tab {
        Tab::Chat => draw_chat(f, app, chunks[1]),
        Tab::Schema => draw_schema(f, app, chunks[1]),
        Tab::Code => draw_code(f, app, chunks[1]),
        Tab::Preview => draw_preview(f, app, chunks[1]),
    }

    draw_status_bar(f, app, chunks[2]);
}

fn draw_tabs(f: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<String> = Tab::iter()
        .enumerate()
        .map(|(i, tab)| format!("F{} {}", i + 1, tab))
        .collect();
    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("CMS Architect"),
        )
        .select(app.tab.index())
        .style(Style::default().fg(Color::Gray))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );
    f.render_widget(tabs, area);
}

fn draw_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let help_text = match app.tab {
        Tab::Chat if app.is_busy() => "Esc: Cancel | Tab: Next tab | Ctrl+C: Quit",
        Tab::Chat => "Enter: Send | /generate, /chat: Force mode | Tab: Next tab | Ctrl+C: Quit",
        Tab::Schema => "PgUp/PgDn: Scroll | Ctrl+Y: Copy | Tab: Next tab | Q: Quit",
        Tab::Code => "↑↓: Select file | PgUp/PgDn: Scroll | Ctrl+Y: Copy | Q: Quit",
        Tab::Preview => "Tab: Next tab | Q: Quit",
    };

    let status_text = format!("{} | {}", app.status_message, help_text);
    let status = Paragraph::new(status_text)
        .block(Block::default().borders(Borders::ALL))
        .style(Style::default().fg(Color::Gray));
    f.render_widget(status, area);
}

fn draw_empty_state(f: &mut Frame, area: Rect, title: &str, hint: &str) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            title.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            hint.to_string(),
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let empty = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(empty, area);
}

/// Word-wraps `text` to `width` columns, splitting words longer than a line.
fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();

    for raw in text.lines() {
        let mut current = String::new();
        for word in raw.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();
            while word.len() > width {
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
                lines.push(word.drain(..width).collect());
            }
            let word: String = word.into_iter().collect();
            let needed = current.chars().count() + word.chars().count() + usize::from(!current.is_empty());
            if needed > width && !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(&word);
        }
        lines.push(current);
    }
    lines
}

fn draw_chat(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(area);

    let inner_width = usize::from(chunks[0].width.saturating_sub(2));
    let mut lines: Vec<Line> = Vec::new();
    for message in app.session.conversation().messages() {
        let (speaker, color) = match message.role() {
            Role::User => ("You", Color::Green),
            _ => ("Architect", Color::Cyan),
        };
        lines.push(Line::from(Span::styled(
            speaker,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )));
        lines.extend(wrap_text(message.text(), inner_width).into_iter().map(Line::from));
        lines.push(Line::from(""));
    }
    if app.is_busy() {
        lines.push(Line::from(Span::styled(
            "Thinking...",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::ITALIC),
        )));
    }

    // Stick to the bottom; PageUp scrolls back.
    let visible = usize::from(chunks[0].height.saturating_sub(2));
    let end = lines.len().saturating_sub(usize::from(app.scroll)).max(visible.min(lines.len()));
    let start = end.saturating_sub(visible);
    let history = Paragraph::new(lines[start..end].to_vec())
        .block(Block::default().borders(Borders::ALL).title("Conversation"));
    f.render_widget(history, chunks[0]);

    let (title, style) = if app.is_busy() {
        (
            "Waiting for the architect (Esc to cancel)",
            Style::default().fg(Color::DarkGray),
        )
    } else {
        ("Message (Enter to send)", Style::default())
    };
    let input = Paragraph::new(app.input.as_str())
        .style(style)
        .block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(input, chunks[1]);
}

fn draw_schema(f: &mut Frame, app: &App, area: Rect) {
    let schema = &app.session.artifacts().schema;
    if schema.trim().is_empty() {
        draw_empty_state(
            f,
            area,
            "No Schema Generated Yet",
            "Describe your Course Management System in the Chat tab to generate a MySQL schema.",
        );
        return;
    }

    let paragraph = Paragraph::new(schema.as_str())
        .block(Block::default().borders(Borders::ALL).title("schema.sql"))
        .scroll((app.scroll, 0));
    f.render_widget(paragraph, area);
}

fn draw_code(f: &mut Frame, app: &App, area: Rect) {
    let files = &app.session.artifacts().source_files;
    if files.is_empty() {
        draw_empty_state(
            f,
            area,
            "No Code Generated Yet",
            "Ask the architect to build a system and the Java sources will appear here.",
        );
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(36), Constraint::Min(0)])
        .split(area);

    let items: Vec<ListItem> = files
        .iter()
        .map(|file| {
            ListItem::new(Line::from(vec![
                Span::raw(file.name().clone()),
                Span::styled(
                    format!(" [{}]", file.kind()),
                    Style::default().fg(kind_color(*file.kind())),
                ),
            ]))
        })
        .collect();
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Files"))
        .highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );
    let mut state = ListState::default().with_selected(Some(app.selected_file));
    f.render_stateful_widget(list, chunks[0], &mut state);

    if let Some(file) = app.selected_source_file() {
        let content = Paragraph::new(file.content().as_str())
            .block(Block::default().borders(Borders::ALL).title(file.name().as_str()))
            .scroll((app.scroll, 0));
        f.render_widget(content, chunks[1]);
    }
}

fn kind_color(kind: SourceFileKind) -> Color {
    match kind {
        SourceFileKind::Entity => Color::Green,
        SourceFileKind::Controller => Color::Magenta,
        SourceFileKind::Repository => Color::Blue,
        SourceFileKind::Service => Color::Yellow,
        SourceFileKind::Config => Color::Red,
    }
}

fn draw_preview(f: &mut Frame, app: &App, area: Rect) {
    let artifacts = app.session.artifacts();
    if artifacts.is_empty() {
        draw_empty_state(
            f,
            area,
            "No Preview Yet",
            "The entity diagram and a summary of the generated system appear after generation.",
        );
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let diagram = &artifacts.diagram;
    let mut lines = vec![Line::from(Span::styled(
        format!("Nodes ({})", diagram.nodes.len()),
        Style::default().add_modifier(Modifier::BOLD),
    ))];
    lines.extend(
        diagram
            .nodes
            .iter()
            .map(|node| Line::from(format!("  ■ {} ({})", node.label, node.id))),
    );
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("Links ({})", diagram.links.len()),
        Style::default().add_modifier(Modifier::BOLD),
    )));
    let dangling = diagram.dangling_links();
    for link in &diagram.links {
        let text = format!(
            "  {} → {}",
            diagram.label_for(&link.source),
            diagram.label_for(&link.target)
        );
        if dangling.iter().any(|d| std::ptr::eq(*d, link)) {
            lines.push(Line::from(vec![
                Span::styled(text, Style::default().fg(Color::Yellow)),
                Span::styled(
                    "  (missing node)",
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::ITALIC),
                ),
            ]));
        } else {
            lines.push(Line::from(text));
        }
    }
    let graph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Entity Diagram"))
        .scroll((app.scroll, 0));
    f.render_widget(graph, chunks[0]);

    let tables = artifacts
        .schema
        .to_ascii_uppercase()
        .matches("CREATE TABLE")
        .count();
    let mut summary = vec![
        Line::from(format!("Tables: {}", tables)),
        Line::from(format!("Source files: {}", artifacts.source_files.len())),
        Line::from(""),
    ];
    summary.extend(SourceFileKind::iter().map(|kind| {
        Line::from(vec![
            Span::styled(
                format!("{:<12}", kind.to_string()),
                Style::default().fg(kind_color(kind)),
            ),
            Span::raw(artifacts.files_of_kind(kind).count().to_string()),
        ])
    }));
    if !dangling.is_empty() {
        summary.push(Line::from(""));
        summary.push(Line::from(Span::styled(
            format!("{} link(s) reference missing nodes", dangling.len()),
            Style::default().fg(Color::Yellow),
        )));
    }
    let summary = Paragraph::new(summary)
        .block(Block::default().borders(Borders::ALL).title("Summary"));
    f.render_widget(summary, chunks[1]);
}
