//! Rendering tests using ratatui's test backend.

use cms_architect_core::{
    Diagram, DiagramLink, DiagramNode, GeneratedArtifacts, SourceFile, SourceFileKind,
};
use cms_architect_gateway::{Session, TurnOutcome};
use cms_architect_tui::{App, Tab, draw};
use ratatui::{Terminal, backend::TestBackend, buffer::Buffer};

fn buffer_text(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut text = String::new();
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            text.push_str(buffer[(x, y)].symbol());
        }
        text.push('\n');
    }
    text
}

fn render(app: &App) -> anyhow::Result<String> {
    let mut terminal = Terminal::new(TestBackend::new(120, 32))?;
    terminal.draw(|f| draw(f, app))?;
    Ok(buffer_text(terminal.backend().buffer()))
}

fn sample_artifacts() -> GeneratedArtifacts {
    GeneratedArtifacts {
        schema: "CREATE TABLE users (id BIGINT);\nCREATE TABLE roles (id BIGINT);\nCREATE TABLE user_roles (user_id BIGINT, role_id BIGINT);".to_string(),
        source_files: vec![
            SourceFile::new("User.java", "@Entity\npublic class User {}", SourceFileKind::Entity),
            SourceFile::new(
                "SecurityConfig.java",
                "@Configuration\npublic class SecurityConfig {}",
                SourceFileKind::Config,
            ),
        ],
        diagram: Diagram {
            nodes: vec![
                DiagramNode { id: "users".to_string(), label: "Users".to_string() },
                DiagramNode { id: "roles".to_string(), label: "Roles".to_string() },
            ],
            links: vec![
                DiagramLink { source: "users".to_string(), target: "roles".to_string() },
                DiagramLink { source: "users".to_string(), target: "ghost".to_string() },
            ],
        },
    }
}

fn app_with_artifacts() -> App {
    let mut session = Session::default();
    session.begin_turn("Build a CMS");
    session.complete(TurnOutcome::Generated(Ok(sample_artifacts())));
    App::new(session)
}

#[test]
fn empty_state_renders_in_every_tab() -> anyhow::Result<()> {
    let mut app = App::new(Session::default());

    app.select_tab(Tab::Chat);
    assert!(render(&app)?.contains("CMS Architect"));

    app.select_tab(Tab::Schema);
    assert!(render(&app)?.contains("No Schema Generated Yet"));

    app.select_tab(Tab::Code);
    assert!(render(&app)?.contains("No Code Generated Yet"));

    app.select_tab(Tab::Preview);
    assert!(render(&app)?.contains("No Preview Yet"));
    Ok(())
}

#[test]
fn tiny_terminal_does_not_panic() -> anyhow::Result<()> {
    let mut app = app_with_artifacts();
    for tab in [Tab::Chat, Tab::Schema, Tab::Code, Tab::Preview] {
        app.select_tab(tab);
        let mut terminal = Terminal::new(TestBackend::new(10, 4))?;
        terminal.draw(|f| draw(f, &app))?;
    }
    Ok(())
}

#[test]
fn chat_shows_greeting_and_thinking_indicator() -> anyhow::Result<()> {
    let mut session = Session::default();
    session.begin_turn("What is RBAC?");
    let app = App::new(session);

    let screen = render(&app)?;
    assert!(screen.contains("Hello! I'm your CMS Architect."));
    assert!(screen.contains("What is RBAC?"));
    assert!(screen.contains("Thinking..."));
    Ok(())
}

#[test]
fn schema_tab_shows_script() -> anyhow::Result<()> {
    let mut app = app_with_artifacts();
    app.select_tab(Tab::Schema);

    let screen = render(&app)?;
    assert!(screen.contains("schema.sql"));
    assert!(screen.contains("CREATE TABLE user_roles"));
    Ok(())
}

#[test]
fn code_tab_lists_files_with_kinds() -> anyhow::Result<()> {
    let mut app = app_with_artifacts();
    app.select_tab(Tab::Code);
    app.select_next_file();

    let screen = render(&app)?;
    assert!(screen.contains("User.java [entity]"));
    assert!(screen.contains("SecurityConfig.java [config]"));
    assert!(screen.contains("public class SecurityConfig"));
    Ok(())
}

#[test]
fn preview_flags_dangling_links() -> anyhow::Result<()> {
    let mut app = app_with_artifacts();
    app.select_tab(Tab::Preview);

    let screen = render(&app)?;
    assert!(screen.contains("Users → Roles"));
    assert!(screen.contains("(missing node)"));
    assert!(screen.contains("Tables: 3"));
    Ok(())
}

#[test]
fn copy_targets_follow_active_tab() {
    let mut app = app_with_artifacts();

    app.select_tab(Tab::Schema);
    let (label, text) = app.copy_target().unwrap();
    assert_eq!(label, "schema.sql");
    assert!(text.starts_with("CREATE TABLE users"));

    app.select_tab(Tab::Code);
    let (label, _) = app.copy_target().unwrap();
    assert_eq!(label, "User.java");

    app.select_tab(Tab::Preview);
    assert!(app.copy_target().is_none());
}
