use super::*;
use crate::api::Blog;
use crate::app::{Message, Model, update};
use crate::draft::{Draft, TagList};
use ratatui::Terminal;
use ratatui::backend::TestBackend;

fn create_test_terminal() -> Terminal<TestBackend> {
    let backend = TestBackend::new(80, 24);
    Terminal::new(backend).unwrap()
}

fn blogs() -> Vec<Blog> {
    vec![
        Blog {
            id: 3,
            name: "Field Notes".to_string(),
            slug: "field-notes".to_string(),
        },
        Blog {
            id: 7,
            name: "Release Log".to_string(),
            slug: "release-log".to_string(),
        },
    ]
}

fn typed(mut model: Model, text: &str) -> Model {
    for ch in text.chars() {
        model = update(model, Message::InsertChar(ch));
    }
    model
}

fn screen(model: &Model) -> String {
    let mut terminal = create_test_terminal();
    terminal.draw(|frame| render(model, frame)).unwrap();
    let buffer = terminal.backend().buffer();
    let width = buffer.area.width as usize;
    let symbols: Vec<&str> = buffer.content().iter().map(|c| c.symbol()).collect();
    symbols
        .chunks(width)
        .map(|row| row.concat())
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn test_render_shows_title_body_and_blog() {
    let model = Model::new(blogs(), (80, 24));
    let model = typed(model, "Launch notes");
    let model = update(model, Message::FocusNext);
    let model = typed(model, "First line");

    let content = screen(&model);
    assert!(content.contains("Title"));
    assert!(content.contains("Launch notes"));
    assert!(content.contains("First line"));
    assert!(content.contains("Field Notes"));
    assert!(content.contains("new post"));
}

#[test]
fn test_status_bar_counts_chars_and_lines() {
    let mut model = Model::new(blogs(), (80, 24));
    model.focus = crate::app::Field::Body;
    let model = typed(model, "ab\ncd");
    let content = screen(&model);
    assert!(content.contains("5 chars"), "{content}");
    assert!(content.contains("2 lines"));
}

#[test]
fn test_preview_mode_shows_rendered_html() {
    let model = Model::new(blogs(), (80, 24));
    let model = typed(model, "Hello");
    let model = update(model, Message::FocusNext);
    let model = typed(model, "# Hi\nthere");
    let model = update(model, Message::TogglePreview);

    let content = screen(&model);
    assert!(content.contains("Preview"));
    assert!(content.contains("<h1>Hi</h1>"));
    assert!(content.contains("there"));
    assert!(content.contains("PREVIEW"));
}

#[test]
fn test_empty_preview_shows_placeholder() {
    let model = update(Model::new(blogs(), (80, 24)), Message::TogglePreview);
    let content = screen(&model);
    assert!(content.contains("Untitled post"));
    assert!(content.contains("<p>No content yet</p>"));
}

#[test]
fn test_preview_lines_include_tags() {
    let mut model = Model::new(blogs(), (80, 24));
    model.tags = TagList::from_iter(["rust", "tui"]);
    let lines = preview_lines(&model);
    assert_eq!(lines[0], "Untitled post");
    assert_eq!(lines[1], "#rust #tui");
    assert_eq!(lines[2], "");
}

#[test]
fn test_settings_panel_lists_tags_and_status() {
    let mut model = Model::new(blogs(), (80, 24));
    model.tags = TagList::from_iter(["rust"]);
    let model = update(model, Message::ToggleSettings);
    let content = screen(&model);
    assert!(content.contains("Post settings"));
    assert!(content.contains("[rust]"));
    assert!(content.contains("Draft"));
    assert!(content.contains("< Field Notes >"));
}

#[test]
fn test_validation_toast_is_rendered() {
    let model = update(Model::new(blogs(), (80, 24)), Message::Save);
    let content = screen(&model);
    assert!(content.contains("[warn] Please enter a title"));
}

#[test]
fn test_restore_prompt_overlay() {
    let mut model = Model::new(blogs(), (80, 24));
    model.restore_prompt = Some(Draft {
        title: "Old".to_string(),
        content: "old body".to_string(),
        ..Draft::default()
    });
    let content = screen(&model);
    assert!(content.contains("Restore it?"));
    assert!(content.contains("Old"));
    assert!(content.contains("8 chars, 1 lines"));
}

#[test]
fn test_help_overlay() {
    let mut model = Model::new(blogs(), (80, 24));
    model.help_visible = true;
    let content = screen(&model);
    assert!(content.contains("Help"));
    assert!(content.contains("Save post"));
}

#[test]
fn test_content_height_shrinks_with_settings_and_toast() {
    let mut model = Model::new(blogs(), (80, 24));
    assert_eq!(content_area_height(&model), 24 - HEADER_HEIGHT - 1);
    model.settings_visible = true;
    assert_eq!(
        content_area_height(&model),
        24 - HEADER_HEIGHT - SETTINGS_PANEL_HEIGHT - 1
    );
    let model = update(model, Message::Save);
    assert_eq!(
        content_area_height(&model),
        24 - HEADER_HEIGHT - SETTINGS_PANEL_HEIGHT - 2
    );
}

#[test]
fn test_line_number_width() {
    assert_eq!(line_number_width(1), 1);
    assert_eq!(line_number_width(99), 2);
    assert_eq!(line_number_width(1_000), 4);
}

#[test]
fn test_render_survives_tiny_terminal() {
    let mut model = Model::new(blogs(), (10, 3));
    model.settings_visible = true;
    let backend = TestBackend::new(10, 3);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal.draw(|frame| render(&model, frame)).unwrap();
}

#[test]
fn test_centered_popup_rect_clamps_to_area() {
    let area = ratatui::layout::Rect::new(0, 0, 20, 10);
    let popup = centered_popup_rect(40, 4, area);
    assert_eq!(popup, ratatui::layout::Rect::new(0, 3, 20, 4));
}
