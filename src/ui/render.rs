use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use unicode_width::UnicodeWidthStr;

use crate::app::{Field, Model, SessionKind};
use crate::editor::LineInput;
use crate::markdown::render_preview;

use super::{HEADER_HEIGHT, SETTINGS_PANEL_HEIGHT, overlays, status};

/// Screen regions for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditorLayout {
    pub header: Rect,
    pub settings: Option<Rect>,
    pub content: Rect,
    pub toast: Option<Rect>,
    pub status: Rect,
}

pub fn layout(model: &Model, area: Rect) -> EditorLayout {
    let settings_height = if model.settings_visible {
        SETTINGS_PANEL_HEIGHT
    } else {
        0
    };
    let toast_height = u16::from(model.active_toast().is_some());
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Length(settings_height),
            Constraint::Min(0),
            Constraint::Length(toast_height),
            Constraint::Length(1),
        ])
        .split(area);
    EditorLayout {
        header: chunks[0],
        settings: (settings_height > 0).then_some(chunks[1]),
        content: chunks[2],
        toast: (toast_height > 0).then_some(chunks[3]),
        status: chunks[4],
    }
}

/// Rows available to the body editor or preview at the model's terminal size.
pub fn content_area_height(model: &Model) -> u16 {
    let (width, height) = model.size;
    layout(model, Rect::new(0, 0, width, height)).content.height
}

/// Text lines shown in preview mode: the title, the tags, then the rendered
/// HTML split at its line breaks.
pub fn preview_lines(model: &Model) -> Vec<String> {
    let title = model.title.as_str().trim();
    let mut lines = vec![if title.is_empty() {
        "Untitled post".to_string()
    } else {
        title.to_string()
    }];
    if !model.tags.is_empty() {
        lines.push(
            model
                .tags
                .iter()
                .map(|tag| format!("#{tag}"))
                .collect::<Vec<_>>()
                .join(" "),
        );
    }
    lines.push(String::new());
    lines.extend(
        render_preview(&model.body.text())
            .split("<br>")
            .map(str::to_string),
    );
    lines
}

/// Render the complete UI.
pub fn render(model: &Model, frame: &mut Frame) {
    let area = frame.area();
    let regions = layout(model, area);

    render_header(model, frame, regions.header);
    if let Some(settings) = regions.settings {
        render_settings(model, frame, settings);
    }
    if model.preview_mode {
        render_preview_pane(model, frame, regions.content);
    } else {
        render_body(model, frame, regions.content);
    }
    if let Some(toast) = regions.toast {
        status::render_toast_bar(model, frame, toast);
    }
    status::render_status_bar(model, frame, regions.status);

    if model.restore_prompt.is_some() {
        overlays::render_restore_overlay(model, frame, area);
    } else if model.help_visible {
        overlays::render_help_overlay(frame, area);
    }
}

fn label_style(focused: bool) -> Style {
    if focused {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Indexed(245))
    }
}

fn cursor_style() -> Style {
    Style::default().bg(Color::White).fg(Color::Black)
}

/// Split `text` at character column `col` with the cursor cell highlighted.
fn cursor_spans(text: &str, col: usize) -> Vec<Span<'static>> {
    let before: String = text.chars().take(col).collect();
    let mut rest = text.chars().skip(col);
    let at = rest.next().map_or_else(|| " ".to_string(), |c| c.to_string());
    let after: String = rest.collect();

    let mut spans = Vec::with_capacity(3);
    if !before.is_empty() {
        spans.push(Span::raw(before));
    }
    spans.push(Span::styled(at, cursor_style()));
    if !after.is_empty() {
        spans.push(Span::raw(after));
    }
    spans
}

fn input_spans(input: &LineInput, focused: bool, placeholder: &str) -> Vec<Span<'static>> {
    if focused {
        return cursor_spans(input.as_str(), input.cursor());
    }
    if input.is_empty() {
        return vec![Span::styled(
            placeholder.to_string(),
            Style::default()
                .fg(Color::Indexed(242))
                .add_modifier(Modifier::ITALIC),
        )];
    }
    vec![Span::raw(input.as_str().to_string())]
}

fn render_header(model: &Model, frame: &mut Frame, area: Rect) {
    if area.height == 0 {
        return;
    }
    let kind_label = match model.kind {
        SessionKind::New => " new post ".to_string(),
        SessionKind::Edit { post_id } => format!(" editing #{post_id} "),
    };
    let label_width = u16::try_from(kind_label.width()).unwrap_or(u16::MAX);
    let title_area = Rect {
        width: area.width.saturating_sub(label_width),
        height: 1,
        ..area
    };
    let kind_area = Rect {
        x: title_area.x + title_area.width,
        width: area.width.saturating_sub(title_area.width),
        height: 1,
        ..area
    };

    let focused = model.focus == Field::Title;
    let mut spans = vec![Span::styled(" Title  ", label_style(focused))];
    spans.extend(input_spans(&model.title, focused, "Post title"));
    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(Style::default().add_modifier(Modifier::BOLD)),
        title_area,
    );
    frame.render_widget(
        Paragraph::new(kind_label).style(Style::default().bg(Color::Blue).fg(Color::White)),
        kind_area,
    );

    if area.height < 2 {
        return;
    }
    let blog = model
        .selected_blog()
        .map_or_else(|| format!("blog {}", model.blog_id), |blog| blog.name.clone());
    let state = if model.published { "published" } else { "draft" };
    let mut meta = format!(" {blog} \u{b7} {state}");
    if !model.tags.is_empty() {
        meta.push_str(" \u{b7} ");
        meta.push_str(&model.tags.joined());
    }
    let meta_area = Rect {
        y: area.y + 1,
        height: 1,
        ..area
    };
    frame.render_widget(
        Paragraph::new(meta).style(Style::default().fg(Color::Indexed(245))),
        meta_area,
    );
}

fn render_settings(model: &Model, frame: &mut Frame, area: Rect) {
    let blog = model
        .selected_blog()
        .map_or_else(|| format!("blog {}", model.blog_id), |blog| blog.name.clone());
    let dim = Style::default().fg(Color::Indexed(245));

    let blog_line = Line::from(vec![
        Span::styled("Blog     ", label_style(false)),
        Span::raw(format!("< {blog} >")),
        Span::styled("   Ctrl-b next", dim),
    ]);

    let status_line = Line::from(vec![
        Span::styled("Status   ", label_style(false)),
        if model.published {
            Span::styled("Published", Style::default().fg(Color::Green))
        } else {
            Span::styled("Draft", Style::default().fg(Color::Yellow))
        },
        Span::styled("   Ctrl-t toggle", dim),
    ]);

    let excerpt_focused = model.focus == Field::Excerpt;
    let mut excerpt_spans = vec![Span::styled("Excerpt  ", label_style(excerpt_focused))];
    excerpt_spans.extend(input_spans(
        &model.excerpt,
        excerpt_focused,
        "empty: first 150 characters of the body",
    ));

    let tags_focused = model.focus == Field::TagInput;
    let mut tag_spans = vec![Span::styled("Tags     ", label_style(tags_focused))];
    for tag in model.tags.iter() {
        tag_spans.push(Span::styled(
            format!("[{tag}]"),
            Style::default().fg(Color::Cyan),
        ));
        tag_spans.push(Span::raw(" "));
    }
    tag_spans.extend(input_spans(
        &model.tag_input,
        tags_focused,
        "type a tag, Enter adds",
    ));

    let block = Block::default()
        .title(" Post settings ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let panel = Paragraph::new(vec![
        blog_line,
        status_line,
        Line::from(excerpt_spans),
        Line::from(tag_spans),
    ])
    .block(block);
    frame.render_widget(Clear, area);
    frame.render_widget(panel, area);
}

fn render_body(model: &Model, frame: &mut Frame, area: Rect) {
    let buf = &model.body;
    let total_lines = buf.line_count();
    let gutter_width = line_number_width(total_lines);

    let visible_height = area.height as usize;
    let start = model.body_scroll_offset.min(total_lines.saturating_sub(1));
    let end = (start + visible_height).min(total_lines);
    let cursor = buf.cursor();
    let show_cursor = model.focus == Field::Body;

    let mut content: Vec<Line> = Vec::new();
    for line_idx in start..end {
        let line_text = buf.line_at(line_idx).unwrap_or_default();
        let line_num = format!("{:>width$} ", line_idx + 1, width = gutter_width as usize);

        let mut spans = vec![Span::styled(line_num, Style::default().fg(Color::DarkGray))];
        if show_cursor && line_idx == cursor.line {
            spans.extend(cursor_spans(&line_text, cursor.col));
        } else {
            spans.push(Span::raw(line_text));
        }
        content.push(Line::from(spans));
    }

    if buf.is_empty() && !show_cursor {
        content = vec![Line::styled(
            " Write your post in markdown",
            Style::default()
                .fg(Color::Indexed(242))
                .add_modifier(Modifier::ITALIC),
        )];
    }

    frame.render_widget(Clear, area);
    frame.render_widget(Paragraph::new(content), area);
}

fn render_preview_pane(model: &Model, frame: &mut Frame, area: Rect) {
    let lines = preview_lines(model);
    let start = model.preview_scroll_offset.min(lines.len().saturating_sub(1));
    let has_tags = !model.tags.is_empty();

    let content: Vec<Line> = lines
        .into_iter()
        .enumerate()
        .skip(start)
        .map(|(idx, text)| {
            let style = match idx {
                0 => Style::default().add_modifier(Modifier::BOLD),
                1 if has_tags => Style::default().fg(Color::Cyan),
                _ => Style::default(),
            };
            Line::styled(text, style)
        })
        .collect();

    let block = Block::default()
        .title(" Preview ")
        .borders(Borders::TOP)
        .border_style(Style::default().fg(Color::DarkGray));
    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(content)
            .block(block)
            .wrap(Wrap { trim: false }),
        area,
    );
}

/// Calculate the width needed for line numbers.
pub const fn line_number_width(total_lines: usize) -> u16 {
    if total_lines < 10 {
        1
    } else if total_lines < 100 {
        2
    } else if total_lines < 1_000 {
        3
    } else if total_lines < 10_000 {
        4
    } else if total_lines < 100_000 {
        5
    } else {
        6
    }
}
