use chrono::Local;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap};

use crate::app::Model;
use crate::markdown::ContentStats;

pub fn render_restore_overlay(model: &Model, frame: &mut Frame, area: Rect) {
    let Some(draft) = model.restore_prompt.as_ref() else {
        return;
    };
    let popup = centered_popup_rect(area.width.saturating_sub(16).max(44), 11, area);

    let dim_style = Style::default().fg(Color::Indexed(245));
    let title = if draft.title.trim().is_empty() {
        "(untitled)"
    } else {
        draft.title.as_str()
    };
    let saved = draft.timestamp.map_or_else(
        || "unknown time".to_string(),
        |at| at.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string(),
    );
    let stats = ContentStats::of(&draft.content);

    let lines = vec![
        Line::styled(
            "An unsaved draft was found. Restore it?",
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Line::raw(""),
        Line::from(vec![
            Span::styled("  Title  ", dim_style),
            Span::styled(
                title.to_string(),
                Style::default().fg(Color::Yellow),
            ),
        ]),
        Line::from(vec![
            Span::styled("  Saved  ", dim_style),
            Span::raw(saved),
        ]),
        Line::from(vec![
            Span::styled("  Body   ", dim_style),
            Span::raw(format!("{} chars, {} lines", stats.chars, stats.lines)),
        ]),
        Line::raw(""),
        Line::styled("y/Enter restore \u{b7} n/Esc start fresh", dim_style),
    ];

    let block = Block::default()
        .title("Restore draft")
        .borders(Borders::ALL)
        .padding(Padding::horizontal(1))
        .style(Style::default().bg(Color::Black).fg(Color::White));
    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: true }),
        popup,
    );
}

pub fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_width = area.width.saturating_sub(12).max(48);
    let popup_height = area.height.saturating_sub(4).max(12);
    let popup = centered_popup_rect(popup_width, popup_height, area);

    let section_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let dim_style = Style::default().fg(Color::Indexed(245));

    let lines = vec![
        Line::styled("Editing", section_style),
        Line::raw("  Tab / Shift-Tab     Next / previous field"),
        Line::raw("  Arrows, Home/End    Move cursor"),
        Line::raw("  Ctrl+Home/End       Body start / end"),
        Line::raw("  PageUp/PageDown     Scroll"),
        Line::raw(""),
        Line::styled("Post", section_style),
        Line::raw("  Ctrl-s              Save post"),
        Line::raw("  Ctrl-p              Toggle HTML preview"),
        Line::raw("  Ctrl-o / F2         Post settings"),
        Line::raw("  Ctrl-t              Toggle published"),
        Line::raw("  Ctrl-b              Next blog"),
        Line::raw("  Enter (tags)        Add tag"),
        Line::raw("  Backspace (tags)    Remove last tag"),
        Line::raw(""),
        Line::styled("Other", section_style),
        Line::raw("  F1                  Toggle help"),
        Line::raw("  Ctrl-q / Ctrl-c     Quit (draft is kept)"),
        Line::raw(""),
        Line::styled("any key closes", dim_style),
    ];

    let block = Block::default()
        .title("Help")
        .borders(Borders::ALL)
        .padding(Padding::uniform(1))
        .style(Style::default().bg(Color::Black).fg(Color::White));

    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

pub fn centered_popup_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w) / 2);
    let y = area.y + (area.height.saturating_sub(h) / 2);
    Rect::new(x, y, w, h)
}
