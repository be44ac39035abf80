use chrono::Local;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::{AutosaveStatus, Model, Phase, SessionKind, ToastLevel};
use crate::markdown::ContentStats;

pub fn render_status_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let stats = ContentStats::of(&model.body.text());

    let (mode, style) = match model.phase {
        Phase::Submitting => (
            " SAVING\u{2026} ",
            Style::default().bg(Color::Yellow).fg(Color::Black),
        ),
        Phase::Submitted => (
            " SAVED ",
            Style::default().bg(Color::Green).fg(Color::Black),
        ),
        Phase::Empty | Phase::Editing if model.preview_mode => (
            " PREVIEW ",
            Style::default().bg(Color::Blue).fg(Color::White),
        ),
        Phase::Empty | Phase::Editing => match model.kind {
            SessionKind::New => (
                " NEW ",
                Style::default().bg(Color::Magenta).fg(Color::White),
            ),
            SessionKind::Edit { .. } => (
                " EDIT ",
                Style::default().bg(Color::Magenta).fg(Color::White),
            ),
        },
    };

    let autosave = match model.autosave {
        AutosaveStatus::Idle => String::new(),
        AutosaveStatus::Pending => "  [unsaved]".to_string(),
        AutosaveStatus::Saved(at) => format!(
            "  [draft saved {}]",
            at.with_timezone(&Local).format("%H:%M:%S")
        ),
    };

    let status = format!(
        " {} chars  {} lines{}  Ctrl-s:save  Ctrl-p:preview  F1:help",
        stats.chars, stats.lines, autosave
    );

    let bar = Paragraph::new(Line::from(vec![
        Span::styled(mode, style.add_modifier(Modifier::BOLD)),
        Span::raw(status),
    ]))
    .style(Style::default().bg(Color::DarkGray).fg(Color::White));
    frame.render_widget(bar, area);
}

pub fn render_toast_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let Some((message, level)) = model.active_toast() else {
        return;
    };
    let (prefix, style) = match level {
        ToastLevel::Info => (
            "[info]",
            Style::default().bg(Color::DarkGray).fg(Color::White),
        ),
        ToastLevel::Warning => (
            "[warn]",
            Style::default().bg(Color::Yellow).fg(Color::Black),
        ),
        ToastLevel::Error => ("[error]", Style::default().bg(Color::Red).fg(Color::White)),
    };
    let toast = Paragraph::new(format!("{prefix} {message}")).style(style);
    frame.render_widget(toast, area);
}
