use crate::app::Model;
use crate::app::model::{Field, Phase, ToastLevel};
use crate::editor::{Direction, LineInput};

/// All possible events and actions in the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Text input on the focused field
    /// Insert a character at the cursor
    InsertChar(char),
    /// Insert pasted text at the cursor
    Paste(String),
    /// Delete character before cursor
    Backspace,
    /// Delete character at cursor
    Delete,
    /// Enter: new line in the body, add tag in the tag field
    Enter,
    /// Move the cursor in the focused field
    MoveCursor(Direction),
    MoveHome,
    MoveEnd,
    /// Move to the start of the body
    MoveToStart,
    /// Move to the end of the body
    MoveToEnd,

    // Focus
    FocusNext,
    FocusPrev,
    Focus(Field),

    // Tags
    /// Add the tag field's text as a tag
    AddTag,
    RemoveTag(String),
    RemoveLastTag,

    // Post settings
    TogglePublished,
    NextBlog,
    PrevBlog,
    SelectBlog(i64),

    // View
    TogglePreview,
    ToggleSettings,
    ToggleHelp,
    HideHelp,
    ScrollUp(usize),
    ScrollDown(usize),

    // Draft recovery
    ConfirmRestore,
    DeclineRestore,

    /// Validate and submit the post
    Save,
    /// Terminal resized
    Resize(u16, u16),
    Quit,
}

#[derive(Clone, Copy)]
enum TextEdit {
    Insert(char),
    Back,
    Forward,
}

/// Pure state transition. Remote calls and storage writes happen in the
/// session after this returns.
pub fn update(mut model: Model, msg: Message) -> Model {
    match msg {
        Message::InsertChar(ch) => edit_focused(&mut model, TextEdit::Insert(ch)),
        Message::Paste(text) => paste(&mut model, &text),
        Message::Backspace => edit_focused(&mut model, TextEdit::Back),
        Message::Delete => edit_focused(&mut model, TextEdit::Forward),
        Message::Enter => match model.focus {
            Field::Body => edit_focused(&mut model, TextEdit::Insert('\n')),
            Field::TagInput => add_tag(&mut model),
            Field::Title => model.focus = Field::Body,
            Field::Excerpt => {}
        },
        Message::MoveCursor(direction) => move_cursor(&mut model, direction),
        Message::MoveHome => match model.focus {
            Field::Body => model.body.move_home(),
            field => focused_line(&mut model, field).move_home(),
        },
        Message::MoveEnd => match model.focus {
            Field::Body => model.body.move_end(),
            field => focused_line(&mut model, field).move_end(),
        },
        Message::MoveToStart => {
            model.body.move_to_start();
            model.scroll_to_cursor();
        }
        Message::MoveToEnd => {
            model.body.move_to_end();
            model.scroll_to_cursor();
        }

        Message::FocusNext => cycle_focus(&mut model, true),
        Message::FocusPrev => cycle_focus(&mut model, false),
        Message::Focus(field) => {
            if focus_order(&model).contains(&field) {
                model.focus = field;
            }
        }

        Message::AddTag => add_tag(&mut model),
        Message::RemoveTag(tag) => {
            if model.tags.remove(&tag) {
                model.mark_edited();
            }
        }
        Message::RemoveLastTag => {
            if model.tags.pop().is_some() {
                model.mark_edited();
            }
        }

        Message::TogglePublished => {
            model.published = !model.published;
            model.mark_edited();
        }
        Message::NextBlog => {
            if model.cycle_blog(true) {
                model.mark_edited();
            }
        }
        Message::PrevBlog => {
            if model.cycle_blog(false) {
                model.mark_edited();
            }
        }
        Message::SelectBlog(id) => {
            if id != model.blog_id && model.blogs.iter().any(|blog| blog.id == id) {
                model.blog_id = id;
                model.mark_edited();
            }
        }

        Message::TogglePreview => {
            model.preview_mode = !model.preview_mode;
            model.preview_scroll_offset = 0;
        }
        Message::ToggleSettings => {
            model.settings_visible = !model.settings_visible;
            if !model.settings_visible && matches!(model.focus, Field::Excerpt | Field::TagInput) {
                model.focus = Field::Body;
            }
        }
        Message::ToggleHelp => model.help_visible = !model.help_visible,
        Message::HideHelp => model.help_visible = false,
        Message::ScrollUp(n) => {
            if model.preview_mode {
                model.preview_scroll_offset = model.preview_scroll_offset.saturating_sub(n);
            } else {
                model.body_scroll_offset = model.body_scroll_offset.saturating_sub(n);
            }
        }
        Message::ScrollDown(n) => {
            if model.preview_mode {
                let max = crate::ui::preview_lines(&model).len().saturating_sub(1);
                model.preview_scroll_offset = (model.preview_scroll_offset + n).min(max);
            } else {
                let max = model.body.line_count().saturating_sub(1);
                model.body_scroll_offset = (model.body_scroll_offset + n).min(max);
            }
        }

        Message::ConfirmRestore => {
            if let Some(draft) = model.restore_prompt.take() {
                model.apply_draft(&draft);
                model.show_toast(ToastLevel::Info, "Draft restored");
            }
        }
        Message::DeclineRestore => model.restore_prompt = None,

        Message::Save => request_save(&mut model),
        Message::Resize(width, height) => {
            model.size = (width, height);
            model.scroll_to_cursor();
        }
        Message::Quit => model.should_quit = true,
    }
    model
}

fn request_save(model: &mut Model) {
    if matches!(model.phase, Phase::Submitting | Phase::Submitted) {
        return;
    }
    if model.title.as_str().trim().is_empty() {
        model.focus = Field::Title;
        model.show_toast(ToastLevel::Warning, "Please enter a title");
        return;
    }
    if model.body.text().trim().is_empty() {
        model.focus = Field::Body;
        model.preview_mode = false;
        model.show_toast(ToastLevel::Warning, "Please enter the post body");
        return;
    }
    model.phase = Phase::Submitting;
}

fn focused_line(model: &mut Model, field: Field) -> &mut LineInput {
    match field {
        Field::Excerpt => &mut model.excerpt,
        Field::TagInput => &mut model.tag_input,
        Field::Title | Field::Body => &mut model.title,
    }
}

fn edit_line(input: &mut LineInput, edit: TextEdit) -> bool {
    match edit {
        TextEdit::Insert(ch) => input.insert_char(ch),
        TextEdit::Back => input.delete_back(),
        TextEdit::Forward => input.delete_forward(),
    }
}

fn edit_focused(model: &mut Model, edit: TextEdit) {
    let changed = match model.focus {
        Field::Body if model.preview_mode => false,
        Field::Body => {
            let changed = match edit {
                TextEdit::Insert(ch) => model.body.insert_char(ch),
                TextEdit::Back => model.body.delete_back(),
                TextEdit::Forward => model.body.delete_forward(),
            };
            model.scroll_to_cursor();
            changed
        }
        // The tag being typed is not part of the draft until it is added.
        Field::TagInput => {
            edit_line(&mut model.tag_input, edit);
            false
        }
        field => edit_line(focused_line(model, field), edit),
    };
    if changed {
        model.mark_edited();
    }
}

fn paste(model: &mut Model, text: &str) {
    if text.is_empty() {
        return;
    }
    if model.focus == Field::Body {
        if model.preview_mode {
            return;
        }
        let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
        if model.body.insert_str(&normalized) {
            model.scroll_to_cursor();
            model.mark_edited();
        }
        return;
    }
    for ch in text.chars().filter(|c| !matches!(c, '\n' | '\r')) {
        edit_focused(model, TextEdit::Insert(ch));
    }
}

fn move_cursor(model: &mut Model, direction: Direction) {
    match model.focus {
        Field::Body => {
            model.body.move_cursor(direction);
            model.scroll_to_cursor();
        }
        field => {
            let input = focused_line(model, field);
            match direction {
                Direction::Left => input.move_left(),
                Direction::Right => input.move_right(),
                Direction::Up | Direction::Down => {}
            }
        }
    }
}

fn add_tag(model: &mut Model) {
    let raw = model.tag_input.take();
    if model.tags.add(&raw) {
        model.mark_edited();
    }
}

fn focus_order(model: &Model) -> Vec<Field> {
    let mut order = vec![Field::Title, Field::Body];
    if model.settings_visible {
        order.extend([Field::Excerpt, Field::TagInput]);
    }
    order
}

fn cycle_focus(model: &mut Model, forward: bool) {
    let order = focus_order(model);
    let len = order.len();
    let idx = order.iter().position(|f| *f == model.focus).unwrap_or(0);
    let next = if forward {
        (idx + 1) % len
    } else {
        (idx + len - 1) % len
    };
    model.focus = order[next];
}
