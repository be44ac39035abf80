//! Live preview rendering for the post body.
//!
//! This is a chain of regex substitutions, not a markdown parser. Each rule
//! runs over the whole output of the previous rule, so rule order decides
//! how overlapping markers come out:
//!
//! 1. `### `, `## `, `# ` line prefixes become `<h3>`, `<h2>`, `<h1>`
//! 2. `**bold**`
//! 3. `*italic*`
//! 4. `` `inline code` ``
//! 5. triple-backtick fences
//! 6. remaining newlines become `<br>`
//!
//! `\r` ends a line just like `\n`, so CRLF text keeps the carriage
//! return outside the generated tags.
//!
//! Nothing is escaped. The output is raw markup and must only be produced
//! from trusted input.

use std::sync::LazyLock;

use regex::Regex;

/// Shown in the preview pane when the body renders to nothing.
pub const EMPTY_PREVIEW: &str = "<p>No content yet</p>";

struct Rule {
    pattern: Regex,
    replacement: &'static str,
}

impl Rule {
    fn new(pattern: &str, replacement: &'static str) -> Self {
        Self {
            pattern: Regex::new(pattern).expect("preview rule patterns are valid"),
            replacement,
        }
    }
}

static RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    vec![
        Rule::new(r"(?mR)^### (.*)$", "<h3>${1}</h3>"),
        Rule::new(r"(?mR)^## (.*)$", "<h2>${1}</h2>"),
        Rule::new(r"(?mR)^# (.*)$", "<h1>${1}</h1>"),
        Rule::new(r"(?R)\*\*(.*?)\*\*", "<strong>${1}</strong>"),
        Rule::new(r"(?R)\*(.*?)\*", "<em>${1}</em>"),
        Rule::new(r"(?R)`(.*?)`", "<code>${1}</code>"),
        Rule::new(r"(?s)```(.*?)```", "<pre><code>${1}</code></pre>"),
    ]
});

/// Render markdown-flavored text to HTML.
///
/// Never fails; text without markers comes back unchanged apart from
/// newlines turning into `<br>`.
pub fn render(markdown: &str) -> String {
    let mut html = markdown.to_string();
    for rule in RULES.iter() {
        html = rule.pattern.replace_all(&html, rule.replacement).into_owned();
    }
    html.replace('\n', "<br>")
}

/// Render for the preview pane, falling back to a placeholder paragraph.
pub fn render_preview(markdown: &str) -> String {
    let html = render(markdown);
    if html.is_empty() {
        EMPTY_PREVIEW.to_string()
    } else {
        html
    }
}

/// Body counters shown in the editor footer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentStats {
    pub chars: usize,
    pub lines: usize,
}

impl ContentStats {
    pub fn of(content: &str) -> Self {
        Self {
            chars: content.chars().count(),
            lines: content.split('\n').count(),
        }
    }
}
