// Helpers for the HTML pages: template loading, phrase substitution and
// formatting of user-supplied values.
use std::fs;
use std::path::Path;
use crate::errors::{AppError, AppResult};
use crate::i18n::{translate, Language};

const PHRASE_OPEN: &str = "{{t:";
const PLACEHOLDER_OPEN: &str = "{{";
const MARKER_CLOSE: &str = "}}";

pub fn load_template(templates_dir: &str, name: &str) -> AppResult<String> {
    let path = Path::new(templates_dir).join(name);
    fs::read_to_string(&path).map_err(|e| {
        tracing::error!("Failed to read template {}: {}", path.display(), e);
        AppError::File(e)
    })
}

/// Replaces every `{{t:Some Phrase}}` marker with its translation
pub fn localize(template: &str, language: Language) -> String {
    let mut output = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find(PHRASE_OPEN) {
        let after_open = &rest[start + PHRASE_OPEN.len()..];
        let Some(end) = after_open.find(MARKER_CLOSE) else {
            break;
        };

        output.push_str(&rest[..start]);
        output.push_str(&escape_html(translate(language, &after_open[..end])));
        rest = &after_open[end + MARKER_CLOSE.len()..];
    }

    output.push_str(rest);
    output
}

/// Fills `{{name}}` placeholders in a single pass over the template.
///
/// Values are inserted as given and never scanned again, so user text that
/// looks like a placeholder stays literal. Unknown names are left in place.
pub fn fill(template: &str, vars: &[(&str, String)]) -> String {
    let mut output = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find(PLACEHOLDER_OPEN) {
        let after_open = &rest[start + PLACEHOLDER_OPEN.len()..];
        let Some(end) = after_open.find(MARKER_CLOSE) else {
            break;
        };

        let name = &after_open[..end];
        let marker_len = PLACEHOLDER_OPEN.len() + end + MARKER_CLOSE.len();
        output.push_str(&rest[..start]);
        match vars.iter().find(|(var, _)| *var == name) {
            Some((_, value)) => output.push_str(value),
            None => output.push_str(&rest[start..start + marker_len]),
        }
        rest = &rest[start + marker_len..];
    }

    output.push_str(rest);
    output
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

pub fn format_currency(symbol: &str, amount: f64) -> String {
    format!("{}{:.2}", symbol, amount)
}
