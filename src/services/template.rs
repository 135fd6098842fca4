use regex::{Captures, Regex};
use std::collections::HashMap;
use std::sync::OnceLock;

/// Placeholder name -> already-serialized value.
pub type TemplateVars<'a> = HashMap<&'a str, String>;

fn placeholder_pattern() -> &'static Regex {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER.get_or_init(|| {
        Regex::new(r"\{([A-Za-z0-9_]+)\}").expect("placeholder pattern is valid")
    })
}

/// Substitute every `{name}` placeholder that has a value in `vars`.
///
/// Single left-to-right pass: substituted values are never re-scanned, and
/// placeholders without a value are left as they are. Braces that do not
/// enclose an identifier (JSON examples inside prompts) pass through.
pub fn render_template(template: &str, vars: &TemplateVars<'_>) -> String {
    placeholder_pattern()
        .replace_all(template, |caps: &Captures<'_>| match vars.get(&caps[1]) {
            Some(value) => value.clone(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

/// Distinct placeholder names referenced by a template, in first-seen order.
pub fn template_placeholders(template: &str) -> Vec<&str> {
    let mut names: Vec<&str> = Vec::new();
    for caps in placeholder_pattern().captures_iter(template) {
        if let Some(name) = caps.get(1).map(|m| m.as_str()) {
            if !names.contains(&name) {
                names.push(name);
            }
        }
    }
    names
}
