//! Variable substitution engine for templates

use std::collections::BTreeSet;

/// Output of a single substitution pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substituted {
    pub text: String,
    /// Placeholders that had no matching variable, in order of appearance
    pub unresolved: Vec<String>,
}

/// Collect the names of all {{variable}} placeholders in a template string
pub fn placeholders(template: &str) -> BTreeSet<String> {
    let mut names = BTreeSet::new();
    let mut rest = template;

    while let Some((name, after)) = next_placeholder(rest) {
        if let Some(name) = name {
            names.insert(name.to_string());
        }
        rest = after;
    }

    names
}

/// Substitute {{variable}} placeholders in a string.
///
/// Values inserted from `variables` are never re-scanned, so a value that
/// itself contains braces cannot be mistaken for a placeholder.
pub fn substitute_string(
    template: &str,
    variables: &serde_json::Map<String, serde_json::Value>,
) -> Substituted {
    let mut text = String::with_capacity(template.len());
    let mut unresolved = Vec::new();
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        text.push_str(&rest[..start]);
        match next_placeholder(&rest[start..]) {
            Some((Some(name), after)) => {
                let token = &rest[start..rest.len() - after.len()];
                match variables.get(name) {
                    Some(value) => text.push_str(&value_to_string(value)),
                    None => {
                        unresolved.push(name.to_string());
                        text.push_str(token);
                    }
                }
                rest = after;
            }
            Some((None, after)) => {
                text.push_str(&rest[start..rest.len() - after.len()]);
                rest = after;
            }
            None => {
                text.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    text.push_str(rest);

    Substituted { text, unresolved }
}

/// Find the next `{{...}}` token. Returns the placeholder name when the inner
/// text is a valid identifier, and the remainder after the token.
fn next_placeholder(input: &str) -> Option<(Option<&str>, &str)> {
    let start = input.find("{{")?;
    let body = &input[start + 2..];
    let end = body.find("}}")?;
    let name = body[..end].trim();
    let after = &body[end + 2..];

    let valid = !name.is_empty() && name.chars().all(|c| c.is_alphanumeric() || c == '_');
    Some((valid.then_some(name), after))
}

fn value_to_string(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Null => String::new(),
        // For arrays and objects, use JSON representation
        _ => value.to_string(),
    }
}
