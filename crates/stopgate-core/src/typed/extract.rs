//! Locating a JSON object inside free-form model output.

const FENCE: &str = "```";

/// Find the JSON object a model embedded in its reply.
///
/// Checked in order: an object at the start of the input, the body of the
/// first fenced code block containing `{`, then the first balanced `{...}`
/// span. Prose after the object is dropped. Braces inside string literals
/// do not count.
pub fn extract_json_object(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    if trimmed.starts_with('{') {
        return Some(leading_object(trimmed));
    }

    if let Some(start) = raw.find(FENCE) {
        let after_fence = &raw[start + FENCE.len()..];
        let after_lang =
            after_fence.trim_start_matches(|c: char| c.is_alphanumeric() || c == '_' || c == '-');
        if let Some(end) = after_lang.find(FENCE) {
            let block = after_lang[..end].trim();
            if block.starts_with('{') {
                return Some(leading_object(block));
            }
            if let Some(obj) = balanced_object(block) {
                return Some(obj);
            }
        }
    }

    balanced_object(raw)
}

/// `text` starts with `{`. An unbalanced object is left for the parser to reject.
fn leading_object(text: &str) -> &str {
    balanced_object(text).unwrap_or(text)
}

fn balanced_object(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (idx, ch) in raw[start..].char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&raw[start..=start + idx]);
                }
            }
            _ => {}
        }
    }
    None
}
