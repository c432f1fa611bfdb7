/// Replacement token for a character that is unsafe in file names or
/// encoder metadata fields
fn replacement(c: char) -> Option<&'static str> {
    match c {
        '/' => Some("(slash)"),
        '<' => Some("(lthan)"),
        '>' => Some("(gthan)"),
        ':' => Some("(colon)"),
        '"' => Some("(dubquote)"),
        '\\' => Some("(bslash)"),
        '|' => Some("(pipe)"),
        '?' => Some("(qmark)"),
        '*' => Some("(asterisk)"),
        _ => None,
    }
}

/// Escape filesystem-unsafe characters with bracketed tokens
///
/// Works in a single pass over the input, so a token is never rescanned.
pub fn sanitize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match replacement(c) {
            Some(token) => out.push_str(token),
            None => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_slash_and_colon() {
        assert_eq!(sanitize("A/B:C"), "A(slash)B(colon)C");
    }

    #[test]
    fn test_sanitize_full_mapping() {
        assert_eq!(
            sanitize(r#"/<>:"\|?*"#),
            "(slash)(lthan)(gthan)(colon)(dubquote)(bslash)(pipe)(qmark)(asterisk)"
        );
    }

    #[test]
    fn test_sanitize_leaves_safe_text_alone() {
        assert_eq!(sanitize("Sigur Rós - ( )"), "Sigur Rós - ( )");
        assert_eq!(sanitize(""), "");
    }
}
