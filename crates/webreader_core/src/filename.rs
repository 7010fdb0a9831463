/// Longest sanitized title, in characters, before the extension.
pub const MAX_TITLE_CHARS: usize = 50;
const TRUNCATED_TITLE_CHARS: usize = 47;
const ELLIPSIS: &str = "...";
const EXTENSION: &str = ".md";

/// Filesystem-safe `{sanitized_title}.md`.
pub fn markdown_filename(title: &str) -> String {
    format!("{}{EXTENSION}", sanitize_title(title))
}

/// Replace characters that are illegal on common filesystems and bound the
/// result to [`MAX_TITLE_CHARS`] characters.
pub fn sanitize_title(input: &str) -> String {
    let cleaned: String = input
        .chars()
        .map(|c| if is_forbidden(c) { '_' } else { c })
        .collect();

    // Collapse multiple underscores
    let mut compacted = String::with_capacity(cleaned.len());
    let mut prev_underscore = false;
    for c in cleaned.chars() {
        if c == '_' && prev_underscore {
            continue;
        }
        prev_underscore = c == '_';
        compacted.push(c);
    }

    let mut name = compacted.trim_matches(&['_', ' ', '.'][..]).to_string();
    if name.is_empty() {
        name = "untitled".to_string();
    }
    if is_reserved_windows_name(&name) {
        name.push('_');
    }

    if name.chars().count() > MAX_TITLE_CHARS {
        let mut truncated: String = name.chars().take(TRUNCATED_TITLE_CHARS).collect();
        truncated.push_str(ELLIPSIS);
        name = truncated;
    }
    name
}

fn is_forbidden(c: char) -> bool {
    matches!(c,
        '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '\0'..='\u{1F}' | '\u{7F}'
    )
}

fn is_reserved_windows_name(name: &str) -> bool {
    const RESERVED: &[&str] = &[
        "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
        "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
    ];
    RESERVED.iter().any(|r| r.eq_ignore_ascii_case(name))
}
