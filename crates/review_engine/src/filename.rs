/// Replaces each run of characters Windows forbids in file names with one `_`.
pub fn sanitize_filename(name: &str) -> String {
    let mut cleaned = String::with_capacity(name.len());
    let mut in_run = false;
    for c in name.chars() {
        if is_forbidden(c) {
            if !in_run {
                cleaned.push('_');
            }
            in_run = true;
        } else {
            cleaned.push(c);
            in_run = false;
        }
    }
    cleaned
}

/// `Review_<sanitized source>_<timestamp>.docx`; `timestamp` is `YYYYMMDD_HHMMSS`.
pub fn review_filename(source: &str, timestamp: &str) -> String {
    format!("Review_{}_{timestamp}.docx", sanitize_filename(source))
}

fn is_forbidden(c: char) -> bool {
    matches!(c, '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|')
}
