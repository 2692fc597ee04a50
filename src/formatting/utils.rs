pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Pads or cuts `s` to exactly `width` display columns.
pub fn fit(s: &str, width: usize) -> String {
    format!("{:<width$}", truncate(s, width), width = width)
}
