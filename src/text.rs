use std::sync::LazyLock;

use regex::Regex;

static LOWER_UPPER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z])([A-Z])").expect("static regex"));
static SPACE_UNDERSCORE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s_]+").expect("static regex"));

/// Cut `s` to at most `len` characters, trimming trailing whitespace and appending `...`.
pub fn truncate(s: &str, len: usize) -> String {
    if s.chars().count() <= len {
        return s.to_owned();
    }
    let head: String = s.chars().take(len).collect();
    format!("{}...", head.trim())
}

/// `"myProject name_here"` -> `"my-project-name-here"`.
pub fn kebab_case(s: &str) -> String {
    let split = LOWER_UPPER.replace_all(s, "$1-$2");
    SPACE_UNDERSCORE.replace_all(&split, "-").to_lowercase()
}
