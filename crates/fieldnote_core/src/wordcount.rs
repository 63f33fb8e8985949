//! Word counting with CJK/Latin-aware semantics.
//!
//! # Responsibility
//! - Map note content to a deterministic word count.
//!
//! # Invariants
//! - Pure function: no I/O, no locale dependency beyond fixed Unicode ranges.
//! - CJK text counts one word per character; Latin-style text counts
//!   whitespace-delimited tokens.

use once_cell::sync::Lazy;
use regex::Regex;

// CJK Unified Ideographs, Extension A, and Compatibility Ideographs.
static CJK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[\x{4e00}-\x{9fff}\x{3400}-\x{4dbf}\x{f900}-\x{faff}]")
        .expect("valid CJK character class")
});

/// Counts words in note content.
///
/// CJK scripts carry no token-separating spaces, so each CJK character is one
/// word. The remaining text is counted as whitespace-delimited tokens, robust
/// to runs of consecutive spaces. The two counts are additive for
/// mixed-script content.
pub fn calculate_word_count(content: &str) -> u32 {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return 0;
    }

    let cjk_count = CJK_RE.find_iter(trimmed).count();

    let non_cjk = CJK_RE.replace_all(trimmed, " ");
    let token_count = non_cjk.split_whitespace().count();

    (cjk_count + token_count) as u32
}

#[cfg(test)]
mod tests {
    use super::calculate_word_count;

    #[test]
    fn empty_and_whitespace_only_count_zero() {
        assert_eq!(calculate_word_count(""), 0);
        assert_eq!(calculate_word_count("   "), 0);
        assert_eq!(calculate_word_count("\n\t "), 0);
    }

    #[test]
    fn single_character_counts_one() {
        assert_eq!(calculate_word_count("A"), 1);
        assert_eq!(calculate_word_count("你"), 1);
    }

    #[test]
    fn latin_tokens_split_on_whitespace_runs() {
        assert_eq!(calculate_word_count("hello world"), 2);
        assert_eq!(calculate_word_count("hello   world"), 2);
        assert_eq!(calculate_word_count("  hello world  "), 2);
    }

    #[test]
    fn cjk_counts_per_character() {
        assert_eq!(calculate_word_count("你好世界"), 4);
        assert_eq!(calculate_word_count("这是一条测试笔记"), 8);
    }

    #[test]
    fn mixed_scripts_count_additively() {
        assert_eq!(calculate_word_count("Hello 你好 World 世界"), 6);
        // Adjacent scripts with no separating space still split correctly.
        assert_eq!(calculate_word_count("rust笔记"), 3);
    }

    #[test]
    fn extension_a_and_compatibility_ranges_are_cjk() {
        // U+3400 (Extension A) and U+F900 (Compatibility Ideographs).
        assert_eq!(calculate_word_count("\u{3400}\u{f900}"), 2);
    }
}
