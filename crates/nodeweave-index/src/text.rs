use std::collections::BTreeSet;

/// Tokens shorter than this are dropped.
pub const MIN_TOKEN_CHARS: usize = 3;

/// Lowercase ASCII letters and digits plus the Latin-1 accented letters.
fn is_token_char(c: char) -> bool {
    c.is_ascii_lowercase()
        || c.is_ascii_digit()
        || (('\u{e0}'..='\u{ff}').contains(&c) && c != '\u{f7}')
}

/// Keyword set of a node's title and content.
///
/// Text is lowercased, every character that is neither a token character
/// nor whitespace is stripped, and the remainder is split on whitespace.
pub fn tokenize(title: &str, content: &str) -> BTreeSet<String> {
    let mut text = String::with_capacity(title.len() + content.len() + 1);
    text.push_str(title);
    text.push(' ');
    text.push_str(content);

    let cleaned: String = text
        .to_lowercase()
        .chars()
        .filter(|&c| is_token_char(c) || c.is_whitespace())
        .collect();

    cleaned
        .split_whitespace()
        .filter(|token| token.chars().count() >= MIN_TOKEN_CHARS)
        .map(str::to_string)
        .collect()
}

/// Case-insensitive, trimmed tag set. Blank tags are ignored.
pub fn normalize_tags<S: AsRef<str>>(tags: &[S]) -> BTreeSet<String> {
    tags.iter()
        .map(|tag| tag.as_ref().trim().to_lowercase())
        .filter(|tag| !tag.is_empty())
        .collect()
}

/// `|a ∩ b| / |a ∪ b|`, defined as 0 when either side is empty.
pub fn jaccard<T: Ord>(a: &BTreeSet<T>, b: &BTreeSet<T>) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let inter = a.intersection(b).count();
    if inter == 0 {
        return 0.0;
    }
    let union = a.len() + b.len() - inter;
    inter as f64 / union as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_tokenize_strips_punctuation_and_short_tokens() {
        let tokens = tokenize("Q1 Research: plan!", "we'll review the café menu, ok?");
        assert_eq!(
            tokens,
            set(&["research", "plan", "well", "review", "the", "café", "menu"])
        );
    }

    #[test]
    fn test_tokenize_keeps_digits() {
        let tokens = tokenize("Release 2024", "");
        assert!(tokens.contains("2024"));
        assert!(tokens.contains("release"));
    }

    #[test]
    fn test_normalize_tags_is_case_insensitive() {
        let tags = normalize_tags(&["Research", " research ", "", "Q1"]);
        assert_eq!(tags, set(&["research", "q1"]));
    }

    #[test]
    fn test_jaccard_edge_values() {
        assert_eq!(jaccard(&set(&["a", "b"]), &set(&["a", "b"])), 1.0);
        assert_eq!(jaccard(&set(&["a"]), &set(&["b"])), 0.0);
        assert_eq!(jaccard(&set(&[]), &set(&[])), 0.0);
        assert_eq!(jaccard(&set(&["a", "b"]), &set(&["b", "c"])), 1.0 / 3.0);
    }

    proptest! {
        #[test]
        fn prop_jaccard_is_bounded_and_symmetric(
            a in proptest::collection::btree_set("[a-e]{1,2}", 0..8),
            b in proptest::collection::btree_set("[a-e]{1,2}", 0..8),
        ) {
            let ab = jaccard(&a, &b);
            let ba = jaccard(&b, &a);
            prop_assert!((0.0..=1.0).contains(&ab));
            prop_assert_eq!(ab, ba);
            if !a.is_empty() {
                prop_assert_eq!(jaccard(&a, &a), 1.0);
            }
        }
    }
}
