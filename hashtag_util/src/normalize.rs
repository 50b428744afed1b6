/// The character that starts a hashtag token.
pub const HASHTAG_MARKER: char = '#';

/// Normalize a search term typed by the user: lowercase it and keep only ASCII letters and digits.
/// Whitespace and punctuation are dropped, so the result always matches `[a-z0-9]*`.
pub fn normalize_search_term(input: &str) -> String {
    input
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect()
}

/// Turn an already normalized term into the hashtag used for querying, e.g. `rust` -> `#rust`.
pub fn to_hashtag(term: &str) -> String {
    format!("{}{}", HASHTAG_MARKER, term)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_search_term() {
        assert_eq!(normalize_search_term("March Madness 2021!"), "marchmadness2021");
        assert_eq!(normalize_search_term("  #Rust\tLang\n"), "rustlang");
        assert_eq!(normalize_search_term("!!! ???"), "");
        assert_eq!(normalize_search_term("café"), "caf");
    }

    #[test]
    fn test_normalized_term_charset() {
        let term = normalize_search_term("Ünïcode & Sp3cial_chars-ÀÉ ok");
        assert!(term.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
        assert_eq!(term, "ncodesp3cialcharsok");
    }

    #[test]
    fn test_to_hashtag() {
        assert_eq!(to_hashtag(&normalize_search_term("Go Blue")), "#goblue");
    }
}
