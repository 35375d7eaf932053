//! Slug derivation for content items
//!
//! A slug is the URL-safe, human-readable token shown in item detail URLs.
//! Derivation is deterministic so the same title always yields the same base
//! slug; uniqueness against the store is resolved separately in
//! [`crate::db::items`].

/// Derive a slug token from free-form text.
///
/// Lowercases the input, turns runs of whitespace into single hyphens, strips
/// everything that is not a word character (`[a-z0-9_]`) or hyphen, collapses
/// hyphen runs, and trims leading/trailing hyphens.
///
/// Total and pure: any input (including empty) yields a token, possibly the
/// empty string. Idempotent on its own output.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for ch in text.to_lowercase().chars() {
        if ch.is_whitespace() || ch == '-' {
            // Collapse separator runs and drop leading separators
            if !slug.is_empty() && !slug.ends_with('-') {
                slug.push('-');
            }
        } else if ch.is_ascii_alphanumeric() || ch == '_' {
            slug.push(ch);
        }
    }
    slug.trim_end_matches('-').to_string()
}

/// Append a collision counter to a base slug.
///
/// The first collision yields `base-1`, the second `base-2`, and so on.
pub fn suffixed(base: &str, counter: u32) -> String {
    format!("{}-{}", base, counter)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_punctuation_and_lowercases() {
        assert_eq!(slugify("Spicy Thai Curry!!"), "spicy-thai-curry");
    }

    #[test]
    fn test_collapses_and_trims_hyphens() {
        assert_eq!(slugify("  ---Hello---World---  "), "hello-world");
    }

    #[test]
    fn test_whitespace_runs_become_single_hyphen() {
        assert_eq!(slugify("Pad \t  See  Ew"), "pad-see-ew");
    }

    #[test]
    fn test_word_characters_survive() {
        assert_eq!(slugify("cafe_44 downtown"), "cafe_44-downtown");
    }

    #[test]
    fn test_empty_and_symbol_only_input() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("!!! ???"), "");
    }

    #[test]
    fn test_idempotent_on_own_output() {
        for input in ["Spicy Thai Curry!!", "  ---Hello---World---  ", "Crème Brûlée", ""] {
            let once = slugify(input);
            assert_eq!(slugify(&once), once, "not idempotent for {:?}", input);
        }
    }

    #[test]
    fn test_suffixed() {
        assert_eq!(suffixed("spicy-thai-curry", 1), "spicy-thai-curry-1");
        assert_eq!(suffixed("spicy-thai-curry", 12), "spicy-thai-curry-12");
    }
}
