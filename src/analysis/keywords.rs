use regex::Regex;

/// Find the first keyword present in `text`, in declaration order.
///
/// Matching is case-insensitive. Keywords of three characters or fewer
/// match as plain substrings; longer keywords match on word boundaries,
/// with a substring fallback so punctuation-adjacent occurrences are not
/// missed. Empty text never matches.
pub fn find_keyword(text: &str, keywords: &[String]) -> Option<String> {
    if text.is_empty() {
        return None;
    }

    let text_lower = text.to_lowercase();
    for keyword in keywords {
        let keyword_lower = keyword.to_lowercase();
        if keyword_lower.is_empty() {
            continue;
        }

        if keyword_lower.len() <= 3 {
            if text_lower.contains(&keyword_lower) {
                return Some(keyword.clone());
            }
            continue;
        }

        if word_boundary_match(&text_lower, &keyword_lower)
            || text_lower.contains(&keyword_lower)
        {
            return Some(keyword.clone());
        }
    }

    None
}

fn word_boundary_match(text: &str, keyword: &str) -> bool {
    let pattern = format!(r"\b{}\b", regex::escape(keyword));
    Regex::new(&pattern)
        .map(|re| re.is_match(text))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keywords(items: &[&str]) -> Vec<String> {
        items.iter().map(|item| item.to_string()).collect()
    }

    #[test]
    fn finds_whole_word_case_insensitively() {
        let result = find_keyword("Two Sum SOLUTION video", &keywords(&["solution"]));
        assert_eq!(result.as_deref(), Some("solution"));
    }

    #[test]
    fn declaration_order_decides_the_reported_keyword() {
        let result = find_keyword(
            "discussion of the solution",
            &keywords(&["solution", "discussion"]),
        );
        assert_eq!(result.as_deref(), Some("solution"));
    }

    #[test]
    fn short_keywords_match_as_substrings() {
        let result = find_keyword("openai api key", &keywords(&["ai"]));
        assert_eq!(result.as_deref(), Some("ai"));

        assert_eq!(find_keyword("nothing here", &keywords(&["gpt"])), None);
    }

    #[test]
    fn substring_fallback_catches_attached_occurrences() {
        // No word boundary around "solution" in "solutions", the fallback
        // still reports it.
        let result = find_keyword("leetcode-solutions repo", &keywords(&["solution"]));
        assert_eq!(result.as_deref(), Some("solution"));
    }

    #[test]
    fn hyphenated_text_still_has_word_boundaries() {
        let result = find_keyword("foo-solution-bar", &keywords(&["solution"]));
        assert_eq!(result.as_deref(), Some("solution"));
    }

    #[test]
    fn empty_text_never_matches() {
        assert_eq!(find_keyword("", &keywords(&["solution", "ai"])), None);
    }

    #[test]
    fn absent_keywords_yield_none() {
        assert_eq!(
            find_keyword("reading the problem statement", &keywords(&["cheat"])),
            None
        );
    }
}
