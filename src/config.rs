use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Weight added by each suspicion rule. Serialized keys match the rule
/// names used in override files (`TO_AI`, `FROM_SOLUTION`, ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", default)]
pub struct ScoreWeights {
    pub to_ai: u32,
    pub to_solution_domain_with_keywords: u32,
    pub to_solution_domain_generic: u32,
    pub to_github_repo: u32,
    pub to_search_engine: u32,
    pub to_external_application: u32,
    pub to_suspicious_keyword_only: u32,
    pub from_ai: u32,
    pub from_solution: u32,
    pub within_platform_to_different_problem: u32,
    pub within_platform_to_discussion: u32,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            to_ai: 10,
            to_solution_domain_with_keywords: 8,
            to_solution_domain_generic: 5,
            to_github_repo: 6,
            to_search_engine: 4,
            to_external_application: 5,
            to_suspicious_keyword_only: 3,
            from_ai: 1,
            from_solution: 1,
            within_platform_to_different_problem: 4,
            within_platform_to_discussion: 6,
        }
    }
}

/// Domain tables, keyword lists, and weights for the scoring engine.
///
/// Injected into every scoring call so tests can substitute minimal sets.
/// Keyword lists are ordered; the first match wins and is the keyword
/// reported in the reason string.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScoringConfig {
    /// Domains hosting generative-AI chat or code-completion products.
    pub ai_domains: HashSet<String>,
    /// Domains hosting programming Q&A, tutorials, or hosted source code.
    pub solution_domains: HashSet<String>,
    /// General-purpose search engines.
    pub search_domains: HashSet<String>,
    /// Domains where path depth past the root indicates a repository.
    pub code_hosting_domains: HashSet<String>,
    /// Platforms whose sites carry a discussion area under
    /// `discussion_path_marker`.
    pub discussion_platforms: HashSet<String>,
    pub discussion_path_marker: String,
    pub suspicious_keywords: Vec<String>,
    /// Keywords marking ordinary navigation within the user's own platform
    /// (problem lists, submissions, contests, ...).
    pub legitimate_platform_keywords: Vec<String>,
    pub weights: ScoreWeights,
    /// Cap applied once, after all rules have accumulated.
    pub max_score: u32,
}

const AI_DOMAINS: &[&str] = &[
    "openai.com",
    "chatgpt.com",
    "claude.ai",
    "anthropic.com",
    "gemini.google.com",
    "bard.google.com",
    "perplexity.ai",
    "blackbox.ai",
    "phind.com",
];

const SOLUTION_DOMAINS: &[&str] = &[
    "stackoverflow.com",
    "github.com",
    "geeksforgeeks.org",
    "leetcode.com",
    "medium.com",
    "dev.to",
    "tutorialspoint.com",
    "w3schools.com",
    "programiz.com",
    "chegg.com",
    "coursehero.com",
];

const SEARCH_DOMAINS: &[&str] = &[
    "google.com",
    "bing.com",
    "duckduckgo.com",
    "yahoo.com",
    "baidu.com",
    "yandex.com",
];

const SUSPICIOUS_KEYWORDS: &[&str] = &[
    "solution",
    "answer",
    "code",
    "solve",
    "cheat",
    "hack",
    "discussion",
    "discuss",
    "forum",
    "community",
    "tutorial",
    "guide",
    "example",
    "reference",
    "pastebin",
    "jsfiddle",
    "codepen",
    "gpt",
    "claude",
    "gemini",
    "bard",
    "ai",
    "llm",
    "translate",
];

const LEGITIMATE_PLATFORM_KEYWORDS: &[&str] = &[
    "problems",
    "problemset",
    "list",
    "submissions",
    "contest",
    "profile",
    "explore",
    "ranking",
    "editorial",
];

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            ai_domains: string_set(AI_DOMAINS),
            solution_domains: string_set(SOLUTION_DOMAINS),
            search_domains: string_set(SEARCH_DOMAINS),
            code_hosting_domains: string_set(&["github.com"]),
            discussion_platforms: string_set(&["leetcode"]),
            discussion_path_marker: "/discuss/".to_string(),
            suspicious_keywords: string_list(SUSPICIOUS_KEYWORDS),
            legitimate_platform_keywords: string_list(LEGITIMATE_PLATFORM_KEYWORDS),
            weights: ScoreWeights::default(),
            max_score: 10,
        }
    }
}

impl ScoringConfig {
    /// Load configuration overrides from a JSON file.
    ///
    /// A missing file yields the built-in tables. Every field carries a
    /// default, so an override file only needs the entries it changes.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read scoring config from {}", path.display()))?;
        let config = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse scoring config at {}", path.display()))?;
        Ok(config)
    }
}

fn string_set(items: &[&str]) -> HashSet<String> {
    items.iter().map(|item| item.to_string()).collect()
}

fn string_list(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_tables_cover_known_domains() {
        let config = ScoringConfig::default();

        assert!(config.ai_domains.contains("chatgpt.com"));
        assert!(config.solution_domains.contains("stackoverflow.com"));
        assert!(config.search_domains.contains("google.com"));
        assert!(config.code_hosting_domains.contains("github.com"));
        assert_eq!(config.max_score, 10);
        assert_eq!(config.weights.to_ai, 10);
        assert_eq!(config.weights.from_solution, 1);
    }

    #[test]
    fn suspicious_keywords_keep_declaration_order() {
        let config = ScoringConfig::default();

        assert_eq!(config.suspicious_keywords[0], "solution");
        assert_eq!(config.suspicious_keywords.last().unwrap(), "translate");
    }

    #[test]
    fn partial_override_keeps_remaining_defaults() {
        let config: ScoringConfig = serde_json::from_str(
            r#"{ "maxScore": 5, "weights": { "TO_AI": 3 } }"#,
        )
        .unwrap();

        assert_eq!(config.max_score, 5);
        assert_eq!(config.weights.to_ai, 3);
        assert_eq!(config.weights.to_search_engine, 4);
        assert!(config.ai_domains.contains("claude.ai"));
    }

    #[test]
    fn weight_keys_serialize_as_rule_names() {
        let json = serde_json::to_value(ScoreWeights::default()).unwrap();

        assert_eq!(json["TO_AI"], 10);
        assert_eq!(json["WITHIN_PLATFORM_TO_DISCUSSION"], 6);
    }

    #[test]
    fn load_falls_back_to_defaults_for_missing_file() {
        let config = ScoringConfig::load("/nonexistent/scoring.json").unwrap();

        assert_eq!(config.max_score, 10);
    }
}
