use url::Url;

use crate::config::ScoringConfig;

/// Extract the normalized domain from a URL string.
///
/// Only `http://` and `https://` URLs are parsed; anything else (empty
/// input, the external-application sentinel, other schemes) yields `None`.
/// A leading `www.` is stripped and the host lower-cased.
pub fn extract_domain(url: &str) -> Option<String> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return None;
    }

    match Url::parse(url) {
        Ok(parsed) => parsed.host_str().map(|host| {
            let host = host.strip_prefix("www.").unwrap_or(host);
            host.to_lowercase()
        }),
        Err(err) => {
            log::warn!("[domain] could not parse URL {url}: {err}");
            None
        }
    }
}

/// Category a destination or origin domain falls into. Exactly one applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomainCategory {
    AiAssistant,
    Solution,
    SearchEngine,
    PlatformSelf,
    Unclassified,
}

impl DomainCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            DomainCategory::AiAssistant => "ai_assistant",
            DomainCategory::Solution => "solution",
            DomainCategory::SearchEngine => "search_engine",
            DomainCategory::PlatformSelf => "platform_self",
            DomainCategory::Unclassified => "unclassified",
        }
    }
}

/// Categorize a domain against the configured tables.
///
/// The configured sets take priority; a domain only counts as
/// platform-self when no set claims it.
pub fn classify(
    domain: &str,
    platform_domain: Option<&str>,
    config: &ScoringConfig,
) -> DomainCategory {
    if config.ai_domains.contains(domain) {
        DomainCategory::AiAssistant
    } else if config.solution_domains.contains(domain) {
        DomainCategory::Solution
    } else if config.search_domains.contains(domain) {
        DomainCategory::SearchEngine
    } else if platform_domain == Some(domain) {
        DomainCategory::PlatformSelf
    } else {
        DomainCategory::Unclassified
    }
}
