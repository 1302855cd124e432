use anyhow::{bail, Result};
use url::Url;

use crate::analysis::domain::{classify, extract_domain, DomainCategory};
use crate::analysis::keywords::find_keyword;
use crate::analysis::problem::normalize_identifier;
use crate::config::ScoringConfig;
use crate::models::{NavigationDetails, PageSnapshot, SuspicionResult, TabSwitchEvent};

/// Sentinel stored in `toUrl` when the user left the browser entirely.
pub const EXTERNAL_APPLICATION: &str = "external_application";

/// Running score and reason list for one event. Discarded after the call;
/// no state survives between events.
struct ScoreAccumulator {
    score: u32,
    reasons: Vec<String>,
}

impl ScoreAccumulator {
    fn new() -> Self {
        Self {
            score: 0,
            reasons: Vec::new(),
        }
    }

    fn add(&mut self, weight: u32, reason: impl Into<String>) {
        self.score += weight;
        self.reasons.push(reason.into());
    }
}

/// Guard applied before scoring: refuse records that are not tab-switch
/// events. The refusal is an error, reported distinctly from any scored
/// result (even a zero-score one).
pub fn analyze_event(event: &TabSwitchEvent, config: &ScoringConfig) -> Result<SuspicionResult> {
    match event.event_type.as_deref() {
        Some("tab_switch") => Ok(score_tab_switch(event, config)),
        Some(other) => bail!("Document is not a 'tab_switch' event (eventType: '{other}')"),
        None => bail!("Document is missing an eventType"),
    }
}

/// Score a single tab-switch event.
///
/// Pure function of the record and the configuration: no I/O, no shared
/// state, always returns a result. Rule order is fixed and significant —
/// it decides which mutually-exclusive branch fires and which reason text
/// is produced.
pub fn score_tab_switch(event: &TabSwitchEvent, config: &ScoringConfig) -> SuspicionResult {
    let mut acc = ScoreAccumulator::new();

    score_destination(&mut acc, event, config);
    score_origin(&mut acc, event, config);

    // Clamp exactly once, after every rule has accumulated.
    let final_score = acc.score.min(config.max_score);

    let mut reasons = acc.reasons;
    if reasons.is_empty() {
        if final_score == 0 {
            reasons.push("No suspicious activity detected in this switch.".to_string());
        } else {
            // A positive score must never go out without at least one reason.
            reasons.push("Suspicious activity detected based on scoring rules.".to_string());
        }
    }

    SuspicionResult {
        document_id: event.id.clone().unwrap_or_default(),
        username: event.username.clone().unwrap_or_else(|| "N/A".to_string()),
        problem_id: event
            .problem_id
            .clone()
            .unwrap_or_else(|| "N/A".to_string()),
        platform: event.platform_lower().unwrap_or_else(|| "N/A".to_string()),
        timestamp: event.timestamp_iso().unwrap_or_else(|| "N/A".to_string()),
        suspicion_score: final_score,
        reasons,
        details: NavigationDetails {
            from: PageSnapshot {
                url: event.from_url.clone(),
                title: event.from_title.clone(),
            },
            to: PageSnapshot {
                url: event.to_url.clone(),
                title: event.to_title.clone(),
            },
        },
    }
}

/// Destination rules: one priority chain, at most one branch fires.
fn score_destination(acc: &mut ScoreAccumulator, event: &TabSwitchEvent, config: &ScoringConfig) {
    if event.to_url == EXTERNAL_APPLICATION {
        acc.add(
            config.weights.to_external_application,
            "Switched to External Application (Intent unknown)",
        );
        return;
    }

    let Some(to_domain) = extract_domain(&event.to_url) else {
        return;
    };
    let to_text = combined_text(&event.to_url, &event.to_title);
    let platform_domain = event.platform_domain();

    match classify(&to_domain, platform_domain.as_deref(), config) {
        DomainCategory::AiAssistant => {
            acc.add(
                config.weights.to_ai,
                format!("Switched TO AI Domain: {to_domain}"),
            );
        }
        DomainCategory::Solution => {
            score_solution_domain(
                acc,
                event,
                config,
                &to_domain,
                platform_domain.as_deref(),
                &to_text,
            );
        }
        DomainCategory::SearchEngine => {
            acc.add(
                config.weights.to_search_engine,
                format!("Switched TO Search Engine: {to_domain}"),
            );
            // The current problem title counts as a relevant search term too.
            let mut search_keywords = config.suspicious_keywords.clone();
            if let Some(title) = event.problem_title.as_ref().filter(|t| !t.is_empty()) {
                search_keywords.insert(0, title.clone());
            }
            if let Some(keyword) = find_keyword(&to_text, &search_keywords) {
                acc.add(
                    1,
                    format!("  (Search URL/Title contains relevant keyword: '{keyword}')"),
                );
            }
        }
        DomainCategory::PlatformSelf | DomainCategory::Unclassified => {
            if let Some(keyword) = find_keyword(&to_text, &config.suspicious_keywords) {
                acc.add(
                    config.weights.to_suspicious_keyword_only,
                    format!(
                        "Switched TO URL/Title containing suspicious keyword: \
                         '{keyword}' in {to_domain}"
                    ),
                );
            }
        }
    }
}

/// Solution/discussion domains carry several sub-rules; they are evaluated
/// in priority order and at most one applies.
fn score_solution_domain(
    acc: &mut ScoreAccumulator,
    event: &TabSwitchEvent,
    config: &ScoringConfig,
    to_domain: &str,
    platform_domain: Option<&str>,
    to_text: &str,
) {
    let platform = event.platform_lower();
    let is_platform_self = platform_domain == Some(to_domain);

    // Same platform, but a different problem than the one in progress.
    if is_platform_self && is_different_problem(event, to_text, config) {
        acc.add(
            config.weights.within_platform_to_different_problem,
            format!(
                "Switched TO different problem page/URL on {}: {}",
                platform.as_deref().unwrap_or("N/A"),
                destination_label(event)
            ),
        );
        return;
    }

    // The platform's own discussion area.
    if is_platform_self
        && platform
            .as_deref()
            .is_some_and(|p| config.discussion_platforms.contains(p))
        && event
            .to_url
            .to_lowercase()
            .contains(&config.discussion_path_marker)
    {
        acc.add(
            config.weights.within_platform_to_discussion,
            format!(
                "Switched TO {} discussion forum: {}",
                platform.as_deref().unwrap_or("N/A"),
                destination_label(event)
            ),
        );
        return;
    }

    // A repository on a code-hosting domain, deeper than the domain root.
    if config.code_hosting_domains.contains(to_domain) && is_repository_path(&event.to_url) {
        acc.add(
            config.weights.to_github_repo,
            format!("Switched TO GitHub repository: {}", event.to_url),
        );
        if let Some(keyword) = find_keyword(to_text, &config.suspicious_keywords) {
            acc.add(
                1,
                format!("  (URL/Title also contains suspicious keyword: '{keyword}')"),
            );
        }
        return;
    }

    // Any solution domain whose URL or title carries a suspicious keyword.
    if let Some(keyword) = find_keyword(to_text, &config.suspicious_keywords) {
        acc.add(
            config.weights.to_solution_domain_with_keywords,
            format!("Switched TO Solution Domain ({to_domain}) with keyword: '{keyword}'"),
        );
        return;
    }

    // A known solution domain with no further evidence. Ordinary navigation
    // on the user's own platform is not penalized here.
    if !is_platform_self {
        acc.add(
            config.weights.to_solution_domain_generic,
            format!("Switched TO potential Solution Domain: {to_domain}"),
        );
    }
}

/// Origin rules: lower weight, evaluated independently of the destination.
fn score_origin(acc: &mut ScoreAccumulator, event: &TabSwitchEvent, config: &ScoringConfig) {
    let Some(from_domain) = extract_domain(&event.from_url) else {
        return;
    };

    if config.ai_domains.contains(&from_domain) {
        acc.add(
            config.weights.from_ai,
            format!("Switched FROM AI Domain: {from_domain}"),
        );
    } else if config.solution_domains.contains(&from_domain) {
        acc.add(
            config.weights.from_solution,
            format!("Switched FROM potential Solution Domain: {from_domain}"),
        );
    }
}

/// Does the destination point at a different problem than the one in
/// progress? Switches to problem lists, submissions, and similar
/// legitimate pages do not count.
fn is_different_problem(event: &TabSwitchEvent, to_text: &str, config: &ScoringConfig) -> bool {
    let current = event
        .problem_id
        .as_deref()
        .and_then(normalize_identifier)
        .or_else(|| {
            event
                .problem_title
                .as_deref()
                .and_then(normalize_identifier)
        });
    let Some(current) = current else {
        // No problem context; nothing can count as "different".
        return false;
    };

    let url_token = normalize_identifier(&event.to_url);
    let title_token = normalize_identifier(&event.to_title);
    let differs = url_token.is_some_and(|token| token != current)
        || title_token.is_some_and(|token| token != current);
    if !differs {
        return false;
    }

    find_keyword(to_text, &config.legitimate_platform_keywords).is_none()
}

/// A code-hosting URL whose path goes deeper than the domain root,
/// e.g. `/user/repo`.
fn is_repository_path(to_url: &str) -> bool {
    match Url::parse(to_url) {
        Ok(parsed) => parsed.path().split('/').count() > 2,
        Err(_) => false,
    }
}

fn combined_text(url: &str, title: &str) -> String {
    format!("{url} {title}").to_lowercase()
}

fn destination_label(event: &TabSwitchEvent) -> &str {
    if event.to_title.is_empty() {
        &event.to_url
    } else {
        &event.to_title
    }
}
