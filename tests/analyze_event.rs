use serde_json::json;
use tabsentry::{analyze_event, score_tab_switch, ScoringConfig, TabSwitchEvent};

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn stored_document() -> serde_json::Value {
    json!({
        "_id": { "$oid": "65f2a1b4c3d9e8f7a6b5c4d3" },
        "username": "alice",
        "platform": "LeetCode",
        "problemId": "42",
        "problemTitle": "Trapping Rain Water",
        "timestamp": { "$date": { "$numberLong": "1700000000000" } },
        "eventType": "tab_switch",
        "fromUrl": "https://leetcode.com/problems/trapping-rain-water/",
        "fromTitle": "42. Trapping Rain Water",
        "toUrl": "https://chatgpt.com/chat",
        "toTitle": "ChatGPT"
    })
}

#[test]
fn scores_a_stored_document_end_to_end() {
    init();
    let event: TabSwitchEvent = serde_json::from_value(stored_document()).unwrap();
    let config = ScoringConfig::default();

    let result = analyze_event(&event, &config).unwrap();

    // AI destination (10) + solution-domain origin (1), clamped to 10.
    assert_eq!(result.suspicion_score, 10);
    assert_eq!(result.document_id, "65f2a1b4c3d9e8f7a6b5c4d3");
    assert_eq!(result.username, "alice");
    assert_eq!(result.platform, "leetcode");
    assert_eq!(result.timestamp, "2023-11-14T22:13:20Z");
    assert!(result.reasons[0].contains("chatgpt.com"));
    assert!(result.reasons[1].contains("leetcode.com"));
}

#[test]
fn serializes_with_the_contract_field_names() {
    init();
    let event: TabSwitchEvent = serde_json::from_value(stored_document()).unwrap();
    let config = ScoringConfig::default();

    let result = analyze_event(&event, &config).unwrap();
    let value = serde_json::to_value(&result).unwrap();

    assert!(value["document_id"].is_string());
    assert!(value["suspicion_score"].is_u64());
    assert!(value["reasons"].is_array());
    assert_eq!(value["details"]["to"]["url"], "https://chatgpt.com/chat");
    assert_eq!(value["details"]["from"]["title"], "42. Trapping Rain Water");
}

#[test]
fn refuses_records_of_another_event_type() {
    init();
    let mut document = stored_document();
    document["eventType"] = json!("paste");
    let event: TabSwitchEvent = serde_json::from_value(document).unwrap();

    let error = analyze_event(&event, &ScoringConfig::default()).unwrap_err();

    assert!(error.to_string().contains("tab_switch"));
}

#[test]
fn score_stays_within_bounds_and_reasons_stay_non_empty() {
    init();
    let config = ScoringConfig::default();
    let destinations = [
        ("", ""),
        ("external_application", ""),
        ("https://chatgpt.com/chat", "ChatGPT"),
        ("https://github.com/a/b", "solution repo"),
        ("https://www.google.com/search?q=answer", "answer - Search"),
        ("https://someblog.net/posts/9", "reading list"),
        ("not a url at all", "title"),
    ];

    for (to_url, to_title) in destinations {
        let event = TabSwitchEvent {
            event_type: Some("tab_switch".to_string()),
            from_url: "https://claude.ai/chat".to_string(),
            to_url: to_url.to_string(),
            to_title: to_title.to_string(),
            ..Default::default()
        };

        let result = score_tab_switch(&event, &config);

        assert!(result.suspicion_score <= config.max_score, "{to_url}");
        assert!(!result.reasons.is_empty(), "{to_url}");
    }
}

#[test]
fn minimal_config_substitutes_the_tables() {
    init();
    let config: ScoringConfig = serde_json::from_str(
        r#"{
            "aiDomains": ["assistant.test"],
            "solutionDomains": [],
            "searchDomains": [],
            "suspiciousKeywords": [],
            "weights": { "TO_AI": 2 },
            "maxScore": 3
        }"#,
    )
    .unwrap();

    let event = TabSwitchEvent {
        event_type: Some("tab_switch".to_string()),
        to_url: "https://assistant.test/session".to_string(),
        ..Default::default()
    };

    let result = analyze_event(&event, &config).unwrap();

    assert_eq!(result.suspicion_score, 2);
    assert!(result.reasons[0].contains("assistant.test"));
}
