//! Error containment and fallback behavior of the description client

use openlens_llm::{DescribeConfig, Describer, DescriptionSource, PLACEHOLDER_API_KEY};

#[tokio::test]
async fn live_failure_becomes_an_error_result_not_a_panic() {
    // A plaintext base URL is rejected inside the provider before any
    // socket is opened, so this exercises the failure path offline.
    let config = DescribeConfig {
        api_key: Some("sk-test-key".to_string()),
        base_url: "http://127.0.0.1:9".to_string(),
        ..Default::default()
    };
    let describer = Describer::new(config);

    let result = describer.describe("prompt", "cat").await;
    assert_eq!(result.source, DescriptionSource::Error);
    assert!(result.text.starts_with("Error generating text: "));
    assert!(!result.text.trim().is_empty());
}

#[tokio::test]
async fn no_credential_is_fallback_not_error() {
    let describer = Describer::new(DescribeConfig::default());
    let result = describer.describe("prompt", "cat").await;

    assert_eq!(result.source, DescriptionSource::Fallback);
    assert_ne!(result.source, DescriptionSource::Error);
    assert!(result.text.contains("dummy response"));
}

#[tokio::test]
async fn placeholder_credential_is_treated_as_absent() {
    let config = DescribeConfig {
        api_key: Some(PLACEHOLDER_API_KEY.to_string()),
        ..Default::default()
    };
    let describer = Describer::new(config);
    assert!(!describer.is_live());

    let result = describer.describe("prompt", "dog").await;
    assert_eq!(result.source, DescriptionSource::Fallback);
}

#[tokio::test]
async fn fallback_is_deterministic_across_calls() {
    let describer = Describer::new(DescribeConfig::default());
    let first = describer.describe("prompt", "person, dog").await;
    let second = describer.describe("prompt", "person, dog").await;

    assert_eq!(first.text, second.text);
    assert_eq!(first.source, second.source);
}

#[tokio::test]
async fn the_three_sources_are_distinguishable() {
    let fallback = Describer::new(DescribeConfig::default())
        .describe("prompt", "cat")
        .await;

    let error = Describer::new(DescribeConfig {
        api_key: Some("sk-test-key".to_string()),
        base_url: "http://127.0.0.1:9".to_string(),
        ..Default::default()
    })
    .describe("prompt", "cat")
    .await;

    assert_eq!(fallback.source, DescriptionSource::Fallback);
    assert_eq!(error.source, DescriptionSource::Error);
    assert_ne!(fallback.source, error.source);
}
