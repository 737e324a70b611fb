use std::collections::HashMap;

use fbref_tables::config::{DEFAULT_BASE_URL, DEFAULT_USER_AGENT, ScrapeConfig};
use fbref_tables::merge::AlignmentPolicy;

fn config_from(vars: &[(&str, &str)]) -> ScrapeConfig {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    ScrapeConfig::from_vars(|key| vars.get(key).cloned())
}

#[test]
fn unset_vars_fall_back_to_defaults() {
    let config = config_from(&[]);
    assert_eq!(config.base_url, DEFAULT_BASE_URL);
    assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
    assert_eq!(config.timeout_secs, 30);
    assert_eq!(config.fetch_parallelism, 1);
    assert_eq!(config.alignment, AlignmentPolicy::Strict);
}

#[test]
fn numeric_vars_are_clamped() {
    let high = config_from(&[("FETCH_PARALLELISM", "64"), ("FBREF_TIMEOUT_SECS", "9000")]);
    assert_eq!(high.fetch_parallelism, 16);
    assert_eq!(high.timeout_secs, 300);

    let low = config_from(&[("FETCH_PARALLELISM", "0"), ("FBREF_TIMEOUT_SECS", "0")]);
    assert_eq!(low.fetch_parallelism, 1);
    assert_eq!(low.timeout_secs, 1);

    let garbage = config_from(&[("FETCH_PARALLELISM", "lots"), ("FBREF_TIMEOUT_SECS", " 45 ")]);
    assert_eq!(garbage.fetch_parallelism, 1);
    assert_eq!(garbage.timeout_secs, 45);
}

#[test]
fn alignment_policy_is_parsed() {
    assert_eq!(config_from(&[("FBREF_ALIGNMENT", " WARN ")]).alignment, AlignmentPolicy::Warn);
    assert_eq!(config_from(&[("FBREF_ALIGNMENT", "strict")]).alignment, AlignmentPolicy::Strict);
    assert_eq!(config_from(&[("FBREF_ALIGNMENT", "sometimes")]).alignment, AlignmentPolicy::Strict);
}

#[test]
fn base_url_loses_trailing_slash_and_blanks_are_ignored() {
    let config = config_from(&[
        ("FBREF_BASE_URL", " https://mirror.test/en/comps/ "),
        ("FBREF_USER_AGENT", "   "),
    ]);
    assert_eq!(config.base_url, "https://mirror.test/en/comps");
    assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
}
