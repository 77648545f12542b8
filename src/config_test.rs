use super::*;
use std::collections::HashMap;

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
    move |key| map.get(key).cloned()
}

#[test]
fn defaults_to_development_preset() {
    let cfg = AppConfig::from_lookup(lookup(&[])).unwrap();
    assert_eq!(cfg.deployment, Deployment::Development);
    assert_eq!(cfg.api_url, DEV_API_URL);
    assert_eq!(cfg.api_timeout, Duration::from_millis(10_000));
    assert_eq!(cfg.max_retry_attempts, 1);
    assert!(cfg.enable_logging);
    assert!(!cfg.production);
    assert_eq!(cfg, AppConfig::default());
}

#[test]
fn production_preset_disables_logging() {
    let cfg = AppConfig::from_lookup(lookup(&[("SACCO_ENV", "production")])).unwrap();
    assert_eq!(cfg.api_url, HOSTED_API_URL);
    assert_eq!(cfg.api_timeout, Duration::from_millis(30_000));
    assert_eq!(cfg.max_retry_attempts, 2);
    assert!(!cfg.enable_logging);
    assert!(cfg.production);
}

#[test]
fn staging_preset_keeps_logging() {
    let cfg = AppConfig::from_lookup(lookup(&[("SACCO_ENV", "staging")])).unwrap();
    assert_eq!(cfg.deployment, Deployment::Staging);
    assert!(cfg.enable_logging);
    assert!(!cfg.production);
}

#[test]
fn overrides_apply_and_url_is_trimmed() {
    let cfg = AppConfig::from_lookup(lookup(&[
        ("SACCO_ENV", "staging"),
        ("SACCO_API_URL", "https://bank.example.test/api/v1/"),
        ("SACCO_API_TIMEOUT_MS", "2500"),
        ("SACCO_MAX_RETRY_ATTEMPTS", "4"),
        ("SACCO_ENABLE_LOGGING", "false"),
    ]))
    .unwrap();
    assert_eq!(cfg.api_url, "https://bank.example.test/api/v1");
    assert_eq!(cfg.api_timeout, Duration::from_millis(2500));
    assert_eq!(cfg.max_retry_attempts, 4);
    assert!(!cfg.enable_logging);
}

#[test]
fn unparseable_overrides_fall_back_to_preset() {
    let cfg = AppConfig::from_lookup(lookup(&[
        ("SACCO_API_TIMEOUT_MS", "soon"),
        ("SACCO_MAX_RETRY_ATTEMPTS", "-1"),
        ("SACCO_ENABLE_LOGGING", "yes"),
    ]))
    .unwrap();
    assert_eq!(cfg.api_timeout, Duration::from_millis(10_000));
    assert_eq!(cfg.max_retry_attempts, 1);
    assert!(cfg.enable_logging);
}

#[test]
fn unknown_deployment_errors() {
    let err = AppConfig::from_lookup(lookup(&[("SACCO_ENV", "qa")])).unwrap_err();
    assert_eq!(err, ConfigError::UnknownDeployment("qa".to_owned()));
    assert!(err.to_string().contains("unknown SACCO_ENV"));
}
