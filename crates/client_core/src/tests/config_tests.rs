use std::collections::HashMap;

use super::*;

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |name| map.get(name).cloned()
}

#[test]
fn defaults_point_at_local_backend() {
    let settings = settings_from_sources(None, env_from(&[])).expect("settings");
    assert_eq!(settings, ClientSettings::default());
    assert_eq!(settings.base_url, "http://localhost:8000");
    assert_eq!(settings.strategy, Strategy::InformationGain);
    assert_eq!(settings.game_type, GameType::Anime);
    assert_eq!(settings.max_depth, None);
}

#[test]
fn file_values_override_defaults() {
    let raw = r#"
        base_url = "http://akinator.internal:9000"
        request_timeout_secs = 3
        game_type = "criminal"
        strategy = "mr_gain_ratio"
        max_depth = 12
    "#;
    let settings = settings_from_sources(Some(raw), env_from(&[])).expect("settings");
    assert_eq!(settings.base_url, "http://akinator.internal:9000");
    assert_eq!(settings.request_timeout_secs, 3);
    assert_eq!(settings.game_type, GameType::Criminal);
    assert_eq!(settings.strategy, Strategy::MrGainRatio);
    assert_eq!(settings.max_depth, Some(12));
}

#[test]
fn environment_overrides_file() {
    let raw = r#"base_url = "http://from-file:1""#;
    let settings = settings_from_sources(
        Some(raw),
        env_from(&[
            ("REACT_APP_BASE_API_URL", "http://from-react-env:2"),
            ("APP__STRATEGY", "gini_impurity"),
            ("APP__MAX_DEPTH", "7"),
        ]),
    )
    .expect("settings");
    assert_eq!(settings.base_url, "http://from-react-env:2");
    assert_eq!(settings.strategy, Strategy::GiniImpurity);
    assert_eq!(settings.max_depth, Some(7));
}

#[test]
fn akinator_env_var_wins_over_legacy_names() {
    let settings = settings_from_sources(
        None,
        env_from(&[
            ("REACT_APP_BASE_API_URL", "http://legacy:1"),
            ("AKINATOR_BASE_API_URL", "http://preferred:2"),
        ]),
    )
    .expect("settings");
    assert_eq!(settings.base_url, "http://preferred:2");
}

#[test]
fn unparseable_env_values_are_ignored() {
    let settings = settings_from_sources(
        None,
        env_from(&[
            ("APP__STRATEGY", "random_forest"),
            ("APP__MAX_DEPTH", "deep"),
            ("APP__REQUEST_TIMEOUT_SECS", ""),
        ]),
    )
    .expect("settings");
    assert_eq!(settings.strategy, Strategy::InformationGain);
    assert_eq!(settings.max_depth, None);
    assert_eq!(settings.request_timeout_secs, 10);
}

#[test]
fn unknown_file_keys_are_rejected() {
    let err = settings_from_sources(Some("colour = \"blue\""), env_from(&[]))
        .expect_err("must fail");
    assert!(matches!(err, ConfigError::File(_)));
}

#[test]
fn base_url_gains_trailing_slash() {
    let url = parse_base_url("http://localhost:8000/api").expect("url");
    assert_eq!(url.as_str(), "http://localhost:8000/api/");

    let root = parse_base_url(" http://localhost:8000 ").expect("url");
    assert_eq!(root.as_str(), "http://localhost:8000/");
}

#[test]
fn base_url_rejects_non_http_schemes() {
    let err = parse_base_url("ftp://localhost/").expect_err("must fail");
    assert!(err.to_string().contains("scheme must be http or https"));
    assert!(parse_base_url("not a url").is_err());
}

#[test]
fn explicit_missing_settings_file_is_an_error() {
    let err = load_settings(Some(Path::new("/definitely/not/here/akinator.toml")))
        .expect_err("must fail");
    assert!(err.to_string().contains("failed to read settings file"));
}

#[test]
fn timeout_is_never_zero() {
    let settings = ClientSettings {
        request_timeout_secs: 0,
        ..ClientSettings::default()
    };
    assert_eq!(settings.request_timeout(), Duration::from_secs(1));
}

#[test]
fn command_line_base_url_replaces_invalid_env_value() {
    let mut settings = settings_from_sources(
        Some("strategy = \"gini_impurity\"\nmax_depth = 12\n"),
        env_from(&[("APP__BASE_API_URL", "ftp://x"), ("APP__GAME_TYPE", "criminal")]),
    )
    .expect("layering does not validate the url");
    assert_eq!(settings.base_url, "ftp://x");

    settings.apply_overrides(SettingsOverrides {
        base_url: Some("http://ok:8000".into()),
        ..SettingsOverrides::default()
    });

    assert_eq!(
        settings.parsed_base_url().expect("valid").as_str(),
        "http://ok:8000/"
    );
    assert_eq!(settings.game_type, GameType::Criminal);
    assert_eq!(settings.strategy, Strategy::GiniImpurity);
    assert_eq!(settings.max_depth, Some(12));
}

#[test]
fn overrides_only_replace_given_values() {
    let mut settings = ClientSettings {
        max_depth: Some(20),
        ..ClientSettings::default()
    };
    settings.apply_overrides(SettingsOverrides {
        strategy: Some(Strategy::MrGainRatio),
        ..SettingsOverrides::default()
    });
    assert_eq!(settings.strategy, Strategy::MrGainRatio);
    assert_eq!(settings.max_depth, Some(20));
    assert_eq!(settings.base_url, DEFAULT_BASE_URL);
}
