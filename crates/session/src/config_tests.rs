use super::*;

#[test]
fn test_empty_config_uses_defaults() {
    let config = GameConfig::from_toml_str("").unwrap();
    assert_eq!(config, GameConfig::default());
    assert_eq!(config.engine.depth, 3);
    assert_eq!(config.preview.line_length, 6);
    assert!(config.rules.fifty_move_rule);
    assert!(config.handicap().is_none());
    assert_eq!(
        config.game_mode(),
        GameMode::HumanVsEngine {
            engine_color: Color::Black
        }
    );
}

#[test]
fn test_full_config() {
    let text = r#"
        [engine]
        depth = 5
        quiescence_depth = 2
        move_time_ms = 1500

        [preview]
        line_length = 8
        search_depth = 2
        mode = "step_through"

        [rules]
        fifty_move_rule = false

        [handicap]
        random_move_probability = 0.25
        seed = 9

        [session]
        mode = "human_vs_human"
        engine_color = "white"
    "#;
    let config = GameConfig::from_toml_str(text).unwrap();
    assert_eq!(config.engine.depth, 5);
    assert_eq!(config.engine_options().quiescence_depth, 2);
    assert_eq!(config.preview.mode, PreviewMode::StepThrough);
    assert_eq!(
        config.preview_settings().move_time,
        Some(Duration::from_millis(1500))
    );
    assert_eq!(config.move_limits().depth, 5);
    assert!(!config.rules.fifty_move_rule);
    assert_eq!(config.game_mode(), GameMode::HumanVsHuman);
    let handicap = config.handicap().unwrap();
    assert_eq!(handicap.probability(), 0.25);
}

#[test]
fn test_partial_section_keeps_other_defaults() {
    let config = GameConfig::from_toml_str("[engine]\ndepth = 6\n").unwrap();
    assert_eq!(config.engine.depth, 6);
    assert_eq!(config.engine.quiescence_depth, DEFAULT_QUIESCENCE_DEPTH);
    assert_eq!(config.preview, PreviewConfig::default());
}

#[test]
fn test_validation() {
    for bad in [
        "[engine]\ndepth = 0",
        "[preview]\nline_length = 0",
        "[preview]\nline_length = 65",
        "[preview]\nline_length = 9223372036854775807",
        "[preview]\nsearch_depth = 0",
        "[handicap]\nrandom_move_probability = 1.5",
        "[handicap]\nrandom_move_probability = -0.1",
    ] {
        assert!(
            matches!(GameConfig::from_toml_str(bad), Err(ConfigError::Invalid(_))),
            "{bad}"
        );
    }
}

#[test]
fn test_line_length_upper_bound_is_allowed() {
    let text = format!("[preview]\nline_length = {MAX_LINE_LENGTH}");
    let config = GameConfig::from_toml_str(&text).unwrap();
    assert_eq!(config.preview.line_length, MAX_LINE_LENGTH);
}

#[test]
fn test_unknown_keys_and_bad_values_fail_to_parse() {
    assert!(matches!(
        GameConfig::from_toml_str("[engine]\ndepht = 3"),
        Err(ConfigError::Parse(_))
    ));
    assert!(matches!(
        GameConfig::from_toml_str("[preview]\nmode = \"fast\""),
        Err(ConfigError::Parse(_))
    ));
}

#[test]
fn test_missing_file() {
    let err = GameConfig::load(Path::new("/nonexistent/ghost-chess.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}
