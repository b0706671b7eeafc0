//! Tests for GameConfig loading.

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

use danetka::{GameConfig, LlmProvider};

#[test]
fn test_defaults() {
    let config = GameConfig::default();
    assert_eq!(config.games_dir(), &PathBuf::from("games"));
    assert_eq!(config.prompt_path(), &PathBuf::from("prompt.md"));
    assert_eq!(config.llm_provider(), &LlmProvider::OpenAI);
    assert_eq!(config.llm_model(), "gpt-4o");
    assert_eq!(*config.temperature(), 0.0);
}

#[test]
fn test_from_file_fills_missing_keys() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("danetka.toml");
    fs::write(
        &path,
        r#"games_dir = "riddles"
llm_provider = "anthropic"
llm_model = "claude-3-5-haiku-20241022"
"#,
    )
    .expect("Failed to write TOML");

    let config = GameConfig::from_file(&path).expect("Load failed");
    assert_eq!(config.games_dir(), &PathBuf::from("riddles"));
    assert_eq!(config.llm_provider(), &LlmProvider::Anthropic);
    assert_eq!(config.llm_model(), "claude-3-5-haiku-20241022");
    assert_eq!(config.prompt_path(), &PathBuf::from("prompt.md"));
    assert_eq!(*config.llm_max_tokens(), 512);
}

#[test]
fn test_from_file_rejects_invalid_toml() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("bad.toml");
    fs::write(&path, "this is not valid toml !!!@@@").expect("Write failed");

    let err = GameConfig::from_file(&path).expect_err("Invalid TOML should fail");
    assert!(err.message.contains("Failed to parse config"));
}

#[test]
fn test_load_or_default_without_file() {
    let config = GameConfig::load_or_default("/this/path/does/not/exist.toml")
        .expect("Missing file should fall back to defaults");
    assert_eq!(config, GameConfig::default());
}

#[test]
fn test_setters_override_fields() {
    let config = GameConfig::default()
        .with_llm_model("gpt-4o-mini".to_string())
        .with_games_dir(PathBuf::from("elsewhere"));
    assert_eq!(config.llm_model(), "gpt-4o-mini");
    assert_eq!(config.games_dir(), &PathBuf::from("elsewhere"));
}

#[test]
fn test_api_key_var_per_provider() {
    assert_eq!(LlmProvider::OpenAI.api_key_var(), "OPENAI_API_KEY");
    assert_eq!(LlmProvider::Anthropic.api_key_var(), "ANTHROPIC_API_KEY");
}
