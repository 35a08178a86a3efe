use gordon_core::llm::wire::{Content, GenerateContentRequest, Part};
use gordon_core::*;
use tempfile::TempDir;

// ========================================================================
// Settings Tests (config/mod.rs)
// ========================================================================

#[test]
fn test_settings_default_values() {
    let settings = Settings::default();

    assert!(settings.api_key.is_none());
    assert_eq!(settings.api_key_env, "GEMINI_API_KEY");
    assert_eq!(
        settings.base_url,
        "https://generativelanguage.googleapis.com/v1beta"
    );
    assert!(settings.upload_base_url.is_none());
    assert_eq!(settings.text_model, "gemini-1.5-flash");
    assert_eq!(settings.image_model, "gemini-1.5-flash");
}

#[test]
fn test_settings_load_from_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
api_key = "file-key"
base_url = "https://example.test/v1beta"
upload_base_url = "https://example.test"
text_model = "gemini-pro"
"#,
    )
    .unwrap();

    let settings = Settings::load_from(&path).unwrap();
    assert_eq!(settings.api_key().unwrap(), "file-key");
    assert_eq!(settings.base_url, "https://example.test/v1beta");
    assert_eq!(settings.upload_base_url(), "https://example.test");
    assert_eq!(settings.text_model, "gemini-pro");
    // Unset keys take their defaults
    assert_eq!(settings.image_model, "gemini-1.5-flash");
}

#[test]
fn test_settings_missing_file_is_not_found() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("absent.toml");

    match Settings::load_from(&path) {
        Err(ConfigError::NotFound(p)) => assert_eq!(p, path),
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[test]
fn test_settings_invalid_toml_is_parse_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    std::fs::write(&path, "api_key = [unterminated").unwrap();

    assert!(matches!(
        Settings::load_from(&path),
        Err(ConfigError::Parse(_))
    ));
}

#[test]
fn test_settings_without_key_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    std::fs::write(&path, "api_key_env = \"GORDON_TEST_KEY_THAT_IS_NEVER_SET\"\n").unwrap();

    match Settings::load_from(&path) {
        Err(ConfigError::MissingApiKey(var)) => {
            assert_eq!(var, "GORDON_TEST_KEY_THAT_IS_NEVER_SET")
        }
        other => panic!("expected MissingApiKey, got {other:?}"),
    }
}

#[test]
fn test_settings_api_key_reads_from_env() {
    std::env::set_var("GORDON_TEST_API_KEY", "env-key-12345");

    let settings = Settings {
        api_key_env: "GORDON_TEST_API_KEY".to_string(),
        ..Settings::default()
    };
    assert_eq!(settings.api_key().unwrap(), "env-key-12345");

    std::env::remove_var("GORDON_TEST_API_KEY");
}

#[test]
fn test_settings_upload_base_falls_back_to_base_url() {
    let settings = Settings {
        base_url: "https://proxy.test".to_string(),
        ..Settings::default()
    };
    assert_eq!(settings.upload_base_url(), "https://proxy.test");
}

#[test]
fn test_settings_with_model_overrides_both() {
    let settings = Settings::default().with_model("gemini-1.5-pro");
    assert_eq!(settings.text_model, "gemini-1.5-pro");
    assert_eq!(settings.image_model, "gemini-1.5-pro");
}

#[test]
fn test_client_from_settings_requires_key() {
    let settings = Settings {
        api_key_env: "GORDON_TEST_KEY_THAT_IS_NEVER_SET".to_string(),
        ..Settings::default()
    };
    assert!(GeminiClient::from_settings(&settings).is_err());

    let settings = Settings {
        api_key: Some("k".to_string()),
        text_model: "t".to_string(),
        image_model: "i".to_string(),
        ..Settings::default()
    };
    let client = GeminiClient::from_settings(&settings).unwrap();
    assert_eq!(client.text_model(), "t");
    assert_eq!(client.image_model(), "i");
}

// ========================================================================
// Conversation Tests (context/conversation.rs)
// ========================================================================

#[test]
fn test_conversation_appends_in_order() {
    let mut conversation = Conversation::new();
    assert!(conversation.is_empty());

    conversation.append(Message::user("Hello"));
    conversation.append(Message::model("Hi there!"));
    conversation.append(Message::user_image(vec![1, 2, 3]));

    assert_eq!(conversation.len(), 3);
    let snapshot = conversation.snapshot();
    assert_eq!(snapshot[0].text(), Some("Hello"));
    assert_eq!(snapshot[1].role(), Role::Model);
    assert_eq!(snapshot[2].content(), &MessageContent::Image(vec![1, 2, 3]));
    assert_eq!(conversation.last().unwrap().id(), snapshot[2].id());
}

#[test]
fn test_message_ids_are_unique() {
    let a = Message::user("same");
    let b = Message::user("same");
    assert_ne!(a.id(), b.id());
}

#[test]
fn test_message_content_accessors() {
    let text = MessageContent::Text("hi".into());
    assert_eq!(text.text(), Some("hi"));
    assert!(text.image().is_none());

    let image = MessageContent::Image(vec![9]);
    assert!(image.text().is_none());
    assert_eq!(image.image(), Some(&[9u8][..]));
}

// ========================================================================
// Wire format (llm/wire.rs)
// ========================================================================

#[test]
fn test_user_text_message_wire_roundtrip() {
    let message = Message::user("hi");

    let json = serde_json::to_value(Content::from(&message)).unwrap();
    assert_eq!(json, serde_json::json!({"role": "user", "parts": [{"text": "hi"}]}));

    let content: Content = serde_json::from_value(json).unwrap();
    let back = Message::try_from(content).unwrap();
    assert_eq!(back.role(), Role::User);
    assert_eq!(back.text(), Some("hi"));
}

#[test]
fn test_model_role_parses_from_wire() {
    let content: Content =
        serde_json::from_str(r#"{"role":"model","parts":[{"text":"sure"}]}"#).unwrap();
    let message = Message::try_from(content).unwrap();
    assert_eq!(message.role(), Role::Model);
    assert_eq!(message.text(), Some("sure"));
}

#[test]
fn test_roleless_content_does_not_convert() {
    let content = Content {
        role: None,
        parts: vec![Part::text("x")],
    };
    assert!(matches!(
        Message::try_from(content),
        Err(ClientError::Malformed(_))
    ));
}

#[test]
fn test_history_request_shape() {
    let history = vec![Message::user("a"), Message::model("b")];
    let json = serde_json::to_value(GenerateContentRequest::from_history(&history)).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "contents": [
                {"role": "user", "parts": [{"text": "a"}]},
                {"role": "model", "parts": [{"text": "b"}]},
            ]
        })
    );
}

#[test]
fn test_role_tags() {
    assert_eq!(Role::User.as_str(), "user");
    assert_eq!(Role::Model.to_string(), "model");
    assert_eq!(Role::from_tag("model"), Some(Role::Model));
    assert_eq!(Role::from_tag("assistant"), None);
}
