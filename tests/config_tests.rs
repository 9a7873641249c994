#[cfg(test)]
mod tests {
    use std::io::Write;
    use tempfile::NamedTempFile;
    use TweetPulse::config::{load_app_config, DEFAULT_LIMIT, MAX_LIMIT};
    use TweetPulse::error::AnalysisError;

    // Helper to create a temporary config file with given content
    fn create_temp_config_file(content: &str) -> NamedTempFile {
        let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
        writeln!(temp_file, "{}", content).expect("Failed to write to temp file");
        temp_file
    }

    #[test]
    fn test_load_valid_config() {
        let yaml_content = r#"
elasticsearch:
  url: http://localhost:9200
  index: tweets
  username: elastic
  password: changeme
classifier:
  endpoint: https://api-inference.huggingface.co
server:
  bind_addr: 0.0.0.0:8080
limits:
  default_limit: 50
  max_limit: 500
        "#;
        let temp_file = create_temp_config_file(yaml_content);
        let config = load_app_config(temp_file.path()).expect("Should load valid config");

        assert_eq!(config.elasticsearch.index, "tweets");
        assert_eq!(config.elasticsearch.username.as_deref(), Some("elastic"));
        assert_eq!(
            config.classifier.model,
            "j-hartmann/emotion-english-distilroberta-base"
        );
        assert_eq!(config.server.bind_addr, "0.0.0.0:8080");
        assert_eq!(config.limits.default_limit, 50);
        assert_eq!(config.limits.max_limit, 500);
    }

    #[test]
    fn test_defaults_applied_when_sections_omitted() {
        let yaml_content = r#"
elasticsearch:
  url: http://localhost:9200
  index: tweets
classifier:
  endpoint: https://api-inference.huggingface.co
        "#;
        let temp_file = create_temp_config_file(yaml_content);
        let config = load_app_config(temp_file.path()).expect("Should load minimal config");

        assert_eq!(config.server.bind_addr, "127.0.0.1:8000");
        assert_eq!(config.limits.default_limit, DEFAULT_LIMIT);
        assert_eq!(config.limits.max_limit, MAX_LIMIT);
        assert!(config.elasticsearch.username.is_none());
    }

    #[test]
    fn test_missing_required_section_is_config_error() {
        let yaml_content = r#"
classifier:
  endpoint: https://api-inference.huggingface.co
        "#;
        let temp_file = create_temp_config_file(yaml_content);
        let result = load_app_config(temp_file.path());
        assert!(matches!(result, Err(AnalysisError::Config(_))));
    }

    #[test]
    fn test_empty_index_rejected() {
        let yaml_content = r#"
elasticsearch:
  url: http://localhost:9200
  index: ""
classifier:
  endpoint: https://api-inference.huggingface.co
        "#;
        let temp_file = create_temp_config_file(yaml_content);
        let result = load_app_config(temp_file.path());
        match result {
            Err(AnalysisError::Config(msg)) => assert!(msg.contains("index")),
            other => panic!("Expected config error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_inverted_limits_rejected() {
        let yaml_content = r#"
elasticsearch:
  url: http://localhost:9200
  index: tweets
classifier:
  endpoint: https://api-inference.huggingface.co
limits:
  default_limit: 2000
  max_limit: 1000
        "#;
        let temp_file = create_temp_config_file(yaml_content);
        let result = load_app_config(temp_file.path());
        match result {
            Err(AnalysisError::Config(msg)) => assert!(msg.contains("default_limit")),
            other => panic!("Expected config error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let result = load_app_config(std::path::Path::new("/no/such/config.yaml"));
        assert!(matches!(result, Err(AnalysisError::Config(_))));
    }
}
