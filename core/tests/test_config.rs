#[cfg(test)]
mod tests {
    use std::time::Duration;

    use onwire_core::codec::CodecKind;
    use onwire_core::config::{ConfigError, PipelineConfig};
    use onwire_core::pipeline::PipelineBuilder;

    #[test]
    fn empty_json_gives_defaults() {
        let cfg = PipelineConfig::from_json_str("{}").unwrap();
        assert_eq!(cfg, PipelineConfig::default());
        assert_eq!(cfg.timeout(), None);
        assert_eq!(cfg.codec, CodecKind::Bincode);
        assert_eq!(cfg.compression_level, 6);
    }

    #[test]
    fn full_json_is_applied() {
        let cfg = PipelineConfig::from_json_str(
            r#"{ "timeout_ms": 250, "codec": "json", "compression_level": 9 }"#,
        )
        .unwrap();
        assert_eq!(cfg.timeout(), Some(Duration::from_millis(250)));
        assert_eq!(cfg.codec, CodecKind::Json);
        assert_eq!(cfg.compression_level, 9);
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(matches!(
            PipelineConfig::from_json_str(r#"{ "compression_level": 12 }"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            PipelineConfig::from_json_str(r#"{ "timeout_ms": 0 }"#),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn malformed_json_is_parse_error() {
        assert!(matches!(
            PipelineConfig::from_json_str("{ timeout_ms: "),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            PipelineConfig::from_json_str(r#"{ "codec": "xml" }"#),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn builder_refuses_invalid_config() {
        let cfg = PipelineConfig { compression_level: 42, ..PipelineConfig::default() };
        assert!(PipelineBuilder::<String>::from_config(&cfg).is_err());
    }
}
