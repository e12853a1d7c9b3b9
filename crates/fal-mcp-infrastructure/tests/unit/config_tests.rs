//! Configuration loader tests
//!
//! Every test runs inside a `figment::Jail`, which serialises access to the
//! process environment and gives each test its own working directory.

use fal_mcp_domain::error::Error;
use fal_mcp_infrastructure::config::{
    AppConfig, ConfigLoader, FalConfig, ServerOverrides, TransportMode,
};
use fal_mcp_infrastructure::constants::{
    DEFAULT_HEARTBEAT_SECS, DEFAULT_HOST, DEFAULT_PORT, FAL_QUEUE_URL,
};
use figment::Jail;

fn load(loader: &ConfigLoader) -> Result<AppConfig, figment::Error> {
    loader.load().map_err(|e| e.to_string().into())
}

#[test]
fn test_defaults_without_sources() {
    Jail::expect_with(|_jail| {
        let config = load(&ConfigLoader::new())?;

        assert_eq!(config.server.transport, TransportMode::Stdio);
        assert_eq!(config.server.host, DEFAULT_HOST);
        assert_eq!(config.server.port, DEFAULT_PORT);
        assert_eq!(config.server.heartbeat_secs, DEFAULT_HEARTBEAT_SECS);
        assert_eq!(config.fal.queue_url, FAL_QUEUE_URL);
        assert_eq!(config.logging.level, "info");
        Ok(())
    });
}

#[test]
fn test_toml_file_in_working_directory() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "fal-mcp.toml",
            r#"
                [server]
                transport = "sse"
                port = 9100

                [logging]
                level = "debug"
            "#,
        )?;

        let config = load(&ConfigLoader::new())?;

        assert_eq!(config.server.transport, TransportMode::Sse);
        assert_eq!(config.server.port, 9100);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.server.host, DEFAULT_HOST);
        Ok(())
    });
}

#[test]
fn test_explicit_config_path() {
    Jail::expect_with(|jail| {
        jail.create_file("custom.toml", "[fal]\npoll_interval_ms = 250\n")?;

        let config = load(&ConfigLoader::new().with_config_path("custom.toml"))?;

        assert_eq!(config.fal.poll_interval_ms, 250);
        Ok(())
    });
}

#[test]
fn test_missing_explicit_config_path_is_an_error() {
    Jail::expect_with(|_jail| {
        let result = ConfigLoader::new().with_config_path("nope.toml").load();

        assert!(matches!(result, Err(Error::Configuration { .. })));
        Ok(())
    });
}

#[test]
fn test_env_overrides_file() {
    Jail::expect_with(|jail| {
        jail.create_file("fal-mcp.toml", "[server]\nport = 9100\n")?;
        jail.set_env("FAL_MCP__SERVER__PORT", "9200");
        jail.set_env("FAL_MCP__LOGGING__JSON_FORMAT", "true");

        let config = load(&ConfigLoader::new())?;

        assert_eq!(config.server.port, 9200);
        assert!(config.logging.json_format);
        Ok(())
    });
}

#[test]
fn test_custom_env_prefix() {
    Jail::expect_with(|jail| {
        jail.set_env("OTHER__SERVER__PORT", "9300");

        let config = load(&ConfigLoader::new().with_env_prefix("OTHER__"))?;

        assert_eq!(config.server.port, 9300);
        Ok(())
    });
}

#[test]
fn test_fal_key_maps_to_api_key() {
    Jail::expect_with(|jail| {
        jail.set_env("FAL_KEY", "key-id:key-secret");

        let config = load(&ConfigLoader::new())?;

        assert_eq!(config.fal.api_key.as_deref(), Some("key-id:key-secret"));
        assert!(config.fal.has_api_key());
        Ok(())
    });
}

#[test]
fn test_cli_overrides_beat_environment() {
    Jail::expect_with(|jail| {
        jail.set_env("FAL_MCP__SERVER__PORT", "9200");
        jail.set_env("FAL_MCP__SERVER__HOST", "10.0.0.1");

        let overrides = ServerOverrides {
            transport: Some(TransportMode::Sse),
            host: None,
            port: Some(9400),
        };
        let config = load(&ConfigLoader::new().with_overrides(overrides))?;

        assert_eq!(config.server.transport, TransportMode::Sse);
        assert_eq!(config.server.port, 9400);
        assert_eq!(config.server.host, "10.0.0.1");
        Ok(())
    });
}

#[test]
fn test_port_zero_rejected() {
    Jail::expect_with(|jail| {
        jail.set_env("FAL_MCP__SERVER__PORT", "0");

        let result = ConfigLoader::new().load();

        assert!(matches!(result, Err(Error::Configuration { .. })));
        Ok(())
    });
}

#[test]
fn test_heartbeat_zero_rejected() {
    Jail::expect_with(|jail| {
        jail.set_env("FAL_MCP__SERVER__HEARTBEAT_SECS", "0");

        let err = ConfigLoader::new().load().unwrap_err();

        assert!(err.to_string().contains("heartbeat"));
        Ok(())
    });
}

#[test]
fn test_non_ip_host_rejected() {
    Jail::expect_with(|_jail| {
        let overrides = ServerOverrides {
            host: Some("not a host".to_string()),
            ..ServerOverrides::default()
        };

        let err = ConfigLoader::new()
            .with_overrides(overrides)
            .load()
            .unwrap_err();

        assert!(err.to_string().contains("Invalid server host"));
        Ok(())
    });
}

#[test]
fn test_invalid_log_level_rejected() {
    Jail::expect_with(|jail| {
        jail.create_file("fal-mcp.toml", "[logging]\nlevel = \"loud\"\n")?;

        let err = ConfigLoader::new().load().unwrap_err();

        assert!(err.to_string().contains("Invalid log level"));
        Ok(())
    });
}

#[test]
fn test_unknown_transport_rejected() {
    Jail::expect_with(|jail| {
        jail.create_file("fal-mcp.toml", "[server]\ntransport = \"carrier-pigeon\"\n")?;

        let result = ConfigLoader::new().load();

        assert!(matches!(result, Err(Error::Configuration { .. })));
        Ok(())
    });
}

#[test]
fn test_fal_config_debug_redacts_key() {
    let config = FalConfig {
        api_key: Some("super-secret".to_string()),
        ..FalConfig::default()
    };

    let rendered = format!("{config:?}");

    assert!(!rendered.contains("super-secret"));
    assert!(rendered.contains("<redacted>"));
}

#[test]
fn test_blank_api_key_is_not_a_credential() {
    let config = FalConfig {
        api_key: Some("   ".to_string()),
        ..FalConfig::default()
    };

    assert!(!config.has_api_key());
}
