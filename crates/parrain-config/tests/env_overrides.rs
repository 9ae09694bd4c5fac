use figment::Jail;
use parrain_config::ParrainConfig;

#[test]
fn env_overrides_nested_keys() {
    Jail::expect_with(|jail| {
        jail.set_env("PARRAIN_DATABASE__PATH", ":memory:");
        jail.set_env("PARRAIN_DRAW__SEED", "42");

        let config = ParrainConfig::load_for_project(jail.directory())
            .map_err(|e| figment::Error::from(e.to_string()))?;
        assert!(config.database.is_in_memory());
        assert_eq!(config.draw.seed, Some(42));
        Ok(())
    });
}

#[test]
fn env_beats_project_file() {
    Jail::expect_with(|jail| {
        jail.create_dir(".parrain")?;
        jail.create_file(
            ".parrain/config.toml",
            r#"
[server]
bind = "127.0.0.1:9000"
"#,
        )?;
        jail.set_env("PARRAIN_SERVER__BIND", "127.0.0.1:9100");

        let config = ParrainConfig::load_for_project(jail.directory())
            .map_err(|e| figment::Error::from(e.to_string()))?;
        assert_eq!(config.server.bind, "127.0.0.1:9100");
        Ok(())
    });
}
