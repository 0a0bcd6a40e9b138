use std::io::Write;

use super::*;

#[test]
fn cli_overrides_take_highest_precedence() {
    let mut raw = RawSettings::default();
    raw.server.port = Some(4000);
    raw.logging.level = Some("info".to_string());

    let overrides = ServeOverrides {
        server_port: Some(4321),
        log_level: Some("debug".to_string()),
        ..Default::default()
    };

    raw.apply_serve_overrides(&overrides);
    let settings = Settings::from_raw(raw).expect("valid settings");

    assert_eq!(settings.server.addr.port(), 4321);
    assert_eq!(settings.logging.level, LevelFilter::DEBUG);
}

#[test]
fn defaults_are_applied() {
    let settings = Settings::from_raw(RawSettings::default()).expect("valid settings");

    assert_eq!(settings.server.addr.to_string(), "127.0.0.1:3000");
    assert_eq!(settings.server.graceful_shutdown, Duration::from_secs(30));
    assert!(settings.auth.jwt_secret.is_none());
    assert_eq!(settings.auth.leeway_seconds, DEFAULT_JWT_LEEWAY_SECS);
    assert_eq!(settings.api_rate_limit.window_seconds.get(), 60);
    assert_eq!(settings.api_rate_limit.max_requests.get(), 120);
    assert!(settings.data.seed_mock_data);
    assert!(matches!(settings.logging.format, LogFormat::Compact));
}

#[test]
fn cli_json_logging_enforces_format() {
    let mut raw = RawSettings::default();
    let overrides = ServeOverrides {
        log_json: Some(true),
        ..Default::default()
    };

    raw.apply_serve_overrides(&overrides);
    let settings = Settings::from_raw(raw).expect("valid settings");

    assert!(matches!(settings.logging.format, LogFormat::Json));
}

#[test]
fn default_to_serve_command() {
    let args = CliArgs::parse_from(["rengoring"]);
    let command = args
        .command
        .unwrap_or(Command::Serve(Box::<ServeArgs>::default()));
    assert!(matches!(command, Command::Serve(_)));
}

#[test]
fn parse_serve_arguments() {
    let args = CliArgs::parse_from([
        "rengoring",
        "serve",
        "--server-port",
        "8080",
        "--jwt-secret",
        "hemmelig",
        "--seed-mock-data",
        "false",
        "--api-rate-limit-max-requests",
        "10",
    ]);

    match args.command.expect("serve command") {
        Command::Serve(serve) => {
            assert_eq!(serve.overrides.server_port, Some(8080));
            assert_eq!(serve.overrides.jwt_secret.as_deref(), Some("hemmelig"));
            assert_eq!(serve.overrides.seed_mock_data, Some(false));
            assert_eq!(serve.overrides.api_rate_limit_max_requests, Some(10));
        }
    }
}

#[test]
fn zero_port_is_rejected() {
    let mut raw = RawSettings::default();
    raw.server.port = Some(0);

    let err = Settings::from_raw(raw).expect_err("port zero rejected");
    assert!(matches!(err, LoadError::Invalid { key: "server.port", .. }));
}

#[test]
fn invalid_log_level_is_rejected() {
    let mut raw = RawSettings::default();
    raw.logging.level = Some("chatty".to_string());

    let err = Settings::from_raw(raw).expect_err("bad level rejected");
    assert!(matches!(err, LoadError::Invalid { key: "logging.level", .. }));
}

#[test]
fn blank_jwt_secret_is_rejected() {
    let mut raw = RawSettings::default();
    raw.auth.jwt_secret = Some("   ".to_string());

    let err = Settings::from_raw(raw).expect_err("blank secret rejected");
    assert!(matches!(err, LoadError::Invalid { key: "auth.jwt_secret", .. }));
}

#[test]
fn zero_rate_limit_is_rejected() {
    let mut raw = RawSettings::default();
    raw.api_rate_limit.max_requests = Some(0);

    let err = Settings::from_raw(raw).expect_err("zero limit rejected");
    assert!(matches!(
        err,
        LoadError::Invalid {
            key: "api_rate_limit.max_requests",
            ..
        }
    ));
}

#[test]
fn auth_settings_debug_redacts_the_secret() {
    let auth = AuthSettings {
        jwt_secret: Some("hemmelig".to_string()),
        leeway_seconds: 0,
    };
    let rendered = format!("{auth:?}");
    assert!(!rendered.contains("hemmelig"));
    assert!(rendered.contains("<redacted>"));
}

#[test]
fn explicit_config_file_is_layered_under_cli() {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("temp file");
    writeln!(
        file,
        "[server]\nport = 4100\n\n[auth]\njwt_secret = \"fra-fil\"\n\n[data]\nseed_mock_data = false"
    )
    .expect("write config");

    let args = CliArgs::parse_from([
        "rengoring".to_string(),
        "--config-file".to_string(),
        file.path().display().to_string(),
        "serve".to_string(),
        "--server-port".to_string(),
        "4200".to_string(),
    ]);

    let settings = load(&args).expect("settings load");
    assert_eq!(settings.server.addr.port(), 4200);
    assert_eq!(settings.auth.jwt_secret.as_deref(), Some("fra-fil"));
    assert!(!settings.data.seed_mock_data);
}

#[test]
fn environment_layer_sits_between_files_and_cli() {
    let env = config::Map::from([
        (
            "RENGORING_AUTH__JWT_SECRET".to_string(),
            "fra-miljoet".to_string(),
        ),
        ("RENGORING_SERVER__HOST".to_string(), "0.0.0.0".to_string()),
        ("RENGORING_LOGGING__LEVEL".to_string(), "warn".to_string()),
    ]);
    let args = CliArgs::parse_from(["rengoring", "serve", "--log-level", "debug"]);

    let settings = load_with_env(&args, Some(env)).expect("settings load");
    assert_eq!(settings.auth.jwt_secret.as_deref(), Some("fra-miljoet"));
    assert_eq!(settings.server.addr.ip().to_string(), "0.0.0.0");
    assert_eq!(settings.logging.level, LevelFilter::DEBUG);
}
