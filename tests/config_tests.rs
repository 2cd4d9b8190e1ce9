use std::fs;
use std::path::PathBuf;

use monadswap::application::RouteEncoding;
use monadswap::domain::Leg;
use monadswap::error::{ConfigError, Error};
use monadswap::infrastructure::bootstrap;
use monadswap::infrastructure::config::router::RouterKind;
use monadswap::infrastructure::config::settings::Config;
use rust_decimal_macros::dec;
use tempfile::TempDir;

fn write_config(dir: &TempDir, contents: &str) -> PathBuf {
    let path = dir.path().join("config.toml");
    fs::write(&path, contents).expect("write temp config");
    path
}

#[test]
fn shipped_example_config_loads() {
    let config = Config::load(concat!(env!("CARGO_MANIFEST_DIR"), "/config.toml.example"))
        .expect("example config is valid");

    assert_eq!(config.router.kind, RouterKind::Bean);
    assert_eq!(config.network.native_symbol, "MON");
    assert_eq!(config.batch.min_delay_secs, 15);
    assert!(config.asset("usdc").is_some());
    assert!(config.asset("weth").is_some());
}

#[test]
fn ambient_section_feeds_the_router_profile() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
[router]
kind = "ambient"
address = "0x88B96aF200c8a9c35442C8AC6cd3D22695AaE4F0"
deadline_secs = 600

[router.ambient]
pool_idx = 420
limit_price = "2.5"

[router.gas]
token_to_token = 650000
"#,
    );

    let config = Config::load(&path).unwrap();
    let profile = bootstrap::router_profile(&config).unwrap();

    assert_eq!(profile.name(), "ambient");
    match profile.encoding() {
        RouteEncoding::Ambient {
            pool_idx,
            limit_price,
        } => {
            assert_eq!(*pool_idx, 420);
            assert_eq!(*limit_price, 2_500_000_000_000_000_000u128);
        }
        other => panic!("expected ambient encoding, got {other:?}"),
    }
    assert_eq!(config.router.gas_limit(Leg::TokenToToken), 650_000);
    assert_eq!(profile.gas_limit(Leg::TokenToToken), 650_000);
}

#[test]
fn token_ranges_are_decimals() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
[[tokens]]
symbol = "DAK"
address = "0x0f0bdebf0f83cd1ee3974779bcb7315f9808c714"
decimals = 18
min_amount = "0.0000001"
max_amount = "0.5"
"#,
    );

    let config = Config::load(&path).unwrap();
    let token = config.token("dak").unwrap();
    assert_eq!(token.min_amount, dec!(0.0000001));
    assert_eq!(token.max_amount, dec!(0.5));
}

#[test]
fn missing_file_is_a_read_error() {
    let dir = TempDir::new().unwrap();
    let err = Config::load(dir.path().join("nope.toml")).unwrap_err();
    assert!(matches!(err, Error::Config(ConfigError::ReadFile(_))));
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[network\nrpc_url = 1");
    let err = Config::load(&path).unwrap_err();
    assert!(matches!(err, Error::Config(ConfigError::Parse(_))));
}

#[test]
fn zero_gas_limit_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
[router]
wrapped_native = "0x760afe86e5de5fa0ee542fc7b7b713e1c5425701"

[router.gas]
native_to_token = 0
"#,
    );
    let err = Config::load(&path).unwrap_err();
    assert!(err.to_string().contains("router.gas"));
}
