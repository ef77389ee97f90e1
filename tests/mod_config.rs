use query_lite::errors::QueryError;
use query_lite::{Schema, SchemaConfig};
use std::io::Write;

#[test]
fn load_from_explicit_file() {
    let mut f = tempfile::NamedTempFile::new().unwrap();
    writeln!(f, "default_limit = 10.0\nmax_limit = 50.0\ndefault_sort = \"-updatedAt\"").unwrap();
    let cfg = SchemaConfig::load(Some(f.path())).unwrap();
    assert_eq!(cfg.default_limit, 10.0);
    assert_eq!(cfg.max_limit, 50.0);
    assert_eq!(cfg.max_page, 30.0);

    let out = Schema::with_config("", &cfg).parse();
    assert_eq!(
        out.cursor(),
        Some(&bson::doc! { "limit": 10, "skip": 0, "sort": { "updatedAt": -1 } })
    );
}

#[test]
fn malformed_file_is_an_error() {
    let mut f = tempfile::NamedTempFile::new().unwrap();
    writeln!(f, "max_limit = \"lots\"").unwrap();
    assert!(matches!(SchemaConfig::load(Some(f.path())), Err(QueryError::Toml(_))));
}

#[test]
fn inconsistent_file_is_rejected() {
    let mut f = tempfile::NamedTempFile::new().unwrap();
    writeln!(f, "default_limit = 500.0").unwrap();
    assert!(matches!(SchemaConfig::load(Some(f.path())), Err(QueryError::Config(_))));
}

#[test]
fn toml_round_trip() {
    let cfg = SchemaConfig { max_page: 99.0, ..SchemaConfig::default() };
    let text = cfg.to_toml().unwrap();
    assert!(text.contains("max_page = 99.0"));
    assert_eq!(SchemaConfig::from_toml(&text).unwrap(), cfg);
}

#[test]
fn env_overrides_beat_file_values() {
    let mut cfg = SchemaConfig::from_toml("max_limit = 50.0").unwrap();
    cfg.apply_env_from(|k| (k == "QUERYLITE_MAX_LIMIT").then(|| "75".to_string())).unwrap();
    assert_eq!(cfg.max_limit, 75.0);
    assert!(cfg.validate().is_ok());
}
