use crate::config::SchemaConfig;
use crate::errors::{QueryError, Result};
use crate::schema::{QueryDocument, Schema};
use crate::types::Bucket;

use super::command::Command;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum OutputMode {
    /// One-line JSON.
    Json,
    /// Indented JSON.
    Pretty,
    /// One `bucket: document` line per present bucket.
    Plain,
}

/// Runs `cmd` against `cfg` and returns what should be printed.
///
/// # Errors
/// `Parse` returns `QueryError::Validation` when the query is rejected; `ConfigWrite`
/// returns I/O errors.
pub fn run(cmd: Command, cfg: &SchemaConfig, mode: OutputMode) -> Result<String> {
    match cmd {
        Command::Parse { query } => {
            let schema = Schema::with_config(query.as_str(), cfg);
            schema.validate()?;
            render(&schema.parse(), mode)
        }
        Command::Validate { query } => {
            let schema = Schema::with_config(query.as_str(), cfg);
            Ok(match schema.validate() {
                Ok(()) => "ok".to_string(),
                Err(e) => e.message,
            })
        }
        Command::ConfigShow => cfg.to_toml(),
        Command::ConfigWrite { path } => {
            let s = cfg.to_toml()?;
            std::fs::write(&path, s)?;
            Ok(format!("wrote {}", path.display()))
        }
    }
}

/// # Errors
/// Returns `QueryError::Json` if the document cannot be rendered.
pub fn render(doc: &QueryDocument, mode: OutputMode) -> Result<String> {
    match mode {
        OutputMode::Json => Ok(serde_json::to_string(&doc.to_json())?),
        OutputMode::Pretty => Ok(serde_json::to_string_pretty(&doc.to_json())?),
        OutputMode::Plain => {
            let lines: Vec<String> = [Bucket::Cursor, Bucket::Select, Bucket::Filter]
                .into_iter()
                .filter_map(|b| doc.bucket(b).map(|d| format!("{}: {d}", b.as_str())))
                .collect();
            Ok(lines.join("\n"))
        }
    }
}

/// Exit code for a failed command: 2 for rejected queries, 1 otherwise.
#[must_use]
pub const fn exit_code(err: &QueryError) -> i32 {
    match err {
        QueryError::Validation(_) => 2,
        _ => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_prints_default_cursor() {
        let out = run(Command::Parse { query: String::new() }, &SchemaConfig::default(), OutputMode::Json).unwrap();
        assert_eq!(out, r#"{"cursor":{"limit":30,"skip":0,"sort":{"createdAt":-1}}}"#);
    }

    #[test]
    fn parse_rejects_out_of_range_limit() {
        let err = run(Command::Parse { query: "limit=500".into() }, &SchemaConfig::default(), OutputMode::Json)
            .unwrap_err();
        assert_eq!(exit_code(&err), 2);
        assert_eq!(err.to_string(), "Validation error: limit must be lower than or equal to 100");
    }

    #[test]
    fn validate_reports_message() {
        let cfg = SchemaConfig::default();
        assert_eq!(run(Command::Validate { query: "page=2".into() }, &cfg, OutputMode::Json).unwrap(), "ok");
        assert_eq!(
            run(Command::Validate { query: "page=0".into() }, &cfg, OutputMode::Json).unwrap(),
            "page must be greater than or equal to 1"
        );
    }

    #[test]
    fn plain_mode_lists_buckets() {
        let out = run(Command::Parse { query: "fields=a&foo=bar".into() }, &SchemaConfig::default(), OutputMode::Plain)
            .unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("select: "));
        assert!(lines[2].starts_with("filter: "));
    }

    #[test]
    fn config_write_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("q.toml");
        let cfg = SchemaConfig { max_limit: 42.0, ..SchemaConfig::default() };
        run(Command::ConfigWrite { path: path.clone() }, &cfg, OutputMode::Json).unwrap();
        assert_eq!(SchemaConfig::from_file(&path).unwrap(), cfg);
    }
}
