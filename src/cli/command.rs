use std::path::PathBuf;

pub enum Command {
    /// Validate then parse a query string.
    Parse { query: String },
    /// Validate only.
    Validate { query: String },
    /// Effective configuration as TOML.
    ConfigShow,
    /// Write the effective configuration to a file.
    ConfigWrite { path: PathBuf },
}
