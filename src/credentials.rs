use std::env::{self, VarError};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::ConfigError;

pub const DEFAULT_TOKEN_KEY: &str = "GITHUB_TOKEN";
pub const DEFAULT_ENV_FILE: &str = ".env";

/// GitHub access token. Never printed through `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct Token(String);

impl Token {
    pub fn new(value: impl Into<String>) -> Self {
        Token(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Token(***)")
    }
}

/// Where the token for a run comes from.
#[derive(Debug, Clone)]
pub enum TokenSource {
    /// Value given directly, e.g. on the command line.
    Explicit(Token),
    /// A process environment variable.
    Env { var: String },
    /// A local file of `KEY=VALUE` lines, such as `.env`.
    File { path: PathBuf, key: String },
}

impl TokenSource {
    /// Obtain the token, or report why it is unavailable.
    pub fn load(&self) -> Result<Token, ConfigError> {
        match self {
            TokenSource::Explicit(token) => Ok(token.clone()),
            TokenSource::Env { var } => token_from_env(var),
            TokenSource::File { path, key } => token_from_file(path, key),
        }
    }
}

fn token_from_env(var: &str) -> Result<Token, ConfigError> {
    match env::var(var) {
        Ok(value) if value.trim().is_empty() => Err(ConfigError::EnvVarEmpty(var.to_string())),
        Ok(value) => {
            debug!("Read GitHub token from environment variable {}", var);
            Ok(Token::new(value.trim()))
        }
        Err(VarError::NotPresent) => Err(ConfigError::EnvVarMissing(var.to_string())),
        Err(VarError::NotUnicode(_)) => Err(ConfigError::EnvVarNotUnicode(var.to_string())),
    }
}

fn token_from_file(path: &Path, key: &str) -> Result<Token, ConfigError> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(ConfigError::FileMissing(path.to_path_buf()));
        }
        Err(source) => {
            return Err(ConfigError::FileUnreadable {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    match find_key(&contents, key) {
        Some(value) if value.is_empty() => Err(ConfigError::KeyEmpty {
            key: key.to_string(),
            path: path.to_path_buf(),
        }),
        Some(value) => {
            debug!("Read GitHub token from {}", path.display());
            Ok(Token::new(value))
        }
        None => Err(ConfigError::KeyMissing {
            key: key.to_string(),
            path: path.to_path_buf(),
        }),
    }
}

/// Returns the value of the first `KEY=VALUE` line whose key is `key`.
///
/// The line is split on its first `=` and both halves are trimmed. The value
/// is taken verbatim: no quoting, escaping or `$VAR` expansion.
fn find_key<'a>(contents: &'a str, key: &str) -> Option<&'a str> {
    for line in contents.lines() {
        let line = line.trim();
        // Blank lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        match line.split_once('=') {
            Some((name, value)) if name.trim() == key => return Some(value.trim()),
            Some(_) => {}
            None => warn!("Skipping token file line without '='"),
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse<'a>(contents: &'a str, key: &str) -> Option<&'a str> {
        find_key(contents, key)
    }

    #[test]
    fn finds_key_among_other_entries() {
        let contents = "# tokens\nOTHER=1\nGITHUB_TOKEN=abc123\n";
        assert_eq!(parse(contents, "GITHUB_TOKEN"), Some("abc123"));
    }

    #[test]
    fn splits_on_first_equals_only() {
        let contents = "GITHUB_TOKEN=ab=cd\n";
        assert_eq!(parse(contents, "GITHUB_TOKEN"), Some("ab=cd"));
    }

    #[test]
    fn trims_surrounding_whitespace() {
        let contents = "GITHUB_TOKEN = abc123  \n";
        assert_eq!(parse(contents, "GITHUB_TOKEN"), Some("abc123"));
    }

    #[test]
    fn longer_key_with_same_prefix_does_not_match() {
        let contents = "GITHUB_TOKEN_OLD=stale\n";
        assert_eq!(parse(contents, "GITHUB_TOKEN"), None);
    }

    #[test]
    fn missing_key_yields_none() {
        assert_eq!(parse("FOO=bar\n", "GITHUB_TOKEN"), None);
    }

    #[test]
    fn value_is_taken_verbatim() {
        assert_eq!(parse("GITHUB_TOKEN=ab$HOME\n", "GITHUB_TOKEN"), Some("ab$HOME"));
        assert_eq!(parse("GITHUB_TOKEN=ab$cd\n", "GITHUB_TOKEN"), Some("ab$cd"));
        assert_eq!(parse("GITHUB_TOKEN=ab cd\n", "GITHUB_TOKEN"), Some("ab cd"));
        assert_eq!(parse("GITHUB_TOKEN=ab\\cd\n", "GITHUB_TOKEN"), Some("ab\\cd"));
    }

    #[test]
    fn comments_and_lines_without_equals_are_skipped() {
        let contents = "\n# GITHUB_TOKEN=commented\nnot a pair\nGITHUB_TOKEN=abc123\n";
        assert_eq!(parse(contents, "GITHUB_TOKEN"), Some("abc123"));
    }

    #[test]
    fn token_debug_is_redacted() {
        let token = Token::new("abc123");
        assert_eq!(format!("{:?}", token), "Token(***)");
        assert_eq!(token.as_str(), "abc123");
    }
}
