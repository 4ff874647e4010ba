//! Read-only access to the stored credential token

use std::fmt;
use std::path::PathBuf;

/// Opaque bearer credential for a logged-in session
#[derive(Clone, PartialEq, Eq)]
pub struct Token(String);

impl Token {
    /// Wrap a raw token, returning None for blank input
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Value of the `Authorization` header
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Token(<redacted>)")
    }
}

/// Source of the current session's token
///
/// Reads must be side-effect free. `None` means the session is anonymous.
pub trait SessionStore: Send + Sync {
    fn token(&self) -> Option<Token>;
}

/// Session with a fixed (or absent) token
#[derive(Debug, Clone, Default)]
pub struct MemorySession {
    token: Option<Token>,
}

impl MemorySession {
    pub fn anonymous() -> Self {
        Self { token: None }
    }

    pub fn with_token(raw: impl Into<String>) -> Self {
        Self {
            token: Token::new(raw),
        }
    }
}

impl SessionStore for MemorySession {
    fn token(&self) -> Option<Token> {
        self.token.clone()
    }
}

/// Session backed by a token file on disk
///
/// The file is read on every call so a token written or cleared by another
/// process is picked up on the next action.
#[derive(Debug, Clone)]
pub struct FileSession {
    path: PathBuf,
}

impl FileSession {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl SessionStore for FileSession {
    fn token(&self) -> Option<Token> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => Token::new(contents),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                tracing::warn!("Failed to read token file {}: {}", self.path.display(), e);
                None
            }
        }
    }
}

/// Session read from an environment variable
#[derive(Debug, Clone)]
pub struct EnvSession {
    var: String,
}

impl EnvSession {
    pub const DEFAULT_VAR: &'static str = "STOREFRONT_TOKEN";

    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl Default for EnvSession {
    fn default() -> Self {
        Self::new(Self::DEFAULT_VAR)
    }
}

impl SessionStore for EnvSession {
    fn token(&self) -> Option<Token> {
        std::env::var(&self.var).ok().and_then(Token::new)
    }
}

/// First token found across several sources, in order
pub struct ChainedSession {
    sources: Vec<Box<dyn SessionStore>>,
}

impl ChainedSession {
    pub fn new(sources: Vec<Box<dyn SessionStore>>) -> Self {
        Self { sources }
    }
}

impl SessionStore for ChainedSession {
    fn token(&self) -> Option<Token> {
        self.sources.iter().find_map(|source| source.token())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_blank_token_is_absent() {
        assert!(Token::new("").is_none());
        assert!(Token::new("  \n").is_none());
        assert_eq!(Token::new(" abc\n").unwrap().as_str(), "abc");
    }

    #[test]
    fn test_token_debug_is_redacted() {
        let token = Token::new("secret").unwrap();
        assert!(!format!("{:?}", token).contains("secret"));
        assert_eq!(token.bearer(), "Bearer secret");
    }

    #[test]
    fn test_env_session_reads_variable_on_each_call() {
        // Unique name so parallel tests never share the variable
        let var = "STOREFRONT_TEST_ENV_SESSION_TOKEN";
        let session = EnvSession::new(var);

        std::env::remove_var(var);
        assert!(session.token().is_none());

        std::env::set_var(var, " env-token\n");
        assert_eq!(session.token().unwrap().as_str(), "env-token");

        std::env::set_var(var, "   ");
        assert!(session.token().is_none());

        std::env::remove_var(var);
        assert!(session.token().is_none());
    }

    #[test]
    fn test_env_session_default_variable() {
        assert_eq!(EnvSession::default().var, EnvSession::DEFAULT_VAR);
    }

    #[test]
    fn test_file_session_missing_file() {
        let dir = TempDir::new().unwrap();
        let session = FileSession::new(dir.path().join("token"));
        assert!(session.token().is_none());
    }

    #[test]
    fn test_file_session_reads_and_sees_clear() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("token");
        std::fs::write(&path, "tok-123\n").unwrap();
        let session = FileSession::new(&path);
        assert_eq!(session.token().unwrap().as_str(), "tok-123");

        std::fs::write(&path, "").unwrap();
        assert!(session.token().is_none());
    }

    #[test]
    fn test_chained_session_prefers_first() {
        let chained = ChainedSession::new(vec![
            Box::new(MemorySession::anonymous()),
            Box::new(MemorySession::with_token("second")),
            Box::new(MemorySession::with_token("third")),
        ]);
        assert_eq!(chained.token().unwrap().as_str(), "second");
    }
}
