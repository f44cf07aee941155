//! Authentication providers
//!
//! A provider supplies the credentials sent during the connection handshake
//! with a node. [`NO_AUTH`] is the shared "no authentication" sentinel used
//! when the cluster requires none.

use std::collections::HashMap;
use std::fmt;
use std::net::SocketAddr;
use std::sync::Arc;
use once_cell::sync::Lazy;

/// Supplies credentials for connection handshakes
pub trait AuthInfoProvider: Send + Sync + fmt::Debug {
    /// Credentials to present to `host`
    ///
    /// An empty map means no credentials are sent.
    fn auth_info(&self, host: SocketAddr) -> HashMap<String, String>;
}

/// Provider that never sends credentials
#[derive(Debug, Default)]
pub struct NoAuthProvider;

impl AuthInfoProvider for NoAuthProvider {
    fn auth_info(&self, _host: SocketAddr) -> HashMap<String, String> {
        HashMap::new()
    }
}

/// Process-wide "no authentication" sentinel
pub static NO_AUTH: Lazy<Arc<dyn AuthInfoProvider>> = Lazy::new(|| Arc::new(NoAuthProvider));

/// Whether `provider` is the [`NO_AUTH`] sentinel
pub fn is_no_auth(provider: &Arc<dyn AuthInfoProvider>) -> bool {
    Arc::ptr_eq(provider, &*NO_AUTH)
}

/// Username/password credentials, sent as-is to every host
#[derive(Clone)]
pub struct PlainTextAuthProvider {
    username: String,
    password: String,
}

impl PlainTextAuthProvider {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }
}

impl fmt::Debug for PlainTextAuthProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlainTextAuthProvider")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl AuthInfoProvider for PlainTextAuthProvider {
    fn auth_info(&self, _host: SocketAddr) -> HashMap<String, String> {
        HashMap::from([
            ("username".to_string(), self.username.clone()),
            ("password".to_string(), self.password.clone()),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn host() -> SocketAddr {
        "10.0.0.1:9042".parse().unwrap()
    }

    #[test]
    fn test_no_auth_sentinel() {
        assert!(NO_AUTH.auth_info(host()).is_empty());
        let sentinel: Arc<dyn AuthInfoProvider> = Arc::clone(&*NO_AUTH);
        assert!(is_no_auth(&sentinel));

        // Another NoAuthProvider is not the sentinel
        let other: Arc<dyn AuthInfoProvider> = Arc::new(NoAuthProvider);
        assert!(!is_no_auth(&other));
    }

    #[test]
    fn test_plain_text_credentials() {
        let provider = PlainTextAuthProvider::new("cassie", "s3cret");
        let info = provider.auth_info(host());

        assert_eq!(info.get("username").map(String::as_str), Some("cassie"));
        assert_eq!(info.get("password").map(String::as_str), Some("s3cret"));
    }

    #[test]
    fn test_plain_text_debug_redacts_password() {
        let provider = PlainTextAuthProvider::new("cassie", "s3cret");
        let debug = format!("{:?}", provider);

        assert!(debug.contains("cassie"));
        assert!(!debug.contains("s3cret"));
    }
}
