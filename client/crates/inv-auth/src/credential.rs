use crate::{AuthError, Claims, Result as AuthErrorResult};

use std::fmt;

use jsonwebtoken::dangerous::insecure_decode;

/// Opaque bearer token for the current session.
///
/// Decoding parses the header and payload without checking the signature;
/// the backend is the authority on that.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Value for an `Authorization` header.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }

    #[track_caller]
    pub fn decode(&self) -> AuthErrorResult<Claims> {
        let token_data = insecure_decode::<Claims>(&self.0)
            .map_err(|e| AuthError::invalid_token(format!("malformed credential: {e}")))?;

        Ok(token_data.claims)
    }

    /// Best-effort decode; malformed tokens yield `None`.
    pub fn claims(&self) -> Option<Claims> {
        self.decode().ok()
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

impl From<String> for Credential {
    fn from(token: String) -> Self {
        Self(token)
    }
}
