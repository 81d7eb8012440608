#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("payload is not valid UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),
    #[error("signing failed: {0}")]
    Signing(String),
    #[error("malformed base64: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("invalid key: {0}")]
    InvalidKey(String),
    #[error("unknown role token: {0:?}")]
    UnknownRole(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_role_quotes_token() {
        let error = AuthError::UnknownRole("root".into());
        assert_eq!(error.to_string(), "unknown role token: \"root\"");
    }

    #[test]
    fn utf8_error_converts_to_encoding() {
        let bytes = [0xffu8, 0xfe];
        let error: AuthError = std::str::from_utf8(&bytes).unwrap_err().into();
        assert!(matches!(error, AuthError::Encoding(_)));
    }
}
