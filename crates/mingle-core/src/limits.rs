//! Input validation bounds for user-provided fields

/// Minimum username length (3 chars)
pub const MIN_USERNAME_LEN: usize = 3;

/// Maximum username length (15 chars)
pub const MAX_USERNAME_LEN: usize = 15;

/// Minimum password length (8 chars)
pub const MIN_PASSWORD_LEN: usize = 8;

/// Maximum password length (50 chars)
pub const MAX_PASSWORD_LEN: usize = 50;

/// Minimum post content length (1 char)
pub const MIN_POST_CONTENT_LEN: usize = 1;

/// Maximum post content length (5000 chars)
pub const MAX_POST_CONTENT_LEN: usize = 5000;

/// Validation error type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    UsernameLength { len: usize },
    PasswordLength { len: usize },
    PostContentLength { len: usize },
    EmbeddedLineBreak { field: &'static str },
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UsernameLength { len } => write!(
                f,
                "Username must be {}-{} characters (got {})",
                MIN_USERNAME_LEN, MAX_USERNAME_LEN, len
            ),
            Self::PasswordLength { len } => write!(
                f,
                "Password must be {}-{} characters (got {})",
                MIN_PASSWORD_LEN, MAX_PASSWORD_LEN, len
            ),
            Self::PostContentLength { len } => write!(
                f,
                "Post content must be {}-{} characters (got {})",
                MIN_POST_CONTENT_LEN, MAX_POST_CONTENT_LEN, len
            ),
            Self::EmbeddedLineBreak { field } => {
                write!(f, "{} may not contain line breaks", field)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

fn reject_line_breaks(value: &str, field: &'static str) -> Result<(), ValidationError> {
    // Line breaks would corrupt the newline-delimited stores on save.
    if value.contains('\n') || value.contains('\r') {
        return Err(ValidationError::EmbeddedLineBreak { field });
    }
    Ok(())
}

/// Validate a username (length only; uniqueness is the caller's query)
pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    let len = username.chars().count();
    if !(MIN_USERNAME_LEN..=MAX_USERNAME_LEN).contains(&len) {
        return Err(ValidationError::UsernameLength { len });
    }
    reject_line_breaks(username, "Username")
}

/// Validate a password
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    let len = password.chars().count();
    if !(MIN_PASSWORD_LEN..=MAX_PASSWORD_LEN).contains(&len) {
        return Err(ValidationError::PasswordLength { len });
    }
    reject_line_breaks(password, "Password")
}

/// Validate post content
pub fn validate_post_content(content: &str) -> Result<(), ValidationError> {
    let len = content.chars().count();
    if !(MIN_POST_CONTENT_LEN..=MAX_POST_CONTENT_LEN).contains(&len) {
        return Err(ValidationError::PostContentLength { len });
    }
    reject_line_breaks(content, "Post content")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_length_boundaries() {
        assert!(validate_username(&"x".repeat(2)).is_err());
        assert!(validate_username(&"x".repeat(3)).is_ok());
        assert!(validate_username(&"x".repeat(15)).is_ok());
        assert!(validate_username(&"x".repeat(16)).is_err());
    }

    #[test]
    fn test_password_length_boundaries() {
        assert!(validate_password(&"x".repeat(7)).is_err());
        assert!(validate_password(&"x".repeat(8)).is_ok());
        assert!(validate_password(&"x".repeat(50)).is_ok());
        assert!(validate_password(&"x".repeat(51)).is_err());
    }

    #[test]
    fn test_post_content_length_boundaries() {
        assert!(validate_post_content("").is_err());
        assert!(validate_post_content("x").is_ok());
        assert!(validate_post_content(&"x".repeat(5000)).is_ok());
        assert!(validate_post_content(&"x".repeat(5001)).is_err());
    }

    #[test]
    fn test_line_breaks_rejected() {
        assert_eq!(
            validate_username("ali\nce"),
            Err(ValidationError::EmbeddedLineBreak { field: "Username" })
        );
        assert!(validate_password("pass\rword1").is_err());
        assert!(validate_post_content("hello\nworld").is_err());
    }

    #[test]
    fn test_lengths_count_characters_not_bytes() {
        // Three multibyte characters are a valid 3-char username.
        assert!(validate_username("äöü").is_ok());
    }
}
