//! Result type alias for Redline

use super::errors::RedlineError;

/// Result type alias for Redline operations
///
/// # Examples
///
/// ```
/// use redline::domain::result::Result;
/// use redline::domain::errors::RedlineError;
///
/// fn failing_function() -> Result<()> {
///     Err(RedlineError::Validation("Invalid input".to_string()))
/// }
/// assert!(failing_function().is_err());
/// ```
pub type Result<T> = std::result::Result<T, RedlineError>;
