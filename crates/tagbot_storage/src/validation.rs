//! Tag field validation.

use regex::Regex;
use tagbot_error::{ConfigError, TagbotResult};

const IMAGE_URL_PATTERN: &str = r"(?i)^https?://.*\.(jpg|jpeg|png|gif|webp)$";

/// Checks user-submitted tag fields.
#[derive(Debug, Clone)]
pub struct TagValidator {
    image_url: Regex,
}

impl TagValidator {
    /// Compile the validator.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if a pattern fails to compile.
    pub fn new() -> TagbotResult<Self> {
        let image_url = Regex::new(IMAGE_URL_PATTERN).map_err(|e| {
            ConfigError::new(format!("Invalid image URL pattern '{}': {}", IMAGE_URL_PATTERN, e))
        })?;
        Ok(Self { image_url })
    }

    /// True for http(s) links ending in a common image extension.
    ///
    /// # Examples
    ///
    /// ```
    /// use tagbot_storage::TagValidator;
    ///
    /// let validator = TagValidator::new().unwrap();
    /// assert!(validator.is_image_url("https://example.com/cat.PNG"));
    /// assert!(!validator.is_image_url("https://example.com/cat"));
    /// ```
    pub fn is_image_url(&self, url: &str) -> bool {
        self.image_url.is_match(url)
    }
}
