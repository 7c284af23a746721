//! Input validation for untrusted data.
//!
//! Page ids and slugs end up in file names and URLs; component lists end
//! up in memory and on disk. Everything coming over HTTP is checked here
//! first.

use std::collections::HashSet;

use page_core::ComponentInstance;
use thiserror::Error;

/// Maximum length for page IDs.
pub const MAX_PAGE_ID_LEN: usize = 64;
/// Maximum length for page slugs.
pub const MAX_SLUG_LEN: usize = 64;
/// Maximum length for component IDs (UUIDs are 36 chars).
pub const MAX_COMPONENT_ID_LEN: usize = 64;
/// Maximum components per page.
pub const MAX_COMPONENTS_PER_PAGE: usize = 2_000;
/// Maximum request body size.
pub const MAX_BODY_BYTES: usize = 4 * 1_048_576; // 4MB

/// Validation error types.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// Page ID exceeds maximum length.
    #[error("page_id too long (max {MAX_PAGE_ID_LEN} chars)")]
    PageIdTooLong,
    /// Page ID is empty or contains invalid characters.
    #[error("page_id contains invalid characters")]
    PageIdInvalidChars,
    /// Slug exceeds maximum length.
    #[error("slug too long (max {MAX_SLUG_LEN} chars)")]
    SlugTooLong,
    /// Slug is empty or contains invalid characters.
    #[error("slug contains invalid characters")]
    SlugInvalidChars,
    /// Too many components on one page.
    #[error("too many components (max {MAX_COMPONENTS_PER_PAGE})")]
    TooManyComponents,
    /// A component ID is empty or too long.
    #[error("invalid component id: {0:?}")]
    InvalidComponentId(String),
    /// Two components share an ID.
    #[error("duplicate component id: {0}")]
    DuplicateComponentId(String),
}

impl ValidationError {
    /// Short label for metrics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::PageIdTooLong | Self::PageIdInvalidChars => "page_id",
            Self::SlugTooLong | Self::SlugInvalidChars => "slug",
            Self::TooManyComponents => "component_count",
            Self::InvalidComponentId(_) | Self::DuplicateComponentId(_) => "component_id",
        }
    }
}

/// Check if a character is valid for IDs (alphanumeric, hyphen, or underscore).
fn is_valid_id_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

/// Validate a page ID.
///
/// Valid page IDs:
/// - 1-64 characters
/// - ASCII alphanumeric, hyphen, underscore only
///
/// # Errors
///
/// Returns [`ValidationError::PageIdTooLong`] if the ID exceeds 64 characters.
/// Returns [`ValidationError::PageIdInvalidChars`] if the ID is empty or
/// contains invalid characters.
pub fn validate_page_id(id: &str) -> Result<(), ValidationError> {
    if id.len() > MAX_PAGE_ID_LEN {
        return Err(ValidationError::PageIdTooLong);
    }
    if id.is_empty() || !id.chars().all(is_valid_id_char) {
        return Err(ValidationError::PageIdInvalidChars);
    }
    Ok(())
}

/// Validate a public slug. Same character rules as page IDs.
///
/// # Errors
///
/// Returns [`ValidationError::SlugTooLong`] or [`ValidationError::SlugInvalidChars`].
pub fn validate_slug(slug: &str) -> Result<(), ValidationError> {
    if slug.len() > MAX_SLUG_LEN {
        return Err(ValidationError::SlugTooLong);
    }
    if slug.is_empty() || !slug.chars().all(is_valid_id_char) {
        return Err(ValidationError::SlugInvalidChars);
    }
    Ok(())
}

/// Validate a component list before it replaces a page's components.
///
/// Types are not checked: unknown types are stored and skipped at render.
///
/// # Errors
///
/// Returns [`ValidationError::TooManyComponents`], or an id error for
/// empty, oversized or duplicated component IDs.
pub fn validate_components(components: &[ComponentInstance]) -> Result<(), ValidationError> {
    if components.len() > MAX_COMPONENTS_PER_PAGE {
        return Err(ValidationError::TooManyComponents);
    }
    let mut seen = HashSet::with_capacity(components.len());
    for component in components {
        let id = component.id.as_str();
        if id.trim().is_empty() || id.len() > MAX_COMPONENT_ID_LEN {
            return Err(ValidationError::InvalidComponentId(id.to_string()));
        }
        if !seen.insert(id) {
            return Err(ValidationError::DuplicateComponentId(id.to_string()));
        }
    }
    Ok(())
}
