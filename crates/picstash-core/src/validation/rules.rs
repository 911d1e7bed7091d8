use regex::Regex;
use std::fmt;

use crate::models::{ImageFile, SubmissionForm};

/// Uploads at or above this size are rejected.
pub const MAX_FILE_SIZE_BYTES: u64 = 10_000_000;
pub const TITLE_MIN_CHARS: usize = 2;
pub const TITLE_MAX_CHARS: usize = 20;
pub const DESCRIPTION_MAX_CHARS: usize = 65;

/// Accepted media types: the final path-like segment of the type string must
/// end with one of the tokens `jpeg`, `gif`, `png` (case-sensitive), before
/// any query or fragment separator.
const ACCEPTED_FORMAT_PATTERN: &str = r"(?:^|/)[^/?#]*(?:jpeg|gif|png)(?:[?#].*)?$";

/// Form fields subject to validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldName {
    Image,
    Title,
    Description,
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldName::Image => write!(f, "Image"),
            FieldName::Title => write!(f, "Title"),
            FieldName::Description => write!(f, "Description"),
        }
    }
}

/// Per-field validation failures with their user-facing messages.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("File is required")]
    MissingFile,

    #[error("File must be smaller than 10MB")]
    FileTooLarge { size: u64 },

    #[error("Only PNG, JPEG and GIF files are accepted")]
    UnsupportedFormat { content_type: String },

    #[error("{field} is required")]
    Required { field: FieldName },

    #[error("{field} must be at least {min} characters")]
    TooShort { field: FieldName, min: usize },

    #[error("{field} must be at most {max} characters")]
    TooLong { field: FieldName, max: usize },
}

/// Aggregated validation outcome for one submission attempt.
///
/// Fields are validated independently (no cross-field short-circuit); each
/// entry holds the first failing rule for that field, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldReport {
    pub image: Option<FieldError>,
    pub title: Option<FieldError>,
    pub description: Option<FieldError>,
}

impl FieldReport {
    pub fn is_clean(&self) -> bool {
        self.image.is_none() && self.title.is_none() && self.description.is_none()
    }

    /// Failing fields with their errors, in form order.
    pub fn failures(&self) -> Vec<(FieldName, &FieldError)> {
        let mut out = Vec::new();
        if let Some(err) = &self.image {
            out.push((FieldName::Image, err));
        }
        if let Some(err) = &self.title {
            out.push((FieldName::Title, err));
        }
        if let Some(err) = &self.description {
            out.push((FieldName::Description, err));
        }
        out
    }
}

/// Submission form validator
///
/// Pure, synchronous checks over candidate field values. Rules for a single
/// field short-circuit (first failure wins); fields are independent of each
/// other.
pub struct FormValidator {
    max_file_size: u64,
    accepted_formats: Regex,
    title_min: usize,
    title_max: usize,
    description_max: usize,
}

impl Default for FormValidator {
    fn default() -> Self {
        Self::new(MAX_FILE_SIZE_BYTES)
    }
}

impl FormValidator {
    pub fn new(max_file_size: u64) -> Self {
        Self {
            max_file_size,
            accepted_formats: Regex::new(ACCEPTED_FORMAT_PATTERN)
                .expect("accepted format pattern compiles"),
            title_min: TITLE_MIN_CHARS,
            title_max: TITLE_MAX_CHARS,
            description_max: DESCRIPTION_MAX_CHARS,
        }
    }

    /// Validate the image field: presence, then size, then declared format.
    pub fn validate_image(&self, image: Option<&ImageFile>) -> Result<(), FieldError> {
        let image = image.ok_or(FieldError::MissingFile)?;

        if image.size() >= self.max_file_size {
            return Err(FieldError::FileTooLarge { size: image.size() });
        }

        if !self.accepted_formats.is_match(&image.content_type) {
            return Err(FieldError::UnsupportedFormat {
                content_type: image.content_type.clone(),
            });
        }

        Ok(())
    }

    /// Validate the title: required, then length within bounds.
    pub fn validate_title(&self, title: &str) -> Result<(), FieldError> {
        if title.is_empty() {
            return Err(FieldError::Required {
                field: FieldName::Title,
            });
        }

        let len = title.chars().count();
        if len < self.title_min {
            return Err(FieldError::TooShort {
                field: FieldName::Title,
                min: self.title_min,
            });
        }
        if len > self.title_max {
            return Err(FieldError::TooLong {
                field: FieldName::Title,
                max: self.title_max,
            });
        }

        Ok(())
    }

    /// Validate the description: required, then maximum length.
    pub fn validate_description(&self, description: &str) -> Result<(), FieldError> {
        if description.is_empty() {
            return Err(FieldError::Required {
                field: FieldName::Description,
            });
        }

        if description.chars().count() > self.description_max {
            return Err(FieldError::TooLong {
                field: FieldName::Description,
                max: self.description_max,
            });
        }

        Ok(())
    }

    /// Validate all fields of a submission attempt independently.
    pub fn validate_form(&self, form: &SubmissionForm) -> FieldReport {
        FieldReport {
            image: self.validate_image(form.image.as_ref()).err(),
            title: self.validate_title(&form.title).err(),
            description: self.validate_description(&form.description).err(),
        }
    }
}
