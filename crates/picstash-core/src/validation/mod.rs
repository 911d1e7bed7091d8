//! Validation rules for the submission form.

pub mod rules;

pub use rules::{
    FieldError, FieldName, FieldReport, FormValidator, DESCRIPTION_MAX_CHARS, MAX_FILE_SIZE_BYTES,
    TITLE_MAX_CHARS, TITLE_MIN_CHARS,
};
