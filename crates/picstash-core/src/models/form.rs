use super::image::ImageFile;

/// Form data for one submission interaction.
///
/// Created when the interaction starts, mutated by user input, and reset
/// after the submission resolves (success or failure).
#[derive(Clone, Debug, Default)]
pub struct SubmissionForm {
    pub image: Option<ImageFile>,
    pub title: String,
    pub description: String,
}

impl SubmissionForm {
    pub fn new(image: Option<ImageFile>, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            image,
            title: title.into(),
            description: description.into(),
        }
    }
}
