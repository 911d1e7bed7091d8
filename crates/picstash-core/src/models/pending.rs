/// Transient upload state for one interaction, owned by the submission
/// controller and handed to the submission step by value.
///
/// `remote_url` is set once the asset uploader resolves; absence means no
/// completed upload yet. `preview_url` is a local-only reference with a
/// lifecycle independent of `remote_url` and may exist before the upload
/// completes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PendingUpload {
    pub remote_url: Option<String>,
    pub preview_url: Option<String>,
}

impl PendingUpload {
    /// Whether metadata registration may proceed: requires a present,
    /// non-empty remote URL.
    pub fn is_ready(&self) -> bool {
        self.remote_url.as_deref().is_some_and(|url| !url.is_empty())
    }

    /// The resolved remote URL, if the upload completed.
    pub fn remote_url(&self) -> Option<&str> {
        self.remote_url.as_deref().filter(|url| !url.is_empty())
    }
}
