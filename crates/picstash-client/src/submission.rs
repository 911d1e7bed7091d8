//! Submission controller.
//!
//! Orchestrates one image submission: captures the upload URL, re-validates
//! on submit, gates registration on a resolved upload, sequences the two
//! network calls (upload happens-before registration), invalidates the
//! catalog listing on success, and tears the interaction down unconditionally
//! once a submission resolves.

use std::mem;
use std::sync::Arc;

use tracing::{debug, info, warn};

use picstash_core::models::{ImageFile, NewImage, PendingUpload, SubmissionForm};
use picstash_core::validation::{FieldReport, FormValidator};
use picstash_core::AppError;

use crate::api::MetadataRegistrar;
use crate::cache::{CatalogCache, IMAGES_LISTING_KEY};
use crate::hooks::{InteractionSurface, Notice, Notifier};
use crate::uploader::AssetUploader;

/// Phase of one submission interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    /// No completed upload; the interaction is open for input.
    Idle,
    /// A file was chosen and its upload is in flight.
    Uploading,
    /// The upload resolved; metadata fields may still be invalid.
    Ready,
    /// Registration in flight. Further submit attempts are excluded until it
    /// resolves.
    Submitting,
}

/// Resolution of one submit attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// Field validation failed; per-field messages are in the report. No
    /// state transition, no side effects.
    Rejected(FieldReport),
    /// Fields were valid but no upload URL has resolved. A blocking notice
    /// was emitted; no network call was made.
    Blocked,
    /// The catalog entry was registered and the listing invalidated.
    Succeeded,
    /// Registration failed; a generic notice was emitted.
    Failed,
}

/// Closes the interaction surface when the submission scope exits, on success
/// and failure alike.
struct SurfaceGuard<'a> {
    surface: &'a dyn InteractionSurface,
}

impl Drop for SurfaceGuard<'_> {
    fn drop(&mut self) {
        self.surface.close();
    }
}

/// Controller for one submission interaction.
///
/// Owns the transient form and upload state for the lifetime of the
/// interaction. All work runs on the calling task; the only suspension points
/// are the upload and registration calls, and `&mut self` excludes a second
/// submission while one is in flight.
pub struct SubmissionController {
    uploader: Arc<dyn AssetUploader>,
    registrar: Arc<dyn MetadataRegistrar>,
    cache: Arc<CatalogCache>,
    notifier: Arc<dyn Notifier>,
    surface: Arc<dyn InteractionSurface>,
    validator: FormValidator,
    form: SubmissionForm,
    pending: PendingUpload,
    state: SubmissionState,
}

impl SubmissionController {
    pub fn new(
        uploader: Arc<dyn AssetUploader>,
        registrar: Arc<dyn MetadataRegistrar>,
        cache: Arc<CatalogCache>,
        notifier: Arc<dyn Notifier>,
        surface: Arc<dyn InteractionSurface>,
    ) -> Self {
        Self {
            uploader,
            registrar,
            cache,
            notifier,
            surface,
            validator: FormValidator::default(),
            form: SubmissionForm::default(),
            pending: PendingUpload::default(),
            state: SubmissionState::Idle,
        }
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    pub fn pending(&self) -> &PendingUpload {
        &self.pending
    }

    pub fn form(&self) -> &SubmissionForm {
        &self.form
    }

    /// Set the local preview reference. Its lifecycle is independent of the
    /// remote URL and it may exist before any upload completes.
    pub fn set_preview(&mut self, url: impl Into<String>) {
        self.pending.preview_url = Some(url.into());
    }

    /// Attach a selected file and upload it, capturing the resolved content
    /// URL. Re-attaching uploads again and overwrites the previous URL.
    ///
    /// An upload fault leaves `remote_url` absent so the next submit attempt
    /// is gated; there is no retry.
    pub async fn attach_file(&mut self, file: ImageFile) -> Result<(), AppError> {
        self.validator.validate_image(Some(&file))?;

        // A fresh selection supersedes any previously resolved upload.
        self.pending.remote_url = None;
        self.state = SubmissionState::Uploading;

        let result = self.uploader.upload(&file).await;
        self.form.image = Some(file);

        match result {
            Ok(url) => {
                debug!(url = %url, "Upload resolved");
                self.pending.remote_url = Some(url);
                self.state = SubmissionState::Ready;
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "Asset upload failed; submission stays gated");
                self.state = SubmissionState::Idle;
                Err(err)
            }
        }
    }

    /// Submit the interaction: validate fields, gate on a resolved upload,
    /// register the catalog entry, and invalidate the listing on success.
    ///
    /// Once registration starts, the interaction is torn down on every
    /// outcome: transient state is reset and the surface is closed.
    pub async fn submit(
        &mut self,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> SubmissionOutcome {
        self.form.title = title.into();
        self.form.description = description.into();

        let report = self.validator.validate_form(&self.form);
        if !report.is_clean() {
            debug!(
                failures = report.failures().len(),
                "Submission rejected by field validation"
            );
            return SubmissionOutcome::Rejected(report);
        }

        if !self.pending.is_ready() {
            debug!("Submission blocked: no resolved upload");
            self.notifier.notify(Notice::upload_not_ready());
            return SubmissionOutcome::Blocked;
        }

        self.state = SubmissionState::Submitting;
        let pending = mem::take(&mut self.pending);
        let form = mem::take(&mut self.form);

        let outcome = {
            let _teardown = SurfaceGuard {
                surface: self.surface.as_ref(),
            };

            match self.commit(pending, form).await {
                Ok(()) => {
                    self.notifier.notify(Notice::image_added());
                    SubmissionOutcome::Succeeded
                }
                Err(err) => {
                    warn!(error = %err.detailed_message(), "Image registration failed");
                    self.notifier.notify(Notice::submit_failed());
                    SubmissionOutcome::Failed
                }
            }
        };

        self.state = SubmissionState::Idle;
        outcome
    }

    /// Register the entry built from the owned transient state, then
    /// invalidate the catalog listing.
    async fn commit(&self, pending: PendingUpload, form: SubmissionForm) -> Result<(), AppError> {
        let url = pending
            .remote_url
            .filter(|url| !url.is_empty())
            .ok_or(AppError::UploadNotReady)?;

        let entry = NewImage {
            url,
            title: form.title,
            description: form.description,
        };

        info!(url = %entry.url, title = %entry.title, "Registering image");
        self.registrar
            .register(&entry)
            .await
            .map_err(|err| AppError::Registration(err.to_string()))?;

        self.cache.invalidate(IMAGES_LISTING_KEY);
        Ok(())
    }
}
