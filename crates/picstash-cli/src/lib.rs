//! Helpers for the picstash CLI binary.

use anyhow::Context;
use picstash_core::models::ImageFile;
use std::path::Path;

/// Map a file extension to the media type declared on upload.
pub fn content_type_for_path(path: &Path) -> String {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());

    match extension.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg".to_string(),
        Some("png") => "image/png".to_string(),
        Some("gif") => "image/gif".to_string(),
        Some(other) => format!("image/{}", other),
        None => "application/octet-stream".to_string(),
    }
}

/// Read a local file into an [`ImageFile`] with its declared media type.
pub fn image_file_from_path(path: &Path) -> anyhow::Result<ImageFile> {
    let data = std::fs::read(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;

    let filename = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("image")
        .to_string();

    Ok(ImageFile::new(filename, content_type_for_path(path), data))
}

/// Initialize tracing for the CLI binary.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn content_type_for_known_extensions() {
        assert_eq!(content_type_for_path(Path::new("a.png")), "image/png");
        assert_eq!(content_type_for_path(Path::new("a.jpg")), "image/jpeg");
        assert_eq!(content_type_for_path(Path::new("a.JPEG")), "image/jpeg");
        assert_eq!(content_type_for_path(Path::new("a.gif")), "image/gif");
    }

    #[test]
    fn content_type_for_other_extensions() {
        assert_eq!(content_type_for_path(Path::new("a.webp")), "image/webp");
        assert_eq!(
            content_type_for_path(Path::new("noextension")),
            "application/octet-stream"
        );
    }

    #[test]
    fn image_file_from_path_reads_bytes_and_type() {
        let mut file = tempfile::Builder::new()
            .prefix("picstash-test")
            .suffix(".png")
            .tempfile()
            .unwrap();
        file.write_all(&[0u8; 32]).unwrap();

        let image = image_file_from_path(file.path()).unwrap();
        assert_eq!(image.size(), 32);
        assert_eq!(image.content_type, "image/png");
        assert!(image.filename.ends_with(".png"));
    }

    #[test]
    fn image_file_from_missing_path_fails() {
        let err = image_file_from_path(Path::new("/nonexistent/picstash.png")).unwrap_err();
        assert!(err.to_string().contains("Failed to read file"));
    }
}
