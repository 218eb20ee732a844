//! Image acquisition: turn a picked or dropped file into a data URL.

use crate::error::{PromptError, Result};
use crate::models::DataUrl;
use std::path::Path;

/// Types offered by the file picker. Dropped files are not checked against it.
pub const ACCEPTED_MIME_TYPES: [&str; 3] = ["image/png", "image/jpeg", "image/webp"];

const FALLBACK_MIME: &str = "application/octet-stream";

#[derive(Debug, Clone, Default)]
pub struct ImageFile {
    pub name: Option<String>,
    pub mime: Option<String>,
    pub bytes: Vec<u8>,
}

impl ImageFile {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            ..Default::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_mime(mut self, mime: impl Into<String>) -> Self {
        self.mime = Some(mime.into());
        self
    }

    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| PromptError::ImageReadError(format!("{}: {}", path.display(), e)))?;

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned());

        Ok(Self {
            mime: name.as_deref().and_then(mime_from_extension).map(String::from),
            name,
            bytes,
        })
    }

    /// Declared type first, then the extension, then the file's magic bytes.
    pub fn resolved_mime(&self) -> &str {
        self.mime
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty() && *m != FALLBACK_MIME)
            .or_else(|| self.name.as_deref().and_then(mime_from_extension))
            .or_else(|| sniff_mime(&self.bytes))
            .unwrap_or(FALLBACK_MIME)
    }
}

/// Only the first file is considered; the rest are dropped.
pub fn pick_first(files: impl IntoIterator<Item = ImageFile>) -> Option<ImageFile> {
    let mut files = files.into_iter();
    let first = files.next()?;
    let ignored = files.count();
    if ignored > 0 {
        log::debug!("Ignoring {} extra file(s) in upload", ignored);
    }
    Some(first)
}

pub fn is_accepted(mime: &str) -> bool {
    ACCEPTED_MIME_TYPES.contains(&mime)
}

pub fn read_as_data_url(file: &ImageFile) -> Result<DataUrl> {
    if file.bytes.is_empty() {
        return Err(PromptError::ImageReadError(format!(
            "{} is empty",
            file.name.as_deref().unwrap_or("file")
        )));
    }

    let mime = file.resolved_mime();
    if !is_accepted(mime) {
        log::warn!(
            "Uploaded file {} has type {}, expected one of {}",
            file.name.as_deref().unwrap_or("<unnamed>"),
            mime,
            ACCEPTED_MIME_TYPES.join(", ")
        );
    }

    Ok(DataUrl::encode(mime, &file.bytes))
}

fn mime_from_extension(name: &str) -> Option<&'static str> {
    let (_, ext) = name.rsplit_once('.')?;
    match ext.to_ascii_lowercase().as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" | "jfif" => Some("image/jpeg"),
        "webp" => Some("image/webp"),
        "gif" => Some("image/gif"),
        _ => None,
    }
}

fn sniff_mime(bytes: &[u8]) -> Option<&'static str> {
    if bytes.starts_with(b"\x89PNG\r\n\x1a\n") {
        Some("image/png")
    } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        Some("image/jpeg")
    } else if bytes.len() >= 12 && &bytes[..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
        Some("image/webp")
    } else if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
        Some("image/gif")
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const PNG_HEADER: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";

    #[test]
    fn test_mime_resolution_order() {
        let declared = ImageFile::new(PNG_HEADER.to_vec())
            .with_name("photo.jpg")
            .with_mime("image/webp");
        assert_eq!(declared.resolved_mime(), "image/webp");

        let by_name = ImageFile::new(PNG_HEADER.to_vec()).with_name("photo.JPG");
        assert_eq!(by_name.resolved_mime(), "image/jpeg");

        let sniffed = ImageFile::new(PNG_HEADER.to_vec()).with_mime("application/octet-stream");
        assert_eq!(sniffed.resolved_mime(), "image/png");

        let unknown = ImageFile::new(b"plain text".to_vec());
        assert_eq!(unknown.resolved_mime(), "application/octet-stream");
    }

    #[test]
    fn test_webp_sniffing() {
        let mut bytes = b"RIFF\0\0\0\0WEBPVP8 ".to_vec();
        bytes.extend_from_slice(&[0; 8]);
        assert_eq!(ImageFile::new(bytes).resolved_mime(), "image/webp");
    }

    #[test]
    fn test_unaccepted_type_is_still_read() {
        let gif = ImageFile::new(b"GIF89a\x01\x00".to_vec());
        let url = read_as_data_url(&gif).unwrap();
        assert_eq!(url.mime(), Some("image/gif"));
        assert!(!is_accepted("image/gif"));
    }

    #[test]
    fn test_empty_file_is_an_error() {
        let err = read_as_data_url(&ImageFile::new(Vec::new()).with_name("blank.png")).unwrap_err();
        assert!(matches!(err, PromptError::ImageReadError(_)));
        assert!(err.to_string().contains("blank.png"));
    }

    #[test]
    fn test_pick_first_ignores_extras() {
        let files = vec![
            ImageFile::new(vec![1]).with_name("a.png"),
            ImageFile::new(vec![2]).with_name("b.png"),
        ];
        let picked = pick_first(files).unwrap();
        assert_eq!(picked.name.as_deref(), Some("a.png"));
        assert!(pick_first(Vec::new()).is_none());
    }

    #[tokio::test]
    async fn test_from_path() {
        let mut file = tempfile::Builder::new().suffix(".png").tempfile().unwrap();
        file.write_all(PNG_HEADER).unwrap();

        let image = ImageFile::from_path(file.path()).await.unwrap();
        assert_eq!(image.mime.as_deref(), Some("image/png"));
        assert_eq!(image.bytes, PNG_HEADER);

        let url = read_as_data_url(&image).unwrap();
        assert!(url.as_str().starts_with("data:image/png;base64,"));
    }

    #[tokio::test]
    async fn test_from_missing_path() {
        let dir = tempfile::tempdir().unwrap();
        let err = ImageFile::from_path(dir.path().join("missing.png"))
            .await
            .unwrap_err();
        assert!(matches!(err, PromptError::ImageReadError(_)));
    }
}
