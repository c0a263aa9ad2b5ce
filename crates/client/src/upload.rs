//! Multipart uploads to `/api/upload`.

use std::path::Path;

use autocatalog_catalog::Media;
use autocatalog_core::{DomainError, messages};
use reqwest::multipart::{Form, Part};

use crate::envelope::normalize_page;
use crate::error::ClientError;
use crate::http::ApiClient;

const UPLOAD_PATH: &str = "/api/upload";
const FILES_FIELD: &str = "files";

/// One file to upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub mime: Option<String>,
}

impl UploadFile {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: bytes.into(),
            mime: None,
        }
    }

    pub fn with_mime(mut self, mime: impl Into<String>) -> Self {
        self.mime = Some(mime.into());
        self
    }

    /// Read a file from disk, guessing the content type from its extension.
    pub async fn from_path(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());

        let mut file = Self::new(file_name, bytes);
        file.mime = mime_guess::from_path(path)
            .first()
            .map(|mime| mime.essence_str().to_string());
        Ok(file)
    }

    fn into_part(self) -> Result<Part, ClientError> {
        let part = Part::bytes(self.bytes).file_name(self.file_name);
        match self.mime {
            Some(mime) => part
                .mime_str(&mime)
                .map_err(|e| ClientError::Configuration(e.to_string())),
            None => Ok(part),
        }
    }
}

/// Upload adapter.
#[derive(Debug, Clone)]
pub struct Uploader {
    client: ApiClient,
}

impl Uploader {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn upload_one(&self, file: UploadFile) -> Result<Vec<Media>, ClientError> {
        self.upload(vec![file]).await
    }

    /// Upload files and return the stored-file descriptors.
    ///
    /// Requires a credential. Goes through the same hooks as every other
    /// request, so failures are published and 401/403 ends the session.
    pub async fn upload(&self, files: Vec<UploadFile>) -> Result<Vec<Media>, ClientError> {
        if files.is_empty() {
            return Err(self.reject(messages::UPLOAD_NO_FILES));
        }
        if self.client.session().token().await.is_none() {
            tracing::error!("upload refused: no credential available");
            return Err(self.reject(messages::UPLOAD_NO_CREDENTIAL));
        }

        let count = files.len();
        let mut form = Form::new();
        for file in files {
            form = form.part(FILES_FIELD, file.into_part()?);
        }

        tracing::debug!(count, "uploading files");
        let body = self.client.post_multipart(UPLOAD_PATH, form).await?;
        let stored = normalize_page::<Media>(body)?.data;

        if stored.is_empty() {
            tracing::warn!(
                count,
                "upload accepted but no files were stored; check the storage provider"
            );
        }
        Ok(stored)
    }

    fn reject(&self, message: &str) -> ClientError {
        self.client.signals().publish_error(message);
        DomainError::validation(message).into()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::signals::UiSignals;
    use autocatalog_auth::{MemoryStore, Session};

    fn uploader(fallback: Option<&str>) -> Uploader {
        let session = Arc::new(Session::new(
            Arc::new(MemoryStore::new()),
            fallback.map(str::to_string),
        ));
        let client = ApiClient::new("http://127.0.0.1:9", session, UiSignals::default()).unwrap();
        client.uploads()
    }

    #[tokio::test]
    async fn upload_without_credential_is_refused_and_published() {
        let uploader = uploader(None);
        let err = uploader
            .upload_one(UploadFile::new("a.png", vec![1, 2, 3]))
            .await
            .unwrap_err();

        assert_eq!(err.user_message(), messages::UPLOAD_NO_CREDENTIAL);
        assert_eq!(
            uploader.client.signals().last_error().as_deref(),
            Some(messages::UPLOAD_NO_CREDENTIAL)
        );
    }

    #[tokio::test]
    async fn upload_with_no_files_is_refused() {
        let err = uploader(Some("service-token")).upload(Vec::new()).await.unwrap_err();
        assert_eq!(err.user_message(), messages::UPLOAD_NO_FILES);
    }

    #[test]
    fn invalid_mime_is_a_configuration_error() {
        let file = UploadFile::new("a.bin", vec![0]).with_mime("not a mime");
        assert!(matches!(file.into_part(), Err(ClientError::Configuration(_))));
    }

    #[tokio::test]
    async fn from_path_reads_bytes_and_guesses_mime() {
        let path = std::env::temp_dir().join(format!("autocatalog-upload-{}.PNG", std::process::id()));
        tokio::fs::write(&path, b"png-bytes").await.unwrap();

        let file = UploadFile::from_path(&path).await.unwrap();
        assert_eq!(file.bytes, b"png-bytes");
        assert_eq!(file.mime.as_deref(), Some("image/png"));
        assert!(file.file_name.ends_with(".PNG"));

        tokio::fs::remove_file(&path).await.unwrap();
    }

    #[tokio::test]
    async fn video_is_typed_and_unknown_extensions_are_left_untyped() {
        let dir = std::env::temp_dir();
        let video = dir.join(format!("autocatalog-upload-{}.mp4", std::process::id()));
        let other = dir.join(format!("autocatalog-upload-{}.zzqq", std::process::id()));
        tokio::fs::write(&video, b"v").await.unwrap();
        tokio::fs::write(&other, b"o").await.unwrap();

        let typed = UploadFile::from_path(&video).await.unwrap();
        let untyped = UploadFile::from_path(&other).await.unwrap();
        assert_eq!(typed.mime.as_deref(), Some("video/mp4"));
        assert_eq!(untyped.mime, None);

        tokio::fs::remove_file(&video).await.unwrap();
        tokio::fs::remove_file(&other).await.unwrap();
    }
}
