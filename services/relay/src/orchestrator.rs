//! Upload cycle: stage the CSV, forward it, then pull each augmented variant.

use bytes::Bytes;
use tracing::{info, warn};
use uuid::Uuid;

use crate::artifact_store::{ArtifactStore, UPLOADED_FILE_NAME};
use crate::error::{RelayError, RelayResult};
use crate::remote::AugmentService;
use crate::types::{AugType, UploadResponse};

pub const UPLOAD_OK_MESSAGE: &str = "File uploaded and augmented files saved successfully";

/// File part received from the browser.
#[derive(Clone, Debug)]
pub struct IncomingFile {
    pub file_name: Option<String>,
    pub bytes: Bytes,
}

pub fn validate_upload(file: Option<&IncomingFile>) -> RelayResult<&IncomingFile> {
    let file = file.ok_or_else(|| RelayError::BadRequest("No file in request".to_string()))?;

    let name = file.file_name.as_deref().unwrap_or("");
    if name.is_empty() {
        return Err(RelayError::BadRequest("No selected file".to_string()));
    }
    if !name.ends_with(".csv") {
        return Err(RelayError::BadRequest("Only CSV files are allowed".to_string()));
    }
    Ok(file)
}

/// Runs one upload cycle. Steps are strictly sequential and stop at the first
/// failure; artifacts written before the failure stay on disk.
pub async fn run_upload_cycle(
    service: &dyn AugmentService,
    store: &ArtifactStore,
    file: Option<&IncomingFile>,
) -> RelayResult<UploadResponse> {
    let file = validate_upload(file)?;
    let cycle_id = Uuid::new_v4();

    // 1) stage locally
    let staged = store.save_upload(&file.bytes).await?;
    info!(cycle_id=%cycle_id, path=%staged.display(), bytes=file.bytes.len(), "upload: staged");

    // 2) forward the staged copy
    let staged_bytes = store.read_upload().await?;
    let resp = service.upload(UPLOADED_FILE_NAME, staged_bytes).await?;
    if !resp.is_ok() {
        warn!(cycle_id=%cycle_id, status=%resp.status, "upload: remote rejected file");
        return Err(RelayError::RemoteUploadFailed);
    }

    // 3) pull variants in order
    let mut artifacts = Vec::with_capacity(AugType::ALL.len());
    for aug_type in AugType::ALL {
        let resp = service.augment_download(aug_type).await?;
        if !resp.is_ok() {
            warn!(
                cycle_id=%cycle_id,
                aug_type=%aug_type,
                status=%resp.status,
                saved=artifacts.len(),
                "upload: augment fetch failed"
            );
            return Err(RelayError::AugmentFetchFailed(aug_type));
        }
        let saved = store.save_artifact(aug_type, &resp.body).await?;
        info!(cycle_id=%cycle_id, aug_type=%aug_type, path=%saved.path, bytes=saved.bytes, "upload: artifact saved");
        artifacts.push(saved);
    }

    Ok(UploadResponse {
        message: UPLOAD_OK_MESSAGE.to_string(),
        saved_files: artifacts.iter().map(|a| a.path.clone()).collect(),
        artifacts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::{RemoteError, RemoteResponse};
    use async_trait::async_trait;
    use reqwest::StatusCode;
    use serde_json::Value;
    use std::sync::Mutex;

    /// Records every call; fails the upload or one augmentation type on demand.
    #[derive(Default)]
    struct FakeService {
        calls: Mutex<Vec<String>>,
        uploaded: Mutex<Vec<u8>>,
        reject_upload: bool,
        fail_type: Option<AugType>,
    }

    impl FakeService {
        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl AugmentService for FakeService {
        async fn upload(&self, file_name: &str, bytes: Vec<u8>) -> Result<RemoteResponse, RemoteError> {
            self.calls.lock().unwrap().push(format!("upload:{file_name}"));
            *self.uploaded.lock().unwrap() = bytes;
            let status = if self.reject_upload { StatusCode::INTERNAL_SERVER_ERROR } else { StatusCode::OK };
            Ok(RemoteResponse::new(status, "{}"))
        }

        async fn augment_download(&self, aug_type: AugType) -> Result<RemoteResponse, RemoteError> {
            self.calls.lock().unwrap().push(format!("augment:{aug_type}"));
            if self.fail_type == Some(aug_type) {
                return Ok(RemoteResponse::new(StatusCode::NOT_FOUND, ""));
            }
            Ok(RemoteResponse::new(StatusCode::OK, format!("Q,Q-AUG\nhello,{aug_type}\n")))
        }

        async fn tsne(&self) -> Result<RemoteResponse, RemoteError> {
            unimplemented!()
        }

        async fn performance(&self) -> Result<RemoteResponse, RemoteError> {
            unimplemented!()
        }

        async fn augdata(&self, _payload: &Value) -> Result<RemoteResponse, RemoteError> {
            unimplemented!()
        }

        async fn chatbot(&self, _payload: &Value) -> Result<RemoteResponse, RemoteError> {
            unimplemented!()
        }

        fn base_url(&self) -> &str {
            "memory://"
        }
    }

    fn csv(name: &str) -> IncomingFile {
        IncomingFile {
            file_name: Some(name.to_string()),
            bytes: Bytes::from_static(b"Q\nhello\n"),
        }
    }

    fn file_count(dir: &std::path::Path) -> usize {
        match std::fs::read_dir(dir) {
            Ok(rd) => rd.count(),
            Err(_) => 0,
        }
    }

    #[tokio::test]
    async fn test_full_cycle_writes_five_files_in_order() {
        let tmp = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(tmp.path().join("users"));
        let svc = FakeService::default();

        let out = run_upload_cycle(&svc, &store, Some(&csv("train.csv"))).await.unwrap();

        assert_eq!(out.message, UPLOAD_OK_MESSAGE);
        let names: Vec<_> = out
            .saved_files
            .iter()
            .map(|p| std::path::Path::new(p).file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["data_sr.csv", "data_ri.csv", "data_rs.csv", "data_rd.csv"]);
        assert_eq!(file_count(store.dir()), 5);
        assert_eq!(*svc.uploaded.lock().unwrap(), b"Q\nhello\n");
        assert_eq!(
            svc.calls(),
            vec!["upload:uploaded_file.csv", "augment:SR", "augment:RI", "augment:RS", "augment:RD"]
        );
    }

    #[tokio::test]
    async fn test_rejects_before_any_io() {
        let tmp = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(tmp.path().join("users"));
        let svc = FakeService::default();

        for (file, msg) in [
            (None, "No file in request"),
            (Some(IncomingFile { file_name: None, bytes: Bytes::new() }), "No selected file"),
            (Some(csv("")), "No selected file"),
            (Some(csv("data.txt")), "Only CSV files are allowed"),
            (Some(csv("DATA.CSV")), "Only CSV files are allowed"),
        ] {
            let err = run_upload_cycle(&svc, &store, file.as_ref()).await.unwrap_err();
            match err {
                RelayError::BadRequest(m) => assert_eq!(m, msg),
                other => panic!("unexpected: {other:?}"),
            }
        }
        assert!(svc.calls().is_empty());
        assert!(!store.dir().exists());
    }

    #[tokio::test]
    async fn test_remote_upload_failure_writes_no_artifacts() {
        let tmp = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(tmp.path());
        let svc = FakeService { reject_upload: true, ..Default::default() };

        let err = run_upload_cycle(&svc, &store, Some(&csv("a.csv"))).await.unwrap_err();
        assert!(matches!(err, RelayError::RemoteUploadFailed));
        assert_eq!(svc.calls(), vec!["upload:uploaded_file.csv"]);
        for t in AugType::ALL {
            assert!(!store.artifact_path(t).exists());
        }
    }

    #[tokio::test]
    async fn test_fail_fast_keeps_earlier_artifacts() {
        let tmp = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(tmp.path());
        let svc = FakeService { fail_type: Some(AugType::RandomSwap), ..Default::default() };

        let err = run_upload_cycle(&svc, &store, Some(&csv("a.csv"))).await.unwrap_err();
        assert!(matches!(err, RelayError::AugmentFetchFailed(AugType::RandomSwap)));

        assert!(store.artifact_path(AugType::SynonymReplacement).exists());
        assert!(store.artifact_path(AugType::RandomInsertion).exists());
        assert!(!store.artifact_path(AugType::RandomSwap).exists());
        assert!(!store.artifact_path(AugType::RandomDeletion).exists());
        assert!(!svc.calls().contains(&"augment:RD".to_string()));
    }
}
