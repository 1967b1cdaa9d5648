//! 本地文件系统对象存储
//!
//! bucket 映射为根目录下的子目录。部署到托管对象存储时以同一契约替换。

use std::path::PathBuf;

use async_trait::async_trait;
use tracing::debug;

use super::BlobStore;
use crate::errors::{LMSystemError, Result};

pub struct LocalBlobStore {
    root: PathBuf,
    public_base: String,
}

impl LocalBlobStore {
    pub fn new(root: impl Into<PathBuf>, public_base: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_base: public_base.into(),
        }
    }

    fn object_path(&self, bucket: &str, path: &str) -> PathBuf {
        self.root.join(bucket).join(path)
    }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    async fn upload(&self, bucket: &str, path: &str, bytes: &[u8]) -> Result<String> {
        let target = self.object_path(bucket, path);
        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| LMSystemError::storage_failure(format!("创建存储目录失败: {e}")))?;
        }

        tokio::fs::write(&target, bytes)
            .await
            .map_err(|e| LMSystemError::storage_failure(format!("写入对象失败 {bucket}/{path}: {e}")))?;

        debug!("对象已写入: {}/{} ({} 字节)", bucket, path, bytes.len());
        Ok(path.to_string())
    }

    fn url(&self, bucket: &str, path: &str) -> String {
        format!("{}/{}/{}", self.public_base, bucket, path)
    }

    async fn delete(&self, bucket: &str, path: &str) -> Result<()> {
        match tokio::fs::remove_file(self.object_path(bucket, path)).await {
            Ok(()) => Ok(()),
            // 幂等删除：重试时对象可能已经不存在
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(LMSystemError::storage_failure(format!(
                "删除对象失败 {bucket}/{path}: {e}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> LocalBlobStore {
        let root = std::env::temp_dir().join(format!("lmsystem-blob-{}", uuid::Uuid::new_v4()));
        LocalBlobStore::new(root, "/files")
    }

    #[tokio::test]
    async fn test_upload_then_delete() {
        let store = temp_store();
        let path = store.upload("submission-files", "a/b.pdf", b"%PDF-1.7").await.unwrap();
        assert_eq!(path, "a/b.pdf");

        let on_disk = store.object_path("submission-files", "a/b.pdf");
        assert_eq!(std::fs::read(&on_disk).unwrap(), b"%PDF-1.7");

        store.delete("submission-files", "a/b.pdf").await.unwrap();
        assert!(!on_disk.exists());
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let store = temp_store();
        store.delete("submission-files", "missing.pdf").await.unwrap();
    }

    #[test]
    fn test_url_layout() {
        let store = temp_store();
        assert_eq!(
            store.url("assignment-documents", "x.pdf"),
            "/files/assignment-documents/x.pdf"
        );
    }
}
