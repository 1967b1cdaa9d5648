//! 对象存储抽象
//!
//! 引擎只负责元数据与路径，字节读写通过该契约交给外部对象存储。

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::Result;
use crate::utils::file_extension;

mod local;

pub use local::LocalBlobStore;

#[async_trait]
pub trait BlobStore: Send + Sync {
    /// 上传字节，返回最终存储路径
    async fn upload(&self, bucket: &str, path: &str, bytes: &[u8]) -> Result<String>;

    /// 获取可下发给前端的访问 URL
    fn url(&self, bucket: &str, path: &str) -> String;

    /// 删除对象（幂等：对象不存在不是错误）
    async fn delete(&self, bucket: &str, path: &str) -> Result<()>;
}

/// 生成对象存储路径：时间戳-uuid.扩展名，避免用户文件名冲突
pub fn object_name(file_name: &str) -> String {
    format!(
        "{}-{}{}",
        chrono::Utc::now().timestamp(),
        Uuid::new_v4(),
        file_extension(file_name)
    )
}

pub fn create_blob_store() -> Result<Arc<dyn BlobStore>> {
    let config = crate::config::AppConfig::get();
    Ok(Arc::new(LocalBlobStore::new(
        &config.blob.root_dir,
        &config.blob.public_base_url,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_name_keeps_extension() {
        let name = object_name("report.PDF");
        assert!(name.ends_with(".pdf"));
        assert_ne!(object_name("report.pdf"), object_name("report.pdf"));
    }
}
