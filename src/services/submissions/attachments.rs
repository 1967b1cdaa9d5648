use tracing::info;

use super::SubmissionService;
use crate::config::AppConfig;
use crate::errors::{LMSystemError, Result};
use crate::storage::{Storage, blob::BlobStore};

/// 移除提交附件
///
/// 附件必须属于给定提交，否则 NotFound。先删对象再删元数据行：
/// 对象删除失败时保留元数据，不产生指向缺失对象的行。
pub async fn remove_attachment(
    service: &SubmissionService,
    submission_id: i64,
    file_id: i64,
) -> Result<()> {
    let config = AppConfig::get();

    let file = service
        .storage
        .get_submission_file(submission_id, file_id)
        .await?
        .ok_or_else(|| {
            LMSystemError::not_found(format!(
                "附件 {file_id} 不存在或不属于提交 {submission_id}"
            ))
        })?;

    service
        .blob
        .delete(&config.blob.submissions_bucket, &file.file_path)
        .await?;

    service.storage.delete_submission_file(file_id).await?;
    info!("提交附件已移除: submission_id={} file_id={}", submission_id, file_id);

    Ok(())
}
