use tracing::{info, warn};

use super::AssignmentService;
use crate::errors::Result;
use crate::models::assignments::responses::CascadeDeletion;
use crate::storage::{Storage, blob::BlobStore};

/// 级联删除作业
///
/// 行删除在存储层单事务内完成：任一步失败则整体回滚，调用方视角
/// 作业仍然存在。事务提交后再尽力清理对象存储，清理失败只告警，
/// 元数据行才是事实来源。
pub async fn delete_assignment(
    service: &AssignmentService,
    assignment_id: i64,
) -> Result<CascadeDeletion> {
    let deletion = service.storage.delete_assignment_cascade(assignment_id).await?;

    for blob in &deletion.removed_blobs {
        if let Err(e) = service.blob.delete(&blob.bucket, &blob.path).await {
            warn!("级联删除后清理对象失败 {}/{}: {e}", blob.bucket, blob.path);
        }
    }

    info!(
        "作业已级联删除: id={} documents={} files={} submissions={}",
        assignment_id, deletion.documents, deletion.files, deletion.submissions
    );

    Ok(deletion)
}
