use super::SubmissionService;
use crate::errors::{LMSystemError, Result};
use crate::models::submissions::responses::StudentSubmissionView;
use crate::storage::Storage;

/// 学生视角的提交详情
///
/// 单一规范实体 + 查询边界投影：同一行数据按角色投影，不维护
/// 两套分叉的提交形状。
pub async fn student_view(
    service: &SubmissionService,
    submission_id: i64,
) -> Result<StudentSubmissionView> {
    let submission = service
        .storage
        .get_submission_by_id(submission_id)
        .await?
        .ok_or_else(|| LMSystemError::not_found(format!("提交不存在: {submission_id}")))?;

    let files = service.storage.list_submission_files(submission_id).await?;

    Ok(StudentSubmissionView::project(submission, files))
}
