use super::AssignmentService;
use crate::errors::{LMSystemError, Result};
use crate::models::assignments::{entities::Assignment, requests::UpdateAssignmentRequest};
use crate::storage::Storage;

/// 更新作业
///
/// 截止时间修改不回溯已有提交的 late 状态：迟交在提交时刻一次性判定。
pub async fn update_assignment(
    service: &AssignmentService,
    assignment_id: i64,
    req: UpdateAssignmentRequest,
) -> Result<Assignment> {
    if let Some(ref title) = req.title
        && title.trim().is_empty()
    {
        return Err(LMSystemError::validation("作业标题不能为空"));
    }

    if let Some(max_score) = req.max_score
        && max_score <= 0.0
    {
        return Err(LMSystemError::validation(format!(
            "作业满分必须为正数: {max_score}"
        )));
    }

    service
        .storage
        .update_assignment(assignment_id, req)
        .await?
        .ok_or_else(|| LMSystemError::not_found(format!("作业不存在: {assignment_id}")))
}
