use tracing::info;

use super::AssignmentService;
use crate::errors::{LMSystemError, Result};
use crate::models::assignments::{entities::Assignment, requests::CreateAssignmentRequest};
use crate::storage::Storage;

/// 创建作业
pub async fn create_assignment(
    service: &AssignmentService,
    created_by: i64,
    req: CreateAssignmentRequest,
) -> Result<Assignment> {
    if req.title.trim().is_empty() {
        return Err(LMSystemError::validation("作业标题不能为空"));
    }

    if let Some(max_score) = req.max_score
        && max_score <= 0.0
    {
        return Err(LMSystemError::validation(format!(
            "作业满分必须为正数: {max_score}"
        )));
    }

    let course = service.storage.get_course_by_id(req.course_id).await?;
    if course.is_none() {
        return Err(LMSystemError::not_found(format!(
            "课程不存在: {}",
            req.course_id
        )));
    }

    let assignment = service.storage.create_assignment(created_by, req).await?;
    info!(
        "作业已创建: id={} course_id={} created_by={}",
        assignment.id, assignment.course_id, created_by
    );

    Ok(assignment)
}
