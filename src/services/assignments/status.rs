use tracing::{info, warn};

use super::AssignmentService;
use crate::errors::Result;
use crate::models::assignments::entities::{Assignment, AssignmentStatus};
use crate::models::notifications::entities::NotificationType;
use crate::storage::Storage;

/// 状态迁移
///
/// 迁移表在存储层校验。发布（draft → active）时向课程内在读学生
/// 扇出 assignment_created 通知；通知失败不回滚已完成的状态迁移，
/// 记录告警。
pub async fn set_status(
    service: &AssignmentService,
    assignment_id: i64,
    status: AssignmentStatus,
) -> Result<Assignment> {
    let assignment = service
        .storage
        .update_assignment_status(assignment_id, status)
        .await?;

    info!(
        "作业状态迁移完成: id={} status={}",
        assignment.id, assignment.status
    );

    if status == AssignmentStatus::Active {
        let student_ids = service
            .storage
            .list_enrolled_student_ids(assignment.course_id)
            .await
            .unwrap_or_else(|e| {
                warn!("查询选课学生失败，跳过发布通知: {e}");
                Vec::new()
            });

        if let Err(e) = service
            .notifications
            .notify_many(
                &student_ids,
                NotificationType::AssignmentCreated,
                &format!("新作业: {}", assignment.title),
                &format!("课程作业《{}》已发布，请按时提交。", assignment.title),
            )
            .await
        {
            warn!("作业发布通知派发失败: assignment_id={assignment_id}: {e}");
        }
    }

    Ok(assignment)
}
