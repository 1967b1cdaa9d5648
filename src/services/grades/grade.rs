use tracing::{info, warn};

use super::GradeService;
use crate::errors::{LMSystemError, Result};
use crate::models::notifications::entities::NotificationType;
use crate::models::submissions::{requests::GradeRequest, responses::GradeOutcome};
use crate::storage::Storage;

/// 评分
///
/// 约束：0 ≤ score ≤ 作业满分；目标提交必须处于 submitted / late /
/// graded（重评）状态，pending 占位不可评分。graded 是终态：重评
/// 覆盖成绩并刷新 graded_at，永不回退到 submitted。
pub async fn grade_submission(
    service: &GradeService,
    submission_id: i64,
    req: GradeRequest,
) -> Result<GradeOutcome> {
    let submission = service
        .storage
        .get_submission_by_id(submission_id)
        .await?
        .ok_or_else(|| LMSystemError::not_found(format!("提交不存在: {submission_id}")))?;

    if !submission.status.gradable() {
        return Err(LMSystemError::invalid_state(format!(
            "提交 {submission_id} 处于 {} 状态，不可评分",
            submission.status
        )));
    }

    let assignment = service
        .storage
        .get_assignment_by_id(submission.assignment_id)
        .await?
        .ok_or_else(|| {
            LMSystemError::not_found(format!("作业不存在: {}", submission.assignment_id))
        })?;

    if req.score < 0.0 || req.score > assignment.max_score {
        return Err(LMSystemError::out_of_range(format!(
            "成绩 {} 超出范围 [0, {}]",
            req.score, assignment.max_score
        )));
    }

    let graded = service
        .storage
        .apply_grade(submission_id, req.score, req.feedback)
        .await?;

    info!(
        "评分已写入: submission_id={} score={}/{}",
        submission_id, req.score, assignment.max_score
    );

    // 评分通知：派发失败作为次级告警返回，绝不掩盖已成功的评分写入
    let notification_warning = match service
        .notifications
        .notify(
            graded.student_id,
            NotificationType::AssignmentGraded,
            format!("作业已评分: {}", assignment.title),
            format!(
                "你的作业《{}》已评分：{} / {}。",
                assignment.title, req.score, assignment.max_score
            ),
        )
        .await
    {
        Ok(_) => None,
        Err(e) => {
            warn!("评分通知派发失败: submission_id={submission_id}: {e}");
            Some(format!("评分已保存，但通知派发失败: {e}"))
        }
    };

    Ok(GradeOutcome {
        submission: graded,
        notification_warning,
    })
}
