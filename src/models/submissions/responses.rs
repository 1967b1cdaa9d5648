use serde::Serialize;

use super::entities::{Submission, SubmissionFile, SubmissionStatus};
use crate::models::PaginationInfo;

/// 上传失败的附件（提交本身不受影响）
#[derive(Debug, Clone, Serialize)]
pub struct RejectedFile {
    pub file_name: String,
    pub reason: String,
}

/// 提交结果：提交记录 + 成功入库的附件 + 逐文件失败清单
#[derive(Debug, Serialize)]
pub struct SubmitOutcome {
    pub submission: Submission,
    pub files: Vec<SubmissionFile>,
    pub rejected_files: Vec<RejectedFile>,
}

/// 评分结果
///
/// notification_warning 承载评分成功但通知派发失败的情况，
/// 评分写入永远不会被通知失败掩盖。
#[derive(Debug, Serialize)]
pub struct GradeOutcome {
    pub submission: Submission,
    pub notification_warning: Option<String>,
}

/// 学生视角的提交投影：本人内容、评分与附件
#[derive(Debug, Serialize)]
pub struct StudentSubmissionView {
    pub id: i64,
    pub assignment_id: i64,
    pub content: Option<String>,
    pub status: SubmissionStatus,
    pub submitted_at: Option<chrono::DateTime<chrono::Utc>>,
    pub grade: Option<f64>,
    pub feedback: Option<String>,
    pub graded_at: Option<chrono::DateTime<chrono::Utc>>,
    pub files: Vec<SubmissionFile>,
}

impl StudentSubmissionView {
    pub fn project(submission: Submission, files: Vec<SubmissionFile>) -> Self {
        Self {
            id: submission.id,
            assignment_id: submission.assignment_id,
            content: submission.content,
            status: submission.status,
            submitted_at: submission.submitted_at,
            grade: submission.grade,
            feedback: submission.feedback,
            graded_at: submission.graded_at,
            files,
        }
    }
}

/// 教师视角的提交列表行：批改概览，不携带正文
#[derive(Debug, Serialize)]
pub struct TeacherSubmissionRow {
    pub id: i64,
    pub student_id: i64,
    pub status: SubmissionStatus,
    pub submitted_at: Option<chrono::DateTime<chrono::Utc>>,
    pub grade: Option<f64>,
    pub graded_at: Option<chrono::DateTime<chrono::Utc>>,
    pub file_count: i64,
}

/// 提交列表响应
#[derive(Debug, Serialize)]
pub struct SubmissionListResponse {
    pub items: Vec<TeacherSubmissionRow>,
    pub pagination: PaginationInfo,
}
