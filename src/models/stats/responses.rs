use serde::Serialize;

/// 教师端统计
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct InstructorStatsResponse {
    pub course_count: i64,
    pub student_count: i64,
    pub document_count: i64,
    pub assignment_count: i64,
}

/// 学生端统计
///
/// average_grade 为所有已评分提交的 score / max_score × 10 的均值，
/// 保留一位小数，无评分记录时为 0.0。
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StudentStatsResponse {
    pub enrollment_count: i64,
    pub submission_count: i64,
    pub average_grade: f64,
}
