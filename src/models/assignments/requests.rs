use serde::Deserialize;

use super::entities::AssignmentStatus;

/// 创建作业请求
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAssignmentRequest {
    pub course_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<chrono::DateTime<chrono::Utc>>,
    pub max_score: Option<f64>,
}

/// 更新作业请求
///
/// None 表示保持不变。created_by 不可修改，因此不在请求中。
#[derive(Debug, Clone, Deserialize, Default)]
pub struct UpdateAssignmentRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<chrono::DateTime<chrono::Utc>>,
    pub max_score: Option<f64>,
}

/// 作业列表查询
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AssignmentListQuery {
    pub course_id: Option<i64>,
    pub created_by: Option<i64>,
    pub status: Option<AssignmentStatus>,
    pub page: Option<i64>,
    pub size: Option<i64>,
}
