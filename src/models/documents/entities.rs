use serde::{Deserialize, Serialize};

/// 作业文档元数据，随作业级联删除
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentDocument {
    pub id: i64,
    pub assignment_id: i64,
    pub title: String,
    pub file_name: String,
    pub file_path: String,
    pub file_type: Option<String>,
    pub file_size: Option<i64>,
    pub uploaded_by: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
