pub mod instructor;
pub mod student;

use std::sync::Arc;

use crate::errors::Result;
use crate::models::stats::responses::{InstructorStatsResponse, StudentStatsResponse};
use crate::storage::Storage;

/// 统计聚合：纯读侧，按角色出不同口径
pub struct StatsService {
    storage: Arc<dyn Storage>,
}

impl StatsService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// 教师端统计
    pub async fn instructor_stats(&self, instructor_id: i64) -> Result<InstructorStatsResponse> {
        instructor::instructor_stats(self, instructor_id).await
    }

    /// 学生端统计
    pub async fn student_stats(&self, student_id: i64) -> Result<StudentStatsResponse> {
        student::student_stats(self, student_id).await
    }
}
