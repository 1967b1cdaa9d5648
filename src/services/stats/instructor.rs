use super::StatsService;
use crate::errors::Result;
use crate::models::stats::responses::InstructorStatsResponse;
use crate::storage::Storage;

/// 教师端统计：名下课程数、选课人次、文档数、创建的作业数
pub async fn instructor_stats(
    service: &StatsService,
    instructor_id: i64,
) -> Result<InstructorStatsResponse> {
    service.storage.instructor_stats(instructor_id).await
}
