use super::StatsService;
use crate::errors::Result;
use crate::models::stats::responses::StudentStatsResponse;
use crate::storage::Storage;

/// 学生端统计：在读选课数、提交数、平均成绩（十分制，一位小数）
pub async fn student_stats(
    service: &StatsService,
    student_id: i64,
) -> Result<StudentStatsResponse> {
    service.storage.student_stats(student_id).await
}
