//! 统计存储操作
//!
//! 纯读侧聚合，任一子查询为零行都不影响整体结果。

use super::SeaOrmStorage;
use crate::entity::assignment_documents::{Column as DocumentColumn, Entity as Documents};
use crate::entity::assignment_submissions::{
    Column as SubmissionColumn, Entity as Submissions, Relation as SubmissionRelation,
};
use crate::entity::assignments::{Column as AssignmentColumn, Entity as Assignments};
use crate::entity::course_enrollments::{Column as EnrollmentColumn, Entity as Enrollments};
use crate::entity::courses::{Column as CourseColumn, Entity as Courses};
use crate::errors::{LMSystemError, Result};
use crate::models::courses::entities::EnrollmentStatus;
use crate::models::stats::responses::{InstructorStatsResponse, StudentStatsResponse};
use sea_orm::{
    ColumnTrait, EntityTrait, JoinType, PaginatorTrait, QueryFilter, QuerySelect, RelationTrait,
};

impl SeaOrmStorage {
    /// 教师端统计
    pub async fn instructor_stats_impl(
        &self,
        instructor_id: i64,
    ) -> Result<InstructorStatsResponse> {
        // 名下课程
        let course_ids: Vec<i64> = Courses::find()
            .filter(CourseColumn::InstructorId.eq(instructor_id))
            .select_only()
            .column(CourseColumn::Id)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("查询名下课程失败: {e}")))?;

        let course_count = course_ids.len() as i64;

        // 名下课程的选课人次
        let student_count = if course_ids.is_empty() {
            0
        } else {
            Enrollments::find()
                .filter(EnrollmentColumn::CourseId.is_in(course_ids.clone()))
                .filter(EnrollmentColumn::Status.eq(EnrollmentStatus::ACTIVE))
                .count(&self.db)
                .await
                .map_err(|e| LMSystemError::database_operation(format!("查询选课人次失败: {e}")))?
                as i64
        };

        // 名下课程的作业文档数
        let document_count = if course_ids.is_empty() {
            0
        } else {
            let assignment_ids: Vec<i64> = Assignments::find()
                .filter(AssignmentColumn::CourseId.is_in(course_ids))
                .select_only()
                .column(AssignmentColumn::Id)
                .into_tuple()
                .all(&self.db)
                .await
                .map_err(|e| {
                    LMSystemError::database_operation(format!("查询课程作业失败: {e}"))
                })?;

            if assignment_ids.is_empty() {
                0
            } else {
                Documents::find()
                    .filter(DocumentColumn::AssignmentId.is_in(assignment_ids))
                    .count(&self.db)
                    .await
                    .map_err(|e| {
                        LMSystemError::database_operation(format!("查询文档数量失败: {e}"))
                    })? as i64
            }
        };

        // 本人创建的作业数
        let assignment_count = Assignments::find()
            .filter(AssignmentColumn::CreatedBy.eq(instructor_id))
            .count(&self.db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("查询作业数量失败: {e}")))?
            as i64;

        Ok(InstructorStatsResponse {
            course_count,
            student_count,
            document_count,
            assignment_count,
        })
    }

    /// 学生端统计
    pub async fn student_stats_impl(&self, student_id: i64) -> Result<StudentStatsResponse> {
        // 在读选课数
        let enrollment_count = Enrollments::find()
            .filter(EnrollmentColumn::StudentId.eq(student_id))
            .filter(EnrollmentColumn::Status.eq(EnrollmentStatus::ACTIVE))
            .count(&self.db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("查询选课数量失败: {e}")))?
            as i64;

        // 提交总数
        let submission_count = Submissions::find()
            .filter(SubmissionColumn::StudentId.eq(student_id))
            .count(&self.db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("查询提交数量失败: {e}")))?
            as i64;

        // 平均成绩：已评分提交的 score / max_score × 10 的均值，保留一位小数
        let graded: Vec<(Option<f64>, f64)> = Submissions::find()
            .filter(SubmissionColumn::StudentId.eq(student_id))
            .filter(SubmissionColumn::Grade.is_not_null())
            .join(JoinType::InnerJoin, SubmissionRelation::Assignment.def())
            .select_only()
            .column(SubmissionColumn::Grade)
            .column(AssignmentColumn::MaxScore)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("查询评分记录失败: {e}")))?;

        let normalized: Vec<f64> = graded
            .iter()
            .filter_map(|(grade, max_score)| match grade {
                Some(grade) if *max_score > 0.0 => Some(grade / max_score * 10.0),
                _ => None,
            })
            .collect();

        let average_grade = if normalized.is_empty() {
            0.0
        } else {
            let avg = normalized.iter().sum::<f64>() / normalized.len() as f64;
            (avg * 10.0).round() / 10.0 // 保留一位小数
        };

        Ok(StudentStatsResponse {
            enrollment_count,
            submission_count,
            average_grade,
        })
    }
}
