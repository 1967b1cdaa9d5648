//! 课程存储操作

use super::SeaOrmStorage;
use crate::entity::course_enrollments::{
    ActiveModel as EnrollmentActiveModel, Column as EnrollmentColumn, Entity as Enrollments,
};
use crate::entity::courses::{ActiveModel, Entity as Courses};
use crate::errors::{LMSystemError, Result};
use crate::models::courses::{
    entities::{Course, Enrollment, EnrollmentStatus},
    requests::CreateCourseRequest,
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QuerySelect, Set};

impl SeaOrmStorage {
    /// 创建课程
    pub async fn create_course_impl(
        &self,
        instructor_id: i64,
        req: CreateCourseRequest,
    ) -> Result<Course> {
        if req.title.trim().is_empty() {
            return Err(LMSystemError::validation("课程标题不能为空"));
        }

        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            instructor_id: Set(instructor_id),
            title: Set(req.title),
            description: Set(req.description),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("创建课程失败: {e}")))?;

        Ok(result.into_course())
    }

    /// 通过 ID 获取课程
    pub async fn get_course_by_id_impl(&self, course_id: i64) -> Result<Option<Course>> {
        let result = Courses::find_by_id(course_id)
            .one(&self.db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("查询课程失败: {e}")))?;

        Ok(result.map(|m| m.into_course()))
    }

    /// 学生选课
    ///
    /// (course_id, student_id) 唯一索引兜底并发重复选课，冲突映射为 Conflict。
    pub async fn enroll_student_impl(
        &self,
        course_id: i64,
        student_id: i64,
    ) -> Result<Enrollment> {
        let course = self.get_course_by_id_impl(course_id).await?;
        if course.is_none() {
            return Err(LMSystemError::not_found(format!("课程不存在: {course_id}")));
        }

        let model = EnrollmentActiveModel {
            course_id: Set(course_id),
            student_id: Set(student_id),
            status: Set(EnrollmentStatus::Active.to_string()),
            enrolled_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(|e| {
            if matches!(e.sql_err(), Some(sea_orm::SqlErr::UniqueConstraintViolation(_))) {
                LMSystemError::conflict(format!(
                    "学生 {student_id} 已选课程 {course_id}"
                ))
            } else {
                LMSystemError::database_operation(format!("创建选课记录失败: {e}"))
            }
        })?;

        Ok(result.into_enrollment())
    }

    /// 列出课程的在读学生 ID
    pub async fn list_enrolled_student_ids_impl(&self, course_id: i64) -> Result<Vec<i64>> {
        let ids: Vec<i64> = Enrollments::find()
            .filter(EnrollmentColumn::CourseId.eq(course_id))
            .filter(EnrollmentColumn::Status.eq(EnrollmentStatus::ACTIVE))
            .select_only()
            .column(EnrollmentColumn::StudentId)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("查询选课学生失败: {e}")))?;

        Ok(ids)
    }
}
