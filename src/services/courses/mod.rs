pub mod enroll;

use std::sync::Arc;

use crate::errors::{LMSystemError, Result};
use crate::models::courses::{
    entities::{Course, Enrollment},
    requests::CreateCourseRequest,
};
use crate::services::NotificationService;
use crate::storage::Storage;

/// 课程服务：统计与通知扇出所需的最小课程面
pub struct CourseService {
    storage: Arc<dyn Storage>,
    notifications: Arc<NotificationService>,
}

impl CourseService {
    pub fn new(storage: Arc<dyn Storage>, notifications: Arc<NotificationService>) -> Self {
        Self {
            storage,
            notifications,
        }
    }

    /// 创建课程
    pub async fn create_course(
        &self,
        instructor_id: i64,
        req: CreateCourseRequest,
    ) -> Result<Course> {
        self.storage.create_course(instructor_id, req).await
    }

    /// 获取课程
    pub async fn get_course(&self, course_id: i64) -> Result<Course> {
        self.storage
            .get_course_by_id(course_id)
            .await?
            .ok_or_else(|| LMSystemError::not_found(format!("课程不存在: {course_id}")))
    }

    /// 学生选课（重复选课返回 Conflict）
    pub async fn enroll_student(&self, course_id: i64, student_id: i64) -> Result<Enrollment> {
        enroll::enroll_student(self, course_id, student_id).await
    }
}
