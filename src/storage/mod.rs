use std::sync::Arc;

use crate::models::{
    assignments::{
        entities::{Assignment, AssignmentStatus},
        requests::{AssignmentListQuery, CreateAssignmentRequest, UpdateAssignmentRequest},
        responses::{AssignmentListResponse, CascadeDeletion},
    },
    courses::{
        entities::{Course, Enrollment},
        requests::CreateCourseRequest,
    },
    documents::{entities::AssignmentDocument, requests::NewDocumentRecord},
    notifications::{
        entities::Notification,
        requests::{CreateNotificationRequest, NotificationListQuery},
        responses::{NotificationListResponse, UnreadCount},
    },
    stats::responses::{InstructorStatsResponse, StudentStatsResponse},
    submissions::{
        entities::{Submission, SubmissionFile, SubmissionStatus},
        requests::{NewSubmissionFileRecord, SubmissionListQuery},
        responses::SubmissionListResponse,
    },
};

use crate::errors::Result;

pub mod blob;
pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 课程管理方法
    // 创建课程
    async fn create_course(&self, instructor_id: i64, course: CreateCourseRequest)
    -> Result<Course>;
    // 通过ID获取课程信息
    async fn get_course_by_id(&self, course_id: i64) -> Result<Option<Course>>;
    // 学生选课（重复选课返回 Conflict）
    async fn enroll_student(&self, course_id: i64, student_id: i64) -> Result<Enrollment>;
    // 列出课程的在读学生 ID（用于通知扇出）
    async fn list_enrolled_student_ids(&self, course_id: i64) -> Result<Vec<i64>>;

    /// 作业管理方法
    // 创建作业，初始状态为 draft
    async fn create_assignment(
        &self,
        created_by: i64,
        req: CreateAssignmentRequest,
    ) -> Result<Assignment>;
    // 通过ID获取作业信息
    async fn get_assignment_by_id(&self, assignment_id: i64) -> Result<Option<Assignment>>;
    // 更新作业信息（created_by 不可变）
    async fn update_assignment(
        &self,
        assignment_id: i64,
        update: UpdateAssignmentRequest,
    ) -> Result<Option<Assignment>>;
    // 状态迁移，非法迁移返回 InvalidTransition
    async fn update_assignment_status(
        &self,
        assignment_id: i64,
        status: AssignmentStatus,
    ) -> Result<Assignment>;
    // 列出作业
    async fn list_assignments_with_pagination(
        &self,
        query: AssignmentListQuery,
    ) -> Result<AssignmentListResponse>;
    // 级联删除：文档 → 提交附件 → 提交 → 作业本身，单事务内按序执行
    async fn delete_assignment_cascade(&self, assignment_id: i64) -> Result<CascadeDeletion>;

    /// 作业文档方法
    // 记录文档元数据
    async fn insert_assignment_document(
        &self,
        record: NewDocumentRecord,
    ) -> Result<AssignmentDocument>;
    // 列出作业文档
    async fn list_assignment_documents(
        &self,
        assignment_id: i64,
    ) -> Result<Vec<AssignmentDocument>>;

    /// 提交管理方法
    // 按 (作业, 学生) 插入或覆盖提交
    async fn upsert_submission(
        &self,
        assignment_id: i64,
        student_id: i64,
        content: String,
        status: SubmissionStatus,
    ) -> Result<Submission>;
    // 通过ID获取提交
    async fn get_submission_by_id(&self, submission_id: i64) -> Result<Option<Submission>>;
    // 获取学生在某作业下的提交
    async fn get_submission_for_student(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Option<Submission>>;
    // 列出提交（教师投影）
    async fn list_submissions_with_pagination(
        &self,
        query: SubmissionListQuery,
    ) -> Result<SubmissionListResponse>;
    // 写入评分并置 graded 状态
    async fn apply_grade(
        &self,
        submission_id: i64,
        score: f64,
        feedback: Option<String>,
    ) -> Result<Submission>;

    /// 提交附件方法
    // 记录附件元数据（提交行必须已存在）
    async fn insert_submission_file(
        &self,
        record: NewSubmissionFileRecord,
    ) -> Result<SubmissionFile>;
    // 获取提交下的某个附件
    async fn get_submission_file(
        &self,
        submission_id: i64,
        file_id: i64,
    ) -> Result<Option<SubmissionFile>>;
    // 列出提交附件
    async fn list_submission_files(&self, submission_id: i64) -> Result<Vec<SubmissionFile>>;
    // 删除附件元数据
    async fn delete_submission_file(&self, file_id: i64) -> Result<bool>;

    /// 通知方法
    // 创建通知
    async fn create_notification(&self, req: CreateNotificationRequest) -> Result<Notification>;
    // 批量创建通知
    async fn create_notifications_batch(
        &self,
        reqs: Vec<CreateNotificationRequest>,
    ) -> Result<Vec<Notification>>;
    // 通过ID获取通知
    async fn get_notification_by_id(&self, notification_id: i64) -> Result<Option<Notification>>;
    // 列出用户通知
    async fn list_notifications_with_pagination(
        &self,
        user_id: i64,
        query: NotificationListQuery,
    ) -> Result<NotificationListResponse>;
    // 未读计数（消息与其他通知分开计）
    async fn count_unread_notifications(&self, user_id: i64) -> Result<UnreadCount>;
    // 标记单条已读
    async fn mark_notification_read(&self, notification_id: i64) -> Result<bool>;
    // 标记全部已读，返回翻转行数
    async fn mark_all_notifications_read(&self, user_id: i64) -> Result<i64>;

    /// 统计方法
    // 教师端统计
    async fn instructor_stats(&self, instructor_id: i64) -> Result<InstructorStatsResponse>;
    // 学生端统计
    async fn student_stats(&self, student_id: i64) -> Result<StudentStatsResponse>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
