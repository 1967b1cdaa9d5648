pub mod attachments;
pub mod detail;
pub mod list;
pub mod submit;

use std::sync::Arc;

use crate::errors::Result;
use crate::models::submissions::{
    requests::{SubmissionListQuery, SubmitRequest},
    responses::{StudentSubmissionView, SubmissionListResponse, SubmitOutcome},
};
use crate::storage::{Storage, blob::BlobStore};

/// 提交工作流：每个 (作业, 学生) 至多一条记录，重复提交原地覆盖
pub struct SubmissionService {
    storage: Arc<dyn Storage>,
    blob: Arc<dyn BlobStore>,
}

impl SubmissionService {
    pub fn new(storage: Arc<dyn Storage>, blob: Arc<dyn BlobStore>) -> Self {
        Self { storage, blob }
    }

    /// 提交作业（含附件扇出上传）
    pub async fn submit(
        &self,
        assignment_id: i64,
        student_id: i64,
        req: SubmitRequest,
    ) -> Result<SubmitOutcome> {
        submit::submit(self, assignment_id, student_id, req).await
    }

    /// 移除提交附件
    pub async fn remove_attachment(&self, submission_id: i64, file_id: i64) -> Result<()> {
        attachments::remove_attachment(self, submission_id, file_id).await
    }

    /// 学生视角的提交详情
    pub async fn student_view(&self, submission_id: i64) -> Result<StudentSubmissionView> {
        detail::student_view(self, submission_id).await
    }

    /// 列出提交（教师投影）
    pub async fn list_submissions(
        &self,
        query: SubmissionListQuery,
    ) -> Result<SubmissionListResponse> {
        list::list_submissions(self, query).await
    }
}
