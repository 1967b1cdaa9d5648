pub mod create;
pub mod delete;
pub mod documents;
pub mod status;
pub mod update;

use std::sync::Arc;

use crate::errors::Result;
use crate::models::assignments::{
    entities::{Assignment, AssignmentStatus},
    requests::{AssignmentListQuery, CreateAssignmentRequest, UpdateAssignmentRequest},
    responses::{AssignmentListResponse, CascadeDeletion},
};
use crate::models::documents::{entities::AssignmentDocument, requests::UploadDocumentRequest};
use crate::services::NotificationService;
use crate::storage::{Storage, blob::BlobStore};

/// 作业仓库：作业 CRUD、状态机与级联删除
pub struct AssignmentService {
    storage: Arc<dyn Storage>,
    blob: Arc<dyn BlobStore>,
    notifications: Arc<NotificationService>,
}

impl AssignmentService {
    pub fn new(
        storage: Arc<dyn Storage>,
        blob: Arc<dyn BlobStore>,
        notifications: Arc<NotificationService>,
    ) -> Self {
        Self {
            storage,
            blob,
            notifications,
        }
    }

    /// 创建作业（初始状态 draft）
    pub async fn create_assignment(
        &self,
        created_by: i64,
        req: CreateAssignmentRequest,
    ) -> Result<Assignment> {
        create::create_assignment(self, created_by, req).await
    }

    /// 获取作业
    pub async fn get_assignment(&self, assignment_id: i64) -> Result<Option<Assignment>> {
        self.storage.get_assignment_by_id(assignment_id).await
    }

    /// 更新作业
    pub async fn update_assignment(
        &self,
        assignment_id: i64,
        req: UpdateAssignmentRequest,
    ) -> Result<Assignment> {
        update::update_assignment(self, assignment_id, req).await
    }

    /// 状态迁移（发布 / 归档）
    pub async fn set_status(
        &self,
        assignment_id: i64,
        status: AssignmentStatus,
    ) -> Result<Assignment> {
        status::set_status(self, assignment_id, status).await
    }

    /// 列出作业
    pub async fn list_assignments(
        &self,
        query: AssignmentListQuery,
    ) -> Result<AssignmentListResponse> {
        self.storage.list_assignments_with_pagination(query).await
    }

    /// 级联删除作业及其全部文档、提交与附件
    pub async fn delete_assignment(&self, assignment_id: i64) -> Result<CascadeDeletion> {
        delete::delete_assignment(self, assignment_id).await
    }

    /// 上传作业文档
    pub async fn upload_document(
        &self,
        assignment_id: i64,
        uploaded_by: i64,
        req: UploadDocumentRequest,
    ) -> Result<AssignmentDocument> {
        documents::upload_document(self, assignment_id, uploaded_by, req).await
    }

    /// 列出作业文档
    pub async fn list_documents(&self, assignment_id: i64) -> Result<Vec<AssignmentDocument>> {
        self.storage.list_assignment_documents(assignment_id).await
    }
}
