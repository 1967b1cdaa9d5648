//! 作业存储操作

use super::SeaOrmStorage;
use crate::config::AppConfig;
use crate::entity::assignment_documents::{
    Column as DocumentColumn, Entity as Documents,
};
use crate::entity::assignment_submission_files::{
    Column as SubmissionFileColumn, Entity as SubmissionFiles,
};
use crate::entity::assignment_submissions::{
    Column as SubmissionColumn, Entity as Submissions,
};
use crate::entity::assignments::{ActiveModel, Column, Entity as Assignments};
use crate::errors::{LMSystemError, Result};
use crate::models::{
    PaginationInfo,
    assignments::{
        entities::{Assignment, AssignmentStatus},
        requests::{AssignmentListQuery, CreateAssignmentRequest, UpdateAssignmentRequest},
        responses::{AssignmentListResponse, CascadeDeletion, RemovedBlob},
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 创建作业，初始状态为 draft
    pub async fn create_assignment_impl(
        &self,
        created_by: i64,
        req: CreateAssignmentRequest,
    ) -> Result<Assignment> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            course_id: Set(req.course_id),
            title: Set(req.title),
            description: Set(req.description),
            due_date: Set(req.due_date.map(|dt| dt.timestamp())),
            created_by: Set(created_by),
            status: Set(AssignmentStatus::Draft.to_string()),
            max_score: Set(req.max_score.unwrap_or(10.0)),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("创建作业失败: {e}")))?;

        Ok(result.into_assignment())
    }

    /// 通过 ID 获取作业
    pub async fn get_assignment_by_id_impl(
        &self,
        assignment_id: i64,
    ) -> Result<Option<Assignment>> {
        let result = Assignments::find_by_id(assignment_id)
            .one(&self.db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("查询作业失败: {e}")))?;

        Ok(result.map(|m| m.into_assignment()))
    }

    /// 更新作业信息
    ///
    /// created_by 不在更新请求中，无法被改写。
    pub async fn update_assignment_impl(
        &self,
        assignment_id: i64,
        update: UpdateAssignmentRequest,
    ) -> Result<Option<Assignment>> {
        let existing = Assignments::find_by_id(assignment_id)
            .one(&self.db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("查询作业失败: {e}")))?;

        if existing.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(assignment_id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(title) = update.title {
            model.title = Set(title);
        }

        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }

        // 截止时间变更不回溯已有提交的 late 状态
        if let Some(due_date) = update.due_date {
            model.due_date = Set(Some(due_date.timestamp()));
        }

        if let Some(max_score) = update.max_score {
            model.max_score = Set(max_score);
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("更新作业失败: {e}")))?;

        self.get_assignment_by_id_impl(assignment_id).await
    }

    /// 状态迁移
    ///
    /// 仅允许 draft → active 与 active → archived，其余返回 InvalidTransition。
    pub async fn update_assignment_status_impl(
        &self,
        assignment_id: i64,
        status: AssignmentStatus,
    ) -> Result<Assignment> {
        let existing = Assignments::find_by_id(assignment_id)
            .one(&self.db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("查询作业失败: {e}")))?
            .ok_or_else(|| LMSystemError::not_found(format!("作业不存在: {assignment_id}")))?;

        let current = AssignmentStatus::parse(&existing.status).unwrap_or_default();
        if !current.can_transition_to(status) {
            return Err(LMSystemError::invalid_transition(format!(
                "作业 {assignment_id} 不允许从 {current} 迁移到 {status}"
            )));
        }

        let model = ActiveModel {
            id: Set(assignment_id),
            status: Set(status.to_string()),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("更新作业状态失败: {e}")))?;

        Ok(result.into_assignment())
    }

    /// 分页列出作业
    pub async fn list_assignments_with_pagination_impl(
        &self,
        query: AssignmentListQuery,
    ) -> Result<AssignmentListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = Assignments::find();

        // 课程筛选
        if let Some(course_id) = query.course_id {
            select = select.filter(Column::CourseId.eq(course_id));
        }

        // 创建者筛选
        if let Some(created_by) = query.created_by {
            select = select.filter(Column::CreatedBy.eq(created_by));
        }

        // 状态筛选
        if let Some(status) = query.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }

        // 排序
        select = select.order_by_desc(Column::CreatedAt);

        // 分页查询
        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| LMSystemError::database_operation(format!("查询作业总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| LMSystemError::database_operation(format!("查询作业页数失败: {e}")))?;

        let items = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("查询作业列表失败: {e}")))?
            .into_iter()
            .map(|m| m.into_assignment())
            .collect();

        Ok(AssignmentListResponse {
            items,
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 级联删除作业
    ///
    /// 固定顺序：文档 → 提交附件 → 提交 → 作业本身，全部在一个事务内。
    /// 任一步失败即整体回滚，错误信息指明失败步骤。每一步删除
    /// 不存在的行都是空操作，因此重试安全。
    pub async fn delete_assignment_cascade_impl(
        &self,
        assignment_id: i64,
    ) -> Result<CascadeDeletion> {
        let existing = Assignments::find_by_id(assignment_id)
            .one(&self.db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("查询作业失败: {e}")))?;

        if existing.is_none() {
            return Err(LMSystemError::not_found(format!(
                "作业不存在: {assignment_id}"
            )));
        }

        let config = AppConfig::get();

        let txn = self.db.begin().await.map_err(|e| {
            LMSystemError::cascade_failure(format!("开启级联删除事务失败: {e}"))
        })?;

        // 步骤 1/4: 删除作业文档
        let documents = Documents::find()
            .filter(DocumentColumn::AssignmentId.eq(assignment_id))
            .all(&txn)
            .await
            .map_err(|e| {
                LMSystemError::cascade_failure(format!("步骤 1/4 查询作业文档失败: {e}"))
            })?;

        let mut removed_blobs: Vec<RemovedBlob> = documents
            .iter()
            .map(|d| RemovedBlob {
                bucket: config.blob.documents_bucket.clone(),
                path: d.file_path.clone(),
            })
            .collect();

        let documents_deleted = Documents::delete_many()
            .filter(DocumentColumn::AssignmentId.eq(assignment_id))
            .exec(&txn)
            .await
            .map_err(|e| {
                LMSystemError::cascade_failure(format!("步骤 1/4 删除作业文档失败: {e}"))
            })?
            .rows_affected;

        // 步骤 2/4: 删除所有提交的附件
        let submission_ids: Vec<i64> = Submissions::find()
            .filter(SubmissionColumn::AssignmentId.eq(assignment_id))
            .select_only()
            .column(SubmissionColumn::Id)
            .into_tuple()
            .all(&txn)
            .await
            .map_err(|e| {
                LMSystemError::cascade_failure(format!("步骤 2/4 查询提交列表失败: {e}"))
            })?;

        let mut files_deleted = 0u64;
        if !submission_ids.is_empty() {
            let files = SubmissionFiles::find()
                .filter(SubmissionFileColumn::SubmissionId.is_in(submission_ids.clone()))
                .all(&txn)
                .await
                .map_err(|e| {
                    LMSystemError::cascade_failure(format!("步骤 2/4 查询提交附件失败: {e}"))
                })?;

            removed_blobs.extend(files.iter().map(|f| RemovedBlob {
                bucket: config.blob.submissions_bucket.clone(),
                path: f.file_path.clone(),
            }));

            files_deleted = SubmissionFiles::delete_many()
                .filter(SubmissionFileColumn::SubmissionId.is_in(submission_ids))
                .exec(&txn)
                .await
                .map_err(|e| {
                    LMSystemError::cascade_failure(format!("步骤 2/4 删除提交附件失败: {e}"))
                })?
                .rows_affected;
        }

        // 步骤 3/4: 删除提交
        let submissions_deleted = Submissions::delete_many()
            .filter(SubmissionColumn::AssignmentId.eq(assignment_id))
            .exec(&txn)
            .await
            .map_err(|e| {
                LMSystemError::cascade_failure(format!("步骤 3/4 删除提交失败: {e}"))
            })?
            .rows_affected;

        // 步骤 4/4: 删除作业本身
        Assignments::delete_by_id(assignment_id)
            .exec(&txn)
            .await
            .map_err(|e| {
                LMSystemError::cascade_failure(format!("步骤 4/4 删除作业失败: {e}"))
            })?;

        txn.commit().await.map_err(|e| {
            LMSystemError::cascade_failure(format!("提交级联删除事务失败: {e}"))
        })?;

        Ok(CascadeDeletion {
            documents: documents_deleted,
            files: files_deleted,
            submissions: submissions_deleted,
            removed_blobs,
        })
    }
}
