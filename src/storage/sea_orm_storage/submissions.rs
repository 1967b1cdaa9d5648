//! 提交存储操作

use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::assignment_submission_files::{
    ActiveModel as SubmissionFileActiveModel, Column as SubmissionFileColumn,
    Entity as SubmissionFiles,
};
use crate::entity::assignment_submissions::{ActiveModel, Column, Entity as Submissions};
use crate::errors::{LMSystemError, Result};
use crate::models::{
    PaginationInfo,
    submissions::{
        entities::{Submission, SubmissionFile, SubmissionStatus},
        requests::{NewSubmissionFileRecord, SubmissionListQuery},
        responses::{SubmissionListResponse, TeacherSubmissionRow},
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 按 (作业, 学生) 插入或覆盖提交
    ///
    /// 已有记录时原地覆盖 content/status/submitted_at 并清空评分字段，
    /// 保持 graded ⇔ grade 非空 的互锁。首次提交的并发竞态由唯一索引
    /// 兜底，冲突映射为 Conflict。
    pub async fn upsert_submission_impl(
        &self,
        assignment_id: i64,
        student_id: i64,
        content: String,
        status: SubmissionStatus,
    ) -> Result<Submission> {
        let now = chrono::Utc::now().timestamp();

        let existing = Submissions::find()
            .filter(Column::AssignmentId.eq(assignment_id))
            .filter(Column::StudentId.eq(student_id))
            .one(&self.db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("查询已有提交失败: {e}")))?;

        if let Some(existing) = existing {
            let model = ActiveModel {
                id: Set(existing.id),
                content: Set(Some(content)),
                status: Set(status.to_string()),
                submitted_at: Set(Some(now)),
                grade: Set(None),
                feedback: Set(None),
                graded_at: Set(None),
                ..Default::default()
            };

            let result = model
                .update(&self.db)
                .await
                .map_err(|e| LMSystemError::database_operation(format!("覆盖提交失败: {e}")))?;

            return Ok(result.into_submission());
        }

        let model = ActiveModel {
            assignment_id: Set(assignment_id),
            student_id: Set(student_id),
            content: Set(Some(content)),
            status: Set(status.to_string()),
            submitted_at: Set(Some(now)),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(|e| {
            if matches!(e.sql_err(), Some(sea_orm::SqlErr::UniqueConstraintViolation(_))) {
                LMSystemError::conflict(format!(
                    "学生 {student_id} 对作业 {assignment_id} 的提交已存在"
                ))
            } else {
                LMSystemError::database_operation(format!("创建提交失败: {e}"))
            }
        })?;

        Ok(result.into_submission())
    }

    /// 通过 ID 获取提交
    pub async fn get_submission_by_id_impl(
        &self,
        submission_id: i64,
    ) -> Result<Option<Submission>> {
        let result = Submissions::find_by_id(submission_id)
            .one(&self.db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("查询提交失败: {e}")))?;

        Ok(result.map(|m| m.into_submission()))
    }

    /// 获取学生在某作业下的提交
    pub async fn get_submission_for_student_impl(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Option<Submission>> {
        let result = Submissions::find()
            .filter(Column::AssignmentId.eq(assignment_id))
            .filter(Column::StudentId.eq(student_id))
            .one(&self.db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("查询提交失败: {e}")))?;

        Ok(result.map(|m| m.into_submission()))
    }

    /// 列出提交（教师投影，带附件数）
    pub async fn list_submissions_with_pagination_impl(
        &self,
        query: SubmissionListQuery,
    ) -> Result<SubmissionListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = Submissions::find();

        // 作业筛选
        if let Some(assignment_id) = query.assignment_id {
            select = select.filter(Column::AssignmentId.eq(assignment_id));
        }

        // 学生筛选
        if let Some(student_id) = query.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }

        // 状态筛选
        if let Some(status) = query.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }

        // 排序
        select = select.order_by_desc(Column::SubmittedAt);

        // 分页查询
        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| LMSystemError::database_operation(format!("查询提交总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| LMSystemError::database_operation(format!("查询提交页数失败: {e}")))?;

        let submissions = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("查询提交列表失败: {e}")))?;

        // 批量查询附件数
        let submission_ids: Vec<i64> = submissions.iter().map(|s| s.id).collect();
        let mut file_counts: HashMap<i64, i64> = HashMap::new();
        if !submission_ids.is_empty() {
            let files = SubmissionFiles::find()
                .filter(SubmissionFileColumn::SubmissionId.is_in(submission_ids))
                .all(&self.db)
                .await
                .map_err(|e| {
                    LMSystemError::database_operation(format!("查询提交附件失败: {e}"))
                })?;

            for file in files {
                *file_counts.entry(file.submission_id).or_insert(0) += 1;
            }
        }

        // 组装教师投影行
        let items = submissions
            .into_iter()
            .map(|s| {
                let file_count = file_counts.get(&s.id).copied().unwrap_or(0);
                let s = s.into_submission();
                TeacherSubmissionRow {
                    id: s.id,
                    student_id: s.student_id,
                    status: s.status,
                    submitted_at: s.submitted_at,
                    grade: s.grade,
                    graded_at: s.graded_at,
                    file_count,
                }
            })
            .collect();

        Ok(SubmissionListResponse {
            items,
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 写入评分
    ///
    /// 评分、反馈、graded_at、graded 状态在同一行更新内落库。
    pub async fn apply_grade_impl(
        &self,
        submission_id: i64,
        score: f64,
        feedback: Option<String>,
    ) -> Result<Submission> {
        let existing = Submissions::find_by_id(submission_id)
            .one(&self.db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("查询提交失败: {e}")))?
            .ok_or_else(|| LMSystemError::not_found(format!("提交不存在: {submission_id}")))?;

        let model = ActiveModel {
            id: Set(existing.id),
            grade: Set(Some(score)),
            feedback: Set(feedback),
            graded_at: Set(Some(chrono::Utc::now().timestamp())),
            status: Set(SubmissionStatus::Graded.to_string()),
            ..Default::default()
        };

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("写入评分失败: {e}")))?;

        Ok(result.into_submission())
    }

    /// 记录附件元数据
    pub async fn insert_submission_file_impl(
        &self,
        record: NewSubmissionFileRecord,
    ) -> Result<SubmissionFile> {
        let model = SubmissionFileActiveModel {
            submission_id: Set(record.submission_id),
            file_name: Set(record.file_name),
            file_path: Set(record.file_path),
            file_type: Set(record.file_type),
            file_size: Set(record.file_size),
            uploaded_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("记录提交附件失败: {e}")))?;

        Ok(result.into_submission_file())
    }

    /// 获取提交下的某个附件
    pub async fn get_submission_file_impl(
        &self,
        submission_id: i64,
        file_id: i64,
    ) -> Result<Option<SubmissionFile>> {
        let result = SubmissionFiles::find_by_id(file_id)
            .filter(SubmissionFileColumn::SubmissionId.eq(submission_id))
            .one(&self.db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("查询提交附件失败: {e}")))?;

        Ok(result.map(|m| m.into_submission_file()))
    }

    /// 列出提交附件
    pub async fn list_submission_files_impl(
        &self,
        submission_id: i64,
    ) -> Result<Vec<SubmissionFile>> {
        let results = SubmissionFiles::find()
            .filter(SubmissionFileColumn::SubmissionId.eq(submission_id))
            .order_by_asc(SubmissionFileColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("查询提交附件失败: {e}")))?;

        Ok(results
            .into_iter()
            .map(|m| m.into_submission_file())
            .collect())
    }

    /// 删除附件元数据
    pub async fn delete_submission_file_impl(&self, file_id: i64) -> Result<bool> {
        let result = SubmissionFiles::delete_by_id(file_id)
            .exec(&self.db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("删除提交附件失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
