//! 作业文档存储操作

use super::SeaOrmStorage;
use crate::entity::assignment_documents::{ActiveModel, Column, Entity as Documents};
use crate::errors::{LMSystemError, Result};
use crate::models::documents::{entities::AssignmentDocument, requests::NewDocumentRecord};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 记录文档元数据
    ///
    /// 调用方保证对象已写入存储：写入失败时不会走到这里，不会产生
    /// 指向缺失对象的元数据行。
    pub async fn insert_assignment_document_impl(
        &self,
        record: NewDocumentRecord,
    ) -> Result<AssignmentDocument> {
        let model = ActiveModel {
            assignment_id: Set(record.assignment_id),
            title: Set(record.title),
            file_name: Set(record.file_name),
            file_path: Set(record.file_path),
            file_type: Set(record.file_type),
            file_size: Set(record.file_size),
            uploaded_by: Set(record.uploaded_by),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("记录作业文档失败: {e}")))?;

        Ok(result.into_document())
    }

    /// 列出作业文档
    pub async fn list_assignment_documents_impl(
        &self,
        assignment_id: i64,
    ) -> Result<Vec<AssignmentDocument>> {
        let results = Documents::find()
            .filter(Column::AssignmentId.eq(assignment_id))
            .order_by_desc(Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("查询作业文档失败: {e}")))?;

        Ok(results.into_iter().map(|m| m.into_document()).collect())
    }
}
