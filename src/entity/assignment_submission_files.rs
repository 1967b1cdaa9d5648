//! 提交附件实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "assignment_submission_files")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub submission_id: i64,
    pub file_name: String,
    pub file_path: String,
    pub file_type: Option<String>,
    pub file_size: Option<i64>,
    pub uploaded_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::assignment_submissions::Entity",
        from = "Column::SubmissionId",
        to = "super::assignment_submissions::Column::Id"
    )]
    Submission,
}

impl Related<super::assignment_submissions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Submission.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_submission_file(self) -> crate::models::submissions::entities::SubmissionFile {
        use chrono::{DateTime, Utc};

        crate::models::submissions::entities::SubmissionFile {
            id: self.id,
            submission_id: self.submission_id,
            file_name: self.file_name,
            file_path: self.file_path,
            file_type: self.file_type,
            file_size: self.file_size,
            uploaded_at: DateTime::<Utc>::from_timestamp(self.uploaded_at, 0).unwrap_or_default(),
        }
    }
}
