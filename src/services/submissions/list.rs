use super::SubmissionService;
use crate::errors::Result;
use crate::models::submissions::{
    requests::SubmissionListQuery, responses::SubmissionListResponse,
};

/// 列出提交（教师投影，带附件数）
pub async fn list_submissions(
    service: &SubmissionService,
    query: SubmissionListQuery,
) -> Result<SubmissionListResponse> {
    service.storage.list_submissions_with_pagination(query).await
}
