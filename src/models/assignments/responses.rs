use serde::Serialize;

use super::entities::Assignment;
use crate::models::PaginationInfo;

/// 作业列表响应
#[derive(Debug, Serialize)]
pub struct AssignmentListResponse {
    pub items: Vec<Assignment>,
    pub pagination: PaginationInfo,
}

/// 级联删除涉及的对象存储条目
#[derive(Debug, Clone, Serialize)]
pub struct RemovedBlob {
    pub bucket: String,
    pub path: String,
}

/// 级联删除结果
///
/// removed_blobs 由服务层在事务提交后用于清理对象存储。
#[derive(Debug, Serialize)]
pub struct CascadeDeletion {
    pub documents: u64,
    pub files: u64,
    pub submissions: u64,
    pub removed_blobs: Vec<RemovedBlob>,
}
