use serde::Deserialize;

use super::entities::SubmissionStatus;

/// 待上传的提交附件（字节由调用方提供，引擎负责写入对象存储）
#[derive(Clone)]
pub struct SubmissionUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for SubmissionUpload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubmissionUpload")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("bytes", &self.bytes.len())
            .finish()
    }
}

/// 提交请求
#[derive(Debug, Clone)]
pub struct SubmitRequest {
    pub content: String,
    pub files: Vec<SubmissionUpload>,
}

/// 附件元数据入库记录（对象已写入存储后由服务层填写）
#[derive(Debug, Clone)]
pub struct NewSubmissionFileRecord {
    pub submission_id: i64,
    pub file_name: String,
    pub file_path: String,
    pub file_type: Option<String>,
    pub file_size: Option<i64>,
}

/// 评分请求
#[derive(Debug, Clone, Deserialize)]
pub struct GradeRequest {
    pub score: f64,
    pub feedback: Option<String>,
}

/// 提交列表查询
#[derive(Debug, Clone, Deserialize, Default)]
pub struct SubmissionListQuery {
    pub assignment_id: Option<i64>,
    pub student_id: Option<i64>,
    pub status: Option<SubmissionStatus>,
    pub page: Option<i64>,
    pub size: Option<i64>,
}
