/// 文档元数据入库记录（对象已写入存储后由服务层填写）
#[derive(Debug, Clone)]
pub struct NewDocumentRecord {
    pub assignment_id: i64,
    pub title: String,
    pub file_name: String,
    pub file_path: String,
    pub file_type: Option<String>,
    pub file_size: Option<i64>,
    pub uploaded_by: i64,
}

/// 上传作业文档请求
///
/// 单资源语义：对象存储写入失败则整个操作失败，不落元数据行。
#[derive(Clone)]
pub struct UploadDocumentRequest {
    pub title: String,
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for UploadDocumentRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadDocumentRequest")
            .field("title", &self.title)
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("bytes", &self.bytes.len())
            .finish()
    }
}
