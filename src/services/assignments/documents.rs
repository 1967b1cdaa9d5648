use tracing::warn;

use super::AssignmentService;
use crate::config::AppConfig;
use crate::errors::{LMSystemError, Result};
use crate::models::documents::{
    entities::AssignmentDocument,
    requests::{NewDocumentRecord, UploadDocumentRequest},
};
use crate::models::notifications::entities::NotificationType;
use crate::storage::blob::{BlobStore, object_name};
use crate::storage::Storage;
use crate::utils::validate_upload;

/// 上传作业文档
///
/// 单资源语义：对象写入失败则整个操作失败，不落元数据行，
/// 不会产生指向缺失对象的记录。
pub async fn upload_document(
    service: &AssignmentService,
    assignment_id: i64,
    uploaded_by: i64,
    req: UploadDocumentRequest,
) -> Result<AssignmentDocument> {
    let config = AppConfig::get();

    let assignment = service
        .storage
        .get_assignment_by_id(assignment_id)
        .await?
        .ok_or_else(|| LMSystemError::not_found(format!("作业不存在: {assignment_id}")))?;

    if req.title.trim().is_empty() {
        return Err(LMSystemError::validation("文档标题不能为空"));
    }

    validate_upload(
        &req.file_name,
        &req.bytes,
        config.upload.document_max_size,
        &config.upload.allowed_types,
    )
    .map_err(LMSystemError::validation)?;

    // 先写对象存储，成功后才落元数据行
    let path = object_name(&req.file_name);
    let stored_path = service
        .blob
        .upload(&config.blob.documents_bucket, &path, &req.bytes)
        .await?;

    let document = service
        .storage
        .insert_assignment_document(NewDocumentRecord {
            assignment_id,
            title: req.title,
            file_name: req.file_name,
            file_path: stored_path,
            file_type: req.content_type,
            file_size: Some(req.bytes.len() as i64),
            uploaded_by,
        })
        .await?;

    // 向课程内在读学生扇出通知，失败只告警
    let student_ids = service
        .storage
        .list_enrolled_student_ids(assignment.course_id)
        .await
        .unwrap_or_else(|e| {
            warn!("查询选课学生失败，跳过文档通知: {e}");
            Vec::new()
        });

    if let Err(e) = service
        .notifications
        .notify_many(
            &student_ids,
            NotificationType::DocumentUploaded,
            &format!("作业资料更新: {}", assignment.title),
            &format!("作业《{}》新增文档《{}》。", assignment.title, document.title),
        )
        .await
    {
        warn!("文档上传通知派发失败: assignment_id={assignment_id}: {e}");
    }

    Ok(document)
}
