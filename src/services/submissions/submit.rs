use std::sync::Arc;

use futures_util::future::join_all;
use tracing::{info, warn};

use super::SubmissionService;
use crate::config::AppConfig;
use crate::errors::{LMSystemError, Result};
use crate::models::assignments::entities::AssignmentStatus;
use crate::models::submissions::{
    entities::SubmissionStatus,
    requests::{NewSubmissionFileRecord, SubmitRequest},
    responses::{RejectedFile, SubmitOutcome},
};
use crate::storage::blob::{BlobStore, object_name};
use crate::storage::Storage;
use crate::utils::validate_upload;

/// 提交作业
///
/// 迟交在此刻一次性判定，之后截止时间变更不回溯。附件上传逐文件
/// 隔离：单个附件失败只进入 rejected_files 清单，不影响提交本身
/// 和其余附件。附件元数据行严格晚于提交行创建。
pub async fn submit(
    service: &SubmissionService,
    assignment_id: i64,
    student_id: i64,
    req: SubmitRequest,
) -> Result<SubmitOutcome> {
    let config = AppConfig::get();

    if req.content.trim().is_empty() {
        return Err(LMSystemError::validation("提交内容不能为空"));
    }

    let assignment = service
        .storage
        .get_assignment_by_id(assignment_id)
        .await?
        .ok_or_else(|| LMSystemError::not_found(format!("作业不存在: {assignment_id}")))?;

    if assignment.status == AssignmentStatus::Archived {
        return Err(LMSystemError::invalid_state(format!(
            "作业 {assignment_id} 已归档，不再接受提交"
        )));
    }

    // 迟交判定
    let now = chrono::Utc::now();
    let status = match assignment.due_date {
        Some(due_date) if now > due_date => SubmissionStatus::Late,
        _ => SubmissionStatus::Submitted,
    };

    let submission = service
        .storage
        .upsert_submission(assignment_id, student_id, req.content, status)
        .await?;

    info!(
        "提交已落库: id={} assignment_id={} student_id={} status={}",
        submission.id, assignment_id, student_id, submission.status
    );

    // 附件预校验：不合规的文件直接进入失败清单，不触碰对象存储
    let mut rejected_files: Vec<RejectedFile> = Vec::new();
    let mut accepted = Vec::new();
    for file in req.files {
        match validate_upload(
            &file.file_name,
            &file.bytes,
            config.upload.submission_max_size,
            &config.upload.allowed_types,
        ) {
            Ok(()) => accepted.push(file),
            Err(reason) => rejected_files.push(RejectedFile {
                file_name: file.file_name,
                reason,
            }),
        }
    }

    // 扇出上传，全部完成后统一收束
    let bucket = config.blob.submissions_bucket.as_str();
    let uploads = accepted.into_iter().map(|file| {
        let blob = Arc::clone(&service.blob);
        let path = object_name(&file.file_name);
        async move {
            let result = blob.upload(bucket, &path, &file.bytes).await;
            (file, path, result)
        }
    });

    let mut files = Vec::new();
    for (file, path, result) in join_all(uploads).await {
        match result {
            Ok(stored_path) => {
                let record = NewSubmissionFileRecord {
                    submission_id: submission.id,
                    file_name: file.file_name.clone(),
                    file_path: stored_path,
                    file_type: file.content_type,
                    file_size: Some(file.bytes.len() as i64),
                };

                match service.storage.insert_submission_file(record).await {
                    Ok(stored) => files.push(stored),
                    Err(e) => {
                        // 元数据落库失败，尽力清理刚写入的对象
                        if let Err(cleanup) = service.blob.delete(bucket, &path).await {
                            warn!("清理未入库附件对象失败 {bucket}/{path}: {cleanup}");
                        }
                        rejected_files.push(RejectedFile {
                            file_name: file.file_name,
                            reason: e.to_string(),
                        });
                    }
                }
            }
            Err(e) => rejected_files.push(RejectedFile {
                file_name: file.file_name,
                reason: e.to_string(),
            }),
        }
    }

    if !rejected_files.is_empty() {
        warn!(
            "提交 {} 有 {} 个附件未能入库",
            submission.id,
            rejected_files.len()
        );
    }

    Ok(SubmitOutcome {
        submission,
        files,
        rejected_files,
    })
}
