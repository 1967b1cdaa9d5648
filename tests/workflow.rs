//! 作业-提交-评分工作流端到端测试

mod common;

use chrono::{Duration, Utc};
use common::{harness, pdf_bytes, png_bytes};
use rust_lmsystem_next::errors::LMSystemError;
use rust_lmsystem_next::models::assignments::entities::AssignmentStatus;
use rust_lmsystem_next::models::assignments::requests::{
    CreateAssignmentRequest, UpdateAssignmentRequest,
};
use rust_lmsystem_next::models::courses::requests::CreateCourseRequest;
use rust_lmsystem_next::models::notifications::entities::NotificationType;
use rust_lmsystem_next::models::notifications::requests::NotificationListQuery;
use rust_lmsystem_next::models::submissions::entities::SubmissionStatus;
use rust_lmsystem_next::models::submissions::requests::{
    GradeRequest, SubmissionListQuery, SubmitRequest, SubmissionUpload,
};
use rust_lmsystem_next::storage::Storage;

const INSTRUCTOR: i64 = 11;
const STUDENT: i64 = 21;

async fn course_with_assignment(
    h: &common::TestHarness,
    due_date: Option<chrono::DateTime<Utc>>,
    max_score: Option<f64>,
) -> (i64, i64) {
    let course = h
        .courses
        .create_course(
            INSTRUCTOR,
            CreateCourseRequest {
                title: "分布式系统".to_string(),
                description: None,
            },
        )
        .await
        .unwrap();

    let assignment = h
        .assignments
        .create_assignment(
            INSTRUCTOR,
            CreateAssignmentRequest {
                course_id: course.id,
                title: "实验一".to_string(),
                description: Some("实现一个一致性协议".to_string()),
                due_date,
                max_score,
            },
        )
        .await
        .unwrap();

    (course.id, assignment.id)
}

fn text_submission(content: &str) -> SubmitRequest {
    SubmitRequest {
        content: content.to_string(),
        files: Vec::new(),
    }
}

#[tokio::test]
async fn test_create_defaults_to_draft_and_max_score_10() {
    let h = harness().await;
    let (_, assignment_id) = course_with_assignment(&h, None, None).await;

    let assignment = h.assignments.get_assignment(assignment_id).await.unwrap().unwrap();
    assert_eq!(assignment.status, AssignmentStatus::Draft);
    assert_eq!(assignment.max_score, 10.0);
}

#[tokio::test]
async fn test_update_missing_assignment_is_not_found() {
    let h = harness().await;
    let err = h
        .assignments
        .update_assignment(9999, UpdateAssignmentRequest::default())
        .await
        .unwrap_err();
    assert!(matches!(err, LMSystemError::NotFound(_)));
}

#[tokio::test]
async fn test_status_machine_rejects_illegal_transitions() {
    let h = harness().await;
    let (_, assignment_id) = course_with_assignment(&h, None, None).await;

    // draft → archived 非法
    let err = h
        .assignments
        .set_status(assignment_id, AssignmentStatus::Archived)
        .await
        .unwrap_err();
    assert!(matches!(err, LMSystemError::InvalidTransition(_)));

    // draft → active → archived 合法
    h.assignments
        .set_status(assignment_id, AssignmentStatus::Active)
        .await
        .unwrap();
    h.assignments
        .set_status(assignment_id, AssignmentStatus::Archived)
        .await
        .unwrap();

    // 归档是终态
    let err = h
        .assignments
        .set_status(assignment_id, AssignmentStatus::Active)
        .await
        .unwrap_err();
    assert!(matches!(err, LMSystemError::InvalidTransition(_)));
}

#[tokio::test]
async fn test_submit_rejects_empty_content_and_archived_assignment() {
    let h = harness().await;
    let (_, assignment_id) = course_with_assignment(&h, None, None).await;

    let err = h
        .submissions
        .submit(assignment_id, STUDENT, text_submission("   "))
        .await
        .unwrap_err();
    assert!(matches!(err, LMSystemError::Validation(_)));

    let err = h
        .submissions
        .submit(9999, STUDENT, text_submission("内容"))
        .await
        .unwrap_err();
    assert!(matches!(err, LMSystemError::NotFound(_)));

    h.assignments
        .set_status(assignment_id, AssignmentStatus::Active)
        .await
        .unwrap();
    h.assignments
        .set_status(assignment_id, AssignmentStatus::Archived)
        .await
        .unwrap();

    let err = h
        .submissions
        .submit(assignment_id, STUDENT, text_submission("内容"))
        .await
        .unwrap_err();
    assert!(matches!(err, LMSystemError::InvalidState(_)));
}

#[tokio::test]
async fn test_lateness_is_decided_at_submit_time() {
    let h = harness().await;

    // 截止时间在未来 → submitted
    let (_, on_time) =
        course_with_assignment(&h, Some(Utc::now() + Duration::hours(1)), None).await;
    let outcome = h
        .submissions
        .submit(on_time, STUDENT, text_submission("按时提交"))
        .await
        .unwrap();
    assert_eq!(outcome.submission.status, SubmissionStatus::Submitted);

    // 截止时间已过 → late
    let (_, overdue) =
        course_with_assignment(&h, Some(Utc::now() - Duration::hours(1)), None).await;
    let outcome = h
        .submissions
        .submit(overdue, STUDENT, text_submission("迟交"))
        .await
        .unwrap();
    assert_eq!(outcome.submission.status, SubmissionStatus::Late);

    // 无截止时间 → 永远 submitted
    let (_, no_due) = course_with_assignment(&h, None, None).await;
    let outcome = h
        .submissions
        .submit(no_due, STUDENT, text_submission("任意时间"))
        .await
        .unwrap();
    assert_eq!(outcome.submission.status, SubmissionStatus::Submitted);

    // 事后修改截止时间不回溯已判定的状态
    h.assignments
        .update_assignment(
            on_time,
            UpdateAssignmentRequest {
                due_date: Some(Utc::now() - Duration::hours(2)),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    let kept = h
        .storage
        .get_submission_for_student(on_time, STUDENT)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(kept.status, SubmissionStatus::Submitted);
}

#[tokio::test]
async fn test_resubmission_overwrites_single_row() {
    let h = harness().await;
    let (_, assignment_id) = course_with_assignment(&h, None, None).await;

    let first = h
        .submissions
        .submit(assignment_id, STUDENT, text_submission("第一版"))
        .await
        .unwrap();
    let second = h
        .submissions
        .submit(assignment_id, STUDENT, text_submission("第二版"))
        .await
        .unwrap();

    // 同一行被覆盖，不产生第二行
    assert_eq!(first.submission.id, second.submission.id);
    assert_eq!(second.submission.content.as_deref(), Some("第二版"));

    let listed = h
        .submissions
        .list_submissions(SubmissionListQuery {
            assignment_id: Some(assignment_id),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(listed.pagination.total, 1);
}

#[tokio::test]
async fn test_resubmission_after_grading_clears_grade() {
    let h = harness().await;
    let (_, assignment_id) = course_with_assignment(&h, None, None).await;

    let outcome = h
        .submissions
        .submit(assignment_id, STUDENT, text_submission("第一版"))
        .await
        .unwrap();
    h.grades
        .grade_submission(
            outcome.submission.id,
            GradeRequest {
                score: 8.0,
                feedback: None,
            },
        )
        .await
        .unwrap();

    // 重新提交后回到 submitted，评分字段清空，graded ⇔ grade 互锁保持
    let resubmitted = h
        .submissions
        .submit(assignment_id, STUDENT, text_submission("修订版"))
        .await
        .unwrap();
    assert_eq!(resubmitted.submission.status, SubmissionStatus::Submitted);
    assert_eq!(resubmitted.submission.grade, None);
    assert_eq!(resubmitted.submission.graded_at, None);
}

#[tokio::test]
async fn test_grade_bounds_and_interlock() {
    let h = harness().await;
    let (_, assignment_id) = course_with_assignment(&h, None, Some(10.0)).await;

    let outcome = h
        .submissions
        .submit(assignment_id, STUDENT, text_submission("待评分"))
        .await
        .unwrap();
    let submission_id = outcome.submission.id;

    // 越界成绩被拒绝，且不会部分写入
    let err = h
        .grades
        .grade_submission(
            submission_id,
            GradeRequest {
                score: 11.0,
                feedback: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, LMSystemError::OutOfRange(_)));

    let untouched = h
        .storage
        .get_submission_by_id(submission_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(untouched.grade, None);
    assert_eq!(untouched.status, SubmissionStatus::Submitted);

    let err = h
        .grades
        .grade_submission(
            submission_id,
            GradeRequest {
                score: -0.5,
                feedback: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, LMSystemError::OutOfRange(_)));

    // 合法评分：graded ⇔ grade 非空
    let graded = h
        .grades
        .grade_submission(
            submission_id,
            GradeRequest {
                score: 7.5,
                feedback: Some("不错".to_string()),
            },
        )
        .await
        .unwrap();
    assert_eq!(graded.submission.status, SubmissionStatus::Graded);
    assert_eq!(graded.submission.grade, Some(7.5));
    assert!(graded.submission.graded_at.is_some());
    assert!(graded.notification_warning.is_none());

    // 重评覆盖成绩，状态保持 graded
    let regraded = h
        .grades
        .grade_submission(
            submission_id,
            GradeRequest {
                score: 9.0,
                feedback: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(regraded.submission.status, SubmissionStatus::Graded);
    assert_eq!(regraded.submission.grade, Some(9.0));
}

#[tokio::test]
async fn test_grade_missing_submission_is_not_found() {
    let h = harness().await;
    let err = h
        .grades
        .grade_submission(
            424242,
            GradeRequest {
                score: 5.0,
                feedback: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, LMSystemError::NotFound(_)));
}

#[tokio::test]
async fn test_cascade_delete_leaves_no_related_rows() {
    let h = harness().await;
    let (_, assignment_id) = course_with_assignment(&h, None, None).await;

    // 一份文档 + 一次带两个附件的提交
    h.assignments
        .upload_document(
            assignment_id,
            INSTRUCTOR,
            rust_lmsystem_next::models::documents::requests::UploadDocumentRequest {
                title: "实验说明".to_string(),
                file_name: "handout.pdf".to_string(),
                content_type: Some("application/pdf".to_string()),
                bytes: pdf_bytes(),
            },
        )
        .await
        .unwrap();

    let outcome = h
        .submissions
        .submit(
            assignment_id,
            STUDENT,
            SubmitRequest {
                content: "见附件".to_string(),
                files: vec![
                    SubmissionUpload {
                        file_name: "report.pdf".to_string(),
                        content_type: Some("application/pdf".to_string()),
                        bytes: pdf_bytes(),
                    },
                    SubmissionUpload {
                        file_name: "figure.png".to_string(),
                        content_type: Some("image/png".to_string()),
                        bytes: png_bytes(),
                    },
                ],
            },
        )
        .await
        .unwrap();
    assert_eq!(outcome.files.len(), 2);
    assert!(outcome.rejected_files.is_empty());

    let deletion = h.assignments.delete_assignment(assignment_id).await.unwrap();
    assert_eq!(deletion.documents, 1);
    assert_eq!(deletion.submissions, 1);
    assert_eq!(deletion.files, 2);

    // 四张关联表全部归零
    assert!(h.assignments.get_assignment(assignment_id).await.unwrap().is_none());
    assert!(h.assignments.list_documents(assignment_id).await.unwrap().is_empty());
    assert!(
        h.storage
            .get_submission_for_student(assignment_id, STUDENT)
            .await
            .unwrap()
            .is_none()
    );
    assert!(
        h.storage
            .list_submission_files(outcome.submission.id)
            .await
            .unwrap()
            .is_empty()
    );

    // 删除不存在的作业是 NotFound，不是静默成功
    let err = h.assignments.delete_assignment(assignment_id).await.unwrap_err();
    assert!(matches!(err, LMSystemError::NotFound(_)));
}

#[tokio::test]
async fn test_remove_attachment_checks_ownership() {
    let h = harness().await;
    let (_, assignment_id) = course_with_assignment(&h, None, None).await;

    let outcome = h
        .submissions
        .submit(
            assignment_id,
            STUDENT,
            SubmitRequest {
                content: "带附件".to_string(),
                files: vec![SubmissionUpload {
                    file_name: "report.pdf".to_string(),
                    content_type: None,
                    bytes: pdf_bytes(),
                }],
            },
        )
        .await
        .unwrap();
    let file = &outcome.files[0];

    // 附件不属于别的提交
    let err = h
        .submissions
        .remove_attachment(outcome.submission.id + 1, file.id)
        .await
        .unwrap_err();
    assert!(matches!(err, LMSystemError::NotFound(_)));

    h.submissions
        .remove_attachment(outcome.submission.id, file.id)
        .await
        .unwrap();
    assert!(
        h.storage
            .list_submission_files(outcome.submission.id)
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn test_per_file_failure_is_isolated() {
    let h = harness().await;
    let (_, assignment_id) = course_with_assignment(&h, None, None).await;

    let outcome = h
        .submissions
        .submit(
            assignment_id,
            STUDENT,
            SubmitRequest {
                content: "混合附件".to_string(),
                files: vec![
                    SubmissionUpload {
                        file_name: "ok.pdf".to_string(),
                        content_type: None,
                        bytes: pdf_bytes(),
                    },
                    SubmissionUpload {
                        file_name: "malware.exe".to_string(),
                        content_type: None,
                        bytes: vec![0x4D, 0x5A],
                    },
                    SubmissionUpload {
                        file_name: "fake.png".to_string(),
                        content_type: None,
                        bytes: pdf_bytes(), // 内容与扩展名不符
                    },
                ],
            },
        )
        .await
        .unwrap();

    // 提交成功，合法附件入库，非法附件逐个列出
    assert_eq!(outcome.submission.status, SubmissionStatus::Submitted);
    assert_eq!(outcome.files.len(), 1);
    assert_eq!(outcome.rejected_files.len(), 2);
    let rejected: Vec<&str> = outcome
        .rejected_files
        .iter()
        .map(|r| r.file_name.as_str())
        .collect();
    assert!(rejected.contains(&"malware.exe"));
    assert!(rejected.contains(&"fake.png"));
}

#[tokio::test]
async fn test_end_to_end_submit_and_grade_flow() {
    let h = harness().await;
    let (course_id, assignment_id) =
        course_with_assignment(&h, Some(Utc::now() + Duration::days(7)), Some(10.0)).await;

    // 学生先选课，发布时收到通知
    h.courses.enroll_student(course_id, STUDENT).await.unwrap();
    h.assignments
        .set_status(assignment_id, AssignmentStatus::Active)
        .await
        .unwrap();

    let outcome = h
        .submissions
        .submit(
            assignment_id,
            STUDENT,
            SubmitRequest {
                content: "实验报告见附件".to_string(),
                files: vec![
                    SubmissionUpload {
                        file_name: "report.pdf".to_string(),
                        content_type: Some("application/pdf".to_string()),
                        bytes: pdf_bytes(),
                    },
                    SubmissionUpload {
                        file_name: "data.zip".to_string(),
                        content_type: Some("application/zip".to_string()),
                        bytes: vec![0x50, 0x4B, 0x03, 0x04, 0x00],
                    },
                ],
            },
        )
        .await
        .unwrap();
    assert_eq!(outcome.files.len(), 2);

    let graded = h
        .grades
        .grade_submission(
            outcome.submission.id,
            GradeRequest {
                score: 7.5,
                feedback: Some("图表再精细一些".to_string()),
            },
        )
        .await
        .unwrap();
    assert_eq!(graded.submission.status, SubmissionStatus::Graded);
    assert_eq!(graded.submission.grade, Some(7.5));

    // 两个附件都能通过存储路径取回
    let view = h.submissions.student_view(outcome.submission.id).await.unwrap();
    assert_eq!(view.files.len(), 2);
    for file in &view.files {
        let on_disk = h
            .blob_root
            .join("submission-files")
            .join(&file.file_path);
        assert!(on_disk.exists(), "附件对象缺失: {}", file.file_path);
    }

    // 恰好一条 assignment_graded 通知
    let notifications = h
        .notifications
        .list_notifications(STUDENT, NotificationListQuery::default())
        .await
        .unwrap();
    let graded_count = notifications
        .items
        .iter()
        .filter(|n| n.notification_type == NotificationType::AssignmentGraded)
        .count();
    assert_eq!(graded_count, 1);

    // 发布时的 assignment_created 通知也在
    assert!(
        notifications
            .items
            .iter()
            .any(|n| n.notification_type == NotificationType::AssignmentCreated)
    );
}
