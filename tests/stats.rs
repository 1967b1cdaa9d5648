//! 角色口径统计测试

mod common;

use common::{harness, pdf_bytes};
use rust_lmsystem_next::errors::LMSystemError;
use rust_lmsystem_next::models::assignments::requests::CreateAssignmentRequest;
use rust_lmsystem_next::models::courses::requests::CreateCourseRequest;
use rust_lmsystem_next::models::documents::requests::UploadDocumentRequest;
use rust_lmsystem_next::models::submissions::requests::{GradeRequest, SubmitRequest};

const INSTRUCTOR: i64 = 41;
const STUDENT_A: i64 = 51;
const STUDENT_B: i64 = 52;

#[tokio::test]
async fn test_stats_are_zero_without_data() {
    let h = harness().await;

    let instructor = h.stats.instructor_stats(INSTRUCTOR).await.unwrap();
    assert_eq!(instructor.course_count, 0);
    assert_eq!(instructor.student_count, 0);
    assert_eq!(instructor.document_count, 0);
    assert_eq!(instructor.assignment_count, 0);

    let student = h.stats.student_stats(STUDENT_A).await.unwrap();
    assert_eq!(student.enrollment_count, 0);
    assert_eq!(student.submission_count, 0);
    assert_eq!(student.average_grade, 0.0);
}

#[tokio::test]
async fn test_duplicate_enrollment_is_conflict() {
    let h = harness().await;
    let course = h
        .courses
        .create_course(
            INSTRUCTOR,
            CreateCourseRequest {
                title: "操作系统".to_string(),
                description: None,
            },
        )
        .await
        .unwrap();

    h.courses.enroll_student(course.id, STUDENT_A).await.unwrap();
    let err = h
        .courses
        .enroll_student(course.id, STUDENT_A)
        .await
        .unwrap_err();
    assert!(matches!(err, LMSystemError::Conflict(_)));
}

#[tokio::test]
async fn test_role_scoped_stats_roundup() {
    let h = harness().await;

    let course = h
        .courses
        .create_course(
            INSTRUCTOR,
            CreateCourseRequest {
                title: "编译原理".to_string(),
                description: Some("前端到后端".to_string()),
            },
        )
        .await
        .unwrap();

    h.courses.enroll_student(course.id, STUDENT_A).await.unwrap();
    h.courses.enroll_student(course.id, STUDENT_B).await.unwrap();

    // 两个作业，满分分别为 10 和 20
    let a1 = h
        .assignments
        .create_assignment(
            INSTRUCTOR,
            CreateAssignmentRequest {
                course_id: course.id,
                title: "词法分析".to_string(),
                description: None,
                due_date: None,
                max_score: Some(10.0),
            },
        )
        .await
        .unwrap();
    let a2 = h
        .assignments
        .create_assignment(
            INSTRUCTOR,
            CreateAssignmentRequest {
                course_id: course.id,
                title: "语法分析".to_string(),
                description: None,
                due_date: None,
                max_score: Some(20.0),
            },
        )
        .await
        .unwrap();

    h.assignments
        .upload_document(
            a1.id,
            INSTRUCTOR,
            UploadDocumentRequest {
                title: "实验指导".to_string(),
                file_name: "guide.pdf".to_string(),
                content_type: Some("application/pdf".to_string()),
                bytes: pdf_bytes(),
            },
        )
        .await
        .unwrap();

    // 学生 A 完成两个作业并获得评分：7.5/10 与 10/20
    for (assignment_id, score) in [(a1.id, 7.5), (a2.id, 10.0)] {
        let outcome = h
            .submissions
            .submit(
                assignment_id,
                STUDENT_A,
                SubmitRequest {
                    content: "完成".to_string(),
                    files: Vec::new(),
                },
            )
            .await
            .unwrap();
        h.grades
            .grade_submission(
                outcome.submission.id,
                GradeRequest {
                    score,
                    feedback: None,
                },
            )
            .await
            .unwrap();
    }

    // 学生 B 只提交不评分
    h.submissions
        .submit(
            a1.id,
            STUDENT_B,
            SubmitRequest {
                content: "完成".to_string(),
                files: Vec::new(),
            },
        )
        .await
        .unwrap();

    let instructor = h.stats.instructor_stats(INSTRUCTOR).await.unwrap();
    assert_eq!(instructor.course_count, 1);
    assert_eq!(instructor.student_count, 2);
    assert_eq!(instructor.document_count, 1);
    assert_eq!(instructor.assignment_count, 2);

    // 平均成绩 = mean(7.5/10×10, 10/20×10) = mean(7.5, 5.0) = 6.25 → 6.3
    let student_a = h.stats.student_stats(STUDENT_A).await.unwrap();
    assert_eq!(student_a.enrollment_count, 1);
    assert_eq!(student_a.submission_count, 2);
    assert_eq!(student_a.average_grade, 6.3);

    // 未评分的提交不拉低平均分
    let student_b = h.stats.student_stats(STUDENT_B).await.unwrap();
    assert_eq!(student_b.enrollment_count, 1);
    assert_eq!(student_b.submission_count, 1);
    assert_eq!(student_b.average_grade, 0.0);
}
