use tracing::{info, warn};

use super::CourseService;
use crate::errors::Result;
use crate::models::courses::entities::Enrollment;
use crate::models::notifications::entities::NotificationType;
use crate::storage::Storage;

/// 学生选课
///
/// 重复选课由唯一索引兜底并映射为 Conflict，调用方可按"已选过"处理。
pub async fn enroll_student(
    service: &CourseService,
    course_id: i64,
    student_id: i64,
) -> Result<Enrollment> {
    let enrollment = service.storage.enroll_student(course_id, student_id).await?;
    let course = service.get_course(course_id).await?;

    info!(
        "学生选课成功: course_id={} student_id={}",
        course_id, student_id
    );

    if let Err(e) = service
        .notifications
        .notify(
            student_id,
            NotificationType::CourseEnrolled,
            format!("选课成功: {}", course.title),
            format!("你已加入课程《{}》。", course.title),
        )
        .await
    {
        warn!("选课通知派发失败: course_id={course_id} student_id={student_id}: {e}");
    }

    Ok(enrollment)
}
