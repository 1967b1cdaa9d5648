use serde::{Deserialize, Serialize};

// 通知类型
//
// 所有通知（包括由领域事件派生的）都是持久行，读状态只有一个事实来源。
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Default)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    AssignmentCreated, // 作业发布
    AssignmentGraded,  // 作业已评分
    DocumentUploaded,  // 作业文档上传
    CourseEnrolled,    // 选课成功
    #[default]
    Message,           // 站内消息
}

impl NotificationType {
    pub const ASSIGNMENT_CREATED: &'static str = "assignment_created";
    pub const ASSIGNMENT_GRADED: &'static str = "assignment_graded";
    pub const DOCUMENT_UPLOADED: &'static str = "document_uploaded";
    pub const COURSE_ENROLLED: &'static str = "course_enrolled";
    pub const MESSAGE: &'static str = "message";

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            Self::ASSIGNMENT_CREATED => Some(NotificationType::AssignmentCreated),
            Self::ASSIGNMENT_GRADED => Some(NotificationType::AssignmentGraded),
            Self::DOCUMENT_UPLOADED => Some(NotificationType::DocumentUploaded),
            Self::COURSE_ENROLLED => Some(NotificationType::CourseEnrolled),
            Self::MESSAGE => Some(NotificationType::Message),
            _ => None,
        }
    }
}

impl<'de> Deserialize<'de> for NotificationType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NotificationType::parse(&s).ok_or_else(|| {
            serde::de::Error::custom(format!(
                "无效的通知类型: '{s}'. 支持的类型: assignment_created, assignment_graded, document_uploaded, course_enrolled, message"
            ))
        })
    }
}

impl std::fmt::Display for NotificationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotificationType::AssignmentCreated => write!(f, "{}", Self::ASSIGNMENT_CREATED),
            NotificationType::AssignmentGraded => write!(f, "{}", Self::ASSIGNMENT_GRADED),
            NotificationType::DocumentUploaded => write!(f, "{}", Self::DOCUMENT_UPLOADED),
            NotificationType::CourseEnrolled => write!(f, "{}", Self::COURSE_ENROLLED),
            NotificationType::Message => write!(f, "{}", Self::MESSAGE),
        }
    }
}

impl std::str::FromStr for NotificationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NotificationType::parse(s).ok_or_else(|| format!("Invalid notification type: {s}"))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub content: String,
    #[serde(rename = "type")]
    pub notification_type: NotificationType,
    pub is_read: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
