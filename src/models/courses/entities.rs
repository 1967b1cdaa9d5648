use serde::{Deserialize, Serialize};

// 选课状态
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Default)]
#[serde(rename_all = "snake_case")]
pub enum EnrollmentStatus {
    #[default]
    Active,  // 在读
    Dropped, // 退课
}

impl EnrollmentStatus {
    pub const ACTIVE: &'static str = "active";
    pub const DROPPED: &'static str = "dropped";

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            Self::ACTIVE => Some(EnrollmentStatus::Active),
            Self::DROPPED => Some(EnrollmentStatus::Dropped),
            _ => None,
        }
    }
}

impl<'de> Deserialize<'de> for EnrollmentStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        EnrollmentStatus::parse(&s).ok_or_else(|| {
            serde::de::Error::custom(format!(
                "无效的选课状态: '{s}'. 支持的状态: active, dropped"
            ))
        })
    }
}

impl std::fmt::Display for EnrollmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EnrollmentStatus::Active => write!(f, "{}", Self::ACTIVE),
            EnrollmentStatus::Dropped => write!(f, "{}", Self::DROPPED),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    pub id: i64,
    pub instructor_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enrollment {
    pub id: i64,
    pub course_id: i64,
    pub student_id: i64,
    pub status: EnrollmentStatus,
    pub enrolled_at: chrono::DateTime<chrono::Utc>,
}
