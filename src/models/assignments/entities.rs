use serde::{Deserialize, Serialize};

// 作业生命周期状态
//
// 归档是终态：重新开放需要新建作业。
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Default)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentStatus {
    #[default]
    Draft,    // 草稿
    Active,   // 已发布
    Archived, // 已归档
}

impl AssignmentStatus {
    pub const DRAFT: &'static str = "draft";
    pub const ACTIVE: &'static str = "active";
    pub const ARCHIVED: &'static str = "archived";

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            Self::DRAFT => Some(AssignmentStatus::Draft),
            Self::ACTIVE => Some(AssignmentStatus::Active),
            Self::ARCHIVED => Some(AssignmentStatus::Archived),
            _ => None,
        }
    }

    /// 状态迁移表：draft → active → archived，其余一律拒绝
    pub fn can_transition_to(self, next: AssignmentStatus) -> bool {
        matches!(
            (self, next),
            (AssignmentStatus::Draft, AssignmentStatus::Active)
                | (AssignmentStatus::Active, AssignmentStatus::Archived)
        )
    }
}

impl<'de> Deserialize<'de> for AssignmentStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        AssignmentStatus::parse(&s).ok_or_else(|| {
            serde::de::Error::custom(format!(
                "无效的作业状态: '{s}'. 支持的状态: draft, active, archived"
            ))
        })
    }
}

impl std::fmt::Display for AssignmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssignmentStatus::Draft => write!(f, "{}", Self::DRAFT),
            AssignmentStatus::Active => write!(f, "{}", Self::ACTIVE),
            AssignmentStatus::Archived => write!(f, "{}", Self::ARCHIVED),
        }
    }
}

impl std::str::FromStr for AssignmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AssignmentStatus::parse(s).ok_or_else(|| format!("Invalid assignment status: {s}"))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assignment {
    // 唯一 ID
    pub id: i64,
    // 所属课程 ID
    pub course_id: i64,
    // 作业标题
    pub title: String,
    // 作业描述
    pub description: Option<String>,
    // 截止时间
    pub due_date: Option<chrono::DateTime<chrono::Utc>>,
    // 创建者 ID（外部身份系统）
    pub created_by: i64,
    // 生命周期状态
    pub status: AssignmentStatus,
    // 作业满分
    pub max_score: f64,
    // 创建时间
    pub created_at: chrono::DateTime<chrono::Utc>,
    // 更新时间
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transition_table() {
        use AssignmentStatus::*;
        assert!(Draft.can_transition_to(Active));
        assert!(Active.can_transition_to(Archived));
        // 归档是终态
        assert!(!Archived.can_transition_to(Active));
        assert!(!Archived.can_transition_to(Draft));
        assert!(!Draft.can_transition_to(Archived));
        assert!(!Active.can_transition_to(Draft));
        assert!(!Draft.can_transition_to(Draft));
    }

    #[test]
    fn test_parse_roundtrip() {
        for status in [
            AssignmentStatus::Draft,
            AssignmentStatus::Active,
            AssignmentStatus::Archived,
        ] {
            assert_eq!(AssignmentStatus::parse(&status.to_string()), Some(status));
        }
        assert_eq!(AssignmentStatus::parse("published"), None);
    }
}
