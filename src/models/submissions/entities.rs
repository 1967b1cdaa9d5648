use serde::{Deserialize, Serialize};

// 提交状态
//
// graded 与 grade 字段严格互锁：status == graded 当且仅当 grade 非空。
// late 在提交时刻一次性判定，之后修改截止时间不回溯。
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    #[default]
    Pending,   // 占位，从未提交
    Submitted, // 已提交
    Graded,    // 已评分
    Late,      // 迟交
}

impl SubmissionStatus {
    pub const PENDING: &'static str = "pending";
    pub const SUBMITTED: &'static str = "submitted";
    pub const GRADED: &'static str = "graded";
    pub const LATE: &'static str = "late";

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            Self::PENDING => Some(SubmissionStatus::Pending),
            Self::SUBMITTED => Some(SubmissionStatus::Submitted),
            Self::GRADED => Some(SubmissionStatus::Graded),
            Self::LATE => Some(SubmissionStatus::Late),
            _ => None,
        }
    }

    /// 是否可评分（重评已评分的提交是允许的）
    pub fn gradable(self) -> bool {
        matches!(
            self,
            SubmissionStatus::Submitted | SubmissionStatus::Late | SubmissionStatus::Graded
        )
    }
}

impl<'de> Deserialize<'de> for SubmissionStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        SubmissionStatus::parse(&s).ok_or_else(|| {
            serde::de::Error::custom(format!(
                "无效的提交状态: '{s}'. 支持的状态: pending, submitted, graded, late"
            ))
        })
    }
}

impl std::fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmissionStatus::Pending => write!(f, "{}", Self::PENDING),
            SubmissionStatus::Submitted => write!(f, "{}", Self::SUBMITTED),
            SubmissionStatus::Graded => write!(f, "{}", Self::GRADED),
            SubmissionStatus::Late => write!(f, "{}", Self::LATE),
        }
    }
}

impl std::str::FromStr for SubmissionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SubmissionStatus::parse(s).ok_or_else(|| format!("Invalid submission status: {s}"))
    }
}

/// 提交记录：每个 (作业, 学生) 至多一条，重复提交原地覆盖
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Submission {
    pub id: i64,
    pub assignment_id: i64,
    pub student_id: i64,
    pub content: Option<String>,
    pub status: SubmissionStatus,
    pub submitted_at: Option<chrono::DateTime<chrono::Utc>>,
    pub grade: Option<f64>,
    pub feedback: Option<String>,
    pub graded_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// 提交附件元数据，字节本身在对象存储
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionFile {
    pub id: i64,
    pub submission_id: i64,
    pub file_name: String,
    pub file_path: String,
    pub file_type: Option<String>,
    pub file_size: Option<i64>,
    pub uploaded_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gradable_states() {
        assert!(SubmissionStatus::Submitted.gradable());
        assert!(SubmissionStatus::Late.gradable());
        assert!(SubmissionStatus::Graded.gradable());
        assert!(!SubmissionStatus::Pending.gradable());
    }

    #[test]
    fn test_parse_roundtrip() {
        for status in [
            SubmissionStatus::Pending,
            SubmissionStatus::Submitted,
            SubmissionStatus::Graded,
            SubmissionStatus::Late,
        ] {
            assert_eq!(SubmissionStatus::parse(&status.to_string()), Some(status));
        }
        assert_eq!(SubmissionStatus::parse("returned"), None);
    }
}
