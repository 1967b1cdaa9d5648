pub mod grade;

use std::sync::Arc;

use crate::errors::Result;
use crate::models::submissions::{requests::GradeRequest, responses::GradeOutcome};
use crate::services::NotificationService;
use crate::storage::Storage;

/// 评分服务：对已提交记录写入成绩并迁移到终态 graded
pub struct GradeService {
    storage: Arc<dyn Storage>,
    notifications: Arc<NotificationService>,
}

impl GradeService {
    pub fn new(storage: Arc<dyn Storage>, notifications: Arc<NotificationService>) -> Self {
        Self {
            storage,
            notifications,
        }
    }

    /// 评分（重评会覆盖成绩并刷新 graded_at）
    pub async fn grade_submission(
        &self,
        submission_id: i64,
        req: GradeRequest,
    ) -> Result<GradeOutcome> {
        grade::grade_submission(self, submission_id, req).await
    }
}
