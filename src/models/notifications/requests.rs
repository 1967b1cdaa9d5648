use serde::Deserialize;

use super::entities::NotificationType;

/// 创建通知请求
#[derive(Debug, Clone, Deserialize)]
pub struct CreateNotificationRequest {
    pub user_id: i64,
    pub notification_type: NotificationType,
    pub title: String,
    pub content: String,
}

/// 通知列表查询
#[derive(Debug, Clone, Deserialize, Default)]
pub struct NotificationListQuery {
    pub unread_only: Option<bool>,
    pub page: Option<i64>,
    pub size: Option<i64>,
}
