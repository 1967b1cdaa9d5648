use super::NotificationService;
use crate::errors::Result;
use crate::models::notifications::{
    requests::NotificationListQuery, responses::NotificationListResponse,
};

/// 列出用户通知
pub async fn list_notifications(
    service: &NotificationService,
    user_id: i64,
    query: NotificationListQuery,
) -> Result<NotificationListResponse> {
    service
        .storage
        .list_notifications_with_pagination(user_id, query)
        .await
}
