use super::NotificationService;
use crate::errors::{LMSystemError, Result};
use crate::storage::Storage;

/// 标记单条通知已读
pub async fn mark_read(service: &NotificationService, notification_id: i64) -> Result<()> {
    let notification = service
        .storage
        .get_notification_by_id(notification_id)
        .await?
        .ok_or_else(|| LMSystemError::not_found(format!("通知不存在: {notification_id}")))?;

    service.storage.mark_notification_read(notification_id).await?;
    service.unread_cache.invalidate(&notification.user_id).await;

    Ok(())
}

/// 标记用户全部通知已读
pub async fn mark_all_read(service: &NotificationService, user_id: i64) -> Result<i64> {
    let flipped = service.storage.mark_all_notifications_read(user_id).await?;
    service.unread_cache.invalidate(&user_id).await;

    Ok(flipped)
}
