use super::NotificationService;
use crate::errors::Result;
use crate::models::notifications::{
    entities::{Notification, NotificationType},
    requests::CreateNotificationRequest,
};

/// 创建通知并失效接收者的未读计数缓存
pub async fn notify(
    service: &NotificationService,
    user_id: i64,
    notification_type: NotificationType,
    title: String,
    content: String,
) -> Result<Notification> {
    let notification = service
        .storage
        .create_notification(CreateNotificationRequest {
            user_id,
            notification_type,
            title,
            content,
        })
        .await?;

    service.unread_cache.invalidate(&user_id).await;

    Ok(notification)
}

/// 批量创建通知
pub async fn notify_many(
    service: &NotificationService,
    user_ids: &[i64],
    notification_type: NotificationType,
    title: &str,
    content: &str,
) -> Result<Vec<Notification>> {
    if user_ids.is_empty() {
        return Ok(Vec::new());
    }

    let reqs = user_ids
        .iter()
        .map(|&user_id| CreateNotificationRequest {
            user_id,
            notification_type,
            title: title.to_string(),
            content: content.to_string(),
        })
        .collect();

    let notifications = service.storage.create_notifications_batch(reqs).await?;

    for user_id in user_ids {
        service.unread_cache.invalidate(user_id).await;
    }

    Ok(notifications)
}
