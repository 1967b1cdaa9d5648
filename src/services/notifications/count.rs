use tracing::debug;

use super::NotificationService;
use crate::errors::Result;
use crate::models::notifications::responses::UnreadCount;
use crate::storage::Storage;

/// 未读计数
///
/// 按 TTL 重算即可满足轮询语义，变更路径会主动失效缓存，
/// 因此读到的计数不会落后于本进程内的最近一次变更。
pub async fn unread_count(service: &NotificationService, user_id: i64) -> Result<UnreadCount> {
    if let Some(cached) = service.unread_cache.get(&user_id).await {
        debug!("未读计数缓存命中: user_id={}", user_id);
        return Ok(cached);
    }

    let count = service.storage.count_unread_notifications(user_id).await?;
    service.unread_cache.insert(user_id, count).await;

    Ok(count)
}
