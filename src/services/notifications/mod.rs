pub mod count;
pub mod dispatch;
pub mod list;
pub mod read;

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;

use crate::config::AppConfig;
use crate::errors::Result;
use crate::models::notifications::{
    entities::{Notification, NotificationType},
    requests::NotificationListQuery,
    responses::{NotificationListResponse, UnreadCount},
};
use crate::storage::Storage;

/// 通知派发器
///
/// 所有通知都落为持久行，读状态单一事实来源。未读计数走 TTL 缓存，
/// 每次通知变更显式失效对应接收者的缓存项。
pub struct NotificationService {
    storage: Arc<dyn Storage>,
    unread_cache: Cache<i64, UnreadCount>,
}

impl NotificationService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        let config = AppConfig::get();
        let unread_cache = Cache::builder()
            .max_capacity(config.notifications.cache_capacity)
            .time_to_live(Duration::from_secs(config.notifications.unread_ttl))
            .build();

        Self {
            storage,
            unread_cache,
        }
    }

    /// 创建通知
    pub async fn notify(
        &self,
        user_id: i64,
        notification_type: NotificationType,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Result<Notification> {
        dispatch::notify(self, user_id, notification_type, title.into(), content.into()).await
    }

    /// 批量创建通知（同一事件扇出到多个接收者）
    pub async fn notify_many(
        &self,
        user_ids: &[i64],
        notification_type: NotificationType,
        title: &str,
        content: &str,
    ) -> Result<Vec<Notification>> {
        dispatch::notify_many(self, user_ids, notification_type, title, content).await
    }

    /// 标记单条已读
    pub async fn mark_read(&self, notification_id: i64) -> Result<()> {
        read::mark_read(self, notification_id).await
    }

    /// 标记用户全部已读，返回翻转条数
    pub async fn mark_all_read(&self, user_id: i64) -> Result<i64> {
        read::mark_all_read(self, user_id).await
    }

    /// 未读计数
    pub async fn unread_count(&self, user_id: i64) -> Result<UnreadCount> {
        count::unread_count(self, user_id).await
    }

    /// 列出用户通知
    pub async fn list_notifications(
        &self,
        user_id: i64,
        query: NotificationListQuery,
    ) -> Result<NotificationListResponse> {
        list::list_notifications(self, user_id, query).await
    }
}
