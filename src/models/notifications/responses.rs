use serde::{Deserialize, Serialize};

use super::entities::Notification;
use crate::models::PaginationInfo;

/// 未读计数：站内消息与其余通知分开计
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct UnreadCount {
    pub messages: i64,
    pub notifications: i64,
}

/// 通知列表响应
#[derive(Debug, Serialize)]
pub struct NotificationListResponse {
    pub items: Vec<Notification>,
    pub pagination: PaginationInfo,
}
