//! 通知读状态与未读计数测试

mod common;

use common::harness;
use rust_lmsystem_next::errors::LMSystemError;
use rust_lmsystem_next::models::notifications::entities::NotificationType;
use rust_lmsystem_next::models::notifications::requests::NotificationListQuery;

const RECIPIENT: i64 = 31;
const OTHER: i64 = 32;

#[tokio::test]
async fn test_unread_count_is_exact_and_split_by_kind() {
    let h = harness().await;

    h.notifications
        .notify(RECIPIENT, NotificationType::Message, "私信", "在吗")
        .await
        .unwrap();
    h.notifications
        .notify(RECIPIENT, NotificationType::AssignmentCreated, "新作业", "实验一已发布")
        .await
        .unwrap();
    h.notifications
        .notify(RECIPIENT, NotificationType::AssignmentGraded, "已评分", "7.5 / 10")
        .await
        .unwrap();
    // 其他用户的通知不计入
    h.notifications
        .notify(OTHER, NotificationType::Message, "私信", "无关")
        .await
        .unwrap();

    let count = h.notifications.unread_count(RECIPIENT).await.unwrap();
    assert_eq!(count.messages, 1);
    assert_eq!(count.notifications, 2);
}

#[tokio::test]
async fn test_mark_read_flips_single_row() {
    let h = harness().await;

    let first = h
        .notifications
        .notify(RECIPIENT, NotificationType::DocumentUploaded, "资料", "新文档")
        .await
        .unwrap();
    h.notifications
        .notify(RECIPIENT, NotificationType::DocumentUploaded, "资料", "又一份")
        .await
        .unwrap();

    h.notifications.mark_read(first.id).await.unwrap();

    let count = h.notifications.unread_count(RECIPIENT).await.unwrap();
    assert_eq!(count.notifications, 1);

    // 已读行在 unread_only 列表中消失
    let unread = h
        .notifications
        .list_notifications(
            RECIPIENT,
            NotificationListQuery {
                unread_only: Some(true),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(unread.items.len(), 1);
    assert!(unread.items.iter().all(|n| n.id != first.id));
}

#[tokio::test]
async fn test_mark_read_missing_is_not_found() {
    let h = harness().await;
    let err = h.notifications.mark_read(987654).await.unwrap_err();
    assert!(matches!(err, LMSystemError::NotFound(_)));
}

#[tokio::test]
async fn test_mark_all_read_then_count_is_zero() {
    let h = harness().await;

    for i in 0..5 {
        h.notifications
            .notify(
                RECIPIENT,
                if i % 2 == 0 {
                    NotificationType::Message
                } else {
                    NotificationType::AssignmentCreated
                },
                "标题",
                "内容",
            )
            .await
            .unwrap();
    }

    let flipped = h.notifications.mark_all_read(RECIPIENT).await.unwrap();
    assert_eq!(flipped, 5);

    let count = h.notifications.unread_count(RECIPIENT).await.unwrap();
    assert_eq!(count.messages, 0);
    assert_eq!(count.notifications, 0);

    // 重复标记是空操作
    let flipped = h.notifications.mark_all_read(RECIPIENT).await.unwrap();
    assert_eq!(flipped, 0);
}

#[tokio::test]
async fn test_cache_is_invalidated_on_every_mutation() {
    let h = harness().await;

    // 先读一次把计数放进缓存
    let count = h.notifications.unread_count(RECIPIENT).await.unwrap();
    assert_eq!(count.notifications, 0);

    // 新通知到达后计数立即可见，而不是等 TTL 过期
    h.notifications
        .notify(RECIPIENT, NotificationType::AssignmentCreated, "新作业", "内容")
        .await
        .unwrap();
    let count = h.notifications.unread_count(RECIPIENT).await.unwrap();
    assert_eq!(count.notifications, 1);

    h.notifications.mark_all_read(RECIPIENT).await.unwrap();
    let count = h.notifications.unread_count(RECIPIENT).await.unwrap();
    assert_eq!(count.notifications, 0);
}
