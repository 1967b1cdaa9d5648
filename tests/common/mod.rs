//! 集成测试公共脚手架：内存 SQLite + 临时目录对象存储 + 全套服务

use std::path::PathBuf;
use std::sync::Arc;

use rust_lmsystem_next::services::{
    AssignmentService, CourseService, GradeService, NotificationService, StatsService,
    SubmissionService,
};
use rust_lmsystem_next::storage::blob::{BlobStore, LocalBlobStore};
use rust_lmsystem_next::storage::sea_orm_storage::SeaOrmStorage;
use rust_lmsystem_next::storage::Storage;

pub struct TestHarness {
    pub storage: Arc<dyn Storage>,
    pub blob: Arc<dyn BlobStore>,
    pub notifications: Arc<NotificationService>,
    pub assignments: AssignmentService,
    pub submissions: SubmissionService,
    pub grades: GradeService,
    pub courses: CourseService,
    pub stats: StatsService,
    pub blob_root: PathBuf,
}

pub async fn harness() -> TestHarness {
    let storage: Arc<dyn Storage> = Arc::new(
        SeaOrmStorage::new_with_url("sqlite::memory:")
            .await
            .expect("内存数据库初始化失败"),
    );

    let blob_root = std::env::temp_dir().join(format!("lmsystem-test-{}", uuid::Uuid::new_v4()));
    let blob: Arc<dyn BlobStore> = Arc::new(LocalBlobStore::new(blob_root.clone(), "/files"));

    let notifications = Arc::new(NotificationService::new(storage.clone()));

    TestHarness {
        assignments: AssignmentService::new(
            storage.clone(),
            blob.clone(),
            notifications.clone(),
        ),
        submissions: SubmissionService::new(storage.clone(), blob.clone()),
        grades: GradeService::new(storage.clone(), notifications.clone()),
        courses: CourseService::new(storage.clone(), notifications.clone()),
        stats: StatsService::new(storage.clone()),
        storage,
        blob,
        notifications,
        blob_root,
    }
}

impl Drop for TestHarness {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.blob_root);
    }
}

/// 最小可过校验的 PDF 文件头
pub fn pdf_bytes() -> Vec<u8> {
    b"%PDF-1.4\n%test fixture\n".to_vec()
}

/// 最小可过校验的 PNG 文件头
pub fn png_bytes() -> Vec<u8> {
    vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00]
}
