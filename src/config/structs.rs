use serde::{Deserialize, Serialize};

/// 应用配置结构体
///
/// 所有字段均有默认值，库在无配置文件时也可直接使用（测试依赖这一点）。
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub app: AppSettings,
    pub database: DatabaseConfig,
    pub blob: BlobConfig,
    pub upload: UploadConfig,
    pub notifications: NotificationConfig,
}

/// 应用设置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub system_name: String,
    pub environment: String,
    pub log_level: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            system_name: "lmsystem".to_string(),
            environment: "development".to_string(),
            log_level: "info".to_string(),
        }
    }
}

/// 数据库配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: String,    // 数据库连接 URL（从 scheme 自动推断类型）
    pub pool_size: u32, // 连接池大小
    pub timeout: u64,   // 连接超时 (秒)
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "lmsystem.db".to_string(),
            pool_size: 8,
            timeout: 10,
        }
    }
}

/// 对象存储配置
///
/// 引擎只记录元数据与路径，字节本身交由对象存储。本地文件系统实现
/// 将 bucket 映射为 root_dir 下的子目录。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BlobConfig {
    pub root_dir: String,
    pub public_base_url: String,
    pub documents_bucket: String,
    pub submissions_bucket: String,
}

impl Default for BlobConfig {
    fn default() -> Self {
        Self {
            root_dir: "uploads".to_string(),
            public_base_url: "/files".to_string(),
            documents_bucket: "assignment-documents".to_string(),
            submissions_bucket: "submission-files".to_string(),
        }
    }
}

/// 上传限制配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    pub document_max_size: usize,   // 作业文档单文件最大字节数
    pub submission_max_size: usize, // 提交附件单文件最大字节数
    pub allowed_types: Vec<String>, // 允许的扩展名
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            document_max_size: 20 * 1024 * 1024,
            submission_max_size: 10 * 1024 * 1024,
            allowed_types: [".pdf", ".doc", ".docx", ".jpg", ".jpeg", ".png", ".zip"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// 通知配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    pub unread_ttl: u64,     // 未读计数缓存 TTL (秒)
    pub cache_capacity: u64, // 未读计数缓存容量
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            unread_ttl: 30,
            cache_capacity: 10_000,
        }
    }
}
