//! LMSystem - 作业工作流引擎
//!
//! 学习管理平台的作业-提交-评分核心，作为库被展示层调用。
//!
//! # 架构
//! - `config`: 配置管理
//! - `entity`: SeaORM 数据库实体
//! - `errors`: 统一错误处理
//! - `models`: 数据模型定义
//! - `runtime`: 日志初始化
//! - `services`: 业务逻辑层
//! - `storage`: 数据存储层（SeaORM + 对象存储）
//! - `utils`: 工具函数

pub mod config;
pub mod entity;
pub mod errors;
pub mod models;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod utils;
