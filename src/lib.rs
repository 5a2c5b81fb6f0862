//! TutorDesk - 家教管理平台后端服务
//!
//! 基于 Actix Web 构建的师生作业与课表管理后端。
//!
//! # 架构
//! - `access`: 基于角色的访问策略
//! - `cache`: 缓存层（Moka/Redis），承载登录会话
//! - `config`: 配置管理
//! - `entity`: SeaORM 数据库实体
//! - `errors`: 统一错误处理
//! - `middlewares`: 会话认证与角色校验中间件
//! - `models`: 数据模型定义
//! - `routes`: API 路由层
//! - `runtime`: 运行时生命周期管理
//! - `services`: 业务逻辑层
//! - `storage`: 按调用者收窄的数据存储层（SeaORM）
//! - `utils`: 工具函数

pub mod access;
pub mod cache;
pub mod config;
pub mod entity;
pub mod errors;
pub mod middlewares;
pub mod models;
pub mod routes;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod utils;
