//! 工具模块 - 通用工具函数和类型
//!
//! # 内容
//!
//! - [`AppError`] - 应用错误类型 (from shared::error)
//! - [`ValidJson`] - JSON 提取器 (拒绝时返回统一错误体)
//! - 日志、输入校验

pub mod json;
pub mod logger;
pub mod validation;

pub use json::ValidJson;
pub use shared::error::{AppError, AppResult, ErrorCategory, ErrorCode};
