//! 错误处理模块
//!
//! 统一的错误类型与结果别名；发现失败和后端调用失败在各自模块内被恢复，
//! 只有配置错误会一路传播到进程入口。

pub mod conversions;
pub mod frontend_error;

pub use frontend_error::{FrontendError, Result};
