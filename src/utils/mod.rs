//! 工具模块

pub mod fs;

// 重导出
pub use fs::*;
