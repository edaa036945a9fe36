//! 项目管理模块
//!
//! 提供 Godot 项目根目录查找

pub mod root_finder;

// 重导出
pub use root_finder::{find_project_root, find_project_root_from, resolve_project_root};
