//! 项目根目录查找
//!
//! 从起始目录向上遍历，寻找包含 `project.godot` 的目录

use std::env;
use std::path::{Path, PathBuf};

use crate::PROJECT_MARKER;

/// 最多向上查找的层数
const MAX_DEPTH: usize = 10;

/// 从当前目录开始查找项目根目录
pub fn find_project_root() -> Option<PathBuf> {
    let cwd = env::current_dir().ok()?;
    find_project_root_from(&cwd)
}

/// 从 `start` 开始向上查找包含 `project.godot` 的目录
pub fn find_project_root_from(start: &Path) -> Option<PathBuf> {
    let mut current = Some(start);

    for _ in 0..MAX_DEPTH {
        let dir = current?;
        if dir.join(PROJECT_MARKER).is_file() {
            return Some(dir.to_path_buf());
        }
        current = dir.parent();
    }

    None
}

/// 决定本次运行使用的项目根目录
///
/// 显式指定 > 向上查找 > 当前目录
pub fn resolve_project_root(explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }

    find_project_root().unwrap_or_else(|| env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}
