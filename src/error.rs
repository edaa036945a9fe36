//! 错误类型
//!
//! 库内部使用的错误枚举；二进制入口统一转换为 anyhow

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UidFixError {
    /// 无法读取 `.uid` 文件（致命）
    #[error("failed to read sidecar {}: {source}", .path.display())]
    SidecarRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read scene {}: {source}", .path.display())]
    SceneRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write scene {}: {source}", .path.display())]
    SceneWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to walk {}: {message}", .path.display())]
    Walk { path: PathBuf, message: String },

    #[error("project root does not exist: {}", .0.display())]
    MissingRoot(PathBuf),

    /// 脚本目录不在项目根目录之内（致命）
    #[error("not inside the project root: {}", .0.display())]
    OutsideRoot(PathBuf),
}

impl UidFixError {
    /// 出错的文件路径
    pub fn path(&self) -> &std::path::Path {
        match self {
            UidFixError::SidecarRead { path, .. }
            | UidFixError::SceneRead { path, .. }
            | UidFixError::SceneWrite { path, .. }
            | UidFixError::Walk { path, .. } => path,
            UidFixError::MissingRoot(path) | UidFixError::OutsideRoot(path) => path,
        }
    }
}

pub type Result<T> = std::result::Result<T, UidFixError>;
