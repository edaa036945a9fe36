//! 文件系统工具

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::UidFixError;

/// 读取 UTF-8 文本文件
///
/// 非 UTF-8 内容返回 `InvalidData`，与读取失败同等对待
pub fn read_text(path: &Path) -> io::Result<String> {
    fs::read_to_string(path)
}

/// 覆盖写入文本文件（不创建父目录，场景文件必然已存在）
pub fn write_text(path: &Path, content: &str) -> io::Result<()> {
    fs::write(path, content)
}

/// 检查目录是否存在
pub fn dir_exists(path: &Path) -> bool {
    path.exists() && path.is_dir()
}

/// 递归列出文件名以 `suffix` 结尾的所有文件
///
/// 按文件名排序遍历；遍历错误逐条返回，由调用方决定是否致命。
/// 目录不存在时返回空列表。指向文件的符号链接也会列出，
/// 但不会进入指向目录的符号链接。
pub fn find_files_with_suffix(dir: &Path, suffix: &str) -> Vec<Result<PathBuf, UidFixError>> {
    if !dir_exists(dir) {
        return Vec::new();
    }

    WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => {
                let is_file = entry.file_type().is_file()
                    || (entry.path_is_symlink() && entry.path().is_file());
                let matches = is_file
                    && entry
                        .file_name()
                        .to_str()
                        .map(|name| name.ends_with(suffix))
                        .unwrap_or(false);
                matches.then(|| Ok(entry.into_path()))
            }
            Err(err) => Some(Err(UidFixError::Walk {
                path: err.path().unwrap_or(dir).to_path_buf(),
                message: err.to_string(),
            })),
        })
        .collect()
}
