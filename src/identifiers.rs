//! 权威 UID 收集
//!
//! 扫描脚本目录下的 `.gd.uid` 文件，每个文件对应一个脚本资源

use std::path::{Component, Path, PathBuf};

use crate::error::{Result, UidFixError};
use crate::utils::{find_files_with_suffix, read_text};
use crate::{RESOURCE_SCHEME, SIDECAR_SUFFIX};

/// 一个脚本的权威 UID
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentifierRecord {
    /// 引擎内路径，例如 `res://scripts/Player.gd`
    pub script_path: String,
    /// `.uid` 文件的完整内容（已 trim）
    pub uid: String,
    /// `.uid` 文件的磁盘路径
    pub sidecar: PathBuf,
}

/// 收集 `project_root/scripts_dir` 下所有脚本的权威 UID
///
/// 任何一个 `.uid` 文件读取失败都会中止整个流程，
/// 因为后续所有场景修复都依赖完整的 UID 表。
/// 脚本目录必须位于项目根目录之内，否则无法映射为 `res://` 路径。
pub fn collect_identifiers(project_root: &Path, scripts_dir: &Path) -> Result<Vec<IdentifierRecord>> {
    let dir = project_root.join(scripts_dir);
    if relative_to_root(project_root, &dir).is_none() {
        return Err(UidFixError::OutsideRoot(dir));
    }

    let mut records = Vec::new();

    for entry in find_files_with_suffix(&dir, SIDECAR_SUFFIX) {
        let sidecar = entry?;
        let content = read_text(&sidecar).map_err(|source| UidFixError::SidecarRead {
            path: sidecar.clone(),
            source,
        })?;

        let script_path = resource_path(project_root, &sidecar)
            .ok_or_else(|| UidFixError::OutsideRoot(sidecar.clone()))?;

        records.push(IdentifierRecord {
            script_path,
            uid: content.trim().to_string(),
            sidecar,
        });
    }

    Ok(records)
}

/// `.uid` 文件路径 -> `res://` 脚本路径
///
/// 去掉 `.uid` 后缀，取相对项目根目录的路径，统一使用 `/` 分隔。
/// 不在项目根目录之内时返回 None。
pub fn resource_path(project_root: &Path, sidecar: &Path) -> Option<String> {
    let script = sidecar.with_extension("");
    let relative = relative_to_root(project_root, &script)?;
    let parts: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();

    Some(format!("{}{}", RESOURCE_SCHEME, parts.join("/")))
}

/// `path` 相对 `project_root` 的部分；含 `..` 或不以根目录开头时为 None
fn relative_to_root<'a>(project_root: &Path, path: &'a Path) -> Option<&'a Path> {
    let relative = path.strip_prefix(project_root).ok()?;
    relative
        .components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
        .then_some(relative)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_resource_path() {
        let root = Path::new("/game");
        let sidecar = Path::new("/game/scripts/enemies/Slime.gd.uid");

        assert_eq!(
            resource_path(root, sidecar).as_deref(),
            Some("res://scripts/enemies/Slime.gd")
        );
    }

    #[test]
    fn test_resource_path_outside_root() {
        let root = Path::new("/game");

        assert_eq!(resource_path(root, Path::new("/shared/Player.gd.uid")), None);
        assert_eq!(resource_path(root, Path::new("/game/../shared/Player.gd.uid")), None);
    }

    #[test]
    fn test_scripts_dir_outside_root_is_rejected() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("game");
        let shared = temp.path().join("shared");
        fs::create_dir_all(&root).unwrap();
        fs::create_dir_all(&shared).unwrap();
        fs::write(shared.join("Player.gd.uid"), "uid://abc").unwrap();

        let err = collect_identifiers(&root, &shared).unwrap_err();
        assert!(matches!(err, UidFixError::OutsideRoot(ref p) if p == &shared));

        let err = collect_identifiers(&root, Path::new("../shared")).unwrap_err();
        assert!(matches!(err, UidFixError::OutsideRoot(_)));
    }

    #[test]
    fn test_collect_identifiers_trims_content() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::create_dir_all(root.join("scripts/ui")).unwrap();
        fs::write(root.join("scripts/Player.gd.uid"), "uid://abc123\n").unwrap();
        fs::write(root.join("scripts/Player.gd"), "extends CharacterBody2D\n").unwrap();
        fs::write(root.join("scripts/ui/Hud.gd.uid"), "  uid://hud\r\n").unwrap();

        let records = collect_identifiers(root, Path::new("scripts")).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].script_path, "res://scripts/Player.gd");
        assert_eq!(records[0].uid, "uid://abc123");
        assert_eq!(records[1].script_path, "res://scripts/ui/Hud.gd");
        assert_eq!(records[1].uid, "uid://hud");
        assert_eq!(records[1].sidecar, root.join("scripts/ui/Hud.gd.uid"));
    }

    #[test]
    fn test_missing_scripts_dir_yields_nothing() {
        let temp = TempDir::new().unwrap();
        let records = collect_identifiers(temp.path(), Path::new("scripts")).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_unreadable_sidecar_is_fatal() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::create_dir_all(root.join("scripts")).unwrap();
        fs::write(root.join("scripts/Bad.gd.uid"), [0xc3, 0x28]).unwrap();

        let err = collect_identifiers(root, Path::new("scripts")).unwrap_err();
        assert!(matches!(err, UidFixError::SidecarRead { .. }));
    }
}
