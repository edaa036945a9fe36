//! UID 修复主流程
//!
//! 1. 收集脚本的权威 UID
//! 2. 遍历场景文件，逐个修复并写回
//! 3. 汇总每个场景的结果
//!
//! 单个场景失败只记录为 [`SceneOutcome::Failed`]，不会中断其余文件。

use std::io;
use std::path::{Path, PathBuf};

use crate::error::{Result, UidFixError};
use crate::identifiers::{collect_identifiers, IdentifierRecord};
use crate::scene::{reconcile_document, UidChange};
use crate::utils::{dir_exists, find_files_with_suffix, read_text, write_text};
use crate::{DEFAULT_SCENES_DIR, DEFAULT_SCRIPTS_DIR, SCENE_SUFFIX};

/// 一次修复的配置
#[derive(Debug, Clone)]
pub struct ReconcileOptions {
    pub project_root: PathBuf,
    /// 相对项目根目录
    pub scripts_dir: PathBuf,
    /// 相对项目根目录
    pub scenes_dir: PathBuf,
    /// 只计算不写回
    pub dry_run: bool,
}

impl ReconcileOptions {
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
            scripts_dir: PathBuf::from(DEFAULT_SCRIPTS_DIR),
            scenes_dir: PathBuf::from(DEFAULT_SCENES_DIR),
            dry_run: false,
        }
    }

    pub fn scripts_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.scripts_dir = dir.into();
        self
    }

    pub fn scenes_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.scenes_dir = dir.into();
        self
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

/// 单个场景文件的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SceneOutcome {
    Updated { path: PathBuf, changes: Vec<UidChange> },
    Unchanged { path: PathBuf },
    Failed { path: PathBuf, message: String },
}

impl SceneOutcome {
    pub fn path(&self) -> &Path {
        match self {
            SceneOutcome::Updated { path, .. }
            | SceneOutcome::Unchanged { path }
            | SceneOutcome::Failed { path, .. } => path,
        }
    }

    fn failed(err: UidFixError) -> Self {
        SceneOutcome::Failed {
            path: err.path().to_path_buf(),
            message: err.to_string(),
        }
    }
}

/// 整次运行的汇总
///
/// 所有计数都由 `outcomes` 推导，没有额外状态
#[derive(Debug, Clone, Default)]
pub struct ReconcileReport {
    pub identifiers: Vec<IdentifierRecord>,
    pub outcomes: Vec<SceneOutcome>,
    pub dry_run: bool,
}

impl ReconcileReport {
    pub fn updated_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, SceneOutcome::Updated { .. }))
            .count()
    }

    pub fn unchanged_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, SceneOutcome::Unchanged { .. }))
            .count()
    }

    pub fn error_count(&self) -> usize {
        self.failures().count()
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    /// 所有 UID 改写，按场景顺序
    pub fn changes(&self) -> impl Iterator<Item = &UidChange> {
        self.outcomes.iter().flat_map(|o| match o {
            SceneOutcome::Updated { changes, .. } => changes.as_slice(),
            _ => &[],
        })
    }

    /// `(路径, 错误信息)`
    pub fn failures(&self) -> impl Iterator<Item = (&Path, &str)> {
        self.outcomes.iter().filter_map(|o| match o {
            SceneOutcome::Failed { path, message } => Some((path.as_path(), message.as_str())),
            _ => None,
        })
    }
}

/// 执行修复
pub fn reconcile(options: &ReconcileOptions) -> Result<ReconcileReport> {
    reconcile_with_progress(options, |_| {})
}

/// 执行修复，每处理完一个场景回调一次
pub fn reconcile_with_progress<F>(options: &ReconcileOptions, mut on_outcome: F) -> Result<ReconcileReport>
where
    F: FnMut(&SceneOutcome),
{
    let root = &options.project_root;
    if !dir_exists(root) {
        return Err(UidFixError::MissingRoot(root.clone()));
    }

    let identifiers = collect_identifiers(root, &options.scripts_dir)?;
    let mut outcomes = Vec::new();

    for entry in find_files_with_suffix(&root.join(&options.scenes_dir), SCENE_SUFFIX) {
        let outcome = match entry {
            Ok(scene) => process_scene(&scene, &identifiers, options.dry_run),
            Err(err) => SceneOutcome::failed(err),
        };

        on_outcome(&outcome);
        outcomes.push(outcome);
    }

    Ok(ReconcileReport {
        identifiers,
        outcomes,
        dry_run: options.dry_run,
    })
}

/// 处理单个场景：读取、修复、（必要时）写回
pub fn process_scene(scene: &Path, identifiers: &[IdentifierRecord], dry_run: bool) -> SceneOutcome {
    process_scene_with(scene, identifiers, dry_run, write_text)
}

/// 同 [`process_scene`]，由调用方提供写回函数
pub fn process_scene_with<W>(
    scene: &Path,
    identifiers: &[IdentifierRecord],
    dry_run: bool,
    write: W,
) -> SceneOutcome
where
    W: FnOnce(&Path, &str) -> io::Result<()>,
{
    match fix_scene_file(scene, identifiers, dry_run, write) {
        Ok(Some(changes)) => SceneOutcome::Updated {
            path: scene.to_path_buf(),
            changes,
        },
        Ok(None) => SceneOutcome::Unchanged {
            path: scene.to_path_buf(),
        },
        Err(err) => SceneOutcome::failed(err),
    }
}

fn fix_scene_file<W>(
    scene: &Path,
    identifiers: &[IdentifierRecord],
    dry_run: bool,
    write: W,
) -> Result<Option<Vec<UidChange>>>
where
    W: FnOnce(&Path, &str) -> io::Result<()>,
{
    let content = read_text(scene).map_err(|source| UidFixError::SceneRead {
        path: scene.to_path_buf(),
        source,
    })?;

    let name = scene
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let result = reconcile_document(&name, &content, identifiers);
    let Some(fixed) = result.content else {
        return Ok(None);
    };

    if !dry_run {
        write(scene, &fixed).map_err(|source| UidFixError::SceneWrite {
            path: scene.to_path_buf(),
            source,
        })?;
    }

    Ok(Some(result.changes))
}
