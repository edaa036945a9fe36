// Godot UID Fix - Library Root
//
// 修复 .tscn 场景文件中过期的脚本 UID 引用

pub mod error;
pub mod identifiers;
pub mod project;
pub mod reconciler;
pub mod report;
pub mod scene;
pub mod utils;

// 重新导出常用类型
pub use error::UidFixError;
pub use identifiers::{collect_identifiers, IdentifierRecord};
pub use reconciler::{reconcile, reconcile_with_progress, ReconcileOptions, ReconcileReport, SceneOutcome};
pub use scene::{reconcile_document, UidChange};

/// 引擎资源路径前缀
pub const RESOURCE_SCHEME: &str = "res://";
/// 脚本 UID 旁路文件后缀
pub const SIDECAR_SUFFIX: &str = ".gd.uid";
/// 场景文件后缀
pub const SCENE_SUFFIX: &str = ".tscn";
/// 脚本外部资源声明标记
pub const SCRIPT_MARKER: &str = "type=\"Script\"";
/// 项目根目录标记文件
pub const PROJECT_MARKER: &str = "project.godot";

pub const DEFAULT_SCRIPTS_DIR: &str = "scripts";
pub const DEFAULT_SCENES_DIR: &str = "scenes";
