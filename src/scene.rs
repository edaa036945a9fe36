//! 场景文本处理
//!
//! 只识别一种行：`[ext_resource type="Script" uid="..." path="res://..."]`，
//! 只改写其中 `uid="..."` 的值。不解析 .tscn 格式的其余部分。

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

use crate::identifiers::IdentifierRecord;
use crate::SCRIPT_MARKER;

lazy_static! {
    static ref UID_ATTR: Regex = Regex::new(r#"uid="([^"]*)""#).unwrap();
}

/// 一次 UID 改写记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UidChange {
    /// 场景文件名（不含目录）
    pub scene: String,
    pub script_path: String,
    pub old_uid: String,
    pub new_uid: String,
}

/// 单个场景文档的处理结果
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DocumentResult {
    /// 有改动时为改写后的全文
    pub content: Option<String>,
    pub changes: Vec<UidChange>,
}

/// 该行是否为指向 `script_path` 的脚本外部资源声明
pub fn is_script_reference(line: &str, script_path: &str) -> bool {
    line.contains(SCRIPT_MARKER) && line.contains(script_path)
}

/// 提取行内第一个 `uid="..."` 的值
pub fn extract_uid(line: &str) -> Option<&str> {
    UID_ATTR
        .captures(line)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// 修复单行
///
/// 返回 `(新行, 旧 UID)`；不是引用行、没有 uid 属性或 UID 已正确时返回 None。
pub fn reconcile_line(line: &str, record: &IdentifierRecord) -> Option<(String, String)> {
    if !is_script_reference(line, &record.script_path) {
        return None;
    }

    let current = extract_uid(line)?;
    if current == record.uid {
        return None;
    }

    let fixed = line.replace(
        &format!("uid=\"{}\"", current),
        &format!("uid=\"{}\"", record.uid),
    );
    Some((fixed, current.to_string()))
}

/// 统一换行符为 `\n`
pub fn normalize_newlines(content: &str) -> String {
    content.replace("\r\n", "\n").replace('\r', "\n")
}

/// 用全部 UID 记录修复一个场景文档
///
/// 所有记录作用在同一份行列表上，调用方据此最多写回一次。
pub fn reconcile_document(
    scene_name: &str,
    content: &str,
    records: &[IdentifierRecord],
) -> DocumentResult {
    let normalized = normalize_newlines(content);
    let mut lines: Vec<String> = Vec::new();
    let mut changes = Vec::new();

    for record in records {
        // 快速预检
        if !normalized.contains(&record.script_path) {
            continue;
        }

        if lines.is_empty() {
            lines = normalized.split('\n').map(str::to_string).collect();
        }

        for line in lines.iter_mut() {
            if let Some((fixed, old_uid)) = reconcile_line(line, record) {
                *line = fixed;
                changes.push(UidChange {
                    scene: scene_name.to_string(),
                    script_path: record.script_path.clone(),
                    old_uid,
                    new_uid: record.uid.clone(),
                });
            }
        }
    }

    let content = if changes.is_empty() {
        None
    } else {
        Some(lines.join("\n"))
    };

    DocumentResult { content, changes }
}
