//! # 文件收集器
//!
//! 在赝势族目录中按 glob 模式查找 UPF 文件。
//!
//! ## 功能
//! - 多个 glob 模式（逗号分隔），匹配文件名时忽略大小写
//! - 只搜索目录本身，赝势文件名需相对于赝势目录
//! - 跟随符号链接，赝势库常以链接形式组织
//! - 结果按路径排序，保证确定性
//!
//! ## 依赖关系
//! - 被 `workflow/inputs.rs` 调用
//! - 使用 `walkdir` 遍历目录，`glob` 匹配文件名

use crate::error::{EosError, Result};

use glob::{MatchOptions, Pattern};
use std::path::PathBuf;
use walkdir::WalkDir;

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: false,
    require_literal_separator: false,
    require_literal_leading_dot: false,
};

/// 文件收集器
pub struct FileCollector {
    /// 搜索目录
    root: PathBuf,
    /// 文件名模式，任一匹配即收集
    patterns: Vec<Pattern>,
}

impl FileCollector {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            patterns: Vec::new(),
        }
    }

    /// 设置匹配模式（逗号分隔的多模式）
    pub fn with_pattern(mut self, pattern: &str) -> Result<Self> {
        self.patterns = pattern
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| {
                Pattern::new(s).map_err(|e| {
                    EosError::InvalidArgument(format!("Invalid pattern '{}': {}", s, e))
                })
            })
            .collect::<Result<_>>()?;
        Ok(self)
    }

    /// 收集所有匹配的文件；未设置模式时收集全部文件
    pub fn collect(&self) -> Vec<PathBuf> {
        if !self.root.is_dir() {
            return vec![];
        }

        let mut files: Vec<PathBuf> = WalkDir::new(&self.root)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().is_file())
            .filter(|e| self.matches(&e.file_name().to_string_lossy()))
            .map(|e| e.into_path())
            .collect();

        files.sort();
        files
    }

    fn matches(&self, filename: &str) -> bool {
        self.patterns.is_empty()
            || self
                .patterns
                .iter()
                .any(|p| p.matches_with(filename, MATCH_OPTIONS))
    }
}
