//! # structure 子命令 CLI 定义
//!
//! 仅生成扫描用的结构（不运行计算）
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/structure.rs`

use clap::Args;
use std::path::PathBuf;

/// structure 子命令参数
#[derive(Args, Debug)]
pub struct StructureArgs {
    /// Element of the diamond-structure crystal (Si, C, Ge, Sn)
    #[arg(long, default_value = "Si")]
    pub element: String,

    /// Directory for the POSCAR files
    #[arg(long, default_value = ".")]
    pub output_dir: PathBuf,
}
