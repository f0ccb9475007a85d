//! # run 子命令 CLI 定义
//!
//! 运行一次 EOS 扫描（5 个缩放因子的 pw.x SCF 计算）
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/run.rs`

use clap::Args;
use std::path::PathBuf;

/// run 子命令参数
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Code to run, as 'label@computer' [default: qe-pw-6.2.1@localhost]
    #[arg(long)]
    pub codename: Option<String>,

    /// Pseudopotential family (a directory under --pseudo-dir) [default: GBRV_lda]
    #[arg(long)]
    pub pseudo_family: Option<String>,

    /// Element of the diamond-structure crystal (Si, C, Ge, Sn) [default: Si]
    #[arg(long)]
    pub element: Option<String>,

    // ─────────────────────────────────────────────────────────────
    // 环境配置
    // ─────────────────────────────────────────────────────────────
    /// Code registry TOML file (built-in registry if omitted)
    #[arg(long, env = "EOSFLOW_CODES")]
    pub codes: Option<PathBuf>,

    /// Root directory containing pseudopotential family folders
    #[arg(long, env = "EOSFLOW_PSEUDO_DIR", default_value = "pseudo")]
    pub pseudo_dir: PathBuf,

    /// Identifier of this sweep, used as its folder name [default: eos-<timestamp>]
    #[arg(long)]
    pub run_id: Option<String>,

    /// Directory where calculation folders are created
    #[arg(long, env = "EOSFLOW_WORK_DIR", default_value = "eos_runs")]
    pub work_dir: PathBuf,

    // ─────────────────────────────────────────────────────────────
    // 结果导出
    // ─────────────────────────────────────────────────────────────
    /// Write the full workflow result as JSON
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Write the EOS points as CSV
    #[arg(long)]
    pub csv: Option<PathBuf>,

    /// Write the initial structure as POSCAR
    #[arg(long)]
    pub poscar: Option<PathBuf>,
}
