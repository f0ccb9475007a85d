//! # eosflow - 状态方程 (EOS) 扫描工作流
//!
//! 对金刚石结构晶体在 5 个晶格缩放因子下依次运行 Quantum ESPRESSO pw.x
//! SCF 计算，收集 (体积, 能量) 数据点供后续拟合。
//!
//! ## 子命令
//! - `run`       - 运行 EOS 扫描
//! - `structure` - 导出扫描用结构 (POSCAR)
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── workflow/   (EOS 扫描编排)
//!   │     ├── engine/     (pw.x 计算引擎)
//!   │     ├── parsers/    (pw.x 输入输出, POSCAR)
//!   │     ├── structures  (结构构建与缩放)
//!   │     └── models/     (数据模型)
//!   ├── config.rs   (代码注册表)
//!   ├── utils/      (工具函数)
//!   └── error.rs    (错误处理)
//! ```

mod cli;
mod commands;
mod config;
mod engine;
mod error;
mod models;
mod parsers;
mod structures;
mod utils;
mod workflow;

use clap::Parser;
use cli::Cli;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    if let Err(e) = commands::run(cli.command) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}
