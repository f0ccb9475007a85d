//! # 美化输出工具
//!
//! 统一的终端输出样式。`run` 命令在进度条运行期间调用时需包在
//! `ProgressBar::suspend` 内，避免与进度条行交错。
//!
//! ## 依赖关系
//! - 被 `commands/` 与 `main.rs` 使用
//! - 使用 `colored` crate

use colored::Colorize;

/// `[OK]`：单个数据点完成、结果文件写出
pub fn print_success(msg: &str) {
    println!("{} {}", "[OK]".green().bold(), msg);
}

/// `[ERR]`：写到 stderr，`main` 在退出码 1 之前调用
pub fn print_error(msg: &str) {
    eprintln!("{} {}", "[ERR]".red().bold(), msg);
}

/// `[*]`：引擎选择、工作目录、每个缩放因子的提交
pub fn print_info(msg: &str) {
    println!("{} {}", "[*]".blue().bold(), msg);
}

/// `[DONE]`：整个命令结束时的汇总
pub fn print_done(msg: &str) {
    println!("{} {}", "[DONE]".green().bold(), msg);
}

/// 命令开始和结果表格前的标题栏
pub fn print_header(title: &str) {
    let line = "─".repeat(60);
    println!("\n{}", line.dimmed());
    println!("  {}", title.bold());
    println!("{}\n", line.dimmed());
}
