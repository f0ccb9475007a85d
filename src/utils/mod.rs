//! # 工具函数模块
//!
//! 提供美化输出、进度条、Slurm 脚本生成、文件查找等工具。
//!
//! ## 依赖关系
//! - 被 `commands/`, `engine/`, `workflow/` 模块使用
//! - 子模块: files, output, progress, slurm

pub mod files;
pub mod output;
pub mod progress;
pub mod slurm;
