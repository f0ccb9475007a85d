//! # 文件格式模块
//!
//! pw.x 输入生成与输出解析，以及结构文件输出。
//!
//! ## 依赖关系
//! - 被 `engine/` 和 `commands/` 模块使用
//! - 使用 `models/` 数据模型
//! - 子模块: pw, poscar

pub mod poscar;
pub mod pw;
