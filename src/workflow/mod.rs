//! # 工作流模块
//!
//! EOS 扫描的编排逻辑：构建结构、生成输入、依次调用计算引擎、汇总结果。
//!
//! ## 依赖关系
//! - 被 `commands/run.rs` 使用
//! - 使用 `structures.rs`, `engine/`, `models/`
//! - 子模块: context, eos, inputs, progress

pub mod context;
pub mod eos;
pub mod inputs;
pub mod progress;

pub use context::{RunInfo, WorkflowContext};
pub use eos::{run_eos, SCALE_FACTORS};
pub use inputs::PseudoLibrary;
pub use progress::{Progress, ProgressReporter};
