//! # 数据模型模块
//!
//! 定义晶体结构、计算输入输出和 EOS 结果数据模型。
//!
//! ## 依赖关系
//! - 被 `parsers/`, `engine/`, `workflow/` 和 `commands/` 使用
//! - 子模块: structure, calculation, eos

pub mod calculation;
pub mod eos;
pub mod structure;

pub use calculation::{
    CalculationInputs, CalculationResult, CodeId, KpointMesh, OutputParameters, Pseudopotential,
    ScfParameters, SchedulerOptions,
};
pub use eos::{EosData, EosEntry, Provenance, WorkflowResult};
pub use structure::{Atom, Crystal, Lattice};
