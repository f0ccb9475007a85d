//! # 计算引擎模块
//!
//! 定义外部计算的统一接口 `CalculationEngine`：提交一次计算并阻塞等待结果。
//! 具体引擎在启动时根据代码注册表选择，工作流只依赖该 trait。
//!
//! ## 依赖关系
//! - 被 `workflow/eos.rs`, `commands/run.rs` 使用
//! - 使用 `models/calculation.rs`, `config.rs`
//! - 子模块: pw

pub mod pw;

pub use pw::PwEngine;

use crate::config::CodeConfig;
use crate::error::Result;
use crate::models::{CalculationInputs, CalculationResult};

use std::path::PathBuf;

/// 外部计算引擎
pub trait CalculationEngine {
    /// 引擎描述，用于进度输出
    fn describe(&self) -> String;

    /// 提交计算并等待完成；返回值已通过输出校验
    fn submit_and_wait(&self, inputs: CalculationInputs) -> Result<CalculationResult>;
}

/// 根据代码配置创建引擎
pub fn from_config(config: &CodeConfig, work_dir: PathBuf) -> Box<dyn CalculationEngine> {
    Box::new(PwEngine::new(config.clone(), work_dir))
}
