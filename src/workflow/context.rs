//! # 工作流上下文
//!
//! 由调用方显式注入的运行信息与协作者（引擎、赝势库、进度回调）。
//!
//! ## 依赖关系
//! - 被 `workflow/eos.rs`, `commands/run.rs` 使用

use super::inputs::PseudoLibrary;
use super::progress::ProgressReporter;
use crate::engine::CalculationEngine;

use chrono::{DateTime, Utc};

/// 一次运行的身份信息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunInfo {
    pub run_id: String,
    pub started_at: DateTime<Utc>,
}

impl RunInfo {
    /// 以当前时间生成运行标识
    pub fn new() -> Self {
        let started_at = Utc::now();
        RunInfo {
            run_id: format!("eos-{}", started_at.format("%Y%m%d-%H%M%S")),
            started_at,
        }
    }

    pub fn with_id(run_id: impl Into<String>) -> Self {
        RunInfo {
            run_id: run_id.into(),
            started_at: Utc::now(),
        }
    }
}

impl Default for RunInfo {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Copy)]
pub struct WorkflowContext<'a> {
    pub run: &'a RunInfo,
    pub engine: &'a dyn CalculationEngine,
    pub pseudos: &'a PseudoLibrary,
    pub reporter: &'a ProgressReporter<'a>,
}

impl<'a> WorkflowContext<'a> {
    pub fn new(
        run: &'a RunInfo,
        engine: &'a dyn CalculationEngine,
        pseudos: &'a PseudoLibrary,
        reporter: &'a ProgressReporter<'a>,
    ) -> Self {
        Self {
            run,
            engine,
            pseudos,
            reporter,
        }
    }
}
