//! # EOS 结果数据模型
//!
//! 每个缩放因子对应一个 `EosEntry`，整个扫描打包为 `WorkflowResult`。
//!
//! ## 依赖关系
//! - 被 `workflow/eos.rs`, `commands/run.rs` 使用
//! - 使用 `models/structure.rs`

use crate::models::Crystal;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 单个体积点：(volume, energy, energy_units)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EosEntry {
    pub volume: f64,
    pub energy: f64,
    pub energy_units: String,
}

impl EosEntry {
    pub fn new(volume: f64, energy: f64, energy_units: impl Into<String>) -> Self {
        EosEntry {
            volume,
            energy,
            energy_units: energy_units.into(),
        }
    }
}

/// `result` 节点内容
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EosData {
    /// 按标签顺序 c1..c5 排列
    pub eos_data: Vec<EosEntry>,
}

/// 溯源信息
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Provenance {
    pub run_id: String,
    pub codename: String,
    pub pseudo_family: String,
    pub element: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

/// 工作流最终输出
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowResult {
    pub initial_structure: Crystal,
    pub result: EosData,
    pub provenance: Provenance,
}

impl WorkflowResult {
    pub fn eos_data(&self) -> &[EosEntry] {
        &self.result.eos_data
    }
}
