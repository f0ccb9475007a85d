//! # 计算输入/输出数据模型
//!
//! 一次 pw.x SCF 计算的输入包 (`CalculationInputs`) 与经过校验的
//! 类型化输出 (`CalculationResult`)。
//!
//! ## 依赖关系
//! - 被 `workflow/inputs.rs`, `engine/`, `parsers/pw.rs` 使用
//! - 使用 `models/structure.rs`

use crate::error::{EosError, Result};
use crate::models::Crystal;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// 代码标识 `label@computer`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CodeId {
    pub label: String,
    pub computer: String,
}

impl CodeId {
    /// 解析 `label@computer` 形式的代码名
    pub fn parse(codename: &str) -> Result<Self> {
        let codename = codename.trim();
        match codename.rsplit_once('@') {
            Some((label, computer)) if !label.is_empty() && !computer.is_empty() => Ok(CodeId {
                label: label.to_string(),
                computer: computer.to_string(),
            }),
            _ => Err(EosError::InvalidCodename(codename.to_string())),
        }
    }
}

impl fmt::Display for CodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.label, self.computer)
    }
}

/// pw.x 计算参数（对应 CONTROL / SYSTEM / ELECTRONS 三个 namelist）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScfParameters {
    pub calculation: String,
    pub tstress: bool,
    pub tprnfor: bool,
    /// 波函数截断能 (Ry)
    pub ecutwfc: f64,
    /// 电荷密度截断能 (Ry)
    pub ecutrho: f64,
    pub conv_thr: f64,
}

impl Default for ScfParameters {
    fn default() -> Self {
        ScfParameters {
            calculation: "scf".to_string(),
            tstress: true,
            tprnfor: true,
            ecutwfc: 30.0,
            ecutrho: 200.0,
            conv_thr: 1.0e-6,
        }
    }
}

/// Monkhorst-Pack k 点网格
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KpointMesh {
    pub mesh: [u32; 3],
    pub offset: [u32; 3],
}

impl KpointMesh {
    pub fn uniform(n: u32) -> Self {
        KpointMesh {
            mesh: [n, n, n],
            offset: [0, 0, 0],
        }
    }
}

/// 单个元素使用的赝势文件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pseudopotential {
    pub element: String,
    pub filename: String,
}

/// 调度选项
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulerOptions {
    pub num_machines: u32,
    pub max_wallclock_seconds: u64,
}

impl Default for SchedulerOptions {
    fn default() -> Self {
        SchedulerOptions {
            num_machines: 1,
            max_wallclock_seconds: 30 * 60,
        }
    }
}

/// 一次 SCF 计算的完整输入，每次调用引擎时消耗一份
#[derive(Debug, Clone, PartialEq)]
pub struct CalculationInputs {
    pub code: CodeId,
    pub pseudo_family: String,
    pub structure: Crystal,
    pub parameters: ScfParameters,
    pub kpoints: KpointMesh,
    /// 赝势族目录
    pub pseudo_dir: PathBuf,
    pub pseudos: Vec<Pseudopotential>,
    pub options: SchedulerOptions,
}

/// 引擎原始输出参数（字段均可能缺失）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputParameters {
    pub volume: Option<f64>,
    pub energy: Option<f64>,
    pub energy_units: Option<String>,
}

impl OutputParameters {
    /// 校验并转换为类型化结果，缺失任一字段即报错
    pub fn into_result(self) -> Result<CalculationResult> {
        let volume = self.volume.ok_or_else(|| missing("volume"))?;
        let energy = self.energy.ok_or_else(|| missing("energy"))?;
        let energy_units = self.energy_units.ok_or_else(|| missing("energy_units"))?;

        Ok(CalculationResult {
            volume,
            energy,
            energy_units,
        })
    }
}

fn missing(field: &str) -> EosError {
    EosError::MissingField {
        field: field.to_string(),
    }
}

/// 经过校验的计算结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    /// 晶胞体积 (Å³)
    pub volume: f64,
    pub energy: f64,
    pub energy_units: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codeid_parse() {
        let code = CodeId::parse("qe-pw-6.2.1@localhost").unwrap();
        assert_eq!(code.label, "qe-pw-6.2.1");
        assert_eq!(code.computer, "localhost");
        assert_eq!(code.to_string(), "qe-pw-6.2.1@localhost");
    }

    #[test]
    fn test_codeid_parse_invalid() {
        for bad in ["pw", "@localhost", "pw@", ""] {
            assert!(matches!(
                CodeId::parse(bad),
                Err(EosError::InvalidCodename(_))
            ));
        }
    }

    #[test]
    fn test_output_parameters_into_result() {
        let raw = OutputParameters {
            volume: Some(40.0),
            energy: Some(-310.5),
            energy_units: Some("eV".to_string()),
        };
        let result = raw.into_result().unwrap();
        assert_eq!(result.volume, 40.0);
        assert_eq!(result.energy, -310.5);
        assert_eq!(result.energy_units, "eV");
    }

    #[test]
    fn test_output_parameters_missing_field() {
        let raw = OutputParameters {
            volume: Some(40.0),
            energy: None,
            energy_units: Some("eV".to_string()),
        };
        match raw.into_result() {
            Err(EosError::MissingField { field }) => assert_eq!(field, "energy"),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_default_parameters() {
        let params = ScfParameters::default();
        assert_eq!(params.calculation, "scf");
        assert!(params.tstress && params.tprnfor);
        assert_eq!(params.ecutwfc, 30.0);
        assert_eq!(params.ecutrho, 200.0);

        let options = SchedulerOptions::default();
        assert_eq!(options.num_machines, 1);
        assert_eq!(options.max_wallclock_seconds, 1800);
    }
}
