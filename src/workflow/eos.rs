//! # EOS 扫描工作流
//!
//! 对同一基础结构按固定的 5 个缩放因子依次运行 SCF，
//! 收集 (volume, energy, energy_units) 并按标签顺序打包。
//!
//! 任一步失败即中止整个扫描，不返回部分结果。
//!
//! ## 依赖关系
//! - 被 `commands/run.rs` 调用
//! - 使用 `structures.rs`, `workflow/inputs.rs`, `engine/`

use super::context::WorkflowContext;
use super::inputs::generate_scf_input_params;
use super::progress::Progress;
use crate::config::DEFAULT_CODENAME;
use crate::error::{EosError, Result};
use crate::models::{CalculationResult, EosData, EosEntry, Provenance, WorkflowResult};
use crate::structures::{create_diamond_fcc, rescale};

use chrono::Utc;
use std::collections::HashMap;

/// 默认赝势族
pub const DEFAULT_PSEUDO_FAMILY: &str = "GBRV_lda";

/// 默认元素
pub const DEFAULT_ELEMENT: &str = "Si";

/// 标签与缩放因子，顺序固定
pub const SCALE_FACTORS: [(&str, f64); 5] = [
    ("c1", 0.96),
    ("c2", 0.98),
    ("c3", 1.00),
    ("c4", 1.02),
    ("c5", 1.04),
];

/// 提取单次计算的 EOS 数据点
pub fn get_info(result: &CalculationResult) -> EosEntry {
    EosEntry::new(result.volume, result.energy, result.energy_units.clone())
}

/// 运行 EOS 扫描
pub fn run_eos_wf(
    ctx: &WorkflowContext,
    codename: &str,
    pseudo_family: &str,
    element: &str,
) -> Result<WorkflowResult> {
    ctx.reporter.report(Progress::SweepStart {
        run_id: ctx.run.run_id.clone(),
        element: element.to_string(),
        total_steps: SCALE_FACTORS.len() as u64,
    });

    let s0 = create_diamond_fcc(element)?;

    let mut calcs: HashMap<&str, EosEntry> = HashMap::new();
    for (label, factor) in SCALE_FACTORS {
        // 每次都从 s0 派生新结构
        let s = rescale(&s0, factor);

        ctx.reporter.report(Progress::CalculationStart {
            label,
            factor,
            structure: s.name.clone(),
        });

        let inputs = generate_scf_input_params(s, codename, pseudo_family, ctx.pseudos)?;
        let result = ctx.engine.submit_and_wait(inputs)?;
        let entry = get_info(&result);

        ctx.reporter.report(Progress::CalculationFinish {
            label,
            entry: entry.clone(),
        });

        calcs.insert(label, entry);
    }

    // 按固定标签序列重建顺序
    let eos_data = SCALE_FACTORS
        .iter()
        .map(|(label, _)| {
            calcs.remove(label).ok_or_else(|| EosError::MissingField {
                field: label.to_string(),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    ctx.reporter.report(Progress::SweepFinish);

    Ok(WorkflowResult {
        initial_structure: s0,
        result: EosData { eos_data },
        provenance: Provenance {
            run_id: ctx.run.run_id.clone(),
            codename: codename.to_string(),
            pseudo_family: pseudo_family.to_string(),
            element: element.to_string(),
            started_at: ctx.run.started_at,
            finished_at: Utc::now(),
        },
    })
}

/// 入口：未指定的参数使用默认值
pub fn run_eos(
    ctx: &WorkflowContext,
    codename: Option<&str>,
    pseudo_family: Option<&str>,
    element: Option<&str>,
) -> Result<WorkflowResult> {
    run_eos_wf(
        ctx,
        codename.unwrap_or(DEFAULT_CODENAME),
        pseudo_family.unwrap_or(DEFAULT_PSEUDO_FAMILY),
        element.unwrap_or(DEFAULT_ELEMENT),
    )
}
