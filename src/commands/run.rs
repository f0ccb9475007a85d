//! # run 命令实现
//!
//! 运行 EOS 扫描并输出结果。
//!
//! ## 功能
//! - 加载代码注册表并在启动时选择计算引擎
//! - 将工作流进度事件映射到终端输出与进度条
//! - 表格显示 5 个 (V, E) 数据点
//! - 可选导出 JSON / CSV / POSCAR
//!
//! ## 依赖关系
//! - 使用 `cli/run.rs` 定义的参数
//! - 使用 `workflow/`, `engine/`, `config.rs`
//! - 使用 `utils/output.rs`, `utils/progress.rs`

use crate::cli::run::RunArgs;
use crate::config::{CodeRegistry, DEFAULT_CODENAME};
use crate::engine;
use crate::error::{EosError, Result};
use crate::models::{CodeId, WorkflowResult};
use crate::parsers::poscar::write_poscar_file;
use crate::utils::{output, progress};
use crate::workflow::{
    self, Progress, ProgressReporter, PseudoLibrary, RunInfo, WorkflowContext, SCALE_FACTORS,
};

use std::fs;
use std::path::Path;
use tabled::{Table, Tabled};

/// 结果表格行
#[derive(Debug, Clone, Tabled)]
struct EosRow {
    #[tabled(rename = "Label")]
    label: String,
    #[tabled(rename = "Scale")]
    scale: String,
    #[tabled(rename = "Volume (Å³)")]
    volume: String,
    #[tabled(rename = "Energy")]
    energy: String,
    #[tabled(rename = "Units")]
    units: String,
}

/// 执行 run 命令
pub fn execute(args: RunArgs) -> Result<()> {
    output::print_header("EOS Sweep");

    // 启动时根据注册表选择引擎
    let codename = args.codename.as_deref().unwrap_or(DEFAULT_CODENAME);
    let registry = CodeRegistry::load_or_builtin(args.codes.as_deref())?;
    let code = registry.get(&CodeId::parse(codename)?)?;

    let run = match args.run_id {
        Some(ref id) => {
            validate_run_id(id)?;
            RunInfo::with_id(id.as_str())
        }
        None => RunInfo::new(),
    };
    let work_dir = args.work_dir.join(&run.run_id);
    let engine = engine::from_config(code, work_dir.clone());
    let pseudos = PseudoLibrary::new(&args.pseudo_dir);

    output::print_info(&format!("Code: {} -> {}", codename, engine.describe()));
    output::print_info(&format!("Working directory: {}", work_dir.display()));

    let pb = progress::create_sweep_bar(SCALE_FACTORS.len() as u64, "Preparing");
    let bar = pb.clone();
    let reporter = ProgressReporter::with_callback(Box::new(move |event| match event {
        Progress::SweepStart {
            run_id,
            element,
            total_steps,
        } => {
            bar.set_length(total_steps);
            bar.suspend(|| {
                output::print_info(&format!(
                    "Workflow node identifier: {} ({} EOS)",
                    run_id, element
                ));
            });
        }
        Progress::CalculationStart {
            label,
            factor,
            structure,
        } => {
            bar.set_message(format!("{}: {}", label, structure));
            bar.suspend(|| {
                output::print_info(&format!(
                    "Running a scf for {} with scale factor {}",
                    structure, factor
                ));
            });
        }
        Progress::CalculationFinish { label, entry } => {
            bar.inc(1);
            bar.suspend(|| {
                output::print_success(&format!(
                    "{}: V = {:.4} Å³, E = {:.6} {}",
                    label, entry.volume, entry.energy, entry.energy_units
                ));
            });
        }
        Progress::SweepFinish => bar.set_message("done"),
    }));

    let ctx = WorkflowContext::new(&run, engine.as_ref(), &pseudos, &reporter);
    let result = workflow::run_eos(
        &ctx,
        args.codename.as_deref(),
        args.pseudo_family.as_deref(),
        args.element.as_deref(),
    );
    pb.finish_and_clear();
    let result = result?;

    print_table(&result);

    if let Some(ref path) = args.output {
        save_json(&result, path)?;
        output::print_success(&format!("Workflow result saved to '{}'", path.display()));
    }

    if let Some(ref path) = args.csv {
        save_csv(&result, path)?;
        output::print_success(&format!("EOS data saved to '{}'", path.display()));
    }

    if let Some(ref path) = args.poscar {
        write_poscar_file(&result.initial_structure, path)?;
        output::print_success(&format!("Initial structure saved to '{}'", path.display()));
    }

    output::print_done(&format!(
        "EOS sweep '{}' finished with {} points",
        result.provenance.run_id,
        result.eos_data().len()
    ));

    Ok(())
}

/// 运行标识用作目录名，不允许为空或包含路径分隔符
fn validate_run_id(run_id: &str) -> Result<()> {
    if run_id.is_empty() || run_id == "." || run_id == ".." || run_id.contains(['/', '\\']) {
        return Err(EosError::InvalidArgument(format!(
            "run id '{}' cannot be used as a directory name",
            run_id
        )));
    }
    Ok(())
}

/// 终端表格
fn print_table(result: &WorkflowResult) {
    let rows: Vec<EosRow> = SCALE_FACTORS
        .iter()
        .zip(result.eos_data())
        .map(|((label, factor), entry)| EosRow {
            label: label.to_string(),
            scale: format!("{:.2}", factor),
            volume: format!("{:.6}", entry.volume),
            energy: format!("{:.8}", entry.energy),
            units: entry.energy_units.clone(),
        })
        .collect();

    output::print_header(&format!(
        "EOS data for {} ({})",
        result.initial_structure.formula(),
        result.provenance.pseudo_family
    ));
    println!("{}", Table::new(&rows));
}

/// 保存 JSON
fn save_json(result: &WorkflowResult, path: &Path) -> Result<()> {
    let content = serde_json::to_string_pretty(result)?;
    fs::write(path, content).map_err(|e| EosError::FileWriteError {
        path: path.display().to_string(),
        source: e,
    })
}

/// 保存 CSV
fn save_csv(result: &WorkflowResult, path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record(["label", "scale_factor", "volume", "energy", "energy_units"])?;

    for ((label, factor), entry) in SCALE_FACTORS.iter().zip(result.eos_data()) {
        wtr.write_record([
            label.to_string(),
            factor.to_string(),
            format!("{:.10}", entry.volume),
            format!("{:.10}", entry.energy),
            entry.energy_units.clone(),
        ])?;
    }

    wtr.flush().map_err(|e| EosError::FileWriteError {
        path: path.display().to_string(),
        source: e,
    })?;

    Ok(())
}
