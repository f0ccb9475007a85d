//! # structure 命令实现
//!
//! 写出基础结构及 5 个缩放结构的 POSCAR 文件，不运行计算。
//!
//! ## 依赖关系
//! - 使用 `cli/structure.rs` 定义的参数
//! - 使用 `structures.rs`, `parsers/poscar.rs`

use crate::cli::structure::StructureArgs;
use crate::error::{EosError, Result};
use crate::parsers::poscar::write_poscar_file;
use crate::structures::{create_diamond_fcc, rescale};
use crate::utils::output;
use crate::workflow::SCALE_FACTORS;

use std::fs;
use tabled::{Table, Tabled};

#[derive(Debug, Clone, Tabled)]
struct StructureRow {
    #[tabled(rename = "File")]
    file: String,
    #[tabled(rename = "Scale")]
    scale: String,
    #[tabled(rename = "a (Å)")]
    alat: String,
    #[tabled(rename = "Volume (Å³)")]
    volume: String,
    #[tabled(rename = "V/atom (Å³)")]
    volume_per_atom: String,
}

/// 执行 structure 命令
pub fn execute(args: StructureArgs) -> Result<()> {
    output::print_header("Diamond FCC Structures");

    let base = create_diamond_fcc(&args.element)?;

    fs::create_dir_all(&args.output_dir).map_err(|e| EosError::FileWriteError {
        path: args.output_dir.display().to_string(),
        source: e,
    })?;

    let mut rows = Vec::new();

    let base_path = args.output_dir.join(format!("{}.POSCAR", args.element));
    write_poscar_file(&base, &base_path)?;
    rows.push(StructureRow {
        file: base_path.display().to_string(),
        scale: "base".to_string(),
        alat: format!("{:.4}", base.lattice.parameters().0),
        volume: format!("{:.4}", base.volume()),
        volume_per_atom: base
            .volume_per_atom()
            .map(|v| format!("{:.4}", v))
            .unwrap_or_default(),
    });

    for (label, factor) in SCALE_FACTORS {
        let scaled = rescale(&base, factor);
        let path = args.output_dir.join(format!("{}.POSCAR", label));
        write_poscar_file(&scaled, &path)?;

        rows.push(StructureRow {
            file: path.display().to_string(),
            scale: format!("{:.2}", factor),
            alat: format!("{:.4}", scaled.lattice.parameters().0),
            volume: format!("{:.4}", scaled.volume()),
            volume_per_atom: scaled
                .volume_per_atom()
                .map(|v| format!("{:.4}", v))
                .unwrap_or_default(),
        });
    }

    println!("{}", Table::new(&rows));
    output::print_done(&format!(
        "Wrote {} POSCAR files to '{}'",
        rows.len(),
        args.output_dir.display()
    ));

    Ok(())
}
