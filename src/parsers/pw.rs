//! # Quantum ESPRESSO pw.x 输入/输出
//!
//! - `to_pw_input_string`: 生成 pw.x namelist 输入文件
//! - `parse_pw_output_content`: 解析 pw.x 标准输出，提取能量、体积等信息
//!
//! ## pw.x 输出关键行
//! ```text
//!      unit-cell volume          =     270.0114 (a.u.)^3
//! !    total energy              =     -15.79441848 Ry
//!      convergence NOT achieved after 100 iterations: stopping
//!      JOB DONE.
//! ```
//!
//! ## 依赖关系
//! - 被 `engine/pw.rs` 使用
//! - 使用 `models/calculation.rs`

use crate::error::{EosError, Result};
use crate::models::{CalculationInputs, OutputParameters};

use regex::Regex;
use std::fs;
use std::path::Path;

/// 1 Ry = 13.605693123 eV
pub const RYDBERG_TO_EV: f64 = 13.605_693_123;

/// 1 bohr = 0.529177210903 Å
pub const BOHR_TO_ANGSTROM: f64 = 0.529_177_210_903;

/// 输入文件名
pub const INPUT_FILENAME: &str = "aiida.in";

/// 输出文件名
pub const OUTPUT_FILENAME: &str = "aiida.out";

/// 原子质量 (amu)，SCF 中仅用于填写 ATOMIC_SPECIES
fn atomic_mass(element: &str) -> f64 {
    match element {
        "C" => 12.011,
        "Si" => 28.0855,
        "Ge" => 72.630,
        "Sn" => 118.710,
        _ => 1.0,
    }
}

/// Fortran 双精度格式
fn fortran_real(value: f64) -> String {
    format!("{:.10e}", value).replace('e', "d")
}

fn fortran_bool(value: bool) -> &'static str {
    if value {
        ".true."
    } else {
        ".false."
    }
}

/// 将计算输入转换为 pw.x 输入文件内容
pub fn to_pw_input_string(inputs: &CalculationInputs) -> String {
    let params = &inputs.parameters;
    let structure = &inputs.structure;
    let species = structure.species();

    let mut result = String::new();

    // CONTROL
    result.push_str("&CONTROL\n");
    result.push_str(&format!("  calculation = '{}'\n", params.calculation));
    result.push_str("  outdir = './out/'\n");
    result.push_str("  prefix = 'aiida'\n");
    result.push_str(&format!(
        "  pseudo_dir = '{}'\n",
        inputs.pseudo_dir.display()
    ));
    result.push_str(&format!("  tprnfor = {}\n", fortran_bool(params.tprnfor)));
    result.push_str(&format!("  tstress = {}\n", fortran_bool(params.tstress)));
    result.push_str(&format!(
        "  max_seconds = {}\n",
        inputs.options.max_wallclock_seconds
    ));
    result.push_str("/\n");

    // SYSTEM
    result.push_str("&SYSTEM\n");
    result.push_str(&format!("  ecutrho = {}\n", fortran_real(params.ecutrho)));
    result.push_str(&format!("  ecutwfc = {}\n", fortran_real(params.ecutwfc)));
    result.push_str("  ibrav = 0\n");
    result.push_str(&format!("  nat = {}\n", structure.atoms.len()));
    result.push_str(&format!("  ntyp = {}\n", species.len()));
    result.push_str("/\n");

    // ELECTRONS
    result.push_str("&ELECTRONS\n");
    result.push_str(&format!("  conv_thr = {}\n", fortran_real(params.conv_thr)));
    result.push_str("/\n");

    // ATOMIC_SPECIES
    result.push_str("ATOMIC_SPECIES\n");
    for element in &species {
        let filename = inputs
            .pseudos
            .iter()
            .find(|p| p.element == *element)
            .map(|p| p.filename.as_str())
            .unwrap_or("");
        result.push_str(&format!(
            "{:<4} {:12.6} {}\n",
            element,
            atomic_mass(element),
            filename
        ));
    }

    // ATOMIC_POSITIONS
    result.push_str("ATOMIC_POSITIONS crystal\n");
    for atom in &structure.atoms {
        result.push_str(&format!(
            "{:<4} {:16.10} {:16.10} {:16.10}\n",
            atom.element, atom.position[0], atom.position[1], atom.position[2]
        ));
    }

    // K_POINTS
    let k = &inputs.kpoints;
    result.push_str("K_POINTS automatic\n");
    result.push_str(&format!(
        "{} {} {} {} {} {}\n",
        k.mesh[0], k.mesh[1], k.mesh[2], k.offset[0], k.offset[1], k.offset[2]
    ));

    // CELL_PARAMETERS
    result.push_str("CELL_PARAMETERS angstrom\n");
    for row in &structure.lattice.matrix {
        result.push_str(&format!(
            "  {:16.10}  {:16.10}  {:16.10}\n",
            row[0], row[1], row[2]
        ));
    }

    result
}

/// pw.x 输出解析结果
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PwOutput {
    /// 是否出现 JOB DONE
    pub is_finished: bool,

    /// SCF 是否收敛
    pub converged: bool,

    /// 最终总能 (Ry)
    pub energy_ry: Option<f64>,

    /// 晶胞体积 (bohr³)
    pub volume_bohr3: Option<f64>,

    /// 原子数
    pub num_atoms: Option<usize>,
}

impl PwOutput {
    /// 转换为引擎边界上的输出参数（eV, Å³）
    pub fn output_parameters(&self) -> OutputParameters {
        OutputParameters {
            volume: self.volume_bohr3.map(|v| v * BOHR_TO_ANGSTROM.powi(3)),
            energy: self.energy_ry.map(|e| e * RYDBERG_TO_EV),
            energy_units: Some("eV".to_string()),
        }
    }
}

/// 解析 pw.x 输出文件
pub fn parse_pw_output(path: &Path) -> Result<PwOutput> {
    let content = fs::read_to_string(path).map_err(|e| EosError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    Ok(parse_pw_output_content(&content))
}

/// 从字符串内容解析 pw.x 输出
pub fn parse_pw_output_content(content: &str) -> PwOutput {
    let energy_re = Regex::new(r"^!\s+total energy\s+=\s+(\S+)\s+Ry").unwrap();
    let volume_re = Regex::new(r"unit-cell volume\s+=\s+(\S+)\s+\(a\.u\.\)\^3").unwrap();
    let nat_re = Regex::new(r"number of atoms/cell\s+=\s+(\d+)").unwrap();

    let mut output = PwOutput {
        converged: true,
        ..PwOutput::default()
    };

    for line in content.lines() {
        if line.contains("JOB DONE.") {
            output.is_finished = true;
        }

        if line.contains("convergence NOT achieved") {
            output.converged = false;
        }

        // 取最后一次出现的值（vc-relax 等会多次输出）
        if let Some(caps) = energy_re.captures(line) {
            if let Ok(v) = caps[1].parse::<f64>() {
                output.energy_ry = Some(v);
            }
        }

        if let Some(caps) = volume_re.captures(line) {
            if let Ok(v) = caps[1].parse::<f64>() {
                output.volume_bohr3 = Some(v);
            }
        }

        if let Some(caps) = nat_re.captures(line) {
            if let Ok(n) = caps[1].parse::<usize>() {
                output.num_atoms = Some(n);
            }
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        CodeId, KpointMesh, Pseudopotential, ScfParameters, SchedulerOptions,
    };
    use crate::structures::create_diamond_fcc;
    use std::path::PathBuf;

    const SAMPLE_OUTPUT: &str = r#"
     Program PWSCF v.6.2 starts on 12Mar2018 at 10:15:43

     bravais-lattice index     =            0
     lattice parameter (alat)  =      10.2625  a.u.
     unit-cell volume          =     270.2172 (a.u.)^3
     number of atoms/cell      =            2
     number of atomic types    =            1

     total energy              =     -15.84012345 Ry
     estimated scf accuracy    <       0.00000052 Ry

     End of self-consistent calculation

!    total energy              =     -15.84054732 Ry
     estimated scf accuracy    <          4.5E-09 Ry

     convergence has been achieved in   6 iterations

     JOB DONE.
"#;

    fn sample_inputs() -> CalculationInputs {
        CalculationInputs {
            code: CodeId::parse("qe-pw-6.2.1@localhost").unwrap(),
            pseudo_family: "GBRV_lda".to_string(),
            structure: create_diamond_fcc("Si").unwrap(),
            parameters: ScfParameters::default(),
            kpoints: KpointMesh::uniform(2),
            pseudo_dir: PathBuf::from("/data/pseudo/GBRV_lda"),
            pseudos: vec![Pseudopotential {
                element: "Si".to_string(),
                filename: "si_lda_v1.uspp.F.UPF".to_string(),
            }],
            options: SchedulerOptions::default(),
        }
    }

    #[test]
    fn test_parse_pw_output() {
        let output = parse_pw_output_content(SAMPLE_OUTPUT);

        assert!(output.is_finished);
        assert!(output.converged);
        assert_eq!(output.num_atoms, Some(2));
        // 只取带 '!' 的最终能量
        assert_eq!(output.energy_ry, Some(-15.84054732));
        assert_eq!(output.volume_bohr3, Some(270.2172));
    }

    #[test]
    fn test_output_parameters_units() {
        let output = parse_pw_output_content(SAMPLE_OUTPUT);
        let result = output.output_parameters().into_result().unwrap();

        assert_eq!(result.energy_units, "eV");
        assert!((result.energy - (-15.84054732 * RYDBERG_TO_EV)).abs() < 1e-9);
        // 270.2172 bohr^3 ≈ 40.04 Å^3
        assert!((result.volume - 40.0421).abs() < 1e-3);
    }

    #[test]
    fn test_parse_unconverged_output() {
        let content = "     convergence NOT achieved after 100 iterations: stopping\n";
        let output = parse_pw_output_content(content);

        assert!(!output.converged);
        assert!(!output.is_finished);
        assert!(output.energy_ry.is_none());
        assert!(matches!(
            output.output_parameters().into_result(),
            Err(EosError::MissingField { .. })
        ));
    }

    #[test]
    fn test_to_pw_input_string() {
        let text = to_pw_input_string(&sample_inputs());

        assert!(text.contains("calculation = 'scf'"));
        assert!(text.contains("pseudo_dir = '/data/pseudo/GBRV_lda'"));
        assert!(text.contains("tstress = .true."));
        assert!(text.contains("ecutwfc = 3.0000000000d1"));
        assert!(text.contains("ecutrho = 2.0000000000d2"));
        assert!(text.contains("conv_thr = 1.0000000000d-6"));
        assert!(text.contains("nat = 2"));
        assert!(text.contains("ntyp = 1"));
        assert!(text.contains("si_lda_v1.uspp.F.UPF"));
        assert!(text.contains("K_POINTS automatic\n2 2 2 0 0 0\n"));
        assert!(text.contains("CELL_PARAMETERS angstrom"));
        assert_eq!(
            text.lines()
                .skip_while(|l| !l.starts_with("ATOMIC_POSITIONS"))
                .skip(1)
                .take_while(|l| l.starts_with("Si"))
                .count(),
            2
        );
    }
}
