//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `run`: 运行 EOS 扫描
//! - `structure`: 导出扫描结构 (POSCAR)
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: run, structure

pub mod run;
pub mod structure;

use clap::{Parser, Subcommand};

/// eosflow - 状态方程扫描工作流
#[derive(Parser)]
#[command(name = "eosflow")]
#[command(author = "Changjiang Wu")]
#[command(version)]
#[command(about = "Equation-of-state sweeps driven by Quantum ESPRESSO pw.x", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Run an EOS sweep over five rescaled structures
    Run(run::RunArgs),

    /// Write the base and rescaled structures as POSCAR files
    Structure(structure::StructureArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_defaults_are_unset() {
        let cli = Cli::try_parse_from(["eosflow", "run"]).unwrap();
        match cli.command {
            Commands::Run(args) => {
                assert!(args.codename.is_none());
                assert!(args.pseudo_family.is_none());
                assert!(args.element.is_none());
            }
            _ => panic!("expected run"),
        }
    }

    #[test]
    fn test_run_overrides() {
        let cli = Cli::try_parse_from([
            "eosflow",
            "run",
            "--codename",
            "qe-pw-7.2@cluster",
            "--pseudo-family",
            "SSSP",
            "--element",
            "Ge",
            "--output",
            "eos.json",
        ])
        .unwrap();
        match cli.command {
            Commands::Run(args) => {
                assert_eq!(args.codename.as_deref(), Some("qe-pw-7.2@cluster"));
                assert_eq!(args.pseudo_family.as_deref(), Some("SSSP"));
                assert_eq!(args.element.as_deref(), Some("Ge"));
                assert_eq!(args.output.unwrap().to_str(), Some("eos.json"));
            }
            _ => panic!("expected run"),
        }
    }

    #[test]
    fn test_structure_defaults() {
        let cli = Cli::try_parse_from(["eosflow", "structure"]).unwrap();
        match cli.command {
            Commands::Structure(args) => assert_eq!(args.element, "Si"),
            _ => panic!("expected structure"),
        }
    }
}
