//! # pw.x 计算引擎
//!
//! 每次调用：
//! 1. 在工作目录下创建独立的运行目录
//! 2. 写入 pw.x 输入文件
//! 3. 按配置的启动方式运行（本机 / `sbatch --wait`），阻塞直到结束
//! 4. 解析输出并校验为 `CalculationResult`
//!
//! ## 依赖关系
//! - 被 `engine/mod.rs` 使用
//! - 使用 `parsers/pw.rs`, `utils/slurm.rs`, `config.rs`

use super::CalculationEngine;
use crate::config::{CodeConfig, Launcher};
use crate::error::{EosError, Result};
use crate::models::{CalculationInputs, CalculationResult};
use crate::parsers::pw::{self, INPUT_FILENAME, OUTPUT_FILENAME};
use crate::utils::slurm::{format_time_limit, generate_sbatch_script, SlurmConfig};

use std::fs::{self, File};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use std::sync::atomic::{AtomicUsize, Ordering};

/// sbatch 脚本文件名
const SBATCH_FILENAME: &str = "submit.sbatch";

/// Quantum ESPRESSO pw.x 引擎
pub struct PwEngine {
    config: CodeConfig,
    work_dir: PathBuf,
    /// 已提交的计算数，用于生成运行目录序号
    submitted: AtomicUsize,
}

impl PwEngine {
    pub fn new(config: CodeConfig, work_dir: PathBuf) -> Self {
        PwEngine {
            config,
            work_dir,
            submitted: AtomicUsize::new(0),
        }
    }

    /// 创建运行目录并写入输入文件
    fn prepare_run_dir(&self, inputs: &CalculationInputs) -> Result<PathBuf> {
        let index = self.submitted.fetch_add(1, Ordering::SeqCst) + 1;
        let run_dir = self
            .work_dir
            .join(format!("{:02}-{}", index, inputs.structure.name));

        fs::create_dir_all(&run_dir).map_err(|e| EosError::FileWriteError {
            path: run_dir.display().to_string(),
            source: e,
        })?;

        let input_path = run_dir.join(INPUT_FILENAME);
        fs::write(&input_path, pw::to_pw_input_string(inputs)).map_err(|e| {
            EosError::FileWriteError {
                path: input_path.display().to_string(),
                source: e,
            }
        })?;

        Ok(run_dir)
    }

    /// pw.x 程序及参数（可执行程序字段允许带参数，如 "srun pw.x"）
    fn program_argv(&self) -> Vec<String> {
        let mut argv: Vec<String> = Vec::new();
        if self.config.mpi_procs > 1 {
            argv.push("mpirun".to_string());
            argv.push("-np".to_string());
            argv.push(self.config.mpi_procs.to_string());
        }
        argv.extend(self.config.executable.split_whitespace().map(String::from));
        argv.push("-in".to_string());
        argv.push(INPUT_FILENAME.to_string());
        argv
    }

    /// 完整的 shell 命令行（用于 sbatch 脚本）
    fn exec_command(&self) -> String {
        format!("{} > {}", self.program_argv().join(" "), OUTPUT_FILENAME)
    }

    /// 本机运行，stdout 重定向到输出文件
    fn launch_local(&self, run_dir: &Path) -> Result<()> {
        let argv = self.program_argv();
        let output_path = run_dir.join(OUTPUT_FILENAME);
        let stdout = File::create(&output_path).map_err(|e| EosError::FileWriteError {
            path: output_path.display().to_string(),
            source: e,
        })?;

        let output = Command::new(&argv[0])
            .args(&argv[1..])
            .current_dir(run_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::from(stdout))
            .output();

        check_output(&argv.join(" "), output)
    }

    /// 生成 sbatch 脚本并 `sbatch --wait` 阻塞等待
    fn launch_slurm(&self, run_dir: &Path, inputs: &CalculationInputs) -> Result<()> {
        let slurm = &self.config.slurm;
        let config = SlurmConfig {
            job_name: inputs.structure.name.clone(),
            partition: slurm.partition.clone(),
            constraint: slurm.constraint.clone(),
            nodes: inputs.options.num_machines,
            ntasks: slurm.ntasks,
            cpus_per_task: slurm.cpus_per_task,
            mem_per_cpu: slurm.mem_per_cpu.clone(),
            time_limit: format_time_limit(inputs.options.max_wallclock_seconds),
            modules: self.config.modules.clone(),
        };

        let script = generate_sbatch_script(&config, run_dir, &self.exec_command());
        let script_path = run_dir.join(SBATCH_FILENAME);
        fs::write(&script_path, script).map_err(|e| EosError::FileWriteError {
            path: script_path.display().to_string(),
            source: e,
        })?;

        let mut argv: Vec<String> = slurm.sbatch.split_whitespace().map(String::from).collect();
        argv.push("--wait".to_string());
        argv.push(SBATCH_FILENAME.to_string());

        let output = Command::new(&argv[0])
            .args(&argv[1..])
            .current_dir(run_dir)
            .stdin(Stdio::null())
            .output();

        check_output(&argv.join(" "), output)
    }

    /// 解析输出并校验
    fn retrieve(&self, run_dir: &Path, inputs: &CalculationInputs) -> Result<CalculationResult> {
        let parsed = pw::parse_pw_output(&run_dir.join(OUTPUT_FILENAME))?;

        if !parsed.converged {
            return Err(EosError::EngineFailed {
                workdir: run_dir.display().to_string(),
                reason: "SCF convergence NOT achieved".to_string(),
            });
        }

        if !parsed.is_finished {
            return Err(EosError::EngineFailed {
                workdir: run_dir.display().to_string(),
                reason: "pw.x terminated without 'JOB DONE'".to_string(),
            });
        }

        if let Some(n) = parsed.num_atoms {
            if n != inputs.structure.atoms.len() {
                return Err(EosError::EngineFailed {
                    workdir: run_dir.display().to_string(),
                    reason: format!(
                        "output reports {} atoms, input has {}",
                        n,
                        inputs.structure.atoms.len()
                    ),
                });
            }
        }

        parsed.output_parameters().into_result()
    }
}

/// 将进程结果转换为统一错误
fn check_output(command: &str, output: std::io::Result<Output>) -> Result<()> {
    let program = command.split_whitespace().next().unwrap_or(command);
    let output = output.map_err(|e| match e.kind() {
        ErrorKind::NotFound => EosError::CommandNotFound {
            command: program.to_string(),
        },
        _ => EosError::CommandFailed {
            command: command.to_string(),
            stderr: e.to_string(),
        },
    })?;

    if output.status.success() {
        Ok(())
    } else {
        Err(EosError::CommandFailed {
            command: command.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}

impl CalculationEngine for PwEngine {
    fn describe(&self) -> String {
        let launcher = match self.config.launcher {
            Launcher::Local => "local",
            Launcher::Slurm => "slurm",
        };
        format!("{} ({})", self.config.executable, launcher)
    }

    fn submit_and_wait(&self, inputs: CalculationInputs) -> Result<CalculationResult> {
        let run_dir = self.prepare_run_dir(&inputs)?;

        match self.config.launcher {
            Launcher::Local => self.launch_local(&run_dir)?,
            Launcher::Slurm => self.launch_slurm(&run_dir, &inputs)?,
        }

        self.retrieve(&run_dir, &inputs)
    }
}
