//! # 代码注册表配置
//!
//! 从 TOML 文件加载 `label@computer` → 可执行程序/启动方式 的映射。
//!
//! ```toml
//! [codes."qe-pw-6.2.1@localhost"]
//! executable = "pw.x"
//! mpi_procs = 4
//!
//! [codes."qe-pw-6.2.1@cluster"]
//! executable = "pw.x"
//! launcher = "slurm"
//! modules = ["qe/6.2.1"]
//! slurm = { partition = "cpu", ntasks = 32 }
//! ```
//!
//! ## 依赖关系
//! - 被 `commands/run.rs` 使用（启动时选择计算引擎）
//! - 使用 `models/calculation.rs` 的 `CodeId`

use crate::error::{EosError, Result};
use crate::models::CodeId;

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// 默认代码名
pub const DEFAULT_CODENAME: &str = "qe-pw-6.2.1@localhost";

/// 作业启动方式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Launcher {
    /// 本机直接运行（可选 mpirun）
    #[default]
    Local,
    /// 通过 `sbatch --wait` 提交并等待
    Slurm,
}

/// Slurm 资源选项
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SlurmOptions {
    pub partition: String,
    pub constraint: Option<String>,
    pub ntasks: u32,
    pub cpus_per_task: u32,
    pub mem_per_cpu: String,
    /// 提交命令，可带前置参数
    pub sbatch: String,
}

impl Default for SlurmOptions {
    fn default() -> Self {
        SlurmOptions {
            partition: "cpu".to_string(),
            constraint: None,
            ntasks: 32,
            cpus_per_task: 1,
            mem_per_cpu: "3G".to_string(),
            sbatch: "sbatch".to_string(),
        }
    }
}

/// 单个代码的配置
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CodeConfig {
    pub executable: String,
    #[serde(default = "default_mpi_procs")]
    pub mpi_procs: u32,
    #[serde(default)]
    pub launcher: Launcher,
    #[serde(default)]
    pub modules: Vec<String>,
    #[serde(default)]
    pub slurm: SlurmOptions,
}

fn default_mpi_procs() -> u32 {
    1
}

impl CodeConfig {
    pub fn local(executable: impl Into<String>) -> Self {
        CodeConfig {
            executable: executable.into(),
            mpi_procs: default_mpi_procs(),
            launcher: Launcher::Local,
            modules: vec![],
            slurm: SlurmOptions::default(),
        }
    }
}

/// 代码注册表
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CodeRegistry {
    #[serde(default)]
    codes: BTreeMap<String, CodeConfig>,
}

impl CodeRegistry {
    /// 内置注册表：仅包含本机 pw.x
    pub fn builtin() -> Self {
        let mut codes = BTreeMap::new();
        codes.insert(DEFAULT_CODENAME.to_string(), CodeConfig::local("pw.x"));
        CodeRegistry { codes }
    }

    /// 从 TOML 文件加载
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| EosError::FileReadError {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_toml(&content, &path.display().to_string())
    }

    /// 从 TOML 字符串解析
    pub fn from_toml(content: &str, origin: &str) -> Result<Self> {
        let registry: CodeRegistry =
            toml::from_str(content).map_err(|e| EosError::ConfigError {
                path: origin.to_string(),
                source: e,
            })?;

        // 键本身必须是合法的 label@computer
        for name in registry.codes.keys() {
            CodeId::parse(name)?;
        }

        Ok(registry)
    }

    /// 可选路径：未指定时使用内置注册表
    pub fn load_or_builtin(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::builtin()),
        }
    }

    /// 按代码标识查找
    pub fn get(&self, code: &CodeId) -> Result<&CodeConfig> {
        self.codes
            .get(&code.to_string())
            .ok_or_else(|| EosError::UnknownCode {
                codename: code.to_string(),
                known: self.names().join(", "),
            })
    }

    /// 已注册的代码名
    pub fn names(&self) -> Vec<&str> {
        self.codes.keys().map(|k| k.as_str()).collect()
    }
}
