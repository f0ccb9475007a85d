//! # 统一错误处理模块
//!
//! 定义 eosflow 的所有错误类型，使用 `thiserror` 派生。
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use thiserror::Error;

/// eosflow 统一错误类型
#[derive(Error, Debug)]
pub enum EosError {
    // ─────────────────────────────────────────────────────────────
    // I/O 错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to read file: {path}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: String },

    // ─────────────────────────────────────────────────────────────
    // 工作流错误
    // ─────────────────────────────────────────────────────────────
    #[error("Unsupported element '{element}'. Valid elements are: {valid}")]
    UnsupportedElement { element: String, valid: String },

    #[error("Calculation output is missing field '{field}'")]
    MissingField { field: String },

    #[error("No pseudopotential for '{element}' in family '{family}' ({path})")]
    PseudoNotFound {
        element: String,
        family: String,
        path: String,
    },

    // ─────────────────────────────────────────────────────────────
    // 计算引擎错误
    // ─────────────────────────────────────────────────────────────
    #[error("Calculation failed in {workdir}: {reason}")]
    EngineFailed { workdir: String, reason: String },

    #[error("External command '{command}' not found in PATH")]
    CommandNotFound { command: String },

    #[error("External command failed: {command}\n{stderr}")]
    CommandFailed { command: String, stderr: String },

    // ─────────────────────────────────────────────────────────────
    // 配置错误
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid codename '{0}', expected 'label@computer'")]
    InvalidCodename(String),

    #[error("Code '{codename}' is not configured (known: {known})")]
    UnknownCode { codename: String, known: String },

    #[error("Invalid code registry: {path}")]
    ConfigError {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    // ─────────────────────────────────────────────────────────────
    // 参数错误
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // ─────────────────────────────────────────────────────────────
    // 导出错误
    // ─────────────────────────────────────────────────────────────
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, EosError>;
