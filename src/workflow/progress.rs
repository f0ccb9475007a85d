//! # 扫描进度事件
//!
//! 工作流核心不直接打印：每个阶段发出一个 `Progress` 事件，
//! 由调用方决定如何呈现（终端进度条、测试中的记录等）。
//! 未注册回调时事件被丢弃。
//!
//! ## 依赖关系
//! - 被 `workflow/eos.rs` 发出，`commands/run.rs` 消费
//! - 使用 `models/eos.rs` 的 `EosEntry`

use crate::models::EosEntry;

/// EOS 扫描中的进度事件，按发生顺序
#[derive(Debug, Clone)]
pub enum Progress {
    /// 扫描开始，`run_id` 即工作流标识
    SweepStart {
        run_id: String,
        element: String,
        total_steps: u64,
    },
    /// 某个缩放因子的计算已提交
    CalculationStart {
        label: &'static str,
        factor: f64,
        /// 缩放后结构名称
        structure: String,
    },
    /// 计算完成并取得数据点
    CalculationFinish {
        label: &'static str,
        entry: EosEntry,
    },
    /// 5 个数据点均已汇总；失败时不会发出
    SweepFinish,
}

pub type ProgressCallback<'a> = Box<dyn Fn(Progress) + 'a>;

/// 进度回调的持有者，随 `WorkflowContext` 注入
#[derive(Default)]
pub struct ProgressReporter<'a> {
    callback: Option<ProgressCallback<'a>>,
}

impl<'a> ProgressReporter<'a> {
    /// 静默报告器
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: ProgressCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    #[inline]
    pub fn report(&self, event: Progress) {
        if let Some(cb) = &self.callback {
            cb(event);
        }
    }
}
