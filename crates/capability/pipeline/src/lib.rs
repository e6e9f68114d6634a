//! 轮询编排
//!
//! - [`PollCycle`]：一次 发现 → 取值 → 格式化 → 写入
//! - [`Poller`]：按固定间隔重复执行周期，显式停止并等待退出

mod cycle;
mod error;
mod points;
mod poller;

pub use cycle::{ClassSnapshot, CycleReport, PollCycle, Snapshot};
pub use error::PollerError;
pub use points::{MACHINE_STATE_MEASUREMENT, machine_state_point, record_point, record_points};
pub use poller::{Poller, PollerHandle};
