//! 后台轮询任务
//!
//! 停止信号只在周期之间生效，正在执行的周期总会完整结束。

use crate::cycle::PollCycle;
use crate::error::PollerError;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::info;

pub struct Poller;

impl Poller {
    /// 启动轮询任务；第一个周期立即执行
    pub fn spawn(cycle: Arc<PollCycle>, interval: Duration) -> Result<PollerHandle, PollerError> {
        if interval.is_zero() {
            return Err(PollerError::InvalidInterval);
        }

        let (stop_tx, mut stop_rx) = watch::channel(false);
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut cycles = 0u64;
            info!(
                target: "mkv.poller",
                interval_ms = interval.as_millis() as u64,
                classes = cycle.classes().len(),
                "poller started"
            );

            loop {
                tokio::select! {
                    _ = ticker.tick() => {}
                    changed = stop_rx.changed() => {
                        if changed.is_err() || *stop_rx.borrow() {
                            break;
                        }
                        continue;
                    }
                }

                cycle.run_once().await;
                cycles += 1;
                if *stop_rx.borrow() {
                    break;
                }
            }

            info!(target: "mkv.poller", cycles, "poller stopped");
            cycles
        });

        Ok(PollerHandle { stop_tx, task })
    }
}

/// 轮询任务句柄
pub struct PollerHandle {
    stop_tx: watch::Sender<bool>,
    task: JoinHandle<u64>,
}

impl PollerHandle {
    /// 发送停止信号并等待任务结束，返回已完成的周期数
    pub async fn stop(self) -> Result<u64, PollerError> {
        let _ = self.stop_tx.send(true);
        self.task
            .await
            .map_err(|err| PollerError::Join(err.to_string()))
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}
