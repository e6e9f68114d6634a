//! 机器状态读取

use crate::transport::Session;
use crate::types::MACHINE_STATE_QUERY;
use crate::word::DecodedWord;
use domain::{LabelCategory, LabelResolver, MachineState};
use std::sync::Arc;

/// 由单个响应块得到机器状态；无效块返回 `Unknown`
pub fn machine_state_from(word: &DecodedWord, labels: &dyn LabelResolver) -> MachineState {
    if !word.decoded {
        return MachineState::unknown();
    }
    let code = word.word1;
    MachineState {
        code,
        label: labels.resolve(LabelCategory::MachineState, u32::from(code)),
    }
}

#[derive(Clone)]
pub struct MachineStateReader {
    session: Session,
    labels: Arc<dyn LabelResolver>,
}

impl MachineStateReader {
    pub fn new(session: Session, labels: Arc<dyn LabelResolver>) -> Self {
        Self { session, labels }
    }

    pub async fn read(&self) -> MachineState {
        let words = self.session.exchange(&[MACHINE_STATE_QUERY]).await;
        let word = words.first().copied().unwrap_or_else(DecodedWord::invalid);
        machine_state_from(&word, self.labels.as_ref())
    }
}
