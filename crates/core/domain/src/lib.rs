//! 空压机控制器寄存器的核心领域模型。

pub mod data;
pub mod labels;

pub use data::{
    ClassAttribute, CounterUnit, HalfWords, MachineState, RegisterClass, RegisterDescriptor,
    RegisterQuery, UnknownRegisterClass, ValueKind, ValueRecord,
};
pub use labels::{LabelCategory, LabelResolver};

/// 设备标识：写入时序库时作为标签。
#[derive(Debug, Clone)]
pub struct DeviceInfo {
    pub model: String,
    pub serial: String,
}

impl DeviceInfo {
    pub fn new(model: impl Into<String>, serial: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            serial: serial.into(),
        }
    }
}

impl Default for DeviceInfo {
    /// 未配置时的占位设备。
    fn default() -> Self {
        Self {
            model: "unknown".to_string(),
            serial: "unknown".to_string(),
        }
    }
}
