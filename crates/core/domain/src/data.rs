use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 单条寄存器查询（索引 + 子索引）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegisterQuery {
    pub index: u16,
    pub sub_index: u8,
}

impl RegisterQuery {
    pub const fn new(index: u16, sub_index: u8) -> Self {
        Self { index, sub_index }
    }
}

/// 寄存器类别。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegisterClass {
    AnalogInput,
    DigitalInput,
    DigitalOutput,
    Counter,
    Converter,
    SpecialProtection,
}

impl RegisterClass {
    /// 按轮询顺序排列的全部类别。
    pub const ALL: [RegisterClass; 6] = [
        RegisterClass::AnalogInput,
        RegisterClass::Counter,
        RegisterClass::Converter,
        RegisterClass::DigitalInput,
        RegisterClass::DigitalOutput,
        RegisterClass::SpecialProtection,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RegisterClass::AnalogInput => "analog_input",
            RegisterClass::DigitalInput => "digital_input",
            RegisterClass::DigitalOutput => "digital_output",
            RegisterClass::Counter => "counter",
            RegisterClass::Converter => "converter",
            RegisterClass::SpecialProtection => "special_protection",
        }
    }

    /// 时序库中的 measurement 名称。
    pub fn measurement(&self) -> &'static str {
        match self {
            RegisterClass::AnalogInput => "analog_inputs",
            RegisterClass::DigitalInput => "digital_inputs",
            RegisterClass::DigitalOutput => "digital_outputs",
            RegisterClass::Counter => "counters",
            RegisterClass::Converter => "converters",
            RegisterClass::SpecialProtection => "special_protections",
        }
    }
}

impl fmt::Display for RegisterClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 无法识别的寄存器类别名称。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRegisterClass(pub String);

impl fmt::Display for UnknownRegisterClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown register class: {}", self.0)
    }
}

impl std::error::Error for UnknownRegisterClass {}

impl FromStr for RegisterClass {
    type Err = UnknownRegisterClass;

    /// 同时接受单数名称与 measurement 名称。
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        RegisterClass::ALL
            .into_iter()
            .find(|class| class.as_str() == normalized || class.measurement() == normalized)
            .ok_or(UnknownRegisterClass(value.to_string()))
    }
}

/// 计数器单位。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CounterUnit {
    /// 设备以秒计，显示为小时
    Hours,
    Count,
    /// m3
    Volume,
    Percent,
}

impl CounterUnit {
    /// 设备单位代码：0 小时，1 次数，2 体积，3 百分比；其余按次数处理。
    pub fn from_code(code: u8) -> Self {
        match code {
            0 => CounterUnit::Hours,
            2 => CounterUnit::Volume,
            3 => CounterUnit::Percent,
            _ => CounterUnit::Count,
        }
    }
}

/// 值的语义类型，决定缩放与显示规则。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    Temperature,
    Pressure,
    Humidity,
    /// 未知输入类型：原值输出
    Raw,
    Counter(CounterUnit),
    Digital,
    ConverterSpeed,
    Protection,
}

impl ValueKind {
    /// 模拟量输入类型代码：0 压力，1 温度。
    pub fn from_input_type(code: u8) -> Self {
        match code {
            0 => ValueKind::Pressure,
            1 => ValueKind::Temperature,
            _ => ValueKind::Raw,
        }
    }
}

/// 类别专属属性（来自发现阶段的状态块或辅助块）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassAttribute {
    #[default]
    None,
    InputType(u8),
    CounterUnit(u8),
    Converter { converter_type: u8, device_type: u8 },
}

fn default_precision() -> u8 {
    1
}

/// 寄存器描述（发现阶段产出或静态配置）。
///
/// `running_index` 是取值查询使用的子索引：动态发现时按扫描顺序从 1 连续分配，
/// 仅在同一次发现内稳定。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterDescriptor {
    pub class: RegisterClass,
    #[serde(default)]
    pub address: u16,
    #[serde(default)]
    pub mpl_code: u16,
    #[serde(default)]
    pub attribute: ClassAttribute,
    pub running_index: u8,
    pub display_name: String,
    pub kind: ValueKind,
    /// 显示小数位数
    #[serde(default = "default_precision")]
    pub precision: u8,
}

/// 32 位字拆分后的高低半字。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HalfWords {
    pub high: u16,
    pub low: u16,
}

/// 单次轮询中一个寄存器的取值结果。
///
/// `decoded == false` 表示该响应块无效，其余数值字段无意义。
/// 缩放与显示字段由格式化阶段填写。
#[derive(Debug, Clone, PartialEq)]
pub struct ValueRecord {
    pub descriptor: RegisterDescriptor,
    pub decoded: bool,
    pub raw_value: i64,
    pub status_word: u16,
    /// 整批共享的辅助读数（如变频器流量）
    pub shared_word: Option<HalfWords>,
    /// 同一设备的伴随读数原值（如变频器电流）
    pub companion_raw: Option<i64>,
    pub scaled_value: Option<f64>,
    pub display: Option<String>,
    pub shared_value: Option<f64>,
    pub companion_value: Option<f64>,
}

impl ValueRecord {
    pub fn new(descriptor: RegisterDescriptor, raw_value: i64, status_word: u16) -> Self {
        Self {
            descriptor,
            decoded: true,
            raw_value,
            status_word,
            shared_word: None,
            companion_raw: None,
            scaled_value: None,
            display: None,
            shared_value: None,
            companion_value: None,
        }
    }

    /// 响应块无效时的占位记录。
    pub fn undecoded(descriptor: RegisterDescriptor) -> Self {
        Self {
            decoded: false,
            ..Self::new(descriptor, 0, 0)
        }
    }
}

/// 控制器运行状态。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MachineState {
    pub code: u16,
    pub label: String,
}

impl MachineState {
    /// 传输或解码失败时上报的状态。
    pub fn unknown() -> Self {
        Self {
            code: 0,
            label: "Unknown".to_string(),
        }
    }
}
