//! 协议相关类型定义
//!
//! 各寄存器类别的扫描范围、状态/辅助字段与取值寄存器。

use domain::{RegisterClass, RegisterQuery};

/// 机器状态寄存器
pub const MACHINE_STATE_QUERY: RegisterQuery = RegisterQuery::new(0x3001, 8);

/// 发现阶段的扫描轴
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanAxis {
    /// 按地址扫描 `[start, end)`，每个地址查询固定子索引
    Addresses {
        start: u16,
        end: u16,
        status_sub_index: u8,
    },
    /// 固定索引，按子索引扫描 `[first, last]`
    SubIndices { index: u16, first: u8, last: u8 },
}

/// 扫描位置：上报地址 + 状态查询
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanPosition {
    pub address: u16,
    pub status: RegisterQuery,
}

impl ScanAxis {
    /// 按扫描顺序列出全部位置
    pub fn positions(&self) -> Vec<ScanPosition> {
        match *self {
            ScanAxis::Addresses {
                start,
                end,
                status_sub_index,
            } => (start..end)
                .map(|address| ScanPosition {
                    address,
                    status: RegisterQuery::new(address, status_sub_index),
                })
                .collect(),
            ScanAxis::SubIndices { index, first, last } => (first..=last)
                .map(|sub_index| ScanPosition {
                    address: u16::from(sub_index),
                    status: RegisterQuery::new(index, sub_index),
                })
                .collect(),
        }
    }
}

/// 取值查询的寻址方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueAddressing {
    /// `(index, running_index)`
    Indexed { index: u16 },
    /// `(base + running_index, sub_index)`：每台设备一个寄存器
    PerDevice { base: u16, sub_index: u8 },
}

impl ValueAddressing {
    pub fn query(&self, running_index: u8) -> RegisterQuery {
        match *self {
            ValueAddressing::Indexed { index } => RegisterQuery::new(index, running_index),
            ValueAddressing::PerDevice { base, sub_index } => {
                RegisterQuery::new(base.saturating_add(u16::from(running_index)), sub_index)
            }
        }
    }
}

/// 单个寄存器类别的协议布局
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassLayout {
    pub class: RegisterClass,
    pub scan: ScanAxis,
    /// 与状态查询同地址的辅助属性子索引
    pub auxiliary_sub_index: Option<u8>,
    pub value: ValueAddressing,
    /// 与取值同寄存器的伴随子索引，紧跟在每个取值查询之后（仅按设备寻址）
    pub companion_sub_index: Option<u8>,
    /// 整批共享的辅助读数，位于取值批次的第 0 个查询
    pub shared: Option<RegisterQuery>,
}

impl ClassLayout {
    pub fn for_class(class: RegisterClass) -> Self {
        match class {
            RegisterClass::AnalogInput => Self {
                class,
                scan: ScanAxis::Addresses {
                    start: 0x2010,
                    end: 0x2090,
                    status_sub_index: 1,
                },
                auxiliary_sub_index: Some(4),
                value: ValueAddressing::Indexed { index: 0x3002 },
                companion_sub_index: None,
                shared: None,
            },
            RegisterClass::DigitalInput => Self {
                class,
                scan: ScanAxis::Addresses {
                    start: 0x20B0,
                    end: 0x2100,
                    status_sub_index: 1,
                },
                auxiliary_sub_index: None,
                value: ValueAddressing::Indexed { index: 0x3003 },
                companion_sub_index: None,
                shared: None,
            },
            RegisterClass::DigitalOutput => Self {
                class,
                scan: ScanAxis::Addresses {
                    start: 0x2100,
                    end: 0x2150,
                    status_sub_index: 1,
                },
                auxiliary_sub_index: None,
                value: ValueAddressing::Indexed { index: 0x3005 },
                companion_sub_index: None,
                shared: None,
            },
            RegisterClass::Counter => Self {
                class,
                scan: ScanAxis::SubIndices {
                    index: 0x2607,
                    first: 1,
                    last: 255,
                },
                auxiliary_sub_index: None,
                value: ValueAddressing::Indexed { index: 0x3007 },
                companion_sub_index: None,
                shared: None,
            },
            RegisterClass::Converter => Self {
                class,
                scan: ScanAxis::Addresses {
                    start: 0x2681,
                    end: 0x2689,
                    status_sub_index: 1,
                },
                auxiliary_sub_index: Some(7),
                value: ValueAddressing::PerDevice {
                    base: 0x3020,
                    sub_index: 1,
                },
                companion_sub_index: Some(10),
                shared: Some(RegisterQuery::new(0x3021, 5)),
            },
            RegisterClass::SpecialProtection => Self {
                class,
                scan: ScanAxis::Addresses {
                    start: 0x2300,
                    end: 0x247F,
                    status_sub_index: 1,
                },
                auxiliary_sub_index: None,
                value: ValueAddressing::Indexed { index: 0x300E },
                companion_sub_index: None,
                shared: None,
            },
        }
    }

    /// 每个扫描位置占用的查询数
    pub fn stride(&self) -> usize {
        if self.auxiliary_sub_index.is_some() { 2 } else { 1 }
    }

    /// 伴随查询：与取值查询同索引，换用伴随子索引
    pub fn companion_query(&self, running_index: u8) -> Option<RegisterQuery> {
        let sub_index = self.companion_sub_index?;
        match self.value {
            ValueAddressing::PerDevice { .. } => Some(RegisterQuery::new(
                self.value.query(running_index).index,
                sub_index,
            )),
            ValueAddressing::Indexed { .. } => None,
        }
    }

    /// 每个描述占用的取值查询数
    pub fn value_stride(&self) -> usize {
        if self.companion_sub_index.is_some() { 2 } else { 1 }
    }
}
