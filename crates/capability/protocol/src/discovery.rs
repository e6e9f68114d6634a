//! 寄存器发现
//!
//! 两种策略实现同一个 [`DescriptorSource`]：
//! - [`DynamicDiscovery`]：每个周期重新扫描地址范围
//! - [`StaticDescriptors`]：外部提供的固定描述表，不产生发现流量

use crate::error::ProtocolError;
use crate::transport::Session;
use crate::types::ClassLayout;
use crate::word::DecodedWord;
use async_trait::async_trait;
use domain::{
    ClassAttribute, CounterUnit, LabelCategory, LabelResolver, RegisterClass, RegisterDescriptor,
    RegisterQuery, ValueKind,
};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// 单次发现可分配的最大运行索引
pub const MAX_RUNNING_INDEX: usize = u8::MAX as usize;

/// 描述表来源
#[async_trait]
pub trait DescriptorSource: Send + Sync {
    /// 返回某类别当前的寄存器描述，按运行索引升序
    async fn descriptors(&self, class: RegisterClass) -> Vec<RegisterDescriptor>;
}

/// 构造发现查询：每个扫描位置一个状态查询，有辅助字段时紧随其后
pub fn discovery_queries(layout: &ClassLayout) -> Vec<RegisterQuery> {
    let positions = layout.scan.positions();
    let mut queries = Vec::with_capacity(positions.len() * layout.stride());
    for position in positions {
        queries.push(position.status);
        if let Some(sub_index) = layout.auxiliary_sub_index {
            queries.push(RegisterQuery::new(position.status.index, sub_index));
        }
    }
    queries
}

/// 从发现响应构造描述表
///
/// `words` 与 [`discovery_queries`] 的结果按位置对应。
pub fn descriptors_from_words(
    layout: &ClassLayout,
    words: &[DecodedWord],
    labels: &dyn LabelResolver,
) -> Vec<RegisterDescriptor> {
    let stride = layout.stride();
    let mut descriptors = Vec::new();

    for (slot, position) in layout.scan.positions().into_iter().enumerate() {
        let status = words
            .get(slot * stride)
            .copied()
            .unwrap_or_else(DecodedWord::invalid);
        if !status.decoded || status.low_byte() == 0 {
            continue;
        }

        if descriptors.len() >= MAX_RUNNING_INDEX {
            warn!(
                target: "mkv.protocol",
                class = %layout.class,
                address = position.address,
                "running index space exhausted, remaining registers skipped"
            );
            break;
        }

        let auxiliary = if stride == 2 {
            words.get(slot * stride + 1).copied()
        } else {
            None
        };
        let running_index = (descriptors.len() + 1) as u8;
        descriptors.push(describe(
            layout.class,
            position.address,
            running_index,
            &status,
            auxiliary.as_ref(),
            labels,
        ));
    }

    descriptors
}

fn describe(
    class: RegisterClass,
    address: u16,
    running_index: u8,
    status: &DecodedWord,
    auxiliary: Option<&DecodedWord>,
    labels: &dyn LabelResolver,
) -> RegisterDescriptor {
    let mpl_code = status.word0;
    let attribute_byte = status.bytes[2];
    let auxiliary = auxiliary.filter(|word| word.decoded);

    let (attribute, kind, precision) = match class {
        RegisterClass::AnalogInput => (
            ClassAttribute::InputType(attribute_byte),
            ValueKind::from_input_type(attribute_byte),
            auxiliary.map_or(1, |word| word.bytes[0]),
        ),
        RegisterClass::Counter => (
            ClassAttribute::CounterUnit(attribute_byte),
            ValueKind::Counter(CounterUnit::from_code(attribute_byte)),
            0,
        ),
        RegisterClass::Converter => (
            ClassAttribute::Converter {
                converter_type: attribute_byte,
                device_type: auxiliary.map_or(0, |word| word.bytes[3]),
            },
            ValueKind::ConverterSpeed,
            0,
        ),
        RegisterClass::DigitalInput | RegisterClass::DigitalOutput => {
            (ClassAttribute::None, ValueKind::Digital, 0)
        }
        RegisterClass::SpecialProtection => (ClassAttribute::None, ValueKind::Protection, 0),
    };

    let display_name = match class {
        RegisterClass::Converter => {
            labels.resolve(LabelCategory::ConverterType, u32::from(attribute_byte))
        }
        _ => labels.resolve(LabelCategory::Mpl, u32::from(mpl_code)),
    };

    RegisterDescriptor {
        class,
        address,
        mpl_code,
        attribute,
        running_index,
        display_name,
        kind,
        precision,
    }
}

/// 动态发现：每次调用都重新扫描
pub struct DynamicDiscovery {
    session: Session,
    labels: Arc<dyn LabelResolver>,
}

impl DynamicDiscovery {
    pub fn new(session: Session, labels: Arc<dyn LabelResolver>) -> Self {
        Self { session, labels }
    }
}

#[async_trait]
impl DescriptorSource for DynamicDiscovery {
    async fn descriptors(&self, class: RegisterClass) -> Vec<RegisterDescriptor> {
        let layout = ClassLayout::for_class(class);
        let queries = discovery_queries(&layout);
        let words = self.session.exchange(&queries).await;
        let descriptors = descriptors_from_words(&layout, &words, self.labels.as_ref());
        debug!(
            target: "mkv.protocol",
            class = %class,
            queries = queries.len(),
            active = descriptors.len(),
            "discovery finished"
        );
        descriptors
    }
}

/// 静态描述表
#[derive(Debug, Clone, Default)]
pub struct StaticDescriptors {
    by_class: BTreeMap<RegisterClass, Vec<RegisterDescriptor>>,
}

impl StaticDescriptors {
    /// 按类别分组，组内按运行索引排序
    pub fn new(descriptors: Vec<RegisterDescriptor>) -> Self {
        let mut by_class: BTreeMap<RegisterClass, Vec<RegisterDescriptor>> = BTreeMap::new();
        for descriptor in descriptors {
            by_class.entry(descriptor.class).or_default().push(descriptor);
        }
        for list in by_class.values_mut() {
            list.sort_by_key(|descriptor| descriptor.running_index);
        }
        Self { by_class }
    }

    /// 从 JSON 数组加载；运行索引不得为 0
    pub fn from_json(json: &str) -> Result<Self, ProtocolError> {
        let descriptors: Vec<RegisterDescriptor> =
            serde_json::from_str(json).map_err(|e| ProtocolError::ConfigParse(e.to_string()))?;
        if let Some(bad) = descriptors.iter().find(|d| d.running_index == 0) {
            return Err(ProtocolError::ConfigParse(format!(
                "descriptor '{}' has running_index 0",
                bad.display_name
            )));
        }
        Ok(Self::new(descriptors))
    }

    /// 内置模拟量表（索引 0x3002）
    pub fn builtin() -> Self {
        const ANALOG: [(u8, &str, ValueKind); 7] = [
            (0x08, "Controller Temperature", ValueKind::Temperature),
            (0x09, "Compressor Outlet", ValueKind::Pressure),
            (0x0A, "Relative Humidity", ValueKind::Humidity),
            (0x0C, "Vessel Pressure", ValueKind::Pressure),
            (0x0E, "Element Outlet", ValueKind::Temperature),
            (0x0F, "Dryer PDP", ValueKind::Temperature),
            (0x10, "Ambient Air", ValueKind::Temperature),
        ];

        Self::new(
            ANALOG
                .iter()
                .map(|(sub_index, name, kind)| RegisterDescriptor {
                    class: RegisterClass::AnalogInput,
                    address: 0x3002,
                    mpl_code: 0,
                    attribute: ClassAttribute::None,
                    running_index: *sub_index,
                    display_name: (*name).to_string(),
                    kind: *kind,
                    precision: 1,
                })
                .collect(),
        )
    }

    pub fn classes(&self) -> impl Iterator<Item = RegisterClass> + '_ {
        self.by_class.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.by_class.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl DescriptorSource for StaticDescriptors {
    async fn descriptors(&self, class: RegisterClass) -> Vec<RegisterDescriptor> {
        self.by_class.get(&class).cloned().unwrap_or_default()
    }
}
