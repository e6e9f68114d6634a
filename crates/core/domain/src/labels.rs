/// 标签表分类。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LabelCategory {
    /// 寄存器名称（MPL 代码）
    Mpl,
    MachineState,
    ConverterType,
    DigitalState,
    PressureSetting,
    SensorError,
    HourUnit,
    /// 报告分节标题
    SectionTitle,
}

impl LabelCategory {
    /// 未映射代码的兜底标签。
    pub fn fallback(&self, code: u32) -> String {
        match self {
            LabelCategory::Mpl => format!("MPL {}", code),
            LabelCategory::MachineState => format!("State {}", code),
            _ => code.to_string(),
        }
    }
}

/// 标签解析服务：进程启动时构造，运行期只读。
pub trait LabelResolver: Send + Sync {
    fn lookup(&self, category: LabelCategory, code: u32) -> Option<&str>;

    fn resolve(&self, category: LabelCategory, code: u32) -> String {
        match self.lookup(category, code) {
            Some(label) => label.to_string(),
            None => category.fallback(code),
        }
    }
}
