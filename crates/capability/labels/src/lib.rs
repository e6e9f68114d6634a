//! 控制器代码到显示名称的静态标签表。
//!
//! 内置英文表；可用 JSON 覆盖 MPL 名称与机器状态名称：
//!
//! ```json
//! { "mpl": { "509": "Outlet Pressure" }, "machine_state": { "28": "Loaded" } }
//! ```

mod english;

use domain::{LabelCategory, LabelResolver};
use serde::Deserialize;
use std::collections::HashMap;

/// 标签表加载错误。
#[derive(Debug, thiserror::Error)]
pub enum LabelError {
    #[error("label override parse error: {0}")]
    Parse(String),
    #[error("invalid code {code:?} in {category}")]
    InvalidCode { category: &'static str, code: String },
}

#[derive(Debug, Default, Deserialize)]
struct LabelOverrides {
    #[serde(default)]
    mpl: HashMap<String, String>,
    #[serde(default)]
    machine_state: HashMap<String, String>,
}

/// 内存标签表，构造后只读。
#[derive(Debug, Clone, Default)]
pub struct LabelTable {
    entries: HashMap<LabelCategory, HashMap<u32, String>>,
}

impl LabelTable {
    /// 空表：所有代码走兜底标签。
    pub fn empty() -> Self {
        Self::default()
    }

    /// 内置英文表。
    pub fn english() -> Self {
        let mut table = Self::empty();
        table.extend(LabelCategory::Mpl, english::MPL);
        table.extend(LabelCategory::MachineState, english::MACHINE_STATE);
        table.extend(LabelCategory::ConverterType, english::CONVERTER_TYPE);
        table.extend(LabelCategory::DigitalState, english::DIGITAL_STATE);
        table.extend(LabelCategory::PressureSetting, english::PRESSURE_SETTING);
        table.extend(LabelCategory::SensorError, english::SENSOR_ERROR);
        table.extend(LabelCategory::HourUnit, english::HOUR_UNIT);
        table.extend(LabelCategory::SectionTitle, english::SECTION_TITLE);
        table
    }

    /// 英文表叠加 JSON 覆盖项。
    pub fn english_with_overrides(json: &str) -> Result<Self, LabelError> {
        let overrides: LabelOverrides =
            serde_json::from_str(json).map_err(|e| LabelError::Parse(e.to_string()))?;
        let mut table = Self::english();
        table.apply(LabelCategory::Mpl, "mpl", overrides.mpl)?;
        table.apply(
            LabelCategory::MachineState,
            "machine_state",
            overrides.machine_state,
        )?;
        Ok(table)
    }

    /// 插入或替换单条标签。
    pub fn insert(&mut self, category: LabelCategory, code: u32, label: impl Into<String>) {
        self.entries
            .entry(category)
            .or_default()
            .insert(code, label.into());
    }

    fn extend(&mut self, category: LabelCategory, items: &[(u32, &str)]) {
        for (code, label) in items {
            self.insert(category, *code, *label);
        }
    }

    fn apply(
        &mut self,
        category: LabelCategory,
        name: &'static str,
        items: HashMap<String, String>,
    ) -> Result<(), LabelError> {
        for (code, label) in items {
            let parsed = code.trim().parse::<u32>().map_err(|_| LabelError::InvalidCode {
                category: name,
                code: code.clone(),
            })?;
            self.insert(category, parsed, label);
        }
        Ok(())
    }
}

impl LabelResolver for LabelTable {
    fn lookup(&self, category: LabelCategory, code: u32) -> Option<&str> {
        self.entries
            .get(&category)
            .and_then(|items| items.get(&code))
            .map(String::as_str)
    }
}
