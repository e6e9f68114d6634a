//! 取值：按描述表构造一次批量查询，并把响应块逐一对应回描述

use crate::transport::Session;
use crate::types::ClassLayout;
use crate::word::DecodedWord;
use domain::{RegisterClass, RegisterDescriptor, RegisterQuery, ValueRecord};
use tracing::debug;

/// 构造取值查询；有共享读数时位于第 0 个，伴随查询紧跟各自的取值查询
pub fn value_queries(
    layout: &ClassLayout,
    descriptors: &[RegisterDescriptor],
) -> Vec<RegisterQuery> {
    let mut queries = Vec::with_capacity(descriptors.len() * layout.value_stride() + 1);
    if let Some(shared) = layout.shared {
        queries.push(shared);
    }
    for descriptor in descriptors {
        queries.push(layout.value.query(descriptor.running_index));
        if let Some(companion) = layout.companion_query(descriptor.running_index) {
            queries.push(companion);
        }
    }
    queries
}

/// 按位置把响应块与描述对应，生成取值记录
pub fn correlate(
    layout: &ClassLayout,
    descriptors: &[RegisterDescriptor],
    words: &[DecodedWord],
) -> Vec<ValueRecord> {
    let offset = usize::from(layout.shared.is_some());
    let stride = layout.value_stride();
    let shared_word = layout.shared.and_then(|_| {
        words
            .first()
            .filter(|word| word.decoded)
            .map(DecodedWord::half_words)
    });

    descriptors
        .iter()
        .enumerate()
        .map(|(i, descriptor)| {
            let slot = offset + i * stride;
            let word = words
                .get(slot)
                .copied()
                .unwrap_or_else(DecodedWord::invalid);
            let mut record = if word.decoded {
                ValueRecord::new(
                    descriptor.clone(),
                    raw_value(layout.class, &word),
                    status_word(layout.class, &word),
                )
            } else {
                ValueRecord::undecoded(descriptor.clone())
            };
            record.shared_word = shared_word;
            if record.decoded && stride == 2 {
                record.companion_raw = words
                    .get(slot + 1)
                    .filter(|word| word.decoded)
                    .map(|word| i64::from(word.word1));
            }
            record
        })
        .collect()
}

fn raw_value(class: RegisterClass, word: &DecodedWord) -> i64 {
    match class {
        RegisterClass::AnalogInput => i64::from(word.int_word1),
        RegisterClass::Counter => i64::from(word.uint32),
        RegisterClass::DigitalInput
        | RegisterClass::DigitalOutput
        | RegisterClass::Converter
        | RegisterClass::SpecialProtection => i64::from(word.word1),
    }
}

fn status_word(class: RegisterClass, word: &DecodedWord) -> u16 {
    match class {
        RegisterClass::Counter => 0,
        _ => word.word0,
    }
}

/// 取值引擎
#[derive(Clone)]
pub struct ValueFetcher {
    session: Session,
}

impl ValueFetcher {
    pub fn new(session: Session) -> Self {
        Self { session }
    }

    /// 空描述表直接返回，不发起传输
    pub async fn fetch(
        &self,
        class: RegisterClass,
        descriptors: &[RegisterDescriptor],
    ) -> Vec<ValueRecord> {
        if descriptors.is_empty() {
            return Vec::new();
        }

        let layout = ClassLayout::for_class(class);
        let queries = value_queries(&layout, descriptors);
        let words = self.session.exchange(&queries).await;
        let records = correlate(&layout, descriptors, &words);
        debug!(
            target: "mkv.protocol",
            class = %class,
            queries = queries.len(),
            decoded = records.iter().filter(|r| r.decoded).count(),
            "values fetched"
        );
        records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::{ClassAttribute, HalfWords, ValueKind};

    fn descriptor(class: RegisterClass, running_index: u8) -> RegisterDescriptor {
        RegisterDescriptor {
            class,
            address: 0,
            mpl_code: 0,
            attribute: ClassAttribute::None,
            running_index,
            display_name: format!("r{}", running_index),
            kind: ValueKind::Raw,
            precision: 1,
        }
    }

    #[test]
    fn test_value_queries_shared_first() {
        let layout = ClassLayout::for_class(RegisterClass::Converter);
        let descriptors = [
            descriptor(RegisterClass::Converter, 1),
            descriptor(RegisterClass::Converter, 2),
        ];
        let queries = value_queries(&layout, &descriptors);
        assert_eq!(
            queries,
            vec![
                RegisterQuery::new(0x3021, 5),
                RegisterQuery::new(0x3021, 1),
                RegisterQuery::new(0x3021, 10),
                RegisterQuery::new(0x3022, 1),
                RegisterQuery::new(0x3022, 10),
            ]
        );
    }

    #[test]
    fn test_correlate_counter_uses_uint32() {
        let layout = ClassLayout::for_class(RegisterClass::Counter);
        let descriptors = [descriptor(RegisterClass::Counter, 1)];
        let words = [DecodedWord::decode("00010000")];
        let records = correlate(&layout, &descriptors, &words);
        assert_eq!(records[0].raw_value, 65_536);
        assert_eq!(records[0].status_word, 0);
        assert_eq!(records[0].shared_word, None);
        assert_eq!(records[0].companion_raw, None);
    }

    #[test]
    fn test_correlate_missing_companion_keeps_value() {
        let layout = ClassLayout::for_class(RegisterClass::Converter);
        let descriptors = [descriptor(RegisterClass::Converter, 1)];
        let words = [
            DecodedWord::invalid(),
            DecodedWord::decode("00000BB8"),
            DecodedWord::decode("XXXXXXXX"),
        ];
        let records = correlate(&layout, &descriptors, &words);
        assert!(records[0].decoded);
        assert_eq!(records[0].raw_value, 3000);
        assert_eq!(records[0].companion_raw, None);
        assert_eq!(records[0].shared_word, None);
    }

    #[test]
    fn test_correlate_marks_missing_blocks() {
        let layout = ClassLayout::for_class(RegisterClass::Converter);
        let descriptors = [
            descriptor(RegisterClass::Converter, 1),
            descriptor(RegisterClass::Converter, 2),
        ];
        let words = [
            DecodedWord::decode("00320000"),
            DecodedWord::decode("000005DC"),
            DecodedWord::decode("0000002A"),
        ];
        let records = correlate(&layout, &descriptors, &words);
        assert!(records[0].decoded);
        assert_eq!(records[0].raw_value, 1500);
        assert_eq!(records[0].companion_raw, Some(42));
        assert!(!records[1].decoded);
        assert_eq!(records[1].companion_raw, None);
        assert_eq!(records[1].shared_word, Some(HalfWords { high: 50, low: 0 }));
    }
}
