use serde_json::Value;

use crate::source::RecordSource;

/// In-memory record snapshot.
///
/// Backs the CLI after input loading and every test. Uses the provided trait
/// implementations; there is nothing to push down.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    records: Vec<Value>,
}

impl MemorySource {
    pub fn new(records: Vec<Value>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl RecordSource for MemorySource {
    fn scan(&self) -> Box<dyn Iterator<Item = &Value> + '_> {
        Box::new(self.records.iter())
    }
}
