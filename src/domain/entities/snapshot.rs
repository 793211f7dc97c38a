//! Snapshot entity - serialized IR state pushed to hot-reload clients

use serde::Serialize;

use crate::domain::value_objects::{ContentHash, Target};

/// Wire form:
/// `{"sequence":3,"target":"ios","component":"Root","state":{...}}`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    sequence: u64,
    target: Target,
    component: String,
    state: serde_json::Value,
    #[serde(skip)]
    hash: ContentHash,
}

impl Snapshot {
    /// Unsequenced snapshot; the server assigns the sequence on publish.
    pub fn new(target: Target, component: impl Into<String>, state: serde_json::Value) -> Self {
        let component = component.into();
        let hash = ContentHash::from_content(&format!("{}:{}", component, state));
        Self {
            sequence: 0,
            target,
            component,
            state,
            hash,
        }
    }

    pub fn with_sequence(mut self, sequence: u64) -> Self {
        self.sequence = sequence;
        self
    }

    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub fn target(&self) -> Target {
        self.target
    }

    pub fn component(&self) -> &str {
        &self.component
    }

    pub fn state(&self) -> &serde_json::Value {
        &self.state
    }

    /// Hash of component and state, independent of the sequence
    pub fn hash(&self) -> &ContentHash {
        &self.hash
    }

    /// Single-line JSON, as sent over the wire
    pub fn to_wire(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Indented state JSON, for diff summaries
    pub fn pretty_state(&self) -> String {
        serde_json::to_string_pretty(&self.state).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn wire_format() {
        let snapshot = Snapshot::new(Target::Ios, "Root", json!({"spacing": 8})).with_sequence(3);
        assert_eq!(
            snapshot.to_wire().unwrap(),
            r#"{"sequence":3,"target":"ios","component":"Root","state":{"spacing":8}}"#
        );
    }

    #[test]
    fn hash_ignores_sequence() {
        let a = Snapshot::new(Target::Web, "Root", json!({"a": 1}));
        let b = a.clone().with_sequence(9);
        assert_eq!(a.hash(), b.hash());
        let c = Snapshot::new(Target::Web, "Root", json!({"a": 2}));
        assert_ne!(a.hash(), c.hash());
    }
}
