//! Data model shared by the sequencer and its runners.
//!
//! All records (de)serialize to the JSON shapes callers already use:
//! `{"id": "i1", "name": "John Doo", ...}` for entities,
//! `{"role": "r1", "cmd": "c1", ...}` for actions and
//! `{"actions": [...]}` for then-arguments. Unknown keys are kept in a
//! flattened map so they survive a round trip.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ──────────────────────────────────────────────
// Entity
// ──────────────────────────────────────────────

/// The subject a then-block's actions apply to.
///
/// The sequencer only ever borrows an entity; it never mutates one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: String,
    /// Empty when the entity carries no name.
    #[serde(default)]
    pub name: String,
    /// Any additional fields carried by the entity.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Entity {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Entity {
            id: id.into(),
            name: name.into(),
            fields: Map::new(),
        }
    }

    /// Look up an additional field by key.
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }
}

// ──────────────────────────────────────────────
// ActionDescriptor
// ──────────────────────────────────────────────

/// One unit of work: a role and the command to send to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionDescriptor {
    pub role: String,
    pub cmd: String,
    /// Extra action arguments, passed to the runner untouched.
    #[serde(flatten)]
    pub args: Map<String, Value>,
}

impl ActionDescriptor {
    pub fn new(role: impl Into<String>, cmd: impl Into<String>) -> Self {
        ActionDescriptor {
            role: role.into(),
            cmd: cmd.into(),
            args: Map::new(),
        }
    }

    /// Attach an extra argument.
    pub fn with_arg(mut self, key: impl Into<String>, value: Value) -> Self {
        self.args.insert(key.into(), value);
        self
    }
}

// ──────────────────────────────────────────────
// ThenArguments
// ──────────────────────────────────────────────

/// Container for the ordered actions of one then-block.
///
/// `actions` may be absent (`null` or a missing key) as well as empty;
/// both mean "nothing to run".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThenArguments {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actions: Option<Vec<ActionDescriptor>>,
}

impl ThenArguments {
    pub fn new(actions: Vec<ActionDescriptor>) -> Self {
        ThenArguments {
            actions: Some(actions),
        }
    }

    /// The actions to run, or an empty slice when there are none.
    pub fn actions(&self) -> &[ActionDescriptor] {
        self.actions.as_deref().unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.actions().is_empty()
    }
}

// ──────────────────────────────────────────────
// ActionOutcome
// ──────────────────────────────────────────────

/// Result of running one action.
///
/// Only `success` and `name` are known to the sequencer; anything else the
/// runner reports rides along in `fields`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionOutcome {
    pub success: bool,
    pub name: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl ActionOutcome {
    pub fn new(success: bool, name: impl Into<String>) -> Self {
        ActionOutcome {
            success,
            name: name.into(),
            fields: Map::new(),
        }
    }

    pub fn succeeded(name: impl Into<String>) -> Self {
        Self::new(true, name)
    }
}
