//! The script store: an ordered, immutable conversation script.

use greenroom_core::error::DomainError;
use serde::{Deserialize, Serialize};

use crate::message::ScriptedMessage;

/// An immutable, ordered sequence of scripted messages.
///
/// The sequence index defines strict delivery order; a script is never
/// reordered or mutated after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Script {
    messages: Vec<ScriptedMessage>,
}

impl Script {
    /// Creates a script from messages in authored order.
    #[must_use]
    pub fn new(messages: Vec<ScriptedMessage>) -> Self {
        Self { messages }
    }

    /// Parses a script from a JSON array of message definitions.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::MalformedScript` if the payload does not
    /// deserialize into a message sequence.
    pub fn from_json(payload: &str) -> Result<Self, DomainError> {
        serde_json::from_str(payload).map_err(|e| DomainError::MalformedScript(e.to_string()))
    }

    /// Returns the number of scripted messages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Returns true when the script has no messages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Returns the message at `index`, if it exists.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&ScriptedMessage> {
        self.messages.get(index)
    }

    /// Iterates the messages in delivery order.
    pub fn iter(&self) -> std::slice::Iter<'_, ScriptedMessage> {
        self.messages.iter()
    }
}

impl<'a> IntoIterator for &'a Script {
    type Item = &'a ScriptedMessage;
    type IntoIter = std::slice::Iter<'a, ScriptedMessage>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.iter()
    }
}
