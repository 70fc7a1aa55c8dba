//! Dialogue graph loaded from the JSON story file.
//!
//! ```json
//! { "start": { "text": "Hello", "choice1": ["go", "mid"], "choice2": ["none", ""] } }
//! ```
//!
//! A label of `"none"` disables the choice; its target is then ignored.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Label the story format uses for a disabled choice.
const DISABLED_LABEL: &str = "none";

#[derive(Debug, Error)]
pub enum StoryError {
    #[error("failed to read story file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed story data")]
    Parse(#[from] serde_json::Error),

    #[error("no dialogue state named {0:?}")]
    MissingState(String),

    #[error("state {state:?}: {slot} is active but its target is not a state name")]
    InvalidChoice { state: String, slot: ChoiceSlot },

    #[error("state {state:?}: {slot} leads to unknown state {target:?}")]
    DanglingTarget {
        state: String,
        slot: ChoiceSlot,
        target: String,
    },
}

/// Which of the two choices of a node.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ChoiceSlot {
    First,
    Second,
}

impl ChoiceSlot {
    pub const ALL: [ChoiceSlot; 2] = [ChoiceSlot::First, ChoiceSlot::Second];

    /// 1-based number shown to the player and bound to the matching key.
    pub fn number(self) -> u8 {
        match self {
            ChoiceSlot::First => 1,
            ChoiceSlot::Second => 2,
        }
    }

    fn index(self) -> usize {
        self.number() as usize - 1
    }
}

impl fmt::Display for ChoiceSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "choice{}", self.number())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choice {
    Disabled,
    Active { label: String, target: String },
}

impl Choice {
    pub fn target(&self) -> Option<&str> {
        match self {
            Choice::Active { target, .. } => Some(target),
            Choice::Disabled => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogueNode {
    pub text: String,
    pub choices: [Choice; 2],
}

impl DialogueNode {
    pub fn choice(&self, slot: ChoiceSlot) -> &Choice {
        &self.choices[slot.index()]
    }
}

// ── wire format ───────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct RawNode {
    text: String,
    choice1: RawChoice,
    choice2: RawChoice,
}

/// `[label, target]`. The target is only meaningful when the label is not
/// `"none"`, so any JSON value is accepted there.
#[derive(Deserialize)]
struct RawChoice(String, serde_json::Value);

impl RawChoice {
    fn into_choice(self, state: &str, slot: ChoiceSlot) -> Result<Choice, StoryError> {
        let RawChoice(label, target) = self;
        if label == DISABLED_LABEL {
            return Ok(Choice::Disabled);
        }
        match target {
            serde_json::Value::String(target) => Ok(Choice::Active { label, target }),
            _ => Err(StoryError::InvalidChoice { state: state.to_string(), slot }),
        }
    }
}

// ── story ─────────────────────────────────────────────────────────────────

/// Immutable dialogue graph keyed by state name.
#[derive(Debug, Clone, Default)]
pub struct Story {
    nodes: HashMap<String, DialogueNode>,
}

impl Story {
    /// Reads and parses the story file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StoryError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| StoryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let story = Self::from_json(&json)?;
        log::info!("loaded story {} ({} states)", path.display(), story.len());
        Ok(story)
    }

    pub fn from_json(json: &str) -> Result<Self, StoryError> {
        let raw: HashMap<String, RawNode> = serde_json::from_str(json)?;

        let nodes = raw
            .into_iter()
            .map(|(key, node)| {
                let choices = [
                    node.choice1.into_choice(&key, ChoiceSlot::First)?,
                    node.choice2.into_choice(&key, ChoiceSlot::Second)?,
                ];
                Ok((key, DialogueNode { text: node.text, choices }))
            })
            .collect::<Result<_, StoryError>>()?;

        Ok(Self { nodes })
    }

    pub fn node(&self, key: &str) -> Result<&DialogueNode, StoryError> {
        self.nodes
            .get(key)
            .ok_or_else(|| StoryError::MissingState(key.to_string()))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.nodes.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Every active choice whose target is not a state, as `DanglingTarget`
    /// errors sorted by state name.
    pub fn dangling_targets(&self) -> Vec<StoryError> {
        let mut found: Vec<(&str, ChoiceSlot, &str)> = Vec::new();
        for (state, node) in &self.nodes {
            for slot in ChoiceSlot::ALL {
                if let Some(target) = node.choice(slot).target() {
                    if !self.contains(target) {
                        found.push((state.as_str(), slot, target));
                    }
                }
            }
        }
        found.sort_by_key(|&(state, slot, _)| (state, slot.number()));

        found
            .into_iter()
            .map(|(state, slot, target)| StoryError::DanglingTarget {
                state: state.to_string(),
                slot,
                target: target.to_string(),
            })
            .collect()
    }

    /// Fails on the first dangling target.
    pub fn validate(&self) -> Result<(), StoryError> {
        match self.dangling_targets().into_iter().next() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}
