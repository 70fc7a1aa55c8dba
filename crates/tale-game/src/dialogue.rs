use std::collections::HashSet;

use tale_engine::input::Key;

use crate::story::{ChoiceSlot, DialogueNode, Story, StoryError};

/// Player position in a [`Story`].
pub struct Dialogue {
    story: Story,
    current: String,
}

impl Dialogue {
    /// Starts at `start`, which must name a state.
    pub fn new(story: Story, start: &str) -> Result<Self, StoryError> {
        story.node(start)?;
        Ok(Self { story, current: start.to_string() })
    }

    pub fn current(&self) -> &str {
        &self.current
    }

    /// Node for the current state. Fails if a choice led to a state the story
    /// does not define.
    pub fn current_node(&self) -> Result<&DialogueNode, StoryError> {
        self.story.node(&self.current)
    }

    /// Follows `slot` from the current state. Returns `true` when the state
    /// changed, `false` when the choice is disabled.
    pub fn choose(&mut self, slot: ChoiceSlot) -> Result<bool, StoryError> {
        let Some(target) = self.current_node()?.choice(slot).target() else {
            log::debug!("{slot} is disabled in {:?}", self.current);
            return Ok(false);
        };

        let target = target.to_string();
        log::info!("{:?} -> {:?} via {slot}", self.current, target);
        self.current = target;
        Ok(true)
    }

    /// Applies this frame's released keys: `1` then `2`.
    ///
    /// Both keys released in the same frame apply in that order, the second
    /// against the state the first one led to.
    pub fn handle_released(&mut self, released: &HashSet<Key>) -> Result<bool, StoryError> {
        let mut changed = false;
        for slot in ChoiceSlot::ALL {
            if released.contains(&slot_key(slot)) {
                changed |= self.choose(slot)?;
            }
        }
        Ok(changed)
    }
}

fn slot_key(slot: ChoiceSlot) -> Key {
    Key::Digit(slot.number())
}
