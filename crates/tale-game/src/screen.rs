//! What a dialogue node looks like on the 1280x720 text canvas.

use crate::story::{Choice, ChoiceSlot, DialogueNode};

const LEFT_MARGIN: f32 = 50.0;

const PROMPT_Y: f32 = 650.0;
const PROMPT_SCALE: f32 = 1.2;

const CHOICE_Y: f32 = 300.0;
const CHOICE_SCALE: f32 = 1.0;
/// Vertical gap between choice lines at scale 1.
const CHOICE_SPACING: f32 = 60.0;

/// What a line of text is on screen; each role has its own color.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum LineRole {
    Prompt,
    Choice,
}

/// One `draw_text` call.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenText {
    pub role: LineRole,
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub scale: f32,
}

/// Prompt first, then each active choice as `"N. label"`.
///
/// Choices keep their slot's position, so a disabled first choice leaves a
/// gap above the second.
pub fn compose(node: &DialogueNode) -> Vec<ScreenText> {
    let mut out = vec![ScreenText {
        role: LineRole::Prompt,
        text: node.text.clone(),
        x: LEFT_MARGIN,
        y: PROMPT_Y,
        scale: PROMPT_SCALE,
    }];

    for slot in ChoiceSlot::ALL {
        if let Choice::Active { label, .. } = node.choice(slot) {
            let row = (slot.number() - 1) as f32;
            out.push(ScreenText {
                role: LineRole::Choice,
                text: format!("{}. {label}", slot.number()),
                x: LEFT_MARGIN,
                y: CHOICE_Y - row * CHOICE_SPACING * CHOICE_SCALE,
                scale: CHOICE_SCALE,
            });
        }
    }

    out
}
