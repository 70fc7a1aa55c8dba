use tale_engine::coords::ColorRgba;
use tale_engine::core::{App, AppControl, FrameCtx};
use tale_engine::input::Key;
use tale_engine::render::GlyphQuadRenderer;
use tale_engine::text::TextDrawer;

use crate::dialogue::Dialogue;
use crate::screen::{self, LineRole};

/// Clear color plus one text color per line role.
#[derive(Debug, Copy, Clone)]
pub struct Palette {
    pub background: ColorRgba,
    pub prompt: ColorRgba,
    pub choice: ColorRgba,
}

impl Palette {
    fn line(&self, role: LineRole) -> ColorRgba {
        match role {
            LineRole::Prompt => self.prompt,
            LineRole::Choice => self.choice,
        }
    }
}

/// The game: one dialogue screen per frame, advanced by the `1` / `2` keys.
pub struct GameApp {
    text: TextDrawer,
    renderer: GlyphQuadRenderer,
    dialogue: Dialogue,
    palette: Palette,
}

impl GameApp {
    pub fn new(text: TextDrawer, dialogue: Dialogue, palette: Palette) -> Self {
        Self {
            text,
            renderer: GlyphQuadRenderer::new(),
            dialogue,
            palette,
        }
    }

    fn quit(&self, reason: &str) -> AppControl {
        log::info!(
            "{reason}; exiting in state {:?} with {} glyphs cached",
            self.dialogue.current(),
            self.text.cache().len()
        );
        AppControl::Exit
    }
}

impl App for GameApp {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        if ctx.input.released(Key::Escape) {
            return self.quit("escape released");
        }

        if let Err(e) = self.dialogue.handle_released(&ctx.input.keys_released) {
            log::error!("cannot follow choice: {e}");
            return AppControl::Exit;
        }

        let lines = match self.dialogue.current_node() {
            Ok(node) => screen::compose(node),
            Err(e) => {
                log::error!("cannot show dialogue: {e}");
                return AppControl::Exit;
            }
        };

        let palette = self.palette;
        let (text, renderer) = (&mut self.text, &mut self.renderer);
        ctx.render(palette.background, |rctx, target| {
            let mut pass = renderer.pass(rctx);
            for line in &lines {
                text.set_color(palette.line(line.role));
                text.draw_text(&mut pass, &line.text, line.x, line.y, line.scale);
            }
            pass.finish(target);
        })
    }

    fn on_close_requested(&mut self) -> AppControl {
        self.quit("window closed")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_picks_color_by_role() {
        let palette = Palette {
            background: ColorRgba::new(0.0, 0.0, 0.0, 1.0),
            prompt: ColorRgba::new(1.0, 0.0, 0.0, 1.0),
            choice: ColorRgba::new(0.0, 1.0, 0.0, 1.0),
        };
        assert_eq!(palette.line(LineRole::Prompt), palette.prompt);
        assert_eq!(palette.line(LineRole::Choice), palette.choice);
    }
}
