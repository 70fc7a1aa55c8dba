mod app;
mod config;
mod dialogue;
mod screen;
mod story;

use std::path::PathBuf;

use anyhow::{Context, Result};
use winit::dpi::LogicalSize;

use tale_engine::coords::ColorRgba;
use tale_engine::device::GpuInit;
use tale_engine::logging::{init_logging, LoggingConfig};
use tale_engine::text::{find_font_file, FontService, TextDrawer, TextStyle, FALLBACK_FONTS};
use tale_engine::window::{Runtime, RuntimeConfig};

use app::{GameApp, Palette};
use config::GameConfig;
use dialogue::Dialogue;
use story::Story;

fn main() -> Result<()> {
    let config_path = GameConfig::resolve_path(std::env::args_os().nth(1).map(PathBuf::from));
    let config = match &config_path {
        Some(path) => GameConfig::from_file(path)?,
        None => GameConfig::default(),
    };

    init_logging(LoggingConfig {
        env_filter: config.log.filter.clone(),
        ..LoggingConfig::default()
    });

    match &config_path {
        Some(path) => log::info!("config: loaded from {}", path.display()),
        None => log::info!("config: using defaults"),
    }

    let font_path = find_font_file(&config.font.path, FALLBACK_FONTS).with_context(|| {
        format!(
            "font {} not found and no system fallback is installed",
            config.font.path.display()
        )
    })?;
    if font_path != config.font.path {
        log::warn!(
            "font {} not found; falling back to {}",
            config.font.path.display(),
            font_path.display()
        );
    }
    let font = FontService::from_file(&font_path, config.font.size)
        .context("failed to initialize the typeface")?;

    let palette = Palette {
        background: rgb(config.colors.background),
        prompt: rgb8(config.colors.text),
        choice: rgb8(config.colors.choice),
    };
    let style = TextStyle {
        color: palette.prompt,
        ..TextStyle::default()
    };
    let text = TextDrawer::new(font, style).context("failed to initialize the text shaper")?;

    let story = Story::load(&config.story.path)?;
    for dangling in story.dangling_targets() {
        log::warn!("{dangling}");
    }
    if config.story.strict {
        story.validate().context("story has undefined targets")?;
    }

    let dialogue = Dialogue::new(story, &config.story.start)
        .with_context(|| format!("invalid start state {:?}", config.story.start))?;

    let app = GameApp::new(text, dialogue, palette);

    Runtime::run(
        RuntimeConfig {
            title: config.window.title.clone(),
            initial_size: LogicalSize::new(config.window.width as f64, config.window.height as f64),
        },
        // Colors are written to the framebuffer as-is.
        GpuInit { prefer_srgb: false, ..GpuInit::default() },
        app,
    )
}

fn rgb([r, g, b]: [f32; 3]) -> ColorRgba {
    ColorRgba::new(r, g, b, 1.0)
}

fn rgb8([r, g, b]: [u8; 3]) -> ColorRgba {
    ColorRgba::from_rgb8(r, g, b)
}
