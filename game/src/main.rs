use anyhow::Context;
use backend::config::DisplayConfig;
use backend::frame::FrameLoop;
use backend::group::SpriteGroup;
use backend::sprite::Sprite;
use backend::system::System;
use sdl2::pixels::Color;

const WHITE: Color = Color::RGB(255, 255, 255);
const RED: Color = Color::RGB(255, 0, 0);
const BLUE: Color = Color::RGB(0, 0, 255);

fn main() -> anyhow::Result<()> {
    if let Err(e) =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
            .try_init()
    {
        eprintln!("logger already initialised: {e}");
    }

    let config = DisplayConfig::default();
    let mut system = System::new(&config).context("Game initialization failure")?;

    let (cx, cy) = config.center();
    let object = Sprite::new(RED, cx, cy, Sprite::DEFAULT_SIZE)?.into_ref();
    let another_object = Sprite::new(BLUE, cx - 100, cy + 20, Sprite::DEFAULT_SIZE)?.into_ref();

    let mut block = Sprite::block(RED, cx, cy, Sprite::DEFAULT_SIZE)?;
    if let Err(e) = block.set_image(&config.sprite_path) {
        log::warn!("{e:#}, keeping the solid block");
    }

    let mut active_sprites = SpriteGroup::new();
    active_sprites.add(object);
    active_sprites.add(another_object);

    let mut frame_loop = FrameLoop::new(config.fps)?;
    let frames = frame_loop.run(&mut system, |system| {
        active_sprites.update();
        system.present(|screen| {
            screen
                .fill_rect(None, WHITE)
                .map_err(|e| anyhow::anyhow!("clearing screen failure: {e}"))?;
            active_sprites.draw(screen)?;
            block.draw(screen)
        })
    })?;
    log::info!("window closed after {frames} frames");
    Ok(())
}
