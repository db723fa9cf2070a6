use crate::config::DisplayConfig;
use crate::frame::{EventSource, FrameClock, IoEvent};
use anyhow::{anyhow, Context};
use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::surface::SurfaceRef;

pub struct System {
    pub w: u32,
    pub h: u32,
    pub sdl_context: sdl2::Sdl,
    pub video_subsystem: sdl2::VideoSubsystem,
    pub timer: sdl2::TimerSubsystem,
    pub window: sdl2::video::Window,
    pub event_pump: sdl2::EventPump,
}

impl System {
    pub fn new(config: &DisplayConfig) -> anyhow::Result<System> {
        let sdl_context = sdl2::init().map_err(|e| anyhow!("SDL initialization failure: {e}"))?;
        let video_subsystem = sdl_context
            .video()
            .map_err(|e| anyhow!("SDL video subsystem failure: {e}"))?;
        let timer = sdl_context
            .timer()
            .map_err(|e| anyhow!("SDL timer subsystem failure: {e}"))?;

        let window = video_subsystem
            .window(&config.title, config.width, config.height)
            .position_centered()
            .build()
            .context("Error while building window")?;

        let event_pump = sdl_context
            .event_pump()
            .map_err(|e| anyhow!("SDL event pump failure: {e}"))?;

        log::info!(
            "opened {} x {} window \"{}\"",
            config.width,
            config.height,
            config.title
        );

        Ok(System {
            w: config.width,
            h: config.height,
            sdl_context,
            video_subsystem,
            timer,
            window,
            event_pump,
        })
    }

    /// Hands the window surface to `draw`, then pushes it to the screen.
    pub fn present<F>(&mut self, draw: F) -> anyhow::Result<()>
    where
        F: FnOnce(&mut SurfaceRef) -> anyhow::Result<()>,
    {
        let mut surface = self
            .window
            .surface(&self.event_pump)
            .map_err(|e| anyhow!("window surface unavailable: {e}"))?;
        draw(&mut *surface)?;
        surface
            .update_window()
            .map_err(|e| anyhow!("window surface update failure: {e}"))
    }
}

impl EventSource for System {
    fn poll_event(&mut self) -> Option<IoEvent> {
        self.event_pump.poll_event().map(|event| io_event(&event))
    }
}

/// Window close and Escape both ask the loop to quit.
fn io_event(event: &Event) -> IoEvent {
    match event {
        Event::Quit { .. }
        | Event::KeyDown {
            keycode: Some(Keycode::Escape),
            ..
        } => IoEvent::Quit,
        _ => IoEvent::Other,
    }
}

impl FrameClock for System {
    fn ticks_ms(&mut self) -> u32 {
        self.timer.ticks()
    }

    fn delay_ms(&mut self, ms: u32) {
        self.timer.delay(ms);
    }
}

impl Drop for System {
    fn drop(&mut self) {
        log::info!("closing window and shutting down SDL");
    }
}
