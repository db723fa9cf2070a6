use anyhow::ensure;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum IoEvent {
    Quit,
    Other,
}

pub trait EventSource {
    fn poll_event(&mut self) -> Option<IoEvent>;
}

/// Millisecond clock with a blocking delay, as SDL's timer provides.
pub trait FrameClock {
    fn ticks_ms(&mut self) -> u32;
    fn delay_ms(&mut self, ms: u32);
}

/// Caps the frame rate by sleeping out the rest of each frame's budget.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FramePacer {
    budget_ms: u32,
}

impl FramePacer {
    pub fn new(fps: u32) -> anyhow::Result<Self> {
        ensure!(fps > 0, "frame rate must be positive");
        Ok(Self {
            budget_ms: 1000 / fps,
        })
    }

    pub fn budget_ms(&self) -> u32 {
        self.budget_ms
    }

    /// Sleep needed after a frame that took `elapsed_ms`. Slow frames get no
    /// sleep and no catch-up.
    pub fn delay_for(&self, elapsed_ms: u32) -> u32 {
        self.budget_ms.saturating_sub(elapsed_ms)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Stopped,
}

pub struct FrameLoop {
    pacer: FramePacer,
    state: LoopState,
    frames: u64,
}

impl FrameLoop {
    pub fn new(fps: u32) -> anyhow::Result<Self> {
        Ok(Self {
            pacer: FramePacer::new(fps)?,
            state: LoopState::Running,
            frames: 0,
        })
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    /// Number of frames rendered so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn pacer(&self) -> FramePacer {
        self.pacer
    }

    /// One tick: drain input, then render and pace unless a quit arrived.
    pub fn tick<P, F>(&mut self, platform: &mut P, frame: F) -> anyhow::Result<LoopState>
    where
        P: EventSource + FrameClock,
        F: FnOnce(&mut P) -> anyhow::Result<()>,
    {
        if self.state == LoopState::Stopped {
            return Ok(LoopState::Stopped);
        }

        let start = platform.ticks_ms();
        while let Some(event) = platform.poll_event() {
            if event == IoEvent::Quit {
                self.state = LoopState::Stopped;
                break;
            }
        }
        if self.state == LoopState::Stopped {
            log::debug!("quit requested after {} frames", self.frames);
            return Ok(LoopState::Stopped);
        }

        frame(platform)?;
        self.frames += 1;

        let elapsed = platform.ticks_ms().wrapping_sub(start);
        let delay = self.pacer.delay_for(elapsed);
        log::trace!("frame {} took {elapsed} ms, sleeping {delay} ms", self.frames);
        if delay > 0 {
            platform.delay_ms(delay);
        }
        Ok(LoopState::Running)
    }

    /// Ticks until a quit request and returns the number of frames rendered.
    pub fn run<P, F>(&mut self, platform: &mut P, mut frame: F) -> anyhow::Result<u64>
    where
        P: EventSource + FrameClock,
        F: FnMut(&mut P) -> anyhow::Result<()>,
    {
        while self.tick(platform, &mut frame)? == LoopState::Running {}
        Ok(self.frames)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    #[derive(Default)]
    struct FakePlatform {
        events: VecDeque<IoEvent>,
        now: u32,
        sleeps: Vec<u32>,
    }

    impl FakePlatform {
        fn at(now: u32) -> Self {
            Self {
                now,
                ..Default::default()
            }
        }
    }

    impl EventSource for FakePlatform {
        fn poll_event(&mut self) -> Option<IoEvent> {
            self.events.pop_front()
        }
    }

    impl FrameClock for FakePlatform {
        fn ticks_ms(&mut self) -> u32 {
            self.now
        }

        fn delay_ms(&mut self, ms: u32) {
            self.sleeps.push(ms);
            self.now = self.now.wrapping_add(ms);
        }
    }

    fn work(ms: u32) -> impl FnMut(&mut FakePlatform) -> anyhow::Result<()> {
        move |p: &mut FakePlatform| {
            p.now = p.now.wrapping_add(ms);
            Ok(())
        }
    }

    #[test]
    fn sixty_fps_budget() {
        let pacer = FramePacer::new(60).unwrap();
        assert_eq!(pacer.budget_ms(), 16);
        assert_eq!(pacer.delay_for(0), 16);
        assert_eq!(pacer.delay_for(5), 11);
        assert_eq!(pacer.delay_for(16), 0);
        assert_eq!(pacer.delay_for(40), 0);
    }

    #[test]
    fn loop_paces_with_configured_rate() {
        let frame_loop = FrameLoop::new(30).unwrap();
        assert_eq!(frame_loop.pacer().budget_ms(), 33);
        assert_eq!(frame_loop.pacer(), FramePacer::new(30).unwrap());
        assert_eq!(frame_loop.frames(), 0);
        assert!(frame_loop.is_running());
    }

    #[test]
    fn zero_fps_is_rejected() {
        assert!(FramePacer::new(0).is_err());
        assert!(FrameLoop::new(0).is_err());
    }

    #[test]
    fn fast_frame_sleeps_remainder() {
        let mut frame_loop = FrameLoop::new(60).unwrap();
        let mut platform = FakePlatform::at(1_000);

        let state = frame_loop.tick(&mut platform, work(4)).unwrap();
        assert_eq!(state, LoopState::Running);
        assert_eq!(platform.sleeps, vec![12]);
        assert_eq!(platform.now, 1_016);
    }

    #[test]
    fn slow_frame_does_not_sleep_or_catch_up() {
        let mut frame_loop = FrameLoop::new(60).unwrap();
        let mut platform = FakePlatform::default();

        frame_loop.tick(&mut platform, work(30)).unwrap();
        frame_loop.tick(&mut platform, work(3)).unwrap();
        assert_eq!(platform.sleeps, vec![13]);
    }

    #[test]
    fn pacing_survives_tick_counter_wrap() {
        let mut frame_loop = FrameLoop::new(60).unwrap();
        let mut platform = FakePlatform::at(u32::MAX - 5);

        frame_loop.tick(&mut platform, work(10)).unwrap();
        assert_eq!(platform.sleeps, vec![6]);
    }

    #[test]
    fn quit_stops_same_tick_without_frame_or_sleep() {
        let mut frame_loop = FrameLoop::new(60).unwrap();
        let mut platform = FakePlatform::default();
        platform
            .events
            .extend([IoEvent::Other, IoEvent::Quit, IoEvent::Other]);

        let mut rendered = false;
        let state = frame_loop
            .tick(&mut platform, |_| {
                rendered = true;
                Ok(())
            })
            .unwrap();

        assert_eq!(state, LoopState::Stopped);
        assert!(!rendered);
        assert!(platform.sleeps.is_empty());
        assert_eq!(platform.events, VecDeque::from([IoEvent::Other]));
        assert!(!frame_loop.is_running());
    }

    #[test]
    fn other_events_are_drained() {
        let mut frame_loop = FrameLoop::new(60).unwrap();
        let mut platform = FakePlatform::default();
        platform.events.extend([IoEvent::Other, IoEvent::Other]);

        let state = frame_loop.tick(&mut platform, work(1)).unwrap();
        assert_eq!(state, LoopState::Running);
        assert!(platform.events.is_empty());
    }

    #[test]
    fn run_until_quit() {
        let mut frame_loop = FrameLoop::new(60).unwrap();
        let mut platform = FakePlatform::default();

        let mut count = 0;
        let frames = frame_loop
            .run(&mut platform, |p| {
                count += 1;
                if count == 3 {
                    p.events.push_back(IoEvent::Quit);
                }
                Ok(())
            })
            .unwrap();

        assert_eq!(frames, 3);
        assert_eq!(platform.sleeps.len(), 3);
        assert_eq!(frame_loop.state(), LoopState::Stopped);

        // stopped loops stay stopped
        let state = frame_loop.tick(&mut platform, work(1)).unwrap();
        assert_eq!(state, LoopState::Stopped);
        assert_eq!(frame_loop.frames(), 3);
    }

    #[test]
    fn frame_error_propagates() {
        let mut frame_loop = FrameLoop::new(60).unwrap();
        let mut platform = FakePlatform::default();
        let result = frame_loop.run(&mut platform, |_| Err(anyhow::anyhow!("boom")));
        assert!(result.is_err());
        assert!(platform.sleeps.is_empty());
    }
}
