use anyhow::{anyhow, ensure};
use sdl2::pixels::{Color, PixelFormatEnum};
use sdl2::rect::{Point, Rect};
use sdl2::surface::{Surface, SurfaceRef};
use std::cell::RefCell;
use std::fmt;
use std::path::Path;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_SPRITE_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a sprite, independent of its position and of the surface it owns.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpriteId(u64);

impl SpriteId {
    fn next() -> Self {
        SpriteId(NEXT_SPRITE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// How a sprite's (x, y) maps onto its rectangle.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Anchor {
    /// (x, y) is the centre of the sprite.
    #[default]
    Centered,
    /// (x, y) is the top-left corner of the sprite.
    TopLeft,
}

impl Anchor {
    pub fn origin(self, w: u32, h: u32) -> Point {
        match self {
            Anchor::Centered => Point::new((w / 2) as i32, (h / 2) as i32),
            Anchor::TopLeft => Point::new(0, 0),
        }
    }
}

/// Shared handle used by sprite groups.
pub type SpriteRef = Rc<RefCell<Sprite>>;

pub struct Sprite {
    id: SpriteId,
    visual: Surface<'static>,
    rect: Rect,
    anchor: Anchor,
}

impl Sprite {
    pub const DEFAULT_SIZE: (u32, u32) = (48, 64);

    /// Solid sprite centred at (x, y).
    pub fn new(color: Color, x: i32, y: i32, size: (u32, u32)) -> anyhow::Result<Sprite> {
        Self::with_anchor(color, x, y, size, Anchor::Centered)
    }

    /// Solid sprite whose top-left corner sits at (x, y).
    pub fn block(color: Color, x: i32, y: i32, size: (u32, u32)) -> anyhow::Result<Sprite> {
        Self::with_anchor(color, x, y, size, Anchor::TopLeft)
    }

    pub fn with_anchor(
        color: Color,
        x: i32,
        y: i32,
        size: (u32, u32),
        anchor: Anchor,
    ) -> anyhow::Result<Sprite> {
        let (w, h) = size;
        ensure!(w > 0 && h > 0, "sprite size must be non-zero, got {w} x {h}");

        let mut visual = Surface::new(w, h, PixelFormatEnum::RGB888)
            .map_err(|e| anyhow!("creating {w} x {h} sprite surface failure: {e}"))?;
        visual
            .fill_rect(None, color)
            .map_err(|e| anyhow!("filling sprite surface failure: {e}"))?;

        let mut sprite = Sprite {
            id: SpriteId::next(),
            visual,
            rect: Rect::new(0, 0, w, h),
            anchor,
        };
        sprite.set_position(x, y);
        log::debug!("created sprite {:?} at {:?} ({anchor:?})", sprite.id, sprite.rect);
        Ok(sprite)
    }

    pub fn into_ref(self) -> SpriteRef {
        Rc::new(RefCell::new(self))
    }

    pub fn id(&self) -> SpriteId {
        self.id
    }

    pub fn anchor(&self) -> Anchor {
        self.anchor
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn size(&self) -> (u32, u32) {
        (self.rect.width(), self.rect.height())
    }

    pub fn origin(&self) -> Point {
        self.anchor.origin(self.rect.width(), self.rect.height())
    }

    /// Anchored position, i.e. the (x, y) the sprite was placed at.
    pub fn position(&self) -> Point {
        let origin = self.origin();
        Point::new(
            self.rect.x().saturating_add(origin.x()),
            self.rect.y().saturating_add(origin.y()),
        )
    }

    /// Places the sprite by its anchor. The rectangle corner is clamped to
    /// the range `Rect` accepts (about `i32::MIN / 2..=i32::MAX / 2`), so
    /// coordinates far outside that range stop moving the sprite.
    pub fn set_position(&mut self, x: i32, y: i32) {
        let origin = self.origin();
        self.rect.set_x(x.saturating_sub(origin.x()));
        self.rect.set_y(y.saturating_sub(origin.y()));
    }

    /// Replaces the visual with a bitmap loaded from `filename`.
    ///
    /// The top-left corner stays where it is and the rectangle takes the
    /// bitmap's size. On failure the sprite is left untouched.
    pub fn set_image<P: AsRef<Path>>(&mut self, filename: P) -> anyhow::Result<()> {
        let path = filename.as_ref();
        let loaded = Surface::load_bmp(path)
            .map_err(|e| anyhow!("loading bitmap {path:?} failure: {e}"))?;

        self.rect = Rect::new(self.rect.x(), self.rect.y(), loaded.width(), loaded.height());
        self.visual = loaded;
        log::debug!("sprite {:?} now shows {path:?} at {:?}", self.id, self.rect);
        Ok(())
    }

    pub fn update(&mut self) {}

    /// Blits the visual onto `destination`; the destination clips.
    pub fn draw(&self, destination: &mut SurfaceRef) -> anyhow::Result<()> {
        self.visual
            .blit(None, destination, self.rect)
            .map_err(|e| anyhow!("blitting sprite {:?} failure: {e}", self.id))?;
        Ok(())
    }
}

impl PartialEq for Sprite {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Sprite {}

impl fmt::Debug for Sprite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sprite")
            .field("id", &self.id)
            .field("rect", &self.rect)
            .field("anchor", &self.anchor)
            .finish()
    }
}
