use crate::sprite::{Sprite, SpriteId, SpriteRef};
use sdl2::surface::SurfaceRef;

#[derive(Debug, Clone)]
struct Member {
    id: SpriteId,
    sprite: SpriteRef,
}

/// Insertion-ordered list of shared sprite handles.
///
/// The group keeps a strong handle to every member, so a sprite outlives
/// each group it was added to. Membership is by [`SpriteId`]; the same
/// sprite may be added more than once.
#[derive(Debug, Clone, Default)]
pub struct SpriteGroup {
    members: Vec<Member>,
}

impl SpriteGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shallow copy: same handles, same order, independent membership.
    pub fn copy(&self) -> SpriteGroup {
        self.clone()
    }

    pub fn add(&mut self, sprite: SpriteRef) {
        let id = sprite.borrow().id();
        self.members.push(Member { id, sprite });
    }

    /// Removes every entry for `sprite` and returns how many were dropped.
    pub fn remove(&mut self, sprite: &Sprite) -> usize {
        self.remove_id(sprite.id())
    }

    pub fn remove_id(&mut self, id: SpriteId) -> usize {
        let before = self.members.len();
        self.members.retain(|m| m.id != id);
        before - self.members.len()
    }

    pub fn has(&self, sprite: &Sprite) -> bool {
        self.has_id(sprite.id())
    }

    pub fn has_id(&self, id: SpriteId) -> bool {
        self.members.iter().any(|m| m.id == id)
    }

    pub fn update(&self) {
        for m in &self.members {
            m.sprite.borrow_mut().update();
        }
    }

    pub fn draw(&self, destination: &mut SurfaceRef) -> anyhow::Result<()> {
        for m in &self.members {
            m.sprite.borrow().draw(destination)?;
        }
        Ok(())
    }

    pub fn clear(&mut self) {
        self.members.clear();
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn sprites(&self) -> impl Iterator<Item = &SpriteRef> {
        self.members.iter().map(|m| &m.sprite)
    }
}
