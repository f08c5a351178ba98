//! Per-surface map from image handle to uploaded texture.

use std::collections::HashMap;

use crate::images::ImageHandle;

/// Result of [`TextureCache::lookup`].
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Lookup<T> {
    /// The texture holds exactly the requested revision.
    Fresh(T),
    /// A texture exists for the handle but holds older pixels. Re-fill it in
    /// place.
    Stale(T),
    /// Nothing cached for the handle.
    Miss,
}

/// Textures keyed by image handle, each tagged with the bitmap revision it
/// was filled from.
///
/// Generic over the texture type so the bookkeeping does not need a GL
/// context.
#[derive(Debug)]
pub(crate) struct TextureCache<T> {
    entries: HashMap<ImageHandle, (u64, T)>,
}

impl<T: Copy> TextureCache<T> {
    pub(crate) fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    pub(crate) fn lookup(&self, handle: ImageHandle, revision: u64) -> Lookup<T> {
        match self.entries.get(&handle) {
            Some(&(cached, texture)) if cached == revision => Lookup::Fresh(texture),
            Some(&(_, texture)) => Lookup::Stale(texture),
            None => Lookup::Miss,
        }
    }

    pub(crate) fn store(&mut self, handle: ImageHandle, revision: u64, texture: T) {
        self.entries.insert(handle, (revision, texture));
    }

    pub(crate) fn remove(&mut self, handle: ImageHandle) -> Option<T> {
        self.entries.remove(&handle).map(|(_, texture)| texture)
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}
