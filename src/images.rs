//! Decoded images and the repository the renderer resolves handles through.

use std::collections::HashMap;
use std::num::NonZeroU32;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Opaque handle of an image in an [`ImageRepository`].
///
/// Handle `0` is reserved by [`Renderer::draw_image`] for "no image", which
/// is why repository lookups take a `NonZeroU32`.
///
/// [`Renderer::draw_image`]: crate::Renderer::draw_image
pub type ImageHandle = NonZeroU32;

static NEXT_REVISION: AtomicU64 = AtomicU64::new(1);

/// RGBA8 pixel data ready for texture upload.
///
/// Cloning is cheap (the pixels are shared). Every bitmap built through a
/// constructor gets a process-unique revision; clones keep it. The surface's
/// texture cache compares revisions to notice that a handle now points at
/// different pixels.
#[derive(Clone, Debug)]
pub struct Bitmap {
    pixels: Arc<[u8]>,
    width: u32,
    height: u32,
    revision: u64,
}

impl Bitmap {
    /// Wrap tightly packed RGBA8 rows, top row first.
    ///
    /// Returns `None` if `pixels` is not exactly `width * height * 4` bytes,
    /// or either dimension is zero or larger than GL can address (`i32::MAX`).
    #[must_use]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Option<Self> {
        i32::try_from(width).ok()?;
        i32::try_from(height).ok()?;
        let expected = usize::try_from(width)
            .ok()?
            .checked_mul(usize::try_from(height).ok()?)?
            .checked_mul(4)?;
        if width == 0 || height == 0 || pixels.len() != expected {
            return None;
        }
        Some(Self {
            pixels: pixels.into(),
            width,
            height,
            revision: NEXT_REVISION.fetch_add(1, Ordering::Relaxed),
        })
    }

    /// Take ownership of an already decoded [`image::RgbaImage`].
    ///
    /// Returns `None` for an empty image.
    #[must_use]
    pub fn from_rgba_image(image: image::RgbaImage) -> Option<Self> {
        let (width, height) = image.dimensions();
        Self::new(width, height, image.into_raw())
    }

    /// Width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The raw RGBA8 bytes.
    #[must_use]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Identity of these pixels, for cache invalidation.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }
}

/// One slot in an image repository.
#[derive(Clone, Debug, Default)]
pub struct ImageEntry {
    bitmap: Option<Bitmap>,
}

impl ImageEntry {
    /// An entry whose pixels are not available yet.
    #[must_use]
    pub fn pending() -> Self {
        Self { bitmap: None }
    }

    /// An entry with decoded pixels.
    #[must_use]
    pub fn ready(bitmap: Bitmap) -> Self {
        Self {
            bitmap: Some(bitmap),
        }
    }

    /// The decoded pixels, or `None` while decoding is still in progress.
    #[must_use]
    pub fn bitmap(&self) -> Option<&Bitmap> {
        self.bitmap.as_ref()
    }
}

/// Source of images for [`Renderer::draw_image`](crate::Renderer::draw_image).
pub trait ImageRepository {
    /// Look up `handle`. `None` means the handle is unknown.
    fn get(&self, handle: ImageHandle) -> Option<&ImageEntry>;
}

/// An in-memory [`ImageRepository`].
///
/// Handles are handed out from 1 upward by [`reserve`](Self::reserve) and
/// never reused.
#[derive(Debug)]
pub struct ImageStore {
    entries: HashMap<ImageHandle, ImageEntry>,
    /// `None` once every handle has been handed out.
    next: Option<ImageHandle>,
}

impl Default for ImageStore {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
            next: Some(NonZeroU32::MIN),
        }
    }
}

impl ImageStore {
    /// An empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a handle whose entry is pending until [`insert`](Self::insert)
    /// supplies pixels.
    ///
    /// Returns `None` once the handle space is exhausted, i.e. after
    /// `u32::MAX` has been handed out.
    pub fn reserve(&mut self) -> Option<ImageHandle> {
        let handle = self.next?;
        self.next = handle.checked_add(1);
        self.entries.insert(handle, ImageEntry::pending());
        Some(handle)
    }

    /// Store decoded pixels under `handle`, replacing any previous bitmap.
    ///
    /// Returns the bitmap that was there before, if any.
    pub fn insert(&mut self, handle: ImageHandle, bitmap: Bitmap) -> Option<Bitmap> {
        self.entries
            .insert(handle, ImageEntry::ready(bitmap))
            .and_then(|old| old.bitmap)
    }

    /// Forget `handle`. Callers drawing through a
    /// [`DrawingSurface`](crate::DrawingSurface) should also release its
    /// cached texture; [`Renderer::remove_image`](crate::Renderer::remove_image)
    /// does both.
    pub fn remove(&mut self, handle: ImageHandle) -> Option<ImageEntry> {
        self.entries.remove(&handle)
    }

    /// Number of entries, pending or ready.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ImageRepository for ImageStore {
    fn get(&self, handle: ImageHandle) -> Option<&ImageEntry> {
        self.entries.get(&handle)
    }
}
