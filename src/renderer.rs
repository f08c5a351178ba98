//! The immediate-mode façade the rest of an application draws through.

use crate::{
    images::{ImageEntry, ImageHandle, ImageRepository, ImageStore},
    surface::Canvas,
    types::{color_from_rgba8, crop_tex_coords, rect_corners, Color, FALLBACK_COLOR},
};

/// Immediate-mode drawing: a current fill color plus `draw_image`.
///
/// `C` is where quads end up (normally a [`DrawingSurface`]); `R` resolves
/// image handles (normally an [`ImageStore`]).
///
/// Missing or still-decoding images never fail a draw: they are filled with
/// [`FALLBACK_COLOR`] so they stand out from intentional flat fills.
///
/// [`DrawingSurface`]: crate::DrawingSurface
/// [`ImageStore`]: crate::ImageStore
pub struct Renderer<C, R> {
    canvas: C,
    images: R,
    color: Color,
    dirty: bool,
}

impl<C: Canvas, R: ImageRepository> Renderer<C, R> {
    /// Wrap `canvas` and `images`. The fill color starts as transparent
    /// black.
    #[must_use]
    pub fn new(canvas: C, images: R) -> Self {
        Self {
            canvas,
            images,
            color: [0.0; 4],
            dirty: false,
        }
    }

    /// Set the fill color from 8-bit channels. Takes effect on the next flat
    /// fill; only the last call before a draw counts.
    pub fn set_color(&mut self, r: u8, g: u8, b: u8, a: u8) {
        self.color = color_from_rgba8(r, g, b, a);
    }

    /// The current fill color, normalized.
    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }

    /// Start a frame by clearing the canvas to transparent black.
    ///
    /// # Safety
    ///
    /// A GL-backed canvas needs its context current.
    pub unsafe fn begin(&mut self) {
        unsafe { self.canvas.clear([0.0; 4]) };
    }

    /// Draw the rectangle `(x, y)`–`(x + width, y + height)`.
    ///
    /// - `handle == 0` fills it with the current color without looking at
    ///   the image repository.
    /// - Otherwise the image is drawn cropped to the texture box
    ///   `(s1, t1)`–`(s2, t2)`. If the handle is unknown, its pixels are not
    ///   decoded yet, or the texture cannot be created, the rectangle is
    ///   filled with [`FALLBACK_COLOR`] instead.
    ///
    /// # Safety
    ///
    /// A GL-backed canvas needs its context current.
    #[expect(clippy::too_many_arguments)] // mirrors the drawing command layout
    pub unsafe fn draw_image(
        &mut self,
        handle: u32,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        s1: f32,
        t1: f32,
        s2: f32,
        t2: f32,
    ) {
        let corners = rect_corners(x, y, width, height);

        let Some(handle) = ImageHandle::new(handle) else {
            unsafe { self.canvas.fill_quad(&corners, self.color) };
            return;
        };

        let Some(bitmap) = self.images.get(handle).and_then(|entry| entry.bitmap()) else {
            log::trace!("image {handle} unavailable, drawing fallback");
            unsafe { self.canvas.fill_quad(&corners, FALLBACK_COLOR) };
            return;
        };

        let tex_coords = crop_tex_coords(s1, t1, s2, t2);
        let drawn = unsafe {
            self.canvas
                .draw_textured_quad(&corners, &tex_coords, handle, bitmap)
        };
        if let Err(err) = drawn {
            log::warn!("failed to draw image {handle}: {err}");
            unsafe { self.canvas.fill_quad(&corners, FALLBACK_COLOR) };
        }
    }

    /// Mark that a redraw is owed. Advisory: nothing here schedules one.
    pub fn invalidate(&mut self) {
        self.dirty = true;
    }

    /// Whether [`invalidate`](Self::invalidate) was called since the last
    /// [`take_dirty`](Self::take_dirty).
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Read and clear the dirty flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// The canvas.
    #[must_use]
    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    /// The canvas, mutably (e.g. to release textures or present).
    pub fn canvas_mut(&mut self) -> &mut C {
        &mut self.canvas
    }

    /// The image repository.
    #[must_use]
    pub fn images(&self) -> &R {
        &self.images
    }

    /// The image repository, mutably.
    pub fn images_mut(&mut self) -> &mut R {
        &mut self.images
    }
}

impl<C: Canvas> Renderer<C, ImageStore> {
    /// Forget `handle` and release the canvas's cached texture for it.
    ///
    /// Returns the removed entry, if the store knew the handle. Drawing the
    /// handle afterwards falls back like any unknown image.
    ///
    /// # Safety
    ///
    /// A GL-backed canvas needs its context current.
    pub unsafe fn remove_image(&mut self, handle: ImageHandle) -> Option<ImageEntry> {
        unsafe { self.canvas.release_texture(handle) };
        self.images.remove(handle)
    }
}
