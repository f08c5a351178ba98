//! The fixed-size drawing surface: GL state, the two quad programs and the
//! shared vertex buffers.

use std::sync::Arc;

use glow::{HasContext, PixelPackData, PixelUnpackData};

use crate::{
    error::{Error, ShaderStage},
    images::{Bitmap, ImageHandle},
    shaders::{self, Binder, ShaderProgram},
    texture_cache::{Lookup, TextureCache},
    types::{Color, Quad, SurfaceConfig},
};

/// GL internal format for RGBA8 textures, pre-cast to the `i32` that
/// `tex_image_2d` expects.
#[expect(clippy::cast_possible_wrap)]
const RGBA8_INTERNAL_FORMAT: i32 = glow::RGBA8 as i32;

/// Vertices per quad, drawn as a triangle fan.
const QUAD_VERTICES: i32 = 4;

/// Bindings of the flat-fill program.
pub struct FillBindings {
    /// `a_position` — corner in surface pixels.
    pub position: u32,
    /// `u_resolution` — surface size in pixels.
    pub resolution: glow::UniformLocation,
    /// `u_color` — fill color.
    pub color: glow::UniformLocation,
}

impl FillBindings {
    fn resolve(b: &Binder<'_>) -> Result<Self, Error> {
        Ok(Self {
            position: b.attribute("a_position")?,
            resolution: b.uniform("u_resolution")?,
            color: b.uniform("u_color")?,
        })
    }
}

/// Bindings of the textured-quad program.
pub struct TextureBindings {
    /// `a_position` — corner in surface pixels.
    pub position: u32,
    /// `a_tex_coord` — texture coordinate of the corner.
    pub tex_coord: u32,
    /// `u_resolution` — surface size in pixels.
    pub resolution: glow::UniformLocation,
    /// `u_texture` — sampler, always texture unit 0.
    pub texture: glow::UniformLocation,
}

impl TextureBindings {
    fn resolve(b: &Binder<'_>) -> Result<Self, Error> {
        Ok(Self {
            position: b.attribute("a_position")?,
            tex_coord: b.attribute("a_tex_coord")?,
            resolution: b.uniform("u_resolution")?,
            texture: b.uniform("u_texture")?,
        })
    }
}

/// Something quads can be drawn onto.
///
/// [`DrawingSurface`] is the GL implementation; the [`Renderer`] is generic
/// over this trait.
///
/// [`Renderer`]: crate::Renderer
pub trait Canvas {
    /// Clear the whole canvas to `color`.
    ///
    /// # Safety
    ///
    /// Implementations backed by GL require their context to be current.
    unsafe fn clear(&mut self, color: Color);

    /// Fill the quad `corners` with `color`.
    ///
    /// # Safety
    ///
    /// Implementations backed by GL require their context to be current.
    unsafe fn fill_quad(&mut self, corners: &Quad, color: Color);

    /// Draw `bitmap` (cached under `handle`) mapped onto `corners` through
    /// `tex_coords`.
    ///
    /// # Safety
    ///
    /// Implementations backed by GL require their context to be current.
    ///
    /// # Errors
    ///
    /// Returns an error if the texture could not be created. Nothing is drawn
    /// in that case.
    unsafe fn draw_textured_quad(
        &mut self,
        corners: &Quad,
        tex_coords: &Quad,
        handle: ImageHandle,
        bitmap: &Bitmap,
    ) -> Result<(), Error>;

    /// Drop whatever is cached for `handle`. A later draw re-uploads.
    ///
    /// # Safety
    ///
    /// Implementations backed by GL require their context to be current.
    unsafe fn release_texture(&mut self, handle: ImageHandle);
}

/// A fixed-resolution offscreen surface with a flat-fill and a textured-quad
/// pipeline.
///
/// All drawing goes into a backing framebuffer of the size given at
/// construction. [`present`](Self::present) copies it to the host's default
/// framebuffer and [`read_pixels`](Self::read_pixels) reads it back.
///
/// The viewport and both programs' `u_resolution` are set once in
/// [`new`](Self::new) and never again; a different size needs a new surface.
/// The surface has no teardown: its GL objects live until the context does.
///
/// Blending is disabled for every draw, so drawn pixels take the fragment
/// color verbatim. Fill colors outside `0.0..=1.0` are not clamped here;
/// what ends up in the RGBA8 target is up to the GL implementation.
///
/// # Example
///
/// ```no_run
/// # use sprite_renderer_glow::DrawingSurface;
/// # use std::sync::Arc;
/// # fn example(gl: Arc<glow::Context>) -> Result<(), sprite_renderer_glow::Error> {
/// let mut surface = unsafe { DrawingSurface::new(gl, 640, 480) }?;
/// unsafe {
///     surface.fill_quad(
///         &[[10.0, 10.0], [110.0, 10.0], [110.0, 60.0], [10.0, 60.0]],
///         [1.0, 0.0, 0.0, 1.0],
///     );
///     surface.present([640, 480]);
/// }
/// # Ok(())
/// # }
/// ```
pub struct DrawingSurface {
    gl: Arc<glow::Context>,
    size: [u32; 2],

    fill_program: ShaderProgram<FillBindings>,
    texture_program: ShaderProgram<TextureBindings>,

    /// Records the attribute pointers set up per draw.
    vao: glow::VertexArray,
    /// Corner positions, re-filled by every draw.
    position_buffer: glow::Buffer,
    /// Texture coordinates, re-filled by every textured draw.
    tex_coord_buffer: glow::Buffer,

    /// Backing framebuffer all draws target.
    fbo: glow::Framebuffer,
    /// Color attachment of [`fbo`](Self::fbo).
    color_texture: glow::Texture,

    textures: TextureCache<glow::Texture>,
}

impl DrawingSurface {
    /// Create a surface of `width`×`height` pixels.
    ///
    /// Builds the backing framebuffer, compiles and links both programs,
    /// allocates the shared buffers, sets the viewport and pushes the
    /// resolution into both programs.
    ///
    /// # Safety
    ///
    /// `gl` must be valid and current, and stay current on this thread for
    /// every later call on the surface.
    ///
    /// # Errors
    ///
    /// Any [`Error`] variant; every one of them is fatal and no surface is
    /// returned.
    pub unsafe fn new(gl: Arc<glow::Context>, width: u32, height: u32) -> Result<Self, Error> {
        let (w, h) = match (i32::try_from(width), i32::try_from(height)) {
            (Ok(w), Ok(h)) if w > 0 && h > 0 => (w, h),
            _ => return Err(Error::InvalidSize { width, height }),
        };

        let version = gl.version();
        check_context_version(version)?;
        log::debug!(
            "creating {width}x{height} surface on GL {}.{} ({})",
            version.major,
            version.minor,
            version.vendor_info,
        );

        let (fbo, color_texture) = unsafe { create_backing_framebuffer(&gl, w, h) }?;

        let vertex_src = format!(
            "{}{}",
            shaders::glsl_header(version, ShaderStage::Vertex),
            shaders::QUAD_VERTEX_SRC,
        );
        let header = shaders::glsl_header(version, ShaderStage::Fragment);
        let fill_program = unsafe {
            ShaderProgram::new(
                Arc::clone(&gl),
                "fill",
                &vertex_src,
                &format!("{header}{}", shaders::FILL_FRAGMENT_SRC),
                FillBindings::resolve,
            )
        }?;
        let texture_program = unsafe {
            ShaderProgram::new(
                Arc::clone(&gl),
                "texture",
                &vertex_src,
                &format!("{header}{}", shaders::TEXTURE_FRAGMENT_SRC),
                TextureBindings::resolve,
            )
        }?;

        let (vao, position_buffer, tex_coord_buffer) = unsafe {
            (
                gl.create_vertex_array()
                    .map_err(Error::allocation("vertex array"))?,
                gl.create_buffer()
                    .map_err(Error::allocation("position buffer"))?,
                gl.create_buffer()
                    .map_err(Error::allocation("texture coordinate buffer"))?,
            )
        };

        // Precision loss is acceptable: surface sizes are far below 2^24.
        #[expect(clippy::cast_precision_loss)]
        let resolution = [width as f32, height as f32];

        unsafe {
            gl.viewport(0, 0, w, h);
            fill_program.with(|gl, b| {
                gl.uniform_2_f32(Some(&b.resolution), resolution[0], resolution[1]);
            });
            texture_program.with(|gl, b| {
                gl.uniform_2_f32(Some(&b.resolution), resolution[0], resolution[1]);
                gl.uniform_1_i32(Some(&b.texture), 0);
            });
            gl.use_program(None);
        }

        Ok(Self {
            gl,
            size: [width, height],
            fill_program,
            texture_program,
            vao,
            position_buffer,
            tex_coord_buffer,
            fbo,
            color_texture,
            textures: TextureCache::new(),
        })
    }

    /// Create a surface sized by `config`.
    ///
    /// # Safety
    ///
    /// Same as [`new`](Self::new).
    ///
    /// # Errors
    ///
    /// Same as [`new`](Self::new).
    pub unsafe fn from_config(gl: Arc<glow::Context>, config: &SurfaceConfig) -> Result<Self, Error> {
        unsafe { Self::new(gl, config.width, config.height) }
    }

    /// Surface size in pixels, as given at construction.
    #[must_use]
    pub fn size(&self) -> [u32; 2] {
        self.size
    }

    /// Where the vertex stage puts pixel `point` in clip space.
    #[must_use]
    pub fn to_clip_space(&self, point: [f32; 2]) -> [f32; 2] {
        #[expect(clippy::cast_precision_loss)]
        let resolution = [self.size[0] as f32, self.size[1] as f32];
        pixel_to_clip(point, resolution)
    }

    /// The flat-fill program.
    #[must_use]
    pub fn fill_program(&self) -> &ShaderProgram<FillBindings> {
        &self.fill_program
    }

    /// The textured-quad program.
    #[must_use]
    pub fn texture_program(&self) -> &ShaderProgram<TextureBindings> {
        &self.texture_program
    }

    /// The backing surface's RGBA8 color texture, for hosts that composite
    /// it themselves instead of calling [`present`](Self::present).
    ///
    /// Rows are stored bottom row first, as GL does.
    #[must_use]
    pub fn color_texture(&self) -> glow::Texture {
        self.color_texture
    }

    /// Number of textures currently held by the texture cache.
    #[must_use]
    pub fn cached_textures(&self) -> usize {
        self.textures.len()
    }

    /// Fill the quad `corners` with `color`.
    ///
    /// Corners must be in a consistent rotational order or the fan
    /// self-intersects. `color` is passed to the shader unclamped.
    ///
    /// # Safety
    ///
    /// Requires the surface's GL context to be current.
    pub unsafe fn fill_quad(&mut self, corners: &Quad, color: Color) {
        let position_buffer = self.position_buffer;

        unsafe {
            self.bind_target();
            upload_quad(&self.gl, position_buffer, corners);

            self.fill_program.with(|gl, b| {
                gl.enable_vertex_attrib_array(b.position);
                gl.bind_buffer(glow::ARRAY_BUFFER, Some(position_buffer));
                gl.vertex_attrib_pointer_f32(b.position, 2, glow::FLOAT, false, 0, 0);
                gl.uniform_4_f32_slice(Some(&b.color), &color);

                gl.draw_arrays(glow::TRIANGLE_FAN, 0, QUAD_VERTICES);

                gl.disable_vertex_attrib_array(b.position);
            });

            self.unbind_target();
        }
    }

    /// Draw `bitmap` onto `corners`, sampling it at `tex_coords`.
    ///
    /// The texture for `handle` is created on first use and re-filled in
    /// place when `bitmap` carries a different revision than the cached one.
    /// Sampling is linear with clamp-to-edge on both axes, no mipmaps.
    ///
    /// # Safety
    ///
    /// Requires the surface's GL context to be current.
    ///
    /// # Errors
    ///
    /// [`Error::Allocation`] if a new texture object cannot be created.
    pub unsafe fn draw_textured_quad(
        &mut self,
        corners: &Quad,
        tex_coords: &Quad,
        handle: ImageHandle,
        bitmap: &Bitmap,
    ) -> Result<(), Error> {
        let texture = unsafe { self.texture_for(handle, bitmap) }?;
        let position_buffer = self.position_buffer;
        let tex_coord_buffer = self.tex_coord_buffer;

        unsafe {
            self.bind_target();
            upload_quad(&self.gl, position_buffer, corners);
            upload_quad(&self.gl, tex_coord_buffer, tex_coords);

            self.gl.active_texture(glow::TEXTURE0);
            self.gl.bind_texture(glow::TEXTURE_2D, Some(texture));

            self.texture_program.with(|gl, b| {
                gl.enable_vertex_attrib_array(b.position);
                gl.enable_vertex_attrib_array(b.tex_coord);

                // Each pointer captures the buffer bound at the time of the call.
                gl.bind_buffer(glow::ARRAY_BUFFER, Some(position_buffer));
                gl.vertex_attrib_pointer_f32(b.position, 2, glow::FLOAT, false, 0, 0);
                gl.bind_buffer(glow::ARRAY_BUFFER, Some(tex_coord_buffer));
                gl.vertex_attrib_pointer_f32(b.tex_coord, 2, glow::FLOAT, false, 0, 0);

                gl.draw_arrays(glow::TRIANGLE_FAN, 0, QUAD_VERTICES);

                gl.disable_vertex_attrib_array(b.position);
                gl.disable_vertex_attrib_array(b.tex_coord);
            });

            self.gl.bind_texture(glow::TEXTURE_2D, None);
            self.unbind_target();
        }

        Ok(())
    }

    /// Delete the cached texture for `handle`, if any.
    ///
    /// Call this when the image behind `handle` goes away for good. A later
    /// draw with the same handle uploads a fresh texture.
    ///
    /// # Safety
    ///
    /// Requires the surface's GL context to be current.
    pub unsafe fn release_texture(&mut self, handle: ImageHandle) {
        if let Some(texture) = self.textures.remove(handle) {
            unsafe { self.gl.delete_texture(texture) };
            log::trace!("released texture for image {handle}");
        }
    }

    /// Clear the backing surface to `color`.
    ///
    /// # Safety
    ///
    /// Requires the surface's GL context to be current.
    pub unsafe fn clear(&mut self, color: Color) {
        let [r, g, b, a] = color;
        unsafe {
            self.gl.bind_framebuffer(glow::FRAMEBUFFER, Some(self.fbo));
            self.gl.clear_color(r, g, b, a);
            self.gl.clear(glow::COLOR_BUFFER_BIT);
            self.gl.bind_framebuffer(glow::FRAMEBUFFER, None);
        }
    }

    /// Copy the backing surface into the default framebuffer, stretched to
    /// `target` pixels.
    ///
    /// # Safety
    ///
    /// Requires the surface's GL context to be current.
    pub unsafe fn present(&self, target: [u32; 2]) {
        unsafe { self.present_to(None, target) };
    }

    /// Copy the backing surface into `framebuffer` (`None` for the default
    /// one), stretched to `target` pixels.
    ///
    /// # Safety
    ///
    /// Requires the surface's GL context to be current.
    pub unsafe fn present_to(
        &self,
        framebuffer: Option<glow::Framebuffer>,
        [target_width, target_height]: [u32; 2],
    ) {
        let [w, h] = self.gl_size();
        let tw = i32::try_from(target_width).unwrap_or(i32::MAX);
        let th = i32::try_from(target_height).unwrap_or(i32::MAX);

        unsafe {
            self.gl.bind_framebuffer(glow::READ_FRAMEBUFFER, Some(self.fbo));
            self.gl.bind_framebuffer(glow::DRAW_FRAMEBUFFER, framebuffer);
            self.gl.blit_framebuffer(
                0,
                0,
                w,
                h,
                0,
                0,
                tw,
                th,
                glow::COLOR_BUFFER_BIT,
                glow::LINEAR,
            );
            self.gl.bind_framebuffer(glow::FRAMEBUFFER, None);
        }
    }

    /// Read the backing surface as tightly packed RGBA8, top row first.
    ///
    /// # Safety
    ///
    /// Requires the surface's GL context to be current.
    #[must_use]
    pub unsafe fn read_pixels(&self) -> Vec<u8> {
        let [w, h] = self.gl_size();
        let row = self.size[0] as usize * 4;
        let mut pixels = vec![0; row * self.size[1] as usize];

        unsafe {
            self.gl.bind_framebuffer(glow::FRAMEBUFFER, Some(self.fbo));
            self.gl.pixel_store_i32(glow::PACK_ALIGNMENT, 4);
            self.gl.read_pixels(
                0,
                0,
                w,
                h,
                glow::RGBA,
                glow::UNSIGNED_BYTE,
                PixelPackData::Slice(Some(&mut pixels)),
            );
            self.gl.bind_framebuffer(glow::FRAMEBUFFER, None);
        }

        // GL returns the bottom row first.
        flip_rows(&mut pixels, row);
        pixels
    }

    /// Bind the backing framebuffer and vertex array for a draw.
    unsafe fn bind_target(&self) {
        unsafe {
            self.gl.bind_framebuffer(glow::FRAMEBUFFER, Some(self.fbo));
            self.gl.bind_vertex_array(Some(self.vao));
            self.gl.disable(glow::BLEND);
        }
    }

    unsafe fn unbind_target(&self) {
        unsafe {
            self.gl.bind_vertex_array(None);
            self.gl.bind_framebuffer(glow::FRAMEBUFFER, None);
        }
    }

    /// Return the texture for `handle`, uploading `bitmap` if the cache has
    /// nothing or older pixels.
    unsafe fn texture_for(
        &mut self,
        handle: ImageHandle,
        bitmap: &Bitmap,
    ) -> Result<glow::Texture, Error> {
        let texture = match self.textures.lookup(handle, bitmap.revision()) {
            Lookup::Fresh(texture) => return Ok(texture),
            Lookup::Stale(texture) => texture,
            Lookup::Miss => unsafe { self.gl.create_texture() }
                .map_err(Error::allocation("texture"))?,
        };

        log::trace!(
            "uploading {}x{} bitmap for image {handle}",
            bitmap.width(),
            bitmap.height(),
        );
        unsafe { upload_bitmap(&self.gl, texture, bitmap) };
        self.textures.store(handle, bitmap.revision(), texture);
        Ok(texture)
    }

    fn gl_size(&self) -> [i32; 2] {
        // Checked in `new`.
        self.size
            .map(|v| i32::try_from(v).unwrap_or(i32::MAX))
    }
}

impl Canvas for DrawingSurface {
    unsafe fn clear(&mut self, color: Color) {
        unsafe { DrawingSurface::clear(self, color) }
    }

    unsafe fn fill_quad(&mut self, corners: &Quad, color: Color) {
        unsafe { DrawingSurface::fill_quad(self, corners, color) }
    }

    unsafe fn draw_textured_quad(
        &mut self,
        corners: &Quad,
        tex_coords: &Quad,
        handle: ImageHandle,
        bitmap: &Bitmap,
    ) -> Result<(), Error> {
        unsafe { DrawingSurface::draw_textured_quad(self, corners, tex_coords, handle, bitmap) }
    }

    unsafe fn release_texture(&mut self, handle: ImageHandle) {
        unsafe { DrawingSurface::release_texture(self, handle) }
    }
}

/// Reject contexts older than OpenGL 3.1 / OpenGL ES 3.0.
fn check_context_version(version: &glow::Version) -> Result<(), Error> {
    let supported = if version.is_embedded {
        version.major >= 3
    } else {
        (version.major, version.minor) >= (3, 1)
    };
    if supported {
        return Ok(());
    }
    Err(Error::ContextUnavailable(format!(
        "need OpenGL 3.1 or OpenGL ES 3.0, got {}.{}{}",
        version.major,
        version.minor,
        if version.is_embedded { " ES" } else { "" },
    )))
}

/// The vertex stage's pixel → clip transform, on the CPU.
///
/// `(0, 0)` maps to `(-1, 1)` and `resolution` maps to `(1, -1)`.
#[must_use]
pub fn pixel_to_clip([x, y]: [f32; 2], [width, height]: [f32; 2]) -> [f32; 2] {
    let zero_to_two = [x / width * 2.0, y / height * 2.0];
    [zero_to_two[0] - 1.0, -(zero_to_two[1] - 1.0)]
}

/// Create the backing framebuffer with an RGBA8 color texture.
unsafe fn create_backing_framebuffer(
    gl: &glow::Context,
    width: i32,
    height: i32,
) -> Result<(glow::Framebuffer, glow::Texture), Error> {
    unsafe {
        let texture = gl
            .create_texture()
            .map_err(Error::allocation("backing texture"))?;
        gl.bind_texture(glow::TEXTURE_2D, Some(texture));
        gl.tex_image_2d(
            glow::TEXTURE_2D,
            0,
            RGBA8_INTERNAL_FORMAT,
            width,
            height,
            0,
            glow::RGBA,
            glow::UNSIGNED_BYTE,
            PixelUnpackData::Slice(None),
        );
        set_texture_params(gl);

        let fbo = gl
            .create_framebuffer()
            .map_err(Error::allocation("backing framebuffer"))?;
        gl.bind_framebuffer(glow::FRAMEBUFFER, Some(fbo));
        gl.framebuffer_texture_2d(
            glow::FRAMEBUFFER,
            glow::COLOR_ATTACHMENT0,
            glow::TEXTURE_2D,
            Some(texture),
            0,
        );
        let status = gl.check_framebuffer_status(glow::FRAMEBUFFER);

        gl.bind_framebuffer(glow::FRAMEBUFFER, None);
        gl.bind_texture(glow::TEXTURE_2D, None);

        if status != glow::FRAMEBUFFER_COMPLETE {
            gl.delete_framebuffer(fbo);
            gl.delete_texture(texture);
            return Err(Error::IncompleteFramebuffer(status));
        }

        Ok((fbo, texture))
    }
}

/// Stream four points into `buffer`.
unsafe fn upload_quad(gl: &glow::Context, buffer: glow::Buffer, quad: &Quad) {
    unsafe {
        gl.bind_buffer(glow::ARRAY_BUFFER, Some(buffer));
        gl.buffer_data_u8_slice(
            glow::ARRAY_BUFFER,
            bytemuck::cast_slice(quad),
            glow::STREAM_DRAW,
        );
    }
}

/// Fill `texture` with `bitmap`'s pixels.
unsafe fn upload_bitmap(gl: &glow::Context, texture: glow::Texture, bitmap: &Bitmap) {
    // `Bitmap` guarantees both dimensions fit in `i32`.
    let width = i32::try_from(bitmap.width()).unwrap_or(i32::MAX);
    let height = i32::try_from(bitmap.height()).unwrap_or(i32::MAX);

    unsafe {
        gl.bind_texture(glow::TEXTURE_2D, Some(texture));
        gl.pixel_store_i32(glow::UNPACK_ALIGNMENT, 4);
        gl.tex_image_2d(
            glow::TEXTURE_2D,
            0,
            RGBA8_INTERNAL_FORMAT,
            width,
            height,
            0,
            glow::RGBA,
            glow::UNSIGNED_BYTE,
            PixelUnpackData::Slice(Some(bitmap.pixels())),
        );
        set_texture_params(gl);
    }
}

/// Linear filtering, clamp-to-edge wrapping, no mipmaps.
unsafe fn set_texture_params(gl: &glow::Context) {
    // GL constant values are small enough that the cast is always safe.
    #[expect(clippy::cast_possible_wrap)]
    unsafe {
        gl.tex_parameter_i32(
            glow::TEXTURE_2D,
            glow::TEXTURE_MIN_FILTER,
            glow::LINEAR as i32,
        );
        gl.tex_parameter_i32(
            glow::TEXTURE_2D,
            glow::TEXTURE_MAG_FILTER,
            glow::LINEAR as i32,
        );
        gl.tex_parameter_i32(
            glow::TEXTURE_2D,
            glow::TEXTURE_WRAP_S,
            glow::CLAMP_TO_EDGE as i32,
        );
        gl.tex_parameter_i32(
            glow::TEXTURE_2D,
            glow::TEXTURE_WRAP_T,
            glow::CLAMP_TO_EDGE as i32,
        );
    }
}

/// Reverse the order of `row_len`-byte rows in place.
fn flip_rows(pixels: &mut [u8], row_len: usize) {
    if row_len == 0 {
        return;
    }
    let rows = pixels.len() / row_len;
    for top in 0..rows / 2 {
        let bottom = rows - 1 - top;
        let (upper, lower) = pixels.split_at_mut(bottom * row_len);
        upper[top * row_len..(top + 1) * row_len].swap_with_slice(&mut lower[..row_len]);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn assert_close(actual: [f32; 2], expected: [f32; 2]) {
        assert!(
            (actual[0] - expected[0]).abs() < 1e-5 && (actual[1] - expected[1]).abs() < 1e-5,
            "expected {expected:?}, got {actual:?}",
        );
    }

    fn version(major: u32, minor: u32, is_embedded: bool) -> glow::Version {
        glow::Version {
            major,
            minor,
            is_embedded,
            revision: None,
            vendor_info: String::new(),
        }
    }

    #[test]
    fn desktop_gl_31_and_later_is_accepted() {
        assert!(check_context_version(&version(3, 1, false)).is_ok());
        assert!(check_context_version(&version(4, 6, false)).is_ok());
    }

    #[test]
    fn desktop_gl_30_is_unavailable() {
        let err = check_context_version(&version(3, 0, false)).unwrap_err();
        assert!(matches!(err, Error::ContextUnavailable(_)));
        assert_eq!(
            err.to_string(),
            "GL context unavailable: need OpenGL 3.1 or OpenGL ES 3.0, got 3.0"
        );
    }

    #[test]
    fn gles_needs_version_3() {
        assert!(check_context_version(&version(3, 0, true)).is_ok());
        let err = check_context_version(&version(2, 0, true)).unwrap_err();
        assert!(err.to_string().ends_with("got 2.0 ES"));
    }

    #[test]
    fn origin_is_top_left_of_clip_space() {
        assert_close(pixel_to_clip([0.0, 0.0], [1920.0, 1080.0]), [-1.0, 1.0]);
    }

    #[test]
    fn far_corner_is_bottom_right_of_clip_space() {
        assert_close(pixel_to_clip([1920.0, 1080.0], [1920.0, 1080.0]), [1.0, -1.0]);
    }

    #[test]
    fn center_is_clip_origin() {
        assert_close(pixel_to_clip([320.0, 240.0], [640.0, 480.0]), [0.0, 0.0]);
    }

    #[test]
    fn increasing_y_moves_down() {
        let upper = pixel_to_clip([0.0, 10.0], [100.0, 100.0]);
        let lower = pixel_to_clip([0.0, 90.0], [100.0, 100.0]);
        assert!(lower[1] < upper[1]);
    }

    proptest! {
        #[test]
        fn corners_map_to_clip_corners(w in 1u32..=8192, h in 1u32..=8192) {
            #[allow(clippy::cast_precision_loss)]
            let res = [w as f32, h as f32];
            let top_left = pixel_to_clip([0.0, 0.0], res);
            let bottom_right = pixel_to_clip(res, res);
            prop_assert!((top_left[0] + 1.0).abs() < 1e-5 && (top_left[1] - 1.0).abs() < 1e-5);
            prop_assert!((bottom_right[0] - 1.0).abs() < 1e-5 && (bottom_right[1] + 1.0).abs() < 1e-5);
        }

        #[test]
        fn inside_pixels_stay_inside_clip_space(
            fx in 0.0f32..=1.0,
            fy in 0.0f32..=1.0,
            w in 1u32..=4096,
            h in 1u32..=4096,
        ) {
            #[allow(clippy::cast_precision_loss)]
            let res = [w as f32, h as f32];
            let [cx, cy] = pixel_to_clip([fx * res[0], fy * res[1]], res);
            prop_assert!((-1.0 - 1e-5..=1.0 + 1e-5).contains(&cx));
            prop_assert!((-1.0 - 1e-5..=1.0 + 1e-5).contains(&cy));
        }
    }

    #[test]
    fn flip_rows_reverses_row_order() {
        let mut pixels = vec![1, 1, 2, 2, 3, 3];
        flip_rows(&mut pixels, 2);
        assert_eq!(pixels, [3, 3, 2, 2, 1, 1]);
    }

    #[test]
    fn flip_rows_single_row_is_untouched() {
        let mut pixels = vec![1, 2, 3, 4];
        flip_rows(&mut pixels, 4);
        assert_eq!(pixels, [1, 2, 3, 4]);
    }

    #[test]
    fn quad_casts_to_thirty_two_bytes() {
        let quad: Quad = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];
        assert_eq!(bytemuck::cast_slice::<[f32; 2], u8>(&quad).len(), 32);
    }
}
