//! Immediate-mode sprite and rectangle drawing on a fixed-size OpenGL
//! surface, via [glow].
//!
//! Three layers, leaves first:
//!
//! - [`ShaderProgram`] compiles and links a vertex/fragment pair and resolves
//!   its attribute and uniform locations once, into a typed bindings struct.
//! - [`DrawingSurface`] owns the backing framebuffer, a flat-fill and a
//!   textured-quad program and two shared vertex buffers, and draws one quad
//!   per call with [`fill_quad`](DrawingSurface::fill_quad) or
//!   [`draw_textured_quad`](DrawingSurface::draw_textured_quad).
//! - [`Renderer`] keeps the current fill color and turns
//!   [`draw_image`](Renderer::draw_image) requests into surface draws,
//!   resolving image handles through an [`ImageRepository`].
//!
//! Corner positions are surface pixels with the origin at the top-left and Y
//! growing downward. The vertex stage maps them to clip space with
//! `clip = (pixel / resolution * 2 - 1) * (1, -1)`.
//!
//! # Safety
//!
//! A [`DrawingSurface`] needs a valid OpenGL 3.1 (or ES 3.0) context that is
//! current on the calling thread. Every method that issues GL calls is
//! `unsafe` for that reason. The surface is not meant to be shared between
//! threads.
//!
//! [glow]: https://docs.rs/glow

mod error;
mod images;
mod renderer;
mod shaders;
mod surface;
mod texture_cache;
mod types;

pub use error::{Error, ShaderStage};
pub use images::{Bitmap, ImageEntry, ImageHandle, ImageRepository, ImageStore};
pub use renderer::Renderer;
pub use shaders::{
    glsl_header, Binder, ShaderProgram, FILL_FRAGMENT_SRC, QUAD_VERTEX_SRC, TEXTURE_FRAGMENT_SRC,
};
pub use surface::{pixel_to_clip, Canvas, DrawingSurface, FillBindings, TextureBindings};
pub use types::{
    color_from_rgba8, crop_tex_coords, rect_corners, Color, Quad, SurfaceConfig, FALLBACK_COLOR,
};
