//! Error type for surface and shader construction.

use std::fmt;

use thiserror::Error;

/// A shader stage, used to say which half of a program failed to compile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    /// The vertex stage.
    Vertex,
    /// The fragment stage.
    Fragment,
}

impl ShaderStage {
    /// The GL enum naming this stage (`VERTEX_SHADER` / `FRAGMENT_SHADER`).
    #[must_use]
    pub fn gl_kind(self) -> u32 {
        match self {
            Self::Vertex => glow::VERTEX_SHADER,
            Self::Fragment => glow::FRAGMENT_SHADER,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Vertex => "vertex",
            Self::Fragment => "fragment",
        })
    }
}

/// Everything that can go wrong while building a [`DrawingSurface`] or a
/// [`ShaderProgram`].
///
/// All variants are fatal for the object being built. Per-draw problems
/// (missing images, failed texture uploads during a frame) never surface as
/// an `Error` to callers of [`Renderer`].
///
/// [`DrawingSurface`]: crate::DrawingSurface
/// [`ShaderProgram`]: crate::ShaderProgram
/// [`Renderer`]: crate::Renderer
#[derive(Debug, Error)]
pub enum Error {
    /// The GL context is missing features this crate needs.
    #[error("GL context unavailable: {0}")]
    ContextUnavailable(String),

    /// The requested surface size is zero or does not fit GL's `i32` sizes.
    #[error("invalid surface size {width}x{height}")]
    InvalidSize {
        /// Requested width in pixels.
        width: u32,
        /// Requested height in pixels.
        height: u32,
    },

    /// A shader stage failed to compile. `log` is the driver's info log.
    #[error("failed to compile {stage} shader: {log}")]
    ShaderCompile {
        /// Which stage failed.
        stage: ShaderStage,
        /// The GL shader info log.
        log: String,
    },

    /// The program failed to link. `log` is the driver's info log.
    #[error("failed to link shader program: {log}")]
    ProgramLink {
        /// The GL program info log.
        log: String,
    },

    /// A vertex attribute the program's bindings need is not active.
    #[error("attribute `{name}` not found in {program} program")]
    MissingAttribute {
        /// Label of the program being bound.
        program: &'static str,
        /// The attribute name.
        name: &'static str,
    },

    /// A uniform the program's bindings need is not active.
    #[error("uniform `{name}` not found in {program} program")]
    MissingUniform {
        /// Label of the program being bound.
        program: &'static str,
        /// The uniform name.
        name: &'static str,
    },

    /// GL refused to create an object (buffer, texture, framebuffer, ...).
    #[error("failed to create {resource}: {reason}")]
    Allocation {
        /// What was being created.
        resource: &'static str,
        /// GL's reason, as reported by glow.
        reason: String,
    },

    /// The backing framebuffer is not complete.
    #[error("backing framebuffer incomplete (status {0:#06x})")]
    IncompleteFramebuffer(u32),
}

impl Error {
    /// Build a closure that wraps a glow creation error for `resource`.
    ///
    /// glow's `create_*` functions return `Result<_, String>`, so this is
    /// meant for `map_err`.
    pub(crate) fn allocation(resource: &'static str) -> impl FnOnce(String) -> Self {
        move |reason| Self::Allocation { resource, reason }
    }
}
