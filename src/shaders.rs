//! GLSL shader sources and the [`ShaderProgram`] wrapper.
//!
//! The sources below carry no `#version` line. [`glsl_header`] picks one to
//! match the context: GLSL 1.40 (OpenGL 3.1) on desktop, GLSL ES 3.00 on
//! embedded contexts. The bodies are valid under both. On ES the vertex
//! stage runs at `highp` so pixel positions on large surfaces stay exact;
//! only the fragment stages drop to `mediump`.

use std::sync::Arc;

use glow::HasContext;

use crate::error::{Error, ShaderStage};

/// Vertex stage shared by the fill and texture programs.
///
/// Maps pixel-space positions (origin top-left, Y down) to clip space and
/// forwards the texture coordinate unchanged.
///
/// | Name           | Kind      | Type   | Description                |
/// |----------------|-----------|--------|----------------------------|
/// | `a_position`   | attribute | `vec2` | Corner in surface pixels   |
/// | `a_tex_coord`  | attribute | `vec2` | Texture coordinate (0..1)  |
/// | `u_resolution` | uniform   | `vec2` | Surface size in pixels     |
pub const QUAD_VERTEX_SRC: &str = r"
in vec2 a_position;
in vec2 a_tex_coord;

uniform vec2 u_resolution;

out vec2 v_tex_coord;

void main() {
    vec2 zero_to_one = a_position / u_resolution;
    vec2 zero_to_two = zero_to_one * 2.0 - 1.0;
    vec2 clip = zero_to_two * vec2(1.0, -1.0);

    gl_Position = vec4(clip, 0.0, 1.0);
    v_tex_coord = a_tex_coord;
}
";

/// Fragment stage for flat fills. Writes `u_color` as-is, without clamping.
pub const FILL_FRAGMENT_SRC: &str = r"
uniform vec4 u_color;

out vec4 frag_color;

void main() {
    frag_color = u_color;
}
";

/// Fragment stage for textured quads. Samples `u_texture` (unit 0).
pub const TEXTURE_FRAGMENT_SRC: &str = r"
uniform sampler2D u_texture;

in vec2 v_tex_coord;

out vec4 frag_color;

void main() {
    frag_color = texture(u_texture, v_tex_coord);
}
";

/// The `#version` preamble for `stage` on a context of the given version.
#[must_use]
pub fn glsl_header(version: &glow::Version, stage: ShaderStage) -> &'static str {
    match (version.is_embedded, stage) {
        (false, _) => "#version 140\n",
        (true, ShaderStage::Vertex) => "#version 300 es\nprecision highp float;\n",
        (true, ShaderStage::Fragment) => "#version 300 es\nprecision mediump float;\n",
    }
}

/// A linked GL program together with its resolved bindings.
///
/// `B` is a plain struct of attribute slots and uniform locations, filled in
/// once by the `bind` closure passed to [`ShaderProgram::new`] and never
/// looked up again.
///
/// The program is never deleted individually: it lives as long as the
/// [`DrawingSurface`](crate::DrawingSurface) that built it.
pub struct ShaderProgram<B> {
    gl: Arc<glow::Context>,
    program: glow::Program,
    bindings: B,
}

impl<B> ShaderProgram<B> {
    /// Compile and link `vertex_src` + `fragment_src`, then resolve bindings.
    ///
    /// `bind` runs exactly once, after a successful link. `label` names the
    /// program in binding errors.
    ///
    /// Shader objects are detached and deleted after linking. On any failure
    /// every object created so far is deleted before returning.
    ///
    /// # Safety
    ///
    /// Requires a valid, current OpenGL context.
    ///
    /// # Errors
    ///
    /// [`Error::ShaderCompile`] or [`Error::ProgramLink`] with the driver's
    /// info log, whatever `bind` returns, or [`Error::Allocation`] if GL
    /// cannot create the objects.
    pub unsafe fn new<F>(
        gl: Arc<glow::Context>,
        label: &'static str,
        vertex_src: &str,
        fragment_src: &str,
        bind: F,
    ) -> Result<Self, Error>
    where
        F: FnOnce(&Binder<'_>) -> Result<B, Error>,
    {
        let program = unsafe { link_program(&gl, vertex_src, fragment_src) }?;

        let binder = Binder {
            gl: &gl,
            program,
            label,
        };
        let bindings = match bind(&binder) {
            Ok(bindings) => bindings,
            Err(err) => {
                unsafe { gl.delete_program(program) };
                return Err(err);
            }
        };

        log::debug!("linked {label} program");

        Ok(Self {
            gl,
            program,
            bindings,
        })
    }

    /// Make this program current and run `f` with its bindings.
    ///
    /// The program stays current after `f` returns only until someone else
    /// calls `use_program`. Nesting `with` on two different programs leaves
    /// the inner one current for the rest of the outer closure.
    ///
    /// # Safety
    ///
    /// Requires the context this program was built on to be current.
    pub unsafe fn with<R>(&self, f: impl FnOnce(&glow::Context, &B) -> R) -> R {
        unsafe { self.gl.use_program(Some(self.program)) };
        f(&self.gl, &self.bindings)
    }

    /// The resolved bindings.
    #[must_use]
    pub fn bindings(&self) -> &B {
        &self.bindings
    }

    /// The raw GL program handle.
    #[must_use]
    pub fn raw(&self) -> glow::Program {
        self.program
    }
}

/// Location lookups against a freshly linked program.
///
/// Only handed out by [`ShaderProgram::new`], while the context is known to
/// be current.
pub struct Binder<'a> {
    gl: &'a glow::Context,
    program: glow::Program,
    label: &'static str,
}

impl Binder<'_> {
    /// Slot index of the active attribute `name`.
    ///
    /// # Errors
    ///
    /// [`Error::MissingAttribute`] if the linked program has no such active
    /// attribute.
    pub fn attribute(&self, name: &'static str) -> Result<u32, Error> {
        unsafe { self.gl.get_attrib_location(self.program, name) }.ok_or(
            Error::MissingAttribute {
                program: self.label,
                name,
            },
        )
    }

    /// Location of the active uniform `name`.
    ///
    /// # Errors
    ///
    /// [`Error::MissingUniform`] if the linked program has no such active
    /// uniform.
    pub fn uniform(&self, name: &'static str) -> Result<glow::UniformLocation, Error> {
        unsafe { self.gl.get_uniform_location(self.program, name) }.ok_or(
            Error::MissingUniform {
                program: self.label,
                name,
            },
        )
    }
}

/// Compile both stages and link them into a program.
///
/// # Safety
///
/// Requires a valid, current OpenGL context.
unsafe fn link_program(
    gl: &glow::Context,
    vertex_src: &str,
    fragment_src: &str,
) -> Result<glow::Program, Error> {
    let vs = unsafe { compile_shader(gl, ShaderStage::Vertex, vertex_src) }?;
    let fs = match unsafe { compile_shader(gl, ShaderStage::Fragment, fragment_src) } {
        Ok(fs) => fs,
        Err(err) => {
            unsafe { gl.delete_shader(vs) };
            return Err(err);
        }
    };

    unsafe {
        let program = match gl.create_program() {
            Ok(program) => program,
            Err(reason) => {
                gl.delete_shader(vs);
                gl.delete_shader(fs);
                return Err(Error::allocation("shader program")(reason));
            }
        };

        gl.attach_shader(program, vs);
        gl.attach_shader(program, fs);
        gl.link_program(program);

        let linked = gl.get_program_link_status(program);
        let log = if linked {
            String::new()
        } else {
            gl.get_program_info_log(program)
        };

        gl.detach_shader(program, vs);
        gl.detach_shader(program, fs);
        gl.delete_shader(vs);
        gl.delete_shader(fs);

        if !linked {
            gl.delete_program(program);
            return Err(Error::ProgramLink { log });
        }

        Ok(program)
    }
}

/// Compile a single shader stage from source.
///
/// # Safety
///
/// Requires a valid, current OpenGL context.
unsafe fn compile_shader(
    gl: &glow::Context,
    stage: ShaderStage,
    source: &str,
) -> Result<glow::Shader, Error> {
    unsafe {
        let shader = gl
            .create_shader(stage.gl_kind())
            .map_err(Error::allocation("shader object"))?;
        gl.shader_source(shader, source);
        gl.compile_shader(shader);

        if !gl.get_shader_compile_status(shader) {
            let log = gl.get_shader_info_log(shader);
            gl.delete_shader(shader);
            return Err(Error::ShaderCompile { stage, log });
        }

        Ok(shader)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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
    fn desktop_header_is_glsl_140() {
        for stage in [ShaderStage::Vertex, ShaderStage::Fragment] {
            assert_eq!(glsl_header(&version(3, 3, false), stage), "#version 140\n");
        }
    }

    #[test]
    fn embedded_fragment_header_is_mediump() {
        let header = glsl_header(&version(3, 0, true), ShaderStage::Fragment);
        assert!(header.starts_with("#version 300 es\n"));
        assert!(header.contains("precision mediump float;"));
    }

    #[test]
    fn embedded_vertex_header_keeps_full_precision() {
        let header = glsl_header(&version(3, 0, true), ShaderStage::Vertex);
        assert!(header.starts_with("#version 300 es\n"));
        assert!(!header.contains("mediump"));
        assert!(header.contains("precision highp float;"));
    }

    #[test]
    fn sources_leave_version_to_the_header() {
        for src in [QUAD_VERTEX_SRC, FILL_FRAGMENT_SRC, TEXTURE_FRAGMENT_SRC] {
            assert!(!src.contains("#version"));
        }
    }

    #[test]
    fn vertex_stage_flips_y() {
        assert!(QUAD_VERTEX_SRC.contains("vec2(1.0, -1.0)"));
    }
}
