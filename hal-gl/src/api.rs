//! OpenGL entry points.
//!
//! The raw bindings are generated at build time. Everything else in the crate goes through
//! [GlApi], a safe object-safe facade with one method per native call, so that the driver can be
//! replaced by a recording implementation in tests.
#![allow(
    non_upper_case_globals,
    non_snake_case,
    non_camel_case_types,
    clippy::all,
    unused
)]

mod bindings {
    include!(concat!(env!("OUT_DIR"), "/gl_bindings.rs"));
}

pub use self::bindings::*;

use self::types::*;
use std::ffi::{CStr, CString};
use std::fmt::{self, Debug};
use std::ops::Deref;
use std::os::raw::{c_char, c_void};
use std::ptr;

/// Returned by translation tables for values with no native counterpart.
pub const INVALID: GLenum = INVALID_ENUM;

fn glbool(v: bool) -> GLboolean {
    if v {
        TRUE
    } else {
        FALSE
    }
}

fn data_ptr(data: Option<&[u8]>) -> *const c_void {
    data.map_or(ptr::null(), |d| d.as_ptr() as *const c_void)
}

fn read_string(buf: Vec<u8>, len: GLsizei) -> String {
    let len = (len.max(0) as usize).min(buf.len());
    String::from_utf8_lossy(&buf[..len]).into_owned()
}

extern "system" fn debug_callback(
    _source: GLenum,
    _ty: GLenum,
    id: GLuint,
    severity: GLenum,
    length: GLsizei,
    msg: *const GLchar,
    _data: *mut GLvoid,
) {
    if msg.is_null() {
        return;
    }
    let bytes = unsafe { std::slice::from_raw_parts(msg as *const u8, length.max(0) as usize) };
    let level = match severity {
        DEBUG_SEVERITY_HIGH => log::Level::Error,
        DEBUG_SEVERITY_MEDIUM => log::Level::Warn,
        DEBUG_SEVERITY_LOW => log::Level::Info,
        DEBUG_SEVERITY_NOTIFICATION => log::Level::Debug,
        _ => log::Level::Debug,
    };
    log!(level, "(GL 0x{:X}) {}", id, String::from_utf8_lossy(bytes));
}

/// Native OpenGL calls used by the device layer.
///
/// Client-memory arguments are passed as slices; `None` data means "null pointer", which for
/// pixel transfers reads from or writes to offset 0 of the bound pixel buffer.
pub trait GlApi: Debug {
    // state
    fn enable(&self, cap: GLenum);
    fn disable(&self, cap: GLenum);
    fn enable_i(&self, cap: GLenum, index: u32);
    fn disable_i(&self, cap: GLenum, index: u32);
    fn blend_func_separate_i(&self, buf: u32, src_rgb: GLenum, dst_rgb: GLenum, src_alpha: GLenum, dst_alpha: GLenum);
    fn blend_equation_separate_i(&self, buf: u32, mode_rgb: GLenum, mode_alpha: GLenum);
    fn color_mask_i(&self, buf: u32, r: bool, g: bool, b: bool, a: bool);
    fn cull_face(&self, mode: GLenum);
    fn front_face(&self, mode: GLenum);
    fn polygon_mode(&self, face: GLenum, mode: GLenum);
    fn depth_func(&self, func: GLenum);
    fn depth_mask(&self, flag: bool);
    fn polygon_offset(&self, factor: f32, units: f32);
    fn stencil_func_separate(&self, face: GLenum, func: GLenum, reference: i32, mask: u32);
    fn stencil_op_separate(&self, face: GLenum, sfail: GLenum, dpfail: GLenum, dppass: GLenum);
    fn stencil_mask_separate(&self, face: GLenum, mask: u32);
    fn line_width(&self, width: f32);
    fn viewport_indexed(&self, index: u32, x: f32, y: f32, w: f32, h: f32);
    fn scissor_indexed(&self, index: u32, x: i32, y: i32, w: i32, h: i32);
    fn viewport(&self, x: i32, y: i32, w: i32, h: i32);
    fn scissor(&self, x: i32, y: i32, w: i32, h: i32);

    // buffers
    fn gen_buffer(&self) -> GLuint;
    fn create_buffer(&self) -> GLuint;
    fn delete_buffer(&self, buffer: GLuint);
    fn bind_buffer(&self, target: GLenum, buffer: GLuint);
    fn bind_buffer_base(&self, target: GLenum, index: u32, buffer: GLuint);
    fn buffer_data(&self, target: GLenum, size: usize, data: Option<&[u8]>, usage: GLenum);
    fn map_buffer_range(&self, target: GLenum, offset: usize, length: usize, access: GLbitfield) -> *mut c_void;
    fn unmap_buffer(&self, target: GLenum) -> bool;
    fn flush_mapped_buffer_range(&self, target: GLenum, offset: usize, length: usize);
    fn get_buffer_sub_data(&self, target: GLenum, offset: usize, out: &mut [u8]);
    fn named_buffer_storage(&self, buffer: GLuint, size: usize, data: Option<&[u8]>, flags: GLbitfield);
    fn map_named_buffer_range(&self, buffer: GLuint, offset: usize, length: usize, access: GLbitfield) -> *mut c_void;
    fn unmap_named_buffer(&self, buffer: GLuint) -> bool;
    fn flush_mapped_named_buffer_range(&self, buffer: GLuint, offset: usize, length: usize);
    fn get_named_buffer_sub_data(&self, buffer: GLuint, offset: usize, out: &mut [u8]);

    // textures
    fn gen_texture(&self) -> GLuint;
    fn create_texture(&self, target: GLenum) -> GLuint;
    fn delete_texture(&self, texture: GLuint);
    fn bind_texture(&self, target: GLenum, texture: GLuint);
    fn active_texture(&self, unit: u32);
    fn bind_texture_unit(&self, unit: u32, texture: GLuint);
    fn tex_parameter_i(&self, target: GLenum, pname: GLenum, param: i32);
    fn texture_parameter_i(&self, texture: GLuint, pname: GLenum, param: i32);
    fn pixel_store_i(&self, pname: GLenum, param: i32);
    fn tex_image_2d(&self, target: GLenum, level: i32, internal: GLenum, w: i32, h: i32, format: GLenum, ty: GLenum, data: Option<&[u8]>);
    fn tex_image_3d(&self, target: GLenum, level: i32, internal: GLenum, w: i32, h: i32, d: i32, format: GLenum, ty: GLenum, data: Option<&[u8]>);
    fn compressed_tex_image_2d(&self, target: GLenum, level: i32, internal: GLenum, w: i32, h: i32, data: &[u8]);
    fn compressed_tex_image_3d(&self, target: GLenum, level: i32, internal: GLenum, w: i32, h: i32, d: i32, data: &[u8]);
    fn tex_image_2d_multisample(&self, target: GLenum, samples: i32, internal: GLenum, w: i32, h: i32);
    fn tex_image_3d_multisample(&self, target: GLenum, samples: i32, internal: GLenum, w: i32, h: i32, d: i32);
    fn tex_sub_image_2d(&self, target: GLenum, level: i32, x: i32, y: i32, w: i32, h: i32, format: GLenum, ty: GLenum, data: Option<&[u8]>);
    fn texture_storage_2d(&self, texture: GLuint, levels: i32, internal: GLenum, w: i32, h: i32);
    fn texture_storage_3d(&self, texture: GLuint, levels: i32, internal: GLenum, w: i32, h: i32, d: i32);
    fn texture_storage_2d_multisample(&self, texture: GLuint, samples: i32, internal: GLenum, w: i32, h: i32);
    fn texture_storage_3d_multisample(&self, texture: GLuint, samples: i32, internal: GLenum, w: i32, h: i32, d: i32);
    fn texture_sub_image_2d(&self, texture: GLuint, level: i32, x: i32, y: i32, w: i32, h: i32, format: GLenum, ty: GLenum, data: Option<&[u8]>);
    fn texture_sub_image_3d(&self, texture: GLuint, level: i32, x: i32, y: i32, z: i32, w: i32, h: i32, d: i32, format: GLenum, ty: GLenum, data: Option<&[u8]>);
    fn compressed_texture_sub_image_2d(&self, texture: GLuint, level: i32, x: i32, y: i32, w: i32, h: i32, format: GLenum, data: &[u8]);
    fn compressed_texture_sub_image_3d(&self, texture: GLuint, level: i32, x: i32, y: i32, z: i32, w: i32, h: i32, d: i32, format: GLenum, data: &[u8]);
    fn generate_mipmap(&self, target: GLenum);
    fn generate_texture_mipmap(&self, texture: GLuint);
    /// Reads a level into the bound pixel pack buffer at offset 0.
    fn get_tex_image(&self, target: GLenum, level: i32, format: GLenum, ty: GLenum);
    fn get_texture_image(&self, texture: GLuint, level: i32, format: GLenum, ty: GLenum, size: usize);
    /// Reads from the bound read framebuffer into the bound pixel pack buffer at offset 0.
    fn read_pixels(&self, x: i32, y: i32, w: i32, h: i32, format: GLenum, ty: GLenum);

    // samplers
    fn gen_sampler(&self) -> GLuint;
    fn delete_sampler(&self, sampler: GLuint);
    fn sampler_parameter_i(&self, sampler: GLuint, pname: GLenum, param: i32);
    fn sampler_parameter_f(&self, sampler: GLuint, pname: GLenum, param: f32);
    fn bind_sampler(&self, unit: u32, sampler: GLuint);

    // shaders and programs
    fn create_shader(&self, stage: GLenum) -> GLuint;
    fn shader_source(&self, shader: GLuint, source: &str);
    fn compile_shader(&self, shader: GLuint);
    fn get_shader_iv(&self, shader: GLuint, pname: GLenum) -> i32;
    fn get_shader_info_log(&self, shader: GLuint) -> String;
    fn delete_shader(&self, shader: GLuint);
    fn create_program(&self) -> GLuint;
    fn attach_shader(&self, program: GLuint, shader: GLuint);
    fn link_program(&self, program: GLuint);
    fn get_program_iv(&self, program: GLuint, pname: GLenum) -> i32;
    fn get_program_info_log(&self, program: GLuint) -> String;
    fn delete_program(&self, program: GLuint);
    fn use_program(&self, program: GLuint);
    /// (name, array size, type)
    fn get_active_attrib(&self, program: GLuint, index: u32) -> (String, i32, GLenum);
    fn get_attrib_location(&self, program: GLuint, name: &str) -> i32;
    /// (name, array size, type)
    fn get_active_uniform(&self, program: GLuint, index: u32) -> (String, i32, GLenum);
    fn get_uniform_location(&self, program: GLuint, name: &str) -> i32;
    fn get_active_uniform_block_name(&self, program: GLuint, index: u32) -> String;
    fn get_active_uniform_block_iv(&self, program: GLuint, index: u32, pname: GLenum) -> i32;
    fn get_active_uniform_block_indices(&self, program: GLuint, index: u32) -> Vec<u32>;
    fn get_active_uniforms_iv(&self, program: GLuint, indices: &[u32], pname: GLenum) -> Vec<i32>;
    fn uniform_block_binding(&self, program: GLuint, index: u32, binding: u32);
    /// `values.len()` must be a multiple of `components` (1 to 4).
    fn program_uniform_iv(&self, program: GLuint, location: i32, components: u32, values: &[i32]);
    fn program_uniform_uiv(&self, program: GLuint, location: i32, components: u32, values: &[u32]);
    fn program_uniform_fv(&self, program: GLuint, location: i32, components: u32, values: &[f32]);
    /// `dim` is 2, 3 or 4; `values.len()` must be a multiple of `dim * dim`.
    fn program_uniform_matrix_fv(&self, program: GLuint, location: i32, dim: u32, transpose: bool, values: &[f32]);

    // vertex input
    fn gen_vertex_array(&self) -> GLuint;
    fn delete_vertex_array(&self, vao: GLuint);
    fn bind_vertex_array(&self, vao: GLuint);
    fn enable_vertex_attrib_array(&self, index: u32);
    fn disable_vertex_attrib_array(&self, index: u32);
    fn vertex_attrib_divisor(&self, index: u32, divisor: u32);
    fn vertex_attrib_pointer(&self, index: u32, size: i32, ty: GLenum, normalized: bool, stride: i32, offset: usize);
    fn vertex_attrib_i_pointer(&self, index: u32, size: i32, ty: GLenum, stride: i32, offset: usize);
    fn vertex_attrib_format(&self, index: u32, size: i32, ty: GLenum, normalized: bool, offset: u32);
    fn vertex_attrib_i_format(&self, index: u32, size: i32, ty: GLenum, offset: u32);
    fn vertex_attrib_binding(&self, index: u32, binding: u32);
    fn vertex_binding_divisor(&self, binding: u32, divisor: u32);
    fn bind_vertex_buffer(&self, binding: u32, buffer: GLuint, offset: usize, stride: i32);

    // draws
    fn draw_arrays(&self, mode: GLenum, first: i32, count: i32);
    fn draw_arrays_instanced(&self, mode: GLenum, first: i32, count: i32, instances: i32);
    fn draw_arrays_instanced_base_instance(&self, mode: GLenum, first: i32, count: i32, instances: i32, base_instance: u32);
    fn draw_elements(&self, mode: GLenum, count: i32, ty: GLenum, offset: usize);
    fn draw_elements_instanced_base_vertex(&self, mode: GLenum, count: i32, ty: GLenum, offset: usize, instances: i32, base_vertex: i32);
    fn draw_elements_instanced_base_vertex_base_instance(&self, mode: GLenum, count: i32, ty: GLenum, offset: usize, instances: i32, base_vertex: i32, base_instance: u32);
    fn multi_draw_arrays_indirect(&self, mode: GLenum, offset: usize, count: i32, stride: i32);
    fn multi_draw_elements_indirect(&self, mode: GLenum, ty: GLenum, offset: usize, count: i32, stride: i32);

    // framebuffers
    fn gen_framebuffer(&self) -> GLuint;
    fn create_framebuffer(&self) -> GLuint;
    fn delete_framebuffer(&self, fbo: GLuint);
    fn bind_framebuffer(&self, target: GLenum, fbo: GLuint);
    fn framebuffer_texture_2d(&self, target: GLenum, attachment: GLenum, textarget: GLenum, texture: GLuint, level: i32);
    fn framebuffer_texture_layer(&self, target: GLenum, attachment: GLenum, texture: GLuint, level: i32, layer: i32);
    fn named_framebuffer_texture(&self, fbo: GLuint, attachment: GLenum, texture: GLuint, level: i32);
    fn named_framebuffer_texture_layer(&self, fbo: GLuint, attachment: GLenum, texture: GLuint, level: i32, layer: i32);
    fn draw_buffers(&self, bufs: &[GLenum]);
    fn named_framebuffer_draw_buffers(&self, fbo: GLuint, bufs: &[GLenum]);
    fn check_framebuffer_status(&self, target: GLenum) -> GLenum;
    fn check_named_framebuffer_status(&self, fbo: GLuint, target: GLenum) -> GLenum;
    fn clear_buffer_fv(&self, buffer: GLenum, draw_buffer: i32, value: &[f32]);
    fn clear_buffer_iv(&self, buffer: GLenum, draw_buffer: i32, value: &[i32]);
    fn clear_buffer_fi(&self, buffer: GLenum, draw_buffer: i32, depth: f32, stencil: i32);
    fn blit_framebuffer(&self, src: [i32; 4], dst: [i32; 4], mask: GLbitfield, filter: GLenum);
    fn blit_named_framebuffer(&self, read: GLuint, draw: GLuint, src: [i32; 4], dst: [i32; 4], mask: GLbitfield, filter: GLenum);
    fn invalidate_framebuffer(&self, target: GLenum, attachments: &[GLenum]);
    fn invalidate_named_framebuffer_data(&self, fbo: GLuint, attachments: &[GLenum]);
    fn read_buffer(&self, mode: GLenum);
    fn named_framebuffer_read_buffer(&self, fbo: GLuint, mode: GLenum);
    fn copy_tex_sub_image_2d(&self, target: GLenum, level: i32, xoffset: i32, yoffset: i32, x: i32, y: i32, w: i32, h: i32);
    fn copy_texture_sub_image_2d(&self, texture: GLuint, level: i32, xoffset: i32, yoffset: i32, x: i32, y: i32, w: i32, h: i32);
    fn copy_texture_sub_image_3d(&self, texture: GLuint, level: i32, xoffset: i32, yoffset: i32, zoffset: i32, x: i32, y: i32, w: i32, h: i32);

    // debug and queries
    fn debug_message_control(&self, enabled: bool);
    /// Installs the callback forwarding driver messages to the log.
    fn debug_message_callback(&self);
    fn get_integer(&self, pname: GLenum) -> i32;
    fn get_integer_i(&self, pname: GLenum, index: u32) -> i32;
    fn get_integer64(&self, pname: GLenum) -> i64;
    fn get_float(&self, pname: GLenum) -> f32;
    fn get_string(&self, name: GLenum) -> Option<String>;
    fn get_string_i(&self, name: GLenum, index: u32) -> Option<String>;
    fn get_error(&self) -> GLenum;
}

unsafe fn gen_one(f: impl FnOnce(*mut GLuint)) -> GLuint {
    let mut name = 0;
    f(&mut name);
    name
}

unsafe fn c_string(p: *const GLubyte) -> Option<String> {
    if p.is_null() {
        None
    } else {
        Some(CStr::from_ptr(p as *const c_char).to_string_lossy().into_owned())
    }
}

/// Function table of the current context, loaded through the window system.
pub struct NativeGl(Gl);

impl NativeGl {
    pub fn load_with<F>(loadfn: F) -> NativeGl
    where
        F: FnMut(&'static str) -> *const c_void,
    {
        NativeGl(Gl::load_with(loadfn))
    }
}

impl Deref for NativeGl {
    type Target = Gl;

    fn deref(&self) -> &Gl {
        &self.0
    }
}

impl fmt::Debug for NativeGl {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "NativeGl {{..}}")
    }
}

impl GlApi for NativeGl {
    fn enable(&self, cap: GLenum) {
        unsafe { self.Enable(cap) }
    }
    fn disable(&self, cap: GLenum) {
        unsafe { self.Disable(cap) }
    }
    fn enable_i(&self, cap: GLenum, index: u32) {
        unsafe { self.Enablei(cap, index) }
    }
    fn disable_i(&self, cap: GLenum, index: u32) {
        unsafe { self.Disablei(cap, index) }
    }
    fn blend_func_separate_i(&self, buf: u32, src_rgb: GLenum, dst_rgb: GLenum, src_alpha: GLenum, dst_alpha: GLenum) {
        unsafe { self.BlendFuncSeparatei(buf, src_rgb, dst_rgb, src_alpha, dst_alpha) }
    }
    fn blend_equation_separate_i(&self, buf: u32, mode_rgb: GLenum, mode_alpha: GLenum) {
        unsafe { self.BlendEquationSeparatei(buf, mode_rgb, mode_alpha) }
    }
    fn color_mask_i(&self, buf: u32, r: bool, g: bool, b: bool, a: bool) {
        unsafe { self.ColorMaski(buf, glbool(r), glbool(g), glbool(b), glbool(a)) }
    }
    fn cull_face(&self, mode: GLenum) {
        unsafe { self.CullFace(mode) }
    }
    fn front_face(&self, mode: GLenum) {
        unsafe { self.FrontFace(mode) }
    }
    fn polygon_mode(&self, face: GLenum, mode: GLenum) {
        unsafe { self.PolygonMode(face, mode) }
    }
    fn depth_func(&self, func: GLenum) {
        unsafe { self.DepthFunc(func) }
    }
    fn depth_mask(&self, flag: bool) {
        unsafe { self.DepthMask(glbool(flag)) }
    }
    fn polygon_offset(&self, factor: f32, units: f32) {
        unsafe { self.PolygonOffset(factor, units) }
    }
    fn stencil_func_separate(&self, face: GLenum, func: GLenum, reference: i32, mask: u32) {
        unsafe { self.StencilFuncSeparate(face, func, reference, mask) }
    }
    fn stencil_op_separate(&self, face: GLenum, sfail: GLenum, dpfail: GLenum, dppass: GLenum) {
        unsafe { self.StencilOpSeparate(face, sfail, dpfail, dppass) }
    }
    fn stencil_mask_separate(&self, face: GLenum, mask: u32) {
        unsafe { self.StencilMaskSeparate(face, mask) }
    }
    fn line_width(&self, width: f32) {
        unsafe { self.LineWidth(width) }
    }
    fn viewport_indexed(&self, index: u32, x: f32, y: f32, w: f32, h: f32) {
        unsafe { self.ViewportIndexedf(index, x, y, w, h) }
    }
    fn scissor_indexed(&self, index: u32, x: i32, y: i32, w: i32, h: i32) {
        unsafe { self.ScissorIndexed(index, x, y, w, h) }
    }
    fn viewport(&self, x: i32, y: i32, w: i32, h: i32) {
        unsafe { self.Viewport(x, y, w, h) }
    }
    fn scissor(&self, x: i32, y: i32, w: i32, h: i32) {
        unsafe { self.Scissor(x, y, w, h) }
    }

    fn gen_buffer(&self) -> GLuint {
        unsafe { gen_one(|p| self.GenBuffers(1, p)) }
    }
    fn create_buffer(&self) -> GLuint {
        unsafe { gen_one(|p| self.CreateBuffers(1, p)) }
    }
    fn delete_buffer(&self, buffer: GLuint) {
        unsafe { self.DeleteBuffers(1, &buffer) }
    }
    fn bind_buffer(&self, target: GLenum, buffer: GLuint) {
        unsafe { self.BindBuffer(target, buffer) }
    }
    fn bind_buffer_base(&self, target: GLenum, index: u32, buffer: GLuint) {
        unsafe { self.BindBufferBase(target, index, buffer) }
    }
    fn buffer_data(&self, target: GLenum, size: usize, data: Option<&[u8]>, usage: GLenum) {
        unsafe { self.BufferData(target, size as GLsizeiptr, data_ptr(data), usage) }
    }
    fn map_buffer_range(&self, target: GLenum, offset: usize, length: usize, access: GLbitfield) -> *mut c_void {
        unsafe { self.MapBufferRange(target, offset as GLintptr, length as GLsizeiptr, access) }
    }
    fn unmap_buffer(&self, target: GLenum) -> bool {
        unsafe { self.UnmapBuffer(target) == TRUE }
    }
    fn flush_mapped_buffer_range(&self, target: GLenum, offset: usize, length: usize) {
        unsafe { self.FlushMappedBufferRange(target, offset as GLintptr, length as GLsizeiptr) }
    }
    fn get_buffer_sub_data(&self, target: GLenum, offset: usize, out: &mut [u8]) {
        unsafe {
            self.GetBufferSubData(
                target,
                offset as GLintptr,
                out.len() as GLsizeiptr,
                out.as_mut_ptr() as *mut c_void,
            )
        }
    }
    fn named_buffer_storage(&self, buffer: GLuint, size: usize, data: Option<&[u8]>, flags: GLbitfield) {
        unsafe { self.NamedBufferStorage(buffer, size as GLsizeiptr, data_ptr(data), flags) }
    }
    fn map_named_buffer_range(&self, buffer: GLuint, offset: usize, length: usize, access: GLbitfield) -> *mut c_void {
        unsafe { self.MapNamedBufferRange(buffer, offset as GLintptr, length as GLsizeiptr, access) }
    }
    fn unmap_named_buffer(&self, buffer: GLuint) -> bool {
        unsafe { self.UnmapNamedBuffer(buffer) == TRUE }
    }
    fn flush_mapped_named_buffer_range(&self, buffer: GLuint, offset: usize, length: usize) {
        unsafe { self.FlushMappedNamedBufferRange(buffer, offset as GLintptr, length as GLsizeiptr) }
    }
    fn get_named_buffer_sub_data(&self, buffer: GLuint, offset: usize, out: &mut [u8]) {
        unsafe {
            self.GetNamedBufferSubData(
                buffer,
                offset as GLintptr,
                out.len() as GLsizeiptr,
                out.as_mut_ptr() as *mut c_void,
            )
        }
    }

    fn gen_texture(&self) -> GLuint {
        unsafe { gen_one(|p| self.GenTextures(1, p)) }
    }
    fn create_texture(&self, target: GLenum) -> GLuint {
        unsafe { gen_one(|p| self.CreateTextures(target, 1, p)) }
    }
    fn delete_texture(&self, texture: GLuint) {
        unsafe { self.DeleteTextures(1, &texture) }
    }
    fn bind_texture(&self, target: GLenum, texture: GLuint) {
        unsafe { self.BindTexture(target, texture) }
    }
    fn active_texture(&self, unit: u32) {
        unsafe { self.ActiveTexture(TEXTURE0 + unit) }
    }
    fn bind_texture_unit(&self, unit: u32, texture: GLuint) {
        unsafe { self.BindTextureUnit(unit, texture) }
    }
    fn tex_parameter_i(&self, target: GLenum, pname: GLenum, param: i32) {
        unsafe { self.TexParameteri(target, pname, param) }
    }
    fn texture_parameter_i(&self, texture: GLuint, pname: GLenum, param: i32) {
        unsafe { self.TextureParameteri(texture, pname, param) }
    }
    fn pixel_store_i(&self, pname: GLenum, param: i32) {
        unsafe { self.PixelStorei(pname, param) }
    }
    fn tex_image_2d(&self, target: GLenum, level: i32, internal: GLenum, w: i32, h: i32, format: GLenum, ty: GLenum, data: Option<&[u8]>) {
        unsafe { self.TexImage2D(target, level, internal as GLint, w, h, 0, format, ty, data_ptr(data)) }
    }
    fn tex_image_3d(&self, target: GLenum, level: i32, internal: GLenum, w: i32, h: i32, d: i32, format: GLenum, ty: GLenum, data: Option<&[u8]>) {
        unsafe { self.TexImage3D(target, level, internal as GLint, w, h, d, 0, format, ty, data_ptr(data)) }
    }
    fn compressed_tex_image_2d(&self, target: GLenum, level: i32, internal: GLenum, w: i32, h: i32, data: &[u8]) {
        unsafe {
            self.CompressedTexImage2D(target, level, internal, w, h, 0, data.len() as GLsizei, data.as_ptr() as *const c_void)
        }
    }
    fn compressed_tex_image_3d(&self, target: GLenum, level: i32, internal: GLenum, w: i32, h: i32, d: i32, data: &[u8]) {
        unsafe {
            self.CompressedTexImage3D(target, level, internal, w, h, d, 0, data.len() as GLsizei, data.as_ptr() as *const c_void)
        }
    }
    fn tex_image_2d_multisample(&self, target: GLenum, samples: i32, internal: GLenum, w: i32, h: i32) {
        unsafe { self.TexImage2DMultisample(target, samples, internal, w, h, TRUE) }
    }
    fn tex_image_3d_multisample(&self, target: GLenum, samples: i32, internal: GLenum, w: i32, h: i32, d: i32) {
        unsafe { self.TexImage3DMultisample(target, samples, internal, w, h, d, TRUE) }
    }
    fn tex_sub_image_2d(&self, target: GLenum, level: i32, x: i32, y: i32, w: i32, h: i32, format: GLenum, ty: GLenum, data: Option<&[u8]>) {
        unsafe { self.TexSubImage2D(target, level, x, y, w, h, format, ty, data_ptr(data)) }
    }
    fn texture_storage_2d(&self, texture: GLuint, levels: i32, internal: GLenum, w: i32, h: i32) {
        unsafe { self.TextureStorage2D(texture, levels, internal, w, h) }
    }
    fn texture_storage_3d(&self, texture: GLuint, levels: i32, internal: GLenum, w: i32, h: i32, d: i32) {
        unsafe { self.TextureStorage3D(texture, levels, internal, w, h, d) }
    }
    fn texture_storage_2d_multisample(&self, texture: GLuint, samples: i32, internal: GLenum, w: i32, h: i32) {
        unsafe { self.TextureStorage2DMultisample(texture, samples, internal, w, h, TRUE) }
    }
    fn texture_storage_3d_multisample(&self, texture: GLuint, samples: i32, internal: GLenum, w: i32, h: i32, d: i32) {
        unsafe { self.TextureStorage3DMultisample(texture, samples, internal, w, h, d, TRUE) }
    }
    fn texture_sub_image_2d(&self, texture: GLuint, level: i32, x: i32, y: i32, w: i32, h: i32, format: GLenum, ty: GLenum, data: Option<&[u8]>) {
        unsafe { self.TextureSubImage2D(texture, level, x, y, w, h, format, ty, data_ptr(data)) }
    }
    fn texture_sub_image_3d(&self, texture: GLuint, level: i32, x: i32, y: i32, z: i32, w: i32, h: i32, d: i32, format: GLenum, ty: GLenum, data: Option<&[u8]>) {
        unsafe { self.TextureSubImage3D(texture, level, x, y, z, w, h, d, format, ty, data_ptr(data)) }
    }
    fn compressed_texture_sub_image_2d(&self, texture: GLuint, level: i32, x: i32, y: i32, w: i32, h: i32, format: GLenum, data: &[u8]) {
        unsafe {
            self.CompressedTextureSubImage2D(texture, level, x, y, w, h, format, data.len() as GLsizei, data.as_ptr() as *const c_void)
        }
    }
    fn compressed_texture_sub_image_3d(&self, texture: GLuint, level: i32, x: i32, y: i32, z: i32, w: i32, h: i32, d: i32, format: GLenum, data: &[u8]) {
        unsafe {
            self.CompressedTextureSubImage3D(texture, level, x, y, z, w, h, d, format, data.len() as GLsizei, data.as_ptr() as *const c_void)
        }
    }
    fn generate_mipmap(&self, target: GLenum) {
        unsafe { self.GenerateMipmap(target) }
    }
    fn generate_texture_mipmap(&self, texture: GLuint) {
        unsafe { self.GenerateTextureMipmap(texture) }
    }
    fn get_tex_image(&self, target: GLenum, level: i32, format: GLenum, ty: GLenum) {
        unsafe { self.GetTexImage(target, level, format, ty, ptr::null_mut()) }
    }
    fn get_texture_image(&self, texture: GLuint, level: i32, format: GLenum, ty: GLenum, size: usize) {
        unsafe { self.GetTextureImage(texture, level, format, ty, size as GLsizei, ptr::null_mut()) }
    }
    fn read_pixels(&self, x: i32, y: i32, w: i32, h: i32, format: GLenum, ty: GLenum) {
        unsafe { self.ReadPixels(x, y, w, h, format, ty, ptr::null_mut()) }
    }

    fn gen_sampler(&self) -> GLuint {
        unsafe { gen_one(|p| self.GenSamplers(1, p)) }
    }
    fn delete_sampler(&self, sampler: GLuint) {
        unsafe { self.DeleteSamplers(1, &sampler) }
    }
    fn sampler_parameter_i(&self, sampler: GLuint, pname: GLenum, param: i32) {
        unsafe { self.SamplerParameteri(sampler, pname, param) }
    }
    fn sampler_parameter_f(&self, sampler: GLuint, pname: GLenum, param: f32) {
        unsafe { self.SamplerParameterf(sampler, pname, param) }
    }
    fn bind_sampler(&self, unit: u32, sampler: GLuint) {
        unsafe { self.BindSampler(unit, sampler) }
    }

    fn create_shader(&self, stage: GLenum) -> GLuint {
        unsafe { self.CreateShader(stage) }
    }
    fn shader_source(&self, shader: GLuint, source: &str) {
        let sources = [source.as_ptr() as *const GLchar];
        let lengths = [source.len() as GLint];
        unsafe { self.ShaderSource(shader, 1, sources.as_ptr(), lengths.as_ptr()) }
    }
    fn compile_shader(&self, shader: GLuint) {
        unsafe { self.CompileShader(shader) }
    }
    fn get_shader_iv(&self, shader: GLuint, pname: GLenum) -> i32 {
        let mut v = 0;
        unsafe { self.GetShaderiv(shader, pname, &mut v) };
        v
    }
    fn get_shader_info_log(&self, shader: GLuint) -> String {
        let size = self.get_shader_iv(shader, INFO_LOG_LENGTH);
        let mut buf = vec![0u8; size.max(1) as usize];
        let mut len = 0;
        unsafe { self.GetShaderInfoLog(shader, buf.len() as GLsizei, &mut len, buf.as_mut_ptr() as *mut GLchar) };
        read_string(buf, len)
    }
    fn delete_shader(&self, shader: GLuint) {
        unsafe { self.DeleteShader(shader) }
    }
    fn create_program(&self) -> GLuint {
        unsafe { self.CreateProgram() }
    }
    fn attach_shader(&self, program: GLuint, shader: GLuint) {
        unsafe { self.AttachShader(program, shader) }
    }
    fn link_program(&self, program: GLuint) {
        unsafe { self.LinkProgram(program) }
    }
    fn get_program_iv(&self, program: GLuint, pname: GLenum) -> i32 {
        let mut v = 0;
        unsafe { self.GetProgramiv(program, pname, &mut v) };
        v
    }
    fn get_program_info_log(&self, program: GLuint) -> String {
        let size = self.get_program_iv(program, INFO_LOG_LENGTH);
        let mut buf = vec![0u8; size.max(1) as usize];
        let mut len = 0;
        unsafe { self.GetProgramInfoLog(program, buf.len() as GLsizei, &mut len, buf.as_mut_ptr() as *mut GLchar) };
        read_string(buf, len)
    }
    fn delete_program(&self, program: GLuint) {
        unsafe { self.DeleteProgram(program) }
    }
    fn use_program(&self, program: GLuint) {
        unsafe { self.UseProgram(program) }
    }
    fn get_active_attrib(&self, program: GLuint, index: u32) -> (String, i32, GLenum) {
        let max = self.get_program_iv(program, ACTIVE_ATTRIBUTE_MAX_LENGTH);
        let mut buf = vec![0u8; max.max(1) as usize];
        let (mut len, mut size, mut ty) = (0, 0, 0);
        unsafe {
            self.GetActiveAttrib(program, index, buf.len() as GLsizei, &mut len, &mut size, &mut ty, buf.as_mut_ptr() as *mut GLchar)
        };
        (read_string(buf, len), size, ty)
    }
    fn get_attrib_location(&self, program: GLuint, name: &str) -> i32 {
        match CString::new(name) {
            Ok(name) => unsafe { self.GetAttribLocation(program, name.as_ptr()) },
            Err(_) => -1,
        }
    }
    fn get_active_uniform(&self, program: GLuint, index: u32) -> (String, i32, GLenum) {
        let max = self.get_program_iv(program, ACTIVE_UNIFORM_MAX_LENGTH);
        let mut buf = vec![0u8; max.max(1) as usize];
        let (mut len, mut size, mut ty) = (0, 0, 0);
        unsafe {
            self.GetActiveUniform(program, index, buf.len() as GLsizei, &mut len, &mut size, &mut ty, buf.as_mut_ptr() as *mut GLchar)
        };
        (read_string(buf, len), size, ty)
    }
    fn get_uniform_location(&self, program: GLuint, name: &str) -> i32 {
        match CString::new(name) {
            Ok(name) => unsafe { self.GetUniformLocation(program, name.as_ptr()) },
            Err(_) => -1,
        }
    }
    fn get_active_uniform_block_name(&self, program: GLuint, index: u32) -> String {
        let max = self.get_active_uniform_block_iv(program, index, UNIFORM_BLOCK_NAME_LENGTH);
        let mut buf = vec![0u8; max.max(1) as usize];
        let mut len = 0;
        unsafe {
            self.GetActiveUniformBlockName(program, index, buf.len() as GLsizei, &mut len, buf.as_mut_ptr() as *mut GLchar)
        };
        read_string(buf, len)
    }
    fn get_active_uniform_block_iv(&self, program: GLuint, index: u32, pname: GLenum) -> i32 {
        let mut v = 0;
        unsafe { self.GetActiveUniformBlockiv(program, index, pname, &mut v) };
        v
    }
    fn get_active_uniform_block_indices(&self, program: GLuint, index: u32) -> Vec<u32> {
        let count = self.get_active_uniform_block_iv(program, index, UNIFORM_BLOCK_ACTIVE_UNIFORMS);
        let mut indices = vec![0i32; count.max(0) as usize];
        if !indices.is_empty() {
            unsafe {
                self.GetActiveUniformBlockiv(program, index, UNIFORM_BLOCK_ACTIVE_UNIFORM_INDICES, indices.as_mut_ptr())
            };
        }
        indices.into_iter().map(|i| i as u32).collect()
    }
    fn get_active_uniforms_iv(&self, program: GLuint, indices: &[u32], pname: GLenum) -> Vec<i32> {
        let mut out = vec![0i32; indices.len()];
        if !indices.is_empty() {
            unsafe {
                self.GetActiveUniformsiv(program, indices.len() as GLsizei, indices.as_ptr(), pname, out.as_mut_ptr())
            };
        }
        out
    }
    fn uniform_block_binding(&self, program: GLuint, index: u32, binding: u32) {
        unsafe { self.UniformBlockBinding(program, index, binding) }
    }
    fn program_uniform_iv(&self, program: GLuint, location: i32, components: u32, values: &[i32]) {
        let count = (values.len() / components.max(1) as usize) as GLsizei;
        unsafe {
            match components {
                1 => self.ProgramUniform1iv(program, location, count, values.as_ptr()),
                2 => self.ProgramUniform2iv(program, location, count, values.as_ptr()),
                3 => self.ProgramUniform3iv(program, location, count, values.as_ptr()),
                _ => self.ProgramUniform4iv(program, location, count, values.as_ptr()),
            }
        }
    }
    fn program_uniform_uiv(&self, program: GLuint, location: i32, components: u32, values: &[u32]) {
        let count = (values.len() / components.max(1) as usize) as GLsizei;
        unsafe {
            match components {
                1 => self.ProgramUniform1uiv(program, location, count, values.as_ptr()),
                2 => self.ProgramUniform2uiv(program, location, count, values.as_ptr()),
                3 => self.ProgramUniform3uiv(program, location, count, values.as_ptr()),
                _ => self.ProgramUniform4uiv(program, location, count, values.as_ptr()),
            }
        }
    }
    fn program_uniform_fv(&self, program: GLuint, location: i32, components: u32, values: &[f32]) {
        let count = (values.len() / components.max(1) as usize) as GLsizei;
        unsafe {
            match components {
                1 => self.ProgramUniform1fv(program, location, count, values.as_ptr()),
                2 => self.ProgramUniform2fv(program, location, count, values.as_ptr()),
                3 => self.ProgramUniform3fv(program, location, count, values.as_ptr()),
                _ => self.ProgramUniform4fv(program, location, count, values.as_ptr()),
            }
        }
    }
    fn program_uniform_matrix_fv(&self, program: GLuint, location: i32, dim: u32, transpose: bool, values: &[f32]) {
        let count = (values.len() / (dim * dim).max(1) as usize) as GLsizei;
        unsafe {
            match dim {
                2 => self.ProgramUniformMatrix2fv(program, location, count, glbool(transpose), values.as_ptr()),
                3 => self.ProgramUniformMatrix3fv(program, location, count, glbool(transpose), values.as_ptr()),
                _ => self.ProgramUniformMatrix4fv(program, location, count, glbool(transpose), values.as_ptr()),
            }
        }
    }

    fn gen_vertex_array(&self) -> GLuint {
        unsafe { gen_one(|p| self.GenVertexArrays(1, p)) }
    }
    fn delete_vertex_array(&self, vao: GLuint) {
        unsafe { self.DeleteVertexArrays(1, &vao) }
    }
    fn bind_vertex_array(&self, vao: GLuint) {
        unsafe { self.BindVertexArray(vao) }
    }
    fn enable_vertex_attrib_array(&self, index: u32) {
        unsafe { self.EnableVertexAttribArray(index) }
    }
    fn disable_vertex_attrib_array(&self, index: u32) {
        unsafe { self.DisableVertexAttribArray(index) }
    }
    fn vertex_attrib_divisor(&self, index: u32, divisor: u32) {
        unsafe { self.VertexAttribDivisor(index, divisor) }
    }
    fn vertex_attrib_pointer(&self, index: u32, size: i32, ty: GLenum, normalized: bool, stride: i32, offset: usize) {
        unsafe { self.VertexAttribPointer(index, size, ty, glbool(normalized), stride, offset as *const c_void) }
    }
    fn vertex_attrib_i_pointer(&self, index: u32, size: i32, ty: GLenum, stride: i32, offset: usize) {
        unsafe { self.VertexAttribIPointer(index, size, ty, stride, offset as *const c_void) }
    }
    fn vertex_attrib_format(&self, index: u32, size: i32, ty: GLenum, normalized: bool, offset: u32) {
        unsafe { self.VertexAttribFormat(index, size, ty, glbool(normalized), offset) }
    }
    fn vertex_attrib_i_format(&self, index: u32, size: i32, ty: GLenum, offset: u32) {
        unsafe { self.VertexAttribIFormat(index, size, ty, offset) }
    }
    fn vertex_attrib_binding(&self, index: u32, binding: u32) {
        unsafe { self.VertexAttribBinding(index, binding) }
    }
    fn vertex_binding_divisor(&self, binding: u32, divisor: u32) {
        unsafe { self.VertexBindingDivisor(binding, divisor) }
    }
    fn bind_vertex_buffer(&self, binding: u32, buffer: GLuint, offset: usize, stride: i32) {
        unsafe { self.BindVertexBuffer(binding, buffer, offset as GLintptr, stride) }
    }

    fn draw_arrays(&self, mode: GLenum, first: i32, count: i32) {
        unsafe { self.DrawArrays(mode, first, count) }
    }
    fn draw_arrays_instanced(&self, mode: GLenum, first: i32, count: i32, instances: i32) {
        unsafe { self.DrawArraysInstanced(mode, first, count, instances) }
    }
    fn draw_arrays_instanced_base_instance(&self, mode: GLenum, first: i32, count: i32, instances: i32, base_instance: u32) {
        unsafe { self.DrawArraysInstancedBaseInstance(mode, first, count, instances, base_instance) }
    }
    fn draw_elements(&self, mode: GLenum, count: i32, ty: GLenum, offset: usize) {
        unsafe { self.DrawElements(mode, count, ty, offset as *const c_void) }
    }
    fn draw_elements_instanced_base_vertex(&self, mode: GLenum, count: i32, ty: GLenum, offset: usize, instances: i32, base_vertex: i32) {
        unsafe { self.DrawElementsInstancedBaseVertex(mode, count, ty, offset as *const c_void, instances, base_vertex) }
    }
    fn draw_elements_instanced_base_vertex_base_instance(&self, mode: GLenum, count: i32, ty: GLenum, offset: usize, instances: i32, base_vertex: i32, base_instance: u32) {
        unsafe {
            self.DrawElementsInstancedBaseVertexBaseInstance(mode, count, ty, offset as *const c_void, instances, base_vertex, base_instance)
        }
    }
    fn multi_draw_arrays_indirect(&self, mode: GLenum, offset: usize, count: i32, stride: i32) {
        unsafe { self.MultiDrawArraysIndirect(mode, offset as *const c_void, count, stride) }
    }
    fn multi_draw_elements_indirect(&self, mode: GLenum, ty: GLenum, offset: usize, count: i32, stride: i32) {
        unsafe { self.MultiDrawElementsIndirect(mode, ty, offset as *const c_void, count, stride) }
    }

    fn gen_framebuffer(&self) -> GLuint {
        unsafe { gen_one(|p| self.GenFramebuffers(1, p)) }
    }
    fn create_framebuffer(&self) -> GLuint {
        unsafe { gen_one(|p| self.CreateFramebuffers(1, p)) }
    }
    fn delete_framebuffer(&self, fbo: GLuint) {
        unsafe { self.DeleteFramebuffers(1, &fbo) }
    }
    fn bind_framebuffer(&self, target: GLenum, fbo: GLuint) {
        unsafe { self.BindFramebuffer(target, fbo) }
    }
    fn framebuffer_texture_2d(&self, target: GLenum, attachment: GLenum, textarget: GLenum, texture: GLuint, level: i32) {
        unsafe { self.FramebufferTexture2D(target, attachment, textarget, texture, level) }
    }
    fn framebuffer_texture_layer(&self, target: GLenum, attachment: GLenum, texture: GLuint, level: i32, layer: i32) {
        unsafe { self.FramebufferTextureLayer(target, attachment, texture, level, layer) }
    }
    fn named_framebuffer_texture(&self, fbo: GLuint, attachment: GLenum, texture: GLuint, level: i32) {
        unsafe { self.NamedFramebufferTexture(fbo, attachment, texture, level) }
    }
    fn named_framebuffer_texture_layer(&self, fbo: GLuint, attachment: GLenum, texture: GLuint, level: i32, layer: i32) {
        unsafe { self.NamedFramebufferTextureLayer(fbo, attachment, texture, level, layer) }
    }
    fn draw_buffers(&self, bufs: &[GLenum]) {
        unsafe { self.DrawBuffers(bufs.len() as GLsizei, bufs.as_ptr()) }
    }
    fn named_framebuffer_draw_buffers(&self, fbo: GLuint, bufs: &[GLenum]) {
        unsafe { self.NamedFramebufferDrawBuffers(fbo, bufs.len() as GLsizei, bufs.as_ptr()) }
    }
    fn check_framebuffer_status(&self, target: GLenum) -> GLenum {
        unsafe { self.CheckFramebufferStatus(target) }
    }
    fn check_named_framebuffer_status(&self, fbo: GLuint, target: GLenum) -> GLenum {
        unsafe { self.CheckNamedFramebufferStatus(fbo, target) }
    }
    fn clear_buffer_fv(&self, buffer: GLenum, draw_buffer: i32, value: &[f32]) {
        unsafe { self.ClearBufferfv(buffer, draw_buffer, value.as_ptr()) }
    }
    fn clear_buffer_iv(&self, buffer: GLenum, draw_buffer: i32, value: &[i32]) {
        unsafe { self.ClearBufferiv(buffer, draw_buffer, value.as_ptr()) }
    }
    fn clear_buffer_fi(&self, buffer: GLenum, draw_buffer: i32, depth: f32, stencil: i32) {
        unsafe { self.ClearBufferfi(buffer, draw_buffer, depth, stencil) }
    }
    fn blit_framebuffer(&self, src: [i32; 4], dst: [i32; 4], mask: GLbitfield, filter: GLenum) {
        unsafe { self.BlitFramebuffer(src[0], src[1], src[2], src[3], dst[0], dst[1], dst[2], dst[3], mask, filter) }
    }
    fn blit_named_framebuffer(&self, read: GLuint, draw: GLuint, src: [i32; 4], dst: [i32; 4], mask: GLbitfield, filter: GLenum) {
        unsafe {
            self.BlitNamedFramebuffer(read, draw, src[0], src[1], src[2], src[3], dst[0], dst[1], dst[2], dst[3], mask, filter)
        }
    }
    fn invalidate_framebuffer(&self, target: GLenum, attachments: &[GLenum]) {
        unsafe { self.InvalidateFramebuffer(target, attachments.len() as GLsizei, attachments.as_ptr()) }
    }
    fn invalidate_named_framebuffer_data(&self, fbo: GLuint, attachments: &[GLenum]) {
        unsafe { self.InvalidateNamedFramebufferData(fbo, attachments.len() as GLsizei, attachments.as_ptr()) }
    }
    fn read_buffer(&self, mode: GLenum) {
        unsafe { self.ReadBuffer(mode) }
    }
    fn named_framebuffer_read_buffer(&self, fbo: GLuint, mode: GLenum) {
        unsafe { self.NamedFramebufferReadBuffer(fbo, mode) }
    }
    fn copy_tex_sub_image_2d(&self, target: GLenum, level: i32, xoffset: i32, yoffset: i32, x: i32, y: i32, w: i32, h: i32) {
        unsafe { self.CopyTexSubImage2D(target, level, xoffset, yoffset, x, y, w, h) }
    }
    fn copy_texture_sub_image_2d(&self, texture: GLuint, level: i32, xoffset: i32, yoffset: i32, x: i32, y: i32, w: i32, h: i32) {
        unsafe { self.CopyTextureSubImage2D(texture, level, xoffset, yoffset, x, y, w, h) }
    }
    fn copy_texture_sub_image_3d(&self, texture: GLuint, level: i32, xoffset: i32, yoffset: i32, zoffset: i32, x: i32, y: i32, w: i32, h: i32) {
        unsafe { self.CopyTextureSubImage3D(texture, level, xoffset, yoffset, zoffset, x, y, w, h) }
    }

    fn debug_message_control(&self, enabled: bool) {
        unsafe { self.DebugMessageControl(DONT_CARE, DONT_CARE, DONT_CARE, 0, ptr::null(), glbool(enabled)) }
    }
    fn debug_message_callback(&self) {
        unsafe { self.DebugMessageCallback(debug_callback as GLDEBUGPROC, ptr::null()) }
    }
    fn get_integer(&self, pname: GLenum) -> i32 {
        let mut v = 0;
        unsafe { self.GetIntegerv(pname, &mut v) };
        v
    }
    fn get_integer_i(&self, pname: GLenum, index: u32) -> i32 {
        let mut v = 0;
        unsafe { self.GetIntegeri_v(pname, index, &mut v) };
        v
    }
    fn get_integer64(&self, pname: GLenum) -> i64 {
        let mut v = 0;
        unsafe { self.GetInteger64v(pname, &mut v) };
        v
    }
    fn get_float(&self, pname: GLenum) -> f32 {
        let mut v = 0.0;
        unsafe { self.GetFloatv(pname, &mut v) };
        v
    }
    fn get_string(&self, name: GLenum) -> Option<String> {
        unsafe { c_string(self.GetString(name)) }
    }
    fn get_string_i(&self, name: GLenum, index: u32) -> Option<String> {
        unsafe { c_string(self.GetStringi(name, index)) }
    }
    fn get_error(&self) -> GLenum {
        unsafe { self.GetError() }
    }
}
