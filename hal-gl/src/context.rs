//! Device contexts.
//!
//! A context records draws on one window surface. It keeps the bindings it last issued (pipeline,
//! program, descriptor set, vertex and index buffers, framebuffer, viewports and scissors) and the
//! fixed-function state it last submitted, and only talks to the driver when something differs.
use crate::api::types::*;
use crate::api::{self as gl, GlApi, INVALID};
use crate::buffer::GraphicsData;
use crate::descriptor::{same_rc, GlDescriptorSet};
use crate::framebuffer::{GlFramebuffer, GlFramebufferLayout};
use crate::pipeline::{GlPipeline, GlState, VertexBufferSlot};
use crate::property::DeviceProperty;
use crate::swapchain::Swapchain;
use crate::texture::{cube_face_target, GraphicsTexture};
use crate::types;
use octoon_hal::{
    ClearFlags, ColorBlend, ColorMaskFlags, DeviceDesc, DeviceType, Error, Format, IndexType,
    RenderStateDesc, Result, Scissor, StencilFaceFlags, StencilFaceState, TextureDim, Viewport,
};
use smallvec::SmallVec;
use std::cmp::max;
use std::fmt;
use std::rc::Rc;

const STENCIL_FACES: [(StencilFaceFlags, GLenum); 2] = [
    (StencilFaceFlags::FRONT, gl::FRONT),
    (StencilFaceFlags::BACK, gl::BACK),
];

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ContextState {
    Closed,
    Ready,
    /// Between `render_begin` and `render_end`.
    Recording,
}

#[derive(Clone, Debug)]
pub struct ContextDesc {
    pub swapchain: Rc<dyn Swapchain>,
}

impl ContextDesc {
    pub fn new(swapchain: Rc<dyn Swapchain>) -> ContextDesc {
        ContextDesc { swapchain }
    }
}

#[derive(Clone, Debug)]
struct IndexBinding {
    data: Rc<dyn GraphicsData>,
    offset: usize,
    ty: GLenum,
    stride: usize,
}

/// Native attachments to invalidate for the aspects in `flags`.
pub fn invalidation_points(layout: &GlFramebufferLayout, flags: ClearFlags) -> SmallVec<[GLenum; 8]> {
    let mut points = SmallVec::new();
    if flags.contains(ClearFlags::COLOR) {
        points.extend(layout.colors().map(|c| gl::COLOR_ATTACHMENT0 + c.slot));
    }
    if let Some(attachment) = layout.depth_stencil() {
        let format = attachment.format;
        let point = if format.is_depth_stencil() {
            if flags.contains(ClearFlags::DEPTH_STENCIL) {
                Some(gl::DEPTH_STENCIL_ATTACHMENT)
            } else if flags.contains(ClearFlags::DEPTH) {
                Some(gl::DEPTH_ATTACHMENT)
            } else if flags.contains(ClearFlags::STENCIL) {
                Some(gl::STENCIL_ATTACHMENT)
            } else {
                None
            }
        } else if format.is_depth() && flags.contains(ClearFlags::DEPTH) {
            Some(gl::DEPTH_ATTACHMENT)
        } else if format.is_stencil() && flags.contains(ClearFlags::STENCIL) {
            Some(gl::STENCIL_ATTACHMENT)
        } else {
            None
        };
        points.extend(point);
    }
    points
}

//--------------------------------------------------------------------------------------------------
pub struct GlDeviceContext {
    gl: Rc<dyn GlApi>,
    property: Rc<DeviceProperty>,
    swapchain: Rc<dyn Swapchain>,
    device_type: DeviceType,
    status: ContextState,
    vertex_array: GLuint,
    viewport_array: bool,

    default_state: GlState,
    /// State last submitted to the driver.
    captured: RenderStateDesc,
    pipeline: Option<Rc<GlPipeline>>,
    /// Pipeline whose attributes are enabled on the vertex array.
    attributes_owner: Option<Rc<GlPipeline>>,
    program: GLuint,
    need_update_pipeline: bool,

    descriptor_set: Option<Rc<GlDescriptorSet>>,
    need_update_descriptor: bool,

    vertex_buffers: Vec<VertexBufferSlot>,
    index_buffer: Option<IndexBinding>,

    framebuffer: Option<Rc<GlFramebuffer>>,
    viewports: Vec<Viewport>,
    scissors: Vec<Scissor>,

    debug_control: bool,
    pending_debug_control: Option<bool>,
}

impl fmt::Debug for GlDeviceContext {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("GlDeviceContext")
            .field("device_type", &self.device_type)
            .field("status", &self.status)
            .field("vertex_array", &self.vertex_array)
            .field("program", &self.program)
            .field("framebuffer", &self.framebuffer.as_ref().map(|f| f.instance_id()))
            .finish()
    }
}

impl GlDeviceContext {
    /// Makes the swapchain current and brings the driver to the default state.
    ///
    /// `device.device_type` is the path the device settled on, not the one it was asked for.
    pub fn new(
        gl: Rc<dyn GlApi>,
        property: Rc<DeviceProperty>,
        device: DeviceDesc,
        desc: ContextDesc,
    ) -> Result<GlDeviceContext> {
        let swapchain = desc.swapchain;
        if !swapchain.set_active(true) {
            error!("the window system refused to make the context current");
            return Err(Error::InvalidState("swapchain could not be made current"));
        }
        if !property.version_at_least(3, 3) {
            error!("OpenGL {}.{} is not supported, 3.3 is required", property.major, property.minor);
            return Err(Error::Unsupported("OpenGL 3.3"));
        }

        let limits = &property.limits;
        let viewport_array = property.version_at_least(4, 1) || property.has_extension("GL_ARB_viewport_array");
        let viewport_count = if viewport_array {
            max(limits.max_viewports, 1) as usize
        } else {
            1
        };
        let slots = max(max(limits.max_vertex_bindings, limits.max_vertex_attribs), 1) as usize;
        let attachments = max(limits.max_color_attachments, 1) as usize;
        let (width, height) = swapchain.size();

        let mut context = GlDeviceContext {
            gl,
            property: property.clone(),
            swapchain,
            device_type: device.device_type,
            status: ContextState::Closed,
            vertex_array: 0,
            viewport_array,
            default_state: GlState::new(RenderStateDesc::with_blends(ColorBlend::default(), attachments)),
            captured: RenderStateDesc::default(),
            pipeline: None,
            attributes_owner: None,
            program: 0,
            need_update_pipeline: false,
            descriptor_set: None,
            need_update_descriptor: false,
            vertex_buffers: vec![VertexBufferSlot::default(); slots],
            index_buffer: None,
            framebuffer: None,
            viewports: vec![Viewport::new(0.0, 0.0, width as f32, height as f32); viewport_count],
            scissors: vec![Scissor::new(0, 0, width, height); viewport_count],
            debug_control: false,
            pending_debug_control: None,
        };
        context.init(device.debug_control)?;
        Ok(context)
    }

    fn init(&mut self, debug_control: bool) -> Result<()> {
        if debug_control {
            self.start_debug_control();
        }

        let vertex_array = self.gl.gen_vertex_array();
        if vertex_array == 0 {
            error!("glGenVertexArrays returned no name");
            return Err(Error::NativeAllocation("vertex array"));
        }
        self.vertex_array = vertex_array;
        self.gl.bind_vertex_array(vertex_array);

        self.default_state.apply_all(&*self.gl, &mut self.captured)?;
        self.submit_viewport(0);
        self.submit_scissor(0);

        self.status = ContextState::Ready;
        debug!(
            "device context ready ({:?}, {} vertex slots, {} viewports)",
            self.device_type,
            self.vertex_buffers.len(),
            self.viewports.len()
        );
        Ok(())
    }

    /// Releases every binding and the vertex array. Called on drop.
    pub fn close(&mut self) {
        self.pipeline = None;
        self.attributes_owner = None;
        self.descriptor_set = None;
        self.index_buffer = None;
        self.framebuffer = None;
        for slot in self.vertex_buffers.iter_mut() {
            *slot = VertexBufferSlot::default();
        }
        if self.vertex_array != 0 {
            self.gl.delete_vertex_array(self.vertex_array);
            self.vertex_array = 0;
        }
        self.status = ContextState::Closed;
    }

    pub fn status(&self) -> ContextState {
        self.status
    }

    pub fn device_type(&self) -> DeviceType {
        self.device_type
    }

    pub fn swapchain(&self) -> &Rc<dyn Swapchain> {
        &self.swapchain
    }

    /// Fixed-function state as last submitted.
    pub fn captured_state(&self) -> &RenderStateDesc {
        &self.captured
    }

    fn dsa(&self) -> bool {
        self.device_type == DeviceType::OpenGL45
    }

    fn check_open(&self) -> Result<()> {
        if self.status == ContextState::Closed {
            error!("device context used after close");
            return Err(Error::InvalidState("context is closed"));
        }
        Ok(())
    }

    //----------------------------------------------------------------------------------------------
    // Frames

    /// Starts a frame: makes the surface current again if needed, forgets the pipeline and index
    /// buffer so the first draw rebinds them, and applies a pending debug toggle.
    pub fn render_begin(&mut self) -> Result<()> {
        match self.status {
            ContextState::Ready => {}
            ContextState::Recording => {
                error!("render_begin called inside a frame");
                return Err(Error::InvalidState("frame already started"));
            }
            ContextState::Closed => return self.check_open(),
        }

        if !self.swapchain.is_active() && !self.swapchain.set_active(true) {
            error!("the window system refused to make the context current");
            return Err(Error::InvalidState("swapchain could not be made current"));
        }

        self.pipeline = None;
        self.program = 0;
        self.index_buffer = None;

        if let Some(enable) = self.pending_debug_control.take() {
            if enable {
                self.start_debug_control();
            } else {
                self.stop_debug_control();
            }
        }

        self.status = ContextState::Recording;
        Ok(())
    }

    pub fn render_end(&mut self) -> Result<()> {
        if self.status != ContextState::Recording {
            error!("render_end called outside a frame");
            return Err(Error::InvalidState("no frame started"));
        }
        self.status = ContextState::Ready;
        Ok(())
    }

    pub fn present(&self) {
        self.swapchain.present();
    }

    //----------------------------------------------------------------------------------------------
    // Pipeline and resources

    /// Binds `pipeline`, submitting only the state that differs from what the context last
    /// submitted. `None` returns to the default state and unbinds the program.
    pub fn set_render_pipeline(&mut self, pipeline: Option<Rc<GlPipeline>>) -> Result<()> {
        self.check_open()?;
        let gl = &*self.gl;
        match pipeline {
            Some(pipeline) => {
                if let Some(ref current) = self.pipeline {
                    if Rc::ptr_eq(current, &pipeline) {
                        return Ok(());
                    }
                }

                pipeline.state().apply(gl, &mut self.captured)?;

                let program = pipeline.program().instance_id();
                if self.program != program {
                    gl.use_program(program);
                    self.program = program;
                    self.need_update_descriptor = true;
                }

                let same_attributes = self
                    .attributes_owner
                    .as_ref()
                    .map_or(false, |owner| Rc::ptr_eq(owner, &pipeline));
                if !same_attributes {
                    pipeline.apply(gl, self.attributes_owner.as_ref().map(|p| &**p));
                    self.attributes_owner = Some(pipeline.clone());
                }

                self.pipeline = Some(pipeline);
                self.need_update_pipeline = true;
            }
            None => {
                self.default_state.apply(gl, &mut self.captured)?;
                if self.program != 0 {
                    gl.use_program(0);
                    self.program = 0;
                }
                self.pipeline = None;
            }
        }
        Ok(())
    }

    pub fn render_pipeline(&self) -> Option<&Rc<GlPipeline>> {
        self.pipeline.as_ref()
    }

    /// The set is applied against the bound program at the next draw.
    pub fn set_descriptor_set(&mut self, descriptor_set: Option<Rc<GlDescriptorSet>>) {
        self.descriptor_set = descriptor_set;
        self.need_update_descriptor = true;
    }

    pub fn descriptor_set(&self) -> Option<&Rc<GlDescriptorSet>> {
        self.descriptor_set.as_ref()
    }

    /// Records the buffer of a vertex slot. It is attached at the next draw.
    pub fn set_vertex_buffer_data(
        &mut self,
        slot: u32,
        data: Option<Rc<dyn GraphicsData>>,
        offset: usize,
    ) -> Result<()> {
        let count = self.vertex_buffers.len();
        let entry = match self.vertex_buffers.get_mut(slot as usize) {
            Some(entry) => entry,
            None => {
                error!("vertex slot {} exceeds the {} slots of the context", slot, count);
                return Err(Error::InvalidState("vertex slot out of range"));
            }
        };
        if !same_rc(&entry.data, &data) || entry.offset != offset {
            entry.data = data;
            entry.offset = offset;
            entry.dirty = true;
        }
        Ok(())
    }

    pub fn vertex_buffer_data(&self, slot: u32) -> Option<Rc<dyn GraphicsData>> {
        self.vertex_buffers
            .get(slot as usize)
            .and_then(|s| s.data.clone())
    }

    /// Binds the index buffer right away.
    pub fn set_index_buffer_data(
        &mut self,
        data: Option<Rc<dyn GraphicsData>>,
        offset: usize,
        ty: IndexType,
    ) -> Result<()> {
        self.check_open()?;
        let data = match data {
            Some(data) => data,
            None => {
                if self.index_buffer.take().is_some() {
                    self.gl.bind_buffer(gl::ELEMENT_ARRAY_BUFFER, 0);
                }
                return Ok(());
            }
        };

        let native = types::as_index_type(ty);
        if native == INVALID {
            error!("invalid index type {:?}", ty);
            return Err(Error::InvalidEnum("index type"));
        }

        let rebind = match self.index_buffer {
            Some(ref current) => !Rc::ptr_eq(&current.data, &data),
            None => true,
        };
        if rebind {
            self.gl.bind_buffer(gl::ELEMENT_ARRAY_BUFFER, data.instance_id());
        }
        self.index_buffer = Some(IndexBinding {
            data,
            offset,
            ty: native,
            stride: ty.size(),
        });
        Ok(())
    }

    pub fn index_buffer_data(&self) -> Option<Rc<dyn GraphicsData>> {
        self.index_buffer.as_ref().map(|b| b.data.clone())
    }

    //----------------------------------------------------------------------------------------------
    // Viewports, scissors and framebuffers

    fn target_size(&self) -> (u32, u32) {
        match self.framebuffer {
            Some(ref framebuffer) => (framebuffer.width(), framebuffer.height()),
            None => self.swapchain.size(),
        }
    }

    fn submit_viewport(&self, index: usize) {
        let v = self.viewports[index];
        if self.viewport_array {
            self.gl.viewport_indexed(index as u32, v.x, v.y, v.width, v.height);
        } else {
            self.gl.viewport(v.x as i32, v.y as i32, v.width as i32, v.height as i32);
        }
    }

    fn submit_scissor(&self, index: usize) {
        let s = self.scissors[index];
        let (_, height) = self.target_size();
        // top-left origin to bottom-left
        let y = height as i32 - s.height as i32 - s.y as i32;
        if self.viewport_array {
            self.gl.scissor_indexed(index as u32, s.x as i32, y, s.width as i32, s.height as i32);
        } else {
            self.gl.scissor(s.x as i32, y, s.width as i32, s.height as i32);
        }
    }

    pub fn set_viewport(&mut self, index: u32, viewport: Viewport) -> Result<()> {
        let i = index as usize;
        if i >= self.viewports.len() {
            error!("viewport {} exceeds the {} viewports of the context", index, self.viewports.len());
            return Err(Error::InvalidState("viewport index out of range"));
        }
        if self.viewports[i] != viewport {
            self.viewports[i] = viewport;
            self.submit_viewport(i);
        }
        Ok(())
    }

    pub fn viewport(&self, index: u32) -> Option<Viewport> {
        self.viewports.get(index as usize).cloned()
    }

    /// `scissor` uses a top-left origin.
    pub fn set_scissor(&mut self, index: u32, scissor: Scissor) -> Result<()> {
        let i = index as usize;
        if i >= self.scissors.len() {
            error!("scissor {} exceeds the {} scissors of the context", index, self.scissors.len());
            return Err(Error::InvalidState("scissor index out of range"));
        }
        if self.scissors[i] != scissor {
            self.scissors[i] = scissor;
            self.submit_scissor(i);
        }
        Ok(())
    }

    pub fn scissor(&self, index: u32) -> Option<Scissor> {
        self.scissors.get(index as usize).cloned()
    }

    /// Binds `framebuffer` (`None` is the window surface), resets the viewport of every color
    /// attachment to the full target and resubmits the scissors against the new height.
    pub fn set_framebuffer(&mut self, framebuffer: Option<Rc<GlFramebuffer>>) -> Result<()> {
        self.check_open()?;
        if same_rc(&self.framebuffer, &framebuffer) {
            return Ok(());
        }

        let (id, attachments) = match framebuffer {
            Some(ref framebuffer) => (framebuffer.instance_id(), max(framebuffer.layout().colors().count(), 1)),
            None => (0, 1),
        };
        self.gl.bind_framebuffer(gl::FRAMEBUFFER, id);
        self.framebuffer = framebuffer;

        let (width, height) = self.target_size();
        let full = Viewport::new(0.0, 0.0, width as f32, height as f32);
        let count = attachments.min(self.viewports.len());
        for i in 0..count {
            if self.viewports[i] != full {
                self.viewports[i] = full;
                self.submit_viewport(i);
            }
        }
        for i in 0..count {
            self.submit_scissor(i);
        }
        Ok(())
    }

    pub fn framebuffer(&self) -> Option<&Rc<GlFramebuffer>> {
        self.framebuffer.as_ref()
    }

    /// Clears attachment `index` of the bound target. Write masks that would suppress the clear are
    /// lifted for the duration of the call.
    pub fn clear_framebuffer(
        &mut self,
        index: u32,
        flags: ClearFlags,
        color: [f32; 4],
        depth: f32,
        stencil: i32,
    ) -> Result<()> {
        self.check_open()?;
        let gl = &*self.gl;

        let depth_stencil = flags & ClearFlags::DEPTH_STENCIL;
        if !depth_stencil.is_empty() {
            let force_depth = flags.contains(ClearFlags::DEPTH) && !self.captured.depth_write_enable;
            let stencil_mask = self.captured.stencil_front.write_mask;
            let force_stencil = flags.contains(ClearFlags::STENCIL) && stencil_mask != !0;
            if force_depth {
                gl.depth_mask(true);
            }
            if force_stencil {
                gl.stencil_mask_separate(gl::FRONT, !0);
            }

            if depth_stencil == ClearFlags::DEPTH_STENCIL {
                gl.clear_buffer_fi(gl::DEPTH_STENCIL, 0, depth, stencil);
            } else if flags.contains(ClearFlags::DEPTH) {
                gl.clear_buffer_fv(gl::DEPTH, 0, &[depth]);
            } else {
                gl.clear_buffer_iv(gl::STENCIL, 0, &[stencil]);
            }

            if force_depth {
                gl.depth_mask(false);
            }
            if force_stencil {
                gl.stencil_mask_separate(gl::FRONT, stencil_mask);
            }
        }

        if flags.contains(ClearFlags::COLOR) {
            let mask = self
                .captured
                .blends
                .get(index as usize)
                .map_or(ColorMaskFlags::ALL, |b| b.color_write_mask);
            let force_mask = mask != ColorMaskFlags::ALL;
            if force_mask {
                gl.color_mask_i(index, true, true, true, true);
            }
            gl.clear_buffer_fv(gl::COLOR, index as i32, &color);
            if force_mask {
                gl.color_mask_i(
                    index,
                    mask.contains(ColorMaskFlags::RED),
                    mask.contains(ColorMaskFlags::GREEN),
                    mask.contains(ColorMaskFlags::BLUE),
                    mask.contains(ColorMaskFlags::ALPHA),
                );
            }
        }
        Ok(())
    }

    /// Copies the color of `src` to `dest` (`None` is the window surface). Rectangles are
    /// `[x0, y0, x1, y1]`.
    pub fn blit_framebuffer(
        &mut self,
        src: &Rc<GlFramebuffer>,
        src_rect: [i32; 4],
        dest: Option<&Rc<GlFramebuffer>>,
        dest_rect: [i32; 4],
    ) -> Result<()> {
        self.check_open()?;
        let gl = &*self.gl;
        let read = src.instance_id();
        let draw = dest.map_or(0, |f| f.instance_id());
        if self.dsa() {
            gl.blit_named_framebuffer(read, draw, src_rect, dest_rect, gl::COLOR_BUFFER_BIT, gl::NEAREST);
        } else {
            gl.bind_framebuffer(gl::READ_FRAMEBUFFER, read);
            gl.bind_framebuffer(gl::DRAW_FRAMEBUFFER, draw);
            gl.blit_framebuffer(src_rect, dest_rect, gl::COLOR_BUFFER_BIT, gl::NEAREST);
            let current = self.framebuffer.as_ref().map_or(0, |f| f.instance_id());
            gl.bind_framebuffer(gl::FRAMEBUFFER, current);
        }
        Ok(())
    }

    /// Tells the driver the contents of the flagged aspects of the bound target are no longer
    /// needed. Does nothing where invalidation is not available.
    pub fn discard_framebuffer(&mut self, flags: ClearFlags) -> Result<()> {
        self.check_open()?;
        if !self.property.version_at_least(4, 3) && !self.property.has_extension("GL_ARB_invalidate_subdata") {
            trace!("framebuffer invalidation not available, discard ignored");
            return Ok(());
        }

        let (id, points) = match self.framebuffer {
            Some(ref framebuffer) => (framebuffer.instance_id(), invalidation_points(framebuffer.layout(), flags)),
            None => {
                let mut points = SmallVec::new();
                if flags.contains(ClearFlags::COLOR) {
                    points.push(gl::COLOR);
                }
                if flags.contains(ClearFlags::DEPTH) {
                    points.push(gl::DEPTH);
                }
                if flags.contains(ClearFlags::STENCIL) {
                    points.push(gl::STENCIL);
                }
                (0, points)
            }
        };
        if points.is_empty() {
            return Ok(());
        }

        if self.dsa() {
            self.gl.invalidate_named_framebuffer_data(id, &points);
        } else {
            self.gl.invalidate_framebuffer(gl::FRAMEBUFFER, &points);
        }
        Ok(())
    }

    fn read_mode(&self, index: u32) -> Result<GLenum> {
        match self.framebuffer {
            Some(ref framebuffer) => framebuffer
                .color_points()
                .get(index as usize)
                .cloned()
                .ok_or_else(|| {
                    error!("the bound framebuffer has no color attachment {}", index);
                    Error::InvalidState("color attachment index out of range")
                }),
            None => Ok(gl::BACK),
        }
    }

    fn select_read_buffer(&self, mode: GLenum) {
        if self.dsa() {
            let id = self.framebuffer.as_ref().map_or(0, |f| f.instance_id());
            self.gl.named_framebuffer_read_buffer(id, mode);
        } else {
            self.gl.read_buffer(mode);
        }
    }

    /// Copies a rectangle of color attachment `index` into mip `mip` of a 2D texture.
    pub fn read_framebuffer(
        &mut self,
        index: u32,
        texture: &Rc<dyn GraphicsTexture>,
        mip: u32,
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    ) -> Result<()> {
        self.check_open()?;
        if texture.desc().dim != TextureDim::Texture2D {
            error!("cannot read a framebuffer into a {:?} texture", texture.desc().dim);
            return Err(Error::Unsupported("framebuffer readback into a non-2D texture"));
        }
        let mode = self.read_mode(index)?;
        self.select_read_buffer(mode);

        let gl = &*self.gl;
        let (x, y, w, h) = (x as i32, y as i32, width as i32, height as i32);
        if self.dsa() {
            gl.copy_texture_sub_image_2d(texture.instance_id(), mip as i32, 0, 0, x, y, w, h);
        } else {
            gl.bind_texture(gl::TEXTURE_2D, texture.instance_id());
            gl.copy_tex_sub_image_2d(gl::TEXTURE_2D, mip as i32, 0, 0, x, y, w, h);
            gl.bind_texture(gl::TEXTURE_2D, 0);
        }
        Ok(())
    }

    /// Same as `read_framebuffer`, into one face of a cube texture.
    pub fn read_framebuffer_to_cube(
        &mut self,
        index: u32,
        face: u32,
        texture: &Rc<dyn GraphicsTexture>,
        mip: u32,
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    ) -> Result<()> {
        self.check_open()?;
        if texture.desc().dim != TextureDim::Cube {
            error!("cannot read a framebuffer into a cube face of a {:?} texture", texture.desc().dim);
            return Err(Error::InvalidDescriptor("not a cube texture"));
        }
        if face >= 6 {
            error!("cube face {} out of range", face);
            return Err(Error::InvalidDescriptor("cube face out of range"));
        }
        let mode = self.read_mode(index)?;
        self.select_read_buffer(mode);

        let gl = &*self.gl;
        let (x, y, w, h) = (x as i32, y as i32, width as i32, height as i32);
        if self.dsa() {
            gl.copy_texture_sub_image_3d(texture.instance_id(), mip as i32, 0, 0, face as i32, x, y, w, h);
        } else {
            gl.bind_texture(gl::TEXTURE_CUBE_MAP, texture.instance_id());
            gl.copy_tex_sub_image_2d(cube_face_target(face), mip as i32, 0, 0, x, y, w, h);
            gl.bind_texture(gl::TEXTURE_CUBE_MAP, 0);
        }
        Ok(())
    }

    pub fn generate_mipmap(&mut self, texture: &Rc<dyn GraphicsTexture>) -> Result<()> {
        self.check_open()?;
        let gl = &*self.gl;
        if self.dsa() {
            gl.generate_texture_mipmap(texture.instance_id());
        } else {
            let target = texture.target();
            gl.bind_texture(target, texture.instance_id());
            gl.generate_mipmap(target);
            gl.bind_texture(target, 0);
        }
        Ok(())
    }

    //----------------------------------------------------------------------------------------------
    // Stencil

    fn update_stencil_func(&mut self, face: StencilFaceFlags, update: impl Fn(&mut StencilFaceState)) -> Result<()> {
        self.check_open()?;
        let gl = &*self.gl;
        for &(flag, native) in STENCIL_FACES.iter() {
            if !face.contains(flag) {
                continue;
            }
            let state = if flag == StencilFaceFlags::FRONT {
                &mut self.captured.stencil_front
            } else {
                &mut self.captured.stencil_back
            };
            let mut target = *state;
            update(&mut target);
            if target == *state {
                continue;
            }
            let func = types::as_compare_function(target.func);
            if func == INVALID {
                error!("invalid stencil compare function {:?}", target.func);
                return Err(Error::InvalidEnum("compare function"));
            }
            gl.stencil_func_separate(native, func, target.reference as i32, target.read_mask);
            *state = target;
        }
        Ok(())
    }

    fn stencil_face(&self, face: StencilFaceFlags) -> &StencilFaceState {
        if face == StencilFaceFlags::BACK {
            &self.captured.stencil_back
        } else {
            &self.captured.stencil_front
        }
    }

    pub fn set_stencil_compare_mask(&mut self, face: StencilFaceFlags, mask: u32) -> Result<()> {
        self.update_stencil_func(face, |state| state.read_mask = mask)
    }

    pub fn stencil_compare_mask(&self, face: StencilFaceFlags) -> u32 {
        self.stencil_face(face).read_mask
    }

    pub fn set_stencil_reference(&mut self, face: StencilFaceFlags, reference: u32) -> Result<()> {
        self.update_stencil_func(face, |state| state.reference = reference)
    }

    pub fn stencil_reference(&self, face: StencilFaceFlags) -> u32 {
        self.stencil_face(face).reference
    }

    pub fn set_stencil_write_mask(&mut self, face: StencilFaceFlags, mask: u32) -> Result<()> {
        self.check_open()?;
        let gl = &*self.gl;
        for &(flag, native) in STENCIL_FACES.iter() {
            if !face.contains(flag) {
                continue;
            }
            let state = if flag == StencilFaceFlags::FRONT {
                &mut self.captured.stencil_front
            } else {
                &mut self.captured.stencil_back
            };
            if state.write_mask != mask {
                gl.stencil_mask_separate(native, mask);
                state.write_mask = mask;
            }
        }
        Ok(())
    }

    pub fn stencil_write_mask(&self, face: StencilFaceFlags) -> u32 {
        self.stencil_face(face).write_mask
    }

    //----------------------------------------------------------------------------------------------
    // Draws

    /// Attaches pending vertex buffers and descriptor values, returns the native topology.
    fn flush(&mut self) -> Result<GLenum> {
        if self.status != ContextState::Recording {
            error!("draw issued outside render_begin/render_end");
            return Err(Error::InvalidState("draw outside of a frame"));
        }
        let pipeline = match self.pipeline {
            Some(ref pipeline) => pipeline.clone(),
            None => {
                error!("draw issued without a pipeline");
                return Err(Error::InvalidState("no pipeline bound"));
            }
        };

        pipeline.bind_vertex_buffers(&*self.gl, &mut self.vertex_buffers, self.need_update_pipeline)?;
        self.need_update_pipeline = false;

        if self.need_update_descriptor {
            if let Some(ref descriptor_set) = self.descriptor_set {
                descriptor_set.apply(pipeline.program());
            }
            self.need_update_descriptor = false;
        }

        match types::as_vertex_type(self.captured.primitive_type) {
            INVALID => {
                error!("invalid primitive topology {:?}", self.captured.primitive_type);
                Err(Error::InvalidEnum("primitive topology"))
            }
            mode => Ok(mode),
        }
    }

    fn check_base_instance(&self, start_instance: u32) -> Result<()> {
        if start_instance != 0 && !self.dsa() {
            error!("a base instance of {} needs the OpenGL 4.5 path", start_instance);
            return Err(Error::Unsupported("base instance on the OpenGL 3.3 path"));
        }
        Ok(())
    }

    fn index_range(&self, start_index: u32) -> Result<(GLenum, usize)> {
        match self.index_buffer {
            Some(ref index) => Ok((index.ty, index.offset + index.stride * start_index as usize)),
            None => {
                error!("indexed draw issued without an index buffer");
                Err(Error::InvalidState("no index buffer bound"))
            }
        }
    }

    fn check_multi_draw_indirect(&self) -> Result<()> {
        if self.property.version_at_least(4, 3) || self.property.has_extension("GL_ARB_multi_draw_indirect") {
            Ok(())
        } else {
            error!("indirect draws need OpenGL 4.3 or GL_ARB_multi_draw_indirect");
            Err(Error::Unsupported("multi draw indirect"))
        }
    }

    pub fn draw(&mut self, num_vertices: u32, num_instances: u32, start_vertex: u32, start_instance: u32) -> Result<()> {
        self.check_base_instance(start_instance)?;
        let mode = self.flush()?;
        let gl = &*self.gl;
        let (first, count, instances) = (start_vertex as i32, num_vertices as i32, num_instances as i32);
        if self.dsa() {
            gl.draw_arrays_instanced_base_instance(mode, first, count, instances, start_instance);
        } else if num_instances == 1 {
            gl.draw_arrays(mode, first, count);
        } else {
            gl.draw_arrays_instanced(mode, first, count, instances);
        }
        Ok(())
    }

    pub fn draw_indexed(
        &mut self,
        num_indices: u32,
        num_instances: u32,
        start_index: u32,
        start_vertex: i32,
        start_instance: u32,
    ) -> Result<()> {
        self.check_base_instance(start_instance)?;
        let (ty, offset) = self.index_range(start_index)?;
        let mode = self.flush()?;
        let gl = &*self.gl;
        if self.dsa() {
            gl.draw_elements_instanced_base_vertex_base_instance(
                mode,
                num_indices as i32,
                ty,
                offset,
                num_instances as i32,
                start_vertex,
                start_instance,
            );
        } else {
            gl.draw_elements_instanced_base_vertex(mode, num_indices as i32, ty, offset, num_instances as i32, start_vertex);
        }
        Ok(())
    }

    /// Draws `draw_count` commands read from `data` at `offset`.
    pub fn draw_indirect(&mut self, data: &Rc<dyn GraphicsData>, offset: usize, draw_count: u32, stride: u32) -> Result<()> {
        self.check_multi_draw_indirect()?;
        let mode = self.flush()?;
        self.gl.bind_buffer(gl::DRAW_INDIRECT_BUFFER, data.instance_id());
        self.gl.multi_draw_arrays_indirect(mode, offset, draw_count as i32, stride as i32);
        Ok(())
    }

    pub fn draw_indexed_indirect(
        &mut self,
        data: &Rc<dyn GraphicsData>,
        offset: usize,
        draw_count: u32,
        stride: u32,
    ) -> Result<()> {
        self.check_multi_draw_indirect()?;
        let (ty, _) = self.index_range(0)?;
        let mode = self.flush()?;
        self.gl.bind_buffer(gl::DRAW_INDIRECT_BUFFER, data.instance_id());
        self.gl.multi_draw_elements_indirect(mode, ty, offset, draw_count as i32, stride as i32);
        Ok(())
    }

    //----------------------------------------------------------------------------------------------
    // Debug output and capabilities

    pub fn start_debug_control(&mut self) {
        if !self.property.version_at_least(4, 3) && !self.property.has_extension("GL_KHR_debug") {
            warn!("debug output needs OpenGL 4.3 or GL_KHR_debug");
            return;
        }
        let gl = &*self.gl;
        gl.enable(gl::DEBUG_OUTPUT);
        gl.enable(gl::DEBUG_OUTPUT_SYNCHRONOUS);
        gl.debug_message_callback();
        gl.debug_message_control(true);
        self.debug_control = true;
    }

    pub fn stop_debug_control(&mut self) {
        if !self.debug_control {
            return;
        }
        self.gl.disable(gl::DEBUG_OUTPUT_SYNCHRONOUS);
        self.gl.disable(gl::DEBUG_OUTPUT);
        self.debug_control = false;
    }

    /// Applied at the next `render_begin`.
    pub fn enable_debug_control(&mut self, enable: bool) {
        self.pending_debug_control = Some(enable);
    }

    pub fn is_debug_control_enabled(&self) -> bool {
        self.debug_control
    }

    pub fn is_texture_supported(&self, format: Format) -> bool {
        self.property.is_texture_supported(format)
    }

    pub fn is_texture_dim_supported(&self, dim: TextureDim) -> bool {
        self.property.is_texture_dim_supported(dim)
    }

    pub fn is_vertex_supported(&self, format: Format) -> bool {
        self.property.is_vertex_supported(format)
    }
}

impl Drop for GlDeviceContext {
    fn drop(&mut self) {
        self.close();
    }
}
