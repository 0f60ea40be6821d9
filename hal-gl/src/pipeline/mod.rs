//! Pipelines: a state, a program, a vertex input layout and a descriptor layout bound together.
use crate::api::{self as gl, GlApi};
use crate::buffer::GraphicsData;
use crate::descriptor::GlDescriptorSetLayout;
use octoon_hal::{Error, Result};
use std::fmt;
use std::rc::Rc;

mod shader;
mod state;
mod vertex;

pub use self::shader::{attribute_format, parse_semantic, split_sampler_name, uniform_type, GlProgram, GlShader, ProgramDesc};
pub use self::state::GlState;
pub use self::vertex::{resolve_attributes, GlInputLayout, VertexAttrib};

/// How vertex attributes reach their buffers.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum VertexPath {
    /// `glVertexAttribPointer` on the buffer bound to `ARRAY_BUFFER`, issued at draw time.
    Pointer,
    /// Attribute formats fixed when the pipeline is bound, buffers attached per binding slot.
    Binding,
}

#[derive(Clone, Debug, Default)]
pub struct PipelineDesc {
    pub state: Option<Rc<GlState>>,
    pub program: Option<Rc<GlProgram>>,
    pub input_layout: Option<Rc<GlInputLayout>>,
    pub descriptor_set_layout: Option<Rc<GlDescriptorSetLayout>>,
}

impl PipelineDesc {
    pub fn new(
        state: Rc<GlState>,
        program: Rc<GlProgram>,
        input_layout: Rc<GlInputLayout>,
        descriptor_set_layout: Rc<GlDescriptorSetLayout>,
    ) -> PipelineDesc {
        PipelineDesc {
            state: Some(state),
            program: Some(program),
            input_layout: Some(input_layout),
            descriptor_set_layout: Some(descriptor_set_layout),
        }
    }
}

/// Vertex buffer bound to one slot of a context.
#[derive(Clone, Debug, Default)]
pub struct VertexBufferSlot {
    pub data: Option<Rc<dyn GraphicsData>>,
    pub offset: usize,
    /// Changed since the last draw.
    pub dirty: bool,
}

pub struct GlPipeline {
    path: VertexPath,
    state: Rc<GlState>,
    program: Rc<GlProgram>,
    input_layout: Rc<GlInputLayout>,
    descriptor_set_layout: Rc<GlDescriptorSetLayout>,
    attributes: Vec<VertexAttrib>,
}

impl fmt::Debug for GlPipeline {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("GlPipeline")
            .field("path", &self.path)
            .field("program", &self.program.instance_id())
            .field("attributes", &self.attributes)
            .finish()
    }
}

impl GlPipeline {
    pub fn new(desc: PipelineDesc, path: VertexPath) -> Result<GlPipeline> {
        let state = desc.state.ok_or_else(|| missing("state"))?;
        let program = desc.program.ok_or_else(|| missing("program"))?;
        let input_layout = desc.input_layout.ok_or_else(|| missing("input layout"))?;
        let descriptor_set_layout = desc
            .descriptor_set_layout
            .ok_or_else(|| missing("descriptor set layout"))?;

        let attributes = resolve_attributes(input_layout.desc(), program.attributes());
        debug!(
            "pipeline for program {}: {} of {} vertex attributes bound",
            program.instance_id(),
            attributes.len(),
            input_layout.desc().layouts.len()
        );

        Ok(GlPipeline {
            path,
            state,
            program,
            input_layout,
            descriptor_set_layout,
            attributes,
        })
    }

    pub fn path(&self) -> VertexPath {
        self.path
    }

    pub fn state(&self) -> &Rc<GlState> {
        &self.state
    }

    pub fn program(&self) -> &Rc<GlProgram> {
        &self.program
    }

    pub fn input_layout(&self) -> &Rc<GlInputLayout> {
        &self.input_layout
    }

    pub fn descriptor_set_layout(&self) -> &Rc<GlDescriptorSetLayout> {
        &self.descriptor_set_layout
    }

    /// The attribute binding table computed at creation.
    pub fn attributes(&self) -> &[VertexAttrib] {
        &self.attributes
    }

    /// Enables this pipeline's attributes on the bound vertex array, disabling what `previous`
    /// left enabled and this pipeline does not read.
    pub fn apply(&self, gl: &dyn GlApi, previous: Option<&GlPipeline>) {
        if let Some(previous) = previous {
            for attrib in previous.attributes.iter() {
                if !self.attributes.iter().any(|a| a.location == attrib.location) {
                    gl.disable_vertex_attrib_array(attrib.location);
                }
            }
        }

        for attrib in self.attributes.iter() {
            gl.enable_vertex_attrib_array(attrib.location);
            match self.path {
                VertexPath::Pointer => gl.vertex_attrib_divisor(attrib.location, attrib.divisor),
                VertexPath::Binding => {
                    if attrib.integer {
                        gl.vertex_attrib_i_format(attrib.location, attrib.components, attrib.ty, attrib.offset);
                    } else {
                        gl.vertex_attrib_format(
                            attrib.location,
                            attrib.components,
                            attrib.ty,
                            attrib.normalize,
                            attrib.offset,
                        );
                    }
                    gl.vertex_attrib_binding(attrib.location, attrib.slot);
                }
            }
        }

        if self.path == VertexPath::Binding {
            let mut slots: Vec<(u32, u32)> = self.attributes.iter().map(|a| (a.slot, a.divisor)).collect();
            slots.sort();
            slots.dedup_by_key(|s| s.0);
            for (slot, divisor) in slots {
                gl.vertex_binding_divisor(slot, divisor);
            }
        }
    }

    /// Attaches the buffers of dirty slots (every slot read by the pipeline when `force` is set)
    /// and clears the dirty flags.
    pub fn bind_vertex_buffers(&self, gl: &dyn GlApi, slots: &mut [VertexBufferSlot], force: bool) -> Result<()> {
        if let Some(attrib) = self.attributes.iter().find(|a| a.slot as usize >= slots.len()) {
            error!("vertex slot {} exceeds the {} slots of the context", attrib.slot, slots.len());
            return Err(Error::InvalidState("vertex slot out of range"));
        }

        let mut bound_array_buffer = None;
        for attrib in self.attributes.iter() {
            let slot = &slots[attrib.slot as usize];
            if !(slot.dirty || force) {
                continue;
            }
            let data = match slot.data {
                Some(ref data) => data,
                None => {
                    warn!("no vertex buffer bound to slot {}", attrib.slot);
                    continue;
                }
            };

            match self.path {
                VertexPath::Pointer => {
                    if bound_array_buffer != Some(data.instance_id()) {
                        gl.bind_buffer(gl::ARRAY_BUFFER, data.instance_id());
                        bound_array_buffer = Some(data.instance_id());
                    }
                    let offset = slot.offset + attrib.offset as usize;
                    if attrib.integer {
                        gl.vertex_attrib_i_pointer(attrib.location, attrib.components, attrib.ty, attrib.stride, offset);
                    } else {
                        gl.vertex_attrib_pointer(
                            attrib.location,
                            attrib.components,
                            attrib.ty,
                            attrib.normalize,
                            attrib.stride,
                            offset,
                        );
                    }
                }
                VertexPath::Binding => {
                    // one attachment per slot
                    let first = self.attributes.iter().find(|a| a.slot == attrib.slot);
                    if first.map(|a| a.location) == Some(attrib.location) {
                        gl.bind_vertex_buffer(attrib.slot, data.instance_id(), slot.offset, attrib.stride);
                    }
                }
            }
        }

        for slot in slots.iter_mut() {
            slot.dirty = false;
        }
        Ok(())
    }
}

fn missing(what: &'static str) -> Error {
    error!("pipeline created without a {}", what);
    Error::InvalidDescriptor("incomplete pipeline")
}
