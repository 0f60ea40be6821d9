use super::sealed::Unmap;
use super::{mapped_ptr, validate, GraphicsData, MapState, MappedRange};
use crate::api::types::*;
use crate::api::{self as gl, GlApi};
use crate::types;
use octoon_hal::{DataDesc, Error, Result};
use std::fmt;
use std::rc::Rc;

/// Buffer edited through `GL_COPY_WRITE_BUFFER`.
///
/// The binding target of the data type is only used by the draw context. Editing through it would
/// replace the index buffer of the bound vertex array behind the context's back.
pub struct Gl33Data {
    gl: Rc<dyn GlApi>,
    desc: DataDesc,
    buffer: GLuint,
    target: GLenum,
    access: GLbitfield,
    mapped: MapState,
}

impl fmt::Debug for Gl33Data {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Gl33Data")
            .field("buffer", &self.buffer)
            .field("target", &self.target)
            .field("size", &self.desc.stream_size)
            .finish()
    }
}

impl Gl33Data {
    pub fn new(gl: Rc<dyn GlApi>, desc: DataDesc) -> Result<Gl33Data> {
        let target = validate(&desc)?;

        let buffer = gl.gen_buffer();
        if buffer == 0 {
            error!("glGenBuffers returned no name");
            return Err(Error::NativeAllocation("buffer"));
        }

        gl.bind_buffer(gl::COPY_WRITE_BUFFER, buffer);
        gl.buffer_data(
            gl::COPY_WRITE_BUFFER,
            desc.stream_size,
            desc.stream.as_ref().map(|s| &s[..]),
            types::as_buffer_usage(desc.usage),
        );

        trace!("buffer {} ({:?}, {} bytes)", buffer, desc.ty, desc.stream_size);

        Ok(Gl33Data {
            access: types::as_buffer_access(desc.usage, false),
            gl,
            desc,
            buffer,
            target,
            mapped: MapState::default(),
        })
    }
}

impl GraphicsData for Gl33Data {
    fn desc(&self) -> &DataDesc {
        &self.desc
    }

    fn instance_id(&self) -> GLuint {
        self.buffer
    }

    fn target(&self) -> GLenum {
        self.target
    }

    fn map(&self, offset: usize, count: usize) -> Result<MappedRange> {
        self.mapped.begin(self.desc.stream_size, offset, count, self.access)?;
        self.gl.bind_buffer(gl::COPY_WRITE_BUFFER, self.buffer);
        let ptr = self
            .gl
            .map_buffer_range(gl::COPY_WRITE_BUFFER, offset, count, self.access);
        let ptr = mapped_ptr(ptr, "buffer")?;
        self.mapped.set(offset, count);
        let writable = self.access & gl::MAP_WRITE_BIT != 0;
        Ok(MappedRange::new(self, ptr, count, writable))
    }

    fn is_mapped(&self) -> bool {
        self.mapped.is_mapped()
    }

    fn read(&self, offset: usize, out: &mut [u8]) -> Result<()> {
        if self.is_mapped() {
            return Err(Error::InvalidState("buffer is mapped"));
        }
        if offset.checked_add(out.len()).map_or(true, |end| end > self.desc.stream_size) {
            return Err(Error::InvalidDescriptor("read range out of bounds"));
        }
        self.gl.bind_buffer(gl::COPY_WRITE_BUFFER, self.buffer);
        self.gl.get_buffer_sub_data(gl::COPY_WRITE_BUFFER, offset, out);
        Ok(())
    }
}

impl Unmap for Gl33Data {
    fn unmap_range(&self) -> Result<()> {
        let (_, count) = self.mapped.end()?;
        self.gl.bind_buffer(gl::COPY_WRITE_BUFFER, self.buffer);
        if self.access & gl::MAP_FLUSH_EXPLICIT_BIT != 0 {
            self.gl.flush_mapped_buffer_range(gl::COPY_WRITE_BUFFER, 0, count);
        }
        if !self.gl.unmap_buffer(gl::COPY_WRITE_BUFFER) {
            // contents were lost (display mode change and the like)
            warn!("buffer {} was corrupted while mapped", self.buffer);
        }
        Ok(())
    }
}

impl Drop for Gl33Data {
    fn drop(&mut self) {
        if self.mapped.is_mapped() {
            error!("buffer {} destroyed while mapped", self.buffer);
            debug_assert!(false, "buffer destroyed while mapped");
            self.gl.bind_buffer(gl::COPY_WRITE_BUFFER, self.buffer);
            self.gl.unmap_buffer(gl::COPY_WRITE_BUFFER);
        }
        self.gl.delete_buffer(self.buffer);
    }
}
