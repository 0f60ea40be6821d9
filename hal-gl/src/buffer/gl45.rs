use super::sealed::Unmap;
use super::{mapped_ptr, validate, GraphicsData, MapState, MappedRange};
use crate::api::types::*;
use crate::api::{self as gl, GlApi};
use crate::types;
use octoon_hal::{DataDesc, Error, Result, UsageFlags};
use std::cell::Cell;
use std::fmt;
use std::os::raw::c_void;
use std::ptr;
use std::rc::Rc;

/// Buffer with immutable storage, edited through named entry points.
///
/// With `UsageFlags::PERSISTENT` the whole buffer is mapped once on first use and stays mapped
/// until the buffer is dropped; `unmap` only flushes.
pub struct Gl45Data {
    gl: Rc<dyn GlApi>,
    desc: DataDesc,
    buffer: GLuint,
    target: GLenum,
    access: GLbitfield,
    persistent: Cell<*mut c_void>,
    mapped: MapState,
}

impl fmt::Debug for Gl45Data {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Gl45Data")
            .field("buffer", &self.buffer)
            .field("target", &self.target)
            .field("size", &self.desc.stream_size)
            .field("persistent", &!self.persistent.get().is_null())
            .finish()
    }
}

impl Gl45Data {
    pub fn new(gl: Rc<dyn GlApi>, desc: DataDesc) -> Result<Gl45Data> {
        let target = validate(&desc)?;

        let buffer = gl.create_buffer();
        if buffer == 0 {
            error!("glCreateBuffers returned no name");
            return Err(Error::NativeAllocation("buffer"));
        }

        gl.named_buffer_storage(
            buffer,
            desc.stream_size,
            desc.stream.as_ref().map(|s| &s[..]),
            types::as_buffer_storage_flags(desc.usage),
        );

        trace!(
            "buffer {} ({:?}, {} bytes, storage flags 0x{:X})",
            buffer,
            desc.ty,
            desc.stream_size,
            types::as_buffer_storage_flags(desc.usage)
        );

        Ok(Gl45Data {
            access: types::as_buffer_access(desc.usage, true),
            gl,
            desc,
            buffer,
            target,
            persistent: Cell::new(ptr::null_mut()),
            mapped: MapState::default(),
        })
    }

    fn is_persistent(&self) -> bool {
        self.desc.usage.contains(UsageFlags::PERSISTENT)
    }
}

impl GraphicsData for Gl45Data {
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

        let ptr = if self.is_persistent() {
            if self.persistent.get().is_null() {
                let base =
                    self.gl
                        .map_named_buffer_range(self.buffer, 0, self.desc.stream_size, self.access);
                self.persistent.set(base);
            }
            let base = self.persistent.get();
            if base.is_null() {
                base
            } else {
                unsafe { (base as *mut u8).add(offset) as *mut c_void }
            }
        } else {
            self.gl
                .map_named_buffer_range(self.buffer, offset, count, self.access)
        };

        let ptr = mapped_ptr(ptr, "buffer")?;
        self.mapped.set(offset, count);
        let writable = self.access & gl::MAP_WRITE_BIT != 0;
        Ok(MappedRange::new(self, ptr, count, writable))
    }

    fn is_mapped(&self) -> bool {
        self.mapped.is_mapped()
    }

    fn read(&self, offset: usize, out: &mut [u8]) -> Result<()> {
        if self.is_mapped() && !self.is_persistent() {
            return Err(Error::InvalidState("buffer is mapped"));
        }
        if offset.checked_add(out.len()).map_or(true, |end| end > self.desc.stream_size) {
            return Err(Error::InvalidDescriptor("read range out of bounds"));
        }
        self.gl.get_named_buffer_sub_data(self.buffer, offset, out);
        Ok(())
    }
}

impl Unmap for Gl45Data {
    fn unmap_range(&self) -> Result<()> {
        let (offset, count) = self.mapped.end()?;
        let flush = self.access & gl::MAP_FLUSH_EXPLICIT_BIT != 0;
        if self.is_persistent() {
            if flush {
                self.gl
                    .flush_mapped_named_buffer_range(self.buffer, offset, count);
            }
        } else {
            if flush {
                self.gl.flush_mapped_named_buffer_range(self.buffer, 0, count);
            }
            if !self.gl.unmap_named_buffer(self.buffer) {
                warn!("buffer {} was corrupted while mapped", self.buffer);
            }
        }
        Ok(())
    }
}

impl Drop for Gl45Data {
    fn drop(&mut self) {
        if self.mapped.is_mapped() {
            error!("buffer {} destroyed while mapped", self.buffer);
            debug_assert!(false, "buffer destroyed while mapped");
        }
        if self.mapped.is_mapped() || !self.persistent.get().is_null() {
            self.gl.unmap_named_buffer(self.buffer);
        }
        self.gl.delete_buffer(self.buffer);
    }
}
