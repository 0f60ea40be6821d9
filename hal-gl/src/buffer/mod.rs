//! Buffer objects.
//!
//! Two implementations share the [GraphicsData] interface: [Gl33Data] binds the buffer to edit
//! it, [Gl45Data] uses immutable storage and named entry points. Mapping follows the same rules
//! on both paths: one mapping at a time, held by the returned [MappedRange] until it is unmapped
//! or dropped, and the access bits come from the usage flags given at creation.
use crate::api::types::*;
use crate::api::INVALID;
use crate::types;
use octoon_hal::{DataDesc, Error, Result};
use std::cell::Cell;
use std::fmt::{self, Debug};
use std::ops::Deref;
use std::os::raw::c_void;
use std::slice;

mod gl33;
mod gl45;

pub use self::gl33::Gl33Data;
pub use self::gl45::Gl45Data;

pub(crate) mod sealed {
    use octoon_hal::Result;

    /// Releases the mapping handed out by `map`. Only reachable through [super::MappedRange].
    pub trait Unmap {
        fn unmap_range(&self) -> Result<()>;
    }
}

use self::sealed::Unmap;

pub trait GraphicsData: Debug + Unmap {
    fn desc(&self) -> &DataDesc;

    /// Native buffer name.
    fn instance_id(&self) -> GLuint;

    /// Native binding target derived from the data type.
    fn target(&self) -> GLenum;

    fn size(&self) -> usize {
        self.desc().stream_size
    }

    /// Maps `count` bytes starting at `offset`. The buffer stays mapped as long as the range.
    fn map(&self, offset: usize, count: usize) -> Result<MappedRange>;

    fn is_mapped(&self) -> bool;

    /// Copies the buffer contents starting at `offset` back into `out`.
    fn read(&self, offset: usize, out: &mut [u8]) -> Result<()>;
}

/// CPU-visible window into a mapped buffer or texture level.
///
/// Dropping the range unmaps it; [MappedRange::unmap] does the same and reports failures.
/// Ranges mapped without write access only hand out shared slices.
pub struct MappedRange<'a> {
    owner: &'a dyn Unmap,
    ptr: *mut u8,
    len: usize,
    writable: bool,
    released: bool,
}

impl<'a> fmt::Debug for MappedRange<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("MappedRange")
            .field("ptr", &self.ptr)
            .field("len", &self.len)
            .field("writable", &self.writable)
            .finish()
    }
}

/// Fails if the driver returned a null pointer.
pub(crate) fn mapped_ptr(ptr: *mut c_void, what: &'static str) -> Result<*mut u8> {
    if ptr.is_null() {
        error!("{} mapping returned a null pointer", what);
        return Err(Error::NativeAllocation(what));
    }
    Ok(ptr as *mut u8)
}

impl<'a> MappedRange<'a> {
    /// `ptr` must stay valid for `len` bytes until `owner.unmap_range()`.
    pub(crate) fn new(owner: &'a dyn Unmap, ptr: *mut u8, len: usize, writable: bool) -> MappedRange<'a> {
        MappedRange {
            owner,
            ptr,
            len,
            writable,
            released: false,
        }
    }

    pub fn is_writable(&self) -> bool {
        self.writable
    }

    /// Mutable view of the range, `None` for read mappings.
    pub fn as_mut_slice(&mut self) -> Option<&mut [u8]> {
        if self.writable {
            Some(unsafe { slice::from_raw_parts_mut(self.ptr, self.len) })
        } else {
            None
        }
    }

    /// Copies `data` into the range at `offset`.
    pub fn write(&mut self, offset: usize, data: &[u8]) -> Result<()> {
        let len = self.len;
        let dst = match self.as_mut_slice() {
            Some(dst) => dst,
            None => {
                error!("write into a read-only mapping");
                return Err(Error::InvalidState("mapping is read-only"));
            }
        };
        match offset.checked_add(data.len()) {
            Some(end) if end <= len => {
                dst[offset..end].copy_from_slice(data);
                Ok(())
            }
            _ => {
                error!("write of {} bytes at {} outside of a {} byte mapping", data.len(), offset, len);
                Err(Error::InvalidDescriptor("write out of bounds"))
            }
        }
    }

    /// Unmaps the range.
    pub fn unmap(mut self) -> Result<()> {
        self.released = true;
        self.owner.unmap_range()
    }
}

impl<'a> Deref for MappedRange<'a> {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        unsafe { slice::from_raw_parts(self.ptr, self.len) }
    }
}

impl<'a> Drop for MappedRange<'a> {
    fn drop(&mut self) {
        if !self.released {
            if let Err(e) = self.owner.unmap_range() {
                error!("unmap failed: {}", e);
            }
        }
    }
}

/// Creation checks shared by both implementations. Returns the binding target.
pub(crate) fn validate(desc: &DataDesc) -> Result<GLenum> {
    if desc.stream_size == 0 {
        error!("buffer size is zero");
        return Err(Error::InvalidDescriptor("zero-sized buffer"));
    }
    if let Some(ref stream) = desc.stream {
        if stream.len() > desc.stream_size {
            error!(
                "initial data ({} bytes) larger than the buffer ({} bytes)",
                stream.len(),
                desc.stream_size
            );
            return Err(Error::InvalidDescriptor("initial data larger than the buffer"));
        }
    }
    let target = types::as_buffer_target(desc.ty);
    if target == INVALID {
        error!("invalid buffer type {:?}", desc.ty);
        return Err(Error::InvalidEnum("buffer type"));
    }
    Ok(target)
}

/// Tracks the mapped range of a buffer.
#[derive(Debug, Default)]
pub(crate) struct MapState {
    range: Cell<Option<(usize, usize)>>,
}

impl MapState {
    /// Checks a new mapping request against the current state and the buffer size.
    pub(crate) fn begin(&self, size: usize, offset: usize, count: usize, access: GLbitfield) -> Result<()> {
        if self.range.get().is_some() {
            error!("buffer is already mapped");
            return Err(Error::InvalidState("buffer already mapped"));
        }
        if count == 0 || offset.checked_add(count).map_or(true, |end| end > size) {
            error!("map range {}+{} outside of a {} byte buffer", offset, count, size);
            return Err(Error::InvalidDescriptor("map range out of bounds"));
        }
        if access & (crate::api::MAP_READ_BIT | crate::api::MAP_WRITE_BIT) == 0 {
            error!("buffer was created without read or write usage");
            return Err(Error::InvalidState("buffer not mappable"));
        }
        Ok(())
    }

    pub(crate) fn set(&self, offset: usize, count: usize) {
        self.range.set(Some((offset, count)));
    }

    /// Clears the mapped range, failing if nothing was mapped.
    pub(crate) fn end(&self) -> Result<(usize, usize)> {
        match self.range.take() {
            Some(range) => Ok(range),
            None => {
                error!("unmap called on a buffer that is not mapped");
                Err(Error::InvalidState("buffer not mapped"))
            }
        }
    }

    pub(crate) fn is_mapped(&self) -> bool {
        self.range.get().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api as gl;
    use crate::api::GlApi;
    use crate::testing::RecordingGl;
    use octoon_hal::{DataType, UsageFlags};
    use std::rc::Rc;

    fn recording() -> (Rc<RecordingGl>, Rc<dyn GlApi>) {
        let gl = Rc::new(RecordingGl::new());
        let api: Rc<dyn GlApi> = gl.clone();
        (gl, api)
    }

    fn round_trip(data: &dyn GraphicsData) {
        let bytes: Vec<u8> = (0..32u8).collect();
        let mut range = data.map(0, bytes.len()).unwrap();
        range.write(0, &bytes).unwrap();
        range.unmap().unwrap();

        let mut out = vec![0u8; bytes.len()];
        data.read(0, &mut out).unwrap();
        assert_eq!(out, bytes);
    }

    #[test]
    fn map_write_read_back_gl33() {
        let (gl, api) = recording();
        let desc = DataDesc::new(DataType::VertexBuffer, UsageFlags::READ | UsageFlags::WRITE, 64);
        let data = Gl33Data::new(api, desc).unwrap();
        round_trip(&data);
        assert_eq!(gl.count("UnmapBuffer"), 1);
        assert_eq!(&gl.buffer_contents(data.instance_id())[..4], &[0, 1, 2, 3]);
    }

    #[test]
    fn map_write_read_back_gl45() {
        let (gl, api) = recording();
        let desc = DataDesc::new(DataType::UniformBuffer, UsageFlags::READ | UsageFlags::WRITE, 64);
        let data = Gl45Data::new(api, desc).unwrap();
        round_trip(&data);
        assert_eq!(gl.count("NamedBufferStorage"), 1);
        assert_eq!(gl.count("UnmapNamedBuffer"), 1);
    }

    #[test]
    fn initial_data_is_uploaded() {
        let (gl, api) = recording();
        let desc = DataDesc::with_data(DataType::IndexBuffer, UsageFlags::READ, &[1, 2, 3, 4]);
        let data = Gl33Data::new(api, desc).unwrap();
        assert_eq!(data.target(), gl::ELEMENT_ARRAY_BUFFER);
        assert_eq!(gl.buffer_contents(data.instance_id()), vec![1, 2, 3, 4]);
    }

    #[test]
    fn gl33_edits_leave_the_index_binding_alone() {
        let (gl, api) = recording();
        let desc = DataDesc::with_data(DataType::IndexBuffer, UsageFlags::READ, &[0; 16]);
        let data = Gl33Data::new(api, desc).unwrap();
        data.map(0, 16).unwrap().unmap().unwrap();
        data.read(0, &mut [0; 4]).unwrap();
        let element = format!("({}, ", gl::ELEMENT_ARRAY_BUFFER);
        assert!(gl.calls().iter().all(|c| !c.contains(&element)));
        assert!(gl
            .calls()
            .contains(&format!("BindBuffer({}, {})", gl::COPY_WRITE_BUFFER, data.instance_id())));
    }

    #[test]
    fn zero_size_allocates_nothing() {
        let (gl, api) = recording();
        let desc = DataDesc::new(DataType::VertexBuffer, UsageFlags::WRITE, 0);
        assert_eq!(
            Gl33Data::new(api.clone(), desc.clone()).unwrap_err(),
            Error::InvalidDescriptor("zero-sized buffer")
        );
        assert!(Gl45Data::new(api, desc).is_err());
        assert_eq!(gl.count("GenBuffers"), 0);
        assert_eq!(gl.count("CreateBuffers"), 0);
    }

    #[test]
    fn one_mapping_at_a_time() {
        let (gl, api) = recording();
        let desc = DataDesc::new(DataType::VertexBuffer, UsageFlags::WRITE, 16);
        let data = Gl33Data::new(api, desc).unwrap();
        {
            let _range = data.map(0, 8).unwrap();
            assert_eq!(data.map(0, 8).unwrap_err(), Error::InvalidState("buffer already mapped"));
            assert!(data.is_mapped());
            assert_eq!(data.read(0, &mut [0; 4]), Err(Error::InvalidState("buffer is mapped")));
        }
        assert!(!data.is_mapped());
        assert_eq!(gl.count("UnmapBuffer"), 1);
        assert!(data.map(8, 16).is_err());
    }

    #[test]
    fn read_mappings_are_not_writable() {
        let (gl, api) = recording();
        let desc = DataDesc::with_data(DataType::VertexBuffer, UsageFlags::READ, &[5; 8]);
        let data = Gl45Data::new(api, desc).unwrap();
        let mut range = data.map(0, 8).unwrap();
        assert!(!range.is_writable());
        assert!(range.as_mut_slice().is_none());
        assert_eq!(range.write(0, &[1]), Err(Error::InvalidState("mapping is read-only")));
        assert_eq!(&range[..], &[5; 8]);
        drop(range);
        assert_eq!(gl.buffer_contents(data.instance_id()), vec![5; 8]);
        assert_eq!(gl.count("UnmapNamedBuffer"), 1);
    }

    #[test]
    fn writes_stay_inside_the_range() {
        let (_gl, api) = recording();
        let desc = DataDesc::new(DataType::VertexBuffer, UsageFlags::WRITE, 16);
        let data = Gl33Data::new(api, desc).unwrap();
        let mut range = data.map(4, 8).unwrap();
        assert_eq!(range.write(6, &[0; 4]), Err(Error::InvalidDescriptor("write out of bounds")));
        assert_eq!(
            range.write(usize::max_value(), &[0; 2]),
            Err(Error::InvalidDescriptor("write out of bounds"))
        );
        range.write(4, &[1; 4]).unwrap();
    }

    #[test]
    fn overflowing_reads_are_rejected() {
        let (_gl, api) = recording();
        let desc = DataDesc::new(DataType::VertexBuffer, UsageFlags::READ, 16);
        let gl33 = Gl33Data::new(api.clone(), desc.clone()).unwrap();
        let gl45 = Gl45Data::new(api, desc).unwrap();
        for data in &[&gl33 as &dyn GraphicsData, &gl45] {
            assert_eq!(
                data.read(usize::max_value(), &mut [0; 4]),
                Err(Error::InvalidDescriptor("read range out of bounds"))
            );
        }
    }

    #[test]
    fn null_mapping_leaves_the_buffer_unmapped() {
        let (gl, api) = recording();
        let desc = DataDesc::new(DataType::VertexBuffer, UsageFlags::WRITE, 16);
        let data = Gl33Data::new(api, desc).unwrap();
        gl.fail_map();
        assert_eq!(data.map(0, 4).unwrap_err(), Error::NativeAllocation("buffer"));
        assert!(!data.is_mapped());
        assert_eq!(gl.count("UnmapBuffer"), 0);
    }

    #[test]
    fn unmappable_usage_is_rejected() {
        let (_gl, api) = recording();
        let desc = DataDesc::new(DataType::VertexBuffer, UsageFlags::empty(), 16);
        let data = Gl45Data::new(api, desc).unwrap();
        assert_eq!(data.map(0, 4).unwrap_err(), Error::InvalidState("buffer not mappable"));
    }

    #[test]
    fn persistent_mapping_survives_unmap() {
        let (gl, api) = recording();
        let usage = UsageFlags::WRITE | UsageFlags::PERSISTENT | UsageFlags::COHERENT;
        let data = Gl45Data::new(api, DataDesc::new(DataType::UniformBuffer, usage, 64)).unwrap();
        for i in 0..3u8 {
            data.map(16, 4).unwrap().write(0, &[i; 4]).unwrap();
        }
        assert_eq!(gl.count("MapNamedBufferRange"), 1);
        assert_eq!(gl.count("UnmapNamedBuffer"), 0);
        assert_eq!(&gl.buffer_contents(data.instance_id())[16..20], &[2, 2, 2, 2]);
        drop(data);
        assert_eq!(gl.count("UnmapNamedBuffer"), 1);
        assert_eq!(gl.count("DeleteBuffers"), 1);
    }

    #[test]
    fn explicit_flush() {
        let (gl, api) = recording();
        let usage = UsageFlags::WRITE | UsageFlags::FLUSH_EXPLICIT;
        let data = Gl33Data::new(api, DataDesc::new(DataType::VertexBuffer, usage, 64)).unwrap();
        data.map(8, 16).unwrap().unmap().unwrap();
        assert!(gl
            .calls()
            .contains(&format!("FlushMappedBufferRange({}, 0, 16)", gl::COPY_WRITE_BUFFER)));
    }
}
