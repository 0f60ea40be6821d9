use bitflags::bitflags;

/// What a buffer is used for. Determines the native binding target.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum DataType {
    TransferSrc,
    TransferDst,
    UniformTexelBuffer,
    StorageTexelBuffer,
    UniformBuffer,
    StorageBuffer,
    IndexBuffer,
    VertexBuffer,
    IndirectBuffer,
    TransformFeedback,
}

bitflags! {
    /// CPU access and storage hints for buffers and textures.
    #[derive(Default)]
    pub struct UsageFlags: u32 {
        const READ = (1 << 0);
        const WRITE = (1 << 1);
        /// The mapping stays valid while the GPU uses the buffer.
        const PERSISTENT = (1 << 2);
        const COHERENT = (1 << 3);
        /// Mapped ranges must be flushed explicitly before unmapping.
        const FLUSH_EXPLICIT = (1 << 4);
        const DYNAMIC_STORAGE = (1 << 5);
        const CLIENT_STORAGE = (1 << 6);
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum IndexType {
    UInt16,
    UInt32,
}

impl IndexType {
    pub fn size(self) -> usize {
        match self {
            IndexType::UInt16 => 2,
            IndexType::UInt32 => 4,
        }
    }
}

/// Buffer creation parameters.
///
/// `stream` is the optional initial content; when present its length must not exceed
/// `stream_size`.
#[derive(Clone, Debug)]
pub struct DataDesc {
    pub ty: DataType,
    pub usage: UsageFlags,
    pub stream_size: usize,
    pub stream: Option<Vec<u8>>,
}

impl DataDesc {
    pub fn new(ty: DataType, usage: UsageFlags, stream_size: usize) -> DataDesc {
        DataDesc {
            ty,
            usage,
            stream_size,
            stream: None,
        }
    }

    /// Buffer initialized with (and sized to) `data`.
    pub fn with_data(ty: DataType, usage: UsageFlags, data: &[u8]) -> DataDesc {
        DataDesc {
            ty,
            usage,
            stream_size: data.len(),
            stream: Some(data.to_vec()),
        }
    }
}
