//! Vertex input layout.
use crate::format::Format;

/// One vertex attribute as laid out in a vertex buffer.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct VertexLayout {
    pub semantic: String,
    pub semantic_index: u32,
    pub format: Format,
    /// Padding before this attribute, in bytes.
    pub offset: u32,
    /// Vertex buffer slot the attribute is read from.
    pub slot: u32,
    /// Byte size of the attribute.
    pub size: u32,
}

impl VertexLayout {
    pub fn new(semantic: &str, semantic_index: u32, format: Format, slot: u32, size: u32) -> VertexLayout {
        VertexLayout {
            semantic: semantic.to_owned(),
            semantic_index,
            format,
            offset: 0,
            slot,
            size,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum VertexDivisor {
    Vertex,
    Instance,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct VertexBinding {
    pub slot: u32,
    pub stride: u32,
    pub divisor: VertexDivisor,
}

impl VertexBinding {
    pub fn new(slot: u32, stride: u32, divisor: VertexDivisor) -> VertexBinding {
        VertexBinding { slot, stride, divisor }
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct InputLayoutDesc {
    pub layouts: Vec<VertexLayout>,
    pub bindings: Vec<VertexBinding>,
}

impl InputLayoutDesc {
    pub fn binding(&self, slot: u32) -> Option<&VertexBinding> {
        self.bindings.iter().find(|b| b.slot == slot)
    }

    /// Sum of `offset + size` of the attributes read from `slot`.
    pub fn vertex_size(&self, slot: u32) -> u32 {
        self.layouts
            .iter()
            .filter(|l| l.slot == slot)
            .map(|l| l.offset + l.size)
            .sum()
    }
}
