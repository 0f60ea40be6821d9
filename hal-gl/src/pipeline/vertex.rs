//! Vertex input layouts and their resolution against a program's attributes.
use crate::api::types::*;
use crate::api::INVALID;
use crate::types;
use octoon_hal::{Error, GraphicsAttribute, InputLayoutDesc, Result, VertexDivisor};

/// Validated vertex input layout.
#[derive(Clone, Debug)]
pub struct GlInputLayout {
    desc: InputLayoutDesc,
}

impl GlInputLayout {
    pub fn new(desc: InputLayoutDesc) -> Result<GlInputLayout> {
        for layout in desc.layouts.iter() {
            if types::as_vertex_format(layout.format) == INVALID
                || types::vertex_components(layout.format) == 0
            {
                error!(
                    "vertex attribute {}{} has no native format ({:?})",
                    layout.semantic, layout.semantic_index, layout.format
                );
                return Err(Error::UnsupportedFormat(layout.format));
            }
            if layout.size == 0 {
                error!("vertex attribute {}{} has zero size", layout.semantic, layout.semantic_index);
                return Err(Error::InvalidDescriptor("vertex attribute of size 0"));
            }
        }
        Ok(GlInputLayout { desc })
    }

    pub fn desc(&self) -> &InputLayoutDesc {
        &self.desc
    }
}

/// One entry of a pipeline's attribute binding table.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct VertexAttrib {
    /// Native attribute location.
    pub location: u32,
    /// Vertex buffer slot.
    pub slot: u32,
    pub ty: GLenum,
    pub components: i32,
    /// Byte offset inside a vertex.
    pub offset: u32,
    pub stride: i32,
    pub divisor: u32,
    pub normalize: bool,
    /// Read with the integer attribute entry points.
    pub integer: bool,
}

/// Builds the binding table for `layout` as consumed by a program exposing `attributes`.
///
/// Layout entries the program does not read are skipped. Offsets accumulate over the whole layout
/// sequence, matched or not.
pub fn resolve_attributes(layout: &InputLayoutDesc, attributes: &[GraphicsAttribute]) -> Vec<VertexAttrib> {
    let mut table = Vec::new();
    let mut offset = 0;

    for entry in layout.layouts.iter() {
        let attrib_offset = offset + entry.offset;
        offset += entry.offset + entry.size;

        let attribute = attributes
            .iter()
            .find(|a| a.semantic == entry.semantic && a.semantic_index == entry.semantic_index);
        let attribute = match attribute {
            Some(attribute) => attribute,
            None => {
                trace!(
                    "vertex attribute {}{} is not read by the program",
                    entry.semantic,
                    entry.semantic_index
                );
                continue;
            }
        };

        let (stride, divisor) = match layout.binding(entry.slot) {
            Some(binding) => (
                binding.stride,
                match binding.divisor {
                    VertexDivisor::Vertex => 0,
                    VertexDivisor::Instance => 1,
                },
            ),
            None => (0, 0),
        };
        let stride = if stride == 0 {
            layout.vertex_size(entry.slot)
        } else {
            stride
        };

        let normalize = types::is_norm_format(entry.format);
        table.push(VertexAttrib {
            location: attribute.binding_point,
            slot: entry.slot,
            ty: types::as_vertex_format(entry.format),
            components: types::vertex_components(entry.format),
            offset: attrib_offset,
            stride: stride as i32,
            divisor,
            normalize,
            integer: entry.format.is_integer() && !normalize,
        });
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api as gl;
    use octoon_hal::{Format, VertexBinding, VertexLayout};

    fn attribute(semantic: &str, index: u32, location: u32) -> GraphicsAttribute {
        GraphicsAttribute {
            semantic: semantic.to_owned(),
            semantic_index: index,
            binding_point: location,
            format: Format::R32G32B32SFloat,
        }
    }

    fn mesh_layout() -> InputLayoutDesc {
        InputLayoutDesc {
            layouts: vec![
                VertexLayout::new("POSITION", 0, Format::R32G32B32SFloat, 0, 12),
                VertexLayout::new("NORMAL", 0, Format::R32G32B32SFloat, 0, 12),
                VertexLayout::new("COLOR", 0, Format::R8G8B8A8UNorm, 0, 4),
                VertexLayout::new("TEXCOORD", 0, Format::R32G32SFloat, 0, 8),
            ],
            bindings: vec![],
        }
    }

    #[test]
    fn offsets_count_skipped_entries() {
        let attributes = [attribute("POSITION", 0, 3), attribute("TEXCOORD", 0, 1)];
        let table = resolve_attributes(&mesh_layout(), &attributes);
        assert_eq!(table.len(), 2);
        assert_eq!(table[0].location, 3);
        assert_eq!(table[0].offset, 0);
        assert_eq!(table[1].location, 1);
        assert_eq!(table[1].offset, 28);
        assert_eq!(table[1].components, 2);
        // no explicit binding: tightly packed
        assert_eq!(table[1].stride, 36);
    }

    #[test]
    fn leading_padding() {
        let mut layout = mesh_layout();
        layout.layouts[1].offset = 4;
        let table = resolve_attributes(&layout, &[attribute("NORMAL", 0, 0), attribute("COLOR", 0, 2)]);
        assert_eq!(table[0].offset, 16);
        assert_eq!(table[1].offset, 28);
        assert_eq!(table[1].ty, gl::UNSIGNED_BYTE);
        assert!(table[1].normalize);
        assert!(!table[1].integer);
    }

    #[test]
    fn instance_bindings() {
        let layout = InputLayoutDesc {
            layouts: vec![
                VertexLayout::new("POSITION", 0, Format::R32G32B32SFloat, 0, 12),
                VertexLayout::new("INSTANCE", 0, Format::R32UInt, 1, 4),
            ],
            bindings: vec![
                VertexBinding::new(0, 16, VertexDivisor::Vertex),
                VertexBinding::new(1, 0, VertexDivisor::Instance),
            ],
        };
        let table = resolve_attributes(&layout, &[attribute("POSITION", 0, 0), attribute("INSTANCE", 0, 1)]);
        assert_eq!((table[0].stride, table[0].divisor), (16, 0));
        assert_eq!((table[1].stride, table[1].divisor), (4, 1));
        assert!(table[1].integer);
        assert_eq!(table[1].slot, 1);
    }

    #[test]
    fn unmatched_semantic_index() {
        let table = resolve_attributes(&mesh_layout(), &[attribute("TEXCOORD", 1, 0)]);
        assert!(table.is_empty());
    }

    #[test]
    fn layout_validation() {
        assert!(GlInputLayout::new(mesh_layout()).is_ok());

        let mut bad = mesh_layout();
        bad.layouts[0].format = Format::BC1RGBUNormBlock;
        assert_eq!(
            GlInputLayout::new(bad).unwrap_err(),
            Error::UnsupportedFormat(Format::BC1RGBUNormBlock)
        );

        let mut empty = mesh_layout();
        empty.layouts[2].size = 0;
        assert!(GlInputLayout::new(empty).is_err());
    }
}
