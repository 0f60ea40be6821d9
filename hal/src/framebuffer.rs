use crate::format::Format;
use bitflags::bitflags;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ImageLayout {
    ColorAttachmentOptimal,
    DepthStencilAttachmentOptimal,
    DepthStencilReadOnlyOptimal,
    ShaderReadOnlyOptimal,
    General,
}

/// One attachment slot of a framebuffer layout.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct AttachmentLayout {
    /// Color attachment index, ignored for depth/stencil attachments.
    pub slot: u32,
    pub layout: ImageLayout,
    pub format: Format,
}

impl AttachmentLayout {
    pub fn new(slot: u32, layout: ImageLayout, format: Format) -> AttachmentLayout {
        AttachmentLayout { slot, layout, format }
    }

    pub fn is_depth_or_stencil(&self) -> bool {
        self.format.is_depth() || self.format.is_stencil() || self.format.is_depth_stencil()
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct FramebufferLayoutDesc {
    pub components: Vec<AttachmentLayout>,
}

bitflags! {
    #[derive(Default)]
    pub struct ClearFlags: u32 {
        const COLOR = (1 << 0);
        const DEPTH = (1 << 1);
        const STENCIL = (1 << 2);
        const DEPTH_STENCIL = Self::DEPTH.bits | Self::STENCIL.bits;
        const ALL = Self::COLOR.bits | Self::DEPTH.bits | Self::STENCIL.bits;
    }
}

/// Viewport rectangle, bottom-left origin.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Viewport {
        Viewport { x, y, width, height }
    }
}

/// Scissor rectangle, top-left origin.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Scissor {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Scissor {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Scissor {
        Scissor { x, y, width, height }
    }
}
