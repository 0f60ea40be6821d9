//! Framebuffer layouts and framebuffer objects.
use crate::api::types::*;
use crate::api::{self as gl, GlApi};
use crate::texture::{cube_face_target, GraphicsTexture};
use crate::types;
use octoon_hal::{AttachmentLayout, Error, Format, FramebufferLayoutDesc, Result, TextureDim};
use smallvec::SmallVec;
use std::fmt;
use std::rc::Rc;

/// Validated attachment layout shared by compatible framebuffers.
#[derive(Clone, Debug)]
pub struct GlFramebufferLayout {
    desc: FramebufferLayoutDesc,
}

impl GlFramebufferLayout {
    pub fn new(desc: FramebufferLayoutDesc) -> Result<GlFramebufferLayout> {
        let mut depth_stencil = 0;
        for (i, component) in desc.components.iter().enumerate() {
            if component.is_depth_or_stencil() {
                depth_stencil += 1;
                continue;
            }
            let duplicate = desc.components[..i]
                .iter()
                .any(|c| !c.is_depth_or_stencil() && c.slot == component.slot);
            if duplicate {
                error!("framebuffer layout uses color slot {} twice", component.slot);
                return Err(Error::InvalidDescriptor("duplicate color slot"));
            }
        }
        if depth_stencil > 1 {
            error!("framebuffer layout has {} depth/stencil attachments", depth_stencil);
            return Err(Error::InvalidDescriptor("more than one depth/stencil attachment"));
        }
        Ok(GlFramebufferLayout { desc })
    }

    pub fn desc(&self) -> &FramebufferLayoutDesc {
        &self.desc
    }

    /// Color attachments in declaration order.
    pub fn colors(&self) -> impl Iterator<Item = &AttachmentLayout> {
        self.desc.components.iter().filter(|c| !c.is_depth_or_stencil())
    }

    pub fn depth_stencil(&self) -> Option<&AttachmentLayout> {
        self.desc.components.iter().find(|c| c.is_depth_or_stencil())
    }
}

/// Attachment point of a depth and/or stencil format.
pub fn depth_stencil_attachment_point(format: Format) -> GLenum {
    if types::is_depth_stencil_format(format) {
        gl::DEPTH_STENCIL_ATTACHMENT
    } else if types::is_stencil_format(format) {
        gl::STENCIL_ATTACHMENT
    } else {
        gl::DEPTH_ATTACHMENT
    }
}

//--------------------------------------------------------------------------------------------------
/// A texture level (and layer or cube face) bound to an attachment.
#[derive(Clone)]
pub struct FramebufferAttachment {
    pub texture: Rc<dyn GraphicsTexture>,
    pub mip_level: u32,
    /// Array layer, depth slice or cube face (cube arrays: `6 * layer + face`).
    pub layer: u32,
}

impl fmt::Debug for FramebufferAttachment {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("FramebufferAttachment")
            .field("texture", &self.texture.instance_id())
            .field("mip_level", &self.mip_level)
            .field("layer", &self.layer)
            .finish()
    }
}

impl FramebufferAttachment {
    pub fn new(texture: Rc<dyn GraphicsTexture>) -> FramebufferAttachment {
        FramebufferAttachment {
            texture,
            mip_level: 0,
            layer: 0,
        }
    }

    fn layer_count(&self) -> u32 {
        let desc = self.texture.desc();
        match desc.dim {
            TextureDim::Cube => 6,
            TextureDim::CubeArray => 6 * desc.layer_nums,
            TextureDim::Texture3D => desc.depth,
            TextureDim::Texture2DArray | TextureDim::Texture2DArrayMultisample => desc.layer_nums,
            TextureDim::Texture2D | TextureDim::Texture2DMultisample => 1,
        }
    }

    fn is_layered(&self) -> bool {
        match self.texture.desc().dim {
            TextureDim::Texture2D | TextureDim::Texture2DMultisample => false,
            _ => true,
        }
    }

    fn validate(&self) -> Result<()> {
        let desc = self.texture.desc();
        if self.mip_level >= desc.mip_base + desc.mip_nums {
            error!("attachment level {} outside the texture's {} levels", self.mip_level, desc.mip_nums);
            return Err(Error::InvalidDescriptor("attachment level out of range"));
        }
        if self.layer >= self.layer_count() {
            error!("attachment layer {} outside the texture's {} layers", self.layer, self.layer_count());
            return Err(Error::InvalidDescriptor("attachment layer out of range"));
        }
        Ok(())
    }
}

#[derive(Clone, Debug)]
pub struct FramebufferDesc {
    pub width: u32,
    pub height: u32,
    pub layout: Rc<GlFramebufferLayout>,
    /// One per color attachment of the layout, in the same order.
    pub color_attachments: Vec<FramebufferAttachment>,
    pub depth_stencil_attachment: Option<FramebufferAttachment>,
}

/// Framebuffer object with attachments fixed at creation.
pub struct GlFramebuffer {
    gl: Rc<dyn GlApi>,
    desc: FramebufferDesc,
    framebuffer: GLuint,
    dsa: bool,
}

impl fmt::Debug for GlFramebuffer {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("GlFramebuffer")
            .field("framebuffer", &self.framebuffer)
            .field("width", &self.desc.width)
            .field("height", &self.desc.height)
            .field("colors", &self.desc.color_attachments.len())
            .finish()
    }
}

impl GlFramebuffer {
    /// Creates the framebuffer object. With `dsa` the named entry points are used and nothing
    /// is bound.
    pub fn new(gl: Rc<dyn GlApi>, desc: FramebufferDesc, dsa: bool) -> Result<GlFramebuffer> {
        let colors: Vec<AttachmentLayout> = desc.layout.colors().cloned().collect();
        if colors.len() != desc.color_attachments.len() {
            error!(
                "framebuffer has {} color attachments, its layout {}",
                desc.color_attachments.len(),
                colors.len()
            );
            return Err(Error::InvalidDescriptor("color attachments do not match the layout"));
        }
        let depth_layout = desc.layout.depth_stencil().cloned();
        if depth_layout.is_some() != desc.depth_stencil_attachment.is_some() {
            error!("framebuffer depth/stencil attachment does not match its layout");
            return Err(Error::InvalidDescriptor("depth/stencil attachment does not match the layout"));
        }
        if desc.width == 0 || desc.height == 0 {
            error!("framebuffer of size {}x{}", desc.width, desc.height);
            return Err(Error::InvalidDescriptor("framebuffer of size 0"));
        }
        for attachment in desc.color_attachments.iter().chain(desc.depth_stencil_attachment.iter()) {
            attachment.validate()?;
        }

        let framebuffer = if dsa {
            gl.create_framebuffer()
        } else {
            gl.gen_framebuffer()
        };
        if framebuffer == 0 {
            error!("no framebuffer name returned");
            return Err(Error::NativeAllocation("framebuffer"));
        }
        if !dsa {
            gl.bind_framebuffer(gl::FRAMEBUFFER, framebuffer);
        }

        let mut draw_buffers: SmallVec<[GLenum; 8]> = SmallVec::new();
        for (layout, attachment) in colors.iter().zip(desc.color_attachments.iter()) {
            let point = gl::COLOR_ATTACHMENT0 + layout.slot;
            attach(&*gl, framebuffer, dsa, point, attachment);
            draw_buffers.push(point);
        }
        if let (Some(layout), Some(attachment)) = (depth_layout, desc.depth_stencil_attachment.as_ref()) {
            attach(&*gl, framebuffer, dsa, depth_stencil_attachment_point(layout.format), attachment);
        }
        if draw_buffers.is_empty() {
            draw_buffers.push(gl::NONE);
        }

        let status = if dsa {
            gl.named_framebuffer_draw_buffers(framebuffer, &draw_buffers);
            gl.check_named_framebuffer_status(framebuffer, gl::FRAMEBUFFER)
        } else {
            gl.draw_buffers(&draw_buffers);
            let status = gl.check_framebuffer_status(gl::FRAMEBUFFER);
            gl.bind_framebuffer(gl::FRAMEBUFFER, 0);
            status
        };
        if status != gl::FRAMEBUFFER_COMPLETE {
            error!("framebuffer {} incomplete (status 0x{:X})", framebuffer, status);
            gl.delete_framebuffer(framebuffer);
            return Err(Error::IncompleteFramebuffer(status));
        }

        debug!(
            "framebuffer {} ({}x{}, {} color attachments)",
            framebuffer,
            desc.width,
            desc.height,
            desc.color_attachments.len()
        );
        Ok(GlFramebuffer {
            gl,
            desc,
            framebuffer,
            dsa,
        })
    }

    pub fn desc(&self) -> &FramebufferDesc {
        &self.desc
    }

    pub fn instance_id(&self) -> GLuint {
        self.framebuffer
    }

    pub fn is_dsa(&self) -> bool {
        self.dsa
    }

    pub fn width(&self) -> u32 {
        self.desc.width
    }

    pub fn height(&self) -> u32 {
        self.desc.height
    }

    pub fn layout(&self) -> &Rc<GlFramebufferLayout> {
        &self.desc.layout
    }

    /// Native color attachment points in attachment order.
    pub fn color_points(&self) -> Vec<GLenum> {
        self.desc
            .layout
            .colors()
            .map(|c| gl::COLOR_ATTACHMENT0 + c.slot)
            .collect()
    }

    pub fn depth_stencil_format(&self) -> Option<Format> {
        self.desc.layout.depth_stencil().map(|c| c.format)
    }
}

fn attach(gl: &dyn GlApi, framebuffer: GLuint, dsa: bool, point: GLenum, attachment: &FramebufferAttachment) {
    let texture = &attachment.texture;
    let id = texture.instance_id();
    let level = attachment.mip_level as i32;
    let layer = attachment.layer as i32;
    let cube = texture.desc().dim == TextureDim::Cube;

    match (dsa, attachment.is_layered()) {
        (true, true) => gl.named_framebuffer_texture_layer(framebuffer, point, id, level, layer),
        (true, false) => gl.named_framebuffer_texture(framebuffer, point, id, level),
        (false, true) if cube => gl.framebuffer_texture_2d(
            gl::FRAMEBUFFER,
            point,
            cube_face_target(attachment.layer),
            id,
            level,
        ),
        (false, true) => gl.framebuffer_texture_layer(gl::FRAMEBUFFER, point, id, level, layer),
        (false, false) => gl.framebuffer_texture_2d(gl::FRAMEBUFFER, point, texture.target(), id, level),
    }
}

impl Drop for GlFramebuffer {
    fn drop(&mut self) {
        self.gl.delete_framebuffer(self.framebuffer);
    }
}
