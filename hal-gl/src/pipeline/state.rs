//! Fixed-function state objects and the diff against the context's captured state.
use crate::api::types::*;
use crate::api::{self as gl, GlApi, INVALID};
use crate::types;
use octoon_hal::{
    ColorBlend, ColorMaskFlags, CompareFunction, CullMode, Error, RenderStateDesc, Result,
    StencilFaceState,
};
use std::fmt;

fn update_cached<T: PartialEq>(last: &mut T, new: T, force: bool, f: impl FnOnce()) {
    if force || *last != new {
        *last = new;
        f();
    }
}

fn set_cap(gl: &dyn GlApi, cap: GLenum, enable: bool) {
    if enable {
        gl.enable(cap)
    } else {
        gl.disable(cap)
    }
}

fn color_mask(gl: &dyn GlApi, index: u32, mask: ColorMaskFlags) {
    gl.color_mask_i(
        index,
        mask.contains(ColorMaskFlags::RED),
        mask.contains(ColorMaskFlags::GREEN),
        mask.contains(ColorMaskFlags::BLUE),
        mask.contains(ColorMaskFlags::ALPHA),
    );
}

fn compare_function(func: CompareFunction) -> Result<GLenum> {
    match types::as_compare_function(func) {
        INVALID => {
            error!("invalid compare function {:?}", func);
            Err(Error::InvalidEnum("compare function"))
        }
        func => Ok(func),
    }
}

/// Native comparison functions the target needs, translated before any call is issued.
struct CompareTokens {
    depth: GLenum,
    stencil_front: GLenum,
    stencil_back: GLenum,
}

impl CompareTokens {
    fn translate(desc: &RenderStateDesc, force: bool) -> Result<CompareTokens> {
        let depth = if desc.depth_enable || force {
            compare_function(desc.depth_func)?
        } else {
            INVALID
        };
        let (stencil_front, stencil_back) = if desc.stencil_enable || force {
            (
                compare_function(desc.stencil_front.func)?,
                compare_function(desc.stencil_back.func)?,
            )
        } else {
            (INVALID, INVALID)
        };
        Ok(CompareTokens {
            depth,
            stencil_front,
            stencil_back,
        })
    }
}

//--------------------------------------------------------------------------------------------------
/// Immutable fixed-function state.
///
/// Applying a state compares it field by field with the state last submitted on the context
/// and only issues the calls for what differs. Validation happens before the first call: a state
/// with an untranslatable value issues nothing and leaves the captured state as it was.
pub struct GlState {
    desc: RenderStateDesc,
}

impl fmt::Debug for GlState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("GlState").field("desc", &self.desc).finish()
    }
}

impl GlState {
    pub fn new(desc: RenderStateDesc) -> GlState {
        GlState { desc }
    }

    pub fn desc(&self) -> &RenderStateDesc {
        &self.desc
    }

    /// Brings the context from `last` to this state.
    pub fn apply(&self, gl: &dyn GlApi, last: &mut RenderStateDesc) -> Result<()> {
        self.submit(gl, last, false)
    }

    /// Issues every field regardless of `last`, used when the native state is unknown.
    pub fn apply_all(&self, gl: &dyn GlApi, last: &mut RenderStateDesc) -> Result<()> {
        self.submit(gl, last, true)
    }

    fn submit(&self, gl: &dyn GlApi, last: &mut RenderStateDesc, force: bool) -> Result<()> {
        let desc = &self.desc;
        let tokens = CompareTokens::translate(desc, force)?;

        apply_blends(gl, &desc.blends, &mut last.blends, force);

        if force || last.cull_mode != desc.cull_mode {
            if desc.cull_mode == CullMode::None {
                gl.disable(gl::CULL_FACE);
            } else {
                if force || last.cull_mode == CullMode::None {
                    gl.enable(gl::CULL_FACE);
                }
                gl.cull_face(types::as_cull_mode(desc.cull_mode));
            }
            last.cull_mode = desc.cull_mode;
        }
        update_cached(&mut last.front_face, desc.front_face, force, || {
            gl.front_face(types::as_front_face(desc.front_face))
        });
        update_cached(&mut last.polygon_mode, desc.polygon_mode, force, || {
            gl.polygon_mode(gl::FRONT_AND_BACK, types::as_polygon_mode(desc.polygon_mode))
        });
        update_cached(&mut last.scissor_test_enable, desc.scissor_test_enable, force, || {
            set_cap(gl, gl::SCISSOR_TEST, desc.scissor_test_enable)
        });
        update_cached(&mut last.srgb_enable, desc.srgb_enable, force, || {
            set_cap(gl, gl::FRAMEBUFFER_SRGB, desc.srgb_enable)
        });

        // depth
        update_cached(&mut last.depth_enable, desc.depth_enable, force, || {
            set_cap(gl, gl::DEPTH_TEST, desc.depth_enable)
        });
        if desc.depth_enable || force {
            update_cached(&mut last.depth_func, desc.depth_func, force, || {
                gl.depth_func(tokens.depth)
            });
        }
        update_cached(&mut last.depth_write_enable, desc.depth_write_enable, force, || {
            gl.depth_mask(desc.depth_write_enable)
        });
        update_cached(&mut last.depth_bias_enable, desc.depth_bias_enable, force, || {
            set_cap(gl, gl::POLYGON_OFFSET_FILL, desc.depth_bias_enable)
        });
        if desc.depth_bias_enable || force {
            let bias = (desc.depth_slope_scale_bias, desc.depth_bias);
            if force || (last.depth_slope_scale_bias, last.depth_bias) != bias {
                gl.polygon_offset(bias.0.into_inner(), bias.1.into_inner());
                last.depth_slope_scale_bias = bias.0;
                last.depth_bias = bias.1;
            }
        }

        // stencil
        update_cached(&mut last.stencil_enable, desc.stencil_enable, force, || {
            set_cap(gl, gl::STENCIL_TEST, desc.stencil_enable)
        });
        if desc.stencil_enable || force {
            apply_stencil_face(gl, gl::FRONT, tokens.stencil_front, &desc.stencil_front, &mut last.stencil_front, force);
            apply_stencil_face(gl, gl::BACK, tokens.stencil_back, &desc.stencil_back, &mut last.stencil_back, force);
        }

        update_cached(&mut last.line_width, desc.line_width, force, || {
            gl.line_width(desc.line_width.into_inner())
        });

        // consumed by the next draw
        last.primitive_type = desc.primitive_type;
        Ok(())
    }
}

fn apply_blend(gl: &dyn GlApi, index: u32, blend: &ColorBlend, last: &mut ColorBlend, force: bool) {
    update_cached(&mut last.enable, blend.enable, force, || {
        if blend.enable {
            gl.enable_i(gl::BLEND, index)
        } else {
            gl.disable_i(gl::BLEND, index)
        }
    });

    let factors = (blend.color_src, blend.color_dst, blend.alpha_src, blend.alpha_dst);
    if force || (last.color_src, last.color_dst, last.alpha_src, last.alpha_dst) != factors {
        gl.blend_func_separate_i(
            index,
            types::as_blend_factor(blend.color_src),
            types::as_blend_factor(blend.color_dst),
            types::as_blend_factor(blend.alpha_src),
            types::as_blend_factor(blend.alpha_dst),
        );
        last.color_src = blend.color_src;
        last.color_dst = blend.color_dst;
        last.alpha_src = blend.alpha_src;
        last.alpha_dst = blend.alpha_dst;
    }

    if force || (last.color_op, last.alpha_op) != (blend.color_op, blend.alpha_op) {
        gl.blend_equation_separate_i(
            index,
            types::as_blend_op(blend.color_op),
            types::as_blend_op(blend.alpha_op),
        );
        last.color_op = blend.color_op;
        last.alpha_op = blend.alpha_op;
    }

    update_cached(&mut last.color_write_mask, blend.color_write_mask, force, || {
        color_mask(gl, index, blend.color_write_mask)
    });
}

/// Per-attachment blend diff. Attachments past the end of `blends` are reset and dropped from
/// the captured state.
fn apply_blends(gl: &dyn GlApi, blends: &[ColorBlend], last: &mut Vec<ColorBlend>, force: bool) {
    for (i, blend) in blends.iter().enumerate() {
        let index = i as u32;
        if i < last.len() {
            apply_blend(gl, index, blend, &mut last[i], force);
        } else {
            // nothing captured for this attachment yet
            let mut captured = *blend;
            apply_blend(gl, index, blend, &mut captured, true);
            last.push(captured);
        }
    }

    for (i, stale) in last.iter().enumerate().skip(blends.len()) {
        if stale.enable {
            gl.disable_i(gl::BLEND, i as u32);
        }
        if stale.color_write_mask != ColorMaskFlags::ALL {
            color_mask(gl, i as u32, ColorMaskFlags::ALL);
        }
    }
    last.truncate(blends.len());
}

fn apply_stencil_face(
    gl: &dyn GlApi,
    face: GLenum,
    func: GLenum,
    target: &StencilFaceState,
    last: &mut StencilFaceState,
    force: bool,
) {
    let test = (target.func, target.reference, target.read_mask);
    if force || (last.func, last.reference, last.read_mask) != test {
        gl.stencil_func_separate(face, func, target.reference as i32, target.read_mask);
        last.func = target.func;
        last.reference = target.reference;
        last.read_mask = target.read_mask;
    }

    let ops = (target.fail, target.depth_fail, target.pass);
    if force || (last.fail, last.depth_fail, last.pass) != ops {
        gl.stencil_op_separate(
            face,
            types::as_stencil_op(target.fail),
            types::as_stencil_op(target.depth_fail),
            types::as_stencil_op(target.pass),
        );
        last.fail = target.fail;
        last.depth_fail = target.depth_fail;
        last.pass = target.pass;
    }

    update_cached(&mut last.write_mask, target.write_mask, force, || {
        gl.stencil_mask_separate(face, target.write_mask)
    });
}
