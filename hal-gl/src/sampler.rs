use crate::api::types::*;
use crate::api::{self as gl, GlApi, INVALID};
use crate::property::DeviceProperty;
use crate::types;
use octoon_hal::{Error, Result, SamplerDesc};
use std::fmt;
use std::rc::Rc;

/// Sampler object. Both paths share this implementation.
pub struct GlSampler {
    gl: Rc<dyn GlApi>,
    desc: SamplerDesc,
    sampler: GLuint,
}

impl fmt::Debug for GlSampler {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("GlSampler")
            .field("sampler", &self.sampler)
            .field("desc", &self.desc)
            .finish()
    }
}

impl GlSampler {
    pub fn new(gl: Rc<dyn GlApi>, property: &DeviceProperty, desc: SamplerDesc) -> Result<GlSampler> {
        let wrap = types::as_sampler_wrap(desc.wrap);
        let min_filter = types::as_sampler_min_filter(desc.min_filter);
        let mag_filter = types::as_sampler_mag_filter(desc.mag_filter);
        if wrap == INVALID || min_filter == INVALID || mag_filter == INVALID {
            error!("invalid sampler parameters {:?}", desc);
            return Err(Error::InvalidEnum("sampler parameter"));
        }

        let sampler = gl.gen_sampler();
        if sampler == 0 {
            error!("glGenSamplers returned no name");
            return Err(Error::NativeAllocation("sampler"));
        }

        gl.sampler_parameter_i(sampler, gl::TEXTURE_WRAP_S, wrap as i32);
        gl.sampler_parameter_i(sampler, gl::TEXTURE_WRAP_T, wrap as i32);
        gl.sampler_parameter_i(sampler, gl::TEXTURE_WRAP_R, wrap as i32);
        gl.sampler_parameter_i(sampler, gl::TEXTURE_MIN_FILTER, min_filter as i32);
        gl.sampler_parameter_i(sampler, gl::TEXTURE_MAG_FILTER, mag_filter as i32);

        let anis = desc.anis.level();
        if anis > 0 {
            if property.supports_anisotropy() {
                let level = (anis as f32).min(property.limits.max_anisotropy.max(1.0));
                gl.sampler_parameter_f(sampler, gl::TEXTURE_MAX_ANISOTROPY_EXT, level);
            } else {
                debug!("anisotropic filtering unavailable, ignoring {:?}", desc.anis);
            }
        }

        Ok(GlSampler { gl, desc, sampler })
    }

    pub fn desc(&self) -> &SamplerDesc {
        &self.desc
    }

    pub fn instance_id(&self) -> GLuint {
        self.sampler
    }
}

impl Drop for GlSampler {
    fn drop(&mut self) {
        self.gl.delete_sampler(self.sampler);
    }
}
