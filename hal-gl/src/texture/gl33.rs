use super::*;
use std::fmt;
use std::rc::Rc;

/// Texture allocated level by level through its binding target.
pub struct Gl33Texture {
    gl: Rc<dyn GlApi>,
    desc: TextureDesc,
    texture: GLuint,
    extents: Extents,
    format: TextureFormat,
    pbo: PixelBuffer,
}

impl fmt::Debug for Gl33Texture {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Gl33Texture")
            .field("texture", &self.texture)
            .field("dim", &self.desc.dim)
            .field("format", &self.desc.format)
            .field("extents", &self.extents)
            .finish()
    }
}

impl Gl33Texture {
    pub fn new(gl: Rc<dyn GlApi>, desc: TextureDesc) -> Result<Gl33Texture> {
        let (extents, format) = validate(&desc)?;
        let plan = if desc.dim.is_multisample() {
            None
        } else {
            let plan = plan_uploads(&desc, &format)?;
            let mode = upload_mode(&desc, &plan)?;
            Some((plan, mode))
        };

        let texture = gl.gen_texture();
        if texture == 0 {
            error!("glGenTextures returned no name");
            return Err(Error::NativeAllocation("texture"));
        }

        let target = extents.target;
        gl.bind_texture(target, texture);

        match plan {
            None => {
                if uses_3d_storage(desc.dim) {
                    gl.tex_image_3d_multisample(
                        target,
                        desc.samples as i32,
                        format.internal,
                        extents.width as i32,
                        extents.height as i32,
                        extents.depth as i32,
                    );
                } else {
                    gl.tex_image_2d_multisample(
                        target,
                        desc.samples as i32,
                        format.internal,
                        extents.width as i32,
                        extents.height as i32,
                    );
                }
            }
            Some((plan, mode)) => {
                for &(pname, param) in sampling_parameters(&desc).iter() {
                    gl.tex_parameter_i(target, pname, param);
                }
                gl.pixel_store_i(gl::UNPACK_ALIGNMENT, unpack_alignment(format.pixel_size()));

                for region in plan.regions.iter() {
                    let data = region_data(&desc, mode, region);
                    let image_target = region.face.map_or(target, cube_face_target);
                    let (w, h, d) = (region.width as i32, region.height as i32, region.depth as i32);
                    let level = region.level as i32;
                    if format.compressed {
                        // glCompressedTexImage has no "allocate only" form that every driver accepts
                        let zeroed;
                        let data = match data {
                            Some(data) => data,
                            None => {
                                zeroed = vec![0u8; region.size];
                                &zeroed[..]
                            }
                        };
                        if uses_3d_storage(desc.dim) {
                            gl.compressed_tex_image_3d(image_target, level, format.internal, w, h, d, data);
                        } else {
                            gl.compressed_tex_image_2d(image_target, level, format.internal, w, h, data);
                        }
                    } else if uses_3d_storage(desc.dim) {
                        gl.tex_image_3d(
                            image_target,
                            level,
                            format.internal,
                            w,
                            h,
                            d,
                            format.format,
                            format.ty,
                            data,
                        );
                    } else {
                        gl.tex_image_2d(
                            image_target,
                            level,
                            format.internal,
                            w,
                            h,
                            format.format,
                            format.ty,
                            data,
                        );
                    }
                }

                if mode == UploadMode::BaseAndGenerate {
                    gl.generate_mipmap(target);
                }
            }
        }

        gl.bind_texture(target, 0);

        trace!(
            "texture {} ({:?} {:?}, {}x{}x{}, {} levels)",
            texture,
            desc.dim,
            desc.format,
            extents.width,
            extents.height,
            extents.depth,
            desc.mip_nums
        );

        let texture = Gl33Texture {
            gl,
            desc,
            texture,
            extents,
            format,
            pbo: PixelBuffer::default(),
        };
        if cfg!(debug_assertions) {
            types::check_error(&*texture.gl)?;
        }
        Ok(texture)
    }
}

impl GraphicsTexture for Gl33Texture {
    fn desc(&self) -> &TextureDesc {
        &self.desc
    }

    fn instance_id(&self) -> GLuint {
        self.texture
    }

    fn target(&self) -> GLenum {
        self.extents.target
    }

    fn map(&self, x: u32, y: u32, w: u32, h: u32, mip: u32) -> Result<MappedRange> {
        let (transfer, size, offset) = map_request(&self.desc, &self.format, x, y, w, h, mip)?;
        self.pbo.prepare(&*self.gl, transfer.write, size)?;
        if !transfer.write {
            let gl = &*self.gl;
            gl.bind_texture(self.extents.target, self.texture);
            gl.pixel_store_i(gl::PACK_ALIGNMENT, unpack_alignment(self.format.pixel_size()));
            gl.get_tex_image(self.extents.target, mip as i32, self.format.format, self.format.ty);
            gl.bind_texture(self.extents.target, 0);
        }
        let ptr = self.pbo.map(&*self.gl, transfer, size, offset)?;
        Ok(MappedRange::new(self, ptr, size - offset, transfer.write))
    }
}

impl Unmap for Gl33Texture {
    fn unmap_range(&self) -> Result<()> {
        let transfer = self.pbo.unmap(&*self.gl)?;
        if transfer.write {
            let gl = &*self.gl;
            gl.bind_texture(self.extents.target, self.texture);
            gl.pixel_store_i(gl::UNPACK_ALIGNMENT, unpack_alignment(self.format.pixel_size()));
            gl.tex_sub_image_2d(
                self.extents.target,
                transfer.mip as i32,
                0,
                0,
                transfer.width as i32,
                transfer.height as i32,
                self.format.format,
                self.format.ty,
                None,
            );
            gl.bind_texture(self.extents.target, 0);
            self.pbo.release(gl);
        }
        Ok(())
    }
}

impl Drop for Gl33Texture {
    fn drop(&mut self) {
        self.pbo.destroy(&*self.gl);
        self.gl.delete_texture(self.texture);
    }
}
