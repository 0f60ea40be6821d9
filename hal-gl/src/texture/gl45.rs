use super::*;
use std::fmt;
use std::rc::Rc;

/// Texture with immutable storage, filled through named entry points.
pub struct Gl45Texture {
    gl: Rc<dyn GlApi>,
    desc: TextureDesc,
    texture: GLuint,
    extents: Extents,
    format: TextureFormat,
    pbo: PixelBuffer,
}

impl fmt::Debug for Gl45Texture {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Gl45Texture")
            .field("texture", &self.texture)
            .field("dim", &self.desc.dim)
            .field("format", &self.desc.format)
            .field("extents", &self.extents)
            .finish()
    }
}

fn upload(gl: &dyn GlApi, texture: GLuint, desc: &TextureDesc, format: &TextureFormat, region: &UploadRegion, data: &[u8]) {
    let level = region.level as i32;
    let (w, h) = (region.width as i32, region.height as i32);
    // cube faces are layers of the storage
    let (z, d) = match region.face {
        Some(face) => (face as i32, 1),
        None => (0, region.depth as i32),
    };
    let volume = region.face.is_some() || uses_3d_storage(desc.dim);

    match (format.compressed, volume) {
        (true, true) => {
            gl.compressed_texture_sub_image_3d(texture, level, 0, 0, z, w, h, d, format.internal, data)
        }
        (true, false) => {
            gl.compressed_texture_sub_image_2d(texture, level, 0, 0, w, h, format.internal, data)
        }
        (false, true) => gl.texture_sub_image_3d(
            texture,
            level,
            0,
            0,
            z,
            w,
            h,
            d,
            format.format,
            format.ty,
            Some(data),
        ),
        (false, false) => gl.texture_sub_image_2d(
            texture,
            level,
            0,
            0,
            w,
            h,
            format.format,
            format.ty,
            Some(data),
        ),
    }
}

impl Gl45Texture {
    pub fn new(gl: Rc<dyn GlApi>, desc: TextureDesc) -> Result<Gl45Texture> {
        let (extents, format) = validate(&desc)?;
        let plan = if desc.dim.is_multisample() {
            None
        } else {
            let plan = plan_uploads(&desc, &format)?;
            let mode = upload_mode(&desc, &plan)?;
            Some((plan, mode))
        };

        let texture = gl.create_texture(extents.target);
        if texture == 0 {
            error!("glCreateTextures returned no name");
            return Err(Error::NativeAllocation("texture"));
        }

        let (w, h, d) = (extents.width as i32, extents.height as i32, extents.depth as i32);
        match plan {
            None => {
                let samples = desc.samples as i32;
                if uses_3d_storage(desc.dim) {
                    gl.texture_storage_3d_multisample(texture, samples, format.internal, w, h, d);
                } else {
                    gl.texture_storage_2d_multisample(texture, samples, format.internal, w, h);
                }
            }
            Some((plan, mode)) => {
                for &(pname, param) in sampling_parameters(&desc).iter() {
                    gl.texture_parameter_i(texture, pname, param);
                }

                let levels = (desc.mip_base + desc.mip_nums) as i32;
                if uses_3d_storage(desc.dim) {
                    gl.texture_storage_3d(texture, levels, format.internal, w, h, d);
                } else {
                    gl.texture_storage_2d(texture, levels, format.internal, w, h);
                }

                if mode != UploadMode::Allocate {
                    gl.pixel_store_i(gl::UNPACK_ALIGNMENT, unpack_alignment(format.pixel_size()));
                    for region in plan.regions.iter() {
                        if let Some(data) = region_data(&desc, mode, region) {
                            upload(&*gl, texture, &desc, &format, region, data);
                        }
                    }
                }
                if mode == UploadMode::BaseAndGenerate {
                    gl.generate_texture_mipmap(texture);
                }
            }
        }

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

        let texture = Gl45Texture {
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

impl GraphicsTexture for Gl45Texture {
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
            self.gl
                .pixel_store_i(gl::PACK_ALIGNMENT, unpack_alignment(self.format.pixel_size()));
            self.gl.get_texture_image(
                self.texture,
                mip as i32,
                self.format.format,
                self.format.ty,
                size,
            );
        }
        let ptr = self.pbo.map(&*self.gl, transfer, size, offset)?;
        Ok(MappedRange::new(self, ptr, size - offset, transfer.write))
    }
}

impl Unmap for Gl45Texture {
    fn unmap_range(&self) -> Result<()> {
        let transfer = self.pbo.unmap(&*self.gl)?;
        if transfer.write {
            let gl = &*self.gl;
            gl.pixel_store_i(gl::UNPACK_ALIGNMENT, unpack_alignment(self.format.pixel_size()));
            gl.texture_sub_image_2d(
                self.texture,
                transfer.mip as i32,
                0,
                0,
                transfer.width as i32,
                transfer.height as i32,
                self.format.format,
                self.format.ty,
                None,
            );
            self.pbo.release(gl);
        }
        Ok(())
    }
}

impl Drop for Gl45Texture {
    fn drop(&mut self) {
        self.pbo.destroy(&*self.gl);
        self.gl.delete_texture(self.texture);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingGl;

    fn recording() -> (Rc<RecordingGl>, Rc<dyn GlApi>) {
        let gl = Rc::new(RecordingGl::new());
        let api: Rc<dyn GlApi> = gl.clone();
        (gl, api)
    }

    #[test]
    fn immutable_storage_covers_every_level() {
        let (gl, api) = recording();
        let desc = TextureDesc {
            mip_nums: 3,
            stream: Some(vec![1; 336]),
            ..TextureDesc::new_2d(8, 8, Format::R8G8B8A8UNorm)
        };
        let tex = Gl45Texture::new(api, desc).unwrap();
        let id = tex.instance_id();
        assert!(gl.calls().contains(&format!(
            "TextureStorage2D({}, 3, {}, 8, 8)",
            id,
            gl::RGBA8
        )));
        assert_eq!(gl.count("TextureSubImage2D"), 3);
        assert_eq!(gl.count("GenerateTextureMipmap"), 0);
        assert_eq!(gl.count("BindTexture"), 0);
    }

    #[test]
    fn no_stream_only_allocates() {
        let (gl, api) = recording();
        Gl45Texture::new(api, TextureDesc::new_2d(8, 8, Format::R8G8B8A8UNorm)).unwrap();
        assert_eq!(gl.count("TextureStorage2D"), 1);
        assert_eq!(gl.count("TextureSubImage2D"), 0);
        assert_eq!(gl.count("PixelStorei"), 0);
    }

    #[test]
    fn cube_faces_are_layers() {
        let (gl, api) = recording();
        let desc = TextureDesc {
            dim: TextureDim::Cube,
            stream: Some(vec![0; 6 * 64]),
            ..TextureDesc::new_2d(4, 4, Format::R8G8B8A8UNorm)
        };
        let tex = Gl45Texture::new(api, desc).unwrap();
        assert_eq!(gl.count("TextureStorage2D"), 1);
        assert_eq!(gl.count("TextureSubImage3D"), 6);
        assert!(gl.calls().contains(&format!(
            "TextureSubImage3D({}, 0, 0, 0, 5, 4, 4, 1, {}, {}, Some(64))",
            tex.instance_id(),
            gl::RGBA,
            gl::UNSIGNED_BYTE
        )));
    }

    #[test]
    fn array_layers_use_depth() {
        let (gl, api) = recording();
        let desc = TextureDesc {
            dim: TextureDim::Texture2DArray,
            layer_nums: 4,
            ..TextureDesc::new_2d(16, 16, Format::R32SFloat)
        };
        let tex = Gl45Texture::new(api, desc).unwrap();
        assert_eq!(tex.target(), gl::TEXTURE_2D_ARRAY);
        assert!(gl.calls().contains(&format!(
            "TextureStorage3D({}, 1, {}, 16, 16, 4)",
            tex.instance_id(),
            gl::R32F
        )));
    }

    #[test]
    fn read_mapping_fetches_the_level() {
        let (gl, api) = recording();
        let desc = TextureDesc {
            mip_nums: 2,
            ..TextureDesc::new_2d(8, 8, Format::R8G8B8A8UNorm)
        };
        let tex = Gl45Texture::new(api, desc).unwrap();
        let range = tex.map(0, 0, 4, 4, 1).unwrap();
        assert_eq!(range.len(), 64);
        assert!(!range.is_writable());
        range.unmap().unwrap();
        assert!(gl
            .calls()
            .contains(&format!("PixelStorei({}, 4)", gl::PACK_ALIGNMENT)));
        assert!(gl.calls().contains(&format!(
            "GetTextureImage({}, 1, {}, {}, 64)",
            tex.instance_id(),
            gl::RGBA,
            gl::UNSIGNED_BYTE
        )));
        assert_eq!(gl.count("TextureSubImage2D"), 0);
    }

    #[test]
    fn compressed_upload() {
        let (gl, api) = recording();
        let desc = TextureDesc {
            stream: Some(vec![0; 128]),
            ..TextureDesc::new_2d(16, 16, Format::BC1RGBUNormBlock)
        };
        let tex = Gl45Texture::new(api, desc).unwrap();
        assert_eq!(gl.count("CompressedTextureSubImage2D"), 1);
        assert_eq!(
            tex.map(0, 0, 4, 4, 0).unwrap_err(),
            Error::Unsupported("mapping compressed textures")
        );
    }
}
