//! Shaders, programs and program introspection.
use crate::api::types::*;
use crate::api::{self as gl, GlApi, INVALID};
use crate::types;
use fxhash::FxHashMap;
use octoon_hal::{
    DescriptorSetLayoutDesc, Error, Format, GraphicsAttribute, GraphicsParam, GraphicsUniform,
    GraphicsUniformBlock, Result, ShaderDesc, ShaderLang, ShaderStageFlags, UniformType,
};
use std::fmt;
use std::rc::Rc;

/// Separates the texture name from the companion sampler name in combined sampler uniforms.
const SAMPLER_DELIMITER: &str = "_X_";

//--------------------------------------------------------------------------------------------------
/// Splits a vertex attribute name into its semantic and semantic index.
///
/// Trailing digits are the index (0 if there are none), and the semantic is the part after the
/// last underscore of what remains: `in_TEXCOORD1` is `("TEXCOORD", 1)`, `position` is
/// `("position", 0)`. A name made only of digits has no semantic and index 0.
pub fn parse_semantic(name: &str) -> (String, u32) {
    let prefix = name.trim_end_matches(|c: char| c.is_ascii_digit());
    if prefix.is_empty() {
        return (String::new(), 0);
    }
    let index = name[prefix.len()..].parse().unwrap_or(0);
    let semantic = match prefix.rfind('_') {
        Some(pos) => &prefix[pos + 1..],
        None => prefix,
    };
    (semantic.to_owned(), index)
}

/// Splits `diffuse_X_linearSampler` into `("diffuse", Some("linearSampler"))`.
pub fn split_sampler_name(name: &str) -> (String, Option<String>) {
    match name.find(SAMPLER_DELIMITER) {
        Some(pos) => (
            name[..pos].to_owned(),
            Some(name[pos + SAMPLER_DELIMITER.len()..].to_owned()),
        ),
        None => (name.to_owned(), None),
    }
}

/// Drops the `[0]` suffix GL puts on array uniforms.
fn strip_array_suffix(name: &str, size: i32) -> (&str, bool) {
    if name.ends_with("[0]") {
        (&name[..name.len() - 3], true)
    } else {
        (name, size > 1)
    }
}

fn is_sampler_type(ty: GLenum) -> bool {
    match ty {
        gl::SAMPLER_2D
        | gl::SAMPLER_3D
        | gl::SAMPLER_2D_ARRAY
        | gl::SAMPLER_CUBE
        | gl::SAMPLER_CUBE_MAP_ARRAY
        | gl::SAMPLER_2D_SHADOW
        | gl::SAMPLER_2D_ARRAY_SHADOW
        | gl::SAMPLER_CUBE_SHADOW
        | gl::SAMPLER_2D_MULTISAMPLE
        | gl::SAMPLER_2D_MULTISAMPLE_ARRAY
        | gl::INT_SAMPLER_2D
        | gl::INT_SAMPLER_3D
        | gl::INT_SAMPLER_2D_ARRAY
        | gl::INT_SAMPLER_CUBE
        | gl::UNSIGNED_INT_SAMPLER_2D
        | gl::UNSIGNED_INT_SAMPLER_3D
        | gl::UNSIGNED_INT_SAMPLER_2D_ARRAY
        | gl::UNSIGNED_INT_SAMPLER_CUBE => true,
        _ => false,
    }
}

fn is_image_type(ty: GLenum) -> bool {
    match ty {
        gl::IMAGE_2D
        | gl::IMAGE_3D
        | gl::IMAGE_2D_ARRAY
        | gl::IMAGE_CUBE
        | gl::INT_IMAGE_2D
        | gl::UNSIGNED_INT_IMAGE_2D => true,
        _ => false,
    }
}

/// Uniform type of a native uniform type.
pub fn uniform_type(ty: GLenum, array: bool) -> UniformType {
    if is_sampler_type(ty) {
        return UniformType::SamplerImage;
    }
    if is_image_type(ty) {
        return UniformType::StorageImage;
    }
    let scalar = match ty {
        gl::BOOL => return UniformType::Boolean,
        gl::INT => UniformType::Int,
        gl::INT_VEC2 => UniformType::Int2,
        gl::INT_VEC3 => UniformType::Int3,
        gl::INT_VEC4 => UniformType::Int4,
        gl::UNSIGNED_INT => UniformType::UInt,
        gl::UNSIGNED_INT_VEC2 => UniformType::UInt2,
        gl::UNSIGNED_INT_VEC3 => UniformType::UInt3,
        gl::UNSIGNED_INT_VEC4 => UniformType::UInt4,
        gl::FLOAT => UniformType::Float,
        gl::FLOAT_VEC2 => UniformType::Float2,
        gl::FLOAT_VEC3 => UniformType::Float3,
        gl::FLOAT_VEC4 => UniformType::Float4,
        gl::FLOAT_MAT2 => UniformType::Float2x2,
        gl::FLOAT_MAT3 => UniformType::Float3x3,
        gl::FLOAT_MAT4 => UniformType::Float4x4,
        _ => return UniformType::Null,
    };
    if array {
        scalar.to_array()
    } else {
        scalar
    }
}

/// Format of an active vertex attribute of native type `ty`.
pub fn attribute_format(ty: GLenum) -> Option<Format> {
    Some(match ty {
        gl::BOOL => Format::R8UInt,
        gl::INT => Format::R32SInt,
        gl::INT_VEC2 => Format::R32G32SInt,
        gl::INT_VEC3 => Format::R32G32B32SInt,
        gl::INT_VEC4 => Format::R32G32B32A32SInt,
        gl::UNSIGNED_INT => Format::R32UInt,
        gl::UNSIGNED_INT_VEC2 => Format::R32G32UInt,
        gl::UNSIGNED_INT_VEC3 => Format::R32G32B32UInt,
        gl::UNSIGNED_INT_VEC4 => Format::R32G32B32A32UInt,
        gl::FLOAT => Format::R32SFloat,
        gl::FLOAT_VEC2 => Format::R32G32SFloat,
        gl::FLOAT_VEC3 => Format::R32G32B32SFloat,
        // matrices take one vec4 location per column
        gl::FLOAT_VEC4 | gl::FLOAT_MAT2 | gl::FLOAT_MAT3 | gl::FLOAT_MAT4 => {
            Format::R32G32B32A32SFloat
        }
        gl::DOUBLE => Format::R64SFloat,
        gl::DOUBLE_VEC2 => Format::R64G64SFloat,
        gl::DOUBLE_VEC3 => Format::R64G64B64SFloat,
        gl::DOUBLE_VEC4 => Format::R64G64B64A64SFloat,
        _ => return None,
    })
}

//--------------------------------------------------------------------------------------------------
/// One compiled shader stage.
pub struct GlShader {
    gl: Rc<dyn GlApi>,
    desc: ShaderDesc,
    shader: GLuint,
}

impl fmt::Debug for GlShader {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("GlShader")
            .field("shader", &self.shader)
            .field("stage", &self.desc.stage)
            .finish()
    }
}

impl GlShader {
    pub fn new(gl: Rc<dyn GlApi>, desc: ShaderDesc) -> Result<GlShader> {
        if desc.lang != ShaderLang::Glsl {
            error!("{:?} shaders need to be cross-compiled to GLSL first", desc.lang);
            return Err(Error::Unsupported("non-GLSL shader source"));
        }
        let stage = types::as_shader_stage(desc.stage);
        if stage == INVALID {
            error!("invalid shader stage {:?}", desc.stage);
            return Err(Error::InvalidEnum("shader stage"));
        }

        let shader = gl.create_shader(stage);
        if shader == 0 {
            error!("glCreateShader returned no name");
            return Err(Error::NativeAllocation("shader"));
        }

        gl.shader_source(shader, &desc.source);
        gl.compile_shader(shader);
        if gl.get_shader_iv(shader, gl::COMPILE_STATUS) != gl::TRUE as i32 {
            let log = gl.get_shader_info_log(shader);
            gl.delete_shader(shader);
            error!("{:?} shader failed to compile:\n{}", desc.stage, log);
            return Err(Error::ShaderCompilation(log));
        }

        Ok(GlShader { gl, desc, shader })
    }

    pub fn desc(&self) -> &ShaderDesc {
        &self.desc
    }

    pub fn stage(&self) -> ShaderStageFlags {
        self.desc.stage
    }

    pub fn instance_id(&self) -> GLuint {
        self.shader
    }
}

impl Drop for GlShader {
    fn drop(&mut self) {
        self.gl.delete_shader(self.shader);
    }
}

//--------------------------------------------------------------------------------------------------
#[derive(Clone, Debug, Default)]
pub struct ProgramDesc {
    pub shaders: Vec<Rc<GlShader>>,
}

impl ProgramDesc {
    pub fn new(shaders: Vec<Rc<GlShader>>) -> ProgramDesc {
        ProgramDesc { shaders }
    }
}

/// A linked program and what it exposes.
///
/// Texture uniforms are given consecutive texture units at link time, in the order the driver
/// enumerates them. The unit is the uniform's binding point and is also listed by
/// [GlProgram::sampler_bindings].
pub struct GlProgram {
    gl: Rc<dyn GlApi>,
    desc: ProgramDesc,
    program: GLuint,
    stages: ShaderStageFlags,
    attributes: Vec<GraphicsAttribute>,
    params: Vec<Rc<GraphicsParam>>,
    sampler_bindings: FxHashMap<String, u32>,
}

impl fmt::Debug for GlProgram {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("GlProgram")
            .field("program", &self.program)
            .field("stages", &self.stages)
            .field("attributes", &self.attributes)
            .field("params", &self.params.len())
            .finish()
    }
}

impl GlProgram {
    pub fn new(gl: Rc<dyn GlApi>, desc: ProgramDesc) -> Result<GlProgram> {
        if desc.shaders.is_empty() {
            error!("program has no shaders");
            return Err(Error::InvalidDescriptor("program without shaders"));
        }

        let program = gl.create_program();
        if program == 0 {
            error!("glCreateProgram returned no name");
            return Err(Error::NativeAllocation("program"));
        }

        let mut stages = ShaderStageFlags::empty();
        for shader in desc.shaders.iter() {
            gl.attach_shader(program, shader.instance_id());
            stages |= shader.stage();
        }
        gl.link_program(program);
        if gl.get_program_iv(program, gl::LINK_STATUS) != gl::TRUE as i32 {
            let log = gl.get_program_info_log(program);
            gl.delete_program(program);
            error!("program failed to link:\n{}", log);
            return Err(Error::ProgramLink(log));
        }

        let mut prog = GlProgram {
            gl,
            desc,
            program,
            stages,
            attributes: Vec::new(),
            params: Vec::new(),
            sampler_bindings: FxHashMap::default(),
        };
        prog.init_attributes();
        prog.init_uniforms();
        prog.init_uniform_blocks();

        debug!(
            "program {}: {} attributes, {} parameters, {} texture units",
            program,
            prog.attributes.len(),
            prog.params.len(),
            prog.sampler_bindings.len()
        );
        Ok(prog)
    }

    fn init_attributes(&mut self) {
        let gl = &*self.gl;
        let count = gl.get_program_iv(self.program, gl::ACTIVE_ATTRIBUTES).max(0) as u32;
        for i in 0..count {
            let (name, _, ty) = gl.get_active_attrib(self.program, i);
            let location = gl.get_attrib_location(self.program, &name);
            // built-ins such as gl_VertexID have no location
            if location < 0 {
                continue;
            }
            let format = match attribute_format(ty) {
                Some(format) => format,
                None => {
                    warn!("attribute `{}` has unsupported type 0x{:X}", name, ty);
                    continue;
                }
            };
            let (semantic, semantic_index) = parse_semantic(&name);
            self.attributes.push(GraphicsAttribute {
                semantic,
                semantic_index,
                binding_point: location as u32,
                format,
            });
        }
    }

    fn init_uniforms(&mut self) {
        let gl = &*self.gl;
        let count = gl.get_program_iv(self.program, gl::ACTIVE_UNIFORMS).max(0) as u32;
        if count == 0 {
            return;
        }
        let indices: Vec<u32> = (0..count).collect();
        let blocks = gl.get_active_uniforms_iv(self.program, &indices, gl::UNIFORM_BLOCK_INDEX);

        let mut unit = 0;
        for i in 0..count {
            // block members are described with their block
            if blocks.get(i as usize).map_or(false, |&b| b >= 0) {
                continue;
            }
            let (raw_name, size, ty) = gl.get_active_uniform(self.program, i);
            let location = gl.get_uniform_location(self.program, &raw_name);
            if location < 0 {
                continue;
            }
            let (name, array) = strip_array_suffix(&raw_name, size);

            let uniform = if is_sampler_type(ty) {
                let (name, sampler_name) = split_sampler_name(name);
                gl.program_uniform_iv(self.program, location, 1, &[unit as i32]);
                self.sampler_bindings.insert(name.clone(), unit);
                let uniform = GraphicsUniform {
                    name,
                    sampler_name,
                    ty: UniformType::SamplerImage,
                    offset: 0,
                    array_size: size.max(1) as u32,
                    binding_point: unit,
                    stage_flags: self.stages,
                };
                unit += 1;
                uniform
            } else {
                let uty = uniform_type(ty, array);
                if uty == UniformType::Null {
                    warn!("uniform `{}` has unsupported type 0x{:X}", name, ty);
                }
                GraphicsUniform {
                    name: name.to_owned(),
                    sampler_name: None,
                    ty: uty,
                    offset: 0,
                    array_size: size.max(1) as u32,
                    binding_point: location as u32,
                    stage_flags: self.stages,
                }
            };
            self.params.push(Rc::new(GraphicsParam::Uniform(uniform)));
        }
    }

    fn init_uniform_blocks(&mut self) {
        let gl = &*self.gl;
        let count = gl.get_program_iv(self.program, gl::ACTIVE_UNIFORM_BLOCKS).max(0) as u32;
        for index in 0..count {
            let name = gl.get_active_uniform_block_name(self.program, index);
            if name.is_empty() {
                continue;
            }
            gl.uniform_block_binding(self.program, index, index);

            let block_size = gl.get_active_uniform_block_iv(self.program, index, gl::UNIFORM_BLOCK_DATA_SIZE);
            let members = gl.get_active_uniform_block_indices(self.program, index);
            let mut uniforms = Vec::with_capacity(members.len());
            if !members.is_empty() {
                let offsets = gl.get_active_uniforms_iv(self.program, &members, gl::UNIFORM_OFFSET);
                let tys = gl.get_active_uniforms_iv(self.program, &members, gl::UNIFORM_TYPE);
                let sizes = gl.get_active_uniforms_iv(self.program, &members, gl::UNIFORM_SIZE);
                for (j, &member) in members.iter().enumerate() {
                    let (raw_name, _, _) = gl.get_active_uniform(self.program, member);
                    let (member_name, array) = strip_array_suffix(&raw_name, sizes[j]);
                    uniforms.push(GraphicsUniform {
                        name: member_name.to_owned(),
                        sampler_name: None,
                        ty: uniform_type(tys[j] as GLenum, array),
                        offset: offsets[j].max(0) as u32,
                        array_size: sizes[j].max(1) as u32,
                        binding_point: member,
                        stage_flags: self.stages,
                    });
                }
            }

            self.params.push(Rc::new(GraphicsParam::UniformBlock(GraphicsUniformBlock {
                name,
                block_size: block_size.max(0) as u32,
                binding_point: index,
                stage_flags: self.stages,
                uniforms,
            })));
        }
    }

    pub fn desc(&self) -> &ProgramDesc {
        &self.desc
    }

    pub fn instance_id(&self) -> GLuint {
        self.program
    }

    pub fn stages(&self) -> ShaderStageFlags {
        self.stages
    }

    pub fn attributes(&self) -> &[GraphicsAttribute] {
        &self.attributes
    }

    pub fn params(&self) -> &[Rc<GraphicsParam>] {
        &self.params
    }

    pub fn param(&self, name: &str) -> Option<&Rc<GraphicsParam>> {
        self.params.iter().find(|p| p.name() == name)
    }

    /// Texture unit of every texture uniform, by texture name.
    pub fn sampler_bindings(&self) -> &FxHashMap<String, u32> {
        &self.sampler_bindings
    }

    /// Descriptor layout listing every parameter of the program.
    pub fn descriptor_set_layout_desc(&self) -> DescriptorSetLayoutDesc {
        DescriptorSetLayoutDesc::new(self.params.clone())
    }
}

impl Drop for GlProgram {
    fn drop(&mut self) {
        self.gl.delete_program(self.program);
    }
}
