//! Descriptor layouts, pools and sets.
//!
//! A descriptor set keeps one CPU-side value per parameter of its layout. Values are type-checked
//! when assigned and written to the program when the set is applied.
use crate::api::types::GLenum;
use crate::api::{self as gl, GlApi};
use crate::buffer::GraphicsData;
use crate::pipeline::GlProgram;
use crate::sampler::GlSampler;
use crate::texture::GraphicsTexture;
use octoon_hal::{
    DescriptorPoolDesc, DescriptorSetLayoutDesc, Error, GraphicsParam, Result, UniformType,
};
use std::cell::{Cell, Ref, RefCell};
use std::fmt;
use std::ptr;
use std::rc::Rc;

#[derive(Clone, Debug)]
pub struct GlDescriptorSetLayout {
    desc: DescriptorSetLayoutDesc,
}

impl GlDescriptorSetLayout {
    pub fn new(desc: DescriptorSetLayoutDesc) -> GlDescriptorSetLayout {
        GlDescriptorSetLayout { desc }
    }

    /// Layout with every parameter of `program`.
    pub fn from_program(program: &GlProgram) -> GlDescriptorSetLayout {
        GlDescriptorSetLayout::new(program.descriptor_set_layout_desc())
    }

    pub fn desc(&self) -> &DescriptorSetLayoutDesc {
        &self.desc
    }
}

//--------------------------------------------------------------------------------------------------
/// Bounded source of descriptor sets.
#[derive(Debug)]
pub struct GlDescriptorPool {
    desc: DescriptorPoolDesc,
    allocated: Rc<Cell<u32>>,
}

/// A set's claim on its pool, given back on drop.
#[derive(Debug)]
struct PoolSlot {
    allocated: Rc<Cell<u32>>,
}

impl Drop for PoolSlot {
    fn drop(&mut self) {
        self.allocated.set(self.allocated.get() - 1);
    }
}

impl GlDescriptorPool {
    pub fn new(desc: DescriptorPoolDesc) -> Result<GlDescriptorPool> {
        if desc.max_sets == 0 {
            error!("descriptor pool with max_sets = 0");
            return Err(Error::InvalidDescriptor("descriptor pool without sets"));
        }
        Ok(GlDescriptorPool {
            desc,
            allocated: Rc::new(Cell::new(0)),
        })
    }

    pub fn desc(&self) -> &DescriptorPoolDesc {
        &self.desc
    }

    /// Number of live sets created from this pool.
    pub fn allocated(&self) -> u32 {
        self.allocated.get()
    }

    fn allocate(&self, layout: &DescriptorSetLayoutDesc) -> Result<PoolSlot> {
        if self.allocated.get() >= self.desc.max_sets {
            error!("descriptor pool exhausted ({} sets)", self.desc.max_sets);
            return Err(Error::InvalidState("descriptor pool exhausted"));
        }
        if !self.desc.components.is_empty() {
            for param in layout.components.iter() {
                let ty = param.ty();
                if !self.desc.components.iter().any(|c| c.ty == ty && c.count > 0) {
                    error!("descriptor pool has no room for `{}` ({:?})", param.name(), ty);
                    return Err(Error::InvalidDescriptor("descriptor type missing from pool"));
                }
            }
        }
        self.allocated.set(self.allocated.get() + 1);
        Ok(PoolSlot {
            allocated: self.allocated.clone(),
        })
    }
}

//--------------------------------------------------------------------------------------------------
/// Value held by one descriptor slot.
///
/// Matrices are column-major. Arrays are flattened: an `Int3Array` of two elements holds six
/// integers.
#[derive(Clone)]
pub enum UniformValue {
    Null,
    Boolean(bool),
    Int(i32),
    Int2([i32; 2]),
    Int3([i32; 3]),
    Int4([i32; 4]),
    UInt(u32),
    UInt2([u32; 2]),
    UInt3([u32; 3]),
    UInt4([u32; 4]),
    Float(f32),
    Float2([f32; 2]),
    Float3([f32; 3]),
    Float4([f32; 4]),
    Float2x2([f32; 4]),
    Float3x3([f32; 9]),
    Float4x4([f32; 16]),
    IntArray(Vec<i32>),
    Int2Array(Vec<i32>),
    Int3Array(Vec<i32>),
    Int4Array(Vec<i32>),
    UIntArray(Vec<u32>),
    UInt2Array(Vec<u32>),
    UInt3Array(Vec<u32>),
    UInt4Array(Vec<u32>),
    FloatArray(Vec<f32>),
    Float2Array(Vec<f32>),
    Float3Array(Vec<f32>),
    Float4Array(Vec<f32>),
    Float2x2Array(Vec<f32>),
    Float3x3Array(Vec<f32>),
    Float4x4Array(Vec<f32>),
    /// Texture with an optional sampler object for the same unit.
    Texture(Option<Rc<dyn GraphicsTexture>>, Option<Rc<GlSampler>>),
    Sampler(Option<Rc<GlSampler>>),
    Buffer(Option<Rc<dyn GraphicsData>>),
}

pub(crate) fn same_rc<T: ?Sized>(a: &Option<Rc<T>>, b: &Option<Rc<T>>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => ptr::eq(Rc::as_ptr(a) as *const u8, Rc::as_ptr(b) as *const u8),
        (None, None) => true,
        _ => false,
    }
}

impl PartialEq for UniformValue {
    fn eq(&self, other: &UniformValue) -> bool {
        use self::UniformValue::*;
        match (self, other) {
            (Null, Null) => true,
            (Boolean(a), Boolean(b)) => a == b,
            (Int(a), Int(b)) => a == b,
            (Int2(a), Int2(b)) => a == b,
            (Int3(a), Int3(b)) => a == b,
            (Int4(a), Int4(b)) => a == b,
            (UInt(a), UInt(b)) => a == b,
            (UInt2(a), UInt2(b)) => a == b,
            (UInt3(a), UInt3(b)) => a == b,
            (UInt4(a), UInt4(b)) => a == b,
            (Float(a), Float(b)) => a == b,
            (Float2(a), Float2(b)) => a == b,
            (Float3(a), Float3(b)) => a == b,
            (Float4(a), Float4(b)) => a == b,
            (Float2x2(a), Float2x2(b)) => a == b,
            (Float3x3(a), Float3x3(b)) => a == b,
            (Float4x4(a), Float4x4(b)) => a[..] == b[..],
            (IntArray(a), IntArray(b))
            | (Int2Array(a), Int2Array(b))
            | (Int3Array(a), Int3Array(b))
            | (Int4Array(a), Int4Array(b)) => a == b,
            (UIntArray(a), UIntArray(b))
            | (UInt2Array(a), UInt2Array(b))
            | (UInt3Array(a), UInt3Array(b))
            | (UInt4Array(a), UInt4Array(b)) => a == b,
            (FloatArray(a), FloatArray(b))
            | (Float2Array(a), Float2Array(b))
            | (Float3Array(a), Float3Array(b))
            | (Float4Array(a), Float4Array(b))
            | (Float2x2Array(a), Float2x2Array(b))
            | (Float3x3Array(a), Float3x3Array(b))
            | (Float4x4Array(a), Float4x4Array(b)) => a == b,
            (Texture(ta, sa), Texture(tb, sb)) => same_rc(ta, tb) && same_rc(sa, sb),
            (Sampler(a), Sampler(b)) => same_rc(a, b),
            (Buffer(a), Buffer(b)) => same_rc(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for UniformValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            UniformValue::Texture(texture, sampler) => f
                .debug_tuple("Texture")
                .field(&texture.as_ref().map(|t| t.instance_id()))
                .field(&sampler.as_ref().map(|s| s.instance_id()))
                .finish(),
            UniformValue::Sampler(sampler) => f
                .debug_tuple("Sampler")
                .field(&sampler.as_ref().map(|s| s.instance_id()))
                .finish(),
            UniformValue::Buffer(buffer) => f
                .debug_tuple("Buffer")
                .field(&buffer.as_ref().map(|b| b.instance_id()))
                .finish(),
            other => write!(f, "{:?}", other.ty()),
        }
    }
}

impl UniformValue {
    /// Type this value is naturally assigned to.
    pub fn ty(&self) -> UniformType {
        use self::UniformValue::*;
        match self {
            Null => UniformType::Null,
            Boolean(_) => UniformType::Boolean,
            Int(_) => UniformType::Int,
            Int2(_) => UniformType::Int2,
            Int3(_) => UniformType::Int3,
            Int4(_) => UniformType::Int4,
            UInt(_) => UniformType::UInt,
            UInt2(_) => UniformType::UInt2,
            UInt3(_) => UniformType::UInt3,
            UInt4(_) => UniformType::UInt4,
            Float(_) => UniformType::Float,
            Float2(_) => UniformType::Float2,
            Float3(_) => UniformType::Float3,
            Float4(_) => UniformType::Float4,
            Float2x2(_) => UniformType::Float2x2,
            Float3x3(_) => UniformType::Float3x3,
            Float4x4(_) => UniformType::Float4x4,
            IntArray(_) => UniformType::IntArray,
            Int2Array(_) => UniformType::Int2Array,
            Int3Array(_) => UniformType::Int3Array,
            Int4Array(_) => UniformType::Int4Array,
            UIntArray(_) => UniformType::UIntArray,
            UInt2Array(_) => UniformType::UInt2Array,
            UInt3Array(_) => UniformType::UInt3Array,
            UInt4Array(_) => UniformType::UInt4Array,
            FloatArray(_) => UniformType::FloatArray,
            Float2Array(_) => UniformType::Float2Array,
            Float3Array(_) => UniformType::Float3Array,
            Float4Array(_) => UniformType::Float4Array,
            Float2x2Array(_) => UniformType::Float2x2Array,
            Float3x3Array(_) => UniformType::Float3x3Array,
            Float4x4Array(_) => UniformType::Float4x4Array,
            Texture(..) => UniformType::CombinedImageSampler,
            Sampler(_) => UniformType::Sampler,
            Buffer(_) => UniformType::UniformBuffer,
        }
    }

    /// Length a flattened array must be a multiple of.
    fn element_len(&self) -> Option<(usize, usize)> {
        use self::UniformValue::*;
        Some(match self {
            IntArray(v) => (v.len(), 1),
            Int2Array(v) => (v.len(), 2),
            Int3Array(v) => (v.len(), 3),
            Int4Array(v) => (v.len(), 4),
            UIntArray(v) => (v.len(), 1),
            UInt2Array(v) => (v.len(), 2),
            UInt3Array(v) => (v.len(), 3),
            UInt4Array(v) => (v.len(), 4),
            FloatArray(v) => (v.len(), 1),
            Float2Array(v) => (v.len(), 2),
            Float3Array(v) => (v.len(), 3),
            Float4Array(v) => (v.len(), 4),
            Float2x2Array(v) => (v.len(), 4),
            Float3x3Array(v) => (v.len(), 9),
            Float4x4Array(v) => (v.len(), 16),
            _ => return None,
        })
    }

    /// Whether a slot declared as `ty` accepts this value.
    fn fits(&self, ty: UniformType) -> bool {
        match self {
            UniformValue::Null => true,
            UniformValue::Texture(..) => ty.is_texture(),
            UniformValue::Sampler(_) => ty == UniformType::Sampler,
            UniformValue::Buffer(_) => {
                ty.is_buffer()
                    || ty == UniformType::UniformTexelBuffer
                    || ty == UniformType::StorageTexelBuffer
            }
            value => value.ty() == ty,
        }
    }
}

//--------------------------------------------------------------------------------------------------
#[derive(Clone, Debug)]
pub struct DescriptorSetDesc {
    pub layout: Rc<GlDescriptorSetLayout>,
    pub pool: Option<Rc<GlDescriptorPool>>,
}

impl DescriptorSetDesc {
    pub fn new(layout: Rc<GlDescriptorSetLayout>) -> DescriptorSetDesc {
        DescriptorSetDesc { layout, pool: None }
    }
}

#[derive(Clone, Debug)]
pub struct UniformSlot {
    pub param: Rc<GraphicsParam>,
    pub value: UniformValue,
}

pub struct GlDescriptorSet {
    gl: Rc<dyn GlApi>,
    layout: Rc<GlDescriptorSetLayout>,
    slots: RefCell<Vec<UniformSlot>>,
    /// Bind textures with `glBindTextureUnit`.
    dsa: bool,
    _pool: Option<PoolSlot>,
}

impl fmt::Debug for GlDescriptorSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("GlDescriptorSet")
            .field("slots", &self.slots.borrow().len())
            .field("dsa", &self.dsa)
            .finish()
    }
}

impl GlDescriptorSet {
    pub fn new(gl: Rc<dyn GlApi>, desc: DescriptorSetDesc, dsa: bool) -> Result<GlDescriptorSet> {
        let pool = match desc.pool {
            Some(ref pool) => Some(pool.allocate(desc.layout.desc())?),
            None => None,
        };
        let slots = desc
            .layout
            .desc()
            .components
            .iter()
            .map(|param| UniformSlot {
                param: param.clone(),
                value: UniformValue::Null,
            })
            .collect();
        Ok(GlDescriptorSet {
            gl,
            layout: desc.layout,
            slots: RefCell::new(slots),
            dsa,
            _pool: pool,
        })
    }

    pub fn layout(&self) -> &Rc<GlDescriptorSetLayout> {
        &self.layout
    }

    pub fn slots(&self) -> Ref<[UniformSlot]> {
        Ref::map(self.slots.borrow(), |s| &s[..])
    }

    /// Assigns the value of the parameter called `name`.
    pub fn set_uniform(&self, name: &str, value: UniformValue) -> Result<()> {
        let mut slots = self.slots.borrow_mut();
        let slot = match slots.iter_mut().find(|s| s.param.name() == name) {
            Some(slot) => slot,
            None => {
                error!("descriptor set has no parameter `{}`", name);
                return Err(Error::UnknownUniform(name.to_owned()));
            }
        };

        let ty = slot.param.ty();
        if !value.fits(ty) {
            error!("`{}` is {:?}, cannot assign {:?}", name, ty, value.ty());
            return Err(Error::Type(ty, value.ty()));
        }
        if let Some((len, element)) = value.element_len() {
            if len % element != 0 {
                error!("`{}`: {} values do not make whole {:?} elements", name, len, ty);
                return Err(Error::InvalidDescriptor("partial array element"));
            }
        }
        slot.value = value;
        Ok(())
    }

    pub fn uniform_value(&self, name: &str) -> Option<UniformValue> {
        self.slots
            .borrow()
            .iter()
            .find(|s| s.param.name() == name)
            .map(|s| s.value.clone())
    }

    /// Copies the values of `sources` into the slots sharing their parameters.
    pub fn copy(&self, sources: &[&GlDescriptorSet]) {
        let mut slots = self.slots.borrow_mut();
        for source in sources.iter() {
            if ptr::eq(*source, self) {
                continue;
            }
            for from in source.slots.borrow().iter() {
                if let Some(to) = slots.iter_mut().find(|s| Rc::ptr_eq(&s.param, &from.param)) {
                    to.value = from.value.clone();
                }
            }
        }
    }

    /// Writes every slot to `program`: plain values as program uniforms, textures and samplers
    /// to the unit at the slot's binding point, buffers to the indexed binding point.
    pub fn apply(&self, program: &GlProgram) {
        let gl = &*self.gl;
        let id = program.instance_id();
        for slot in self.slots.borrow().iter() {
            let binding = slot.param.binding_point();
            match *slot.param {
                GraphicsParam::UniformBlock(_) => match slot.value {
                    UniformValue::Buffer(ref buffer) => {
                        gl.bind_buffer_base(gl::UNIFORM_BUFFER, binding, buffer_id(buffer))
                    }
                    _ => trace!("uniform block `{}` has no buffer", slot.param.name()),
                },
                GraphicsParam::Uniform(ref uniform) => {
                    self.apply_uniform(id, uniform.ty, binding, &slot.value)
                }
            }
        }
    }

    fn apply_uniform(&self, program: u32, ty: UniformType, binding: u32, value: &UniformValue) {
        use self::UniformValue::*;
        let gl = &*self.gl;
        let loc = binding as i32;
        match value {
            Null => {
                if ty.is_texture() {
                    self.bind_texture(binding, None, None);
                }
            }
            Boolean(v) => gl.program_uniform_iv(program, loc, 1, &[*v as i32]),
            Int(v) => gl.program_uniform_iv(program, loc, 1, &[*v]),
            Int2(v) => gl.program_uniform_iv(program, loc, 2, v),
            Int3(v) => gl.program_uniform_iv(program, loc, 3, v),
            Int4(v) => gl.program_uniform_iv(program, loc, 4, v),
            UInt(v) => gl.program_uniform_uiv(program, loc, 1, &[*v]),
            UInt2(v) => gl.program_uniform_uiv(program, loc, 2, v),
            UInt3(v) => gl.program_uniform_uiv(program, loc, 3, v),
            UInt4(v) => gl.program_uniform_uiv(program, loc, 4, v),
            Float(v) => gl.program_uniform_fv(program, loc, 1, &[*v]),
            Float2(v) => gl.program_uniform_fv(program, loc, 2, v),
            Float3(v) => gl.program_uniform_fv(program, loc, 3, v),
            Float4(v) => gl.program_uniform_fv(program, loc, 4, v),
            Float2x2(v) => gl.program_uniform_matrix_fv(program, loc, 2, false, v),
            Float3x3(v) => gl.program_uniform_matrix_fv(program, loc, 3, false, v),
            Float4x4(v) => gl.program_uniform_matrix_fv(program, loc, 4, false, v),
            IntArray(v) => gl.program_uniform_iv(program, loc, 1, v),
            Int2Array(v) => gl.program_uniform_iv(program, loc, 2, v),
            Int3Array(v) => gl.program_uniform_iv(program, loc, 3, v),
            Int4Array(v) => gl.program_uniform_iv(program, loc, 4, v),
            UIntArray(v) => gl.program_uniform_uiv(program, loc, 1, v),
            UInt2Array(v) => gl.program_uniform_uiv(program, loc, 2, v),
            UInt3Array(v) => gl.program_uniform_uiv(program, loc, 3, v),
            UInt4Array(v) => gl.program_uniform_uiv(program, loc, 4, v),
            FloatArray(v) => gl.program_uniform_fv(program, loc, 1, v),
            Float2Array(v) => gl.program_uniform_fv(program, loc, 2, v),
            Float3Array(v) => gl.program_uniform_fv(program, loc, 3, v),
            Float4Array(v) => gl.program_uniform_fv(program, loc, 4, v),
            Float2x2Array(v) => gl.program_uniform_matrix_fv(program, loc, 2, false, v),
            Float3x3Array(v) => gl.program_uniform_matrix_fv(program, loc, 3, false, v),
            Float4x4Array(v) => gl.program_uniform_matrix_fv(program, loc, 4, false, v),
            Texture(texture, sampler) => self.bind_texture(binding, texture.as_ref(), sampler.as_ref()),
            Sampler(sampler) => gl.bind_sampler(binding, sampler.as_ref().map_or(0, |s| s.instance_id())),
            Buffer(buffer) => match ty {
                UniformType::UniformBuffer | UniformType::UniformBufferDynamic => {
                    gl.bind_buffer_base(gl::UNIFORM_BUFFER, binding, buffer_id(buffer))
                }
                UniformType::StorageBuffer | UniformType::StorageBufferDynamic => {
                    gl.bind_buffer_base(gl::SHADER_STORAGE_BUFFER, binding, buffer_id(buffer))
                }
                // texel buffers are not bound by this backend
                _ => trace!("skipping {:?} at binding {}", ty, binding),
            },
        }
    }

    fn bind_texture(&self, unit: u32, texture: Option<&Rc<dyn GraphicsTexture>>, sampler: Option<&Rc<GlSampler>>) {
        let gl = &*self.gl;
        if self.dsa {
            gl.bind_texture_unit(unit, texture.map_or(0, |t| t.instance_id()));
        } else {
            gl.active_texture(unit);
            match texture {
                Some(texture) => gl.bind_texture(texture.target(), texture.instance_id()),
                None => {
                    for &target in TEXTURE_TARGETS.iter() {
                        gl.bind_texture(target, 0);
                    }
                }
            }
        }
        gl.bind_sampler(unit, sampler.map_or(0, |s| s.instance_id()));
    }
}

/// Every target a texture unit can hold a texture on.
const TEXTURE_TARGETS: [GLenum; 7] = [
    gl::TEXTURE_2D,
    gl::TEXTURE_2D_ARRAY,
    gl::TEXTURE_2D_MULTISAMPLE,
    gl::TEXTURE_2D_MULTISAMPLE_ARRAY,
    gl::TEXTURE_3D,
    gl::TEXTURE_CUBE_MAP,
    gl::TEXTURE_CUBE_MAP_ARRAY,
];

fn buffer_id(buffer: &Option<Rc<dyn GraphicsData>>) -> u32 {
    buffer.as_ref().map_or(0, |b| b.instance_id())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::Gl45Data;
    use crate::property::DeviceProperty;
    use crate::testing::{self, RecordingGl};
    use crate::texture::Gl33Texture;
    use octoon_hal::{
        DataDesc, DataType, DescriptorPoolComponent, Format, SamplerDesc, TextureDesc, TextureDim,
        UsageFlags,
    };

    fn scripted_program(gl: &Rc<RecordingGl>) -> GlProgram {
        gl.add_uniform("model", 1, gl::FLOAT_MAT4);
        gl.add_uniform("albedo_X_linear", 1, gl::SAMPLER_2D);
        gl.add_uniform("weights[0]", 4, gl::FLOAT);
        gl.add_uniform("time", 1, gl::FLOAT);
        gl.add_block("Globals", 16, &[3]);
        testing::program(gl)
    }

    fn descriptor_set(gl: &Rc<RecordingGl>, program: &GlProgram, dsa: bool) -> GlDescriptorSet {
        let layout = Rc::new(GlDescriptorSetLayout::from_program(program));
        GlDescriptorSet::new(gl.clone(), DescriptorSetDesc::new(layout), dsa).unwrap()
    }

    #[test]
    fn values_are_type_checked() {
        let gl = Rc::new(RecordingGl::new());
        let program = scripted_program(&gl);
        let set = descriptor_set(&gl, &program, true);
        assert_eq!(set.slots().len(), 4);

        set.set_uniform("model", UniformValue::Float4x4([1.0; 16])).unwrap();
        assert_eq!(
            set.set_uniform("model", UniformValue::Float(1.0)).unwrap_err(),
            Error::Type(UniformType::Float4x4, UniformType::Float)
        );
        assert_eq!(
            set.set_uniform("missing", UniformValue::Int(1)).unwrap_err(),
            Error::UnknownUniform("missing".to_owned())
        );
        assert!(set
            .set_uniform("weights", UniformValue::FloatArray(vec![0.5; 4]))
            .is_ok());
        assert_eq!(
            set.uniform_value("model"),
            Some(UniformValue::Float4x4([1.0; 16]))
        );
        assert_eq!(set.uniform_value("albedo"), Some(UniformValue::Null));
    }

    #[test]
    fn apply_writes_each_slot_once() {
        let gl = Rc::new(RecordingGl::new());
        let program = scripted_program(&gl);
        let set = descriptor_set(&gl, &program, true);
        let data = DataDesc::with_data(DataType::UniformBuffer, UsageFlags::empty(), &[0; 16]);
        let ubo: Rc<dyn GraphicsData> = Rc::new(Gl45Data::new(gl.clone(), data).unwrap());
        let property = DeviceProperty::probe(&*gl);
        let sampler = Rc::new(GlSampler::new(gl.clone(), &property, SamplerDesc::default()).unwrap());

        set.set_uniform("model", UniformValue::Float4x4([0.0; 16])).unwrap();
        set.set_uniform("albedo", UniformValue::Texture(None, Some(sampler.clone())))
            .unwrap();
        set.set_uniform("weights", UniformValue::FloatArray(vec![1.0, 2.0]))
            .unwrap();
        set.set_uniform("Globals", UniformValue::Buffer(Some(ubo.clone())))
            .unwrap();

        gl.clear();
        set.apply(&program);
        let id = program.instance_id();
        assert_eq!(
            gl.calls(),
            vec![
                format!("ProgramUniformMatrix4fv({}, 0, false, 16)", id),
                "BindTextureUnit(0, 0)".to_owned(),
                format!("BindSampler(0, {})", sampler.instance_id()),
                format!("ProgramUniform1fv({}, 2, [1.0, 2.0])", id),
                format!("BindBufferBase({}, 0, {})", gl::UNIFORM_BUFFER, ubo.instance_id()),
            ]
        );
    }

    #[test]
    fn classic_texture_binding() {
        let gl = Rc::new(RecordingGl::with_version(3, 3));
        let program = scripted_program(&gl);
        let set = descriptor_set(&gl, &program, false);
        let texture: Rc<dyn GraphicsTexture> = Rc::new(
            Gl33Texture::new(gl.clone(), TextureDesc::new_2d(4, 4, Format::R8G8B8A8UNorm)).unwrap(),
        );
        set.set_uniform("albedo", UniformValue::Texture(Some(texture.clone()), None))
            .unwrap();

        gl.clear();
        set.apply(&program);
        let calls = gl.calls();
        let unit = calls.iter().position(|c| c == "ActiveTexture(0)").unwrap();
        assert_eq!(
            calls[unit + 1],
            format!("BindTexture({}, {})", gl::TEXTURE_2D, texture.instance_id())
        );
        assert_eq!(calls[unit + 2], "BindSampler(0, 0)");
    }

    #[test]
    fn classic_null_texture_clears_every_target() {
        let gl = Rc::new(RecordingGl::with_version(3, 3));
        gl.add_uniform("sky", 1, gl::SAMPLER_CUBE);
        let program = testing::program(&gl);
        let set = descriptor_set(&gl, &program, false);
        let cube: Rc<dyn GraphicsTexture> = Rc::new(
            Gl33Texture::new(
                gl.clone(),
                TextureDesc {
                    dim: TextureDim::Cube,
                    ..TextureDesc::new_2d(4, 4, Format::R8G8B8A8UNorm)
                },
            )
            .unwrap(),
        );
        set.set_uniform("sky", UniformValue::Texture(Some(cube.clone()), None))
            .unwrap();
        set.apply(&program);

        gl.clear();
        set.set_uniform("sky", UniformValue::Texture(None, None)).unwrap();
        set.apply(&program);
        let calls = gl.calls();
        assert!(calls.contains(&format!("BindTexture({}, 0)", gl::TEXTURE_CUBE_MAP)));
        assert!(calls.contains(&format!("BindTexture({}, 0)", gl::TEXTURE_2D)));
        assert_eq!(gl.count("BindTexture"), TEXTURE_TARGETS.len());
        assert!(!calls.contains(&format!("BindTexture({}, {})", gl::TEXTURE_CUBE_MAP, cube.instance_id())));
    }

    #[test]
    fn copy_matches_shared_parameters() {
        let gl = Rc::new(RecordingGl::new());
        let program = scripted_program(&gl);
        let layout = Rc::new(GlDescriptorSetLayout::from_program(&program));
        let a = GlDescriptorSet::new(gl.clone(), DescriptorSetDesc::new(layout.clone()), true).unwrap();
        let b = GlDescriptorSet::new(gl.clone(), DescriptorSetDesc::new(layout), true).unwrap();
        a.set_uniform("weights", UniformValue::FloatArray(vec![1.0])).unwrap();

        b.copy(&[&a, &b]);
        assert_eq!(b.uniform_value("weights"), Some(UniformValue::FloatArray(vec![1.0])));

        // a set built from another program's parameters shares nothing
        let other = Rc::new(RecordingGl::new());
        let c = descriptor_set(&other, &scripted_program(&other), true);
        c.copy(&[&a]);
        assert_eq!(c.uniform_value("weights"), Some(UniformValue::Null));
    }

    #[test]
    fn partial_array_elements() {
        let gl = Rc::new(RecordingGl::new());
        gl.add_uniform("offsets[0]", 2, gl::FLOAT_VEC3);
        let program = testing::program(&gl);
        let set = descriptor_set(&gl, &program, true);
        assert!(set
            .set_uniform("offsets", UniformValue::Float3Array(vec![0.0; 5]))
            .is_err());
        assert!(set
            .set_uniform("offsets", UniformValue::Float3Array(vec![0.0; 6]))
            .is_ok());
    }

    #[test]
    fn pool_limits() {
        let gl = Rc::new(RecordingGl::new());
        let program = scripted_program(&gl);
        let layout = Rc::new(GlDescriptorSetLayout::from_program(&program));
        assert!(GlDescriptorPool::new(DescriptorPoolDesc::default()).is_err());

        let pool = Rc::new(
            GlDescriptorPool::new(DescriptorPoolDesc {
                max_sets: 1,
                components: vec![],
            })
            .unwrap(),
        );
        let desc = DescriptorSetDesc {
            layout: layout.clone(),
            pool: Some(pool.clone()),
        };
        let first = GlDescriptorSet::new(gl.clone(), desc.clone(), true).unwrap();
        assert_eq!(pool.allocated(), 1);
        assert_eq!(
            GlDescriptorSet::new(gl.clone(), desc.clone(), true).unwrap_err(),
            Error::InvalidState("descriptor pool exhausted")
        );
        drop(first);
        assert_eq!(pool.allocated(), 0);
        assert!(GlDescriptorSet::new(gl.clone(), desc, true).is_ok());

        let typed = Rc::new(
            GlDescriptorPool::new(DescriptorPoolDesc {
                max_sets: 4,
                components: vec![DescriptorPoolComponent {
                    ty: UniformType::Float,
                    count: 4,
                }],
            })
            .unwrap(),
        );
        let desc = DescriptorSetDesc {
            layout,
            pool: Some(typed),
        };
        assert!(GlDescriptorSet::new(gl.clone(), desc, true).is_err());
    }
}
