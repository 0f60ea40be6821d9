//! The device: capability snapshot and factory for every resource kind.
//!
//! The GL33/GL45 choice is made once, when the device is created, and stored as a
//! `ResourceFactory`. Factory methods that have two variants go through it; the others (state,
//! shader, program, sampler, input layout, layouts, pools) share one implementation.
use crate::api::GlApi;
use crate::buffer::{Gl33Data, Gl45Data, GraphicsData};
use crate::context::{ContextDesc, GlDeviceContext};
use crate::descriptor::{DescriptorSetDesc, GlDescriptorPool, GlDescriptorSet, GlDescriptorSetLayout};
use crate::framebuffer::{FramebufferDesc, GlFramebuffer, GlFramebufferLayout};
use crate::pipeline::{GlInputLayout, GlPipeline, GlProgram, GlShader, GlState, PipelineDesc, ProgramDesc, VertexPath};
use crate::property::DeviceProperty;
use crate::sampler::GlSampler;
use crate::texture::{Gl33Texture, Gl45Texture, GraphicsTexture};
use config::Config;
use octoon_hal::{
    DataDesc, DescriptorPoolDesc, DescriptorSetLayoutDesc, DeviceDesc, DeviceType, Error,
    FramebufferLayoutDesc, InputLayoutDesc, RenderStateDesc, Result, SamplerDesc, ShaderDesc,
    TextureDesc,
};
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

/// Device settings read from a configuration source.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct DeviceConfig {
    pub device: DeviceDesc,
    /// Passed to the window system; 0 disables vsync.
    pub swap_interval: u32,
}

impl DeviceConfig {
    /// Reads `hal.device_type` (`"gl33"` or `"gl45"`), `hal.debug_control` and
    /// `hal.swap_interval`. Missing keys keep their defaults.
    pub fn from_config(cfg: &Config) -> Result<DeviceConfig> {
        let mut config = DeviceConfig::default();
        if let Ok(device_type) = cfg.get::<String>("hal.device_type") {
            config.device.device_type = match device_type.to_lowercase().as_str() {
                "gl33" | "opengl33" => DeviceType::OpenGL33,
                "gl45" | "opengl45" => DeviceType::OpenGL45,
                other => {
                    error!("unknown hal.device_type `{}`", other);
                    return Err(Error::InvalidEnum("device type"));
                }
            };
        }
        config.device.debug_control = cfg.get::<bool>("hal.debug_control").unwrap_or(false);
        config.swap_interval = cfg.get::<u32>("hal.swap_interval").unwrap_or(1);
        Ok(config)
    }
}

//--------------------------------------------------------------------------------------------------
trait ResourceFactory: fmt::Debug {
    fn device_type(&self) -> DeviceType;
    fn vertex_path(&self) -> VertexPath;
    fn create_data(&self, gl: Rc<dyn GlApi>, desc: DataDesc) -> Result<Rc<dyn GraphicsData>>;
    fn create_texture(&self, gl: Rc<dyn GlApi>, desc: TextureDesc) -> Result<Rc<dyn GraphicsTexture>>;

    /// Named entry points for framebuffers and descriptor sets.
    fn dsa(&self) -> bool {
        self.device_type() == DeviceType::OpenGL45
    }
}

/// Bind-to-edit path.
#[derive(Debug)]
struct Gl33Factory;

impl ResourceFactory for Gl33Factory {
    fn device_type(&self) -> DeviceType {
        DeviceType::OpenGL33
    }

    fn vertex_path(&self) -> VertexPath {
        VertexPath::Pointer
    }

    fn create_data(&self, gl: Rc<dyn GlApi>, desc: DataDesc) -> Result<Rc<dyn GraphicsData>> {
        Ok(Rc::new(Gl33Data::new(gl, desc)?))
    }

    fn create_texture(&self, gl: Rc<dyn GlApi>, desc: TextureDesc) -> Result<Rc<dyn GraphicsTexture>> {
        Ok(Rc::new(Gl33Texture::new(gl, desc)?))
    }
}

/// Direct state access path.
#[derive(Debug)]
struct Gl45Factory;

impl ResourceFactory for Gl45Factory {
    fn device_type(&self) -> DeviceType {
        DeviceType::OpenGL45
    }

    fn vertex_path(&self) -> VertexPath {
        VertexPath::Binding
    }

    fn create_data(&self, gl: Rc<dyn GlApi>, desc: DataDesc) -> Result<Rc<dyn GraphicsData>> {
        Ok(Rc::new(Gl45Data::new(gl, desc)?))
    }

    fn create_texture(&self, gl: Rc<dyn GlApi>, desc: TextureDesc) -> Result<Rc<dyn GraphicsTexture>> {
        Ok(Rc::new(Gl45Texture::new(gl, desc)?))
    }
}

fn select_factory(requested: DeviceType, property: &DeviceProperty) -> Box<dyn ResourceFactory> {
    match requested {
        DeviceType::OpenGL45 if property.supports_dsa() => Box::new(Gl45Factory),
        DeviceType::OpenGL45 => {
            warn!(
                "OpenGL 4.5 path requested but OpenGL {}.{} has no direct state access, using the 3.3 path",
                property.major, property.minor
            );
            Box::new(Gl33Factory)
        }
        DeviceType::OpenGL33 => Box::new(Gl33Factory),
    }
}

//--------------------------------------------------------------------------------------------------
/// Root of the object hierarchy, bound to one native context.
pub struct Device {
    gl: Rc<dyn GlApi>,
    desc: DeviceDesc,
    property: Rc<DeviceProperty>,
    factory: Box<dyn ResourceFactory>,
    contexts: RefCell<Vec<Weak<RefCell<GlDeviceContext>>>>,
}

impl fmt::Debug for Device {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Device")
            .field("desc", &self.desc)
            .field("version", &(self.property.major, self.property.minor))
            .field("factory", &self.factory)
            .finish()
    }
}

impl Device {
    /// Probes the current context and picks the resource path.
    ///
    /// `desc.device_type` is a request: the device reports the path it actually uses.
    pub fn new(gl: Rc<dyn GlApi>, desc: DeviceDesc) -> Result<Device> {
        let property = DeviceProperty::probe(&*gl);
        if !property.version_at_least(3, 3) {
            error!("OpenGL {}.{} is not supported, 3.3 is required", property.major, property.minor);
            return Err(Error::Unsupported("OpenGL 3.3"));
        }

        let factory = select_factory(desc.device_type, &property);
        let desc = DeviceDesc {
            device_type: factory.device_type(),
            ..desc
        };
        debug!("device created ({:?}, debug control: {})", desc.device_type, desc.debug_control);

        Ok(Device {
            gl,
            desc,
            property: Rc::new(property),
            factory,
            contexts: RefCell::new(Vec::new()),
        })
    }

    pub fn desc(&self) -> &DeviceDesc {
        &self.desc
    }

    pub fn device_type(&self) -> DeviceType {
        self.desc.device_type
    }

    pub fn property(&self) -> &Rc<DeviceProperty> {
        &self.property
    }

    pub fn gl(&self) -> &Rc<dyn GlApi> {
        &self.gl
    }

    pub fn create_data(&self, desc: DataDesc) -> Result<Rc<dyn GraphicsData>> {
        self.factory.create_data(self.gl.clone(), desc)
    }

    pub fn create_texture(&self, desc: TextureDesc) -> Result<Rc<dyn GraphicsTexture>> {
        self.factory.create_texture(self.gl.clone(), desc)
    }

    pub fn create_sampler(&self, desc: SamplerDesc) -> Result<Rc<GlSampler>> {
        Ok(Rc::new(GlSampler::new(self.gl.clone(), &self.property, desc)?))
    }

    pub fn create_shader(&self, desc: ShaderDesc) -> Result<Rc<GlShader>> {
        Ok(Rc::new(GlShader::new(self.gl.clone(), desc)?))
    }

    pub fn create_program(&self, desc: ProgramDesc) -> Result<Rc<GlProgram>> {
        Ok(Rc::new(GlProgram::new(self.gl.clone(), desc)?))
    }

    pub fn create_render_state(&self, desc: RenderStateDesc) -> Rc<GlState> {
        Rc::new(GlState::new(desc))
    }

    pub fn create_input_layout(&self, desc: InputLayoutDesc) -> Result<Rc<GlInputLayout>> {
        Ok(Rc::new(GlInputLayout::new(desc)?))
    }

    /// The pipeline uses the vertex path of the device.
    pub fn create_render_pipeline(&self, desc: PipelineDesc) -> Result<Rc<GlPipeline>> {
        Ok(Rc::new(GlPipeline::new(desc, self.factory.vertex_path())?))
    }

    pub fn create_descriptor_set_layout(&self, desc: DescriptorSetLayoutDesc) -> Rc<GlDescriptorSetLayout> {
        Rc::new(GlDescriptorSetLayout::new(desc))
    }

    pub fn create_descriptor_pool(&self, desc: DescriptorPoolDesc) -> Result<Rc<GlDescriptorPool>> {
        Ok(Rc::new(GlDescriptorPool::new(desc)?))
    }

    pub fn create_descriptor_set(&self, desc: DescriptorSetDesc) -> Result<Rc<GlDescriptorSet>> {
        Ok(Rc::new(GlDescriptorSet::new(self.gl.clone(), desc, self.factory.dsa())?))
    }

    pub fn create_framebuffer_layout(&self, desc: FramebufferLayoutDesc) -> Result<Rc<GlFramebufferLayout>> {
        Ok(Rc::new(GlFramebufferLayout::new(desc)?))
    }

    pub fn create_framebuffer(&self, desc: FramebufferDesc) -> Result<Rc<GlFramebuffer>> {
        Ok(Rc::new(GlFramebuffer::new(self.gl.clone(), desc, self.factory.dsa())?))
    }

    /// Creates a context on `desc.swapchain`. The device only keeps a weak reference to it.
    pub fn create_device_context(&self, desc: ContextDesc) -> Result<Rc<RefCell<GlDeviceContext>>> {
        let context = GlDeviceContext::new(self.gl.clone(), self.property.clone(), self.desc, desc)?;
        let context = Rc::new(RefCell::new(context));
        let mut contexts = self.contexts.borrow_mut();
        contexts.retain(|c| c.upgrade().is_some());
        contexts.push(Rc::downgrade(&context));
        Ok(context)
    }

    /// Contexts created by this device that are still alive.
    pub fn device_contexts(&self) -> Vec<Rc<RefCell<GlDeviceContext>>> {
        let mut contexts = self.contexts.borrow_mut();
        contexts.retain(|c| c.upgrade().is_some());
        contexts.iter().filter_map(|c| c.upgrade()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api as gl;
    use crate::testing::{MockSwapchain, RecordingGl};
    use octoon_hal::{DataType, Format, UsageFlags};

    fn device(gl: &Rc<RecordingGl>, device_type: DeviceType) -> Device {
        let _ = pretty_env_logger::try_init();
        let api: Rc<dyn GlApi> = gl.clone();
        Device::new(
            api,
            DeviceDesc {
                device_type,
                debug_control: false,
            },
        )
        .unwrap()
    }

    #[test]
    fn gl45_uses_named_entry_points() {
        let gl = Rc::new(RecordingGl::new());
        let device = device(&gl, DeviceType::OpenGL45);
        assert_eq!(device.device_type(), DeviceType::OpenGL45);

        device
            .create_data(DataDesc::with_data(DataType::VertexBuffer, UsageFlags::empty(), &[0; 16]))
            .unwrap();
        device.create_texture(TextureDesc::new_2d(4, 4, Format::R8G8B8A8UNorm)).unwrap();
        assert_eq!(gl.count("CreateBuffers"), 1);
        assert_eq!(gl.count("GenBuffers"), 0);
        assert_eq!(gl.count("CreateTextures"), 1);
    }

    #[test]
    fn gl45_falls_back_without_dsa() {
        let gl = Rc::new(RecordingGl::with_version(4, 1));
        let device = device(&gl, DeviceType::OpenGL45);
        assert_eq!(device.device_type(), DeviceType::OpenGL33);

        device
            .create_data(DataDesc::with_data(DataType::VertexBuffer, UsageFlags::empty(), &[0; 16]))
            .unwrap();
        assert_eq!(gl.count("GenBuffers"), 1);
        assert_eq!(gl.count("CreateBuffers"), 0);

        let gl = Rc::new(RecordingGl::with_version(4, 1));
        gl.add_extension("GL_ARB_direct_state_access");
        assert_eq!(device_type_for(&gl), DeviceType::OpenGL45);
    }

    fn device_type_for(gl: &Rc<RecordingGl>) -> DeviceType {
        device(gl, DeviceType::OpenGL45).device_type()
    }

    #[test]
    fn too_old_for_the_device() {
        let gl = Rc::new(RecordingGl::with_version(3, 1));
        let api: Rc<dyn GlApi> = gl.clone();
        assert_eq!(
            Device::new(api, DeviceDesc::default()).unwrap_err(),
            Error::Unsupported("OpenGL 3.3")
        );
    }

    #[test]
    fn contexts_are_tracked_weakly() {
        let gl = Rc::new(RecordingGl::new());
        let device = device(&gl, DeviceType::OpenGL45);
        let swapchain = Rc::new(MockSwapchain::new(32, 32));

        let a = device.create_device_context(ContextDesc::new(swapchain.clone())).unwrap();
        let b = device.create_device_context(ContextDesc::new(swapchain.clone())).unwrap();
        assert!(swapchain.active.get());
        assert_eq!(device.device_contexts().len(), 2);
        assert_eq!(a.borrow().device_type(), DeviceType::OpenGL45);

        drop(a);
        let alive = device.device_contexts();
        assert_eq!(alive.len(), 1);
        assert!(Rc::ptr_eq(&alive[0], &b));
        assert_eq!(gl.count("DeleteVertexArrays"), 1);
    }

    #[test]
    fn debug_control_starts_with_the_context() {
        let gl = Rc::new(RecordingGl::new());
        let api: Rc<dyn GlApi> = gl.clone();
        let device = Device::new(
            api,
            DeviceDesc {
                device_type: DeviceType::OpenGL45,
                debug_control: true,
            },
        )
        .unwrap();
        let context = device
            .create_device_context(ContextDesc::new(Rc::new(MockSwapchain::new(8, 8))))
            .unwrap();
        assert!(context.borrow().is_debug_control_enabled());
        assert!(gl.calls().contains(&format!("Enable({})", gl::DEBUG_OUTPUT_SYNCHRONOUS)));
    }

    #[test]
    fn failures_reach_the_caller() {
        let gl = Rc::new(RecordingGl::new());
        let device = device(&gl, DeviceType::OpenGL33);
        assert!(device.create_data(DataDesc::new(DataType::VertexBuffer, UsageFlags::empty(), 0)).is_err());
        assert!(device
            .create_descriptor_pool(DescriptorPoolDesc::default())
            .is_err());
        assert!(device.create_framebuffer_layout(FramebufferLayoutDesc::default()).is_ok());
    }

    #[test]
    fn config_keys() {
        let cfg = Config::default();
        assert_eq!(
            DeviceConfig::from_config(&cfg).unwrap(),
            DeviceConfig {
                device: DeviceDesc::default(),
                swap_interval: 1,
            }
        );

        let mut cfg = Config::default();
        cfg.set("hal.device_type", "gl45").unwrap();
        cfg.set("hal.debug_control", true).unwrap();
        cfg.set("hal.swap_interval", 0i64).unwrap();
        let config = DeviceConfig::from_config(&cfg).unwrap();
        assert_eq!(config.device.device_type, DeviceType::OpenGL45);
        assert!(config.device.debug_control);
        assert_eq!(config.swap_interval, 0);

        let mut cfg = Config::default();
        cfg.set("hal.device_type", "vulkan").unwrap();
        assert_eq!(DeviceConfig::from_config(&cfg), Err(Error::InvalidEnum("device type")));
    }
}
