use gl_generator::{Api, Fallbacks, Profile, Registry, StructGenerator};
use std::env;
use std::fs::File;
use std::path::Path;

fn main() {
    let dest = env::var("OUT_DIR").unwrap();
    let mut file = File::create(&Path::new(&dest).join("gl_bindings.rs")).unwrap();

    Registry::new(
        Api::Gl,
        (4, 5),
        Profile::Core,
        Fallbacks::All,
        [
            "GL_EXT_texture_compression_s3tc",
            "GL_EXT_texture_sRGB",
            "GL_EXT_texture_filter_anisotropic",
            "GL_EXT_abgr",
            "GL_ARB_gpu_shader_int64",
            "GL_KHR_texture_compression_astc_ldr",
            "GL_3DFX_texture_compression_FXT1",
        ],
    )
    .write_bindings(StructGenerator, &mut file)
    .unwrap();
}
