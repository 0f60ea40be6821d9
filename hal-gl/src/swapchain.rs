use octoon_hal::SwapchainDesc;
use std::fmt::Debug;

/// Represents an OpenGL "swapchain".
///
/// OpenGL does not have the concept of "swapchains": this is handled by the window system. An
/// implementation wraps the native window/context pair, makes it current, reports the size of
/// the default framebuffer and swaps buffers.
pub trait Swapchain: Debug {
    /// Makes the context current (or releases it). Returns false if the window system refused.
    fn set_active(&self, active: bool) -> bool;
    fn is_active(&self) -> bool;
    fn desc(&self) -> SwapchainDesc;
    fn present(&self);

    fn size(&self) -> (u32, u32) {
        let desc = self.desc();
        (desc.width, desc.height)
    }
}
