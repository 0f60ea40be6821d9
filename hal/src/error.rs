//! Error type.
//!
//! This is the shared error type for the device layer and its backends.

use crate::descriptor::UniformType;
use crate::format::Format;
use std::{error, fmt};

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Error {
    /// A creation descriptor is internally inconsistent (zero size, missing sub-object...).
    InvalidDescriptor(&'static str),
    /// A backend-neutral enum has no native counterpart.
    InvalidEnum(&'static str),
    UnsupportedFormat(Format),
    /// The requested path or feature is not available on this device.
    Unsupported(&'static str),
    /// The driver returned a null handle.
    NativeAllocation(&'static str),
    ShaderCompilation(String),
    ProgramLink(String),
    /// Framebuffer completeness status returned by the driver.
    IncompleteFramebuffer(u32),
    /// An operation was called in the wrong order (nested map, unmap without map...).
    InvalidState(&'static str),
    /// A descriptor value does not match the declared type of its slot (expected, got).
    Type(UniformType, UniformType),
    /// No slot with this name exists in the descriptor set.
    UnknownUniform(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::InvalidDescriptor(what) => write!(f, "invalid descriptor: {}", what),
            Error::InvalidEnum(what) => write!(f, "invalid {}", what),
            Error::UnsupportedFormat(format) => write!(f, "unsupported format: {:?}", format),
            Error::Unsupported(what) => write!(f, "unsupported: {}", what),
            Error::NativeAllocation(what) => write!(f, "failed to allocate native {}", what),
            Error::ShaderCompilation(log) => write!(f, "shader compilation failed: {}", log),
            Error::ProgramLink(log) => write!(f, "program link failed: {}", log),
            Error::IncompleteFramebuffer(status) => {
                write!(f, "incomplete framebuffer (status 0x{:X})", status)
            }
            Error::InvalidState(what) => write!(f, "invalid state: {}", what),
            Error::Type(expected, got) => {
                write!(f, "type mismatch: expected {:?}, got {:?}", expected, got)
            }
            Error::UnknownUniform(name) => write!(f, "unknown uniform `{}`", name),
        }
    }
}

impl error::Error for Error {}

pub type Result<T> = ::std::result::Result<T, Error>;
