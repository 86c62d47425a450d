//! Frame production: the CPU rasterizer and the frame-source strategies built on it.

pub(crate) mod composite;
pub(crate) mod frame;
pub(crate) mod raster;
pub(crate) mod source;
