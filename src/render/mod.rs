pub(crate) mod page;
pub(crate) mod pool;
pub(crate) mod raster;
pub(crate) mod renderer;
