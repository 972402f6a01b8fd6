pub(crate) mod animation;
pub(crate) mod staging;
pub(crate) mod still;
