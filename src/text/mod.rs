pub(crate) mod caption;
pub(crate) mod fit;
pub(crate) mod shape;
