pub(crate) mod artifact;
pub(crate) mod object;
pub(crate) mod persist;
