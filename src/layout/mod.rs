pub(crate) mod anim;
pub(crate) mod document;
pub(crate) mod fingerprint;
pub(crate) mod registry;
pub(crate) mod templates;
