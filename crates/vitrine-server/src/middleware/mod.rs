//! HTTP middleware.

pub(crate) mod access_log;
pub(crate) mod security;
