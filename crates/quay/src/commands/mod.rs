//! CLI command implementations.

pub(crate) mod externals;

pub(crate) use externals::ExternalsArgs;
