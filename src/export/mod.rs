//! Exporters built on the type-aware cell formatter.

pub(crate) mod csv;
pub(crate) mod format;
pub(crate) mod matrix;
pub(crate) mod xml;
pub(crate) mod yaml;
