//! The resume content document: schema, form-state mapping, reorder and
//! section-save primitives, and the template renderer. Everything in this
//! module is pure; persistence lives in `resumes::store`.

pub mod form;
pub mod render;
pub mod reorder;
pub mod schema;
pub mod update;
