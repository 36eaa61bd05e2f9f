//! Backend serializers for the optimized MIR.
//!
//! Backends are a strictly one-way boundary: they consume the settled IR and write build
//! files, never feeding anything back into the pipeline.

pub mod ninja;
