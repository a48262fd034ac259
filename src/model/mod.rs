//! Core data model types for recovered attachments.

pub mod attachment;
