//! Export functionality: saving recovered attachments.

pub mod attachment;
