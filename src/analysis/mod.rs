//! Result aggregation modules
//!
//! Shared note/key vocabulary and the terminal transcription result:
//! - Core note types (events, quantized notes, named notes)
//! - Musical key type
//! - Result and metadata structures

pub mod result;
