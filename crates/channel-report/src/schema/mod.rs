//! Per-channel schema maps between canonical columns and native names.

mod map;
mod vocabulary;

pub use map::{FullSchema, SchemaMap};
pub use vocabulary::{
    CanonicalVocabulary, ChannelVocabulary, MappedVocabulary, NativeFallback, ValueTransform,
};
