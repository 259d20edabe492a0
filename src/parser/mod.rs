//! Parsing — the ID-string grammar and the XML comments document.

pub mod id;
pub mod xml;
