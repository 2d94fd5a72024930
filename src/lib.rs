//! Counter and heap-queue kits: a frequency counter with ranked retrieval and
//! a priority heap with n largest / n smallest selection.

pub mod collections_ext;
