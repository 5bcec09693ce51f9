//! I/O utilities for file handling
//!
//! This module provides the random-access byte source abstraction and
//! byte-order aware readers used by the decoders.

pub mod seekable;
pub mod byte_order;
