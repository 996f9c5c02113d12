//! Memory model for the interpreter
//!
//! This module provides the core runtime abstractions:
//! - [`value`]: Runtime value representation (Int, Float, Char, Str, Bool, Array, Void)
//! - [`stack`]: Call stack of activation records
//!
//! There is no heap and no garbage collector. Scalars are copied on
//! assignment; arrays are reference-counted and freed with their last owner.

pub mod stack;
pub mod value;
