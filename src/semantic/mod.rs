//! Semantic analysis
//!
//! - [`symbols`]: symbols and scoped symbol tables
//! - [`analyzer`]: the checking pass itself
//! - [`errors`]: [`SemanticError`]
//!
//! Analysis resolves names lexically. The interpreter does not; see
//! [`crate::memory::stack`] for how runtime lookups differ.

pub mod analyzer;
pub mod errors;
pub mod symbols;

pub use analyzer::SemanticAnalyzer;
pub use errors::SemanticError;
