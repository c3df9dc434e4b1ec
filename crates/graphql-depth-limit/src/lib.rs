#![doc = include_str!("../README.md")]

mod context;
mod diagnostics;
mod document;
mod error;
mod ignore;
mod validator;
mod walker;

pub use crate::context::ValidationContext;
pub use crate::diagnostics::Diagnostic;
pub use crate::diagnostics::DiagnosticData;
pub use crate::diagnostics::GraphQLError;
pub use crate::diagnostics::GraphQLLocation;
pub use crate::error::DepthLimitError;
pub use crate::ignore::IgnoreRule;
pub use crate::validator::DepthLimit;
pub use crate::validator::DepthMap;
