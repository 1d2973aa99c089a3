#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

// Compatibility layer for std/no_std
mod compat;

mod encoding;
mod error;
mod param;
mod param_list;
mod stream;

// Public API
pub use encoding::{Encoding, QUERY_COMPONENT_SET};
pub use error::{ParamError, Result};
pub use param::Param;
pub use param_list::ParamList;
pub use stream::StreamView;
