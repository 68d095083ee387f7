//! Small supporting macros.

#[macro_use]
pub mod scoped_tls;

#[macro_use]
mod debug;
