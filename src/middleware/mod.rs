//! Middleware layer.
//!
//! Response post-processing applied uniformly to everything the router
//! returns, whichever disposition produced it.
//!
//! - [`cors`] — cross-origin headers and JSON content-type normalization

pub mod cors;
