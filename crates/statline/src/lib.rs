//! Top-level facade crate for statline.
//!
//! Re-exports the core primitives and the push subsystem so hosts can
//! depend on a single crate.

pub mod core {
    pub use statline_core::*;
}

pub mod push {
    pub use statline_push::*;
}
