//! `plaza_client`
//!
//! Client-side state reconciliation and presentation:
//! - Authoritative player registry mirroring the remote source
//! - Render-state interpolation for remote entity positions
//! - Camera framing over the local player
//! - Input capture and intent generation
//! - Frame driver issuing draw calls through the surface boundary

pub mod assets;
pub mod camera;
pub mod client;
pub mod input;
pub mod interp;
pub mod registry;

pub use client::Client;
