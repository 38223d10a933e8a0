//! Client-side assets for the personal site, compiled to WebAssembly.
//!
//! `core` holds the platform-free pieces (palette store, particle engine,
//! offline cache logic) and builds on any target. Everything that touches the
//! browser is compiled for `wasm32` only.

pub mod constants;
pub mod core;

#[cfg(target_arch = "wasm32")]
mod canvas;
#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod events;
#[cfg(target_arch = "wasm32")]
mod frame;
#[cfg(target_arch = "wasm32")]
mod panel;
#[cfg(target_arch = "wasm32")]
mod runtime;
#[cfg(target_arch = "wasm32")]
mod sink;
#[cfg(target_arch = "wasm32")]
mod storage;
#[cfg(target_arch = "wasm32")]
mod sw;
#[cfg(target_arch = "wasm32")]
mod ui;
