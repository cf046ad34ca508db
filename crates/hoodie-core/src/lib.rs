//! Hoodie Core Types
//!
//! This crate provides the block tree model shared by the hoodie parser and
//! compiler. It includes:
//!
//! - **Blocks**: Named tree nodes carrying key/value pairs ([`block::Block`])
//! - **Documents**: Per-source arenas of blocks addressed by [`block::BlockId`]
//!   ([`document::Document`])
//! - **Pairs**: Key helpers for conditional tags ([`pair`] module)

pub mod block;
pub mod document;
pub mod pair;

pub use block::{Block, BlockId, Resolution};
pub use document::Document;
