//! Boundary capabilities for the portal.
//!
//! The wallet extension and the remote program are external collaborators;
//! this crate defines the injected traits the portal is composed with, plus
//! in-memory implementations for tests and headless embedding.

pub mod program;
pub mod wallet;

pub use program::{MemoryProgram, ProgramClient};
pub use wallet::{MemoryWallet, WalletProvider};
