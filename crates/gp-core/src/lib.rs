//! GIF Portal core.
//!
//! The connect → fetch → render state machine behind the portal UI, kept
//! free of any browser or transport concern so it can be driven natively.

pub mod error;
pub mod portal;
pub mod state;

pub use error::PortalError;
pub use portal::{Portal, PortalConfig};
pub use state::{PortalState, Session, ViewState};
