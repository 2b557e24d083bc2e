//! Front ends for the policy report pipeline
//!
//! - [`session`]: the upload → preview → download state machine
//! - [`server`]: HTTP surface over one shared session
//! - [`page`]: HTML for the session page

pub mod page;
pub mod server;
pub mod session;

pub use server::{router, serve, ServeOptions, SharedSession};
pub use session::{Session, SessionState};
