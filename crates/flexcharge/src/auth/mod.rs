//! Authentication types and token management.
//!
//! This module provides the credential exchange and session primitives.
//! All authenticated operations flow through a [`TokenAuthenticator`] handle.

mod authenticator;
mod credentials;
mod session;
mod tokens;

pub use authenticator::TokenAuthenticator;
pub use credentials::Credentials;
pub use session::{Outcome, Session};
pub use tokens::{AccessToken, RefreshToken};
