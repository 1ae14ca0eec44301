//! Credentials, tokens, and user profiles exchanged with the open platform.

pub mod credentials;
pub mod id;
pub mod profile;
pub mod secret;
pub mod token;

pub use credentials::*;
pub use id::*;
pub use profile::*;
pub use secret::*;
pub use token::*;
