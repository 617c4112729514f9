pub mod authenticator;
pub mod guard;
pub mod service;
