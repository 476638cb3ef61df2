//! OS-level interactions.
//!
//! Currently only environmental variables, see [`env::Env`].

pub mod env;
