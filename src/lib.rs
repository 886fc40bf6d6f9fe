#![no_std]
#![doc = include_str!("../README.md")]

pub mod ascon;
pub mod grain;
mod rustcrypto_aead;
mod util;

pub use ascon::{Ascon128, Ascon128a};
pub use grain::Grain128Aead;

pub use aead::{self, AeadCore, AeadInPlace, KeyInit}; // For trait-based users

/// Authentication tag verification failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticationFailed;
