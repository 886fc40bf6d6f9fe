//! # RustCrypto AEAD trait implementations
//!
//! Implementations of the RustCrypto `aead` traits for all three ciphers.
//! With the `alloc` feature this supplies the allocating
//! [`Aead`](aead::Aead) API: `encrypt` returns ciphertext with the tag
//! appended, `decrypt` verifies and strips it. Fallible key construction
//! from byte slices comes with [`KeyInit::new_from_slice`](aead::KeyInit).

use crate::{ascon, grain, Ascon128, Ascon128a, Grain128Aead};
use aead::consts::{U0, U12, U16, U8};
use aead::generic_array::GenericArray;
use aead::{AeadCore, AeadInPlace, Error, KeyInit, KeySizeUser};

impl KeySizeUser for Ascon128 {
    type KeySize = U16;
}

impl KeyInit for Ascon128 {
    fn new(key: &GenericArray<u8, Self::KeySize>) -> Self {
        let mut k = [0u8; ascon::KEY_SIZE];
        k.copy_from_slice(key.as_slice());
        Self::new(&k)
    }
}

impl AeadCore for Ascon128 {
    type NonceSize = U16;
    type TagSize = U16;
    type CiphertextOverhead = U0;
}

impl AeadInPlace for Ascon128 {
    fn encrypt_in_place_detached(
        &self,
        nonce: &GenericArray<u8, Self::NonceSize>,
        associated_data: &[u8],
        buffer: &mut [u8],
    ) -> Result<GenericArray<u8, Self::TagSize>, Error> {
        let mut n = [0u8; ascon::NONCE_SIZE];
        n.copy_from_slice(nonce.as_slice());
        Ok(self.encrypt_in_place(&n, associated_data, buffer).into())
    }

    fn decrypt_in_place_detached(
        &self,
        nonce: &GenericArray<u8, Self::NonceSize>,
        associated_data: &[u8],
        buffer: &mut [u8],
        tag: &GenericArray<u8, Self::TagSize>,
    ) -> Result<(), Error> {
        let mut n = [0u8; ascon::NONCE_SIZE];
        n.copy_from_slice(nonce.as_slice());
        let mut t = [0u8; ascon::TAG_SIZE];
        t.copy_from_slice(tag.as_slice());
        self.decrypt_in_place(&n, associated_data, buffer, &t)
            .map_err(|_| Error)
    }
}

impl KeySizeUser for Ascon128a {
    type KeySize = U16;
}

impl KeyInit for Ascon128a {
    fn new(key: &GenericArray<u8, Self::KeySize>) -> Self {
        let mut k = [0u8; ascon::KEY_SIZE];
        k.copy_from_slice(key.as_slice());
        Self::new(&k)
    }
}

impl AeadCore for Ascon128a {
    type NonceSize = U16;
    type TagSize = U16;
    type CiphertextOverhead = U0;
}

impl AeadInPlace for Ascon128a {
    fn encrypt_in_place_detached(
        &self,
        nonce: &GenericArray<u8, Self::NonceSize>,
        associated_data: &[u8],
        buffer: &mut [u8],
    ) -> Result<GenericArray<u8, Self::TagSize>, Error> {
        let mut n = [0u8; ascon::NONCE_SIZE];
        n.copy_from_slice(nonce.as_slice());
        Ok(self.encrypt_in_place(&n, associated_data, buffer).into())
    }

    fn decrypt_in_place_detached(
        &self,
        nonce: &GenericArray<u8, Self::NonceSize>,
        associated_data: &[u8],
        buffer: &mut [u8],
        tag: &GenericArray<u8, Self::TagSize>,
    ) -> Result<(), Error> {
        let mut n = [0u8; ascon::NONCE_SIZE];
        n.copy_from_slice(nonce.as_slice());
        let mut t = [0u8; ascon::TAG_SIZE];
        t.copy_from_slice(tag.as_slice());
        self.decrypt_in_place(&n, associated_data, buffer, &t)
            .map_err(|_| Error)
    }
}

impl KeySizeUser for Grain128Aead {
    type KeySize = U16;
}

impl KeyInit for Grain128Aead {
    fn new(key: &GenericArray<u8, Self::KeySize>) -> Self {
        let mut k = [0u8; grain::KEY_SIZE];
        k.copy_from_slice(key.as_slice());
        Self::new(&k)
    }
}

impl AeadCore for Grain128Aead {
    type NonceSize = U12;
    type TagSize = U8;
    type CiphertextOverhead = U0;
}

impl AeadInPlace for Grain128Aead {
    fn encrypt_in_place_detached(
        &self,
        nonce: &GenericArray<u8, Self::NonceSize>,
        associated_data: &[u8],
        buffer: &mut [u8],
    ) -> Result<GenericArray<u8, Self::TagSize>, Error> {
        let mut n = [0u8; grain::NONCE_SIZE];
        n.copy_from_slice(nonce.as_slice());
        Ok(self.encrypt_in_place(&n, associated_data, buffer).into())
    }

    fn decrypt_in_place_detached(
        &self,
        nonce: &GenericArray<u8, Self::NonceSize>,
        associated_data: &[u8],
        buffer: &mut [u8],
        tag: &GenericArray<u8, Self::TagSize>,
    ) -> Result<(), Error> {
        let mut n = [0u8; grain::NONCE_SIZE];
        n.copy_from_slice(nonce.as_slice());
        let mut t = [0u8; grain::TAG_SIZE];
        t.copy_from_slice(tag.as_slice());
        self.decrypt_in_place(&n, associated_data, buffer, &t)
            .map_err(|_| Error)
    }
}
