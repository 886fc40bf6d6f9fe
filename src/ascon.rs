//! # ASCON-128 and ASCON-128a authenticated encryption
//!
//! One-shot AEAD modes over the 320-bit ASCON permutation. Both variants
//! take a 128-bit key and nonce and produce a 128-bit tag; they differ in
//! rate (8 vs 16 bytes), data-phase round count (6 vs 8) and initialization
//! vector.
//!
//! # Usage
//!
//! ```
//! use lwc_crypto::Ascon128;
//!
//! let cipher = Ascon128::new(&[7u8; 16]);
//! let nonce = [1u8; 16];
//!
//! let mut data = *b"attack at dawn";
//! let tag = cipher.encrypt_in_place(&nonce, b"header", &mut data);
//!
//! cipher
//!     .decrypt_in_place(&nonce, b"header", &mut data, &tag)
//!     .expect("authentication failed");
//! assert_eq!(&data, b"attack at dawn");
//! ```
//!
//! For allocating APIs with separate input/output buffers, use the
//! RustCrypto [`Aead`](crate::aead::Aead) trait.

use crate::ascon::permutation::{p12, p6, p8, State};
use crate::util::{seal_into, split_sealed};
use crate::AuthenticationFailed;
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop};

pub(crate) mod permutation;

/// ASCON key size in bytes.
pub const KEY_SIZE: usize = 16;

/// ASCON nonce size in bytes.
pub const NONCE_SIZE: usize = 16;

/// ASCON tag size in bytes.
pub const TAG_SIZE: usize = 16;

/// Authentication tag (16 bytes).
pub type Tag = [u8; TAG_SIZE];

/// ASCON-128 initialization vector: k=128, r=64, a=12, b=6.
const IV_128: u64 = 0x80400c0600000000;

/// ASCON-128a initialization vector: k=128, r=128, a=12, b=8.
const IV_128A: u64 = 0x80800c0800000000;

/// Reads up to 8 bytes as a big-endian word, zero-extending from the
/// bottom: byte `i` of `src` lands in bits `56 - 8*i`.
fn be64_partial(src: &[u8]) -> u64 {
    let mut x = 0;
    for (i, &b) in src.iter().enumerate() {
        x |= u64::from(b) << (56 - 8 * i);
    }
    x
}

/// Writes the top `dst.len()` bytes of `x` big-endian.
fn put_be64_partial(dst: &mut [u8], x: u64) {
    for (i, b) in dst.iter_mut().enumerate() {
        *b = (x >> (56 - 8 * i)) as u8;
    }
}

/// Domain-separation padding word for a partial block of `n` bytes:
/// a `0x80` byte at big-endian byte position `n`. Requires `n < 8`.
fn pad(n: usize) -> u64 {
    0x80 << (56 - 8 * n)
}

/// Zeros the top `n` big-endian bytes of `x`. Requires `n < 8`.
fn mask_high(x: u64, n: usize) -> u64 {
    x & (u64::MAX >> (8 * n))
}

fn be64(src: &[u8]) -> u64 {
    u64::from_be_bytes(src.try_into().unwrap())
}

impl State {
    fn init(iv: u64, k0: u64, k1: u64, nonce: &[u8; NONCE_SIZE]) -> Self {
        let mut s = State {
            x0: iv,
            x1: k0,
            x2: k1,
            x3: be64(&nonce[0..8]),
            x4: be64(&nonce[8..16]),
        };
        p12(&mut s);
        s.x3 ^= k0;
        s.x4 ^= k1;
        s
    }

    fn tag(&self) -> Tag {
        let mut tag = [0u8; TAG_SIZE];
        tag[..8].copy_from_slice(&self.x3.to_be_bytes());
        tag[8..].copy_from_slice(&self.x4.to_be_bytes());
        tag
    }
}

/// Absorb associated data at rate 8 (ASCON-128).
///
/// Ends with the domain separator flip, which happens even for empty data.
fn absorb_aad_128(s: &mut State, mut ad: &[u8]) {
    if !ad.is_empty() {
        while ad.len() >= 8 {
            s.x0 ^= be64(&ad[0..8]);
            p6(s);
            ad = &ad[8..];
        }
        s.x0 ^= be64_partial(ad);
        s.x0 ^= pad(ad.len());
        p6(s);
    }
    s.x4 ^= 1;
}

/// Absorb associated data at rate 16 (ASCON-128a).
fn absorb_aad_128a(s: &mut State, mut ad: &[u8]) {
    if !ad.is_empty() {
        while ad.len() >= 16 {
            s.x0 ^= be64(&ad[0..8]);
            s.x1 ^= be64(&ad[8..16]);
            p8(s);
            ad = &ad[16..];
        }
        if ad.len() >= 8 {
            s.x0 ^= be64(&ad[0..8]);
            s.x1 ^= be64_partial(&ad[8..]);
            s.x1 ^= pad(ad.len() - 8);
        } else {
            s.x0 ^= be64_partial(ad);
            s.x0 ^= pad(ad.len());
        }
        p8(s);
    }
    s.x4 ^= 1;
}

/// Encrypt `buffer` in place at rate 8 (ASCON-128).
fn encrypt_128(s: &mut State, buffer: &mut [u8]) {
    let mut iter = buffer.chunks_exact_mut(8);
    for block in iter.by_ref() {
        s.x0 ^= be64(block);
        block.copy_from_slice(&s.x0.to_be_bytes());
        p6(s);
    }

    let rem = iter.into_remainder();
    s.x0 ^= be64_partial(rem);
    s.x0 ^= pad(rem.len());
    put_be64_partial(rem, s.x0);
}

/// Decrypt `buffer` in place at rate 8 (ASCON-128).
fn decrypt_128(s: &mut State, buffer: &mut [u8]) {
    let mut iter = buffer.chunks_exact_mut(8);
    for block in iter.by_ref() {
        let c = be64(block);
        block.copy_from_slice(&(s.x0 ^ c).to_be_bytes());
        s.x0 = c;
        p6(s);
    }

    let rem = iter.into_remainder();
    let c = be64_partial(rem);
    put_be64_partial(rem, s.x0 ^ c);
    // Reinsert the recovered ciphertext bytes into the rate.
    s.x0 = mask_high(s.x0, rem.len());
    s.x0 |= c;
    s.x0 ^= pad(rem.len());
}

/// Encrypt `buffer` in place at rate 16 (ASCON-128a).
fn encrypt_128a(s: &mut State, buffer: &mut [u8]) {
    let mut iter = buffer.chunks_exact_mut(16);
    for block in iter.by_ref() {
        s.x0 ^= be64(&block[0..8]);
        s.x1 ^= be64(&block[8..16]);
        block[0..8].copy_from_slice(&s.x0.to_be_bytes());
        block[8..16].copy_from_slice(&s.x1.to_be_bytes());
        p8(s);
    }

    let rem = iter.into_remainder();
    if rem.len() >= 8 {
        s.x0 ^= be64(&rem[0..8]);
        s.x1 ^= be64_partial(&rem[8..]);
        s.x1 ^= pad(rem.len() - 8);
        rem[0..8].copy_from_slice(&s.x0.to_be_bytes());
        put_be64_partial(&mut rem[8..], s.x1);
    } else {
        s.x0 ^= be64_partial(rem);
        s.x0 ^= pad(rem.len());
        put_be64_partial(rem, s.x0);
    }
}

/// Decrypt `buffer` in place at rate 16 (ASCON-128a).
fn decrypt_128a(s: &mut State, buffer: &mut [u8]) {
    let mut iter = buffer.chunks_exact_mut(16);
    for block in iter.by_ref() {
        let c0 = be64(&block[0..8]);
        let c1 = be64(&block[8..16]);
        block[0..8].copy_from_slice(&(s.x0 ^ c0).to_be_bytes());
        block[8..16].copy_from_slice(&(s.x1 ^ c1).to_be_bytes());
        s.x0 = c0;
        s.x1 = c1;
        p8(s);
    }

    let rem = iter.into_remainder();
    if rem.len() >= 8 {
        let c0 = be64(&rem[0..8]);
        let c1 = be64_partial(&rem[8..]);
        rem[0..8].copy_from_slice(&(s.x0 ^ c0).to_be_bytes());
        put_be64_partial(&mut rem[8..], s.x1 ^ c1);
        s.x0 = c0;
        s.x1 = mask_high(s.x1, rem.len() - 8);
        s.x1 |= c1;
        s.x1 ^= pad(rem.len() - 8);
    } else {
        let c = be64_partial(rem);
        put_be64_partial(rem, s.x0 ^ c);
        s.x0 = mask_high(s.x0, rem.len());
        s.x0 |= c;
        s.x0 ^= pad(rem.len());
    }
}

fn finalize_128(s: &mut State, k0: u64, k1: u64) {
    s.x1 ^= k0;
    s.x2 ^= k1;
    p12(s);
    s.x3 ^= k0;
    s.x4 ^= k1;
}

fn finalize_128a(s: &mut State, k0: u64, k1: u64) {
    s.x2 ^= k0;
    s.x3 ^= k1;
    p12(s);
    s.x3 ^= k0;
    s.x4 ^= k1;
}

fn verify(s: &State, tag: &Tag, buffer: &mut [u8]) -> Result<(), AuthenticationFailed> {
    let expected = s.tag();
    if expected.ct_eq(tag).into() {
        Ok(())
    } else {
        buffer.zeroize();
        Err(AuthenticationFailed)
    }
}

/// ASCON-128 AEAD cipher.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Ascon128 {
    k0: u64,
    k1: u64,
}

impl Ascon128 {
    /// Creates a cipher from a 128-bit key.
    pub fn new(key: &[u8; KEY_SIZE]) -> Self {
        Self {
            k0: be64(&key[0..8]),
            k1: be64(&key[8..16]),
        }
    }

    /// Encrypts `buffer` in place and returns the authentication tag.
    pub fn encrypt_in_place(
        &self,
        nonce: &[u8; NONCE_SIZE],
        associated_data: &[u8],
        buffer: &mut [u8],
    ) -> Tag {
        let mut s = State::init(IV_128, self.k0, self.k1, nonce);
        absorb_aad_128(&mut s, associated_data);
        encrypt_128(&mut s, buffer);
        finalize_128(&mut s, self.k0, self.k1);
        s.tag()
    }

    /// Decrypts `buffer` in place if the tag authenticates.
    ///
    /// On failure the buffer is zeroed before the error is returned.
    pub fn decrypt_in_place(
        &self,
        nonce: &[u8; NONCE_SIZE],
        associated_data: &[u8],
        buffer: &mut [u8],
        tag: &Tag,
    ) -> Result<(), AuthenticationFailed> {
        let mut s = State::init(IV_128, self.k0, self.k1, nonce);
        absorb_aad_128(&mut s, associated_data);
        decrypt_128(&mut s, buffer);
        finalize_128(&mut s, self.k0, self.k1);
        verify(&s, tag, buffer)
    }

    /// Encrypts `plaintext` into `dst` as ciphertext followed by the tag.
    ///
    /// # Panics
    ///
    /// Panics if `dst.len() != plaintext.len() + TAG_SIZE`, or if `dst`
    /// inexactly overlaps `plaintext`.
    pub fn seal(
        &self,
        dst: &mut [u8],
        nonce: &[u8; NONCE_SIZE],
        plaintext: &[u8],
        associated_data: &[u8],
    ) {
        seal_into(dst, plaintext, |buffer| {
            self.encrypt_in_place(nonce, associated_data, buffer)
        });
    }

    /// Recovers the plaintext of `ciphertext` (which ends with the tag)
    /// into `dst`.
    ///
    /// On authentication failure `dst` is zeroed and an error returned.
    /// Ciphertext shorter than the tag fails without panicking.
    ///
    /// # Panics
    ///
    /// Panics if `dst.len() != ciphertext.len() - TAG_SIZE`, or if `dst`
    /// inexactly overlaps `ciphertext`.
    pub fn open(
        &self,
        dst: &mut [u8],
        nonce: &[u8; NONCE_SIZE],
        ciphertext: &[u8],
        associated_data: &[u8],
    ) -> Result<(), AuthenticationFailed> {
        let (ct, tag) = split_sealed::<TAG_SIZE>(dst, ciphertext)?;
        dst.copy_from_slice(ct);
        self.decrypt_in_place(nonce, associated_data, dst, &tag)
    }
}

/// ASCON-128a AEAD cipher.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Ascon128a {
    k0: u64,
    k1: u64,
}

impl Ascon128a {
    /// Creates a cipher from a 128-bit key.
    pub fn new(key: &[u8; KEY_SIZE]) -> Self {
        Self {
            k0: be64(&key[0..8]),
            k1: be64(&key[8..16]),
        }
    }

    /// Encrypts `buffer` in place and returns the authentication tag.
    pub fn encrypt_in_place(
        &self,
        nonce: &[u8; NONCE_SIZE],
        associated_data: &[u8],
        buffer: &mut [u8],
    ) -> Tag {
        let mut s = State::init(IV_128A, self.k0, self.k1, nonce);
        absorb_aad_128a(&mut s, associated_data);
        encrypt_128a(&mut s, buffer);
        finalize_128a(&mut s, self.k0, self.k1);
        s.tag()
    }

    /// Decrypts `buffer` in place if the tag authenticates.
    ///
    /// On failure the buffer is zeroed before the error is returned.
    pub fn decrypt_in_place(
        &self,
        nonce: &[u8; NONCE_SIZE],
        associated_data: &[u8],
        buffer: &mut [u8],
        tag: &Tag,
    ) -> Result<(), AuthenticationFailed> {
        let mut s = State::init(IV_128A, self.k0, self.k1, nonce);
        absorb_aad_128a(&mut s, associated_data);
        decrypt_128a(&mut s, buffer);
        finalize_128a(&mut s, self.k0, self.k1);
        verify(&s, tag, buffer)
    }

    /// Encrypts `plaintext` into `dst` as ciphertext followed by the tag.
    ///
    /// # Panics
    ///
    /// Panics if `dst.len() != plaintext.len() + TAG_SIZE`, or if `dst`
    /// inexactly overlaps `plaintext`.
    pub fn seal(
        &self,
        dst: &mut [u8],
        nonce: &[u8; NONCE_SIZE],
        plaintext: &[u8],
        associated_data: &[u8],
    ) {
        seal_into(dst, plaintext, |buffer| {
            self.encrypt_in_place(nonce, associated_data, buffer)
        });
    }

    /// Recovers the plaintext of `ciphertext` (which ends with the tag)
    /// into `dst`.
    ///
    /// On authentication failure `dst` is zeroed and an error returned.
    /// Ciphertext shorter than the tag fails without panicking.
    ///
    /// # Panics
    ///
    /// Panics if `dst.len() != ciphertext.len() - TAG_SIZE`, or if `dst`
    /// inexactly overlaps `ciphertext`.
    pub fn open(
        &self,
        dst: &mut [u8],
        nonce: &[u8; NONCE_SIZE],
        ciphertext: &[u8],
        associated_data: &[u8],
    ) -> Result<(), AuthenticationFailed> {
        let (ct, tag) = split_sealed::<TAG_SIZE>(dst, ciphertext)?;
        dst.copy_from_slice(ct);
        self.decrypt_in_place(nonce, associated_data, dst, &tag)
    }
}
