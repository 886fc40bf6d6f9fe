//! # Grain-128AEAD authenticated encryption
//!
//! Stream-cipher AEAD built from the Grain-128 pre-output generator: the
//! even pre-output bits form the keystream, the odd bits drive a 64-bit
//! accumulator/shift-register authenticator. Associated data is absorbed
//! first, prefixed with a DER-style length header; the tag is a MAC over
//! the plaintext and is terminated by a fixed domain-separation bit.
//!
//! Grain-128AEAD must not be used to encrypt more than 2^80 bits per
//! key/nonce pair, including associated data.
//!
//! # Usage
//!
//! ```
//! use lwc_crypto::Grain128Aead;
//!
//! let cipher = Grain128Aead::new(&[3u8; 16]);
//! let nonce = [1u8; 12];
//!
//! let mut data = *b"attack at dawn";
//! let tag = cipher.encrypt_in_place(&nonce, b"header", &mut data);
//!
//! cipher
//!     .decrypt_in_place(&nonce, b"header", &mut data, &tag)
//!     .expect("authentication failed");
//! assert_eq!(&data, b"attack at dawn");
//! ```

use crate::grain::auth::Authenticator;
use crate::grain::preout::{keystream_bits, mac_bits, Generator};
use crate::util::{seal_into, split_sealed};
use crate::AuthenticationFailed;
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop};

pub(crate) mod auth;
pub(crate) mod preout;

/// Grain-128AEAD key size in bytes.
pub const KEY_SIZE: usize = 16;

/// Grain-128AEAD nonce size in bytes.
pub const NONCE_SIZE: usize = 12;

/// Grain-128AEAD tag size in bytes.
pub const TAG_SIZE: usize = 8;

/// Authentication tag (8 bytes).
pub type Tag = [u8; TAG_SIZE];

/// Largest associated-data length header: `0x80|n` plus an 8-byte length.
const DER_MAX: usize = 9;

/// Encodes `len` as a DER length: a single byte below 128, otherwise
/// `0x80|n` followed by the minimal n-byte big-endian value.
fn der_header(len: usize) -> ([u8; DER_MAX], usize) {
    let mut hdr = [0u8; DER_MAX];
    if len < 0x80 {
        hdr[0] = len as u8;
        return (hdr, 1);
    }

    let n = (usize::BITS as usize - len.leading_zeros() as usize + 7) / 8;
    hdr[0] = 0x80 | n as u8;
    for k in 0..n {
        hdr[n - k] = (len >> (8 * k)) as u8;
    }
    (hdr, n + 1)
}

/// Absorbs the length header and associated data into the authenticator,
/// two bytes per pre-output word.
///
/// If the combined stream has odd length, the final byte consumes only the
/// low half of its pre-output word; that word is returned so the caller
/// can spend the high half on the first message byte.
fn absorb_aad(g: &mut Generator, auth: &mut Authenticator, ad: &[u8]) -> Option<u32> {
    let (hdr, hdr_len) = der_header(ad.len());
    let total = hdr_len + ad.len();
    let byte_at = |k: usize| {
        if k < hdr_len {
            hdr[k]
        } else {
            ad[k - hdr_len]
        }
    };

    let mut off = 0;
    while total - off >= 2 {
        let y = g.next_word();
        let v = u16::from_le_bytes([byte_at(off), byte_at(off + 1)]);
        auth.accumulate(mac_bits(y), v);
        off += 2;
    }

    if off < total {
        let y = g.next_word();
        auth.accumulate8(mac_bits(y) as u8, byte_at(off));
        Some(y)
    } else {
        None
    }
}

fn encrypt(g: &mut Generator, auth: &mut Authenticator, ad: &[u8], buffer: &mut [u8]) {
    let mut pos = 0;

    if let Some(y) = absorb_aad(g, auth, ad) {
        if !buffer.is_empty() {
            let p = buffer[0];
            buffer[0] = p ^ (keystream_bits(y) >> 8) as u8;
            auth.accumulate8((mac_bits(y) >> 8) as u8, p);
            pos = 1;
        }
    }

    while buffer.len() - pos >= 2 {
        let y = g.next_word();
        let p = u16::from_le_bytes([buffer[pos], buffer[pos + 1]]);
        buffer[pos..pos + 2].copy_from_slice(&(keystream_bits(y) ^ p).to_le_bytes());
        auth.accumulate(mac_bits(y), p);
        pos += 2;
    }

    if pos < buffer.len() {
        let y = g.next_word();
        let p = buffer[pos];
        buffer[pos] = p ^ keystream_bits(y) as u8;
        // 0x0100 terminates the message with the domain-separation bit.
        auth.accumulate(mac_bits(y), 0x0100 | u16::from(p));
    } else {
        auth.accumulate(mac_bits(g.next_word()), 0x0001);
    }
}

/// Mirror of [`encrypt`]; the authenticator absorbs the recovered
/// plaintext, making the tag a MAC over what the caller will read.
fn decrypt(g: &mut Generator, auth: &mut Authenticator, ad: &[u8], buffer: &mut [u8]) {
    let mut pos = 0;

    if let Some(y) = absorb_aad(g, auth, ad) {
        if !buffer.is_empty() {
            let p = buffer[0] ^ (keystream_bits(y) >> 8) as u8;
            buffer[0] = p;
            auth.accumulate8((mac_bits(y) >> 8) as u8, p);
            pos = 1;
        }
    }

    while buffer.len() - pos >= 2 {
        let y = g.next_word();
        let c = u16::from_le_bytes([buffer[pos], buffer[pos + 1]]);
        let p = keystream_bits(y) ^ c;
        buffer[pos..pos + 2].copy_from_slice(&p.to_le_bytes());
        auth.accumulate(mac_bits(y), p);
        pos += 2;
    }

    if pos < buffer.len() {
        let y = g.next_word();
        let p = buffer[pos] ^ keystream_bits(y) as u8;
        buffer[pos] = p;
        auth.accumulate(mac_bits(y), 0x0100 | u16::from(p));
    } else {
        auth.accumulate(mac_bits(g.next_word()), 0x0001);
    }
}

/// Grain-128AEAD cipher.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Grain128Aead {
    key: [u32; 4],
}

impl Grain128Aead {
    /// Creates a cipher from a 128-bit key.
    pub fn new(key: &[u8; KEY_SIZE]) -> Self {
        let mut k = [0u32; 4];
        for (w, src) in k.iter_mut().zip(key.chunks_exact(4)) {
            *w = u32::from_le_bytes(src.try_into().unwrap());
        }
        Self { key: k }
    }

    /// Encrypts `buffer` in place and returns the authentication tag.
    pub fn encrypt_in_place(
        &self,
        nonce: &[u8; NONCE_SIZE],
        associated_data: &[u8],
        buffer: &mut [u8],
    ) -> Tag {
        let (mut g, mut auth) = Generator::keyed(&self.key, nonce);
        encrypt(&mut g, &mut auth, associated_data, buffer);
        auth.tag()
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
        let (mut g, mut auth) = Generator::keyed(&self.key, nonce);
        decrypt(&mut g, &mut auth, associated_data, buffer);

        let expected = auth.tag();
        if expected.ct_eq(tag).into() {
            Ok(())
        } else {
            buffer.zeroize();
            Err(AuthenticationFailed)
        }
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

#[cfg(test)]
mod tests;
