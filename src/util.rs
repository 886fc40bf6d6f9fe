//! Buffer-aliasing checks shared by the AEAD implementations.
//!
//! The split-buffer `seal`/`open` APIs reject output/input slices that
//! partially alias each other: encryption writes the output as it reads the
//! input, so a shifted overlap would corrupt later input bytes. Exact
//! aliasing (same start, in-place use) is fine. Safe Rust cannot produce
//! such slices, but slices handed across an FFI boundary can.

/// Reports whether `x` and `y` share any byte of memory.
///
/// Zero-length slices never overlap anything.
pub(crate) fn any_overlap(x: &[u8], y: &[u8]) -> bool {
    if x.is_empty() || y.is_empty() {
        return false;
    }
    let x_start = x.as_ptr() as usize;
    let x_end = x_start + x.len() - 1;
    let y_start = y.as_ptr() as usize;
    let y_end = y_start + y.len() - 1;
    x_start <= y_end && y_start <= x_end
}

/// Reports whether `x` and `y` share memory at any non-corresponding index.
///
/// Slices starting at the same address are exactly aliased and allowed; any
/// other form of sharing is inexact and would corrupt an encrypt/decrypt
/// pass that writes `x` while reading `y`.
pub(crate) fn inexact_overlap(x: &[u8], y: &[u8]) -> bool {
    if x.is_empty() || y.is_empty() || core::ptr::eq(x.as_ptr(), y.as_ptr()) {
        return false;
    }
    any_overlap(x, y)
}

/// Shared `seal` plumbing: copy the plaintext into the front of `dst`,
/// encrypt it in place via `encrypt`, append the returned tag.
///
/// Panics if `dst` is not exactly plaintext plus tag sized, or if the
/// buffers overlap inexactly.
pub(crate) fn seal_into<const N: usize>(
    dst: &mut [u8],
    plaintext: &[u8],
    encrypt: impl FnOnce(&mut [u8]) -> [u8; N],
) {
    assert_eq!(dst.len(), plaintext.len() + N, "invalid output length");
    assert!(!inexact_overlap(dst, plaintext), "invalid buffer overlap");

    let (buffer, tag_out) = dst.split_at_mut(plaintext.len());
    buffer.copy_from_slice(plaintext);
    let tag = encrypt(buffer);
    tag_out.copy_from_slice(&tag);
}

/// Shared `open` plumbing: check lengths and overlap, split off the
/// trailing tag. Ciphertext shorter than the tag is an authentication
/// failure, not a panic.
pub(crate) fn split_sealed<'a, const N: usize>(
    dst: &mut [u8],
    ciphertext: &'a [u8],
) -> Result<(&'a [u8], [u8; N]), crate::AuthenticationFailed> {
    if ciphertext.len() < N {
        return Err(crate::AuthenticationFailed);
    }
    let (ct, tag) = ciphertext.split_at(ciphertext.len() - N);
    assert_eq!(dst.len(), ct.len(), "invalid output length");
    assert!(!inexact_overlap(dst, ciphertext), "invalid buffer overlap");

    let mut tag_arr = [0u8; N];
    tag_arr.copy_from_slice(tag);
    Ok((ct, tag_arr))
}
