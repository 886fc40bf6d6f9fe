extern crate std;
use super::preout::Generator;
use super::*;
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use std::vec;
use std::vec::Vec;

/// Naive bit-at-a-time model of the Grain-128AEAD pre-output generator,
/// straight from the published feedback and filter polynomials. The word
/// implementation must match it bit for bit.
struct BitModel {
    s: Vec<u8>,
    b: Vec<u8>,
    t: usize,
}

impl BitModel {
    fn new(key: &[u8; KEY_SIZE], nonce: &[u8; NONCE_SIZE]) -> Self {
        let mut s = Vec::with_capacity(1 << 13);
        let mut b = Vec::with_capacity(1 << 13);
        for i in 0..128 {
            b.push((key[i / 8] >> (i % 8)) & 1);
        }
        for i in 0..96 {
            s.push((nonce[i / 8] >> (i % 8)) & 1);
        }
        for _ in 96..127 {
            s.push(1);
        }
        s.push(0);
        BitModel { s, b, t: 0 }
    }

    fn sb(&self, j: usize) -> u8 {
        self.s[self.t + j]
    }

    fn bb(&self, j: usize) -> u8 {
        self.b[self.t + j]
    }

    /// One clock: returns y_t and appends the two feedback bits.
    fn clock(&mut self) -> u8 {
        // h(x) = b12 s8 + s13 s20 + b95 s42 + s60 s79 + b12 b95 s94
        let h = (self.bb(12) & self.sb(8))
            ^ (self.sb(13) & self.sb(20))
            ^ (self.bb(95) & self.sb(42))
            ^ (self.sb(60) & self.sb(79))
            ^ (self.bb(12) & self.bb(95) & self.sb(94));

        // y = h + s93 + b2 + b15 + b36 + b45 + b64 + b73 + b89
        let y = h
            ^ self.sb(93)
            ^ self.bb(2)
            ^ self.bb(15)
            ^ self.bb(36)
            ^ self.bb(45)
            ^ self.bb(64)
            ^ self.bb(73)
            ^ self.bb(89);

        let v = self.sb(0) ^ self.sb(7) ^ self.sb(38) ^ self.sb(70) ^ self.sb(81) ^ self.sb(96);

        let u = self.sb(0)
            ^ self.bb(0)
            ^ self.bb(26)
            ^ self.bb(56)
            ^ self.bb(91)
            ^ self.bb(96)
            ^ (self.bb(3) & self.bb(67))
            ^ (self.bb(11) & self.bb(13))
            ^ (self.bb(17) & self.bb(18))
            ^ (self.bb(27) & self.bb(59))
            ^ (self.bb(40) & self.bb(48))
            ^ (self.bb(61) & self.bb(65))
            ^ (self.bb(68) & self.bb(84))
            ^ (self.bb(22) & self.bb(24) & self.bb(25))
            ^ (self.bb(70) & self.bb(78) & self.bb(82))
            ^ (self.bb(88) & self.bb(92) & self.bb(93) & self.bb(95));

        self.s.push(v);
        self.b.push(u);
        self.t += 1;
        y
    }

    /// The 384-clock keyed initialization: 256 clocks re-feeding the
    /// pre-output, then 128 clocks seeding the accumulator and register
    /// while the key is folded back into the LFSR bit by bit.
    fn init(&mut self, key: &[u8; KEY_SIZE]) -> (u64, u64) {
        for _ in 0..256 {
            let y = self.clock();
            let n = self.s.len() - 1;
            self.s[n] ^= y;
            let n = self.b.len() - 1;
            self.b[n] ^= y;
        }

        let mut acc = 0u64;
        for i in 0..64 {
            let y = self.clock();
            acc |= u64::from(y) << i;
            let n = self.s.len() - 1;
            self.s[n] ^= (key[i / 8] >> (i % 8)) & 1;
        }

        let mut reg = 0u64;
        for i in 0..64 {
            let y = self.clock();
            reg |= u64::from(y) << i;
            let n = self.s.len() - 1;
            self.s[n] ^= (key[(64 + i) / 8] >> ((64 + i) % 8)) & 1;
        }

        (acc, reg)
    }

    fn next_word(&mut self) -> u32 {
        let mut w = 0u32;
        for j in 0..32 {
            w |= u32::from(self.clock()) << j;
        }
        w
    }
}

fn key_words(key: &[u8; KEY_SIZE]) -> [u32; 4] {
    let mut k = [0u32; 4];
    for (w, src) in k.iter_mut().zip(key.chunks_exact(4)) {
        *w = u32::from_le_bytes(src.try_into().unwrap());
    }
    k
}

#[test]
fn word_generator_matches_bit_model() {
    let cases: &[([u8; KEY_SIZE], [u8; NONCE_SIZE])] = &[
        ([0u8; KEY_SIZE], [0u8; NONCE_SIZE]),
        (
            [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15],
            [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11],
        ),
        ([0xffu8; KEY_SIZE], [0x5au8; NONCE_SIZE]),
    ];

    for (key, nonce) in cases {
        let (mut g, auth) = Generator::keyed(&key_words(key), nonce);
        let mut model = BitModel::new(key, nonce);
        let (acc, reg) = model.init(key);
        assert_eq!(auth.state(), (acc, reg), "authenticator seed");

        // 150 words crosses the rolling-buffer compaction twice.
        for k in 0..150 {
            assert_eq!(g.next_word(), model.next_word(), "pre-output word {k}");
        }
    }
}

#[test]
fn der_header_vectors() {
    let cases: &[(usize, &[u8])] = &[
        (0, &[0x00]),
        (5, &[0x05]),
        (127, &[0x7f]),
        (128, &[0x81, 0x80]),
        (130, &[0x81, 0x82]),
        (0x1234, &[0x82, 0x12, 0x34]),
        (65536, &[0x83, 0x01, 0x00, 0x00]),
    ];
    for &(len, want) in cases {
        let (hdr, n) = der_header(len);
        assert_eq!(&hdr[..n], want, "length {len}");
    }
}

#[test]
fn roundtrip_framing_matrix() {
    let cipher = Grain128Aead::new(&[0xabu8; KEY_SIZE]);
    let nonce = [0x17u8; NONCE_SIZE];

    // Odd/even splits of both inputs exercise the shared pre-output word
    // between a trailing AD byte and the first message byte, and the
    // 128-byte DER threshold.
    for &ad_len in &[0usize, 1, 2, 3, 4, 126, 127, 128, 129, 200] {
        for &pt_len in &[0usize, 1, 2, 3, 7, 8, 9, 15, 16, 17, 23, 24, 25] {
            let aad: Vec<u8> = (0..ad_len).map(|i| (i * 3) as u8).collect();
            let plaintext: Vec<u8> = (0..pt_len).map(|i| (i * 7) as u8).collect();

            let mut buffer = plaintext.clone();
            let tag = cipher.encrypt_in_place(&nonce, &aad, &mut buffer);
            if pt_len > 0 {
                assert_ne!(buffer, plaintext, "ad={ad_len} pt={pt_len}");
            }
            cipher
                .decrypt_in_place(&nonce, &aad, &mut buffer, &tag)
                .unwrap_or_else(|_| panic!("ad={ad_len} pt={pt_len}"));
            assert_eq!(buffer, plaintext, "ad={ad_len} pt={pt_len}");
        }
    }
}

#[test]
fn seal_matches_in_place_encryption() {
    let cipher = Grain128Aead::new(&[0x42u8; KEY_SIZE]);
    let nonce = [0x99u8; NONCE_SIZE];
    let plaintext = b"split-buffer and in-place must agree";
    let aad = b"hdr";

    let mut sealed = vec![0u8; plaintext.len() + TAG_SIZE];
    cipher.seal(&mut sealed, &nonce, plaintext, aad);

    let mut buffer = *plaintext;
    let tag = cipher.encrypt_in_place(&nonce, aad, &mut buffer);
    assert_eq!(&sealed[..plaintext.len()], &buffer);
    assert_eq!(&sealed[plaintext.len()..], &tag);

    let mut opened = vec![0u8; plaintext.len()];
    cipher
        .open(&mut opened, &nonce, &sealed, aad)
        .expect("open failed");
    assert_eq!(opened, plaintext);
}

#[test]
fn seal_is_deterministic() {
    let cipher = Grain128Aead::new(&[5u8; KEY_SIZE]);
    let nonce = [6u8; NONCE_SIZE];

    let mut a = *b"determinism";
    let mut b = *b"determinism";
    let tag_a = cipher.encrypt_in_place(&nonce, b"ad", &mut a);
    let tag_b = cipher.encrypt_in_place(&nonce, b"ad", &mut b);
    assert_eq!(a, b);
    assert_eq!(tag_a, tag_b);
}

#[test]
fn any_corruption_fails_and_zeroes_output() {
    let cipher = Grain128Aead::new(&[0x31u8; KEY_SIZE]);
    let nonce = [0x7eu8; NONCE_SIZE];
    let plaintext = b"tamper detection";
    let aad = b"header";

    let mut sealed = vec![0u8; plaintext.len() + TAG_SIZE];
    cipher.seal(&mut sealed, &nonce, plaintext, aad);

    for bit in 0..sealed.len() * 8 {
        let mut corrupt = sealed.clone();
        corrupt[bit / 8] ^= 1 << (bit % 8);

        let mut out = vec![0xffu8; plaintext.len()];
        let res = cipher.open(&mut out, &nonce, &corrupt, aad);
        assert_eq!(res, Err(AuthenticationFailed), "bit {bit}");
        assert!(out.iter().all(|&b| b == 0), "output not wiped, bit {bit}");
    }

    let mut out = vec![0u8; plaintext.len()];
    assert!(cipher.open(&mut out, &nonce, &sealed, b"headex").is_err());

    let mut wrong_nonce = nonce;
    wrong_nonce[0] ^= 1;
    assert!(cipher.open(&mut out, &wrong_nonce, &sealed, aad).is_err());
}

#[test]
fn short_ciphertext_is_rejected() {
    let cipher = Grain128Aead::new(&[0u8; KEY_SIZE]);
    let nonce = [0u8; NONCE_SIZE];

    let mut out = [0u8; 0];
    assert_eq!(
        cipher.open(&mut out, &nonce, &[0u8; TAG_SIZE - 1], b""),
        Err(AuthenticationFailed)
    );
    assert_eq!(
        cipher.open(&mut out, &nonce, b"", b""),
        Err(AuthenticationFailed)
    );
}

#[test]
#[should_panic(expected = "invalid output length")]
fn open_rejects_wrong_output_length() {
    let cipher = Grain128Aead::new(&[0u8; KEY_SIZE]);
    let mut dst = [0u8; 4]; // ciphertext is tag-only, plaintext is empty
    let _ = cipher.open(&mut dst, &[0u8; NONCE_SIZE], &[0u8; TAG_SIZE], b"");
}

#[test]
fn randomized_roundtrip_including_one_mebibyte() {
    let mut rng = StdRng::seed_from_u64(0x6ea1_57ea);

    for trial in 0..24 {
        let pt_len = if trial == 0 {
            1 << 20
        } else {
            rng.gen_range(0..4096)
        };
        let ad_len = rng.gen_range(0..1024);

        let mut key = [0u8; KEY_SIZE];
        let mut nonce = [0u8; NONCE_SIZE];
        rng.fill_bytes(&mut key);
        rng.fill_bytes(&mut nonce);
        let mut plaintext = vec![0u8; pt_len];
        let mut aad = vec![0u8; ad_len];
        rng.fill_bytes(&mut plaintext);
        rng.fill_bytes(&mut aad);

        let cipher = Grain128Aead::new(&key);
        let mut buffer = plaintext.clone();
        let tag = cipher.encrypt_in_place(&nonce, &aad, &mut buffer);
        cipher
            .decrypt_in_place(&nonce, &aad, &mut buffer, &tag)
            .expect("roundtrip");
        assert_eq!(buffer, plaintext, "trial {trial}");
    }
}
