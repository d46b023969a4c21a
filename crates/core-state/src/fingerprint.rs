//! Content fingerprinting.
//!
//! SHA-256 over the UTF-8 bytes of the text. Digests are only ever compared
//! for equality; the hex form exists for logs and diagnostics.

use std::fmt;
use std::sync::LazyLock;

use sha2::{Digest as _, Sha256};

pub const DIGEST_LEN: usize = 32;

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Digest([u8; DIGEST_LEN]);

impl Digest {
    pub fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// First eight hex digits; enough to tell digests apart in a log line.
    pub fn short(&self) -> String {
        hex::encode(&self.0[..4])
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({})", self.short())
    }
}

pub fn fingerprint(text: &str) -> Digest {
    let out = Sha256::digest(text.as_bytes());
    Digest(out.into())
}

static EMPTY: LazyLock<Digest> = LazyLock::new(|| fingerprint(""));

/// Fingerprint of the empty string, the initial value for a fresh session.
pub fn empty_fingerprint() -> Digest {
    *EMPTY
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn empty_string_digest_is_well_known() {
        assert_eq!(
            empty_fingerprint().to_hex(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn distinct_text_distinct_digest() {
        assert_ne!(fingerprint("x=1"), fingerprint("x=2"));
        assert_ne!(fingerprint(""), fingerprint(" "));
    }

    #[test]
    fn display_and_debug_forms() {
        let d = fingerprint("abc");
        assert_eq!(d.to_string().len(), DIGEST_LEN * 2);
        assert_eq!(format!("{d:?}"), format!("Digest({})", &d.to_string()[..8]));
    }

    proptest! {
        #[test]
        fn deterministic(text in ".*") {
            prop_assert_eq!(fingerprint(&text), fingerprint(&text.clone()));
        }
    }
}
