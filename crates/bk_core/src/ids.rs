//! crates/bk_core/src/ids.rs
//! Product ids and the ranking artifact id. ASCII-only, strict shapes; no I/O.

use core::fmt;
use core::str::FromStr;

use crate::errors::CoreError;

const HEX64_LEN: usize = 64;
const TOKEN_MAX_LEN: usize = 64;

/// Token for ProductId: ^[A-Za-z0-9_.:-]{1,64}$ (ASCII only)
#[inline]
pub fn is_valid_token(s: &str) -> bool {
    let bs = s.as_bytes();
    if bs.is_empty() || bs.len() > TOKEN_MAX_LEN {
        return false;
    }
    bs.iter().all(|&b| {
        b.is_ascii_alphanumeric() || b == b'_' || b == b'.' || b == b':' || b == b'-'
    })
}

/// Lowercase hex, exactly 64 chars.
#[inline]
pub fn is_valid_sha256(s: &str) -> bool {
    s.len() == HEX64_LEN && s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}

macro_rules! validated_string_newtype {
    ($(#[$m:meta])* $name:ident, $check:expr, $err:expr, $expecting:literal) => {
        $(#[$m])*
        #[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
        pub struct $name(String);

        impl $name {
            #[inline] pub fn as_str(&self) -> &str { &self.0 }
        }

        impl fmt::Display for $name {
            #[inline]
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
        }

        impl FromStr for $name {
            type Err = CoreError;
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                if ($check)(s) { Ok(Self(s.to_string())) } else { Err($err) }
            }
        }

        impl TryFrom<&str> for $name {
            type Error = CoreError;
            #[inline]
            fn try_from(s: &str) -> Result<Self, Self::Error> { s.parse() }
        }

        impl AsRef<str> for $name {
            #[inline]
            fn as_ref(&self) -> &str { &self.0 }
        }

        #[cfg(feature = "serde")]
        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
                s.serialize_str(&self.0)
            }
        }

        #[cfg(feature = "serde")]
        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
                use serde::de::{Error as _, Unexpected};
                let s = String::deserialize(d)?;
                if ($check)(s.as_str()) {
                    Ok(Self(s))
                } else {
                    Err(D::Error::invalid_value(Unexpected::Str(&s), &$expecting))
                }
            }
        }
    };
}

validated_string_newtype!(
    /// Stable product identifier (e.g. `kue-lapis`).
    ProductId,
    is_valid_token,
    CoreError::InvalidId,
    "token [A-Za-z0-9_.:-], len 1..=64"
);

validated_string_newtype!(
    /// "RANK:" + 64-hex (lowercase), digest of a canonical ranking artifact.
    RankingId,
    |s: &str| s.strip_prefix("RANK:").map(is_valid_sha256).unwrap_or(false),
    CoreError::InvalidHex,
    "RANK:<64 lowercase hex>"
);

impl RankingId {
    /// Build from a bare 64-hex digest.
    pub fn from_digest(hex64: &str) -> Result<Self, CoreError> {
        if is_valid_sha256(hex64) {
            Ok(Self(format!("RANK:{hex64}")))
        } else {
            Err(CoreError::InvalidHex)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_id_token_rules() {
        assert!("kue-lapis".parse::<ProductId>().is_ok());
        assert!("seed:bolu_pandan.v2".parse::<ProductId>().is_ok());
        assert_eq!("".parse::<ProductId>(), Err(CoreError::InvalidId));
        assert_eq!("kue lapis".parse::<ProductId>(), Err(CoreError::InvalidId));
        assert!("x".repeat(65).parse::<ProductId>().is_err());
    }

    #[test]
    fn ranking_id_shape() {
        let hex = "a".repeat(64);
        let id = RankingId::from_digest(&hex).unwrap();
        assert_eq!(id.as_str(), format!("RANK:{hex}"));
        assert!(id.as_str().parse::<RankingId>().is_ok());
        assert!(RankingId::from_digest("ABC").is_err());
        assert!(format!("RES:{hex}").parse::<RankingId>().is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn product_id_deserialize_validates() {
        let ok: ProductId = serde_json::from_str("\"brownies-kukus\"").unwrap();
        assert_eq!(ok.as_str(), "brownies-kukus");
        assert!(serde_json::from_str::<ProductId>("\"no spaces\"").is_err());
    }
}
