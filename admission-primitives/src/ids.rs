//! Request identifiers.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::Error;

/// Identifier the host pipeline assigns to one admission request.
///
/// Parsed leniently (surrounding whitespace, any letter case) and always
/// rendered in lower-case hyphenated form, so log lines match the host's.
/// The nil UUID is rejected.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RequestUid(Uuid);

impl RequestUid {
    /// Generates an identifier for a request the host did not tag.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RequestUid {
    fn default() -> Self {
        Self::random()
    }
}

impl Display for RequestUid {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0.hyphenated(), f)
    }
}

impl FromStr for RequestUid {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |source| Error::InvalidRequestUid {
            value: s.to_owned(),
            source,
        };
        let uuid = Uuid::try_parse(s.trim()).map_err(|err| invalid(Some(err)))?;
        if uuid.is_nil() {
            return Err(invalid(None));
        }
        Ok(Self(uuid))
    }
}

impl TryFrom<String> for RequestUid {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<RequestUid> for String {
    fn from(value: RequestUid) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_uid_is_normalised() {
        let uid: RequestUid = " 6F4B2A8E-5A0D-4C1E-9B2F-3D7C8E9A0B1C\n".parse().unwrap();
        assert_eq!(uid.to_string(), "6f4b2a8e-5a0d-4c1e-9b2f-3d7c8e9a0b1c");
    }

    #[test]
    fn malformed_uid_keeps_parse_error() {
        let err = "not-a-uid".parse::<RequestUid>().expect_err("should fail");
        assert!(matches!(
            err,
            Error::InvalidRequestUid { ref value, source: Some(_) } if value == "not-a-uid"
        ));
    }

    #[test]
    fn nil_uid_is_rejected() {
        let err = Uuid::nil()
            .to_string()
            .parse::<RequestUid>()
            .expect_err("nil");
        assert!(matches!(err, Error::InvalidRequestUid { source: None, .. }));
    }

    #[test]
    fn serde_validates_uid() {
        let uid: RequestUid =
            serde_json::from_str(r#""6f4b2a8e-5a0d-4c1e-9b2f-3d7c8e9a0b1c""#).unwrap();
        assert_eq!(
            serde_json::to_string(&uid).unwrap(),
            r#""6f4b2a8e-5a0d-4c1e-9b2f-3d7c8e9a0b1c""#
        );
        assert!(serde_json::from_str::<RequestUid>(r#""00000000-0000-0000-0000-000000000000""#).is_err());
    }
}
