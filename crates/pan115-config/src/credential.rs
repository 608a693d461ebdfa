//! Session cookie handling.
//!
//! A 115 web session is identified by three cookies, `UID`, `CID` and `SEID`
//! (plus an optional `KID`). Users paste them as a single header-style string:
//!
//! ```text
//! UID=1234_A1_1700000000; CID=abcdef; SEID=0123456789
//! ```

use std::fmt;

use crate::{ConfigError, Result};

/// A parsed 115 session credential.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    pub uid: String,
    pub cid: String,
    pub seid: String,
    pub kid: Option<String>,
}

impl Credential {
    /// Parse a cookie string. Unknown cookies are ignored; names match
    /// case-insensitively.
    pub fn from_cookie(raw: &str) -> Result<Self> {
        let mut uid = None;
        let mut cid = None;
        let mut seid = None;
        let mut kid = None;

        for pair in raw.split(';') {
            let Some((name, value)) = pair.split_once('=') else {
                continue;
            };
            let value = value.trim();
            if value.is_empty() {
                continue;
            }
            match name.trim().to_ascii_uppercase().as_str() {
                "UID" => uid = Some(value.to_string()),
                "CID" => cid = Some(value.to_string()),
                "SEID" => seid = Some(value.to_string()),
                "KID" => kid = Some(value.to_string()),
                _ => {}
            }
        }

        Ok(Self {
            uid: uid.ok_or(ConfigError::CookieMissingField("UID"))?,
            cid: cid.ok_or(ConfigError::CookieMissingField("CID"))?,
            seid: seid.ok_or(ConfigError::CookieMissingField("SEID"))?,
            kid,
        })
    }

    /// The `Cookie` header value.
    pub fn to_cookie(&self) -> String {
        let mut cookie = format!("UID={}; CID={}; SEID={}", self.uid, self.cid, self.seid);
        if let Some(kid) = &self.kid {
            cookie.push_str("; KID=");
            cookie.push_str(kid);
        }
        cookie
    }

    /// The numeric user id, the part of `UID` before the first `_`.
    pub fn user_id(&self) -> &str {
        self.uid.split('_').next().unwrap_or(&self.uid)
    }
}

// Keep session secrets out of logs and panic messages.
impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("uid", &self.user_id())
            .field("cid", &"***")
            .field("seid", &"***")
            .field("kid", &self.kid.as_ref().map(|_| "***"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cookie() {
        let cred = Credential::from_cookie("UID=1234_A1_1700000000; CID=abc; SEID=def").unwrap();
        assert_eq!(cred.uid, "1234_A1_1700000000");
        assert_eq!(cred.cid, "abc");
        assert_eq!(cred.seid, "def");
        assert!(cred.kid.is_none());
        assert_eq!(cred.user_id(), "1234");
    }

    #[test]
    fn test_parse_tolerates_spacing_case_and_extras() {
        let cred = Credential::from_cookie(" uid=1 ;cid=2;  seid=3; KID=4; acw_tc=x; ").unwrap();
        assert_eq!(cred.to_cookie(), "UID=1; CID=2; SEID=3; KID=4");
    }

    #[test]
    fn test_missing_field() {
        let err = Credential::from_cookie("UID=1; CID=2").unwrap_err();
        assert!(matches!(err, ConfigError::CookieMissingField("SEID")));

        let err = Credential::from_cookie("UID=; CID=2; SEID=3").unwrap_err();
        assert!(matches!(err, ConfigError::CookieMissingField("UID")));
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let cred = Credential::from_cookie("UID=1_A; CID=secret-cid; SEID=secret-seid").unwrap();
        let debug = format!("{cred:?}");
        assert!(!debug.contains("secret-cid"));
        assert!(!debug.contains("secret-seid"));
    }
}
