use std::collections::HashMap;
use std::fmt;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use chrono::{Duration, Utc};
use rand::rngs::OsRng;
use rand::RngCore;

use crate::common::{debug, ErrorKind, Result, Time};
use crate::core::Principal;

// Token byte length before base64 encoding.
const TOKEN_BYTES: usize = 32;

// Sessions expire at a fixed point after issuance regardless of activity.
const SESSION_TTL_HOURS: i64 = 8;

// Credential submitted by a client on login.
#[derive(Clone, PartialEq)]
pub(crate) struct Credential {
    pub(crate) username: String,
    pub(crate) password: String,
}

// Mask the password.
impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Credential")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

// An issued session. The table key is the token itself.
struct Session {
    username: String,
    expires_at: Time,
}

// Session authenticator. Owns the principal registry and the table of active
// sessions. Exclusively owned by the authenticator middleware, which runs on
// the single backend worker, so whole operations are serialized.
pub(crate) struct Authenticator {
    principals: Vec<Principal>,
    sessions: HashMap<String, Session>,
}

impl Authenticator {
    pub(crate) fn new(principals: Vec<Principal>) -> Self {
        Self {
            principals,
            sessions: HashMap::new(),
        }
    }

    // Verify the credential and issue a session token.
    //
    // Unknown user and wrong password both return Ok(None) so callers cannot
    // probe for registered usernames. Err is reserved for secure random
    // source failure, which is never recovered from.
    pub(crate) fn login(&mut self, credential: &Credential) -> Result<Option<String>> {
        self.login_at(Utc::now(), credential)
    }

    fn login_at(&mut self, now: Time, credential: &Credential) -> Result<Option<String>> {
        let principal = match self
            .principals
            .iter()
            .find(|principal| principal.username() == credential.username)
        {
            Some(principal) => principal,
            None => return Ok(None),
        };

        if !principal.verify_password(&credential.password) {
            return Ok(None);
        }

        let token = generate_token()?;
        let expires_at = now + Duration::hours(SESSION_TTL_HOURS);

        debug!(user = %credential.username, %expires_at, "Session issued");

        // Tokens are freshly generated, so this never overwrites.
        self.sessions.insert(
            token.clone(),
            Session {
                username: credential.username.clone(),
                expires_at,
            },
        );

        Ok(Some(token))
    }

    // Check whether the token identifies a live session.
    //
    // An expired session is removed when it is found here (lazy eviction);
    // there is no background sweep.
    pub(crate) fn validate(&mut self, token: &str) -> bool {
        self.validate_at(Utc::now(), token)
    }

    fn validate_at(&mut self, now: Time, token: &str) -> bool {
        match self.sessions.get(token) {
            Some(session) if now > session.expires_at => {
                debug!(user = %session.username, "Session expired, evicting");
                self.sessions.remove(token);
                false
            }
            Some(_) => true,
            None => false,
        }
    }

    #[cfg(test)]
    fn session_count(&self) -> usize {
        self.sessions.len()
    }
}

fn generate_token() -> Result<String> {
    let mut bytes = [0u8; TOKEN_BYTES];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|err| ErrorKind::Internal(format!("secure random source. {}", err)))?;

    Ok(URL_SAFE_NO_PAD.encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::UserEntry;

    fn authenticator(users: &[(&str, &str)]) -> Authenticator {
        let principals = users
            .iter()
            .map(|(username, password)| {
                Principal::from_entry(&UserEntry {
                    username: (*username).into(),
                    password: (*password).into(),
                })
                .unwrap()
            })
            .collect();

        Authenticator::new(principals)
    }

    fn credential(username: &str, password: &str) -> Credential {
        Credential {
            username: username.into(),
            password: password.into(),
        }
    }

    #[test]
    fn login_issues_valid_token() {
        let mut auth = authenticator(&[("kurier", "kurier")]);

        let token = auth.login(&credential("kurier", "kurier")).unwrap().unwrap();

        // 32 random bytes, url-safe base64 without padding.
        assert_eq!(token.len(), 43);
        assert!(token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
        assert!(auth.validate(&token));
        assert_eq!(auth.session_count(), 1);
    }

    #[test]
    fn wrong_password_issues_nothing() {
        let mut auth = authenticator(&[("kurier", "kurier")]);

        assert!(auth.login(&credential("kurier", "wrong")).unwrap().is_none());
        assert_eq!(auth.session_count(), 0);
    }

    #[test]
    fn unknown_user_indistinguishable_from_wrong_password() {
        let mut auth = authenticator(&[("kurier", "kurier")]);

        let unknown = auth.login(&credential("nobody", "kurier")).unwrap();
        let wrong = auth.login(&credential("kurier", "wrong")).unwrap();

        assert_eq!(unknown, wrong);
        assert_eq!(auth.session_count(), 0);
    }

    #[test]
    fn username_is_case_sensitive() {
        let mut auth = authenticator(&[("kurier", "kurier")]);

        assert!(auth.login(&credential("Kurier", "kurier")).unwrap().is_none());
    }

    #[test]
    fn never_issued_token_is_invalid() {
        let mut auth = authenticator(&[("kurier", "kurier")]);

        assert!(!auth.validate("garbage"));
        assert!(!auth.validate(""));
    }

    #[test]
    fn session_expires_after_ttl() {
        let mut auth = authenticator(&[("kurier", "kurier")]);

        let issued_at = Utc::now();
        let token = auth
            .login_at(issued_at, &credential("kurier", "kurier"))
            .unwrap()
            .unwrap();

        assert!(auth.validate_at(issued_at, &token));
        assert!(auth.validate_at(issued_at + Duration::hours(SESSION_TTL_HOURS) - Duration::seconds(1), &token));
        assert!(!auth.validate_at(issued_at + Duration::hours(SESSION_TTL_HOURS) + Duration::seconds(1), &token));
    }

    #[test]
    fn expiry_does_not_slide_on_validation() {
        let mut auth = authenticator(&[("kurier", "kurier")]);

        let issued_at = Utc::now();
        let token = auth
            .login_at(issued_at, &credential("kurier", "kurier"))
            .unwrap()
            .unwrap();

        // Touching the session half way through must not extend it.
        assert!(auth.validate_at(issued_at + Duration::hours(4), &token));
        assert!(!auth.validate_at(issued_at + Duration::hours(9), &token));
    }

    #[test]
    fn expired_session_is_evicted_on_validation() {
        let mut auth = authenticator(&[("kurier", "kurier")]);

        let issued_at = Utc::now();
        let token = auth
            .login_at(issued_at, &credential("kurier", "kurier"))
            .unwrap()
            .unwrap();
        assert_eq!(auth.session_count(), 1);

        let after_expiry = issued_at + Duration::hours(SESSION_TTL_HOURS) + Duration::seconds(1);

        assert!(!auth.validate_at(after_expiry, &token));
        assert_eq!(auth.session_count(), 0);

        // Evicted is terminal.
        assert!(!auth.validate_at(after_expiry, &token));
    }

    #[test]
    fn user_may_hold_multiple_sessions() {
        let mut auth = authenticator(&[("kurier", "kurier")]);

        let t1 = auth.login(&credential("kurier", "kurier")).unwrap().unwrap();
        let t2 = auth.login(&credential("kurier", "kurier")).unwrap().unwrap();

        assert_ne!(t1, t2);
        assert!(auth.validate(&t1));
        assert!(auth.validate(&t2));
        assert_eq!(auth.session_count(), 2);
    }
}
