/*
[INPUT]:  Token returned by the login endpoint
[OUTPUT]: Bearer credential scoped to one wallet and one cycle
[POS]:    Auth layer - session value
[UPDATE]: When session metadata changes
*/

use std::fmt;

/// Bearer token for one wallet, valid for the rest of the current cycle.
///
/// Sessions are never cached; each pass authenticates again.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    token: String,
    address: String,
}

impl Session {
    pub fn new(token: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            address: address.into(),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn address(&self) -> &str {
        &self.address
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &"<redacted>")
            .field("address", &self.address)
            .finish()
    }
}
