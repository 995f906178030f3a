//! Session token issuance and the bearer-token guard for protected routes.
//!
//! Tokens are self-contained signed JWTs; the server keeps no session
//! state, so revocation is only by expiry and logout is client-side only.

mod middleware;
mod token;

pub use middleware::{auth_guard, AuthContext};
pub use token::{decode_token, encode_token, Claims, DEFAULT_TOKEN_DURATION};
