/// Authentication
///
/// Session identity for the API: Argon2id password hashing, HS256
/// JWTs (24h access / 30d refresh), and an Axum middleware that turns
/// a Bearer token into an `AuthContext { user_id }` request extension.

pub mod jwt;
pub mod middleware;
pub mod password;
