//! Token pair issuance shared by sign up, sign in and refresh.

use kernel::id::UserId;
use platform::token::TokenService;

use crate::error::UserResult;

/// Freshly minted access + refresh tokens for one user
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

pub fn issue_token_pair(tokens: &TokenService, user_id: &UserId) -> UserResult<TokenPair> {
    Ok(TokenPair {
        access_token: tokens.create_access_token(*user_id.as_uuid())?,
        refresh_token: tokens.create_refresh_token(*user_id.as_uuid())?,
    })
}
