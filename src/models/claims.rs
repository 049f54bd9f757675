use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Claims carried by the session JWT the identity provider issues.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub user: SessionUser,
    pub exp: usize,
}

/// The authenticated identity handlers receive through request extensions.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SessionUser {
    pub id: Uuid,
    pub email: String,
}
