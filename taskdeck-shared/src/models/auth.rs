use serde::{Deserialize, Serialize};

use super::{User, UserRole};

/// Body of `POST /auth/signin`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

/// Body of `POST /auth/signup`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SignUpRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: UserRole,
}

/// Successful response of both auth endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn sign_up_request_serializes_role() {
        let request = SignUpRequest {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            password: "secret1".into(),
            role: UserRole::User,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({
                "name": "Ada",
                "email": "ada@example.com",
                "password": "secret1",
                "role": "user"
            })
        );
    }

    #[test]
    fn auth_response_parses_token_and_user() {
        let response: AuthResponse = serde_json::from_value(json!({
            "token": "jwt.abc",
            "user": { "_id": "1", "name": "A", "email": "a@b.com", "role": "user" }
        }))
        .unwrap();
        assert_eq!(response.token, "jwt.abc");
        assert_eq!(response.user.email, "a@b.com");
    }
}
