//! Authenticated session state and role handling.
//!
//! The session is built once at login and read-only afterwards; panels
//! consult it for gating but never mutate it. The JWT payload is decoded
//! only to recover the username and role claims; signature verification
//! stays on the server.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::Deserialize;

use crate::error::{AppError, Result};

/// Staff role tiers. Rank orders seniority: lower rank is more senior.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Role {
    Admin,
    CLevel,
    Hr,
    HeadBar,
    Barista,
    Trainee,
    Probation,
    /// Role string the client does not recognize. Ranked most junior.
    Other(String),
}

/// Every known role, in rank order.
pub const ALL_ROLES: [Role; 7] = [
    Role::Admin,
    Role::CLevel,
    Role::Hr,
    Role::HeadBar,
    Role::Barista,
    Role::Trainee,
    Role::Probation,
];

impl Role {
    /// Seniority rank. Lower is more senior.
    pub fn rank(&self) -> u8 {
        match self {
            Role::Admin => 0,
            Role::CLevel => 1,
            Role::Hr => 2,
            Role::HeadBar => 3,
            Role::Barista => 4,
            Role::Trainee => 5,
            Role::Probation => 6,
            Role::Other(_) => u8::MAX,
        }
    }

    /// Parse the role string the API uses.
    pub fn parse(s: &str) -> Role {
        match s.trim() {
            "Admin" => Role::Admin,
            "CLEVEL" => Role::CLevel,
            "HR" => Role::Hr,
            "Head Bar" => Role::HeadBar,
            "Barista" => Role::Barista,
            "Trainee" => Role::Trainee,
            "Probation" => Role::Probation,
            other => Role::Other(other.to_string()),
        }
    }

    /// The string form the API expects back.
    pub fn as_str(&self) -> &str {
        match self {
            Role::Admin => "Admin",
            Role::CLevel => "CLEVEL",
            Role::Hr => "HR",
            Role::HeadBar => "Head Bar",
            Role::Barista => "Barista",
            Role::Trainee => "Trainee",
            Role::Probation => "Probation",
            Role::Other(s) => s,
        }
    }

    /// Whether this role approves leave/overtime and administers accounts.
    pub fn is_management(&self) -> bool {
        matches!(self, Role::Admin | Role::CLevel | Role::Hr | Role::HeadBar)
    }

    /// Whether this role takes assessments.
    pub fn takes_assessments(&self) -> bool {
        matches!(self, Role::Barista | Role::Trainee | Role::Probation)
    }

    /// Whether this role's account is tied to an outlet. Admin and
    /// C-level accounts are not.
    pub fn requires_outlet(&self) -> bool {
        matches!(
            self,
            Role::HeadBar | Role::Barista | Role::Trainee | Role::Probation
        )
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Roles offered when editing an account that currently holds `current`.
///
/// Same-or-junior roles per rank, with management roles always offered.
/// Head Bar is special-cased to a fixed list that excludes the trial
/// tiers.
pub fn selectable_roles(current: &Role) -> Vec<Role> {
    if matches!(current, Role::HeadBar) {
        return vec![Role::HeadBar, Role::Barista, Role::CLevel, Role::Hr, Role::Admin];
    }

    let mut roles: Vec<Role> = ALL_ROLES
        .iter()
        .filter(|r| r.rank() >= current.rank())
        .cloned()
        .collect();

    for mgmt in [Role::Admin, Role::CLevel, Role::Hr] {
        if !roles.contains(&mgmt) {
            roles.push(mgmt);
        }
    }

    roles
}

/// JWT claims the client cares about.
#[derive(Debug, Deserialize)]
struct Claims {
    sub: String,
    #[serde(default)]
    roles: serde_json::Value,
}

/// Authenticated session, constructed at login.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub username: String,
    pub role: Role,
}

impl Session {
    /// Build a session from a bearer token by decoding its payload
    /// segment.
    pub fn from_token(token: &str) -> Result<Session> {
        let claims = decode_claims(token)?;
        let role_str = match &claims.roles {
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Array(arr) => arr
                .iter()
                .filter_map(|v| v.as_str())
                .next()
                .unwrap_or_default()
                .to_string(),
            _ => String::new(),
        };

        Ok(Session {
            token: token.to_string(),
            username: claims.sub,
            role: Role::parse(&role_str),
        })
    }
}

/// Decode the middle segment of a JWT without verifying the signature.
fn decode_claims(token: &str) -> Result<Claims> {
    let payload = token
        .split('.')
        .nth(1)
        .ok_or_else(|| AppError::parse("Malformed token: missing payload segment"))?;

    let bytes = URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|e| AppError::parse(format!("Malformed token payload: {e}")))?;

    serde_json::from_slice(&bytes).map_err(|e| AppError::parse(format!("Invalid token claims: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_token(claims: &str) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(claims.as_bytes());
        format!("{header}.{payload}.sig")
    }

    #[test]
    fn test_session_from_token_with_role_array() {
        let token = make_token(r#"{"sub":"dinda","roles":["Head Bar"]}"#);
        let session = Session::from_token(&token).unwrap();
        assert_eq!(session.username, "dinda");
        assert_eq!(session.role, Role::HeadBar);
    }

    #[test]
    fn test_session_from_token_with_role_string() {
        let token = make_token(r#"{"sub":"agus","roles":"Barista"}"#);
        let session = Session::from_token(&token).unwrap();
        assert_eq!(session.role, Role::Barista);
    }

    #[test]
    fn test_malformed_token_rejected() {
        assert!(Session::from_token("not-a-jwt").is_err());
        assert!(Session::from_token("a.!!!.c").is_err());
    }

    #[test]
    fn test_unknown_role_preserved() {
        let role = Role::parse("Supervisor");
        assert_eq!(role, Role::Other("Supervisor".to_string()));
        assert_eq!(role.rank(), u8::MAX);
        assert_eq!(role.as_str(), "Supervisor");
    }

    #[test]
    fn test_head_bar_selectable_roles_fixed_list() {
        let roles = selectable_roles(&Role::HeadBar);
        assert_eq!(
            roles,
            vec![Role::HeadBar, Role::Barista, Role::CLevel, Role::Hr, Role::Admin]
        );
    }

    #[test]
    fn test_admin_sees_all_roles() {
        let roles = selectable_roles(&Role::Admin);
        assert_eq!(roles.len(), ALL_ROLES.len());
    }

    #[test]
    fn test_barista_sees_juniors_plus_management() {
        let roles = selectable_roles(&Role::Barista);
        assert!(roles.contains(&Role::Barista));
        assert!(roles.contains(&Role::Trainee));
        assert!(roles.contains(&Role::Probation));
        assert!(roles.contains(&Role::Admin));
        assert!(roles.contains(&Role::CLevel));
        assert!(roles.contains(&Role::Hr));
        assert!(!roles.contains(&Role::HeadBar));
    }
}
