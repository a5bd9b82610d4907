use std::collections::BTreeSet;

use crate::jwt::Claims;

/// Prefix that turns a role into an authorization tag (`USER` -> `ROLE_USER`).
pub const AUTHORITY_PREFIX: &str = "ROLE_";

/// Identity established from a verified access token.
///
/// Lives for a single request and is never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedPrincipal {
    subject_id: String,
    roles: BTreeSet<String>,
}

impl AuthenticatedPrincipal {
    pub fn new<S, R>(subject_id: impl Into<String>, roles: R) -> Self
    where
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            subject_id: subject_id.into(),
            roles: roles.into_iter().map(Into::into).collect(),
        }
    }

    pub fn subject_id(&self) -> &str {
        &self.subject_id
    }

    pub fn roles(&self) -> &BTreeSet<String> {
        &self.roles
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.contains(role)
    }

    /// Roles rendered as authorization tags for the authorization layer.
    pub fn authorities(&self) -> Vec<String> {
        self.roles.iter().map(|role| to_authority(role)).collect()
    }

    pub fn has_authority(&self, authority: &str) -> bool {
        authority
            .strip_prefix(AUTHORITY_PREFIX)
            .map_or(false, |role| self.has_role(role))
    }
}

impl From<Claims> for AuthenticatedPrincipal {
    fn from(claims: Claims) -> Self {
        Self::new(claims.sub, claims.roles)
    }
}

/// Map a role to its authorization tag.
pub fn to_authority(role: &str) -> String {
    format!("{}{}", AUTHORITY_PREFIX, role)
}
