//! Roles carried in the `role` claim.
//!
//! On the wire a role is an authority string (`ROLE_USER`), and a token carries
//! them comma-joined. Inside the service only the enumerated `Role` is used.

use std::collections::BTreeSet;
use std::fmt;

pub const AUTHORITY_PREFIX: &str = "ROLE_";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Role {
    User,
    Admin,
}

pub type RoleSet = BTreeSet<Role>;

impl Role {
    /// Bare name as stored by the user directory (`USER`, `ADMIN`).
    pub fn name(self) -> &'static str {
        match self {
            Role::User => "USER",
            Role::Admin => "ADMIN",
        }
    }

    pub fn authority(self) -> String {
        format!("{AUTHORITY_PREFIX}{}", self.name())
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "USER" => Some(Role::User),
            "ADMIN" => Some(Role::Admin),
            _ => None,
        }
    }

    /// Accepts only the prefixed form.
    pub fn from_authority(authority: &str) -> Option<Self> {
        authority
            .strip_prefix(AUTHORITY_PREFIX)
            .and_then(Self::from_name)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{AUTHORITY_PREFIX}{}", self.name())
    }
}

/// Decode a comma-joined authority list.
///
/// Empty, unprefixed and unknown entries are dropped rather than rejected.
pub fn parse_authorities(raw: &str) -> RoleSet {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter_map(Role::from_authority)
        .collect()
}

/// Sorted and de-duplicated by construction of `RoleSet`.
pub fn join_authorities(roles: &RoleSet) -> String {
    roles
        .iter()
        .map(|r| r.authority())
        .collect::<Vec<_>>()
        .join(",")
}

/// Same as `parse_authorities` but for bare names (`USER,ADMIN`) coming from storage.
pub fn parse_names(raw: &str) -> RoleSet {
    raw.split(',')
        .map(str::trim)
        .filter_map(Role::from_name)
        .collect()
}
