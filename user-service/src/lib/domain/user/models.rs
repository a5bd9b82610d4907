use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;

use crate::user::errors::DisplayNameError;
use crate::user::errors::EmailError;
use crate::user::errors::PasswordPolicyError;
use crate::user::errors::UserIdError;
use crate::user::errors::UserStatusError;

/// Role granted to every account.
pub const ROLE_USER: &str = "USER";

/// Role granted to administrators on top of [`ROLE_USER`].
pub const ROLE_ADMIN: &str = "ADMIN";

/// User aggregate entity.
///
/// Represents a registered account as held by the credential store.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub email: EmailAddress,
    pub password_hash: String,
    pub display_name: DisplayName,
    pub is_admin: bool,
    pub status: UserStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Roles encoded into this user's access tokens.
    pub fn roles(&self) -> Vec<String> {
        if self.is_admin {
            vec![ROLE_USER.to_string(), ROLE_ADMIN.to_string()]
        } else {
            vec![ROLE_USER.to_string()]
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == UserStatus::Active
    }
}

/// User fields before the store assigns an identity.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: EmailAddress,
    pub password_hash: String,
    pub display_name: DisplayName,
    pub is_admin: bool,
    pub status: UserStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NewUser {
    /// Attach the identity assigned by the store.
    pub fn with_id(self, id: UserId) -> User {
        User {
            id,
            email: self.email,
            password_hash: self.password_hash,
            display_name: self.display_name,
            is_admin: self.is_admin,
            status: self.status,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// User unique identifier type, assigned by the credential store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(pub i64);

impl UserId {
    /// Parse a user ID from string (e.g. a token subject).
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a positive integer
    pub fn from_string(s: &str) -> Result<Self, UserIdError> {
        match s.parse::<i64>() {
            Ok(id) if id > 0 => Ok(UserId(id)),
            Ok(id) => Err(UserIdError::InvalidFormat(format!("{} is not positive", id))),
            Err(e) => Err(UserIdError::InvalidFormat(e.to_string())),
        }
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Name shown for a user.
///
/// Between 2 and 20 characters and not blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayName(String);

impl DisplayName {
    const MIN_LENGTH: usize = 2;
    const MAX_LENGTH: usize = 20;

    /// Create a new validated display name.
    ///
    /// # Errors
    /// * `Blank` - Name is empty or whitespace only
    /// * `InvalidLength` - Name is shorter than 2 or longer than 20 characters
    pub fn new(name: String) -> Result<Self, DisplayNameError> {
        if name.trim().is_empty() {
            return Err(DisplayNameError::Blank);
        }

        let length = name.chars().count();
        if !(Self::MIN_LENGTH..=Self::MAX_LENGTH).contains(&length) {
            return Err(DisplayNameError::InvalidLength {
                min: Self::MIN_LENGTH,
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }

        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Plaintext password accepted at registration.
///
/// 8-20 characters drawn from letters, digits and `@$!%*#?&`, with at least
/// one of each kind. Never stored; only its hash is.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    const MIN_LENGTH: usize = 8;
    const MAX_LENGTH: usize = 20;
    const SPECIAL_CHARACTERS: &'static str = "@$!%*#?&";

    /// Create a password that satisfies the registration policy.
    ///
    /// # Errors
    /// * `Blank` - Password is empty or whitespace only
    /// * `InvalidLength` - Outside the 8-20 character range
    /// * `WeakComposition` - Missing a letter, digit or special character,
    ///   or contains a character outside the allowed set
    pub fn new(password: String) -> Result<Self, PasswordPolicyError> {
        if password.trim().is_empty() {
            return Err(PasswordPolicyError::Blank);
        }

        let length = password.chars().count();
        if !(Self::MIN_LENGTH..=Self::MAX_LENGTH).contains(&length) {
            return Err(PasswordPolicyError::InvalidLength {
                min: Self::MIN_LENGTH,
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }

        let is_special = |c: char| Self::SPECIAL_CHARACTERS.contains(c);
        let allowed = password
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || is_special(c));
        let has_letter = password.chars().any(|c| c.is_ascii_alphabetic());
        let has_digit = password.chars().any(|c| c.is_ascii_digit());
        let has_special = password.chars().any(is_special);

        if allowed && has_letter && has_digit && has_special {
            Ok(Self(password))
        } else {
            Err(PasswordPolicyError::WeakComposition)
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

/// Account status.
///
/// Stored as lowercase text; reading an unknown value is an error rather
/// than a fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserStatus {
    Active,
    Inactive,
}

impl UserStatus {
    /// Storage representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Active => "active",
            UserStatus::Inactive => "inactive",
        }
    }

    /// Representation exposed over the API.
    pub fn name(&self) -> &'static str {
        match self {
            UserStatus::Active => "ACTIVE",
            UserStatus::Inactive => "INACTIVE",
        }
    }
}

impl FromStr for UserStatus {
    type Err = UserStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "active" => Ok(UserStatus::Active),
            "inactive" => Ok(UserStatus::Inactive),
            _ => Err(UserStatusError::Unknown(s.to_string())),
        }
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Command to register a new user with validated fields
#[derive(Debug)]
pub struct SignupCommand {
    pub email: EmailAddress,
    pub password: Password,
    pub display_name: DisplayName,
}

impl SignupCommand {
    pub fn new(email: EmailAddress, password: Password, display_name: DisplayName) -> Self {
        Self {
            email,
            password,
            display_name,
        }
    }
}

/// Command to log in with email and password
#[derive(Debug)]
pub struct LoginCommand {
    pub email: EmailAddress,
    pub password: String,
}

impl LoginCommand {
    /// # Errors
    /// * `Blank` - Password is empty or whitespace only
    pub fn new(email: EmailAddress, password: String) -> Result<Self, PasswordPolicyError> {
        if password.trim().is_empty() {
            return Err(PasswordPolicyError::Blank);
        }
        Ok(Self { email, password })
    }
}

/// Outcome of a successful registration
#[derive(Debug, Clone)]
pub struct SignupOutcome {
    pub user: User,
    pub access_token: String,
}
