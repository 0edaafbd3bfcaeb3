use validator::ValidateEmail;

/// Minimum password length accepted at registration.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Availability probes are only sent for names at least this long.
pub const MIN_SUBDOMAIN_CHECK_LEN: usize = 3;

/// Validates that the input looks like a valid email address
pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    !email.is_empty() && email.validate_email()
}

/// Outcome of each password rule, kept separate so a form can render a live checklist.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PasswordCheck {
    pub min_length: bool,
    pub has_uppercase: bool,
    pub has_lowercase: bool,
    pub has_digit: bool,
}

impl PasswordCheck {
    pub fn is_valid(&self) -> bool {
        self.min_length && self.has_uppercase && self.has_lowercase && self.has_digit
    }

    /// Messages for every rule that failed, in checklist order.
    pub fn errors(&self) -> Vec<&'static str> {
        let mut errors = Vec::new();
        if !self.min_length {
            errors.push("Password must be at least 8 characters long");
        }
        if !self.has_uppercase {
            errors.push("Password must contain at least one uppercase letter");
        }
        if !self.has_lowercase {
            errors.push("Password must contain at least one lowercase letter");
        }
        if !self.has_digit {
            errors.push("Password must contain at least one number");
        }
        errors
    }
}

/// Checks a password against the registration rules.
/// Rules:
/// - at least 8 characters
/// - at least one ASCII uppercase letter, one ASCII lowercase letter and one digit
pub fn validate_password(password: &str) -> PasswordCheck {
    PasswordCheck {
        min_length: password.chars().count() >= MIN_PASSWORD_LEN,
        has_uppercase: password.chars().any(|c| c.is_ascii_uppercase()),
        has_lowercase: password.chars().any(|c| c.is_ascii_lowercase()),
        has_digit: password.chars().any(|c| c.is_ascii_digit()),
    }
}

/// Validates a username.
/// Rules:
/// - 3-20 characters
/// - Only ASCII letters, numbers, underscores and hyphens
pub fn validate_username(username: &str) -> Result<(), &'static str> {
    let len = username.chars().count();
    if !(3..=20).contains(&len) {
        return Err("Username must be between 3 and 20 characters");
    }

    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err("Username can only contain letters, numbers, underscores, and hyphens");
    }

    Ok(())
}

/// Canonical form of a subdomain candidate: trimmed and lowercased.
pub fn normalize_subdomain(input: &str) -> String {
    input.trim().to_lowercase()
}

/// Whether a normalized candidate is long enough to be worth probing.
pub fn is_checkable_subdomain(normalized: &str) -> bool {
    normalized.chars().count() >= MIN_SUBDOMAIN_CHECK_LEN
}
