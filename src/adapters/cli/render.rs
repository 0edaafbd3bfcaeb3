//! Plain-text rendering of view state for the terminal.

use chrono::{DateTime, NaiveDateTime, Utc};
use luminara_types::{AdminTokenStatus, User};

use crate::{
    application::use_cases::{dashboard::ClaimState, landing::CallToAction},
    domain::entities::availability::AvailabilityState,
};

/// Formats an API timestamp for display; unparseable values are shown as-is.
pub fn format_timestamp(raw: &str) -> String {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.with_timezone(&Utc).format("%Y-%m-%d %H:%M UTC").to_string();
    }
    match NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        Ok(dt) => dt.format("%Y-%m-%d %H:%M").to_string(),
        Err(_) => raw.to_string(),
    }
}

pub fn user(user: &User) -> String {
    let verified = if user.is_verified {
        "verified"
    } else {
        "unverified"
    };
    format!(
        "{} <{}> ({}, {}, joined {})",
        user.username,
        user.email,
        user.provider,
        verified,
        format_timestamp(&user.created_at)
    )
}

pub fn claim(claim: &ClaimState) -> String {
    match claim {
        ClaimState::NotLoaded => "Subdomain: unknown".to_string(),
        ClaimState::Absent => "Subdomain: none claimed yet".to_string(),
        ClaimState::Claimed(s) => format!(
            "Subdomain: {} (claimed {})",
            s.full_url,
            format_timestamp(&s.created_at)
        ),
    }
}

pub fn token_status(status: Option<&AdminTokenStatus>) -> String {
    match status {
        None => "Admin token: unavailable".to_string(),
        Some(AdminTokenStatus {
            has_token: true,
            created_at: Some(created),
        }) => format!("Admin token: active (created {})", format_timestamp(created)),
        Some(AdminTokenStatus { has_token: true, .. }) => "Admin token: active".to_string(),
        Some(_) => "Admin token: none".to_string(),
    }
}

pub fn availability(state: &AvailabilityState) -> String {
    match state {
        AvailabilityState::Unknown => {
            "Type at least 3 characters to check availability".to_string()
        }
        AvailabilityState::Checking { name } => format!("Checking {}...", name),
        AvailabilityState::Known { name, result } if result.available => {
            format!("{} is available", name)
        }
        AvailabilityState::Known { name, result } => format!(
            "{} is not available: {}",
            name,
            result.reason.as_deref().unwrap_or("already taken")
        ),
    }
}

pub fn calls_to_action(ctas: &[CallToAction]) -> String {
    ctas.iter()
        .map(|c| format!("{} ({})", c.label, c.target))
        .collect::<Vec<_>>()
        .join(" | ")
}
