use luminara_types::SubdomainAvailability;

/// Result of the most recent availability probe, keyed by the name probed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AvailabilityState {
    /// No probe for the current input (empty, too short, or not yet run).
    #[default]
    Unknown,
    Checking {
        name: String,
    },
    Known {
        name: String,
        result: SubdomainAvailability,
    },
}

impl AvailabilityState {
    /// Whether the last probe was for exactly `name` and reported it free.
    pub fn is_available_for(&self, name: &str) -> bool {
        match self {
            AvailabilityState::Known { name: probed, result } => {
                result.available && probed == name
            }
            _ => false,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            AvailabilityState::Unknown => None,
            AvailabilityState::Checking { name } | AvailabilityState::Known { name, .. } => {
                Some(name)
            }
        }
    }
}
