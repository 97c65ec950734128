//! Manual-owner allowlist
//!
//! Some rented spots belong to owners managed outside the system. The raw
//! `owner` string on a renter spot may be one of these four constants; the
//! billing export maps them to display labels. Centralized here so the
//! constants are declared exactly once.

use serde::{Deserialize, Serialize};

/// The four manually-managed spot owners
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ManualOwner {
    JoseFernandez,
    MartaSuarez,
    RaulAcosta,
    ConsorcioMitre,
}

impl ManualOwner {
    pub const ALL: [ManualOwner; 4] = [
        ManualOwner::JoseFernandez,
        ManualOwner::MartaSuarez,
        ManualOwner::RaulAcosta,
        ManualOwner::ConsorcioMitre,
    ];

    /// Raw constant stored in the `owner` column
    pub fn raw(&self) -> &'static str {
        match self {
            ManualOwner::JoseFernandez => "JOSE_FERNANDEZ",
            ManualOwner::MartaSuarez => "MARTA_SUAREZ",
            ManualOwner::RaulAcosta => "RAUL_ACOSTA",
            ManualOwner::ConsorcioMitre => "CONSORCIO_MITRE",
        }
    }

    /// Display label used by the billing export
    pub fn label(&self) -> &'static str {
        match self {
            ManualOwner::JoseFernandez => "José Fernández",
            ManualOwner::MartaSuarez => "Marta Suárez",
            ManualOwner::RaulAcosta => "Raúl Acosta",
            ManualOwner::ConsorcioMitre => "Consorcio Mitre",
        }
    }

    /// Resolve a raw `owner` string against the allowlist
    pub fn from_raw(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|o| o.raw() == raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_round_trips_through_allowlist() {
        for owner in ManualOwner::ALL {
            assert_eq!(ManualOwner::from_raw(owner.raw()), Some(owner));
        }
    }

    #[test]
    fn unknown_raw_is_none() {
        assert_eq!(ManualOwner::from_raw("PEDRO_GOMEZ"), None);
    }
}
