// SPDX-FileCopyrightText: 2026 icalq contributors
//
// SPDX-License-Identifier: Apache-2.0

//! ATTENDEE line decoding.

use strum::{AsRefStr, Display, EnumString};

use crate::extract::extract;

/// Attendee role (RFC 5545 `ROLE` parameter).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, AsRefStr)]
pub enum Role {
    /// Meeting chair.
    #[strum(serialize = "CHAIR")]
    Chair,
    /// Participation is required.
    #[strum(serialize = "REQ-PARTICIPANT")]
    ReqParticipant,
    /// Participation is optional.
    #[strum(serialize = "OPT-PARTICIPANT")]
    OptParticipant,
    /// Listed for information only.
    #[strum(serialize = "NON-PARTICIPANT")]
    NonParticipant,
}

/// Attendee participation status (`PARTSTAT` parameter).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, AsRefStr)]
pub enum PartStat {
    /// Tentatively accepted.
    #[strum(serialize = "TENTATIVE")]
    Tentative,
    /// Accepted.
    #[strum(serialize = "ACCEPTED")]
    Accepted,
    /// No answer yet.
    #[strum(serialize = "NEEDS-ACTION")]
    NeedsAction,
    /// Declined.
    #[strum(serialize = "DECLINED")]
    Declined,
    /// Delegated to someone else.
    #[strum(serialize = "DELEGATED")]
    Delegated,
    /// Completed (VTODO usage, seen in the wild on events too).
    #[strum(serialize = "COMPLETED")]
    Completed,
    /// In process (VTODO usage).
    #[strum(serialize = "IN-PROCESS")]
    InProcess,
}

/// One decoded ATTENDEE property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attendee {
    /// The address part after the parameter list, e.g. `mailto:ann@example.com`.
    pub uri: String,
    /// The `CN` parameter, possibly empty.
    pub common_name: String,
    /// The `ROLE` parameter.
    pub role: Role,
    /// The `PARTSTAT` parameter.
    pub status: PartStat,
}

impl Attendee {
    /// Decode the remainder of an `ATTENDEE;` line: parameters, `:`, address.
    ///
    /// Returns `None` when the line has no address separator or when the
    /// role or participation status is not a known value. A malformed
    /// attendee is dropped; it never fails the surrounding event.
    pub fn parse(line: &str) -> Option<Self> {
        let (params, address) = line.split_once(':')?;

        let role = extract(params, "ROLE=", ";").unwrap_or_default();
        let status = extract(params, "PARTSTAT=", ";").unwrap_or_default();
        let common_name = extract(params, "CN=", ";").unwrap_or_default();

        let Ok(role) = role.parse() else {
            tracing::warn!(%role, "unrecognized attendee role, dropping attendee");
            return None;
        };
        let Ok(status) = status.parse() else {
            tracing::warn!(%status, "unrecognized participation status, dropping attendee");
            return None;
        };

        Some(Attendee { uri: address.to_string(), common_name, role, status })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_full_attendee_line() {
        let attendee = Attendee::parse(
            "ROLE=REQ-PARTICIPANT;PARTSTAT=ACCEPTED;CN=Ann Example:mailto:ann@example.com",
        )
        .unwrap();
        assert_eq!(attendee.role, Role::ReqParticipant);
        assert_eq!(attendee.status, PartStat::Accepted);
        assert_eq!(attendee.common_name, "Ann Example");
        assert_eq!(attendee.uri, "mailto:ann@example.com");
    }

    #[test]
    fn parameter_order_does_not_matter() {
        let attendee =
            Attendee::parse("CN=Bob;PARTSTAT=DECLINED;ROLE=CHAIR:mailto:bob@example.com").unwrap();
        assert_eq!(attendee.role, Role::Chair);
        assert_eq!(attendee.status, PartStat::Declined);
    }

    #[test]
    fn unknown_role_drops_the_attendee() {
        assert!(Attendee::parse("ROLE=OVERLORD;PARTSTAT=ACCEPTED;CN=X:mailto:x@example.com").is_none());
    }

    #[test]
    fn missing_partstat_drops_the_attendee() {
        assert!(Attendee::parse("ROLE=CHAIR;CN=X:mailto:x@example.com").is_none());
    }

    #[test]
    fn missing_address_separator_drops_the_attendee() {
        assert!(Attendee::parse("ROLE=CHAIR;PARTSTAT=ACCEPTED;CN=X").is_none());
    }

    #[test]
    fn equality_covers_all_four_fields() {
        let line = "ROLE=CHAIR;PARTSTAT=ACCEPTED;CN=X:mailto:x@example.com";
        assert_eq!(Attendee::parse(line), Attendee::parse(line));
        let other = "ROLE=CHAIR;PARTSTAT=TENTATIVE;CN=X:mailto:x@example.com";
        assert_ne!(Attendee::parse(line), Attendee::parse(other));
    }
}
