//! Domain data structures for jurisdictions, addresses, schedule codes, and pickup events.

use std::fmt;

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// Registry key identifying a municipality by its `(state, city)` pair.
pub struct JurisdictionId {
    /// Two-letter state abbreviation, e.g. `WI`.
    pub state: String,
    /// City name as it appears on the address, e.g. `Madison`.
    pub city: String,
}

impl JurisdictionId {
    /// Construct a new jurisdiction key.
    #[must_use]
    pub fn new<S: Into<String>, C: Into<String>>(state: S, city: C) -> Self {
        Self {
            state: state.into(),
            city: city.into(),
        }
    }
}

impl fmt::Display for JurisdictionId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}, {}", self.city, self.state)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Metadata describing a jurisdiction and its human-friendly name.
pub struct JurisdictionMeta {
    /// Unique identifier.
    pub id: JurisdictionId,
    /// Localized display name.
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// A street address owned by the caller and borrowed by the core for one lookup.
///
/// Field length limits are jurisdiction-specific and enforced by the provider
/// that receives the address, not here.
pub struct Address {
    /// House number, e.g. `1210`.
    pub street_number: String,
    /// Optional compass prefix, e.g. `N` in "1210 N Sherman Ave".
    pub street_direction: Option<StreetDirection>,
    /// Street name without number, direction, or type.
    pub street_name: String,
    /// Optional standardized street-type abbreviation.
    pub street_type: Option<StreetType>,
    /// Optional apartment or suite number.
    pub unit_number: Option<String>,
    /// City the address belongs to.
    pub city: String,
    /// Two-letter state abbreviation.
    pub state: String,
}

impl Address {
    /// Jurisdiction key derived from the address's city and state.
    #[must_use]
    pub fn jurisdiction(&self) -> JurisdictionId {
        JurisdictionId::new(self.state.clone(), self.city.clone())
    }

    /// Single-line street rendering, e.g. `1210 N Sherman Ave #2`.
    #[must_use]
    pub fn street_line(&self) -> String {
        let mut line = self.street_number.clone();
        if let Some(direction) = self.street_direction {
            line.push(' ');
            line.push_str(direction.as_str());
        }
        line.push(' ');
        line.push_str(&self.street_name);
        if let Some(street_type) = self.street_type {
            line.push(' ');
            line.push_str(street_type.as_str());
        }
        if let Some(unit) = &self.unit_number {
            line.push_str(" #");
            line.push_str(unit);
        }
        line
    }
}

impl fmt::Display for Address {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "{}, {}, {}",
            self.street_line(),
            self.city,
            self.state
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// Compass prefix of a street address.
pub enum StreetDirection {
    /// North.
    #[serde(rename = "N")]
    North,
    /// South.
    #[serde(rename = "S")]
    South,
    /// East.
    #[serde(rename = "E")]
    East,
    /// West.
    #[serde(rename = "W")]
    West,
    /// Northeast.
    #[serde(rename = "NE")]
    Northeast,
    /// Northwest.
    #[serde(rename = "NW")]
    Northwest,
    /// Southeast.
    #[serde(rename = "SE")]
    Southeast,
    /// Southwest.
    #[serde(rename = "SW")]
    Southwest,
}

impl StreetDirection {
    /// Every direction, in wire order.
    pub const ALL: [Self; 8] = [
        Self::North,
        Self::South,
        Self::East,
        Self::West,
        Self::Northeast,
        Self::Northwest,
        Self::Southeast,
        Self::Southwest,
    ];

    /// Postal abbreviation used on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::North => "N",
            Self::South => "S",
            Self::East => "E",
            Self::West => "W",
            Self::Northeast => "NE",
            Self::Northwest => "NW",
            Self::Southeast => "SE",
            Self::Southwest => "SW",
        }
    }

    /// Parse an abbreviation, ignoring case.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|direction| direction.as_str().eq_ignore_ascii_case(text))
    }
}

impl fmt::Display for StreetDirection {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// Standardized street-type abbreviations accepted by the supported lookup services.
#[allow(missing_docs, reason = "variant names are the abbreviations themselves")]
pub enum StreetType {
    Aly,
    Ave,
    Blvd,
    Bnd,
    Cir,
    Cres,
    Ct,
    Dr,
    Gln,
    Grn,
    Hts,
    Hwy,
    Ln,
    Loop,
    Mall,
    Pass,
    Path,
    Pkwy,
    Pl,
    Plz,
    Ramp,
    Rd,
    Rdg,
    Row,
    #[serde(rename = "RR")]
    Rr,
    Run,
    Spur,
    St,
    Sq,
    Ter,
    Trce,
    Trl,
    Vw,
    Walk,
    Way,
    Xing,
}

impl StreetType {
    /// Every street type, in wire order.
    pub const ALL: [Self; 36] = [
        Self::Aly,
        Self::Ave,
        Self::Blvd,
        Self::Bnd,
        Self::Cir,
        Self::Cres,
        Self::Ct,
        Self::Dr,
        Self::Gln,
        Self::Grn,
        Self::Hts,
        Self::Hwy,
        Self::Ln,
        Self::Loop,
        Self::Mall,
        Self::Pass,
        Self::Path,
        Self::Pkwy,
        Self::Pl,
        Self::Plz,
        Self::Ramp,
        Self::Rd,
        Self::Rdg,
        Self::Row,
        Self::Rr,
        Self::Run,
        Self::Spur,
        Self::St,
        Self::Sq,
        Self::Ter,
        Self::Trce,
        Self::Trl,
        Self::Vw,
        Self::Walk,
        Self::Way,
        Self::Xing,
    ];

    /// Postal abbreviation used on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Aly => "Aly",
            Self::Ave => "Ave",
            Self::Blvd => "Blvd",
            Self::Bnd => "Bnd",
            Self::Cir => "Cir",
            Self::Cres => "Cres",
            Self::Ct => "Ct",
            Self::Dr => "Dr",
            Self::Gln => "Gln",
            Self::Grn => "Grn",
            Self::Hts => "Hts",
            Self::Hwy => "Hwy",
            Self::Ln => "Ln",
            Self::Loop => "Loop",
            Self::Mall => "Mall",
            Self::Pass => "Pass",
            Self::Path => "Path",
            Self::Pkwy => "Pkwy",
            Self::Pl => "Pl",
            Self::Plz => "Plz",
            Self::Ramp => "Ramp",
            Self::Rd => "Rd",
            Self::Rdg => "Rdg",
            Self::Row => "Row",
            Self::Rr => "RR",
            Self::Run => "Run",
            Self::Spur => "Spur",
            Self::St => "St",
            Self::Sq => "Sq",
            Self::Ter => "Ter",
            Self::Trce => "Trce",
            Self::Trl => "Trl",
            Self::Vw => "Vw",
            Self::Walk => "Walk",
            Self::Way => "Way",
            Self::Xing => "Xing",
        }
    }

    /// Parse an abbreviation, ignoring case.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|street_type| street_type.as_str().eq_ignore_ascii_case(text))
    }
}

impl fmt::Display for StreetType {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Biweekly rotation letter distinguishing which parity of a weekday includes recycling.
pub enum Rotation {
    /// Recycling on even-numbered weeks.
    A,
    /// Recycling on odd-numbered weeks.
    B,
    /// Thursday-only alias of [`Rotation::A`].
    C,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// Opaque identifier of a recurring pickup route, as published by the lookup service.
///
/// The wire spelling is authoritative. Every code is lowercase except `ThuC`,
/// which the city publishes in mixed case; the closed enumeration keeps that
/// inconsistency from leaking into an "unknown code" bucket.
pub enum ScheduleCode {
    /// Monday, rotation A.
    #[serde(rename = "monA")]
    MonA,
    /// Monday, rotation B.
    #[serde(rename = "monB")]
    MonB,
    /// Tuesday, rotation A.
    #[serde(rename = "tueA")]
    TueA,
    /// Tuesday, rotation B.
    #[serde(rename = "tueB")]
    TueB,
    /// Wednesday, rotation A.
    #[serde(rename = "wedA")]
    WedA,
    /// Wednesday, rotation B.
    #[serde(rename = "wedB")]
    WedB,
    /// Thursday, rotation A.
    #[serde(rename = "thuA")]
    ThuA,
    /// Thursday, rotation B.
    #[serde(rename = "thuB")]
    ThuB,
    /// Thursday, rotation C. Mixed case on the wire; equivalent to rotation A.
    #[serde(rename = "ThuC")]
    ThuC,
    /// Friday, rotation A.
    #[serde(rename = "friA")]
    FriA,
    /// Friday, rotation B.
    #[serde(rename = "friB")]
    FriB,
}

impl ScheduleCode {
    /// Every known code, in wire order.
    pub const ALL: [Self; 11] = [
        Self::MonA,
        Self::MonB,
        Self::TueA,
        Self::TueB,
        Self::WedA,
        Self::WedB,
        Self::ThuA,
        Self::ThuB,
        Self::ThuC,
        Self::FriA,
        Self::FriB,
    ];

    /// Canonical wire spelling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MonA => "monA",
            Self::MonB => "monB",
            Self::TueA => "tueA",
            Self::TueB => "tueB",
            Self::WedA => "wedA",
            Self::WedB => "wedB",
            Self::ThuA => "thuA",
            Self::ThuB => "thuB",
            Self::ThuC => "ThuC",
            Self::FriA => "friA",
            Self::FriB => "friB",
        }
    }

    /// Weekday the route is collected on.
    #[must_use]
    pub const fn weekday(self) -> Weekday {
        match self {
            Self::MonA | Self::MonB => Weekday::Mon,
            Self::TueA | Self::TueB => Weekday::Tue,
            Self::WedA | Self::WedB => Weekday::Wed,
            Self::ThuA | Self::ThuB | Self::ThuC => Weekday::Thu,
            Self::FriA | Self::FriB => Weekday::Fri,
        }
    }

    /// Rotation letter of the route.
    #[must_use]
    pub const fn rotation(self) -> Rotation {
        match self {
            Self::MonA | Self::TueA | Self::WedA | Self::ThuA | Self::FriA => Rotation::A,
            Self::MonB | Self::TueB | Self::WedB | Self::ThuB | Self::FriB => Rotation::B,
            Self::ThuC => Rotation::C,
        }
    }

    /// Exact, case-sensitive match against the closed set.
    ///
    /// This is the wire contract: the casing returned by the lookup service is
    /// authoritative, so `thuC` does not match [`ScheduleCode::ThuC`].
    #[must_use]
    pub fn from_wire(stem: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|code| code.as_str() == stem)
    }

    /// Case-insensitive parse that canonicalizes the spelling.
    ///
    /// For validated construction away from the wire, e.g. codes typed by a
    /// user or stored in a config file.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|code| code.as_str().eq_ignore_ascii_case(text))
    }
}

impl fmt::Display for ScheduleCode {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// The next computed pickup occurrence for a route.
pub struct CalendarEvent {
    /// Pickup date; no time-of-day semantics.
    pub date: NaiveDate,
    /// Trash is collected every pickup.
    pub trash: bool,
    /// Recycling is collected only on the route's rotation weeks.
    pub recycle: bool,
}

#[cfg(test)]
mod tests {
    use chrono::Weekday;

    use super::{Rotation, ScheduleCode, StreetDirection, StreetType};

    #[test]
    fn test_from_wire_is_case_sensitive() {
        assert_eq!(ScheduleCode::from_wire("monB"), Some(ScheduleCode::MonB));
        assert_eq!(ScheduleCode::from_wire("ThuC"), Some(ScheduleCode::ThuC));
        assert_eq!(ScheduleCode::from_wire("thuC"), None);
        assert_eq!(ScheduleCode::from_wire("MonB"), None);
        assert_eq!(ScheduleCode::from_wire("satA"), None);
        assert_eq!(ScheduleCode::from_wire(""), None);
    }

    #[test]
    fn test_parse_canonicalizes_case() {
        assert_eq!(ScheduleCode::parse("THUC"), Some(ScheduleCode::ThuC));
        assert_eq!(ScheduleCode::parse("thuc"), Some(ScheduleCode::ThuC));
        assert_eq!(ScheduleCode::parse("MONA"), Some(ScheduleCode::MonA));
        assert_eq!(ScheduleCode::parse("satA"), None);
    }

    #[test]
    fn test_wire_spelling_round_trip() {
        for code in ScheduleCode::ALL {
            assert_eq!(ScheduleCode::from_wire(code.as_str()), Some(code));
            assert_eq!(code.to_string(), code.as_str());
        }
    }

    #[test]
    fn test_code_decomposition() {
        assert_eq!(ScheduleCode::MonA.weekday(), Weekday::Mon);
        assert_eq!(ScheduleCode::FriB.weekday(), Weekday::Fri);
        assert_eq!(ScheduleCode::ThuC.weekday(), Weekday::Thu);
        assert_eq!(ScheduleCode::TueB.rotation(), Rotation::B);
        assert_eq!(ScheduleCode::ThuC.rotation(), Rotation::C);
        assert_eq!(ScheduleCode::WedA.rotation(), Rotation::A);
    }

    #[test]
    fn test_street_enums_parse_ignoring_case() {
        assert_eq!(StreetDirection::parse("nw"), Some(StreetDirection::Northwest));
        assert_eq!(StreetDirection::parse("N"), Some(StreetDirection::North));
        assert_eq!(StreetDirection::parse("North"), None);
        assert_eq!(StreetType::parse("ave"), Some(StreetType::Ave));
        assert_eq!(StreetType::parse("rr"), Some(StreetType::Rr));
        assert_eq!(StreetType::Rr.as_str(), "RR");
        assert_eq!(StreetType::parse("Avenue"), None);
    }
}
