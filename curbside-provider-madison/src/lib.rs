//! Provider implementation for Madison, WI using the city's refuse collection lookup form.
//!
//! The city publishes a form at
//! `https://www.cityofmadison.com/streets/refuse/collectionlookup.cfm` which
//! POSTs to the results page below. The response is a redirect whose
//! `Location` header names the route's calendar PDF, e.g.
//! `https://www.cityofmadison.com/streets/documents/monB.pdf`, and the
//! filename stem is the schedule code.

use std::sync::{Arc, LazyLock};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{Datelike, Days, NaiveDate, Weekday};
use regex::Regex;
use reqwest::{Client, header::LOCATION, redirect};

use curbside_core::{
    model::{
        Address, CalendarEvent, JurisdictionId, JurisdictionMeta, Rotation, ScheduleCode,
    },
    plugin::JurisdictionPlugin,
    ports::{ScheduleCalculator, ScheduleError, ScheduleResolver},
};

const LOOKUP_URL: &str = "https://www.cityofmadison.com/streets/refuse/collectionResults.cfm";
const STATE: &str = "WI";
const CITY: &str = "Madison";

// A stalled lookup surfaces as the retryable Network error once this elapses.
const LOOKUP_TIMEOUT: Duration = Duration::from_secs(10);

// Trailing filename stem of the redirect target. The extension matches in any
// case, the captured stem is compared case-sensitively against the code set.
static SCHEDULE_PDF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)([a-z]*)\.pdf$").expect("pattern is valid"));

/// Form payload for the collection lookup.
///
/// Field limits mirror the city form: house number and unit 1–5 characters,
/// street name 1–35 characters. Violations are rejected here, before any
/// network round-trip.
#[derive(Debug, PartialEq, Eq)]
struct LookupForm {
    house_num: String,
    st_dir: &'static str,
    st_name: String,
    st_type: &'static str,
    unit: String,
}

impl LookupForm {
    fn from_address(address: &Address) -> Result<Self, ScheduleError> {
        check_length("HouseNum", &address.street_number, 1, 5)?;
        check_length("StName", &address.street_name, 1, 35)?;
        if let Some(unit) = &address.unit_number {
            check_length("Unit", unit, 1, 5)?;
        }
        Ok(Self {
            house_num: address.street_number.clone(),
            st_dir: address
                .street_direction
                .map_or("", |direction| direction.as_str()),
            st_name: address.street_name.clone(),
            st_type: address
                .street_type
                .map_or("", |street_type| street_type.as_str()),
            unit: address.unit_number.clone().unwrap_or_default(),
        })
    }

    // The form requires all five fields to be present, even if empty.
    fn fields(&self) -> [(&'static str, &str); 5] {
        [
            ("HouseNum", self.house_num.as_str()),
            ("StDir", self.st_dir),
            ("StName", self.st_name.as_str()),
            ("StType", self.st_type),
            ("Unit", self.unit.as_str()),
        ]
    }
}

fn check_length(
    field: &'static str,
    value: &str,
    min: usize,
    max: usize,
) -> Result<(), ScheduleError> {
    let length = value.chars().count();
    if length < min || length > max {
        return Err(ScheduleError::Validation {
            field,
            reason: format!("expected {min} to {max} characters, got {length}"),
        });
    }
    Ok(())
}

/// Schedule resolver backed by the city's form-based lookup endpoint.
///
/// The redirect IS the answer: the resolver owns a dedicated HTTP client with
/// redirects disabled so the `Location` header can be captured instead of
/// followed. One best-effort POST per call; no retries, no caching.
pub struct MadisonScheduleResolver {
    client: Client,
    meta: JurisdictionMeta,
}

impl MadisonScheduleResolver {
    /// Create a resolver with its dedicated non-following HTTP client.
    ///
    /// # Errors
    ///
    /// Returns the underlying [`reqwest::Error`] when the client cannot be
    /// constructed.
    pub fn new() -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .redirect(redirect::Policy::none())
            .timeout(LOOKUP_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            meta: jurisdiction_meta(),
        })
    }
}

#[async_trait]
impl ScheduleResolver for MadisonScheduleResolver {
    fn jurisdiction(&self) -> &JurisdictionMeta {
        &self.meta
    }

    async fn resolve(&self, address: &Address) -> Result<ScheduleCode, ScheduleError> {
        let form = LookupForm::from_address(address)?;

        let response = self
            .client
            .post(LOOKUP_URL)
            .form(&form.fields())
            .send()
            .await?;

        let status = response.status();
        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);

        if let Some(code) = location.as_deref().and_then(schedule_from_location) {
            return Ok(code);
        }

        // Non-redirect response, malformed header, or a code outside the
        // known set. Keep the raw pieces for diagnosis.
        Err(ScheduleError::Resolution {
            status,
            location,
            body: response.text().await?,
        })
    }
}

/// Extract the schedule code from a redirect `Location` header value.
///
/// The stem comparison is case-sensitive: the casing published by the city is
/// authoritative, including the mixed-case `ThuC`.
fn schedule_from_location(location: &str) -> Option<ScheduleCode> {
    let stem = SCHEDULE_PDF.captures(location)?.get(1)?.as_str();
    ScheduleCode::from_wire(stem)
}

/// Schedule calculator implementing the routes' day-of-week + biweekly parity
/// rule in closed form, replacing the city's per-year calendar tables.
///
/// Week numbering follows a "week containing January 1st is week 1" rule with
/// weeks starting on Sunday; rotation A (and its alias C) recycles on even
/// weeks, rotation B on odd weeks. The rule was validated against the city's
/// published calendars rather than derived from a written specification, so
/// apparent off-by-one-week cases should be checked against the current PDFs
/// before touching the arithmetic. In a 53-week year the parity repeats across
/// the year boundary; the published calendars do the same.
///
/// Holiday shifts are not modeled: around a public holiday the computed date
/// can be off by one day.
pub struct MadisonScheduleCalculator {
    meta: JurisdictionMeta,
}

impl MadisonScheduleCalculator {
    /// Create the calculator.
    #[must_use]
    pub fn new() -> Self {
        Self {
            meta: jurisdiction_meta(),
        }
    }
}

impl Default for MadisonScheduleCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl ScheduleCalculator for MadisonScheduleCalculator {
    fn jurisdiction(&self) -> &JurisdictionMeta {
        &self.meta
    }

    fn next_event(
        &self,
        code: ScheduleCode,
        reference: NaiveDate,
    ) -> Result<CalendarEvent, ScheduleError> {
        let date = next_weekday_after(reference, code.weekday())?;
        let even_week = week_of_year(date)? % 2 == 0;
        // A and C are the same rotation; only B flips the parity.
        let recycle = match code.rotation() {
            Rotation::A | Rotation::C => even_week,
            Rotation::B => !even_week,
        };
        Ok(CalendarEvent {
            date,
            trash: true,
            recycle,
        })
    }
}

/// Next date whose weekday is `weekday`, strictly after `reference`.
///
/// A reference date already on that weekday advances a full seven days.
fn next_weekday_after(reference: NaiveDate, weekday: Weekday) -> Result<NaiveDate, ScheduleError> {
    let gap = (weekday.num_days_from_monday() + 7 - reference.weekday().num_days_from_monday()) % 7;
    let days_ahead = if gap == 0 { 7 } else { u64::from(gap) };
    reference
        .checked_add_days(Days::new(days_ahead))
        .ok_or_else(|| ScheduleError::Internal(String::from("pickup date out of range")))
}

/// Week number under the "week containing January 1st is week 1" rule, weeks
/// starting on Sunday.
///
/// A late-December date rolls into week 1 of the following year when its
/// Sunday-start week already contains the next January 1st.
fn week_of_year(date: NaiveDate) -> Result<i64, ScheduleError> {
    let next_week_one = start_of_week(jan_first(date.year() + 1)?)?;
    let anchor = if date >= next_week_one {
        next_week_one
    } else {
        start_of_week(jan_first(date.year())?)?
    };
    Ok(date.signed_duration_since(anchor).num_days() / 7 + 1)
}

fn jan_first(year: i32) -> Result<NaiveDate, ScheduleError> {
    NaiveDate::from_ymd_opt(year, 1, 1)
        .ok_or_else(|| ScheduleError::Internal(format!("year {year} out of range")))
}

fn start_of_week(date: NaiveDate) -> Result<NaiveDate, ScheduleError> {
    let since_sunday = u64::from(date.weekday().num_days_from_sunday());
    date.checked_sub_days(Days::new(since_sunday))
        .ok_or_else(|| ScheduleError::Internal(String::from("week start out of range")))
}

/// Build the plugin bundle for the Madison provider.
///
/// # Errors
///
/// Returns the underlying [`reqwest::Error`] when the resolver's HTTP client
/// cannot be constructed.
pub fn plugin() -> Result<JurisdictionPlugin, reqwest::Error> {
    let resolver = Arc::new(MadisonScheduleResolver::new()?);
    let calculator = Arc::new(MadisonScheduleCalculator::new());

    Ok(JurisdictionPlugin {
        meta: jurisdiction_meta(),
        resolver,
        calculator,
    })
}

fn jurisdiction_meta() -> JurisdictionMeta {
    JurisdictionMeta {
        id: JurisdictionId::new(STATE, CITY),
        name: String::from("Madison, Wisconsin"),
    }
}
