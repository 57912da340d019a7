//! Booking records.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, de};

/// Server-assigned booking identifier, e.g. "BK1001".
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookingId(String);

impl BookingId {
    /// Prefix of every generated id.
    pub const PREFIX: &'static str = "BK";

    /// Build the id for a sequence number.
    pub fn from_sequence(n: u64) -> Self {
        Self(format!("{}{}", Self::PREFIX, n))
    }

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for BookingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BookingId({})", self.0)
    }
}

impl fmt::Display for BookingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Error returned when parsing an unknown booking status.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown booking status: {0}")]
pub struct InvalidStatus(String);

/// Lifecycle state of a booking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum BookingStatus {
    #[default]
    Confirmed,
    Pending,
    Cancelled,
}

impl BookingStatus {
    pub const ALL: [BookingStatus; 3] = [Self::Confirmed, Self::Pending, Self::Cancelled];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Confirmed => "Confirmed",
            Self::Pending => "Pending",
            Self::Cancelled => "Cancelled",
        }
    }
}

impl FromStr for BookingStatus {
    type Err = InvalidStatus;

    /// Case-insensitive; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| InvalidStatus(s.to_string()))
    }
}

impl<'de> Deserialize<'de> for BookingStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One traveller on a booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Passenger {
    #[serde(deserialize_with = "deserialize_text")]
    pub name: String,
    #[serde(deserialize_with = "deserialize_text")]
    pub seat: String,
    #[serde(deserialize_with = "deserialize_fare")]
    pub fare: f64,
}

/// A stored booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: BookingId,
    pub main_passenger_name: String,
    pub phone: String,
    pub journey_date: String,
    pub route: String,
    pub departure_time: String,
    pub arrival_time: String,
    pub passengers: Vec<Passenger>,
    pub total_fare: f64,
    pub status: BookingStatus,
}

impl Booking {
    /// Assign an id to a submitted booking.
    ///
    /// Status defaults to [`BookingStatus::Confirmed`] when not supplied.
    pub fn from_new(id: BookingId, new: NewBooking) -> Self {
        Self {
            id,
            main_passenger_name: new.main_passenger_name,
            phone: new.phone,
            journey_date: new.journey_date,
            route: new.route,
            departure_time: new.departure_time,
            arrival_time: new.arrival_time,
            passengers: new.passengers,
            total_fare: new.total_fare,
            status: new.status.unwrap_or_default(),
        }
    }

    /// Overwrite the supplied fields. The id is never touched.
    pub fn apply(&mut self, patch: BookingPatch) {
        let BookingPatch {
            main_passenger_name,
            phone,
            journey_date,
            route,
            departure_time,
            arrival_time,
            passengers,
            total_fare,
            status,
        } = patch;

        if let Some(v) = main_passenger_name {
            self.main_passenger_name = v;
        }
        if let Some(v) = phone {
            self.phone = v;
        }
        if let Some(v) = journey_date {
            self.journey_date = v;
        }
        if let Some(v) = route {
            self.route = v;
        }
        if let Some(v) = departure_time {
            self.departure_time = v;
        }
        if let Some(v) = arrival_time {
            self.arrival_time = v;
        }
        if let Some(v) = passengers {
            self.passengers = v;
        }
        if let Some(v) = total_fare {
            self.total_fare = v;
        }
        if let Some(v) = status {
            self.status = v;
        }
    }

    pub fn cancel(&mut self) {
        self.status = BookingStatus::Cancelled;
    }

    /// Whether the booking still counts towards totals.
    pub fn is_active(&self) -> bool {
        self.status != BookingStatus::Cancelled
    }
}

/// A booking submission, before an id is assigned.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBooking {
    #[serde(deserialize_with = "deserialize_text")]
    pub main_passenger_name: String,
    #[serde(deserialize_with = "deserialize_text")]
    pub phone: String,
    #[serde(deserialize_with = "deserialize_text")]
    pub journey_date: String,
    #[serde(deserialize_with = "deserialize_text")]
    pub route: String,
    #[serde(deserialize_with = "deserialize_text")]
    pub departure_time: String,
    #[serde(deserialize_with = "deserialize_text")]
    pub arrival_time: String,
    pub passengers: Vec<Passenger>,
    #[serde(deserialize_with = "deserialize_fare")]
    pub total_fare: f64,
    #[serde(default)]
    pub status: Option<BookingStatus>,
}

impl NewBooking {
    /// Trim surrounding whitespace from every text field.
    pub fn trimmed(self) -> Self {
        Self {
            main_passenger_name: trim(self.main_passenger_name),
            phone: trim(self.phone),
            journey_date: trim(self.journey_date),
            route: trim(self.route),
            departure_time: trim(self.departure_time),
            arrival_time: trim(self.arrival_time),
            passengers: self.passengers.into_iter().map(Passenger::trimmed).collect(),
            ..self
        }
    }
}

impl Passenger {
    fn trimmed(self) -> Self {
        Self {
            name: trim(self.name),
            seat: trim(self.seat),
            ..self
        }
    }
}

fn trim(s: String) -> String {
    s.trim().to_string()
}

/// A partial edit. Absent fields are left unchanged; an `id` in the payload
/// is ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingPatch {
    #[serde(default, deserialize_with = "deserialize_optional_text")]
    pub main_passenger_name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_text")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_text")]
    pub journey_date: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_text")]
    pub route: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_text")]
    pub departure_time: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_text")]
    pub arrival_time: Option<String>,
    pub passengers: Option<Vec<Passenger>>,
    #[serde(default, deserialize_with = "deserialize_optional_fare")]
    pub total_fare: Option<f64>,
    pub status: Option<BookingStatus>,
}

impl BookingPatch {
    /// Trim surrounding whitespace from every supplied text field.
    pub fn trimmed(self) -> Self {
        Self {
            main_passenger_name: self.main_passenger_name.map(trim),
            phone: self.phone.map(trim),
            journey_date: self.journey_date.map(trim),
            route: self.route.map(trim),
            departure_time: self.departure_time.map(trim),
            arrival_time: self.arrival_time.map(trim),
            passengers: self
                .passengers
                .map(|ps| ps.into_iter().map(Passenger::trimmed).collect()),
            ..self
        }
    }
}

/// Parse a decimal number the way booking forms submit it.
///
/// Accepts an optional sign, digits, and at most one decimal point followed
/// by at least one digit. No whitespace, exponents or thousands separators.
///
/// # Examples
///
/// ```
/// use booking_server::domain::parse_fare;
///
/// assert_eq!(parse_fare("450"), Some(450.0));
/// assert_eq!(parse_fare("-1.5"), Some(-1.5));
/// assert_eq!(parse_fare(".5"), Some(0.5));
/// assert_eq!(parse_fare("12."), None);
/// assert_eq!(parse_fare("x"), None);
/// ```
pub fn parse_fare(s: &str) -> Option<f64> {
    let digits = s.strip_prefix(['+', '-']).unwrap_or(s);
    let (whole, frac) = match digits.split_once('.') {
        Some((whole, frac)) => (whole, Some(frac)),
        None => (digits, None),
    };

    let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
    let valid = match frac {
        Some(frac) => all_digits(whole) && !frac.is_empty() && all_digits(frac),
        None => !whole.is_empty() && all_digits(whole),
    };
    if !valid {
        return None;
    }

    s.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Fares arrive either as JSON numbers or as numeric strings.
#[derive(Deserialize)]
#[serde(untagged)]
enum FareRepr {
    Number(f64),
    Text(String),
}

impl FareRepr {
    fn into_fare<E: de::Error>(self) -> Result<f64, E> {
        match self {
            FareRepr::Number(n) => Ok(n),
            FareRepr::Text(s) => {
                parse_fare(&s).ok_or_else(|| E::custom(format!("fare is not a number: {s:?}")))
            }
        }
    }
}

/// Text fields also accept JSON numbers, read as their JSON text.
#[derive(Deserialize)]
#[serde(untagged)]
enum TextRepr {
    Text(String),
    Number(serde_json::Number),
}

impl TextRepr {
    fn into_text(self) -> String {
        match self {
            TextRepr::Text(s) => s,
            TextRepr::Number(n) => n.to_string(),
        }
    }
}

fn deserialize_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    TextRepr::deserialize(deserializer).map(TextRepr::into_text)
}

fn deserialize_optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<TextRepr>::deserialize(deserializer).map(|text| text.map(TextRepr::into_text))
}

fn deserialize_fare<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    FareRepr::deserialize(deserializer)?.into_fare()
}

fn deserialize_optional_fare<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<FareRepr>::deserialize(deserializer)?
        .map(FareRepr::into_fare)
        .transpose()
}
