//! Field rules for booking and login payloads.
//!
//! Each field has a chain of checks. Chains are evaluated independently over
//! the whole payload, so one pass reports every offending field; within a
//! chain the first failing check supplies the field's only message.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::{BookingStatus, parse_fare};

use super::email::{is_email, normalize_email};
use super::phone::PhonePattern;

/// A single rejected field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub field: String,
    pub message: String,
}

impl Violation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Every violation found in a payload.
///
/// Serializes as `{ "errors": [ { "field": ..., "message": ... } ] }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{} invalid field(s): {}", .errors.len(), summarize(.errors))]
pub struct ValidationErrors {
    pub errors: Vec<Violation>,
}

impl From<Vec<Violation>> for ValidationErrors {
    fn from(errors: Vec<Violation>) -> Self {
        Self { errors }
    }
}

fn summarize(errors: &[Violation]) -> String {
    errors
        .iter()
        .map(|v| v.field.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Whether a booking payload is a new submission or a partial edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Every field is required.
    Create,
    /// Every field is optional, but checked when present.
    Update,
}

/// One check in a field's chain.
#[derive(Debug, Clone, Copy)]
enum Check {
    /// Trimmed string must be non-empty. Carries the create-mode and
    /// update-mode messages.
    Present {
        required: &'static str,
        empty: &'static str,
    },
    /// Trimmed string must have at least this many characters.
    MinChars(usize, &'static str),
    MobilePhone(&'static str),
    Email(&'static str),
    /// Must be an array with at least one element.
    NonEmptyList(&'static str),
    /// JSON number, or a string that parses as one.
    Numeric(&'static str),
    /// Must name a booking status.
    Status(&'static str),
}

/// A named field and its checks.
struct FieldRule {
    field: &'static str,
    checks: &'static [Check],
    /// Checked only when present, in every mode.
    always_optional: bool,
}

const fn rule(field: &'static str, checks: &'static [Check]) -> FieldRule {
    FieldRule {
        field,
        checks,
        always_optional: false,
    }
}

const BOOKING_RULES: &[FieldRule] = &[
    rule(
        "mainPassengerName",
        &[
            Check::Present {
                required: "Main passenger name is required",
                empty: "Main passenger name cannot be empty",
            },
            Check::MinChars(3, "Name must be at least 3 characters long"),
        ],
    ),
    rule(
        "phone",
        &[
            Check::Present {
                required: "Phone number is required",
                empty: "Phone number cannot be empty",
            },
            Check::MobilePhone("Invalid phone number format"),
        ],
    ),
    rule(
        "journeyDate",
        &[Check::Present {
            required: "Journey date is required",
            empty: "Journey date cannot be empty",
        }],
    ),
    rule(
        "route",
        &[Check::Present {
            required: "Route is required",
            empty: "Route cannot be empty",
        }],
    ),
    rule(
        "departureTime",
        &[Check::Present {
            required: "Departure time is required",
            empty: "Departure time cannot be empty",
        }],
    ),
    rule(
        "arrivalTime",
        &[Check::Present {
            required: "Arrival time is required",
            empty: "Arrival time cannot be empty",
        }],
    ),
    rule(
        "passengers",
        &[Check::NonEmptyList("At least one passenger is required")],
    ),
];

/// Rules applied to every element of `passengers`, in reporting order.
const PASSENGER_RULES: &[FieldRule] = &[
    rule(
        "name",
        &[Check::Present {
            required: "Passenger name is required",
            empty: "Passenger name is required",
        }],
    ),
    rule(
        "seat",
        &[Check::Present {
            required: "Seat number is required",
            empty: "Seat number is required",
        }],
    ),
    rule("fare", &[Check::Numeric("Fare must be a number")]),
];

const TRAILING_BOOKING_RULES: &[FieldRule] = &[
    rule("totalFare", &[Check::Numeric("Total fare must be a number")]),
    FieldRule {
        field: "status",
        checks: &[Check::Status(
            "Status must be one of Confirmed, Pending, Cancelled",
        )],
        always_optional: true,
    },
];

const LOGIN_RULES: &[FieldRule] = &[
    rule(
        "email",
        &[
            Check::Present {
                required: "Email is required",
                empty: "Email is required",
            },
            Check::Email("Invalid email format"),
        ],
    ),
    rule(
        "password",
        &[Check::Present {
            required: "Password is required",
            empty: "Password is required",
        }],
    ),
];

/// Normalised login credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    /// Trimmed, lower-cased email.
    pub email: String,
    /// Trimmed password.
    pub password: String,
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Payload validator.
///
/// Pure: the same payload always yields the same violations.
///
/// # Examples
///
/// ```
/// use booking_server::validate::{Mode, Validator};
/// use serde_json::json;
///
/// let validator = Validator::default();
/// let errors = validator.validate_booking(&json!({ "mainPassengerName": "Al" }), Mode::Update);
/// assert_eq!(errors.len(), 1);
/// assert_eq!(errors[0].field, "mainPassengerName");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Validator {
    phone: PhonePattern,
}

impl Validator {
    pub fn new(phone: PhonePattern) -> Self {
        Self { phone }
    }

    pub fn phone_pattern(&self) -> PhonePattern {
        self.phone
    }

    /// Check a booking payload, returning every violation found.
    ///
    /// A payload that is not a JSON object is treated as an empty object.
    pub fn validate_booking(&self, payload: &Value, mode: Mode) -> Vec<Violation> {
        let empty = Map::new();
        let fields = payload.as_object().unwrap_or(&empty);

        let mut violations = Vec::new();
        for rule in BOOKING_RULES {
            self.apply(rule, rule.field.to_string(), fields, mode, &mut violations);
        }

        // A supplied list replaces the stored one, so each element must be
        // complete in either mode.
        if let Some(Value::Array(passengers)) = fields.get("passengers") {
            for rule in PASSENGER_RULES {
                for (i, passenger) in passengers.iter().enumerate() {
                    let passenger = passenger.as_object().unwrap_or(&empty);
                    let path = format!("passengers[{i}].{}", rule.field);
                    self.apply(rule, path, passenger, Mode::Create, &mut violations);
                }
            }
        }

        for rule in TRAILING_BOOKING_RULES {
            self.apply(rule, rule.field.to_string(), fields, mode, &mut violations);
        }

        violations
    }

    /// Check a login payload.
    ///
    /// On success returns the credentials with the email normalised.
    pub fn validate_login(&self, payload: &Value) -> Result<LoginCredentials, Vec<Violation>> {
        let empty = Map::new();
        let fields = payload.as_object().unwrap_or(&empty);

        let mut violations = Vec::new();
        for rule in LOGIN_RULES {
            self.apply(
                rule,
                rule.field.to_string(),
                fields,
                Mode::Create,
                &mut violations,
            );
        }

        if !violations.is_empty() {
            return Err(violations);
        }

        Ok(LoginCredentials {
            email: normalize_email(&text(fields.get("email"))),
            password: text(fields.get("password")).to_string(),
        })
    }

    /// Run one field's chain, pushing at most one violation.
    fn apply(
        &self,
        rule: &FieldRule,
        path: String,
        fields: &Map<String, Value>,
        mode: Mode,
        out: &mut Vec<Violation>,
    ) {
        let value = fields.get(rule.field);
        if value.is_none() && (mode == Mode::Update || rule.always_optional) {
            return;
        }

        if let Some(message) = rule
            .checks
            .iter()
            .find_map(|check| self.failure(check, value, mode))
        {
            out.push(Violation::new(path, message));
        }
    }

    /// The message for a failing check, or `None` if it passes.
    fn failure(&self, check: &Check, value: Option<&Value>, mode: Mode) -> Option<&'static str> {
        let passed = match *check {
            Check::Present { required, empty } => {
                if !text(value).is_empty() {
                    return None;
                }
                return Some(match mode {
                    Mode::Create => required,
                    Mode::Update => empty,
                });
            }
            Check::MinChars(min, _) => text(value).chars().count() >= min,
            Check::MobilePhone(_) => self.phone.matches(&text(value)),
            Check::Email(_) => is_email(&text(value)),
            Check::NonEmptyList(_) => {
                matches!(value, Some(Value::Array(items)) if !items.is_empty())
            }
            Check::Numeric(_) => is_numeric(value),
            Check::Status(_) => text(value).parse::<BookingStatus>().is_ok(),
        };

        if passed { None } else { Some(check.message()) }
    }
}

impl Check {
    fn message(&self) -> &'static str {
        match *self {
            Check::Present { required, .. } => required,
            Check::MinChars(_, message)
            | Check::MobilePhone(message)
            | Check::Email(message)
            | Check::NonEmptyList(message)
            | Check::Numeric(message)
            | Check::Status(message) => message,
        }
    }
}

/// Trimmed string content. Numbers read as their JSON text; anything else
/// reads as empty.
fn text(value: Option<&Value>) -> Cow<'_, str> {
    match value {
        Some(Value::String(s)) => Cow::Borrowed(s.trim()),
        Some(Value::Number(n)) => Cow::Owned(n.to_string()),
        _ => Cow::Borrowed(""),
    }
}

fn is_numeric(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Number(_)) => true,
        Some(Value::String(s)) => parse_fare(s).is_some(),
        _ => false,
    }
}

/// Validate a booking payload with the default phone pattern.
///
/// # Examples
///
/// ```
/// use booking_server::validate::{Mode, validate_booking};
/// use serde_json::json;
///
/// let errors = validate_booking(&json!({ "passengers": [] }), Mode::Update);
/// assert_eq!(errors[0].field, "passengers");
/// assert_eq!(errors[0].message, "At least one passenger is required");
/// ```
pub fn validate_booking(payload: &Value, mode: Mode) -> Vec<Violation> {
    Validator::default().validate_booking(payload, mode)
}

/// Validate a login payload with the default settings.
///
/// # Examples
///
/// ```
/// use booking_server::validate::validate_login;
/// use serde_json::json;
///
/// let creds = validate_login(&json!({ "email": " Admin@Example.com ", "password": "pw" })).unwrap();
/// assert_eq!(creds.email, "admin@example.com");
///
/// let errors = validate_login(&json!({ "email": "not-an-email", "password": "x" })).unwrap_err();
/// assert_eq!(errors.len(), 1);
/// assert_eq!(errors[0].field, "email");
/// ```
pub fn validate_login(payload: &Value) -> Result<LoginCredentials, Vec<Violation>> {
    Validator::default().validate_login(payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_booking() -> Value {
        json!({
            "mainPassengerName": "Rahul Das",
            "phone": "6543210987",
            "journeyDate": "2024-03-15",
            "route": "Guwahati -> Golaghat",
            "departureTime": "14:00",
            "arrivalTime": "20:30",
            "passengers": [
                { "name": "Rahul Das", "seat": "B4", "fare": 600 },
                { "name": "Mina Das", "seat": "B5", "fare": "600" }
            ],
            "totalFare": "1200"
        })
    }

    fn fields(violations: &[Violation]) -> Vec<&str> {
        violations.iter().map(|v| v.field.as_str()).collect()
    }

    fn without(field: &str) -> Value {
        let mut payload = valid_booking();
        payload.as_object_mut().unwrap().remove(field);
        payload
    }

    #[test]
    fn valid_booking_passes_both_modes() {
        assert!(validate_booking(&valid_booking(), Mode::Create).is_empty());
        assert!(validate_booking(&valid_booking(), Mode::Update).is_empty());
    }

    #[test]
    fn every_missing_field_is_reported_on_create() {
        for field in [
            "mainPassengerName",
            "phone",
            "journeyDate",
            "route",
            "departureTime",
            "arrivalTime",
            "passengers",
            "totalFare",
        ] {
            let errors = validate_booking(&without(field), Mode::Create);
            assert_eq!(fields(&errors), vec![field], "missing {field}");
        }
    }

    #[test]
    fn empty_payload_reports_all_fields_in_order() {
        let errors = validate_booking(&json!({}), Mode::Create);
        assert_eq!(
            fields(&errors),
            vec![
                "mainPassengerName",
                "phone",
                "journeyDate",
                "route",
                "departureTime",
                "arrivalTime",
                "passengers",
                "totalFare",
            ]
        );
        assert_eq!(errors[0].message, "Main passenger name is required");
        assert_eq!(errors[1].message, "Phone number is required");
    }

    #[test]
    fn non_object_payload_is_treated_as_empty() {
        let errors = validate_booking(&json!([1, 2, 3]), Mode::Create);
        assert_eq!(errors.len(), 8);
        assert!(validate_booking(&json!("text"), Mode::Update).is_empty());
    }

    #[test]
    fn update_mode_ignores_absent_fields() {
        assert!(validate_booking(&json!({}), Mode::Update).is_empty());
        assert!(validate_booking(&json!({ "phone": "9876543210" }), Mode::Update).is_empty());
    }

    #[test]
    fn update_mode_uses_cannot_be_empty_messages() {
        let errors = validate_booking(&json!({ "route": "   " }), Mode::Update);
        assert_eq!(errors, vec![Violation::new("route", "Route cannot be empty")]);
    }

    #[test]
    fn short_name_is_rejected() {
        let errors = validate_booking(&json!({ "mainPassengerName": "Al" }), Mode::Create);
        assert!(errors.contains(&Violation::new(
            "mainPassengerName",
            "Name must be at least 3 characters long"
        )));

        let errors = validate_booking(&json!({ "mainPassengerName": "Alice" }), Mode::Create);
        assert!(!fields(&errors).contains(&"mainPassengerName"));
    }

    #[test]
    fn name_length_counts_trimmed_chars() {
        let errors = validate_booking(&json!({ "mainPassengerName": "  Al  " }), Mode::Update);
        assert_eq!(fields(&errors), vec!["mainPassengerName"]);

        let errors = validate_booking(&json!({ "mainPassengerName": "Ámé" }), Mode::Update);
        assert!(errors.is_empty());
    }

    #[test]
    fn first_failing_check_wins() {
        let errors = validate_booking(&json!({ "phone": "" }), Mode::Create);
        let phone: Vec<_> = errors.iter().filter(|v| v.field == "phone").collect();
        assert_eq!(phone.len(), 1);
        assert_eq!(phone[0].message, "Phone number is required");
    }

    #[test]
    fn bad_phone_is_rejected() {
        let errors = validate_booking(&json!({ "phone": "12ab" }), Mode::Update);
        assert_eq!(
            errors,
            vec![Violation::new("phone", "Invalid phone number format")]
        );
    }

    #[test]
    fn phone_pattern_is_configurable() {
        let payload = json!({ "phone": "5876543210" });
        assert!(Validator::new(PhonePattern::Lenient)
            .validate_booking(&payload, Mode::Update)
            .is_empty());
        assert_eq!(
            fields(&Validator::new(PhonePattern::Indian).validate_booking(&payload, Mode::Update)),
            vec!["phone"]
        );
    }

    #[test]
    fn journey_date_format_is_not_checked() {
        let errors = validate_booking(&json!({ "journeyDate": "next tuesday" }), Mode::Update);
        assert!(errors.is_empty());
    }

    #[test]
    fn wrong_type_reads_as_empty() {
        let errors = validate_booking(
            &json!({ "phone": null, "route": true, "journeyDate": ["2024-03-15"] }),
            Mode::Update,
        );
        assert_eq!(fields(&errors), vec!["phone", "journeyDate", "route"]);
        assert_eq!(errors[0].message, "Phone number cannot be empty");
    }

    #[test]
    fn numbers_read_as_text() {
        let errors = validate_booking(&json!({ "phone": 9876543210u64, "route": 42 }), Mode::Update);
        assert!(errors.is_empty());

        let errors = validate_booking(&json!({ "mainPassengerName": 12 }), Mode::Update);
        assert_eq!(
            errors,
            vec![Violation::new(
                "mainPassengerName",
                "Name must be at least 3 characters long"
            )]
        );

        let creds = validate_login(&json!({ "email": "a@example.com", "password": 1234 })).unwrap();
        assert_eq!(creds.password, "1234");
    }

    #[test]
    fn empty_passenger_list_is_rejected() {
        let errors = validate_booking(&json!({ "passengers": [] }), Mode::Create);
        assert!(errors.contains(&Violation::new(
            "passengers",
            "At least one passenger is required"
        )));
    }

    #[test]
    fn passengers_must_be_a_list() {
        let errors = validate_booking(&json!({ "passengers": { "name": "A" } }), Mode::Update);
        assert_eq!(fields(&errors), vec!["passengers"]);
    }

    #[test]
    fn non_numeric_passenger_fare_is_rejected() {
        let payload = json!({ "passengers": [{ "name": "A", "seat": "1", "fare": "x" }] });
        let errors = validate_booking(&payload, Mode::Create);
        assert!(errors.contains(&Violation::new("passengers[0].fare", "Fare must be a number")));
        assert!(!fields(&errors).contains(&"passengers"));
    }

    #[test]
    fn passenger_violations_are_grouped_by_rule() {
        let payload = json!({
            "passengers": [
                { "name": "", "seat": "", "fare": 1 },
                { "name": " ", "seat": "2", "fare": "one" }
            ]
        });
        let errors = validate_booking(&payload, Mode::Update);
        assert_eq!(
            fields(&errors),
            vec![
                "passengers[0].name",
                "passengers[1].name",
                "passengers[0].seat",
                "passengers[1].fare",
            ]
        );
        assert_eq!(errors[2].message, "Seat number is required");
    }

    #[test]
    fn passenger_elements_must_be_complete_in_both_modes() {
        let payload = json!({ "passengers": [{ "name": "Ravi Kumar" }] });

        for mode in [Mode::Create, Mode::Update] {
            let errors = validate_booking(&payload, mode);
            assert!(errors.contains(&Violation::new(
                "passengers[0].seat",
                "Seat number is required"
            )));
            assert!(errors.contains(&Violation::new(
                "passengers[0].fare",
                "Fare must be a number"
            )));
        }

        let errors = validate_booking(&payload, Mode::Update);
        assert_eq!(fields(&errors), vec!["passengers[0].seat", "passengers[0].fare"]);
    }

    #[test]
    fn total_fare_must_be_numeric() {
        let errors = validate_booking(&json!({ "totalFare": "a lot" }), Mode::Update);
        assert_eq!(
            errors,
            vec![Violation::new("totalFare", "Total fare must be a number")]
        );
        assert!(validate_booking(&json!({ "totalFare": 12.5 }), Mode::Update).is_empty());
        assert!(validate_booking(&json!({ "totalFare": true }), Mode::Update).len() == 1);
    }

    #[test]
    fn status_checked_only_when_present() {
        let mut payload = valid_booking();
        payload["status"] = json!("Pending");
        assert!(validate_booking(&payload, Mode::Create).is_empty());

        payload["status"] = json!("Refunded");
        assert_eq!(
            fields(&validate_booking(&payload, Mode::Create)),
            vec!["status"]
        );
    }

    #[test]
    fn login_requires_both_fields() {
        let errors = validate_login(&json!({})).unwrap_err();
        assert_eq!(
            errors,
            vec![
                Violation::new("email", "Email is required"),
                Violation::new("password", "Password is required"),
            ]
        );
    }

    #[test]
    fn login_rejects_bad_email_only() {
        let errors = validate_login(&json!({ "email": "not-an-email", "password": "x" })).unwrap_err();
        assert_eq!(errors, vec![Violation::new("email", "Invalid email format")]);
    }

    #[test]
    fn login_normalizes_email() {
        let creds =
            validate_login(&json!({ "email": "  Staff@Akasha.Travel ", "password": " secret " }))
                .unwrap();
        assert_eq!(creds.email, "staff@akasha.travel");
        assert_eq!(creds.password, "secret");
        assert!(!format!("{:?}", creds).contains("secret"));
    }

    #[test]
    fn validation_errors_display() {
        let err = ValidationErrors::from(vec![
            Violation::new("phone", "Invalid phone number format"),
            Violation::new("route", "Route is required"),
        ]);
        assert_eq!(err.to_string(), "2 invalid field(s): phone, route");

        let body = serde_json::to_value(&err).unwrap();
        assert_eq!(body["errors"][0]["field"], "phone");
        assert_eq!(body["errors"][1]["message"], "Route is required");
    }
}
