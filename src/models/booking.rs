use serde::{Deserialize, Serialize};

use crate::errors::FieldError;
use crate::services::scheduling;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: String,
    pub name: String,
    pub contact: String,
    pub date: String,
    pub time: String,
    pub guests: i64,
    pub hours: i64,
}

/// Candidate booking as submitted by the form, before validation. The form
/// sends guests/hours either as numbers or numeric strings, so both are
/// accepted on the wire.
#[derive(Debug, Clone, Deserialize)]
pub struct BookingRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub contact: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub guests: Option<IntField>,
    #[serde(default)]
    pub hours: Option<IntField>,
}

/// Integer field that may arrive as a JSON number or a string. A string that
/// does not parse is kept so validation can report it as non-numeric rather
/// than missing.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum IntField {
    Int(i64),
    Raw(String),
}

impl IntField {
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            IntField::Int(n) => Some(*n),
            IntField::Raw(s) => s.trim().parse().ok(),
        }
    }
}

impl BookingRequest {
    /// Field-level checks, all of them, before any store write. Returns an
    /// empty list when the candidate is acceptable.
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = vec![];

        match self.name.as_deref().map(str::trim) {
            None | Some("") => errors.push(FieldError {
                field: "name",
                message: "Name is required.".to_string(),
            }),
            Some(_) => {}
        }

        match self.contact.as_deref() {
            None | Some("") => errors.push(FieldError {
                field: "contact",
                message: "Contact is required.".to_string(),
            }),
            Some(contact) => {
                if contact.len() != 10 || !contact.bytes().all(|b| b.is_ascii_digit()) {
                    errors.push(FieldError {
                        field: "contact",
                        message: "Invalid contact number. Please enter a 10-digit number."
                            .to_string(),
                    });
                }
            }
        }

        match self.date.as_deref() {
            None | Some("") => errors.push(FieldError {
                field: "date",
                message: "Date is required.".to_string(),
            }),
            Some(date) => {
                if scheduling::parse_date(date).is_none() {
                    errors.push(FieldError {
                        field: "date",
                        message: "Date must be in YYYY-MM-DD format.".to_string(),
                    });
                }
            }
        }

        match self.time.as_deref() {
            None | Some("") => errors.push(FieldError {
                field: "time",
                message: "Time is required.".to_string(),
            }),
            Some(time) => {
                if !scheduling::SLOTS.contains(&time) {
                    errors.push(FieldError {
                        field: "time",
                        message: "Time must be one of the bookable slots.".to_string(),
                    });
                }
            }
        }

        match &self.guests {
            None => errors.push(FieldError {
                field: "guests",
                message: "Guests is required.".to_string(),
            }),
            Some(field) => match field.as_i64() {
                None => errors.push(FieldError {
                    field: "guests",
                    message: "Guests must be a number.".to_string(),
                }),
                Some(guests) if guests < 1 => errors.push(FieldError {
                    field: "guests",
                    message: "Guests must be at least 1.".to_string(),
                }),
                Some(_) => {}
            },
        }

        match &self.hours {
            None => errors.push(FieldError {
                field: "hours",
                message: "Hours is required.".to_string(),
            }),
            Some(field) => match field.as_i64() {
                None => errors.push(FieldError {
                    field: "hours",
                    message: "Hours must be a number.".to_string(),
                }),
                Some(hours) if !(1..=5).contains(&hours) => errors.push(FieldError {
                    field: "hours",
                    message: "Hours must be between 1 and 5.".to_string(),
                }),
                Some(_) => {}
            },
        }

        errors
    }

    /// Converts a validated candidate into a stored record with a fresh id.
    /// Callers must run `validate` first.
    pub fn into_booking(self, id: String) -> Booking {
        Booking {
            id,
            name: self.name.map(|n| n.trim().to_string()).unwrap_or_default(),
            contact: self.contact.unwrap_or_default(),
            date: self.date.unwrap_or_default(),
            time: self.time.unwrap_or_default(),
            guests: self.guests.and_then(|f| f.as_i64()).unwrap_or_default(),
            hours: self.hours.and_then(|f| f.as_i64()).unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> BookingRequest {
        BookingRequest {
            name: Some("Alice".to_string()),
            contact: Some("5551234567".to_string()),
            date: Some("2024-01-01".to_string()),
            time: Some("6:00 PM".to_string()),
            guests: Some(IntField::Int(2)),
            hours: Some(IntField::Int(2)),
        }
    }

    #[test]
    fn test_valid_request_passes() {
        assert!(valid_request().validate().is_empty());
    }

    #[test]
    fn test_missing_fields_all_reported() {
        let request: BookingRequest = serde_json::from_str("{}").unwrap();
        let errors = request.validate();
        assert_eq!(errors.len(), 6);
    }

    #[test]
    fn test_short_contact_rejected() {
        let mut request = valid_request();
        request.contact = Some("12345".to_string());
        let errors = request.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "contact");
    }

    #[test]
    fn test_non_digit_contact_rejected() {
        let mut request = valid_request();
        request.contact = Some("555123456x".to_string());
        assert_eq!(request.validate()[0].field, "contact");
    }

    #[test]
    fn test_hours_out_of_range() {
        let mut request = valid_request();
        request.hours = Some(IntField::Int(6));
        assert_eq!(request.validate()[0].field, "hours");

        request.hours = Some(IntField::Int(0));
        assert_eq!(request.validate()[0].field, "hours");
    }

    #[test]
    fn test_zero_guests_rejected() {
        let mut request = valid_request();
        request.guests = Some(IntField::Int(0));
        assert_eq!(request.validate()[0].field, "guests");
    }

    #[test]
    fn test_non_numeric_guests_reported_as_such() {
        let mut request = valid_request();
        request.guests = Some(IntField::Raw("abc".to_string()));
        let errors = request.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "guests");
        assert_eq!(errors[0].message, "Guests must be a number.");
    }

    #[test]
    fn test_non_numeric_hours_reported_as_such() {
        let mut request = valid_request();
        request.hours = Some(IntField::Raw("two".to_string()));
        let errors = request.validate();
        assert_eq!(errors[0].field, "hours");
        assert_eq!(errors[0].message, "Hours must be a number.");
    }

    #[test]
    fn test_unknown_slot_rejected() {
        let mut request = valid_request();
        request.time = Some("6:30 PM".to_string());
        assert_eq!(request.validate()[0].field, "time");
    }

    #[test]
    fn test_bad_date_rejected() {
        let mut request = valid_request();
        request.date = Some("01/01/2024".to_string());
        assert_eq!(request.validate()[0].field, "date");
    }

    #[test]
    fn test_stringly_numbers_accepted() {
        let request: BookingRequest =
            serde_json::from_str(r#"{"name":"Bob","contact":"5551234567","date":"2024-01-01","time":"7:00 PM","guests":"3","hours":"2"}"#)
                .unwrap();
        assert_eq!(request.guests.as_ref().and_then(IntField::as_i64), Some(3));
        assert_eq!(request.hours.as_ref().and_then(IntField::as_i64), Some(2));
        assert!(request.validate().is_empty());
    }

    #[test]
    fn test_whitespace_name_rejected() {
        let mut request = valid_request();
        request.name = Some("   ".to_string());
        assert_eq!(request.validate()[0].field, "name");
    }
}
