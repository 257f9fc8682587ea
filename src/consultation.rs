use chrono::NaiveDate;
use regex::Regex;

use crate::models::{FieldError, RawConsultation};

/// Half-hour appointment slots offered by the agency. The booking form only
/// offers these labels and the validator rejects anything else.
pub const TIME_SLOTS: &[&str] = &[
    "09:00 AM", "09:30 AM", "10:00 AM", "10:30 AM", "11:00 AM", "11:30 AM",
    "01:00 PM", "01:30 PM", "02:00 PM", "02:30 PM", "03:00 PM", "03:30 PM",
    "04:00 PM", "04:30 PM",
];

/// How the requester wants to be reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactMethod {
    Email,
    Phone,
}

impl ContactMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContactMethod::Email => "email",
            ContactMethod::Phone => "phone",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "email" => Some(ContactMethod::Email),
            "phone" => Some(ContactMethod::Phone),
            _ => None,
        }
    }
}

/// The fixed three-service catalog the agency offers consultations for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    TermLife,
    Annuity,
    Iul,
}

impl Service {
    pub fn as_code(&self) -> &'static str {
        match self {
            Service::TermLife => "term-life",
            Service::Annuity => "annuity",
            Service::Iul => "iul",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "term-life" => Some(Service::TermLife),
            "annuity" => Some(Service::Annuity),
            "iul" => Some(Service::Iul),
            _ => None,
        }
    }
}

/// The one contact value selected by the contact method. Holding it as an
/// enum keeps "exactly one of {email, phone}" true by construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactDetail {
    Email(String),
    Phone(String),
}

/// A validated consultation request. Immutable once constructed; it exists
/// only for the duration of one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsultationRequest {
    pub name: String,
    pub age: u8,
    pub contact: ContactDetail,
    pub services: Vec<Service>,
    pub date: NaiveDate,
    pub time: String,
}

impl ConsultationRequest {
    pub fn contact_method(&self) -> ContactMethod {
        match self.contact {
            ContactDetail::Email(_) => ContactMethod::Email,
            ContactDetail::Phone(_) => ContactMethod::Phone,
        }
    }

    pub fn email(&self) -> Option<&str> {
        match &self.contact {
            ContactDetail::Email(addr) => Some(addr),
            ContactDetail::Phone(_) => None,
        }
    }

    pub fn phone(&self) -> Option<&str> {
        match &self.contact {
            ContactDetail::Email(_) => None,
            ContactDetail::Phone(digits) => Some(digits),
        }
    }
}

/// Validate an email address.
///
/// Checks basic shape first (length, @ and a dot), then an RFC 5322
/// simplified pattern. Deliberately plausibility-checking, not full RFC
/// compliance.
pub fn is_valid_email(email: &str) -> bool {
    if email.len() < 5 || !email.contains('@') || !email.contains('.') {
        return false;
    }

    // RFC 5322 simplified email regex
    // Matches: local@domain.tld
    let email_regex = Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$"
    ).unwrap();

    email_regex.is_match(email)
}

/// Validate a phone number: exactly 10 ASCII digits, no formatting characters.
pub fn is_valid_phone(phone: &str) -> bool {
    let phone_regex = Regex::new(r"^\d{10}$").unwrap();
    phone_regex.is_match(phone)
}

/// Validate a wire payload into a typed `ConsultationRequest`.
///
/// Collects every failing constraint rather than stopping at the first, so
/// the endpoint can answer with the complete per-field error list and the
/// booking form can light up every invalid input at once. Errors are pushed
/// in field order: name, age, contact method, email/phone, services, date,
/// time. The conditional email/phone presence rule only applies once the
/// contact method itself parsed.
pub fn validate(raw: &RawConsultation) -> Result<ConsultationRequest, Vec<FieldError>> {
    let mut errors = Vec::new();

    if raw.name.chars().count() < 2 {
        errors.push(FieldError::new("name", "Name must be at least 2 characters."));
    }

    let age = if raw.age.is_empty() {
        errors.push(FieldError::new("age", "Age is required."));
        None
    } else {
        match raw.age.parse::<i64>() {
            Ok(value) if (18..=100).contains(&value) => Some(value as u8),
            _ => {
                errors.push(FieldError::new("age", "Age must be between 18 and 100."));
                None
            }
        }
    };

    let method = ContactMethod::from_str(&raw.contact_method);
    if method.is_none() {
        errors.push(FieldError::new(
            "contactMethod",
            "Please select a contact method.",
        ));
    }

    // Format checks apply to whichever contact values were supplied; the
    // presence requirement is keyed on the chosen contact method.
    let email = raw.email.as_deref().unwrap_or("");
    let phone = raw.phone.as_deref().unwrap_or("");

    if !email.is_empty() && !is_valid_email(email) {
        errors.push(FieldError::new(
            "email",
            "Please enter a valid email address.",
        ));
    }
    if !phone.is_empty() && !is_valid_phone(phone) {
        errors.push(FieldError::new(
            "phone",
            "Phone number must be exactly 10 digits.",
        ));
    }

    match method {
        Some(ContactMethod::Email) if email.is_empty() => {
            errors.push(FieldError::new("email", "Please enter your email address."));
        }
        Some(ContactMethod::Phone) if phone.is_empty() => {
            errors.push(FieldError::new("phone", "Please enter your phone number."));
        }
        _ => {}
    }

    let mut services = Vec::new();
    if raw.services.is_empty() {
        errors.push(FieldError::new(
            "services",
            "Please select at least one service.",
        ));
    } else {
        for code in &raw.services {
            match Service::from_code(code) {
                // Set semantics: duplicates collapse to one selection
                Some(service) if !services.contains(&service) => services.push(service),
                Some(_) => {}
                None => {
                    errors.push(FieldError::new(
                        "services",
                        format!("'{}' is not an offered service.", code),
                    ));
                }
            }
        }
    }

    let date = if raw.date.is_empty() {
        errors.push(FieldError::new("date", "A date is required."));
        None
    } else {
        match NaiveDate::parse_from_str(&raw.date, "%Y-%m-%d") {
            Ok(date) => Some(date),
            Err(_) => {
                errors.push(FieldError::new("date", "Date must be in YYYY-MM-DD format."));
                None
            }
        }
    };

    if raw.time.is_empty() {
        errors.push(FieldError::new("time", "Please select a time."));
    } else if !TIME_SLOTS.contains(&raw.time.as_str()) {
        errors.push(FieldError::new(
            "time",
            "Please select a time from the available slots.",
        ));
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    let contact = match method {
        Some(ContactMethod::Email) => ContactDetail::Email(email.to_string()),
        Some(ContactMethod::Phone) => ContactDetail::Phone(phone.to_string()),
        // Unreachable: a missing method pushed an error above
        None => return Err(errors),
    };

    Ok(ConsultationRequest {
        name: raw.name.clone(),
        age: age.unwrap_or_default(),
        contact,
        services,
        date: date.unwrap_or_default(),
        time: raw.time.clone(),
    })
}
