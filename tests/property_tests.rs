/// Property-based tests using proptest
/// Tests invariants that should hold for all inputs
use proptest::prelude::*;

use wanderi_consultation_api::consultation::{
    is_valid_email, is_valid_phone, validate, TIME_SLOTS,
};
use wanderi_consultation_api::models::RawConsultation;
use wanderi_consultation_api::notification::render;

// Property: validation should never panic, whatever arrives on the wire
proptest! {
    #[test]
    fn validators_never_panic(input in "\\PC*") {
        let _ = is_valid_email(&input);
        let _ = is_valid_phone(&input);
    }

    #[test]
    fn validate_never_panics(
        name in "\\PC*",
        age in "\\PC*",
        contact_method in "\\PC*",
        email in proptest::option::of("\\PC*"),
        phone in proptest::option::of("\\PC*"),
        services in proptest::collection::vec("\\PC*", 0..4),
        date in "\\PC*",
        time in "\\PC*",
    ) {
        let raw = RawConsultation {
            name,
            age,
            contact_method,
            email,
            phone,
            services,
            date,
            time,
        };
        let _ = validate(&raw);
    }
}

// Strategy for payloads that satisfy every schema constraint
fn valid_payload_strategy() -> impl Strategy<Value = RawConsultation> {
    (
        "[A-Za-z][A-Za-z ]{1,30}",
        18u8..=100,
        ("[a-z]{1,10}", "[a-z]{1,10}", "[a-z]{2,4}"),
        proptest::sample::subsequence(
            vec![
                "term-life".to_string(),
                "annuity".to_string(),
                "iul".to_string(),
            ],
            1..=3,
        ),
        (2024i32..=2030, 1u32..=12, 1u32..=28),
        proptest::sample::select(TIME_SLOTS.to_vec()),
    )
        .prop_map(|(name, age, (local, domain, tld), services, (y, m, d), time)| {
            RawConsultation {
                name,
                age: age.to_string(),
                contact_method: "email".to_string(),
                email: Some(format!("{}@{}.{}", local, domain, tld)),
                phone: None,
                services,
                date: format!("{:04}-{:02}-{:02}", y, m, d),
                time: time.to_string(),
            }
        })
}

proptest! {
    // Property: every payload satisfying the schema constraints is accepted,
    // and the typed record preserves the logical values (round trip)
    #[test]
    fn valid_payloads_round_trip(raw in valid_payload_strategy()) {
        let request = validate(&raw).expect("payload satisfies all constraints");

        prop_assert_eq!(&request.name, &raw.name);
        prop_assert_eq!(request.age.to_string(), raw.age.clone());
        prop_assert_eq!(request.email(), raw.email.as_deref());
        prop_assert_eq!(request.phone(), None);
        let codes: Vec<&str> = request.services.iter().map(|s| s.as_code()).collect();
        prop_assert_eq!(codes, raw.services.iter().map(String::as_str).collect::<Vec<_>>());
        prop_assert_eq!(request.date.format("%Y-%m-%d").to_string(), raw.date.clone());
        prop_assert_eq!(&request.time, &raw.time);
    }

    // Property: ages outside [18, 100] always fail
    #[test]
    fn out_of_range_ages_rejected(age in prop_oneof![0u32..18, 101u32..10_000]) {
        let mut raw = base_valid();
        raw.age = age.to_string();
        let errors = validate(&raw).unwrap_err();
        prop_assert!(errors.iter().any(|e| e.field == "age"));
    }

    // Property: any digit string that is not exactly 10 digits is not a phone
    #[test]
    fn wrong_length_digit_strings_rejected(phone in "[0-9]{1,20}") {
        prop_assume!(phone.len() != 10);
        prop_assert!(!is_valid_phone(&phone));
    }

    // Property: ten digits always pass the phone format check
    #[test]
    fn ten_digit_strings_accepted(phone in "[0-9]{10}") {
        prop_assert!(is_valid_phone(&phone));
    }

    // Property: rendering is deterministic
    #[test]
    fn rendering_is_deterministic(raw in valid_payload_strategy()) {
        let request = validate(&raw).expect("payload satisfies all constraints");
        let first = render(&request);
        let second = render(&request);
        prop_assert_eq!(first.subject, second.subject);
        prop_assert_eq!(first.html, second.html);
    }
}

fn base_valid() -> RawConsultation {
    RawConsultation {
        name: "Jane Doe".to_string(),
        age: "34".to_string(),
        contact_method: "email".to_string(),
        email: Some("jane@example.com".to_string()),
        phone: None,
        services: vec!["term-life".to_string()],
        date: "2025-06-01".to_string(),
        time: "10:00 AM".to_string(),
    }
}
