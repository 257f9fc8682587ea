use chrono::{Days, NaiveDate};
use std::time::Duration;
use url::Url;

use crate::consultation::{self, ContactMethod, Service};
use crate::models::{ConsultationResponse, FieldError, RawConsultation};

/// Confirmation shown after a dispatched request.
pub const SUCCESS_MESSAGE: &str =
    "Consultation request submitted successfully! We will contact you soon.";

/// Single generic message for any post-submit failure. Field-level problems
/// never reach this; they are caught locally before any network call.
pub const FAILURE_MESSAGE: &str =
    "Sorry, there was an error submitting your request. Please try again or contact us directly.";

/// Why a submission attempt did not produce a success response.
#[derive(Debug, Clone)]
pub enum SubmitError {
    /// The endpoint answered with a non-success status.
    Rejected(String),
    /// The request never completed (network unreachable, timeout).
    Network(String),
}

/// Anything able to deliver a consultation payload to the endpoint.
/// Production uses `HttpSubmitter`; tests inject fakes to count calls.
pub trait SubmitConsultation {
    fn submit(
        &self,
        payload: &RawConsultation,
    ) -> impl std::future::Future<Output = Result<ConsultationResponse, SubmitError>> + Send;
}

/// Submission lifecycle of one form instance.
///
/// Idle -> Submitting -> {Success, Failed}; Failed returns to Idle on the
/// next user edit. Submitting -> Idle does not exist: a dispatched request
/// cannot be cancelled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormState {
    Idle,
    Submitting,
    Success { message: String },
    Failed { error: String },
}

/// Current user input, stored exactly as typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormFields {
    pub name: String,
    pub age: String,
    pub contact_method: ContactMethod,
    pub email: String,
    pub phone: String,
    pub services: Vec<Service>,
    pub date: Option<NaiveDate>,
    pub time: String,
}

impl Default for FormFields {
    fn default() -> Self {
        Self {
            name: String::new(),
            age: String::new(),
            contact_method: ContactMethod::Email,
            email: String::new(),
            phone: String::new(),
            services: Vec::new(),
            date: None,
            time: String::new(),
        }
    }
}

/// The consultation form controller.
///
/// Owns the field values, the submission state machine, and per-field error
/// messages. Local validation reuses the same schema module as the server,
/// so the form can never accept something the endpoint would reject on
/// shape alone.
pub struct ConsultationForm<S> {
    fields: FormFields,
    state: FormState,
    field_errors: Vec<FieldError>,
    today: NaiveDate,
    submitter: S,
}

impl<S: SubmitConsultation> ConsultationForm<S> {
    /// `today` anchors the date-picker minimum ("no earlier than yesterday")
    /// and is injected so the rule is testable with a fixed clock.
    pub fn new(submitter: S, today: NaiveDate) -> Self {
        Self {
            fields: FormFields::default(),
            state: FormState::Idle,
            field_errors: Vec::new(),
            today,
            submitter,
        }
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn fields(&self) -> &FormFields {
        &self.fields
    }

    pub fn field_errors(&self) -> &[FieldError] {
        &self.field_errors
    }

    /// Any edit while Failed returns the form to Idle for a clean retry.
    fn touch(&mut self) {
        if matches!(self.state, FormState::Failed { .. }) {
            self.state = FormState::Idle;
        }
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.fields.name = name.into();
        self.touch();
    }

    pub fn set_age(&mut self, age: impl Into<String>) {
        self.fields.age = age.into();
        self.touch();
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.fields.email = email.into();
        self.touch();
    }

    /// Phone input accepts digits only; everything else is stripped as typed.
    pub fn set_phone(&mut self, phone: &str) {
        self.fields.phone = phone.chars().filter(|c| c.is_ascii_digit()).collect();
        self.touch();
    }

    pub fn set_time(&mut self, time: impl Into<String>) {
        self.fields.time = time.into();
        self.touch();
    }

    /// Switching contact method clears the now-irrelevant field and any
    /// error attached to it.
    pub fn set_contact_method(&mut self, method: ContactMethod) {
        self.fields.contact_method = method;
        let cleared = match method {
            ContactMethod::Email => {
                self.fields.phone.clear();
                "phone"
            }
            ContactMethod::Phone => {
                self.fields.email.clear();
                "email"
            }
        };
        self.field_errors.retain(|e| e.field != cleared);
        self.touch();
    }

    pub fn toggle_service(&mut self, service: Service) {
        if let Some(index) = self.fields.services.iter().position(|s| *s == service) {
            self.fields.services.remove(index);
        } else {
            self.fields.services.push(service);
        }
        self.touch();
    }

    /// Date-picker constraint: dates earlier than yesterday are not
    /// selectable. Returns whether the date was accepted.
    pub fn set_date(&mut self, date: NaiveDate) -> bool {
        let yesterday = self.today - Days::new(1);
        if date < yesterday {
            return false;
        }
        self.fields.date = Some(date);
        self.touch();
        true
    }

    /// Serialize the current fields into the wire payload. The contact field
    /// not matching the chosen method is omitted entirely.
    pub fn payload(&self) -> RawConsultation {
        let optional = |value: &str| {
            if value.is_empty() {
                None
            } else {
                Some(value.to_string())
            }
        };

        RawConsultation {
            name: self.fields.name.clone(),
            age: self.fields.age.clone(),
            contact_method: self.fields.contact_method.as_str().to_string(),
            email: match self.fields.contact_method {
                ContactMethod::Email => optional(&self.fields.email),
                ContactMethod::Phone => None,
            },
            phone: match self.fields.contact_method {
                ContactMethod::Phone => optional(&self.fields.phone),
                ContactMethod::Email => None,
            },
            services: self
                .fields
                .services
                .iter()
                .map(|s| s.as_code().to_string())
                .collect(),
            date: self
                .fields
                .date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            time: self.fields.time.clone(),
        }
    }

    /// Run the submission lifecycle once.
    ///
    /// Only the Idle state accepts a submit. Local validation failure keeps
    /// the form Idle with field errors and performs no network call; a valid
    /// payload makes exactly one call. Success clears the form back to
    /// defaults, failure preserves every entered value for retry.
    pub async fn submit(&mut self) {
        if self.state != FormState::Idle {
            return;
        }

        let payload = self.payload();
        if let Err(errors) = consultation::validate(&payload) {
            self.field_errors = errors;
            return;
        }

        self.field_errors.clear();
        self.state = FormState::Submitting;

        match self.submitter.submit(&payload).await {
            Ok(_) => {
                self.fields = FormFields::default();
                self.state = FormState::Success {
                    message: SUCCESS_MESSAGE.to_string(),
                };
            }
            Err(_) => {
                self.state = FormState::Failed {
                    error: FAILURE_MESSAGE.to_string(),
                };
            }
        }
    }
}

/// Production submitter: posts the payload to the consultation endpoint.
#[derive(Debug, Clone)]
pub struct HttpSubmitter {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpSubmitter {
    pub fn new(base_url: &str) -> Result<Self, SubmitError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| SubmitError::Network(e.to_string()))?;

        let endpoint = Url::parse(base_url)
            .and_then(|base| base.join("api/v1/consultations"))
            .map_err(|e| SubmitError::Network(format!("Invalid endpoint URL: {}", e)))?;

        Ok(Self { client, endpoint })
    }
}

impl SubmitConsultation for HttpSubmitter {
    async fn submit(&self, payload: &RawConsultation) -> Result<ConsultationResponse, SubmitError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(payload)
            .send()
            .await
            .map_err(|e| SubmitError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(SubmitError::Rejected(format!(
                "Endpoint returned {}: {}",
                status, error_text
            )));
        }

        response
            .json()
            .await
            .map_err(|e| SubmitError::Network(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct FakeSubmitter {
        calls: Arc<AtomicUsize>,
        fail: bool,
    }

    impl SubmitConsultation for FakeSubmitter {
        async fn submit(
            &self,
            _payload: &RawConsultation,
        ) -> Result<ConsultationResponse, SubmitError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(SubmitError::Network("connection refused".to_string()))
            } else {
                Ok(ConsultationResponse {
                    message: "Consultation request sent successfully".to_string(),
                    id: Some("msg_123".to_string()),
                })
            }
        }
    }

    fn form_with(fail: bool) -> (ConsultationForm<FakeSubmitter>, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let submitter = FakeSubmitter {
            calls: calls.clone(),
            fail,
        };
        let today = NaiveDate::from_ymd_opt(2025, 5, 20).unwrap();
        (ConsultationForm::new(submitter, today), calls)
    }

    fn fill_valid(form: &mut ConsultationForm<FakeSubmitter>) {
        form.set_name("Jane Doe");
        form.set_age("34");
        form.set_email("jane@example.com");
        form.toggle_service(Service::TermLife);
        assert!(form.set_date(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()));
        form.set_time("10:00 AM");
    }

    #[tokio::test]
    async fn test_invalid_form_makes_no_network_call() {
        let (mut form, calls) = form_with(false);
        form.set_name("J");

        form.submit().await;

        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(*form.state(), FormState::Idle);
        assert!(!form.field_errors().is_empty());
    }

    #[tokio::test]
    async fn test_successful_submit_calls_once_and_resets() {
        let (mut form, calls) = form_with(false);
        fill_valid(&mut form);

        form.submit().await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(
            *form.state(),
            FormState::Success {
                message: SUCCESS_MESSAGE.to_string()
            }
        );
        assert_eq!(*form.fields(), FormFields::default());
    }

    #[tokio::test]
    async fn test_failed_submit_preserves_fields() {
        let (mut form, calls) = form_with(true);
        fill_valid(&mut form);

        form.submit().await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(
            *form.state(),
            FormState::Failed {
                error: FAILURE_MESSAGE.to_string()
            }
        );
        assert_eq!(form.fields().name, "Jane Doe");
        assert_eq!(form.fields().email, "jane@example.com");

        // Next edit returns the form to Idle for a retry
        form.set_name("Jane Doe");
        assert_eq!(*form.state(), FormState::Idle);
    }

    #[tokio::test]
    async fn test_submit_ignored_while_submitting() {
        let (mut form, calls) = form_with(false);
        fill_valid(&mut form);
        form.state = FormState::Submitting;

        form.submit().await;

        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_switching_contact_method_clears_other_field() {
        let (mut form, _calls) = form_with(false);
        form.set_email("jane@example.com");

        form.set_contact_method(ContactMethod::Phone);
        assert_eq!(form.fields().email, "");

        form.set_phone("(253) 867-8900");
        assert_eq!(form.fields().phone, "2538678900");

        form.set_contact_method(ContactMethod::Email);
        assert_eq!(form.fields().phone, "");
    }

    #[tokio::test]
    async fn test_switching_contact_method_clears_stale_errors() {
        let (mut form, _calls) = form_with(false);
        fill_valid(&mut form);
        form.set_email("not-an-email");

        form.submit().await;
        assert!(form.field_errors().iter().any(|e| e.field == "email"));

        form.set_contact_method(ContactMethod::Phone);
        assert!(!form.field_errors().iter().any(|e| e.field == "email"));
    }

    #[test]
    fn test_date_picker_rejects_dates_before_yesterday() {
        let (mut form, _calls) = form_with(false);

        assert!(!form.set_date(NaiveDate::from_ymd_opt(2025, 5, 18).unwrap()));
        assert_eq!(form.fields().date, None);

        // Yesterday and today are both selectable
        assert!(form.set_date(NaiveDate::from_ymd_opt(2025, 5, 19).unwrap()));
        assert!(form.set_date(NaiveDate::from_ymd_opt(2025, 5, 20).unwrap()));
    }

    #[test]
    fn test_payload_omits_contact_field_for_other_method() {
        let (mut form, _calls) = form_with(false);
        form.set_email("jane@example.com");

        let payload = form.payload();
        assert_eq!(payload.email.as_deref(), Some("jane@example.com"));
        assert_eq!(payload.phone, None);
        assert_eq!(payload.contact_method, "email");
    }
}
