use axum::{
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_governor::{
    governor::GovernorConfigBuilder, key_extractor::SmartIpKeyExtractor, GovernorLayer,
};
use tower_http::{
    catch_panic::CatchPanicLayer, cors::CorsLayer, limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::Config;
use crate::consultation_handler;
use crate::mailer::MailerClient;
use crate::models::{
    ConsultationResponse, ErrorResponse, FieldError, RawConsultation, ValidationErrorResponse,
};

/// Shared application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Config,
    /// Client for the transactional-email provider.
    pub mailer: MailerClient,
}

#[derive(OpenApi)]
#[openapi(
    paths(health, crate::consultation_handler::submit_consultation),
    components(schemas(
        RawConsultation,
        FieldError,
        ConsultationResponse,
        ValidationErrorResponse,
        ErrorResponse
    ))
)]
struct ApiDoc;

/// Health check endpoint.
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is healthy"))
)]
pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": "wanderi-consultation-api",
            "version": env!("CARGO_PKG_VERSION")
        })),
    )
}

/// Assembles the application router.
///
/// Route and middleware layout:
/// - `/health` bypasses rate limiting (deploy platform probes).
/// - The booking page and the submission endpoint sit behind a request body
///   limit and a per-IP rate limiter.
/// - Swagger UI and the generated OpenAPI document are served at `/docs`.
///
/// The caller must serve this with connect info so the rate limiter can key
/// on the peer address.
pub fn router(state: Arc<AppState>) -> Router {
    // Rate limiter: 10 requests/second per IP, burst of 20
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(10)
            .burst_size(20)
            .key_extractor(SmartIpKeyExtractor)
            .finish()
            .unwrap(),
    );

    let protected_routes = Router::new()
        .route("/", get(booking_page))
        .route(
            "/api/v1/consultations",
            post(consultation_handler::submit_consultation),
        )
        .layer(
            ServiceBuilder::new()
                // Consultation payloads are tiny; anything larger is abuse
                .layer(RequestBodyLimitLayer::new(64 * 1024))
                .layer(GovernorLayer {
                    config: governor_conf,
                }),
        );

    Router::new()
        .route("/health", get(health))
        .merge(protected_routes)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(CatchPanicLayer::new())
}

/// Serves the consultation booking page.
///
/// The marketing site proper lives elsewhere; this is a minimal shell around
/// the submission pipeline so the service is usable on its own.
async fn booking_page() -> impl IntoResponse {
    let html = r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Wanderi Insurance - Book a Consultation</title>
    <style>
        body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; max-width: 580px; margin: 0 auto; padding: 24px; color: #1f2937; }
        label { display: block; margin: 16px 0 4px; font-weight: 600; }
        input, select { width: 100%; padding: 8px; border: 1px solid #d1d5db; border-radius: 6px; }
        .service { font-weight: 400; }
        .service input { width: auto; margin-right: 8px; }
        button { margin-top: 24px; width: 100%; padding: 12px; background: #1f2937; color: white; border: none; border-radius: 6px; font-size: 16px; cursor: pointer; }
        button:disabled { opacity: 0.6; cursor: wait; }
        .error { color: #b91c1c; font-size: 13px; margin: 4px 0 0; }
        .notice { margin-top: 16px; font-size: 14px; }
    </style>
</head>
<body>
    <h1>Book a Consultation</h1>
    <form id='consultation-form'>
        <label>Full Name <input name='name' placeholder='John Doe'></label>
        <label>Age <input name='age' type='number' min='18' max='100' step='1' placeholder='e.g., 35'></label>
        <label>Preferred Contact
            <select name='contactMethod'>
                <option value='email'>Email</option>
                <option value='phone'>Phone</option>
            </select>
        </label>
        <label id='email-field'>Email Address <input name='email' type='email' placeholder='john.doe@example.com'></label>
        <label id='phone-field' hidden>Phone Number <input name='phone' type='tel' maxlength='10' placeholder='2538678900'></label>
        <label>Services of Interest</label>
        <label class='service'><input type='checkbox' name='services' value='term-life'>Term Life Insurance</label>
        <label class='service'><input type='checkbox' name='services' value='annuity'>Annuities</label>
        <label class='service'><input type='checkbox' name='services' value='iul'>IUL (Indexed Universal Life)</label>
        <label>Preferred Date <input name='date' type='date'></label>
        <label>Preferred Time
            <select name='time'>
                <option value=''>Select a time</option>
            </select>
        </label>
        <button type='submit'>Submit Request</button>
        <p class='notice' id='notice'></p>
    </form>
    <script>
        const slots = ['09:00 AM','09:30 AM','10:00 AM','10:30 AM','11:00 AM','11:30 AM',
                       '01:00 PM','01:30 PM','02:00 PM','02:30 PM','03:00 PM','03:30 PM',
                       '04:00 PM','04:30 PM'];
        const form = document.getElementById('consultation-form');
        const timeSelect = form.elements.time;
        slots.forEach(s => timeSelect.add(new Option(s, s)));

        const yesterday = new Date(Date.now() - 86400000);
        form.elements.date.min = yesterday.toISOString().slice(0, 10);

        form.elements.contactMethod.addEventListener('change', e => {
            const email = e.target.value === 'email';
            document.getElementById('email-field').hidden = !email;
            document.getElementById('phone-field').hidden = email;
            form.elements[email ? 'phone' : 'email'].value = '';
        });
        form.elements.phone.addEventListener('input', e => {
            e.target.value = e.target.value.replace(/\D/g, '');
        });

        form.addEventListener('submit', async e => {
            e.preventDefault();
            const button = form.querySelector('button');
            const notice = document.getElementById('notice');
            const data = {
                name: form.elements.name.value,
                age: form.elements.age.value,
                contactMethod: form.elements.contactMethod.value,
                email: form.elements.email.value || undefined,
                phone: form.elements.phone.value || undefined,
                services: [...form.querySelectorAll('input[name=services]:checked')].map(c => c.value),
                date: form.elements.date.value,
                time: form.elements.time.value,
            };
            button.disabled = true;
            notice.textContent = 'Submitting...';
            try {
                const response = await fetch('/api/v1/consultations', {
                    method: 'POST',
                    headers: { 'Content-Type': 'application/json' },
                    body: JSON.stringify(data),
                });
                const body = await response.json();
                if (!response.ok) {
                    notice.textContent = body.details
                        ? body.details.map(d => d.message).join(' ')
                        : 'Sorry, there was an error submitting your request. Please try again or contact us directly.';
                } else {
                    notice.textContent = 'Consultation request submitted successfully! We will contact you soon.';
                    form.reset();
                }
            } catch (err) {
                notice.textContent = 'Sorry, there was an error submitting your request. Please try again or contact us directly.';
            } finally {
                button.disabled = false;
            }
        });
    </script>
</body>
</html>
"##;
    Html(html)
}
