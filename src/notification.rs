use chrono::NaiveDate;

use crate::consultation::{ConsultationRequest, ContactDetail};

/// Rendered notification email: subject line plus HTML body.
///
/// Built once per validated request, handed to the mail transport, then
/// discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationDocument {
    pub subject: String,
    pub html: String,
}

/// Human-readable label for a service code. Unrecognized codes pass through
/// verbatim so the document never loses information.
pub fn service_label(code: &str) -> &str {
    match code {
        "term-life" => "Term Life Insurance",
        "annuity" => "Annuities",
        "iul" => "IUL (Indexed Universal Life)",
        other => other,
    }
}

/// Long-form en-US calendar date, e.g. "Sunday, June 1, 2025".
pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

/// Map a validated consultation request into the operator notification.
///
/// Pure and deterministic: the same request always yields byte-identical
/// output.
pub fn render(request: &ConsultationRequest) -> NotificationDocument {
    let subject = format!("New Consultation Request from {}", request.name);

    let contact_line = match &request.contact {
        ContactDetail::Email(addr) => format!(
            "<p style=\"{TEXT}\"><strong>Email:</strong> {}</p>",
            escape_html(addr)
        ),
        ContactDetail::Phone(digits) => format!(
            "<p style=\"{TEXT}\"><strong>Phone:</strong> {}</p>",
            escape_html(digits)
        ),
    };

    let services_list: String = request
        .services
        .iter()
        .map(|service| {
            format!(
                "<p style=\"{TEXT}\">&bull; {}</p>",
                escape_html(service_label(service.as_code()))
            )
        })
        .collect();

    let html = format!(
        r#"<html>
<body style="background-color:#ffffff;font-family:-apple-system,BlinkMacSystemFont,'Segoe UI',Roboto,sans-serif;">
<div style="margin:0 auto;padding:20px 0 48px;max-width:580px;">
<h1 style="color:#1f2937;font-size:24px;font-weight:bold;margin:40px 0;">New Consultation Request</h1>
<div style="margin:24px 0;">
<h2 style="{HEADING}">Client Information</h2>
<p style="{TEXT}"><strong>Name:</strong> {name}</p>
<p style="{TEXT}"><strong>Age:</strong> {age}</p>
<p style="{TEXT}"><strong>Preferred Contact Method:</strong> {method}</p>
{contact_line}</div>
<hr style="{RULE}"/>
<div style="margin:24px 0;">
<h2 style="{HEADING}">Services of Interest</h2>
{services_list}</div>
<hr style="{RULE}"/>
<div style="margin:24px 0;">
<h2 style="{HEADING}">Preferred Appointment</h2>
<p style="{TEXT}"><strong>Date:</strong> {date}</p>
<p style="{TEXT}"><strong>Time:</strong> {time}</p>
</div>
<hr style="{RULE}"/>
<p style="color:#6b7280;font-size:12px;line-height:20px;margin:32px 0 0;text-align:center;">This consultation request was submitted through the Wanderi Insurance website.</p>
</div>
</body>
</html>"#,
        name = escape_html(&request.name),
        age = request.age,
        method = match request.contact {
            ContactDetail::Email(_) => "Email",
            ContactDetail::Phone(_) => "Phone",
        },
        contact_line = contact_line,
        services_list = services_list,
        date = format_long_date(request.date),
        time = escape_html(&request.time),
    );

    NotificationDocument { subject, html }
}

const HEADING: &str = "color:#374151;font-size:18px;font-weight:bold;margin:20px 0 10px;";
const TEXT: &str = "color:#374151;font-size:14px;line-height:24px;margin:8px 0;";
const RULE: &str = "border-color:#e5e7eb;margin:20px 0;";

/// Minimal HTML entity escaping for user-supplied values.
fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
