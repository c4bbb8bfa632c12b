//! Email templates for new appointment requests.

use crate::models::AppointmentRequest;
use crate::Config;

/// A formatted email ready for dispatch.
#[derive(Debug, Clone, PartialEq)]
pub struct Email {
    pub to: String,
    pub subject: String,
    pub text: String,
    pub html: String,
}

/// Business details shown in outgoing mail.
#[derive(Debug, Clone)]
pub struct BusinessProfile {
    pub name: String,
    pub phone: String,
    pub email: String,
}

impl From<&Config> for BusinessProfile {
    fn from(config: &Config) -> Self {
        Self {
            name: config.business_name.clone(),
            phone: config.business_phone.clone(),
            email: config.operator_email.clone(),
        }
    }
}

fn or_default<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.trim().is_empty() {
        fallback
    } else {
        value
    }
}

/// Escape user-supplied text for the HTML part.
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

/// Alert to the operator that a new request came in.
pub fn operator_alert(record: &AppointmentRequest, profile: &BusinessProfile) -> Email {
    let date = or_default(&record.preferred_date, "Not specified");
    let time = or_default(&record.preferred_time, "Not specified");
    let details = or_default(&record.additional_details, "None provided");
    let timestamp = record.created_at_rfc3339();

    let subject = format!("New Appointment Request - {}", record.service_type);

    let text = format!(
        "New Appointment Request\n\
         \n\
         Client Information:\n\
         Name: {name}\n\
         Email: {email}\n\
         Phone: {phone}\n\
         Service Type: {service}\n\
         Preferred Date: {date}\n\
         Preferred Time: {time}\n\
         \n\
         Additional Details:\n\
         {details}\n\
         \n\
         Submission ID: {id}\n\
         Timestamp: {timestamp}\n\
         Source: {source}\n\
         \n\
         Please contact the client within 24 hours to confirm the appointment.\n",
        name = record.full_name,
        email = record.email,
        phone = record.phone,
        service = record.service_type,
        id = record.id,
        source = record.source,
    );

    let html = format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="UTF-8"></head>
<body style="font-family: sans-serif; padding: 20px;">
    <h2>New Appointment Request</h2>
    <p>You have received a new appointment request through your website.</p>
    <h3>Client Information:</h3>
    <ul>
        <li><strong>Name:</strong> {name}</li>
        <li><strong>Email:</strong> {email}</li>
        <li><strong>Phone:</strong> {phone}</li>
        <li><strong>Service Type:</strong> {service}</li>
        <li><strong>Preferred Date:</strong> {date}</li>
        <li><strong>Preferred Time:</strong> {time}</li>
    </ul>
    <h3>Additional Details:</h3>
    <p>{details}</p>
    <h3>Submission Details:</h3>
    <ul>
        <li><strong>Submission ID:</strong> {id}</li>
        <li><strong>Timestamp:</strong> {timestamp}</li>
        <li><strong>Source:</strong> {source}</li>
    </ul>
    <p>Please contact the client within 24 hours to confirm the appointment.</p>
    <hr>
    <p style="color: #666; font-size: 12px;">Sent by the {business} website</p>
</body>
</html>"#,
        name = escape_html(&record.full_name),
        email = escape_html(&record.email),
        phone = escape_html(&record.phone),
        service = escape_html(&record.service_type),
        date = escape_html(date),
        time = escape_html(time),
        details = escape_html(details).replace('\n', "<br>"),
        id = record.id,
        source = escape_html(&record.source),
        business = escape_html(&profile.name),
    );

    Email {
        to: profile.email.clone(),
        subject,
        text,
        html,
    }
}

/// Confirmation to the client that their request was received.
pub fn client_confirmation(record: &AppointmentRequest, profile: &BusinessProfile) -> Email {
    let date = or_default(&record.preferred_date, "Not specified");
    let time = or_default(&record.preferred_time, "Not specified");

    let subject = format!("Appointment Request Received - {}", profile.name);

    let text = format!(
        "Thank You for Your Appointment Request\n\
         \n\
         Dear {name},\n\
         \n\
         Thank you for choosing {business} for your notarization needs. We have received your \
         appointment request and will contact you within 24 hours to confirm your booking.\n\
         \n\
         Your Request Details:\n\
         Service Type: {service}\n\
         Preferred Date: {date}\n\
         Preferred Time: {time}\n\
         Reference ID: {id}\n\
         \n\
         What's Next?\n\
         Our team will review your request and contact you at {phone} or {email} to:\n\
         - Confirm your appointment details\n\
         - Discuss any specific requirements\n\
         - Provide pricing information\n\
         - Answer any questions you may have\n\
         \n\
         Need Immediate Assistance?\n\
         If you have an urgent request or need to speak with us immediately, please call us at {business_phone}.\n\
         \n\
         Thank you for choosing {business}!\n\
         \n\
         Best regards,\n\
         The {business} Team\n\
         {business_phone}\n\
         {business_email}\n",
        name = record.full_name,
        business = profile.name,
        service = record.service_type,
        id = record.id,
        phone = record.phone,
        email = record.email,
        business_phone = profile.phone,
        business_email = profile.email,
    );

    let html = format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="UTF-8"></head>
<body style="font-family: sans-serif; padding: 20px;">
    <h2>Thank You for Your Appointment Request</h2>
    <p>Dear {name},</p>
    <p>Thank you for choosing {business} for your notarization needs. We have received your appointment request and will contact you within 24 hours to confirm your booking.</p>
    <h3>Your Request Details:</h3>
    <ul>
        <li><strong>Service Type:</strong> {service}</li>
        <li><strong>Preferred Date:</strong> {date}</li>
        <li><strong>Preferred Time:</strong> {time}</li>
        <li><strong>Reference ID:</strong> {id}</li>
    </ul>
    <h3>What's Next?</h3>
    <p>Our team will review your request and contact you at {phone} or {email} to:</p>
    <ul>
        <li>Confirm your appointment details</li>
        <li>Discuss any specific requirements</li>
        <li>Provide pricing information</li>
        <li>Answer any questions you may have</li>
    </ul>
    <h3>Need Immediate Assistance?</h3>
    <p>If you have an urgent request or need to speak with us immediately, please call us at {business_phone}.</p>
    <p>Thank you for choosing {business}!</p>
    <p>Best regards,<br>
    The {business} Team<br>
    {business_phone}<br>
    {business_email}</p>
</body>
</html>"#,
        name = escape_html(&record.full_name),
        business = escape_html(&profile.name),
        service = escape_html(&record.service_type),
        date = escape_html(date),
        time = escape_html(time),
        id = record.id,
        phone = escape_html(&record.phone),
        email = escape_html(&record.email),
        business_phone = escape_html(&profile.phone),
        business_email = escape_html(&profile.email),
    );

    Email {
        to: record.email.clone(),
        subject,
        text,
        html,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ContactSubmission;
    use chrono::Utc;
    use uuid::Uuid;

    fn profile() -> BusinessProfile {
        BusinessProfile {
            name: "Poli Notary".into(),
            phone: "(555) 123-4567".into(),
            email: "info@polinotary.com".into(),
        }
    }

    fn record(details: &str) -> AppointmentRequest {
        let submission = ContactSubmission {
            full_name: Some("Jane <Doe>".into()),
            email: Some("jane@example.com".into()),
            phone: Some("555-0100".into()),
            service_type: Some("real-estate".into()),
            preferred_date: Some("2026-11-02".into()),
            additional_details: Some(details.into()),
            ..Default::default()
        };
        AppointmentRequest::new(submission, Uuid::new_v4(), Utc::now()).unwrap()
    }

    #[test]
    fn test_operator_alert_goes_to_operator() {
        let record = record("Two deeds");
        let email = operator_alert(&record, &profile());

        assert_eq!(email.to, "info@polinotary.com");
        assert_eq!(email.subject, "New Appointment Request - real-estate");
        assert!(email.text.contains("Preferred Date: 2026-11-02"));
        assert!(email.text.contains("Preferred Time: Not specified"));
        assert!(email.text.contains(&format!("Submission ID: {}", record.id)));
        assert!(email.text.contains("Source: website"));
        assert!(email.html.contains("Two deeds"));
    }

    #[test]
    fn test_empty_details_fallback() {
        let email = operator_alert(&record(""), &profile());
        assert!(email.text.contains("None provided"));
        assert!(email.html.contains("<p>None provided</p>"));
    }

    #[test]
    fn test_client_confirmation_goes_to_client() {
        let record = record("");
        let email = client_confirmation(&record, &profile());

        assert_eq!(email.to, "jane@example.com");
        assert_eq!(email.subject, "Appointment Request Received - Poli Notary");
        assert!(email.text.contains("Dear Jane <Doe>,"));
        assert!(email.text.contains(&format!("Reference ID: {}", record.id)));
        assert!(email.text.contains("contact you at 555-0100 or jane@example.com"));
    }

    #[test]
    fn test_html_escapes_user_input() {
        let record = record("<script>alert('x')</script>");
        let alert = operator_alert(&record, &profile());
        let confirmation = client_confirmation(&record, &profile());

        assert!(alert.html.contains("Jane &lt;Doe&gt;"));
        assert!(!alert.html.contains("<script>"));
        assert!(alert.html.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"));
        assert!(confirmation.html.contains("Dear Jane &lt;Doe&gt;,"));
    }
}
