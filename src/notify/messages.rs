//! Built-in email templates and the variables each one is rendered with.
//!
//! Stored templates (`email_templates`) take precedence; these defaults are
//! used when a key has no row. Both use the same `{placeholder}` names.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::database::models::ProjectRequest;
use crate::services::template::TemplateKey;

pub const DEFAULT_INCLUDES: [&str; 5] = [
    "Complete source code",
    "Project report",
    "PowerPoint presentation",
    "README documentation",
    "Setup instructions",
];

pub struct DefaultTemplate {
    pub subject: &'static str,
    pub html: &'static str,
}

pub fn default_template(key: TemplateKey) -> DefaultTemplate {
    match key {
        TemplateKey::AdminNotification => DefaultTemplate {
            subject: "New Request: {project_title}",
            html: r#"<div style="font-family: Inter, sans-serif; max-width: 600px; margin: 0 auto;">
  <h2>New Project Request</h2>
  <p><strong>Project:</strong> {project_title}</p>
  <p><strong>Name:</strong> {fullName}</p>
  <p><strong>Email:</strong> {email}</p>
  <p><strong>Phone:</strong> {phone}</p>
  <p><strong>College:</strong> {college}</p>
  <p><strong>Message:</strong> {message}</p>
  <p><strong>Requested at:</strong> {requestedAt}</p>
  <p>
    <a href="{whatsapp_link}">Open WhatsApp</a> |
    <a href="{admin_link}">View in Admin</a>
  </p>
</div>"#,
        },
        TemplateKey::RequesterConfirmation => DefaultTemplate {
            subject: "Your Request Received: {project_title}",
            html: r#"<div style="font-family: Inter, sans-serif; max-width: 600px; margin: 0 auto;">
  <h2>Request Received</h2>
  <p>Hi <strong>{fullName}</strong>,</p>
  <p>Thank you for your interest. We have received your request and will review it shortly.</p>
  <p><strong>Project:</strong> {project_title}<br/>
     <strong>College:</strong> {college}<br/>
     <strong>Price:</strong> {projectPrice}<br/>
     <strong>Request ID:</strong> {requestId}</p>
  <p>Upon approval you will receive your download link by email.</p>
  <p>Questions? Reach us on <a href="https://wa.me/{whatsapp}">WhatsApp</a>.</p>
</div>"#,
        },
        TemplateKey::ProjectApproved => DefaultTemplate {
            subject: "Your Project is Ready: {project_title}",
            html: r#"<div style="font-family: Inter, sans-serif; max-width: 600px; margin: 0 auto;">
  <h2>Your project has been approved</h2>
  <p>Your request for <strong>{project_title}</strong> is approved.</p>
  <p><a href="{download_link}">Download Project</a></p>
  <p>The download link is valid for 30 days.</p>
  <p>What's included: {includes_list}</p>
  <p>Need help? Reach us on <a href="https://wa.me/{whatsapp}">WhatsApp</a>.</p>
</div>"#,
        },
    }
}

pub fn admin_notification_vars(
    project_title: &str,
    request: &ProjectRequest,
    whatsapp_link: &str,
    admin_link: &str,
) -> HashMap<String, String> {
    vars([
        ("project_title", project_title.to_string()),
        ("fullName", request.user_name.clone()),
        ("email", request.user_email.clone()),
        ("phone", request.user_phone.clone()),
        ("college", request.college_name.clone()),
        ("message", request.message.clone().unwrap_or_default()),
        ("requestedAt", format_timestamp(request.created_at)),
        ("whatsapp_link", whatsapp_link.to_string()),
        ("admin_link", admin_link.to_string()),
    ])
}

pub fn requester_confirmation_vars(
    project_title: &str,
    request: &ProjectRequest,
    price: Decimal,
    whatsapp: &str,
) -> HashMap<String, String> {
    vars([
        ("project_title", project_title.to_string()),
        ("fullName", request.user_name.clone()),
        ("college", request.college_name.clone()),
        ("projectPrice", format!("₹{}", format_inr(price))),
        ("requestId", request.id.to_string()),
        ("whatsapp", whatsapp.to_string()),
    ])
}

pub fn project_approved_vars(project_title: &str, download_link: &str, whatsapp: &str) -> HashMap<String, String> {
    let includes_list = DEFAULT_INCLUDES.join(", ");
    vars([
        ("project_title", project_title.to_string()),
        ("download_link", download_link.to_string()),
        ("includes_list", includes_list),
        ("whatsapp", whatsapp.to_string()),
    ])
}

fn vars<const N: usize>(pairs: [(&str, String); N]) -> HashMap<String, String> {
    pairs.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
}

fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format("%d %b %Y, %H:%M UTC").to_string()
}

/// Indian digit grouping (`12,34,567.5`), at most two decimals, trailing zeros dropped
pub fn format_inr(amount: Decimal) -> String {
    let rounded = amount
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .normalize();
    let text = rounded.abs().to_string();
    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (text.as_str(), None),
    };

    let mut grouped = group_indian(int_part);
    if let Some(frac) = frac_part {
        grouped.push('.');
        grouped.push_str(frac);
    }
    if rounded.is_sign_negative() && !rounded.is_zero() {
        grouped.insert(0, '-');
    }
    grouped
}

fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    format!("{},{}", groups.join(","), tail)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::template::render;
    use std::str::FromStr;

    #[test]
    fn indian_grouping() {
        assert_eq!(format_inr(Decimal::from(0)), "0");
        assert_eq!(format_inr(Decimal::from(999)), "999");
        assert_eq!(format_inr(Decimal::from(1499)), "1,499");
        assert_eq!(format_inr(Decimal::from(123456)), "1,23,456");
        assert_eq!(format_inr(Decimal::from(12345678)), "1,23,45,678");
    }

    #[test]
    fn drops_trailing_zero_decimals() {
        assert_eq!(format_inr(Decimal::from_str("1999.00").unwrap()), "1,999");
        assert_eq!(format_inr(Decimal::from_str("1999.50").unwrap()), "1,999.5");
        assert_eq!(format_inr(Decimal::from_str("10.257").unwrap()), "10.26");
    }

    #[test]
    fn defaults_use_every_declared_variable() {
        for key in TemplateKey::ALL {
            let template = default_template(key);
            let text = format!("{}{}", template.subject, template.html);
            for var in key.variables() {
                assert!(
                    text.contains(&format!("{{{}}}", var)),
                    "{} default is missing {{{}}}",
                    key,
                    var
                );
            }
        }
    }

    #[test]
    fn approved_default_renders_link() {
        let template = default_template(TemplateKey::ProjectApproved);
        let vars = project_approved_vars("Library <Manager>", "https://x.test/api/download?requestId=1", "919876543210");
        let (html, subject) = render(template.html, template.subject, &vars);
        assert_eq!(subject, "Your Project is Ready: Library &lt;Manager&gt;");
        assert!(html.contains(r#"href="https://x.test/api/download?requestId=1""#));
        assert!(html.contains("Complete source code"));
        assert!(!html.contains("{includes_list}"));
    }
}
