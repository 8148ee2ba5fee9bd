use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// The three editable email templates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateKey {
    AdminNotification,
    RequesterConfirmation,
    ProjectApproved,
}

impl TemplateKey {
    pub const ALL: [TemplateKey; 3] = [
        TemplateKey::AdminNotification,
        TemplateKey::RequesterConfirmation,
        TemplateKey::ProjectApproved,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateKey::AdminNotification => "admin_notification",
            TemplateKey::RequesterConfirmation => "requester_confirmation",
            TemplateKey::ProjectApproved => "project_approved",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            TemplateKey::AdminNotification => "Admin Notification",
            TemplateKey::RequesterConfirmation => "Requester Confirmation",
            TemplateKey::ProjectApproved => "Project Approved",
        }
    }

    /// Placeholders the workflow fills for this template
    pub fn variables(&self) -> &'static [&'static str] {
        match self {
            TemplateKey::AdminNotification => &[
                "project_title",
                "fullName",
                "email",
                "phone",
                "college",
                "message",
                "requestedAt",
                "whatsapp_link",
                "admin_link",
            ],
            TemplateKey::RequesterConfirmation => &[
                "project_title",
                "fullName",
                "college",
                "projectPrice",
                "requestId",
                "whatsapp",
            ],
            TemplateKey::ProjectApproved => &["project_title", "download_link", "includes_list", "whatsapp"],
        }
    }
}

impl fmt::Display for TemplateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemplateKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TemplateKey::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| format!("unknown template '{}'", s))
    }
}

/// Render a template body and subject.
///
/// Each `{key}` whose key is present in `vars` is replaced by the value with
/// `<` and `>` escaped. Unknown placeholders are left untouched. Substituted
/// text is never scanned again.
pub fn render(body: &str, subject: &str, vars: &HashMap<String, String>) -> (String, String) {
    (render_str(body, vars), render_str(subject, vars))
}

pub fn render_str(input: &str, vars: &HashMap<String, String>) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];

        if let Some(end) = after.find(|c: char| c == '{' || c == '}') {
            if after[end..].starts_with('}') {
                if let Some(value) = vars.get(&after[..end]) {
                    out.push_str(&escape(value));
                    rest = &after[end + 1..];
                    continue;
                }
            }
        }

        out.push('{');
        rest = after;
    }

    out.push_str(rest);
    out
}

fn escape(value: &str) -> String {
    value.replace('<', "&lt;").replace('>', "&gt;")
}
