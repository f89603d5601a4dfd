use async_trait::async_trait;
use url::form_urlencoded;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub html: String,
}

/// Outbound mail delivery. An error fails the request that triggered the send.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, message: EmailMessage) -> Result<(), anyhow::Error>;
}

pub fn verification_email(origin: &str, username: &str, email: &str, token: &str) -> EmailMessage {
    let link = link(origin, "/user/verify-email", email, token);
    let body = format!(
        r#"<div style="font-family: Arial, sans-serif; line-height: 1.6; color: #333;">
  <h2 style="color: #4CAF50;">Email Verification</h2>
  <p>Thank you for signing up! Please confirm your email address by clicking the button below:</p>
  <a href="{link}" style="display: inline-block; padding: 10px 20px; color: #fff; background-color: #4CAF50; text-decoration: none; border-radius: 5px;">Verify Email</a>
  <p>If the button does not work, paste this link into your browser:</p>
  <p><a href="{link}" style="color: #4CAF50;">{link}</a></p>
  <p style="font-size: 12px; color: #888;">If you did not request this email, please ignore it.</p>
</div>"#
    );

    EmailMessage {
        to: email.to_string(),
        subject: "Email Confirmation".to_string(),
        html: format!("<h4>Hello {},</h4>\n{}", escape_html(username), body),
    }
}

pub fn reset_password_email(origin: &str, username: &str, email: &str, token: &str) -> EmailMessage {
    let link = link(origin, "/user/reset-password", email, token);
    let body = format!(
        r#"<div style="font-family: Arial, sans-serif; line-height: 1.6; color: #333;">
  <h2 style="color: #FF5722;">Reset Your Password</h2>
  <p>We received a request to reset your password. Click the button below to proceed:</p>
  <a href="{link}" style="display: inline-block; padding: 10px 20px; color: #fff; background-color: #FF5722; text-decoration: none; border-radius: 5px;">Reset Password</a>
  <p>If the button does not work, paste this link into your browser:</p>
  <p><a href="{link}" style="color: #FF5722;">{link}</a></p>
  <p style="font-size: 12px; color: #888;">If you did not request a password reset, you can ignore this email.</p>
</div>"#
    );

    EmailMessage {
        to: email.to_string(),
        subject: "Reset Password".to_string(),
        html: format!("<h4>Hello {},</h4>\n{}", escape_html(username), body),
    }
}

fn link(origin: &str, path: &str, email: &str, token: &str) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("token", token)
        .append_pair("email", email)
        .finish();
    format!("{}{}?{}", origin.trim_end_matches('/'), path, escape_html(&query))
}

fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
