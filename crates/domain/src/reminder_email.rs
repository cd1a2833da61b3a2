//! Rendering of the reminder emails sent to users
use crate::{
    cutoff::{format_date, parse_timestamp, CutoffSource, EffectiveCutoff},
    event::Event,
    user::UserProfile,
};

const SITE_URL: &str = "https://eventura.live";

#[derive(Debug, Clone, PartialEq)]
pub struct EmailContent {
    pub subject: String,
    pub html_body: String,
}

/// Reminder for an event whose cutoff is within the next day.
///
/// The copy talks about the application deadline when that was the cutoff,
/// and about the event itself otherwise.
pub fn upcoming_reminder(
    profile: &UserProfile,
    event: &Event,
    cutoff: &EffectiveCutoff,
) -> EmailContent {
    let label = cutoff.source.label();
    let subtitle = match cutoff.source {
        CutoffSource::ApplicationDeadline => "Deadline Reminder",
        CutoffSource::EventDate => "Event Reminder",
    };
    let closing = match cutoff.source {
        CutoffSource::ApplicationDeadline => {
            "Make sure to complete your registration before the deadline passes."
        }
        CutoffSource::EventDate => "We look forward to seeing you there.",
    };

    let mut details = vec![detail_row(label, &format_date(cutoff.timestamp))];
    details.extend(optional_row("Time", event.event_time.as_deref()));
    details.extend(optional_row("Location", event.location.as_deref()));

    let body = format!(
        r#"<p style="color: #b0b0b0; font-size: 15px; margin: 0 0 8px;">Hi {name},</p>
<p style="color: #ffffff; font-size: 17px; line-height: 1.6; margin: 0 0 24px;">The <strong>{label_lower}</strong> for <strong>{title}</strong> is tomorrow.</p>
{details}
<p style="color: #b0b0b0; font-size: 14px; line-height: 1.6; margin: 0 0 28px;">{closing}</p>
{cta}"#,
        name = escape_html(&profile.full_name),
        label_lower = label.to_lowercase(),
        title = escape_html(&event.title),
        details = details_table(&details),
        closing = closing,
        cta = cta_button("View Event"),
    );

    EmailContent {
        subject: format!("Tomorrow: {} - {}", event.title, label),
        html_body: wrap_email(
            subtitle,
            &body,
            "You received this email because you set a reminder on Eventura.",
        ),
    }
}

/// Reminder sent on demand by an administrator, independent of any deadline
pub fn event_reminder(profile: &UserProfile, event: &Event) -> EmailContent {
    let event_date = parse_timestamp(&event.event_date)
        .map(format_date)
        .unwrap_or_else(|| "TBA".into());

    let mut details = vec![detail_row("Date", &event_date)];
    details.extend(optional_row("Time", event.event_time.as_deref()));
    details.extend(optional_row("Location", event.location.as_deref()));
    details.extend(optional_row(
        "Category",
        event.category.as_ref().map(|c| c.as_str()),
    ));

    let description = event
        .description
        .as_deref()
        .map(|description| {
            format!(
                r#"<p style="color: #b0b0b0; font-size: 14px; line-height: 1.6; margin: 0 0 20px;">{}</p>"#,
                escape_html(description)
            )
        })
        .unwrap_or_default();
    let deadline = event
        .application_deadline
        .as_deref()
        .and_then(parse_timestamp)
        .map(|deadline| {
            format!(
                r#"<p style="color: #ec4899; font-weight: 600; font-size: 14px; margin: 0 0 28px;">Application Deadline: {}</p>"#,
                format_date(deadline)
            )
        })
        .unwrap_or_default();

    let body = format!(
        r#"<p style="color: #b0b0b0; font-size: 15px; margin: 0 0 8px;">Hi {name},</p>
<h2 style="color: #ffffff; font-size: 20px; margin: 0 0 20px; font-weight: 600;">{title}</h2>
{details}
{description}
{deadline}
{cta}"#,
        name = escape_html(&profile.full_name),
        title = escape_html(&event.title),
        details = details_table(&details),
        description = description,
        deadline = deadline,
        cta = cta_button("View Details"),
    );

    EmailContent {
        subject: format!("Reminder: {} - {}", event.title, event_date),
        html_body: wrap_email(
            "Event Reminder",
            &body,
            "You received this email because you set a reminder on Eventura.",
        ),
    }
}

/// Sent once, right after a user's profile is first created
pub fn welcome_email(profile: &UserProfile) -> EmailContent {
    let features = [
        ("Browse Events", "Discover hackathons, workshops, seminars and more"),
        ("Set Reminders", "Get notified before deadlines"),
        ("Track Applications", "Keep your registrations in one place"),
        ("Complete Your Profile", "Add your details for personalized updates"),
    ]
    .iter()
    .map(|(feature, blurb)| {
        format!(
            r#"<tr><td style="padding: 6px 0; color: #b0b0b0; font-size: 14px; line-height: 1.5;"><strong style="color: #e0e0e0;">{}</strong> - {}</td></tr>"#,
            feature, blurb
        )
    })
    .collect::<Vec<_>>();

    let body = format!(
        r#"<p style="color: #ffffff; font-size: 18px; margin: 0 0 20px; font-weight: 600;">Hi {name},</p>
<p style="color: #b0b0b0; font-size: 15px; line-height: 1.7; margin: 0 0 24px;">Welcome to Eventura, your platform for discovering and participating in campus events. We're glad to have you on board.</p>
<p style="color: #ffffff; font-weight: 600; margin: 0 0 14px; font-size: 14px;">What you can do:</p>
{features}
{cta}"#,
        name = escape_html(&profile.full_name),
        features = details_table(&features),
        cta = cta_button("Explore Events"),
    );

    EmailContent {
        subject: format!("Welcome to Eventura, {}! 🎉", profile.full_name),
        html_body: wrap_email(
            "",
            &body,
            "You received this email because you signed up on Eventura.",
        ),
    }
}

fn detail_row(label: &str, value: &str) -> String {
    format!(
        r#"<tr><td style="padding: 6px 0; color: #b0b0b0; font-size: 14px;"><strong style="color: #e0e0e0;">{}:</strong> {}</td></tr>"#,
        label,
        escape_html(value)
    )
}

fn optional_row(label: &str, value: Option<&str>) -> Option<String> {
    value
        .filter(|value| !value.trim().is_empty())
        .map(|value| detail_row(label, value))
}

fn details_table(rows: &[String]) -> String {
    format!(
        r#"<div style="background: #222222; border-radius: 8px; padding: 20px; margin: 0 0 24px; border-left: 3px solid #6366f1;">
<table style="border-collapse: collapse; width: 100%;">{}</table>
</div>"#,
        rows.join("")
    )
}

fn cta_button(label: &str) -> String {
    format!(
        r#"<div style="text-align: center; margin: 0 0 28px;"><a href="{}" style="display: inline-block; padding: 14px 36px; background: #6366f1; color: #ffffff; text-decoration: none; border-radius: 8px; font-weight: 600;">{}</a></div>"#,
        SITE_URL, label
    )
}

fn wrap_email(subtitle: &str, body: &str, footer_note: &str) -> String {
    format!(
        r#"<div style="font-family: 'Segoe UI', Tahoma, sans-serif; max-width: 560px; margin: 0 auto; background: #1a1a1a; border-radius: 12px; overflow: hidden;">
<div style="background: #6366f1; padding: 36px 32px; text-align: center;">
<h1 style="margin: 0; font-size: 26px; color: #ffffff; letter-spacing: 1px;">EVENTURA</h1>
<p style="margin: 10px 0 0; color: rgba(255,255,255,0.85); font-size: 14px;">{subtitle}</p>
</div>
<div style="padding: 36px 32px;">{body}</div>
<div style="padding: 24px 32px; background: #141414; text-align: center;">
<p style="color: #666666; font-size: 12px; margin: 0 0 8px;">Eventura - Campus Event Management</p>
<p style="color: #555555; font-size: 11px; margin: 0;">{footer_note}</p>
</div>
</div>"#,
        subtitle = subtitle,
        body = body,
        footer_note = footer_note,
    )
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{cutoff::effective_cutoff, Cutoff, EventStatus};

    fn cutoff_of(event: &Event) -> EffectiveCutoff {
        match effective_cutoff(
            event.application_deadline.as_deref(),
            &event.event_date,
            EventStatus::Upcoming,
        ) {
            Cutoff::At(cutoff) => cutoff,
            other => panic!("Expected a cutoff, got {:?}", other),
        }
    }

    #[test]
    fn deadline_copy_when_deadline_drives_cutoff() {
        let profile = UserProfile::new("uid", "Ada", "ada@campus.edu");
        let mut event = Event::new("Hack Night", "2025-03-12");
        event.application_deadline = Some("2025-03-10".into());

        let email = upcoming_reminder(&profile, &event, &cutoff_of(&event));
        assert_eq!(email.subject, "Tomorrow: Hack Night - Application Deadline");
        assert!(email.html_body.contains("Deadline Reminder"));
        assert!(email
            .html_body
            .contains("Application Deadline:</strong> Monday, March 10, 2025"));
    }

    #[test]
    fn event_copy_when_event_date_drives_cutoff() {
        let profile = UserProfile::new("uid", "Ada", "ada@campus.edu");
        let mut event = Event::new("Hack Night", "2025-03-10");
        event.location = Some("Main Hall".into());

        let email = upcoming_reminder(&profile, &event, &cutoff_of(&event));
        assert_eq!(email.subject, "Tomorrow: Hack Night - Event Date");
        assert!(email.html_body.contains("Event Reminder"));
        assert!(!email.html_body.contains("Deadline Reminder"));
        assert!(email.html_body.contains("Main Hall"));
    }

    #[test]
    fn escapes_user_content() {
        let profile = UserProfile::new("uid", "<b>Ada</b>", "ada@campus.edu");
        let event = Event::new("Rust & <Friends>", "2025-03-10");

        let email = event_reminder(&profile, &event);
        assert!(email.html_body.contains("&lt;b&gt;Ada&lt;/b&gt;"));
        assert!(email.html_body.contains("Rust &amp; &lt;Friends&gt;"));
        assert_eq!(
            email.subject,
            "Reminder: Rust & <Friends> - Monday, March 10, 2025"
        );
    }

    #[test]
    fn event_reminder_mentions_deadline_when_set() {
        let profile = UserProfile::new("uid", "Ada", "ada@campus.edu");
        let mut event = Event::new("Hack Night", "2025-03-12");
        event.application_deadline = Some("2025-03-10".into());
        event.description = Some("Bring a laptop".into());

        let email = event_reminder(&profile, &event);
        assert!(email
            .html_body
            .contains("Application Deadline: Monday, March 10, 2025"));
        assert!(email.html_body.contains("Bring a laptop"));
    }

    #[test]
    fn welcome_email_greets_by_name() {
        let profile = UserProfile::new("uid", "Ada <3", "ada@campus.edu");

        let email = welcome_email(&profile);
        assert_eq!(email.subject, "Welcome to Eventura, Ada <3! 🎉");
        assert!(email.html_body.contains("Hi Ada &lt;3,"));
        assert!(email.html_body.contains("Explore Events"));
        assert!(email.html_body.contains("you signed up on Eventura"));
    }
}
