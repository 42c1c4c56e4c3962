//! Form-submission notifications.
//!
//! Notifications are fire-and-forget: the submission is already persisted
//! before anything here runs, and a formatting or delivery problem must never
//! surface to the submitter. Delivery is currently structured logging only;
//! the formatted subject and body are what an SMTP sender would carry.

use serde_json::Value;
use tracing::info;

use signpost_client::FormType;

/// A rendered notification, ready for whatever channel carries it.
#[derive(Debug, PartialEq)]
pub struct Notification {
    pub subject: String,
    pub body: String,
}

/// Spawn the notification task for a recorded submission.
pub fn spawn_notification(form_type: FormType, data: Value) {
    tokio::spawn(async move {
        let notification = render(form_type, &data);
        info!(
            form_type = %form_type,
            subject = %notification.subject,
            "notification:\n{}",
            notification.body
        );
    });
}

fn field<'a>(data: &'a Value, key: &str) -> &'a str {
    data.get(key).and_then(Value::as_str).unwrap_or("N/A")
}

/// Format the per-form notification.
pub fn render(form_type: FormType, data: &Value) -> Notification {
    match form_type {
        FormType::Volunteer => {
            let availability = data
                .get("availability")
                .and_then(Value::as_array)
                .map(|slots| {
                    slots
                        .iter()
                        .filter_map(Value::as_str)
                        .collect::<Vec<_>>()
                        .join(", ")
                })
                .unwrap_or_default();
            Notification {
                subject: format!("New Volunteer Registration - {}", field(data, "name")),
                body: format!(
                    "New Volunteer Registration\n\n\
                     Name: {}\nEmail: {}\nPhone: {}\nUniversity: {}\n\
                     Area of Interest: {}\nAvailability: {}\n\nMessage:\n{}",
                    field(data, "name"),
                    field(data, "email"),
                    field(data, "phone"),
                    field(data, "university"),
                    field(data, "areaOfInterest"),
                    availability,
                    field(data, "message"),
                ),
            }
        }
        FormType::Partner => Notification {
            subject: format!(
                "New Partnership Request - {}",
                field(data, "organizationName")
            ),
            body: format!(
                "New Partnership Request\n\n\
                 Organization: {}\nContact: {}\nEmail: {}\nPhone: {}\nType: {}\n\nMessage:\n{}",
                field(data, "organizationName"),
                field(data, "contactName"),
                field(data, "email"),
                field(data, "phone"),
                field(data, "organizationType"),
                field(data, "message"),
            ),
        },
        FormType::Newsletter => Notification {
            subject: format!("New Newsletter Subscription - {}", field(data, "email")),
            body: format!(
                "New Newsletter Subscription\n\nEmail: {}",
                field(data, "email")
            ),
        },
        FormType::Contact => Notification {
            subject: format!("Contact Form - {}", field(data, "subject")),
            body: format!(
                "Contact Form Submission\n\n\
                 Name: {}\nEmail: {}\nSubject: {}\n\nMessage:\n{}",
                field(data, "name"),
                field(data, "email"),
                field(data, "subject"),
                field(data, "message"),
            ),
        },
        FormType::Chapter | FormType::Event | FormType::Network | FormType::Leadership => {
            // Application forms vary by program; dump every field.
            let applicant = data
                .get("name")
                .or_else(|| data.get("organizerName"))
                .and_then(Value::as_str)
                .unwrap_or("N/A");
            let fields = data
                .as_object()
                .map(|object| {
                    object
                        .iter()
                        .map(|(k, v)| match v.as_str() {
                            Some(s) => format!("{k}: {s}"),
                            None => format!("{k}: {v}"),
                        })
                        .collect::<Vec<_>>()
                        .join("\n")
                })
                .unwrap_or_default();
            Notification {
                subject: format!(
                    "Program Application - {} - {}",
                    form_type.label(),
                    applicant
                ),
                body: format!("Program Application: {}\n\n{}", form_type.label(), fields),
            }
        }
    }
}
