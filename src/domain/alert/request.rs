//! Notification request and alerter argument builder

use std::env;
use std::path::Path;

use tracing::debug;

use super::sound::Sound;
use crate::domain::error::ValidationError;

/// Placeholder shown in the reply field when none is configured
pub const DEFAULT_REPLY_PLACEHOLDER: &str = "Reply";

/// Flag asking alerter to print the activation as JSON on stdout
pub const JSON_OUTPUT_FLAG: &str = "-json";

/// Prefix a sender must carry to be forwarded (reverse-DNS bundle id)
const SENDER_BUNDLE_PREFIX: &str = "com.";

/// What to show in a notification.
///
/// Optional fields that are `None`, empty, zero or `false` are left out of
/// the alerter invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationRequest {
    /// Notification body (required)
    pub message: String,
    /// Title of the notification
    pub title: Option<String>,
    /// Text under the title
    pub subtitle: Option<String>,
    /// Sound played when the notification pops up
    pub sound: Option<Sound>,
    /// Send the notification as a known app (bundle id, e.g. `com.apple.Safari`)
    pub sender: Option<String>,
    /// Group id, a new notification replaces an older one with the same group
    pub group: Option<String>,
    /// Path or URL of the app icon image
    pub app_icon: Option<String>,
    /// Path or URL of the attached content image
    pub content_image: Option<String>,
    /// Actions offered on the notification
    pub actions: Vec<String>,
    /// Show a reply field
    pub reply: bool,
    /// Placeholder of the reply field
    pub reply_placeholder: Option<String>,
    /// Label of the close button
    pub close_label: Option<String>,
    /// Label of the actions dropdown (when more than one action)
    pub dropdown_label: Option<String>,
    /// Auto-close after this many seconds, 0 keeps it open
    pub timeout: u32,
}

impl NotificationRequest {
    /// Create a request titled after the running program
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            title: program_name(),
            reply_placeholder: Some(DEFAULT_REPLY_PLACEHOLDER.to_string()),
            ..Default::default()
        }
    }
}

/// Base name of the current executable
fn program_name() -> Option<String> {
    env::args()
        .next()
        .and_then(|arg0| {
            Path::new(&arg0)
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
        })
        .filter(|name| !name.is_empty())
}

/// Non-empty value of an optional field
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn push_flag(args: &mut Vec<String>, flag: &str, value: &str) {
    args.push(flag.to_string());
    args.push(value.to_string());
}

/// Whether a sender looks like an application bundle id
pub fn is_bundle_id(sender: &str) -> bool {
    sender.to_lowercase().starts_with(SENDER_BUNDLE_PREFIX)
}

/// Build the alerter argument list for a request.
///
/// Flags are emitted in a fixed order: message, close label, dropdown
/// label, actions, reply, timeout, title, subtitle, sound, group, app icon,
/// content image, sender. The list always ends with [`JSON_OUTPUT_FLAG`].
pub fn build_arguments(request: &NotificationRequest) -> Result<Vec<String>, ValidationError> {
    if request.message.is_empty() {
        return Err(ValidationError::EmptyMessage);
    }

    let mut args = Vec::new();
    push_flag(&mut args, "-message", &request.message);

    if let Some(label) = present(&request.close_label) {
        push_flag(&mut args, "-closeLabel", label);
    }

    if let Some(label) = present(&request.dropdown_label) {
        push_flag(&mut args, "-dropdownLabel", label);
    }

    if !request.actions.is_empty() {
        push_flag(&mut args, "-actions", &request.actions.join(","));
    }

    if request.reply {
        args.push("-reply".to_string());
        if let Some(placeholder) = present(&request.reply_placeholder) {
            args.push(placeholder.to_string());
        }
    }

    if request.timeout > 0 {
        push_flag(&mut args, "-timeout", &request.timeout.to_string());
    }

    if let Some(title) = present(&request.title) {
        push_flag(&mut args, "-title", title);
    }

    if let Some(subtitle) = present(&request.subtitle) {
        push_flag(&mut args, "-subtitle", subtitle);
    }

    if let Some(sound) = request.sound {
        push_flag(&mut args, "-sound", sound.as_str());
    }

    if let Some(group) = present(&request.group) {
        push_flag(&mut args, "-group", group);
    }

    if let Some(icon) = present(&request.app_icon) {
        push_flag(&mut args, "-appIcon", icon);
    }

    if let Some(image) = present(&request.content_image) {
        push_flag(&mut args, "-contentImage", image);
    }

    if let Some(sender) = present(&request.sender) {
        if is_bundle_id(sender) {
            push_flag(&mut args, "-sender", sender);
        } else {
            debug!(sender, "dropping sender that is not a bundle id");
        }
    }

    args.push(JSON_OUTPUT_FLAG.to_string());

    if args.is_empty() {
        return Err(ValidationError::NoArguments);
    }

    Ok(args)
}
