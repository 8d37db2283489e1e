//! CLI argument definitions using Clap

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};

use crate::domain::alert::{NotificationRequest, Sound};

/// sx-alerter - macOS notifications that report how they were dismissed
#[derive(Parser, Debug)]
#[command(name = "sx-alerter")]
#[command(version)]
#[command(about = "Show a macOS notification through alerter and report how it was dismissed")]
#[command(long_about = None)]
#[command(subcommand_negates_reqs = true)]
pub struct Cli {
    /// Notification body
    #[arg(value_name = "MESSAGE", required = true)]
    pub message: Option<String>,

    /// Notification title
    #[arg(short = 't', long)]
    pub title: Option<String>,

    /// Text under the title
    #[arg(long)]
    pub subtitle: Option<String>,

    /// Sound to play (see `sx-alerter sounds`)
    #[arg(short = 's', long, value_name = "SOUND")]
    pub sound: Option<Sound>,

    /// Actions to offer (comma-separated or repeated)
    #[arg(short = 'a', long, value_name = "ACTION", value_delimiter = ',')]
    pub actions: Vec<String>,

    /// Show a reply field, with an optional placeholder
    #[arg(
        short = 'r',
        long,
        value_name = "PLACEHOLDER",
        num_args = 0..=1,
        default_missing_value = "Reply"
    )]
    pub reply: Option<String>,

    /// Label of the close button
    #[arg(long, value_name = "LABEL")]
    pub close_label: Option<String>,

    /// Label of the actions dropdown
    #[arg(long, value_name = "LABEL")]
    pub dropdown_label: Option<String>,

    /// Close the notification automatically after this many seconds
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<u32>,

    /// Group id, replaces an earlier notification with the same group
    #[arg(short = 'g', long)]
    pub group: Option<String>,

    /// Path or URL of the app icon
    #[arg(long, value_name = "IMAGE")]
    pub app_icon: Option<String>,

    /// Path or URL of an attached image
    #[arg(long, value_name = "IMAGE")]
    pub content_image: Option<String>,

    /// Send as a known app (bundle id such as com.apple.Terminal)
    #[arg(long, value_name = "BUNDLE_ID")]
    pub sender: Option<String>,

    /// Location of the alerter executable
    #[arg(long, value_name = "PATH")]
    pub alerter_path: Option<PathBuf>,

    /// Stop waiting after this many seconds and close the notification
    #[arg(short = 'w', long, value_name = "SECONDS")]
    pub wait: Option<u64>,

    /// Print the activation as JSON
    #[arg(long)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Build the notification request from the command line alone
    pub fn to_request(&self) -> NotificationRequest {
        NotificationRequest {
            message: self.message.clone().unwrap_or_default(),
            title: self.title.clone(),
            subtitle: self.subtitle.clone(),
            sound: self.sound,
            sender: self.sender.clone(),
            group: self.group.clone(),
            app_icon: self.app_icon.clone(),
            content_image: self.content_image.clone(),
            actions: self.actions.clone(),
            reply: self.reply.is_some(),
            reply_placeholder: self.reply.clone(),
            close_label: self.close_label.clone(),
            dropdown_label: self.dropdown_label.clone(),
            timeout: self.timeout.unwrap_or(0),
        }
    }
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// List the available sounds
    Sounds,
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Parsed options for showing one alert
#[derive(Debug, Clone)]
pub struct AlertOptions {
    pub request: NotificationRequest,
    pub alerter_path: Option<PathBuf>,
    pub wait: Option<Duration>,
    pub json: bool,
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &[
    "alerter_path",
    "title",
    "sound",
    "timeout",
    "sender",
    "group",
    "app_icon",
];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}
