//! Alert domain module

mod activation;
mod request;
mod sound;
mod state;

pub use activation::{ActivationKind, ActivationRecord};
pub use request::{
    build_arguments, is_bundle_id, NotificationRequest, DEFAULT_REPLY_PLACEHOLDER,
    JSON_OUTPUT_FLAG,
};
pub use sound::{Sound, ALL_SOUNDS};
pub use state::{AlertSession, AlertState, InvalidStateTransition};
