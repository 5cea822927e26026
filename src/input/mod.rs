pub mod events;

pub use events::{CameraEvent, InteractionSource, SUBSCRIBED_ENGINE_EVENTS};
