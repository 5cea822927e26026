use serde::{Deserialize, Serialize};

/// Gesture that began or ended a user interaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InteractionSource {
    PointerDown,
    TouchStart,
    PointerUp,
    DragEnd,
}

impl InteractionSource {
    pub fn is_start(&self) -> bool {
        matches!(self, Self::PointerDown | Self::TouchStart)
    }

    /// Engine event name that carries this gesture
    pub fn engine_event(&self) -> &'static str {
        match self {
            Self::PointerDown => "mousedown",
            Self::TouchStart => "touchstart",
            Self::PointerUp => "mouseup",
            Self::DragEnd => "dragend",
        }
    }
}

/// Camera events emitted by the map engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CameraEvent {
    /// The user grabbed the globe
    InteractionStart(InteractionSource),
    /// The user let go of the globe
    InteractionEnd(InteractionSource),
    /// The camera moved, possibly mid-transition
    Move,
    /// A camera transition or gesture came to rest
    MoveEnd,
    /// Viewport resized to `width` CSS pixels
    Resize { width: f64 },
}

impl CameraEvent {
    /// Map an engine event name onto a camera event
    ///
    /// `resize` is not covered here since it carries a width.
    pub fn from_engine_event(name: &str) -> Option<Self> {
        match name {
            "mousedown" => Some(Self::InteractionStart(InteractionSource::PointerDown)),
            "touchstart" => Some(Self::InteractionStart(InteractionSource::TouchStart)),
            "mouseup" => Some(Self::InteractionEnd(InteractionSource::PointerUp)),
            "dragend" => Some(Self::InteractionEnd(InteractionSource::DragEnd)),
            "move" => Some(Self::Move),
            "moveend" => Some(Self::MoveEnd),
            _ => None,
        }
    }
}

/// Engine events the globe subscribes to
pub const SUBSCRIBED_ENGINE_EVENTS: [&str; 6] = [
    "mousedown",
    "touchstart",
    "mouseup",
    "dragend",
    "moveend",
    "move",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_names_round_trip_for_interactions() {
        for source in [
            InteractionSource::PointerDown,
            InteractionSource::TouchStart,
            InteractionSource::PointerUp,
            InteractionSource::DragEnd,
        ] {
            let event = CameraEvent::from_engine_event(source.engine_event()).unwrap();
            let expected = if source.is_start() {
                CameraEvent::InteractionStart(source)
            } else {
                CameraEvent::InteractionEnd(source)
            };
            assert_eq!(event, expected);
        }
    }

    #[test]
    fn every_subscribed_event_maps() {
        for name in SUBSCRIBED_ENGINE_EVENTS {
            assert!(CameraEvent::from_engine_event(name).is_some(), "{name}");
        }
        assert_eq!(CameraEvent::from_engine_event("wheel"), None);
    }
}
