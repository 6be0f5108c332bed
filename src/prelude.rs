//! Convenient re-exports for common types and traits

pub use crate::ZoomToCameraPlugin;
pub use crate::components::ZoomPoses;
pub use crate::components::ZoomToCamera;
pub use crate::components::ZoomTrigger;
pub use crate::error::ZoomError;
pub use crate::events::SetZooming;
pub use crate::events::ToggleZoom;
pub use crate::events::ZoomBegin;
pub use crate::events::ZoomEnd;
pub use crate::transition::ZoomDirection;
pub use crate::transition::ZoomTransition;
pub use crate::zoom::ZoomToCameraConfig;
