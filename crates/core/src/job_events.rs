//! WebSocket message type constants for gallery updates.
//!
//! Used by the gallery server when pushing freshly rendered markup to
//! connected browsers.

/// Full gallery markup, sent on connect and after every snapshot.
pub const MSG_TYPE_GALLERY_RENDER: &str = "gallery_render";
