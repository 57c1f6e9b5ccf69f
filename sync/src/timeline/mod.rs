pub mod sync_marker;
pub mod timeline;
pub mod timeline_state;
