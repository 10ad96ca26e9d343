pub mod clean;
pub mod room_id;
