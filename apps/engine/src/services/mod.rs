pub mod room;

pub use room::{
    spawn_configured_room, spawn_room, NullSink, RoomError, RoomHandle, RoomReply, RoomSink,
    SinkError,
};
