pub mod decoder;
pub mod inbound;
pub mod outbound;

pub use decoder::{apply, Outcome};
pub use inbound::{
    decode, DecodeError, Inbound, RejectJoinReason, RejectStartReason, ToClientPacket,
    UNRECOGNIZED_KIND,
};
pub use outbound::ToServerPacket;
