//! OpenFlow opcode classification used by the admission heuristic.
//!
//! The core does not parse OpenFlow payloads; it inspects exactly one byte,
//! the message type, to decide whether receiving a message is evidence that
//! the peer has admitted this connection for normal service.

/// The message types a controller exchanges with a switch before (or
/// without regard to) admission: hellos, errors, keepalives, and the
/// handshake/config chatter. Values match the OpenFlow 1.0 wire encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum NonAdmitting {
    Hello = 0,
    Error = 1,
    EchoRequest = 2,
    EchoReply = 3,
    Vendor = 4,
    FeaturesRequest = 5,
    FeaturesReply = 6,
    GetConfigRequest = 7,
    GetConfigReply = 8,
    SetConfig = 9,
}

/// Bitmask over opcodes `0..32`; bit `i` set means opcode `i` is in
/// [`NonAdmitting`]. Opcodes `>= 32` are never represented here and always
/// count as admission-evidencing.
const NON_ADMITTING_MASK: u32 = (1 << NonAdmitting::Hello as u32)
    | (1 << NonAdmitting::Error as u32)
    | (1 << NonAdmitting::EchoRequest as u32)
    | (1 << NonAdmitting::EchoReply as u32)
    | (1 << NonAdmitting::Vendor as u32)
    | (1 << NonAdmitting::FeaturesRequest as u32)
    | (1 << NonAdmitting::FeaturesReply as u32)
    | (1 << NonAdmitting::GetConfigRequest as u32)
    | (1 << NonAdmitting::GetConfigReply as u32)
    | (1 << NonAdmitting::SetConfig as u32);

/// Build the one-byte ECHO_REQUEST body the ACTIVE→IDLE transition enqueues
/// as an inactivity probe.
pub fn echo_request() -> u8 {
    NonAdmitting::EchoRequest as u8
}

/// Whether receiving `msg` is evidence the peer has admitted this
/// connection: the message type is *not* one of the ten non-admitting
/// opcodes. A message with no bytes at all carries no opcode to classify and
/// is conservatively treated as admitting.
pub fn is_admission_evidencing(msg: &[u8]) -> bool {
    match msg.first() {
        None => true,
        Some(&opcode) if opcode >= 32 => true,
        Some(&opcode) => NON_ADMITTING_MASK & (1 << opcode as u32) == 0,
    }
}
