pub mod accessor;
pub mod encoder;
pub mod events;

pub use accessor::{CounterAccessor, CounterIndex};
pub use encoder::{encode, encode_event, ControlWord};
pub use events::{lookup, lookup_id, lookup_name, CounterGroup, EventMapping, Mips74kEvent};
