pub mod freq_stack;
pub mod linked_list;
pub mod ring_buffer;
pub mod slot_arena;

pub use freq_stack::FreqStack;
pub use linked_list::{LinkedList, NodeHandle};
pub use ring_buffer::RingBuffer;
pub use slot_arena::{SlotArena, SlotId, SlotLookup};
