pub mod book;
pub mod events;
pub mod value_objects;
pub mod waitlist;

pub use book::*;
pub use events::*;
pub use value_objects::*;
pub use waitlist::*;
