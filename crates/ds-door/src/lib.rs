//! `ds-door` — discrete door state machines.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                |
//! |---------------|---------------------------------------------------------|
//! | [`model`]     | `DoorModel` trait, `DoorSnapshot`, `Motion`             |
//! | [`revolving`] | `RevolvingDoor` — four cells, advances one position     |
//! | [`swinging`]  | `SwingingDoor` — one leaf, opens fast and closes slowly |
//! | [`door`]      | `Door` — tagged variant built from a `DoorKind`         |
//! | [`error`]     | `DoorError`, `DoorResult<T>`                            |
//!
//! # Stepping model
//!
//! A door is advanced exactly once per simulation step.  Between steps the
//! only outside mutation is [`DoorModel::add_arrivals`]; everything else
//! (position, occupancy, admitting waiting people) happens inside
//! [`DoorModel::step`].  Callers must serialise access themselves.

pub mod door;
pub mod error;
pub mod model;
pub mod revolving;
pub mod swinging;


pub use door::Door;
pub use error::{DoorError, DoorResult};
pub use model::{DoorModel, DoorSnapshot, Motion};
pub use revolving::RevolvingDoor;
pub use swinging::SwingingDoor;
