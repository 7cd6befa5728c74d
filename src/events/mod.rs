//! Event Plumbing
//!
//! Everything that connects host input to component state:
//!
//! - **messages**: `UiEvent`, `Topic`, `Effect` and the id types they carry
//! - **timers**: logical timer queue (auto-dismiss, slider auto-advance)
//! - **bus**: `EventBus` and the `Component` trait
//! - **driver**: tokio loop feeding the bus from a channel and timer deadlines
//!
//! # Architecture
//!
//! ```text
//! host event → EventBus → components (by topic) → Effects
//!                 ↑                                  │
//!                 └──── follow-up events / timers ───┘
//! ```

pub mod bus;
pub mod driver;
pub mod messages;
pub mod timers;

pub use bus::{BusConfig, Component, DispatchReport, EventBus, SharedComponent, SubscriptionId};
pub use driver::{run, DriverStats};
pub use messages::{
    CloseKind, DismissCause, Effect, FormId, Key, ModalId, Region, RowAction, SearchScope, TimerId,
    Topic, UiEvent,
};
pub use timers::TimerQueue;
