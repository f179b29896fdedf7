//! `shop-checkout` — checkout stations and their queues.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                        |
//! |--------------|-----------------------------------------------------------------|
//! | [`station`]  | `CheckoutStation`, `StationLayout`, `ProcessingPhase`           |
//! | [`manager`]  | `CheckoutManager` — owns every station, runs the service loop   |
//! | [`selector`] | `select_station` — least busy, then nearest                     |
//! | [`error`]    | `CheckoutError`, `CheckoutResult<T>`                            |
//!
//! # Service loop
//!
//! Each station serves one shopper at a time.  The queue head walks to the
//! processing point (`Approaching`), is serviced for a drawn number of seconds
//! (`Servicing`), and is then popped and reported as a [`CheckoutDone`].
//! Everyone behind the head stands in an ordered waiting slot and is moved up
//! whenever the queue changes.

pub mod error;
pub mod manager;
pub mod selector;
pub mod station;


pub use error::{CheckoutError, CheckoutResult};
pub use manager::{CheckoutDone, CheckoutManager};
pub use selector::select_station;
pub use station::{CheckoutStation, ProcessingPhase, QueuedShopper, StationLayout};
