//! Screens driven by the view-mode controller.
//!
//! Views never look the store up on their own; callers pass the [`Store`](crate::store::Store),
//! the remote client and the notifier explicitly.

mod detail;
mod form;
mod list;

pub use detail::*;
pub use form::*;
pub use list::*;
