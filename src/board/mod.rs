//! Client-side board state.
//!
//! # Pieces
//!
//! - [`FeatureStore`]: ordered features plus the single editing marker.
//! - [`Board`]: the controller owning the store and all interaction state
//!   (drag, edit draft, add form, celebration). User input arrives as
//!   [`Action`]s and leaves as [`Command`]s.
//! - [`render_board`]: pure derivation of a [`BoardView`] from that state;
//!   [`render_text`] turns it into terminal output.
//! - [`Celebration`]: the completion signal's consumer, auto-dismissed
//!   after [`CELEBRATION_WINDOW`].
//! - [`RemoteBoard`]: a [`Board`] backed by the REST API.

mod celebration;
mod controller;
mod drag;
mod remote;
mod render;
mod store;
mod view;

pub use celebration::*;
pub use controller::*;
pub use drag::*;
pub use remote::*;
pub use render::*;
pub use store::*;
pub use view::*;
