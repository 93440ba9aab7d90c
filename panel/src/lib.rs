//! Browser-independent core of the content admin panel.
//!
//! The panel manages a handful of content types (benefits, testimonials,
//! FAQs, support logos and translations) through one generic workflow:
//!
//! - [`fields`] declares, per entity type, the ordered form fields and the
//!   endpoint they are saved to.
//! - [`templates`] renders a field descriptor into a typed markup fragment.
//! - [`crud`] talks to the admin API through a [`transport::Transport`].
//! - [`modal`] is the create/edit dialog state machine tying the above
//!   together.
//! - [`reorder`] persists drag-and-drop ordering with rollback on failure.
//!
//! Nothing in this crate touches the DOM. The browser front end plugs its own
//! transport, toast surface and log sink into the seams defined here.

pub mod config;
pub mod crud;
pub mod error;
pub mod fields;
pub mod form;
pub mod listing;
pub mod logger;
pub mod modal;
pub mod reorder;
pub mod templates;
pub mod toast;
pub mod transport;

#[cfg(test)]
pub(crate) mod testing;

pub use error::{PanelError, Result};
pub use fields::{EntityKind, EntityTypeConfig, FieldDescriptor, FieldKind};
