//! Interactive pathgrid editing session.
//!
//! One [`EditSession`] edits one pathgrid record. It owns the transient
//! state a gesture needs — the selection, the pending edge endpoint, the
//! visual drag offset — and translates every durable edit into a batch of
//! described mutations for the document store. The authoritative point and
//! edge tables are read-only from here; all writes flow through the store.
//!
//! Rendering is decoupled from mutation by a pair of dirty flags: editing
//! operations only mark geometry stale, and the host's per-frame
//! [`EditSession::update`] call rebuilds whatever is flagged, once per tick.

pub mod cache;
pub mod scene;
pub mod selection;
pub mod session;
pub mod wireframe;

pub use cache::GeometryCache;
pub use scene::{SceneAnchor, SceneGroup, SceneNode};
pub use selection::SelectionSet;
pub use session::EditSession;
pub use wireframe::Wireframe;
