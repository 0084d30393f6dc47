//! `tally-client` — the user-facing side of the tracker.
//!
//! Talks to a running `tally-api` through [`RemoteDocumentStore`], which
//! implements the same document-store boundary the service itself uses:
//! reads and writes over HTTP, snapshot subscriptions over Server-Sent
//! Events. On top of that sit the add-item dialog state, the bar-chart
//! row builder, and the console shell binary.

pub mod chart;
pub mod dialog;
pub mod remote;
pub mod sse;

pub use chart::{bar_rows, BarRow};
pub use dialog::AddItemDialog;
pub use remote::RemoteDocumentStore;
