//! # campaign-routing - Routing Graphs and UI Actions for Campaigns
//!
//! **campaign-routing** is the client-side model layer of a campaign-routing editor.
//! It reads a campaign's routing configuration into a typed entity graph, keeps
//! that graph's wiring consistent while the user edits it, and drives the
//! save/reset/call actions whose outcomes are reported back as transient feedback.
//!
//! ## Core Workflow
//!
//! 1.  **Load the document**: `document::parse` turns the per-campaign JSON document
//!     into a validated `CampaignRouting` aggregate (channels, routing blocks,
//!     conversations and the routing entries wiring their endpoints together).
//! 2.  **Edit in place**: the aggregate's `upsert_*`, `add_endpoint`, `move_endpoint`,
//!     `connect` and `disconnect` methods mutate the graph while rejecting edits that
//!     would leave a routing entry pointing at a missing endpoint.
//! 3.  **Act**: bind the aggregate to a `SaveAction`, `ResetAction` or `CallAction`.
//!     Each emits `invoke`, then `success` or `error`.
//! 4.  **Observe**: subscribe listeners, or attach a `PopoverNotifier` for text feedback.
//!
//! ## Quick Start
//!
//! ```rust
//! use campaign_routing::prelude::*;
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! struct AcceptAll;
//!
//! impl Store for AcceptAll {
//!     fn save(&self, _request: SaveRequest, done: Completion<()>) {
//!         done(Ok(()));
//!     }
//! }
//!
//! fn main() -> Result<()> {
//!     let json = r#"{
//!         "campaign_id": "campaign-1",
//!         "channels": [{"uuid": "ch1", "endpoints": [{"uuid": "E1"}]}],
//!         "routing_blocks": [],
//!         "conversations": [{"uuid": "conv1", "endpoints": [{"uuid": "E2"}]}],
//!         "routing_entries": [{"uuid": "c1", "endpoints": ["E1", "E2"]}]
//!     }"#;
//!
//!     let routing = Rc::new(RefCell::new(parse(json)?));
//!     let save = SaveAction::new(
//!         Rc::clone(&routing),
//!         Rc::new(AcceptAll),
//!         ActionOptions::named("Save").with_notifier(NotifierOptions::default()),
//!     );
//!
//!     save.invoke()?;
//!     assert_eq!(save.state(), ActionState::Succeeded);
//!     assert_eq!(save.notifier().unwrap().borrow().text(), "Save successful!");
//!     Ok(())
//! }
//! ```

pub mod action;
pub mod document;
pub mod error;
pub mod model;
pub mod prelude;
