//! Hash-fragment navigation router for single-page applications.
//!
//! `hashnav` maps URL fragment paths to registered route definitions,
//! extracts path parameters from `/:name` template segments, and runs an
//! ordered sequence of lifecycle hooks around navigation transitions.
//! The hosting environment (browser globals, event wiring) stays behind
//! the [`Host`] trait, so the core runs and tests headlessly.
//!
//! # Example
//!
//! ```
//! use hashnav::{Host, MemoryHost, Navigator, NavigatorOptions, RouteConfig};
//!
//! let host = MemoryHost::new();
//! let mut nav = Navigator::new(
//!     NavigatorOptions::new()
//!         .with_route(RouteConfig::new("/", |_| {}).with_name("home"))
//!         .with_route(
//!             RouteConfig::new("/user/:id", |entry| {
//!                 println!("user {}", entry.param("id").unwrap_or("?"));
//!             })
//!             .with_name("user"),
//!         ),
//!     host.clone(),
//! )
//! .unwrap();
//!
//! nav.start().unwrap();
//! nav.go("/user/42").unwrap();
//! // The hosting glue delivers the committed fragment back:
//! nav.on_fragment_change(&host.fragment()).unwrap();
//! assert_eq!(nav.current().unwrap().name(), "user");
//! ```

pub mod error;
pub mod hooks;
pub mod host;
pub mod navigator;
pub mod pattern;
pub mod route;

pub use error::RouterError;
pub use hooks::RouteHooks;
pub use host::{Host, MemoryHost};
pub use navigator::{Navigator, NavigatorOptions};
pub use pattern::PathPattern;
pub use route::{RouteConfig, RouteEntry};
