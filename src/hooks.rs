//! Lifecycle hook callback types.
//!
//! Hooks are optional capabilities: a route implements any subset of them,
//! and invocation sites treat "hook absent" and "hook present but refused"
//! as distinct policies. All hooks are synchronous; the router is
//! single-threaded, so the callback types carry no `Send`/`Sync` bounds.

use crate::route::RouteEntry;

/// The required per-route action, fired on every successful parse of the
/// owning entry. Receives the entry so implementations can read its
/// freshly-extracted parameters.
pub type Action = Box<dyn Fn(&RouteEntry)>;

/// Gating hook fired on the target entry before a cross-route commit.
/// Arguments are the target entry and the entry being left, if any.
/// Returning `false` aborts the navigation.
pub type EnterGuard = Box<dyn Fn(&RouteEntry, Option<&RouteEntry>) -> bool>;

/// Observing hook fired on the target entry after a cross-route commit.
/// Arguments are the entry and the previously-active entry, if any.
pub type EnterHook = Box<dyn Fn(&RouteEntry, Option<&RouteEntry>)>;

/// Gating hook fired on the current entry when a same-route navigation
/// changes at least one parameter value. Returning `false` aborts it.
pub type UpdateGuard = Box<dyn Fn(&RouteEntry) -> bool>;

/// Observing hook fired on the entry after a committed same-route update.
pub type UpdateHook = Box<dyn Fn(&RouteEntry)>;

/// Gating hook fired on the current entry before leaving it for a
/// differently-named route. Arguments are the current entry and the
/// target. Returning `false` aborts the navigation.
pub type LeaveGuard = Box<dyn Fn(&RouteEntry, &RouteEntry) -> bool>;

/// Global observing hook fired before every cross-route commit, with the
/// target entry and the entry being left, if any. Informational only; it
/// cannot veto.
pub type BeforeEachHook = Box<dyn Fn(&RouteEntry, Option<&RouteEntry>)>;

/// Global observing hook fired after every cross-route commit, with the
/// newly-active entry.
pub type AfterEachHook = Box<dyn Fn(&RouteEntry)>;

/// The optional lifecycle callbacks owned by one route.
#[derive(Default)]
pub struct RouteHooks {
	pub before_enter: Option<EnterGuard>,
	pub after_enter: Option<EnterHook>,
	pub before_update: Option<UpdateGuard>,
	pub after_update: Option<UpdateHook>,
	pub before_leave: Option<LeaveGuard>,
}

impl std::fmt::Debug for RouteHooks {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("RouteHooks")
			.field("before_enter", &self.before_enter.is_some())
			.field("after_enter", &self.after_enter.is_some())
			.field("before_update", &self.before_update.is_some())
			.field("after_update", &self.after_update.is_some())
			.field("before_leave", &self.before_leave.is_some())
			.finish()
	}
}
