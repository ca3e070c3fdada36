//! Host environment abstraction.
//!
//! The navigator never touches browser globals directly. Everything it
//! needs from the hosting environment (reading the current fragment,
//! committing a new one, and native back-navigation) goes through the
//! [`Host`] trait, so the core is testable without a real host. The
//! hosting glue owns event wiring: on every fragment-change notification
//! it delivers the new fragment to `Navigator::on_fragment_change`.

use std::cell::RefCell;
use std::rc::Rc;

/// The collaborator interface supplied by the hosting environment.
pub trait Host {
	/// Returns the current fragment identifier including its leading `#`,
	/// or an empty string when the URL carries none.
	fn fragment(&self) -> String;

	/// Mutates the observable fragment identifier. This is the commit
	/// point of a navigation; the host is expected to deliver a
	/// fragment-change notification back to the navigator afterwards.
	fn set_fragment(&self, fragment: &str);

	/// Triggers the host's native back-navigation primitive.
	fn go_back(&self);
}

/// An in-memory [`Host`] for tests and headless embedding.
///
/// Clones share state, so a test can hold one clone, hand another to the
/// navigator, and observe every committed fragment write. Fragment-change
/// delivery is manual: after a commit, pass [`MemoryHost::fragment`] to
/// `Navigator::on_fragment_change` to complete the transition.
#[derive(Clone, Default)]
pub struct MemoryHost {
	state: Rc<RefCell<MemoryHostState>>,
}

#[derive(Default)]
struct MemoryHostState {
	fragment: String,
	writes: Vec<String>,
	back_requests: usize,
}

impl MemoryHost {
	/// Creates a host with no fragment set.
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates a host whose URL already carries `fragment`.
	pub fn with_fragment(fragment: &str) -> Self {
		let host = Self::default();
		host.state.borrow_mut().fragment = fragment.to_string();
		host
	}

	/// Returns every fragment write committed so far, oldest first.
	pub fn writes(&self) -> Vec<String> {
		self.state.borrow().writes.clone()
	}

	/// Returns how many times native back-navigation was requested.
	pub fn back_requests(&self) -> usize {
		self.state.borrow().back_requests
	}
}

impl Host for MemoryHost {
	fn fragment(&self) -> String {
		self.state.borrow().fragment.clone()
	}

	fn set_fragment(&self, fragment: &str) {
		let mut state = self.state.borrow_mut();
		state.fragment = fragment.to_string();
		state.writes.push(fragment.to_string());
	}

	fn go_back(&self) {
		self.state.borrow_mut().back_requests += 1;
	}
}

impl std::fmt::Debug for MemoryHost {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let state = self.state.borrow();
		f.debug_struct("MemoryHost")
			.field("fragment", &state.fragment)
			.field("writes", &state.writes.len())
			.field("back_requests", &state.back_requests)
			.finish()
	}
}
