//! The navigator: registration, matching, and the transition state machine.
//!
//! Navigation is two-phase. The proactive phase ([`Navigator::go`]) runs
//! the gating Before-hooks and, when every verdict allows, commits by
//! mutating the host's fragment identifier. The reactive phase
//! ([`Navigator::on_fragment_change`]) runs when a fragment change is
//! delivered back, whether from that commit or from native back/forward
//! navigation, and completes the transition: parameter extraction, the
//! route action, history, and the After-hooks. Reactive transitions are
//! already committed and can only be observed, never vetoed.

use crate::error::RouterError;
use crate::hooks::{AfterEachHook, BeforeEachHook};
use crate::host::Host;
use crate::route::{RouteConfig, RouteEntry};
use std::collections::HashMap;

/// Construction options for a [`Navigator`].
pub struct NavigatorOptions {
	routes: Vec<RouteConfig>,
	hashbang: bool,
	before_each: Option<BeforeEachHook>,
	after_each: Option<AfterEachHook>,
}

impl NavigatorOptions {
	/// Creates an empty option set with the hashbang prefix enabled.
	pub fn new() -> Self {
		Self {
			routes: Vec::new(),
			hashbang: true,
			before_each: None,
			after_each: None,
		}
	}

	/// Adds a route declaration. Registration order is significant:
	/// overlapping templates resolve to the earliest registered match.
	pub fn with_route(mut self, route: RouteConfig) -> Self {
		self.routes.push(route);
		self
	}

	/// Selects the fragment prefix: `#!` when `true` (the default), `#`
	/// otherwise.
	pub fn with_hashbang(mut self, hashbang: bool) -> Self {
		self.hashbang = hashbang;
		self
	}

	/// Sets the global hook fired before every cross-route commit.
	pub fn with_before_each<F>(mut self, hook: F) -> Self
	where
		F: Fn(&RouteEntry, Option<&RouteEntry>) + 'static,
	{
		self.before_each = Some(Box::new(hook) as BeforeEachHook);
		self
	}

	/// Sets the global hook fired after every cross-route transition.
	pub fn with_after_each<F>(mut self, hook: F) -> Self
	where
		F: Fn(&RouteEntry) + 'static,
	{
		self.after_each = Some(Box::new(hook) as AfterEachHook);
		self
	}
}

impl Default for NavigatorOptions {
	fn default() -> Self {
		Self::new()
	}
}

impl std::fmt::Debug for NavigatorOptions {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("NavigatorOptions")
			.field("routes", &self.routes.len())
			.field("hashbang", &self.hashbang)
			.field("before_each", &self.before_each.is_some())
			.field("after_each", &self.after_each.is_some())
			.finish()
	}
}

/// The hash-fragment navigator.
///
/// Holds the registration-ordered route table, the currently-active
/// entry, and the navigation history. The route table is built once at
/// construction and never mutated afterwards.
pub struct Navigator<H: Host> {
	host: H,
	prefix: &'static str,
	entries: Vec<RouteEntry>,
	index: HashMap<String, usize>,
	current: Option<usize>,
	history: Vec<String>,
	before_each: Option<BeforeEachHook>,
	after_each: Option<AfterEachHook>,
}

impl<H: Host> Navigator<H> {
	/// Builds a navigator from `options` over the injected `host`.
	///
	/// Resolves each route's name (explicit, or a deterministic
	/// `route_<n>` fallback unique within this navigator) and registers
	/// the compiled entries in declaration order.
	///
	/// # Errors
	///
	/// Returns [`RouterError::EmptyRoutes`] when no routes were declared,
	/// [`RouterError::DuplicateName`] when a resolved name collides with
	/// an already-registered one, and [`RouterError::InvalidPattern`]
	/// when a template fails to compile.
	pub fn new(options: NavigatorOptions, host: H) -> Result<Self, RouterError> {
		let NavigatorOptions {
			routes,
			hashbang,
			before_each,
			after_each,
		} = options;

		if routes.is_empty() {
			return Err(RouterError::EmptyRoutes);
		}

		let prefix = if hashbang { "#!" } else { "#" };
		let mut entries: Vec<RouteEntry> = Vec::with_capacity(routes.len());
		let mut index: HashMap<String, usize> = HashMap::new();

		for (position, config) in routes.into_iter().enumerate() {
			let name = match config.name() {
				Some(name) => name.to_string(),
				None => {
					let mut counter = position;
					let mut candidate = format!("route_{counter}");
					while index.contains_key(&candidate) {
						counter += 1;
						candidate = format!("route_{counter}");
					}
					candidate
				}
			};

			if index.contains_key(&name) {
				return Err(RouterError::DuplicateName(name));
			}

			let entry = RouteEntry::from_config(config, name.clone())?;
			tracing::debug!(name = %name, path = %entry.path(), "registered route");
			index.insert(name, entries.len());
			entries.push(entry);
		}

		Ok(Self {
			host,
			prefix,
			entries,
			index,
			current: None,
			history: Vec::new(),
			before_each,
			after_each,
		})
	}

	/// Initializes navigation state from the host.
	///
	/// Writes the default fragment (`<prefix>/`) when the host carries
	/// none, then dispatches the current fragment, restoring the active
	/// route on a refreshed page.
	///
	/// # Errors
	///
	/// Returns [`RouterError::NoMatch`] when the initial fragment matches
	/// no registered route.
	pub fn start(&mut self) -> Result<(), RouterError> {
		if self.host.fragment().is_empty() {
			self.host.set_fragment(&format!("{}/", self.prefix));
		}
		let fragment = self.host.fragment();
		self.on_fragment_change(&fragment)
	}

	/// Completes a committed transition for an observed fragment change.
	///
	/// Parses the target entry (parameters and action), appends the path
	/// to the history, fires `after_update` for a same-route transition
	/// or `after_enter` plus the global `after_each` for a cross-route
	/// one, and activates the target. Hooks here observe; they cannot
	/// abort.
	///
	/// # Errors
	///
	/// Returns [`RouterError::NoMatch`] when the fragment's path matches
	/// no registered route; the navigator state is left untouched.
	pub fn on_fragment_change(&mut self, fragment: &str) -> Result<(), RouterError> {
		let path = self.extract_path(fragment);
		let target = self
			.find_match(&path)
			.ok_or_else(|| RouterError::NoMatch(path.clone()))?;

		let previous = self.current;
		// Classify against the pre-update current entry
		let is_same = previous == Some(target);
		tracing::debug!(
			path = %path,
			target = %self.entries[target].name(),
			is_same,
			"fragment change committed"
		);

		self.entries[target].parse(&path);
		self.history.push(path);

		let entry = &self.entries[target];
		if is_same {
			if let Some(hook) = &entry.hooks.after_update {
				hook(entry);
			}
		} else {
			let prev_entry = match previous {
				Some(p) => Some(&self.entries[p]),
				None => None,
			};
			if let Some(hook) = &entry.hooks.after_enter {
				hook(entry, prev_entry);
			}
		}

		self.current = Some(target);
		if !is_same && let Some(hook) = &self.after_each {
			hook(&self.entries[target]);
		}
		Ok(())
	}

	/// Requests a programmatic navigation to `path`.
	///
	/// Runs the gating hooks and, when allowed, commits by writing the
	/// prefixed path to the host fragment. The After-side hooks run only
	/// once the host delivers the change back to
	/// [`Navigator::on_fragment_change`]. A veto aborts silently: no
	/// fragment mutation, no further hooks, `Ok` returned.
	///
	/// A same-route request whose parameter values are all unchanged is
	/// suppressed. A parameter change consults `before_update` when the
	/// current entry has one; without the hook the update is allowed,
	/// matching the default-allow policy of the cross-route hooks.
	///
	/// # Errors
	///
	/// Returns [`RouterError::NoMatch`] when `path` matches no
	/// registered route.
	pub fn go(&self, path: &str) -> Result<(), RouterError> {
		let target = self
			.find_match(path)
			.ok_or_else(|| RouterError::NoMatch(path.to_string()))?;
		let target_entry = &self.entries[target];
		let is_same = self.current == Some(target);
		let mut allow = true;

		if let Some(cur) = self.current {
			let current = &self.entries[cur];
			if is_same {
				// Pure extraction: the action must not fire during the
				// approval phase
				let candidate = target_entry
					.pattern()
					.extract(path)
					.unwrap_or_default();
				if candidate == *current.params() {
					tracing::debug!(path = %path, "unchanged same-route navigation suppressed");
					allow = false;
				} else if let Some(hook) = &current.hooks.before_update {
					allow = hook(current);
				}
			} else if let Some(hook) = &current.hooks.before_leave {
				allow = hook(current, target_entry);
			}
		}

		if !allow {
			tracing::debug!(path = %path, "navigation vetoed by current route");
			return Ok(());
		}

		if !is_same {
			let from = self.current.map(|c| &self.entries[c]);
			if let Some(hook) = &self.before_each {
				hook(target_entry, from);
			}
			if let Some(hook) = &target_entry.hooks.before_enter {
				allow = hook(target_entry, from);
			}
		}

		if !allow {
			tracing::debug!(path = %path, "navigation vetoed by target route");
			return Ok(());
		}

		tracing::debug!(path = %path, target = %target_entry.name(), "committing navigation");
		self.host.set_fragment(&format!("{}{}", self.prefix, path));
		Ok(())
	}

	/// Pops the most recent history entry and delegates to the host's
	/// native back-navigation. The pop happens regardless of what the
	/// host does with the request.
	pub fn back(&mut self) {
		self.history.pop();
		self.host.go_back();
	}

	/// Returns the entry active after the most recent committed
	/// navigation, or `None` before the first one.
	pub fn current(&self) -> Option<&RouteEntry> {
		self.current.map(|c| &self.entries[c])
	}

	/// Returns the matched path history, oldest first.
	pub fn history(&self) -> &[String] {
		&self.history
	}

	/// Returns the number of registered routes.
	pub fn route_count(&self) -> usize {
		self.entries.len()
	}

	/// Checks whether a route name is registered.
	pub fn has_route(&self, name: &str) -> bool {
		self.index.contains_key(name)
	}

	/// Returns a registered entry by name.
	pub fn route(&self, name: &str) -> Option<&RouteEntry> {
		self.index.get(name).map(|&i| &self.entries[i])
	}

	/// First registered entry matching `path`, by position.
	fn find_match(&self, path: &str) -> Option<usize> {
		self.entries.iter().position(|entry| {
			tracing::trace!(name = %entry.name(), path = %path, "trying route");
			entry.matches(path)
		})
	}

	/// Strips the fragment prefix, yielding the navigation path. An
	/// unprefixed or empty fragment yields an empty path, which matches
	/// no route.
	fn extract_path(&self, fragment: &str) -> String {
		match fragment.strip_prefix(self.prefix) {
			Some(path) if !path.is_empty() => path.to_string(),
			_ => String::new(),
		}
	}
}

impl<H: Host> std::fmt::Debug for Navigator<H> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Navigator")
			.field("prefix", &self.prefix)
			.field("routes", &self.index.keys().collect::<Vec<_>>())
			.field("current", &self.current().map(RouteEntry::name))
			.field("history", &self.history.len())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::host::MemoryHost;

	fn navigator(options: NavigatorOptions) -> Navigator<MemoryHost> {
		Navigator::new(options, MemoryHost::new()).unwrap()
	}

	#[test]
	fn test_empty_route_table_fails() {
		let result = Navigator::new(NavigatorOptions::new(), MemoryHost::new());
		assert!(matches!(result, Err(RouterError::EmptyRoutes)));
	}

	#[test]
	fn test_duplicate_explicit_names_fail() {
		let options = NavigatorOptions::new()
			.with_route(RouteConfig::new("/a", |_| {}).with_name("dup"))
			.with_route(RouteConfig::new("/b", |_| {}).with_name("dup"));

		let result = Navigator::new(options, MemoryHost::new());
		assert!(matches!(result, Err(RouterError::DuplicateName(name)) if name == "dup"));
	}

	#[test]
	fn test_omitted_names_generate_distinct_names() {
		let nav = navigator(
			NavigatorOptions::new()
				.with_route(RouteConfig::new("/a", |_| {}))
				.with_route(RouteConfig::new("/b", |_| {})),
		);

		assert_eq!(nav.route_count(), 2);
		assert!(nav.has_route("route_0"));
		assert!(nav.has_route("route_1"));
	}

	#[test]
	fn test_generated_name_skips_explicit_collision() {
		let nav = navigator(
			NavigatorOptions::new()
				.with_route(RouteConfig::new("/a", |_| {}).with_name("route_1"))
				.with_route(RouteConfig::new("/b", |_| {})),
		);

		// The unnamed route at position 1 must not collide with the
		// explicit "route_1"
		assert!(nav.has_route("route_1"));
		assert!(nav.has_route("route_2"));
		assert_eq!(nav.route("route_1").unwrap().path(), "/a");
		assert_eq!(nav.route("route_2").unwrap().path(), "/b");
	}

	#[test]
	fn test_registration_order_resolves_overlap() {
		let mut nav = navigator(
			NavigatorOptions::new()
				.with_route(RouteConfig::new("/user/:id", |_| {}).with_name("first"))
				.with_route(RouteConfig::new("/user/:other", |_| {}).with_name("second")),
		);

		nav.on_fragment_change("#!/user/42").unwrap();
		assert_eq!(nav.current().unwrap().name(), "first");
	}

	#[test]
	fn test_no_match_is_recoverable() {
		let mut nav = navigator(
			NavigatorOptions::new().with_route(RouteConfig::new("/a", |_| {}).with_name("a")),
		);

		let err = nav.go("/missing").unwrap_err();
		assert_eq!(err, RouterError::NoMatch("/missing".to_string()));

		let err = nav.on_fragment_change("#!/missing").unwrap_err();
		assert_eq!(err, RouterError::NoMatch("/missing".to_string()));
		assert!(nav.current().is_none());
		assert!(nav.history().is_empty());
	}

	#[test]
	fn test_unprefixed_fragment_matches_nothing() {
		let mut nav = navigator(
			NavigatorOptions::new().with_route(RouteConfig::new("/a", |_| {}).with_name("a")),
		);

		let err = nav.on_fragment_change("/a").unwrap_err();
		assert_eq!(err, RouterError::NoMatch(String::new()));
	}

	#[test]
	fn test_fragment_change_updates_state() {
		let mut nav = navigator(
			NavigatorOptions::new()
				.with_route(RouteConfig::new("/user/:id", |_| {}).with_name("user")),
		);

		nav.on_fragment_change("#!/user/42").unwrap();

		let current = nav.current().unwrap();
		assert_eq!(current.name(), "user");
		assert_eq!(current.param("id"), Some("42"));
		assert_eq!(current.fullpath(), "/user/42");
		assert_eq!(nav.history(), &["/user/42".to_string()]);
	}

	#[test]
	fn test_go_commits_prefixed_fragment() {
		let host = MemoryHost::new();
		let nav = Navigator::new(
			NavigatorOptions::new()
				.with_route(RouteConfig::new("/user/:id", |_| {}).with_name("user")),
			host.clone(),
		)
		.unwrap();

		nav.go("/user/7").unwrap();

		assert_eq!(host.fragment(), "#!/user/7");
		assert_eq!(host.writes(), vec!["#!/user/7".to_string()]);
	}

	#[test]
	fn test_plain_hash_prefix() {
		let host = MemoryHost::new();
		let mut nav = Navigator::new(
			NavigatorOptions::new()
				.with_hashbang(false)
				.with_route(RouteConfig::new("/home", |_| {}).with_name("home")),
			host.clone(),
		)
		.unwrap();

		nav.go("/home").unwrap();
		assert_eq!(host.fragment(), "#/home");

		nav.on_fragment_change("#/home").unwrap();
		assert_eq!(nav.current().unwrap().name(), "home");
	}

	#[test]
	fn test_start_initializes_empty_host() {
		let host = MemoryHost::new();
		let mut nav = Navigator::new(
			NavigatorOptions::new().with_route(RouteConfig::new("/", |_| {}).with_name("root")),
			host.clone(),
		)
		.unwrap();

		nav.start().unwrap();

		assert_eq!(host.fragment(), "#!/");
		assert_eq!(nav.current().unwrap().name(), "root");
		assert_eq!(nav.history(), &["/".to_string()]);
	}

	#[test]
	fn test_start_restores_existing_fragment() {
		let host = MemoryHost::with_fragment("#!/user/9");
		let mut nav = Navigator::new(
			NavigatorOptions::new()
				.with_route(RouteConfig::new("/", |_| {}).with_name("root"))
				.with_route(RouteConfig::new("/user/:id", |_| {}).with_name("user")),
			host.clone(),
		)
		.unwrap();

		nav.start().unwrap();

		// No default write happened; the existing state was restored
		assert!(host.writes().is_empty());
		assert_eq!(nav.current().unwrap().name(), "user");
		assert_eq!(nav.current().unwrap().param("id"), Some("9"));
	}

	#[test]
	fn test_back_pops_one_entry_and_delegates() {
		let host = MemoryHost::new();
		let mut nav = Navigator::new(
			NavigatorOptions::new()
				.with_route(RouteConfig::new("/a", |_| {}).with_name("a"))
				.with_route(RouteConfig::new("/b", |_| {}).with_name("b")),
			host.clone(),
		)
		.unwrap();

		nav.on_fragment_change("#!/a").unwrap();
		nav.on_fragment_change("#!/b").unwrap();
		assert_eq!(nav.history().len(), 2);

		nav.back();

		assert_eq!(nav.history(), &["/a".to_string()]);
		assert_eq!(host.back_requests(), 1);
	}

	#[test]
	fn test_back_on_empty_history_still_delegates() {
		let host = MemoryHost::new();
		let mut nav = Navigator::new(
			NavigatorOptions::new().with_route(RouteConfig::new("/a", |_| {}).with_name("a")),
			host.clone(),
		)
		.unwrap();

		nav.back();

		assert!(nav.history().is_empty());
		assert_eq!(host.back_requests(), 1);
	}
}
