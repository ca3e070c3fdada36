//! Route declarations and compiled route entries.

use crate::error::RouterError;
use crate::hooks::{Action, EnterGuard, EnterHook, LeaveGuard, RouteHooks, UpdateGuard, UpdateHook};
use crate::pattern::PathPattern;
use std::collections::HashMap;

/// A route declaration: the template, an optional unique name, the
/// required action, and any lifecycle hooks.
///
/// # Example
///
/// ```
/// use hashnav::RouteConfig;
///
/// let route = RouteConfig::new("/user/:id", |entry| {
///     let _ = entry.param("id");
/// })
/// .with_name("user")
/// .with_before_enter(|_target, _from| true);
/// ```
pub struct RouteConfig {
	path: String,
	name: Option<String>,
	action: Action,
	hooks: RouteHooks,
}

impl RouteConfig {
	/// Creates a declaration for `path` with the required action.
	pub fn new<F>(path: impl Into<String>, action: F) -> Self
	where
		F: Fn(&RouteEntry) + 'static,
	{
		Self {
			path: path.into(),
			name: None,
			action: Box::new(action),
			hooks: RouteHooks::default(),
		}
	}

	/// Sets an explicit route name. Names must be unique within the
	/// owning navigator.
	pub fn with_name(mut self, name: impl Into<String>) -> Self {
		self.name = Some(name.into());
		self
	}

	/// Sets the gating hook fired before this route is entered.
	pub fn with_before_enter<F>(mut self, hook: F) -> Self
	where
		F: Fn(&RouteEntry, Option<&RouteEntry>) -> bool + 'static,
	{
		self.hooks.before_enter = Some(Box::new(hook) as EnterGuard);
		self
	}

	/// Sets the observing hook fired after this route is entered.
	pub fn with_after_enter<F>(mut self, hook: F) -> Self
	where
		F: Fn(&RouteEntry, Option<&RouteEntry>) + 'static,
	{
		self.hooks.after_enter = Some(Box::new(hook) as EnterHook);
		self
	}

	/// Sets the gating hook fired before a same-route parameter update.
	pub fn with_before_update<F>(mut self, hook: F) -> Self
	where
		F: Fn(&RouteEntry) -> bool + 'static,
	{
		self.hooks.before_update = Some(Box::new(hook) as UpdateGuard);
		self
	}

	/// Sets the observing hook fired after a same-route parameter update.
	pub fn with_after_update<F>(mut self, hook: F) -> Self
	where
		F: Fn(&RouteEntry) + 'static,
	{
		self.hooks.after_update = Some(Box::new(hook) as UpdateHook);
		self
	}

	/// Sets the gating hook fired before this route is left.
	pub fn with_before_leave<F>(mut self, hook: F) -> Self
	where
		F: Fn(&RouteEntry, &RouteEntry) -> bool + 'static,
	{
		self.hooks.before_leave = Some(Box::new(hook) as LeaveGuard);
		self
	}

	/// Returns the explicit name, if one was declared.
	pub(crate) fn name(&self) -> Option<&str> {
		self.name.as_deref()
	}
}

impl std::fmt::Debug for RouteConfig {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("RouteConfig")
			.field("path", &self.path)
			.field("name", &self.name)
			.field("hooks", &self.hooks)
			.finish()
	}
}

/// A compiled, named route.
///
/// Immutable after construction except for `params` and `fullpath`, which
/// are overwritten on every successful match. The `params` bag is shared
/// mutable state scoped to this long-lived entry: hook implementations
/// reading it always observe the values of the most recent parse.
pub struct RouteEntry {
	name: String,
	pattern: PathPattern,
	params: HashMap<String, String>,
	fullpath: String,
	action: Action,
	pub(crate) hooks: RouteHooks,
}

impl RouteEntry {
	/// Compiles a declaration into an entry under the resolved `name`.
	pub(crate) fn from_config(config: RouteConfig, name: String) -> Result<Self, RouterError> {
		let pattern = PathPattern::new(&config.path)?;
		Ok(Self {
			name,
			pattern,
			params: HashMap::new(),
			fullpath: String::new(),
			action: config.action,
			hooks: config.hooks,
		})
	}

	/// Returns the route name.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Returns the normalized template path.
	pub fn path(&self) -> &str {
		self.pattern.template()
	}

	/// Returns the compiled pattern.
	pub fn pattern(&self) -> &PathPattern {
		&self.pattern
	}

	/// Returns the parameter values of the most recent parse. Empty
	/// before the first match of this entry.
	pub fn params(&self) -> &HashMap<String, String> {
		&self.params
	}

	/// Returns one parameter value from the most recent parse.
	pub fn param(&self, name: &str) -> Option<&str> {
		self.params.get(name).map(String::as_str)
	}

	/// Returns the concrete path of the most recent parse. Empty before
	/// the first match of this entry.
	pub fn fullpath(&self) -> &str {
		&self.fullpath
	}

	/// Checks whether `path` satisfies this entry's pattern exactly.
	pub fn matches(&self, path: &str) -> bool {
		self.pattern.is_match(path)
	}

	/// Stores `path` as the fullpath, re-extracts parameters when the
	/// template declares any, and fires the action. The only trigger for
	/// the action anywhere in the crate.
	pub(crate) fn parse(&mut self, path: &str) {
		self.fullpath = path.to_string();
		if !self.pattern.param_names().is_empty()
			&& let Some(params) = self.pattern.extract(path)
		{
			self.params = params;
		}
		(self.action)(&*self);
	}
}

impl std::fmt::Debug for RouteEntry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("RouteEntry")
			.field("name", &self.name)
			.field("path", &self.path())
			.field("params", &self.params)
			.field("fullpath", &self.fullpath)
			.field("hooks", &self.hooks)
			.finish()
	}
}
