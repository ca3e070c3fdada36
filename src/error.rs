//! Error types for route registration and navigation.

/// Error type for router operations.
///
/// `EmptyRoutes`, `DuplicateName`, and `InvalidPattern` are configuration
/// errors raised while the navigator is being constructed; `NoMatch` is
/// returned when a requested or observed path matches no registered route.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouterError {
	/// The construction options declared no routes.
	#[error("route table is empty")]
	EmptyRoutes,
	/// A route name collided with an already-registered one.
	#[error("duplicate route name '{0}'")]
	DuplicateName(String),
	/// A route template could not be compiled.
	#[error("invalid route template '{template}': {reason}")]
	InvalidPattern {
		/// The offending template string.
		template: String,
		/// Why compilation was rejected.
		reason: String,
	},
	/// No registered route matches the path.
	#[error("no route matches path '{0}'")]
	NoMatch(String),
}
