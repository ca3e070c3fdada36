//! Path template compilation and matching.
//!
//! A route template is a `/`-delimited literal path in which segments
//! written as `/:identifier` declare named parameters, e.g.
//! `/user/:id/post/:pid`. Compilation substitutes a single-path-segment
//! capture for each parameter segment, escapes every literal regex
//! metacharacter, and anchors the whole pattern, so matching is always
//! exact and full-string.

use crate::error::RouterError;
use std::collections::HashMap;

/// Maximum allowed length for a route template string in bytes.
const MAX_TEMPLATE_LENGTH: usize = 1024;

/// Maximum allowed number of path segments in a route template.
const MAX_TEMPLATE_SEGMENTS: usize = 32;

/// Maximum allowed size for a compiled template regex (in bytes).
const MAX_REGEX_SIZE: usize = 1 << 20; // 1 MiB

/// A compiled route template.
///
/// Parameter captures are positional rather than named: the same
/// identifier may legally appear more than once in a template, and the
/// extraction map then keeps only the rightmost occurrence's value.
#[derive(Debug, Clone)]
pub struct PathPattern {
	/// The normalized template string.
	template: String,
	/// Compiled anchored regex.
	regex: regex::Regex,
	/// Parameter names in template left-to-right order.
	param_names: Vec<String>,
}

impl PathPattern {
	/// Compiles a route template.
	///
	/// The template is normalized to begin with `/` before compilation.
	///
	/// # Errors
	///
	/// Returns [`RouterError::InvalidPattern`] if the template exceeds the
	/// length or segment limits, or compiles to a rejected regex.
	pub fn new(template: &str) -> Result<Self, RouterError> {
		let template = normalize(template);

		// Reject templates exceeding the maximum length to prevent ReDoS
		if template.len() > MAX_TEMPLATE_LENGTH {
			return Err(RouterError::InvalidPattern {
				template,
				reason: format!(
					"template exceeds maximum allowed length of {} bytes",
					MAX_TEMPLATE_LENGTH
				),
			});
		}

		let segment_count = template.split('/').count();
		if segment_count > MAX_TEMPLATE_SEGMENTS {
			return Err(RouterError::InvalidPattern {
				template,
				reason: format!(
					"template has {} path segments, exceeding maximum of {}",
					segment_count, MAX_TEMPLATE_SEGMENTS
				),
			});
		}

		let (regex_str, param_names) = compile(&template);

		// Size-limited build to keep hostile templates from exhausting memory
		let regex = regex::RegexBuilder::new(&regex_str)
			.size_limit(MAX_REGEX_SIZE)
			.build()
			.map_err(|e| RouterError::InvalidPattern {
				template: template.clone(),
				reason: e.to_string(),
			})?;

		Ok(Self {
			template,
			regex,
			param_names,
		})
	}

	/// Returns the normalized template string.
	pub fn template(&self) -> &str {
		&self.template
	}

	/// Returns the parameter names in declared order.
	pub fn param_names(&self) -> &[String] {
		&self.param_names
	}

	/// Checks whether `path` satisfies the template exactly.
	pub fn is_match(&self, path: &str) -> bool {
		self.regex.is_match(path)
	}

	/// Extracts parameter values from a matching path.
	///
	/// Returns `None` if the path does not match. Values are assigned in
	/// declared left-to-right order, so a duplicated parameter name ends
	/// up holding the value of its final occurrence.
	pub fn extract(&self, path: &str) -> Option<HashMap<String, String>> {
		self.regex.captures(path).map(|caps| {
			self.param_names
				.iter()
				.enumerate()
				.filter_map(|(i, name)| {
					caps.get(i + 1)
						.map(|m| (name.clone(), m.as_str().to_string()))
				})
				.collect()
		})
	}
}

impl PartialEq for PathPattern {
	fn eq(&self, other: &Self) -> bool {
		self.template == other.template
	}
}

impl Eq for PathPattern {}

impl std::fmt::Display for PathPattern {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.template)
	}
}

/// Normalizes a template or path to begin with `/`.
pub(crate) fn normalize(path: &str) -> String {
	if path.starts_with('/') {
		path.to_string()
	} else {
		format!("/{}", path)
	}
}

/// Compiles a normalized template into a regex string and the ordered
/// parameter names.
fn compile(template: &str) -> (String, Vec<String>) {
	let mut regex_str = String::from("^");
	let mut param_names = Vec::new();
	let mut chars = template.chars().peekable();

	while let Some(c) = chars.next() {
		if c == '/' && chars.peek() == Some(&':') {
			chars.next(); // consume ':'

			let mut name = String::new();
			while let Some(&next) = chars.peek() {
				if next.is_ascii_alphanumeric() || next == '_' {
					name.push(next);
					chars.next();
				} else {
					break;
				}
			}

			if name.is_empty() {
				// A bare "/:" with no identifier is literal text
				regex_str.push_str("\\/:");
				continue;
			}

			param_names.push(name);
			regex_str.push_str("\\/([^/]+)");
		} else {
			match c {
				// Escape regex special characters
				'/' | '.' | '+' | '*' | '?' | '(' | ')' | '[' | ']' | '{' | '}' | '^' | '$'
				| '|' | '\\' => {
					regex_str.push('\\');
					regex_str.push(c);
				}
				_ => regex_str.push(c),
			}
		}
	}

	regex_str.push('$');
	(regex_str, param_names)
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[test]
	fn test_literal_template() {
		let pattern = PathPattern::new("/users").unwrap();
		assert!(pattern.param_names().is_empty());
		assert!(pattern.is_match("/users"));
		assert!(!pattern.is_match("/users/42"));
	}

	#[test]
	fn test_normalizes_leading_slash() {
		let pattern = PathPattern::new("users").unwrap();
		assert_eq!(pattern.template(), "/users");
		assert!(pattern.is_match("/users"));
	}

	#[test]
	fn test_single_param() {
		let pattern = PathPattern::new("/user/:id").unwrap();
		assert_eq!(pattern.param_names(), &["id"]);
		assert!(pattern.is_match("/user/42"));
		assert!(pattern.is_match("/user/hello-world"));
		assert!(!pattern.is_match("/user"));
		assert!(!pattern.is_match("/user/"));
	}

	#[test]
	fn test_match_is_total_string() {
		let pattern = PathPattern::new("/user/:id").unwrap();
		assert!(!pattern.is_match("/user/42/extra"));
		assert!(!pattern.is_match("/use/42"));
		assert!(!pattern.is_match("prefix/user/42"));
	}

	#[test]
	fn test_extract_declared_order() {
		let pattern = PathPattern::new("/user/:id/post/:pid").unwrap();
		assert_eq!(pattern.param_names(), &["id", "pid"]);

		let params = pattern.extract("/user/42/post/7").unwrap();
		assert_eq!(params.get("id"), Some(&"42".to_string()));
		assert_eq!(params.get("pid"), Some(&"7".to_string()));
	}

	#[test]
	fn test_extract_non_matching_path() {
		let pattern = PathPattern::new("/user/:id").unwrap();
		assert!(pattern.extract("/other/42").is_none());
	}

	#[test]
	fn test_duplicate_param_last_occurrence_wins() {
		let pattern = PathPattern::new("/pair/:x/:x").unwrap();
		assert_eq!(pattern.param_names(), &["x", "x"]);

		let params = pattern.extract("/pair/1/2").unwrap();
		assert_eq!(params.len(), 1);
		assert_eq!(params.get("x"), Some(&"2".to_string()));
	}

	#[test]
	fn test_param_segment_is_single_segment() {
		let pattern = PathPattern::new("/files/:name").unwrap();
		assert!(!pattern.is_match("/files/a/b"));
	}

	#[test]
	fn test_special_chars_escaped() {
		let pattern = PathPattern::new("/api/v1.0").unwrap();
		assert!(pattern.is_match("/api/v1.0"));
		assert!(!pattern.is_match("/api/v1X0"));
	}

	#[test]
	fn test_bare_colon_is_literal() {
		let pattern = PathPattern::new("/at/:/x").unwrap();
		assert!(pattern.param_names().is_empty());
		assert!(pattern.is_match("/at/:/x"));
	}

	#[test]
	fn test_matching_is_case_sensitive() {
		let pattern = PathPattern::new("/About").unwrap();
		assert!(pattern.is_match("/About"));
		assert!(!pattern.is_match("/about"));
	}

	#[rstest]
	#[case("/user/:id", "/user/42", true)]
	#[case("/user/:id", "/user/a_b-c", true)]
	#[case("/", "/", true)]
	#[case("/user/:id/edit", "/user/42/edit", true)]
	#[case("/user/:id/edit", "/user/42/view", false)]
	fn test_match_cases(#[case] template: &str, #[case] path: &str, #[case] matches: bool) {
		let pattern = PathPattern::new(template).unwrap();
		assert_eq!(pattern.is_match(path), matches);
	}

	#[test]
	fn test_rejects_excessive_length() {
		let template = "/".to_string() + &"a".repeat(1025);
		let result = PathPattern::new(&template);
		assert!(matches!(result, Err(RouterError::InvalidPattern { .. })));
	}

	#[test]
	fn test_rejects_excessive_segments() {
		let segments: Vec<&str> = (0..40).map(|_| "seg").collect();
		let template = format!("/{}", segments.join("/"));
		let result = PathPattern::new(&template);
		assert!(matches!(result, Err(RouterError::InvalidPattern { .. })));
	}

	#[test]
	fn test_display_shows_template() {
		let pattern = PathPattern::new("/user/:id").unwrap();
		assert_eq!(format!("{}", pattern), "/user/:id");
	}
}
