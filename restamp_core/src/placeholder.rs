use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::RestampError;
use crate::RestampResult;

static PLACEHOLDER_TOKEN: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"\{([^{}]+)\}").expect("placeholder token regex is valid"));

/// Caller-supplied placeholder data, resolved against `{name}` tokens in
/// replacement templates. Immutable once parsed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaceholderMap {
	values: BTreeMap<String, String>,
}

impl PlaceholderMap {
	pub fn new() -> Self {
		Self::default()
	}

	/// Parse `name=value` tokens as received from the command line. A token
	/// without `=` or with an empty name is rejected, as is a name given
	/// twice — both are caller-side input errors surfaced before the engine
	/// touches any file.
	pub fn parse<I, S>(tokens: I) -> RestampResult<Self>
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let mut values = BTreeMap::new();

		for token in tokens {
			let token = token.as_ref();
			let Some((name, value)) = token.split_once('=') else {
				return Err(RestampError::InvalidPlaceholder {
					token: token.to_string(),
				});
			};
			if name.is_empty() {
				return Err(RestampError::InvalidPlaceholder {
					token: token.to_string(),
				});
			}
			if values
				.insert(name.to_string(), value.to_string())
				.is_some()
			{
				return Err(RestampError::DuplicatePlaceholder {
					name: name.to_string(),
				});
			}
		}

		Ok(Self { values })
	}

	pub fn get(&self, name: &str) -> Option<&str> {
		self.values.get(name).map(String::as_str)
	}

	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}

	pub fn len(&self) -> usize {
		self.values.len()
	}
}

impl<N, V> FromIterator<(N, V)> for PlaceholderMap
where
	N: Into<String>,
	V: Into<String>,
{
	fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
		Self {
			values: iter
				.into_iter()
				.map(|(name, value)| (name.into(), value.into()))
				.collect(),
		}
	}
}

/// Resolve every `{name}` token in `template` by literal substitution.
/// Tokens whose name is not in the map are preserved verbatim — there is no
/// escaping syntax and an unknown name is not an error.
pub fn resolve_placeholders(template: &str, placeholders: &PlaceholderMap) -> String {
	PLACEHOLDER_TOKEN
		.replace_all(template, |caps: &regex::Captures<'_>| {
			match placeholders.get(&caps[1]) {
				Some(value) => value.to_string(),
				None => caps[0].to_string(),
			}
		})
		.into_owned()
}
