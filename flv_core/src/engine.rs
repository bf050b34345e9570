use std::io::BufRead;
use std::io::Write;
use std::sync::LazyLock;

use derive_more::Deref;
use regex::Regex;

use crate::FlvResult;
use crate::session::LogSession;

/// Matches one marker statement in a line, capturing the expression
/// between the opening and closing markers. The inner capture is
/// non-greedy: with a greedy capture, two statements on one line would
/// collapse into a single span from the first opening marker to the last
/// closing marker.
static STATEMENT_PATTERN: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"#\[flavor\](.+?)#\[/flavor\]").expect("statement pattern"));

/// Matches one fragment of a statement expression, capturing the flavor
/// name and its quoted content. Names are lowercase letter runs; content
/// is any run of characters up to the closing quote.
static FRAGMENT_PATTERN: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r#"([a-z]+):"([^"]*)";"#).expect("fragment pattern"));

/// The flavors selected for one run.
///
/// Names are trimmed, lowercased, and deduplicated at construction while
/// preserving first-seen order, so the set never holds duplicates or
/// mixed-case entries. Only membership matters during resolution: when a
/// statement declares several active flavors, the statement's own
/// declaration order decides which one wins, not the order the flavors
/// were supplied here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deref)]
pub struct ActiveFlavors(Vec<String>);

impl ActiveFlavors {
	pub fn new<I, S>(names: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let mut flavors: Vec<String> = Vec::new();

		for name in names {
			let name = name.as_ref().trim().to_lowercase();
			if name.is_empty() || flavors.contains(&name) {
				continue;
			}
			flavors.push(name);
		}

		Self(flavors)
	}

	/// Membership test for a normalized flavor name.
	pub fn is_active(&self, name: &str) -> bool {
		self.0.iter().any(|flavor| flavor == name)
	}
}

/// One `name:"content"` pair declared inside a statement expression.
/// Fragments keep their declaration order; it is the tie-break when more
/// than one declared flavor is active.
pub type Fragment = (String, String);

/// Split a statement expression into its declared fragments.
///
/// Returns `None` when the expression is blank or yields no fragments at
/// all, in which case the caller leaves the whole statement untouched.
/// Duplicate names after normalization are dropped with a diagnostic,
/// keeping the first occurrence. Empty content is a valid fragment.
pub fn parse_expression(expression: &str, session: &LogSession) -> Option<Vec<Fragment>> {
	if expression.trim().is_empty() {
		return None;
	}

	let mut fragments: Vec<Fragment> = Vec::new();

	for captures in FRAGMENT_PATTERN.captures_iter(expression) {
		let name = captures[1].trim().to_lowercase();
		let content = captures[2].trim().to_string();

		if fragments.iter().any(|(existing, _)| *existing == name) {
			session.warn(format!(
				"duplicate flavor `{name}` in expression `{expression}`"
			));
			continue;
		}

		session.very_verbose(format!("fragment `{name}` -> `{content}`"));
		fragments.push((name, content));
	}

	if fragments.is_empty() {
		session.debug(format!("no fragments in expression `{expression}`"));
		return None;
	}

	Some(fragments)
}

/// Resolve every marker statement in a line against the active flavors.
///
/// Statements are found and replaced one at a time, left to right,
/// re-scanning the line after each replacement. A statement whose
/// expression is blank or yields no fragments is left in place verbatim
/// and resolution of the line stops there. When no declared flavor is
/// active the statement resolves to the empty string.
pub fn resolve_line(line: &str, flavors: &ActiveFlavors, session: &LogSession) -> String {
	let mut line = line.to_string();

	while let Some(captures) = STATEMENT_PATTERN.captures(&line) {
		let statement = captures[0].to_string();
		let expression = captures[1].to_string();
		session.very_verbose(format!("processing statement `{statement}`"));

		let Some(fragments) = parse_expression(&expression, session) else {
			break;
		};

		// First fragment in declaration order whose name is active wins.
		let chosen = fragments.iter().find(|(name, _)| flavors.is_active(name));

		let replacement = match chosen {
			Some((name, content)) => {
				if content.is_empty() {
					session.warn(format!("content for flavor `{name}` is empty"));
				}
				content.clone()
			}
			None => {
				session.warn(format!(
					"no active flavor for `{statement}`, falling back to empty content"
				));
				String::new()
			}
		};

		session.debug(format!("replacing `{statement}` with `{replacement}`"));
		line = line.replacen(statement.as_str(), &replacement, 1);
	}

	line
}

/// Resolve an input stream line by line into `writer`.
///
/// Line order is preserved and every input line produces exactly one
/// terminated output line.
pub fn resolve_stream<R, W>(
	reader: R,
	writer: &mut W,
	flavors: &ActiveFlavors,
	session: &mut LogSession,
) -> FlvResult<()>
where
	R: BufRead,
	W: Write,
{
	session.verbose("start processing stream");

	for (index, line) in reader.lines().enumerate() {
		let line = line?;
		session.push_tag(format!("line {}", index + 1));
		let resolved = resolve_line(&line, flavors, session);
		writeln!(writer, "{resolved}")?;
		session.pop_tag();
	}

	Ok(())
}
