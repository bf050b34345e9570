/// A diagnostic session scoped to one file's processing.
///
/// The session owns a hierarchical tag stack rendered as `a:b:c` and
/// forwards leveled messages to [`tracing`] with the joined tag attached
/// as a field. Each file task owns its session outright, so concurrent
/// tasks never share a tag stack. Everything emitted here is advisory:
/// the processing pipeline never depends on it for correctness.
#[derive(Debug, Default)]
pub struct LogSession {
	tags: Vec<String>,
}

impl LogSession {
	/// Start a session with an initial tag, usually the file's relative
	/// path.
	pub fn new(tag: impl Into<String>) -> Self {
		Self {
			tags: vec![tag.into()],
		}
	}

	/// Push a nested tag, e.g. `line 42` while a line is being resolved.
	pub fn push_tag(&mut self, tag: impl Into<String>) {
		self.tags.push(tag.into());
	}

	/// Pop the most recently pushed tag. Popping the initial tag is a
	/// no-op so the session always stays identifiable.
	pub fn pop_tag(&mut self) {
		if self.tags.len() > 1 {
			self.tags.pop();
		}
	}

	/// The current tag hierarchy joined with `:`.
	pub fn tag(&self) -> String {
		self.tags.join(":")
	}

	pub fn verbose(&self, message: impl AsRef<str>) {
		tracing::debug!(tag = %self.tag(), "{}", message.as_ref());
	}

	pub fn very_verbose(&self, message: impl AsRef<str>) {
		tracing::trace!(tag = %self.tag(), "{}", message.as_ref());
	}

	pub fn debug(&self, message: impl AsRef<str>) {
		tracing::debug!(tag = %self.tag(), "{}", message.as_ref());
	}

	pub fn warn(&self, message: impl AsRef<str>) {
		tracing::warn!(tag = %self.tag(), "{}", message.as_ref());
	}

	pub fn error(&self, message: impl AsRef<str>) {
		tracing::error!(tag = %self.tag(), "{}", message.as_ref());
	}
}
