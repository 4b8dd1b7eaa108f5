//! Utilities

// Modules
pub mod logger;

// Imports
use std::{cell::RefCell, fmt};

/// [`fmt::Display`] helper to display using a `FnMut(&mut fmt::Formatter)`
pub struct DisplayWrapper<F: FnMut(&mut fmt::Formatter) -> fmt::Result>(RefCell<F>);

impl<F: FnMut(&mut fmt::Formatter) -> fmt::Result> DisplayWrapper<F> {
	/// Creates a new display wrapper
	#[must_use]
	pub const fn new(func: F) -> Self {
		Self(RefCell::new(func))
	}
}


impl<F: FnMut(&mut fmt::Formatter) -> fmt::Result> fmt::Display for DisplayWrapper<F> {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		// Note: `f` cannot be re-entrant, so this cannot fail
		self.0.borrow_mut()(f)
	}
}

/// Displays a sequence of optional values as `[a, b, -]`, with `-` for missing values
pub fn display_optionals<'a, T: fmt::Display + 'a>(
	values: impl IntoIterator<Item = &'a Option<T>> + Clone,
) -> impl fmt::Display {
	DisplayWrapper::new(move |f| {
		write!(f, "[")?;
		for (idx, value) in values.clone().into_iter().enumerate() {
			if idx != 0 {
				write!(f, ", ")?;
			}
			match value {
				Some(value) => write!(f, "{value}")?,
				None => write!(f, "-")?,
			}
		}
		write!(f, "]")
	})
}
