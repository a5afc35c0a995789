pub(crate) mod extractors;

pub use extractors::{established_or_new, CurrentUser};
