//! Objects shared by every document version.

mod external_doc;
mod tag;

pub use external_doc::ExternalDoc;
pub use tag::Tag;
