//! Version 3 objects.

mod callback;
mod header;
mod link;
mod media_type;
mod path_item;
mod response;

pub use callback::Callback;
pub use header::Header;
pub use link::Link;
pub use media_type::MediaType;
pub use path_item::PathItem;
pub use response::Response;
