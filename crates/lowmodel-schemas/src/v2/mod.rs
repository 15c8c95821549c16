//! Version 2 objects.

mod header;
mod response;
mod responses;
mod scopes;

pub use header::Header;
pub use response::Response;
pub use responses::Responses;
pub use scopes::Scopes;
