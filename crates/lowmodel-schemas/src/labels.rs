//! Field labels as they appear in documents.

/// `name`
pub const NAME: &str = "name";
/// `description`
pub const DESCRIPTION: &str = "description";
/// `url`
pub const URL: &str = "url";
/// `externalDocs`
pub const EXTERNAL_DOCS: &str = "externalDocs";
/// `headers`
pub const HEADERS: &str = "headers";
/// `content`
pub const CONTENT: &str = "content";
/// `links`
pub const LINKS: &str = "links";
/// Reserved response-table key for the fallback response.
pub const DEFAULT: &str = "default";
/// `type`
pub const TYPE: &str = "type";
/// `format`
pub const FORMAT: &str = "format";
/// `required`
pub const REQUIRED: &str = "required";
/// `deprecated`
pub const DEPRECATED: &str = "deprecated";
/// `example`
pub const EXAMPLE: &str = "example";
/// `operationRef`
pub const OPERATION_REF: &str = "operationRef";
/// `operationId`
pub const OPERATION_ID: &str = "operationId";
/// `summary`
pub const SUMMARY: &str = "summary";
