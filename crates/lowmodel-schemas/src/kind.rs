//! Closed set of object types, selectable by name.

use lowmodel_core::{
    build_target, BuildError, Buildable, Digest, Extensions, HasExtensions, NodeId, SpecIndex,
};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::base::{ExternalDoc, Tag};
use crate::{v2, v3};

/// Error returned when an object kind name is not recognized.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown object kind '{0}'")]
pub struct UnknownKind(pub String);

/// Every object type this crate can build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    /// [`Tag`].
    Tag,
    /// [`ExternalDoc`].
    ExternalDoc,
    /// [`v2::Header`].
    V2Header,
    /// [`v2::Response`].
    V2Response,
    /// [`v2::Responses`].
    V2Responses,
    /// [`v2::Scopes`].
    V2Scopes,
    /// [`v3::Header`].
    V3Header,
    /// [`v3::MediaType`].
    V3MediaType,
    /// [`v3::Link`].
    V3Link,
    /// [`v3::PathItem`].
    V3PathItem,
    /// [`v3::Response`].
    V3Response,
    /// [`v3::Callback`].
    V3Callback,
}

impl ObjectKind {
    /// All kinds, in declaration order.
    pub const ALL: [ObjectKind; 12] = [
        ObjectKind::Tag,
        ObjectKind::ExternalDoc,
        ObjectKind::V2Header,
        ObjectKind::V2Response,
        ObjectKind::V2Responses,
        ObjectKind::V2Scopes,
        ObjectKind::V3Header,
        ObjectKind::V3MediaType,
        ObjectKind::V3Link,
        ObjectKind::V3PathItem,
        ObjectKind::V3Response,
        ObjectKind::V3Callback,
    ];

    /// Name used on the command line.
    pub fn name(self) -> &'static str {
        match self {
            ObjectKind::Tag => "tag",
            ObjectKind::ExternalDoc => "external-doc",
            ObjectKind::V2Header => "v2-header",
            ObjectKind::V2Response => "v2-response",
            ObjectKind::V2Responses => "v2-responses",
            ObjectKind::V2Scopes => "v2-scopes",
            ObjectKind::V3Header => "v3-header",
            ObjectKind::V3MediaType => "v3-media-type",
            ObjectKind::V3Link => "v3-link",
            ObjectKind::V3PathItem => "v3-path-item",
            ObjectKind::V3Response => "v3-response",
            ObjectKind::V3Callback => "v3-callback",
        }
    }
}

impl FromStr for ObjectKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ObjectKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| UnknownKind(s.to_string()))
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A built object of any kind.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum LowObject {
    /// Tag.
    Tag(Tag),
    /// External documentation.
    ExternalDoc(ExternalDoc),
    /// Version 2 header.
    V2Header(v2::Header),
    /// Version 2 response.
    V2Response(v2::Response),
    /// Version 2 response table.
    V2Responses(v2::Responses),
    /// Version 2 scopes.
    V2Scopes(v2::Scopes),
    /// Version 3 header.
    V3Header(v3::Header),
    /// Version 3 media type.
    V3MediaType(v3::MediaType),
    /// Version 3 link.
    V3Link(v3::Link),
    /// Version 3 path item.
    V3PathItem(v3::PathItem),
    /// Version 3 response.
    V3Response(v3::Response),
    /// Version 3 callback.
    V3Callback(v3::Callback),
}

impl LowObject {
    /// Kind of the wrapped object.
    pub fn kind(&self) -> ObjectKind {
        match self {
            LowObject::Tag(_) => ObjectKind::Tag,
            LowObject::ExternalDoc(_) => ObjectKind::ExternalDoc,
            LowObject::V2Header(_) => ObjectKind::V2Header,
            LowObject::V2Response(_) => ObjectKind::V2Response,
            LowObject::V2Responses(_) => ObjectKind::V2Responses,
            LowObject::V2Scopes(_) => ObjectKind::V2Scopes,
            LowObject::V3Header(_) => ObjectKind::V3Header,
            LowObject::V3MediaType(_) => ObjectKind::V3MediaType,
            LowObject::V3Link(_) => ObjectKind::V3Link,
            LowObject::V3PathItem(_) => ObjectKind::V3PathItem,
            LowObject::V3Response(_) => ObjectKind::V3Response,
            LowObject::V3Callback(_) => ObjectKind::V3Callback,
        }
    }

    /// Digest of the wrapped object.
    pub fn hash(&self) -> Digest {
        match self {
            LowObject::Tag(o) => o.hash(),
            LowObject::ExternalDoc(o) => o.hash(),
            LowObject::V2Header(o) => o.hash(),
            LowObject::V2Response(o) => o.hash(),
            LowObject::V2Responses(o) => o.hash(),
            LowObject::V2Scopes(o) => o.hash(),
            LowObject::V3Header(o) => o.hash(),
            LowObject::V3MediaType(o) => o.hash(),
            LowObject::V3Link(o) => o.hash(),
            LowObject::V3PathItem(o) => o.hash(),
            LowObject::V3Response(o) => o.hash(),
            LowObject::V3Callback(o) => o.hash(),
        }
    }

    /// Vendor extensions of the wrapped object.
    pub fn extensions(&self) -> &Extensions {
        match self {
            LowObject::Tag(o) => o.extensions(),
            LowObject::ExternalDoc(o) => o.extensions(),
            LowObject::V2Header(o) => o.extensions(),
            LowObject::V2Response(o) => o.extensions(),
            LowObject::V2Responses(o) => o.extensions(),
            LowObject::V2Scopes(o) => o.extensions(),
            LowObject::V3Header(o) => o.extensions(),
            LowObject::V3MediaType(o) => o.extensions(),
            LowObject::V3Link(o) => o.extensions(),
            LowObject::V3PathItem(o) => o.extensions(),
            LowObject::V3Response(o) => o.extensions(),
            LowObject::V3Callback(o) => o.extensions(),
        }
    }
}

/// Builds `root` as an object of the given kind.
pub fn build_object(
    kind: ObjectKind,
    root: NodeId,
    idx: &dyn SpecIndex,
) -> Result<LowObject, BuildError> {
    let object = match kind {
        ObjectKind::Tag => LowObject::Tag(build_target(root, idx)?),
        ObjectKind::ExternalDoc => LowObject::ExternalDoc(build_target(root, idx)?),
        ObjectKind::V2Header => LowObject::V2Header(build_target(root, idx)?),
        ObjectKind::V2Response => LowObject::V2Response(build_target(root, idx)?),
        ObjectKind::V2Responses => LowObject::V2Responses(build_target(root, idx)?),
        ObjectKind::V2Scopes => LowObject::V2Scopes(build_target(root, idx)?),
        ObjectKind::V3Header => LowObject::V3Header(build_target(root, idx)?),
        ObjectKind::V3MediaType => LowObject::V3MediaType(build_target(root, idx)?),
        ObjectKind::V3Link => LowObject::V3Link(build_target(root, idx)?),
        ObjectKind::V3PathItem => LowObject::V3PathItem(build_target(root, idx)?),
        ObjectKind::V3Response => LowObject::V3Response(build_target(root, idx)?),
        ObjectKind::V3Callback => LowObject::V3Callback(build_target(root, idx)?),
    };
    Ok(object)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for kind in ObjectKind::ALL {
            assert_eq!(kind.name().parse::<ObjectKind>().unwrap(), kind);
        }
        assert_eq!(
            "schema".parse::<ObjectKind>(),
            Err(UnknownKind("schema".to_string()))
        );
    }
}
