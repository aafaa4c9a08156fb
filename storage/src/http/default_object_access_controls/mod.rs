//! Default object ACLs of a bucket. The entries share the shape of
//! [`ObjectAccessControl`](crate::http::object_access_controls::ObjectAccessControl).
pub mod delete;
pub mod insert;
pub mod list;
