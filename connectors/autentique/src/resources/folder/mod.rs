//! `folder` resource.

mod create;
mod delete;
mod get_by_id;
mod list;

use crate::resource::Resource;

pub(crate) const RESOURCE: &str = "folder";

/// The `folder` resource with its operations in display order.
#[must_use]
pub fn resource() -> Resource {
    Resource::new(
        RESOURCE,
        "Folder",
        vec![
            create::operation(),
            list::operation(),
            get_by_id::operation(),
            delete::operation(),
        ],
    )
}
