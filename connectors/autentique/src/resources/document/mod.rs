//! `document` resource.

mod add_signer;
mod create;
mod create_link_to_signature;
mod delete;
mod delete_signer;
mod get_by_id;
mod list;
mod list_by_folder_id;
mod move_to_folder;

use crate::resource::Resource;

pub(crate) const RESOURCE: &str = "document";

/// The `document` resource with its operations in display order.
#[must_use]
pub fn resource() -> Resource {
    Resource::new(
        RESOURCE,
        "Document",
        vec![
            create::operation(),
            list::operation(),
            get_by_id::operation(),
            delete::operation(),
            list_by_folder_id::operation(),
            add_signer::operation(),
            delete_signer::operation(),
            move_to_folder::operation(),
            create_link_to_signature::operation(),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operations_in_order() {
        let names: Vec<_> = resource().operations().iter().map(|op| op.name()).collect();
        assert_eq!(
            names,
            [
                "create",
                "list",
                "getById",
                "delete",
                "listByFolderId",
                "addSigner",
                "deleteSigner",
                "moveToFolder",
                "createLinkToSignature",
            ]
        );
    }
}
