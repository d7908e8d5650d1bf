//! GraphQL documents bundled with the node.

pub const CREATE_DOCUMENT: &str = include_str!("queries/create_document.graphql");
pub const DOCUMENTS: &str = include_str!("queries/documents.graphql");
pub const DOCUMENT: &str = include_str!("queries/document.graphql");
pub const DELETE_DOCUMENT: &str = include_str!("queries/delete_document.graphql");
pub const DOCUMENTS_BY_FOLDER: &str = include_str!("queries/documents_by_folder.graphql");
pub const CREATE_SIGNER: &str = include_str!("queries/create_signer.graphql");
pub const DELETE_SIGNER: &str = include_str!("queries/delete_signer.graphql");
pub const MOVE_DOCUMENT_TO_FOLDER: &str = include_str!("queries/move_document_to_folder.graphql");
pub const CREATE_LINK_TO_SIGNATURE: &str =
    include_str!("queries/create_link_to_signature.graphql");

pub const CREATE_FOLDER: &str = include_str!("queries/create_folder.graphql");
pub const FOLDERS: &str = include_str!("queries/folders.graphql");
pub const FOLDER: &str = include_str!("queries/folder.graphql");
pub const DELETE_FOLDER: &str = include_str!("queries/delete_folder.graphql");

/// Cheapest authenticated query, used to test credentials.
pub const CURRENT_USER: &str = include_str!("queries/me.graphql");
