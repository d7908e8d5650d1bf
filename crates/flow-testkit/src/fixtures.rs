//! Test fixtures for common node inputs and API payloads.

// ─────────────────────────────────────────────────────────────────────────────
// Credential Fixtures
// ─────────────────────────────────────────────────────────────────────────────

/// API token used across tests.
pub const TEST_API_TOKEN: &str = "test-api-token";

/// Credentials with a single `apiToken` field.
#[must_use]
pub fn api_token_credentials(token: &str) -> flow_core::CredentialData {
    flow_core::CredentialData::new().with_field("apiToken", token)
}

// ─────────────────────────────────────────────────────────────────────────────
// Binary Fixtures
// ─────────────────────────────────────────────────────────────────────────────

/// Smallest PDF-looking payload.
pub const PDF_BYTES: &[u8] = b"%PDF-1.4\n%%EOF\n";

/// A PDF attachment named `contract.pdf`.
#[must_use]
pub fn pdf_binary() -> flow_core::BinaryData {
    flow_core::BinaryData::from_bytes(PDF_BYTES, Some("contract.pdf"), Some("application/pdf"))
}

// ─────────────────────────────────────────────────────────────────────────────
// JSON Fixtures
// ─────────────────────────────────────────────────────────────────────────────

/// Common request and response JSON values.
pub mod json {
    use serde_json::json;

    /// Signer list with one email signer.
    #[must_use]
    pub fn signers() -> serde_json::Value {
        json!([{"email": "signer@example.com", "action": "SIGN"}])
    }

    /// A single signer object.
    #[must_use]
    pub fn signer() -> serde_json::Value {
        json!({"email": "another@example.com", "action": "SIGN"})
    }

    /// `data` of a successful document creation.
    #[must_use]
    pub fn create_document_data(id: &str) -> serde_json::Value {
        json!({
            "createDocument": {
                "id": id,
                "name": "Contract",
                "refusable": false,
                "sortable": false,
                "created_at": "2024-01-01 00:00:00",
                "signatures": [{
                    "public_id": "sig-1",
                    "name": null,
                    "email": "signer@example.com",
                    "created_at": "2024-01-01 00:00:00",
                    "action": {"name": "SIGN"},
                    "link": {"short_link": "https://example.com/s"},
                    "user": null
                }]
            }
        })
    }

    /// A page of a paginated listing under `field`.
    #[must_use]
    pub fn page(field: &str, rows: serde_json::Value) -> serde_json::Value {
        let total = rows.as_array().map_or(0, Vec::len);
        json!({ field: {"total": total, "has_more_pages": false, "data": rows} })
    }

    /// GraphQL `errors` array with one message.
    #[must_use]
    pub fn errors(message: &str) -> serde_json::Value {
        json!([{"message": message}])
    }
}
