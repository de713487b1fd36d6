use serde::Deserialize;

/// The subset of a webhook payload the router needs.
///
/// Decoding is deliberately partial: unknown fields are ignored and absent
/// fields decode to empty strings, so provider schema growth never breaks
/// routing. Only a structurally malformed body (not a JSON object, wrong
/// field types) is an error.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct WebhookEnvelope {
    pub repository: Repository,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Repository {
    pub name: String,
    pub owner: Owner,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Owner {
    pub login: String,
}

impl WebhookEnvelope {
    /// Partial decode of the raw body. The caller maps failure to 422.
    pub fn decode(body: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_owner_and_repo() {
        let body = br#"{"repository":{"name":"r","owner":{"login":"o"}}}"#;
        let envelope = WebhookEnvelope::decode(body).unwrap();
        assert_eq!(envelope.repository.name, "r");
        assert_eq!(envelope.repository.owner.login, "o");
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let body = br#"{
            "action": "opened",
            "repository": {
                "name": "r",
                "full_name": "o/r",
                "private": false,
                "owner": {"login": "o", "id": 42, "type": "Organization"}
            },
            "sender": {"login": "someone"}
        }"#;
        let envelope = WebhookEnvelope::decode(body).unwrap();
        assert_eq!(envelope.repository.name, "r");
        assert_eq!(envelope.repository.owner.login, "o");
    }

    #[test]
    fn missing_repository_decodes_to_empty_strings() {
        let envelope = WebhookEnvelope::decode(b"{}").unwrap();
        assert_eq!(envelope.repository.name, "");
        assert_eq!(envelope.repository.owner.login, "");
    }

    #[test]
    fn missing_owner_decodes_to_empty_login() {
        let body = br#"{"repository":{"name":"r"}}"#;
        let envelope = WebhookEnvelope::decode(body).unwrap();
        assert_eq!(envelope.repository.name, "r");
        assert_eq!(envelope.repository.owner.login, "");
    }

    #[test]
    fn non_object_body_is_an_error() {
        assert!(WebhookEnvelope::decode(b"[1,2,3]").is_err());
        assert!(WebhookEnvelope::decode(b"42").is_err());
        assert!(WebhookEnvelope::decode(b"\"push\"").is_err());
    }

    #[test]
    fn invalid_json_is_an_error() {
        assert!(WebhookEnvelope::decode(b"not json at all").is_err());
        assert!(WebhookEnvelope::decode(b"{\"repository\":").is_err());
    }

    #[test]
    fn wrong_field_type_is_an_error() {
        assert!(WebhookEnvelope::decode(br#"{"repository":"r"}"#).is_err());
        assert!(WebhookEnvelope::decode(br#"{"repository":{"name":7}}"#).is_err());
    }
}
