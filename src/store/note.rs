// Note data types

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A note as returned by the listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Note {
    /// File name inside the cache directory
    pub name: String,
    /// Full file content
    pub text: String,
}

/// Body of `POST /write`
///
/// Both fields are optional here so a missing field is a 400, not a parse error.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CreateNoteRequest {
    #[serde(default)]
    pub note_name: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
}

impl CreateNoteRequest {
    /// Both fields, if present and non-empty
    pub fn fields(&self) -> Option<(&str, &str)> {
        let name = self.note_name.as_deref().filter(|s| !s.is_empty())?;
        let note = self.note.as_deref().filter(|s| !s.is_empty())?;
        Some((name, note))
    }

    /// Parse a JSON body, falling back to `application/x-www-form-urlencoded`
    ///
    /// A body labelled `application/json` is only ever parsed as JSON. A body
    /// that parses as neither yields an empty request.
    pub fn parse(body: &[u8], content_type: Option<&str>) -> Self {
        let is_json = content_type.is_some_and(|ct| ct.starts_with("application/json"));
        if is_json {
            return serde_json::from_slice(body).unwrap_or_default();
        }

        let is_form = content_type
            .is_some_and(|ct| ct.starts_with("application/x-www-form-urlencoded"));
        if !is_form {
            if let Ok(req) = serde_json::from_slice::<Self>(body) {
                return req;
            }
        }

        let mut req = Self::default();
        for (key, value) in url::form_urlencoded::parse(body) {
            match key.as_ref() {
                "note_name" => req.note_name = Some(value.into_owned()),
                "note" => req.note = Some(value.into_owned()),
                _ => {}
            }
        }
        req
    }
}
