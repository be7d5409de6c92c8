use serde::Deserialize;

use crate::domain::posts::PostDraftInput;

/// Raw write payload. Every field is optional so presence checks happen in
/// one place instead of inside the deserializer.
#[derive(Debug, Deserialize)]
pub(crate) struct AdminPostForm {
    pub(crate) intent: Option<String>,
    pub(crate) title: Option<String>,
    pub(crate) slug: Option<String>,
    pub(crate) markdown: Option<String>,
    pub(crate) author_id: Option<String>,
}

/// The write payload, discriminated before any business logic runs.
#[derive(Debug)]
pub(crate) enum PostWriteRequest {
    Delete,
    Submit(PostDraftInput),
}

#[derive(Debug, PartialEq)]
pub(crate) struct MalformedIntent {
    pub(crate) got: Option<String>,
}

impl AdminPostForm {
    pub(crate) fn into_request(self) -> Result<PostWriteRequest, MalformedIntent> {
        match self.intent.as_deref() {
            Some("delete") => Ok(PostWriteRequest::Delete),
            Some("create") | Some("update") => Ok(PostWriteRequest::Submit(PostDraftInput {
                title: self.title,
                slug: self.slug,
                markdown: self.markdown,
                author_id: self.author_id,
            })),
            _ => Err(MalformedIntent { got: self.intent }),
        }
    }
}
