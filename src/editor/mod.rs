//! Resource editor
//!
//! Load and save operations over an explicit [`FormState`]. The terminal
//! front end only binds keys and widgets to these.
//!
//! # Module Structure
//!
//! - [`form`] - Editable form fields and their load/save rules
//! - [`wire`] - Outgoing JSON object and `name:value` header encoding
//!
//! # Example
//!
//! ```ignore
//! use cmedit::cms::ContentManagerClient;
//! use cmedit::editor::{self, CtypePolicy, FormState};
//!
//! async fn touch(client: &ContentManagerClient) -> Result<(), cmedit::EditorError> {
//!     let mut form = FormState::default();
//!     editor::load(client, &mut form, Some("/index.html"), None).await?;
//!     editor::save(client, &form, CtypePolicy::Omit).await?;
//!     Ok(())
//! }
//! ```

pub mod form;
pub mod wire;

pub use form::{CtypePolicy, FormState, HeaderRow};
pub use wire::{join_header, split_header, ResourcePayload};

use crate::cms::{path_from_location, Completion, ContentManagerClient};
use crate::error::EditorError;

/// Result of a load request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    Loaded,
    /// No path could be resolved, nothing was fetched
    Skipped,
}

/// Work out which resource to load.
///
/// Order: an explicit identifier, then the form's path field, then the
/// location with the editor prefix stripped.
pub fn resolve_path(
    explicit: Option<&str>,
    form_path: &str,
    location: Option<&str>,
) -> Result<String, EditorError> {
    if let Some(path) = explicit.filter(|p| !p.is_empty()) {
        return Ok(path.to_string());
    }
    if !form_path.is_empty() {
        return Ok(form_path.to_string());
    }
    location
        .and_then(path_from_location)
        .ok_or(EditorError::EmptyIdentifier)
}

/// First half of a load: resolve the path and write it back into the form.
///
/// Returns `None` when no path resolves; the load is then skipped.
pub fn begin_load(
    form: &mut FormState,
    explicit: Option<&str>,
    location: Option<&str>,
) -> Option<String> {
    match resolve_path(explicit, &form.path, location) {
        Ok(path) => {
            form.path = path.clone();
            Some(path)
        },
        Err(e) => {
            tracing::debug!("Load skipped: {}", e);
            None
        },
    }
}

/// Second half of a load: distribute a finished fetch into the form.
/// The status code is not inspected.
pub fn finish_load(
    form: &mut FormState,
    path: &str,
    completion: &Completion,
) -> Result<LoadStatus, EditorError> {
    form.apply_response(&completion.body)?;
    tracing::info!("Loaded resource {}", path);
    Ok(LoadStatus::Loaded)
}

/// Fetch a resource and distribute it into the form.
///
/// An unresolvable path is not an error: the load is skipped.
pub async fn load(
    client: &ContentManagerClient,
    form: &mut FormState,
    explicit: Option<&str>,
    location: Option<&str>,
) -> Result<LoadStatus, EditorError> {
    let Some(path) = begin_load(form, explicit, location) else {
        return Ok(LoadStatus::Skipped);
    };

    let completion = client.fetch(&path).await;
    finish_load(form, &path, &completion)
}

/// Post the form back as a full replacement of its resource.
///
/// The completion is returned for logging only; success and failure look
/// the same to the person editing.
pub async fn save(
    client: &ContentManagerClient,
    form: &FormState,
    policy: CtypePolicy,
) -> Result<Completion, EditorError> {
    let payload = form.to_payload(policy);
    client.store(&form.path, &payload).await
}
