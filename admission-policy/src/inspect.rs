//! Contact label lookup.

use admission_primitives::ObjectMeta;

/// Label key identifying the party responsible for a resource.
pub const CONTACT_LABEL: &str = "contact";

/// Returns the contact recorded on `metadata`, matching the key without regard
/// to case.
///
/// Labels are scanned in key order and the first key equal to `contact` after
/// lower-casing wins, so with several case variants (`Contact`, `contact`) the
/// byte-wise smallest key is used. An empty value counts as no contact.
#[must_use]
pub fn contact_label(metadata: &ObjectMeta) -> Option<&str> {
    metadata
        .labels()
        .find(|(key, _)| key.to_lowercase() == CONTACT_LABEL)
        .map(|(_, value)| value)
        .filter(|value| !value.is_empty())
}
