//! Label propagation into pod templates.

use admission_primitives::{Labels, PodTemplateSpec};

use crate::inspect::CONTACT_LABEL;

/// Inserts or overwrites `key` in the template labels, creating the mapping
/// when the template has none. Other labels are left untouched.
pub fn set_template_label(
    template: &mut PodTemplateSpec,
    key: impl Into<String>,
    value: impl Into<String>,
) {
    template
        .metadata
        .labels
        .get_or_insert_with(Labels::new)
        .insert(key.into(), value.into());
}

/// Stamps `contact` onto the template under the canonical lower-case key.
pub fn propagate_contact(template: &mut PodTemplateSpec, contact: &str) {
    set_template_label(template, CONTACT_LABEL, contact);
}

#[cfg(test)]
mod tests {
    use admission_primitives::{Container, ObjectMeta, PodSpec};

    use super::*;

    fn template(metadata: ObjectMeta) -> PodTemplateSpec {
        PodTemplateSpec::new(PodSpec::with_containers(vec![
            Container::new("container1", "image"),
            Container::new("container2", "anotherimage"),
        ]))
        .with_metadata(metadata)
    }

    #[test]
    fn creates_labels_when_absent() {
        let mut template = template(ObjectMeta::default());
        assert!(template.metadata.labels.is_none());

        propagate_contact(&mut template, "hodor");
        assert_eq!(template.metadata.label("contact"), Some("hodor"));
    }

    #[test]
    fn keeps_existing_labels() {
        let mut template = template(
            ObjectMeta::default()
                .with_label("app", "train")
                .with_label("project", "infra"),
        );

        propagate_contact(&mut template, "hodor");
        assert_eq!(template.metadata.label("contact"), Some("hodor"));
        assert_eq!(template.metadata.label("app"), Some("train"));
        assert_eq!(template.metadata.label("project"), Some("infra"));
        assert_eq!(template.metadata.labels().count(), 3);
    }

    #[test]
    fn overwrites_previous_contact() {
        let mut template = template(ObjectMeta::default().with_label("contact", "arya"));
        propagate_contact(&mut template, "hodor");
        assert_eq!(template.metadata.label("contact"), Some("hodor"));
    }

    #[test]
    fn repeated_propagation_is_idempotent() {
        let mut once = template(ObjectMeta::default().with_label("app", "train"));
        propagate_contact(&mut once, "hodor");

        let mut twice = once.clone();
        propagate_contact(&mut twice, "hodor");
        assert_eq!(once, twice);
    }

    #[test]
    fn set_template_label_upserts_any_key() {
        let mut template = template(ObjectMeta::default().with_label("tier", "web"));
        set_template_label(&mut template, "tier", "batch");
        set_template_label(&mut template, "zone", "a");
        assert_eq!(template.metadata.label("tier"), Some("batch"));
        assert_eq!(template.metadata.label("zone"), Some("a"));
    }
}
