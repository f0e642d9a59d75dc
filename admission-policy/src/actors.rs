//! Classification of actors as interactive humans.

use std::collections::BTreeSet;

use admission_config::{ActorConfig, NameMatch};
use admission_primitives::UserInfo;

/// Decides whether an actor is an interactive human subject to the policies.
///
/// Automated components (the kubelet, controllers) are expected not to match
/// and bypass the policies entirely. With the default configuration the rule
/// is "the actor name contains `admin`", which is loose in both directions:
/// `administrator` matches and a human with an unrelated name does not.
/// Hosts that can tell humans apart should list their groups in
/// [`ActorConfig::privileged_groups`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActorMatcher {
    marker: String,
    name_match: NameMatch,
    groups: BTreeSet<String>,
}

impl ActorMatcher {
    /// Builds a matcher from configuration.
    #[must_use]
    pub fn from_config(config: &ActorConfig) -> Self {
        Self {
            marker: config.name_marker.trim().to_owned(),
            name_match: config.name_match,
            groups: config
                .privileged_groups
                .iter()
                .map(|group| group.trim())
                .filter(|group| !group.is_empty())
                .map(str::to_owned)
                .collect(),
        }
    }

    /// Returns true when the policies apply to `user`.
    #[must_use]
    pub fn is_privileged(&self, user: &UserInfo) -> bool {
        self.name_matches(&user.name) || user.groups.iter().any(|g| self.groups.contains(g))
    }

    fn name_matches(&self, name: &str) -> bool {
        if self.marker.is_empty() {
            return false;
        }
        match self.name_match {
            NameMatch::Substring => name.contains(&self.marker),
            NameMatch::Prefix => name.starts_with(&self.marker),
            NameMatch::Exact => name == self.marker,
        }
    }
}

impl Default for ActorMatcher {
    fn default() -> Self {
        Self::from_config(&ActorConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher(marker: &str, name_match: NameMatch, groups: &[&str]) -> ActorMatcher {
        ActorMatcher::from_config(&ActorConfig {
            name_marker: marker.into(),
            name_match,
            privileged_groups: groups.iter().map(|g| (*g).to_owned()).collect(),
        })
    }

    #[test]
    fn default_matches_admin_substring() {
        let matcher = ActorMatcher::default();
        assert!(matcher.is_privileged(&UserInfo::named("admin")));
        assert!(matcher.is_privileged(&UserInfo::named("cluster-admin")));
        assert!(matcher.is_privileged(&UserInfo::named("administrator")));
        assert!(!matcher.is_privileged(&UserInfo::named("kubelet")));
        assert!(!matcher.is_privileged(&UserInfo::named("system:serviceaccount:kube-system:job-controller")));
    }

    #[test]
    fn substring_match_is_case_sensitive() {
        assert!(!ActorMatcher::default().is_privileged(&UserInfo::named("Admin")));
    }

    #[test]
    fn exact_and_prefix_rules() {
        let exact = matcher("admin", NameMatch::Exact, &[]);
        assert!(exact.is_privileged(&UserInfo::named("admin")));
        assert!(!exact.is_privileged(&UserInfo::named("administrator")));

        let prefix = matcher("human:", NameMatch::Prefix, &[]);
        assert!(prefix.is_privileged(&UserInfo::named("human:arya")));
        assert!(!prefix.is_privileged(&UserInfo::named("robot:human:arya")));
    }

    #[test]
    fn group_membership_is_privileged() {
        let matcher = matcher("", NameMatch::Substring, &["cluster-operators"]);
        let user = UserInfo::named("arya").with_group("cluster-operators");
        assert!(matcher.is_privileged(&user));
        assert!(!matcher.is_privileged(&UserInfo::named("arya")));
    }

    #[test]
    fn blank_marker_matches_no_name() {
        let matcher = matcher("  ", NameMatch::Substring, &[]);
        assert!(!matcher.is_privileged(&UserInfo::named("admin")));
        assert!(!matcher.is_privileged(&UserInfo::named("")));
    }
}
