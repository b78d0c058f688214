//! Fixed synonym groups for common business column names.
//!
//! Edit distance scores aliases such as "id" and "identifier" too low to
//! match. This table covers those. It is hand-curated: a new alias means a
//! new entry here.

/// `(group name, members)`; members are lowercase and trimmed.
pub const SYNONYM_GROUPS: &[(&str, &[&str])] = &[
    (
        "name",
        &[
            "name",
            "full name",
            "fullname",
            "customer name",
            "client name",
            "contact name",
            "person name",
            "display name",
        ],
    ),
    (
        "id",
        &[
            "id",
            "identifier",
            "key",
            "code",
            "ref",
            "reference",
            "record id",
            "uid",
        ],
    ),
    (
        "email",
        &[
            "email",
            "e-mail",
            "e mail",
            "mail",
            "email address",
            "e-mail address",
        ],
    ),
    (
        "phone",
        &[
            "phone",
            "telephone",
            "tel",
            "mobile",
            "cell",
            "phone number",
            "contact number",
        ],
    ),
    (
        "date",
        &[
            "date",
            "created",
            "created at",
            "created date",
            "timestamp",
            "time",
            "day",
        ],
    ),
    ("amount", &["amount", "value", "price", "cost", "total", "sum"]),
    ("status", &["status", "state", "condition", "stage"]),
    (
        "address",
        &[
            "address",
            "street",
            "street address",
            "location",
            "addr",
            "mailing address",
        ],
    ),
    (
        "company",
        &[
            "company",
            "organization",
            "organisation",
            "business",
            "firm",
            "employer",
            "vendor",
        ],
    ),
    (
        "description",
        &[
            "description",
            "desc",
            "details",
            "notes",
            "note",
            "comment",
            "comments",
            "summary",
        ],
    ),
];

/// Name of the first synonym group containing `name`.
pub fn pattern_group(name: &str) -> Option<&'static str> {
    SYNONYM_GROUPS
        .iter()
        .find(|(_, members)| members.contains(&name))
        .map(|(group, _)| *group)
}

/// Group shared by both names, if any.
///
/// Both inputs must already be lowercase and trimmed.
pub fn shared_group(a: &str, b: &str) -> Option<&'static str> {
    SYNONYM_GROUPS
        .iter()
        .find(|(_, members)| members.contains(&a) && members.contains(&b))
        .map(|(group, _)| *group)
}

/// True when both names sit in the same synonym group.
pub fn matches_pattern(a: &str, b: &str) -> bool {
    shared_group(a, b).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aliases_in_same_group_match() {
        assert!(matches_pattern("id", "identifier"));
        assert!(matches_pattern("name", "full name"));
        assert!(matches_pattern("amount", "cost"));
        assert_eq!(shared_group("price", "total"), Some("amount"));
    }

    #[test]
    fn different_groups_do_not_match() {
        assert!(!matches_pattern("email", "phone"));
        assert!(!matches_pattern("status", "amount"));
    }

    #[test]
    fn unknown_names_do_not_match() {
        assert!(!matches_pattern("foo", "bar"));
        assert_eq!(pattern_group("foo"), None);
    }

    #[test]
    fn membership_is_case_sensitive() {
        assert!(!matches_pattern("ID", "identifier"));
    }

    #[test]
    fn members_are_normalized() {
        for (group, members) in SYNONYM_GROUPS {
            for member in *members {
                assert_eq!(
                    *member,
                    member.trim().to_lowercase(),
                    "member '{member}' of group '{group}' is not normalized"
                );
            }
        }
    }
}
