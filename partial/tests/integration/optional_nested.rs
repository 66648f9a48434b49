use std::borrow::Cow;

use partial::{Partial, record};
use partial_testhelpers::test;

#[derive(Clone, Debug, PartialEq, Eq)]
struct Member {
    handle: String,
    timezone: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct Team {
    lead: Member,
    deputy: Option<Member>,
}

record! {
    impl Member {
        HANDLE => handle: String,
        TIMEZONE => timezone: Option<String>,
    }
}

record! {
    impl Team {
        LEAD => lead: Member,
        DEPUTY => deputy: Option<Member>,
    }
}

fn member(handle: &str) -> Member {
    Member {
        handle: handle.to_string(),
        timezone: Some("UTC".to_string()),
    }
}

#[test]
fn optional_nested_partial_materializes() {
    let mut deputy = Partial::<Member>::new();
    deputy
        .set_value(&Member::HANDLE, "bob".to_string())
        .set_optional_value(&Member::TIMEZONE, None);

    let mut team = Partial::<Team>::new();
    team.set_value(&Team::LEAD, member("alice"))
        .set_optional_partial(&Team::DEPUTY, deputy);

    let team = team.build()?;
    assert_eq!(
        team.deputy,
        Some(Member {
            handle: "bob".to_string(),
            timezone: None,
        })
    );
}

#[test]
fn optional_nested_partial_failure_propagates() {
    let mut team = Partial::<Team>::new();
    team.set_value(&Team::LEAD, member("alice"))
        .set_optional_partial(&Team::DEPUTY, Partial::new());

    let err = team.optional_value(&Team::DEPUTY).unwrap_err();
    assert_eq!(err.key_path(), &Member::HANDLE.erased());
}

#[test]
fn absent_optional_derives_an_empty_partial() {
    let mut team = Partial::with_backing(Team {
        lead: member("alice"),
        deputy: Some(member("bob")),
    });
    team.set_optional_value(&Team::DEPUTY, None);

    let derived = team.optional_partial_value(&Team::DEPUTY);
    assert!(matches!(derived, Cow::Owned(_)));
    assert!(derived.is_empty());
    assert!(derived.backing_value().is_none());
}

#[test]
fn backing_none_derives_an_empty_partial() {
    let team = Partial::with_backing(Team {
        lead: member("alice"),
        deputy: None,
    });
    let derived = team.optional_partial_value(&Team::DEPUTY);
    assert!(derived.backing_value().is_none());
}

#[test]
fn backing_some_derives_a_backed_partial() {
    let team = Partial::with_backing(Team {
        lead: member("alice"),
        deputy: Some(member("bob")),
    });
    let derived = team.optional_partial_value(&Team::DEPUTY);
    assert_eq!(derived.value(&Member::HANDLE)?, "bob");
}

#[test]
fn editing_an_absent_optional_replaces_the_absence() {
    let mut team = Partial::with_backing(Team {
        lead: member("alice"),
        deputy: Some(member("bob")),
    });
    team.set_optional_value(&Team::DEPUTY, None);
    assert!(team.is_absent(&Team::DEPUTY));

    team.optional_partial_value_mut(&Team::DEPUTY)
        .set_value(&Member::HANDLE, "carol".to_string())
        .set_optional_value(&Member::TIMEZONE, Some("CET".to_string()));
    assert!(!team.is_absent(&Team::DEPUTY));

    let team = team.build()?;
    assert_eq!(
        team.deputy,
        Some(Member {
            handle: "carol".to_string(),
            timezone: Some("CET".to_string()),
        })
    );
}

#[test]
fn nested_edits_through_two_levels() {
    let mut team = Partial::with_backing(Team {
        lead: member("alice"),
        deputy: None,
    });
    team.partial_value_mut(&Team::LEAD)
        .set_optional_value(&Member::TIMEZONE, None);

    let built = team.build()?;
    assert_eq!(built.lead.handle, "alice");
    assert_eq!(built.lead.timezone, None);
    assert_eq!(built.deputy, None);
}
