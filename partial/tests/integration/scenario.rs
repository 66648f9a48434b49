use partial::{Partial, PartialError, record};
use partial_testhelpers::test;

#[derive(Clone, Debug, PartialEq, Eq)]
struct Address {
    street: String,
    postcode: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct Person {
    name: String,
    nickname: Option<String>,
    address: Address,
}

record! {
    impl Address {
        STREET => street: String,
        POSTCODE => postcode: String,
    }
}

record! {
    impl Person {
        NAME => name: String,
        NICKNAME => nickname: Option<String>,
        ADDRESS => address: Address,
    }
}

#[test]
fn person_builds_once_the_address_is_complete() {
    let mut person = Partial::<Person>::new();
    person
        .set_value(&Person::NAME, "Ada".to_string())
        .set_optional_value(&Person::NICKNAME, None);

    let err = person.build().unwrap_err();
    assert_eq!(
        err,
        PartialError::KeyPathNotSet {
            key_path: Person::ADDRESS.erased()
        }
    );
    assert_eq!(err.key_path().name(), "address");

    let mut address = Partial::<Address>::new();
    address
        .set_value(&Address::STREET, "12 St James's Square".to_string())
        .set_value(&Address::POSTCODE, "SW1Y 4LB".to_string());
    person.set_partial(&Person::ADDRESS, address);

    let ada = person.build()?;
    assert_eq!(
        ada,
        Person {
            name: "Ada".to_string(),
            nickname: None,
            address: Address {
                street: "12 St James's Square".to_string(),
                postcode: "SW1Y 4LB".to_string(),
            },
        }
    );
}

#[test]
fn empty_nested_partial_reports_the_inner_field() {
    let mut person = Partial::<Person>::new();
    person
        .set_value(&Person::NAME, "Ada".to_string())
        .set_optional_value(&Person::NICKNAME, None)
        .set_partial(&Person::ADDRESS, Partial::new());

    let err = person.build().unwrap_err();
    assert_eq!(err.key_path(), &Address::STREET.erased());
    assert_eq!(err.to_string(), "Key path 'Address.street' has not been set and there is no backing value");
}

#[test]
fn building_does_not_consume_the_partial() {
    let mut person = Partial::<Person>::new();
    person
        .set_value(&Person::NAME, "Ada".to_string())
        .set_optional_value(&Person::NICKNAME, Some("Countess".to_string()))
        .set_value(
            &Person::ADDRESS,
            Address {
                street: "Dorset Street".to_string(),
                postcode: "W1U".to_string(),
            },
        );

    let first = person.build()?;
    person.set_optional_value(&Person::NICKNAME, None);
    let second = person.build()?;

    assert_eq!(first.nickname.as_deref(), Some("Countess"));
    assert_eq!(second.nickname, None);
    assert_eq!(first.address, second.address);
}

#[test]
fn materialization_stops_at_the_first_missing_field() {
    // fields are read in declaration order, so the name is reported first
    let err = Partial::<Person>::new().build().unwrap_err();
    assert_eq!(err.key_path(), &Person::NAME.erased());
}
