//! Integration tests for compiled bulk accessors.

use memberwise::{
    AccessError, AccessMode, ConversionError, LookupFlags, LookupOptions, MultiGetter,
    MultiSetter, Object, Receiver, Reflect, Reflector, RequestError, Value, values,
};

#[derive(Debug, Clone, PartialEq, Reflect)]
#[memberwise(value)]
struct Point {
    x: i32,
    y: i32,
}

#[derive(Debug, Default, Reflect)]
struct Account {
    owner: String,
    balance: f64,
    #[memberwise(readonly)]
    number: u32,
}

#[derive(Debug, Default, Reflect)]
struct Ledger {
    entries: u64,
}

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn full_coverage() {
    init_logging();
    let reflector = Reflector::new();
    let setter = reflector
        .setter_for::<Point, _>(&["x", "y"], LookupFlags::DEFAULT)
        .unwrap();

    let point = reflector.wrap(Point { x: 0, y: 0 }).unwrap();
    setter.set(Some(&point), &values![3, 4]).unwrap();
    assert_eq!(point.get::<Point>(), Some(Point { x: 3, y: 4 }));
}

#[test]
fn trailing_unresolved_names_share_one_accessor() {
    let reflector = Reflector::new();
    let plain = reflector
        .setter_for::<Point, _>(&["x", "y"], LookupFlags::DEFAULT)
        .unwrap();
    let padded = reflector
        .setter_for::<Point, _>(&["x", "y", "zzz"], LookupFlags::DEFAULT)
        .unwrap();

    assert!(MultiSetter::ptr_eq(&plain, &padded));
    assert_eq!(padded.slot_count(), 2);
    assert_eq!(reflector.cache().setter_count(), 1);

    let requests: Vec<_> = [&["x", "y"][..], &["x", "y", "zzz"][..]]
        .into_iter()
        .map(|names| {
            reflector
                .request(Point::type_hash(), names, LookupFlags::DEFAULT, AccessMode::Set)
                .unwrap()
        })
        .collect();
    assert_eq!(requests[0], requests[1]);
}

#[test]
fn interior_unresolved_names_are_skipped() {
    let reflector = Reflector::new();
    let setter = reflector
        .setter_for::<Point, _>(&["x", "zzz", "y"], LookupFlags::DEFAULT)
        .unwrap();
    assert_eq!(setter.slot_count(), 3);

    let point = reflector.wrap(Point { x: 0, y: 0 }).unwrap();
    setter.set(Some(&point), &values![3, 99, 4]).unwrap();
    assert_eq!(point.get::<Point>(), Some(Point { x: 3, y: 4 }));

    assert_eq!(
        setter.set(Some(&point), &values![3, 4]),
        Err(AccessError::ArityMismatch { expected: 3, got: 2 })
    );
    assert_eq!(
        setter.set(Some(&point), &values![3, 99, 4, 5]),
        Err(AccessError::ArityMismatch { expected: 3, got: 4 })
    );
}

#[test]
fn all_unresolved_is_rejected() {
    let reflector = Reflector::new();
    let err = reflector
        .setter_for::<Point, _>(&["zzz", "www"], LookupFlags::DEFAULT)
        .unwrap_err();
    assert!(err.is_not_found());
    assert!(matches!(
        err,
        memberwise::MemberwiseError::Request(RequestError::NoResolvableMembers { .. })
    ));
}

#[test]
fn value_semantics_writeback_is_observable() {
    let reflector = Reflector::new();
    let point = reflector.wrap(Point { x: 1, y: 2 }).unwrap();
    let alias = point.clone();

    reflector.set_members(&point, &["y"], &values![20]).unwrap();
    assert_eq!(alias.get::<Point>(), Some(Point { x: 1, y: 20 }));
    assert_eq!(
        reflector.get_members(&alias, &["x", "y"]).unwrap(),
        values![1, 20]
    );

    let getter = reflector
        .getter_for::<Point, _>(&["x"], LookupFlags::DEFAULT)
        .unwrap();
    assert_eq!(getter.receiver(), Receiver::Value);
}

#[test]
fn detached_copies_are_independent() {
    let reflector = Reflector::new();
    let point = reflector.wrap(Point { x: 1, y: 2 }).unwrap();
    let copy = point.detach().unwrap();

    reflector.set_members(&copy, &["x"], &values![100]).unwrap();
    assert_eq!(point.get::<Point>(), Some(Point { x: 1, y: 2 }));
    assert_eq!(copy.get::<Point>(), Some(Point { x: 100, y: 2 }));
}

#[test]
fn reference_semantics_mutate_shared_storage() {
    let reflector = Reflector::new();
    let account = reflector.wrap(Account::default()).unwrap();
    let alias = account.clone();

    let setter = reflector
        .setter_for::<Account, _>(&["owner", "balance"], LookupFlags::DEFAULT)
        .unwrap();
    assert_eq!(setter.receiver(), Receiver::Reference);
    setter
        .set(Some(&account), &values!["ada", 12.5])
        .unwrap();

    assert_eq!(
        alias.read(|a: &Account| (a.owner.clone(), a.balance)),
        Some(("ada".to_string(), 12.5))
    );
}

#[test]
fn ints_widen_into_float_members() {
    let reflector = Reflector::new();
    let account = reflector.wrap(Account::default()).unwrap();
    reflector
        .set_members(&account, &["balance"], &values![7])
        .unwrap();
    assert_eq!(account.read(|a: &Account| a.balance), Some(7.0));
}

#[test]
fn read_only_fields_are_readable_but_not_writable() {
    let reflector = Reflector::new();
    let account = reflector
        .wrap(Account {
            number: 42,
            ..Account::default()
        })
        .unwrap();

    assert_eq!(
        reflector.get_members(&account, &["number"]).unwrap(),
        values![42u32]
    );
    let err = reflector
        .set_members(&account, &["number"], &values![1])
        .unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn conversion_failures_name_the_slot() {
    let reflector = Reflector::new();
    let point = reflector.wrap(Point { x: 0, y: 0 }).unwrap();
    let err = reflector
        .set_members(&point, &["x", "y"], &values![1, "two"])
        .unwrap_err();

    match err {
        memberwise::MemberwiseError::Access(AccessError::TypeConversion {
            index,
            member,
            target_type,
            ..
        }) => {
            assert_eq!((index, member.as_str(), target_type), (1, "y", "int"));
        }
        other => panic!("unexpected {other:?}"),
    }
    // the failed batch did not write back
    assert_eq!(point.get::<Point>(), Some(Point { x: 0, y: 0 }));
}

#[test]
fn integer_overflow_is_a_conversion_failure() {
    let reflector = Reflector::new();
    let point = reflector.wrap(Point { x: 0, y: 0 }).unwrap();
    let err = reflector
        .set_members(&point, &["x"], &[Value::Int(i64::MAX)])
        .unwrap_err();
    assert!(err.is_access());
}

#[test]
fn negative_values_do_not_wrap_into_unsigned_fields() {
    let reflector = Reflector::new();
    let ledger = reflector.wrap(Ledger { entries: 7 }).unwrap();
    let err = reflector
        .set_members(&ledger, &["entries"], &values![-1])
        .unwrap_err();

    match err {
        memberwise::MemberwiseError::Access(AccessError::TypeConversion {
            index,
            target_type,
            source,
            ..
        }) => {
            assert_eq!((index, target_type), (0, "uint64"));
            assert_eq!(
                source,
                ConversionError::IntegerOverflow {
                    value: -1,
                    target_type: "u64",
                }
            );
        }
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(ledger.read(|l: &Ledger| l.entries), Some(7));
}

#[test]
fn instance_accessors_reject_missing_or_foreign_instances() {
    let reflector = Reflector::new();
    let setter = reflector
        .setter_for::<Point, _>(&["x"], LookupFlags::DEFAULT)
        .unwrap();

    assert_eq!(
        setter.set(None, &values![1]),
        Err(AccessError::MissingInstance {
            type_name: "Point".to_string()
        })
    );

    let account = reflector.wrap(Account::default()).unwrap();
    assert_eq!(
        setter.set(Some(&account), &values![1]),
        Err(AccessError::InstanceTypeMismatch {
            expected: "Point".to_string(),
            actual: "Account".to_string(),
        })
    );
}

#[test]
fn getter_returns_void_for_interior_gaps() {
    let reflector = Reflector::new();
    let getter: MultiGetter = reflector
        .getter_for::<Point, _>(&["y", "nothing", "x"], LookupFlags::DEFAULT)
        .unwrap();
    let point = Object::new(Point { x: 5, y: 6 });
    assert_eq!(
        getter.get(Some(&point)).unwrap(),
        [Value::Int(6), Value::Void, Value::Int(5)]
    );
}

#[test]
fn case_insensitive_lookup() {
    let reflector = Reflector::new();
    let options = LookupOptions::new().ignore_case();
    let setter = reflector
        .setter_for::<Account, _>(&["OWNER", "_Balance"], options)
        .unwrap();

    let account = reflector.wrap(Account::default()).unwrap();
    setter.set(Some(&account), &values!["grace", 1.0]).unwrap();
    assert_eq!(account.read(|a: &Account| a.owner.clone()), Some("grace".to_string()));

    let strict = reflector.setter_for::<Account, _>(&["OWNER"], LookupFlags::DEFAULT);
    assert!(strict.unwrap_err().is_not_found());
}
