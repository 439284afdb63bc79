//! Integration tests for `#[derive(Reflect)]`.

use std::sync::atomic::{AtomicI64, Ordering};

use memberwise::{
    ClassEntry, Describe, FromValue, IntoValue, LookupFlags, LookupOptions, MemberKind, Object,
    PropertyEntry, Reflect, Reflector, TypeHash, TypeKind, Value, Visibility, values,
};

/// Test basic `#[derive(Reflect)]` usage.
#[derive(Reflect)]
struct Simple {
    value: i32,
}

#[test]
fn simple_derive() {
    assert_eq!(Simple::type_name(), "Simple");
    assert_eq!(Simple::type_hash(), TypeHash::from_name("Simple"));

    let entry = Simple::describe();
    assert!(entry.is_reference_type());
    assert_eq!(entry.fields.len(), 1);
    assert_eq!(entry.fields[0].name, "value");
    assert!(entry.copy.is_none());

    let simple = Simple { value: 1 };
    assert_eq!(simple.value, 1);
}

/// Test `#[derive(Reflect)]` with a custom name and value semantics.
#[derive(Debug, Clone, PartialEq, Reflect)]
#[memberwise(name = "Vec2", value)]
struct Vector {
    x: f32,
    y: f32,
}

#[test]
fn value_type_derive() {
    assert_eq!(Vector::type_name(), "Vec2");
    let entry = Vector::describe();
    assert!(entry.is_value_type());
    assert_eq!(entry.type_kind, TypeKind::Value);
    assert!(entry.copy.is_some());
    assert!(Object::new(Vector { x: 0.0, y: 0.0 }).is_value_type());
}

#[test]
fn value_types_round_trip_through_values() {
    let v = Vector { x: 1.0, y: 2.0 };
    let value = v.clone().into_value();
    assert!(matches!(&value, Value::Object(obj) if obj.is_value_type()));
    assert_eq!(Vector::from_value(&value).unwrap(), v);
    assert!(Vector::from_value(&Value::Int(1)).is_err());
}

/// Value types can be members of other types.
#[derive(Debug, Clone, Reflect)]
#[memberwise(value)]
struct Segment {
    from: Vector,
    to: Vector,
}

#[test]
fn value_type_members() {
    let reflector = Reflector::new();
    reflector.register::<Vector>().unwrap();
    let segment = reflector
        .wrap(Segment {
            from: Vector { x: 0.0, y: 0.0 },
            to: Vector { x: 0.0, y: 0.0 },
        })
        .unwrap();

    reflector
        .set_members(&segment, &["to"], &values![Vector { x: 3.0, y: 4.0 }])
        .unwrap();
    let to = reflector.get_members(&segment, &["to"]).unwrap();
    assert_eq!(
        Vector::from_value(&to[0]).unwrap(),
        Vector { x: 3.0, y: 4.0 }
    );
}

#[derive(Debug, Default, Reflect)]
struct Entity {
    id: i64,
    #[memberwise(private)]
    secret: i32,
    #[memberwise(protected)]
    tag: String,
}

static POPULATION: AtomicI64 = AtomicI64::new(0);

fn hero_extras(entry: ClassEntry) -> ClassEntry {
    entry
        .with_property(PropertyEntry::read_only::<Player, bool>("IsVeteran", |p| {
            p.level >= 10
        }))
        .with_property(PropertyEntry::static_read_write::<Player, i64>(
            "Population",
            || POPULATION.load(Ordering::SeqCst),
            |v| POPULATION.store(v, Ordering::SeqCst),
        ))
}

#[derive(Debug, Default, Reflect)]
#[memberwise(name = "Hero", reference, extend = hero_extras)]
struct Player {
    #[memberwise(base)]
    entity: Entity,
    #[memberwise(name = "displayName")]
    name: String,
    #[memberwise(readonly)]
    level: u32,
    #[memberwise(skip)]
    scratch: Vec<u8>,
}

#[test]
fn field_attributes() {
    let entry = Player::describe();
    assert_eq!(entry.name, "Hero");

    let names: Vec<_> = entry.fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, ["displayName", "level"]);
    assert!(entry.find_field("level").unwrap().writer.is_none());
    assert!(entry.find_field("scratch").is_none());
    assert_eq!(entry.base.as_ref().unwrap().base, Entity::type_hash());

    let entity = Entity::describe();
    assert_eq!(entity.find_field("secret").unwrap().visibility, Visibility::Private);
    assert_eq!(entity.find_field("tag").unwrap().visibility, Visibility::Protected);
    assert_eq!(entity.find_field("id").unwrap().visibility, Visibility::Public);

    let player = Player::default();
    assert!(player.scratch.is_empty());
}

#[test]
fn extend_adds_properties() {
    let entry = Player::describe();
    let names: Vec<_> = entry.properties.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["IsVeteran", "Population"]);
    assert!(entry.find_property("Population").unwrap().is_static);
}

#[test]
fn base_members_are_inherited() {
    let reflector = Reflector::new();
    let player = reflector.wrap(Player::default()).unwrap();
    assert!(reflector.registry().contains(Entity::type_hash()));

    reflector
        .set_members(&player, &["id", "displayName"], &values![7, "hero"])
        .unwrap();
    assert_eq!(
        player.read(|p: &Player| (p.entity.id, p.name.clone())),
        Some((7, "hero".to_string()))
    );
    assert_eq!(
        reflector.get_members(&player, &["id", "IsVeteran"]).unwrap(),
        values![7, false]
    );
}

#[test]
fn visibility_controls_lookup() {
    let reflector = Reflector::new();
    let entity = reflector.wrap(Entity::default()).unwrap();

    let public = reflector.setter_for::<Entity, _>(&["tag"], LookupFlags::DEFAULT);
    assert!(public.unwrap_err().is_not_found());

    let all = LookupOptions::new().include_non_public();
    reflector
        .setter_for::<Entity, _>(&["tag", "secret"], all)
        .unwrap()
        .set(Some(&entity), &values!["boss", 3])
        .unwrap();
    assert_eq!(
        entity.read(|e: &Entity| (e.tag.clone(), e.secret)),
        Some(("boss".to_string(), 3))
    );

    // private members of a base are hidden from the derived type
    reflector.register::<Player>().unwrap();
    let inherited = reflector
        .request(
            Player::type_hash(),
            &["secret", "tag"],
            all,
            memberwise::AccessMode::Set,
        )
        .unwrap();
    assert!(!inherited.slots()[0].is_resolved());
    assert_eq!(
        inherited.slots()[1].member().unwrap().kind(),
        MemberKind::Field
    );
}

#[test]
fn static_properties_from_extend() {
    let reflector = Reflector::new();
    reflector
        .set_static_members::<Player, _>(&["Population"], &values![12])
        .unwrap();
    assert_eq!(
        reflector
            .get_static_members::<Player, _>(&["Population"])
            .unwrap(),
        values![12]
    );

    let object = Object::new(Player::default());
    assert!(!object.is_value_type());
}
