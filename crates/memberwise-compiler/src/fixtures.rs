//! Shared test types.

use std::sync::{Arc, OnceLock};

use parking_lot::RwLock;

use memberwise_core::{ClassEntry, Describe, FieldEntry, PropertyEntry, Reflect, TypeHash};
use memberwise_registry::TypeRegistry;

macro_rules! reflect {
    ($ty:ty, $name:literal) => {
        impl Reflect for $ty {
            fn type_hash() -> TypeHash {
                TypeHash::from_name($name)
            }

            fn type_name() -> &'static str {
                $name
            }
        }
    };
}

/// Value type with two fields and a derived property.
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

reflect!(Point, "Point");

impl Describe for Point {
    fn describe() -> ClassEntry {
        ClassEntry::value::<Point>()
            .with_field(FieldEntry::instance::<Point, i32>("x", |p| &p.x, |p| &mut p.x))
            .with_field(FieldEntry::instance::<Point, i32>("y", |p| &p.y, |p| &mut p.y))
            .with_property(PropertyEntry::read_only::<Point, f64>("Length", |p| {
                f64::from(p.x * p.x + p.y * p.y).sqrt()
            }))
    }
}

/// Reference type with instance and static members.
#[derive(Debug, Default)]
pub struct Counter {
    pub count: i64,
    pub resets: u32,
}

reflect!(Counter, "Counter");

pub fn counter_total() -> &'static Arc<RwLock<i64>> {
    static TOTAL: OnceLock<Arc<RwLock<i64>>> = OnceLock::new();
    TOTAL.get_or_init(|| Arc::new(RwLock::new(0)))
}

pub fn counter_label() -> &'static RwLock<String> {
    static LABEL: OnceLock<RwLock<String>> = OnceLock::new();
    LABEL.get_or_init(|| RwLock::new(String::from("counter")))
}

impl Describe for Counter {
    fn describe() -> ClassEntry {
        ClassEntry::reference::<Counter>()
            .with_field(FieldEntry::instance::<Counter, i64>(
                "count",
                |c| &c.count,
                |c| &mut c.count,
            ))
            .with_field(FieldEntry::static_cell::<Counter, i64>(
                "Total",
                Arc::clone(counter_total()),
            ))
            .with_property(PropertyEntry::static_read_write::<Counter, String>(
                "Label",
                || counter_label().read().clone(),
                |v| *counter_label().write() = v,
            ))
            .with_property(PropertyEntry::write_only::<Counter, bool>("Reset", |c, reset| {
                if reset {
                    c.count = 0;
                    c.resets += 1;
                }
            }))
    }
}

/// Reference type with a read-only field shadowed by a writable property.
#[derive(Debug, Default)]
pub struct Shape {
    pub name: String,
}

reflect!(Shape, "Shape");

impl Describe for Shape {
    fn describe() -> ClassEntry {
        ClassEntry::reference::<Shape>()
            .with_field(FieldEntry::read_only::<Shape, String>("name", |s| &s.name))
            .with_property(PropertyEntry::read_write::<Shape, String>(
                "Name",
                |s| s.name.clone(),
                |s, v| s.name = v,
            ))
    }
}

/// Registry with every fixture type registered.
pub fn registry() -> TypeRegistry {
    let mut registry = TypeRegistry::new();
    for result in [
        registry.register_type::<Point>(),
        registry.register_type::<Counter>(),
        registry.register_type::<Shape>(),
    ] {
        result.expect("fixture registration");
    }
    registry
}
