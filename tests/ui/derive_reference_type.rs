use memberwise::{ClassEntry, PropertyEntry, Reflect, Reflector, values};

#[derive(Default, Reflect)]
pub struct Base {
    pub id: u64,
}

fn extras(entry: ClassEntry) -> ClassEntry {
    entry.with_property(PropertyEntry::read_only::<Derived, u64>("Len", |d| d.items.len() as u64))
}

#[derive(Default, Reflect)]
#[memberwise(reference, extend = extras)]
pub struct Derived {
    #[memberwise(base)]
    pub base: Base,
    #[memberwise(readonly, protected)]
    pub label: String,
    #[memberwise(skip)]
    pub items: Vec<u32>,
}

fn main() {
    let reflector = Reflector::new();
    let derived = reflector.wrap(Derived::default()).unwrap();
    reflector
        .set_members(&derived, &["id"], &values![9u64])
        .unwrap();
    let values = reflector.get_members(&derived, &["id"]).unwrap();
    assert_eq!(values.len(), 1);
}
