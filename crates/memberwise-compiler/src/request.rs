//! Request descriptors.
//!
//! An [`AccessRequest`] is the immutable, hashable description of one bulk
//! accessor: the target type, the access mode and the ordered member slots.
//! It doubles as the accessor cache key.
//!
//! Resolution trims trailing unresolved slots, so `["x", "y"]` and
//! `["x", "y", "missing"]` produce equal requests. Interior unresolved slots
//! stay in place and keep their value index.

use std::fmt;
use std::hash::{Hash, Hasher};

use rustc_hash::FxHashSet;

use memberwise_core::{ClassEntry, Member, MemberKind, RequestError, TypeHash, TypeKind};
use memberwise_registry::{LookupFlags, MemberResolver, TypeRegistry};

/// Whether an accessor writes or reads its members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessMode {
    Set,
    Get,
}

impl AccessMode {
    pub fn as_str(self) -> &'static str {
        match self {
            AccessMode::Set => "set",
            AccessMode::Get => "get",
        }
    }

    /// Check if `member` can take part in an accessor of this mode.
    pub fn accepts(self, member: &Member) -> bool {
        match self {
            AccessMode::Set => member.is_writable(),
            AccessMode::Get => member.is_readable(),
        }
    }
}

impl fmt::Display for AccessMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One requested name's resolution outcome.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MemberSlot {
    Resolved(Member),
    Unresolved,
}

impl MemberSlot {
    pub fn is_resolved(&self) -> bool {
        matches!(self, MemberSlot::Resolved(_))
    }

    pub fn member(&self) -> Option<&Member> {
        match self {
            MemberSlot::Resolved(member) => Some(member),
            MemberSlot::Unresolved => None,
        }
    }
}

impl From<Option<Member>> for MemberSlot {
    fn from(member: Option<Member>) -> Self {
        member.map_or(MemberSlot::Unresolved, MemberSlot::Resolved)
    }
}

/// Immutable description of a bulk accessor.
///
/// Equality and hashing cover the target type, the access mode and the slot
/// sequence; lookup flags used during resolution are not part of identity.
#[derive(Debug, Clone)]
pub struct AccessRequest {
    target: TypeHash,
    target_name: String,
    target_kind: TypeKind,
    mode: AccessMode,
    slots: Vec<MemberSlot>,
    is_static: bool,
}

impl AccessRequest {
    /// Resolve `names` on `target` and build a request.
    ///
    /// Each name is looked up as a field first and as a property when no
    /// usable field matches. For [`AccessMode::Set`] only writable members
    /// are usable, for [`AccessMode::Get`] only readable ones.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn resolve<S: AsRef<str>>(
        registry: &TypeRegistry,
        target: TypeHash,
        names: &[S],
        flags: impl Into<LookupFlags>,
        mode: AccessMode,
    ) -> Result<Self, RequestError> {
        let flags = flags.into();
        let class = registry.get(target).ok_or(RequestError::UnknownType(target))?;
        let resolver = MemberResolver::new(registry);
        let usable = |member: &Member| mode.accepts(member);

        let mut seen = FxHashSet::default();
        let mut slots = Vec::with_capacity(names.len());
        for name in names {
            let name = name.as_ref();
            let member = match resolver.find(target, MemberKind::Field, name, flags, usable)? {
                Some(field) => Some(field),
                None => resolver.find(target, MemberKind::Property, name, flags, usable)?,
            };
            // distinct keys on the member, so "x" and "X" under ignore_case collide
            let member = member.filter(|m| !flags.distinct() || seen.insert(m.id()));
            slots.push(MemberSlot::from(member));
        }

        let requested = names.iter().map(|n| n.as_ref().to_string()).collect();
        Self::finish(class, mode, slots, requested)
    }

    /// Build a request from already-resolved slots.
    pub fn from_slots(
        class: &ClassEntry,
        mode: AccessMode,
        slots: Vec<MemberSlot>,
    ) -> Result<Self, RequestError> {
        let names = slots
            .iter()
            .filter_map(MemberSlot::member)
            .map(|m| m.name().to_string())
            .collect();
        Self::finish(class, mode, slots, names)
    }

    fn finish(
        class: &ClassEntry,
        mode: AccessMode,
        mut slots: Vec<MemberSlot>,
        names: Vec<String>,
    ) -> Result<Self, RequestError> {
        let keep = slots
            .iter()
            .rposition(MemberSlot::is_resolved)
            .map_or(0, |last| last + 1);
        slots.truncate(keep);

        if slots.is_empty() {
            return Err(RequestError::NoResolvableMembers {
                type_name: class.name.clone(),
                names,
            });
        }

        let (statics, instances): (Vec<&Member>, Vec<&Member>) = slots
            .iter()
            .filter_map(MemberSlot::member)
            .partition(|m| m.is_static());
        if !statics.is_empty() && !instances.is_empty() {
            return Err(RequestError::MixedScope {
                type_name: class.name.clone(),
                static_members: statics.iter().map(|m| m.name().to_string()).collect(),
                instance_members: instances.iter().map(|m| m.name().to_string()).collect(),
            });
        }
        let is_static = instances.is_empty();

        Ok(Self {
            target: class.type_hash,
            target_name: class.name.clone(),
            target_kind: class.type_kind,
            mode,
            slots,
            is_static,
        })
    }

    pub fn target(&self) -> TypeHash {
        self.target
    }

    pub fn target_name(&self) -> &str {
        &self.target_name
    }

    pub fn target_kind(&self) -> TypeKind {
        self.target_kind
    }

    pub fn mode(&self) -> AccessMode {
        self.mode
    }

    pub fn slots(&self) -> &[MemberSlot] {
        &self.slots
    }

    /// Number of values the accessor consumes or produces.
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    pub fn resolved_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_resolved()).count()
    }

    /// True iff every resolved slot is static.
    pub fn is_static(&self) -> bool {
        self.is_static
    }
}

impl PartialEq for AccessRequest {
    fn eq(&self, other: &Self) -> bool {
        self.target == other.target && self.mode == other.mode && self.slots == other.slots
    }
}

impl Eq for AccessRequest {}

impl Hash for AccessRequest {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.target.hash(state);
        self.mode.hash(state);
        self.slots.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{Counter, Point, Shape, registry};
    use memberwise_core::Reflect;
    use memberwise_registry::LookupOptions;

    fn set(names: &[&str]) -> Result<AccessRequest, RequestError> {
        AccessRequest::resolve(
            &registry(),
            Point::type_hash(),
            names,
            LookupOptions::default(),
            AccessMode::Set,
        )
    }

    #[test]
    fn resolves_in_order() {
        let request = set(&["y", "x"]).unwrap();
        let names: Vec<_> = request
            .slots()
            .iter()
            .map(|s| s.member().unwrap().name())
            .collect();
        assert_eq!(names, ["y", "x"]);
        assert!(!request.is_static());
        assert_eq!(request.target_name(), "Point");
        assert!(request.target_kind().is_value());
    }

    #[test]
    fn trailing_unresolved_slots_are_trimmed() {
        let plain = set(&["x", "y"]).unwrap();
        let padded = set(&["x", "y", "zzz", "www"]).unwrap();
        assert_eq!(plain, padded);
        assert_eq!(padded.slot_count(), 2);
    }

    #[test]
    fn interior_unresolved_slots_are_kept() {
        let request = set(&["x", "zzz", "y"]).unwrap();
        assert_eq!(request.slot_count(), 3);
        assert_eq!(request.resolved_count(), 2);
        assert_eq!(request.slots()[1], MemberSlot::Unresolved);
    }

    #[test]
    fn nothing_resolved_is_rejected() {
        assert_eq!(
            set(&["zzz", "www"]),
            Err(RequestError::NoResolvableMembers {
                type_name: "Point".to_string(),
                names: vec!["zzz".to_string(), "www".to_string()],
            })
        );
        assert!(matches!(
            set(&[]),
            Err(RequestError::NoResolvableMembers { .. })
        ));
    }

    #[test]
    fn unknown_type_is_rejected() {
        let result = AccessRequest::resolve(
            &registry(),
            TypeHash::from_name("Nope"),
            &["x"],
            LookupFlags::DEFAULT,
            AccessMode::Set,
        );
        assert_eq!(result, Err(RequestError::UnknownType(TypeHash::from_name("Nope"))));
    }

    #[test]
    fn set_mode_skips_read_only_members() {
        // Length is a read-only property
        let request = set(&["x", "Length"]).unwrap();
        assert_eq!(request.slot_count(), 1);

        let get = AccessRequest::resolve(
            &registry(),
            Point::type_hash(),
            &["x", "Length"],
            LookupFlags::DEFAULT,
            AccessMode::Get,
        )
        .unwrap();
        assert_eq!(get.slot_count(), 2);
    }

    #[test]
    fn get_mode_skips_write_only_properties() {
        let request = AccessRequest::resolve(
            &registry(),
            Counter::type_hash(),
            &["Reset", "count"],
            LookupFlags::DEFAULT,
            AccessMode::Get,
        )
        .unwrap();
        assert_eq!(request.slots()[0], MemberSlot::Unresolved);
        assert_eq!(request.slot_count(), 2);
    }

    #[test]
    fn read_only_field_falls_through_to_property() {
        // Shape has a read-only field `name` and a writable property `Name`
        let flags = LookupOptions::new().ignore_case();
        let request = AccessRequest::resolve(
            &registry(),
            Shape::type_hash(),
            &["name"],
            flags,
            AccessMode::Set,
        )
        .unwrap();
        let member = request.slots()[0].member().unwrap();
        assert_eq!(member.kind(), MemberKind::Property);
        assert_eq!(member.name(), "Name");
    }

    #[test]
    fn field_wins_over_property() {
        let flags = LookupOptions::new().ignore_case();
        let request = AccessRequest::resolve(
            &registry(),
            Shape::type_hash(),
            &["name"],
            flags,
            AccessMode::Get,
        )
        .unwrap();
        assert_eq!(request.slots()[0].member().unwrap().kind(), MemberKind::Field);
    }

    #[test]
    fn mode_is_part_of_identity() {
        let reg = registry();
        let resolve = |mode| {
            AccessRequest::resolve(&reg, Point::type_hash(), &["x"], LookupFlags::DEFAULT, mode)
        };
        assert_ne!(resolve(AccessMode::Set).unwrap(), resolve(AccessMode::Get).unwrap());
    }

    #[test]
    fn flags_are_not_part_of_identity() {
        let reg = registry();
        let a = AccessRequest::resolve(
            &reg,
            Point::type_hash(),
            &["x"],
            LookupFlags::DEFAULT,
            AccessMode::Set,
        )
        .unwrap();
        let b = AccessRequest::resolve(
            &reg,
            Point::type_hash(),
            &["X"],
            LookupOptions::new().ignore_case().fields_only(),
            AccessMode::Set,
        )
        .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn static_requests() {
        let reg = registry();
        let request = AccessRequest::resolve(
            &reg,
            Counter::type_hash(),
            &["Total", "Label"],
            LookupFlags::DEFAULT,
            AccessMode::Set,
        )
        .unwrap();
        assert!(request.is_static());
    }

    #[test]
    fn mixed_scope_is_rejected() {
        let result = AccessRequest::resolve(
            &registry(),
            Counter::type_hash(),
            &["count", "Total"],
            LookupFlags::DEFAULT,
            AccessMode::Set,
        );
        assert_eq!(
            result,
            Err(RequestError::MixedScope {
                type_name: "Counter".to_string(),
                static_members: vec!["Total".to_string()],
                instance_members: vec!["count".to_string()],
            })
        );
    }

    #[test]
    fn distinct_drops_repeated_names() {
        let reg = registry();
        let request = AccessRequest::resolve(
            &reg,
            Point::type_hash(),
            &["x", "x", "y"],
            LookupOptions::new().distinct(),
            AccessMode::Set,
        )
        .unwrap();
        assert_eq!(request.slots()[1], MemberSlot::Unresolved);

        let repeated = AccessRequest::resolve(
            &reg,
            Point::type_hash(),
            &["x", "x", "y"],
            LookupFlags::DEFAULT,
            AccessMode::Set,
        )
        .unwrap();
        assert_eq!(repeated.resolved_count(), 3);
    }

    #[test]
    fn distinct_matches_members_not_spellings() {
        let reg = registry();
        let request = AccessRequest::resolve(
            &reg,
            Point::type_hash(),
            &["x", "X", "y"],
            LookupOptions::new().distinct().ignore_case(),
            AccessMode::Set,
        )
        .unwrap();
        assert_eq!(request.slot_count(), 3);
        assert_eq!(request.slots()[1], MemberSlot::Unresolved);
        assert_eq!(request.resolved_count(), 2);
    }

    #[test]
    fn from_slots_trims_and_validates() {
        let reg = registry();
        let class = reg.get(Point::type_hash()).unwrap();
        let x = Member::Field(class.find_field("x").unwrap().clone());

        let request = AccessRequest::from_slots(
            class,
            AccessMode::Set,
            vec![MemberSlot::Resolved(x), MemberSlot::Unresolved],
        )
        .unwrap();
        assert_eq!(request.slot_count(), 1);

        assert!(matches!(
            AccessRequest::from_slots(class, AccessMode::Set, vec![MemberSlot::Unresolved]),
            Err(RequestError::NoResolvableMembers { .. })
        ));
    }
}
