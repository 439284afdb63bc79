//! Member resolution: (type, name, flags) to the best field or property.
//!
//! Ranking when several members match a name:
//!
//! 1. An exact-name match beats a case-insensitive one.
//! 2. A member declared on the type itself beats an inherited one, and a
//!    nearer base beats a farther one.
//!
//! Inherited instance members are returned re-based so that their closures
//! accept the requested (derived) type.

use log::trace;
use rustc_hash::FxHashSet;

use memberwise_core::{ClassEntry, Member, MemberKind, RequestError, TypeHash, names_match};

use crate::{LookupFlags, TypeRegistry};

/// Resolves member names against a [`TypeRegistry`].
#[derive(Clone, Copy)]
pub struct MemberResolver<'r> {
    registry: &'r TypeRegistry,
}

impl<'r> MemberResolver<'r> {
    pub fn new(registry: &'r TypeRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &'r TypeRegistry {
        self.registry
    }

    /// Find the best member of `kind` named `name` that `accept` agrees to.
    ///
    /// Members rejected by `accept` are skipped as if absent, so a
    /// non-writable field does not hide a writable one further up the chain.
    pub fn find(
        &self,
        target: TypeHash,
        kind: MemberKind,
        name: &str,
        flags: LookupFlags,
        accept: impl Fn(&Member) -> bool,
    ) -> Result<Option<Member>, RequestError> {
        let levels = self
            .registry
            .hierarchy(target)
            .ok_or(RequestError::UnknownType(target))?;
        if !flags.searches(kind) {
            return Ok(None);
        }

        let passes: &[bool] = if flags.ignore_case() {
            &[false, true]
        } else {
            &[false]
        };

        for &insensitive in passes {
            for (depth, level) in levels.iter().enumerate() {
                if depth > 0 && flags.declared_only() {
                    break;
                }
                let found = declared(level.class, kind).find(|member| {
                    names_match(member.name(), name, insensitive)
                        && flags.admits(member, depth > 0)
                        && accept(member)
                });
                if let Some(member) = found {
                    trace!(
                        "resolved '{}' on '{}' to {} '{}' declared on '{}'",
                        name,
                        levels[0].class.name,
                        kind,
                        member.name(),
                        level.class.name
                    );
                    return Ok(Some(match &level.link {
                        Some(link) => member.rebase(link),
                        None => member,
                    }));
                }
            }
        }

        trace!("no {} '{}' on '{}'", kind, name, levels[0].class.name);
        Ok(None)
    }

    /// Find a field by name.
    pub fn find_field(
        &self,
        target: TypeHash,
        name: &str,
        flags: LookupFlags,
    ) -> Result<Option<Member>, RequestError> {
        self.find(target, MemberKind::Field, name, flags, |_| true)
    }

    /// Find a property by name.
    pub fn find_property(
        &self,
        target: TypeHash,
        name: &str,
        flags: LookupFlags,
    ) -> Result<Option<Member>, RequestError> {
        self.find(target, MemberKind::Property, name, flags, |_| true)
    }

    /// List every member visible on `target` under `flags`.
    ///
    /// Own members come first. A member hides same-named members of the same
    /// kind further up the chain.
    pub fn members(&self, target: TypeHash, flags: LookupFlags) -> Result<Vec<Member>, RequestError> {
        let levels = self
            .registry
            .hierarchy(target)
            .ok_or(RequestError::UnknownType(target))?;

        let mut seen = FxHashSet::default();
        let mut members = Vec::new();
        for (depth, level) in levels.iter().enumerate() {
            if depth > 0 && flags.declared_only() {
                break;
            }
            for kind in [MemberKind::Field, MemberKind::Property] {
                if !flags.searches(kind) {
                    continue;
                }
                for member in declared(level.class, kind) {
                    if !flags.admits(&member, depth > 0)
                        || !seen.insert((kind, member.name().to_string()))
                    {
                        continue;
                    }
                    members.push(match &level.link {
                        Some(link) => member.rebase(link),
                        None => member,
                    });
                }
            }
        }
        Ok(members)
    }
}

fn declared(class: &ClassEntry, kind: MemberKind) -> Box<dyn Iterator<Item = Member> + '_> {
    match kind {
        MemberKind::Field => Box::new(class.fields.iter().cloned().map(Member::Field)),
        MemberKind::Property => Box::new(class.properties.iter().cloned().map(Member::Property)),
    }
}
