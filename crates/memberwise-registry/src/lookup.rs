//! Lookup flags and options controlling member resolution.
//!
//! [`LookupOptions`] is the typed configuration callers build; it lowers to
//! [`LookupFlags`], the bit set the resolver consumes.
//!
//! ```
//! use memberwise_registry::{LookupFlags, LookupOptions};
//!
//! let options = LookupOptions::new().fields_only().ignore_case();
//! let flags = options.flags();
//! assert!(flags.contains(LookupFlags::FIELDS | LookupFlags::IGNORE_CASE));
//! assert!(!flags.contains(LookupFlags::PROPERTIES));
//! ```

use bitflags::bitflags;

use memberwise_core::{Member, MemberKind, Visibility};

bitflags! {
    /// Flags that control which members a lookup considers.
    ///
    /// Empty groups are lenient: with neither `FIELDS` nor `PROPERTIES` both
    /// kinds are searched, with neither `INSTANCE` nor `STATIC` both scopes
    /// are searched, and with neither `PUBLIC` nor `NON_PUBLIC` only public
    /// members are visible. `NON_PUBLIC` alone admits only protected and
    /// private members.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct LookupFlags: u32 {
        /// Public members.
        const PUBLIC = 1 << 0;
        /// Protected and private members.
        const NON_PUBLIC = 1 << 1;
        /// Instance members.
        const INSTANCE = 1 << 2;
        /// Static members.
        const STATIC = 1 << 3;
        /// Search fields.
        const FIELDS = 1 << 4;
        /// Search properties.
        const PROPERTIES = 1 << 5;
        /// Case-insensitive names, leading underscore ignored.
        const IGNORE_CASE = 1 << 6;
        /// Skip members inherited from base types.
        const DECLARED_ONLY = 1 << 7;
        /// Repeated names after the first resolve to nothing.
        const DISTINCT = 1 << 8;

        /// Public members of either scope and either kind.
        const DEFAULT = Self::PUBLIC.bits() | Self::INSTANCE.bits() | Self::STATIC.bits();
        /// Instance members of any visibility.
        const INSTANCE_ANY_VISIBILITY =
            Self::PUBLIC.bits() | Self::NON_PUBLIC.bits() | Self::INSTANCE.bits();
        /// Static members of any visibility.
        const STATIC_ANY_VISIBILITY =
            Self::PUBLIC.bits() | Self::NON_PUBLIC.bits() | Self::STATIC.bits();
    }
}

impl Default for LookupFlags {
    fn default() -> Self {
        LookupFlags::DEFAULT
    }
}

impl LookupFlags {
    /// Check if members of `kind` are searched.
    pub fn searches(self, kind: MemberKind) -> bool {
        let either = !self.intersects(LookupFlags::FIELDS | LookupFlags::PROPERTIES);
        either
            || match kind {
                MemberKind::Field => self.contains(LookupFlags::FIELDS),
                MemberKind::Property => self.contains(LookupFlags::PROPERTIES),
            }
    }

    /// Check scope and visibility of a member; `inherited` is set when the
    /// member is declared on a base type.
    pub fn admits(self, member: &Member, inherited: bool) -> bool {
        let any_scope = !self.intersects(LookupFlags::INSTANCE | LookupFlags::STATIC);
        let scope_ok = any_scope
            || if member.is_static() {
                self.contains(LookupFlags::STATIC)
            } else {
                self.contains(LookupFlags::INSTANCE)
            };

        let visibility = member.visibility();
        let visibility_ok = if visibility.is_public() {
            self.contains(LookupFlags::PUBLIC)
                || !self.intersects(LookupFlags::PUBLIC | LookupFlags::NON_PUBLIC)
        } else if inherited && visibility == Visibility::Private {
            // private members of a base are not visible through the derived type
            false
        } else {
            self.contains(LookupFlags::NON_PUBLIC)
        };

        scope_ok && visibility_ok
    }

    pub fn ignore_case(self) -> bool {
        self.contains(LookupFlags::IGNORE_CASE)
    }

    pub fn declared_only(self) -> bool {
        self.contains(LookupFlags::DECLARED_ONLY)
    }

    pub fn distinct(self) -> bool {
        self.contains(LookupFlags::DISTINCT)
    }
}

/// Which member kinds a lookup considers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MemberFilter {
    FieldOnly,
    PropertyOnly,
    #[default]
    Either,
}

/// Which member scopes a lookup considers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScopeFilter {
    StaticOnly,
    InstanceOnly,
    #[default]
    Any,
}

/// Which visibilities a lookup considers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VisibilityFilter {
    #[default]
    PublicOnly,
    NonPublicIncluded,
}

/// Typed lookup configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LookupOptions {
    pub kind: MemberFilter,
    pub scope: ScopeFilter,
    pub visibility: VisibilityFilter,
    pub ignore_case: bool,
    pub declared_only: bool,
    pub distinct: bool,
}

impl LookupOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fields_only(mut self) -> Self {
        self.kind = MemberFilter::FieldOnly;
        self
    }

    pub fn properties_only(mut self) -> Self {
        self.kind = MemberFilter::PropertyOnly;
        self
    }

    pub fn static_only(mut self) -> Self {
        self.scope = ScopeFilter::StaticOnly;
        self
    }

    pub fn instance_only(mut self) -> Self {
        self.scope = ScopeFilter::InstanceOnly;
        self
    }

    pub fn include_non_public(mut self) -> Self {
        self.visibility = VisibilityFilter::NonPublicIncluded;
        self
    }

    pub fn ignore_case(mut self) -> Self {
        self.ignore_case = true;
        self
    }

    pub fn declared_only(mut self) -> Self {
        self.declared_only = true;
        self
    }

    pub fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }

    /// Lower to the flag set consumed by the resolver.
    pub fn flags(&self) -> LookupFlags {
        let mut flags = LookupFlags::PUBLIC;
        if self.visibility == VisibilityFilter::NonPublicIncluded {
            flags |= LookupFlags::NON_PUBLIC;
        }
        flags |= match self.scope {
            ScopeFilter::StaticOnly => LookupFlags::STATIC,
            ScopeFilter::InstanceOnly => LookupFlags::INSTANCE,
            ScopeFilter::Any => LookupFlags::STATIC | LookupFlags::INSTANCE,
        };
        flags |= match self.kind {
            MemberFilter::FieldOnly => LookupFlags::FIELDS,
            MemberFilter::PropertyOnly => LookupFlags::PROPERTIES,
            MemberFilter::Either => LookupFlags::FIELDS | LookupFlags::PROPERTIES,
        };
        flags.set(LookupFlags::IGNORE_CASE, self.ignore_case);
        flags.set(LookupFlags::DECLARED_ONLY, self.declared_only);
        flags.set(LookupFlags::DISTINCT, self.distinct);
        flags
    }
}

impl From<LookupOptions> for LookupFlags {
    fn from(options: LookupOptions) -> Self {
        options.flags()
    }
}
