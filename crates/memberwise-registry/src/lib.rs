//! Type registry and member resolution.
//!
//! - [`TypeRegistry`] stores [`ClassEntry`](memberwise_core::ClassEntry)
//!   descriptions by hash and by name.
//! - [`LookupOptions`] / [`LookupFlags`] configure how names are matched.
//! - [`MemberResolver`] turns a (type, name, flags) triple into the best
//!   matching field or property.

mod lookup;
mod registry;
mod resolver;

pub use lookup::{LookupFlags, LookupOptions, MemberFilter, ScopeFilter, VisibilityFilter};
pub use registry::{HierarchyLevel, TypeRegistry};
pub use resolver::MemberResolver;
