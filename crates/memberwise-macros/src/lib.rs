//! Memberwise Proc Macros
//!
//! # Macros
//!
//! - `#[derive(Reflect)]` - Implement `Reflect` and `Describe` for a struct
//!
//! # Example
//!
//! ```ignore
//! use memberwise::Reflect;
//!
//! #[derive(Clone, Reflect)]
//! #[memberwise(value)]
//! pub struct Point {
//!     pub x: i32,
//!     pub y: i32,
//! }
//! ```

use proc_macro::TokenStream;

mod attrs;
mod derive_reflect;

/// Derive `Reflect` and `Describe` for a struct with named fields.
///
/// Every named field becomes a read-write instance field unless marked
/// otherwise.
///
/// # Type Attributes
///
/// - `#[memberwise(name = "...")]` - Override the registered type name
/// - `#[memberwise(value)]` - Value semantics (requires `Clone`); also
///   generates `FromValue` and `IntoValue`
/// - `#[memberwise(reference)]` - Reference semantics (the default)
/// - `#[memberwise(extend = path)]` - A `fn(ClassEntry) -> ClassEntry`
///   applied after the generated fields, for properties and statics
///
/// # Field Attributes
///
/// - `#[memberwise(skip)]` - Do not register the field
/// - `#[memberwise(name = "...")]` - Override the member name
/// - `#[memberwise(readonly)]` - Register without write access
/// - `#[memberwise(private)]` / `#[memberwise(protected)]` - Visibility
/// - `#[memberwise(base)]` - The field holds the base type; its members are
///   inherited
///
/// # Example
///
/// ```ignore
/// #[derive(Reflect)]
/// #[memberwise(name = "Hero", extend = hero_extras)]
/// pub struct Player {
///     #[memberwise(base)]
///     pub actor: Actor,
///
///     #[memberwise(name = "displayName")]
///     pub name: String,
///
///     #[memberwise(readonly)]
///     pub id: u64,
///
///     #[memberwise(skip)]
///     pub scratch: Vec<u8>,
/// }
///
/// fn hero_extras(entry: ClassEntry) -> ClassEntry {
///     entry.with_property(PropertyEntry::read_only::<Player, bool>("IsAlive", |p| p.actor.hp > 0))
/// }
/// ```
#[proc_macro_derive(Reflect, attributes(memberwise))]
pub fn derive_reflect(input: TokenStream) -> TokenStream {
    derive_reflect::derive_reflect_impl(input)
}
