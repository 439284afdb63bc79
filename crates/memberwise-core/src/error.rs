//! Error types for every phase of accessor generation and use.
//!
//! - [`ConversionError`] - a [`Value`](crate::Value) could not become a Rust value
//! - [`MemberError`] - a single member read/write failed
//! - [`RegistrationError`] - a type could not be registered
//! - [`RequestError`] - a request could not be resolved or compiled
//! - [`AccessError`] - a compiled accessor invocation failed
//! - [`MemberwiseError`] - unified wrapper with `#[from]` conversions

use thiserror::Error;

use crate::TypeHash;

// ============================================================================
// Conversion Errors
// ============================================================================

/// Errors converting a dynamic [`Value`](crate::Value) into a typed value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConversionError {
    /// The value has an incompatible type.
    #[error("type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        /// The expected type name.
        expected: &'static str,
        /// The actual value type name.
        actual: &'static str,
    },

    /// An integer value does not fit the target integer type.
    #[error("integer overflow: {value} doesn't fit in {target_type}")]
    IntegerOverflow {
        /// The value that overflowed.
        value: i64,
        /// The target type.
        target_type: &'static str,
    },

    /// A float value does not fit the target float type.
    #[error("float conversion: {value} doesn't fit in {target_type}")]
    FloatConversion {
        /// The value that overflowed.
        value: f64,
        /// The target type.
        target_type: &'static str,
    },

    /// A null value was supplied for a non-optional type.
    #[error("null cannot be converted to {target_type}")]
    NullValue {
        /// The target type.
        target_type: &'static str,
    },
}

// ============================================================================
// Member Errors
// ============================================================================

/// Errors raised by a single field or property access.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MemberError {
    /// The incoming value could not be converted to the member's type.
    #[error(transparent)]
    Conversion(#[from] ConversionError),

    /// The receiver is not an instance of the member's declaring type.
    #[error("receiver is not an instance of {expected}")]
    ReceiverMismatch {
        /// The declaring type name.
        expected: &'static str,
    },

    /// The member has no read capability.
    #[error("member '{member}' is not readable")]
    NotReadable {
        /// The member name.
        member: String,
    },

    /// The member has no write capability.
    #[error("member '{member}' is not writable")]
    NotWritable {
        /// The member name.
        member: String,
    },
}

// ============================================================================
// Registration Errors
// ============================================================================

/// Errors that occur while registering types.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegistrationError {
    /// A type with this name was already registered.
    #[error("duplicate type: {0}")]
    DuplicateType(String),

    /// A type declares the same member twice.
    #[error("duplicate member '{member}' on type '{type_name}'")]
    DuplicateMember {
        /// The declaring type.
        type_name: String,
        /// The repeated member name.
        member: String,
    },

    /// A type names a base that is not registered.
    #[error("type '{type_name}' has unregistered base {base}")]
    UnknownBase {
        /// The derived type.
        type_name: String,
        /// The missing base hash.
        base: TypeHash,
    },

    /// A type's base chain leads back to itself.
    #[error("type '{type_name}' has cyclic base '{base}'")]
    CyclicBase {
        /// The derived type.
        type_name: String,
        /// The base that closes the cycle.
        base: String,
    },
}

// ============================================================================
// Request Errors
// ============================================================================

/// Errors that occur while resolving or compiling an accessor request.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RequestError {
    /// The target type is not registered.
    #[error("unknown type: {0}")]
    UnknownType(TypeHash),

    /// No requested name resolved to a usable member.
    #[error("no resolvable members on '{type_name}' for [{}]", names.join(", "))]
    NoResolvableMembers {
        /// The target type.
        type_name: String,
        /// The requested names.
        names: Vec<String>,
    },

    /// A request resolved to both static and instance members.
    #[error(
        "request on '{type_name}' mixes static members [{}] with instance members [{}]",
        static_members.join(", "),
        instance_members.join(", ")
    )]
    MixedScope {
        /// The target type.
        type_name: String,
        /// Resolved static member names.
        static_members: Vec<String>,
        /// Resolved instance member names.
        instance_members: Vec<String>,
    },

    /// A request resolved for one access mode was compiled for the other.
    #[error("request on '{type_name}' was resolved for {resolved} access, not {requested}")]
    ModeMismatch {
        /// The target type.
        type_name: String,
        /// The mode the request was resolved for.
        resolved: &'static str,
        /// The mode the compiler was asked for.
        requested: &'static str,
    },

    /// A single named member was not found (single-member call sites).
    #[error("member '{name}' not found on '{type_name}'")]
    MemberNotFound {
        /// The target type.
        type_name: String,
        /// The requested name.
        name: String,
    },
}

impl RequestError {
    /// Check if this error belongs to the "member not found" family.
    ///
    /// The `try_*` wrappers turn exactly these errors into `None`/`false`.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            RequestError::MemberNotFound { .. } | RequestError::NoResolvableMembers { .. }
        )
    }
}

// ============================================================================
// Access Errors
// ============================================================================

/// Errors raised when invoking a compiled accessor.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AccessError {
    /// The value array length differs from the compiled slot count.
    #[error("arity mismatch: accessor expects {expected} value(s), got {got}")]
    ArityMismatch {
        /// Compiled slot count.
        expected: usize,
        /// Supplied value count.
        got: usize,
    },

    /// An instance accessor was invoked without an instance.
    #[error("instance of '{type_name}' required")]
    MissingInstance {
        /// The target type.
        type_name: String,
    },

    /// The supplied instance is of a different type.
    #[error("instance type mismatch: expected {expected}, got {actual}")]
    InstanceTypeMismatch {
        /// The compiled target type.
        expected: String,
        /// The supplied instance type.
        actual: String,
    },

    /// A value could not be converted to a slot's declared type.
    #[error("value at index {index} cannot be converted to {target_type} for '{member}': {source}")]
    TypeConversion {
        /// Slot index.
        index: usize,
        /// Member name.
        member: String,
        /// Declared member type.
        target_type: &'static str,
        /// Underlying conversion failure.
        #[source]
        source: ConversionError,
    },

    /// A member access failed for a reason other than conversion.
    #[error("access to '{member}' at index {index} failed: {source}")]
    Member {
        /// Slot index.
        index: usize,
        /// Member name.
        member: String,
        /// Underlying failure.
        #[source]
        source: MemberError,
    },

    /// A value-semantics cell holds a type without copy behaviour.
    #[error("value of type '{type_name}' cannot be copied out of its cell")]
    NotCopyable {
        /// The stored type.
        type_name: String,
    },
}

impl AccessError {
    /// Attach slot information to a member-level failure.
    pub fn at_slot(
        index: usize,
        member: &str,
        target_type: &'static str,
        error: MemberError,
    ) -> Self {
        match error {
            MemberError::Conversion(source) => AccessError::TypeConversion {
                index,
                member: member.to_string(),
                target_type,
                source,
            },
            source => AccessError::Member {
                index,
                member: member.to_string(),
                source,
            },
        }
    }
}

// ============================================================================
// Unified Error Type
// ============================================================================

/// The unified error type for all memberwise operations.
///
/// Each variant uses `#[from]` so the `?` operator converts phase errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MemberwiseError {
    /// A conversion error.
    #[error(transparent)]
    Conversion(#[from] ConversionError),

    /// A registration error.
    #[error(transparent)]
    Registration(#[from] RegistrationError),

    /// A request error.
    #[error(transparent)]
    Request(#[from] RequestError),

    /// An access error.
    #[error(transparent)]
    Access(#[from] AccessError),
}

impl MemberwiseError {
    /// Check if this is a registration error.
    pub fn is_registration(&self) -> bool {
        matches!(self, MemberwiseError::Registration(_))
    }

    /// Check if this is a request error.
    pub fn is_request(&self) -> bool {
        matches!(self, MemberwiseError::Request(_))
    }

    /// Check if this is an access error.
    pub fn is_access(&self) -> bool {
        matches!(self, MemberwiseError::Access(_))
    }

    /// Check if this error belongs to the "member not found" family.
    pub fn is_not_found(&self) -> bool {
        matches!(self, MemberwiseError::Request(e) if e.is_not_found())
    }
}

// ============================================================================
// Tests
// ============================================================================
