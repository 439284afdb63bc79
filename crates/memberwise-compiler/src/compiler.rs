//! Accessor compilation.
//!
//! Turns an [`AccessRequest`] into a [`MultiSetter`] or [`MultiGetter`]. Each
//! resolved slot becomes a pre-selected member closure and the receiver
//! strategy is fixed from the request's scope and the target's type kind.

use log::debug;

use memberwise_core::{MemberError, RequestError};

use crate::accessor::{GetStep, MultiGetter, MultiSetter, Receiver, SetStep, Target};
use crate::request::{AccessMode, AccessRequest, MemberSlot};

/// Builds compiled accessors from request descriptors.
#[derive(Debug, Default, Clone, Copy)]
pub struct AccessorCompiler;

impl AccessorCompiler {
    pub fn new() -> Self {
        Self
    }

    /// Compile a bulk setter.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn compile_setter(&self, request: &AccessRequest) -> Result<MultiSetter, RequestError> {
        check_mode(request, AccessMode::Set)?;

        let mut steps = Vec::with_capacity(request.slot_count());
        for slot in request.slots() {
            let MemberSlot::Resolved(member) = slot else {
                steps.push(None);
                continue;
            };
            let write = member.writer().cloned().ok_or_else(|| {
                not_usable(request, MemberError::NotWritable {
                    member: member.name().to_string(),
                })
            })?;
            steps.push(Some(SetStep {
                name: member.name().to_string(),
                target_type: member.declared_type().type_name,
                write,
            }));
        }

        let target = target(request);
        debug!(
            "compiled {:?} setter for '{}' over {} slot(s)",
            target.receiver,
            target.name,
            steps.len()
        );
        Ok(MultiSetter::new(target, steps))
    }

    /// Compile a bulk getter.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn compile_getter(&self, request: &AccessRequest) -> Result<MultiGetter, RequestError> {
        check_mode(request, AccessMode::Get)?;

        let mut steps = Vec::with_capacity(request.slot_count());
        for slot in request.slots() {
            let MemberSlot::Resolved(member) = slot else {
                steps.push(None);
                continue;
            };
            let read = member.reader().cloned().ok_or_else(|| {
                not_usable(request, MemberError::NotReadable {
                    member: member.name().to_string(),
                })
            })?;
            steps.push(Some(GetStep {
                name: member.name().to_string(),
                read,
            }));
        }

        let target = target(request);
        debug!(
            "compiled {:?} getter for '{}' over {} slot(s)",
            target.receiver,
            target.name,
            steps.len()
        );
        Ok(MultiGetter::new(target, steps))
    }
}

fn check_mode(request: &AccessRequest, mode: AccessMode) -> Result<(), RequestError> {
    if request.mode() == mode {
        return Ok(());
    }
    Err(RequestError::ModeMismatch {
        type_name: request.target_name().to_string(),
        resolved: request.mode().as_str(),
        requested: mode.as_str(),
    })
}

// Slots built by `from_slots` may carry members the mode cannot use.
fn not_usable(request: &AccessRequest, error: MemberError) -> RequestError {
    let name = match error {
        MemberError::NotReadable { member } | MemberError::NotWritable { member } => member,
        other => other.to_string(),
    };
    RequestError::MemberNotFound {
        type_name: request.target_name().to_string(),
        name,
    }
}

fn target(request: &AccessRequest) -> Target {
    let receiver = if request.is_static() {
        Receiver::Static
    } else if request.target_kind().is_value() {
        Receiver::Value
    } else {
        Receiver::Reference
    };
    Target {
        hash: request.target(),
        name: request.target_name().to_string(),
        receiver,
    }
}
