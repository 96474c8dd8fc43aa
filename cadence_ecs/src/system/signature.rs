//! Utilities for signature of *systems* in ECS.

use crate::{Component, ComponentRegistry, Result, Signature};

/// Requirement of the *system* in ECS.
///
/// Describes which component types are handled by the system.
/// Implemented for the empty tuple and for tuples of components up to 12 elements.
///
pub trait Requirement {
    /// Registers each component type of this requirement
    /// and returns union of their signatures.
    fn signature(components: &mut ComponentRegistry) -> Result<Signature>;
}

impl Requirement for () {
    fn signature(_: &mut ComponentRegistry) -> Result<Signature> {
        Ok(Signature::EMPTY)
    }
}

macro_rules! impl_requirement {
    ($($name:ident),+) => {
        impl<$($name),+> Requirement for ($($name,)+)
        where
            $($name: Component,)+
        {
            fn signature(components: &mut ComponentRegistry) -> Result<Signature> {
                let mut signature = Signature::EMPTY;
                $(signature |= components.register::<$name>()?;)+
                Ok(signature)
            }
        }
    };
}

impl_requirement!(A);
impl_requirement!(A, B);
impl_requirement!(A, B, C);
impl_requirement!(A, B, C, D);
impl_requirement!(A, B, C, D, E);
impl_requirement!(A, B, C, D, E, F);
impl_requirement!(A, B, C, D, E, F, G);
impl_requirement!(A, B, C, D, E, F, G, H);
impl_requirement!(A, B, C, D, E, F, G, H, I);
impl_requirement!(A, B, C, D, E, F, G, H, I, J);
impl_requirement!(A, B, C, D, E, F, G, H, I, J, K);
impl_requirement!(A, B, C, D, E, F, G, H, I, J, K, L);
